use serde::Deserialize;

/// Which part of the database a query targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    WholeDatabase,
    #[default]
    Topic,
}

impl SearchMode {
    pub fn toggle(self) -> Self {
        match self {
            SearchMode::WholeDatabase => SearchMode::Topic,
            SearchMode::Topic => SearchMode::WholeDatabase,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchMode::WholeDatabase => "Total Search: ",
            SearchMode::Topic => "Topic Search: ",
        }
    }
}
