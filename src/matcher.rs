use crate::mode::SearchMode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub topic: String,
    pub text: String,
}

/// Looks up cheat-sheet entries for a query in the given mode.
pub trait Matcher {
    fn find(&self, query: &str, mode: SearchMode) -> Vec<Entry>;
}

/// A freshly bootstrapped database: a directory with nothing indexed yet.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyDatabase;

impl Matcher for EmptyDatabase {
    fn find(&self, _query: &str, _mode: SearchMode) -> Vec<Entry> {
        Vec::new()
    }
}
