use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::buffer::QueryBuffer;
use crate::dispatch::Session;
use crate::matcher::Entry;
use crate::mode::SearchMode;

const HEADER: &str = "Press Ctl-C to exit";
const BAR_HEIGHT: u16 = 3;

/// Screen regions, in absolute terminal coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub results: Rect,
    pub search_bar: Rect,
    pub editor: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = area.height;
        let cols = area.width;

        let search_height = rows.saturating_sub(2);
        let search_width = cols / 3;
        let search_y = area.y + (rows - search_height) / 2;
        let search_x = area.x + 1;
        let results = Rect::new(search_x, search_y, search_width, search_height);

        let bar_y = (search_y + search_height).saturating_sub(BAR_HEIGHT + 1);
        let search_bar = Rect::new(
            search_x + 2,
            bar_y,
            search_width.saturating_sub(4),
            BAR_HEIGHT,
        );

        let editor = Rect::new(
            search_x + search_width + 1,
            search_y,
            cols.saturating_sub(search_width + 3),
            search_height,
        );

        let header = Rect::new(area.x + 2, area.y, cols.saturating_sub(2), rows.min(1));

        Self {
            header: header.intersection(area),
            results: results.intersection(area),
            search_bar: search_bar.intersection(area),
            editor: editor.intersection(area),
        }
    }

    /// Rows of the results window between its top border and the search bar.
    pub fn results_list(&self) -> Rect {
        let top = self.results.y + 1;
        let bottom = self.search_bar.y.min(self.results.bottom().saturating_sub(1));
        Rect::new(
            self.results.x + 1,
            top,
            self.results.width.saturating_sub(2),
            bottom.saturating_sub(top),
        )
    }
}

/// What the search bar shows and where the cursor goes, in bar-local columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderState<'a> {
    buffer: &'a QueryBuffer,
    pub prompt: &'static str,
    pub text: &'a str,
    pub text_column: usize,
    pub cursor_column: usize,
}

impl<'a> RenderState<'a> {
    pub fn new(mode: SearchMode, buffer: &'a QueryBuffer) -> Self {
        let prompt = mode.label();
        let text_column = 1 + prompt.len();
        Self {
            buffer,
            prompt,
            text: buffer.text(),
            text_column,
            cursor_column: text_column + buffer.cursor(),
        }
    }

    /// Horizontal scroll of the query text keeping the cursor inside a bar
    /// `width` columns wide.
    pub fn scroll(&self, width: u16) -> usize {
        let visible = (width as usize).saturating_sub(self.text_column);
        self.buffer.visual_scroll(visible)
    }

    /// Bar-local `(column, row)` of the cursor after scrolling.
    pub fn cursor_position(&self, width: u16) -> (u16, u16) {
        let column = self.cursor_column - self.scroll(width);
        let column = column.min((width as usize).saturating_sub(1));
        (column as u16, 1)
    }
}

pub fn draw(frame: &mut Frame, session: &Session) {
    let layout = ScreenLayout::compute(frame.area());

    frame.render_widget(Paragraph::new(HEADER), layout.header);

    // The results window goes first so the bar and cursor end up on top.
    frame.render_widget(bordered(), layout.results);
    draw_results(frame, layout.results_list(), &session.results);

    frame.render_widget(bordered(), layout.editor);

    let state = RenderState::new(session.mode, &session.buffer);
    draw_search_bar(frame, layout.search_bar, &state);
}

fn bordered() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

fn draw_results(frame: &mut Frame, area: Rect, results: &[Entry]) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    if results.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "No entries",
            Style::default().add_modifier(Modifier::DIM),
        ));
        frame.render_widget(placeholder, area);
        return;
    }
    let items: Vec<ListItem> = results
        .iter()
        .map(|entry| ListItem::new(format!("{}: {}", entry.topic, entry.text)))
        .collect();
    frame.render_widget(List::new(items), area);
}

fn draw_search_bar(frame: &mut Frame, bar: Rect, state: &RenderState) {
    if bar.height < 2 || bar.width < 2 {
        return;
    }
    let line_area = Rect::new(bar.x + 1, bar.y + 1, bar.width - 1, 1);
    let prompt_style = Style::default()
        .add_modifier(Modifier::ITALIC | Modifier::DIM | Modifier::SLOW_BLINK);
    let scroll = state.scroll(bar.width);
    let visible = state.text.get(scroll..).unwrap_or_default();
    let line = Line::from(vec![
        Span::styled(state.prompt, prompt_style),
        Span::raw(visible),
    ]);
    frame.render_widget(Paragraph::new(line), line_area);

    let (column, row) = state.cursor_position(bar.width);
    frame.set_cursor_position((bar.x + column, bar.y + row));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Command, DeleteKey};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn session_with(text: &str) -> Session {
        let mut session = Session::new(128, SearchMode::Topic, DeleteKey::Forward);
        for ch in text.chars() {
            session.apply(Command::Insert(ch));
        }
        session
    }

    fn row_text(buffer: &Buffer, x: u16, y: u16) -> String {
        (x..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn layout_matches_terminal_geometry() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 90, 30));
        assert_eq!(layout.results, Rect::new(1, 1, 30, 28));
        assert_eq!(layout.search_bar, Rect::new(3, 25, 26, 3));
        assert_eq!(layout.editor, Rect::new(32, 1, 57, 28));
        assert_eq!(layout.header, Rect::new(2, 0, 88, 1));
        assert_eq!(layout.results_list(), Rect::new(2, 2, 28, 23));
    }

    #[test]
    fn layout_survives_tiny_terminal() {
        let area = Rect::new(0, 0, 4, 2);
        let layout = ScreenLayout::compute(area);
        for rect in [layout.results, layout.search_bar, layout.editor, layout.header] {
            assert!(area.union(rect) == area);
        }
    }

    #[test]
    fn render_state_offsets_follow_prompt() {
        let session = session_with("tar");
        let state = RenderState::new(session.mode, &session.buffer);
        assert_eq!(state.prompt, "Topic Search: ");
        assert_eq!(state.prompt.len(), 14);
        assert_eq!(state.text_column, 15);
        assert_eq!(state.cursor_column, 18);

        let mut session = session;
        session.apply(Command::MoveStart);
        let state = RenderState::new(session.mode, &session.buffer);
        assert_eq!(state.cursor_column, 15);
    }

    #[test]
    fn scroll_keeps_cursor_inside_bar() {
        let session = session_with("abcdefghijklmnop");
        let state = RenderState::new(session.mode, &session.buffer);
        // 26 wide bar leaves 11 columns for text after the 15 column offset.
        assert_eq!(state.scroll(26), 6);
        assert_eq!(state.cursor_position(26), (25, 1));
        assert_eq!(state.scroll(80), 0);
        assert_eq!(state.cursor_position(80), (31, 1));
    }

    #[test]
    fn draws_prompt_query_and_cursor() {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let session = session_with("hi");
        terminal.draw(|frame| draw(frame, &session)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        assert!(row_text(&buffer, 0, 0).starts_with("  Press Ctl-C to exit"));
        assert_eq!(buffer[(1, 1)].symbol(), "╭");
        assert_eq!(buffer[(32, 1)].symbol(), "╭");
        assert!(row_text(&buffer, 4, 26).starts_with("Topic Search: hi"));
        assert!(row_text(&buffer, 2, 2).starts_with("No entries"));

        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!((cursor.x, cursor.y), (3 + 17, 26));
    }

    #[test]
    fn toggled_mode_changes_label() {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let mut session = session_with("x");
        session.apply(Command::ToggleMode);
        terminal.draw(|frame| draw(frame, &session)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        assert!(row_text(&buffer, 4, 26).starts_with("Total Search: x"));
    }

    #[test]
    fn lists_matcher_results() {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        let mut session = session_with("ls");
        session.results = vec![Entry {
            topic: "shell".to_string(),
            text: "ls -la".to_string(),
        }];
        terminal.draw(|frame| draw(frame, &session)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        assert!(row_text(&buffer, 2, 2).starts_with("shell: ls -la"));
    }
}
