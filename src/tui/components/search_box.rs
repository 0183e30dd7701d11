//! # SearchBox Component
//!
//! Single-line text field that drives the search filter. Every edit emits the
//! full buffer so the view-model can recompute the filtered view.
//!
//! The buffer is internal state. The palette is a prop synced from the
//! view-model's theme before each frame.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

const PLACEHOLDER: &str = "Search country...";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Buffer changed; carries the new text.
    Changed(String),
}

pub struct SearchBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Colours (Prop)
    pub palette: Palette,
}

impl SearchBox {
    pub fn new(palette: Palette) -> Self {
        Self {
            buffer: String::new(),
            palette,
        }
    }

    /// Empties the buffer. Returns the change event if there was anything to clear.
    pub fn clear(&mut self) -> Option<SearchEvent> {
        if self.buffer.is_empty() {
            return None;
        }
        self.buffer.clear();
        Some(SearchEvent::Changed(String::new()))
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
            }
            TuiEvent::Paste(text) => {
                // Single line: newlines from the clipboard become spaces
                let flattened: String = text
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.buffer.push_str(flattened.trim_end());
            }
            TuiEvent::Backspace => {
                self.buffer.pop()?;
            }
            _ => return None,
        }
        Some(SearchEvent::Changed(self.buffer.clone()))
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        let input_style = Style::default().fg(palette.text).bg(palette.input_bg);

        let (content, style) = if self.buffer.is_empty() {
            (PLACEHOLDER, Style::default().fg(palette.muted).bg(palette.input_bg))
        } else {
            (self.buffer.as_str(), input_style)
        };

        let block = Block::bordered()
            .border_style(Style::default().fg(palette.border).bg(palette.background))
            .style(input_style);

        // Keep the cursor visible by scrolling long queries horizontally
        let inner_width = area.width.saturating_sub(2) as usize;
        let typed_width = unicode_width::UnicodeWidthStr::width(self.buffer.as_str());
        let scroll_x = typed_width.saturating_sub(inner_width.saturating_sub(1)) as u16;

        let paragraph = Paragraph::new(content)
            .style(style)
            .block(block)
            .scroll((0, scroll_x));
        frame.render_widget(paragraph, area);

        let cursor_x = area.x + 1 + (typed_width as u16).saturating_sub(scroll_x);
        frame.set_cursor_position(Position::new(cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::ThemeMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn search_box() -> SearchBox {
        SearchBox::new(Palette::for_mode(ThemeMode::Light))
    }

    #[test]
    fn test_typing_emits_full_buffer() {
        let mut sb = search_box();
        sb.handle_event(&TuiEvent::InputChar('c'));
        let event = sb.handle_event(&TuiEvent::InputChar('h'));
        assert_eq!(event, Some(SearchEvent::Changed("ch".to_string())));
    }

    #[test]
    fn test_backspace_on_empty_is_silent() {
        let mut sb = search_box();
        assert_eq!(sb.handle_event(&TuiEvent::Backspace), None);
        sb.handle_event(&TuiEvent::InputChar('é'));
        assert_eq!(
            sb.handle_event(&TuiEvent::Backspace),
            Some(SearchEvent::Changed(String::new()))
        );
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut sb = search_box();
        sb.handle_event(&TuiEvent::Paste("New\nZealand\n".to_string()));
        assert_eq!(sb.buffer, "New Zealand");
    }

    #[test]
    fn test_clear() {
        let mut sb = search_box();
        assert_eq!(sb.clear(), None);
        sb.handle_event(&TuiEvent::InputChar('x'));
        assert_eq!(sb.clear(), Some(SearchEvent::Changed(String::new())));
        assert!(sb.buffer.is_empty());
    }

    #[test]
    fn test_ignores_navigation() {
        let mut sb = search_box();
        assert_eq!(sb.handle_event(&TuiEvent::CursorDown), None);
    }

    #[test]
    fn test_renders_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        let mut sb = search_box();
        terminal.draw(|f| sb.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Search country..."));
    }
}
