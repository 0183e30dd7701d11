//! # RegionBar Component
//!
//! Row of region "buttons". The active one is highlighted. Tab / Shift+Tab
//! cycling is handled by the event loop; this component only draws.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::filter::RegionFilter;
use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct RegionBar {
    pub selected: RegionFilter,
    pub palette: Palette,
}

impl Component for RegionBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        let mut spans = Vec::new();
        for choice in RegionFilter::choices() {
            spans.push(Span::styled(
                format!(" {} ", choice.label()),
                palette.button(choice == self.selected),
            ));
            spans.push(Span::styled(" ", palette.base()));
        }
        spans.push(Span::styled("Tab to cycle", palette.muted()));

        frame.render_widget(Paragraph::new(Line::from(spans)).style(palette.base()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::ThemeMode;
    use crate::source::Region;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_active_region_highlighted() {
        let palette = Palette::for_mode(ThemeMode::Dark);
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        let mut bar = RegionBar {
            selected: RegionFilter::Only(Region::Asia),
            palette,
        };
        terminal.draw(|f| bar.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        let asia_col = text.find("Asia").unwrap() as u16;
        let all_col = text.find("All").unwrap() as u16;

        assert_eq!(buffer[(asia_col, 0)].bg, palette.active_button_bg);
        assert_eq!(buffer[(all_col, 0)].bg, palette.button_bg);
    }
}
