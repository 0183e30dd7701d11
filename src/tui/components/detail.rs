//! # Detail Component
//!
//! Full-screen, read-only view of one country. Opened with Enter on the
//! list, dismissed with Esc. Content scrolls (long timezone lists) through
//! `tui-scrollview`.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::detail::CountryDetail;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Persistent state while the detail view is open.
pub struct DetailState {
    /// Country name, used to toggle its favorite from inside the view.
    pub name: String,
    pub detail: CountryDetail,
    pub scroll: ScrollViewState,
}

impl DetailState {
    pub fn new(detail: CountryDetail) -> Self {
        Self {
            name: detail.title.clone(),
            detail,
            scroll: ScrollViewState::default(),
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::CursorUp => self.scroll.scroll_up(),
            TuiEvent::CursorDown => self.scroll.scroll_down(),
            TuiEvent::PageUp => self.scroll.scroll_page_up(),
            TuiEvent::PageDown => self.scroll.scroll_page_down(),
            _ => {}
        }
    }
}

fn field<'a>(label: &'a str, value: &'a str, palette: Palette) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(palette.muted)),
        Span::styled(value, Style::default().fg(palette.text)),
    ])
}

/// Builds the scrollable body for a detail record.
fn body_lines(detail: &CountryDetail, palette: Palette) -> Vec<Line<'_>> {
    let mut lines = vec![
        field("Flag", &detail.flag, palette),
        field("Region", &detail.region, palette),
        field("Population", &detail.population, palette),
        field("Languages", &detail.languages, palette),
        field("Currencies", &detail.currencies, palette),
        Line::from(Span::styled("Timezones:", Style::default().fg(palette.muted))),
    ];
    lines.extend(
        detail
            .timezones
            .iter()
            .map(|tz| Line::from(Span::styled(tz.as_str(), Style::default().fg(palette.text)))),
    );
    lines
}

/// Transient render wrapper for the detail view.
pub struct DetailView<'a> {
    state: &'a mut DetailState,
    is_favorite: bool,
    palette: Palette,
}

impl<'a> DetailView<'a> {
    pub fn new(state: &'a mut DetailState, is_favorite: bool, palette: Palette) -> Self {
        Self {
            state,
            is_favorite,
            palette,
        }
    }
}

impl Component for DetailView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        frame.render_widget(Clear, area);

        let mark = if self.is_favorite { " ★" } else { "" };
        let block = Block::bordered()
            .border_style(Style::default().fg(palette.border).bg(palette.background))
            .title(Line::from(Span::styled(
                format!(" {}{} ", self.state.detail.title, mark),
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            )))
            .title_bottom(Line::from(" Esc Back  Ctrl+F Favorite  ↑↓ Scroll ").centered())
            .style(palette.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = body_lines(&self.state.detail, palette);
        let content_width = inner.width.saturating_sub(1);
        let paragraph = Paragraph::new(lines)
            .style(palette.base())
            .wrap(Wrap { trim: false });
        let height = (paragraph.line_count(content_width) as u16).max(1);

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::ThemeMode;
    use crate::source::Region;
    use crate::test_support::country;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn chad_detail() -> CountryDetail {
        let mut chad = country("Chad", Region::Africa);
        chad.population = 16425859;
        chad.timezones = vec!["UTC+01:00".to_string()];
        CountryDetail::from_country(&chad)
    }

    #[test]
    fn test_body_lines_include_every_field() {
        let detail = chad_detail();
        let lines = body_lines(&detail, Palette::for_mode(ThemeMode::Light));
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(text[1], "Region: Africa");
        assert_eq!(text[2], "Population: 16,425,859");
        assert_eq!(text[3], "Languages: N/A");
        assert_eq!(text.last().unwrap(), "- UTC+01:00");
    }

    #[test]
    fn test_render_shows_title_and_favorite_mark() {
        let mut state = DetailState::new(chad_detail());
        assert_eq!(state.name, "Chad");
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| {
                DetailView::new(&mut state, true, Palette::for_mode(ThemeMode::Dark))
                    .render(f, f.area())
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Chad ★"));
        assert!(text.contains("Population: 16,425,859"));
    }
}
