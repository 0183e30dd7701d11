//! # TitleBar Component
//!
//! Top status line: app name, how many countries are shown, a transient
//! notice, and the theme toggle hint on the right.
//!
//! Stateless. All fields are props filled from the view-model each frame.
//! The notice wins over the counts when space is short.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct TitleBar {
    /// Countries in the filtered view
    pub shown: usize,
    /// Countries in the dataset
    pub total: usize,
    pub favorites: usize,
    /// When the dataset arrived, preformatted
    pub fetched_at: Option<String>,
    /// Transient non-blocking message (e.g. a failed save)
    pub notice: Option<String>,
    /// A favorites write is in flight
    pub saving: bool,
    /// e.g. "Dark Mode"
    pub theme_hint: &'static str,
    pub palette: Palette,
}

impl TitleBar {
    fn status_text(&self) -> String {
        let mut text = format!(
            "{}/{} countries | ★ {}",
            self.shown, self.total, self.favorites
        );
        if self.saving {
            text.push_str(" (saving)");
        }
        if let Some(ref at) = self.fetched_at {
            text.push_str(&format!(" | fetched {at}"));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        let hint = format!("Ctrl+T {} ", self.theme_hint);
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hint.len() as u16)])
                .areas(area);

        let mut spans = vec![Span::styled(
            " atlas ",
            Style::default()
                .fg(palette.active_button_text)
                .bg(palette.active_button_bg)
                .add_modifier(Modifier::BOLD),
        )];
        spans.push(Span::styled(" ", palette.base()));
        match self.notice {
            Some(ref notice) => spans.push(Span::styled(
                format!("{notice} (Esc to dismiss)"),
                Style::default().fg(palette.error).bg(palette.background),
            )),
            None => spans.push(Span::styled(self.status_text(), palette.muted())),
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(palette.base()), left);
        frame.render_widget(
            Paragraph::new(hint).style(palette.muted()).right_aligned(),
            right,
        );
    }
}
