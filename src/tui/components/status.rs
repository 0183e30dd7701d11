//! # Status Screens
//!
//! Body shown instead of the list while the dataset is loading or after the
//! fetch failed.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Palette;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LoadingView {
    pub spinner_frame: usize,
    pub palette: Palette,
}

impl Component for LoadingView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let glyph = SPINNER[self.spinner_frame % SPINNER.len()];
        let line = Line::from(vec![
            Span::styled(glyph, Style::default().fg(self.palette.active_button_bg)),
            Span::styled(" Loading countries...", self.palette.base()),
        ]);
        render_centered(frame, area, vec![line], self.palette);
    }
}

pub struct FailedView<'a> {
    pub reason: &'a str,
    pub palette: Palette,
}

impl Component for FailedView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        let lines = vec![
            Line::from(Span::styled(
                "Failed to fetch countries.",
                Style::default().fg(palette.error).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(self.reason, palette.muted())),
            Line::from(""),
            Line::from(Span::styled(
                "Press Ctrl+R to retry",
                Style::default()
                    .fg(palette.active_button_bg)
                    .add_modifier(Modifier::UNDERLINED),
            )),
        ];
        render_centered(frame, area, lines, palette);
    }
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>, palette: Palette) {
    let height = lines.len() as u16;
    let [middle] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new("").style(palette.base()), area);
    frame.render_widget(
        Paragraph::new(lines).style(palette.base()).centered(),
        middle,
    );
}
