//! # CountryList Component
//!
//! Scrollable list of the filtered countries with a favorite marker per row.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CountryListState` lives in `TuiState` (selection survives frames)
//! - `CountryList` is created each frame with borrowed state and props
//!
//! The filtered view can shrink under the selection at any time (a keystroke
//! in the search box), so the selection is clamped on every render.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::favorites::FavoriteSet;
use crate::source::Country;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

const PAGE_SIZE: usize = 10;
const FAVORITE_MARK: &str = "★";
const NOT_FAVORITE_MARK: &str = "☆";

/// Persistent state for the country list.
#[derive(Default)]
pub struct CountryListState {
    pub selected: usize,
    pub list_state: ListState,
}

impl CountryListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the selection. `len` is the current filtered view length.
    pub fn handle_event(&mut self, event: &TuiEvent, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let last = len - 1;
        self.selected = match event {
            TuiEvent::CursorUp => self.selected.saturating_sub(1),
            TuiEvent::CursorDown => (self.selected + 1).min(last),
            TuiEvent::PageUp => self.selected.saturating_sub(PAGE_SIZE),
            TuiEvent::PageDown => (self.selected + PAGE_SIZE).min(last),
            _ => self.selected,
        };
    }

    /// Back to the top, e.g. after the filter changed.
    pub fn reset(&mut self) {
        self.selected = 0;
        *self.list_state.offset_mut() = 0;
    }

    /// Index of the selected row, if the view has any rows.
    pub fn selection(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.selected.min(len - 1))
    }
}

/// Transient render wrapper for the country list.
pub struct CountryList<'a> {
    state: &'a mut CountryListState,
    countries: &'a [&'a Country],
    favorites: &'a FavoriteSet,
    palette: Palette,
}

impl<'a> CountryList<'a> {
    pub fn new(
        state: &'a mut CountryListState,
        countries: &'a [&'a Country],
        favorites: &'a FavoriteSet,
        palette: Palette,
    ) -> Self {
        Self {
            state,
            countries,
            favorites,
            palette,
        }
    }
}

impl Component for CountryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = self.palette;
        let block = Block::bordered()
            .border_style(Style::default().fg(palette.border).bg(palette.background))
            .title_bottom(
                Line::from(" ↑↓ Select  Enter Details  Ctrl+F Favorite ").centered(),
            )
            .style(palette.base());

        if self.countries.is_empty() {
            let empty = Paragraph::new("No countries match.")
                .style(palette.muted())
                .centered()
                .block(block);
            frame.render_widget(empty, area);
            self.state.list_state.select(None);
            return;
        }

        // Layout per row: "★ " + name (padded) + "  " + region
        let inner_width = area.width.saturating_sub(2) as usize;
        let region_width = 10;
        let name_width = inner_width.saturating_sub(2 + 2 + region_width);

        let items: Vec<ListItem> = self
            .countries
            .iter()
            .map(|country| {
                let is_favorite = self.favorites.contains(&country.name);
                let mark = if is_favorite { FAVORITE_MARK } else { NOT_FAVORITE_MARK };
                let mark_style = if is_favorite {
                    Style::default().fg(palette.favorite)
                } else {
                    Style::default().fg(palette.muted)
                };
                let name = truncate_to_width(&country.name, name_width);
                let padding = " ".repeat(name_width.saturating_sub(name.width()));

                ListItem::new(Line::from(vec![
                    Span::styled(mark, mark_style),
                    Span::raw(" "),
                    Span::styled(
                        format!("{name}{padding}"),
                        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(country.region.label(), Style::default().fg(palette.muted)),
                ]))
            })
            .collect();

        let selected = self.state.selection(self.countries.len());
        if let Some(idx) = selected {
            self.state.selected = idx;
        }
        self.state.list_state.select(selected);

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(palette.active_button_text)
                .bg(palette.active_button_bg),
        );
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate to fit within `max_width` display columns, adding "…" if needed.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
