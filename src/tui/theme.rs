//! Colour palettes for the two theme modes.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub input_bg: Color,
    pub border: Color,
    pub button_bg: Color,
    pub button_text: Color,
    pub active_button_bg: Color,
    pub active_button_text: Color,
    pub favorite: Color,
    pub error: Color,
}

const LIGHT: Palette = Palette {
    background: Color::Rgb(0xff, 0xff, 0xff),
    text: Color::Rgb(0x00, 0x00, 0x00),
    muted: Color::Rgb(0x80, 0x80, 0x80),
    input_bg: Color::Rgb(0xf0, 0xf0, 0xf0),
    border: Color::Rgb(0xcc, 0xcc, 0xcc),
    button_bg: Color::Rgb(0xee, 0xee, 0xee),
    button_text: Color::Rgb(0x00, 0x00, 0x00),
    active_button_bg: Color::Rgb(0x00, 0x7a, 0xff),
    active_button_text: Color::Rgb(0xff, 0xff, 0xff),
    favorite: Color::Rgb(0xe0, 0xa0, 0x00),
    error: Color::Rgb(0xc0, 0x20, 0x20),
};

const DARK: Palette = Palette {
    background: Color::Rgb(0x12, 0x12, 0x12),
    text: Color::Rgb(0xff, 0xff, 0xff),
    muted: Color::Rgb(0x99, 0x99, 0x99),
    input_bg: Color::Rgb(0x1e, 0x1e, 0x1e),
    border: Color::Rgb(0x55, 0x55, 0x55),
    button_bg: Color::Rgb(0x33, 0x33, 0x33),
    button_text: Color::Rgb(0xff, 0xff, 0xff),
    active_button_bg: Color::Rgb(0x00, 0x7a, 0xff),
    active_button_text: Color::Rgb(0xff, 0xff, 0xff),
    favorite: Color::Rgb(0xff, 0xcc, 0x33),
    error: Color::Rgb(0xff, 0x6b, 0x6b),
};

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Palette {
        match mode {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted).bg(self.background)
    }

    pub fn button(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.active_button_text)
                .bg(self.active_button_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.button_text).bg(self.button_bg)
        }
    }
}
