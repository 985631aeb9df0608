use kanban_core::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub button: Color,
    pub danger: Color,
    pub edit_bg: Color,
}

pub const DARK: Palette = Palette {
    background: Color::Rgb(28, 28, 28),
    text: Color::Rgb(230, 230, 230),
    muted: Color::DarkGray,
    border: Color::Gray,
    accent: Color::Cyan,
    button: Color::LightBlue,
    danger: Color::LightRed,
    edit_bg: Color::Rgb(55, 55, 55),
};

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(250, 250, 250),
    text: Color::Rgb(28, 28, 28),
    muted: Color::Gray,
    border: Color::DarkGray,
    accent: Color::Blue,
    button: Color::Blue,
    danger: Color::Red,
    edit_bg: Color::Rgb(225, 225, 225),
};

pub fn palette(mode: ThemeMode) -> Palette {
    match mode {
        ThemeMode::Dark => DARK,
        ThemeMode::Light => LIGHT,
    }
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn title(&self) -> Style {
        self.base().add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn drop_target_border(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn button(&self) -> Style {
        Style::default()
            .fg(self.button)
            .add_modifier(Modifier::BOLD)
    }

    pub fn delete_button(&self) -> Style {
        Style::default().fg(self.danger)
    }

    pub fn separator(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn edit_field(&self) -> Style {
        Style::default().fg(self.text).bg(self.edit_bg)
    }

    pub fn footer(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn preview(&self, dim: bool) -> Style {
        let style = Style::default().fg(self.text).bg(self.edit_bg);
        if dim {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }
}
