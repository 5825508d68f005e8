use crate::ports::TextAttrs;
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BRAND_ACCENT: (u8, u8, u8) = (245, 170, 80);

pub(crate) fn brand_accent() -> Color {
    Color::Rgb(BRAND_ACCENT.0, BRAND_ACCENT.1, BRAND_ACCENT.2)
}

pub(crate) fn selection_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(brand_accent())
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn style_for(attrs: TextAttrs) -> Style {
    let mut style = if attrs.highlight {
        selection_style()
    } else {
        Style::default()
    };
    if attrs.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if attrs.dim {
        style = style.fg(Color::Gray);
    }
    style
}
