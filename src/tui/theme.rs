use ratatui::style::Color;

use crate::model::{Category, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub green: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "green" => theme.green = color,
                "selection_bg" => theme.selection_bg = color,
                _ => {}
            }
        }

        theme
    }

    /// A category's own color tag, or the text color when it doesn't parse
    pub fn category_color(&self, category: &Category) -> Color {
        parse_hex_color(&category.color).unwrap_or(self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex_color("#4488FF"), Some(Color::Rgb(0x44, 0x88, 0xFF)));
        assert_eq!(parse_hex_color("4488FF"), None);
        assert_eq!(parse_hex_color("#48F"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn config_overrides_known_slots() {
        let mut ui = UiConfig::default();
        ui.colors.insert("highlight".into(), "#FF0000".into());
        ui.colors.insert("nonsense".into(), "#00FF00".into());
        ui.colors.insert("dim".into(), "not a color".into());
        let theme = Theme::from_config(&ui);
        assert_eq!(theme.highlight, Color::Rgb(0xFF, 0, 0));
        assert_eq!(theme.dim, Theme::default().dim);
    }

    #[test]
    fn category_color_falls_back() {
        let theme = Theme::default();
        let good = Category::new("work", "Work", "#4488FF");
        let bad = Category::new("home", "Home", "blue");
        assert_eq!(theme.category_color(&good), Color::Rgb(0x44, 0x88, 0xFF));
        assert_eq!(theme.category_color(&bad), theme.text);
    }
}
