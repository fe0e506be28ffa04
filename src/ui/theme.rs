use ratatui::style::Color;

use crate::clinic::EventCategory;

/// Terminal color for a status category. These mirror the hex palette used
/// by the web dashboard (#dc3545, #198754, #ffc107, #0d6efd).
pub fn category_color(category: EventCategory) -> Color {
    match category {
        EventCategory::Danger => Color::Rgb(0xdc, 0x35, 0x45),
        EventCategory::Success => Color::Rgb(0x19, 0x87, 0x54),
        EventCategory::Warning => Color::Rgb(0xff, 0xc1, 0x07),
        EventCategory::Primary => Color::Rgb(0x0d, 0x6e, 0xfd),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    pub weekday_header: Color,
    pub inactive_day: Color,
    pub status_bar: Color,
    pub command_mode: Color,
    pub filter_active: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            today: Color::Green,
            weekday_header: Color::Yellow,
            inactive_day: Color::DarkGray,
            status_bar: Color::White,
            command_mode: Color::White,
            filter_active: Color::Magenta,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            today: Color::Rgb(184, 187, 38),
            weekday_header: Color::Rgb(254, 128, 25),
            inactive_day: Color::Rgb(146, 131, 116),
            status_bar: Color::Rgb(235, 219, 178),
            command_mode: Color::Rgb(235, 219, 178),
            filter_active: Color::Rgb(211, 134, 155),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            today: Color::Rgb(163, 190, 140),
            weekday_header: Color::Rgb(235, 203, 139),
            inactive_day: Color::Rgb(76, 86, 106),
            status_bar: Color::Rgb(216, 222, 233),
            command_mode: Color::Rgb(216, 222, 233),
            filter_active: Color::Rgb(180, 142, 173),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "gruvbox", "nord"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_colors_match_dashboard_palette() {
        assert_eq!(
            category_color(EventCategory::Danger),
            Color::Rgb(0xdc, 0x35, 0x45)
        );
        assert_eq!(
            category_color(EventCategory::Success),
            Color::Rgb(0x19, 0x87, 0x54)
        );
        assert_eq!(
            category_color(EventCategory::Warning),
            Color::Rgb(0xff, 0xc1, 0x07)
        );
        assert_eq!(
            category_color(EventCategory::Primary),
            Color::Rgb(0x0d, 0x6e, 0xfd)
        );
    }

    #[test]
    fn unknown_theme_name_falls_back_to_default() {
        let theme = Theme::get_by_name("does-not-exist");
        assert_eq!(theme.name, "default");
    }
}
