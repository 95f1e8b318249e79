use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub background_color: Color,

    // Chrome
    pub title_style: Style,
    pub loading_style: Style,
    pub hint_style: Style,

    // Filter bar
    pub filter_label_style: Style,
    pub filter_value_style: Style,
    pub filter_focused_style: Style,
    pub filter_stale_style: Style,

    // Cards
    pub card_border_style: Style,
    pub card_name_style: Style,
    pub card_text_style: Style,
    pub card_muted_style: Style,

    // Status dot
    pub status_alive_style: Style,
    pub status_dead_style: Style,
    pub status_other_style: Style,

    // Pagination
    pub control_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,

            title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            loading_style: Style::default().fg(Color::Yellow),
            hint_style: Style::default().fg(Color::DarkGray),

            filter_label_style: Style::default().fg(Color::Gray),
            filter_value_style: Style::default().fg(Color::White),
            filter_focused_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            filter_stale_style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),

            card_border_style: Style::default().fg(Color::DarkGray),
            card_name_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            card_text_style: Style::default().fg(Color::Gray),
            card_muted_style: Style::default().fg(Color::DarkGray),

            status_alive_style: Style::default().fg(Color::Green),
            status_dead_style: Style::default().fg(Color::Red),
            status_other_style: Style::default().fg(Color::Gray),

            control_style: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,

            title_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            loading_style: Style::default().fg(Color::Magenta),
            hint_style: Style::default().fg(Color::Gray),

            filter_label_style: Style::default().fg(Color::DarkGray),
            filter_value_style: Style::default().fg(Color::Black),
            filter_focused_style: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            filter_stale_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),

            card_border_style: Style::default().fg(Color::Gray),
            card_name_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_text_style: Style::default().fg(Color::DarkGray),
            card_muted_style: Style::default().fg(Color::Gray),

            status_alive_style: Style::default().fg(Color::Green),
            status_dead_style: Style::default().fg(Color::Red),
            status_other_style: Style::default().fg(Color::Gray),

            control_style: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "dark" | "default" | "default-dark" => Self::dark_default(),
            "light" => Self::light(),
            // Fallback
            _ => Self::dark_default(),
        }
    }

    pub fn is_known(name: &str) -> bool {
        matches!(
            name.to_ascii_lowercase().as_str(),
            "dark" | "default" | "default-dark" | "light"
        )
    }

    /// Green for "Alive", red for "Dead", gray for anything else.
    pub fn status_style(&self, status: &str) -> Style {
        match status {
            "Alive" => self.status_alive_style,
            "Dead" => self.status_dead_style,
            _ => self.status_other_style,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_dot_colors() {
        let theme = Theme::dark_default();
        assert_eq!(theme.status_style("Alive").fg, Some(Color::Green));
        assert_eq!(theme.status_style("Dead").fg, Some(Color::Red));
        assert_eq!(theme.status_style("unknown").fg, Some(Color::Gray));
        // case matters, the API only ever sends "Alive"/"Dead"
        assert_eq!(theme.status_style("alive").fg, Some(Color::Gray));
    }

    #[test]
    fn unknown_theme_names_fall_back_to_dark() {
        assert_eq!(Theme::from_name("LIGHT").background_color, Color::White);
        assert_eq!(Theme::from_name("nope").background_color, Color::Black);
        assert!(Theme::is_known("Dark"));
        assert!(!Theme::is_known("dracula"));
    }
}
