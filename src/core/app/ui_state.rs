use crate::core::filter::FilterField;
use crate::ui::theme::Theme;
use ratatui::prelude::Size;

/// Presentation state that does not affect which characters are shown.
pub struct UiState {
    pub theme: Theme,
    /// Filter control that Up/Down act on.
    pub focus: FilterField,
    /// First card row on screen.
    pub scroll_row: usize,
    pub exit_requested: bool,
    pub last_term_size: Size,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            focus: FilterField::Status,
            scroll_row: 0,
            exit_requested: false,
            last_term_size: Size::default(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.other();
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}
