//! Key-to-action mapping for the browser.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::app::AppAction;
use crate::core::filter::FilterField;

/// Rows moved by PageUp/PageDown.
const PAGE_SCROLL_ROWS: i32 = 3;

pub fn action_for_key(key: &KeyEvent) -> Option<AppAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(AppAction::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,

        KeyCode::Char('n') | KeyCode::Right => AppAction::NextPage,
        KeyCode::Char('p') | KeyCode::Left => AppAction::PreviousPage,

        KeyCode::Char('s') => AppAction::CycleFilter {
            field: FilterField::Status,
            forward: true,
        },
        KeyCode::Char('S') => AppAction::CycleFilter {
            field: FilterField::Status,
            forward: false,
        },
        KeyCode::Char('g') => AppAction::CycleFilter {
            field: FilterField::Gender,
            forward: true,
        },
        KeyCode::Char('G') => AppAction::CycleFilter {
            field: FilterField::Gender,
            forward: false,
        },
        KeyCode::Tab | KeyCode::BackTab => AppAction::FocusNextFilter,
        KeyCode::Down => AppAction::CycleFocusedFilter { forward: true },
        KeyCode::Up => AppAction::CycleFocusedFilter { forward: false },

        KeyCode::Char('j') => AppAction::ScrollBy { rows: 1 },
        KeyCode::Char('k') => AppAction::ScrollBy { rows: -1 },
        KeyCode::PageDown => AppAction::ScrollBy {
            rows: PAGE_SCROLL_ROWS,
        },
        KeyCode::PageUp => AppAction::ScrollBy {
            rows: -PAGE_SCROLL_ROWS,
        },
        KeyCode::Home => AppAction::ScrollToStart,
        KeyCode::End => AppAction::ScrollToEnd,

        _ => return None,
    };
    Some(action)
}
