use super::{App, AppAction, AppCommand};
use crate::core::filter::FilterField;

pub(super) fn handle_filter_action(app: &mut App, action: AppAction) -> Vec<AppCommand> {
    let changed = match action {
        AppAction::CycleFilter { field, forward } => cycle(app, field, forward),
        AppAction::CycleFocusedFilter { forward } => {
            let field = app.ui.focus;
            cycle(app, field, forward)
        }
        AppAction::FocusNextFilter => {
            app.ui.focus_next();
            false
        }
        AppAction::SetFilter { field, value } => app.selection.set(field, value),
        _ => false,
    };

    if !changed {
        return Vec::new();
    }
    app.ui.scroll_row = 0;
    app.refresh_visible()
}

fn cycle(app: &mut App, field: FilterField, forward: bool) -> bool {
    let options = match field {
        FilterField::Status => &app.status_options,
        FilterField::Gender => &app.gender_options,
    };
    app.ui.focus = field;
    app.selection.cycle(field, options, forward)
}
