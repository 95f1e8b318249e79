use super::{App, AppAction, AppActionContext, AppCommand};
use crate::ui::layout::CardGrid;

pub(super) fn handle_navigation_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Vec<AppCommand> {
    match action {
        AppAction::NextPage => {
            if !app.pagination.next() {
                return Vec::new();
            }
            vec![app.request_current_page()]
        }
        AppAction::PreviousPage => {
            if !app.pagination.previous() {
                return Vec::new();
            }
            vec![app.request_current_page()]
        }
        AppAction::ScrollBy { rows } => {
            let max = max_scroll(app, ctx);
            let current = app.ui.scroll_row.min(max);
            app.ui.scroll_row = if rows < 0 {
                current.saturating_sub(rows.unsigned_abs() as usize)
            } else {
                current.saturating_add(rows as usize).min(max)
            };
            Vec::new()
        }
        AppAction::ScrollToStart => {
            app.ui.scroll_row = 0;
            Vec::new()
        }
        AppAction::ScrollToEnd => {
            app.ui.scroll_row = max_scroll(app, ctx);
            Vec::new()
        }
        AppAction::Quit => {
            app.ui.request_exit();
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn max_scroll(app: &App, ctx: AppActionContext) -> usize {
    CardGrid::for_terminal(ctx.term_width, ctx.term_height, app.visible.len()).max_scroll()
}
