use tracing::{debug, warn};

use super::{App, AppAction, AppCommand};

pub(super) fn handle_loading_action(app: &mut App, action: AppAction) -> Vec<AppCommand> {
    match action {
        AppAction::PageLoaded { request_id, page } => {
            if !app.fetcher.finish(request_id) {
                debug!(request_id, page = page.page, "discarding stale page response");
                return Vec::new();
            }
            app.apply_page(page)
        }
        AppAction::PageLoadFailed {
            request_id,
            page,
            error,
        } => {
            if app.fetcher.finish(request_id) {
                // The previous page stays on screen; nothing is shown to the user.
                warn!(page, error = %error, "character page failed to load");
            } else {
                debug!(request_id, page, "ignoring failure of superseded page request");
            }
            Vec::new()
        }
        AppAction::EpisodeLoaded {
            url,
            request_id,
            result,
        } => {
            app.episodes.complete(&url, request_id, result);
            Vec::new()
        }
        _ => Vec::new(),
    }
}
