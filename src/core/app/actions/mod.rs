mod filters;
mod loading;
mod navigation;

use tokio::sync::mpsc;

use super::App;
use crate::core::episodes::EpisodeRequest;
use crate::core::fetcher::{FetchedPage, PageRequest};
use crate::core::filter::FilterField;

pub enum AppAction {
    NextPage,
    PreviousPage,
    ScrollBy {
        rows: i32,
    },
    ScrollToStart,
    ScrollToEnd,
    Quit,
    CycleFilter {
        field: FilterField,
        forward: bool,
    },
    CycleFocusedFilter {
        forward: bool,
    },
    FocusNextFilter,
    SetFilter {
        field: FilterField,
        value: String,
    },
    PageLoaded {
        request_id: u64,
        page: FetchedPage,
    },
    PageLoadFailed {
        request_id: u64,
        page: u32,
        error: String,
    },
    EpisodeLoaded {
        url: String,
        request_id: u64,
        result: Result<String, String>,
    },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            let _ = self.tx.send(AppActionEnvelope {
                action,
                context: ctx,
            });
        }
    }
}

/// Side effects requested by a state transition, executed by the event loop.
#[derive(Debug)]
pub enum AppCommand {
    FetchPage(PageRequest),
    FetchEpisode(EpisodeRequest),
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        commands.extend(apply_action(app, envelope.action, envelope.context));
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Vec<AppCommand> {
    match action {
        AppAction::NextPage
        | AppAction::PreviousPage
        | AppAction::ScrollBy { .. }
        | AppAction::ScrollToStart
        | AppAction::ScrollToEnd
        | AppAction::Quit => navigation::handle_navigation_action(app, action, ctx),

        AppAction::CycleFilter { .. }
        | AppAction::CycleFocusedFilter { .. }
        | AppAction::FocusNextFilter
        | AppAction::SetFilter { .. } => filters::handle_filter_action(app, action),

        AppAction::PageLoaded { .. }
        | AppAction::PageLoadFailed { .. }
        | AppAction::EpisodeLoaded { .. } => loading::handle_loading_action(app, action),
    }
}
