//! Browser state and the transitions that drive it.
//!
//! [`App`] holds everything the view renders: the raw page, the option sets
//! derived from it, the active filter selection, the visible subset and the
//! episode-name cache. It never performs I/O itself. State changes that
//! need the network return [`AppCommand`]s, which the event loop executes and
//! whose results come back as [`AppAction`]s.

pub mod actions;
pub mod ui_state;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};
pub use ui_state::UiState;

use tracing::debug;

use crate::api::{Character, PageInfo};
use crate::core::episodes::{EpisodeLabel, EpisodeNameCache};
use crate::core::fetcher::{CharacterListFetcher, FetchedPage};
use crate::core::filter::{apply_filters, FilterField, FilterSelection, OptionSet};
use crate::core::pagination::PaginationController;
use crate::ui::theme::Theme;

pub struct App {
    pub pagination: PaginationController,
    pub fetcher: CharacterListFetcher,
    /// Every character on the most recently loaded page.
    pub characters: Vec<Character>,
    pub status_options: OptionSet,
    pub gender_options: OptionSet,
    pub selection: FilterSelection,
    /// `characters` after applying `selection`.
    pub visible: Vec<Character>,
    pub episodes: EpisodeNameCache,
    pub page_info: Option<PageInfo>,
    /// Page the current `characters` came from, once anything has loaded.
    pub loaded_page: Option<u32>,
    pub ui: UiState,
}

impl App {
    pub fn new(start_page: u32, theme: Theme) -> Self {
        Self {
            pagination: PaginationController::new(start_page),
            fetcher: CharacterListFetcher::default(),
            characters: Vec::new(),
            status_options: OptionSet::all_only(),
            gender_options: OptionSet::all_only(),
            selection: FilterSelection::default(),
            visible: Vec::new(),
            episodes: EpisodeNameCache::new(),
            page_info: None,
            loaded_page: None,
            ui: UiState::new(theme),
        }
    }

    /// Commands to run once at startup.
    pub fn start(&mut self) -> Vec<AppCommand> {
        vec![self.request_current_page()]
    }

    pub fn request_current_page(&mut self) -> AppCommand {
        let request = self.fetcher.begin(self.pagination.page());
        debug!(
            page = request.page,
            request_id = request.request_id,
            "requesting character page"
        );
        AppCommand::FetchPage(request)
    }

    /// Replace the raw set and option sets with a freshly loaded page. The
    /// filter selection is kept as-is, even if the new page lacks its values.
    pub fn apply_page(&mut self, fetched: FetchedPage) -> Vec<AppCommand> {
        self.loaded_page = Some(fetched.page);
        self.characters = fetched.characters;
        self.status_options = fetched.status_options;
        self.gender_options = fetched.gender_options;
        self.page_info = fetched.info;
        self.ui.scroll_row = 0;
        self.refresh_visible()
    }

    /// Recompute the visible subset and start lookups for any episode names
    /// it needs.
    pub fn refresh_visible(&mut self) -> Vec<AppCommand> {
        self.visible = apply_filters(&self.characters, &self.selection);
        self.episodes
            .reconcile(&self.visible)
            .into_iter()
            .map(AppCommand::FetchEpisode)
            .collect()
    }

    pub fn options_for(&self, field: FilterField) -> &OptionSet {
        match field {
            FilterField::Status => &self.status_options,
            FilterField::Gender => &self.gender_options,
        }
    }

    pub fn is_selection_stale(&self, field: FilterField) -> bool {
        self.selection.is_stale(field, self.options_for(field))
    }

    pub fn episode_label(&self, character: &Character) -> EpisodeLabel {
        self.episodes.label_for(character)
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_loading()
    }

    /// Drop every outstanding network lookup; used when the browser exits.
    pub fn shutdown(&mut self) {
        self.episodes.cancel_all();
    }
}
