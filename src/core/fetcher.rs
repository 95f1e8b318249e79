//! Loading one page of characters and deriving its filter options.

use tracing::debug;

use crate::api::{ApiError, Character, CharacterApi, CharacterPage, PageInfo};
use crate::core::filter::{FilterField, OptionSet};

/// A successfully loaded page together with the option sets derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub page: u32,
    pub characters: Vec<Character>,
    pub status_options: OptionSet,
    pub gender_options: OptionSet,
    pub info: Option<PageInfo>,
}

impl FetchedPage {
    pub fn from_response(page: u32, response: CharacterPage) -> Self {
        let status_options = derive_options(&response.results, FilterField::Status);
        let gender_options = derive_options(&response.results, FilterField::Gender);
        Self {
            page,
            characters: response.results,
            status_options,
            gender_options,
            info: response.info,
        }
    }
}

/// "All" plus the distinct values of `field`, in first-seen order.
pub fn derive_options(characters: &[Character], field: FilterField) -> OptionSet {
    OptionSet::from_characters(characters, field)
}

pub async fn fetch_page(api: &dyn CharacterApi, page: u32) -> Result<FetchedPage, ApiError> {
    let response = api.fetch_character_page(page).await?;
    debug!(page, count = response.results.len(), "character page loaded");
    Ok(FetchedPage::from_response(page, response))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub request_id: u64,
}

/// Hands out request ids for page loads so that only the most recent one is
/// ever applied. Completions arriving out of order carry an older id and are
/// dropped.
#[derive(Debug, Default)]
pub struct CharacterListFetcher {
    latest_request_id: u64,
    outstanding: Option<u64>,
}

impl CharacterListFetcher {
    pub fn begin(&mut self, page: u32) -> PageRequest {
        self.latest_request_id += 1;
        self.outstanding = Some(self.latest_request_id);
        PageRequest {
            page,
            request_id: self.latest_request_id,
        }
    }

    pub fn is_current(&self, request_id: u64) -> bool {
        request_id == self.latest_request_id
    }

    /// Mark a request as finished. Returns false (and changes nothing) when
    /// the request has been superseded.
    pub fn finish(&mut self, request_id: u64) -> bool {
        if !self.is_current(request_id) {
            return false;
        }
        self.outstanding = None;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.outstanding.is_some()
    }
}
