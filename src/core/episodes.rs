//! First-episode name lookup for character cards.
//!
//! Each card shows the name of the first episode its character appeared in.
//! Lookups go through [`EpisodeNameCache`], keyed by episode URL, so cards
//! sharing an episode share one request. A lookup is cancelled once no
//! visible card refers to it.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::{ApiError, Character, CharacterApi};
use crate::core::constants::{LOADING_EPISODE, NO_EPISODE_DATA};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EpisodeLabel {
    NoData,
    Loading,
    Name(String),
}

impl EpisodeLabel {
    pub fn as_str(&self) -> &str {
        match self {
            EpisodeLabel::NoData => NO_EPISODE_DATA,
            EpisodeLabel::Loading => LOADING_EPISODE,
            EpisodeLabel::Name(name) => name,
        }
    }
}

impl fmt::Display for EpisodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn first_episode_url(character: &Character) -> Option<&str> {
    character.episode.first().map(String::as_str)
}

/// Fetch the name of the first episode in `episode_urls`. An empty list
/// yields [`EpisodeLabel::NoData`] without touching the network.
pub async fn resolve_first_episode_name(
    api: &dyn CharacterApi,
    episode_urls: &[String],
) -> Result<EpisodeLabel, ApiError> {
    let Some(first) = episode_urls.first() else {
        return Ok(EpisodeLabel::NoData);
    };
    let episode = api.fetch_episode(first).await?;
    Ok(EpisodeLabel::Name(episode.name))
}

/// A lookup the caller should run. Dropping the result is fine; cancelling
/// `cancel_token` means the cache no longer wants it.
#[derive(Debug, Clone)]
pub struct EpisodeRequest {
    pub url: String,
    pub request_id: u64,
    pub cancel_token: CancellationToken,
}

#[derive(Debug)]
enum EpisodeEntry {
    Loading {
        request_id: u64,
        cancel_token: CancellationToken,
    },
    Resolved(String),
    Failed,
}

#[derive(Debug, Default)]
pub struct EpisodeNameCache {
    entries: HashMap<String, EpisodeEntry>,
    next_request_id: u64,
}

impl EpisodeNameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cache in line with the cards currently on screen.
    ///
    /// Returns one request per first-episode URL that is neither resolved nor
    /// already in flight. Outstanding and failed entries that no visible
    /// card needs are dropped, and in-flight ones are cancelled. Resolved
    /// names are kept for later pages.
    pub fn reconcile(&mut self, visible: &[Character]) -> Vec<EpisodeRequest> {
        let mut wanted: Vec<&str> = Vec::new();
        let mut seen = HashSet::new();
        for url in visible.iter().filter_map(first_episode_url) {
            if seen.insert(url) {
                wanted.push(url);
            }
        }

        self.entries.retain(|url, entry| {
            if seen.contains(url.as_str()) {
                return true;
            }
            match entry {
                EpisodeEntry::Resolved(_) => true,
                EpisodeEntry::Loading { cancel_token, .. } => {
                    debug!(url = %url, "cancelling episode lookup for hidden card");
                    cancel_token.cancel();
                    false
                }
                EpisodeEntry::Failed => false,
            }
        });

        let mut requests = Vec::new();
        for url in wanted {
            if self.entries.contains_key(url) {
                continue;
            }
            self.next_request_id += 1;
            let cancel_token = CancellationToken::new();
            self.entries.insert(
                url.to_string(),
                EpisodeEntry::Loading {
                    request_id: self.next_request_id,
                    cancel_token: cancel_token.clone(),
                },
            );
            requests.push(EpisodeRequest {
                url: url.to_string(),
                request_id: self.next_request_id,
                cancel_token,
            });
        }
        requests
    }

    /// Record the outcome of a lookup. Returns true when it was applied;
    /// results for cancelled or superseded lookups are ignored.
    pub fn complete(&mut self, url: &str, request_id: u64, result: Result<String, String>) -> bool {
        let Some(entry) = self.entries.get_mut(url) else {
            return false;
        };
        match entry {
            EpisodeEntry::Loading {
                request_id: current,
                ..
            } if *current == request_id => {}
            _ => return false,
        }

        *entry = match result {
            Ok(name) => EpisodeEntry::Resolved(name),
            Err(error) => {
                warn!(url, error = %error, "episode lookup failed");
                EpisodeEntry::Failed
            }
        };
        true
    }

    /// What a card for `character` should display right now. A failed lookup
    /// keeps showing the loading text.
    pub fn label_for(&self, character: &Character) -> EpisodeLabel {
        let Some(url) = first_episode_url(character) else {
            return EpisodeLabel::NoData;
        };
        match self.entries.get(url) {
            Some(EpisodeEntry::Resolved(name)) => EpisodeLabel::Name(name.clone()),
            _ => EpisodeLabel::Loading,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry, EpisodeEntry::Loading { .. }))
            .count()
    }

    /// Cancel every outstanding lookup, e.g. on shutdown.
    pub fn cancel_all(&mut self) {
        self.entries.retain(|_, entry| match entry {
            EpisodeEntry::Loading { cancel_token, .. } => {
                cancel_token.cancel();
                false
            }
            _ => true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{episode_url, sample_character, with_episodes, FakeApi};

    #[tokio::test]
    async fn empty_episode_list_needs_no_request() {
        let api = FakeApi::new();
        let label = resolve_first_episode_name(&api, &[]).await.expect("no error");
        assert_eq!(label, EpisodeLabel::NoData);
        assert_eq!(label.to_string(), "No episode data");
        assert!(api.episode_calls().is_empty());
    }

    #[tokio::test]
    async fn only_first_episode_is_fetched() {
        let api = FakeApi::new()
            .with_episode(&episode_url(1), "Pilot")
            .with_episode(&episode_url(2), "Lawnmower Dog");

        let label = resolve_first_episode_name(&api, &[episode_url(1), episode_url(2)])
            .await
            .expect("resolves");

        assert_eq!(label, EpisodeLabel::Name("Pilot".to_string()));
        assert_eq!(api.episode_calls(), vec![episode_url(1)]);
    }

    #[tokio::test]
    async fn resolver_surfaces_fetch_errors() {
        let api = FakeApi::new();
        let result = resolve_first_episode_name(&api, &[episode_url(9)]).await;
        assert!(result.is_err());
    }

    #[test]
    fn shared_episode_is_requested_once() {
        let mut cache = EpisodeNameCache::new();
        let visible = vec![
            sample_character(1, "Rick Sanchez", "Alive", "Male"),
            sample_character(2, "Morty Smith", "Alive", "Male"),
            with_episodes(
                sample_character(3, "Squanchy", "Alive", "Male"),
                &[episode_url(27)],
            ),
        ];

        let requests = cache.reconcile(&visible);
        let urls: Vec<&str> = requests.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec![episode_url(1).as_str(), episode_url(27).as_str()]);

        assert!(cache.reconcile(&visible).is_empty());
        assert_eq!(cache.in_flight(), 2);
    }

    #[test]
    fn labels_follow_lookup_state() {
        let mut cache = EpisodeNameCache::new();
        let rick = sample_character(1, "Rick Sanchez", "Alive", "Male");
        let nobody = with_episodes(sample_character(2, "Nobody", "unknown", "unknown"), &[]);

        assert_eq!(cache.label_for(&nobody), EpisodeLabel::NoData);
        assert!(cache.reconcile(&[nobody.clone()]).is_empty());

        let request = cache.reconcile(&[rick.clone()]).remove(0);
        assert_eq!(cache.label_for(&rick), EpisodeLabel::Loading);

        assert!(cache.complete(&request.url, request.request_id, Ok("Pilot".into())));
        assert_eq!(cache.label_for(&rick), EpisodeLabel::Name("Pilot".into()));
        assert_eq!(cache.in_flight(), 0);
    }

    #[test]
    fn failed_lookup_stays_loading_without_retry() {
        let mut cache = EpisodeNameCache::new();
        let rick = sample_character(1, "Rick Sanchez", "Alive", "Male");

        let request = cache.reconcile(&[rick.clone()]).remove(0);
        assert!(cache.complete(&request.url, request.request_id, Err("boom".into())));

        assert_eq!(cache.label_for(&rick), EpisodeLabel::Loading);
        assert!(cache.reconcile(&[rick.clone()]).is_empty());
    }

    #[test]
    fn failed_lookup_is_retried_after_card_returns() {
        let mut cache = EpisodeNameCache::new();
        let rick = sample_character(1, "Rick Sanchez", "Alive", "Male");

        let request = cache.reconcile(&[rick.clone()]).remove(0);
        cache.complete(&request.url, request.request_id, Err("boom".into()));

        assert!(cache.reconcile(&[]).is_empty());
        let retry = cache.reconcile(&[rick]);
        assert_eq!(retry.len(), 1);
        assert!(retry[0].request_id > request.request_id);
    }

    #[test]
    fn hidden_card_cancels_its_lookup() {
        let mut cache = EpisodeNameCache::new();
        let rick = sample_character(1, "Rick Sanchez", "Alive", "Male");
        let request = cache.reconcile(&[rick]).remove(0);

        assert!(cache.reconcile(&[]).is_empty());
        assert!(request.cancel_token.is_cancelled());
        assert!(!cache.complete(&request.url, request.request_id, Ok("Pilot".into())));
        assert_eq!(cache.in_flight(), 0);
    }

    #[test]
    fn resolved_names_survive_page_changes() {
        let mut cache = EpisodeNameCache::new();
        let rick = sample_character(1, "Rick Sanchez", "Alive", "Male");
        let request = cache.reconcile(&[rick.clone()]).remove(0);
        cache.complete(&request.url, request.request_id, Ok("Pilot".into()));

        assert!(cache.reconcile(&[]).is_empty());
        assert!(cache.reconcile(&[rick.clone()]).is_empty());
        assert_eq!(cache.label_for(&rick), EpisodeLabel::Name("Pilot".into()));
    }

    #[test]
    fn superseded_completion_is_ignored() {
        let mut cache = EpisodeNameCache::new();
        let rick = sample_character(1, "Rick Sanchez", "Alive", "Male");
        let stale = cache.reconcile(&[rick.clone()]).remove(0);
        cache.reconcile(&[]);
        let fresh = cache.reconcile(&[rick.clone()]).remove(0);

        assert!(!cache.complete(&stale.url, stale.request_id, Ok("Old".into())));
        assert!(cache.complete(&fresh.url, fresh.request_id, Ok("Pilot".into())));
        assert_eq!(cache.label_for(&rick), EpisodeLabel::Name("Pilot".into()));
    }

    #[test]
    fn cancel_all_cancels_outstanding_tokens() {
        let mut cache = EpisodeNameCache::new();
        let requests = cache.reconcile(&[sample_character(1, "Rick Sanchez", "Alive", "Male")]);
        cache.cancel_all();
        assert!(requests.iter().all(|r| r.cancel_token.is_cancelled()));
        assert_eq!(cache.in_flight(), 0);
    }
}
