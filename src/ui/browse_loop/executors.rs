//! Background tasks behind [`AppCommand`]s. Each task reports back through the
//! action dispatcher; none of them touch [`App`](crate::core::app::App)
//! directly.

use std::sync::Arc;

use tracing::debug;

use crate::api::CharacterApi;
use crate::core::app::{AppAction, AppActionContext, AppActionDispatcher, AppCommand};
use crate::core::episodes::EpisodeRequest;
use crate::core::fetcher::{fetch_page, PageRequest};

pub fn execute_commands(
    api: &Arc<dyn CharacterApi>,
    dispatcher: &AppActionDispatcher,
    commands: Vec<AppCommand>,
) {
    for command in commands {
        match command {
            AppCommand::FetchPage(request) => {
                spawn_page_fetch(api.clone(), dispatcher.clone(), request);
            }
            AppCommand::FetchEpisode(request) => {
                spawn_episode_fetch(api.clone(), dispatcher.clone(), request);
            }
        }
    }
}

fn spawn_page_fetch(
    api: Arc<dyn CharacterApi>,
    dispatcher: AppActionDispatcher,
    request: PageRequest,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let PageRequest { page, request_id } = request;
        let action = match fetch_page(api.as_ref(), page).await {
            Ok(page) => AppAction::PageLoaded { request_id, page },
            Err(err) => AppAction::PageLoadFailed {
                request_id,
                page,
                error: err.to_string(),
            },
        };
        dispatcher.dispatch_many([action], AppActionContext::default());
    })
}

fn spawn_episode_fetch(
    api: Arc<dyn CharacterApi>,
    dispatcher: AppActionDispatcher,
    request: EpisodeRequest,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let EpisodeRequest {
            url,
            request_id,
            cancel_token,
        } = request;

        let result = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                debug!(%url, "episode lookup cancelled");
                return;
            }
            result = api.fetch_episode(&url) => result,
        };

        dispatcher.dispatch_many(
            [AppAction::EpisodeLoaded {
                url,
                request_id,
                result: result
                    .map(|episode| episode.name)
                    .map_err(|err| err.to_string()),
            }],
            AppActionContext::default(),
        );
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::AppActionEnvelope;
    use crate::utils::test_utils::{episode_url, sample_character, FakeApi};
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    fn channel() -> (
        AppActionDispatcher,
        mpsc::UnboundedReceiver<AppActionEnvelope>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        (AppActionDispatcher::new(tx), rx)
    }

    #[tokio::test]
    async fn page_fetch_reports_loaded_page() {
        let api: Arc<dyn CharacterApi> = Arc::new(
            FakeApi::new().with_page(2, vec![sample_character(1, "Rick", "Alive", "Male")]),
        );
        let (dispatcher, mut rx) = channel();

        spawn_page_fetch(
            api,
            dispatcher,
            PageRequest {
                page: 2,
                request_id: 7,
            },
        )
        .await
        .expect("task");

        let envelope = rx.try_recv().expect("action");
        match envelope.action {
            AppAction::PageLoaded { request_id, page } => {
                assert_eq!(request_id, 7);
                assert_eq!(page.page, 2);
                assert_eq!(page.characters.len(), 1);
            }
            _ => panic!("expected PageLoaded"),
        }
    }

    #[tokio::test]
    async fn page_fetch_reports_failure() {
        let api: Arc<dyn CharacterApi> = Arc::new(FakeApi::new());
        let (dispatcher, mut rx) = channel();

        spawn_page_fetch(
            api,
            dispatcher,
            PageRequest {
                page: 99,
                request_id: 1,
            },
        )
        .await
        .expect("task");

        match rx.try_recv().expect("action").action {
            AppAction::PageLoadFailed {
                request_id,
                page,
                error,
            } => {
                assert_eq!(request_id, 1);
                assert_eq!(page, 99);
                assert!(error.contains("404"));
            }
            _ => panic!("expected PageLoadFailed"),
        }
    }

    #[tokio::test]
    async fn episode_fetch_reports_name() {
        let url = episode_url(1);
        let api: Arc<dyn CharacterApi> = Arc::new(FakeApi::new().with_episode(&url, "Pilot"));
        let (dispatcher, mut rx) = channel();

        spawn_episode_fetch(
            api,
            dispatcher,
            EpisodeRequest {
                url: url.clone(),
                request_id: 3,
                cancel_token: CancellationToken::new(),
            },
        )
        .await
        .expect("task");

        match rx.try_recv().expect("action").action {
            AppAction::EpisodeLoaded {
                url: loaded,
                request_id,
                result,
            } => {
                assert_eq!(loaded, url);
                assert_eq!(request_id, 3);
                assert_eq!(result, Ok("Pilot".to_string()));
            }
            _ => panic!("expected EpisodeLoaded"),
        }
    }

    #[tokio::test]
    async fn cancelled_episode_fetch_reports_nothing() {
        let url = episode_url(1);
        let api: Arc<dyn CharacterApi> = Arc::new(FakeApi::new().with_episode(&url, "Pilot"));
        let (dispatcher, mut rx) = channel();
        let cancel_token = CancellationToken::new();
        cancel_token.cancel();

        spawn_episode_fetch(
            api,
            dispatcher,
            EpisodeRequest {
                url,
                request_id: 1,
                cancel_token,
            },
        )
        .await
        .expect("task");

        assert!(rx.try_recv().is_err());
    }
}
