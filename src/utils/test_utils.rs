use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::api::{ApiError, Character, CharacterApi, CharacterPage, Episode, NamedResource};
use crate::core::app::App;
use crate::ui::theme::Theme;

pub fn create_test_app() -> App {
    App::new(1, Theme::dark_default())
}

pub fn sample_character(id: u64, name: &str, status: &str, gender: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        status: status.to_string(),
        species: "Human".to_string(),
        kind: String::new(),
        gender: gender.to_string(),
        origin: None,
        location: NamedResource {
            name: "Earth (C-137)".to_string(),
            url: String::new(),
        },
        image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        episode: vec![episode_url(1)],
        url: None,
        created: None,
    }
}

pub fn with_episodes(mut character: Character, episodes: &[String]) -> Character {
    character.episode = episodes.to_vec();
    character
}

pub fn episode_url(n: u32) -> String {
    format!("https://rickandmortyapi.com/api/episode/{n}")
}

pub fn sample_page(results: Vec<Character>) -> CharacterPage {
    CharacterPage {
        info: None,
        results,
    }
}

/// In-memory [`CharacterApi`] that records every call it receives.
#[derive(Default)]
pub struct FakeApi {
    pages: HashMap<u32, CharacterPage>,
    episodes: HashMap<String, String>,
    page_calls: std::sync::Mutex<Vec<u32>>,
    episode_calls: std::sync::Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, results: Vec<Character>) -> Self {
        self.pages.insert(page, sample_page(results));
        self
    }

    pub fn with_episode(mut self, url: &str, name: &str) -> Self {
        self.episodes.insert(url.to_string(), name.to_string());
        self
    }

    pub fn page_calls(&self) -> Vec<u32> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn episode_calls(&self) -> Vec<String> {
        self.episode_calls.lock().unwrap().clone()
    }
}

fn not_found(url: String) -> ApiError {
    ApiError::Status {
        url,
        status: StatusCode::NOT_FOUND,
        body: r#"{"error":"There is nothing here"}"#.to_string(),
    }
}

#[async_trait]
impl CharacterApi for FakeApi {
    async fn fetch_character_page(&self, page: u32) -> Result<CharacterPage, ApiError> {
        self.page_calls.lock().unwrap().push(page);
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| not_found(format!("fake://character?page={page}")))
    }

    async fn fetch_episode(&self, url: &str) -> Result<Episode, ApiError> {
        self.episode_calls.lock().unwrap().push(url.to_string());
        self.episodes
            .get(url)
            .map(|name| Episode {
                name: name.clone(),
                id: None,
                episode: None,
                air_date: None,
            })
            .ok_or_else(|| not_found(url.to_string()))
    }
}

/// Canned response served by [`spawn_stub_server`] for an exact request target.
#[derive(Clone, Debug)]
pub struct StubResponse {
    pub target: String,
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn new(target: &str, status: u16, body: &str) -> Self {
        Self {
            target: target.to_string(),
            status,
            body: body.to_string(),
        }
    }

    pub fn ok(target: &str, body: &str) -> Self {
        Self::new(target, 200, body)
    }
}

pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Request lines seen so far, as `METHOD target`.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Minimal HTTP/1.1 server on an ephemeral port. Unknown targets get a 404.
pub async fn spawn_stub_server(routes: Vec<StubResponse>) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    let requests = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&requests);

    let handle = tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let Ok(request_line) = read_request_line(&mut stream).await else {
                continue;
            };

            let mut parts = request_line.split_whitespace();
            let method = parts.next().unwrap_or_default().to_string();
            let target = parts.next().unwrap_or_default().to_string();
            captured.lock().await.push(format!("{method} {target}"));

            let (status, body) = routes
                .iter()
                .find(|route| route.target == target)
                .map(|route| (route.status, route.body.clone()))
                .unwrap_or((404, r#"{"error":"no stub for target"}"#.to_string()));
            let reason = StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or("Unknown");

            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    StubServer {
        addr,
        requests,
        handle,
    }
}

async fn read_request_line(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if buffer.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }

    let head = String::from_utf8_lossy(&buffer);
    Ok(head.lines().next().unwrap_or_default().to_string())
}
