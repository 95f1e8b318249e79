//! Event polling, dispatching, and UI rendering loop for the browser.
//!
//! Terminal input is read on a dedicated task and forwarded over a channel.
//! Each tick the loop draws a frame, turns pending key presses into
//! [`AppAction`]s, applies every queued action to the shared
//! [`App`](crate::core::app::App) and hands the resulting commands to the
//! executors.

use std::{
    error::Error,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::prelude::Size;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tracing::info;

use crate::api::{CharacterApi, HttpCharacterApi};
use crate::core::app::{
    apply_actions, App, AppActionContext, AppActionDispatcher, AppActionEnvelope,
};
use crate::core::config::Settings;
use crate::ui::renderer::ui;
use crate::ui::theme::Theme;

use super::executors::execute_commands;
use super::keybindings::action_for_key;
use super::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use super::AppHandle;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

async fn current_terminal_size(terminal: &SharedTerminal) -> Size {
    let terminal_guard = terminal.lock().await;
    terminal_guard.size().unwrap_or_default()
}

async fn try_draw_frame(
    app: &AppHandle,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> std::io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    let mut terminal_guard = terminal.lock().await;
    app.read(|app| terminal_guard.draw(|f| ui(f, app)).map(|_| ()))
        .await?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

/// Turn every pending terminal event into actions. Returns whether anything
/// was read.
fn process_ui_events(
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dispatcher: &AppActionDispatcher,
    term_size: Size,
) -> bool {
    let ctx = AppActionContext {
        term_width: term_size.width,
        term_height: term_size.height,
    };

    let mut events_processed = false;
    while let Ok(ev) = event_rx.try_recv() {
        events_processed = true;
        match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if let Some(action) = action_for_key(&key) {
                    dispatcher.dispatch_many([action], ctx);
                }
            }
            UiEvent::Crossterm(_) => {}
        }
    }
    events_processed
}

async fn drain_action_queue(
    app: &AppHandle,
    api: &Arc<dyn CharacterApi>,
    dispatcher: &AppActionDispatcher,
    action_rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(envelope) = action_rx.try_recv() {
        pending.push(envelope);
    }

    if pending.is_empty() {
        return false;
    }

    let commands = app.update(|app| apply_actions(app, pending)).await;
    execute_commands(api, dispatcher, commands);
    true
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

pub async fn run_browser(settings: Settings) -> Result<(), Box<dyn Error>> {
    let theme = settings
        .theme
        .as_deref()
        .map(Theme::from_name)
        .unwrap_or_default();
    let api: Arc<dyn CharacterApi> = Arc::new(HttpCharacterApi::new(settings.base_url.clone()));
    info!(
        base_url = %settings.base_url,
        start_page = settings.start_page,
        "starting character browser"
    );

    let app = AppHandle::new(Arc::new(Mutex::new(App::new(settings.start_page, theme))));

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let dispatcher = AppActionDispatcher::new(action_tx);

    let startup = app.update(|app| app.start()).await;
    execute_commands(&api, &dispatcher, startup);

    let terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    const MAX_FPS: u64 = 60;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;
    let mut last_term_size = Size::default();

    let result: Result<(), Box<dyn Error>> = loop {
        if app.read(|app| app.ui.exit_requested).await {
            break Ok(());
        }

        if let Err(err) = try_draw_frame(
            &app,
            &terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await
        {
            break Err(err.into());
        }

        let term_size = current_terminal_size(&terminal).await;
        if term_size != last_term_size {
            last_term_size = term_size;
            request_redraw = true;
            app.update(|app| app.ui.last_term_size = term_size).await;
        }

        let events_processed = process_ui_events(&mut event_rx, &dispatcher, term_size);
        let actions_applied = drain_action_queue(&app, &api, &dispatcher, &mut action_rx).await;

        if events_processed || actions_applied {
            request_redraw = true;
        }

        if !events_processed && !actions_applied && !request_redraw {
            tokio::time::sleep(Duration::from_millis(16)).await;
        }
    };

    event_reader_handle.abort();
    app.update(|app| app.shutdown()).await;
    restore_terminal(&terminal).await?;
    info!("character browser closed");

    result
}
