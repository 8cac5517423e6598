mod app;
mod config;
mod feed;
mod logging;
mod notify;
mod storage;
mod sync;
mod ui;

#[cfg(test)]
mod testing;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::idle::IdleQueue;
use crate::app::state::AppState;
use crate::notify::surface::{DesktopSurface, Notifier, NotifySendSurface};
use crate::storage::{FileStore, MemoryStore, StringStore};
use crate::sync::builder::TextPreviewRenderer;
use crate::sync::Services;
use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, EventStream},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    logging::init(&cfg.logging)?;
    info!(relay = %cfg.feed.address, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg).await;

    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableFocusChange)?;
    Ok(())
}

fn open_store(path: &str) -> Box<dyn StringStore> {
    let path = config::expand_home(path);
    match FileStore::open(path.clone()) {
        Ok(store) => {
            info!(path = %store.path().display(), "storage opened");
            Box::new(store)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "falling back to in-memory storage");
            Box::new(MemoryStore::default())
        }
    }
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let surface: Arc<dyn DesktopSurface> = Arc::new(NotifySendSurface::detect());
    let notifier = Notifier::new(Arc::clone(&surface));
    let mut services = Services {
        previews: Box::new(TextPreviewRenderer),
        surface,
        store: open_store(&cfg.storage.path),
    };
    let feed_config = cfg.feed.clone();
    let mut state = AppState::new(cfg);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    let feed_task = feed::spawn_feed(feed_config, event_tx.clone());
    let mut deferred: IdleQueue<AppEvent> = IdleQueue::default();

    terminal.draw(|f| ui::render(f, &state))?;
    apply_action(&mut state, &notifier, Action::RefreshTitle);

    while let Some(event) = event_rx.recv().await {
        let mut batch = vec![event];
        while let Ok(event) = event_rx.try_recv() {
            batch.push(event);
        }

        let received_at = Instant::now();
        let mut input_pending = false;
        let mut actions = Vec::new();
        for event in batch {
            match event {
                AppEvent::Feed(_) | AppEvent::FeedMalformed { .. } => {
                    deferred.push(event, received_at);
                }
                other => {
                    input_pending |= matches!(other, AppEvent::Terminal(_));
                    actions.extend(handler::handle_event(&mut state, &mut services, other));
                }
            }
        }

        // Feed events run once the terminal is quiet or their deadline passed.
        for event in deferred.take_ready(Instant::now(), !input_pending) {
            actions.extend(handler::handle_event(&mut state, &mut services, event));
        }

        for action in actions {
            apply_action(&mut state, &notifier, action);
        }

        if state.should_quit {
            break;
        }

        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    feed_task.abort();
    info!("shutting down");
    Ok(())
}

fn apply_action(state: &mut AppState, notifier: &Notifier, action: Action) {
    match action {
        Action::PlaySound => {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        }
        Action::MarkAlerted => {
            state.alerted = true;
            state.dirty = true;
        }
        Action::RefreshTitle => {
            let _ = execute!(io::stdout(), SetTitle(state.window_title()));
        }
        Action::Notify(delivery) => notifier.dispatch(delivery),
        Action::Quit => state.should_quit = true,
    }
}
