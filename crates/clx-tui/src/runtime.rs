//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async work spawned for an effect sends its result `UiEvent` to the
//! inbox channel; the runtime drains the inbox each frame. Session expiry
//! notifications from the API client arrive on their own channel and are
//! converted to `UiEvent::SessionExpired` during event collection.

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clx_core::api::{ApiClient, SessionEvent};
use clx_core::session::SessionStore;
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence. Nothing streams here, so a relaxed interval keeps CPU low
/// while staying responsive to async results.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: Arc<ApiClient>,
    /// Inbox sender - spawned effects send result events here.
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    /// Inbox receiver - drained each frame.
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    /// Expiry notifications from the API client.
    session_events: mpsc::UnboundedReceiver<SessionEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates the runtime and enters the alternate screen.
    pub fn new(
        client: Arc<ApiClient>,
        session: Arc<SessionStore>,
        session_events: mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Result<Self> {
        // Set up panic hook BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(session);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            session_events,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until quit.
    pub fn run(&mut self) -> Result<()> {
        // Load the persisted session first; the guard holds every view
        // behind a neutral frame until this resolves.
        self.execute_effect(UiEffect::Hydrate);
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
                dirty = true;
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from all sources (terminal, inbox, session channel).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Expiry notifications first so the redirect happens before any
        // fetch result from the dead session is applied.
        while let Ok(SessionEvent::Expired) = self.session_events.try_recv() {
            events.push(UiEvent::SessionExpired);
        }

        // Drain inbox - all async results arrive here.
        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        // Poll terminal input:
        // - with events pending, non-blocking (don't delay processing)
        // - otherwise block until the next tick is due
        let poll_duration = if events.is_empty() {
            TICK_INTERVAL.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK_INTERVAL {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect and routes its result event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Executes a single effect.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            UiEffect::Hydrate => {
                let session = Arc::clone(&self.state.session);
                self.spawn_effect(move || async move {
                    // File I/O off the async workers.
                    match tokio::task::spawn_blocking(move || session.hydrate()).await {
                        Ok(Ok(_)) => {}
                        Ok(Err(error)) => {
                            tracing::warn!("failed to load persisted session: {error:#}");
                        }
                        Err(error) => {
                            tracing::warn!("session hydration task failed: {error}");
                        }
                    }
                    UiEvent::Hydrated
                });
            }

            UiEffect::SubmitLogin { request } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || async move {
                    let result = client
                        .login(&request)
                        .await
                        .map_err(|error| error.display_message());
                    UiEvent::LoginFinished { result }
                });
            }

            UiEffect::SubmitRegister { request } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || async move {
                    let result = client
                        .register(&request)
                        .await
                        .map_err(|error| error.display_message());
                    UiEvent::RegisterFinished { result }
                });
            }

            UiEffect::FetchBalance { key } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || async move {
                    let result = client
                        .balance()
                        .await
                        .map_err(|error| error.display_message());
                    UiEvent::BalanceLoaded { key, result }
                });
            }

            UiEffect::FetchExpenses { key } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || async move {
                    let result = client
                        .expenses_by_category()
                        .await
                        .map_err(|error| error.display_message());
                    UiEvent::ExpensesLoaded { key, result }
                });
            }

            UiEffect::FetchTransactions { key, page, size } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || async move {
                    let result = client
                        .transactions(page, size)
                        .await
                        .map_err(|error| error.display_message());
                    UiEvent::TransactionsLoaded { key, result }
                });
            }

            UiEffect::FetchCategories { key } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || async move {
                    let result = client
                        .categories()
                        .await
                        .map_err(|error| error.display_message());
                    UiEvent::CategoriesLoaded { key, result }
                });
            }

            UiEffect::CreateTransaction { input } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || async move {
                    let result = client
                        .create_transaction(&input)
                        .await
                        .map_err(|error| error.display_message());
                    UiEvent::TransactionCreated { result }
                });
            }

            UiEffect::CreateCategory { name } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || async move {
                    let result = client
                        .create_category(&clx_core::api::types::NewCategory { name })
                        .await
                        .map_err(|error| error.display_message());
                    UiEvent::CategoryCreated { result }
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
