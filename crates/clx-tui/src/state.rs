//! Application state composition.
//!
//! ```text
//! AppState
//! ├── route / guard      (which view, and whether it may render)
//! ├── hydrated           (persisted session load finished)
//! ├── session            (shared token + profile store)
//! ├── auth               (login / register forms)
//! └── dashboard          (widgets, refresh generation, entry forms)
//! ```
//!
//! The app starts on the protected dashboard route with the guard
//! unresolved; until hydration finishes the renderer shows a neutral frame,
//! and the guard then either lets the dashboard render or redirects to
//! login.

use std::sync::Arc;

use clx_core::session::SessionStore;

use crate::features::auth::AuthState;
use crate::features::dashboard::DashboardState;
use crate::guard::{Guard, Route};

pub struct AppState {
    pub should_quit: bool,
    /// Whether the persisted session has been loaded (found or not).
    pub hydrated: bool,
    pub route: Route,
    pub guard: Guard,
    pub session: Arc<SessionStore>,
    pub auth: AuthState,
    pub dashboard: DashboardState,
}

impl AppState {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self {
            should_quit: false,
            hydrated: false,
            route: Route::Dashboard,
            guard: Guard::Unresolved,
            session,
            auth: AuthState::new(),
            dashboard: DashboardState::new(),
        }
    }
}
