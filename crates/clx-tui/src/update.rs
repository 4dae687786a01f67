//! Top-level reducer.
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Two things run on every pass, regardless of the event:
//! - the guard, so a session that disappears mid-flight redirects to login
//!   on the very next update;
//! - the dashboard sync scheduler (when the dashboard may render), so any
//!   widget whose refresh generation is stale gets a fetch effect. The
//!   scheduler is idempotent, so this never duplicates in-flight fetches.

use clx_core::session::UserProfile;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::{auth, dashboard};
use crate::guard::{self, Guard, GuardOutcome, Route};
use crate::state::AppState;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let mut effects = dispatch(app, event);
    effects.extend(enforce_guard(app));
    effects
}

fn dispatch(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Hydrated => {
            app.hydrated = true;
            vec![]
        }
        UiEvent::SessionExpired => {
            // The store is already cleared; only the navigation side is
            // handled here, and only when not already on the login view.
            if app.route != Route::Login {
                navigate(app, Route::Login);
                app.auth.notice = Some("Session expired. Please log in again.".to_string());
            }
            vec![]
        }
        UiEvent::LoginFinished { result } => {
            if let Some(response) = auth::handle_login_result(&mut app.auth, result) {
                let profile = UserProfile {
                    id: response.id,
                    name: response.name,
                    email: response.email,
                };
                app.session.login(response.token, profile);
                navigate(app, Route::Dashboard);
            }
            vec![]
        }
        UiEvent::RegisterFinished { result } => {
            if auth::handle_register_result(&mut app.auth, result) {
                navigate(app, Route::Login);
            }
            vec![]
        }
        UiEvent::BalanceLoaded { key, result } => {
            app.dashboard.balance.complete(key, result);
            vec![]
        }
        UiEvent::ExpensesLoaded { key, result } => {
            app.dashboard.expenses.complete(key, result);
            vec![]
        }
        UiEvent::TransactionsLoaded { key, result } => {
            app.dashboard.transactions.complete(key, result);
            vec![]
        }
        UiEvent::CategoriesLoaded { key, result } => {
            app.dashboard.categories.complete(key, result);
            vec![]
        }
        UiEvent::TransactionCreated { result } => {
            dashboard::handle_transaction_created(&mut app.dashboard, result);
            vec![]
        }
        UiEvent::CategoryCreated { result } => {
            dashboard::handle_category_created(&mut app.dashboard, result);
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: CrosstermEvent) -> Vec<UiEffect> {
    let CrosstermEvent::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }
    if is_ctrl_c(key) {
        return vec![UiEffect::Quit];
    }

    match app.route {
        Route::Login | Route::Register => {
            let outcome = auth::handle_key(&mut app.auth, app.route, key);
            if let Some(route) = outcome.navigate {
                navigate(app, route);
            }
            outcome.effects
        }
        Route::Dashboard => {
            // Input reaches the dashboard only when the guard lets it render.
            if app.guard != Guard::Ready {
                return vec![];
            }
            let outcome = dashboard::handle_key(&mut app.dashboard, key);
            if outcome.logout {
                if app.session.logout() {
                    tracing::info!("user logged out");
                }
                navigate(app, Route::Login);
                app.auth.notice = Some("Logged out.".to_string());
            }
            outcome.effects
        }
    }
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Switches route and resets per-view state. The dashboard is rebuilt from
/// scratch on every navigation, so nothing stale survives a logout or
/// session expiry.
fn navigate(app: &mut AppState, route: Route) {
    if app.route == route {
        return;
    }
    app.route = route;
    app.dashboard = dashboard::DashboardState::new();
    if route != Route::Dashboard {
        app.auth.reset_forms();
    }
}

/// Re-evaluates the guard for the current route. When the guard redirects,
/// the redirecting frame is shown for one pass and the next update settles
/// on the login view.
fn enforce_guard(app: &mut AppState) -> Vec<UiEffect> {
    match guard::evaluate(app.route, app.hydrated, app.session.is_authenticated()) {
        GuardOutcome::Loading => {
            app.guard = Guard::Unresolved;
            vec![]
        }
        GuardOutcome::Render => {
            app.guard = Guard::Ready;
            if app.route == Route::Dashboard {
                app.dashboard.sync()
            } else {
                vec![]
            }
        }
        GuardOutcome::RedirectToLogin => {
            navigate(app, Route::Login);
            app.guard = Guard::Redirecting;
            app.auth.notice = None;
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use clx_core::api::types::AuthResponse;
    use clx_core::session::{MemorySession, SessionStore, UserProfile};

    use super::*;

    fn app_with_session(logged_in: bool) -> AppState {
        let store = Arc::new(SessionStore::new(MemorySession::default()));
        if logged_in {
            store.login(
                "tkn1",
                UserProfile {
                    id: 1,
                    name: "Ann".to_string(),
                    email: "a@b.com".to_string(),
                },
            );
        }
        AppState::new(store)
    }

    fn count_fetches(effects: &[UiEffect]) -> usize {
        effects
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    UiEffect::FetchBalance { .. }
                        | UiEffect::FetchExpenses { .. }
                        | UiEffect::FetchTransactions { .. }
                        | UiEffect::FetchCategories { .. }
                )
            })
            .count()
    }

    /// Before hydration the dashboard stays behind the neutral frame: no
    /// fetches go out and the guard is unresolved.
    #[test]
    fn test_nothing_renders_or_fetches_before_hydration() {
        let mut app = app_with_session(true);
        let effects = update(&mut app, UiEvent::Tick);
        assert!(effects.is_empty());
        assert_eq!(app.guard, Guard::Unresolved);
        assert_eq!(app.route, Route::Dashboard);
    }

    /// Hydration with a stored session renders the dashboard and kicks off
    /// all widget fetches.
    #[test]
    fn test_hydration_with_session_starts_dashboard() {
        let mut app = app_with_session(true);
        let effects = update(&mut app, UiEvent::Hydrated);
        assert_eq!(app.guard, Guard::Ready);
        assert_eq!(count_fetches(&effects), 4);

        // The scheduler is idempotent across passes.
        let effects = update(&mut app, UiEvent::Tick);
        assert_eq!(count_fetches(&effects), 0);
    }

    /// Hydration without a session redirects to login.
    #[test]
    fn test_hydration_without_session_redirects_to_login() {
        let mut app = app_with_session(false);
        let effects = update(&mut app, UiEvent::Hydrated);
        assert!(effects.is_empty());
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.guard, Guard::Redirecting);

        // Next pass settles on the (public) login view.
        update(&mut app, UiEvent::Tick);
        assert_eq!(app.guard, Guard::Ready);
    }

    /// A successful login stores the session, lands on the dashboard, and
    /// fetches every widget.
    #[test]
    fn test_login_success_lands_on_dashboard() {
        let mut app = app_with_session(false);
        update(&mut app, UiEvent::Hydrated);
        update(&mut app, UiEvent::Tick);

        let effects = update(
            &mut app,
            UiEvent::LoginFinished {
                result: Ok(AuthResponse {
                    token: "tkn1".to_string(),
                    id: 1,
                    name: "Ann".to_string(),
                    email: "a@b.com".to_string(),
                }),
            },
        );

        assert!(app.session.is_authenticated());
        assert_eq!(app.route, Route::Dashboard);
        assert_eq!(app.guard, Guard::Ready);
        assert_eq!(count_fetches(&effects), 4);
    }

    /// Session expiry navigates to login exactly once; a second expiry
    /// event while already on login changes nothing.
    #[test]
    fn test_session_expiry_redirects_once() {
        let mut app = app_with_session(true);
        update(&mut app, UiEvent::Hydrated);

        // Expiry: the client has already cleared the store.
        app.session.logout();
        update(&mut app, UiEvent::SessionExpired);
        assert_eq!(app.route, Route::Login);
        assert_eq!(
            app.auth.notice.as_deref(),
            Some("Session expired. Please log in again.")
        );

        // Duplicate expiry while on login: no redirect loop, notice intact.
        update(&mut app, UiEvent::SessionExpired);
        assert_eq!(app.route, Route::Login);
        assert_eq!(
            app.auth.notice.as_deref(),
            Some("Session expired. Please log in again.")
        );
    }

    /// Expiry wipes dashboard state; logging back in starts from scratch.
    #[test]
    fn test_expiry_resets_dashboard_state() {
        let mut app = app_with_session(true);
        update(&mut app, UiEvent::Hydrated);
        update(
            &mut app,
            UiEvent::TransactionCreated {
                result: Err("boom".to_string()),
            },
        );
        assert!(app.dashboard.form.error.is_some());

        app.session.logout();
        update(&mut app, UiEvent::SessionExpired);
        assert!(app.dashboard.form.error.is_none());
        assert_eq!(app.dashboard.refresh, 0);
    }

    /// Ctrl+L clears the session and returns to login.
    #[test]
    fn test_ctrl_l_logs_out() {
        let mut app = app_with_session(true);
        update(&mut app, UiEvent::Hydrated);

        let ctrl_l = CrosstermEvent::Key(KeyEvent::new(
            KeyCode::Char('l'),
            KeyModifiers::CONTROL,
        ));
        update(&mut app, UiEvent::Terminal(ctrl_l));
        assert!(!app.session.is_authenticated());
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.auth.notice.as_deref(), Some("Logged out."));
    }

    /// Ctrl+C quits from any view.
    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app_with_session(false);
        let ctrl_c = CrosstermEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ));
        let effects = update(&mut app, UiEvent::Terminal(ctrl_c));
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    /// A successful transaction creation refetches every widget in the
    /// same update pass, under the bumped refresh generation.
    #[test]
    fn test_transaction_created_refetches_in_same_pass() {
        let mut app = app_with_session(true);
        update(&mut app, UiEvent::Hydrated);

        let effects = update(
            &mut app,
            UiEvent::TransactionCreated {
                result: Ok(clx_core::api::types::Transaction {
                    id: 1,
                    amount: 10.0,
                    description: Some("Lunch".to_string()),
                    date: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                    kind: clx_core::api::types::TransactionType::Expense,
                    category_name: None,
                }),
            },
        );

        assert_eq!(app.dashboard.refresh, 1);
        assert_eq!(count_fetches(&effects), 4);
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::FetchBalance { key: 1 }))
        );
    }

    /// A fetch result from a superseded refresh generation is discarded.
    #[test]
    fn test_stale_fetch_result_discarded() {
        let mut app = app_with_session(true);
        update(&mut app, UiEvent::Hydrated);

        // Refresh moved on (e.g. a transaction was created meanwhile).
        app.dashboard.refresh += 1;
        update(&mut app, UiEvent::Tick); // scheduler re-begins under key 1

        update(
            &mut app,
            UiEvent::BalanceLoaded {
                key: 0,
                result: Ok(clx_core::api::types::Balance {
                    total_income: 1.0,
                    total_expense: 1.0,
                    current_balance: 0.0,
                }),
            },
        );
        assert!(app.dashboard.balance.value.get().is_none());
    }
}
