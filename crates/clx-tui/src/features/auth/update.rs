//! Auth feature reducer.
//!
//! Handles key input on the public views and the results of login and
//! registration requests. Session storage and navigation stay in the top
//! reducer; this module only mutates form state and reports what happened.

use clx_core::api::types::{AuthResponse, LoginRequest, RegisterRequest};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::AuthState;
use crate::effects::UiEffect;
use crate::guard::Route;

/// What a key press on an auth view asks the top reducer to do.
#[derive(Debug, Default)]
pub struct AuthOutcome {
    pub effects: Vec<UiEffect>,
    pub navigate: Option<Route>,
}

/// Handles a key press on the login or register view.
pub fn handle_key(state: &mut AuthState, route: Route, key: KeyEvent) -> AuthOutcome {
    // Ctrl+R flips between the two public views.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        let target = match route {
            Route::Login => Route::Register,
            _ => Route::Login,
        };
        return AuthOutcome {
            effects: vec![],
            navigate: Some(target),
        };
    }

    match route {
        Route::Login => handle_login_key(state, key),
        Route::Register => handle_register_key(state, key),
        Route::Dashboard => AuthOutcome::default(),
    }
}

fn handle_login_key(state: &mut AuthState, key: KeyEvent) -> AuthOutcome {
    let form = &mut state.login;
    if form.submitting {
        return AuthOutcome::default();
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.focus = form.focus.map(super::state::LoginField::next);
        }
        KeyCode::Backspace => {
            if let Some(field) = form.focused_mut() {
                field.backspace();
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(field) = form.focused_mut() {
                field.push(ch);
            }
        }
        KeyCode::Enter => {
            if form.email.is_empty() || form.password.is_empty() {
                form.error = Some("Email and password are required.".to_string());
                return AuthOutcome::default();
            }
            form.error = None;
            form.submitting = true;
            state.notice = None;
            return AuthOutcome {
                effects: vec![UiEffect::SubmitLogin {
                    request: LoginRequest {
                        email: state.login.email.value().to_string(),
                        password: state.login.password.value().to_string(),
                    },
                }],
                navigate: None,
            };
        }
        _ => {}
    }

    AuthOutcome::default()
}

fn handle_register_key(state: &mut AuthState, key: KeyEvent) -> AuthOutcome {
    let form = &mut state.register;
    if form.submitting {
        return AuthOutcome::default();
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            form.focus = form.focus.map(super::state::RegisterField::next);
        }
        KeyCode::Backspace => {
            if let Some(field) = form.focused_mut() {
                field.backspace();
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(field) = form.focused_mut() {
                field.push(ch);
            }
        }
        KeyCode::Enter => {
            if form.name.is_empty() || form.email.is_empty() || form.password.is_empty() {
                form.error = Some("All fields are required.".to_string());
                return AuthOutcome::default();
            }
            form.error = None;
            form.submitting = true;
            return AuthOutcome {
                effects: vec![UiEffect::SubmitRegister {
                    request: RegisterRequest {
                        name: state.register.name.value().to_string(),
                        email: state.register.email.value().to_string(),
                        password: state.register.password.value().to_string(),
                    },
                }],
                navigate: None,
            };
        }
        _ => {}
    }

    AuthOutcome::default()
}

/// Handles the login result. On success returns the response for the top
/// reducer to store in the session and navigate; on failure shows the error
/// inline.
pub fn handle_login_result(
    state: &mut AuthState,
    result: Result<AuthResponse, String>,
) -> Option<AuthResponse> {
    state.login.submitting = false;
    match result {
        Ok(response) => {
            state.reset_forms();
            Some(response)
        }
        Err(message) => {
            state.login.error = Some(message);
            None
        }
    }
}

/// Handles the registration result. Returns true when the top reducer
/// should switch to the login view.
pub fn handle_register_result(state: &mut AuthState, result: Result<(), String>) -> bool {
    state.register.submitting = false;
    match result {
        Ok(()) => {
            state.reset_forms();
            state.notice = Some("Account created. Please sign in.".to_string());
            true
        }
        Err(message) => {
            state.register.error = Some(message);
            false
        }
    }
}
