//! Login and registration views.

mod render;
mod state;
mod update;

pub use render::{render_login, render_register};
pub use state::{AuthState, LoginField, LoginForm, RegisterField, RegisterForm};
pub use update::{AuthOutcome, handle_key, handle_login_result, handle_register_result};
