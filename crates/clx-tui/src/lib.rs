//! Full-screen TUI for the ClarityExpense client.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod guard;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::sync::Arc;

use anyhow::Result;
use clx_core::api::{ApiClient, SessionEvent};
use clx_core::session::SessionStore;
pub use runtime::TuiRuntime;
use tokio::sync::mpsc;

/// Runs the interactive client until the user quits.
pub async fn run(
    client: Arc<ApiClient>,
    session: Arc<SessionStore>,
    session_events: mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!("The interactive client requires a terminal.");
    }

    let mut runtime = TuiRuntime::new(client, session, session_events)?;
    runtime.run()
}
