//! Default command: the interactive client.

use std::sync::Arc;

use anyhow::{Context, Result};
use clx_core::api::ApiClient;
use clx_core::config::{self, Config};
use clx_core::session::{FileSession, SessionStore};
use tokio::sync::mpsc;

pub fn run(api_url_flag: Option<&str>) -> Result<()> {
    let config = Config::load().context("load config")?;
    let base_url = config::resolve_base_url(api_url_flag, &config);
    tracing::info!(%base_url, "starting interactive client");

    let session = Arc::new(SessionStore::new(FileSession::default_path()));
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let client = Arc::new(ApiClient::new(
        base_url,
        Arc::clone(&session),
        events_tx,
    ));

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(clx_tui::run(client, session, events_rx))
}
