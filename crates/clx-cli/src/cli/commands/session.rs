//! Session command handlers (logout, whoami).

use anyhow::{Context, Result};
use clx_core::session::{FileSession, SessionStore};

pub fn logout() -> Result<()> {
    let store = SessionStore::new(FileSession::default_path());
    store.hydrate().context("load stored session")?;

    if store.logout() {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub fn whoami() -> Result<()> {
    let store = SessionStore::new(FileSession::default_path());
    store.hydrate().context("load stored session")?;

    match store.user() {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not logged in."),
    }
    Ok(())
}
