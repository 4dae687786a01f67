//! Backend API surface: wire types, error taxonomy, and the client.

mod client;
mod error;
pub mod types;

pub use client::{ApiClient, SessionEvent};
pub use error::ApiError;
