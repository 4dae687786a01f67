//! Core library for clx: configuration, session state, and the HTTP client
//! for the ClarityExpense backend.

pub mod api;
pub mod config;
pub mod session;
