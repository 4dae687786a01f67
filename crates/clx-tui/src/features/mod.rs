//! Feature modules: state + reducer + render per view.

pub mod auth;
pub mod dashboard;
