//! Shared UI building blocks.

pub mod form;

pub use form::TextField;
