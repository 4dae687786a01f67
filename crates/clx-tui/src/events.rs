//! UI event types.
//!
//! All external inputs (terminal, session notifications, async results) are
//! converted to `UiEvent` before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Async work sends its result event straight to the runtime's inbox
//! channel; the runtime drains the inbox each frame and feeds the events
//! through the reducer. There are no per-operation receivers.
//!
//! Dashboard fetch results carry the refresh key they were issued under so
//! the reducer can discard responses that arrive after another refresh has
//! already superseded them.

use clx_core::api::types::{AuthResponse, Balance, Category, CategoryExpense, Page, Transaction};
use crossterm::event::Event as CrosstermEvent;

/// Unified event enum consumed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives render cadence.
    Tick,

    /// Raw terminal input.
    Terminal(CrosstermEvent),

    /// Persisted session hydration finished (found a session or not).
    Hydrated,

    /// The backend rejected the session; the store is already cleared.
    SessionExpired,

    /// Login request finished.
    LoginFinished { result: Result<AuthResponse, String> },

    /// Registration request finished.
    RegisterFinished { result: Result<(), String> },

    /// Dashboard balance fetch finished.
    BalanceLoaded {
        key: u64,
        result: Result<Balance, String>,
    },

    /// Expenses-by-category fetch finished.
    ExpensesLoaded {
        key: u64,
        result: Result<Vec<CategoryExpense>, String>,
    },

    /// Transaction page fetch finished.
    TransactionsLoaded {
        key: u64,
        result: Result<Page<Transaction>, String>,
    },

    /// Category list fetch finished.
    CategoriesLoaded {
        key: u64,
        result: Result<Vec<Category>, String>,
    },

    /// Transaction creation finished.
    TransactionCreated { result: Result<Transaction, String> },

    /// Category creation finished.
    CategoryCreated { result: Result<Category, String> },
}
