//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only (network calls, session hydration); the reducer
//! stays pure and never spawns tasks or touches the network itself.

use clx_core::api::types::{LoginRequest, NewTransaction, RegisterRequest};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Load the persisted session from disk.
    Hydrate,

    /// Exchange credentials for a token.
    SubmitLogin { request: LoginRequest },

    /// Create an account.
    SubmitRegister { request: RegisterRequest },

    /// Fetch the balance summary for refresh generation `key`.
    FetchBalance { key: u64 },

    /// Fetch the expenses-by-category breakdown for `key`.
    FetchExpenses { key: u64 },

    /// Fetch one page of transactions for `key`.
    FetchTransactions { key: u64, page: u32, size: u32 },

    /// Fetch the category list for `key`.
    FetchCategories { key: u64 },

    /// Create a transaction from the entry form.
    CreateTransaction { input: NewTransaction },

    /// Create a category from the modal.
    CreateCategory { name: String },
}
