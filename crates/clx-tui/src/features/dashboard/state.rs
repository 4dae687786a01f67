//! Dashboard state.
//!
//! Every widget on the dashboard holds a [`Dependent`]: a remote value tagged
//! with the refresh generation it was fetched for. Creating a transaction or
//! category bumps the generation counter once; the scheduler in
//! [`DashboardState::sync`] then refetches exactly the widgets whose tag no
//! longer matches. Responses that come back tagged with an old generation
//! are discarded, so a slow fetch can never overwrite fresher data.

use chrono::Local;
use clx_core::api::types::{
    Balance, Category, CategoryExpense, Page, Transaction, TransactionType,
};

use crate::common::TextField;
use crate::effects::UiEffect;

/// Default transactions page size.
pub const PAGE_SIZE: u32 = 10;

/// A value loaded from the backend.
#[derive(Debug, Default)]
pub enum Remote<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Remote<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Remote::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Remote::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }
}

/// A remote value tagged with the refresh generation it was fetched for.
#[derive(Debug, Default)]
pub struct Dependent<T> {
    pub value: Remote<T>,
    fetched_for: Option<u64>,
}

impl<T> Dependent<T> {
    /// Whether this widget still needs a fetch for generation `key`.
    pub fn is_stale(&self, key: u64) -> bool {
        self.fetched_for != Some(key)
    }

    /// Marks a fetch in flight for `key`.
    pub fn begin(&mut self, key: u64) {
        self.fetched_for = Some(key);
        self.value = Remote::Loading;
    }

    /// Applies a fetch result, unless a newer generation superseded it.
    pub fn complete(&mut self, key: u64, result: Result<T, String>) {
        if self.fetched_for != Some(key) {
            return;
        }
        self.value = match result {
            Ok(value) => Remote::Ready(value),
            Err(message) => Remote::Failed(message),
        };
    }

    /// Forces a refetch on the next sync without touching the generation
    /// counter (used when the transactions page changes).
    pub fn invalidate(&mut self) {
        self.fetched_for = None;
    }
}

/// Which part of the entry form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Amount,
    Description,
    Date,
    Kind,
    Category,
}

impl FormFocus {
    pub fn next(self) -> Self {
        match self {
            FormFocus::Amount => FormFocus::Description,
            FormFocus::Description => FormFocus::Date,
            FormFocus::Date => FormFocus::Kind,
            FormFocus::Kind => FormFocus::Category,
            FormFocus::Category => FormFocus::Amount,
        }
    }
}

/// The new-transaction entry form.
#[derive(Debug)]
pub struct TransactionForm {
    pub amount: TextField,
    pub description: TextField,
    pub date: TextField,
    pub kind: TransactionType,
    /// Index into the loaded category list.
    pub category_index: usize,
    pub focus: FormFocus,
    pub submitting: bool,
    pub error: Option<String>,
}

impl TransactionForm {
    pub fn new() -> Self {
        Self {
            amount: TextField::new(),
            description: TextField::new(),
            date: TextField::with_value(Local::now().date_naive().format("%Y-%m-%d").to_string()),
            kind: TransactionType::Expense,
            category_index: 0,
            focus: FormFocus::Amount,
            submitting: false,
            error: None,
        }
    }

    pub fn focused_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FormFocus::Amount => Some(&mut self.amount),
            FormFocus::Description => Some(&mut self.description),
            FormFocus::Date => Some(&mut self.date),
            FormFocus::Kind | FormFocus::Category => None,
        }
    }
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self::new()
    }
}

/// The new-category modal.
#[derive(Debug, Default)]
pub struct CategoryForm {
    pub name: TextField,
    pub submitting: bool,
    pub error: Option<String>,
}

/// State for the dashboard view.
#[derive(Debug)]
pub struct DashboardState {
    /// Refresh generation counter; bumped once per successful mutation.
    pub refresh: u64,
    /// Current transactions page (zero-based).
    pub page: u32,
    pub balance: Dependent<Balance>,
    pub expenses: Dependent<Vec<CategoryExpense>>,
    pub transactions: Dependent<Page<Transaction>>,
    pub categories: Dependent<Vec<Category>>,
    pub form: TransactionForm,
    /// Category creation modal, when open.
    pub category_modal: Option<CategoryForm>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            refresh: 0,
            page: 0,
            balance: Dependent::default(),
            expenses: Dependent::default(),
            transactions: Dependent::default(),
            categories: Dependent::default(),
            form: TransactionForm::new(),
            category_modal: None,
        }
    }

    /// Emits fetch effects for every widget that is stale for the current
    /// refresh generation. Idempotent: widgets already fetching (or fetched)
    /// for this generation emit nothing.
    pub fn sync(&mut self) -> Vec<UiEffect> {
        let key = self.refresh;
        let mut effects = Vec::new();

        if self.balance.is_stale(key) {
            self.balance.begin(key);
            effects.push(UiEffect::FetchBalance { key });
        }
        if self.expenses.is_stale(key) {
            self.expenses.begin(key);
            effects.push(UiEffect::FetchExpenses { key });
        }
        if self.transactions.is_stale(key) {
            self.transactions.begin(key);
            effects.push(UiEffect::FetchTransactions {
                key,
                page: self.page,
                size: PAGE_SIZE,
            });
        }
        if self.categories.is_stale(key) {
            self.categories.begin(key);
            effects.push(UiEffect::FetchCategories { key });
        }

        effects
    }

    /// Total pages reported by the last transactions fetch.
    pub fn total_pages(&self) -> u32 {
        self.transactions
            .value
            .get()
            .map_or(0, |page| page.total_pages)
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_fetches_all_widgets_once() {
        let mut state = DashboardState::new();
        let effects = state.sync();
        assert_eq!(effects.len(), 4);

        // A second pass with nothing stale emits nothing.
        assert!(state.sync().is_empty());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut dependent: Dependent<u32> = Dependent::default();
        dependent.begin(0);

        // Generation moved on before the response arrived.
        dependent.begin(1);
        dependent.complete(0, Ok(7));
        assert!(dependent.value.get().is_none());

        dependent.complete(1, Ok(9));
        assert_eq!(dependent.value.get(), Some(&9));
    }

    #[test]
    fn test_invalidate_forces_refetch_same_generation() {
        let mut state = DashboardState::new();
        state.sync();
        state.transactions.invalidate();

        let effects = state.sync();
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            UiEffect::FetchTransactions { key: 0, .. }
        ));
    }
}
