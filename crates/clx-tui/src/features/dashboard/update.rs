//! Dashboard reducer.
//!
//! Key handling for the entry form, the category modal, and paging, plus
//! the mutation-result handlers that bump the refresh generation.

use chrono::NaiveDate;
use clx_core::api::types::NewTransaction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{CategoryForm, DashboardState, FormFocus};
use crate::effects::UiEffect;

/// What a key press on the dashboard asks the top reducer to do.
#[derive(Debug, Default)]
pub struct DashboardOutcome {
    pub effects: Vec<UiEffect>,
    /// Ctrl+L: clear the session and go to login.
    pub logout: bool,
}

/// Handles a key press on the dashboard.
pub fn handle_key(state: &mut DashboardState, key: KeyEvent) -> DashboardOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('l') => {
                return DashboardOutcome {
                    effects: vec![],
                    logout: true,
                };
            }
            KeyCode::Char('g') => {
                if state.category_modal.is_none() {
                    state.category_modal = Some(CategoryForm::default());
                }
                return DashboardOutcome::default();
            }
            _ => {}
        }
    }

    if state.category_modal.is_some() {
        return handle_modal_key(state, key);
    }

    handle_form_key(state, key)
}

fn handle_modal_key(state: &mut DashboardState, key: KeyEvent) -> DashboardOutcome {
    let Some(modal) = state.category_modal.as_mut() else {
        return DashboardOutcome::default();
    };
    if modal.submitting {
        return DashboardOutcome::default();
    }

    match key.code {
        KeyCode::Esc => {
            state.category_modal = None;
        }
        KeyCode::Backspace => modal.name.backspace(),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            modal.name.push(ch);
        }
        KeyCode::Enter => {
            let name = modal.name.value().trim().to_string();
            if name.is_empty() {
                modal.error = Some("Category name is required.".to_string());
                return DashboardOutcome::default();
            }
            modal.error = None;
            modal.submitting = true;
            return DashboardOutcome {
                effects: vec![UiEffect::CreateCategory { name }],
                logout: false,
            };
        }
        _ => {}
    }

    DashboardOutcome::default()
}

fn handle_form_key(state: &mut DashboardState, key: KeyEvent) -> DashboardOutcome {
    match key.code {
        KeyCode::Tab => {
            state.form.focus = state.form.focus.next();
        }
        KeyCode::Left | KeyCode::Right if state.form.focus == FormFocus::Kind => {
            state.form.kind = state.form.kind.toggled();
        }
        KeyCode::Up if state.form.focus == FormFocus::Category => {
            state.form.category_index = state.form.category_index.saturating_sub(1);
        }
        KeyCode::Down if state.form.focus == FormFocus::Category => {
            let count = state
                .categories
                .value
                .get()
                .map_or(0, std::vec::Vec::len);
            if state.form.category_index + 1 < count {
                state.form.category_index += 1;
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = state.form.focused_mut() {
                field.backspace();
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(field) = state.form.focused_mut() {
                field.push(ch);
            }
        }
        KeyCode::Enter => return submit_form(state),
        KeyCode::PageDown => {
            if state.page + 1 < state.total_pages() {
                state.page += 1;
                state.transactions.invalidate();
            }
        }
        KeyCode::PageUp => {
            if state.page > 0 {
                state.page -= 1;
                state.transactions.invalidate();
            }
        }
        _ => {}
    }

    DashboardOutcome::default()
}

fn submit_form(state: &mut DashboardState) -> DashboardOutcome {
    if state.form.submitting {
        return DashboardOutcome::default();
    }

    let input = match validate_form(state) {
        Ok(input) => input,
        Err(message) => {
            state.form.error = Some(message);
            return DashboardOutcome::default();
        }
    };

    state.form.error = None;
    state.form.submitting = true;
    DashboardOutcome {
        effects: vec![UiEffect::CreateTransaction { input }],
        logout: false,
    }
}

fn validate_form(state: &DashboardState) -> Result<NewTransaction, String> {
    let amount: f64 = state
        .form
        .amount
        .value()
        .trim()
        .parse()
        .map_err(|_| "Amount must be a number.".to_string())?;
    if amount <= 0.0 {
        return Err("Amount must be positive.".to_string());
    }

    let description = state.form.description.value().trim().to_string();
    if description.is_empty() {
        return Err("Description is required.".to_string());
    }

    let date = NaiveDate::parse_from_str(state.form.date.value().trim(), "%Y-%m-%d")
        .map_err(|_| "Date must be YYYY-MM-DD.".to_string())?;

    let categories = state
        .categories
        .value
        .get()
        .filter(|list| !list.is_empty())
        .ok_or_else(|| "Create a category first (Ctrl+G).".to_string())?;
    let category = categories
        .get(state.form.category_index)
        .ok_or_else(|| "Select a category.".to_string())?;

    Ok(NewTransaction {
        amount,
        description,
        date,
        kind: state.form.kind,
        category_id: category.id,
    })
}

/// Applies the result of a transaction creation. Success resets the form and
/// bumps the refresh generation once; the sync pass then refetches every
/// widget.
pub fn handle_transaction_created(
    state: &mut DashboardState,
    result: Result<clx_core::api::types::Transaction, String>,
) {
    state.form.submitting = false;
    match result {
        Ok(_) => {
            let date = state.form.date.value().to_string();
            state.form = super::state::TransactionForm::new();
            // Keep the typed date for quick repeated entry.
            state.form.date = crate::common::TextField::with_value(date);
            state.refresh += 1;
        }
        Err(message) => {
            state.form.error = Some(message);
        }
    }
}

/// Applies the result of a category creation. Success closes the modal and
/// bumps the refresh generation once.
pub fn handle_category_created(
    state: &mut DashboardState,
    result: Result<clx_core::api::types::Category, String>,
) {
    match result {
        Ok(_) => {
            state.category_modal = None;
            state.refresh += 1;
        }
        Err(message) => {
            if let Some(modal) = state.category_modal.as_mut() {
                modal.submitting = false;
                modal.error = Some(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clx_core::api::types::{Category, Transaction, TransactionType};

    use super::*;
    use crate::features::dashboard::state::PAGE_SIZE;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn loaded_state() -> DashboardState {
        let mut state = DashboardState::new();
        state.sync();
        state.categories.complete(
            0,
            Ok(vec![
                Category {
                    id: 1,
                    name: "Groceries".to_string(),
                },
                Category {
                    id: 2,
                    name: "Rent".to_string(),
                },
            ]),
        );
        state
    }

    fn sample_transaction() -> Transaction {
        Transaction {
            id: 1,
            amount: 10.0,
            description: Some("x".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            kind: TransactionType::Expense,
            category_name: None,
        }
    }

    fn fill_valid_form(state: &mut DashboardState) {
        for ch in "25.5".chars() {
            handle_key(state, key(KeyCode::Char(ch)));
        }
        handle_key(state, key(KeyCode::Tab));
        for ch in "Lunch".chars() {
            handle_key(state, key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn test_submit_builds_transaction_from_form() {
        let mut state = loaded_state();
        fill_valid_form(&mut state);
        // Move to category and pick the second one.
        handle_key(&mut state, key(KeyCode::Tab)); // date
        handle_key(&mut state, key(KeyCode::Tab)); // kind
        handle_key(&mut state, key(KeyCode::Tab)); // category
        handle_key(&mut state, key(KeyCode::Down));

        let outcome = handle_key(&mut state, key(KeyCode::Enter));
        match outcome.effects.as_slice() {
            [UiEffect::CreateTransaction { input }] => {
                assert_eq!(input.amount, 25.5);
                assert_eq!(input.description, "Lunch");
                assert_eq!(input.category_id, 2);
                assert_eq!(input.kind, TransactionType::Expense);
            }
            other => panic!("unexpected effects: {other:?}"),
        }
        assert!(state.form.submitting);
    }

    #[test]
    fn test_submit_rejects_bad_amount() {
        let mut state = loaded_state();
        handle_key(&mut state, key(KeyCode::Char('x')));
        let outcome = handle_key(&mut state, key(KeyCode::Enter));
        assert!(outcome.effects.is_empty());
        assert!(state.form.error.is_some());
    }

    #[test]
    fn test_created_transaction_bumps_refresh_once_and_resyncs_all() {
        let mut state = loaded_state();
        // Drain the initial fetches.
        state.balance.complete(0, Ok(Default::default()));
        state.expenses.complete(0, Ok(vec![]));
        state.transactions.complete(0, Ok(Default::default()));

        handle_transaction_created(&mut state, Ok(sample_transaction()));
        assert_eq!(state.refresh, 1);
        assert!(!state.form.submitting);

        // All four widgets are now stale and refetch under the new key.
        let effects = state.sync();
        assert_eq!(effects.len(), 4);
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::FetchBalance { key: 1 }))
        );
    }

    #[test]
    fn test_failed_creation_keeps_refresh_and_shows_error() {
        let mut state = loaded_state();
        state.form.submitting = true;
        handle_transaction_created(&mut state, Err("Amount too large".to_string()));
        assert_eq!(state.refresh, 0);
        assert_eq!(state.form.error.as_deref(), Some("Amount too large"));
    }

    #[test]
    fn test_category_modal_flow() {
        let mut state = loaded_state();
        handle_key(&mut state, ctrl('g'));
        assert!(state.category_modal.is_some());

        for ch in "Travel".chars() {
            handle_key(&mut state, key(KeyCode::Char(ch)));
        }
        let outcome = handle_key(&mut state, key(KeyCode::Enter));
        assert!(matches!(
            outcome.effects.as_slice(),
            [UiEffect::CreateCategory { name }] if name == "Travel"
        ));

        handle_category_created(
            &mut state,
            Ok(Category {
                id: 3,
                name: "Travel".to_string(),
            }),
        );
        assert!(state.category_modal.is_none());
        assert_eq!(state.refresh, 1);
    }

    #[test]
    fn test_paging_invalidates_transactions_only() {
        let mut state = loaded_state();
        state.transactions.complete(
            0,
            Ok(clx_core::api::types::Page {
                total_pages: 3,
                ..Default::default()
            }),
        );

        handle_key(&mut state, key(KeyCode::PageDown));
        assert_eq!(state.page, 1);

        let effects = state.sync();
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            UiEffect::FetchTransactions {
                key: 0,
                page: 1,
                size: PAGE_SIZE,
            }
        ));
    }

    #[test]
    fn test_paging_clamped_to_bounds() {
        let mut state = loaded_state();
        state.transactions.complete(
            0,
            Ok(clx_core::api::types::Page {
                total_pages: 1,
                ..Default::default()
            }),
        );

        handle_key(&mut state, key(KeyCode::PageDown));
        assert_eq!(state.page, 0);
        handle_key(&mut state, key(KeyCode::PageUp));
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_logout_requested_with_ctrl_l() {
        let mut state = loaded_state();
        let outcome = handle_key(&mut state, ctrl('l'));
        assert!(outcome.logout);
    }
}
