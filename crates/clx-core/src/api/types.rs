//! Wire types for the ClarityExpense REST API.
//!
//! Field names follow the backend's JSON casing (camelCase).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Token + identity returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Income/expense/net totals for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub total_income: f64,
    pub total_expense: f64,
    pub current_balance: f64,
}

/// Per-category expense total for the dashboard breakdown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    pub category_name: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    /// Flips between income and expense (form toggle).
    pub fn toggled(self) -> Self {
        match self {
            TransactionType::Income => TransactionType::Expense,
            TransactionType::Expense => TransactionType::Income,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category_id: i64,
}

/// Spring-style page envelope. Only `content` is required; the rest of the
/// envelope fields default to zero when the backend omits them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: 0,
            size: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Transaction JSON uses the backend's camelCase and `type` key.
    #[test]
    fn test_transaction_deserializes_backend_json() {
        let json = r#"{
            "id": 3,
            "amount": 42.5,
            "description": "Weekly shop",
            "date": "2025-01-15",
            "type": "EXPENSE",
            "categoryName": "Groceries"
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.category_name.as_deref(), Some("Groceries"));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    /// NewTransaction serializes with camelCase keys and the `type` alias.
    #[test]
    fn test_new_transaction_serializes_for_backend() {
        let new = NewTransaction {
            amount: 9.99,
            description: "Coffee".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            kind: TransactionType::Expense,
            category_id: 2,
        };

        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["type"], "EXPENSE");
        assert_eq!(value["categoryId"], 2);
        assert_eq!(value["date"], "2025-02-01");
    }

    /// Page envelope tolerates a bare `content` array.
    #[test]
    fn test_page_defaults_envelope_fields() {
        let json = r#"{ "content": [] }"#;
        let page: Page<Transaction> = serde_json::from_str(json).unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
    }

    /// Balance parses the backend's camelCase totals.
    #[test]
    fn test_balance_deserializes() {
        let json = r#"{"totalIncome": 100.0, "totalExpense": 40.0, "currentBalance": 60.0}"#;
        let balance: Balance = serde_json::from_str(json).unwrap();
        assert_eq!(balance.current_balance, 60.0);
    }
}
