//! Dashboard view: balance summary, expense breakdown, transaction history,
//! and the entry forms.

mod render;
mod state;
mod update;

pub use render::render_dashboard;
pub use state::{
    CategoryForm, DashboardState, Dependent, FormFocus, Remote, TransactionForm,
};
pub use update::{
    DashboardOutcome, handle_category_created, handle_key, handle_transaction_created,
};
