//! # Domain Module
//!
//! Business logic for the expense tracker: input validation, the filter and
//! analytics engines (pure functions over an expense slice), and the
//! [`ExpenseService`] that orchestrates them over the storage layer.

pub mod analytics;
pub mod expense_service;
pub mod filter;
pub mod validation;

pub use analytics::{
    current_month_breakdown, monthly_series, payment_mode_breakdown, summary_stats,
};
pub use expense_service::ExpenseService;
pub use filter::filter_expenses;
pub use validation::validate_new_expense;
