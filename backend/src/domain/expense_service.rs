//! Expense service: the stateful orchestrator over one user's expenses.

use anyhow::{anyhow, Result};
use chrono::{Datelike, Local};
use log::{info, warn};
use shared::{
    AddExpenseResponse, CategoryBreakdown, CreateExpenseRequest, CurrentUser,
    DeleteExpenseResponse, Expense, ExpenseFilter, ExpenseListResponse,
    FilteredExpensesResponse, MonthlySpending, PaymentModeBreakdown, SummaryStats,
};

use crate::domain::{analytics, filter, validation};
use crate::storage::{Connection, ExpenseStorage};

/// Holds the signed-in user's expenses in memory (newest first) and writes
/// through to storage on every mutation. The in-memory collection stays
/// authoritative for the session even when a write fails, so a full storage
/// outage degrades to an unsaved session rather than an error.
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    session: Option<Session>,
}

/// One signed-in user's working state
struct Session {
    user_id: String,
    expenses: Vec<Expense>,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
            session: None,
        }
    }

    /// Load the user's expenses and make them the working collection.
    /// A failed load starts the session empty rather than failing sign-in.
    pub fn sign_in(&mut self, user: &CurrentUser) {
        let expenses = match self.expense_repository.load_for_user(&user.id) {
            Ok(expenses) => expenses,
            Err(e) => {
                warn!(
                    "Could not load expenses for user {}: {:#}. Starting empty.",
                    user.id, e
                );
                Vec::new()
            }
        };

        info!("Signed in user {} with {} expenses", user.id, expenses.len());
        self.session = Some(Session {
            user_id: user.id.clone(),
            expenses,
        });
    }

    /// Drop the working collection so nothing leaks into the next session
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Signed out user {}", session.user_id);
        }
    }

    pub fn current_user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }

    /// Validate and record a new expense, newest first. Validation failures
    /// leave the collection untouched and reach the caller as a
    /// [`shared::ValidationError`].
    pub fn add_expense(&mut self, request: &CreateExpenseRequest) -> Result<AddExpenseResponse> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| anyhow!("No signed-in user"))?;

        let expense = validation::validate_new_expense(request, &session.user_id)?;
        session.expenses.insert(0, expense.clone());

        persist(&self.expense_repository, session);

        Ok(AddExpenseResponse {
            expense,
            success_message: "Expense added successfully!".to_string(),
        })
    }

    /// Delete by id. Deleting an id that is not present is a no-op, not an
    /// error, so retried deletes are harmless.
    pub fn delete_expense(&mut self, expense_id: &str) -> Result<DeleteExpenseResponse> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| anyhow!("No signed-in user"))?;

        let initial_len = session.expenses.len();
        session.expenses.retain(|e| e.id != expense_id);
        let deleted = session.expenses.len() < initial_len;

        if deleted {
            persist(&self.expense_repository, session);
            info!("Deleted expense {}", expense_id);
        }

        let success_message = if deleted {
            "Expense deleted".to_string()
        } else {
            "No matching expense found".to_string()
        };

        Ok(DeleteExpenseResponse {
            deleted,
            success_message,
        })
    }

    /// The working collection with the headline totals for the summary cards
    pub fn list_expenses(&self) -> ExpenseListResponse {
        let expenses = self.expenses();
        let today = Local::now().date_naive();

        let total_amount: f64 = expenses.iter().map(|e| e.amount).sum();
        let current_month_total: f64 = expenses
            .iter()
            .filter(|e| e.date.month() == today.month() && e.date.year() == today.year())
            .map(|e| e.amount)
            .sum();

        ExpenseListResponse {
            count: expenses.len(),
            total_amount,
            current_month_total,
            expenses: expenses.to_vec(),
        }
    }

    /// The working collection narrowed by the list view's selection state
    pub fn filtered_expenses(&self, filter_state: &ExpenseFilter) -> FilteredExpensesResponse {
        let today = Local::now().date_naive();
        let expenses = filter::filter_expenses(self.expenses(), filter_state, today);
        let total_amount: f64 = expenses.iter().map(|e| e.amount).sum();

        FilteredExpensesResponse {
            count: expenses.len(),
            total_amount,
            expenses,
        }
    }

    pub fn monthly_series(&self) -> Vec<MonthlySpending> {
        analytics::monthly_series(self.expenses(), Local::now().date_naive())
    }

    pub fn current_month_breakdown(&self) -> CategoryBreakdown {
        analytics::current_month_breakdown(self.expenses(), Local::now().date_naive())
    }

    pub fn payment_mode_breakdown(&self) -> PaymentModeBreakdown {
        analytics::payment_mode_breakdown(self.expenses())
    }

    pub fn summary_stats(&self) -> SummaryStats {
        analytics::summary_stats(self.expenses(), Local::now().date_naive())
    }

    fn expenses(&self) -> &[Expense] {
        self.session.as_ref().map(|s| s.expenses.as_slice()).unwrap_or(&[])
    }
}

/// Write the session's collection through to storage. Failures are logged
/// and swallowed; the in-memory state remains authoritative.
fn persist<S: ExpenseStorage>(repository: &S, session: &Session) {
    if let Err(e) = repository.replace_for_user(&session.user_id, &session.expenses) {
        warn!(
            "Could not persist expenses for user {}: {:#}. Keeping in-memory state.",
            session.user_id, e
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::{Category, PaymentMode, ValidationError};
    use tempfile::TempDir;

    use crate::storage::JsonConnection;

    fn setup_test_service() -> (ExpenseService<JsonConnection>, JsonConnection, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let service = ExpenseService::new(&connection);
        (service, connection, temp_dir)
    }

    fn user(id: &str) -> CurrentUser {
        CurrentUser {
            id: id.to_string(),
            display_name: format!("{} display", id),
        }
    }

    fn request(amount: &str) -> CreateExpenseRequest {
        CreateExpenseRequest {
            amount: amount.to_string(),
            category: Some(Category::Groceries),
            payment_mode: Some(PaymentMode::Cash),
            notes: "weekly shop".to_string(),
            date: Local::now().date_naive(),
        }
    }

    #[test]
    fn test_add_expense_appears_newest_first() {
        let (mut service, _conn, _temp) = setup_test_service();
        service.sign_in(&user("user_1"));

        let first = service.add_expense(&request("10")).unwrap().expense;
        let second = service.add_expense(&request("20")).unwrap().expense;
        assert_ne!(first.id, second.id);

        let list = service.list_expenses();
        assert_eq!(list.count, 2);
        assert_eq!(list.total_amount, 30.0);
        assert_eq!(list.current_month_total, 30.0);
        assert_eq!(list.expenses[0].id, second.id);
        assert_eq!(list.expenses[1].id, first.id);
    }

    #[test]
    fn test_add_expense_persists_across_sessions() {
        let (mut service, connection, _temp) = setup_test_service();
        service.sign_in(&user("user_1"));
        let added = service.add_expense(&request("42.50")).unwrap().expense;

        // A fresh service over the same store sees the record
        let mut reloaded = ExpenseService::new(&connection);
        reloaded.sign_in(&user("user_1"));
        let list = reloaded.list_expenses();
        assert_eq!(list.count, 1);
        assert_eq!(list.expenses[0], added);
    }

    #[test]
    fn test_invalid_amount_leaves_collection_unchanged() {
        let (mut service, _conn, _temp) = setup_test_service();
        service.sign_in(&user("user_1"));
        service.add_expense(&request("10")).unwrap();

        let err = service.add_expense(&request("-5")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::InvalidAmount("-5".to_string()))
        );
        assert_eq!(service.list_expenses().count, 1);
    }

    #[test]
    fn test_missing_field_is_surfaced() {
        let (mut service, _conn, _temp) = setup_test_service();
        service.sign_in(&user("user_1"));

        let mut bad = request("10");
        bad.category = None;
        let err = service.add_expense(&bad).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingField("category".to_string()))
        );
        assert_eq!(service.list_expenses().count, 0);
    }

    #[test]
    fn test_add_without_sign_in_fails() {
        let (mut service, _conn, _temp) = setup_test_service();
        assert!(service.add_expense(&request("10")).is_err());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (mut service, _conn, _temp) = setup_test_service();
        service.sign_in(&user("user_1"));
        let expense = service.add_expense(&request("10")).unwrap().expense;

        let first = service.delete_expense(&expense.id).unwrap();
        assert!(first.deleted);
        assert_eq!(service.list_expenses().count, 0);

        // Second delete of the same id: same resulting collection, no error
        let second = service.delete_expense(&expense.id).unwrap();
        assert!(!second.deleted);
        assert_eq!(service.list_expenses().count, 0);
    }

    #[test]
    fn test_delete_of_unknown_id_preserves_order() {
        let (mut service, _conn, _temp) = setup_test_service();
        service.sign_in(&user("user_1"));
        service.add_expense(&request("1")).unwrap();
        service.add_expense(&request("2")).unwrap();
        service.add_expense(&request("3")).unwrap();

        let before = service.list_expenses().expenses;
        let response = service.delete_expense("expense::does-not-exist").unwrap();
        assert!(!response.deleted);
        assert_eq!(service.list_expenses().expenses, before);
    }

    #[test]
    fn test_switching_users_never_leaks_or_clobbers() {
        let (mut service, connection, _temp) = setup_test_service();

        service.sign_in(&user("user_a"));
        service.add_expense(&request("100")).unwrap();

        // user_b sees an empty collection, not user_a's
        service.sign_in(&user("user_b"));
        assert_eq!(service.list_expenses().count, 0);
        service.add_expense(&request("7")).unwrap();

        // user_a's data survived user_b's session
        let mut check = ExpenseService::new(&connection);
        check.sign_in(&user("user_a"));
        let list = check.list_expenses();
        assert_eq!(list.count, 1);
        assert_eq!(list.total_amount, 100.0);
    }

    #[test]
    fn test_sign_out_clears_working_state() {
        let (mut service, _conn, _temp) = setup_test_service();
        service.sign_in(&user("user_1"));
        service.add_expense(&request("10")).unwrap();

        service.sign_out();
        assert_eq!(service.current_user_id(), None);
        assert_eq!(service.list_expenses().count, 0);
    }

    #[test]
    fn test_storage_outage_keeps_in_memory_state() {
        let (mut service, _conn, temp) = setup_test_service();
        service.sign_in(&user("user_1"));

        // Take the data directory away so every write fails
        std::fs::remove_dir_all(temp.path()).unwrap();

        let response = service.add_expense(&request("10")).unwrap();
        assert_eq!(response.expense.amount, 10.0);
        assert_eq!(service.list_expenses().count, 1);
    }

    #[test]
    fn test_filtered_expenses_totals() {
        let (mut service, _conn, _temp) = setup_test_service();
        service.sign_in(&user("user_1"));
        service.add_expense(&request("10")).unwrap();

        let mut travel = request("25");
        travel.category = Some(Category::Travel);
        service.add_expense(&travel).unwrap();

        let filtered = service.filtered_expenses(&ExpenseFilter {
            categories: vec![Category::Travel],
            ..Default::default()
        });
        assert_eq!(filtered.count, 1);
        assert_eq!(filtered.total_amount, 25.0);

        let unfiltered = service.filtered_expenses(&ExpenseFilter::default());
        assert_eq!(unfiltered.count, 2);
        assert_eq!(unfiltered.total_amount, 35.0);
    }

    #[test]
    fn test_analytics_views_track_the_working_collection() {
        let (mut service, _conn, _temp) = setup_test_service();
        service.sign_in(&user("user_1"));
        service.add_expense(&request("100")).unwrap();

        let stats = service.summary_stats();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.top_category, Some(Category::Groceries));

        let modes = service.payment_mode_breakdown();
        assert_eq!(modes.grand_total, 100.0);
        assert_eq!(modes.entries.len(), 1);
        assert_eq!(modes.entries[0].mode, PaymentMode::Cash);

        let series = service.monthly_series();
        assert_eq!(series.len(), 6);
        let this_month = series.last().unwrap();
        let groceries = this_month
            .totals
            .iter()
            .find(|t| t.category == Category::Groceries)
            .unwrap();
        assert_eq!(groceries.total, 100.0);
    }

    #[test]
    fn test_expense_dates_are_kept_as_entered() {
        let (mut service, _conn, _temp) = setup_test_service();
        service.sign_in(&user("user_1"));

        let mut backdated = request("10");
        backdated.date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
        let expense = service.add_expense(&backdated).unwrap().expense;

        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2020, 1, 15).unwrap());
        // created_at reflects creation time, independent of the expense date
        let created = chrono::DateTime::parse_from_rfc3339(&expense.created_at).unwrap();
        assert!(created.date_naive() > expense.date);
    }
}
