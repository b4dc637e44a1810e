//! Filter engine for the expense list view.

use chrono::{Datelike, Duration, NaiveDate};
use shared::{DateRange, Expense, ExpenseFilter};

/// Return the expenses matching the given filter, relative to `today`.
///
/// The three dimensions (date range, categories, payment modes) compose with
/// AND. An empty category or payment-mode set applies no filtering on that
/// dimension. Input order is preserved.
pub fn filter_expenses(
    expenses: &[Expense],
    filter: &ExpenseFilter,
    today: NaiveDate,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| in_date_range(e.date, filter.date_range, today))
        .filter(|e| filter.categories.is_empty() || filter.categories.contains(&e.category))
        .filter(|e| {
            filter.payment_modes.is_empty() || filter.payment_modes.contains(&e.payment_mode)
        })
        .cloned()
        .collect()
}

fn in_date_range(date: NaiveDate, range: DateRange, today: NaiveDate) -> bool {
    match range {
        DateRange::All => true,
        // Calendar month, not a rolling 30-day window
        DateRange::ThisMonth => date.month() == today.month() && date.year() == today.year(),
        DateRange::Last30Days | DateRange::Last90Days => {
            let days = range.rolling_days().unwrap_or(0);
            date >= today - Duration::days(days)
        }
    }
}
