//! Aggregation engine backing the analytics views.
//!
//! Every function here recomputes from the full expense slice on each call.
//! At personal-finance volumes this is cheap, and it keeps the engine free
//! of cached state that could drift from the collection.

use chrono::{Datelike, NaiveDate};
use shared::{
    Category, CategoryBreakdown, CategoryShare, CategoryTotal, Expense, MonthlySpending,
    PaymentMode, PaymentModeBreakdown, PaymentModeShare, SummaryStats,
};

/// Number of months covered by the spending series, current month included
const SERIES_MONTHS: usize = 6;

/// Per-category totals for the six calendar months ending at `today`'s
/// month, oldest first. Every category appears in every month, zero-filled
/// when nothing was spent.
pub fn monthly_series(expenses: &[Expense], today: NaiveDate) -> Vec<MonthlySpending> {
    months_ending_at(today, SERIES_MONTHS)
        .into_iter()
        .map(|(year, month)| {
            let label = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_default();

            let totals = Category::ALL
                .iter()
                .map(|&category| CategoryTotal {
                    category,
                    total: expenses
                        .iter()
                        .filter(|e| {
                            e.category == category
                                && e.date.year() == year
                                && e.date.month() == month
                        })
                        .map(|e| e.amount)
                        .sum(),
                })
                .collect();

            MonthlySpending { month: label, totals }
        })
        .collect()
}

/// Current-month spending split by category. Categories with no spend are
/// excluded; percentages are relative to the month total (0 when the month
/// total is 0).
pub fn current_month_breakdown(expenses: &[Expense], today: NaiveDate) -> CategoryBreakdown {
    let totals = current_month_totals(expenses, today);
    let month_total: f64 = totals.iter().map(|(_, total)| total).sum();

    let entries = totals
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            percentage: percentage_of(total, month_total),
        })
        .collect();

    CategoryBreakdown {
        entries,
        month_total,
    }
}

/// All-time spending split by payment mode. Modes with no spend are
/// excluded; percentages are relative to the all-time grand total.
pub fn payment_mode_breakdown(expenses: &[Expense]) -> PaymentModeBreakdown {
    let grand_total: f64 = expenses.iter().map(|e| e.amount).sum();

    let entries = PaymentMode::ALL
        .iter()
        .map(|&mode| {
            let total: f64 = expenses
                .iter()
                .filter(|e| e.payment_mode == mode)
                .map(|e| e.amount)
                .sum();
            (mode, total)
        })
        .filter(|(_, total)| *total > 0.0)
        .map(|(mode, total)| PaymentModeShare {
            mode,
            total,
            percentage: percentage_of(total, grand_total),
        })
        .collect();

    PaymentModeBreakdown {
        entries,
        grand_total,
    }
}

/// Headline figures: record count, rounded average amount, largest single
/// amount, and the top current-month category. Ties on the top category go
/// to the earlier entry in [`Category::ALL`].
pub fn summary_stats(expenses: &[Expense], today: NaiveDate) -> SummaryStats {
    let count = expenses.len();
    let sum: f64 = expenses.iter().map(|e| e.amount).sum();
    let average = if count > 0 {
        (sum / count as f64).round()
    } else {
        0.0
    };
    let max = expenses.iter().map(|e| e.amount).fold(0.0, f64::max);

    let mut top_category = None;
    let mut top_total = 0.0;
    for (category, total) in current_month_totals(expenses, today) {
        // Strictly greater, so the first category in ALL order wins ties
        if total > top_total {
            top_category = Some(category);
            top_total = total;
        }
    }

    SummaryStats {
        count,
        average,
        max,
        top_category,
    }
}

/// Nonzero per-category totals for `today`'s calendar month, in ALL order
fn current_month_totals(expenses: &[Expense], today: NaiveDate) -> Vec<(Category, f64)> {
    Category::ALL
        .iter()
        .map(|&category| {
            let total: f64 = expenses
                .iter()
                .filter(|e| {
                    e.category == category
                        && e.date.year() == today.year()
                        && e.date.month() == today.month()
                })
                .map(|e| e.amount)
                .sum();
            (category, total)
        })
        .filter(|(_, total)| *total > 0.0)
        .collect()
}

fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// The last `n` calendar months ending at `today`'s month, oldest first
fn months_ending_at(today: NaiveDate, n: usize) -> Vec<(i32, u32)> {
    let mut year = today.year();
    let mut month = today.month();
    let mut months = vec![(year, month)];

    for _ in 1..n {
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
        months.push((year, month));
    }

    months.reverse();
    months
}
