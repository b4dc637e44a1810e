use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Expense ID in format: "expense::<uuid-v4>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// ID of the user this expense belongs to
    pub user_id: String,
    /// Spending amount, always greater than zero
    pub amount: f64,
    pub category: Category,
    pub payment_mode: PaymentMode,
    /// Optional free-text note, may be empty
    pub notes: String,
    /// Calendar date the expense occurred (independent of creation time)
    pub date: NaiveDate,
    /// RFC 3339 timestamp of record creation
    pub created_at: String,
}

/// Fixed spending categories; the set is closed and ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Rental,
    Groceries,
    Entertainment,
    Travel,
    Others,
}

impl Category {
    /// All categories in display/tie-break order
    pub const ALL: [Category; 5] = [
        Category::Rental,
        Category::Groceries,
        Category::Entertainment,
        Category::Travel,
        Category::Others,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Rental => "Rental",
            Category::Groceries => "Groceries",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Others => "Others",
        };
        write!(f, "{}", name)
    }
}

/// Fixed payment modes; the set is closed and ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Net Banking")]
    NetBanking,
    Cash,
}

impl PaymentMode {
    /// All payment modes in display order
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Upi,
        PaymentMode::CreditCard,
        PaymentMode::NetBanking,
        PaymentMode::Cash,
    ];
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentMode::Upi => "UPI",
            PaymentMode::CreditCard => "Credit Card",
            PaymentMode::NetBanking => "Net Banking",
            PaymentMode::Cash => "Cash",
        };
        write!(f, "{}", name)
    }
}

/// The signed-in user as reported by the identity provider.
/// The core only consumes `id`; `display_name` is for greeting copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: String,
}

/// Raw form input for a new expense. The amount arrives as entered text so
/// validation can distinguish "missing" from "not a number".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    /// Amount as entered in the form
    pub amount: String,
    pub category: Option<Category>,
    pub payment_mode: Option<PaymentMode>,
    pub notes: String,
    /// Calendar date the expense occurred
    pub date: NaiveDate,
}

/// Response after recording an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

/// Response after a delete attempt. Deleting an unknown id is not an error;
/// `deleted` is false and the collection is unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    pub deleted: bool,
    pub success_message: String,
}

/// The signed-in user's expenses plus the headline totals shown above the list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub count: usize,
    pub total_amount: f64,
    /// Total for the current calendar month
    pub current_month_total: f64,
}

/// A filtered view of the expense list with its own running total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredExpensesResponse {
    pub expenses: Vec<Expense>,
    pub count: usize,
    pub total_amount: f64,
}

/// Date-range presets offered by the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DateRange {
    #[default]
    All,
    /// Same calendar month and year as "today" (not a rolling window)
    ThisMonth,
    /// Rolling window, inclusive of the boundary day
    Last30Days,
    Last90Days,
}

/// Selection state for the list view. Empty category/payment-mode sets mean
/// "no filtering on that dimension"; the three dimensions compose with AND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExpenseFilter {
    pub date_range: DateRange,
    pub categories: Vec<Category>,
    pub payment_modes: Vec<PaymentMode>,
}

/// One month of the six-month spending series. Every category is present in
/// `totals`, zero-filled when nothing was spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpending {
    /// Month label, e.g. "Jun 2024"
    pub month: String,
    pub totals: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Current-month spending split by category, zero-total categories excluded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub entries: Vec<CategoryShare>,
    /// Grand total of the included categories
    pub month_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: Category,
    pub total: f64,
    /// Share of `month_total`, 0 when the month total is 0
    pub percentage: f64,
}

/// All-time spending split by payment mode, zero-total modes excluded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentModeBreakdown {
    pub entries: Vec<PaymentModeShare>,
    /// All-time grand total across every expense
    pub grand_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentModeShare {
    pub mode: PaymentMode,
    pub total: f64,
    /// Share of the all-time grand total, 0 when the grand total is 0
    pub percentage: f64,
}

/// Headline figures for the analytics cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    /// Rounded mean amount, 0 when there are no expenses
    pub average: f64,
    /// Largest single amount, 0 when there are no expenses
    pub max: f64,
    /// Category with the largest current-month total, None when nothing was
    /// spent this month
    pub top_category: Option<Category>,
}

/// Validation failures for a new expense. The form keeps its state so the
/// user can correct the input and resubmit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    /// A required field (amount, category or payment mode) was not provided
    MissingField(String),
    /// The amount did not parse to a finite number greater than zero
    InvalidAmount(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => {
                write!(f, "Required field '{}' is missing", field)
            }
            ValidationError::InvalidAmount(raw) => {
                write!(f, "'{}' is not a valid amount; enter a number greater than zero", raw)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl Expense {
    /// Generate a fresh expense ID
    pub fn generate_id() -> String {
        format!("expense::{}", Uuid::new_v4())
    }

    /// Parse an expense ID back into its UUID component
    pub fn parse_id(id: &str) -> Result<Uuid, ExpenseIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "expense" {
            return Err(ExpenseIdError::InvalidFormat);
        }

        parts[1].parse::<Uuid>().map_err(|_| ExpenseIdError::InvalidUuid)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseIdError {
    InvalidFormat,
    InvalidUuid,
}

impl fmt::Display for ExpenseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseIdError::InvalidFormat => write!(f, "Invalid expense ID format"),
            ExpenseIdError::InvalidUuid => write!(f, "Invalid UUID in expense ID"),
        }
    }
}

impl std::error::Error for ExpenseIdError {}

impl DateRange {
    /// Width of the rolling window in days, None for the calendar-based ranges
    pub fn rolling_days(&self) -> Option<i64> {
        match self {
            DateRange::All | DateRange::ThisMonth => None,
            DateRange::Last30Days => Some(30),
            DateRange::Last90Days => Some(90),
        }
    }
}
