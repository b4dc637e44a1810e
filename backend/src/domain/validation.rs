//! Validation of new-expense form input.

use chrono::Utc;
use shared::{CreateExpenseRequest, Expense, ValidationError};

/// Validate a candidate expense and construct the full record.
///
/// Amount, category and payment mode are required; the amount must parse to
/// a finite number greater than zero. On success the returned [`Expense`]
/// carries a freshly generated id and `created_at`, owned by `user_id`. No
/// state is touched on failure, so the caller can keep the form as entered.
pub fn validate_new_expense(
    request: &CreateExpenseRequest,
    user_id: &str,
) -> Result<Expense, ValidationError> {
    let raw_amount = request.amount.trim();
    if raw_amount.is_empty() {
        return Err(ValidationError::MissingField("amount".to_string()));
    }
    let category = request
        .category
        .ok_or_else(|| ValidationError::MissingField("category".to_string()))?;
    let payment_mode = request
        .payment_mode
        .ok_or_else(|| ValidationError::MissingField("payment mode".to_string()))?;

    let amount: f64 = raw_amount
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(request.amount.clone()))?;
    // parse() accepts "inf" and "NaN", so finiteness needs its own check
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::InvalidAmount(request.amount.clone()));
    }

    Ok(Expense {
        id: Expense::generate_id(),
        user_id: user_id.to_string(),
        amount,
        category,
        payment_mode,
        notes: request.notes.clone(),
        date: request.date,
        created_at: Utc::now().to_rfc3339(),
    })
}
