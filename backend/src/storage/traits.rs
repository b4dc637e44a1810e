//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use shared::Expense;

/// Trait defining the interface for expense storage operations
///
/// The store is one whole document holding every user's expenses; all
/// operations are whole-document reads and replacements, never keyed
/// updates. `replace_for_user` is the only mutation path, which keeps one
/// user's session from ever touching another user's records.
pub trait ExpenseStorage {
    /// Load the entire cross-user expense collection.
    /// A missing or unparseable store reads as an empty collection.
    fn load_all(&self) -> Result<Vec<Expense>>;

    /// Serialize and write the entire collection, replacing prior contents
    fn save_all(&self, expenses: &[Expense]) -> Result<()>;

    /// Load the expenses belonging to one user, in stored order
    fn load_for_user(&self, user_id: &str) -> Result<Vec<Expense>>;

    /// Replace one user's expenses, leaving every other user's untouched
    fn replace_for_user(&self, user_id: &str, user_expenses: &[Expense]) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// This abstracts away the specific backing store and provides factory
/// methods for creating repositories, so the domain layer can work with any
/// storage backend without knowing the implementation details.
pub trait Connection: Clone {
    /// The type of ExpenseStorage this connection creates
    type ExpenseRepository: ExpenseStorage;

    /// Create a new expense repository for this connection
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
}
