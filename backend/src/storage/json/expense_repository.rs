use anyhow::Result;
use log::{info, warn};
use std::fs;
use shared::Expense;

use super::connection::JsonConnection;
use crate::storage::traits::ExpenseStorage;

/// JSON-document expense repository
///
/// The whole cross-user collection lives in a single file. Every write is a
/// whole-document replace through a temp file and rename, so a reader never
/// observes a partially written store.
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: JsonConnection,
}

impl ExpenseRepository {
    /// Create a new JSON expense repository
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn load_all(&self) -> Result<Vec<Expense>> {
        let file_path = self.connection.store_file_path();

        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&file_path)?;
        match serde_json::from_str::<Vec<Expense>>(&raw) {
            Ok(expenses) => Ok(expenses),
            Err(e) => {
                // A malformed store reads as empty rather than failing the
                // session; the next save rewrites the whole document.
                warn!(
                    "Could not parse expense store at {}: {}. Treating as empty.",
                    file_path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn save_all(&self, expenses: &[Expense]) -> Result<()> {
        let file_path = self.connection.store_file_path();
        let temp_path = file_path.with_extension("tmp");

        let serialized = serde_json::to_string(expenses)?;
        fs::write(&temp_path, serialized)?;

        // Atomic move from temp to final file
        fs::rename(&temp_path, &file_path)?;

        info!("Saved {} expenses to {}", expenses.len(), file_path.display());
        Ok(())
    }

    fn load_for_user(&self, user_id: &str) -> Result<Vec<Expense>> {
        let all = self.load_all()?;
        Ok(all.into_iter().filter(|e| e.user_id == user_id).collect())
    }

    fn replace_for_user(&self, user_id: &str, user_expenses: &[Expense]) -> Result<()> {
        // Whole-document read-modify-write: drop this user's records, keep
        // everyone else's, append the replacement set.
        let mut all: Vec<Expense> = self
            .load_all()?
            .into_iter()
            .filter(|e| e.user_id != user_id)
            .collect();
        all.extend(user_expenses.iter().cloned());

        self.save_all(&all)
    }
}
