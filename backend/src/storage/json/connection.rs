use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::Connection;

/// JsonConnection manages the data directory and the path of the expense
/// store file
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

const STORE_FILE_NAME: &str = "expenses.json";

impl JsonConnection {
    /// Create a new JSON connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new JSON connection in the default data directory
    /// (~/Documents/Expense Tracker)
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Expense Tracker");

        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the path of the expense store file
    pub fn store_file_path(&self) -> PathBuf {
        self.base_directory.join(STORE_FILE_NAME)
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}

impl Connection for JsonConnection {
    type ExpenseRepository = super::expense_repository::ExpenseRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        super::expense_repository::ExpenseRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_base_directory() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let nested = temp_dir.path().join("data").join("expense-tracker");

        let connection = JsonConnection::new(&nested)?;

        assert!(nested.exists());
        assert_eq!(connection.base_directory(), nested.as_path());
        assert_eq!(connection.store_file_path(), nested.join("expenses.json"));
        Ok(())
    }

    #[test]
    fn test_store_file_is_not_created_eagerly() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let connection = JsonConnection::new(temp_dir.path())?;

        // The file appears on first save, not on connect
        assert!(!connection.store_file_path().exists());
        Ok(())
    }
}
