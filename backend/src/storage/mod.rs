//! # Storage Module
//!
//! Persistence for the expense tracker. The domain layer talks to the
//! [`ExpenseStorage`] trait; the JSON document implementation lives in
//! [`json`].

pub mod json;
pub mod traits;

pub use json::{ExpenseRepository, JsonConnection};
pub use traits::{Connection, ExpenseStorage};
