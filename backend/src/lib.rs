//! # Expense Tracker Backend
//!
//! Contains all non-UI logic for the expense tracker application.
//!
//! This crate brings together:
//! - **Domain**: validation, filtering, analytics and the expense service
//! - **Storage**: the per-user JSON document persistence layer
//!
//! The backend is UI-agnostic: any frontend can drive it by constructing an
//! [`ExpenseService`] over a storage [`Connection`] and calling its
//! operations. All execution is synchronous; every operation runs to
//! completion within the caller's event.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (forms, list, charts)
//!     ↓
//! Domain Layer (services, filter and analytics engines)
//!     ↓
//! Storage Layer (JSON document store)
//! ```

pub mod domain;
pub mod storage;

pub use domain::*;
pub use storage::*;
