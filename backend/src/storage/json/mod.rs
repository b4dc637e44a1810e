//! JSON document storage backend. One file holds the serialized expense
//! collection for every user; reads and writes always cover the whole file.

pub mod connection;
pub mod expense_repository;

pub use connection::JsonConnection;
pub use expense_repository::ExpenseRepository;
