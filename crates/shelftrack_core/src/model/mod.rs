//! Inventory domain model.
//!
//! # Responsibility
//! - Define canonical book/author records used by core business logic.
//! - Own input validation rules shared by the service and repository layers.
//!
//! # Invariants
//! - Book and author identifiers are 4-digit integers (`1000..=9999`).
//! - Stock quantities are never negative.

pub mod book;
pub mod validation;
