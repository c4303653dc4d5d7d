//! Stage completeness and consistency rules.
//!
//! # Responsibility
//! - Hold the per-stage required field catalog.
//! - Hold stateless cross-field validators over a whole deal.
//! - Define the validation error taxonomy shared by engine and services.
//!
//! # Invariants
//! - Rules never mutate a deal and never perform I/O.

pub mod cross_field;
pub mod error;
pub mod requirements;
