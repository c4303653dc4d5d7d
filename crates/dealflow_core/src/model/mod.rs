//! Deal pipeline domain model.
//!
//! # Responsibility
//! - Define the canonical deal record, its stage sequence and field ids.
//! - Keep one sparse record shape for every stage of the pipeline.
//!
//! # Invariants
//! - Every deal is identified by a stable `DealId`.
//! - The linear stage list is declared once, in `stage`.

pub mod deal;
pub mod field;
pub mod stage;
