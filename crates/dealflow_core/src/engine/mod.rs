//! Stage transition engine.
//!
//! # Responsibility
//! - Decide which stages a deal may move to from its current stage.
//! - Produce the next deal version for approved moves and saves.
//!
//! # Invariants
//! - Decision and mutation read the same deal snapshot; nothing re-fetches.
//! - The engine holds no shared mutable state.

pub mod mutator;
pub mod transition;
