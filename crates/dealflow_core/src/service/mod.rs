//! Core use-case services.
//!
//! # Responsibility
//! - Compose engine decisions into use-case level APIs.
//! - Keep UI and store collaborators decoupled from rule details.

pub mod pipeline_service;
