//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into user-visible roster operations.
//! - Enforce uniqueness, integrity guards and manager cleanup above storage.

pub mod roster_service;
