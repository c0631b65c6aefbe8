//! Roster domain model.
//!
//! # Responsibility
//! - Define the department, role and employee records persisted by core.
//! - Define read models for the joined table projections.
//! - Own input validation shared by the service and prompt layers.
//!
//! # Invariants
//! - Identifiers are generated by the store and never reused.
//! - A role always belongs to one department; an employee always holds one role.

pub mod department;
pub mod employee;
pub mod money;
pub mod role;
pub mod validation;
pub mod views;
