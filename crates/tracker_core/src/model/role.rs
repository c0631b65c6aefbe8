//! Role record.

use super::department::DepartmentId;
use serde::{Deserialize, Serialize};

/// Store-generated role identifier.
pub type RoleId = i64;

/// Salaried position belonging to exactly one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    /// Unique within `department_id`.
    pub title: String,
    /// Non-negative yearly salary.
    pub salary: f64,
    pub department_id: DepartmentId,
}

/// Input for creating a role under an existing department.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub title: String,
    pub salary: f64,
    pub department_id: DepartmentId,
}
