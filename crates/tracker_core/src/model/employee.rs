//! Employee record.
//!
//! # Invariants
//! - `manager_id`, when set, points to another existing employee.
//! - An employee never manages themselves.

use super::role::RoleId;
use serde::{Deserialize, Serialize};

/// Store-generated employee identifier.
pub type EmployeeId = i64;

/// Person occupying one role, optionally reporting to a manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub role_id: RoleId,
    pub manager_id: Option<EmployeeId>,
}

impl Employee {
    /// Display name in "first last" form, as shown by pickers.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for hiring an employee into an existing role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role_id: RoleId,
    pub manager_id: Option<EmployeeId>,
}
