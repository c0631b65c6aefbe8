//! Read models backing the "view" actions.
//!
//! Each projection mirrors one rendered table: roles joined to their
//! department name, employees joined to title, department, salary and the
//! manager's full name. Joined columns are optional because the joins are
//! outer joins.

use super::department::DepartmentId;
use super::employee::EmployeeId;
use super::role::RoleId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentView {
    pub id: DepartmentId,
    pub name: String,
    pub role_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleView {
    pub id: RoleId,
    pub title: String,
    pub salary: f64,
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeView {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub salary: Option<f64>,
    /// "first last" of the manager, `None` when unmanaged.
    pub manager: Option<String>,
}

/// Row filter for the employee projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmployeeFilter {
    #[default]
    All,
    Department(DepartmentId),
    Role(RoleId),
    Manager(EmployeeId),
}
