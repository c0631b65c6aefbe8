//! Roster use-case service.
//!
//! # Responsibility
//! - Validate input against current rows before any insert or update.
//! - Guard deletes that would orphan roles or employees.
//! - Run multi-statement actions (employee delete) atomically.
//!
//! # Invariants
//! - Department names and per-department role titles stay unique.
//! - A department is deleted only while it owns zero roles; a role only while
//!   zero employees hold it.
//! - Deleting an employee first clears every `manager_id` pointing at them.
//! - Changing an employee's role never touches their `manager_id`.

use crate::model::department::{Department, DepartmentId};
use crate::model::employee::{Employee, EmployeeId, NewEmployee};
use crate::model::role::{NewRole, Role, RoleId};
use crate::model::validation::{
    normalize_department_name, normalize_person_name, normalize_role_title, validate_salary,
    NameField, ValidationError,
};
use crate::model::views::{DepartmentView, EmployeeFilter, EmployeeView, RoleView};
use crate::repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::repo::report_repo::{ReportRepository, SqliteReportRepository};
use crate::repo::role_repo::{RoleRepository, SqliteRoleRepository};
use crate::repo::{RepoError, RepoResult};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from roster service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Input must be corrected; nothing was written.
    Validation(ValidationError),
    /// Storage failure or missing row.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}

/// Expected reason a delete did not happen. Not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    DepartmentHasRoles {
        department_id: DepartmentId,
        role_count: u32,
    },
    RoleHasEmployees {
        role_id: RoleId,
        employee_count: u32,
    },
}

impl Display for Refusal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DepartmentHasRoles { role_count, .. } => write!(
                f,
                "it still has {role_count} role(s); delete or reassign them first"
            ),
            Self::RoleHasEmployees { employee_count, .. } => write!(
                f,
                "{employee_count} employee(s) still hold it; reassign or delete them first"
            ),
        }
    }
}

/// Result of a guarded delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Refused(Refusal),
}

/// Result of deleting an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmployeeRemoval {
    /// Reports whose manager reference was cleared.
    pub unmanaged_reports: usize,
}

/// Roster service facade over one borrowed connection.
pub struct RosterService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> RosterService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn departments(&self) -> SqliteDepartmentRepository<'conn> {
        SqliteDepartmentRepository::new(self.conn)
    }

    fn roles(&self) -> SqliteRoleRepository<'conn> {
        SqliteRoleRepository::new(self.conn)
    }

    fn employees(&self) -> SqliteEmployeeRepository<'conn> {
        SqliteEmployeeRepository::new(self.conn)
    }

    fn reports(&self) -> SqliteReportRepository<'conn> {
        SqliteReportRepository::new(self.conn)
    }

    // ----- lookups used by pickers -----

    pub fn list_departments(&self) -> RepoResult<Vec<Department>> {
        self.departments().list_departments()
    }

    pub fn department_names(&self) -> RepoResult<Vec<String>> {
        Ok(self
            .list_departments()?
            .into_iter()
            .map(|department| department.name)
            .collect())
    }

    pub fn list_roles(&self, department_id: DepartmentId) -> RepoResult<Vec<Role>> {
        self.roles().list_roles_in_department(department_id)
    }

    pub fn role_titles(&self, department_id: DepartmentId) -> RepoResult<Vec<String>> {
        Ok(self
            .list_roles(department_id)?
            .into_iter()
            .map(|role| role.title)
            .collect())
    }

    pub fn list_employees_in_role(&self, role_id: RoleId) -> RepoResult<Vec<Employee>> {
        self.employees().list_employees_in_role(role_id)
    }

    /// Employees of the department who may manage someone, minus `exclude`.
    pub fn manager_candidates(
        &self,
        department_id: DepartmentId,
        exclude: Option<EmployeeId>,
    ) -> RepoResult<Vec<Employee>> {
        let mut candidates = self
            .employees()
            .list_employees_in_department(department_id)?;
        if let Some(excluded) = exclude {
            candidates.retain(|employee| employee.id != excluded);
        }
        Ok(candidates)
    }

    pub fn list_managers(&self) -> RepoResult<Vec<Employee>> {
        self.employees().list_managers()
    }

    // ----- create -----

    /// Adds a department after trimming and duplicate checks.
    pub fn add_department(&self, name: &str) -> ServiceResult<Department> {
        let existing = self.department_names()?;
        let name = normalize_department_name(name, &existing)?;
        let department = self.departments().create_department(&name)?;
        info!(
            "event=department_add module=service status=ok department_id={}",
            department.id
        );
        Ok(department)
    }

    /// Adds a role under an existing department.
    pub fn add_role(
        &self,
        department_id: DepartmentId,
        title: &str,
        salary: f64,
    ) -> ServiceResult<Role> {
        self.require_department(department_id)?;
        let existing = self.role_titles(department_id)?;
        let title = normalize_role_title(title, department_id, &existing)?;
        validate_salary(salary)?;

        let role = self.roles().create_role(&NewRole {
            title,
            salary,
            department_id,
        })?;
        info!(
            "event=role_add module=service status=ok role_id={} department_id={}",
            role.id, department_id
        );
        Ok(role)
    }

    /// Hires an employee into an existing role with an optional manager.
    pub fn add_employee(&self, employee: &NewEmployee) -> ServiceResult<Employee> {
        let first_name = normalize_person_name(&employee.first_name, NameField::First)?;
        let last_name = normalize_person_name(&employee.last_name, NameField::Last)?;
        self.require_role(employee.role_id)?;
        if let Some(manager_id) = employee.manager_id {
            self.require_employee(manager_id)?;
        }

        let created = self.employees().create_employee(&NewEmployee {
            first_name,
            last_name,
            role_id: employee.role_id,
            manager_id: employee.manager_id,
        })?;
        info!(
            "event=employee_add module=service status=ok employee_id={} role_id={} has_manager={}",
            created.id,
            created.role_id,
            created.manager_id.is_some()
        );
        Ok(created)
    }

    // ----- update -----

    /// Renames a department; the new name must not belong to another department.
    pub fn rename_department(
        &self,
        department_id: DepartmentId,
        name: &str,
    ) -> ServiceResult<Department> {
        let current = self.require_department(department_id)?;
        let others: Vec<String> = self
            .list_departments()?
            .into_iter()
            .filter(|department| department.id != current.id)
            .map(|department| department.name)
            .collect();
        let name = normalize_department_name(name, &others)?;
        self.departments().rename_department(department_id, &name)?;
        info!("event=department_rename module=service status=ok department_id={department_id}");
        Ok(Department {
            id: department_id,
            name,
        })
    }

    /// Moves an employee to another role. The manager reference is kept as is,
    /// even when the new role belongs to another department.
    pub fn update_employee_role(
        &self,
        employee_id: EmployeeId,
        role_id: RoleId,
    ) -> ServiceResult<()> {
        self.require_role(role_id)?;
        self.employees().update_role(employee_id, role_id)?;
        info!(
            "event=employee_role_update module=service status=ok employee_id={employee_id} role_id={role_id}"
        );
        Ok(())
    }

    /// Sets or clears an employee's manager.
    pub fn update_employee_manager(
        &self,
        employee_id: EmployeeId,
        manager_id: Option<EmployeeId>,
    ) -> ServiceResult<()> {
        if manager_id == Some(employee_id) {
            return Err(ValidationError::SelfManagement(employee_id).into());
        }
        if let Some(manager_id) = manager_id {
            self.require_employee(manager_id)?;
        }
        self.employees().update_manager(employee_id, manager_id)?;
        info!(
            "event=employee_manager_update module=service status=ok employee_id={employee_id} has_manager={}",
            manager_id.is_some()
        );
        Ok(())
    }

    // ----- delete -----

    /// Returns why the department cannot be deleted right now, if anything.
    pub fn department_delete_refusal(
        &self,
        department_id: DepartmentId,
    ) -> ServiceResult<Option<Refusal>> {
        let role_count = self.roles().count_roles_in_department(department_id)?;
        Ok((role_count > 0).then_some(Refusal::DepartmentHasRoles {
            department_id,
            role_count,
        }))
    }

    /// Deletes a department that owns no roles.
    pub fn delete_department(&self, department_id: DepartmentId) -> ServiceResult<DeleteOutcome> {
        if let Some(refusal) = self.department_delete_refusal(department_id)? {
            info!(
                "event=department_delete module=service status=refused department_id={department_id}"
            );
            return Ok(DeleteOutcome::Refused(refusal));
        }
        self.departments().delete_department(department_id)?;
        info!("event=department_delete module=service status=ok department_id={department_id}");
        Ok(DeleteOutcome::Deleted)
    }

    /// Returns why the role cannot be deleted right now, if anything.
    pub fn role_delete_refusal(&self, role_id: RoleId) -> ServiceResult<Option<Refusal>> {
        let employee_count = self.employees().count_employees_in_role(role_id)?;
        Ok((employee_count > 0).then_some(Refusal::RoleHasEmployees {
            role_id,
            employee_count,
        }))
    }

    /// Deletes a role that no employee holds.
    pub fn delete_role(&self, role_id: RoleId) -> ServiceResult<DeleteOutcome> {
        if let Some(refusal) = self.role_delete_refusal(role_id)? {
            info!("event=role_delete module=service status=refused role_id={role_id}");
            return Ok(DeleteOutcome::Refused(refusal));
        }
        self.roles().delete_role(role_id)?;
        info!("event=role_delete module=service status=ok role_id={role_id}");
        Ok(DeleteOutcome::Deleted)
    }

    /// Clears manager references to the employee, then deletes the row.
    /// Both statements commit together or not at all.
    pub fn delete_employee(&self, employee_id: EmployeeId) -> ServiceResult<EmployeeRemoval> {
        let tx = self.conn.unchecked_transaction()?;
        let removal = {
            let employees = SqliteEmployeeRepository::new(&tx);
            let unmanaged_reports = employees.clear_manager_references(employee_id)?;
            employees.delete_employee(employee_id)?;
            EmployeeRemoval { unmanaged_reports }
        };
        tx.commit()?;
        info!(
            "event=employee_delete module=service status=ok employee_id={employee_id} unmanaged_reports={}",
            removal.unmanaged_reports
        );
        Ok(removal)
    }

    // ----- read projections -----

    pub fn department_views(&self) -> RepoResult<Vec<DepartmentView>> {
        self.reports().list_department_views()
    }

    pub fn role_views(&self) -> RepoResult<Vec<RoleView>> {
        self.reports().list_role_views()
    }

    pub fn employee_views(&self, filter: EmployeeFilter) -> RepoResult<Vec<EmployeeView>> {
        self.reports().list_employee_views(filter)
    }

    /// Total salary of filled positions in the department; `0.0` when empty.
    pub fn department_budget(&self, department_id: DepartmentId) -> ServiceResult<f64> {
        self.require_department(department_id)?;
        Ok(self.reports().department_budget(department_id)?)
    }

    // ----- existence checks -----

    fn require_department(&self, id: DepartmentId) -> ServiceResult<Department> {
        self.departments()
            .get_department(id)?
            .ok_or(RepoError::NotFound {
                entity: "department",
                id,
            })
            .map_err(Into::into)
    }

    fn require_role(&self, id: RoleId) -> ServiceResult<Role> {
        self.roles()
            .get_role(id)?
            .ok_or(RepoError::NotFound { entity: "role", id })
            .map_err(Into::into)
    }

    fn require_employee(&self, id: EmployeeId) -> ServiceResult<Employee> {
        self.employees()
            .get_employee(id)?
            .ok_or(RepoError::NotFound {
                entity: "employee",
                id,
            })
            .map_err(Into::into)
    }
}
