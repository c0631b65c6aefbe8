//! Employee repository contract and SQLite implementation.
//!
//! # Invariants
//! - `clear_manager_references` must run before deleting a manager row;
//!   the `manager_id` foreign key rejects the delete otherwise.

use super::{count_to_u32, expect_changed, RepoResult};
use crate::model::department::DepartmentId;
use crate::model::employee::{Employee, EmployeeId, NewEmployee};
use crate::model::role::RoleId;
use rusqlite::{params, Connection, OptionalExtension, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    employees.employee_id AS employee_id,
    employees.first_name AS first_name,
    employees.last_name AS last_name,
    employees.role_id AS role_id,
    employees.manager_id AS manager_id
FROM employees";

/// Repository interface for employee rows.
pub trait EmployeeRepository {
    fn create_employee(&self, employee: &NewEmployee) -> RepoResult<Employee>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    fn list_employees_in_role(&self, role_id: RoleId) -> RepoResult<Vec<Employee>>;
    /// Employees holding any role of the department.
    fn list_employees_in_department(
        &self,
        department_id: DepartmentId,
    ) -> RepoResult<Vec<Employee>>;
    /// Employees referenced as manager by at least one other employee.
    fn list_managers(&self) -> RepoResult<Vec<Employee>>;
    fn count_employees_in_role(&self, role_id: RoleId) -> RepoResult<u32>;
    fn update_role(&self, id: EmployeeId, role_id: RoleId) -> RepoResult<()>;
    fn update_manager(&self, id: EmployeeId, manager_id: Option<EmployeeId>) -> RepoResult<()>;
    /// Nulls `manager_id` on every report of `manager_id`; returns rows touched.
    fn clear_manager_references(&self, manager_id: EmployeeId) -> RepoResult<usize>;
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_employees(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let employees = stmt
            .query_map(params, parse_employee_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn create_employee(&self, employee: &NewEmployee) -> RepoResult<Employee> {
        self.conn.execute(
            "INSERT INTO employees (first_name, last_name, role_id, manager_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                employee.first_name,
                employee.last_name,
                employee.role_id,
                employee.manager_id,
            ],
        )?;
        Ok(Employee {
            id: self.conn.last_insert_rowid(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            role_id: employee.role_id,
            manager_id: employee.manager_id,
        })
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE employees.employee_id = ?1;"),
                [id],
                parse_employee_row,
            )
            .optional()?;
        Ok(employee)
    }

    fn list_employees_in_role(&self, role_id: RoleId) -> RepoResult<Vec<Employee>> {
        self.query_employees(
            &format!(
                "{EMPLOYEE_SELECT_SQL}
                 WHERE employees.role_id = ?1
                 ORDER BY employees.employee_id;"
            ),
            [role_id],
        )
    }

    fn list_employees_in_department(
        &self,
        department_id: DepartmentId,
    ) -> RepoResult<Vec<Employee>> {
        self.query_employees(
            &format!(
                "{EMPLOYEE_SELECT_SQL}
                 JOIN roles ON employees.role_id = roles.role_id
                 WHERE roles.department_id = ?1
                 ORDER BY employees.employee_id;"
            ),
            [department_id],
        )
    }

    fn list_managers(&self) -> RepoResult<Vec<Employee>> {
        self.query_employees(
            &format!(
                "{EMPLOYEE_SELECT_SQL}
                 WHERE EXISTS (
                     SELECT 1 FROM employees AS reports
                     WHERE reports.manager_id = employees.employee_id
                 )
                 ORDER BY employees.employee_id;"
            ),
            [],
        )
    }

    fn count_employees_in_role(&self, role_id: RoleId) -> RepoResult<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM employees WHERE role_id = ?1;",
            [role_id],
            |row| row.get(0),
        )?;
        count_to_u32(count, "employee")
    }

    fn update_role(&self, id: EmployeeId, role_id: RoleId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employees SET role_id = ?1 WHERE employee_id = ?2;",
            params![role_id, id],
        )?;
        expect_changed(changed, "employee", id)
    }

    fn update_manager(&self, id: EmployeeId, manager_id: Option<EmployeeId>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employees SET manager_id = ?1 WHERE employee_id = ?2;",
            params![manager_id, id],
        )?;
        expect_changed(changed, "employee", id)
    }

    fn clear_manager_references(&self, manager_id: EmployeeId) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE employees SET manager_id = NULL WHERE manager_id = ?1;",
            [manager_id],
        )?;
        Ok(changed)
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE employee_id = ?1;", [id])?;
        expect_changed(changed, "employee", id)
    }
}

fn parse_employee_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get("employee_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        role_id: row.get("role_id")?,
        manager_id: row.get("manager_id")?,
    })
}
