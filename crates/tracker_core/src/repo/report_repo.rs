//! Joined read projections for the "view" actions.
//!
//! # Invariants
//! - Projections use outer joins so a dangling reference still yields a row.
//! - Budget utilization sums one salary per employee, not per distinct role.

use super::{count_to_u32, RepoResult};
use crate::model::department::DepartmentId;
use crate::model::views::{DepartmentView, EmployeeFilter, EmployeeView, RoleView};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

const EMPLOYEE_VIEW_SQL: &str = "SELECT
    employees.employee_id AS id,
    employees.first_name AS first_name,
    employees.last_name AS last_name,
    roles.title AS title,
    departments.name AS department,
    roles.salary AS salary,
    CASE
        WHEN managers.employee_id IS NULL THEN NULL
        ELSE managers.first_name || ' ' || managers.last_name
    END AS manager
FROM employees
LEFT JOIN roles ON employees.role_id = roles.role_id
LEFT JOIN departments ON roles.department_id = departments.department_id
LEFT JOIN employees AS managers ON employees.manager_id = managers.employee_id";

/// Repository interface for read-only roster projections.
pub trait ReportRepository {
    fn list_department_views(&self) -> RepoResult<Vec<DepartmentView>>;
    fn list_role_views(&self) -> RepoResult<Vec<RoleView>>;
    fn list_employee_views(&self, filter: EmployeeFilter) -> RepoResult<Vec<EmployeeView>>;
    /// Sum of the salaries of every employee holding a role in the department.
    fn department_budget(&self, department_id: DepartmentId) -> RepoResult<f64>;
}

/// SQLite-backed projection repository.
pub struct SqliteReportRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReportRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReportRepository for SqliteReportRepository<'_> {
    fn list_department_views(&self) -> RepoResult<Vec<DepartmentView>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                departments.department_id AS id,
                departments.name AS name,
                COUNT(roles.role_id) AS role_count
             FROM departments
             LEFT JOIN roles ON roles.department_id = departments.department_id
             GROUP BY departments.department_id
             ORDER BY departments.department_id;",
        )?;
        let mut rows = stmt.query([])?;
        let mut views = Vec::new();
        while let Some(row) = rows.next()? {
            views.push(DepartmentView {
                id: row.get("id")?,
                name: row.get("name")?,
                role_count: count_to_u32(row.get("role_count")?, "role")?,
            });
        }
        Ok(views)
    }

    fn list_role_views(&self) -> RepoResult<Vec<RoleView>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                roles.role_id AS id,
                roles.title AS title,
                roles.salary AS salary,
                departments.name AS department
             FROM roles
             LEFT JOIN departments ON roles.department_id = departments.department_id
             ORDER BY roles.role_id;",
        )?;
        let views = stmt
            .query_map([], |row| {
                Ok(RoleView {
                    id: row.get("id")?,
                    title: row.get("title")?,
                    salary: row.get("salary")?,
                    department: row.get("department")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(views)
    }

    fn list_employee_views(&self, filter: EmployeeFilter) -> RepoResult<Vec<EmployeeView>> {
        let mut sql = EMPLOYEE_VIEW_SQL.to_string();
        let mut bind_values: Vec<Value> = Vec::new();

        match filter {
            EmployeeFilter::All => {}
            EmployeeFilter::Department(department_id) => {
                sql.push_str(" WHERE roles.department_id = ?");
                bind_values.push(Value::Integer(department_id));
            }
            EmployeeFilter::Role(role_id) => {
                sql.push_str(" WHERE employees.role_id = ?");
                bind_values.push(Value::Integer(role_id));
            }
            EmployeeFilter::Manager(manager_id) => {
                sql.push_str(" WHERE employees.manager_id = ?");
                bind_values.push(Value::Integer(manager_id));
            }
        }
        sql.push_str(" ORDER BY employees.employee_id;");

        let mut stmt = self.conn.prepare(&sql)?;
        let views = stmt
            .query_map(params_from_iter(bind_values), parse_employee_view_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(views)
    }

    fn department_budget(&self, department_id: DepartmentId) -> RepoResult<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(roles.salary), 0.0)
             FROM employees
             JOIN roles ON employees.role_id = roles.role_id
             WHERE roles.department_id = ?1;",
            [department_id],
            |row| row.get(0),
        )?;
        Ok(total)
    }
}

fn parse_employee_view_row(row: &Row<'_>) -> rusqlite::Result<EmployeeView> {
    Ok(EmployeeView {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        title: row.get("title")?,
        department: row.get("department")?,
        salary: row.get("salary")?,
        manager: row.get("manager")?,
    })
}
