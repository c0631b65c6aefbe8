//! Department repository contract and SQLite implementation.

use super::{expect_changed, RepoResult};
use crate::model::department::{Department, DepartmentId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const DEPARTMENT_SELECT_SQL: &str = "SELECT department_id, name FROM departments";

/// Repository interface for department rows.
pub trait DepartmentRepository {
    fn create_department(&self, name: &str) -> RepoResult<Department>;
    fn rename_department(&self, id: DepartmentId, name: &str) -> RepoResult<()>;
    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    /// All departments ordered by identifier.
    fn list_departments(&self) -> RepoResult<Vec<Department>>;
    fn delete_department(&self, id: DepartmentId) -> RepoResult<()>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn create_department(&self, name: &str) -> RepoResult<Department> {
        self.conn
            .execute("INSERT INTO departments (name) VALUES (?1);", [name])?;
        Ok(Department {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    fn rename_department(&self, id: DepartmentId, name: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE departments SET name = ?1 WHERE department_id = ?2;",
            params![name, id],
        )?;
        expect_changed(changed, "department", id)
    }

    fn get_department(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        let department = self
            .conn
            .query_row(
                &format!("{DEPARTMENT_SELECT_SQL} WHERE department_id = ?1;"),
                [id],
                parse_department_row,
            )
            .optional()?;
        Ok(department)
    }

    fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY department_id;"))?;
        let departments = stmt
            .query_map([], parse_department_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(departments)
    }

    fn delete_department(&self, id: DepartmentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM departments WHERE department_id = ?1;", [id])?;
        expect_changed(changed, "department", id)
    }
}

fn parse_department_row(row: &Row<'_>) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get("department_id")?,
        name: row.get("name")?,
    })
}
