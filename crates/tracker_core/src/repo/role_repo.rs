//! Role repository contract and SQLite implementation.

use super::{count_to_u32, expect_changed, RepoResult};
use crate::model::department::DepartmentId;
use crate::model::role::{NewRole, Role, RoleId};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ROLE_SELECT_SQL: &str = "SELECT role_id, title, salary, department_id FROM roles";

/// Repository interface for role rows.
pub trait RoleRepository {
    fn create_role(&self, role: &NewRole) -> RepoResult<Role>;
    fn get_role(&self, id: RoleId) -> RepoResult<Option<Role>>;
    /// Roles of one department ordered by identifier.
    fn list_roles_in_department(&self, department_id: DepartmentId) -> RepoResult<Vec<Role>>;
    fn count_roles_in_department(&self, department_id: DepartmentId) -> RepoResult<u32>;
    fn delete_role(&self, id: RoleId) -> RepoResult<()>;
}

/// SQLite-backed role repository.
pub struct SqliteRoleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RoleRepository for SqliteRoleRepository<'_> {
    fn create_role(&self, role: &NewRole) -> RepoResult<Role> {
        self.conn.execute(
            "INSERT INTO roles (title, salary, department_id) VALUES (?1, ?2, ?3);",
            params![role.title, role.salary, role.department_id],
        )?;
        Ok(Role {
            id: self.conn.last_insert_rowid(),
            title: role.title.clone(),
            salary: role.salary,
            department_id: role.department_id,
        })
    }

    fn get_role(&self, id: RoleId) -> RepoResult<Option<Role>> {
        let role = self
            .conn
            .query_row(
                &format!("{ROLE_SELECT_SQL} WHERE role_id = ?1;"),
                [id],
                parse_role_row,
            )
            .optional()?;
        Ok(role)
    }

    fn list_roles_in_department(&self, department_id: DepartmentId) -> RepoResult<Vec<Role>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ROLE_SELECT_SQL} WHERE department_id = ?1 ORDER BY role_id;"
        ))?;
        let roles = stmt
            .query_map([department_id], parse_role_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(roles)
    }

    fn count_roles_in_department(&self, department_id: DepartmentId) -> RepoResult<u32> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM roles WHERE department_id = ?1;",
            [department_id],
            |row| row.get(0),
        )?;
        count_to_u32(count, "role")
    }

    fn delete_role(&self, id: RoleId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM roles WHERE role_id = ?1;", [id])?;
        expect_changed(changed, "role", id)
    }
}

fn parse_role_row(row: &Row<'_>) -> rusqlite::Result<Role> {
    Ok(Role {
        id: row.get("role_id")?,
        title: row.get("title")?,
        salary: row.get("salary")?,
        department_id: row.get("department_id")?,
    })
}
