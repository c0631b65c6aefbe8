//! Sample roster used for demos and tests.

use super::DbResult;
use log::info;
use rusqlite::{params, Connection};

const SAMPLE_DEPARTMENTS: &[&str] = &["Engineering", "Sales", "Legal"];

// (title, salary, department index)
const SAMPLE_ROLES: &[(&str, f64, usize)] = &[
    ("Lead Engineer", 150_000.0, 0),
    ("Software Engineer", 120_000.0, 0),
    ("Sales Lead", 100_000.0, 1),
    ("Salesperson", 80_000.0, 1),
    ("Lawyer", 190_000.0, 2),
];

// (first, last, role index, manager index)
const SAMPLE_EMPLOYEES: &[(&str, &str, usize, Option<usize>)] = &[
    ("Ada", "Lovelace", 0, None),
    ("Grace", "Hopper", 1, Some(0)),
    ("Alan", "Turing", 1, Some(0)),
    ("Mary", "Parker", 2, None),
    ("Tom", "Allen", 3, Some(3)),
    ("Ruth", "Ginsburg", 4, None),
];

/// Inserts the sample roster when `departments` is empty.
///
/// Returns `false` without writing when any department already exists.
pub fn seed_sample_roster(conn: &Connection) -> DbResult<bool> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM departments;", [], |row| {
        row.get(0)
    })?;
    if existing > 0 {
        return Ok(false);
    }

    let tx = conn.unchecked_transaction()?;

    let mut department_ids = Vec::with_capacity(SAMPLE_DEPARTMENTS.len());
    for name in SAMPLE_DEPARTMENTS {
        tx.execute("INSERT INTO departments (name) VALUES (?1);", [name])?;
        department_ids.push(tx.last_insert_rowid());
    }

    let mut role_ids = Vec::with_capacity(SAMPLE_ROLES.len());
    for (title, salary, department) in SAMPLE_ROLES {
        tx.execute(
            "INSERT INTO roles (title, salary, department_id) VALUES (?1, ?2, ?3);",
            params![title, salary, department_ids[*department]],
        )?;
        role_ids.push(tx.last_insert_rowid());
    }

    let mut employee_ids: Vec<i64> = Vec::with_capacity(SAMPLE_EMPLOYEES.len());
    for (first, last, role, manager) in SAMPLE_EMPLOYEES {
        let manager_id = manager.map(|index| employee_ids[index]);
        tx.execute(
            "INSERT INTO employees (first_name, last_name, role_id, manager_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![first, last, role_ids[*role], manager_id],
        )?;
        employee_ids.push(tx.last_insert_rowid());
    }

    tx.commit()?;
    info!(
        "event=db_seed module=db status=ok departments={} roles={} employees={}",
        department_ids.len(),
        role_ids.len(),
        employee_ids.len()
    );
    Ok(true)
}
