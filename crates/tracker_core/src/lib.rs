//! Core domain logic for the employee tracker.
//! This crate owns the roster invariants; the CLI only gathers input.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::TrackerConfig;
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{Department, DepartmentId};
pub use model::employee::{Employee, EmployeeId, NewEmployee};
pub use model::money::format_currency;
pub use model::role::{NewRole, Role, RoleId};
pub use model::validation::{NameField, ValidationError};
pub use model::views::{DepartmentView, EmployeeFilter, EmployeeView, RoleView};
pub use repo::{RepoError, RepoResult};
pub use service::roster_service::{
    DeleteOutcome, EmployeeRemoval, Refusal, RosterService, ServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
