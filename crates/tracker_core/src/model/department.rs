//! Department record.

use serde::{Deserialize, Serialize};

/// Store-generated department identifier.
pub type DepartmentId = i64;

/// Top-level organizational grouping that owns roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    /// Unique across departments, trimmed before persistence.
    pub name: String,
}
