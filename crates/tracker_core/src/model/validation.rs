//! Input validation shared by the roster service and the prompt layer.
//!
//! # Responsibility
//! - Normalize user-entered names and titles.
//! - Reject duplicates against a caller-supplied list of existing values.
//!
//! # Invariants
//! - Duplicate checks are exact, case-sensitive matches on trimmed input.
//! - Validation never touches storage; callers fetch existing values first.

use super::department::DepartmentId;
use super::employee::EmployeeId;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which half of an employee name failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    First,
    Last,
}

/// User input that must be corrected before submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    BlankDepartmentName,
    DuplicateDepartmentName(String),
    BlankRoleTitle,
    DuplicateRoleTitle {
        title: String,
        department_id: DepartmentId,
    },
    SalaryNotANumber(String),
    NegativeSalary(f64),
    BlankEmployeeName(NameField),
    SelfManagement(EmployeeId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankDepartmentName => write!(f, "Department name cannot be empty"),
            Self::DuplicateDepartmentName(name) => {
                write!(f, "The department `{name}` already exists")
            }
            Self::BlankRoleTitle => write!(f, "Role title cannot be empty"),
            Self::DuplicateRoleTitle { title, .. } => {
                write!(f, "The role `{title}` already exists in that department")
            }
            Self::SalaryNotANumber(raw) => write!(f, "`{raw}` is not a number"),
            Self::NegativeSalary(value) => write!(f, "Salary cannot be negative (got {value})"),
            Self::BlankEmployeeName(NameField::First) => write!(f, "First name cannot be empty"),
            Self::BlankEmployeeName(NameField::Last) => write!(f, "Last name cannot be empty"),
            Self::SelfManagement(_) => write!(f, "An employee cannot manage themselves"),
        }
    }
}

impl Error for ValidationError {}

/// Trims a department name and rejects blanks and existing names.
pub fn normalize_department_name(
    raw: &str,
    existing: &[String],
) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankDepartmentName);
    }
    if existing.iter().any(|other| other == name) {
        return Err(ValidationError::DuplicateDepartmentName(name.to_string()));
    }
    Ok(name.to_string())
}

/// Trims a role title and rejects blanks and titles already used in the department.
pub fn normalize_role_title(
    raw: &str,
    department_id: DepartmentId,
    existing: &[String],
) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::BlankRoleTitle);
    }
    if existing.iter().any(|other| other == title) {
        return Err(ValidationError::DuplicateRoleTitle {
            title: title.to_string(),
            department_id,
        });
    }
    Ok(title.to_string())
}

/// Parses salary text such as `70000`, `70,000` or `$70000.50`.
pub fn parse_salary(raw: &str) -> Result<f64, ValidationError> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|ch| *ch != ',')
        .collect();
    let value = cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ValidationError::SalaryNotANumber(raw.trim().to_string()))?;
    validate_salary(value)?;
    Ok(value)
}

pub fn validate_salary(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::SalaryNotANumber(value.to_string()));
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeSalary(value));
    }
    Ok(())
}

/// Trims one half of an employee name and rejects blanks.
pub fn normalize_person_name(raw: &str, field: NameField) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankEmployeeName(field));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_name_is_trimmed_and_checked_case_sensitively() {
        let existing = vec!["Sales".to_string()];

        assert_eq!(
            normalize_department_name("  Legal ", &existing).unwrap(),
            "Legal"
        );
        assert_eq!(
            normalize_department_name(" Sales ", &existing).unwrap_err(),
            ValidationError::DuplicateDepartmentName("Sales".to_string())
        );
        assert_eq!(normalize_department_name("sales", &existing).unwrap(), "sales");
        assert_eq!(
            normalize_department_name("   ", &existing).unwrap_err(),
            ValidationError::BlankDepartmentName
        );
    }

    #[test]
    fn role_title_duplicates_carry_department() {
        let existing = vec!["Engineer".to_string()];
        let err = normalize_role_title("Engineer", 7, &existing).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateRoleTitle {
                title: "Engineer".to_string(),
                department_id: 7,
            }
        );
    }

    #[test]
    fn parse_salary_accepts_currency_text_and_rejects_garbage() {
        assert_eq!(parse_salary("70000").unwrap(), 70000.0);
        assert_eq!(parse_salary(" $70,000.50 ").unwrap(), 70000.5);
        assert!(matches!(
            parse_salary("lots"),
            Err(ValidationError::SalaryNotANumber(raw)) if raw == "lots"
        ));
        assert!(matches!(
            parse_salary("-1"),
            Err(ValidationError::NegativeSalary(_))
        ));
        assert!(parse_salary("inf").is_err());
    }

    #[test]
    fn person_name_reports_field() {
        assert_eq!(
            normalize_person_name("", NameField::Last).unwrap_err(),
            ValidationError::BlankEmployeeName(NameField::Last)
        );
        assert_eq!(normalize_person_name(" Ada ", NameField::First).unwrap(), "Ada");
    }
}
