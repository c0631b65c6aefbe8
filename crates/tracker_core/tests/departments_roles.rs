use tracker_core::db::open_db_in_memory;
use tracker_core::{
    DeleteOutcome, NewEmployee, Refusal, RepoError, RosterService, ServiceError, ValidationError,
};

#[test]
fn add_department_trims_and_rejects_exact_duplicates_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    let sales = service.add_department("  Sales ").unwrap();
    assert_eq!(sales.name, "Sales");

    let err = service.add_department("Sales").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::DuplicateDepartmentName(ref name)) if name == "Sales"
    ));
    assert_eq!(service.list_departments().unwrap().len(), 1);

    // Case-sensitive match: a differently cased name is a new department.
    service.add_department("sales").unwrap();
    assert_eq!(service.department_names().unwrap(), vec!["Sales", "sales"]);
}

#[test]
fn add_department_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    let err = service.add_department("   ").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::BlankDepartmentName)
    ));
    assert!(service.list_departments().unwrap().is_empty());
}

#[test]
fn role_titles_are_unique_per_department_only() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let engineering = service.add_department("Engineering").unwrap();
    let sales = service.add_department("Sales").unwrap();

    let lead = service.add_role(engineering.id, "Lead", 150_000.0).unwrap();
    assert_eq!(lead.department_id, engineering.id);

    let err = service.add_role(engineering.id, "Lead", 1.0).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::DuplicateRoleTitle { department_id, .. })
            if department_id == engineering.id
    ));

    let sales_lead = service.add_role(sales.id, "Lead", 100_000.0).unwrap();
    assert_eq!(sales_lead.department_id, sales.id);
    assert_eq!(service.list_roles(engineering.id).unwrap().len(), 1);
    assert_eq!(service.list_roles(sales.id).unwrap().len(), 1);
}

#[test]
fn add_role_rejects_negative_salary_and_missing_department() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let legal = service.add_department("Legal").unwrap();

    let err = service.add_role(legal.id, "Lawyer", -5.0).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::NegativeSalary(_))
    ));

    let err = service.add_role(legal.id + 100, "Lawyer", 5.0).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::NotFound {
            entity: "department",
            ..
        })
    ));
    assert!(service.list_roles(legal.id).unwrap().is_empty());
}

#[test]
fn department_delete_is_refused_while_roles_exist() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let sales = service.add_department("Sales").unwrap();
    let role = service.add_role(sales.id, "Salesperson", 80_000.0).unwrap();

    let refusal = Refusal::DepartmentHasRoles {
        department_id: sales.id,
        role_count: 1,
    };
    assert_eq!(
        service.department_delete_refusal(sales.id).unwrap(),
        Some(refusal)
    );
    assert_eq!(
        service.delete_department(sales.id).unwrap(),
        DeleteOutcome::Refused(refusal)
    );
    assert_eq!(service.list_departments().unwrap().len(), 1);

    assert_eq!(service.delete_role(role.id).unwrap(), DeleteOutcome::Deleted);
    assert_eq!(service.department_delete_refusal(sales.id).unwrap(), None);
    assert_eq!(
        service.delete_department(sales.id).unwrap(),
        DeleteOutcome::Deleted
    );
    assert!(service.list_departments().unwrap().is_empty());
}

#[test]
fn role_delete_is_refused_while_employees_hold_it() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let sales = service.add_department("Sales").unwrap();
    let role = service.add_role(sales.id, "Salesperson", 80_000.0).unwrap();
    let employee = service
        .add_employee(&NewEmployee {
            first_name: "Tom".to_string(),
            last_name: "Allen".to_string(),
            role_id: role.id,
            manager_id: None,
        })
        .unwrap();

    assert_eq!(
        service.delete_role(role.id).unwrap(),
        DeleteOutcome::Refused(Refusal::RoleHasEmployees {
            role_id: role.id,
            employee_count: 1,
        })
    );

    service.delete_employee(employee.id).unwrap();
    assert_eq!(service.delete_role(role.id).unwrap(), DeleteOutcome::Deleted);
    assert!(service.list_roles(sales.id).unwrap().is_empty());
}

#[test]
fn rename_department_allows_other_names_only() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let sales = service.add_department("Sales").unwrap();
    service.add_department("Legal").unwrap();

    let err = service.rename_department(sales.id, "Legal").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::DuplicateDepartmentName(_))
    ));

    let renamed = service.rename_department(sales.id, " Revenue ").unwrap();
    assert_eq!(renamed.name, "Revenue");
    assert_eq!(service.department_names().unwrap(), vec!["Revenue", "Legal"]);
}
