use rusqlite::Connection;
use tracker_core::db::open_db_in_memory;
use tracker_core::{
    Department, Employee, EmployeeFilter, NewEmployee, RepoError, Role, RosterService,
    ServiceError, ValidationError,
};

struct Fixture {
    engineering: Department,
    sales: Department,
    engineer: Role,
    salesperson: Role,
}

fn fixture(service: &RosterService<'_>) -> Fixture {
    let engineering = service.add_department("Engineering").unwrap();
    let sales = service.add_department("Sales").unwrap();
    let engineer = service.add_role(engineering.id, "Engineer", 50_000.0).unwrap();
    let salesperson = service.add_role(sales.id, "Salesperson", 60_000.0).unwrap();
    Fixture {
        engineering,
        sales,
        engineer,
        salesperson,
    }
}

fn hire(
    service: &RosterService<'_>,
    first: &str,
    last: &str,
    role: &Role,
    manager: Option<&Employee>,
) -> Employee {
    service
        .add_employee(&NewEmployee {
            first_name: first.to_string(),
            last_name: last.to_string(),
            role_id: role.id,
            manager_id: manager.map(|employee| employee.id),
        })
        .unwrap()
}

fn manager_of(conn: &Connection, employee_id: i64) -> Option<i64> {
    conn.query_row(
        "SELECT manager_id FROM employees WHERE employee_id = ?1;",
        [employee_id],
        |row| row.get(0),
    )
    .unwrap()
}

fn employee_exists(conn: &Connection, employee_id: i64) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = ?1);",
        [employee_id],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        == 1
}

#[test]
fn add_employee_trims_names_and_links_manager() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let fx = fixture(&service);

    let ada = hire(&service, " Ada ", "Lovelace ", &fx.engineer, None);
    let grace = hire(&service, "Grace", "Hopper", &fx.engineer, Some(&ada));

    assert_eq!(ada.full_name(), "Ada Lovelace");
    assert_eq!(grace.manager_id, Some(ada.id));
    assert_eq!(manager_of(&conn, grace.id), Some(ada.id));
}

#[test]
fn add_employee_rejects_blank_names_and_unknown_references() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let fx = fixture(&service);

    let blank = service
        .add_employee(&NewEmployee {
            first_name: "  ".to_string(),
            last_name: "Hopper".to_string(),
            role_id: fx.engineer.id,
            manager_id: None,
        })
        .unwrap_err();
    assert!(matches!(
        blank,
        ServiceError::Validation(ValidationError::BlankEmployeeName(_))
    ));

    let unknown_manager = service
        .add_employee(&NewEmployee {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            role_id: fx.engineer.id,
            manager_id: Some(999),
        })
        .unwrap_err();
    assert!(matches!(
        unknown_manager,
        ServiceError::Repo(RepoError::NotFound {
            entity: "employee",
            id: 999
        })
    ));
    assert!(service
        .employee_views(EmployeeFilter::All)
        .unwrap()
        .is_empty());
}

#[test]
fn manager_candidates_stay_in_department_and_exclude_self() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let fx = fixture(&service);

    let ada = hire(&service, "Ada", "Lovelace", &fx.engineer, None);
    let alan = hire(&service, "Alan", "Turing", &fx.engineer, None);
    hire(&service, "Tom", "Allen", &fx.salesperson, None);

    let candidates = service
        .manager_candidates(fx.engineering.id, Some(ada.id))
        .unwrap();
    assert_eq!(candidates, vec![alan.clone()]);

    let all = service.manager_candidates(fx.engineering.id, None).unwrap();
    assert_eq!(all, vec![ada, alan]);
}

#[test]
fn deleting_a_manager_clears_reports_then_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let fx = fixture(&service);

    let ada = hire(&service, "Ada", "Lovelace", &fx.engineer, None);
    let grace = hire(&service, "Grace", "Hopper", &fx.engineer, Some(&ada));
    let alan = hire(&service, "Alan", "Turing", &fx.engineer, Some(&ada));

    let removal = service.delete_employee(ada.id).unwrap();

    assert_eq!(removal.unmanaged_reports, 2);
    assert_eq!(manager_of(&conn, grace.id), None);
    assert_eq!(manager_of(&conn, alan.id), None);
    assert!(!employee_exists(&conn, ada.id));
    assert!(employee_exists(&conn, grace.id));
}

#[test]
fn deleting_missing_employee_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);

    let err = service.delete_employee(12).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::NotFound {
            entity: "employee",
            id: 12
        })
    ));
}

#[test]
fn update_role_across_departments_keeps_manager() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let fx = fixture(&service);

    let ada = hire(&service, "Ada", "Lovelace", &fx.engineer, None);
    let grace = hire(&service, "Grace", "Hopper", &fx.engineer, Some(&ada));

    service
        .update_employee_role(grace.id, fx.salesperson.id)
        .unwrap();

    let in_sales = service
        .employee_views(EmployeeFilter::Department(fx.sales.id))
        .unwrap();
    assert_eq!(in_sales.len(), 1);
    assert_eq!(in_sales[0].id, grace.id);
    assert_eq!(in_sales[0].title.as_deref(), Some("Salesperson"));
    assert_eq!(in_sales[0].manager.as_deref(), Some("Ada Lovelace"));
    assert_eq!(manager_of(&conn, grace.id), Some(ada.id));
}

#[test]
fn update_role_rejects_unknown_role() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let fx = fixture(&service);
    let ada = hire(&service, "Ada", "Lovelace", &fx.engineer, None);

    let err = service.update_employee_role(ada.id, 404).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::NotFound { entity: "role", .. })
    ));
}

#[test]
fn update_manager_sets_clears_and_rejects_self() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let fx = fixture(&service);
    let ada = hire(&service, "Ada", "Lovelace", &fx.engineer, None);
    let alan = hire(&service, "Alan", "Turing", &fx.engineer, None);

    service.update_employee_manager(alan.id, Some(ada.id)).unwrap();
    assert_eq!(manager_of(&conn, alan.id), Some(ada.id));
    assert_eq!(service.list_managers().unwrap(), vec![ada.clone()]);

    let err = service
        .update_employee_manager(alan.id, Some(alan.id))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::SelfManagement(id)) if id == alan.id
    ));
    assert_eq!(manager_of(&conn, alan.id), Some(ada.id));

    service.update_employee_manager(alan.id, None).unwrap();
    assert_eq!(manager_of(&conn, alan.id), None);
    assert!(service.list_managers().unwrap().is_empty());
}

#[test]
fn budget_sums_one_salary_per_employee() {
    let conn = open_db_in_memory().unwrap();
    let service = RosterService::new(&conn);
    let fx = fixture(&service);
    let analyst = service
        .add_role(fx.engineering.id, "Analyst", 60_000.0)
        .unwrap();

    hire(&service, "Ada", "Lovelace", &fx.engineer, None);
    hire(&service, "Alan", "Turing", &analyst, None);
    assert_eq!(service.department_budget(fx.engineering.id).unwrap(), 110_000.0);

    // Two holders of the same role count twice.
    hire(&service, "Grace", "Hopper", &fx.engineer, None);
    assert_eq!(service.department_budget(fx.engineering.id).unwrap(), 160_000.0);

    assert_eq!(service.department_budget(fx.sales.id).unwrap(), 0.0);
}
