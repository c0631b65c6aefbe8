//! Action handlers, one per user-visible operation.
//!
//! Each handler gathers input, lets the roster service validate and write,
//! then prints a success, notice or failure line. Any error is logged and
//! reported here; the menu loop never sees it.

use crate::app::{ActionError, ActionResult, App};
use crate::menu::Action;
use crate::prompt::Prompter;
use crate::table::Table;
use log::{error, warn};
use std::io::Write;
use tracker_core::model::validation::{
    normalize_department_name, normalize_person_name, normalize_role_title, NameField,
};
use tracker_core::{
    format_currency, DeleteOutcome, EmployeeFilter, EmployeeView, NewEmployee, ServiceError,
};

fn blank_if_none(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn employee_table(rows: Vec<EmployeeView>) -> Table {
    rows.into_iter().fold(
        Table::new([
            "ID",
            "First Name",
            "Last Name",
            "Title",
            "Department",
            "Salary",
            "Manager",
        ]),
        |table, row| {
            table.row([
                row.id.to_string(),
                row.first_name,
                row.last_name,
                blank_if_none(row.title),
                blank_if_none(row.department),
                row.salary.map(format_currency).unwrap_or_default(),
                blank_if_none(row.manager),
            ])
        },
    )
}

impl<P: Prompter, W: Write> App<'_, P, W> {
    /// Runs one action; failures are logged and reported, never propagated.
    pub fn perform(&mut self, action: Action) {
        let result = match action {
            Action::Open(_) | Action::GoBack | Action::Quit => Ok(()),
            Action::AddDepartment => self.add_department(),
            Action::AddRole => self.add_role(),
            Action::AddEmployee => self.add_employee(),
            Action::ViewAllDepartments => self.view_all_departments(),
            Action::ViewAllRoles => self.view_all_roles(),
            Action::ViewAllEmployees => self.view_all_employees(),
            Action::ViewEmployeesByDepartment => self.view_employees_by_department(),
            Action::ViewEmployeesByRole => self.view_employees_by_role(),
            Action::ViewEmployeesByManager => self.view_employees_by_manager(),
            Action::ViewDepartmentBudget => self.view_department_budget(),
            Action::UpdateEmployeeRole => self.update_employee_role(),
            Action::UpdateEmployeeManager => self.update_employee_manager(),
            Action::RenameDepartment => self.rename_department(),
            Action::DeleteDepartment => self.delete_department(),
            Action::DeleteRole => self.delete_role(),
            Action::DeleteEmployee => self.delete_employee(),
        };

        if let Err(err) = result {
            error!("event=action_failed module=cli status=error action={action:?} error={err}");
            let message = match err {
                ActionError::Service(ServiceError::Validation(reason)) => {
                    format!("Nothing was saved: {reason}.")
                }
                other => format!("Something went wrong: {other}"),
            };
            if let Err(write_err) = self.failure(&message) {
                warn!("event=action_report module=cli status=error error={write_err}");
            }
        }
    }

    // ----- create -----

    pub fn add_department(&mut self) -> ActionResult<()> {
        let existing = self.service.department_names()?;
        let name = self.prompter.input("What is the new department's name?", &|raw: &str| {
            normalize_department_name(raw, &existing)
                .map(|_| ())
                .map_err(|err| err.to_string())
        })?;
        let department = self.service.add_department(&name)?;
        self.success(&format!("Added the {} department.", department.name))
    }

    pub fn add_role(&mut self) -> ActionResult<()> {
        let Some(department) =
            self.choose_department("Which department does the new role belong to?")?
        else {
            return self.notice("There are no departments yet. Add a department first.");
        };

        let existing = self.service.role_titles(department.id)?;
        let title = self.prompter.input("What is the new role's title?", &|raw: &str| {
            normalize_role_title(raw, department.id, &existing)
                .map(|_| ())
                .map_err(|err| err.to_string())
        })?;
        let salary = self.prompter.number("What is the role's salary?")?;

        let role = self.service.add_role(department.id, &title, salary)?;
        self.success(&format!(
            "Added the {} role to {} at {}.",
            role.title,
            department.name,
            format_currency(role.salary)
        ))
    }

    pub fn add_employee(&mut self) -> ActionResult<()> {
        let Some(role) = self.choose_role("Which role will the new employee hold?", None)? else {
            return self.notice("There are no roles available there. Add a role first.");
        };

        let first_name = self
            .prompter
            .input("What is the employee's first name?", &|raw: &str| {
                normalize_person_name(raw, NameField::First)
                    .map(|_| ())
                    .map_err(|err| err.to_string())
            })?;
        let last_name = self
            .prompter
            .input("What is the employee's last name?", &|raw: &str| {
                normalize_person_name(raw, NameField::Last)
                    .map(|_| ())
                    .map_err(|err| err.to_string())
            })?;
        let manager_id =
            self.choose_manager("Who is the employee's manager?", role.department_id, None)?;

        let employee = self.service.add_employee(&NewEmployee {
            first_name,
            last_name,
            role_id: role.id,
            manager_id,
        })?;
        self.success(&format!(
            "Added {} as {}.",
            employee.full_name(),
            role.title
        ))
    }

    // ----- read -----

    pub fn view_all_departments(&mut self) -> ActionResult<()> {
        let rows = self.service.department_views()?;
        if rows.is_empty() {
            return self.notice("There are no departments yet.");
        }
        let table = rows
            .into_iter()
            .fold(Table::new(["ID", "Name", "Roles"]), |table, row| {
                table.row([row.id.to_string(), row.name, row.role_count.to_string()])
            });
        self.print_table(&table)
    }

    pub fn view_all_roles(&mut self) -> ActionResult<()> {
        let rows = self.service.role_views()?;
        if rows.is_empty() {
            return self.notice("There are no roles yet.");
        }
        let table = rows.into_iter().fold(
            Table::new(["ID", "Title", "Salary", "Department"]),
            |table, row| {
                table.row([
                    row.id.to_string(),
                    row.title,
                    format_currency(row.salary),
                    blank_if_none(row.department),
                ])
            },
        );
        self.print_table(&table)
    }

    pub fn view_all_employees(&mut self) -> ActionResult<()> {
        let rows = self.service.employee_views(EmployeeFilter::All)?;
        if rows.is_empty() {
            return self.notice("There are no employees yet.");
        }
        self.print_table(&employee_table(rows))
    }

    pub fn view_employees_by_department(&mut self) -> ActionResult<()> {
        let Some(department) = self.choose_department("View employees of which department?")?
        else {
            return self.notice("There are no departments yet.");
        };
        let rows = self
            .service
            .employee_views(EmployeeFilter::Department(department.id))?;
        if rows.is_empty() {
            return self.notice(&format!("There are no employees in {} yet.", department.name));
        }
        self.print_table(&employee_table(rows))
    }

    pub fn view_employees_by_role(&mut self) -> ActionResult<()> {
        let Some(role) = self.choose_role("View employees holding which role?", None)? else {
            return self.notice("There are no roles available there.");
        };
        let rows = self.service.employee_views(EmployeeFilter::Role(role.id))?;
        if rows.is_empty() {
            return self.notice(&format!("No one holds the {} role yet.", role.title));
        }
        self.print_table(&employee_table(rows))
    }

    pub fn view_employees_by_manager(&mut self) -> ActionResult<()> {
        let Some(manager) = self.choose_existing_manager("View the reports of which manager?")?
        else {
            return self.notice("No employee manages anyone yet.");
        };
        let rows = self
            .service
            .employee_views(EmployeeFilter::Manager(manager.id))?;
        if rows.is_empty() {
            return self.notice(&format!("{} has no reports.", manager.full_name()));
        }
        self.print_table(&employee_table(rows))
    }

    pub fn view_department_budget(&mut self) -> ActionResult<()> {
        let Some(department) = self.choose_department("View the budget of which department?")?
        else {
            return self.notice("There are no departments yet.");
        };
        let total = self.service.department_budget(department.id)?;
        self.success(&format!(
            "The utilized budget of {} is {}.",
            department.name,
            format_currency(total)
        ))
    }

    // ----- update -----

    pub fn update_employee_role(&mut self) -> ActionResult<()> {
        let Some(employee) =
            self.choose_employee("Which employee's role do you want to update?", None)?
        else {
            return self.notice("There are no employees available there.");
        };
        let Some(role) = self.choose_role("Which role should they hold now?", None)? else {
            return self.notice("There are no roles available there.");
        };

        self.service.update_employee_role(employee.id, role.id)?;
        self.success(&format!(
            "{} now holds the {} role.",
            employee.full_name(),
            role.title
        ))
    }

    pub fn update_employee_manager(&mut self) -> ActionResult<()> {
        let Some(role) = self.choose_role("Which role does the employee hold?", None)? else {
            return self.notice("There are no roles available there.");
        };
        let Some(employee) =
            self.choose_employee("Whose manager do you want to update?", Some(role.id))?
        else {
            return self.notice(&format!("No one holds the {} role yet.", role.title));
        };
        let manager_id = self.choose_manager(
            "Who is their new manager?",
            role.department_id,
            Some(employee.id),
        )?;

        self.service
            .update_employee_manager(employee.id, manager_id)?;
        match manager_id {
            Some(_) => self.success(&format!("Updated {}'s manager.", employee.full_name())),
            None => self.success(&format!("{} no longer has a manager.", employee.full_name())),
        }
    }

    pub fn rename_department(&mut self) -> ActionResult<()> {
        let Some(department) = self.choose_department("Which department do you want to rename?")?
        else {
            return self.notice("There are no departments yet.");
        };

        let others: Vec<String> = self
            .service
            .list_departments()?
            .into_iter()
            .filter(|other| other.id != department.id)
            .map(|other| other.name)
            .collect();
        let name = self.prompter.input("What is the department's new name?", &|raw: &str| {
            normalize_department_name(raw, &others)
                .map(|_| ())
                .map_err(|err| err.to_string())
        })?;

        let renamed = self.service.rename_department(department.id, &name)?;
        self.success(&format!(
            "Renamed {} to {}.",
            department.name, renamed.name
        ))
    }

    // ----- delete -----

    pub fn delete_department(&mut self) -> ActionResult<()> {
        let Some(department) = self.choose_department("Which department do you want to delete?")?
        else {
            return self.notice("There are no departments yet.");
        };
        if let Some(refusal) = self.service.department_delete_refusal(department.id)? {
            return self.notice(&format!("Cannot delete {}: {refusal}.", department.name));
        }
        if !self.prompter.confirm(
            &format!("Are you sure you want to delete {}?", department.name),
            false,
        )? {
            return self.notice(&format!("Kept {}.", department.name));
        }

        match self.service.delete_department(department.id)? {
            DeleteOutcome::Deleted => self.success(&format!("Deleted {}.", department.name)),
            DeleteOutcome::Refused(refusal) => {
                self.notice(&format!("Cannot delete {}: {refusal}.", department.name))
            }
        }
    }

    pub fn delete_role(&mut self) -> ActionResult<()> {
        let Some(role) = self.choose_role("Which role do you want to delete?", None)? else {
            return self.notice("There are no roles available there.");
        };
        if let Some(refusal) = self.service.role_delete_refusal(role.id)? {
            return self.notice(&format!("Cannot delete {}: {refusal}.", role.title));
        }
        if !self.prompter.confirm(
            &format!("Are you sure you want to delete {}?", role.title),
            false,
        )? {
            return self.notice(&format!("Kept {}.", role.title));
        }

        match self.service.delete_role(role.id)? {
            DeleteOutcome::Deleted => self.success(&format!("Deleted {}.", role.title)),
            DeleteOutcome::Refused(refusal) => {
                self.notice(&format!("Cannot delete {}: {refusal}.", role.title))
            }
        }
    }

    pub fn delete_employee(&mut self) -> ActionResult<()> {
        let Some(employee) = self.choose_employee("Which employee do you want to delete?", None)?
        else {
            return self.notice("There are no employees available there.");
        };
        let name = employee.full_name();
        if !self
            .prompter
            .confirm(&format!("Are you sure you want to delete {name}?"), false)?
        {
            return self.notice(&format!("Kept {name}."));
        }

        let removal = self.service.delete_employee(employee.id)?;
        self.success(&format!("Deleted {name}."))?;
        if removal.unmanaged_reports > 0 {
            self.notice(&format!(
                "{} employee(s) who reported to {name} no longer have a manager.",
                removal.unmanaged_reports
            ))?;
        }
        Ok(())
    }
}
