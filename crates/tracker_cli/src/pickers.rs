//! Cascading selection helpers.
//!
//! Department → role → employee: each picker narrows through the one before
//! it when the caller has no context yet. An empty list is replaced by a
//! single "none available" entry whose selection yields `None`, so the
//! calling action can stop gracefully.

use crate::app::{ActionResult, App};
use crate::prompt::{pick, pick_with_default, Choice, Prompter};
use std::io::Write;
use tracker_core::{Department, DepartmentId, Employee, EmployeeId, Role, RoleId};

pub const NO_DEPARTMENTS: &str = "(no departments available)";
pub const NO_ROLES: &str = "(no roles available)";
pub const NO_EMPLOYEES: &str = "(no employees available)";
pub const NO_MANAGER: &str = "None";

fn with_sentinel<T>(choices: Vec<Choice<Option<T>>>, sentinel: &str) -> Vec<Choice<Option<T>>> {
    if choices.is_empty() {
        vec![Choice::new(sentinel, None)]
    } else {
        choices
    }
}

impl<P: Prompter, W: Write> App<'_, P, W> {
    /// Lists every department by name.
    pub fn choose_department(&mut self, purpose: &str) -> ActionResult<Option<Department>> {
        let choices = self
            .service
            .list_departments()?
            .into_iter()
            .map(|department| Choice::new(department.name.clone(), Some(department)))
            .collect();
        Ok(pick(
            &mut self.prompter,
            purpose,
            with_sentinel(choices, NO_DEPARTMENTS),
        )?)
    }

    /// Lists roles of `department_id`, asking for the department first when absent.
    pub fn choose_role(
        &mut self,
        purpose: &str,
        department_id: Option<DepartmentId>,
    ) -> ActionResult<Option<Role>> {
        let department_id = match department_id {
            Some(id) => id,
            None => match self.choose_department(purpose)? {
                Some(department) => department.id,
                None => return Ok(None),
            },
        };

        let choices = self
            .service
            .list_roles(department_id)?
            .into_iter()
            .map(|role| Choice::new(role.title.clone(), Some(role)))
            .collect();
        Ok(pick(
            &mut self.prompter,
            purpose,
            with_sentinel(choices, NO_ROLES),
        )?)
    }

    /// Lists employees holding `role_id`, asking for the role first when absent.
    pub fn choose_employee(
        &mut self,
        purpose: &str,
        role_id: Option<RoleId>,
    ) -> ActionResult<Option<Employee>> {
        let role_id = match role_id {
            Some(id) => id,
            None => match self.choose_role(purpose, None)? {
                Some(role) => role.id,
                None => return Ok(None),
            },
        };

        let choices = self
            .service
            .list_employees_in_role(role_id)?
            .into_iter()
            .map(|employee| Choice::new(employee.full_name(), Some(employee)))
            .collect();
        Ok(pick(
            &mut self.prompter,
            purpose,
            with_sentinel(choices, NO_EMPLOYEES),
        )?)
    }

    /// Lists possible managers in the department, with a trailing "None".
    ///
    /// The cursor starts on "None". Returns the chosen manager id, or `None`
    /// for no manager.
    pub fn choose_manager(
        &mut self,
        purpose: &str,
        department_id: DepartmentId,
        exclude: Option<EmployeeId>,
    ) -> ActionResult<Option<EmployeeId>> {
        let mut choices: Vec<Choice<Option<EmployeeId>>> = self
            .service
            .manager_candidates(department_id, exclude)?
            .into_iter()
            .map(|employee| Choice::new(employee.full_name(), Some(employee.id)))
            .collect();
        let no_manager = choices.len();
        choices.push(Choice::new(NO_MANAGER, None));
        Ok(pick_with_default(
            &mut self.prompter,
            purpose,
            choices,
            no_manager,
        )?)
    }

    /// Lists employees who currently manage at least one other employee.
    pub fn choose_existing_manager(&mut self, purpose: &str) -> ActionResult<Option<Employee>> {
        let choices = self
            .service
            .list_managers()?
            .into_iter()
            .map(|employee| Choice::new(employee.full_name(), Some(employee)))
            .collect();
        Ok(pick(
            &mut self.prompter,
            purpose,
            with_sentinel(choices, NO_EMPLOYEES),
        )?)
    }
}
