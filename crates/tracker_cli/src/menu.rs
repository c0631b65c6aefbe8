//! Menu controller.
//!
//! # Invariants
//! - After an action completes (or fails) its owning menu is shown again.
//! - "Go back" from a sub-menu always returns to the main menu.
//! - Quit ends the loop without showing another menu.

use crate::app::App;
use crate::prompt::{pick, Choice, PromptResult, Prompter};
use log::info;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Main,
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open(Menu),
    GoBack,
    Quit,
    AddDepartment,
    AddRole,
    AddEmployee,
    ViewAllDepartments,
    ViewAllRoles,
    ViewAllEmployees,
    ViewEmployeesByDepartment,
    ViewEmployeesByRole,
    ViewEmployeesByManager,
    ViewDepartmentBudget,
    UpdateEmployeeRole,
    UpdateEmployeeManager,
    RenameDepartment,
    DeleteDepartment,
    DeleteRole,
    DeleteEmployee,
}

impl Menu {
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Main => "What would you like to do?",
            Self::Create => "What would you like to add?",
            Self::Read => "What would you like to view?",
            Self::Update => "What would you like to update?",
            Self::Delete => "What would you like to delete?",
        }
    }

    pub fn entries(self) -> Vec<Choice<Action>> {
        let mut entries = match self {
            Self::Main => vec![
                Choice::new("Create...", Action::Open(Self::Create)),
                Choice::new("Read...", Action::Open(Self::Read)),
                Choice::new("Update...", Action::Open(Self::Update)),
                Choice::new("Delete...", Action::Open(Self::Delete)),
            ],
            Self::Create => vec![
                Choice::new("Add a department", Action::AddDepartment),
                Choice::new("Add a role", Action::AddRole),
                Choice::new("Add an employee", Action::AddEmployee),
            ],
            Self::Read => vec![
                Choice::new("View all departments", Action::ViewAllDepartments),
                Choice::new("View all roles", Action::ViewAllRoles),
                Choice::new("View all employees", Action::ViewAllEmployees),
                Choice::new(
                    "View employees by department",
                    Action::ViewEmployeesByDepartment,
                ),
                Choice::new("View employees by role", Action::ViewEmployeesByRole),
                Choice::new("View employees by manager", Action::ViewEmployeesByManager),
                Choice::new(
                    "View department budget utilization",
                    Action::ViewDepartmentBudget,
                ),
            ],
            Self::Update => vec![
                Choice::new("Update an employee's role", Action::UpdateEmployeeRole),
                Choice::new("Update an employee's manager", Action::UpdateEmployeeManager),
                Choice::new("Rename a department", Action::RenameDepartment),
            ],
            Self::Delete => vec![
                Choice::new("Delete a department", Action::DeleteDepartment),
                Choice::new("Delete a role", Action::DeleteRole),
                Choice::new("Delete an employee", Action::DeleteEmployee),
            ],
        };
        match self {
            Self::Main => entries.push(Choice::new("Quit", Action::Quit)),
            _ => entries.push(Choice::new("Go back", Action::GoBack)),
        }
        entries
    }
}

impl Action {
    /// Menu shown again once this action finishes.
    pub fn owner(self) -> Menu {
        match self {
            Self::Open(_) | Self::GoBack | Self::Quit => Menu::Main,
            Self::AddDepartment | Self::AddRole | Self::AddEmployee => Menu::Create,
            Self::ViewAllDepartments
            | Self::ViewAllRoles
            | Self::ViewAllEmployees
            | Self::ViewEmployeesByDepartment
            | Self::ViewEmployeesByRole
            | Self::ViewEmployeesByManager
            | Self::ViewDepartmentBudget => Menu::Read,
            Self::UpdateEmployeeRole | Self::UpdateEmployeeManager | Self::RenameDepartment => {
                Menu::Update
            }
            Self::DeleteDepartment | Self::DeleteRole | Self::DeleteEmployee => Menu::Delete,
        }
    }
}

/// Runs menus until Quit. Only a failure of the menu prompt itself ends the
/// loop early; action failures are reported and the owning menu reappears.
pub fn run_menu<P: Prompter, W: Write>(app: &mut App<'_, P, W>) -> PromptResult<()> {
    let mut menu = Menu::Main;
    loop {
        let action = pick(&mut app.prompter, menu.prompt(), menu.entries())?;
        menu = match action {
            Action::Quit => {
                info!("event=menu_quit module=cli status=ok");
                return Ok(());
            }
            Action::Open(next) => next,
            Action::GoBack => Menu::Main,
            action => {
                app.perform(action);
                action.owner()
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_action_returns_to_the_menu_listing_it() {
        for menu in [Menu::Create, Menu::Read, Menu::Update, Menu::Delete] {
            for entry in menu.entries() {
                if entry.value != Action::GoBack {
                    assert_eq!(entry.value.owner(), menu, "{}", entry.label);
                }
            }
        }
    }

    #[test]
    fn main_menu_ends_with_quit_and_sub_menus_with_go_back() {
        assert_eq!(
            Menu::Main.entries().last().map(|entry| entry.value),
            Some(Action::Quit)
        );
        for menu in [Menu::Create, Menu::Read, Menu::Update, Menu::Delete] {
            assert_eq!(
                menu.entries().last().map(|entry| entry.value),
                Some(Action::GoBack)
            );
        }
    }
}
