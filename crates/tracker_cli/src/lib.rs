//! Interactive menu front end for the employee tracker.

pub mod actions;
pub mod app;
pub mod menu;
pub mod pickers;
pub mod prompt;
pub mod table;

pub use app::{ActionError, ActionResult, App};
pub use menu::{run_menu, Action, Menu};
pub use prompt::{Answer, PromptError, Prompter, ScriptedPrompter, TerminalPrompter};
