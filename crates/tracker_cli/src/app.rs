//! Application handle shared by pickers, menus and action handlers.
//!
//! The handle carries the explicit store (a borrowed `RosterService`), the
//! prompter and the output sink. Nothing in the CLI reaches for global state.

use crate::prompt::{PromptError, Prompter};
use crate::table::Table;
use console::style;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use tracker_core::{RepoError, RosterService, ServiceError};

pub type ActionResult<T> = Result<T, ActionError>;

/// Failure that aborts the current action and returns to its menu.
#[derive(Debug)]
pub enum ActionError {
    Prompt(PromptError),
    Service(ServiceError),
    Output(io::Error),
}

impl Display for ActionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prompt(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl Error for ActionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Prompt(err) => Some(err),
            Self::Service(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<PromptError> for ActionError {
    fn from(value: PromptError) -> Self {
        Self::Prompt(value)
    }
}

impl From<ServiceError> for ActionError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<RepoError> for ActionError {
    fn from(value: RepoError) -> Self {
        Self::Service(ServiceError::Repo(value))
    }
}

impl From<io::Error> for ActionError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

pub struct App<'conn, P, W> {
    pub service: RosterService<'conn>,
    pub prompter: P,
    pub out: W,
}

impl<'conn, P: Prompter, W: Write> App<'conn, P, W> {
    pub fn new(service: RosterService<'conn>, prompter: P, out: W) -> Self {
        Self {
            service,
            prompter,
            out,
        }
    }

    pub(crate) fn success(&mut self, message: &str) -> ActionResult<()> {
        writeln!(self.out, "{}", style(message).green())?;
        Ok(())
    }

    pub(crate) fn notice(&mut self, message: &str) -> ActionResult<()> {
        writeln!(self.out, "{}", style(message).yellow())?;
        Ok(())
    }

    pub(crate) fn failure(&mut self, message: &str) -> ActionResult<()> {
        writeln!(self.out, "{}", style(message).red())?;
        Ok(())
    }

    pub(crate) fn print_table(&mut self, table: &Table) -> ActionResult<()> {
        writeln!(self.out)?;
        write!(self.out, "{}", table.render())?;
        writeln!(self.out)?;
        Ok(())
    }
}
