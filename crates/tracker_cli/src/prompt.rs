//! Terminal prompt seam.
//!
//! # Responsibility
//! - Define the four prompt kinds the tracker uses: select, input, number, confirm.
//! - Provide the dialoguer-backed terminal implementation.
//! - Provide a scripted implementation that replays canned answers.
//!
//! # Invariants
//! - A validator that rejects input blocks submission; the prompt asks again.
//! - Prompts are strictly sequential; each call returns before the next starts.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::collections::VecDeque;
use std::error::Error;
use std::fmt::{Display, Formatter};
use tracker_core::model::validation::{parse_salary, ValidationError};

pub type PromptResult<T> = Result<T, PromptError>;

/// Inline validator: `Err(message)` is shown and the prompt is repeated.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

#[derive(Debug)]
pub enum PromptError {
    /// Terminal I/O failed or the prompt was interrupted.
    Terminal(String),
    /// A scripted prompter ran out of answers or got the wrong kind.
    Script(String),
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terminal(reason) => write!(f, "terminal prompt failed: {reason}"),
            Self::Script(reason) => write!(f, "scripted prompt failed: {reason}"),
        }
    }
}

impl Error for PromptError {}

impl From<dialoguer::Error> for PromptError {
    fn from(value: dialoguer::Error) -> Self {
        Self::Terminal(value.to_string())
    }
}

/// One selectable entry of a list prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

pub trait Prompter {
    /// Shows `items` with the cursor on `default` and returns the chosen index.
    fn select(
        &mut self,
        message: &str,
        items: &[String],
        default: usize,
    ) -> PromptResult<usize>;

    fn input(&mut self, message: &str, validator: Validator<'_>) -> PromptResult<String>;

    fn confirm(&mut self, message: &str, default: bool) -> PromptResult<bool>;

    /// Reads a non-negative amount, asking again until it parses.
    fn number(&mut self, message: &str) -> PromptResult<f64> {
        let raw = self.input(message, &|raw: &str| {
            parse_salary(raw).map(|_| ()).map_err(|err| err.to_string())
        })?;
        parse_salary(&raw).map_err(|err: ValidationError| PromptError::Script(err.to_string()))
    }
}

/// Shows `choices` and returns the value of the chosen one.
pub fn pick<P, T>(prompter: &mut P, message: &str, choices: Vec<Choice<T>>) -> PromptResult<T>
where
    P: Prompter + ?Sized,
{
    pick_with_default(prompter, message, choices, 0)
}

/// Like [`pick`], with the cursor starting on `choices[default]`.
pub fn pick_with_default<P, T>(
    prompter: &mut P,
    message: &str,
    choices: Vec<Choice<T>>,
    default: usize,
) -> PromptResult<T>
where
    P: Prompter + ?Sized,
{
    let labels: Vec<String> = choices.iter().map(|choice| choice.label.clone()).collect();
    let index = prompter.select(message, &labels, default)?;
    choices
        .into_iter()
        .nth(index)
        .map(|choice| choice.value)
        .ok_or_else(|| PromptError::Terminal(format!("selection {index} out of range")))
}

/// Interactive prompts rendered with dialoguer.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn select(
        &mut self,
        message: &str,
        items: &[String],
        default: usize,
    ) -> PromptResult<usize> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn input(&mut self, message: &str, validator: Validator<'_>) -> PromptResult<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .validate_with(|raw: &String| validator(raw.as_str()))
            .interact_text()?)
    }

    fn confirm(&mut self, message: &str, default: bool) -> PromptResult<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact()?)
    }
}

/// Canned answer for `ScriptedPrompter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Select the item with this exact label.
    Select(String),
    Text(String),
    Confirm(bool),
}

impl Answer {
    pub fn select(label: &str) -> Self {
        Self::Select(label.to_string())
    }

    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Replays answers in order; records every prompt and rejected input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Messages of every prompt shown, in order.
    pub asked: Vec<String>,
    /// Items offered by every select prompt, in order.
    pub offered: Vec<Vec<String>>,
    /// Label under the cursor when each select prompt opened.
    pub defaults: Vec<String>,
    /// Validator messages for rejected text answers.
    pub rejections: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, message: &str) -> PromptResult<Answer> {
        self.asked.push(message.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| PromptError::Script(format!("no answer left for `{message}`")))
    }
}

impl Prompter for ScriptedPrompter {
    fn select(
        &mut self,
        message: &str,
        items: &[String],
        default: usize,
    ) -> PromptResult<usize> {
        self.offered.push(items.to_vec());
        self.defaults
            .push(items.get(default).cloned().unwrap_or_default());
        match self.next_answer(message)? {
            Answer::Select(label) => items.iter().position(|item| *item == label).ok_or_else(|| {
                PromptError::Script(format!("`{label}` not offered by `{message}`: {items:?}"))
            }),
            other => Err(PromptError::Script(format!(
                "expected a selection for `{message}`, got {other:?}"
            ))),
        }
    }

    fn input(&mut self, message: &str, validator: Validator<'_>) -> PromptResult<String> {
        loop {
            match self.next_answer(message)? {
                Answer::Text(value) => match validator(&value) {
                    Ok(()) => return Ok(value),
                    Err(reason) => self.rejections.push(reason),
                },
                other => {
                    return Err(PromptError::Script(format!(
                        "expected text for `{message}`, got {other:?}"
                    )))
                }
            }
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> PromptResult<bool> {
        match self.next_answer(message)? {
            Answer::Confirm(value) => Ok(value),
            other => Err(PromptError::Script(format!(
                "expected a confirmation for `{message}`, got {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_reprompts_until_valid() {
        let mut prompter =
            ScriptedPrompter::new([Answer::text(""), Answer::text("abc"), Answer::text("42")]);

        let value = prompter.number("Salary?").unwrap();

        assert_eq!(value, 42.0);
        assert_eq!(prompter.rejections.len(), 2);
        assert_eq!(prompter.asked, vec!["Salary?"; 3]);
    }

    #[test]
    fn pick_returns_value_of_chosen_label() {
        let mut prompter = ScriptedPrompter::new([Answer::select("two")]);
        let choices = vec![Choice::new("one", 1), Choice::new("two", 2)];

        assert_eq!(pick(&mut prompter, "Which?", choices).unwrap(), 2);
        assert_eq!(prompter.offered, vec![vec!["one", "two"]]);
        assert_eq!(prompter.defaults, vec!["one"]);
    }

    #[test]
    fn pick_with_default_records_cursor_label() {
        let mut prompter = ScriptedPrompter::new([Answer::select("one")]);
        let choices = vec![Choice::new("one", 1), Choice::new("none", 0)];

        assert_eq!(
            pick_with_default(&mut prompter, "Which?", choices, 1).unwrap(),
            1
        );
        assert_eq!(prompter.defaults, vec!["none"]);
    }

    #[test]
    fn scripted_prompter_reports_unknown_label_and_exhaustion() {
        let mut prompter = ScriptedPrompter::new([Answer::select("three")]);
        let items = vec!["one".to_string()];

        assert!(matches!(
            prompter.select("Which?", &items, 0),
            Err(PromptError::Script(_))
        ));
        assert!(matches!(
            prompter.confirm("Sure?", false),
            Err(PromptError::Script(_))
        ));
    }
}
