//! Interactive single-choice prompts.

use inquire::{Select, error::InquireError};

use crate::error::{Error, Result};

/// Source of interactive answers.
///
/// Every interaction in the tool is a single-choice list, including
/// confirmations, so this is the only seam between commands and the terminal.
pub trait Prompter {
    /// Present `options` and return the index of the chosen one.
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize>;
}

/// Terminal prompter backed by `inquire`.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize> {
        match Select::new(message, options.to_vec()).raw_prompt() {
            Ok(choice) => Ok(choice.index),
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                Err(Error::PromptCanceled)
            }
            Err(error) => Err(Error::PromptFailed {
                message: error.to_string(),
            }),
        }
    }
}
