//! Interactive prompts backed by dialoguer

use dialoguer::{Confirm, Input};
use multimerge::error::{Error, Result};
use multimerge::prompt::{ConfirmationProvider, EXEMPLAR_PROMPT, REVIEW_PROMPT, ReviewChoice};
use multimerge::types::PullRequestRef;

/// Asks the user on the terminal
pub struct TerminalPrompter;

impl ConfirmationProvider for TerminalPrompter {
    fn confirm_exemplar(&mut self, _exemplar: &PullRequestRef) -> Result<bool> {
        Confirm::new()
            .with_prompt(EXEMPLAR_PROMPT)
            .default(false)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))
    }

    fn review_choice(&mut self, _pr: &PullRequestRef) -> Result<ReviewChoice> {
        let answer: String = Input::new()
            .with_prompt(REVIEW_PROMPT)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Internal(format!("Failed to read answer: {e}")))?;
        Ok(ReviewChoice::parse(&answer))
    }
}
