//! Scripted prompter and recording progress for headless workflow tests

#![allow(dead_code)]

use async_trait::async_trait;
use multimerge::diff::DiffText;
use multimerge::error::{Error, Result};
use multimerge::merge::PrOutcome;
use multimerge::progress::ProgressCallback;
use multimerge::prompt::{ConfirmationProvider, ReviewChoice};
use multimerge::types::PullRequestRef;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers prompts from a fixed script and records what it was asked
///
/// Running out of review answers is an error, so a test that expects fewer
/// prompts than it scripted fails loudly.
pub struct ScriptedPrompter {
    accept_exemplar: bool,
    choices: VecDeque<ReviewChoice>,
    pub exemplar_prompts: Vec<u64>,
    pub review_prompts: Vec<u64>,
}

impl ScriptedPrompter {
    /// Accept the exemplar, then answer review prompts in order
    pub fn new(choices: impl IntoIterator<Item = ReviewChoice>) -> Self {
        Self {
            accept_exemplar: true,
            choices: choices.into_iter().collect(),
            exemplar_prompts: Vec::new(),
            review_prompts: Vec::new(),
        }
    }

    /// Accept the exemplar and expect no review prompts
    pub fn silent() -> Self {
        Self::new(Vec::<ReviewChoice>::new())
    }

    /// Reject the exemplar diff
    pub fn rejecting_exemplar() -> Self {
        Self {
            accept_exemplar: false,
            ..Self::silent()
        }
    }

    /// Review answers not consumed
    pub fn remaining(&self) -> usize {
        self.choices.len()
    }
}

impl ConfirmationProvider for ScriptedPrompter {
    fn confirm_exemplar(&mut self, exemplar: &PullRequestRef) -> Result<bool> {
        self.exemplar_prompts.push(exemplar.number());
        Ok(self.accept_exemplar)
    }

    fn review_choice(&mut self, pr: &PullRequestRef) -> Result<ReviewChoice> {
        self.review_prompts.push(pr.number());
        self.choices
            .pop_front()
            .ok_or_else(|| Error::Internal(format!("no scripted answer for {pr}")))
    }
}

/// One recorded progress event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ExemplarDiff(u64),
    MatchingStarted(usize),
    CandidateChecked(u64, bool),
    Matches(Vec<u64>),
    PrStarted(u64),
    PrOutcome(u64, PrOutcome),
    Message(String),
}

/// Progress callback that records every event
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Event>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Free-form messages only
    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Message(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    /// Whether any message equals `text`
    pub fn has_message(&self, text: &str) -> bool {
        self.messages().iter().any(|m| m == text)
    }

    /// PR numbers reported through `on_pr_outcome`, in order
    pub fn outcome_numbers(&self) -> Vec<u64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::PrOutcome(n, _) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_exemplar_diff(&self, exemplar: &PullRequestRef, _diff: &DiffText) {
        self.push(Event::ExemplarDiff(exemplar.number()));
    }

    async fn on_matching_started(&self, candidates: usize) {
        self.push(Event::MatchingStarted(candidates));
    }

    async fn on_candidate_checked(&self, pr: &PullRequestRef, matched: bool) {
        self.push(Event::CandidateChecked(pr.number(), matched));
    }

    async fn on_matches(&self, matches: &[PullRequestRef]) {
        self.push(Event::Matches(matches.iter().map(|p| p.number()).collect()));
    }

    async fn on_pr_started(&self, pr: &PullRequestRef) {
        self.push(Event::PrStarted(pr.number()));
    }

    async fn on_pr_outcome(&self, pr: &PullRequestRef, outcome: &PrOutcome) {
        self.push(Event::PrOutcome(pr.number(), outcome.clone()));
    }

    async fn on_message(&self, message: &str) {
        self.push(Event::Message(message.to_string()));
    }
}
