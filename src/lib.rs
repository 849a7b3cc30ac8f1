//! multimerge - batch approve and merge look-alike pull requests
//!
//! Finds open PRs assigned to the authenticated user whose titles share a
//! prefix, keeps the ones whose diff is identical to an exemplar PR, and walks
//! through them interactively, approving and merging each one.

pub mod auth;
pub mod config;
pub mod diff;
pub mod error;
pub mod merge;
pub mod platform;
pub mod progress;
pub mod prompt;
pub mod types;

pub use error::{Error, Result};
