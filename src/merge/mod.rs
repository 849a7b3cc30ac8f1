//! Match-and-merge engine
//!
//! Two phases, in the order the session runs them:
//! 1. Match - compare each candidate's diff with the exemplar (effectful, bounded)
//! 2. Review - for each match in turn, ask what to do and, when accepted,
//!    approve then merge it before moving to the next (interactive, failures
//!    isolated per PR)

mod execute;
mod matcher;
mod session;

pub use execute::{
    FailedStage, PrOutcome, ReviewOptions, ReviewReport, approve_and_merge, execute_review,
};
pub use matcher::{diffs_match, find_matching};
pub use session::{SessionOutcome, SessionRequest, run_session};
