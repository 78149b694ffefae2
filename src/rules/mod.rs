//! Match rules.
//!
//! The resolver compares two revealed cards and picks a follow-up for
//! each. It never touches session state: the orchestrator calls into it
//! and applies what it returns.

pub mod resolver;

pub use resolver::{evaluate, resolve, FollowUp, MatchOutcome, Resolution};
