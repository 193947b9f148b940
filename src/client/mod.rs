//! Client side of the job board: the HR posting form with its draft and
//! submission flow, and the candidate-facing listing with filters.
//!
//! Everything talks to the backend through [`gateway::JobsGateway`] and keeps
//! drafts through [`draft::DraftStore`], so both can be swapped out.

pub mod draft;
pub mod error;
pub mod form;
pub mod gateway;
pub mod listing;
pub mod submission;
