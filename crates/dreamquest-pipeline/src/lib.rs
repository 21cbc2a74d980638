//! Pipeline Orchestration bounded context for DreamQuest.
//!
//! Drives a job from `queued` to `ready` (or `failed`): the orchestrator
//! command handler, the built-in collaborators it calls, and the in-process
//! work queue that feeds it.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod worker;
