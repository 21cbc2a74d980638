//! Job Submission bounded context for DreamQuest.
//!
//! Accepts new jobs (validate, persist as `queued`, enqueue) and serves the
//! read path that pollers use to follow a job to completion.

pub mod application;
pub mod domain;
