//! Application layer for the Job Submission context.

pub mod command_handlers;
pub mod query_handlers;
