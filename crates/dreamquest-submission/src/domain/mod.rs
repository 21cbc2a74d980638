//! Domain layer for the Job Submission context.

pub mod commands;
pub mod validation;
