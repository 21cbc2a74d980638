//! Application layer for the Pipeline Orchestration context.

pub mod command_handlers;
