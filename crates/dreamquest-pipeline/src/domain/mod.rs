//! Domain layer for the Pipeline Orchestration context.

pub mod assets;
pub mod commands;
pub mod stage;
