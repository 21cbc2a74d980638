//! DreamQuest core: shared domain vocabulary and ports.
//!
//! This crate defines the job record and its stage machine, the blueprint
//! vocabulary, and the traits that every context and backend depends on.
//! It contains no infrastructure code.

pub mod blueprint;
pub mod clock;
pub mod collaborator;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod job;
pub mod store;
