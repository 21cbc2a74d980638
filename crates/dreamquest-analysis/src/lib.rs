//! Dream Analysis bounded context for DreamQuest.
//!
//! Responsible for turning free-text dream descriptions into blueprints:
//! the deterministic keyword extractor, parsing of model-written blueprints,
//! and the analyzers the pipeline calls during the `analyzing` stage.

pub mod application;
pub mod domain;
