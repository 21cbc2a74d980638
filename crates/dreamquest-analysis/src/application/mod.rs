//! Application layer for the Dream Analysis context.

pub mod analyzers;
