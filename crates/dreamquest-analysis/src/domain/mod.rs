//! Domain layer for the Dream Analysis context.

pub mod cues;
pub mod extractor;
pub mod response;

#[cfg(test)]
mod extractor_properties;
