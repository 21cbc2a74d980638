//! Built-in collaborator implementations.

pub mod assets;
pub mod media;
pub mod transcription;
pub mod world_builder;

pub use assets::ManifestAssetGenerator;
pub use media::PlaceholderMediaGenerator;
pub use transcription::UnconfiguredTranscriber;
pub use world_builder::FilesystemWorldBuilder;
