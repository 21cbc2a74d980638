//! Shared test doubles and utilities for the DreamQuest job pipeline.

mod clock;
mod collaborators;
mod dispatch;
mod store;

pub use clock::{FixedClock, ManualClock};
pub use collaborators::{
    CannedCompletion, FailingAnalyzer, FailingAssetGenerator, FailingCompletion,
    FailingMediaGenerator, FailingTranscriber, FailingWorldBuilder, RecordingWorldBuilder,
    StaticTranscriber,
};
pub use dispatch::{FailingDispatcher, RecordingDispatcher};
pub use store::{EmptyJobStore, FailingJobStore, RecordingJobStore};
