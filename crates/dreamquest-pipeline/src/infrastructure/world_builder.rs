//! World builder that stages the blueprint on the local file system.
//!
//! Each job gets `<output_dir>/<job_id>/blueprint.json`, which the static
//! WebGL player next to it reads at load time. Rebuilding a job overwrites
//! the file in place.

use std::path::PathBuf;

use async_trait::async_trait;
use dreamquest_core::blueprint::Blueprint;
use dreamquest_core::collaborator::{CollaboratorError, WorldBuilder};
use tracing::debug;
use uuid::Uuid;

/// File name of the staged blueprint inside a job directory.
pub const BLUEPRINT_FILE: &str = "blueprint.json";

/// Writes blueprints under `output_dir` and serves them from `public_path`.
#[derive(Debug, Clone)]
pub struct FilesystemWorldBuilder {
    output_dir: PathBuf,
    public_path: String,
}

impl FilesystemWorldBuilder {
    /// Creates a builder that writes under `output_dir` and returns URLs
    /// rooted at `public_path`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            public_path: public_path.into(),
        }
    }

    fn world_url(&self, job_id: Uuid) -> String {
        format!(
            "{}/{job_id}/index.html",
            self.public_path.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl WorldBuilder for FilesystemWorldBuilder {
    async fn build(&self, job_id: Uuid, blueprint: &Blueprint) -> Result<String, CollaboratorError> {
        let job_dir = self.output_dir.join(job_id.to_string());
        tokio::fs::create_dir_all(&job_dir).await?;

        let bytes = serde_json::to_vec_pretty(blueprint)?;
        let path = job_dir.join(BLUEPRINT_FILE);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), "staged blueprint");

        Ok(self.world_url(job_id))
    }
}
