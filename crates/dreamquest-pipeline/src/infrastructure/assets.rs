//! Manifest-only asset generator.

use async_trait::async_trait;
use dreamquest_core::blueprint::Blueprint;
use dreamquest_core::collaborator::{AssetGenerator, AssetManifest, CollaboratorError};

use crate::domain::assets::build_manifest;

/// Asset generator that references prebuilt assets by name instead of
/// generating new ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestAssetGenerator;

#[async_trait]
impl AssetGenerator for ManifestAssetGenerator {
    async fn generate(&self, blueprint: &Blueprint) -> Result<AssetManifest, CollaboratorError> {
        Ok(build_manifest(blueprint))
    }
}
