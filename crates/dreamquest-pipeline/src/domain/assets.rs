//! Asset manifest derivation.

use dreamquest_core::blueprint::Blueprint;
use dreamquest_core::collaborator::{AssetKind, AssetManifest, AssetRef};

/// Derives the manifest of assets a world built from `blueprint` needs.
///
/// One model per character (in blueprint order), then the terrain for the
/// world, plus one ambient track for the mood.
#[must_use]
pub fn build_manifest(blueprint: &Blueprint) -> AssetManifest {
    let mut models: Vec<AssetRef> = blueprint
        .characters
        .iter()
        .map(|character| AssetRef {
            kind: AssetKind::from(character),
            file: format!("/assets/models/{}.glb", character.kind()),
        })
        .collect();

    models.push(AssetRef {
        kind: AssetKind::Terrain,
        file: format!("/assets/models/terrain_{}.glb", blueprint.world.as_str()),
    });

    AssetManifest {
        models,
        textures: Vec::new(),
        audio: vec![AssetRef {
            kind: AssetKind::Ambient,
            file: format!("/assets/audio/ambient_{}.mp3", blueprint.mood.as_str()),
        }],
    }
}
