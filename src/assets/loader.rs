use std::collections::HashMap;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use crate::assets::model::ModelAsset;
use crate::errors::{Result, RigError};

/// Future returned by an [`AssetLoader`].
///
/// Not `Send`: the viewer is single-threaded and on `wasm32` loads are
/// backed by JS promises.
pub type LoadFuture = LocalBoxFuture<'static, Result<ModelAsset>>;

/// Fetches and decodes a named model asset.
///
/// Each call starts one independent load. There is no cancellation: a
/// future that is dropped unfinished is simply abandoned.
pub trait AssetLoader {
    fn load(&self, name: &str) -> LoadFuture;
}

impl<F> AssetLoader for F
where
    F: Fn(&str) -> LoadFuture,
{
    fn load(&self, name: &str) -> LoadFuture {
        self(name)
    }
}

/// Serves pre-decoded assets from memory.
///
/// Requests for names that were never inserted fail with
/// [`RigError::AssetLoadFailure`].
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetLoader {
    assets: HashMap<String, ModelAsset>,
}

impl MemoryAssetLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, asset: ModelAsset) -> &mut Self {
        self.assets.insert(name.into(), asset);
        self
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, asset: ModelAsset) -> Self {
        self.insert(name, asset);
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn load(&self, name: &str) -> LoadFuture {
        let result = self
            .assets
            .get(name)
            .cloned()
            .ok_or_else(|| RigError::AssetLoadFailure {
                asset: name.to_string(),
                reason: "not found".to_string(),
            });
        future::ready(result).boxed_local()
    }
}
