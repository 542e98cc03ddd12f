//! Asset Module
//!
//! Decoded model fragments and the loading seam.
//!
//! File-format decoding lives outside this crate. A loader hands back a
//! [`ModelAsset`]: a small tree of named nodes with optional meshes, shaped
//! like a glTF scene. The viewer instantiates it under a joint pivot.
//!
//! - [`AssetLoader`]: asynchronous fetch-and-decode capability
//! - [`MemoryAssetLoader`]: serves pre-decoded assets from memory
//! - [`PendingLoads`]: joins in-flight loads into one "all settled" signal

pub mod loader;
pub mod model;
pub mod pending;

pub use loader::{AssetLoader, LoadFuture, MemoryAssetLoader};
pub use model::{ModelAsset, ModelNode};
pub use pending::PendingLoads;
