//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! The main error type [`RigError`] covers all failure modes including:
//! - Joint addressing and pose validation errors
//! - Asset loading failures
//! - Snapshot encoding and backend rendering errors
//! - Configuration and host command parsing errors
//!
//! None of these ever reach an end user directly. The viewer forwards them
//! to the host application as `Log` events and keeps running.
//!
//! # Usage
//!
//! All fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, RigError>`.
//!
//! ```rust,ignore
//! use rigview::errors::{RigError, Result};
//!
//! fn apply() -> Result<()> {
//!     Err(RigError::InvalidJoint("LXX".into()))
//! }
//! ```

use thiserror::Error;

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum RigError {
    // ========================================================================
    // Kinematics
    // ========================================================================
    /// A joint code or pose index did not name a known joint.
    #[error("Invalid joint: {0}")]
    InvalidJoint(String),

    /// A joint table is not a single tree rooted at `Body`.
    #[error("Invalid joint registry: {0}")]
    InvalidRegistry(String),

    /// A pose vector had the wrong number of angles.
    #[error("Malformed pose: expected {expected} angles, got {actual}")]
    MalformedPose {
        /// Number of posable joints
        expected: usize,
        /// Number of angles received
        actual: usize,
    },

    /// A pose vector contained NaN or an infinity.
    #[error("Malformed pose: angle at index {index} is not finite")]
    NonFiniteAngle {
        /// Position of the offending angle
        index: usize,
    },

    /// A single-joint angle was NaN or an infinity.
    #[error("Angle for joint {joint} is not finite")]
    NonFiniteJointAngle {
        /// Short code of the addressed joint
        joint: String,
    },

    // ========================================================================
    // Assets
    // ========================================================================
    /// A model asset could not be fetched or decoded.
    #[error("Asset load failure: {asset}: {reason}")]
    AssetLoadFailure {
        /// Asset name as requested from the loader
        asset: String,
        /// Loader supplied reason
        reason: String,
    },

    // ========================================================================
    // Picking
    // ========================================================================
    /// Two hits at the same distance.
    ///
    /// Never produced: ties resolve to the first mesh in depth-first scene
    /// order. Kept so the host protocol can name it.
    #[error("Ambiguous pick")]
    PickAmbiguous,

    // ========================================================================
    // Rendering & Snapshot
    // ========================================================================
    /// The render backend reported a failure.
    #[error("Render error: {0}")]
    Render(String),

    /// PNG encoding of a snapshot failed.
    #[error("Snapshot encode error: {0}")]
    SnapshotEncode(String),

    // ========================================================================
    // Configuration & Host Protocol
    // ========================================================================
    /// JSON parsing error (settings or host commands).
    #[error("JSON parse error: {0}")]
    Config(#[from] serde_json::Error),

    /// A host command was well-formed JSON but not understood.
    #[error("Host command error: {0}")]
    Command(String),
}

impl From<image::ImageError> for RigError {
    fn from(err: image::ImageError) -> Self {
        RigError::SnapshotEncode(err.to_string())
    }
}

/// Alias for `Result<T, RigError>`.
pub type Result<T> = std::result::Result<T, RigError>;
