use serde::{Deserialize, Serialize};

use crate::errors::{Result, RigError};

/// A joint addressed either by short code (`"LSH"`) or by pose index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JointRef {
    Index(usize),
    Code(String),
}

/// Inbound request from the embedding application.
///
/// Encoded as JSON objects tagged by `method`:
///
/// ```json
/// {"method":"setPose","angles":[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]}
/// {"method":"setJointAngle","joint":"LSH","degrees":30}
/// {"method":"tap","x":120,"y":300}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum HostCommand {
    SetPose { angles: Vec<f32> },
    SetJointAngle { joint: JointRef, degrees: f32 },
    SetSelectedJointAngle { degrees: f32 },
    StartInteraction,
    EndInteraction,
    Snapshot,
    Tap { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    Scroll { delta: f32 },
    Resize { width: u32, height: u32 },
}

impl HostCommand {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| {
            if err.is_data() {
                RigError::Command(err.to_string())
            } else {
                RigError::Config(err)
            }
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
