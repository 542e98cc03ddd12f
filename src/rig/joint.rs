//! Joint identifiers and the immutable per-joint specification.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use crate::errors::RigError;

/// Stable identifier of every pivot in the robot.
///
/// `Body` is the root; `Head` hangs off it. Neither is posable. The 18
/// posable joints are listed in [`JointId::POSABLE`], which is also the
/// order of pose vectors and of selection indices sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JointId {
    Body,
    Head,
    Lsh,
    Ltht,
    Larm,
    Lhnd,
    Lumb,
    Lleg,
    Lkne,
    Lbmb,
    Lfot,
    Rsh,
    Rtht,
    Rarm,
    Rhnd,
    Rumb,
    Rleg,
    Rkne,
    Rbmb,
    Rfot,
}

impl JointId {
    pub const COUNT: usize = 20;
    pub const POSABLE_COUNT: usize = 18;

    pub const POSABLE: [JointId; Self::POSABLE_COUNT] = [
        JointId::Lsh,
        JointId::Ltht,
        JointId::Larm,
        JointId::Lhnd,
        JointId::Lumb,
        JointId::Lleg,
        JointId::Lkne,
        JointId::Lbmb,
        JointId::Lfot,
        JointId::Rsh,
        JointId::Rtht,
        JointId::Rarm,
        JointId::Rhnd,
        JointId::Rumb,
        JointId::Rleg,
        JointId::Rkne,
        JointId::Rbmb,
        JointId::Rfot,
    ];

    /// Dense index over all 20 joints, used for per-joint tables.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize
    }

    /// Index in [`JointId::POSABLE`]; `None` for `Body` and `Head`.
    #[must_use]
    pub fn pose_index(self) -> Option<usize> {
        Self::POSABLE.iter().position(|j| *j == self)
    }

    #[must_use]
    pub fn from_pose_index(index: usize) -> Option<JointId> {
        Self::POSABLE.get(index).copied()
    }

    /// Short code used by the host protocol and asset naming.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            JointId::Body => "BODY",
            JointId::Head => "HEAD",
            JointId::Lsh => "LSH",
            JointId::Ltht => "LTHT",
            JointId::Larm => "LARM",
            JointId::Lhnd => "LHND",
            JointId::Lumb => "LUMB",
            JointId::Lleg => "LLEG",
            JointId::Lkne => "LKNE",
            JointId::Lbmb => "LBMB",
            JointId::Lfot => "LFOT",
            JointId::Rsh => "RSH",
            JointId::Rtht => "RTHT",
            JointId::Rarm => "RARM",
            JointId::Rhnd => "RHND",
            JointId::Rumb => "RUMB",
            JointId::Rleg => "RLEG",
            JointId::Rkne => "RKNE",
            JointId::Rbmb => "RBMB",
            JointId::Rfot => "RFOT",
        }
    }

    #[must_use]
    pub fn side(self) -> Option<Side> {
        match self {
            JointId::Body | JointId::Head => None,
            JointId::Lsh
            | JointId::Ltht
            | JointId::Larm
            | JointId::Lhnd
            | JointId::Lumb
            | JointId::Lleg
            | JointId::Lkne
            | JointId::Lbmb
            | JointId::Lfot => Some(Side::Left),
            _ => Some(Side::Right),
        }
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for JointId {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        [JointId::Body, JointId::Head]
            .into_iter()
            .chain(JointId::POSABLE)
            .find(|j| j.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| RigError::InvalidJoint(s.to_string()))
    }
}

/// Which half of the robot a limb joint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A principal axis of the pivot's local frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDim {
    X,
    Y,
    Z,
}

impl AxisDim {
    #[inline]
    #[must_use]
    pub const fn unit(self) -> Vec3 {
        match self {
            AxisDim::X => Vec3::X,
            AxisDim::Y => Vec3::Y,
            AxisDim::Z => Vec3::Z,
        }
    }
}

/// The single rotatable axis of a joint, with the sign that maps a host
/// angle onto the pivot's Euler component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    pub dim: AxisDim,
    pub sign: i8,
}

impl Axis {
    #[must_use]
    pub const fn pos(dim: AxisDim) -> Self {
        Self { dim, sign: 1 }
    }

    #[must_use]
    pub const fn neg(dim: AxisDim) -> Self {
        Self { dim, sign: -1 }
    }

    /// Euler angles (radians) for `degrees` about this axis; the other two
    /// components are zero.
    #[must_use]
    pub fn euler_for(self, degrees: f32) -> Vec3 {
        self.dim.unit() * (f32::from(self.sign) * degrees.to_radians())
    }
}

/// Axis along which a shared asset is flipped for the mirrored side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mirror {
    #[default]
    None,
    X,
    Y,
    Z,
}

impl Mirror {
    /// Per-axis scale factor: `-1` on the mirrored axis, `1` elsewhere.
    #[must_use]
    pub const fn scale_factors(self) -> Vec3 {
        match self {
            Mirror::None => Vec3::ONE,
            Mirror::X => Vec3::new(-1.0, 1.0, 1.0),
            Mirror::Y => Vec3::new(1.0, -1.0, 1.0),
            Mirror::Z => Vec3::new(1.0, 1.0, -1.0),
        }
    }
}

/// Immutable description of one joint, fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSpec {
    pub id: JointId,
    pub axis: Axis,
    /// Pivot position in the parent pivot's frame.
    pub local_offset: Vec3,
    pub parent: Option<JointId>,
    pub asset_name: &'static str,
    pub mirror: Mirror,
    /// Fixed Euler XYZ pre-rotation (radians) of the asset root.
    pub static_rotation: Vec3,
    /// Whether a tap on this joint's visual selects it.
    pub selectable: bool,
}
