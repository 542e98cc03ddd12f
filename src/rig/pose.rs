//! Joint angle application.
//!
//! Angles arrive in degrees. Each joint turns about one local axis; the
//! axis sign from the registry is applied here and nowhere else.

use glam::Vec3;

use crate::errors::{Result, RigError};
use crate::rig::joint::{AxisDim, JointId};
use crate::rig::Rig;
use crate::scene::Scene;

/// One angle (degrees) per posable joint, in [`JointId::POSABLE`] order.
///
/// Construction validates length and finiteness, so a `Pose` can always be
/// applied in full.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose([f32; JointId::POSABLE_COUNT]);

impl Pose {
    #[must_use]
    pub const fn zero() -> Self {
        Self([0.0; JointId::POSABLE_COUNT])
    }

    #[must_use]
    pub fn get(&self, joint: JointId) -> Option<f32> {
        joint.pose_index().map(|i| self.0[i])
    }

    #[must_use]
    pub fn angles(&self) -> &[f32; JointId::POSABLE_COUNT] {
        &self.0
    }

    /// Pairs each posable joint with its angle.
    pub fn iter(&self) -> impl Iterator<Item = (JointId, f32)> + '_ {
        JointId::POSABLE.into_iter().zip(self.0.iter().copied())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<&[f32]> for Pose {
    type Error = RigError;

    fn try_from(angles: &[f32]) -> Result<Self> {
        let arr: [f32; JointId::POSABLE_COUNT] =
            angles.try_into().map_err(|_| RigError::MalformedPose {
                expected: JointId::POSABLE_COUNT,
                actual: angles.len(),
            })?;
        if let Some(index) = arr.iter().position(|a| !a.is_finite()) {
            return Err(RigError::NonFiniteAngle { index });
        }
        Ok(Self(arr))
    }
}

impl Rig {
    /// Sets one joint's angle in degrees.
    ///
    /// Writes `sign * radians` into the joint's configured Euler component
    /// and leaves the other two as they are.
    pub fn set_joint_angle(&mut self, scene: &mut Scene, id: JointId, degrees: f32) {
        let joint = &mut self.joints[id.slot()];
        let axis = joint.spec.axis;
        let value = axis.euler_for(degrees);
        match axis.dim {
            AxisDim::X => joint.rotation.x = value.x,
            AxisDim::Y => joint.rotation.y = value.y,
            AxisDim::Z => joint.rotation.z = value.z,
        }

        let Vec3 { x, y, z } = joint.rotation;
        if let Some(node) = scene.get_node_mut(joint.pivot) {
            node.transform.set_rotation_euler(x, y, z);
        }
    }

    /// Like [`Rig::set_joint_angle`], addressed by short code (`"LSH"`).
    pub fn set_joint_angle_by_code(
        &mut self,
        scene: &mut Scene,
        code: &str,
        degrees: f32,
    ) -> Result<JointId> {
        let id: JointId = code.parse()?;
        Self::check_angle(id, degrees)?;
        self.set_joint_angle(scene, id, degrees);
        Ok(id)
    }

    /// Like [`Rig::set_joint_angle`], addressed by index in pose order.
    pub fn set_joint_angle_by_index(
        &mut self,
        scene: &mut Scene,
        index: usize,
        degrees: f32,
    ) -> Result<JointId> {
        let id = JointId::from_pose_index(index)
            .ok_or_else(|| RigError::InvalidJoint(format!("pose index {index}")))?;
        Self::check_angle(id, degrees)?;
        self.set_joint_angle(scene, id, degrees);
        Ok(id)
    }

    pub fn apply_pose(&mut self, scene: &mut Scene, pose: &Pose) {
        for (id, degrees) in pose.iter() {
            self.set_joint_angle(scene, id, degrees);
        }
    }

    /// Validates `angles` as a [`Pose`] and applies it. Nothing is applied
    /// when validation fails.
    pub fn set_pose(&mut self, scene: &mut Scene, angles: &[f32]) -> Result<Pose> {
        let pose = Pose::try_from(angles)?;
        self.apply_pose(scene, &pose);
        Ok(pose)
    }

    /// Current Euler rotation (radians) of a joint's pivot.
    #[must_use]
    pub fn joint_rotation(&self, id: JointId) -> Vec3 {
        self.joints[id.slot()].rotation
    }

    /// Current angle of a joint in host degrees, sign undone.
    #[must_use]
    pub fn joint_angle(&self, id: JointId) -> f32 {
        let joint = &self.joints[id.slot()];
        let axis = joint.spec.axis;
        (joint.rotation.dot(axis.dim.unit()) * f32::from(axis.sign)).to_degrees()
    }

    fn check_angle(id: JointId, degrees: f32) -> Result<()> {
        if degrees.is_finite() {
            Ok(())
        } else {
            Err(RigError::NonFiniteJointAngle {
                joint: id.code().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_rejects_wrong_length() {
        let err = Pose::try_from([0.0f32; 17].as_slice()).unwrap_err();
        assert!(matches!(err, RigError::MalformedPose { expected: 18, actual: 17 }));
    }

    #[test]
    fn pose_rejects_nan() {
        let mut angles = [0.0f32; 18];
        angles[4] = f32::NAN;
        let err = Pose::try_from(angles.as_slice()).unwrap_err();
        assert!(matches!(err, RigError::NonFiniteAngle { index: 4 }));
    }

    #[test]
    fn single_joint_rejects_non_finite_angle() {
        let loader = crate::assets::MemoryAssetLoader::new();
        let mut scene = Scene::new();
        let (mut rig, _) = crate::rig::RigBuilder::new(&loader).build(&mut scene).unwrap();
        rig.set_joint_angle(&mut scene, JointId::Rkne, 20.0);

        let err = rig.set_joint_angle_by_code(&mut scene, "RKNE", f32::NAN).unwrap_err();
        assert!(matches!(&err, RigError::NonFiniteJointAngle { joint } if joint == "RKNE"));
        let err = rig.set_joint_angle_by_index(&mut scene, 0, f32::INFINITY).unwrap_err();
        assert!(matches!(&err, RigError::NonFiniteJointAngle { joint } if joint == "LSH"));

        assert!((rig.joint_angle(JointId::Rkne) - 20.0).abs() < 1e-4);
        assert_eq!(rig.joint_rotation(JointId::Lsh), Vec3::ZERO);
    }

    #[test]
    fn pose_lookup_by_joint() {
        let mut angles = [0.0f32; 18];
        angles[9] = 12.5;
        let pose = Pose::try_from(angles.as_slice()).unwrap();
        assert_eq!(pose.get(JointId::Rsh), Some(12.5));
        assert_eq!(pose.get(JointId::Body), None);
    }
}
