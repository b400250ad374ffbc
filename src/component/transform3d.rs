use glam::{EulerRot, Quat, Vec3};

/// Anything that can be spun by a local-space euler delta.
/// Deltas are relative to the current orientation, never absolute.
pub trait TransformHandle {
    fn rotate_by(&mut self, delta_degrees: Vec3);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: Quat
}

impl Transform3D {
    pub fn default() -> Transform3D {
        Transform3D {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Quat::IDENTITY
        }
    }

    pub fn with_position(self: &Self, new_position: Vec3) -> Transform3D {
        let mut result = *self;
        result.position = new_position;
        result
    }

    pub fn with_rotation(self: &Self, new_rotation: Quat) -> Transform3D {
        let mut result = *self;
        result.rotation = new_rotation;
        result
    }
}

impl TransformHandle for Transform3D {
    // z first, then x, then y, in local space
    fn rotate_by(&mut self, delta_degrees: Vec3) {
        let delta = Quat::from_euler(
            EulerRot::YXZ,
            delta_degrees.y.to_radians(),
            delta_degrees.x.to_radians(),
            delta_degrees.z.to_radians(),
        );

        self.rotation = (self.rotation * delta).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_quat_eq(a: Quat, b: Quat) {
        // q and -q are the same orientation
        assert!(a.dot(b).abs() > 1.0 - 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_rotate_by_single_axis() {
        let mut transform = Transform3D::default();
        transform.rotate_by(Vec3::new(0.0, 90.0, 0.0));

        assert_quat_eq(transform.rotation, Quat::from_rotation_y(90.0_f32.to_radians()));

        let forward = transform.rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_X).length() < 1e-5, "{:?}", forward);
    }

    #[test]
    fn test_rotate_by_is_incremental() {
        let mut transform = Transform3D::default().with_position(Vec3::new(1.0, 2.0, 3.0));
        for _ in 0..4 {
            transform.rotate_by(Vec3::new(0.0, 0.0, 22.5));
        }

        assert_quat_eq(transform.rotation, Quat::from_rotation_z(90.0_f32.to_radians()));
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotate_by_is_local_space() {
        let start = Quat::from_rotation_x(90.0_f32.to_radians());
        let mut transform = Transform3D::default().with_rotation(start);
        transform.rotate_by(Vec3::new(0.0, 30.0, 0.0));

        assert_quat_eq(transform.rotation, start * Quat::from_rotation_y(30.0_f32.to_radians()));
    }

    #[test]
    fn test_rotate_by_zero_is_noop() {
        let start = Quat::from_rotation_y(0.4);
        let mut transform = Transform3D::default().with_rotation(start);
        transform.rotate_by(Vec3::ZERO);

        assert_quat_eq(transform.rotation, start);
    }
}
