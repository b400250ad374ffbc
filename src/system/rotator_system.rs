use hecs::{CommandBuffer, World};

use crate::{animator::RotationAnimator, component::{rotator::{Rotator, RotatorDisabled}, transform3d::Transform3D}, config::RotatorConfig, TimeData};

// start rotators on entities which have a config but no running animator yet.
// the config is consumed on start, so removing Rotator later does not restart it
fn rotator_system_init(world: &mut World) {
    let mut cmd_buf = CommandBuffer::new();
    let query = world.query_mut::<(&mut Transform3D, &RotatorConfig)>()
        .without::<&Rotator>()
        .without::<&RotatorDisabled>();

    for (e, (transform, config)) in query {
        match RotationAnimator::new(config) {
            Ok(mut animator) => {
                animator.start(transform);
                cmd_buf.insert_one(e, Rotator { animator });
                cmd_buf.remove_one::<RotatorConfig>(e);
            }
            Err(err) => {
                tracing::warn!(entity = ?e, "rotator config rejected: {}", err);
                cmd_buf.insert_one(e, RotatorDisabled {});
            }
        }
    }

    cmd_buf.run_on(world);
}

// advance every running rotator by one frame
fn rotator_system_tick(time: &TimeData, world: &mut World) {
    for (_, (transform, rotator)) in world.query_mut::<(&mut Transform3D, &mut Rotator)>().without::<&RotatorDisabled>() {
        rotator.animator.tick(time.delta_time, transform);
    }
}

/// System which spins entities with a RotatorConfig between randomly chosen rates
pub fn rotator_system_update(time: &TimeData, world: &mut World) {
    rotator_system_init(world);
    rotator_system_tick(time, world);
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use crate::config::AxisRange;

    use super::*;

    fn frame(delta_time: f32) -> TimeData {
        TimeData { delta_time, total_time: 0.0 }
    }

    fn spin_config() -> RotatorConfig {
        RotatorConfig {
            rotation_speed: 90.0,
            initial_delay: 10.0,
            randomize_start: false,
            initial_rotation: Vec3::new(0.0, 1.0, 0.0),
            seed: Some(5),
            ..RotatorConfig::default()
        }
    }

    fn yaw_of(world: &World, e: hecs::Entity) -> f32 {
        let transform = world.get::<&Transform3D>(e).unwrap();
        let (y, _, _) = transform.rotation.to_euler(glam::EulerRot::YXZ);
        y.to_degrees()
    }

    #[test]
    fn test_update_starts_and_ticks() {
        let mut world = World::new();
        let e = world.spawn((Transform3D::default(), spin_config()));

        rotator_system_update(&frame(0.5), &mut world);

        assert!(world.get::<&Rotator>(e).is_ok());
        // 90 degree start kick plus half a second at 90 deg/s
        assert!((yaw_of(&world, e) - 135.0).abs() < 1e-3, "{}", yaw_of(&world, e));

        rotator_system_update(&frame(0.25), &mut world);
        assert!((yaw_of(&world, e) - 157.5).abs() < 1e-3, "{}", yaw_of(&world, e));
    }

    #[test]
    fn test_rejected_config_marks_entity_disabled() {
        let mut world = World::new();
        let config = RotatorConfig {
            x_range: AxisRange::new(2.0, 3.0),
            ..spin_config()
        };
        let e = world.spawn((Transform3D::default(), config));

        rotator_system_update(&frame(0.1), &mut world);
        rotator_system_update(&frame(0.1), &mut world);

        assert!(world.get::<&Rotator>(e).is_err());
        assert!(world.get::<&RotatorDisabled>(e).is_ok());
        assert_eq!(world.get::<&Transform3D>(e).unwrap().rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_disabling_stops_ticks() {
        let mut world = World::new();
        let e = world.spawn((Transform3D::default(), spin_config()));

        rotator_system_update(&frame(0.1), &mut world);
        world.insert_one(e, RotatorDisabled {}).unwrap();
        let frozen = world.get::<&Transform3D>(e).unwrap().rotation;

        for _ in 0..10 {
            rotator_system_update(&frame(0.1), &mut world);
        }

        assert_eq!(world.get::<&Transform3D>(e).unwrap().rotation, frozen);
    }

    #[test]
    fn test_removing_rotator_stops_ticks() {
        let mut world = World::new();
        let e = world.spawn((Transform3D::default(), spin_config()));

        rotator_system_update(&frame(0.1), &mut world);
        assert!(world.get::<&RotatorConfig>(e).is_err());

        world.remove_one::<Rotator>(e).unwrap();
        let frozen = world.get::<&Transform3D>(e).unwrap().rotation;

        for _ in 0..10 {
            rotator_system_update(&frame(0.1), &mut world);
        }

        assert_eq!(world.get::<&Transform3D>(e).unwrap().rotation, frozen);
        assert!(world.get::<&Rotator>(e).is_err());
    }

    #[test]
    fn test_despawned_entities_are_skipped() {
        let mut world = World::new();
        let gone = world.spawn((Transform3D::default(), spin_config()));
        let kept = world.spawn((Transform3D::default(), spin_config()));

        rotator_system_update(&frame(0.1), &mut world);
        world.despawn(gone).unwrap();
        rotator_system_update(&frame(0.1), &mut world);

        assert!(!world.contains(gone));
        assert!((yaw_of(&world, kept) - 108.0).abs() < 1e-3);
    }

    #[test]
    fn test_entities_without_config_are_untouched() {
        let mut world = World::new();
        let plain = world.spawn((Transform3D::default(),));
        let spun = world.spawn((Transform3D::default(), spin_config()));

        rotator_system_update(&frame(0.2), &mut world);

        assert!(world.get::<&Rotator>(plain).is_err());
        assert_eq!(world.get::<&Transform3D>(plain).unwrap().rotation, Quat::IDENTITY);
        assert!(world.get::<&Rotator>(spun).is_ok());
    }
}
