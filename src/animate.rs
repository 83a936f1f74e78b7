//! The per-frame animation step.
//!
//! One call per rendered frame, before any drawing: advances the star, the
//! planets' orbital and self rotation, particle drift, stream opacity, and
//! the damped camera spin. Pure state mutation, no painting.

use crate::math::axis_angle_matrix;
use crate::scene::SceneState;
use std::f64::consts::TAU;

/// Exponential decay applied to a released camera drag each frame.
const CAMERA_DAMPING: f64 = 0.92;
const CAMERA_SPIN_EPSILON: f64 = 1e-4;

/// Pulse factor of the star glow, mirroring the vertex-shader pulse.
pub fn star_pulse(t: f64) -> f64 {
    1.0 + (t * 2.0).sin() * 0.1
}

/// Advances all scene state for one tick at wall time `t`.
///
/// A hovered planet keeps its orbital angle frozen but continues to spin;
/// every other planet advances monotonically (mod 2π). The hovered star
/// freezes its rotation and holds the enlarged scale.
pub fn advance(scene: &mut SceneState, t: f64) {
    let tuning = scene.tuning;

    scene.star.time = t;
    if scene.star.hovered {
        scene.star.scale = tuning.star_hover_scale;
    } else {
        scene.star.rotation = (scene.star.rotation + tuning.star_spin_per_tick) % TAU;
        scene.star.scale = 1.0;
    }

    for planet in &mut scene.planets {
        if !planet.hovered {
            planet.angle = (planet.angle + planet.config.orbit_speed).rem_euclid(TAU);
        }
        planet.spin = (planet.spin + planet.config.rotation_speed).rem_euclid(TAU);

        let bob = (t + planet.angle).sin() * tuning.bob_amplitude;
        planet.position.x = planet.angle.cos() * planet.config.orbit_radius;
        planet.position.y = bob;
        planet.position.z = planet.angle.sin() * planet.config.orbit_radius;
    }

    scene.background.yaw = (scene.background.yaw + tuning.background_yaw_per_tick) % TAU;
    scene.accent.yaw = (scene.accent.yaw + tuning.accent_yaw_per_tick) % TAU;

    for stream in &mut scene.streams {
        stream.opacity = (0.2 + (t + stream.offset).sin() * 0.1) as f32;
    }

    let camera = &mut scene.camera;
    if camera.dragging {
        return;
    }
    if camera.spin_speed.abs() > CAMERA_SPIN_EPSILON {
        camera.rotation = axis_angle_matrix(camera.spin_axis, camera.spin_speed) * camera.rotation;
        camera.spin_speed *= CAMERA_DAMPING;
    } else {
        camera.spin_speed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_planets, SceneTuning};
    use crate::scene::SceneState;
    use crate::theme::Theme;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene() -> SceneState {
        let mut rng = StdRng::seed_from_u64(42);
        SceneState::build(default_planets(), SceneTuning::default(), Theme::Matrix, &mut rng)
    }

    #[test]
    fn test_hovered_angle_frozen() {
        let mut scene = scene();
        scene.set_hovered(Some(2));
        let frozen = scene.planets[2].angle;
        for i in 0..500 {
            advance(&mut scene, i as f64 * 0.016);
        }
        assert_eq!(scene.planets[2].angle, frozen);
    }

    #[test]
    fn test_unhovered_angle_advances() {
        let mut scene = scene();
        let before = scene.planets[0].angle;
        advance(&mut scene, 0.016);
        let after = scene.planets[0].angle;
        let step = (after - before).rem_euclid(TAU);
        assert!((step - scene.planets[0].config.orbit_speed).abs() < 1e-12);
    }

    #[test]
    fn test_spin_continues_while_hovered() {
        let mut scene = scene();
        scene.set_hovered(Some(0));
        let before = scene.planets[0].spin;
        advance(&mut scene, 0.016);
        assert!(scene.planets[0].spin > before);
    }

    #[test]
    fn test_star_freeze_and_scale_on_hover() {
        let mut scene = scene();
        advance(&mut scene, 0.016);
        let rotation = scene.star.rotation;
        assert!(rotation > 0.0);

        scene.star.hovered = true;
        advance(&mut scene, 0.032);
        assert_eq!(scene.star.rotation, rotation);
        assert_eq!(scene.star.scale, scene.tuning.star_hover_scale);

        scene.star.hovered = false;
        advance(&mut scene, 0.048);
        assert!(scene.star.rotation > rotation);
        assert_eq!(scene.star.scale, 1.0);
    }

    #[test]
    fn test_position_tracks_frozen_angle_with_bob() {
        let mut scene = scene();
        scene.set_hovered(Some(1));
        advance(&mut scene, 1.0);
        let planet = &scene.planets[1];
        let expected_x = planet.angle.cos() * planet.config.orbit_radius;
        assert!((planet.position.x - expected_x).abs() < 1e-12);
        let expected_bob = (1.0 + planet.angle).sin() * scene.tuning.bob_amplitude;
        assert!((planet.position.y - expected_bob).abs() < 1e-12);
    }

    #[test]
    fn test_stream_opacity_oscillates_in_band() {
        let mut scene = scene();
        for i in 0..200 {
            advance(&mut scene, i as f64 * 0.1);
            for stream in &scene.streams {
                assert!(stream.opacity >= 0.099 && stream.opacity <= 0.301);
            }
        }
    }

    #[test]
    fn test_camera_spin_decays_to_rest() {
        let mut scene = scene();
        scene.camera.spin_speed = 0.05;
        for i in 0..400 {
            advance(&mut scene, i as f64 * 0.016);
        }
        assert_eq!(scene.camera.spin_speed, 0.0);
    }

    #[test]
    fn test_star_pulse_band() {
        for i in 0..100 {
            let p = star_pulse(i as f64 * 0.13);
            assert!((0.9..=1.1).contains(&p));
        }
    }
}
