//! Background and accent particle fields.
//!
//! The background field's size is driven by the external GitHub star count;
//! the accent field is a small fixed decoration around the central star.
//! Fields are regenerated wholesale on every theme or count change, never
//! edited in place.

use crate::config::SceneTuning;
use crate::theme::Theme;
use rand::Rng;
use std::f64::consts::PI;

/// A point cloud with flat position and color buffers, both `3 * count` long.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    pub count: usize,
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub yaw: f64,
}

impl ParticleField {
    /// Samples `count` particles on a spherical shell around the origin,
    /// colored by the theme base with per-channel noise in [-0.15, 0.15].
    pub fn generate(count: usize, theme: Theme, tuning: &SceneTuning, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);
        let base = theme.particle_base();

        for _ in 0..count {
            let radius = tuning.particle_shell_min + tuning.particle_shell_span * rng.gen::<f64>();
            let theta = rng.gen::<f64>() * PI * 2.0;
            let phi = (2.0 * rng.gen::<f64>() - 1.0).acos();

            positions.push((radius * phi.sin() * theta.cos()) as f32);
            positions.push((radius * phi.cos()) as f32);
            positions.push((radius * phi.sin() * theta.sin()) as f32);

            for channel in base {
                let noisy = channel + (rng.gen::<f32>() - 0.5) * 0.3;
                colors.push(noisy.clamp(0.0, 1.0));
            }
        }

        Self { count, positions, colors, yaw: 0.0 }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// The fixed decorative star cloud hugging the central star: positions on a
/// flattened annulus plus a per-point size.
#[derive(Clone, Debug, Default)]
pub struct AccentField {
    pub positions: Vec<f32>,
    pub sizes: Vec<f32>,
    pub yaw: f64,
}

impl AccentField {
    pub fn generate(count: usize, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        let mut sizes = Vec::with_capacity(count);

        for _ in 0..count {
            let radius = 2.0 + rng.gen::<f64>() * 8.0;
            let angle = rng.gen::<f64>() * PI * 2.0;
            let height = (rng.gen::<f64>() - 0.5) * 2.0;

            positions.push((angle.cos() * radius) as f32);
            positions.push(height as f32);
            positions.push((angle.sin() * radius) as f32);
            sizes.push(0.05 + rng.gen::<f32>() * 0.1);
        }

        Self { positions, sizes, yaw: 0.0 }
    }
}

/// Maps the external star count to a background particle count:
/// `floor(stars^exponent * scale)`, clamped to `[0, max_particles]`.
/// Deterministic and monotonically non-decreasing.
pub fn compute_particle_count(total_stars: u32, tuning: &SceneTuning) -> usize {
    if total_stars == 0 {
        return 0;
    }
    let target = (total_stars as f64)
        .powf(tuning.particle_count_exponent)
        * tuning.particle_count_scale;
    (target.floor() as usize).min(tuning.max_particles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tuning() -> SceneTuning {
        SceneTuning::default()
    }

    #[test]
    fn test_count_zero_at_zero() {
        assert_eq!(compute_particle_count(0, &tuning()), 0);
    }

    #[test]
    fn test_count_spot_value() {
        // floor(100^0.85 * 40) = 2004
        let expected = (100f64.powf(0.85) * 40.0).floor() as usize;
        assert_eq!(compute_particle_count(100, &tuning()), expected);
    }

    #[test]
    fn test_count_monotone_and_clamped() {
        let t = tuning();
        let mut prev = 0;
        for stars in [0u32, 1, 2, 5, 10, 50, 100, 500, 1000, 10_000, 1_000_000] {
            let count = compute_particle_count(stars, &t);
            assert!(count >= prev, "count decreased at {} stars", stars);
            assert!(count <= t.max_particles);
            prev = count;
        }
        assert_eq!(compute_particle_count(1_000_000, &t), t.max_particles);
    }

    #[test]
    fn test_generate_buffer_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::generate(250, Theme::Matrix, &tuning(), &mut rng);
        assert_eq!(field.count, 250);
        assert_eq!(field.positions.len(), 750);
        assert_eq!(field.colors.len(), 750);
    }

    #[test]
    fn test_generate_shell_and_color_bounds() {
        let t = tuning();
        let mut rng = StdRng::seed_from_u64(11);
        let field = ParticleField::generate(500, Theme::Neon, &t, &mut rng);
        for i in 0..field.count {
            let x = field.positions[i * 3] as f64;
            let y = field.positions[i * 3 + 1] as f64;
            let z = field.positions[i * 3 + 2] as f64;
            let r = (x * x + y * y + z * z).sqrt();
            assert!(r >= t.particle_shell_min - 1e-3);
            assert!(r <= t.particle_shell_min + t.particle_shell_span + 1e-3);
            for c in 0..3 {
                let v = field.colors[i * 3 + c];
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_empty_field() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = ParticleField::generate(0, Theme::Solar, &tuning(), &mut rng);
        assert!(field.is_empty());
        assert!(field.positions.is_empty());
    }

    #[test]
    fn test_accent_field_sizes() {
        let mut rng = StdRng::seed_from_u64(5);
        let field = AccentField::generate(100, &mut rng);
        assert_eq!(field.positions.len(), 300);
        assert_eq!(field.sizes.len(), 100);
        for s in &field.sizes {
            assert!((0.05..=0.15).contains(s));
        }
    }
}
