//! Scene state: the central star, its planets, and their decorations.
//!
//! Owns everything the animation clock advances and the painter draws. Hover
//! bookkeeping lives here so the single-hovered-planet invariant is enforced
//! in one place.

use crate::config::{PlanetConfig, SceneTuning};
use crate::math::tilt_matrix;
use crate::particles::{AccentField, ParticleField};
use crate::texture::{planet_texture, star_glow_texture};
use crate::theme::Theme;
use eframe::egui;
use nalgebra::{Matrix3, Vector3};
use rand::Rng;
use std::f64::consts::PI;

/// The singleton hub entity. `time` mirrors the shader time uniform of the
/// glow material; `color` is its primary-color uniform.
pub struct CentralStar {
    pub time: f64,
    pub rotation: f64,
    pub scale: f64,
    pub hovered: bool,
    pub color: egui::Color32,
    pub texture: Option<egui::TextureHandle>,
}

/// One orbiting navigation node.
pub struct Planet {
    pub config: PlanetConfig,
    pub angle: f64,
    pub spin: f64,
    pub hovered: bool,
    pub position: Vector3<f64>,
    pub texture: Option<egui::TextureHandle>,
}

impl Planet {
    fn at_angle(config: PlanetConfig, angle: f64) -> Self {
        let position = Vector3::new(
            angle.cos() * config.orbit_radius,
            0.0,
            angle.sin() * config.orbit_radius,
        );
        Self { config, angle, spin: 0.0, hovered: false, position, texture: None }
    }
}

/// Decorative spiral polyline with a time-oscillating opacity.
pub struct DataStream {
    pub points: Vec<Vector3<f64>>,
    pub offset: f64,
    pub opacity: f32,
}

/// Orbit camera: orthographic rotation plus zoom, with a decaying spin so
/// released drags glide to a stop.
pub struct Camera {
    pub rotation: Matrix3<f64>,
    pub zoom: f64,
    pub spin_axis: Vector3<f64>,
    pub spin_speed: f64,
    pub dragging: bool,
}

impl Camera {
    fn new() -> Self {
        Self {
            // Matches the original viewpoint: slightly above the orbit plane.
            rotation: tilt_matrix(0.32),
            zoom: 1.0,
            spin_axis: Vector3::new(0.0, 1.0, 0.0),
            spin_speed: 0.0,
            dragging: false,
        }
    }
}

pub struct SceneState {
    pub tuning: SceneTuning,
    pub star: CentralStar,
    pub planets: Vec<Planet>,
    pub streams: Vec<DataStream>,
    pub background: ParticleField,
    pub accent: AccentField,
    pub hovered: Option<usize>,
    pub camera: Camera,
}

impl SceneState {
    /// Builds the full scene: planets evenly spaced around their orbits,
    /// decorative streams, the accent star cloud, and an empty background
    /// field awaiting the first metric. An empty config yields a star-only
    /// scene.
    pub fn build(
        configs: Vec<PlanetConfig>,
        tuning: SceneTuning,
        theme: Theme,
        rng: &mut impl Rng,
    ) -> Self {
        let count = configs.len();
        let planets = configs
            .into_iter()
            .enumerate()
            .map(|(i, config)| Planet::at_angle(config, (i as f64 / count as f64) * PI * 2.0))
            .collect();

        let streams = (0..tuning.data_stream_count)
            .map(|i| {
                let segments = 10;
                let points = (0..=segments)
                    .map(|j| {
                        let progress = j as f64 / segments as f64;
                        let angle = progress * PI * 2.0 + i as f64 * 0.3;
                        let radius = 3.0 + (progress * PI * 4.0).sin() * 2.0;
                        Vector3::new(
                            angle.cos() * radius,
                            (progress - 0.5) * 4.0,
                            angle.sin() * radius,
                        )
                    })
                    .collect();
                DataStream {
                    points,
                    offset: rng.gen::<f64>() * PI * 2.0,
                    opacity: 0.3,
                }
            })
            .collect();

        Self {
            tuning,
            star: CentralStar {
                time: 0.0,
                rotation: 0.0,
                scale: 1.0,
                hovered: false,
                color: theme.palette().primary,
                texture: None,
            },
            planets,
            streams,
            background: ParticleField::default(),
            accent: AccentField::generate(tuning.accent_star_count, rng),
            hovered: None,
            camera: Camera::new(),
        }
    }

    /// Sets the hovered planet, clearing any previous one first. At most one
    /// planet is hovered at any instant.
    pub fn set_hovered(&mut self, index: Option<usize>) {
        if self.hovered == index {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            if let Some(planet) = self.planets.get_mut(prev) {
                planet.hovered = false;
            }
        }
        if let Some(next) = index {
            if let Some(planet) = self.planets.get_mut(next) {
                planet.hovered = true;
                self.hovered = Some(next);
            }
        }
    }

    pub fn hovered_planet(&self) -> Option<&Planet> {
        self.hovered.and_then(|i| self.planets.get(i))
    }

    /// Replaces the background field wholesale; the previous buffers are
    /// dropped before the new field is attached, so exactly one field is ever
    /// live.
    pub fn rebuild_background(&mut self, count: usize, theme: Theme, rng: &mut impl Rng) {
        self.background = ParticleField::generate(count, theme, &self.tuning, rng);
    }

    /// Re-derives the star's color uniform from the theme and invalidates its
    /// glow sprite so the next frame regenerates it.
    pub fn set_star_color(&mut self, theme: Theme) {
        self.star.color = theme.palette().primary;
        self.star.texture = None;
    }

    /// Uploads any missing sprites. Planet textures are generated once and
    /// kept across theme changes; the star glow follows the theme.
    pub fn ensure_textures(&mut self, ctx: &egui::Context) {
        if self.star.texture.is_none() {
            let image = star_glow_texture(self.star.color);
            self.star.texture =
                Some(ctx.load_texture("central-star", image, egui::TextureOptions::LINEAR));
        }
        for planet in &mut self.planets {
            if planet.texture.is_none() {
                let image = planet_texture(&planet.config.kind, planet.config.color);
                planet.texture = Some(ctx.load_texture(
                    format!("planet-{}", planet.config.label),
                    image,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }
    }
}
