//! Scene configuration: navigation planets and presentation tuning.
//!
//! Defines NavigationKind, PlanetConfig, the default planet set, and the
//! SceneTuning constants that shape particles, bobbing, and hover scaling.

use egui::Color32;

/// What clicking a planet does. Each variant carries only the payload it
/// needs; the click handler matches exhaustively.
#[derive(Clone, PartialEq, Debug)]
pub enum NavigationKind {
    Email { address: String },
    GitHub { url: String },
    Qq { numbers: Vec<String> },
    Link { url: String },
    Generic,
}

impl NavigationKind {
    pub fn category(&self) -> &'static str {
        match self {
            NavigationKind::Email { .. } => "Contact",
            NavigationKind::GitHub { .. } => "GitHub",
            NavigationKind::Qq { .. } => "Contact",
            NavigationKind::Link { .. } => "Link",
            NavigationKind::Generic => "Link",
        }
    }

    /// Contact-string list joined for clipboard transfer.
    pub fn joined_contacts(numbers: &[String]) -> String {
        numbers.join(" / ")
    }
}

#[derive(Clone, Debug)]
pub struct PlanetConfig {
    pub name: String,
    pub label: String,
    pub description: String,
    pub url_hint: String,
    pub kind: NavigationKind,
    pub radius: f64,
    pub orbit_radius: f64,
    pub orbit_speed: f64,
    pub rotation_speed: f64,
    pub color: Color32,
}

/// Presentation constants. These are tuning choices, kept together so they
/// read as configuration rather than scattered magic numbers.
#[derive(Clone, Copy, Debug)]
pub struct SceneTuning {
    pub star_radius: f64,
    pub ring_inner: f64,
    pub ring_outer: f64,
    pub bob_amplitude: f64,
    pub hover_scale: f64,
    pub star_hover_scale: f64,
    pub star_spin_per_tick: f64,
    pub particle_shell_min: f64,
    pub particle_shell_span: f64,
    pub particle_count_exponent: f64,
    pub particle_count_scale: f64,
    pub max_particles: usize,
    pub accent_star_count: usize,
    pub data_stream_count: usize,
    pub background_yaw_per_tick: f64,
    pub accent_yaw_per_tick: f64,
}

impl Default for SceneTuning {
    fn default() -> Self {
        Self {
            star_radius: 1.5,
            ring_inner: 2.0,
            ring_outer: 2.5,
            bob_amplitude: 0.3,
            hover_scale: 1.3,
            star_hover_scale: 1.15,
            star_spin_per_tick: 0.005,
            particle_shell_min: 5.0,
            particle_shell_span: 20.0,
            particle_count_exponent: 0.85,
            particle_count_scale: 40.0,
            max_particles: 10_000,
            accent_star_count: 100,
            data_stream_count: 20,
            background_yaw_per_tick: 0.0005,
            accent_yaw_per_tick: 0.001,
        }
    }
}

/// The six navigation nodes of the homepage, outermost last.
pub fn default_planets() -> Vec<PlanetConfig> {
    vec![
        PlanetConfig {
            name: "Mail".to_string(),
            label: "MAIL".to_string(),
            description: "Get in touch".to_string(),
            url_hint: "mailto:1473994304@qq.com".to_string(),
            kind: NavigationKind::Email { address: "1473994304@qq.com".to_string() },
            radius: 0.85,
            orbit_radius: 3.5,
            orbit_speed: 0.0025,
            rotation_speed: 0.012,
            color: Color32::from_rgb(0x66, 0xcc, 0xff),
        },
        PlanetConfig {
            name: "GitHub".to_string(),
            label: "GITHUB".to_string(),
            description: "My repositories".to_string(),
            url_hint: "https://github.com/internetsb".to_string(),
            kind: NavigationKind::GitHub { url: "https://github.com/internetsb".to_string() },
            radius: 0.95,
            orbit_radius: 5.0,
            orbit_speed: 0.002,
            rotation_speed: 0.01,
            color: Color32::from_rgb(0xff, 0xaa, 0x33),
        },
        PlanetConfig {
            name: "QQ".to_string(),
            label: "QQ".to_string(),
            description: "Get in touch".to_string(),
            url_hint: "Click to copy QQ numbers".to_string(),
            kind: NavigationKind::Qq {
                numbers: vec!["1523640161".to_string(), "3874540285".to_string()],
            },
            radius: 1.05,
            orbit_radius: 6.2,
            orbit_speed: 0.0018,
            rotation_speed: 0.009,
            color: Color32::from_rgb(0x88, 0xff, 0xaa),
        },
        PlanetConfig {
            name: "Quotes".to_string(),
            label: "SR".to_string(),
            description: "Quotes collection".to_string(),
            url_hint: "http://8.148.85.152:80".to_string(),
            kind: NavigationKind::Link { url: "http://8.148.85.152:80".to_string() },
            radius: 0.9,
            orbit_radius: 7.5,
            orbit_speed: 0.0016,
            rotation_speed: 0.009,
            color: Color32::from_rgb(0x66, 0xff, 0xcc),
        },
        PlanetConfig {
            name: "Journal".to_string(),
            label: "MY".to_string(),
            description: "Scattered notes".to_string(),
            url_hint: "http://8.148.85.152:9998".to_string(),
            kind: NavigationKind::Link { url: "http://8.148.85.152:9998".to_string() },
            radius: 1.1,
            orbit_radius: 8.8,
            orbit_speed: 0.0012,
            rotation_speed: 0.007,
            color: Color32::from_rgb(0xff, 0x77, 0xff),
        },
        PlanetConfig {
            name: "Gallery".to_string(),
            label: "PIC".to_string(),
            description: "Picture sharing".to_string(),
            url_hint: "http://8.148.85.152:9997".to_string(),
            kind: NavigationKind::Link { url: "http://8.148.85.152:9997".to_string() },
            radius: 0.85,
            orbit_radius: 10.0,
            orbit_speed: 0.001,
            rotation_speed: 0.01,
            color: Color32::from_rgb(0x77, 0xaa, 0xff),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_planets_ordered_by_orbit() {
        let planets = default_planets();
        assert_eq!(planets.len(), 6);
        for pair in planets.windows(2) {
            assert!(pair[0].orbit_radius < pair[1].orbit_radius);
        }
    }

    #[test]
    fn test_joined_contacts_separator() {
        let numbers = vec!["1523640161".to_string(), "3874540285".to_string()];
        assert_eq!(
            NavigationKind::joined_contacts(&numbers),
            "1523640161 / 3874540285"
        );
        assert_eq!(NavigationKind::joined_contacts(&numbers[..1]), "1523640161");
    }

    #[test]
    fn test_kind_payloads() {
        let planets = default_planets();
        match &planets[0].kind {
            NavigationKind::Email { address } => assert!(address.contains('@')),
            other => panic!("mail planet has kind {:?}", other),
        }
        match &planets[2].kind {
            NavigationKind::Qq { numbers } => assert_eq!(numbers.len(), 2),
            other => panic!("qq planet has kind {:?}", other),
        }
    }
}
