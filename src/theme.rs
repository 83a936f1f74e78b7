//! Color themes and derived UI variables.
//!
//! A fixed registry of named palettes applied uniformly across the 3D scene
//! and the 2D panels. Everything color-dependent is re-derived wholesale on
//! every theme change.

use eframe::egui;
use egui::Color32;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Theme {
    Matrix,
    Neon,
    Solar,
    Arctic,
}

/// One named palette. Values mirror the site-wide CSS variables.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Palette {
    pub primary: Color32,
    pub secondary: Color32,
    pub accent: Color32,
    pub bg: Color32,
    pub panel_bg: Color32,
    pub text: Color32,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Matrix, Theme::Neon, Theme::Solar, Theme::Arctic];

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Matrix => "Matrix",
            Theme::Neon => "Neon Night",
            Theme::Solar => "Solar Flare",
            Theme::Arctic => "Arctic Ice",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Theme::Matrix => "matrix",
            Theme::Neon => "neon",
            Theme::Solar => "solar",
            Theme::Arctic => "arctic",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Matrix => "matrix-theme",
            Theme::Neon => "neon-theme",
            Theme::Solar => "solar-theme",
            Theme::Arctic => "arctic-theme",
        }
    }

    pub fn from_key(key: &str) -> Option<Theme> {
        Theme::ALL.iter().copied().find(|t| t.key() == key)
    }

    pub fn shortcut_hint(&self) -> &'static str {
        match self {
            Theme::Matrix => "Ctrl+1",
            Theme::Neon => "Ctrl+2",
            Theme::Solar => "Ctrl+3",
            Theme::Arctic => "Ctrl+4",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Matrix => Palette {
                primary: Color32::from_rgb(0x00, 0xff, 0x41),
                secondary: Color32::from_rgb(0x00, 0x8f, 0x11),
                accent: Color32::from_rgb(0x00, 0xd4, 0xff),
                bg: Color32::from_rgb(0x0a, 0x0a, 0x0a),
                panel_bg: Color32::from_rgba_unmultiplied(10, 20, 10, 178),
                text: Color32::from_rgb(0xe0, 0xe0, 0xe0),
            },
            Theme::Neon => Palette {
                primary: Color32::from_rgb(0xff, 0x00, 0xff),
                secondary: Color32::from_rgb(0x00, 0xff, 0xff),
                accent: Color32::from_rgb(0xff, 0x55, 0x00),
                bg: Color32::from_rgb(0x0a, 0x0a, 0x1a),
                panel_bg: Color32::from_rgba_unmultiplied(20, 10, 30, 178),
                text: Color32::from_rgb(0xf0, 0xf0, 0xff),
            },
            Theme::Solar => Palette {
                primary: Color32::from_rgb(0xff, 0xaa, 0x00),
                secondary: Color32::from_rgb(0xff, 0x55, 0x00),
                accent: Color32::from_rgb(0xff, 0xff, 0x00),
                bg: Color32::from_rgb(0x0a, 0x0a, 0x0a),
                panel_bg: Color32::from_rgba_unmultiplied(30, 20, 10, 178),
                text: Color32::from_rgb(0xff, 0xee, 0xdd),
            },
            Theme::Arctic => Palette {
                primary: Color32::from_rgb(0x00, 0xff, 0xff),
                secondary: Color32::from_rgb(0x88, 0xff, 0xff),
                accent: Color32::from_rgb(0xff, 0xff, 0xff),
                bg: Color32::from_rgb(0x00, 0x0a, 0x1a),
                panel_bg: Color32::from_rgba_unmultiplied(10, 20, 40, 178),
                text: Color32::from_rgb(0xe0, 0xf0, 0xff),
            },
        }
    }

    /// Base RGB triple for background particles, in [0,1] per channel.
    pub fn particle_base(&self) -> [f32; 3] {
        match self {
            Theme::Matrix => [0.0, 1.0, 0.2],
            Theme::Neon => [1.0, 0.0, 1.0],
            Theme::Solar => [1.0, 0.6, 0.0],
            Theme::Arctic => [0.0, 1.0, 1.0],
        }
    }
}

/// Derived variables mirroring the palette for non-3D UI, recomputed on every
/// theme change (the CSS custom-property analogue).
#[derive(Clone, Copy, Debug)]
pub struct ThemeVars {
    pub primary_rgb: [u8; 3],
    pub accent_rgb: [u8; 3],
    pub glow: Color32,
}

impl ThemeVars {
    pub fn derive(palette: &Palette) -> Self {
        let p = palette.primary;
        let a = palette.accent;
        Self {
            primary_rgb: [p.r(), p.g(), p.b()],
            accent_rgb: [a.r(), a.g(), a.b()],
            glow: Color32::from_rgba_unmultiplied(p.r(), p.g(), p.b(), 128),
        }
    }
}

/// Rewrites the egui visuals from the palette. The whole visual set is
/// rebuilt, never patched incrementally.
pub fn apply_visuals(ctx: &egui::Context, palette: &Palette) {
    let mut vis = egui::Visuals::dark();
    vis.window_fill = palette.bg;
    vis.panel_fill = palette.bg;
    vis.extreme_bg_color = palette.bg;
    vis.faint_bg_color = palette.panel_bg;
    vis.override_text_color = Some(palette.text);
    vis.hyperlink_color = palette.accent;
    vis.selection.bg_fill = palette.secondary.linear_multiply(0.4);
    vis.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, palette.primary);
    vis.widgets.active.bg_stroke = egui::Stroke::new(1.0, palette.accent);
    ctx.set_visuals(vis);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_key(theme.key()), Some(theme));
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert_eq!(Theme::from_key("vaporwave"), None);
        assert_eq!(Theme::from_key(""), None);
        assert_eq!(Theme::from_key("Matrix"), None);
    }

    #[test]
    fn test_palette_primaries() {
        assert_eq!(Theme::Matrix.palette().primary, Color32::from_rgb(0, 255, 65));
        assert_eq!(Theme::Neon.palette().primary, Color32::from_rgb(255, 0, 255));
        assert_eq!(Theme::Solar.palette().primary, Color32::from_rgb(255, 170, 0));
        assert_eq!(Theme::Arctic.palette().primary, Color32::from_rgb(0, 255, 255));
    }

    #[test]
    fn test_vars_derived_from_primary() {
        let vars = ThemeVars::derive(&Theme::Matrix.palette());
        assert_eq!(vars.primary_rgb, [0, 255, 65]);
        assert_eq!(vars.glow.a(), 128);
        assert_eq!(vars.glow.r(), 0);
        assert_eq!(vars.glow.g(), 255);
    }

    #[test]
    fn test_particle_base_in_unit_range() {
        for theme in Theme::ALL {
            for c in theme.particle_base() {
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }
}
