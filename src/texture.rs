//! Procedural planet and star textures.
//!
//! Pure CPU pixel-buffer generators: each planet gets a radial-gradient disc
//! in its own color with a glyph chosen by navigation kind, the central star
//! gets a pulsing glow sprite. No rendering context is required, so the
//! generators are unit-testable.

use crate::config::NavigationKind;
use eframe::egui;
use egui::Color32;

pub const TEXTURE_SIZE: usize = 256;

fn mix(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        mix(a.r(), b.r(), t),
        mix(a.g(), b.g(), t),
        mix(a.b(), b.b(), t),
        mix(a.a(), b.a(), t),
    )
}

fn lighten(c: Color32, amount: f32) -> Color32 {
    lerp_color(c, Color32::WHITE, amount)
}

fn darken(c: Color32, amount: f32) -> Color32 {
    lerp_color(c, Color32::BLACK, amount)
}

fn white(alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, (alpha * 255.0) as u8)
}

fn black(alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(0, 0, 0, (alpha * 255.0) as u8)
}

/// Source-over blend of `src` onto the buffer pixel.
fn blend(buf: &mut [Color32], idx: usize, src: Color32) {
    let dst = buf[idx];
    let sa = src.a() as f32 / 255.0;
    if sa <= 0.0 {
        return;
    }
    let da = dst.a() as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return;
    }
    let ch = |s: u8, d: u8| -> u8 {
        let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        v.round().clamp(0.0, 255.0) as u8
    };
    buf[idx] = Color32::from_rgba_unmultiplied(
        ch(src.r(), dst.r()),
        ch(src.g(), dst.g()),
        ch(src.b(), dst.b()),
        (out_a * 255.0).round() as u8,
    );
}

fn fill_circle(buf: &mut [Color32], size: usize, cx: f32, cy: f32, r: f32, color: Color32) {
    fill_ellipse(buf, size, cx, cy, r, r, color);
}

fn fill_ellipse(buf: &mut [Color32], size: usize, cx: f32, cy: f32, rx: f32, ry: f32, color: Color32) {
    let x0 = ((cx - rx).floor().max(0.0)) as usize;
    let x1 = ((cx + rx).ceil().min(size as f32 - 1.0)) as usize;
    let y0 = ((cy - ry).floor().max(0.0)) as usize;
    let y1 = ((cy + ry).ceil().min(size as f32 - 1.0)) as usize;
    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = (px as f32 - cx) / rx;
            let dy = (py as f32 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                blend(buf, py * size + px, color);
            }
        }
    }
}

/// Stroked circular arc. Angles in radians, y-down convention; the range may
/// exceed 2π to close the circle.
fn stroke_arc(
    buf: &mut [Color32],
    size: usize,
    cx: f32,
    cy: f32,
    r: f32,
    width: f32,
    a0: f32,
    a1: f32,
    color: Color32,
) {
    use std::f32::consts::TAU;
    let half = width / 2.0;
    let outer = r + half;
    let x0 = ((cx - outer).floor().max(0.0)) as usize;
    let x1 = ((cx + outer).ceil().min(size as f32 - 1.0)) as usize;
    let y0 = ((cy - outer).floor().max(0.0)) as usize;
    let y1 = ((cy + outer).ceil().min(size as f32 - 1.0)) as usize;
    let full = (a1 - a0) >= TAU;
    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f32 - cx;
            let dy = py as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if (dist - r).abs() > half {
                continue;
            }
            if !full {
                let mut ang = dy.atan2(dx);
                while ang < a0 {
                    ang += TAU;
                }
                if ang > a1 {
                    continue;
                }
            }
            blend(buf, py * size + px, color);
        }
    }
}

fn thick_line(
    buf: &mut [Color32],
    size: usize,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    width: f32,
    color: Color32,
) {
    let half = width / 2.0;
    let min_x = (x0.min(x1) - half).floor().max(0.0) as usize;
    let max_x = (x0.max(x1) + half).ceil().min(size as f32 - 1.0) as usize;
    let min_y = (y0.min(y1) - half).floor().max(0.0) as usize;
    let max_y = (y0.max(y1) + half).ceil().min(size as f32 - 1.0) as usize;
    let (dx, dy) = (x1 - x0, y1 - y0);
    let len_sq = dx * dx + dy * dy;
    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let (vx, vy) = (px as f32 - x0, py as f32 - y0);
            let t = if len_sq > 0.0 {
                ((vx * dx + vy * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (ex, ey) = (vx - t * dx, vy - t * dy);
            if ex * ex + ey * ey <= half * half {
                blend(buf, py * size + px, color);
            }
        }
    }
}

fn fill_triangle(
    buf: &mut [Color32],
    size: usize,
    a: (f32, f32),
    b: (f32, f32),
    c: (f32, f32),
    color: Color32,
) {
    let min_x = a.0.min(b.0).min(c.0).floor().max(0.0) as usize;
    let max_x = a.0.max(b.0).max(c.0).ceil().min(size as f32 - 1.0) as usize;
    let min_y = a.1.min(b.1).min(c.1).floor().max(0.0) as usize;
    let max_y = a.1.max(b.1).max(c.1).ceil().min(size as f32 - 1.0) as usize;
    let edge = |p: (f32, f32), q: (f32, f32), r: (f32, f32)| -> f32 {
        (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
    };
    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let p = (px as f32, py as f32);
            let w0 = edge(a, b, p);
            let w1 = edge(b, c, p);
            let w2 = edge(c, a, p);
            let all_pos = w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0;
            let all_neg = w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0;
            if all_pos || all_neg {
                blend(buf, py * size + px, color);
            }
        }
    }
}

/// Radial-gradient disc: lighter toward the off-center highlight, darker at
/// the rim, with a faint white outline ring.
fn paint_disc(buf: &mut [Color32], size: usize, color: Color32) {
    let s = size as f32;
    let center = s / 2.0;
    let disc_r = center - 2.0;
    let (fx, fy) = (s * 0.35, s * 0.35);
    let lighter = lighten(color, 0.3);
    let darker = darken(color, 0.3);

    for py in 0..size {
        for px in 0..size {
            let dxc = px as f32 - center;
            let dyc = py as f32 - center;
            if dxc * dxc + dyc * dyc > disc_r * disc_r {
                continue;
            }
            let dxf = px as f32 - fx;
            let dyf = py as f32 - fy;
            let t = ((dxf * dxf + dyf * dyf).sqrt() / s).clamp(0.0, 1.0);
            let rgb = if t < 0.5 {
                lerp_color(lighter, color, t * 2.0)
            } else {
                lerp_color(color, darker, (t - 0.5) * 2.0)
            };
            let alpha = 0.95 - 0.15 * t;
            buf[py * size + px] = Color32::from_rgba_unmultiplied(
                rgb.r(),
                rgb.g(),
                rgb.b(),
                (alpha * 255.0) as u8,
            );
        }
    }

    stroke_arc(
        buf,
        size,
        center,
        center,
        center - 6.0,
        4.0,
        0.0,
        std::f32::consts::TAU,
        white(0.18),
    );
}

fn paint_envelope(buf: &mut [Color32], size: usize) {
    let c = size as f32 / 2.0;
    let (w, h) = (120.0, 80.0);
    let stroke = white(0.9);
    let (l, r, t, b) = (c - w / 2.0, c + w / 2.0, c - h / 2.0, c + h / 2.0);
    thick_line(buf, size, l, t, r, t, 6.0, stroke);
    thick_line(buf, size, l, b, r, b, 6.0, stroke);
    thick_line(buf, size, l, t, l, b, 6.0, stroke);
    thick_line(buf, size, r, t, r, b, 6.0, stroke);
    thick_line(buf, size, l, t, c, c, 6.0, stroke);
    thick_line(buf, size, r, t, c, c, 6.0, stroke);
}

fn paint_octocat(buf: &mut [Color32], size: usize) {
    let c = size as f32 / 2.0;
    let body = black(0.55);
    fill_circle(buf, size, c, c - 20.0, 55.0, body);
    fill_ellipse(buf, size, c, c + 10.0, 48.0, 35.0, body);
    for sx in [-1.0f32, 1.0] {
        fill_circle(buf, size, c + sx * 18.0, c - 5.0, 7.0, white(0.95));
        fill_circle(buf, size, c + sx * 18.0, c - 5.0, 3.0, black(0.9));
    }
}

fn paint_penguin(buf: &mut [Color32], size: usize) {
    let c = size as f32 / 2.0;
    fill_ellipse(buf, size, c, c + 10.0, 45.0, 60.0, black(0.75));
    fill_circle(buf, size, c, c - 10.0, 25.0, white(0.9));
    fill_triangle(
        buf,
        size,
        (c - 10.0, c),
        (c, c + 10.0),
        (c + 10.0, c),
        Color32::from_rgba_unmultiplied(255, 165, 0, 242),
    );
}

fn paint_abstract_rings(buf: &mut [Color32], size: usize) {
    use std::f32::consts::PI;
    let c = size as f32 / 2.0;
    let tilt = -PI / 6.0;
    stroke_arc(
        buf,
        size,
        c,
        c,
        c - 30.0,
        5.0,
        PI * 0.1 + tilt,
        PI * 0.9 + tilt,
        white(0.15),
    );
    for i in 0..3 {
        let r = c - 50.0 - i as f32 * 18.0;
        stroke_arc(
            buf,
            size,
            c,
            c,
            r,
            2.0,
            PI * 0.2 * i as f32,
            PI * (1.2 + 0.2 * i as f32),
            white(0.09),
        );
    }
    for i in -2i32..=2 {
        let y = c + i as f32 * 18.0;
        thick_line(buf, size, 0.0, y, size as f32 - 1.0, y, 2.0, white(0.08));
    }
}

/// Clears everything outside the disc so the sprite composites cleanly.
fn mask_to_disc(buf: &mut [Color32], size: usize) {
    let center = size as f32 / 2.0;
    let r = center - 2.0;
    for py in 0..size {
        for px in 0..size {
            let dx = px as f32 - center;
            let dy = py as f32 - center;
            if dx * dx + dy * dy > r * r {
                buf[py * size + px] = Color32::TRANSPARENT;
            }
        }
    }
}

/// Generates the sprite for one planet: gradient disc plus a kind-specific
/// glyph (envelope, octocat, penguin, or abstract arcs).
pub fn planet_texture(kind: &NavigationKind, color: Color32) -> egui::ColorImage {
    let size = TEXTURE_SIZE;
    let mut buf = vec![Color32::TRANSPARENT; size * size];
    paint_disc(&mut buf, size, color);
    match kind {
        NavigationKind::Email { .. } => paint_envelope(&mut buf, size),
        NavigationKind::GitHub { .. } => paint_octocat(&mut buf, size),
        NavigationKind::Qq { .. } => paint_penguin(&mut buf, size),
        NavigationKind::Link { .. } | NavigationKind::Generic => {
            paint_abstract_rings(&mut buf, size)
        }
    }
    mask_to_disc(&mut buf, size);
    egui::ColorImage {
        size: [size, size],
        pixels: buf,
        source_size: egui::Vec2::ZERO,
    }
}

/// Glow sprite for the central star: white-hot core fading through the theme
/// primary to transparent. Regenerated only when the theme changes; the
/// per-frame pulse scales the quad instead.
pub fn star_glow_texture(primary: Color32) -> egui::ColorImage {
    let size = TEXTURE_SIZE;
    let mut buf = vec![Color32::TRANSPARENT; size * size];
    let center = size as f32 / 2.0;
    for py in 0..size {
        for px in 0..size {
            let dx = (px as f32 - center) / center;
            let dy = (py as f32 - center) / center;
            let d = (dx * dx + dy * dy).sqrt();
            if d >= 1.0 {
                continue;
            }
            let falloff = (1.0 - d).powi(2);
            let rgb = lerp_color(Color32::WHITE, primary, (d * 2.2).clamp(0.0, 1.0));
            let alpha = (0.25 + 0.75 * falloff).min(1.0);
            buf[py * size + px] = Color32::from_rgba_unmultiplied(
                rgb.r(),
                rgb.g(),
                rgb.b(),
                (alpha * 255.0) as u8,
            );
        }
    }
    egui::ColorImage {
        size: [size, size],
        pixels: buf,
        source_size: egui::Vec2::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center_pixel(img: &egui::ColorImage) -> Color32 {
        img.pixels[(TEXTURE_SIZE / 2) * TEXTURE_SIZE + TEXTURE_SIZE / 2]
    }

    #[test]
    fn test_planet_texture_dimensions() {
        let img = planet_texture(&NavigationKind::Generic, Color32::from_rgb(0x66, 0xcc, 0xff));
        assert_eq!(img.size, [TEXTURE_SIZE, TEXTURE_SIZE]);
        assert_eq!(img.pixels.len(), TEXTURE_SIZE * TEXTURE_SIZE);
    }

    #[test]
    fn test_planet_texture_corners_transparent() {
        let img = planet_texture(
            &NavigationKind::Email { address: "a@b".to_string() },
            Color32::from_rgb(0x66, 0xcc, 0xff),
        );
        assert_eq!(img.pixels[0].a(), 0);
        assert_eq!(img.pixels[TEXTURE_SIZE - 1].a(), 0);
        assert_eq!(img.pixels[img.pixels.len() - 1].a(), 0);
    }

    #[test]
    fn test_planet_texture_center_opaque() {
        let img = planet_texture(&NavigationKind::Generic, Color32::from_rgb(0x88, 0xff, 0xaa));
        assert!(center_pixel(&img).a() > 100);
    }

    #[test]
    fn test_planet_texture_deterministic() {
        let kind = NavigationKind::Qq { numbers: vec!["1".to_string()] };
        let color = Color32::from_rgb(0x88, 0xff, 0xaa);
        let a = planet_texture(&kind, color);
        let b = planet_texture(&kind, color);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_glyphs_differ_by_kind() {
        let color = Color32::from_rgb(0x66, 0xcc, 0xff);
        let mail = planet_texture(&NavigationKind::Email { address: "a@b".to_string() }, color);
        let hub = planet_texture(
            &NavigationKind::GitHub { url: "https://example.com".to_string() },
            color,
        );
        assert_ne!(mail.pixels, hub.pixels);
    }

    #[test]
    fn test_star_glow_core_and_edge() {
        let img = star_glow_texture(Color32::from_rgb(0, 255, 65));
        let core = center_pixel(&img);
        assert!(core.a() > 200);
        assert!(core.r() > 200 && core.g() > 200);
        assert_eq!(img.pixels[0].a(), 0);
    }
}
