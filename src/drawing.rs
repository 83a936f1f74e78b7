//! Scene painting and pointer handling.
//!
//! Projects the scene through the orbit camera onto an allocated painter:
//! particles, orbit guides, data streams, the ring, depth-sorted sprite quads
//! for star and planets, 2D labels, and the hover tooltip. Drag, scroll, and
//! click input is resolved here against the same projection the frame drew.

use crate::animate::star_pulse;
use crate::interact::{click_action, pick, ClickAction, Sprite};
use crate::math::{arcball_delta, axis_angle_matrix};
use crate::scene::SceneState;
use crate::theme::Palette;
use eframe::egui;
use egui::{Color32, Pos2, Stroke};
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::PI;

/// Half-height of the view in scene units at zoom 1.
const VIEW_EXTENT: f64 = 12.0;
const ARCBALL_RADIUS: f64 = 10.0;
const ORBIT_SEGMENTS: usize = 64;
const TOOLTIP_OFFSET: f32 = 20.0;

fn yaw_matrix(angle: f64) -> Matrix3<f64> {
    let (s, c) = (angle.sin(), angle.cos());
    Matrix3::new(
        c, 0.0, s,
        0.0, 1.0, 0.0,
        -s, 0.0, c,
    )
}

/// Textured quad rotated around its center, for planet and star sprites.
fn textured_quad(
    painter: &egui::Painter,
    texture: egui::TextureId,
    center: Pos2,
    half: f32,
    angle: f32,
    tint: Color32,
) {
    let (s, c) = angle.sin_cos();
    let rotate = |dx: f32, dy: f32| egui::vec2(dx * c - dy * s, dx * s + dy * c);
    let corners = [(-half, -half), (half, -half), (half, half), (-half, half)];
    let uvs = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

    let mut mesh = egui::Mesh::with_texture(texture);
    for ((dx, dy), (u, v)) in corners.iter().zip(uvs) {
        mesh.vertices.push(egui::epaint::Vertex {
            pos: center + rotate(*dx, *dy),
            uv: egui::pos2(u, v),
            color: tint,
        });
    }
    mesh.indices.extend_from_slice(&[0, 1, 2, 0, 2, 3]);
    painter.add(egui::Shape::mesh(mesh));
}

/// Paints one frame and resolves pointer input. Returns the click action, if
/// any; the caller performs the side effects.
pub fn draw_scene(
    ui: &mut egui::Ui,
    scene: &mut SceneState,
    palette: &Palette,
    about_visible: bool,
) -> Option<ClickAction> {
    let (response, painter) = ui.allocate_painter(
        ui.available_size(),
        egui::Sense::click_and_drag(),
    );
    let rect = response.rect;
    let painter = painter.with_clip_rect(rect);
    painter.rect_filled(rect, 0.0, palette.bg);

    let ppu = rect.height() as f64 / (2.0 * VIEW_EXTENT) * scene.camera.zoom;
    let center = rect.center();
    let cam = scene.camera.rotation;
    let project = |v: Vector3<f64>| -> (Pos2, f64) {
        let r = cam * v;
        (
            egui::pos2(
                center.x + (r.x * ppu) as f32,
                center.y - (r.y * ppu) as f32,
            ),
            r.z,
        )
    };

    // Background field, rotated by its own slow yaw under the camera.
    if !scene.background.is_empty() {
        let field_rot = cam * yaw_matrix(scene.background.yaw);
        let dot = ((0.05 * ppu) as f32).max(1.0);
        let mut shapes = Vec::with_capacity(scene.background.count);
        for i in 0..scene.background.count {
            let p = Vector3::new(
                scene.background.positions[i * 3] as f64,
                scene.background.positions[i * 3 + 1] as f64,
                scene.background.positions[i * 3 + 2] as f64,
            );
            let r = field_rot * p;
            let pos = egui::pos2(
                center.x + (r.x * ppu) as f32,
                center.y - (r.y * ppu) as f32,
            );
            if !rect.contains(pos) {
                continue;
            }
            let color = Color32::from_rgba_unmultiplied(
                (scene.background.colors[i * 3] * 255.0) as u8,
                (scene.background.colors[i * 3 + 1] * 255.0) as u8,
                (scene.background.colors[i * 3 + 2] * 255.0) as u8,
                153,
            );
            shapes.push(egui::Shape::circle_filled(pos, dot, color));
        }
        painter.extend(shapes);
    }

    // Accent star cloud.
    {
        let field_rot = cam * yaw_matrix(scene.accent.yaw);
        let color = Color32::from_rgba_unmultiplied(255, 255, 0, 204);
        let mut shapes = Vec::with_capacity(scene.accent.sizes.len());
        for (i, size) in scene.accent.sizes.iter().enumerate() {
            let p = Vector3::new(
                scene.accent.positions[i * 3] as f64,
                scene.accent.positions[i * 3 + 1] as f64,
                scene.accent.positions[i * 3 + 2] as f64,
            );
            let r = field_rot * p;
            let pos = egui::pos2(
                center.x + (r.x * ppu) as f32,
                center.y - (r.y * ppu) as f32,
            );
            shapes.push(egui::Shape::circle_filled(
                pos,
                (*size as f64 * ppu) as f32,
                color,
            ));
        }
        painter.extend(shapes);
    }

    // Orbit guides, one faint circle per planet.
    for planet in &scene.planets {
        let radius = planet.config.orbit_radius;
        let points: Vec<Pos2> = (0..=ORBIT_SEGMENTS)
            .map(|i| {
                let theta = (i as f64 / ORBIT_SEGMENTS as f64) * PI * 2.0;
                project(Vector3::new(theta.cos() * radius, 0.0, theta.sin() * radius)).0
            })
            .collect();
        let color = planet.config.color.gamma_multiply(0.1);
        painter.add(egui::Shape::line(points, Stroke::new(1.0, color)));
    }

    // Data streams with their oscillating opacity.
    for stream in &scene.streams {
        let points: Vec<Pos2> = stream.points.iter().map(|p| project(*p).0).collect();
        let color = palette.primary.gamma_multiply(stream.opacity);
        painter.add(egui::Shape::line(points, Stroke::new(1.0, color)));
    }

    // The star ring, drawn as its inner and outer edges.
    for radius in [scene.tuning.ring_inner, scene.tuning.ring_outer] {
        let points: Vec<Pos2> = (0..=ORBIT_SEGMENTS)
            .map(|i| {
                let theta = (i as f64 / ORBIT_SEGMENTS as f64) * PI * 2.0;
                project(Vector3::new(theta.cos() * radius, 0.0, theta.sin() * radius)).0
            })
            .collect();
        painter.add(egui::Shape::line(
            points,
            Stroke::new(1.5, scene.star.color.gamma_multiply(0.2)),
        ));
    }

    // Sprites, far to near: planets plus the central star.
    struct Drawn {
        center: Pos2,
        radius_px: f32,
        depth: f64,
        planet: Option<usize>,
    }
    let mut drawn: Vec<Drawn> = Vec::with_capacity(scene.planets.len() + 1);
    for (i, planet) in scene.planets.iter().enumerate() {
        let (pos, depth) = project(planet.position);
        let scale = if planet.hovered { scene.tuning.hover_scale } else { 1.0 };
        drawn.push(Drawn {
            center: pos,
            radius_px: (planet.config.radius * scale * ppu) as f32,
            depth,
            planet: Some(i),
        });
    }
    let star_scale = scene.star.scale * star_pulse(scene.star.time);
    drawn.push(Drawn {
        center: project(Vector3::zeros()).0,
        radius_px: (scene.tuning.star_radius * star_scale * ppu) as f32,
        depth: 0.0,
        planet: None,
    });
    drawn.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    for item in &drawn {
        match item.planet {
            Some(i) => {
                let planet = &scene.planets[i];
                if let Some(texture) = &planet.texture {
                    if planet.hovered {
                        // Emissive analogue: a soft halo in the planet color.
                        painter.circle_filled(
                            item.center,
                            item.radius_px * 1.25,
                            planet.config.color.gamma_multiply(0.25),
                        );
                    }
                    textured_quad(
                        &painter,
                        texture.id(),
                        item.center,
                        item.radius_px,
                        planet.spin as f32,
                        Color32::WHITE,
                    );
                    if planet.hovered {
                        painter.circle_stroke(
                            item.center,
                            item.radius_px + 3.0,
                            Stroke::new(2.0, planet.config.color),
                        );
                    }
                }
            }
            None => {
                if let Some(texture) = &scene.star.texture {
                    textured_quad(
                        &painter,
                        texture.id(),
                        item.center,
                        item.radius_px,
                        scene.star.rotation as f32,
                        Color32::WHITE,
                    );
                }
            }
        }
    }

    // 2D labels, positioned from this frame's transforms; far-side planets
    // hide theirs.
    for item in &drawn {
        let Some(i) = item.planet else { continue };
        let planet = &scene.planets[i];
        if item.depth < 0.0 {
            continue;
        }
        let opacity = if planet.hovered { 1.0 } else { 0.6 };
        let anchor = egui::pos2(item.center.x, item.center.y - item.radius_px - 16.0);
        painter.text(
            anchor,
            egui::Align2::CENTER_BOTTOM,
            &planet.config.label,
            egui::FontId::monospace(12.0),
            palette.text.gamma_multiply(opacity),
        );
        painter.text(
            egui::pos2(anchor.x, anchor.y + 11.0),
            egui::Align2::CENTER_TOP,
            planet.config.kind.category(),
            egui::FontId::proportional(9.0),
            palette.text.gamma_multiply(opacity * 0.7),
        );
    }

    // Hover resolution against the sprites just drawn.
    let sprites: Vec<Sprite> = drawn
        .iter()
        .filter_map(|d| {
            d.planet.map(|index| Sprite {
                index,
                center: d.center,
                radius: d.radius_px,
                depth: d.depth,
            })
        })
        .collect();
    let star_sprite = drawn.iter().find(|d| d.planet.is_none());

    let mut star_hit = false;
    if let Some(pointer) = response.hover_pos() {
        let hit = pick(pointer, &sprites);
        scene.set_hovered(hit);
        if hit.is_none() {
            if let Some(star) = star_sprite {
                let d = pointer - star.center;
                star_hit = d.x * d.x + d.y * d.y <= star.radius_px * star.radius_px;
            }
        }
        scene.star.hovered = star_hit;
        if hit.is_some() || star_hit {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
    } else {
        scene.set_hovered(None);
        scene.star.hovered = false;
    }

    // Tooltip for the hovered planet, clamped into the view.
    if let (Some(planet), Some(pointer)) = (scene.hovered_planet(), response.hover_pos()) {
        draw_tooltip(&painter, rect, pointer, palette, planet);
    }

    // Drag rotates the camera via the arcball; releasing leaves a damped
    // spin for the animation step to run down.
    let camera = &mut scene.camera;
    if response.dragged() && !response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            let prev = pos - response.drag_delta();
            let to_units = |p: Pos2| -> (f64, f64) {
                (
                    (p.x - center.x) as f64 / ppu,
                    -((p.y - center.y) as f64) / ppu,
                )
            };
            if let Some((axis, angle)) = arcball_delta(to_units(prev), to_units(pos), ARCBALL_RADIUS)
            {
                camera.rotation = axis_angle_matrix(axis, angle) * camera.rotation;
                camera.spin_axis = axis;
                camera.spin_speed = angle;
            }
        }
        camera.dragging = true;
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    } else if !response.dragged() {
        camera.dragging = false;
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            camera.zoom = (camera.zoom * (1.0 + scroll as f64 * 0.001)).clamp(0.3, 8.0);
        }
    }

    if response.clicked() {
        let star_clicked = if let Some(pos) = response.interact_pointer_pos() {
            star_sprite
                .map(|star| {
                    let d = pos - star.center;
                    d.x * d.x + d.y * d.y <= star.radius_px * star.radius_px
                })
                .unwrap_or(false)
        } else {
            false
        };
        return click_action(about_visible, star_clicked, scene.hovered);
    }

    None
}

fn draw_tooltip(
    painter: &egui::Painter,
    rect: egui::Rect,
    pointer: Pos2,
    palette: &Palette,
    planet: &crate::scene::Planet,
) {
    let title = painter.layout_no_wrap(
        planet.config.name.clone(),
        egui::FontId::proportional(14.0),
        palette.accent,
    );
    let meta = painter.layout_no_wrap(
        format!("{} · {}", planet.config.kind.category(), planet.config.url_hint),
        egui::FontId::monospace(11.0),
        palette.text.gamma_multiply(0.8),
    );
    let desc = painter.layout_no_wrap(
        planet.config.description.clone(),
        egui::FontId::monospace(12.0),
        palette.text,
    );
    let hint = painter.layout_no_wrap(
        "Click to navigate / copy".to_string(),
        egui::FontId::proportional(10.0),
        palette.text.gamma_multiply(0.5),
    );

    let galleys = [&title, &meta, &desc, &hint];
    let pad = 10.0;
    let gap = 4.0;
    let width = galleys.iter().map(|g| g.size().x).fold(180.0f32, f32::max) + pad * 2.0;
    let height =
        galleys.iter().map(|g| g.size().y).sum::<f32>() + gap * 3.0 + pad * 2.0;

    let mut corner = pointer + egui::vec2(TOOLTIP_OFFSET, TOOLTIP_OFFSET);
    if corner.x + width > rect.right() {
        corner.x = pointer.x - width - TOOLTIP_OFFSET;
    }
    if corner.y + height > rect.bottom() {
        corner.y = pointer.y - height - TOOLTIP_OFFSET;
    }

    let panel = egui::Rect::from_min_size(corner, egui::vec2(width, height));
    painter.rect_filled(panel, 10.0, palette.panel_bg);
    painter.rect_stroke(
        panel,
        10.0,
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 38)),
        egui::StrokeKind::Inside,
    );

    let mut cursor = corner + egui::vec2(pad, pad);
    for galley in galleys {
        let size = galley.size();
        painter.galley(cursor, galley.clone(), palette.text);
        cursor.y += size.y + gap;
    }
}
