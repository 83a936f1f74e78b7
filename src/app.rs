//! Application shell and eframe integration.
//!
//! Owns the scene, the theme, the GitHub feed, and the overlays, and drives
//! everything from the per-frame update: poll the metric channel, advance the
//! animation step, paint the scene, dispatch clicks, render panels.

use crate::animate::advance;
use crate::config::{default_planets, SceneTuning};
use crate::drawing::draw_scene;
use crate::github::{GithubFeed, GithubStats};
use crate::interact::{navigate, ClickAction, EguiClipboard, NavCommand};
use crate::panel::{side_panel, PanelState};
use crate::particles::compute_particle_count;
use crate::scene::SceneState;
use crate::terminal::TerminalLog;
use crate::theme::{apply_visuals, Theme, ThemeVars};
use eframe::egui;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GITHUB_USERNAME: &str = "internetsb";
const THEME_KEY: &str = "starfolio_theme";
const VISIT_DATE_KEY: &str = "starfolio_visit_date";
const VISIT_COUNT_KEY: &str = "starfolio_visit_count";
const ACTIVITY_BARS: usize = 14;

/// Daily visit counter: same-day launches increment, a new day starts over.
fn bump_visits(stored: Option<(&str, u32)>, today: &str) -> u32 {
    match stored {
        Some((date, count)) if date == today => count + 1,
        _ => 1,
    }
}

/// Recomputes the background particle count from the star total and rebuilds
/// the field. Returns the count so the caller can remember it across theme
/// changes.
fn apply_metric_update(
    scene: &mut SceneState,
    theme: Theme,
    total_stars: u32,
    rng: &mut impl Rng,
) -> usize {
    let count = compute_particle_count(total_stars, &scene.tuning);
    scene.rebuild_background(count, theme, rng);
    count
}

/// Recolors the star and regenerates the background field at the current
/// target count under the new palette.
fn apply_theme_change(
    scene: &mut SceneState,
    theme: Theme,
    particle_count: usize,
    rng: &mut impl Rng,
) {
    scene.set_star_color(theme);
    scene.rebuild_background(particle_count, theme, rng);
}

pub struct App {
    scene: SceneState,
    theme: Theme,
    vars: ThemeVars,
    terminal: TerminalLog,
    feed: GithubFeed,
    stats: Option<GithubStats>,
    particle_count: usize,
    about_visible: bool,
    alert: Option<String>,
    visitors: u32,
    visit_date: String,
    activity: Vec<f32>,
    rng: StdRng,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut rng = StdRng::from_entropy();

        let theme = cc
            .storage
            .and_then(|s| s.get_string(THEME_KEY))
            .and_then(|key| Theme::from_key(&key))
            .unwrap_or(Theme::Matrix);

        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let stored = cc.storage.and_then(|s| {
            let date = s.get_string(VISIT_DATE_KEY)?;
            let count = s.get_string(VISIT_COUNT_KEY)?.parse().ok()?;
            Some((date, count))
        });
        let visitors = bump_visits(stored.as_ref().map(|(d, c)| (d.as_str(), *c)), &today);

        let scene = SceneState::build(default_planets(), SceneTuning::default(), theme, &mut rng);

        let mut terminal = TerminalLog::default();
        terminal.append_line("> system online");
        terminal.append_line(format!("> scene initialized: {} planets", scene.planets.len()));
        terminal.append_line(format!("> theme: {}", theme.label()));
        terminal.append_line("> fetching GitHub stats...");

        let mut feed = GithubFeed::new(GITHUB_USERNAME);
        feed.refresh();

        let activity = (0..ACTIVITY_BARS).map(|_| rng.gen::<f32>()).collect();

        Self {
            scene,
            theme,
            vars: ThemeVars::derive(&theme.palette()),
            terminal,
            feed,
            stats: None,
            particle_count: 0,
            about_visible: false,
            alert: None,
            visitors,
            visit_date: today,
            activity,
            rng,
        }
    }

    /// External event: a theme-name string arrived (panel click or shortcut).
    /// Unknown names are logged and ignored.
    pub fn on_theme_changed(&mut self, key: &str) {
        let Some(theme) = Theme::from_key(key) else {
            log::warn!("unknown theme: {}", key);
            self.terminal.append_line(format!("> unknown theme: {}", key));
            return;
        };
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        self.vars = ThemeVars::derive(&theme.palette());
        apply_theme_change(&mut self.scene, theme, self.particle_count, &mut self.rng);
        self.terminal.append_line(format!("> theme switched: {}", theme.label()));
    }

    /// External event: a new star total arrived; rescale the background
    /// field.
    pub fn on_metric_changed(&mut self, total_stars: u32) {
        self.particle_count =
            apply_metric_update(&mut self.scene, self.theme, total_stars, &mut self.rng);
        self.terminal.append_line(format!(
            "> background particles from {} GitHub stars: {}",
            total_stars, self.particle_count
        ));
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let pressed = ctx.input(|i| {
            if !i.modifiers.ctrl {
                return None;
            }
            [
                (egui::Key::Num1, Theme::Matrix),
                (egui::Key::Num2, Theme::Neon),
                (egui::Key::Num3, Theme::Solar),
                (egui::Key::Num4, Theme::Arctic),
            ]
            .into_iter()
            .find(|(key, _)| i.key_pressed(*key))
            .map(|(_, theme)| theme)
        });
        if let Some(theme) = pressed {
            self.terminal.append_line(format!(
                "> shortcut: {} ({})",
                theme.label(),
                theme.shortcut_hint()
            ));
            self.on_theme_changed(theme.key());
        }
    }

    fn dispatch_click(&mut self, ctx: &egui::Context, action: ClickAction) {
        match action {
            ClickAction::OpenAbout => {
                self.about_visible = true;
                self.terminal.append_line("> opening about panel");
            }
            ClickAction::Navigate { planet } => {
                let Some(planet) = self.scene.planets.get(planet) else {
                    return;
                };
                let name = planet.config.name.clone();
                let kind = planet.config.kind.clone();
                self.terminal.append_line(format!("> navigating to: {}", name));
                let mut clipboard = EguiClipboard { ctx };
                match navigate(&kind, &mut clipboard) {
                    NavCommand::OpenUrl { url, new_tab } => {
                        if new_tab {
                            ctx.open_url(egui::OpenUrl::new_tab(url));
                        } else {
                            ctx.open_url(egui::OpenUrl::same_tab(url));
                        }
                    }
                    NavCommand::Copied { joined } => {
                        self.terminal.append_line(format!("> QQ numbers copied: {}", joined));
                    }
                    NavCommand::Alert { joined } => {
                        self.alert = Some(joined);
                    }
                    NavCommand::None => {}
                }
            }
        }
    }

    fn show_overlays(&mut self, ctx: &egui::Context) {
        let palette = self.theme.palette();
        if self.about_visible {
            let mut open = true;
            egui::Window::new(egui::RichText::new("ABOUT ME").color(palette.primary))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(egui::RichText::new("Hi, I'm internetsb.").strong());
                    ui.label("A not-so-serious CS student and heavy AI-coding user.");
                    ui.label(
                        "Every planet in this system is one of my sites or contact \
                         methods. The starfield behind them is my GitHub star count.",
                    );
                });
            if !open {
                self.about_visible = false;
            }
        }

        if let Some(joined) = self.alert.clone() {
            egui::Window::new("QQ")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(egui::RichText::new(format!("QQ: {}", joined)).monospace());
                    if ui.button("OK").clicked() {
                        self.alert = None;
                    }
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(update) = self.feed.poll() {
            if update.substituted {
                self.terminal.append_line("> GitHub unreachable, using fallback stats");
            } else {
                self.terminal.append_line(format!(
                    "> GitHub stats: {} repos, {} stars, {} followers",
                    update.stats.repo_count, update.stats.total_stars, update.stats.followers
                ));
            }
            self.stats = Some(update.stats);
            self.on_metric_changed(update.stats.total_stars);
        }

        self.handle_shortcuts(ctx);

        let palette = self.theme.palette();
        apply_visuals(ctx, &palette);
        self.scene.ensure_textures(ctx);

        if let Some(theme) = side_panel(
            ctx,
            PanelState {
                theme: self.theme,
                palette: &palette,
                vars: &self.vars,
                metric_state: &self.feed.state,
                stats: self.stats,
                activity: &self.activity,
                visitors: self.visitors,
                terminal: &self.terminal,
            },
        ) {
            self.on_theme_changed(theme.key());
        }

        let t = ctx.input(|i| i.time);
        let action = egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(palette.bg))
            .show(ctx, |ui| {
                // State advances before painting so labels and hit-tests see
                // this frame's transforms.
                advance(&mut self.scene, t);
                draw_scene(ui, &mut self.scene, &palette, self.about_visible)
            })
            .inner;

        if let Some(action) = action {
            self.dispatch_click(ctx, action);
        }

        self.show_overlays(ctx);
        ctx.request_repaint();
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(THEME_KEY, self.theme.key().to_string());
        storage.set_string(VISIT_DATE_KEY, self.visit_date.clone());
        storage.set_string(VISIT_COUNT_KEY, self.visitors.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bump_visits_same_day_increments() {
        assert_eq!(bump_visits(Some(("2026-08-06", 4)), "2026-08-06"), 5);
    }

    #[test]
    fn test_bump_visits_new_day_resets() {
        assert_eq!(bump_visits(Some(("2026-08-05", 9)), "2026-08-06"), 1);
        assert_eq!(bump_visits(None, "2026-08-06"), 1);
    }

    #[test]
    fn test_metric_then_theme_preserves_count() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut scene = SceneState::build(
            default_planets(),
            SceneTuning::default(),
            Theme::Matrix,
            &mut rng,
        );

        let count = apply_metric_update(&mut scene, Theme::Matrix, 100, &mut rng);
        assert_eq!(count, compute_particle_count(100, &scene.tuning));
        assert_eq!(scene.background.count, count);

        apply_theme_change(&mut scene, Theme::Neon, count, &mut rng);
        assert_eq!(scene.background.count, count, "count survives theme change");
        assert_eq!(scene.star.color, Theme::Neon.palette().primary);
    }

    #[test]
    fn test_metric_zero_clears_field() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut scene = SceneState::build(
            default_planets(),
            SceneTuning::default(),
            Theme::Matrix,
            &mut rng,
        );
        apply_metric_update(&mut scene, Theme::Matrix, 500, &mut rng);
        assert!(!scene.background.is_empty());
        let count = apply_metric_update(&mut scene, Theme::Matrix, 0, &mut rng);
        assert_eq!(count, 0);
        assert!(scene.background.is_empty());
    }
}
