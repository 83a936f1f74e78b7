//! Side-panel UI: theme switching, GitHub stats, visitor counter, and the
//! terminal readout.

use crate::github::{GithubStats, MetricLoadState};
use crate::terminal::TerminalLog;
use crate::theme::{Palette, Theme, ThemeVars};
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

pub struct PanelState<'a> {
    pub theme: Theme,
    pub palette: &'a Palette,
    pub vars: &'a ThemeVars,
    pub metric_state: &'a MetricLoadState,
    pub stats: Option<GithubStats>,
    pub activity: &'a [f32],
    pub visitors: u32,
    pub terminal: &'a TerminalLog,
}

/// Renders the right-hand panel. Returns the theme the user picked, if any.
pub fn side_panel(ctx: &egui::Context, state: PanelState<'_>) -> Option<Theme> {
    let mut picked = None;
    let palette = state.palette;

    egui::SidePanel::right("status_panel")
        .resizable(false)
        .exact_width(260.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            let [pr, pg, pb] = state.vars.primary_rgb;
            ui.label(
                egui::RichText::new("STARFOLIO")
                    .strong()
                    .size(18.0)
                    .color(egui::Color32::from_rgb(pr, pg, pb)),
            );
            let title_rect = ui.min_rect();
            ui.painter().line_segment(
                [title_rect.left_bottom(), title_rect.right_bottom()],
                egui::Stroke::new(1.0, state.vars.glow),
            );
            ui.label(
                egui::RichText::new(format!("visitors today: {}", state.visitors))
                    .weak()
                    .size(11.0),
            );

            ui.separator();
            ui.label(egui::RichText::new("Theme").strong());
            for theme in Theme::ALL {
                let selected = theme == state.theme;
                let swatch = theme.palette().primary;
                ui.horizontal(|ui| {
                    let (dot, _) =
                        ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    ui.painter().circle_filled(dot.center(), 4.0, swatch);
                    let label = format!("{}  ({})", theme.label(), theme.shortcut_hint());
                    if ui.selectable_label(selected, label).clicked() && !selected {
                        picked = Some(theme);
                    }
                });
            }

            ui.separator();
            ui.label(egui::RichText::new("GitHub").strong());
            let status = match state.metric_state {
                MetricLoadState::NotLoaded | MetricLoadState::Loading => "SYNCING...",
                MetricLoadState::Loaded(_) => "LIVE",
                MetricLoadState::Failed(_) => "OFFLINE · showing fallback",
            };
            ui.label(egui::RichText::new(status).weak().size(10.0));
            if let Some(stats) = state.stats {
                egui::Grid::new("gh_stats").num_columns(2).show(ui, |ui| {
                    ui.label("Repositories");
                    ui.label(egui::RichText::new(stats.repo_count.to_string()).monospace());
                    ui.end_row();
                    ui.label("Total stars");
                    ui.label(egui::RichText::new(stats.total_stars.to_string()).monospace());
                    ui.end_row();
                    ui.label("Followers");
                    ui.label(egui::RichText::new(stats.followers.to_string()).monospace());
                    ui.end_row();
                });
            }

            if !state.activity.is_empty() {
                let points: PlotPoints = state
                    .activity
                    .iter()
                    .enumerate()
                    .map(|(i, v)| [i as f64, *v as f64])
                    .collect();
                Plot::new("activity_sparkline")
                    .height(48.0)
                    .show_axes(false)
                    .show_grid(false)
                    .show_x(false)
                    .show_y(false)
                    .allow_drag(false)
                    .allow_zoom(false)
                    .allow_scroll(false)
                    .allow_boxed_zoom(false)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new("", points).color(palette.accent));
                    });
            }

            ui.separator();
            ui.label(egui::RichText::new("Terminal").strong());
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for line in state.terminal.lines() {
                        ui.label(
                            egui::RichText::new(line)
                                .monospace()
                                .size(11.0)
                                .color(palette.primary),
                        );
                    }
                });
        });

    picked
}
