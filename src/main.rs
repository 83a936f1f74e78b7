//! Interactive 3D personal homepage: a pulsing central star orbited by
//! clickable navigation planets, over a particle field sized by a live
//! GitHub star count.

mod animate;
mod app;
mod config;
mod drawing;
mod github;
mod interact;
mod math;
mod panel;
mod particles;
mod scene;
mod terminal;
mod texture;
mod theme;

use app::App;
use eframe::egui;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Starfolio"),
        ..Default::default()
    };

    eframe::run_native(
        "Starfolio",
        options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
}
