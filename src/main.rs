mod components;
mod config;
mod error;
mod logging;
mod minigame;
mod model;
mod persistence;
mod profile;
mod reducer;
mod sync;
mod util;

use components::app::App;
use config::GameConfig;

fn main() {
    logging::init(&GameConfig::from_build_env().log_filter);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");
    yew::Renderer::<App>::new().render();
}
