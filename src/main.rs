mod app;
mod clock;
mod config;
mod db;
mod error;
mod event;
mod form;
mod format;
mod models;
mod stats;
mod store;
mod timer;
mod ui;
mod validation;

use app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    config::init_logging()?;
    log::info!("starting studystone {}", env!("CARGO_PKG_VERSION"));

    let app = App::new()?;
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}
