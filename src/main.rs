use anyhow::Result;
use dioxus::desktop::tao::dpi::LogicalSize;
use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;

use courtside::config::AppConfig;
use courtside::services::RosterService;
use courtside::storage;
use courtside::ui::App;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = AppConfig::load()?;

    // Pick the persistence backend before the UI comes up; the choice holds
    // for the whole session.
    let rt = tokio::runtime::Runtime::new()?;
    let backend = rt.block_on(storage::connect(&config))?;
    drop(rt);

    let service = RosterService::new(backend);

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title("Courtside - Tennis Roster")
                    .with_inner_size(LogicalSize::new(1200.0, 840.0)),
            ),
        )
        .with_context(service)
        .launch(App);

    Ok(())
}
