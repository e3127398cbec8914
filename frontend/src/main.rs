mod bootstrap;
mod dom;
mod error;
mod scheduler;
mod services;

use anyhow::{Context, Result};
use services::logging::{self, Logger};

fn run() -> Result<()> {
    let installed = bootstrap::install().context("wiring page panels")?;
    Logger::info_with_component(
        "bootstrap",
        &format!("{} panel controller(s) installed", installed.count()),
    );
    let statuses = serde_json::to_string(&installed.statuses()).context("encoding panel status")?;
    Logger::debug_with_component("bootstrap", &format!("panel status {statuses}"));
    Ok(())
}

fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    if let Err(err) = run() {
        Logger::error_with_component("bootstrap", &format!("{err:#}"));
    }
}
