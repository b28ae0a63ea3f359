//! Daemon status command

use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use orrery_client::HttpPlanetStore;

pub async fn execute(store: &HttpPlanetStore, format: OutputFormat) -> CliResult<()> {
    let health = store.health().await?;

    match format {
        OutputFormat::Table => {
            output::print_success(&format!("Orrery daemon at {} is {}", store.base_url(), health.status));
            println!("  Version: {}", health.version);
            println!("  Uptime: {}", health.uptime);
            if let Some(storage) = &health.storage {
                println!("  Storage: {}", storage);
            }
            Ok(())
        }
        _ => output::print_single(&health, format),
    }
}
