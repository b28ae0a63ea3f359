//! Custom planet commands

use crate::error::{CliError, CliResult};
use crate::output::{self, number, print_success, print_warning, OutputFormat};
use clap::Subcommand;
use orrery_client::{HttpPlanetStore, PlanetStore, StoreError};
use orrery_types::{CreatePlanetRequest, CreatePlanetResponse, PlanetId, PlanetRecord};
use serde::Serialize;
use tabled::Tabled;

/// Planet subcommands
#[derive(Subcommand)]
pub enum PlanetCommands {
    /// List custom planets, newest first
    List,

    /// Create a custom planet
    Create {
        /// Creator's display name
        #[arg(long)]
        pseudo: String,

        /// Planet name
        #[arg(long)]
        name: String,

        /// Planet type (rocky, gaseous, oceanic, or any other label)
        #[arg(long = "type")]
        kind: String,

        /// Radius in scene units
        #[arg(long)]
        size: f64,

        /// Orbit radius in scene units (must not be zero)
        #[arg(long, allow_hyphen_values = true)]
        distance: f64,

        /// Temperature in °C
        #[arg(long, allow_hyphen_values = true)]
        temperature: f64,

        /// Atmosphere gas (repeatable)
        #[arg(long = "atmosphere")]
        atmosphere: Vec<String>,

        /// The planet has water
        #[arg(long)]
        water: bool,
    },

    /// Delete a custom planet
    Delete {
        /// Planet ID (`7` or `planet:7`)
        planet_id: String,
    },

    /// Delete every custom planet
    Purge {
        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Table row for planet display
#[derive(Debug, Serialize, Tabled)]
struct PlanetRow {
    id: String,
    name: String,
    creator: String,
    #[tabled(rename = "type")]
    kind: String,
    size: String,
    distance: String,
    temperature: String,
    water: String,
    created: String,
}

impl From<PlanetRecord> for PlanetRow {
    fn from(planet: PlanetRecord) -> Self {
        Self {
            id: planet.id.to_string(),
            name: planet.name,
            creator: planet.pseudo,
            kind: planet.kind.label().to_string(),
            size: number(planet.size),
            distance: number(planet.distance),
            temperature: format!("{}°C", number(planet.temperature)),
            water: if planet.has_water { "yes" } else { "no" }.to_string(),
            created: planet.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute a planet command
pub async fn execute(
    command: PlanetCommands,
    store: &HttpPlanetStore,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        PlanetCommands::List => {
            let planets = store.list().await?;
            match format {
                OutputFormat::Table => {
                    let rows: Vec<PlanetRow> = planets.into_iter().map(Into::into).collect();
                    output::print_output(rows, format, "No custom planets yet")
                }
                _ => output::print_single(&planets, format),
            }
        }

        PlanetCommands::Create {
            pseudo,
            name,
            kind,
            size,
            distance,
            temperature,
            atmosphere,
            water,
        } => {
            let request = CreatePlanetRequest {
                pseudo: Some(pseudo),
                planet_name: Some(name),
                kind: Some(kind),
                size: Some(size),
                distance: Some(distance),
                temperature: Some(temperature),
                atmosphere,
                has_water: water,
            };
            let draft = request.validate()?;
            let id = store.create(&draft).await?;

            match format {
                OutputFormat::Table => {
                    print_success(&format!("Planet {} saved as {}", draft.name, id));
                    Ok(())
                }
                _ => output::print_single(
                    &CreatePlanetResponse {
                        success: true,
                        id,
                        message: "Planet saved".to_string(),
                    },
                    format,
                ),
            }
        }

        PlanetCommands::Delete { planet_id } => {
            let id: PlanetId = planet_id
                .parse()
                .map_err(|_| CliError::InvalidInput(format!("not a planet id: {}", planet_id)))?;
            store.delete(id).await?;
            print_success(&format!("Planet {} deleted", id));
            Ok(())
        }

        PlanetCommands::Purge { yes } => {
            if !yes {
                print_warning("This deletes every custom planet. Re-run with --yes to confirm.");
                return Ok(());
            }

            match store.delete_all().await {
                Ok(deleted) => {
                    print_success(&format!("Deleted {} planet(s)", deleted.len()));
                    Ok(())
                }
                Err(StoreError::PartialDelete { deleted, failed }) => {
                    print_warning(&format!("Deleted {} planet(s)", deleted.len()));
                    for (id, reason) in &failed {
                        output::print_error(&format!("{}: {}", id, reason));
                    }
                    let remaining = store.list().await?;
                    Err(CliError::Incomplete(format!(
                        "{} planet(s) could not be deleted, {} remain",
                        failed.len(),
                        remaining.len()
                    )))
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}
