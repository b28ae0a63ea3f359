//! List-view planet cards

use crate::error::CliResult;
use crate::output::{self, number, OutputFormat};
use clap::Args;
use colored::*;
use orrery_client::{HttpPlanetStore, PlanetStore};
use orrery_types::{cards_for, ListFilter, PlanetCard};
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Which list to show (solar, custom)
    #[arg(short, long, default_value_t = ListFilter::Solar)]
    pub filter: ListFilter,
}

/// Table row for card display
#[derive(Debug, Serialize, Tabled)]
struct CardRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    kind: String,
    radius: String,
    distance: String,
    color: String,
}

impl From<PlanetCard> for CardRow {
    fn from(card: PlanetCard) -> Self {
        Self {
            id: card.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            name: card.name,
            kind: card.kind,
            radius: number(card.radius),
            distance: number(card.distance),
            color: card.color,
        }
    }
}

pub async fn execute(
    args: CatalogArgs,
    store: &HttpPlanetStore,
    format: OutputFormat,
) -> CliResult<()> {
    // the solar list never needs the daemon
    let custom = match args.filter {
        ListFilter::Solar => Vec::new(),
        ListFilter::Custom => store.list().await?,
    };
    let cards = cards_for(args.filter, &custom);

    match format {
        OutputFormat::Table => {
            println!("{}", args.filter.title().bold());
            let rows: Vec<CardRow> = cards.into_iter().map(Into::into).collect();
            output::print_output(rows, format, args.filter.empty_message())
        }
        _ => output::print_single(&cards, format),
    }
}
