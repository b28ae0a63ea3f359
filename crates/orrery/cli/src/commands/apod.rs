//! Astronomy picture of the day

use crate::error::{CliError, CliResult};
use crate::output::{self, OutputFormat};
use chrono::NaiveDate;
use clap::Args;
use colored::*;
use orrery_client::HttpPlanetStore;

#[derive(Debug, Args)]
pub struct ApodArgs {
    /// Picture date (YYYY-MM-DD), today by default
    #[arg(long)]
    pub date: Option<String>,
}

pub async fn execute(args: ApodArgs, store: &HttpPlanetStore, format: OutputFormat) -> CliResult<()> {
    if let Some(date) = &args.date {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| CliError::InvalidInput(format!("not a YYYY-MM-DD date: {}", date)))?;
    }

    let picture = store.apod(args.date.as_deref()).await?;

    match format {
        OutputFormat::Table => {
            println!("{} ({})", picture.title.bold(), picture.date);
            println!("  {}: {}", "Link".dimmed(), picture.url);
            if let Some(hdurl) = &picture.hdurl {
                println!("  {}: {}", "HD".dimmed(), hdurl);
            }
            if let Some(copyright) = &picture.copyright {
                println!("  {}: {}", "Credit".dimmed(), copyright.trim());
            }
            if !picture.explanation.is_empty() {
                println!();
                println!("  {}", picture.explanation);
            }
            Ok(())
        }
        _ => output::print_single(&picture, format),
    }
}
