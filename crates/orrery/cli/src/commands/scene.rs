//! Headless scene session
//!
//! Mounts a scene without a renderer, syncs it with the daemon and runs it
//! for a number of frames. With `--follow` it keeps syncing until Ctrl+C.

use crate::error::{CliError, CliResult};
use crate::output::{self, number, print_info, print_success, print_warning, OutputFormat};
use clap::Args;
use colored::*;
use orrery_client::{HttpPlanetStore, PlanetImageCache};
use orrery_scene::{
    DriverConfig, HeadlessScene, InfoPanel, Reconciler, SceneSync, Selection, SyncDriver,
    SyncNotice, SyncOutcome, ViewEffect, ViewEvent, ViewState,
};
use orrery_types::PlanetId;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tabled::Tabled;

/// Frame period of the follow loop
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Args)]
pub struct SceneArgs {
    /// Frames to simulate before printing the scene
    #[arg(long, default_value_t = 60)]
    pub frames: u32,

    /// Animation speed multiplier (clamped to 0..=5)
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,

    /// Hide orbit rings
    #[arg(long)]
    pub no_orbits: bool,

    /// Hide labels
    #[arg(long)]
    pub no_labels: bool,

    /// Show the information panel for a body (`planet:7` or a catalog name)
    #[arg(long)]
    pub info: Option<String>,

    /// Keep the scene synced until interrupted
    #[arg(long)]
    pub follow: bool,

    /// Seconds between periodic refreshes in follow mode
    #[arg(long, default_value_t = 30)]
    pub interval: u64,
}

/// Table row for one body in the scene
#[derive(Debug, Serialize, Tabled)]
struct BodyRow {
    name: String,
    origin: String,
    id: String,
    x: String,
    z: String,
    distance: String,
}

/// Info panel plus the body's image, for structured output
#[derive(Debug, Serialize)]
struct PanelOutput<'a> {
    #[serde(flatten)]
    panel: &'a InfoPanel,
    image: Option<&'a str>,
}

type HeadlessSync = SceneSync<HttpPlanetStore, HeadlessScene>;

pub async fn execute(args: SceneArgs, store: HttpPlanetStore, format: OutputFormat) -> CliResult<()> {
    let sync = Arc::new(SceneSync::new(
        store,
        Reconciler::mount(HeadlessScene::new()),
    ));

    let mut view = ViewState::default();
    apply_view(&sync, &mut view, ViewEvent::SetSpeed(args.speed)).await;
    if args.no_orbits {
        apply_view(&sync, &mut view, ViewEvent::ToggleOrbits).await;
    }
    if args.no_labels {
        apply_view(&sync, &mut view, ViewEvent::ToggleLabels).await;
    }

    // the built-in bodies stay usable when the daemon is down
    match sync.refresh().await {
        Ok(SyncOutcome::Applied(report)) => {
            if matches!(format, OutputFormat::Table) {
                print_success(&format!(
                    "Synced: {} added, {} removed, {} skipped",
                    report.added.len(),
                    report.removed.len(),
                    report.skipped.len()
                ));
            }
        }
        Ok(SyncOutcome::Coalesced) => {}
        Err(e) => print_warning(&e.to_string()),
    }

    {
        let scene = sync.scene();
        let mut scene = scene.lock().await;
        for _ in 0..args.frames {
            scene.tick(view.speed);
        }
    }

    let images = PlanetImageCache::new();

    if let Some(target) = &args.info {
        let selection = parse_selection(target);
        apply_view(&sync, &mut view, ViewEvent::Select(selection.clone())).await;
        let panel = sync
            .scene()
            .lock()
            .await
            .describe(&selection)
            .ok_or_else(|| CliError::InvalidInput(format!("no body named {} in the scene", target)))?;

        // only built-in bodies have imagery
        let image = match &selection {
            Selection::Catalog(_) => match images.link(sync.store(), &panel.title).await {
                Ok(link) => link,
                Err(e) => {
                    print_warning(&format!("No imagery for {}: {}", panel.title, e));
                    None
                }
            },
            Selection::Custom(_) => None,
        };
        print_panel(&panel, image.as_deref(), format)?;
    } else {
        print_bodies(&sync, format).await?;
    }

    if args.follow {
        follow(sync, view, args.interval).await?;
    }

    Ok(())
}

async fn apply_view(sync: &HeadlessSync, view: &mut ViewState, event: ViewEvent) {
    if let ViewEffect::Visibility { orbits, labels } = view.apply(event) {
        sync.scene().lock().await.set_visibility(orbits, labels);
    }
}

fn parse_selection(target: &str) -> Selection {
    match target.parse::<PlanetId>() {
        Ok(id) => Selection::Custom(id),
        Err(_) => Selection::Catalog(target.to_string()),
    }
}

async fn print_bodies(sync: &HeadlessSync, format: OutputFormat) -> CliResult<()> {
    let rows: Vec<BodyRow> = {
        let scene = sync.scene();
        let scene = scene.lock().await;
        scene
            .index()
            .iter()
            .map(|handle| {
                let position = handle.motion().position();
                BodyRow {
                    name: handle.name().to_string(),
                    origin: if handle.is_custom() { "custom" } else { "solar" }.to_string(),
                    id: handle
                        .id()
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "-".into()),
                    x: number(position.x),
                    z: number(position.z),
                    distance: number(handle.motion().distance),
                }
            })
            .collect()
    };

    output::print_output(rows, format, "The scene is empty")
}

fn print_panel(panel: &InfoPanel, image: Option<&str>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", panel.title.bold());
            for (label, value) in &panel.rows {
                println!("  {}: {}", label.dimmed(), value);
            }
            if let Some(description) = &panel.description {
                println!();
                println!("  {}", description);
            }
            if let Some(image) = image {
                println!("  {}: {}", "Image".dimmed(), image);
            }
            if let Some(id) = panel.deletable {
                println!();
                print_info(&format!("Delete with `orrery planets delete {}`", id));
            }
            Ok(())
        }
        _ => output::print_single(&PanelOutput { panel, image }, format),
    }
}

async fn follow(sync: Arc<HeadlessSync>, view: ViewState, interval_secs: u64) -> CliResult<()> {
    let (driver, refresh_rx) = SyncDriver::new(
        DriverConfig {
            refresh_interval_secs: interval_secs,
        },
        sync.clone(),
    );
    let mut notices = sync.subscribe();
    let driver_task = tokio::spawn(driver.clone().start(refresh_rx));

    print_info("Following the daemon, press Ctrl+C to stop");

    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                sync.scene().lock().await.tick(view.speed);
            }
            notice = notices.recv() => match notice {
                Ok(notice) => print_notice(&notice),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::debug!(missed, "Notices dropped");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
            signal = tokio::signal::ctrl_c() => {
                signal?;
                break;
            }
        }
    }

    driver.stop().await;
    // wake the driver so it sees the stop flag
    driver.trigger_refresh().await;
    if tokio::time::timeout(Duration::from_secs(5), driver_task).await.is_err() {
        tracing::warn!("Sync driver did not stop in time");
    }

    let scene = sync.scene();
    let scene = scene.lock().await;
    print_success(&format!(
        "Stopped with {} custom planet(s) in the scene",
        scene.index().custom_len()
    ));
    Ok(())
}

fn print_notice(notice: &SyncNotice) {
    match notice {
        SyncNotice::Reconciled(report) if report.is_noop() => {}
        SyncNotice::Reconciled(report) => {
            for id in &report.added {
                println!("{} {}", "+".green(), id);
            }
            for id in &report.removed {
                println!("{} {}", "-".red(), id);
            }
            for (id, reason) in &report.skipped {
                print_warning(&format!("{} skipped ({:?})", id, reason));
            }
        }
        SyncNotice::Created(id) => print_success(&format!("Created {}", id)),
        SyncNotice::Deleted(id) => print_success(&format!("Deleted {}", id)),
        SyncNotice::Cleared { deleted } => print_success(&format!("Cleared {} planet(s)", deleted)),
        SyncNotice::Failed(message) => output::print_error(message),
    }
}
