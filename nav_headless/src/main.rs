// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

mod config;
mod console;

use algorithm::guidance::GuidanceConfig;
use algorithm::playback::PlaybackConfig;
use clap::{CommandFactory, Parser};
use common::navigation::SpeedMultiplier;
use config::NavigationConfig;
use console::{ConsoleOptions, ConsoleRenderer};
use gnss::GpsdModule;
use module_core::{Event, EventBus, EventKind, Module};
use navigation::Navigation;
use route_loader::RouteLoader;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Route file to load, GeoJSON routing response or longitude,latitude CSV.
    #[arg(short, long)]
    route: Option<PathBuf>,
    /// Drive the loaded route in simulation.
    #[arg(short, long)]
    simulate: bool,
    /// Simulation speed multiplier (1, 2 or 4).
    #[arg(short = 'm', long, default_value_t = 1)]
    speed_multiplier: u8,
    /// Address of a gpsd daemon for live positions.
    #[arg(short = 'd', long)]
    gpsd: Option<String>,
    /// Simulated base speed in m/s.
    #[arg(long)]
    speed: Option<f64>,
    #[arg(long)]
    frame_interval_ms: Option<u64>,
    /// Distance in meters below which a turn is announced as now.
    #[arg(long)]
    turn_radius: Option<f64>,
    /// JSON file with guidance and playback settings, flags take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn playback_config(&self, defaults: PlaybackConfig) -> PlaybackConfig {
        PlaybackConfig {
            speed_base_mps: self.speed.unwrap_or(defaults.speed_base_mps),
            frame_interval_ms: self.frame_interval_ms.unwrap_or(defaults.frame_interval_ms),
            ..defaults
        }
    }

    fn guidance_config(&self, defaults: GuidanceConfig) -> GuidanceConfig {
        GuidanceConfig {
            imminent_turn_radius_m: self.turn_radius.unwrap_or(defaults.imminent_turn_radius_m),
        }
    }
}

async fn get_gpsd_module(eb: &EventBus, address: &str) -> Result<Box<dyn Module + Send>, ()> {
    match GpsdModule::new(eb.context(), address).await {
        Ok(gpsd) => Ok(Box::new(gpsd)),
        Err(e) => {
            error!("Failed to connect to gpsd at {}!. Error: {}", address, e);
            Err(())
        }
    }
}

fn install_quit_handler(eb: &EventBus) -> Result<(), ()> {
    let sender = eb.sender();
    ctrlc::set_handler(move || {
        let _ = sender.send(Event {
            kind: EventKind::QuitEvent,
        });
    })
    .map_err(|e| error!("Failed to install Ctrl-C handler. Error: {}", e))
}

#[tokio::main]
async fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(multiplier) = SpeedMultiplier::from_factor(cli.speed_multiplier) else {
        error!("Invalid speed multiplier {}", cli.speed_multiplier);
        let _ = Cli::command().print_help();
        return Err(());
    };
    if cli.route.is_none() && cli.gpsd.is_none() {
        error!("Nothing to do. Use --route and/or --gpsd");
        let _ = Cli::command().print_help();
        return Err(());
    }

    let config = match &cli.config {
        Some(path) => NavigationConfig::from_file(path).await.map_err(|e| {
            error!(
                "Failed to read config {}. Error: {}",
                path.to_string_lossy(),
                e
            )
        })?,
        None => NavigationConfig::default(),
    };

    let eb = EventBus::default();
    install_quit_handler(&eb)?;

    let mut gpsd = match &cli.gpsd {
        Some(address) => Some(get_gpsd_module(&eb, address).await?),
        None => None,
    };
    let mut navigation = Navigation::new(
        eb.context(),
        cli.guidance_config(config.guidance),
        cli.playback_config(config.playback),
    );
    let playback = navigation.context_mut().playback_mut();
    while playback.multiplier() != multiplier {
        playback.cycle_speed_multiplier();
    }
    let mut route_loader = RouteLoader::new(eb.context());
    let mut renderer = ConsoleRenderer::new(
        eb.context(),
        ConsoleOptions {
            simulate_on_load: cli.simulate,
            quit_on_arrival: cli.simulate && cli.gpsd.is_none(),
        },
    );

    if let Some(route) = &cli.route {
        info!("Requesting route {}", route.to_string_lossy());
        eb.publish(&Event {
            kind: EventKind::LoadRouteRequestEvent(Arc::new(route.clone())),
        });
    }

    info!("Starting modules...");
    let gpsd_run = async {
        match gpsd.as_mut() {
            Some(gpsd) => gpsd.run().await,
            None => Ok(()),
        }
    };
    let results = tokio::join!(
        navigation.run(),
        route_loader.run(),
        renderer.run(),
        gpsd_run
    );
    info!("Modules stopped");
    results.0.and(results.1).and(results.2).and(results.3)
}
