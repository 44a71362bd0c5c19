use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use meter_core::{TariffRegistry, TipOptionSet};
use tracing::{debug, info};

use meter_ui::runtime::ConfiguredGeolocator;
use meter_ui::state::Screen;
use meter_ui::utils::parse_tip_list;
use meter_ui::{MeterApp, MeterConfig, adapters, csv_loader, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Taxi fare meter.
///
/// Runs one simulated ride: optionally searches a destination, starts the
/// meter, lets it run, stops, applies the tip and prints the payment and the
/// ride history.
#[derive(Debug, Parser)]
#[command(name = "taxi-meter")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV file of tariff presets to import.
    #[arg(short, long)]
    tariffs: Option<PathBuf>,

    /// Name of an imported preset to make active.
    #[arg(long, requires = "tariffs")]
    preset: Option<String>,

    /// Tip menu, e.g. "0,5,10,15". Overrides the configuration.
    #[arg(long, value_parser = parse_tip_list)]
    tips: Option<TipOptionSet>,

    /// Seconds of meter time to run before stopping.
    #[arg(short, long, default_value_t = 120)]
    seconds: u64,

    /// Tip percentage to select at payment (must be on the menu; 0 for none).
    #[arg(long, default_value_t = 0)]
    tip: u8,

    /// Free-text destination to search for.
    #[arg(short, long)]
    destination: Option<String>,

    /// Speed-up factor for meter time (10 runs a minute in six seconds).
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Also write log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter when RUST_LOG is not set. Overrides the configuration.
    #[arg(long)]
    log_level: Option<String>,
}

fn load_tariffs(
    cli: &Cli,
    config: &MeterConfig,
) -> Result<TariffRegistry> {
    let mut tariffs = TariffRegistry::new(config.tariff.clone(), config.tip_options.clone());

    if let Some(path) = &cli.tariffs {
        let drafts = csv_loader::load_from_file(path)
            .with_context(|| format!("Failed to load tariffs: {}", path.display()))?;
        let report = csv_loader::import_into(&mut tariffs, drafts);
        println!("Imported {} tariff(s) from {}", report.added.len(), path.display());
    }

    if let Some(name) = &cli.preset {
        let id = tariffs
            .presets()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.id)
            .with_context(|| format!("No imported tariff named '{name}'"))?;
        tariffs.apply_preset(id);
    }

    Ok(tariffs)
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logs = logging::init_logging(cli.log_level.as_deref().unwrap_or(logging::DEFAULT_DIRECTIVE))?;
    if let Some(path) = &cli.log_file {
        logs.log_to_file(path)?;
    }

    let mut config = MeterConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = &config.log_level
        && cli.log_level.is_none()
        && std::env::var_os("RUST_LOG").is_none()
    {
        logs.set_level(level)?;
    }
    if let Some(tips) = &cli.tips {
        config.tip_options = tips.clone();
    }
    debug!(?config, "configuration");

    let tariffs = load_tariffs(&cli, &config)?;
    let search = adapters::address_search(config.search_endpoint.as_deref())?;
    let geolocator = ConfiguredGeolocator::new(config.device_location)
        .with_timeout(Duration::from_millis(config.watch.timeout_ms));

    let mut app = MeterApp::new(config, tariffs, search, Box::new(geolocator), cli.time_scale);

    if let Some(text) = &cli.destination {
        if app.choose_destination(text).await?.is_none() {
            println!("No destination found for '{text}'; riding without one.");
        }
    }

    app.start_ride().await?;
    info!(seconds = cli.seconds, time_scale = cli.time_scale, "ride under way");
    app.drive_for(cli.seconds).await?;
    println!("{}\n", app.render());

    app.stop_ride()?;
    if cli.tip > 0 {
        app.select_tip(cli.tip)?;
    }
    println!("{}\n", app.render());

    let record = app.confirm_payment()?;
    if record.is_none() {
        println!("Ride had no time, distance or fare; nothing recorded.");
    }

    app.view_mut().navigate(Screen::History);
    println!("{}", app.render());
    Ok(())
}
