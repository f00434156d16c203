use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use urania::{
    AspectCalculator, CelestialBody, Chart, ChartSession, DaySummary, DisplayConfig, DisplayMode,
    House, HouseCusps, Selection, TransitMatcher,
};
use urania_config::{load_engine_settings, load_engine_settings_from, EngineSettings};

#[derive(Parser, Debug)]
#[command(name = "urania_report")]
#[command(about = "Select the chart relationships a display mode should show", long_about = None)]
#[command(version)]
struct Cli {
    /// Chart file (TOML with [[natal]] and optional [[transiting]] tables)
    chart: PathBuf,

    /// Display mode; overrides the chart file and the config default
    #[arg(short, long)]
    mode: Option<DisplayMode>,

    /// Engine config (defaults to configs/urania.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report every mode instead of one
    #[arg(long)]
    all_modes: bool,

    /// Attach a day summary of the transits
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartFile {
    #[serde(default)]
    as_of: Option<DateTime<Utc>>,
    #[serde(default)]
    mode: Option<DisplayMode>,
    #[serde(default)]
    cusps: Option<HouseCusps>,
    natal: Vec<CelestialBody>,
    #[serde(default)]
    transiting: Vec<CelestialBody>,
}

#[derive(Debug, Serialize)]
struct ModeReport<'a> {
    mode: DisplayMode,
    config: &'a DisplayConfig,
    selection: Selection,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    houses: Vec<House>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    as_of: DateTime<Utc>,
    reports: Vec<ModeReport<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<DaySummary>,
}

fn read_chart_file(path: &Path) -> anyhow::Result<ChartFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read chart file {}", path.display()))?;
    let chart: ChartFile = toml::from_str(&text)
        .with_context(|| format!("Failed to parse chart file {}", path.display()))?;
    if chart.natal.is_empty() {
        log::warn!("{} has no natal bodies", path.display());
    }
    Ok(chart)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings: EngineSettings = match &cli.config {
        Some(path) => load_engine_settings_from(path)?,
        None => load_engine_settings()?,
    };
    let file = read_chart_file(&cli.chart)?;

    let as_of = file.as_of.unwrap_or_else(Utc::now);
    let modes = if cli.all_modes {
        DisplayMode::ALL.to_vec()
    } else {
        vec![cli.mode.or(file.mode).unwrap_or(settings.default_mode)]
    };

    let mut natal = Chart::new(file.natal);
    if let Some(cusps) = file.cusps {
        natal = natal.with_houses(cusps);
    }
    log::info!(
        "{} natal, {} transiting bodies at {}",
        natal.bodies.len(),
        file.transiting.len(),
        as_of
    );

    let mut session = ChartSession::with_engines(
        natal,
        AspectCalculator::with_settings(settings.aspects),
        TransitMatcher::with_settings(settings.transits),
    );

    let reports = modes
        .into_iter()
        .map(|mode| ModeReport {
            mode,
            config: mode.config(),
            selection: session.selection(mode, &file.transiting, as_of).clone(),
            houses: session.houses(mode),
        })
        .collect();

    let summary = cli
        .summary
        .then(|| session.day_summary(&file.transiting, as_of));

    let report = Report {
        as_of,
        reports,
        summary,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
