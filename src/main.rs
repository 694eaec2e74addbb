use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use floorkit::{init_logging, AppEvent, Config, DesignerState, LogFormat, VERSION};
use floorkit_core::event_bus::SettingsEvent;
use floorkit_core::units::{format_length, parse_length, LengthUnit};

#[derive(Parser, Debug)]
#[command(name = "floorkit")]
#[command(about = "Load a floor plan and summarize its walls and openings", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
struct Args {
    /// Emit one JSON object per log line
    #[arg(long)]
    log_json: bool,

    /// Config file (.toml or .json); defaults to the platform config directory
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Default thickness for new walls, e.g. "240" or "24cm"
    #[arg(long, value_name = "LENGTH")]
    wall_thickness: Option<String>,

    /// Default height for new walls, e.g. "2700" or "2.7m"
    #[arg(long, value_name = "LENGTH")]
    wall_height: Option<String>,

    /// Plan document to open
    plan: Option<PathBuf>,
}

impl Args {
    fn log_format(&self) -> LogFormat {
        if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path,
        None => floorkit_settings::default_config_path()?,
    };
    let mut config = Config::load_or_default(&path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    config.prune_recent_files();
    floorkit_core::emit!(AppEvent::Settings(SettingsEvent::Loaded));
    Ok(config)
}

/// Lengths on the command line may carry a unit suffix ("24cm", "2.7 m")
fn length_arg(text: &str, unit: LengthUnit) -> anyhow::Result<f64> {
    parse_length(text, unit).map_err(anyhow::Error::msg)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.log_format())?;
    tracing::info!("FloorKit {} starting", VERSION);

    let mut config = load_config(args.config.clone())?;
    let unit = config.project.display_unit;
    if let Some(text) = &args.wall_thickness {
        config.walls.thickness = length_arg(text, unit)?;
    }
    if let Some(text) = &args.wall_height {
        config.walls.height = length_arg(text, unit)?;
    }
    config.validate()?;
    let mut state = DesignerState::with_config(config);

    let Some(plan_path) = args.plan else {
        tracing::info!("No plan given; {} recent file(s)", state.recent_files().len());
        return Ok(());
    };

    state.load_from_file(&plan_path)?;
    if state.has_autosave() {
        tracing::warn!("An autosave copy exists for {}", state.display_name());
    }

    let plan = state.surface.plan();
    for wall in plan.walls() {
        tracing::info!(
            "Wall {}: {} long, {} thick, {} opening(s)",
            wall.id(),
            format_length(wall.length(), unit),
            format_length(wall.thickness(), unit),
            wall.openings().len()
        );
    }
    for opening in plan.openings().iter().filter(|o| !o.is_visible()) {
        tracing::warn!("{} does not fit its wall", opening.id());
    }

    Ok(())
}
