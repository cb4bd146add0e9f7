//! stringfield - Entry Point

use clap::Parser;
use std::path::PathBuf;
use stringfield::model::AppError;
use tracing::info;

/// stringfield - live view of a gesture-sensing string instrument
#[derive(Parser, Debug)]
#[command(name = "stringfield")]
#[command(version)]
#[command(about = "Visualize gesture messages from a string instrument in the terminal")]
pub struct Args {
    /// Device or file to read gesture lines from ("-" for stdin).
    /// Without it, piped stdin is read, or keyboard triggers are used.
    pub input: Option<PathBuf>,

    /// Per-frame velocity decay factor (0.0-1.0)
    #[arg(long)]
    pub decay: Option<f64>,

    /// Frames per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: Option<u32>,

    /// Serial baud rate for tty devices
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub baud: Option<u32>,

    /// Stop when the device disconnects instead of reopening it
    #[arg(long)]
    pub no_reconnect: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        // 1. Load config file (or None if missing)
        let config_file = stringfield::config::load_config_with_precedence(args.config.clone())?;

        // 2. Merge with defaults
        let merged = stringfield::config::merge_config(config_file);

        // 3. Apply environment variable overrides
        let with_env = stringfield::config::apply_env_overrides(merged);

        // 4. Apply CLI argument overrides; flags only override when given
        let reconnect_override = if args.no_reconnect { Some(false) } else { None };
        stringfield::config::apply_cli_overrides(
            with_env,
            args.decay,
            args.fps,
            reconnect_override,
            args.baud,
        )
        .sanitized()
    };

    // Logs go to a file; the guard flushes them on exit
    let _log_guard = stringfield::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    // Detect input source (device, stdin, or keyboard simulation)
    let input_source =
        stringfield::source::detect_input_source(args.input.clone(), config.device_options())?;

    let options = stringfield::view::ViewOptions {
        decay_factor: config.decay_factor,
        tick_interval: config.tick_interval(),
        color: stringfield::view::ColorConfig::from_env_and_args(args.no_color),
    };

    stringfield::view::run_with_source(input_source, options)?;

    Ok(())
}
