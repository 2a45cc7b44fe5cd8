use clap::Parser;
use color_eyre::Result;
use std::io::Write;
use std::path::PathBuf;

use atomic_timing::config;
use atomic_timing::trace::{self, TimingSettings};

/// Replay a call trace against debounce and throttle primitives
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Replay a call trace against debounce and throttle primitives on a virtual clock"
)]
struct Args {
    /// TOML trace file
    trace: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Debounce delay in milliseconds (overrides trace and config)
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Throttle window in milliseconds (overrides trace and config)
    #[arg(long)]
    throttle_ms: Option<u64>,
}

fn main() -> Result<()> {
    init_logging();
    color_eyre::install()?;

    let args = Args::parse();

    let config_result = config::load_config();
    if let Some(warning) = &config_result.warning {
        log::warn!("{}", warning);
    }

    let trace = trace::load_trace(&args.trace)?;

    // Flags win over the trace's own settings, which win over the config file
    let timing = TimingSettings::from(config_result.config.timing)
        .overridden(trace.settings.debounce_ms, trace.settings.throttle_ms)
        .overridden(args.debounce_ms, args.throttle_ms);

    let report = trace::replay(&trace, timing)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}

/// Logs go to stderr at WARN unless RUST_LOG says otherwise
fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            let datetime = chrono::Local::now();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();
}
