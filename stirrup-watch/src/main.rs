//! Stirrup inspection watchdog.
//!
//! Reads per-frame detection records, checks each stirrup against the
//! configured reference zone, and drives the siren relay: assert on anomaly
//! or unexpected multiplicity, debounced, auto-clearing after the dwell
//! time. The relay is force-cleared at startup and on every exit path.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use inspect_core::{FrameSource, Inspector, JsonlSource, WatchConfig};
use inspect_types::Timestamp;
use relay_link::{CommandSink, RecordingSink, WriterSink};

/// Stirrup inspection watchdog.
#[derive(Parser)]
#[command(name = "stirrup-watch")]
#[command(about = "Watches a detection stream and drives the siren relay", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file; built-in deployment defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Detection stream as JSON Lines; "-" reads stdin.
    #[arg(long, default_value = "-")]
    input: PathBuf,

    /// Relay command device (e.g. /dev/ttyUSB0).
    #[arg(long, conflicts_with_all = ["relay_addr", "dry_run"])]
    relay_dev: Option<PathBuf>,

    /// Relay command channel over TCP (host:port).
    #[arg(long, conflicts_with = "dry_run")]
    relay_addr: Option<String>,

    /// Record relay commands in memory instead of a transport, and print
    /// them at exit.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match &cli.config {
        Some(path) => WatchConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => WatchConfig::default(),
    };
    info!(
        zone = ?config.zone,
        position_margin = config.position_margin,
        aspect_ratio_margin = config.aspect_ratio_margin,
        target = %config.target.label,
        reference = %config.reference.label,
        dwell_secs = config.dwell_secs,
        "stirrup watch starting"
    );

    let source = open_input(&cli.input)?;

    if cli.dry_run {
        let inspector = run(&config, RecordingSink::new(), source)?;
        for command in inspector.relay().sink().commands() {
            println!("{command}");
        }
        return Ok(());
    }

    if let Some(dev) = &cli.relay_dev {
        let file = File::options()
            .write(true)
            .open(dev)
            .with_context(|| format!("opening relay device {}", dev.display()))?;
        run(&config, WriterSink::new(file), source)?;
        return Ok(());
    }

    if let Some(addr) = &cli.relay_addr {
        let stream = TcpStream::connect(addr)
            .with_context(|| format!("connecting to relay at {addr}"))?;
        run(&config, WriterSink::new(stream), source)?;
        return Ok(());
    }

    bail!("one of --relay-dev, --relay-addr, or --dry-run is required");
}

fn open_input(path: &Path) -> Result<JsonlSource<Box<dyn BufRead>>> {
    let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file =
            File::open(path).with_context(|| format!("opening input {}", path.display()))?;
        Box::new(BufReader::new(file))
    };
    Ok(JsonlSource::new(reader))
}

/// Runs the frame loop to completion and returns the inspector so callers
/// can examine the sink. The relay is force-cleared before the first frame
/// and cleared again on every exit path.
fn run<S, F>(config: &WatchConfig, sink: S, mut source: F) -> Result<Inspector<S>>
where
    S: CommandSink,
    F: FrameSource,
{
    let mut inspector = Inspector::from_config(config, sink)?;
    inspector
        .startup_clear()
        .context("relay transport unavailable at startup")?;

    let epoch = Instant::now();
    loop {
        match source.next_frame() {
            Ok(Some(frame)) => {
                let now = Timestamp::from_elapsed(epoch.elapsed());
                let report = inspector.run_cycle(&frame.detections, now);
                if report.is_quiet() {
                    debug!(frame = frame.frame_id, "cycle quiet");
                } else {
                    info!(
                        frame = frame.frame_id,
                        stirrups = report.counters.stirrups,
                        screens = report.counters.screens,
                        anomalies = report.anomalies.len(),
                        multiplicity = report.multiplicity.len(),
                        discarded = report.discarded.len(),
                        relay_failures = report.relay_failures.len(),
                        "cycle flagged"
                    );
                }
            }
            Ok(None) => {
                info!("detection stream ended, stopping");
                break;
            }
            Err(err) => {
                error!(%err, "frame acquisition failed, stopping");
                break;
            }
        }
    }

    // The siren must never be left on after shutdown.
    if let Err(err) = inspector.shutdown() {
        error!(%err, "final relay clear failed");
    }
    Ok(inspector)
}
