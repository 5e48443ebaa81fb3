use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use rrd_chart::api::{ComposerConfig, GraphComposer};
use rrd_chart::collect::{DEFAULT_MAX_PLUGINS_PER_HOST, ReportPeriod, build_report, discover};
use rrd_chart::render::RrdtoolGraphRenderer;
use rrd_chart::rrdtool::{DEFAULT_RRDTOOL, RrdtoolCommand};
use rrd_chart::source::RrdtoolSourceReader;
use rrd_chart::telemetry::init_default_tracing;
use rrd_chart::{ChartError, ChartResult};
use tracing::{error, info};

/// Render daily and monthly charts for every host/plugin in a collectd tree.
#[derive(Debug, Parser)]
#[command(name = "collectd-report", version, about)]
struct CliArgs {
    /// collectd RRD data directory (`<root>/<host>/<plugin>/*.rrd`).
    #[arg(long, default_value = "/var/lib/collectd")]
    root: PathBuf,

    /// JSON composer config; defaults apply to omitted fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report destination; stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Maximum plugins charted per host.
    #[arg(long, default_value_t = DEFAULT_MAX_PLUGINS_PER_HOST)]
    max_plugins: usize,

    /// rrdtool executable.
    #[arg(long, default_value = DEFAULT_RRDTOOL)]
    rrdtool: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let _ = init_default_tracing(level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "collectd report failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> ChartResult<()> {
    let config = match &args.config {
        Some(path) => ComposerConfig::load(path)?,
        None => ComposerConfig::default(),
    };
    info!(root = %args.root.display(), "collectd-report {}", env!("CARGO_PKG_VERSION"));

    let command = RrdtoolCommand::new(args.rrdtool.clone());
    let mut composer = GraphComposer::new(
        RrdtoolSourceReader::new(command.clone()),
        RrdtoolGraphRenderer::new(command),
        config,
    )?;

    let groups = discover(&args.root, args.max_plugins)?;
    let report = build_report(&mut composer, &groups, &ReportPeriod::defaults(), Utc::now());
    let json = report.to_json_pretty()?;

    match &args.output {
        Some(path) => std::fs::write(path, json).map_err(|e| {
            ChartError::InvalidData(format!("unable to write {}: {e}", path.display()))
        })?,
        None => println!("{json}"),
    }
    Ok(())
}
