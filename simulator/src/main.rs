use anyhow::Context;
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Bistatic passive-radar detectability driver")]
struct Args {
    /// Run the built-in synthetic fly-by scenario instead of recorded data
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Recorded trajectory file (ingester output JSON)
    #[arg(long)]
    flights: Option<PathBuf>,
    /// Override the simulation window in seconds
    #[arg(long)]
    duration: Option<f64>,
    /// Override the pulse repetition interval in seconds
    #[arg(long)]
    pri: Option<f64>,
    /// Append the run summary to this report file
    #[arg(long, default_value = "tools/data/detection_runs.log")]
    report: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    };
    if let Some(duration) = args.duration {
        config.duration_s = duration;
    }
    if let Some(pri) = args.pri {
        config.pulse_interval_s = pri;
    }
    if args.flights.is_some() {
        config.flights_path = args.flights;
    }

    let runner = Runner::new(config);
    let summary = if args.offline {
        runner.execute_offline()?
    } else {
        runner.execute()?
    };

    println!(
        "Run -> flights {}, detected {}, detections {}",
        summary.flights_processed, summary.flights_detected, summary.total_detections
    );
    for line in summary.headline_lines(5) {
        println!("{line}");
    }

    let report = format!(
        "flights={} detected={} detections={}\n",
        summary.flights_processed, summary.flights_detected, summary.total_detections
    );
    if let Some(parent) = args.report.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.report)
        .with_context(|| format!("opening report file {}", args.report.display()))?;
    file.write_all(report.as_bytes())?;

    Ok(())
}
