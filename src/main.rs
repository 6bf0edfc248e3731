use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use rand::{SeedableRng, rngs::StdRng};

use owcsim::{
    config::SimulationConfig,
    link::{run_awgn_sweep, run_manchester_link, run_path_loss},
    report::{JsonReporter, LogReporter, Publish, Reporter},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Pipeline {
    All,
    PathLoss,
    Manchester,
    Awgn,
}

#[derive(Parser)]
#[command(author, version, about = "Optical wireless link simulator")]
struct Args {
    /// Which pipeline to run
    #[arg(long, value_enum, default_value_t = Pipeline::All)]
    pipeline: Pipeline,
    /// Load simulation parameters from JSON
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed the bit source and noise generator (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,
    /// Write the JSON report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let seed = config.resolve_seed(&mut StdRng::from_os_rng());
    info!("seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut reports: Vec<Box<dyn Publish>> = Vec::new();
    if matches!(args.pipeline, Pipeline::All | Pipeline::PathLoss) {
        reports.push(Box::new(
            run_path_loss(&config.path_loss).context("path loss pipeline")?,
        ));
    }
    if matches!(args.pipeline, Pipeline::All | Pipeline::Manchester) {
        reports.push(Box::new(
            run_manchester_link(&config.manchester, &mut rng).context("Manchester pipeline")?,
        ));
    }
    if matches!(args.pipeline, Pipeline::All | Pipeline::Awgn) {
        reports.push(Box::new(
            run_awgn_sweep(&config.awgn, &mut rng).context("AWGN pipeline")?,
        ));
    }

    let mut log_reporter = LogReporter;
    let mut json_reporter = JsonReporter::new();
    json_reporter.integer("seed", seed);
    for report in &reports {
        report.publish(&mut log_reporter);
        report.publish(&mut json_reporter);
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating report {}", path.display()))?;
            json_reporter.write_to(BufWriter::new(file))?;
            info!("report written to {}", path.display());
        }
        None => {
            json_reporter.write_to(io::stdout().lock())?;
            println!();
        }
    }

    Ok(())
}
