//! Set cover runner CLI.
//!
//! Solves one instance file, or every `*.in` file of a directory in sorted
//! order, and writes `<instance>_<alg>_<cutoff>[_<seed>].sol/.trace` files.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use u_setcover::io::{self, InstanceFormat, TraceFormat};
use u_setcover::{Algorithm, TimeBudget};

#[derive(Parser)]
#[command(name = "setcover")]
#[command(about = "Anytime minimum set cover solver")]
#[command(version)]
struct Cli {
    /// Instance file, or a directory of `.in` files
    #[arg(long)]
    inst: PathBuf,

    /// Algorithm: BnB, Approx, LS1 (simulated annealing) or LS2 (hill climbing)
    #[arg(long)]
    alg: Algorithm,

    /// Cutoff in seconds
    #[arg(long)]
    time: f64,

    /// Random seed for LS1 / LS2
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Trace delimiter
    #[arg(long, value_enum, default_value = "space")]
    trace_format: TraceFormat,

    /// Subset line dialect
    #[arg(long, value_enum, default_value = "auto")]
    instance_format: InstanceFormat,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.time.is_nan() || cli.time < 0.0 {
        anyhow::bail!("--time must be a non-negative number of seconds");
    }

    let files = instance_files(&cli.inst)?;
    if files.is_empty() {
        warn!(path = %cli.inst.display(), "no .in files found");
    }
    for path in files {
        run_single(&cli, &path).with_context(|| format!("solving {}", path.display()))?;
    }
    Ok(())
}

fn instance_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)
            .with_context(|| format!("reading directory {}", path.display()))?
        {
            let entry_path = entry?.path();
            if entry_path.is_file() && entry_path.extension().is_some_and(|ext| ext == "in") {
                files.push(entry_path);
            }
        }
        files.sort();
        Ok(files)
    } else if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        anyhow::bail!("{} is not a file or directory", path.display())
    }
}

fn run_single(cli: &Cli, path: &Path) -> anyhow::Result<()> {
    let instance = io::read_instance(path, cli.instance_format)?;
    let name = io::instance_name(path);
    info!(
        instance = %name,
        algorithm = %cli.alg,
        cutoff_secs = cli.time,
        "running"
    );

    let budget = TimeBudget::from_secs_f64(Instant::now(), cli.time);
    let result = cli.alg.solve(&instance, &budget, cli.seed)?;

    let stem = io::output_stem(&name, cli.alg, cli.time, cli.seed);
    let (sol, trace) = io::write_output_files(&cli.output, &stem, &result, cli.trace_format)?;
    info!(
        instance = %name,
        cost = result.best_cost,
        termination = ?result.termination,
        solution = %sol.display(),
        trace = %trace.display(),
        "done"
    );
    Ok(())
}
