use clap::{Args, Parser, Subcommand};
use inventory_sim::io::reporting::{self, DEFAULT_RESULTS_FILE};
use inventory_sim::logging::init_logging;
use inventory_sim::simulation::batch::{run_batch, BatchFile, BatchOptions};
use inventory_sim::simulation::simulate;
use inventory_sim::{ConfigError, SimError, SimulationInput};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "inventory-sim")]
#[command(about = "Single-item inventory simulation under stochastic demand")]
struct Cli {
    /// Log level for this crate (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and export its day table
    Run(RunArgs),

    /// Run a JSON batch of configurations in parallel
    Batch {
        /// Batch file: {"master_seed": 1, "jobs": [{"id": "...", "config": {...}}]}
        file: PathBuf,

        /// Worker threads (0 = one per core)
        #[arg(long, default_value = "0")]
        threads: usize,

        /// Overrides the file's master seed
        #[arg(long)]
        master_seed: Option<u64>,

        /// Summary CSV path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Fields are taken as raw text and validated together, so a bad value is
/// reported with the name of the field it came from.
#[derive(Args)]
struct RunArgs {
    /// Demand distribution: normal or poisson
    #[arg(long, default_value = "normal")]
    distribution: String,

    /// Mean daily demand
    #[arg(long)]
    mean: Option<String>,

    /// Standard deviation of daily demand
    #[arg(long)]
    std_dev: Option<String>,

    /// Poisson rate (required for poisson demand)
    #[arg(long)]
    lambda: Option<String>,

    /// Number of simulated days
    #[arg(long)]
    days: Option<String>,

    /// Replenishment policy: s_Q or R_s_S
    #[arg(long, default_value = "s_Q")]
    policy: String,

    /// On-hand level that triggers a reorder
    #[arg(long)]
    reorder_point: Option<String>,

    /// Quantity per order
    #[arg(long)]
    order_quantity: Option<String>,

    /// Days between placing an order and receiving it
    #[arg(long)]
    lead_time: Option<String>,

    /// Seed for reproducible demand
    #[arg(long)]
    seed: Option<u64>,

    /// Day table CSV path
    #[arg(short, long, default_value = DEFAULT_RESULTS_FILE)]
    output: PathBuf,

    /// Also write the order log to this CSV path
    #[arg(long)]
    orders: Option<PathBuf>,
}

impl RunArgs {
    fn input(&self) -> SimulationInput {
        SimulationInput {
            distribution: Some(self.distribution.clone()),
            mean: self.mean.clone(),
            std_dev: self.std_dev.clone(),
            lambda: self.lambda.clone(),
            days: self.days.clone(),
            policy: Some(self.policy.clone()),
            reorder_point: self.reorder_point.clone(),
            order_quantity: self.order_quantity.clone(),
            lead_time: self.lead_time.clone(),
        }
    }
}

fn run_single(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = args.input().parse()?;
    let result = simulate(&config, args.seed)?;

    reporting::write_simulation_log(&args.output, &result)?;
    if let Some(path) = &args.orders {
        reporting::write_order_log(path, &result.orders)?;
    }

    println!(
        "{}",
        reporting::completion_message(&args.output.display().to_string(), &result)
    );
    let summary = result.summary();
    println!(
        "Orders placed: {} ({} received), stockout days: {}/{}",
        summary.orders_placed,
        summary.orders_received,
        summary.stockout_days,
        result.days()
    );
    Ok(())
}

fn run_batch_file(
    file: &Path,
    threads: usize,
    master_seed: Option<u64>,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let contents = std::fs::read_to_string(file)?;
    let batch = BatchFile::from_json_str(&contents)?;
    let options = BatchOptions {
        master_seed: master_seed.or(batch.master_seed),
        max_threads: threads,
    };

    let report = run_batch(&batch.jobs, &options)?;
    match output {
        Some(path) => reporting::write_batch_summary(std::fs::File::create(path)?, &report)?,
        None => reporting::write_batch_summary(std::io::stdout().lock(), &report)?,
    }

    eprintln!(
        "Batch complete: {} succeeded, {} failed in {} ms",
        report.succeeded(),
        report.failed(),
        report.elapsed_ms
    );
    Ok(())
}

fn is_input_error(err: &(dyn Error + 'static)) -> bool {
    err.downcast_ref::<ConfigError>().is_some()
        || err
            .downcast_ref::<SimError>()
            .is_some_and(SimError::is_config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let outcome = match &cli.command {
        Commands::Run(args) => run_single(args),
        Commands::Batch {
            file,
            threads,
            master_seed,
            output,
        } => run_batch_file(file, *threads, *master_seed, output.as_deref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_input_error(e.as_ref()) => {
            eprintln!("Input Error: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
