//! Scenario comparison CLI

use clap::{Parser, Subcommand, ValueEnum};
use sheetcut_bench::{sweep, ComparisonReport, RunnerConfig, Scenario, ScenarioRunner};
use sheetcut_core::{Algorithm, GaConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scenario-runner")]
#[command(about = "Compare sheetcut layouts across settings variants")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the variants declared in a scenario file
    Run {
        /// Path to the JSON scenario file
        file: PathBuf,

        #[command(flatten)]
        ga: GaArgs,

        #[command(flatten)]
        out: OutputArgs,
    },

    /// Run every combination of the given settings against a scenario's cut list
    Compare {
        /// Path to the JSON scenario file
        file: PathBuf,

        /// Kerf widths to try (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        kerf: Vec<f64>,

        /// Edge trims to try (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        trim: Vec<f64>,

        /// Algorithms to try (comma-separated)
        #[arg(short, long, value_enum, value_delimiter = ',')]
        algorithm: Vec<AlgorithmArg>,

        #[command(flatten)]
        ga: GaArgs,

        #[command(flatten)]
        out: OutputArgs,
    },
}

#[derive(clap::Args)]
struct GaArgs {
    /// GA population size (default: scaled to the job)
    #[arg(long)]
    population: Option<usize>,

    /// GA generations (default: scaled to the job)
    #[arg(long)]
    generations: Option<u32>,
}

impl GaArgs {
    fn config(&self) -> Option<GaConfig> {
        if self.population.is_none() && self.generations.is_none() {
            return None;
        }
        let mut config = GaConfig::default();
        if let Some(size) = self.population {
            config = config.with_population_size(size);
        }
        if let Some(generations) = self.generations {
            config = config.with_generations(generations);
        }
        Some(config)
    }
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Output file for results (JSON)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file for CSV results
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    /// Largest-first greedy packing
    Greedy,
    /// Genetic search over order and rotation
    Genetic,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Greedy => Algorithm::Greedy,
            AlgorithmArg::Genetic => Algorithm::Genetic,
        }
    }
}

fn runner(ga: &GaArgs) -> anyhow::Result<ScenarioRunner> {
    let mut config = RunnerConfig::new().with_progress(true);
    if let Some(ga_config) = ga.config() {
        ga_config.validate()?;
        config = config.with_ga_config(ga_config);
    }
    Ok(ScenarioRunner::new(config))
}

fn write_outputs(report: &ComparisonReport, out: &OutputArgs) -> anyhow::Result<()> {
    report.print_summary();

    if let Some(path) = &out.output {
        report.save_json(path)?;
        println!("Results saved to: {}", path.display());
    }

    if let Some(path) = &out.csv {
        report.save_csv(path)?;
        println!("CSV saved to: {}", path.display());
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file, ga, out } => {
            let scenario = Scenario::from_file(&file)?;
            let report = runner(&ga)?.run(&scenario);
            write_outputs(&report, &out)?;
        }

        Commands::Compare {
            file,
            kerf,
            trim,
            algorithm,
            ga,
            out,
        } => {
            let scenario = Scenario::from_file(&file)?;
            let algorithms: Vec<Algorithm> = algorithm.into_iter().map(Into::into).collect();
            let variants = sweep(&kerf, &trim, &algorithms);

            let scenario = scenario.with_variants(variants);
            scenario.validate()?;

            let report = runner(&ga)?.run(&scenario);
            write_outputs(&report, &out)?;
        }
    }

    Ok(())
}
