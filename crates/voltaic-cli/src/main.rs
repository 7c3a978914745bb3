//! Voltaic command-line interface.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use voltaic_parser::{ParseOptions, load_netlist_with};
use voltaic_solver::{SolverConfig, SolverStrategy, solve_with};

mod output;

use output::{OutputFormat, print_warnings, render_dc_solution, render_json};

#[derive(Parser)]
#[command(name = "voltaic")]
#[command(about = "DC operating point solver for linear resistive circuits", long_about = None)]
#[command(version)]
struct Cli {
    /// Input netlist file
    #[arg(value_name = "NETLIST")]
    input: PathBuf,

    /// Linear solver: auto, dense, or sparse
    #[arg(long, default_value = "auto")]
    solver: String,

    /// Force the sparse solver (same as --solver sparse)
    #[arg(long, conflicts_with = "solver")]
    sparse: bool,

    /// System size at or above which the auto solver goes sparse
    #[arg(long, value_name = "N")]
    sparse_threshold: Option<usize>,

    /// Treat unrecognized netlist lines as errors
    #[arg(long)]
    strict: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn solver_config(&self) -> Result<SolverConfig> {
        let strategy = if self.sparse {
            SolverStrategy::Sparse
        } else {
            SolverStrategy::from_name(&self.solver).ok_or_else(|| {
                anyhow!("unknown solver '{}' (expected auto, dense or sparse)", self.solver)
            })?
        };

        let mut config = SolverConfig::default().with_strategy(strategy);
        if let Some(threshold) = self.sparse_threshold {
            config = config.with_sparse_threshold(threshold);
        }
        Ok(config)
    }

    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    let env = env_logger::Env::default()
        .filter("VOLTAIC_LOG")
        .write_style("VOLTAIC_LOG_STYLE");
    env_logger::Builder::new()
        .format_timestamp(None)
        .filter_level(default_level)
        .parse_env(env)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.solver_config()?;
    let options = ParseOptions { strict: cli.strict };

    let parsed = load_netlist_with(&cli.input, &options)
        .with_context(|| format!("failed to load netlist: {}", cli.input.display()))?;
    // The parser logs skipped lines; print them directly when logging is silenced
    if !log::log_enabled!(log::Level::Warn) {
        print_warnings(&parsed.warnings);
    }

    let circuit = parsed.circuit;
    log::info!(
        "circuit: {} elements, {} nodes",
        circuit.num_elements(),
        circuit.node_count()
    );

    let solution = solve_with(&circuit, &config).context(
        "DC solve failed; check that the circuit has a ground node (0) and no floating parts",
    )?;

    match cli.output_format() {
        OutputFormat::Text => print!("{}", render_dc_solution(&circuit, &solution)),
        OutputFormat::Json => {
            println!("{}", render_json(&solution).context("failed to serialize results")?)
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn solver_flags() {
        let cli = Cli::parse_from(["voltaic", "net.cir"]);
        assert_eq!(cli.solver_config().unwrap(), SolverConfig::default());

        let cli = Cli::parse_from(["voltaic", "net.cir", "--sparse"]);
        assert_eq!(cli.solver_config().unwrap().strategy, SolverStrategy::Sparse);

        let cli = Cli::parse_from([
            "voltaic",
            "net.cir",
            "--solver",
            "dense",
            "--sparse-threshold",
            "8",
        ]);
        let config = cli.solver_config().unwrap();
        assert_eq!(config.strategy, SolverStrategy::Dense);
        assert_eq!(config.sparse_threshold, 8);

        let cli = Cli::parse_from(["voltaic", "net.cir", "--solver", "gmres"]);
        assert!(cli.solver_config().is_err());
    }

    #[test]
    fn sparse_conflicts_with_solver() {
        let result = Cli::try_parse_from(["voltaic", "net.cir", "--sparse", "--solver", "dense"]);
        assert!(result.is_err());
    }

    #[test]
    fn output_flags() {
        let cli = Cli::parse_from(["voltaic", "net.cir", "--json", "--strict", "-v"]);
        assert_eq!(cli.output_format(), OutputFormat::Json);
        assert!(cli.strict);
        assert!(cli.verbose);
    }
}
