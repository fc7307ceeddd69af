//! `savings-policy`: solves the two-period savings problem on a grid and
//! compares each approach with the closed form.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use strand_savings::{Approach, Policy, SavingsConfig, solve_policy};

/// Solve a two-period savings policy with bracketed solvers.
#[derive(Parser)]
#[command(name = "savings-policy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config file; missing fields use the tutorial values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which solver(s) to run
    #[arg(short, long, value_enum, default_value_t = Which::Both)]
    approach: Which,

    /// Discount factor in (0, 1), overriding the config
    #[arg(short, long)]
    beta: Option<f64>,

    /// Log every solver iteration
    #[arg(short, long)]
    verbose: bool,

    /// Plot each policy against the closed form
    #[cfg(feature = "plot")]
    #[arg(long)]
    plot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Which {
    Minimize,
    RootFind,
    Both,
}

impl Which {
    fn approaches(self) -> &'static [Approach] {
        match self {
            Self::Minimize => &[Approach::Minimize],
            Self::RootFind => &[Approach::RootFind],
            Self::Both => &[Approach::Minimize, Approach::RootFind],
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SavingsConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SavingsConfig::default(),
    };
    if let Some(beta) = cli.beta {
        config.beta = beta;
    }
    config.verbose |= cli.verbose;

    let default_level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let grid = config.grid()?;
    let options = config.options()?;

    let policies: Vec<Policy> = cli
        .approach
        .approaches()
        .iter()
        .map(|&approach| solve_policy(&grid, config.beta, approach, &options))
        .collect();

    for policy in &policies {
        print_policy(policy);
        match policy.max_error() {
            Some(error) => info!(approach = %policy.approach(), max_error = error, "done"),
            None => info!(approach = %policy.approach(), "no state converged"),
        }
    }

    #[cfg(feature = "plot")]
    if cli.plot {
        plot::show(&policies, config.beta)?;
    }

    Ok(())
}

fn print_policy(policy: &Policy) {
    println!("\n{}", policy.approach());
    println!(
        "{:>8} {:>12} {:>12} {:>10} {:>18} {:>6}",
        "a", "x", "closed form", "error", "status", "iters"
    );
    for entry in policy.entries() {
        match &entry.outcome {
            Ok(choice) => println!(
                "{:>8.3} {:>12.6} {:>12.6} {:>10.2e} {:>18} {:>6}",
                entry.assets,
                choice.savings,
                choice.benchmark,
                choice.error(),
                format!("{:?}", choice.status),
                choice.iters
            ),
            Err(error) => println!("{:>8.3} failed: {error}", entry.assets),
        }
    }
}

#[cfg(feature = "plot")]
mod plot {
    use strand_observers::{PlotObserver, ShowConfig};
    use strand_savings::{Approach, ObjectiveParams, Policy, closed_form};

    /// Shows every policy and the closed form on one chart.
    pub(super) fn show(policies: &[Policy], beta: f64) -> anyhow::Result<()> {
        let mut obs = PlotObserver::<3>::new(["minimize", "root-find", "closed form"]);

        for policy in policies {
            let slot = match policy.approach() {
                Approach::Minimize => 0,
                Approach::RootFind => 1,
            };
            for entry in policy.entries() {
                let mut traces = [None; 3];
                traces[slot] = entry.outcome.as_ref().ok().map(|choice| choice.savings);
                obs.record(entry.assets, traces);
            }
        }

        if let Some(policy) = policies.first() {
            for entry in policy.entries() {
                let exact = ObjectiveParams::new(entry.assets, beta)
                    .ok()
                    .map(|params| closed_form(&params));
                obs.record(entry.assets, [None, None, exact]);
            }
        }

        obs.show(
            ShowConfig::new()
                .title("Savings policy")
                .axes("assets a", "savings x")
                .legend()
                .markers(),
        )
        .map_err(|error| anyhow::anyhow!("plot window failed: {error}"))
    }
}
