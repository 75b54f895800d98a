use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mechcalc engineering calculators
#[derive(Parser)]
#[command(name = "mechcalc")]
#[command(version, about = "Engineering calculators with worked substitutions", long_about = None)]
pub struct CliCommand {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG also works
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available calculators
    List,

    /// Show a calculator's parameters, results and equations
    Describe {
        /// Calculator name, e.g. crack_growth
        #[arg(value_name = "CALCULATOR")]
        calculator: String,
    },

    /// Run one calculator on a JSON input record
    Run {
        /// Calculator name, e.g. fatigue
        #[arg(value_name = "CALCULATOR")]
        calculator: String,

        /// Read the input record from a file
        #[arg(long, value_name = "FILE", conflicts_with = "json", required_unless_present = "json")]
        input: Option<PathBuf>,

        /// Input record as inline JSON
        #[arg(long, value_name = "JSON")]
        json: Option<String>,

        /// Monte Carlo seed used when the input has none
        #[arg(long)]
        seed: Option<u64>,

        /// Monte Carlo trial count used when the input has none
        #[arg(long)]
        trials: Option<u32>,
    },

    /// Evaluate every item of a worksheet file
    Worksheet {
        /// Path to the .mcw worksheet
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Override the worksheet's default seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the worksheet's default trial count
        #[arg(long)]
        trials: Option<u32>,
    },

    /// Convert a value between units of one quantity
    Convert {
        /// Quantity, e.g. pressure
        quantity: String,

        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Unit to convert from, e.g. psi
        from: String,

        /// Unit to convert to, e.g. MPa
        to: String,
    },

    /// Print the equation reference as markdown
    Equations,
}
