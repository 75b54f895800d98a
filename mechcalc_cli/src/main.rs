//! # Mechcalc CLI
//!
//! Command-line front end for `mechcalc_core`. Results are printed as
//! pretty JSON on stdout. On failure the error is printed as JSON on stderr
//! and the process exits with status 1.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use mechcalc_core::calculations::CalculatorKind;
use mechcalc_core::equations::generate_equations_markdown;
use mechcalc_core::units::{convert_value, units_for, Quantity};
use mechcalc_core::worksheet::Outcome;
use mechcalc_core::{load_worksheet, CalcError, CalcResult, WorksheetSettings};
use serde::Serialize;

use crate::command::{CliCommand, Commands};

mod command;

fn main() -> ExitCode {
    let cli = CliCommand::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::debug!("command failed: {}", error);
            let body = serde_json::json!({
                "code": error.error_code(),
                "message": error.to_string(),
                "error": error,
            });
            eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_else(|_| error.to_string()));
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env().format_timestamp(None);
    let _ = builder.try_init();
}

fn run(command: Commands) -> CalcResult<()> {
    match command {
        Commands::List => {
            list();
            Ok(())
        }
        Commands::Describe { calculator } => describe(calculator.parse()?),
        Commands::Run {
            calculator,
            input,
            json,
            seed,
            trials,
        } => {
            let kind: CalculatorKind = calculator.parse()?;
            let text = match (input, json) {
                (Some(path), _) => read_file(&path)?,
                (None, Some(json)) => json,
                (None, None) => {
                    return Err(CalcError::invalid_input("input", "", "pass --input or --json"));
                }
            };
            let item = kind.parse_input(&text)?;
            let settings = settings_with(WorksheetSettings::default(), seed, trials);
            let value = item.evaluate(&settings)?;
            print_json(&value)
        }
        Commands::Worksheet { file, seed, trials } => {
            let mut worksheet = load_worksheet(&file)?;
            worksheet.settings = settings_with(worksheet.settings, seed, trials);
            let reports = worksheet.evaluate_all();

            println!("{} ({} items)", worksheet.meta.title, reports.len());
            for report in &reports {
                let status = match &report.outcome {
                    Outcome::Result(value) if value.get("error").is_some() => "error",
                    Outcome::Result(_) => "ok",
                    Outcome::Error(_) => "error",
                };
                println!("  [{:>5}] {:<16} {}", status, report.calc_type, report.label);
            }
            println!();
            print_json(&reports)
        }
        Commands::Convert {
            quantity,
            value,
            from,
            to,
        } => {
            let quantity: Quantity = quantity.parse()?;
            let converted = convert_value(quantity, &from, &to, value)?;
            println!("{} {} = {} {}", value, from.trim(), converted, to.trim());
            Ok(())
        }
        Commands::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
    }
}

fn settings_with(mut settings: WorksheetSettings, seed: Option<u64>, trials: Option<u32>) -> WorksheetSettings {
    if let Some(seed) = seed {
        settings.default_seed = seed;
    }
    if let Some(trials) = trials {
        settings.default_trials = trials;
    }
    settings
}

fn read_file(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    println!("{}", text);
    Ok(())
}

fn list() {
    println!("{:<18} {:<28} DESCRIPTION", "NAME", "TITLE");
    for kind in CalculatorKind::ALL {
        let info = kind.info();
        println!("{:<18} {:<28} {}", info.name, info.title, info.description);
    }
    println!();
    let quantities: Vec<String> = Quantity::ALL
        .iter()
        .map(|q| format!("{} ({})", q, units_for(*q).len()))
        .collect();
    println!("Unit quantities: {}", quantities.join(", "));
}

fn describe(kind: CalculatorKind) -> CalcResult<()> {
    let info = kind.info();
    println!("{} - {}", info.name, info.title);
    println!("{}", info.description);
    if info.error_convention == mechcalc_core::calculations::ErrorConvention::Sentinel {
        println!("Reports input errors as {{\"error\": \"...\"}}.");
    }

    println!();
    println!("Parameters:");
    for p in &info.parameters {
        println!("  {:<34} {:<10} {}", p.symbol, p.units, p.description);
    }

    println!();
    println!("Returns:");
    for r in &info.returns {
        println!("  {:<34} {:<10} {}", r.symbol, r.units, r.description);
    }

    println!();
    println!("Equations:");
    for eq in &info.equations {
        let meta = eq.metadata();
        println!("  {}: {}", meta.name, meta.formula_plain);
        println!("    ({})", meta.reference.citation());
    }
    Ok(())
}
