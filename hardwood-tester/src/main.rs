//! Automated QA sweeps for the Hardwood career engine.

mod career_tester;
mod scenarios;

use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;

use scenarios::{CATALOG, ScenarioResult, get_scenario};

#[derive(Debug, Parser)]
#[command(name = "hardwood-tester", version)]
#[command(about = "Automated QA sweeps for the Hardwood career simulation engine")]
struct Args {
    /// Scenarios to run (comma-separated)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// Seeds to run each scenario with (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Print each result as it finishes
    #[arg(short, long)]
    verbose: bool,
}

fn split_csv(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

fn parse_seeds(raw: &str) -> Result<Vec<u64>> {
    let mut seeds = Vec::new();
    for part in split_csv(raw) {
        match part.parse::<u64>() {
            Ok(seed) => seeds.push(seed),
            Err(_) => bail!("invalid seed: {part}"),
        }
    }
    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}

fn print_report(results: &[ScenarioResult], total: Duration) {
    println!();
    println!("{}", "Sweep Results".bright_cyan().bold());
    println!("{}", "=============".cyan());
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;
    println!("Total runs: {}", results.len());
    println!("Passed: {}", passed.to_string().green());
    println!("Failed: {}", failed.to_string().red());
    println!("Total time: {total:?}");
    println!();
    for result in results {
        let status = if result.passed {
            "PASS".green()
        } else {
            "FAIL".red()
        };
        println!(
            "{status} {} (seed {}) in {:?}",
            result.name, result.seed, result.duration
        );
        if let Some(error) = &result.error {
            println!("     {}", error.red());
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    let seeds = parse_seeds(&args.seeds)?;
    let mut results = Vec::new();
    let started = Instant::now();

    for name in split_csv(&args.scenarios) {
        let Some(scenario) = get_scenario(name) else {
            bail!("unknown scenario: {name} (try --list-scenarios)");
        };
        for &seed in &seeds {
            let result = scenario.run(seed);
            if args.verbose {
                let status = if result.passed { "ok" } else { "FAILED" };
                println!("{} seed {} ... {status}", result.name, result.seed);
            }
            results.push(result);
        }
    }

    let all_passed = results.iter().all(|r| r.passed);
    print_report(&results, started.elapsed());
    Ok(all_passed)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        println!("Available scenarios:");
        for scenario in &CATALOG {
            println!("  {:<12} {}", scenario.name, scenario.description);
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}", format!("error: {err:#}").red());
            ExitCode::FAILURE
        }
    }
}
