//! Command-line entry point: load locations, plan the survey, write reports.

use clap::Parser;
use ga_survey::config::Config;
use ga_survey::problem::SurveyProblem;
use ga_survey::report;
use ga_survey::weather::WeatherTable;
use ga_survey::Planner;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ga_survey", about = "Multi-day drone survey route planner")]
struct Args {
    /// CSV file with `cep,latitude,longitude` rows
    #[arg(short, long, default_value = "data/coordenadas.csv")]
    input: PathBuf,

    /// Location code of the depot row
    #[arg(long, default_value = "82821020")]
    depot: String,

    /// Where to write the per-edge route CSV
    #[arg(short, long, default_value = "route_plan.csv")]
    output: PathBuf,

    /// Optional text summary file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Dump the full plan as JSON to stdout
    #[arg(long)]
    json: bool,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of generations
    #[arg(long)]
    generations: Option<usize>,

    /// Override the population size
    #[arg(long)]
    population: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let problem = SurveyProblem::from_csv_file(&args.input, &args.depot, WeatherTable::default())?;

    let mut config = Config::new();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(generations) = args.generations {
        config = config.with_generations(generations);
    }
    if let Some(population) = args.population {
        config = config.with_population_size(population);
    }

    let mut planner = Planner::new(problem, config);
    let result = planner.run();

    report::write_route_csv(&result.trace, &args.output)?;
    if let Some(summary) = &args.summary {
        report::write_summary(&result, summary)?;
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    println!(
        "Route planned over {} locations: fitness {:.0}, {} recharge landings, report at {}",
        result.codes.len().saturating_sub(2),
        result.fitness,
        result.landings.iter().filter(|&&l| l).count(),
        args.output.display()
    );

    Ok(())
}
