use clap::Parser;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

mod cli;

use cli::{Cli, Commands};
use uct_model::SolveReport;
use uct_runner::{run_opt_problem, run_series_problem};

fn print_report(report: &SolveReport) {
    println!("Problem {}: {}", report.name, report.status);
    if let Some(objective) = report.objective_value {
        println!("  Objective: ${objective:.2}");
    }
    println!(
        "  {} variables, {} constraints, solved in {} ms",
        report.num_variables, report.num_constraints, report.solve_time_ms
    );
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let result = match &cli.command {
        Commands::Run {
            name,
            input,
            output,
        } => run_opt_problem(name, input, output).map(|report| {
            print_report(&report);
        }),
        Commands::Series {
            name,
            input,
            output,
        } => run_series_problem(name, input, output).map(|summary| {
            for report in &summary.days {
                print_report(report);
            }
            if !summary.completed {
                println!("Series stopped early: a day ended without an optimum.");
            }
        }),
    };

    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}
