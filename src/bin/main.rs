use std::env;
use std::process::ExitCode;

use xsbench::common::report;
use xsbench::input::arguments;
use xsbench::monte_carlo::solver;
use xsbench::XsResult;

use colored::*;
use console::style;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {}", style("error:").bold().red(), error);
            ExitCode::FAILURE
        }
    }
}

fn run() -> XsResult<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = arguments::parse_arguments(&args)?;

    report::print_logo();
    report::print_input_summary(&config);

    let results = solver::run_benchmark(&config)?;

    println!();
    println!("{}", "Simulation complete.".bold().green());
    report::print_results(&config, &results);

    if config.save_results {
        for result in &results {
            result.append_to_results_log(&config.results_file, config.group_label)?;
        }
        report::step(
            "\u{1F4BE}",
            &format!("Results appended to {}", config.results_file.display()),
        );
    }
    Ok(())
}
