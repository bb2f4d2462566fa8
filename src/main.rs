// src/main.rs
use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use gometrics::cli::{self, Args};
use gometrics::logging;
use gometrics::presentation::{self, ConsolePrinter};

fn main() -> ExitCode {
    let start = Instant::now();
    let args = Args::parse();
    logging::init(args.verbose);

    let Some(path) = args.path.clone() else {
        // No path: show usage and leave quietly.
        let _ = Args::command().print_help();
        return ExitCode::SUCCESS;
    };

    let printer = ConsolePrinter::new(io::stdout());
    let config = match cli::build_config(&args, path) {
        Ok(config) => config,
        Err(e) => {
            let _ = printer.error(&e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "starting run");

    let _ = printer.header(&presentation::project_name(&config.walk.root));

    match gometrics_engine::run(&config, &printer) {
        Ok(report) => {
            let _ = presentation::print_failures(&mut io::stderr(), &report.failures);
            let elapsed = args.time.then(|| start.elapsed());
            let _ = printer.summary(&report.summary, elapsed);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let _ = printer.error(&e);
            ExitCode::FAILURE
        }
    }
}
