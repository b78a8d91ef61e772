//! kern - a small evaluator with file and network effects
//!
//! Usage:
//!   kern              Start interactive REPL
//!   kern -c "forms"   Evaluate forms and print results
//!   kern script.kern  Run a script file

mod cli;
mod logging;
mod rcfile;
mod repl;
mod terminal;

use kern::{Config, Session};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = env::args().collect();
    let cli = cli::parse_args(&args);

    if cli.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if cli.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    let config = Config::load();
    let mut session = Session::with_config(&config);

    if let Some(source) = cli.command {
        return cli::run_command(&mut session, &source);
    }
    if let Some(script) = cli.script {
        return cli::run_script(&mut session, &script);
    }

    match repl::run_repl(&mut session, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("REPL error: {}", e);
            ExitCode::from(1)
        }
    }
}
