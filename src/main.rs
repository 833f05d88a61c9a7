use std::env;
use std::io;
use std::process;

use colored::*;

use issue_lens::constants::EXIT_SUCCESS;
use issue_lens::logging::{get_log_file_path, init_logging, log_error, log_info};
use issue_lens::{dispatch, CliContext, DataLoader, FeatureRegistry, LensError, TerminalRenderer};

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let argv: Vec<String> = env::args().collect();
    log_info(&format!("Invoked with {:?}", argv));

    let code = match run(&argv) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report(e),
    };
    process::exit(code);
}

fn run(argv: &[String]) -> Result<(), LensError> {
    let registry = FeatureRegistry::builtin()?;
    let loader = DataLoader::new();
    let mut renderer = TerminalRenderer::new();
    let mut stdout = io::stdout();

    let mut ctx = CliContext::new(&loader, &mut renderer, &mut stdout);
    dispatch(&registry, argv, &mut ctx)
}

fn report(e: LensError) -> i32 {
    let code = e.exit_code();
    match &e {
        // clap formats its own usage, help and version output
        LensError::Cli(err) => {
            if let Err(print_err) = err.print() {
                eprintln!("{}", print_err);
            }
        }
        LensError::EmptyResult(message) => {
            log_info(message);
            eprintln!("{}", message.yellow());
        }
        other => {
            log_error(&other.to_string());
            eprintln!("{} {}", "Error:".red().bold(), other);
            if let Some(path) = get_log_file_path() {
                eprintln!("{}", format!("Details logged to {}", path.display()).dimmed());
            }
        }
    }
    code
}
