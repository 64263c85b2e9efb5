//! nickel-shim - command-line front end for the Nickel embedding layer
//!
//! Evaluates and typechecks Nickel programs through the same context the C
//! library exposes, which makes it handy for reproducing what a host sees.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::LoggingConfig;
use output::OutputWriter;
use std::process;

fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    let result = Config::load_with_file(cli.config.as_deref()).and_then(|config| {
        if !config.output.color {
            control::set_override(false);
        }

        if let Err(e) = init_logging(&cli, &config) {
            eprintln!("{}", e);
        }

        run(cli, &config)
    });

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
fn run(cli: Cli, config: &Config) -> Result<()> {
    let use_color = control::SHOULD_COLORIZE.should_colorize();
    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Eval(args) => handlers::handle_eval(args, config, &mut output),
        Commands::Typecheck(args) => handlers::handle_typecheck(args, config, &mut output),
        Commands::Version => handlers::handle_version(&mut output),
        Commands::Config(args) => handlers::handle_config(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_section(&config.logging);
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(&logging_config)
}
