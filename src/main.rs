mod cli;
mod output;

use clap::Parser;
use cli::Cli;
use filelookup::config::Config;
use log::debug;
use output::LookupOutput;

/// Exit code when nothing matched
const EXIT_NOT_FOUND: i32 = 1;
/// Exit code for usage, config and read errors
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_NOT_FOUND),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Returns whether a file was found.
fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = if cli.no_config {
        Config::default()
    } else {
        Config::load()?
    };
    if let Some(source) = &config.source {
        debug!("Using config from {}", source.display());
    }

    let request = cli.to_request(&config)?;
    debug!("Looking up {:?}", request);

    let result = filelookup::lookup(&request)?;

    if cli.json {
        output::print_json(&LookupOutput::new(&request.directory, result.as_ref()));
    } else if let Some(found) = &result {
        output::print_text(found);
    }

    Ok(result.is_some())
}
