use clap::Parser;
use filelookup::LookupRequest;
use filelookup::config::Config;
use log::LevelFilter;
use std::path::PathBuf;
use thiserror::Error;

/// Find the first matching file in a directory, optionally searching its parents
#[derive(Parser, Debug)]
#[command(name = "filelookup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Candidate filenames, highest priority first
    pub candidates: Vec<String>,

    /// Directory to start searching from
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Keep searching in parent directories
    #[arg(short, long)]
    pub bubble: bool,

    /// Print the matched file's contents instead of its path
    #[arg(short, long)]
    pub contents: bool,

    /// Resolve the directory to an absolute path first, so bubbling can reach the root
    #[arg(short, long)]
    pub absolute: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Ignore config files
    #[arg(long)]
    pub no_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(
        "No candidate filenames given. Pass them as arguments or set \"candidates\" in a config file."
    )]
    NoCandidates,

    #[error("Failed to resolve {path}: {source}")]
    Absolute {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Combine the command line with config defaults.
    ///
    /// Candidates given on the command line replace the config's; flags are
    /// enabled if either source enables them.
    pub fn to_request(&self, config: &Config) -> Result<LookupRequest, CliError> {
        let candidates = if self.candidates.is_empty() {
            &config.candidates
        } else {
            &self.candidates
        };
        if candidates.is_empty() {
            return Err(CliError::NoCandidates);
        }

        let directory = if self.absolute {
            std::path::absolute(&self.dir).map_err(|source| CliError::Absolute {
                path: self.dir.clone(),
                source,
            })?
        } else {
            self.dir.clone()
        };

        let mut request = LookupRequest::new(directory, candidates.iter().cloned());
        if self.bubble || config.bubble {
            request = request.with_bubble();
        }
        if self.contents || config.contents {
            request = request.with_contents();
        }
        Ok(request)
    }
}
