//! Output formatting for JSON and text modes

use filelookup::LookupResult;
use serde::Serialize;
use std::path::Path;

/// Result of a lookup
#[derive(Debug, Serialize)]
pub struct LookupOutput {
    pub found: bool,
    pub directory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}

impl LookupOutput {
    pub fn new(directory: &Path, result: Option<&LookupResult>) -> Self {
        Self {
            found: result.is_some(),
            directory: directory.display().to_string(),
            path: result
                .and_then(LookupResult::as_path)
                .map(|path| path.display().to_string()),
            contents: result
                .and_then(LookupResult::as_contents)
                .map(str::to_string),
        }
    }
}

/// Print a lookup result as plain text.
///
/// Paths get a trailing newline; contents are printed verbatim.
pub fn print_text(result: &LookupResult) {
    match result {
        LookupResult::Path(path) => println!("{}", path.display()),
        LookupResult::Contents(contents) => print!("{}", contents),
    }
}

/// Print JSON output to stdout
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(2);
        }
    }
}
