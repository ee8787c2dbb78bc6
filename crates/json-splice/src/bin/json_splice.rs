//! `json-splice`: apply a JSON Patch (RFC 6902) to a document.
//!
//! Usage:
//!   json-splice '<patch-array-json>'
//!
//! The document is read from stdin. The patch operations are the first
//! argument. Log verbosity follows `RUST_LOG` (default `warn`); logs go to
//! stderr.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use json_splice::json_cli::apply_json_patch;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let Some(patch) = std::env::args().nth(1) else {
        eprintln!("First argument must be a JSON patch array.");
        return ExitCode::FAILURE;
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match apply_json_patch(buf.trim(), &patch) {
        Ok(result) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{result}") {
                error!(error = %e, "failed to write result");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
