//! tablegate CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`. Failures are reported
//! as a JSON error line on stdout and a non-zero exit code.

use tablegate::cli;

fn main() {
    if let Err(e) = cli::run() {
        if cli::write_error(e.code_str(), e.message()).is_err() {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }
}
