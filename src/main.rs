//! zooapi CLI entry point
//!
//! Minimal entrypoint: parse arguments, dispatch, print errors to
//! stderr, exit non-zero on failure. All wiring lives in the CLI module.

use zooapi::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
