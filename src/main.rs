//! Binary entrypoint for the `findlinks` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    match findlinks::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
