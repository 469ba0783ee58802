//! Core library entry for the `findlinks` CLI.
//!
//! `findlinks` rewrites markdown annotations of the form
//! `[n]: <path - search term>` into permalinks pinned to the current commit
//! of a sibling reference repository.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod linkage;
pub mod logging;
pub mod ports;
pub mod reference;
pub mod report;

use clap::Parser;

pub use error::Error;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print to stdout and succeed.
///
/// # Errors
///
/// Returns an error when argument parsing fails, a fatal precondition is not
/// met, or any annotation could not be resolved.
pub fn run<I, T>(args: I) -> Result<(), Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(Error::Usage(err.to_string())),
    };
    logging::init(cli.verbose);

    let config = config::Config::from(&cli);
    let stdout = std::io::stdout();
    let summary = commands::dispatch(&config, &mut stdout.lock())?;
    tracing::info!(
        files = summary.files,
        changed = summary.changed,
        linked = summary.linked,
        write = config.write,
        "done"
    );
    Ok(())
}
