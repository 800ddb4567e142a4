//! # Hilo CLI Library
//!
//! Command-line front end for the Hi-Lo blackjack simulator.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, dispatches to a subcommand and returns the
//! process exit code. Output goes only to the two streams it is given.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["hilo", "sim", "--rounds", "100", "--seed", "7"];
//! let code = hilo_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: play a session and print the outcome table
//! - `deal`: play one round and print its narrative
//! - `cfg`: show the resolved configuration with value sources

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod interrupt;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, HiloCli};
use commands::{SimArgs, handle_cfg_command, handle_deal_command, handle_sim_command};
use config::Overrides;

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "deal", "cfg"];

/// Parse `args` and run the selected command.
///
/// Returns `0` on success, `2` on any error and `130` when a session was
/// stopped before its round budget was spent.
///
/// ```
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = hilo_cli::run(["hilo", "deal", "--seed", "42"], &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().contains("Settlement: "));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HiloCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Sim {
            rounds,
            seed,
            packs,
            penetration,
            mode,
            strategy,
            export,
            log,
            records,
        } => {
            let args = SimArgs {
                overrides: Overrides {
                    packs,
                    penetration,
                    rounds,
                    seed,
                    mode,
                },
                strategy,
                export,
                log,
                records,
            };
            handle_sim_command(args, out, err)
        }
        Commands::Deal { seed, strategy } => handle_deal_command(seed, &strategy, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            tracing::info!(%msg, "session interrupted");
            exit_code::INTERRUPTED
        }
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version print to stdout and succeed
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            if writeln!(err, "{}", e).is_err()
                || writeln!(err).is_err()
                || writeln!(err, "Hilo Blackjack Simulator CLI").is_err()
                || writeln!(err, "Usage: hilo <command> [options]\n").is_err()
                || writeln!(err, "Commands:").is_err()
            {
                return exit_code::ERROR;
            }
            for c in COMMANDS {
                if writeln!(err, "  {}", c).is_err() {
                    return exit_code::ERROR;
                }
            }
            if writeln!(err, "\nFor full help, run: hilo --help").is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}
