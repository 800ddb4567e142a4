//! Simulation command: plays a whole session and reports the outcome tally.
//!
//! # Run modes
//!
//! - `batch`: no narrative; each round's settlement key is appended to the
//!   export file, which is truncated first.
//! - `interactive`: the narrative goes to the screen and to the log file,
//!   and the screen is cleared between rounds.
//!
//! # Environment Variables
//!
//! - `HILO_SIM_BREAK_AFTER`: stop the session after N rounds (exit code 130)
//!
//! Ctrl+C stops the session the same way once the current round is settled.

use std::io::Write;
use std::path::Path;

use hilo_ai::create_strategy;
use hilo_engine::logger::{FileNarrative, Narrative, NullNarrative, RoundLogger, RoundRecord, Tee};
use hilo_engine::session::{Session, SessionSummary, StopHandle};

use crate::config::{self, Overrides, RunMode};
use crate::error::CliError;
use crate::formatters::{render_report_table, supports_unicode};
use crate::interrupt;
use crate::io_utils::ExportSink;
use crate::ui;

pub const BREAK_AFTER_ENV: &str = "HILO_SIM_BREAK_AFTER";
pub const DEFAULT_EXPORT: &str = "export.txt";
pub const DEFAULT_LOG: &str = "log.txt";

/// Arguments of `hilo sim` after clap parsing.
#[derive(Debug, Clone)]
pub struct SimArgs {
    pub overrides: Overrides,
    pub strategy: String,
    pub export: Option<String>,
    pub log: Option<String>,
    pub records: Option<String>,
}

/// Handle the sim command.
///
/// Resolves the configuration, runs the session in the configured mode,
/// then prints the report table followed by `Simulated: N rounds`.
///
/// # Errors
///
/// `CliError::Config` for invalid parameters or an unknown strategy,
/// `CliError::Io` when an output file cannot be written, `CliError::Engine`
/// on a fatal invariant violation, and `CliError::Interrupted` when the
/// session was stopped early.
pub fn handle_sim_command(
    args: SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load_with_sources()?
        .with_overrides(args.overrides.clone())?
        .config;
    tracing::debug!(
        mode = cfg.mode.as_str(),
        packs = cfg.packs,
        penetration = cfg.penetration,
        rounds = cfg.rounds,
        "sim configuration resolved"
    );
    match cfg.mode {
        RunMode::Batch if args.log.is_some() => {
            ui::display_warning(err, "--log is only written in interactive mode")?
        }
        RunMode::Interactive if args.export.is_some() => {
            ui::display_warning(err, "--export is only written in batch mode")?
        }
        _ => {}
    }

    let policy = create_strategy(&args.strategy)?;
    let mut session = Session::new(cfg.session(), policy)?;
    session.engine_mut().set_ascii_cards(!supports_unicode());

    let break_after = std::env::var(BREAK_AFTER_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|n| *n > 0);
    let stop = session.stop_handle();
    interrupt::stop_on_ctrl_c(stop.clone());

    let mut records = match &args.records {
        Some(p) => RoundLogger::create(p)?,
        None => RoundLogger::discard(),
    };

    let summary = match cfg.mode {
        RunMode::Batch => run_batch(&mut session, &args, &mut records, &stop, break_after)?,
        RunMode::Interactive => {
            run_interactive(&mut session, &args, &mut records, &stop, break_after, out)?
        }
    };
    records.flush()?;

    write!(out, "{}", render_report_table(session.tally()))?;
    if summary.stopped {
        writeln!(out, "Interrupted: played {}/{}", summary.rounds, cfg.rounds)?;
        return Err(CliError::Interrupted(format!(
            "played {}/{} rounds",
            summary.rounds, cfg.rounds
        )));
    }
    writeln!(out, "Simulated: {} rounds", summary.rounds)?;
    Ok(())
}

fn check_break(stop: &StopHandle, break_after: Option<u64>, record: &RoundRecord) {
    if let Some(n) = break_after
        && record.round >= n
    {
        stop.stop();
    }
}

fn run_batch(
    session: &mut Session,
    args: &SimArgs,
    records: &mut RoundLogger,
    stop: &StopHandle,
    break_after: Option<u64>,
) -> Result<SessionSummary, CliError> {
    let path = args.export.as_deref().unwrap_or(DEFAULT_EXPORT);
    let mut sink = ExportSink::create(Path::new(path))?;
    let summary = session.run(&mut NullNarrative, |rec| {
        sink.append(rec.outcome)?;
        records.write(rec)?;
        check_break(stop, break_after, rec);
        Ok::<(), CliError>(())
    })?;
    let written = sink.finish()?;
    tracing::debug!(path, written, "export file closed");
    Ok(summary)
}

fn run_interactive(
    session: &mut Session,
    args: &SimArgs,
    records: &mut RoundLogger,
    stop: &StopHandle,
    break_after: Option<u64>,
    out: &mut dyn Write,
) -> Result<SessionSummary, CliError> {
    let mut log = FileNarrative::open(args.log.as_deref().unwrap_or(DEFAULT_LOG), true)?;
    while !session.is_finished() {
        if session.rounds_played() > 0 {
            ui::clear_screen(out)?;
        }
        let mut screen = ScreenNarrative::new(out);
        let played = {
            let mut tee = Tee::new(&mut screen, &mut log);
            session.play_round(&mut tee)?
        };
        screen.finish()?;
        let Some(rec) = played else {
            break;
        };
        records.write(&rec)?;
        check_break(stop, break_after, &rec);
    }
    Ok(session.summary())
}

/// Narrative sink printing to the command's output stream. The first write
/// error is kept and surfaced once the round is over.
struct ScreenNarrative<'a> {
    out: &'a mut dyn Write,
    failed: Option<std::io::Error>,
}

impl<'a> ScreenNarrative<'a> {
    fn new(out: &'a mut dyn Write) -> Self {
        Self { out, failed: None }
    }

    fn finish(self) -> std::io::Result<()> {
        match self.failed {
            Some(e) => Err(e),
            None => self.out.flush(),
        }
    }
}

impl Narrative for ScreenNarrative<'_> {
    fn line(&mut self, text: &str) {
        if self.failed.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", text) {
            self.failed = Some(e);
        }
    }
}
