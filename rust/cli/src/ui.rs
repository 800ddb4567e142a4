//! Terminal output helpers shared by the commands.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// ANSI clear screen and cursor home, written between interactive rounds.
pub fn clear_screen(out: &mut dyn Write) -> std::io::Result<()> {
    write!(out, "\x1b[2J\x1b[H")?;
    out.flush()
}
