//! Configuration command handler.
//!
//! Prints the resolved configuration as pretty JSON, every value paired with
//! its source:
//!
//! ```json
//! {
//!   "packs": {
//!     "value": 6,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "packs": {
            "value": config.packs,
            "source": sources.packs,
        },
        "penetration": {
            "value": config.penetration,
            "source": sources.penetration,
        },
        "rounds": {
            "value": config.rounds,
            "source": sources.rounds,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "mode": {
            "value": config.mode,
            "source": sources.mode,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
