//! Command handlers, one module per subcommand.
//!
//! Each handler has the shape `handle_X_command(..., out, err) -> Result<(), CliError>`
//! and writes only to the streams it is given.

pub mod cfg;
pub mod deal;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use sim::{SimArgs, handle_sim_command};
