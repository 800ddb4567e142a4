//! Command-line argument definitions.

use clap::{Parser, Subcommand};

use crate::config::RunMode;

#[derive(Parser, Debug)]
#[command(
    name = "hilo",
    version,
    about = "Hi-Lo card counting blackjack simulator"
)]
pub struct HiloCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a session and print the outcome table
    Sim {
        /// Round budget (default: 2000 batch, 20 interactive)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        rounds: Option<u64>,
        /// Shoe seed; omitted draws one at random
        #[arg(long)]
        seed: Option<u64>,
        /// Packs per shoe
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..))]
        packs: Option<u8>,
        /// Cards dealt before the shoe is reshuffled
        #[arg(long)]
        penetration: Option<usize>,
        #[arg(long, value_enum)]
        mode: Option<RunMode>,
        /// Strategy name (hilo or basic)
        #[arg(long, default_value = "hilo")]
        strategy: String,
        /// Batch-mode settlement file [default: export.txt]
        #[arg(long)]
        export: Option<String>,
        /// Interactive-mode narrative log [default: log.txt]
        #[arg(long)]
        log: Option<String>,
        /// Also write one JSON record per round to this file
        #[arg(long)]
        records: Option<String>,
    },
    /// Play one round from a fresh shoe and show what happened
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "hilo")]
        strategy: String,
    },
    /// Show resolved configuration and where each value came from
    Cfg,
}
