// Commands are namespaced per screen of the dashboard (`product list`,
// `auth login`, `course show`) rather than flat verbs.

mod commands;
mod common;
mod enums;

pub use commands::*;
pub use common::*;
pub use enums::*;

use clap::Parser;

#[derive(Parser)]
#[command(name = "bisoshi")]
#[command(about = "Manage products, clients and sales from the terminal", long_about = None)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Data directory (default: $BISOSHI_PATH, then the system data dir)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
