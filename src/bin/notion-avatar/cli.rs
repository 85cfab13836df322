//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use notion_avatar::{AvatarPart, ImageFormat};

#[derive(Parser)]
#[command(
    name = "notion-avatar",
    version,
    about = "Compose notion-style avatars from layered SVG parts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Asset directory containing `preview/` and `part/`.
    #[arg(long, value_name = "DIR", default_value = "public/avatar", global = true)]
    pub assets: PathBuf,

    /// JSON file with the highest style index per part.
    #[arg(long, value_name = "FILE", global = true)]
    pub catalog: Option<PathBuf>,

    /// JSON file with editor options (view box, preview size, pixel ratio, modal agents).
    #[arg(long, value_name = "FILE", global = true)]
    pub options: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a random configuration as JSON.
    Random,

    /// Advance one part's style and print the new configuration.
    Cycle(CycleArgs),

    /// List the selection controls for a configuration.
    Controls(ConfigArgs),

    /// Print the composite SVG for a configuration.
    Compose(ConfigArgs),

    /// Export the avatar as PNG or SVG.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration JSON file (random when omitted).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct CycleArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Part to advance.
    #[arg(long, value_enum)]
    pub part: AvatarPart,

    /// Number of steps to advance.
    #[arg(long, default_value_t = 1)]
    pub times: u32,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,

    /// Directory that receives the image (or the modal page).
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,

    /// User agent used to pick modal or download delivery.
    #[arg(long = "user-agent", default_value = "")]
    pub user_agent: String,

    /// Device pixel ratio for PNG output (overrides the options file).
    #[arg(long)]
    pub scale: Option<f32>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
