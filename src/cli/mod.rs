//! CLI argument definitions and command dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::export::SizeOption;

/// snapdoc - capture browser tab screenshots and export them as a DOCX report.
///
/// Robot Mode: Use --robot or --format=json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "snapdoc", version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)] // CLI flags naturally use multiple bools
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "SNAPDOC_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose output (repeat for more detail)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::BoolishValueParser::new(),
        default_value_t = false,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
    )]
    pub no_color: bool,

    /// Session file (defaults to the runtime dir)
    #[arg(long, short = 's', global = true, env = "SNAPDOC_SESSION")]
    pub session: Option<PathBuf>,

    /// Config file (defaults to the user config dir)
    #[arg(long, global = true, env = "SNAPDOC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // === Session ===
    /// Capture a screenshot of the tab and add it to the session
    Capture(CaptureArgs),

    /// Show the current session (thumbnails and count)
    #[command(visible_alias = "list")]
    Status(StatusArgs),

    /// Delete all screenshots in the session
    #[command(visible_alias = "clear-all")]
    Clear(ClearArgs),

    // === Export ===
    /// Export the session as a DOCX document and reset it
    Export(ExportArgs),

    // === Utilities ===
    /// Show version and build information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// === Argument Structs ===

#[derive(Parser, Debug)]
pub struct CaptureArgs {
    /// Page to navigate the capture tab to (overrides capture_url in config)
    #[arg(long, short = 'u', env = "SNAPDOC_URL")]
    pub url: Option<String>,

    /// Capture timeout in seconds
    #[arg(long, short = 't')]
    pub timeout: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {}

#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Document title (falls back to the configured default)
    #[arg(long, short = 'T')]
    pub title: Option<String>,

    /// Image size in the document
    #[arg(long, short = 'S')]
    pub size: Option<SizeOption>,

    /// Directory to save the document into
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
