//! snapdoc CLI - capture browser tab screenshots and export them as a DOCX report.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use snapdoc::capture::CaptureRelay;
use snapdoc::cli::{Cli, Commands};
use snapdoc::config::SnapdocConfig;
use snapdoc::error::{Result, SnapError};
use snapdoc::export::{DocxExporter, ExportOptions, save_artifact};
use snapdoc::logging;
use snapdoc::output::{HumanOutput, RobotOutput, SessionOutput, count_label};
use snapdoc::session::{FileStore, SnapshotSession, default_session_path};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> &'static str {
        option_env!("VERGEN_GIT_DIRTY").unwrap_or("false")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    logging::init_logging(cli.use_json(), cli.verbose, cli.quiet);

    // Run the command
    let result = run(&cli);

    // Handle errors
    if let Err(e) = result {
        output_error(&cli, &e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None => print_quick_start(cli),
        Some(Commands::Capture(args)) => cmd_capture(cli, args),
        Some(Commands::Status(args)) => cmd_status(cli, args),
        Some(Commands::Clear(args)) => cmd_clear(cli, args),
        Some(Commands::Export(args)) => cmd_export(cli, args),
        Some(Commands::Version) => cmd_version(cli),
        Some(Commands::Completions(args)) => cmd_completions(cli, args),
    }
}

// === Wiring ===

fn load_config(cli: &Cli) -> Result<SnapdocConfig> {
    match &cli.config {
        Some(path) => SnapdocConfig::load_from(path),
        None => SnapdocConfig::load(),
    }
}

fn session_path(cli: &Cli, config: &SnapdocConfig) -> PathBuf {
    cli.session
        .clone()
        .or_else(|| config.session_file.clone())
        .unwrap_or_else(default_session_path)
}

fn open_session(cli: &Cli, config: &SnapdocConfig) -> SnapshotSession<FileStore> {
    SnapshotSession::restore(FileStore::open(session_path(cli, config)))
}

fn make_output(cli: &Cli) -> Box<dyn SessionOutput> {
    if cli.use_json() {
        Box::new(RobotOutput::new(cli.use_compact_json()))
    } else {
        Box::new(HumanOutput::new(cli.quiet))
    }
}

#[cfg(feature = "cdp")]
fn open_capture_relay(
    config: &SnapdocConfig,
    args: &snapdoc::cli::CaptureArgs,
) -> Result<CaptureRelay> {
    use std::sync::Arc;
    use std::time::Duration;

    use snapdoc::capture::CdpTabCapture;

    let url = args
        .url
        .clone()
        .or_else(|| config.capture_url.clone())
        .ok_or(SnapError::NoCaptureUrl)?;
    let viewport = (config.viewport.width, config.viewport.height);

    let host = CdpTabCapture::launch(&url, viewport)?;
    let timeout = args
        .timeout
        .or(config.capture_timeout_secs)
        .unwrap_or(CaptureRelay::DEFAULT_TIMEOUT.as_secs());

    Ok(CaptureRelay::new(Arc::new(host)).with_timeout(Duration::from_secs(timeout)))
}

#[cfg(not(feature = "cdp"))]
fn open_capture_relay(
    _config: &SnapdocConfig,
    _args: &snapdoc::cli::CaptureArgs,
) -> Result<CaptureRelay> {
    Err(SnapError::NoCaptureBackend)
}

// === Command Implementations ===

fn cmd_capture(cli: &Cli, args: &snapdoc::cli::CaptureArgs) -> Result<()> {
    let config = load_config(cli)?;
    let relay = open_capture_relay(&config, args)?;
    let mut session = open_session(cli, &config);

    session.capture(&relay)?;
    let total = session.len();
    let snapshot = session
        .snapshots()
        .last()
        .expect("session is non-empty after capture");
    make_output(cli).snapshot_captured(total, snapshot, total);
    Ok(())
}

fn cmd_status(cli: &Cli, _args: &snapdoc::cli::StatusArgs) -> Result<()> {
    let config = load_config(cli)?;
    let session = open_session(cli, &config);
    make_output(cli).session_summary(session.snapshots());
    Ok(())
}

fn cmd_clear(cli: &Cli, args: &snapdoc::cli::ClearArgs) -> Result<()> {
    let config = load_config(cli)?;
    let mut session = open_session(cli, &config);
    let count = session.len();

    if count > 0 && !args.yes {
        if cli.use_json() {
            return Err(SnapError::ConfirmationRequired);
        }
        if !confirm(&format!(
            "Are you sure you want to delete all {}?",
            count_label(count)
        ))? {
            println!("Aborted");
            return Ok(());
        }
    }

    session.clear()?;
    make_output(cli).session_cleared(count);
    Ok(())
}

fn cmd_export(cli: &Cli, args: &snapdoc::cli::ExportArgs) -> Result<()> {
    let config = load_config(cli)?;
    let mut session = open_session(cli, &config);
    let count = session.len();

    let options = ExportOptions::new(
        args.title.clone().or_else(|| config.default_title.clone()),
        args.size.unwrap_or(config.default_size),
    );
    let out_dir = args
        .out
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let output = make_output(cli);
    match session.export(&options, &DocxExporter::new())? {
        Some(artifact) => {
            let path = save_artifact(&artifact, &out_dir)?;
            output.export_complete(&path, count);
        }
        None => output.export_skipped_empty(),
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        output_json(
            cli,
            &serde_json::json!({
                "version": build_info::VERSION,
                "git_sha": build_info::git_sha(),
                "git_dirty": build_info::git_dirty() == "true",
                "build_timestamp": build_info::build_timestamp(),
                "rustc_version": build_info::rustc_semver(),
                "target": build_info::target(),
            }),
        );
    } else {
        println!("snapdoc {}", build_info::VERSION);
        println!(
            "git: {}{}",
            build_info::git_sha(),
            if build_info::git_dirty() == "true" {
                " (dirty)"
            } else {
                ""
            }
        );
        println!("built: {}", build_info::build_timestamp());
        println!("rustc: {}", build_info::rustc_semver());
        println!("target: {}", build_info::target());
    }
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_completions(_cli: &Cli, args: &snapdoc::cli::CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "snapdoc", &mut io::stdout());
    Ok(())
}

// === Quick Start (Robot Mode Optimized) ===

/// Prints quick-start help optimized for both humans and agents.
#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn print_quick_start(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        print_robot_quick_start();
    } else {
        print_human_quick_start();
    }
    Ok(())
}

fn print_robot_quick_start() {
    let help = RobotQuickStart {
        tool: "snapdoc",
        version: build_info::VERSION,
        description: "Capture browser tab screenshots into a session and export a DOCX report",
        session: RobotSession {
            capture: "snapdoc capture --url <URL>",
            status: "snapdoc status --robot",
            clear: "snapdoc clear --yes",
        },
        export: RobotExport {
            export: "snapdoc export --title <TITLE> --size <small|medium|large>",
            sizes: "small=300x200, medium=500x300 (default), large=700x450",
            output: "File named <sanitized_title>_<timestamp>.docx in --out (default: cwd)",
        },
        output_modes: OutputModes {
            human: "--format=text (default)",
            robot: "--robot or --format=json",
            compact: "--format=json-compact",
        },
        session_scope: "Snapshots persist in the runtime dir until cleared or exported",
    };

    println!("{}", serde_json::to_string_pretty(&help).unwrap());
}

fn print_human_quick_start() {
    println!(
        "{} {} - tab capture to DOCX\n",
        "snapdoc".bold().cyan(),
        build_info::VERSION
    );

    println!("{}", "QUICK START".bold().underline());
    println!();

    println!(
        "  {}  Capture the tab",
        "snapdoc capture --url http://localhost:3000".green()
    );
    println!("  {}  Show the session", "snapdoc status".green());
    println!(
        "  {}  Export and reset",
        "snapdoc export --title \"Run 1\" --size large".green()
    );
    println!("  {}  Delete all screenshots", "snapdoc clear".green());
    println!();

    println!("{}", "ROBOT MODE (for agents)".bold().underline());
    println!();
    println!("  {}  JSON output", "snapdoc --robot <command>".cyan());
    println!("  {}  Quick-start JSON", "snapdoc --robot".cyan());
    println!();

    println!("Run {} for full help", "snapdoc --help".yellow());
}

// === Robot Mode JSON Structures ===

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    session: RobotSession,
    export: RobotExport,
    output_modes: OutputModes,
    session_scope: &'static str,
}

#[derive(Serialize)]
struct RobotSession {
    capture: &'static str,
    status: &'static str,
    clear: &'static str,
}

#[derive(Serialize)]
struct RobotExport {
    export: &'static str,
    sizes: &'static str,
    output: &'static str,
}

#[derive(Serialize)]
struct OutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

// === Utility Functions ===

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    io::stderr().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn output_json<T: Serialize>(cli: &Cli, data: &T) {
    let json = if cli.use_compact_json() {
        serde_json::to_string(data).unwrap()
    } else {
        serde_json::to_string_pretty(data).unwrap()
    };
    println!("{json}");
}

fn output_error(cli: &Cli, error: &SnapError) {
    if cli.use_json() {
        let json = serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
    } else {
        eprintln!("{}: {}", "Error".red().bold(), error);
        if let Some(suggestion) = error.suggestion() {
            eprintln!("{}: {}", "Hint".yellow(), suggestion);
        }
    }
}
