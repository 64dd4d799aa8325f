//! CLI entry point for the `msgviz` message visualizer.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::Colorize;
use serde_json::Value;

use msgviz::capture::ResponseCapture;
use msgviz::theme::Theme;
use msgviz::{logging, parser, theme, visualize};

/// Exit code reported when a stdin read is interrupted by the user.
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(
    name = "msgviz",
    author,
    version,
    about = "Visualize conversational AI message JSON in the terminal",
    long_about = "msgviz - terminal visualizer for conversational AI messages\n\n\
    Renders a message object (role, model metadata, content blocks, token\n\
    usage) as a styled tree: text, tool invocations, tool results, code\n\
    execution output, and unknown block kinds all get their own treatment.",
    after_help = "Examples:\
    \n   msgviz response.json               # Visualize a JSON file\
    \n   cat response.json | msgviz -       # Visualize from stdin\
    \n   msgviz --json '{\"role\":\"user\"}'    # Inline JSON string\
    \n   msgviz --theme light response.json # Pick a color theme"
)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a JSON file, '-' for stdin (default: stdin)
    input: Option<String>,

    /// Treat INPUT as a raw JSON string instead of a path
    #[arg(long)]
    json: bool,

    /// Color theme
    #[arg(long, value_enum, default_value_t = Theme::Auto)]
    theme: Theme,

    /// Also save the raw input to DIR as a timestamped JSON file
    #[arg(long, value_name = "DIR")]
    save_to: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::set_verbose(cli.verbose);
    theme::set_theme(cli.theme);

    if let Some(Commands::Completions { shell }) = cli.command {
        generate_completions(shell);
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if was_interrupted(&err) {
                return ExitCode::from(EXIT_INTERRUPTED);
            }
            let (r, g, b) = theme::RED_RGB;
            eprintln!("{} {err:#}", "Error:".truecolor(r, g, b).bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let raw = read_input(cli)?;
    if raw.trim().is_empty() {
        anyhow::bail!("No input provided");
    }

    let value: Value = serde_json::from_str(&raw).context("Invalid JSON input")?;

    if let Some(dir) = &cli.save_to {
        let capture = ResponseCapture::new(dir)?;
        let path = capture.capture(&value)?;
        logging::info(format!("Saved raw response to {}", path.display()));
    }

    let message = parser::parse_response(&value)?;
    visualize::visualize_message(&message);
    Ok(())
}

fn read_input(cli: &Cli) -> Result<String> {
    if cli.json {
        return cli
            .input
            .clone()
            .context("--json requires an inline JSON argument");
    }

    match cli.input.as_deref() {
        None | Some("-") => read_stdin(),
        Some(path) => read_file(Path::new(path)),
    }
}

fn read_stdin() -> Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        let (r, g, b) = theme::SLATE_RGB;
        eprintln!(
            "{}",
            "No input file specified; reading from stdin (Ctrl+D to finish)".truecolor(r, g, b)
        );
    }
    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    logging::info(format!("Reading {}", path.display()));
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn was_interrupted(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::Interrupted)
    })
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
