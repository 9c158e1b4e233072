// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use subnuker::app_config::{self, Config};
use subnuker::app_controller::Controller;
use subnuker::file_utils::FileManager;
use subnuker::patterns::MatchMode;
use subnuker::review::ReviewMode;
use subnuker::terminal::TerminalConsole;

// @const: Exit status when the user cancels an interactive review
const EXIT_ABORTED: u8 = 2;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subnuker
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subnuker - remove spam and advertising from subtitle files.
///
/// Every cell of each SRT file is matched against a list of terms. Matching
/// cells are shown one at a time for confirmation (or deleted outright with
/// --yes), then the file is renumbered and saved.
#[derive(Parser, Debug)]
#[command(name = "subnuker")]
#[command(version)]
#[command(about = "Remove spam and advertising from subtitle files")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "Remove spam and advertising from subtitle files.

EXAMPLES:
    subnuker movie.srt                      # Review matches one by one
    subnuker -y /subs/                      # Delete every match in a directory
    subnuker --regex movie.srt              # Use the built-in regex list
    subnuker -f terms.txt movie.srt         # Match terms from a file
    subnuker completions bash > subnuker.bash

During review press 'y' to delete a cell, 'n' to keep it, and any other key
to stop without saving the current file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle files and/or directories to clean
    #[arg(value_name = "TARGETS")]
    targets: Vec<PathBuf>,

    /// Obtain match terms from FILE (repeatable)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    term_files: Vec<PathBuf>,

    /// Indicate use from a GUI
    #[arg(short, long)]
    gui: bool,

    /// Indicate use of regex matches
    #[arg(long)]
    regex: bool,

    /// Automatic yes to prompts
    #[arg(short = 'y', long = "yes")]
    auto_yes: bool,

    /// Configuration file path (JSON)
    #[arg(short, long = "config")]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger itself lets everything through; set_max_level filters
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Label and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR:", "1;31"),
            Level::Warn => ("WARNING:", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("DEBUG:", "1;36"),
            Level::Trace => ("TRACE:", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (label, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subnuker", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run_clean(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_clean(options: CommandLineOptions) -> Result<ExitCode> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = options.log_level {
        let level: app_config::LogLevel = level.into();
        log::set_max_level(level.to_level_filter());
    }

    let config = match &options.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate().context("Configuration validation failed")?;

    let targets = FileManager::collect_targets(&options.targets, &config.extensions);
    if targets.is_empty() {
        return Err(anyhow!("No valid targets were specified"));
    }

    let match_mode = if options.regex { MatchMode::Regex } else { MatchMode::Literal };
    let patterns = config.pattern_set(match_mode, &options.term_files)?;

    let review_mode = if options.auto_yes { ReviewMode::Automatic } else { ReviewMode::Interactive };
    let controller = Controller::with_config(&config, patterns, review_mode);

    let mut console = TerminalConsole::new();
    let report = controller.run_batch(&targets, &mut console)?;

    if report.aborted {
        return Ok(ExitCode::from(EXIT_ABORTED));
    }

    if !report.any_matches {
        println!("Search of {} returned no results.", describe_targets(&options.targets));

        // leave the terminal open long enough to read
        if options.gui {
            std::thread::sleep(Duration::from_secs(2));
        }
    }

    Ok(ExitCode::SUCCESS)
}

// @returns: Bracketed list of target base names, e.g. ['a.srt', 'subs']
fn describe_targets(targets: &[PathBuf]) -> String {
    let names: Vec<String> = targets
        .iter()
        .map(|target| {
            let name = target
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| target.display().to_string());
            format!("'{}'", name)
        })
        .collect();
    format!("[{}]", names.join(", "))
}
