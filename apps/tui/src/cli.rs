//! Command-line arguments, config resolution, tracing setup, and the
//! non-interactive commands.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use querylens_core::{Node, Overview, Render, decisions, text};
use querylens_shared::{AppConfig, LoggingConfig, init_config, init_config_at, load_config};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// QueryLens — how query logs become compatibility verdicts.
#[derive(Parser)]
#[command(
    name = "querylens",
    version,
    about = "Browse the QueryLens pipeline overview in the terminal.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file (defaults to $QUERYLENS_HOME or ~/.querylens, then querylens.toml).
    #[arg(long, global = true, env = "QUERYLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Run a one-shot command instead of the interactive UI.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Which composition `render` prints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Page {
    Overview,
    Decisions,
}

/// Output encoding for `render`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// One-shot subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print a page to stdout and exit.
    Render {
        /// Page to print.
        #[arg(value_enum, default_value = "overview")]
        page: Page,

        /// Output encoding.
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Expand every section (overrides `ui.expand_sections`).
        #[arg(long)]
        expand: bool,
    },

    /// Write a default config file.
    InitConfig {
        /// Directory to write into (defaults to ~/.querylens).
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Config + tracing
// ---------------------------------------------------------------------------

/// Resolve the config from `--config` or the default location.
pub(crate) fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    Ok(load_config(cli.config.as_deref())?)
}

/// Initialize the tracing subscriber.
///
/// The interactive UI owns the terminal, so it only logs to the configured
/// file (or nowhere). One-shot commands log to stderr.
pub(crate) fn init_tracing(cli: &Cli, logging: &LoggingConfig, interactive: bool) -> Result<()> {
    use tracing_subscriber::fmt::writer::BoxMakeWriter;
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => logging.level.to_ascii_lowercase(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = ["querylens_tui", "querylens_core", "querylens_shared"]
        .map(|target| format!("{target}={level}"))
        .join(",");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    let (writer, ansi) = match (&logging.file, interactive) {
        (Some(path), true) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        (None, true) => (BoxMakeWriter::new(std::io::sink), false),
        (_, false) => (BoxMakeWriter::new(std::io::stderr), true),
    };

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .init();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Set up tracing and run the parsed command line.
///
/// `init-config` runs before any config is read, so it can replace a file
/// that no longer parses.
pub(crate) fn dispatch(cli: Cli) -> Result<()> {
    if let Some(Command::InitConfig { dir }) = &cli.command {
        init_tracing(&cli, &LoggingConfig::default(), false)?;
        let path = write_default_config(dir.as_deref())?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    init_tracing(&cli, &config.logging, cli.command.is_none())?;
    match cli.command {
        None => crate::app::run(&config.ui),
        Some(command) => run(command, &config),
    }
}

/// Run a one-shot subcommand.
fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Render {
            page,
            format,
            expand,
        } => {
            let node = page_node(page, expand || config.ui.expand_sections);
            println!("{}", encode(&node, format)?);
        }
        Command::InitConfig { dir } => {
            let path = write_default_config(dir.as_deref())?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn write_default_config(dir: Option<&Path>) -> Result<PathBuf> {
    let path = match dir {
        Some(dir) => init_config_at(dir)?,
        None => init_config()?,
    };
    info!(?path, "config initialized");
    Ok(path)
}

fn page_node(page: Page, expanded: bool) -> Node {
    match page {
        Page::Overview => Overview::with_expanded(expanded).render(),
        Page::Decisions => decisions::render_all(),
    }
}

fn encode(node: &Node, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render_text(node)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(node).wrap_err("failed to encode page as JSON")
        }
    }
}
