use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use botdeck::config::BotdeckConfig;
use botdeck::i18n::{I18n, TomlFileStore};

mod cmd;

#[derive(Parser)]
#[command(name = "botdeck")]
#[command(version, about = "Management console toolkit for a bot and LLM-pipeline platform")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Backend base URL. Overrides botdeck.toml and BOTDECK_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare version strings
    Version {
        #[command(subcommand)]
        command: VersionCommands,
    },
    /// Observe server-side async tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Inspect and validate dynamic form schemas
    Form {
        #[command(subcommand)]
        command: FormCommands,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show or change the display language
    Locale {
        #[command(subcommand)]
        command: Option<LocaleCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum VersionCommands {
    /// Print "newer" if A is newer than B, otherwise "not newer"
    Compare { a: String, b: String },
    /// Check whether a release is newer than this build
    Check {
        /// Latest published version
        #[arg(long)]
        latest: String,
    },
}

#[derive(Subcommand, Clone)]
pub enum TaskCommands {
    /// Poll a task until it finishes; exits non-zero if it fails
    Watch {
        id: i64,

        /// Poll interval in milliseconds. Overrides botdeck.toml and BOTDECK_POLL_INTERVAL_MS.
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[derive(Subcommand, Clone)]
pub enum FormCommands {
    /// Print the default values of a schema as JSON
    Defaults { schema: PathBuf },
    /// Validate a JSON values file against a schema
    Validate { schema: PathBuf, values: PathBuf },
    /// List the fields shown for an auth type
    Visible {
        schema: PathBuf,
        #[arg(long, default_value = "")]
        auth_type: String,
    },
    /// Show the input control chosen for each field
    Controls {
        schema: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report empty or duplicate field names
    Check { schema: PathBuf },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default botdeck.toml file
    Init,
}

#[derive(Subcommand, Clone)]
pub enum LocaleCommands {
    /// Show the current and available locales
    Show,
    /// Persist a locale, e.g. `ja_JP`
    Set { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let mut config =
        BotdeckConfig::with_cli_args(project_dir, cli.verbose, cli.base_url.clone(), None)?;
    let _log_guard =
        botdeck::logging::init(&config.toml.logging, cli.verbose, &config.log_dir());

    let mut i18n = I18n::init(
        Box::new(TomlFileStore::new(config.prefs_file())),
        config.default_locale(),
    );

    match cli.command {
        Commands::Version { command } => cmd::cmd_version(command)?,
        Commands::Task { command } => {
            let TaskCommands::Watch { id, interval_ms } = command;
            config.cli_interval_ms = interval_ms;
            cmd::cmd_task_watch(&config, &i18n, id).await?;
        }
        Commands::Form { command } => cmd::cmd_form(&i18n, command)?,
        Commands::Config { command } => cmd::cmd_config(&config, command)?,
        Commands::Locale { command } => cmd::cmd_locale(&mut i18n, command)?,
    }

    Ok(())
}
