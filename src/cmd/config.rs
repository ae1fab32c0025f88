//! Configuration view and validation commands (`botdeck config`).

use anyhow::Result;

use super::super::ConfigCommands;
use botdeck::config::{BotdeckConfig, BotdeckToml};

fn print_toml(toml: &BotdeckToml) {
    println!("[backend]");
    println!("  base_url = \"{}\"", toml.backend.base_url);
    if toml.backend.token.is_some() {
        println!("  token = \"********\"");
    }
    println!("  task_status_path = \"{}\"", toml.backend.task_status_path);
    println!("  timeout_secs = {}", toml.backend.timeout_secs);
    println!();
    println!("[poller]");
    println!("  interval_ms = {}", toml.poller.interval_ms);
    println!();
    println!("[ui]");
    println!("  locale = \"{}\"", toml.ui.locale);
    println!();
    println!("[logging]");
    println!("  level = \"{}\"", toml.logging.level);
    println!("  json = {}", toml.logging.json);
    println!("  file = {}", toml.logging.file);
    println!();
}

pub fn cmd_config(config: &BotdeckConfig, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = config.config_file();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Botdeck Configuration");
            println!("=====================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No botdeck.toml found at {}", config_path.display());
                println!("Using default configuration:");
            }
            println!();
            print_toml(&config.toml);

            println!("Effective values (with env/CLI overrides):");
            println!("  base_url = \"{}\"", config.base_url());
            println!(
                "  token = {}",
                if config.token().is_some() { "set" } else { "unset" }
            );
            println!("  poll_interval_ms = {}", config.poll_interval().as_millis());
            println!("  locale = \"{}\"", config.default_locale().code());
            println!();

            if !config_path.exists() {
                println!("Run 'botdeck config init' to create a botdeck.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No botdeck.toml found. Using defaults (valid).");
                return Ok(());
            }

            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("botdeck.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !config.config_dir.exists() {
                std::fs::create_dir_all(&config.config_dir)?;
            }

            BotdeckToml::default().save(&config_path)?;

            println!("Created botdeck.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [backend] base_url, token, task_status_path");
            println!("  - [poller] interval_ms");
            println!("  - [ui] locale and [logging] level");
            println!();
        }
    }

    Ok(())
}
