//! Display language commands (`botdeck locale`).

use anyhow::{Context, Result};

use super::super::LocaleCommands;
use botdeck::i18n::{I18n, Locale};

pub fn cmd_locale(i18n: &mut I18n, command: Option<LocaleCommands>) -> Result<()> {
    match command {
        None | Some(LocaleCommands::Show) => {
            let current = i18n.locale();
            println!("Current locale: {}", current.code());
            println!();
            println!("Available:");
            for locale in Locale::ALL {
                let marker = if locale == current { "*" } else { " " };
                println!("  {} {}", marker, locale.code());
            }
        }
        Some(LocaleCommands::Set { code }) => {
            let locale: Locale = code.parse()?;
            i18n.set_locale(locale)
                .context("Failed to save locale preference")?;
            println!("Locale set to {}", locale.code());
        }
    }

    Ok(())
}
