//! Version comparison commands (`botdeck version`).

use anyhow::Result;

use super::super::VersionCommands;
use botdeck::version::{UpdateCheck, is_newer};

pub fn cmd_version(command: VersionCommands) -> Result<()> {
    match command {
        VersionCommands::Compare { a, b } => {
            if is_newer(&a, &b) {
                println!("newer");
            } else {
                println!("not newer");
            }
        }
        VersionCommands::Check { latest } => {
            let check = UpdateCheck::for_current_build(&latest);
            if check.update_available {
                println!(
                    "{} {} -> {}",
                    console::style("Update available:").yellow().bold(),
                    check.current,
                    check.latest
                );
            } else {
                println!(
                    "botdeck {} is up to date (latest: {})",
                    check.current, check.latest
                );
            }
        }
    }

    Ok(())
}
