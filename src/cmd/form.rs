//! Dynamic form schema commands (`botdeck form`).

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::warn;

use super::super::FormCommands;
use botdeck::form::visibility::AUTH_TYPE_FIELD;
use botdeck::form::{
    AuthTypePrefixVisibility, DynamicFormItemSchema, FormSession, FormValues, check_schema,
    get_default_values, load_schema, render_fields, visible_items,
};
use botdeck::i18n::I18n;

fn load(path: &Path) -> Result<Vec<DynamicFormItemSchema>> {
    let items = load_schema(path)
        .with_context(|| format!("Failed to load form schema: {}", path.display()))?;
    for diagnostic in check_schema(&items) {
        warn!(schema = %path.display(), "{}", diagnostic);
    }
    Ok(items)
}

fn load_values(path: &Path) -> Result<FormValues> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read values file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Values file must be a JSON object: {}", path.display()))
}

/// Forms with an auth-type field show only the matching field group.
fn session_for(items: Vec<DynamicFormItemSchema>) -> FormSession {
    if items.iter().any(|item| item.name == AUTH_TYPE_FIELD) {
        FormSession::with_visibility(items, AuthTypePrefixVisibility::default())
    } else {
        FormSession::new(items)
    }
}

pub fn cmd_form(i18n: &I18n, command: FormCommands) -> Result<()> {
    match command {
        FormCommands::Defaults { schema } => {
            let items = load(&schema)?;
            let values = get_default_values(&items);
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        FormCommands::Validate { schema, values } => {
            let mut session = session_for(load(&schema)?);
            session.set_values(load_values(&values)?);

            match session.validate(i18n) {
                Ok(()) => println!("{}", console::style("All fields are valid.").green()),
                Err(errors) => {
                    for error in errors.iter() {
                        println!(
                            "  {} {}: {}",
                            console::style("✗").red(),
                            console::style(&error.field).bold(),
                            error.message
                        );
                    }
                    bail!("{}", errors);
                }
            }
        }
        FormCommands::Visible { schema, auth_type } => {
            let items = load(&schema)?;
            let predicate = AuthTypePrefixVisibility::default();
            for item in visible_items(&items, &predicate, &auth_type) {
                println!("{}", item.name);
            }
        }
        FormCommands::Controls { schema, json } => {
            let items = load(&schema)?;
            let fields = render_fields(&items, i18n.locale());
            if json {
                println!("{}", serde_json::to_string_pretty(&fields)?);
                return Ok(());
            }

            let width = fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
            for field in &fields {
                let marker = if field.required { "*" } else { " " };
                println!(
                    "{:<width$} {} {}  {}",
                    field.name,
                    marker,
                    console::style(field.control.describe()).cyan(),
                    console::style(&field.label).dim(),
                    width = width
                );
            }
        }
        FormCommands::Check { schema } => {
            let items = load_schema(&schema)
                .with_context(|| format!("Failed to load form schema: {}", schema.display()))?;
            let diagnostics = check_schema(&items);
            if diagnostics.is_empty() {
                println!("Schema is valid ({} fields).", items.len());
            } else {
                println!("Schema warnings:");
                for diagnostic in diagnostics {
                    println!("  - {}", diagnostic);
                }
            }
        }
    }

    Ok(())
}
