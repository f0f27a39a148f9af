//! One module per command group. Every command writes its result to the
//! given writer, as text or as JSON.

pub mod auth;
pub mod tasks;

use crate::cli::Commands;
use crate::error::TaskmasterError;

use client_core::TaskmasterClient;

use std::io::Write;

use serde_json::Value;

/// Run one parsed command against `client`.
pub async fn run(
    client: &TaskmasterClient,
    command: Commands,
    json: bool,
    out: &mut impl Write,
) -> Result<(), TaskmasterError> {
    match command {
        Commands::Login { email, password } => {
            auth::login(client, &email, &password, json, out).await
        }
        Commands::Register { email, password } => {
            auth::register(client, &email, &password, json, out).await
        }
        Commands::Logout => auth::logout(client, json, out),
        Commands::Status => auth::status(client, json, out),
        Commands::List { page, limit, query } => {
            tasks::list(client, page, limit, query.as_deref(), json, out).await
        }
        Commands::Create { title, description } => {
            tasks::create(client, &title, description.as_deref(), json, out).await
        }
        Commands::Delete { id } => tasks::delete(client, &id, json, out).await,
    }
}

pub(crate) fn print_json(value: &Value, out: &mut impl Write) -> Result<(), TaskmasterError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| TaskmasterError::taskmaster(format!("Failed to render JSON: {e}")))?;
    writeln!(out, "{rendered}")?;
    Ok(())
}
