use taskmaster::cli::Cli;
use taskmaster::commands;
use taskmaster::context::AppContext;
use taskmaster::error::TaskmasterError;
use taskmaster::logger;

use std::io::{Write, stderr, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::{error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            report(&e, json);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run(cli: Cli) -> Result<(), TaskmasterError> {
    let context = AppContext::from_cli(&cli)?;

    context.ensure_data_dir()?;
    logger::initialize(&context.data_dir, cli.verbose)?;

    let result = commands::run(&context.client, cli.command, cli.json, &mut stdout()).await;

    if let Err(TaskmasterError::Unauthorized { .. }) = &result {
        // let the scheduled login redirect print its hint before exiting
        warn!("Session ended by server");
        tokio::time::sleep(context.redirect_delay() + REDIRECT_GRACE).await;
    }

    result
}

const REDIRECT_GRACE: std::time::Duration = std::time::Duration::from_millis(50);

fn report(error: &TaskmasterError, json: bool) {
    let mut err = stderr();
    if json {
        match serde_json::to_string(error) {
            Ok(rendered) => {
                let _ = writeln!(err, "{rendered}");
            }
            Err(_) => {
                let _ = writeln!(err, "error: {}", error.user_message());
            }
        }
    } else {
        let _ = writeln!(err, "error: {}", error.user_message());
    }
}
