use super::print_json;
use crate::error::TaskmasterError;

use client_core::{SessionState, TaskmasterClient};

use std::io::Write;

use serde_json::json;

pub async fn login(
    client: &TaskmasterClient,
    email: &str,
    password: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), TaskmasterError> {
    let login = client.login_and_store(email, password).await?;

    if json {
        // the token itself stays out of stdout
        print_json(
            &json!({ "authenticated": true, "token_type": login.token_type }),
            out,
        )
    } else {
        writeln!(out, "Signed in as {email}")?;
        Ok(())
    }
}

pub async fn register(
    client: &TaskmasterClient,
    email: &str,
    password: &str,
    json: bool,
    out: &mut impl Write,
) -> Result<(), TaskmasterError> {
    let account = client.register(email, password).await?;

    if json {
        print_json(&account, out)
    } else {
        writeln!(out, "Account created for {email}. Run `taskmaster login {email}` next.")?;
        Ok(())
    }
}

pub fn logout(
    client: &TaskmasterClient,
    json: bool,
    out: &mut impl Write,
) -> Result<(), TaskmasterError> {
    client.logout()?;

    if json {
        print_json(&json!({ "authenticated": false }), out)
    } else {
        writeln!(out, "Signed out")?;
        Ok(())
    }
}

pub fn status(
    client: &TaskmasterClient,
    json: bool,
    out: &mut impl Write,
) -> Result<(), TaskmasterError> {
    let state = client.session_state();

    if json {
        return print_json(
            &json!({
                "authenticated": state.is_authenticated(),
                "base_url": client.base_url().as_str(),
            }),
            out,
        );
    }

    match state {
        SessionState::Authenticated => {
            writeln!(out, "Signed in to {}", client.base_url())?;
        }
        SessionState::Anonymous => {
            writeln!(out, "Not signed in")?;
        }
    }
    Ok(())
}
