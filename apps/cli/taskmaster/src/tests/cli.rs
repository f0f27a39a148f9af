use crate::cli::{Cli, Commands};

use clap::Parser;

#[test]
fn given_list_without_flags_when_parsing_then_uses_first_page_of_ten() {
    let cli = Cli::try_parse_from(["taskmaster", "list"]).unwrap();

    match cli.command {
        Commands::List { page, limit, query } => {
            assert_eq!(page, 1);
            assert_eq!(limit, 10);
            assert_eq!(query, None);
        }
        other => panic!("Expected List, got {other:?}"),
    }
    assert!(!cli.json);
}

/// **VALUE**: Global flags are accepted after the subcommand.
///
/// **WHY THIS MATTERS**: `taskmaster list --json` is how scripts call the tool; if
/// `--json` only parsed before the subcommand, every such script would fail with a
/// usage error.
///
/// **BUG THIS CATCHES**: Would catch `global = true` being dropped from the shared flags.
#[test]
fn given_global_flags_after_subcommand_when_parsing_then_they_apply() {
    let cli = Cli::try_parse_from([
        "taskmaster",
        "create",
        "Buy milk",
        "--description",
        "2 litres",
        "--json",
        "--base-url",
        "http://localhost:9000",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:9000"));
    match cli.command {
        Commands::Create { title, description } => {
            assert_eq!(title, "Buy milk");
            assert_eq!(description.as_deref(), Some("2 litres"));
        }
        other => panic!("Expected Create, got {other:?}"),
    }
}

#[test]
fn given_login_with_password_flag_when_parsing_then_captures_credentials() {
    let cli =
        Cli::try_parse_from(["taskmaster", "login", "a@b.com", "--password", "secret"]).unwrap();

    match cli.command {
        Commands::Login { email, password } => {
            assert_eq!(email, "a@b.com");
            assert_eq!(password, "secret");
        }
        other => panic!("Expected Login, got {other:?}"),
    }
}

#[test]
fn given_delete_without_id_when_parsing_then_fails() {
    assert!(Cli::try_parse_from(["taskmaster", "delete"]).is_err());
}
