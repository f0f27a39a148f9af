use crate::RedactedToken;

/// **VALUE**: Tokens never leak through Debug or Display.
///
/// **WHY THIS MATTERS**: The client logs request flow at debug level. A token showing up
/// in `taskmaster.log` would hand out a live session to anyone who reads the file.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    let token = RedactedToken::new("eyJhbGciOiJIUzI1NiJ9.secret");

    let debug = format!("{token:?}");
    let display = format!("{token}");

    assert!(!debug.contains("secret"));
    assert!(!display.contains("secret"));
    assert_eq!(token.len(), "eyJhbGciOiJIUzI1NiJ9.secret".len());
}

#[test]
fn given_token_when_building_bearer_header_then_prefixes_scheme() {
    let token = RedactedToken::new("abc");

    assert_eq!(token.bearer_header(), "Bearer abc");
    assert_eq!(token.as_str(), "abc");
}

#[test]
fn given_token_when_serialized_then_returns_error() {
    let token = RedactedToken::new("abc");

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "RedactedToken must refuse serialization");
}
