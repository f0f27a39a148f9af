use crate::HttpStatusCode;

#[test]
fn given_status_codes_when_categorized_then_ranges_match() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(204).is_success());
    assert!(!HttpStatusCode(301).is_success());

    assert!(HttpStatusCode(404).is_client_error());
    assert!(!HttpStatusCode(500).is_client_error());

    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(499).is_server_error());
}

/// **VALUE**: Only a literal 401 ends the session.
///
/// **BUG THIS CATCHES**: Would catch a range check (e.g. all 4xx) creeping into the
/// unauthorized test, which would log users out on a 403 or 404.
#[test]
fn given_client_errors_when_checking_unauthorized_then_only_401_matches() {
    assert!(HttpStatusCode(401).is_unauthorized());
    assert!(!HttpStatusCode(403).is_unauthorized());
    assert!(!HttpStatusCode(400).is_unauthorized());
    assert!(!HttpStatusCode(419).is_unauthorized());
}

#[test]
fn given_reason_when_building_status_line_then_joins_code_and_reason() {
    assert_eq!(
        HttpStatusCode(500).status_line(Some("Internal Server Error")),
        "500 Internal Server Error"
    );
    assert_eq!(HttpStatusCode(599).status_line(None), "599");
    assert_eq!(HttpStatusCode(418).status_line(Some("")), "418");
}
