use crate::ErrorLocation;
use std::panic::Location;

/// **VALUE**: Verifies that `ErrorLocation::from()` captures file, line, and column.
///
/// **WHY THIS MATTERS**: Every client error carries an ErrorLocation. If capture breaks,
/// every failure message loses the pointer back to where it was raised.
///
/// **BUG THIS CATCHES**: Would catch if `Location::caller()` stops being propagated or
/// the file/line/column fields are mixed up.
#[test]
#[track_caller]
fn given_location_caller_when_error_location_created_then_captures_file_line_column() {
    // GIVEN: Current caller location
    // WHEN: Creating ErrorLocation from caller
    let location = ErrorLocation::from(Location::caller());

    // THEN: Should capture file, line, and column
    assert!(
        location.file.contains("error_location.rs"),
        "Should capture file path"
    );
    assert!(location.line > 0, "Should capture line number");
    assert!(location.column > 0, "Should capture column number");
}

/// **VALUE**: Verifies the `[file:line:column]` Display format.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops the brackets or a field.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = ErrorLocation {
        file: "src/token_store/file.rs",
        line: 42,
        column: 7,
    };

    assert_eq!(location.to_string(), "[src/token_store/file.rs:42:7]");
}

/// **VALUE**: Verifies that `#[track_caller]` helpers report their call site.
///
/// **WHY THIS MATTERS**: Error constructors such as `ApiError::unauthorized()` rely on
/// this to point at the request that failed instead of the constructor itself.
#[test]
fn given_multiple_call_sites_when_capturing_location_then_each_has_unique_line() {
    #[track_caller]
    fn capture_location() -> ErrorLocation {
        ErrorLocation::from(Location::caller())
    }

    let loc1 = capture_location();
    let loc2 = capture_location();

    assert_eq!(loc1.file, loc2.file, "Should have same file");
    assert_eq!(loc1.line + 1, loc2.line, "Lines should be sequential");
}
