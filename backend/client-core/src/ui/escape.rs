/// Escape `& < > " '` for safe interpolation into HTML.
///
/// `&` goes first so the entities added by later replacements stay intact.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
