use crate::config::UiConfig;
use crate::session::{DEFAULT_TOAST_TIMEOUT, Notifier, Toast};
use crate::ui::toast::TOAST_CONTAINER_ID;
use crate::ui::{ButtonState, DEFAULT_LOADING_LABEL, ToastCenter, escape_html, set_button_loading};

use std::time::Duration;

// ============================================
// escape_html
// ============================================

/// **VALUE**: Task titles are user input and end up inside HTML.
///
/// **BUG THIS CATCHES**: Would catch a missing replacement (most often `'`), which
/// reopens attribute-injection in single-quoted attributes.
#[test]
fn given_markup_when_escaping_then_replaces_all_five_characters() {
    assert_eq!(
        escape_html(r#"<a href='x' title="y">Tom & Jerry</a>"#),
        "&lt;a href=&#39;x&#39; title=&quot;y&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"
    );
}

/// **BUG THIS CATCHES**: Would catch `&` being replaced after the other characters,
/// which mangles the entities those replacements just produced.
#[test]
fn given_quotes_and_ampersand_when_escaping_then_each_entity_is_escaped_once() {
    assert_eq!(escape_html("\"&\""), "&quot;&amp;&quot;");
    assert_eq!(escape_html("&lt;"), "&amp;lt;");
}

#[test]
fn given_plain_text_when_escaping_then_returns_unchanged() {
    assert_eq!(escape_html("Buy milk"), "Buy milk");
    assert_eq!(escape_html(""), "");
}

// ============================================
// ButtonState
// ============================================

#[test]
fn given_idle_button_when_loading_then_disables_and_shows_spinner() {
    let mut button = ButtonState::new("Save");

    button.set_loading(true, None);

    assert!(button.disabled);
    assert!(button.is_loading());
    assert!(button.inner_html.contains(r#"<span class="spinner" aria-hidden="true"></span>"#));
    assert!(button.inner_html.contains("Procesando..."));
}

#[test]
fn given_loading_button_when_done_then_restores_label() {
    let mut button = ButtonState::new("Save");

    button.set_loading(true, Some("Saving"));
    button.set_loading(false, Some("Saving"));

    assert!(!button.disabled);
    assert!(!button.is_loading());
    assert_eq!(button.text, "Save");
    assert_eq!(button.inner_html, "Save");
}

/// **VALUE**: Double-submitting must not lose the original label.
///
/// **BUG THIS CATCHES**: Would catch overwriting the saved label on every call into the
/// loading state, which leaves the button reading "Saving" forever.
#[test]
fn given_loading_set_twice_when_done_then_restores_original_label() {
    let mut button = ButtonState::new("Save");

    button.set_loading(true, Some("Saving"));
    button.set_loading(true, Some("Saving"));
    button.set_loading(false, Some("Saving"));

    assert_eq!(button.text, "Save");
    assert_eq!(button.classes.len(), 0);
}

#[test]
fn given_label_with_markup_when_loading_then_label_is_escaped() {
    let mut button = ButtonState::new("Go");

    button.set_loading(true, Some("<b>wait</b>"));

    assert!(button.inner_html.contains("&lt;b&gt;wait&lt;/b&gt;"));
}

/// **VALUE**: The configured loading label is what users see when callers pass none.
///
/// **BUG THIS CATCHES**: Would catch `ui.loading_label` being parsed from config but never
/// reaching the button, leaving the built-in label in place.
#[test]
fn given_configured_loading_label_when_loading_without_label_then_uses_it() {
    let config = UiConfig {
        loading_label: "Saving...".to_string(),
        ..UiConfig::default()
    };
    let mut button = ButtonState::from_config("Save", &config);

    set_button_loading(Some(&mut button), true, None);

    assert_eq!(button.text, "Saving...");
    assert!(button.inner_html.contains("Saving..."));
    assert!(!button.inner_html.contains(DEFAULT_LOADING_LABEL));
}

#[test]
fn given_explicit_label_when_loading_then_overrides_configured_label() {
    let mut button = ButtonState::new("Save").with_loading_label("Saving...");

    button.set_loading(true, Some("Uploading"));

    assert_eq!(button.text, "Uploading");
}

#[test]
fn given_no_button_when_setting_loading_then_does_nothing() {
    set_button_loading(None, true, Some("x"));
}

// ============================================
// ToastCenter
// ============================================

#[test]
fn given_no_toasts_when_first_shown_then_creates_container_once() {
    let center = ToastCenter::new();
    assert!(center.container().is_none());

    center.show_toast(Toast::info("one"));
    center.show_toast(Toast::error("two"));

    let container = center.container().unwrap();
    assert_eq!(container.id, TOAST_CONTAINER_ID);
    assert_eq!(container.role, "status");
    assert_eq!(container.aria_live, "polite");

    let active = center.active();
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].class_name, "toast info");
    assert_eq!(active[1].class_name, "toast error");
    assert!(active.iter().all(|t| t.visible));
}

/// **VALUE**: Toasts go away on their own.
///
/// **WHY THIS MATTERS**: Without the timers the stack would grow with every error.
#[tokio::test]
async fn given_short_timeout_when_time_passes_then_toast_hides_then_is_removed() {
    let center = ToastCenter::new();

    center.show(Toast::info("bye").with_timeout(Duration::from_millis(20)));
    assert_eq!(center.active().len(), 1);

    tokio::time::sleep(Duration::from_millis(120)).await;
    let hidden = center.active();
    assert_eq!(hidden.len(), 1, "Should still be attached during exit transition");
    assert!(!hidden[0].visible);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(center.active().is_empty());
}

#[test]
fn given_ui_config_when_building_toast_center_then_uses_configured_default_timeout() {
    assert_eq!(ToastCenter::new().default_timeout(), DEFAULT_TOAST_TIMEOUT);

    let config = UiConfig {
        toast_timeout_ms: 1500,
        ..UiConfig::default()
    };

    assert_eq!(
        ToastCenter::from_config(&config).default_timeout(),
        Duration::from_millis(1500)
    );
}

/// **VALUE**: Toasts without their own timeout expire after `ui.toast_timeout_ms`.
///
/// **BUG THIS CATCHES**: Would catch the center ignoring its configured default and
/// always waiting the built-in 3 seconds.
#[tokio::test]
async fn given_configured_toast_timeout_when_toast_has_none_then_it_expires_on_config_schedule() {
    let config = UiConfig {
        toast_timeout_ms: 20,
        ..UiConfig::default()
    };
    let center = ToastCenter::from_config(&config);

    center.show_toast(Toast::error("Session expired."));

    tokio::time::sleep(Duration::from_millis(120)).await;
    let active = center.active();
    assert_eq!(active.len(), 1);
    assert!(!active[0].visible, "Should be hidden well before the 3s default");
}
