//! Loading state for submit buttons.

use crate::config::UiConfig;
use crate::ui::DEFAULT_LOADING_LABEL;
use crate::ui::escape::escape_html;

pub const BUTTON_LOADING_CLASS: &str = "btn-loading";

/// The parts of a button the loading toggle touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub text: String,
    pub inner_html: String,
    pub disabled: bool,
    pub classes: Vec<String>,
    /// Shown next to the spinner when no label is passed to `set_loading`.
    pub loading_label: String,
    prev_text: Option<String>,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self {
            text: String::new(),
            inner_html: String::new(),
            disabled: false,
            classes: Vec::new(),
            loading_label: DEFAULT_LOADING_LABEL.to_string(),
            prev_text: None,
        }
    }
}

impl ButtonState {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            inner_html: escape_html(&text),
            text,
            ..Self::default()
        }
    }

    /// A button whose default loading label comes from `loading_label`.
    pub fn from_config(text: impl Into<String>, config: &UiConfig) -> Self {
        Self::new(text).with_loading_label(config.loading_label.clone())
    }

    pub fn with_loading_label(mut self, label: impl Into<String>) -> Self {
        self.loading_label = label.into();
        self
    }

    pub fn is_loading(&self) -> bool {
        self.classes.iter().any(|c| c == BUTTON_LOADING_CLASS)
    }

    /// Swap the label for a spinner while a request is in flight, and back.
    ///
    /// The original label is remembered on the first transition into loading
    /// only, so toggling loading twice still restores the real label.
    /// `None` uses the button's [`loading_label`](Self::loading_label).
    pub fn set_loading(&mut self, is_loading: bool, label_while_loading: Option<&str>) {
        if is_loading {
            let label = label_while_loading
                .map(str::to_string)
                .unwrap_or_else(|| self.loading_label.clone());
            if !self.is_loading() {
                self.prev_text = Some(self.text.clone());
                self.classes.push(BUTTON_LOADING_CLASS.to_string());
            }
            self.disabled = true;
            self.inner_html = format!(
                "<span class=\"spinner\" aria-hidden=\"true\"></span><span style=\"margin-left:16px\">{}</span>",
                escape_html(&label)
            );
            self.text = label;
        } else {
            self.classes.retain(|c| c != BUTTON_LOADING_CLASS);
            self.disabled = false;
            if let Some(prev) = self.prev_text.take() {
                self.text = prev;
            }
            self.inner_html = escape_html(&self.text);
        }
    }
}

/// No-op when there is no button.
pub fn set_button_loading(
    button: Option<&mut ButtonState>,
    is_loading: bool,
    label: Option<&str>,
) {
    if let Some(button) = button {
        button.set_loading(is_loading, label);
    }
}
