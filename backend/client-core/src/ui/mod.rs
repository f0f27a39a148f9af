//! Presentation helpers shared by every front end of the client.

pub mod button;
pub mod escape;
pub mod toast;

pub use button::{ButtonState, set_button_loading};
pub use escape::escape_html;
pub use toast::{ActiveToast, ToastCenter, ToastContainer};

pub const DEFAULT_LOADING_LABEL: &str = "Procesando...";
