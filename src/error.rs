//! Error type shared by the browser binding and configuration loader.

use wasm_bindgen::JsValue;

/// Errors produced while mounting or driving the navigation controller.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// A required element is not present in the page.
    #[error("missing element: {what}")]
    MissingElement {
        /// Id or selector that failed to resolve.
        what: String,
    },
    /// A browser API call threw.
    #[error("browser call failed: {0}")]
    Browser(String),
    /// The inline configuration block is not valid JSON for [`crate::config::NavConfig`].
    #[error("invalid navigation config: {0}")]
    Config(#[from] serde_json::Error),
}

impl NavError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingElement { what: what.into() }
    }
}

impl From<JsValue> for NavError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(text) => Self::Browser(text),
            None => Self::Browser(format!("{value:?}")),
        }
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
