//! Structured error types for gridsel.
//!
//! Interaction-path anomalies (out-of-range indices, missing scroll container)
//! never surface as errors; they clamp or no-op. Errors here are reserved for
//! construction-time problems and host-boundary failures.

/// All errors that can occur while constructing or driving the engine.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Invalid engine configuration (zero counts, non-positive sizes).
    #[error("Invalid config: {0}")]
    Config(String),

    /// The host renderer / scroll container could not be used.
    #[error("Renderer error: {0}")]
    Renderer(String),

    /// Failure crossing the JavaScript boundary.
    #[error("JS interop: {0}")]
    Js(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Js(s)
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
