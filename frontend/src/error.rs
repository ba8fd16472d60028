use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum EffectsError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("invalid root margin `{0}`")]
    RootMargin(String),
    #[error("unknown page effects profile `{0}`")]
    UnknownProfile(String),
    #[error("page effects config is not valid JSON: {0}")]
    Config(#[from] serde_json::Error),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for EffectsError {
    fn from(value: JsValue) -> Self {
        EffectsError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type Result<T> = std::result::Result<T, EffectsError>;
