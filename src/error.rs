//! Error type shared by every initializer and controller.

use wasm_bindgen::JsValue;

#[derive(thiserror::Error, Debug)]
pub enum PortfolioError {
    #[error("unknown project identifier '{0}'")]
    UnknownProject(String),

    #[error("browser environment unavailable: no {0}")]
    MissingEnvironment(&'static str),

    #[error("required element '{0}' not found")]
    MissingElement(String),

    #[error("external library '{0}' is not loaded")]
    MissingLibrary(&'static str),

    #[error("portfolio has not been started")]
    NotStarted,

    #[error("javascript error: {0}")]
    Js(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for PortfolioError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        PortfolioError::Js(message)
    }
}

impl From<PortfolioError> for JsValue {
    fn from(err: PortfolioError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

pub type Result<T, E = PortfolioError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_project_message_names_the_identifier() {
        let err = PortfolioError::UnknownProject("ghost-runner".into());
        assert_eq!(err.to_string(), "unknown project identifier 'ghost-runner'");
    }

    #[test]
    fn config_errors_wrap_serde_failures() {
        let parse = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: PortfolioError = parse.into();
        assert!(err.to_string().starts_with("invalid configuration:"));
    }
}
