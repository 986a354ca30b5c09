//! Hero typewriter, delegated to the Typed.js library.

use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::config::TypewriterConfig;
use crate::dom;
use crate::error::{PortfolioError, Result};

/// The option object Typed.js expects.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedOptions<'a> {
    pub strings: &'a [String],
    pub type_speed: u32,
    pub back_speed: u32,
    pub back_delay: u32,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub show_cursor: bool,
    pub cursor_char: &'a str,
}

impl<'a> From<&'a TypewriterConfig> for TypedOptions<'a> {
    fn from(cfg: &'a TypewriterConfig) -> Self {
        Self {
            strings: &cfg.strings,
            type_speed: cfg.type_speed,
            back_speed: cfg.back_speed,
            back_delay: cfg.back_delay,
            looped: cfg.looped,
            show_cursor: cfg.show_cursor,
            cursor_char: &cfg.cursor_char,
        }
    }
}

pub struct Typewriter {
    _typed: JsValue,
}

impl Typewriter {
    pub fn install(doc: &Document, config: &TypewriterConfig) -> Result<Self> {
        if doc.query_selector(&config.selector)?.is_none() {
            return Err(PortfolioError::MissingElement(config.selector.clone()));
        }
        let ctor: js_sys::Function = dom::global("Typed")
            .ok_or(PortfolioError::MissingLibrary("Typed"))?
            .dyn_into()
            .map_err(|_| PortfolioError::MissingLibrary("Typed"))?;
        let options = dom::to_js(&TypedOptions::from(config))?;
        let args = js_sys::Array::of2(&JsValue::from_str(&config.selector), &options);
        let typed = js_sys::Reflect::construct(&ctor, &args)?;
        Ok(Self { _typed: typed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_use_library_field_names() {
        let cfg = TypewriterConfig::default();
        let json = serde_json::to_value(TypedOptions::from(&cfg)).unwrap();
        assert_eq!(json["typeSpeed"], 50);
        assert_eq!(json["backSpeed"], 30);
        assert_eq!(json["backDelay"], 2000);
        assert_eq!(json["loop"], true);
        assert_eq!(json["showCursor"], true);
        assert_eq!(json["cursorChar"], "_");
        assert_eq!(json["strings"].as_array().unwrap().len(), 6);
        assert_eq!(json["strings"][0], "Building Specialist");
        assert!(json.get("selector").is_none());
    }
}
