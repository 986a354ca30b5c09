//! Thin helpers over `web_sys` shared by the controllers.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::{PortfolioError, Result};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(PortfolioError::MissingEnvironment("window"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or(PortfolioError::MissingEnvironment("document"))
}

pub fn body(doc: &Document) -> Result<HtmlElement> {
    doc.body().ok_or(PortfolioError::MissingEnvironment("body"))
}

pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// RNG seed from the platform entropy source, or the clock if that fails.
pub fn entropy_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => now().to_bits(),
    }
}

/// All elements matching `selector`, in document order.
pub fn query_all(doc: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = doc.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect())
}

pub fn create(doc: &Document, tag: &str, class: &str) -> Result<Element> {
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Attach a listener for the lifetime of the page.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub fn set_timeout(ms: u32, f: impl FnOnce() + 'static) -> Result<i32> {
    let cb = Closure::once_into_js(f);
    let handle = window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms as i32)?;
    Ok(handle)
}

pub fn set_style(el: &Element, property: &str, value: &str) -> Result<()> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        html.style().set_property(property, value)?;
    }
    Ok(())
}

pub fn inline_style(el: &Element, property: &str) -> Option<String> {
    el.dyn_ref::<HtmlElement>()
        .and_then(|html| html.style().get_property_value(property).ok())
        .filter(|v| !v.is_empty())
}

/// Look up a constructor or namespace installed on `globalThis` by a
/// `<script>` tag. `None` when the library was not loaded.
pub fn global(name: &str) -> Option<JsValue> {
    js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Call `target[method](...args)`.
pub fn call_method(target: &JsValue, method: &str, args: &[&JsValue]) -> Result<JsValue> {
    let func: js_sys::Function = js_sys::Reflect::get(target, &JsValue::from_str(method))?
        .dyn_into()
        .map_err(|_| PortfolioError::Js(format!("'{method}' is not a function")))?;
    let array = js_sys::Array::new();
    for arg in args {
        array.push(arg);
    }
    Ok(func.apply(target, &array)?)
}

/// Serialize a Rust value into a plain JS object via JSON.
pub fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue> {
    let json = serde_json::to_string(value)?;
    Ok(js_sys::JSON::parse(&json)?)
}
