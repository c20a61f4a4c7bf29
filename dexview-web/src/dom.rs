use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Response, Window};

/// Retrieve the global `window` object.
///
/// # Panics
/// Panics if executed outside of a browser context where `window` is unavailable.
#[must_use]
pub fn window() -> Window {
    web_sys::window().expect("`window` should be available in web context")
}

/// Retrieve the document object for DOM interactions.
///
/// # Panics
/// Panics when the document cannot be accessed from the current browser window.
#[must_use]
pub fn document() -> Document {
    window()
        .document()
        .expect("`document` should exist in browser context")
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Current URL fragment including the leading `#`, or an empty string.
#[must_use]
pub fn current_hash() -> String {
    window().location().hash().unwrap_or_default()
}

/// Navigate by writing a new fragment; the browser fires `hashchange`.
pub fn set_hash(fragment: &str) {
    if let Err(err) = window().location().set_hash(fragment) {
        console_error(&js_error_message(&err));
    }
}

/// Go back one history entry, or to `fallback` when this tab has nowhere to go back to.
pub fn back_or(fallback: &str) {
    let history = window().history().ok();
    match history {
        Some(history) if history.length().unwrap_or(0) > 1 => {
            if let Err(err) = history.back() {
                console_error(&js_error_message(&err));
                set_hash(fallback);
            }
        }
        _ => set_hash(fallback),
    }
}

/// Perform a fetch request and return the browser `Response`.
///
/// # Errors
/// Returns an error if the fetch request fails or the response cannot be converted to `Response`.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn fetch_response(url: &str) -> Result<Response, JsValue> {
    let resp_value = JsFuture::from(window().fetch_with_str(url)).await?;
    resp_value.dyn_into::<Response>()
}

/// Fetch `url` and read the body as text.
///
/// # Errors
/// Returns the response status for non-success responses, or the JavaScript error
/// message when the request or body read fails.
#[allow(clippy::future_not_send)]
pub async fn fetch_text(url: &str) -> Result<String, FetchFailure> {
    let response = fetch_response(url)
        .await
        .map_err(|err| FetchFailure::Network(js_error_message(&err)))?;
    if !response.ok() {
        return Err(FetchFailure::Status(response.status()));
    }
    let body = response
        .text()
        .map_err(|err| FetchFailure::Network(js_error_message(&err)))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|err| FetchFailure::Network(js_error_message(&err)))?;
    text.as_string()
        .ok_or_else(|| FetchFailure::Network(String::from("response body is not text")))
}

/// Why a browser fetch did not produce a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    Status(u16),
    Network(String),
}
