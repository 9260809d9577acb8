//! Best-effort submission transport.
//!
//! One POST, multipart body, opaque-response mode. The endpoint's reply
//! is unreadable by design, so the only signals are "the fetch resolved"
//! and "the fetch threw locally".

use thiserror::Error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode};

#[derive(Debug, Error)]
pub enum TransportError {
    /// The fetch itself rejected (connectivity, CORS). Under the opaque
    /// transport the request may still have reached the server.
    #[error("network error: {0}")]
    Network(String),
    /// The request never left: building it failed.
    #[error("request setup failed: {0}")]
    Setup(String),
}

fn describe(err: JsValue) -> String {
    err.as_string()
        .unwrap_or_else(|| format!("{err:?}"))
}

/// POST `pairs` as multipart form fields to `url`. No custom headers:
/// the browser sets its own multipart boundary. The response is never
/// inspected.
pub async fn post_form(url: &str, pairs: &[(String, String)]) -> Result<(), TransportError> {
    let form = FormData::new().map_err(|e| TransportError::Setup(describe(e)))?;
    for (key, value) in pairs {
        form.append_with_str(key, value)
            .map_err(|e| TransportError::Setup(describe(e)))?;
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::NoCors);
    opts.set_body(form.as_ref());

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| TransportError::Setup(describe(e)))?;
    let window = web_sys::window()
        .ok_or_else(|| TransportError::Setup("no global window".to_string()))?;

    JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| TransportError::Network(describe(e)))?;

    Ok(())
}
