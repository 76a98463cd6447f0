//! Tauri Command Wrappers
//!
//! Frontend bindings to the host's point commands.

mod points;

use wasm_bindgen::prelude::*;

use crate::error::SourceError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

pub use points::TauriPointsApi;

/// Host rejections arrive as thrown strings; anything else is a transport failure.
fn rejected(cmd: &str, err: JsValue) -> SourceError {
    match err.as_string() {
        Some(msg) => SourceError::Rejected(format!("{}: {}", cmd, msg)),
        None => SourceError::Transport(format!("{}: {:?}", cmd, err)),
    }
}

fn decode_error(e: serde_wasm_bindgen::Error) -> SourceError {
    SourceError::Decode(e.to_string())
}
