//! PySim interpreter as a WASM module for browser environments.
//!
//! Exposes the self-contained engine via `wasm-bindgen` so the
//! exercise page can run learner snippets without a Python runtime.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { execute } from 'pysim-wasm';
//!
//! await init();
//!
//! const result = execute("print('hola')");
//! console.log(JSON.parse(result));
//! // { output: "hola" }
//! ```

use pysim_eval::Interpreter;
use wasm_bindgen::prelude::*;

/// Execute a Python snippet and return its outcome.
///
/// Returns a JSON string with the shape the exercise page consumes:
/// ```json
/// { "output": "...", "error": "..." }
/// ```
/// `error` is absent on success. Each call runs on a fresh interpreter
/// state, so repeated calls with the same source agree.
#[wasm_bindgen]
pub fn execute(source: &str) -> String {
    let mut interpreter = Interpreter::new();
    let outcome = interpreter.execute(source);
    serde_json::to_string(&outcome).unwrap_or_else(|e| {
        format!(r#"{{"output":"","error":"serialization error: {e}"}}"#)
    })
}

/// Return the engine version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
