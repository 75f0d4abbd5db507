//! Log sink writing to the browser console.

use portfolio_core::{LogLine, LogSink};
use wasm_bindgen::JsValue;

/// Sends each line to the `console` method matching its level.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConsole;

impl LogSink for BrowserConsole {
    fn write(&self, line: &LogLine) {
        let text = JsValue::from_str(&line.render());
        match line.level.as_str() {
            "error" => web_sys::console::error_1(&text),
            "warn" => web_sys::console::warn_1(&text),
            "info" => web_sys::console::info_1(&text),
            "debug" => web_sys::console::debug_1(&text),
            _ => web_sys::console::log_1(&text),
        }
    }
}
