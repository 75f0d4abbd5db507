//! Press feedback on every button and link.

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use portfolio_core::{PortfolioResult, PressFeedback};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom::js_err;

/// Shrink each clicked button or link, then restore it after the delay.
pub fn install(document: &Document, feedback: PressFeedback) -> PortfolioResult<Vec<EventListener>> {
    let targets = document.query_selector_all("button, a").map_err(js_err)?;
    let restore_ms = u32::try_from(feedback.restore_after().as_millis()).unwrap_or(u32::MAX);

    let listeners: Vec<EventListener> = (0..targets.length())
        .filter_map(|i| targets.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .map(|el| {
            let target = el.clone();
            EventListener::new(&el, "click", move |_| {
                set_transform(&target, &feedback.pressed_transform());
                let target = target.clone();
                Timeout::new(restore_ms, move || {
                    set_transform(&target, feedback.rest_transform());
                })
                .forget();
            })
        })
        .collect();

    tracing::debug!(targets = listeners.len(), "press feedback installed");
    Ok(listeners)
}

fn set_transform(el: &HtmlElement, transform: &str) {
    if let Err(err) = el.style().set_property("transform", transform) {
        tracing::debug!(error = ?err, "failed to set transform");
    }
}
