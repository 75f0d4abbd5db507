//! DOM event source.
//!
//! Wires native listeners, the clock interval and the section intersection
//! observer, forwarding everything to the runtime as `InputEvent`s. Every
//! handle is held by the source, which lives for the rest of the page.

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Interval;
use portfolio_core::{
    Dispatcher, Disposition, EventSource, InputEvent, KeyChord, NavControl, PortfolioConfig,
    PortfolioError, PortfolioResult,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use crate::dom::js_err;

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Owns every listener registered on the page.
pub struct DomEventSource {
    window: Window,
    document: Document,
    clock_interval_ms: u32,
    announce_ratio: f64,
    listeners: Vec<EventListener>,
    clock: Option<Interval>,
    observer: Option<(IntersectionObserver, ObserverCallback)>,
}

impl DomEventSource {
    pub fn new(window: Window, document: Document, config: &PortfolioConfig) -> Self {
        Self {
            window,
            document,
            clock_interval_ms: config.clock_interval_ms,
            announce_ratio: config.announce_ratio,
            listeners: Vec::new(),
            clock: None,
            observer: None,
        }
    }

    fn observe_sections(&mut self, dispatcher: Dispatcher) -> PortfolioResult<()> {
        let callback: ObserverCallback = Closure::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        let section = entry.target().id();
                        dispatcher(InputEvent::SectionVisible {
                            section: section.into(),
                        });
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(self.announce_ratio));
        let observer = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_err)?;

        let sections = self
            .document
            .query_selector_all("section[id]")
            .map_err(js_err)?;
        for i in 0..sections.length() {
            if let Some(section) = sections.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
                observer.observe(&section);
            }
        }
        tracing::debug!(sections = sections.length(), "announcing sections");

        self.observer = Some((observer, callback));
        Ok(())
    }
}

/// Forward a keyboard event and honor the returned disposition.
fn forward_key(dispatcher: &Dispatcher, event: &Event, wrap: impl FnOnce(KeyChord) -> InputEvent) {
    let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
        return;
    };
    let chord = KeyChord {
        key: key.key(),
        ctrl: key.ctrl_key(),
        meta: key.meta_key(),
        alt: key.alt_key(),
        shift: key.shift_key(),
    };
    if dispatcher(wrap(chord)) == Disposition::PreventDefault {
        event.prevent_default();
    }
}

impl EventSource<HtmlElement> for DomEventSource {
    fn connect(
        &mut self,
        controls: &[NavControl<HtmlElement>],
        dispatcher: Dispatcher,
    ) -> PortfolioResult<()> {
        if !self.listeners.is_empty() {
            return Err(PortfolioError::AlreadyStarted);
        }
        let active = EventListenerOptions::enable_prevent_default();

        for (control, nav) in controls.iter().enumerate() {
            let dispatch = dispatcher.clone();
            self.listeners.push(EventListener::new(&nav.handle, "click", move |_| {
                dispatch(InputEvent::ControlClick { control });
            }));

            let dispatch = dispatcher.clone();
            self.listeners.push(EventListener::new_with_options(
                &nav.handle,
                "keypress",
                active,
                move |event| {
                    forward_key(&dispatch, event, |chord| InputEvent::ControlKey {
                        control,
                        chord,
                    })
                },
            ));
        }

        let dispatch = dispatcher.clone();
        self.listeners
            .push(EventListener::new(&self.window, "scroll", move |_| {
                dispatch(InputEvent::Scroll);
            }));

        let dispatch = dispatcher.clone();
        self.listeners.push(EventListener::new_with_options(
            &self.document,
            "keydown",
            active,
            move |event| forward_key(&dispatch, event, InputEvent::KeyDown),
        ));

        let dispatch = dispatcher.clone();
        self.listeners
            .push(EventListener::new(&self.document, "mousedown", move |_| {
                dispatch(InputEvent::MouseDown);
            }));

        let dispatch = dispatcher.clone();
        self.clock = Some(Interval::new(self.clock_interval_ms, move || {
            dispatch(InputEvent::Tick);
        }));

        self.observe_sections(dispatcher)?;

        tracing::debug!(listeners = self.listeners.len(), "page events wired");
        Ok(())
    }
}
