//! Portfolio browser binding
//!
//! Compiled to WebAssembly and loaded by the portfolio page. Once the DOM is
//! ready it reads the optional configuration block, installs console
//! logging, captures the navigation controls and wires every listener.
//!
//! ## Page contract
//!
//! ```html
//! <button class="nav-item-90s" data-section="projects">Projects</button>
//! <section id="projects" tabindex="-1"><h2>Projects</h2>...</section>
//! <span class="time-display"></span>
//!
//! <script type="application/json" id="portfolio-config">
//!   { "scroll_threshold_px": 80, "log_level": "debug" }
//! </script>
//! ```
//!
//! Boot installs `window.navigateToSection`, so inline handlers elsewhere on
//! the page (`onclick="navigateToSection('skills')"`) reach the same path as
//! a click on the section's control.

mod console;
mod dom;
mod press;
mod source;

use std::cell::OnceCell;

use anyhow::{anyhow, bail, Context};
use gloo::events::EventListener;
use portfolio_core::{
    logging, LocalClock, Portfolio, PortfolioConfig, PortfolioError, PressFeedback,
    Runtime,
};
use wasm_bindgen::prelude::*;

pub use console::BrowserConsole;
pub use dom::DomHost;
pub use source::DomEventSource;

/// Name of the global navigation function installed on `window`.
pub const GLOBAL_NAVIGATE: &str = "navigateToSection";

/// Everything that must stay alive for the lifetime of the page.
struct Page {
    runtime: Runtime<DomHost, LocalClock>,
    _source: DomEventSource,
    _press: Vec<EventListener>,
    _global_navigate: Closure<dyn Fn(String)>,
}

thread_local! {
    static PAGE: OnceCell<Page> = const { OnceCell::new() };
}

/// Module entry point: boot now, or once the DOM content has loaded.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = gloo::utils::window().document() else {
        web_sys::console::error_1(&"portfolio: no document".into());
        return;
    };

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| boot_and_report()).forget();
    } else {
        boot_and_report();
    }
}

/// Navigate to a section by id, exactly like clicking its control.
///
/// Does nothing for unknown ids or before the page has booted.
#[wasm_bindgen(js_name = navigateToSection)]
pub fn navigate_to_section(section_id: &str) {
    PAGE.with(|page| match page.get() {
        Some(page) => {
            page.runtime.navigate(section_id);
        }
        None => tracing::debug!(section = section_id, "navigateToSection before boot"),
    });
}

fn boot_and_report() {
    if let Err(err) = boot() {
        tracing::error!(error = %format!("{:#}", err), "portfolio failed to start");
        web_sys::console::error_1(&format!("portfolio: {:#}", err).into());
    }
}

fn boot() -> anyhow::Result<()> {
    if PAGE.with(|page| page.get().is_some()) {
        bail!(PortfolioError::AlreadyStarted);
    }

    let window = gloo::utils::window();
    let document = window
        .document()
        .ok_or_else(|| anyhow!("window has no document"))?;

    let (config, config_error) = match dom::read_config(&document) {
        Ok(config) => (config, None),
        Err(err) => (PortfolioConfig::default(), Some(err)),
    };
    let level = config.level_filter().context("log level")?;
    if let Err(err) = logging::install(BrowserConsole, level) {
        web_sys::console::warn_1(&format!("portfolio: {}", err).into());
    }
    if let Some(err) = config_error {
        tracing::warn!(error = %err, "ignoring page configuration, using defaults");
    }

    let span = tracing::info_span!("boot");
    let _enter = span.enter();

    let host = DomHost::new(document.clone(), &config);
    let portfolio = Portfolio::new(&config, host, LocalClock).context("building portfolio")?;

    let mut source = DomEventSource::new(window.clone(), document.clone(), &config);
    let runtime = Runtime::start(portfolio, &mut source).context("wiring page events")?;
    let press = press::install(&document, PressFeedback::from_config(&config))
        .context("installing press feedback")?;

    // The JS function stays callable only while the closure is held in `Page`.
    let global_navigate: Closure<dyn Fn(String)> =
        Closure::new(|section_id: String| navigate_to_section(&section_id));
    js_sys::Reflect::set(
        &window,
        &JsValue::from_str(GLOBAL_NAVIGATE),
        global_navigate.as_ref(),
    )
    .map_err(|err| anyhow!("installing {}: {:?}", GLOBAL_NAVIGATE, err))?;

    PAGE.with(|page| {
        page.set(Page {
            runtime,
            _source: source,
            _press: press,
            _global_navigate: global_navigate,
        })
        .map_err(|_| PortfolioError::AlreadyStarted)
    })?;
    tracing::debug!(name = GLOBAL_NAVIGATE, "global navigation installed");
    Ok(())
}
