//! `web-sys` implementation of the page host.

use portfolio_core::{
    NavControl, NavSurface, PageHost, PortfolioConfig, PortfolioError, PortfolioResult, SectionId,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// Id of the optional JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

/// Hidden from sight, still read by screen readers.
const VISUALLY_HIDDEN: &str = "position:absolute;width:1px;height:1px;padding:0;margin:-1px;\
overflow:hidden;clip:rect(0,0,0,0);white-space:nowrap;border:0";

/// Read `<script type="application/json" id="portfolio-config">`, if any.
pub fn read_config(document: &Document) -> PortfolioResult<PortfolioConfig> {
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(json) if !json.trim().is_empty() => PortfolioConfig::from_json(&json),
        _ => Ok(PortfolioConfig::default()),
    }
}

/// The live document, addressed through the configured markup names.
pub struct DomHost {
    document: Document,
    nav_selector: String,
    section_attribute: String,
    active_class: String,
    clock_selector: String,
    keyboard_nav_class: String,
    heading_selector: String,
    live_region: Option<Element>,
}

impl DomHost {
    pub fn new(document: Document, config: &PortfolioConfig) -> Self {
        Self {
            document,
            nav_selector: format!(".{}", config.nav_control_class),
            section_attribute: config.section_attribute.clone(),
            active_class: config.active_class.clone(),
            clock_selector: format!(".{}", config.clock_class),
            keyboard_nav_class: config.keyboard_nav_class.clone(),
            heading_selector: config.heading_selector.clone(),
            live_region: None,
        }
    }

    fn section(&self, section: &SectionId) -> Option<Element> {
        self.document.get_element_by_id(section.as_str())
    }

    /// Single polite status region, created on first use.
    fn live_region(&mut self) -> PortfolioResult<&Element> {
        if self.live_region.is_none() {
            let body = self
                .document
                .body()
                .ok_or_else(|| PortfolioError::Dom("document has no body".to_string()))?;
            let region = self.document.create_element("div").map_err(js_err)?;
            region.set_attribute("role", "status").map_err(js_err)?;
            region.set_attribute("aria-live", "polite").map_err(js_err)?;
            region.set_attribute("aria-atomic", "true").map_err(js_err)?;
            region.set_attribute("style", VISUALLY_HIDDEN).map_err(js_err)?;
            body.append_child(&region).map_err(js_err)?;
            self.live_region = Some(region);
        }
        self.live_region
            .as_ref()
            .ok_or_else(|| PortfolioError::Dom("live region unavailable".to_string()))
    }
}

pub(crate) fn js_err(value: wasm_bindgen::JsValue) -> PortfolioError {
    PortfolioError::Dom(format!("{:?}", value))
}

impl NavSurface for DomHost {
    type Control = HtmlElement;

    fn section_exists(&self, section: &SectionId) -> bool {
        self.section(section).is_some()
    }

    fn section_top(&self, section: &SectionId) -> Option<f64> {
        self.section(section)
            .map(|el| el.get_bounding_client_rect().top())
    }

    fn set_marked(&mut self, control: &HtmlElement, marked: bool) {
        let result = if marked {
            control
                .class_list()
                .add_1(&self.active_class)
                .and_then(|_| control.set_attribute("aria-current", "page"))
        } else {
            control
                .class_list()
                .remove_1(&self.active_class)
                .and_then(|_| control.remove_attribute("aria-current"))
        };
        if let Err(err) = result {
            tracing::warn!(error = ?err, "failed to update nav marker");
        }
    }

    fn reveal(&mut self, section: &SectionId) {
        let Some(el) = self.section(section) else {
            return;
        };

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        el.scroll_into_view_with_scroll_into_view_options(&options);

        if let Some(el) = el.dyn_ref::<HtmlElement>() {
            if let Err(err) = el.focus() {
                tracing::debug!(section = %section, error = ?err, "section not focusable");
            }
        }
    }
}

impl PageHost for DomHost {
    fn nav_controls(&self) -> Vec<NavControl<HtmlElement>> {
        let Ok(nodes) = self.document.query_selector_all(&self.nav_selector) else {
            tracing::warn!(selector = %self.nav_selector, "invalid nav selector");
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .filter_map(|el| match el.get_attribute(&self.section_attribute) {
                Some(section) => Some(NavControl::new(section, el)),
                None => {
                    tracing::debug!(attribute = %self.section_attribute, "nav control without target");
                    None
                }
            })
            .collect()
    }

    fn section_heading(&self, section: &SectionId) -> Option<String> {
        self.section(section)?
            .query_selector(&self.heading_selector)
            .ok()
            .flatten()?
            .text_content()
    }

    fn set_clock_text(&mut self, text: &str) {
        if let Ok(Some(display)) = self.document.query_selector(&self.clock_selector) {
            display.set_text_content(Some(text));
        }
    }

    fn set_keyboard_nav(&mut self, enabled: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        if let Err(err) = body
            .class_list()
            .toggle_with_force(&self.keyboard_nav_class, enabled)
        {
            tracing::warn!(error = ?err, "failed to toggle keyboard navigation class");
        }
    }

    fn announce(&mut self, text: &str) {
        match self.live_region() {
            Ok(region) => region.set_text_content(Some(text)),
            Err(err) => tracing::warn!(error = %err, "announcement dropped"),
        }
    }
}
