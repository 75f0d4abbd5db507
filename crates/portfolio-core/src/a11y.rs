//! Accessibility support.
//!
//! - [`KeyboardNavMode`] shows focus outlines only while the visitor is
//!   tabbing through the page.
//! - [`Announcer`] builds the polite status message read out when a section
//!   scrolls into view. The host keeps one live region and overwrites its
//!   text, so announcements never pile up in the document.

/// Two-state focus-visibility toggle: Tab turns it on, a mouse press off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardNavMode {
    enabled: bool,
}

impl KeyboardNavMode {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tab was pressed. Returns `true` if the mode just turned on.
    pub fn on_tab(&mut self) -> bool {
        !std::mem::replace(&mut self.enabled, true)
    }

    /// A mouse button was pressed. Returns `true` if the mode just turned off.
    pub fn on_mouse_down(&mut self) -> bool {
        std::mem::replace(&mut self.enabled, false)
    }
}

/// Formats section announcements.
#[derive(Debug, Clone)]
pub struct Announcer {
    prefix: String,
    last: Option<String>,
}

impl Announcer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            last: None,
        }
    }

    /// Message for a section whose heading is `heading`; a missing heading
    /// reads as an empty title. The heading text is used verbatim.
    pub fn announce(&mut self, heading: Option<&str>) -> &str {
        self.last
            .insert(format!("{}{}", self.prefix, heading.unwrap_or_default()))
    }

    /// Most recent announcement.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}
