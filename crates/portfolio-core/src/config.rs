//! Page configuration.
//!
//! Every markup name and timing constant the behaviors depend on lives here.
//! The browser binding reads an optional JSON block from the page; any field
//! left out keeps its default, and the defaults match the stock portfolio
//! markup.

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};
use crate::registry::{SectionId, SectionRegistry};

/// Configuration for the portfolio behavior layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Section ids in document order
    pub sections: Vec<SectionId>,
    /// Section that is active before any interaction
    pub default_section: Option<SectionId>,
    /// Class shared by all navigation controls
    pub nav_control_class: String,
    /// Data attribute naming a control's target section
    pub section_attribute: String,
    /// Class marking the active control
    pub active_class: String,
    /// A section counts as reached once its top is at or above this many
    /// pixels from the viewport top
    pub scroll_threshold_px: f64,
    /// Class of the element showing the clock
    pub clock_class: String,
    /// Clock refresh period
    pub clock_interval_ms: u32,
    /// Body class toggled while navigating with the keyboard
    pub keyboard_nav_class: String,
    /// Visible fraction at which a section is announced
    pub announce_ratio: f64,
    /// Text placed before the section heading in announcements
    pub announce_prefix: String,
    /// Heading tag read for announcement text
    pub heading_selector: String,
    /// Scale applied while a button or link is pressed
    pub press_scale: f64,
    /// Delay before the pressed scale is restored
    pub press_restore_ms: u32,
    /// Maximum log level: trace, debug, info, warn, error or off
    pub log_level: String,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            sections: ["about", "projects", "skills", "contact"]
                .into_iter()
                .map(SectionId::from)
                .collect(),
            default_section: Some(SectionId::from("about")),
            nav_control_class: "nav-item-90s".to_string(),
            section_attribute: "data-section".to_string(),
            active_class: "active".to_string(),
            scroll_threshold_px: 100.0,
            clock_class: "time-display".to_string(),
            clock_interval_ms: 1000,
            keyboard_nav_class: "keyboard-nav".to_string(),
            announce_ratio: 0.5,
            announce_prefix: "Seção: ".to_string(),
            heading_selector: "h2".to_string(),
            press_scale: 0.98,
            press_restore_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

impl PortfolioConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> PortfolioResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> PortfolioResult<()> {
        let registry = self.registry()?;

        if let Some(ref default) = self.default_section {
            if !registry.contains(default) {
                return Err(PortfolioError::Config(format!(
                    "default section {} is not in the section list",
                    default
                )));
            }
        }
        if !self.scroll_threshold_px.is_finite() {
            return Err(PortfolioError::Config(
                "scroll_threshold_px must be finite".to_string(),
            ));
        }
        if !(self.announce_ratio > 0.0 && self.announce_ratio <= 1.0) {
            return Err(PortfolioError::Config(format!(
                "announce_ratio must be in (0, 1], got {}",
                self.announce_ratio
            )));
        }
        if self.clock_interval_ms == 0 {
            return Err(PortfolioError::Config(
                "clock_interval_ms must be positive".to_string(),
            ));
        }
        if !(self.press_scale.is_finite() && self.press_scale > 0.0) {
            return Err(PortfolioError::Config(
                "press_scale must be a positive number".to_string(),
            ));
        }
        for (name, value) in [
            ("nav_control_class", &self.nav_control_class),
            ("section_attribute", &self.section_attribute),
            ("active_class", &self.active_class),
            ("clock_class", &self.clock_class),
            ("keyboard_nav_class", &self.keyboard_nav_class),
            ("heading_selector", &self.heading_selector),
        ] {
            if value.trim().is_empty() {
                return Err(PortfolioError::Config(format!("{} must not be empty", name)));
            }
        }
        self.level_filter()?;
        Ok(())
    }

    /// Build the ordered section registry.
    pub fn registry(&self) -> PortfolioResult<SectionRegistry> {
        SectionRegistry::new(self.sections.iter().cloned())
    }

    /// Parse `log_level` into a tracing filter.
    pub fn level_filter(&self) -> PortfolioResult<tracing::level_filters::LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| PortfolioError::Config(format!("unknown log level: {}", self.log_level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_defaults_match_stock_markup() {
        let config = PortfolioConfig::default();
        config.validate().unwrap();

        assert_eq!(config.sections.len(), 4);
        assert_eq!(config.default_section, Some(SectionId::from("about")));
        assert_eq!(config.nav_control_class, "nav-item-90s");
        assert_eq!(config.scroll_threshold_px, 100.0);
        assert_eq!(config.clock_interval_ms, 1000);
        assert_eq!(config.press_restore_ms, 100);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::INFO);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            PortfolioConfig::from_json(r#"{"scroll_threshold_px": 64, "log_level": "debug"}"#)
                .unwrap();

        assert_eq!(config.scroll_threshold_px, 64.0);
        assert_eq!(config.level_filter().unwrap(), LevelFilter::DEBUG);
        assert_eq!(config.active_class, "active");
    }

    #[test]
    fn test_default_section_must_be_registered() {
        let err = PortfolioConfig::from_json(
            r#"{"sections": ["intro", "work"], "default_section": "about"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PortfolioError::Config(_)));

        let config = PortfolioConfig::from_json(
            r#"{"sections": ["intro", "work"], "default_section": null}"#,
        )
        .unwrap();
        assert_eq!(config.default_section, None);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = PortfolioConfig::default();
        config.announce_ratio = 0.0;
        assert!(config.validate().is_err());

        let mut config = PortfolioConfig::default();
        config.clock_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = PortfolioConfig::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = PortfolioConfig::default();
        config.active_class = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = PortfolioConfig::from_json("{\"sections\": ").unwrap_err();
        assert!(matches!(err, PortfolioError::Json(_)));
    }
}
