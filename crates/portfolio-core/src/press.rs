//! Press feedback for buttons and links.

use std::time::Duration;

use crate::config::PortfolioConfig;

/// Shrink-then-restore transform applied on click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressFeedback {
    scale: f64,
    restore_after: Duration,
}

impl PressFeedback {
    pub fn new(scale: f64, restore_after: Duration) -> Self {
        Self {
            scale,
            restore_after,
        }
    }

    pub fn from_config(config: &PortfolioConfig) -> Self {
        Self::new(
            config.press_scale,
            Duration::from_millis(u64::from(config.press_restore_ms)),
        )
    }

    /// CSS transform while pressed.
    pub fn pressed_transform(&self) -> String {
        format!("scale({})", self.scale)
    }

    /// CSS transform once restored.
    pub fn rest_transform(&self) -> &'static str {
        "scale(1)"
    }

    pub fn restore_after(&self) -> Duration {
        self.restore_after
    }
}

impl Default for PressFeedback {
    fn default() -> Self {
        Self::from_config(&PortfolioConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_feedback() {
        let press = PressFeedback::default();
        assert_eq!(press.pressed_transform(), "scale(0.98)");
        assert_eq!(press.rest_transform(), "scale(1)");
        assert_eq!(press.restore_after(), Duration::from_millis(100));
    }
}
