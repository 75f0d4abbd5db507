//! Keyboard shortcuts: Ctrl/Cmd + 1..4 jumps to a section.

use crate::registry::{SectionId, SectionRegistry};

/// Number of digit shortcuts (`1` through this value).
pub const SHORTCUT_SLOTS: usize = 4;

/// A keydown as seen by the page: the `key` value plus modifier state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn is_tab(&self) -> bool {
        self.key == "Tab"
    }

    /// Keys that activate a focused navigation control.
    pub fn is_activation(&self) -> bool {
        self.key == "Enter" || self.key == " "
    }
}

/// Digit-to-section mapping over the first [`SHORTCUT_SLOTS`] registry entries.
pub struct ShortcutMap {
    slots: Vec<SectionId>,
}

impl ShortcutMap {
    pub fn new(registry: &SectionRegistry) -> Self {
        Self {
            slots: registry.iter().take(SHORTCUT_SLOTS).cloned().collect(),
        }
    }

    /// Section for a command-modified digit, if the chord is a shortcut.
    pub fn resolve(&self, chord: &KeyChord) -> Option<&SectionId> {
        if !chord.has_command_modifier() {
            return None;
        }
        let mut chars = chord.key.chars();
        let digit = chars.next()?.to_digit(10)? as usize;
        if chars.next().is_some() || digit == 0 {
            return None;
        }
        self.slots.get(digit - 1)
    }
}
