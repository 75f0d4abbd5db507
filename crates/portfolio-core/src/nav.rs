//! Navigation synchronizer.
//!
//! Two independent triggers move the active section:
//!
//! - **Explicit selection**: a click, Enter/Space on a control, a shortcut, or
//!   the programmatic `navigateToSection` entry point. Marks the control,
//!   then scrolls the section into view and focuses it.
//! - **Scroll tracking**: fired on every scroll event. Picks the last section
//!   (in registry order) whose top edge has passed the threshold and marks
//!   its control without scrolling or moving focus, so it never fights the
//!   user's own scrolling.
//!
//! Both paths go through [`NavigationSynchronizer::mark`], which clears every
//! captured control before marking one. After any mutation exactly one
//! control is marked and it is bound to [`NavigationSynchronizer::active`].

use std::fmt;

use crate::registry::{SectionId, SectionRegistry};

/// What the synchronizer needs from the page.
pub trait NavSurface {
    /// Handle to a navigation control element.
    type Control;

    /// Whether an element with this id exists on the page.
    fn section_exists(&self, section: &SectionId) -> bool;

    /// Distance in pixels from the viewport top to the section's top edge
    /// (negative once scrolled past). `None` if the section is absent.
    fn section_top(&self, section: &SectionId) -> Option<f64>;

    /// Set or clear both the active marker and `aria-current` on a control.
    fn set_marked(&mut self, control: &Self::Control, marked: bool);

    /// Smooth-scroll the section to the viewport top and focus it.
    fn reveal(&mut self, section: &SectionId);
}

/// A navigation control captured at start-up, bound to one section.
#[derive(Debug, Clone, PartialEq)]
pub struct NavControl<C> {
    pub section: SectionId,
    pub handle: C,
}

impl<C> NavControl<C> {
    pub fn new(section: impl Into<SectionId>, handle: C) -> Self {
        Self {
            section: section.into(),
            handle,
        }
    }
}

/// Why a navigation request left everything untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Control index outside the captured set
    UnknownControl(usize),
    /// No element on the page carries this id
    MissingSection(SectionId),
    /// No captured control is bound to this section
    NoControl(SectionId),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::UnknownControl(index) => write!(f, "unknown control #{}", index),
            IgnoreReason::MissingSection(id) => write!(f, "section {} not on page", id),
            IgnoreReason::NoControl(id) => write!(f, "no control bound to {}", id),
        }
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// Markers and active section now point at this section
    Selected(SectionId),
    /// Nothing to do; no writes were made
    Unchanged,
    /// Request could not apply; no writes were made
    Ignored(IgnoreReason),
}

impl NavOutcome {
    pub fn is_selected(&self) -> bool {
        matches!(self, NavOutcome::Selected(_))
    }
}

/// Owns the active section and the captured navigation controls.
pub struct NavigationSynchronizer<C> {
    registry: SectionRegistry,
    controls: Vec<NavControl<C>>,
    active: Option<SectionId>,
    threshold: f64,
}

impl<C> NavigationSynchronizer<C> {
    pub fn new(
        registry: SectionRegistry,
        controls: Vec<NavControl<C>>,
        initial: Option<SectionId>,
        threshold: f64,
    ) -> Self {
        Self {
            registry,
            controls,
            active: initial,
            threshold,
        }
    }

    /// Currently active section.
    pub fn active(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }

    pub fn controls(&self) -> &[NavControl<C>] {
        &self.controls
    }

    /// Index of the first control bound to `section`.
    pub fn control_for(&self, section: &SectionId) -> Option<usize> {
        self.controls.iter().position(|c| &c.section == section)
    }

    /// Explicit selection of the control at `index`.
    pub fn select_section<S>(&mut self, surface: &mut S, index: usize) -> NavOutcome
    where
        S: NavSurface<Control = C>,
    {
        let Some(control) = self.controls.get(index) else {
            tracing::debug!(index, "select ignored: unknown control");
            return NavOutcome::Ignored(IgnoreReason::UnknownControl(index));
        };
        let section = control.section.clone();

        if !surface.section_exists(&section) {
            tracing::debug!(section = %section, "select ignored: section not on page");
            return NavOutcome::Ignored(IgnoreReason::MissingSection(section));
        }

        self.mark(surface, index);
        surface.reveal(&section);
        tracing::debug!(section = %section, "section selected");
        NavOutcome::Selected(section)
    }

    /// Explicit selection by section id, as if its control were clicked.
    pub fn navigate_to<S>(&mut self, surface: &mut S, section: &SectionId) -> NavOutcome
    where
        S: NavSurface<Control = C>,
    {
        match self.control_for(section) {
            Some(index) => self.select_section(surface, index),
            None => {
                tracing::debug!(section = %section, "navigate ignored: no control");
                NavOutcome::Ignored(IgnoreReason::NoControl(section.clone()))
            }
        }
    }

    /// Passive sync from the current scroll position.
    pub fn update_on_scroll<S>(&mut self, surface: &mut S) -> NavOutcome
    where
        S: NavSurface<Control = C>,
    {
        let Some(winner) = self.scroll_winner(surface) else {
            return NavOutcome::Unchanged;
        };
        if self.active.as_ref() == Some(&winner) {
            return NavOutcome::Unchanged;
        }
        let Some(index) = self.control_for(&winner) else {
            return NavOutcome::Ignored(IgnoreReason::NoControl(winner));
        };

        self.mark(surface, index);
        tracing::trace!(section = %winner, "active section follows scroll");
        NavOutcome::Selected(winner)
    }

    /// Mark the control of the current active section, clearing the rest.
    pub fn restore_markers<S>(&self, surface: &mut S)
    where
        S: NavSurface<Control = C>,
    {
        let target = self.active.as_ref().and_then(|id| self.control_for(id));
        for (i, control) in self.controls.iter().enumerate() {
            surface.set_marked(&control.handle, Some(i) == target);
        }
    }

    /// Last registry section whose top edge is at or above the threshold.
    fn scroll_winner<S>(&self, surface: &S) -> Option<SectionId>
    where
        S: NavSurface<Control = C>,
    {
        self.registry
            .iter()
            .filter(|id| {
                surface
                    .section_top(id)
                    .is_some_and(|top| top <= self.threshold)
            })
            .last()
            .cloned()
    }

    fn mark<S>(&mut self, surface: &mut S, index: usize)
    where
        S: NavSurface<Control = C>,
    {
        for control in &self.controls {
            surface.set_marked(&control.handle, false);
        }
        let control = &self.controls[index];
        surface.set_marked(&control.handle, true);
        self.active = Some(control.section.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// In-memory page: section tops plus a marker per control.
    #[derive(Default)]
    struct FakePage {
        tops: HashMap<SectionId, f64>,
        marked: HashMap<u32, bool>,
        writes: usize,
        revealed: Vec<SectionId>,
    }

    impl FakePage {
        fn with_sections(ids: &[(&str, f64)]) -> Self {
            Self {
                tops: ids.iter().map(|(id, top)| (SectionId::from(*id), *top)).collect(),
                ..Default::default()
            }
        }

        fn marked(&self) -> Vec<u32> {
            let mut ids: Vec<u32> = self
                .marked
                .iter()
                .filter(|(_, on)| **on)
                .map(|(id, _)| *id)
                .collect();
            ids.sort();
            ids
        }
    }

    impl NavSurface for FakePage {
        type Control = u32;

        fn section_exists(&self, section: &SectionId) -> bool {
            self.tops.contains_key(section)
        }

        fn section_top(&self, section: &SectionId) -> Option<f64> {
            self.tops.get(section).copied()
        }

        fn set_marked(&mut self, control: &u32, marked: bool) {
            self.writes += 1;
            self.marked.insert(*control, marked);
        }

        fn reveal(&mut self, section: &SectionId) {
            self.revealed.push(section.clone());
        }
    }

    fn synchronizer() -> NavigationSynchronizer<u32> {
        let registry = SectionRegistry::new(["about", "projects", "skills", "contact"]).unwrap();
        let controls = vec![
            NavControl::new("about", 10),
            NavControl::new("projects", 11),
            NavControl::new("skills", 12),
            NavControl::new("contact", 13),
        ];
        NavigationSynchronizer::new(registry, controls, Some("about".into()), 100.0)
    }

    fn page() -> FakePage {
        FakePage::with_sections(&[
            ("about", 0.0),
            ("projects", 800.0),
            ("skills", 1600.0),
            ("contact", 2400.0),
        ])
    }

    #[test]
    fn test_select_marks_one_and_reveals() {
        let mut nav = synchronizer();
        let mut page = page();

        let outcome = nav.select_section(&mut page, 2);

        assert_eq!(outcome, NavOutcome::Selected("skills".into()));
        assert_eq!(nav.active(), Some(&SectionId::from("skills")));
        assert_eq!(page.marked(), vec![12]);
        assert_eq!(page.revealed, vec![SectionId::from("skills")]);
    }

    #[test]
    fn test_select_missing_section_is_silent() {
        let mut nav = synchronizer();
        let mut page = FakePage::with_sections(&[("about", 0.0)]);

        let outcome = nav.select_section(&mut page, 3);

        assert_eq!(
            outcome,
            NavOutcome::Ignored(IgnoreReason::MissingSection("contact".into()))
        );
        assert_eq!(nav.active(), Some(&SectionId::from("about")));
        assert_eq!(page.writes, 0);
        assert!(page.revealed.is_empty());
    }

    #[test]
    fn test_select_unknown_control_index() {
        let mut nav = synchronizer();
        let mut page = page();

        assert_eq!(
            nav.select_section(&mut page, 9),
            NavOutcome::Ignored(IgnoreReason::UnknownControl(9))
        );
        assert_eq!(page.writes, 0);
    }

    #[test]
    fn test_navigate_to_resolves_control() {
        let mut nav = synchronizer();
        let mut page = page();

        assert!(nav.navigate_to(&mut page, &"projects".into()).is_selected());
        assert_eq!(page.marked(), vec![11]);

        assert_eq!(
            nav.navigate_to(&mut page, &"blog".into()),
            NavOutcome::Ignored(IgnoreReason::NoControl("blog".into()))
        );
        assert_eq!(nav.active(), Some(&SectionId::from("projects")));
    }

    #[test]
    fn test_scroll_prefers_later_section() {
        let mut nav = synchronizer();
        let mut page = FakePage::with_sections(&[
            ("about", -900.0),
            ("projects", -20.0),
            ("skills", 100.0),
            ("contact", 700.0),
        ]);

        let outcome = nav.update_on_scroll(&mut page);

        assert_eq!(outcome, NavOutcome::Selected("skills".into()));
        assert_eq!(page.marked(), vec![12]);
        assert!(page.revealed.is_empty(), "scroll sync must not scroll or focus");
    }

    #[test]
    fn test_scroll_is_idempotent() {
        let mut nav = synchronizer();
        let mut page = FakePage::with_sections(&[("about", -900.0), ("projects", 40.0)]);

        assert!(nav.update_on_scroll(&mut page).is_selected());
        let writes = page.writes;

        assert_eq!(nav.update_on_scroll(&mut page), NavOutcome::Unchanged);
        assert_eq!(page.writes, writes);
    }

    #[test]
    fn test_scroll_no_candidate_is_noop() {
        let mut nav = synchronizer();
        let mut page = FakePage::with_sections(&[("about", 150.0), ("projects", 900.0)]);

        assert_eq!(nav.update_on_scroll(&mut page), NavOutcome::Unchanged);
        assert_eq!(page.writes, 0);
        assert_eq!(nav.active(), Some(&SectionId::from("about")));
    }

    #[test]
    fn test_scroll_winner_without_control() {
        let registry = SectionRegistry::new(["about", "projects"]).unwrap();
        let mut nav = NavigationSynchronizer::new(
            registry,
            vec![NavControl::new("about", 1u32)],
            Some("about".into()),
            100.0,
        );
        let mut page = FakePage::with_sections(&[("about", -500.0), ("projects", 0.0)]);

        assert_eq!(
            nav.update_on_scroll(&mut page),
            NavOutcome::Ignored(IgnoreReason::NoControl("projects".into()))
        );
        assert_eq!(nav.active(), Some(&SectionId::from("about")));
        assert_eq!(page.writes, 0);
    }

    #[test]
    fn test_restore_markers_marks_initial() {
        let nav = synchronizer();
        let mut page = page();
        page.marked.insert(13, true);

        nav.restore_markers(&mut page);

        assert_eq!(page.marked(), vec![10]);
    }
}
