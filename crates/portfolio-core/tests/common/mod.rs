//! Shared test doubles: an in-memory page and a manually driven event source.

#![allow(dead_code)]

use std::collections::HashMap;

use chrono::NaiveTime;
use portfolio_core::{
    Clock, Dispatcher, Disposition, EventSource, InputEvent, NavControl, NavSurface, PageHost,
    PortfolioResult, SectionId,
};

/// A page holding section geometry, headings and control markers.
#[derive(Default)]
pub struct FakePage {
    pub controls: Vec<(String, u32)>,
    pub tops: HashMap<SectionId, f64>,
    pub headings: HashMap<SectionId, String>,
    pub marked: HashMap<u32, bool>,
    pub marker_writes: usize,
    pub revealed: Vec<SectionId>,
    pub clock_text: Option<String>,
    pub has_clock: bool,
    pub keyboard_nav: bool,
    pub keyboard_nav_writes: usize,
    pub live_region: Option<String>,
    pub live_region_writes: usize,
}

impl FakePage {
    /// Stock portfolio: four sections stacked 800px apart, one control each.
    pub fn stock() -> Self {
        let mut page = Self {
            has_clock: true,
            ..Default::default()
        };
        for (i, id) in ["about", "projects", "skills", "contact"].iter().enumerate() {
            page.add_section(id, i as f64 * 800.0, Some(&capitalize(id)));
            page.controls.push((id.to_string(), 100 + i as u32));
        }
        page
    }

    pub fn add_section(&mut self, id: &str, top: f64, heading: Option<&str>) {
        self.tops.insert(id.into(), top);
        if let Some(heading) = heading {
            self.headings.insert(id.into(), heading.to_string());
        }
    }

    /// Scroll the viewport so its top sits at `y` page pixels.
    pub fn scroll_to(&mut self, y: f64) {
        for (i, id) in ["about", "projects", "skills", "contact"].iter().enumerate() {
            if let Some(top) = self.tops.get_mut(&SectionId::from(*id)) {
                *top = i as f64 * 800.0 - y;
            }
        }
    }

    pub fn marked_controls(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .marked
            .iter()
            .filter(|(_, on)| **on)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    pub fn control_id(&self, section: &str) -> u32 {
        self.controls
            .iter()
            .find(|(s, _)| s == section)
            .map(|(_, id)| *id)
            .expect("control for section")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
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
        self.marker_writes += 1;
        self.marked.insert(*control, marked);
    }

    fn reveal(&mut self, section: &SectionId) {
        self.revealed.push(section.clone());
    }
}

impl PageHost for FakePage {
    fn nav_controls(&self) -> Vec<NavControl<u32>> {
        self.controls
            .iter()
            .map(|(section, id)| NavControl::new(section.as_str(), *id))
            .collect()
    }

    fn section_heading(&self, section: &SectionId) -> Option<String> {
        self.headings.get(section).cloned()
    }

    fn set_clock_text(&mut self, text: &str) {
        if self.has_clock {
            self.clock_text = Some(text.to_string());
        }
    }

    fn set_keyboard_nav(&mut self, enabled: bool) {
        self.keyboard_nav_writes += 1;
        self.keyboard_nav = enabled;
    }

    fn announce(&mut self, text: &str) {
        self.live_region_writes += 1;
        self.live_region = Some(text.to_string());
    }
}

/// Clock frozen at a fixed time.
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    pub fn at(h: u32, m: u32) -> Self {
        Self(NaiveTime::from_hms_opt(h, m, 0).expect("valid time"))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

/// Event source driven by the test.
#[derive(Default)]
pub struct ManualSource {
    pub dispatcher: Option<Dispatcher>,
    pub connected_controls: Vec<u32>,
    pub connects: usize,
}

impl ManualSource {
    pub fn emit(&self, event: InputEvent) -> Disposition {
        let dispatcher = self.dispatcher.as_ref().expect("source connected");
        dispatcher(event)
    }
}

impl EventSource<u32> for ManualSource {
    fn connect(
        &mut self,
        controls: &[NavControl<u32>],
        dispatcher: Dispatcher,
    ) -> PortfolioResult<()> {
        self.connects += 1;
        self.connected_controls = controls.iter().map(|c| c.handle).collect();
        self.dispatcher = Some(dispatcher);
        Ok(())
    }
}
