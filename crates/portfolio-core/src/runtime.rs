//! Event dispatch.
//!
//! The host page never calls the behaviors directly. An [`EventSource`]
//! subscribes to whatever native input the platform offers (DOM listeners,
//! timers, intersection observers) and forwards each one as an
//! [`InputEvent`] through a [`Dispatcher`]. [`Portfolio::handle`] routes the
//! event to the component that owns it.
//!
//! ## Run to completion
//!
//! A handler can cause the host to raise another event synchronously (for
//! example focusing a section). Such events are queued and handled, in
//! order, right after the current one finishes, so no handler ever observes
//! a half-applied mutation.
//!
//! ```text
//! DOM ──listener──► EventSource ──InputEvent──► Dispatcher ──► Portfolio::handle
//!                                                   │                 │
//!                                                   └── pending queue ◄┘ (re-entrant)
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::a11y::{Announcer, KeyboardNavMode};
use crate::clock::{Clock, ClockTicker};
use crate::config::PortfolioConfig;
use crate::error::PortfolioResult;
use crate::nav::{NavControl, NavOutcome, NavSurface, NavigationSynchronizer};
use crate::registry::SectionId;
use crate::shortcuts::{KeyChord, ShortcutMap};

/// Everything the behaviors read from or write to the page.
pub trait PageHost: NavSurface {
    /// Navigation controls in document order, bound to their sections.
    fn nav_controls(&self) -> Vec<NavControl<Self::Control>>;

    /// Heading text of a section, if it has one.
    fn section_heading(&self, section: &SectionId) -> Option<String>;

    /// Write the clock display; no-op if the page has none.
    fn set_clock_text(&mut self, text: &str);

    /// Toggle the body-level keyboard navigation class.
    fn set_keyboard_nav(&mut self, enabled: bool);

    /// Replace the text of the polite live region.
    fn announce(&mut self, text: &str);
}

/// Input forwarded by an [`EventSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A navigation control was clicked
    ControlClick { control: usize },
    /// A key was pressed while a navigation control had focus
    ControlKey { control: usize, chord: KeyChord },
    /// The window scrolled
    Scroll,
    /// A key was pressed anywhere in the document
    KeyDown(KeyChord),
    /// A mouse button was pressed anywhere in the document
    MouseDown,
    /// A section crossed the announcement visibility threshold
    SectionVisible { section: SectionId },
    /// Programmatic "navigate to section"
    Navigate(SectionId),
    /// The clock interval fired
    Tick,
}

/// What the source should do with the native event after handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Disposition {
    #[default]
    Continue,
    /// Suppress the browser's default action
    PreventDefault,
}

/// Entry point handed to an [`EventSource`].
pub type Dispatcher = Rc<dyn Fn(InputEvent) -> Disposition>;

/// Host capability that turns native input into [`InputEvent`]s.
pub trait EventSource<C> {
    /// Subscribe to native input for `controls` (indices match the slice)
    /// and forward everything to `dispatcher`. Called exactly once.
    fn connect(&mut self, controls: &[NavControl<C>], dispatcher: Dispatcher)
        -> PortfolioResult<()>;
}

/// All behavior state for one page.
pub struct Portfolio<H: PageHost, C> {
    host: H,
    nav: NavigationSynchronizer<H::Control>,
    shortcuts: ShortcutMap,
    keyboard: KeyboardNavMode,
    announcer: Announcer,
    ticker: ClockTicker<C>,
}

impl<H: PageHost, C: Clock> Portfolio<H, C> {
    /// Capture the page's controls and build every component from `config`.
    pub fn new(config: &PortfolioConfig, host: H, clock: C) -> PortfolioResult<Self> {
        config.validate()?;
        let registry = config.registry()?;
        let controls = host.nav_controls();

        tracing::debug!(
            sections = registry.len(),
            controls = controls.len(),
            "navigation captured"
        );

        Ok(Self {
            shortcuts: ShortcutMap::new(&registry),
            nav: NavigationSynchronizer::new(
                registry,
                controls,
                config.default_section.clone(),
                config.scroll_threshold_px,
            ),
            host,
            keyboard: KeyboardNavMode::default(),
            announcer: Announcer::new(config.announce_prefix.clone()),
            ticker: ClockTicker::new(clock),
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn nav(&self) -> &NavigationSynchronizer<H::Control> {
        &self.nav
    }

    pub fn keyboard_nav(&self) -> KeyboardNavMode {
        self.keyboard
    }

    pub fn last_announcement(&self) -> Option<&str> {
        self.announcer.last()
    }

    /// Start-up effects: align markers with the initial section and show
    /// the time immediately.
    pub fn start(&mut self) {
        self.nav.restore_markers(&mut self.host);
        self.tick();
    }

    /// Route one event.
    pub fn handle(&mut self, event: InputEvent) -> Disposition {
        match event {
            InputEvent::ControlClick { control } => {
                self.nav.select_section(&mut self.host, control);
                Disposition::Continue
            }
            InputEvent::ControlKey { control, chord } => {
                if !chord.is_activation() {
                    return Disposition::Continue;
                }
                self.nav.select_section(&mut self.host, control);
                Disposition::PreventDefault
            }
            InputEvent::Scroll => {
                self.nav.update_on_scroll(&mut self.host);
                Disposition::Continue
            }
            InputEvent::KeyDown(chord) => self.key_down(&chord),
            InputEvent::MouseDown => {
                if self.keyboard.on_mouse_down() {
                    self.host.set_keyboard_nav(false);
                }
                Disposition::Continue
            }
            InputEvent::SectionVisible { section } => {
                let heading = self.host.section_heading(&section);
                let text = self.announcer.announce(heading.as_deref());
                self.host.announce(text);
                Disposition::Continue
            }
            InputEvent::Navigate(section) => {
                if let NavOutcome::Ignored(reason) = self.nav.navigate_to(&mut self.host, &section)
                {
                    tracing::debug!(%reason, "navigateToSection had no effect");
                }
                Disposition::Continue
            }
            InputEvent::Tick => {
                self.tick();
                Disposition::Continue
            }
        }
    }

    fn key_down(&mut self, chord: &KeyChord) -> Disposition {
        if chord.is_tab() && self.keyboard.on_tab() {
            self.host.set_keyboard_nav(true);
        }

        match self.shortcuts.resolve(chord).cloned() {
            Some(section) => {
                self.nav.navigate_to(&mut self.host, &section);
                Disposition::PreventDefault
            }
            None => Disposition::Continue,
        }
    }

    fn tick(&mut self) {
        let text = self.ticker.tick();
        self.host.set_clock_text(&text);
    }
}

struct Shared<H: PageHost, C> {
    portfolio: RefCell<Portfolio<H, C>>,
    pending: RefCell<VecDeque<InputEvent>>,
}

impl<H: PageHost, C: Clock> Shared<H, C> {
    fn dispatch(&self, event: InputEvent) -> Disposition {
        let Ok(mut portfolio) = self.portfolio.try_borrow_mut() else {
            tracing::trace!(?event, "event raised during dispatch, queued");
            self.pending.borrow_mut().push_back(event);
            return Disposition::Continue;
        };

        let disposition = portfolio.handle(event);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(next) = next else {
                break;
            };
            portfolio.handle(next);
        }
        disposition
    }
}

/// A started [`Portfolio`] shared with its event source.
pub struct Runtime<H: PageHost, C> {
    shared: Rc<Shared<H, C>>,
}

impl<H, C> Clone for Runtime<H, C>
where
    H: PageHost,
{
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<H, C> Runtime<H, C>
where
    H: PageHost + 'static,
    H::Control: Clone,
    C: Clock + 'static,
{
    /// Run start-up effects, then connect `source` once.
    pub fn start<S>(portfolio: Portfolio<H, C>, source: &mut S) -> PortfolioResult<Self>
    where
        S: EventSource<H::Control>,
    {
        let runtime = Self {
            shared: Rc::new(Shared {
                portfolio: RefCell::new(portfolio),
                pending: RefCell::new(VecDeque::new()),
            }),
        };

        let controls = {
            let mut portfolio = runtime.shared.portfolio.borrow_mut();
            portfolio.start();
            portfolio.nav().controls().to_vec()
        };
        source.connect(&controls, runtime.dispatcher())?;

        tracing::info!(controls = controls.len(), "portfolio started");
        Ok(runtime)
    }

    /// A dispatcher bound to this runtime.
    pub fn dispatcher(&self) -> Dispatcher {
        let shared = Rc::clone(&self.shared);
        Rc::new(move |event| shared.dispatch(event))
    }

    pub fn dispatch(&self, event: InputEvent) -> Disposition {
        self.shared.dispatch(event)
    }

    /// Programmatic "navigate to section" by id. Unknown ids do nothing.
    pub fn navigate(&self, section_id: &str) {
        self.dispatch(InputEvent::Navigate(section_id.into()));
    }

    /// Inspect the portfolio between events.
    pub fn with_portfolio<R>(&self, f: impl FnOnce(&Portfolio<H, C>) -> R) -> R {
        f(&self.shared.portfolio.borrow())
    }
}
