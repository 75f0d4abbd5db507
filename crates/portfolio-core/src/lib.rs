//! Portfolio Core Library
//!
//! Platform-neutral behavior for the single-page portfolio: section
//! navigation, the live clock, keyboard shortcuts and accessibility state.
//!
//! ## Overview
//!
//! The page is an external collaborator. Everything here talks to it through
//! small traits, so the browser binding (the `portfolio` crate) and the test
//! suite plug in their own implementations:
//!
//! - [`NavSurface`] / [`PageHost`]: read section geometry, write markers
//! - [`EventSource`]: forwards native input as [`InputEvent`]s
//! - [`Clock`]: supplies the local wall-clock time
//! - [`LogSink`]: receives formatted log lines
//!
//! ## Core Invariant
//!
//! Clicks, key presses and scrolling all converge on a single active
//! section. At most one navigation control carries the active marker, and it
//! always matches [`NavigationSynchronizer::active`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use portfolio_core::{Portfolio, PortfolioConfig, Runtime, LocalClock};
//!
//! let config = PortfolioConfig::default();
//! let portfolio = Portfolio::new(&config, host, LocalClock)?;
//! let runtime = Runtime::start(portfolio, &mut source)?;
//!
//! runtime.dispatch(InputEvent::Navigate("skills".into()));
//! ```

pub mod a11y;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod nav;
pub mod press;
pub mod registry;
pub mod runtime;
pub mod shortcuts;

// Re-exports
pub use a11y::{Announcer, KeyboardNavMode};
pub use clock::{format_clock, Clock, ClockTicker, LocalClock};
pub use config::PortfolioConfig;
pub use error::{PortfolioError, PortfolioResult};
pub use logging::{ConsoleLayer, LogLine, LogSink};
pub use nav::{IgnoreReason, NavControl, NavOutcome, NavSurface, NavigationSynchronizer};
pub use press::PressFeedback;
pub use registry::{SectionId, SectionRegistry};
pub use runtime::{Dispatcher, Disposition, EventSource, InputEvent, PageHost, Portfolio, Runtime};
pub use shortcuts::{KeyChord, ShortcutMap};
