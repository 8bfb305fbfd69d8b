//! WeatherWise: a terminal dashboard for historical weather analysis.
//!
//! Pick a position and a calendar day, and the dashboard fetches that day's
//! weather across the past twenty years from the backend, summarizes it,
//! and classifies the day. All state lives in [`state::DashboardState`] and
//! changes only through [`reducer::reduce`]; I/O runs as keyed tasks and
//! timers whose completions come back as actions.

pub mod action;
pub mod api;
pub mod clock;
pub mod dispatch;
pub mod effect;
pub mod reducer;
pub mod share;
pub mod state;
pub mod storage;
pub mod summary;
pub mod ui;

pub use action::DashboardAction;
pub use effect::DashboardEffect;
pub use state::DashboardState;
