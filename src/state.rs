//! Dashboard state: single source of truth, mutated only by the reducer.

use chrono::{NaiveDate, NaiveTime};

use crate::clock::{format_clock, greeting};
use crate::summary::SummaryMetrics;

/// New Delhi, the starting map position.
pub const DEFAULT_POSITION: GeoPosition = GeoPosition {
    lat: 28.7041,
    lng: 77.1025,
};

/// Rotating status lines shown while the historical fetch is in flight.
pub const LOADING_MESSAGES: [&str; 8] = [
    "Reticulating splines...",
    "Querying climate archives...",
    "Aligning satellite data streams...",
    "Bending spacetime to fetch data...",
    "Herding cats for cloud data...",
    "Polishing the space rocks...",
    "Translating data from Martian...",
    "Engaging warp drive...",
];

pub const LOADING_TICK_MS: u64 = 2500;
pub const NOTIFICATION_DISMISS_MS: u64 = 4500;
pub const CLOCK_TICK_MS: u64 = 1000;

/// A point on the globe. Replaced wholesale on every update, never mutated
/// field-by-field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPosition {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// lat in [-90, 90], lng in [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Clamp both axes into the valid ranges.
    pub fn clamped(&self) -> Self {
        Self {
            lat: self.lat.clamp(-90.0, 90.0),
            lng: self.lng.clamp(-180.0, 180.0),
        }
    }

    /// Round to 4 decimal places (~11 m), the precision share links carry.
    pub fn rounded4(&self) -> Self {
        let round4 = |v: f64| (v * 10_000.0).round() / 10_000.0;
        Self {
            lat: round4(self.lat),
            lng: round4(self.lng),
        }
    }
}

/// Which coarse region of the dashboard is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutState {
    #[default]
    Initial,
    Loading,
    Results,
}

/// What to do with the layout when the historical fetch fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Drop back to the initial view with the error shown there.
    #[default]
    ReturnToInitial,
    /// Keep the previous results on screen with an inline error. Falls back
    /// to the initial view when there are no previous results.
    StayOnResults,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient toast. The id is monotonic; the dismiss timer carries the id
/// it was armed for, so an expiry for a superseded notification is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
}

/// Mean and optional extremes of one historical series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// One variable's samples across years for the selected month/day.
/// Invariant (enforced at the API boundary): `years.len() == values.len()`
/// and both are non-empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub unit: String,
    pub years: Vec<i32>,
    pub values: Vec<f64>,
    pub stats: SeriesStats,
}

/// The fully validated historical payload.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoricalSeries {
    pub temperatures: Series,
    pub precipitation: Series,
    pub wind_speeds: Series,
}

/// Conditions right now at the selected point. Supplementary: shown on the
/// initial view only, replaced on the next fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentWeatherSnapshot {
    pub location_name: String,
    pub local_time: String,
    pub temperature: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    pub temperature_unit: String,
    pub precipitation_unit: String,
}

/// Wall-clock strings for the header, recomputed once a second.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClockDisplay {
    pub time: String,
    pub greeting: &'static str,
}

impl ClockDisplay {
    pub fn at(time: NaiveTime) -> Self {
        Self {
            time: format_clock(time),
            greeting: greeting(time),
        }
    }
}

/// Place-name search overlay state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Everything the dashboard needs to render.
#[derive(Clone, Debug)]
pub struct DashboardState {
    pub layout: LayoutState,
    pub position: GeoPosition,
    pub date: NaiveDate,
    pub current: Option<CurrentWeatherSnapshot>,
    pub historical: Option<HistoricalSeries>,
    pub summary: Option<SummaryMetrics>,
    pub error: Option<String>,
    /// Index into [`LOADING_MESSAGES`], advanced by the loading ticker.
    pub loading_message: usize,
    pub notification: Option<Notification>,
    pub clock: ClockDisplay,
    pub search: SearchState,
    pub error_policy: ErrorPolicy,
    /// Origin prepended to share links.
    pub share_origin: String,
    next_notification_id: u64,
}

impl DashboardState {
    pub fn new(position: GeoPosition, date: NaiveDate) -> Self {
        Self {
            layout: LayoutState::Initial,
            position,
            date,
            current: None,
            historical: None,
            summary: None,
            error: None,
            loading_message: 0,
            notification: None,
            clock: ClockDisplay::default(),
            search: SearchState::default(),
            error_policy: ErrorPolicy::default(),
            share_origin: crate::share::DEFAULT_ORIGIN.to_string(),
            next_notification_id: 0,
        }
    }

    /// Replace the visible notification and return the fresh id for arming
    /// its dismiss timer. At most one notification is visible at a time.
    pub fn push_notification(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.next_notification_id += 1;
        let id = self.next_notification_id;
        self.notification = Some(Notification {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// The loading line currently cycled to.
    pub fn loading_text(&self) -> &'static str {
        LOADING_MESSAGES[self.loading_message % LOADING_MESSAGES.len()]
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        // Fixed date keeps tests deterministic; the binary passes today's.
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap_or_default();
        Self::new(DEFAULT_POSITION, date)
    }
}
