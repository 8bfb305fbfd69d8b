//! Side effects declared by the reducer and executed by the effect handler
//! in `main`. The reducer never performs I/O itself.

use crate::state::GeoPosition;

#[derive(Clone, Debug, PartialEq)]
pub enum DashboardEffect {
    /// Fetch current conditions, keyed so a newer fetch supersedes.
    FetchCurrent { position: GeoPosition },
    /// Fetch historical series for the month/day across years.
    FetchHistorical {
        position: GeoPosition,
        month: u32,
        day: u32,
    },
    /// Resolve the device's location from its IP.
    Geolocate,
    /// Resolve a place name to coordinates.
    Geocode { query: String },
    /// Put the link on the system clipboard.
    CopyShareLink(String),
    /// Write the position to the saved-location file.
    PersistLocation(GeoPosition),
    /// Start cycling loading messages.
    StartLoadingTicker,
    /// Stop cycling loading messages.
    StopLoadingTicker,
    /// Arm (or re-arm) the auto-dismiss timer for notification `id`.
    ScheduleNotificationDismiss { id: u64 },
}
