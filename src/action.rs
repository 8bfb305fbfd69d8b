//! Every way the dashboard state can change.
//!
//! Intents come from key handling; `*Did*` variants are completions sent
//! back by tasks and timers. The reducer is the only consumer.

use chrono::{NaiveDate, NaiveTime};

use crate::api::FetchError;
use crate::dispatch::Action;
use crate::state::{CurrentWeatherSnapshot, GeoPosition, HistoricalSeries, NotificationKind};

#[derive(Clone, Debug)]
pub enum DashboardAction {
    /// Replace the selected position.
    PositionSet(GeoPosition),
    /// Replace the selected date.
    DateSet(NaiveDate),

    /// Resolve the device's location.
    LocateRequest,
    LocateDidResolve(GeoPosition),
    LocateDidError,

    /// Place-name search overlay.
    SearchOpen,
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    SearchCancel,
    SearchDidResolve { name: String, position: GeoPosition },
    SearchDidError(FetchError),

    /// Current conditions for the initial view.
    CurrentRefresh,
    CurrentDidLoad(CurrentWeatherSnapshot),
    CurrentDidError(FetchError),

    /// Kick off the historical analysis.
    AnalyzeRequest,
    HistoricalDidLoad(HistoricalSeries),
    HistoricalDidError(FetchError),

    /// Copy a share link for the current selection.
    ShareRequest,
    ShareDidCopy,
    ShareDidError,

    /// Persist the selected position for the next run.
    SaveLocationRequest,
    SaveLocationDidFinish(bool),

    /// Show a notification that does not belong to any async flow.
    Notify(String, NotificationKind),
    /// Dismiss timer fired for the notification with this id.
    NotificationExpired(u64),

    /// Once a second; carries the time so the reducer stays pure.
    ClockTick(NaiveTime),
    /// Advance the rotating loading message.
    LoadingTick,

    Quit,
}

impl Action for DashboardAction {
    fn name(&self) -> &'static str {
        match self {
            Self::PositionSet(_) => "PositionSet",
            Self::DateSet(_) => "DateSet",
            Self::LocateRequest => "LocateRequest",
            Self::LocateDidResolve(_) => "LocateDidResolve",
            Self::LocateDidError => "LocateDidError",
            Self::SearchOpen => "SearchOpen",
            Self::SearchInput(_) => "SearchInput",
            Self::SearchBackspace => "SearchBackspace",
            Self::SearchSubmit => "SearchSubmit",
            Self::SearchCancel => "SearchCancel",
            Self::SearchDidResolve { .. } => "SearchDidResolve",
            Self::SearchDidError(_) => "SearchDidError",
            Self::CurrentRefresh => "CurrentRefresh",
            Self::CurrentDidLoad(_) => "CurrentDidLoad",
            Self::CurrentDidError(_) => "CurrentDidError",
            Self::AnalyzeRequest => "AnalyzeRequest",
            Self::HistoricalDidLoad(_) => "HistoricalDidLoad",
            Self::HistoricalDidError(_) => "HistoricalDidError",
            Self::ShareRequest => "ShareRequest",
            Self::ShareDidCopy => "ShareDidCopy",
            Self::ShareDidError => "ShareDidError",
            Self::Notify(_, _) => "Notify",
            Self::SaveLocationRequest => "SaveLocationRequest",
            Self::SaveLocationDidFinish(_) => "SaveLocationDidFinish",
            Self::NotificationExpired(_) => "NotificationExpired",
            Self::ClockTick(_) => "ClockTick",
            Self::LoadingTick => "LoadingTick",
            Self::Quit => "Quit",
        }
    }
}
