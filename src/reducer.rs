//! The dashboard state machine. Pure: every arm mutates state and declares
//! effects, all I/O happens in the effect handler.

use chrono::Datelike;

use crate::action::DashboardAction;
use crate::api::FetchError;
use crate::dispatch::DispatchResult;
use crate::effect::DashboardEffect;
use crate::state::{DashboardState, ErrorPolicy, LayoutState, NotificationKind};
use crate::summary::SummaryMetrics;

type Result = DispatchResult<DashboardEffect>;

pub fn reduce(state: &mut DashboardState, action: DashboardAction) -> Result {
    use DashboardAction::*;

    match action {
        PositionSet(position) => {
            if !position.is_valid() {
                return Result::unchanged();
            }
            state.position = position;
            refresh_current_if_initial(state, Result::changed())
        }

        DateSet(date) => {
            state.date = date;
            Result::changed()
        }

        LocateRequest => Result::effect(DashboardEffect::Geolocate),

        LocateDidResolve(position) => {
            state.position = position;
            let result = notify(state, "Current location set!", NotificationKind::Success);
            refresh_current_if_initial(state, result)
        }

        LocateDidError => notify(
            state,
            "Could not get your location.",
            NotificationKind::Error,
        ),

        SearchOpen => {
            state.search.active = true;
            state.search.query.clear();
            Result::changed()
        }

        SearchInput(c) => {
            if !state.search.active {
                return Result::unchanged();
            }
            state.search.query.push(c);
            Result::changed()
        }

        SearchBackspace => {
            if !state.search.active || state.search.query.pop().is_none() {
                return Result::unchanged();
            }
            Result::changed()
        }

        SearchSubmit => {
            if !state.search.active {
                return Result::unchanged();
            }
            state.search.active = false;
            let query = state.search.query.trim().to_string();
            if query.is_empty() {
                return Result::changed();
            }
            Result::changed_with(DashboardEffect::Geocode { query })
        }

        SearchCancel => {
            if !state.search.active {
                return Result::unchanged();
            }
            state.search.active = false;
            Result::changed()
        }

        SearchDidResolve { name, position } => {
            state.position = position;
            let message = format!("Location set to {name}!");
            let result = notify(state, message, NotificationKind::Success);
            refresh_current_if_initial(state, result)
        }

        SearchDidError(err) => notify(state, err.to_string(), NotificationKind::Error),

        CurrentRefresh => {
            // Current conditions are only shown on the initial view.
            if state.layout != LayoutState::Initial {
                return Result::unchanged();
            }
            Result::effect(DashboardEffect::FetchCurrent {
                position: state.position,
            })
        }

        CurrentDidLoad(snapshot) => {
            // Stale if the layout moved on while the fetch was in flight.
            if state.layout != LayoutState::Initial {
                return Result::unchanged();
            }
            state.current = Some(snapshot);
            Result::changed()
        }

        // Non-fatal: the initial view just keeps showing no snapshot.
        CurrentDidError(_) => Result::unchanged(),

        AnalyzeRequest => {
            // Re-entrancy guard: a second analyze while one is in flight is
            // a no-op.
            if state.layout == LayoutState::Loading {
                return Result::unchanged();
            }
            state.layout = LayoutState::Loading;
            state.error = None;
            state.loading_message = 0;
            // Previous results survive only if the policy can fall back to
            // them after a failure.
            if state.error_policy == ErrorPolicy::ReturnToInitial {
                state.historical = None;
                state.summary = None;
            }

            let fetch = DashboardEffect::FetchHistorical {
                position: state.position,
                month: state.date.month(),
                day: state.date.day(),
            };
            notify(state, "Fetching historical data...", NotificationKind::Success)
                .with(fetch)
                .with(DashboardEffect::StartLoadingTicker)
        }

        HistoricalDidLoad(historical) => {
            if state.layout != LayoutState::Loading {
                return Result::unchanged();
            }
            let Some(summary) = SummaryMetrics::compute(&historical) else {
                return fail_analysis(state, FetchError::no_data());
            };
            state.layout = LayoutState::Results;
            state.historical = Some(historical);
            state.summary = Some(summary);
            state.error = None;
            notify(state, "Analysis complete!", NotificationKind::Success)
                .with(DashboardEffect::StopLoadingTicker)
        }

        HistoricalDidError(err) => {
            if state.layout != LayoutState::Loading {
                return Result::unchanged();
            }
            fail_analysis(state, err)
        }

        ShareRequest => {
            let link = crate::share::encode(&state.share_origin, state.position, state.date);
            Result::effect(DashboardEffect::CopyShareLink(link))
        }

        ShareDidCopy => notify(state, "Link copied to clipboard!", NotificationKind::Success),

        ShareDidError => notify(
            state,
            "Could not copy link to clipboard.",
            NotificationKind::Error,
        ),

        Notify(message, kind) => notify(state, message, kind),

        SaveLocationRequest => Result::effect(DashboardEffect::PersistLocation(state.position)),

        SaveLocationDidFinish(true) => {
            notify(state, "Location saved!", NotificationKind::Success)
        }
        SaveLocationDidFinish(false) => notify(
            state,
            "Could not save location.",
            NotificationKind::Error,
        ),

        NotificationExpired(id) => {
            // Only the timer armed for the visible notification may clear it.
            match &state.notification {
                Some(notification) if notification.id == id => {
                    state.notification = None;
                    Result::changed()
                }
                _ => Result::unchanged(),
            }
        }

        ClockTick(time) => {
            state.clock = crate::state::ClockDisplay::at(time);
            Result::changed()
        }

        LoadingTick => {
            if state.layout != LayoutState::Loading {
                return Result::unchanged();
            }
            state.loading_message = state.loading_message.wrapping_add(1);
            Result::changed()
        }

        Quit => Result::unchanged(),
    }
}

/// Replace the visible notification and arm its dismiss timer.
fn notify(
    state: &mut DashboardState,
    message: impl Into<String>,
    kind: NotificationKind,
) -> Result {
    let id = state.push_notification(message, kind);
    Result::changed_with(DashboardEffect::ScheduleNotificationDismiss { id })
}

/// On the initial view a position change also refreshes current conditions.
fn refresh_current_if_initial(state: &DashboardState, result: Result) -> Result {
    if state.layout == LayoutState::Initial {
        result.with(DashboardEffect::FetchCurrent {
            position: state.position,
        })
    } else {
        result
    }
}

/// Leave the loading state after a failed analysis, honoring the configured
/// error policy.
fn fail_analysis(state: &mut DashboardState, err: FetchError) -> Result {
    let message = err.to_string();
    state.error = Some(message.clone());
    state.layout = match state.error_policy {
        ErrorPolicy::ReturnToInitial => LayoutState::Initial,
        // Staying on results only makes sense when there are results.
        ErrorPolicy::StayOnResults if state.historical.is_some() => LayoutState::Results,
        ErrorPolicy::StayOnResults => LayoutState::Initial,
    };
    if state.error_policy == ErrorPolicy::ReturnToInitial {
        state.historical = None;
        state.summary = None;
    }
    notify(state, message, NotificationKind::Error).with(DashboardEffect::StopLoadingTicker)
}
