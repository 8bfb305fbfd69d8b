//! Header clock: formatted time plus an hour-bucketed greeting.

use chrono::{NaiveTime, Timelike};

/// Morning before noon, afternoon before 18:00, evening after.
pub fn greeting(time: NaiveTime) -> &'static str {
    match time.hour() {
        0..=11 => "Good Morning",
        12..=17 => "Good Afternoon",
        _ => "Good Evening",
    }
}

/// 24-hour wall clock, seconds included.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}
