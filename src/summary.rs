//! Summary metrics and day classification derived from historical series.

use crate::state::HistoricalSeries;

/// A daily precipitation total above this many millimetres counts as a rain
/// event when computing the chance of rain.
pub const RAIN_EVENT_MM: f64 = 0.2;

const RAINY_CHANCE_PCT: f64 = 50.0;
const SCORCHER_TEMP_C: f64 = 30.0;
const PLEASANT_CHANCE_PCT: f64 = 10.0;
const PLEASANT_TEMP_C: f64 = 15.0;

/// Headline numbers for the selected day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SummaryMetrics {
    /// Mean temperature across years, from the series stats.
    pub avg_temp: f64,
    /// Percentage of years whose precipitation exceeded [`RAIN_EVENT_MM`].
    pub chance_of_rain: f64,
    /// Mean wind speed across years, from the series stats.
    pub avg_wind: f64,
}

impl SummaryMetrics {
    /// Derive the metrics, or `None` when the precipitation series is empty.
    pub fn compute(historical: &HistoricalSeries) -> Option<Self> {
        let precip = &historical.precipitation.values;
        if precip.is_empty() {
            return None;
        }

        let rainy = precip.iter().filter(|&&v| v > RAIN_EVENT_MM).count();
        let chance_of_rain = rainy as f64 / precip.len() as f64 * 100.0;

        Some(Self {
            avg_temp: historical.temperatures.stats.mean,
            chance_of_rain,
            avg_wind: historical.wind_speeds.stats.mean,
        })
    }

    /// One-word character of the day. Rain dominates, then heat, then the
    /// pleasant band, with "Average" as the catch-all.
    pub fn classification(&self) -> &'static str {
        if self.chance_of_rain > RAINY_CHANCE_PCT {
            "Rainy"
        } else if self.avg_temp > SCORCHER_TEMP_C {
            "Scorcher"
        } else if self.chance_of_rain < PLEASANT_CHANCE_PCT && self.avg_temp > PLEASANT_TEMP_C {
            "Pleasant"
        } else {
            "Average"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Series, SeriesStats};

    fn series(values: Vec<f64>, mean: f64) -> Series {
        let years = (0..values.len()).map(|i| 2000 + i as i32).collect();
        Series {
            unit: "x".into(),
            years,
            values,
            stats: SeriesStats {
                mean,
                min: None,
                max: None,
            },
        }
    }

    fn historical(temp_mean: f64, precip: Vec<f64>, wind_mean: f64) -> HistoricalSeries {
        let n = precip.len().max(1);
        HistoricalSeries {
            temperatures: series(vec![temp_mean; n], temp_mean),
            precipitation: series(precip, 0.0),
            wind_speeds: series(vec![wind_mean; n], wind_mean),
        }
    }

    #[test]
    fn chance_of_rain_counts_only_events_above_threshold() {
        // 0.2 is exactly the threshold and must not count.
        let h = historical(20.0, vec![0.0, 0.2, 0.3, 5.0], 10.0);
        let m = SummaryMetrics::compute(&h).unwrap();
        assert_eq!(m.chance_of_rain, 50.0);
    }

    #[test]
    fn rain_takes_priority_over_heat() {
        let h = historical(35.0, vec![1.0, 1.0, 1.0, 0.0], 5.0);
        let m = SummaryMetrics::compute(&h).unwrap();
        assert_eq!(m.chance_of_rain, 75.0);
        assert_eq!(m.classification(), "Rainy");
    }

    #[test]
    fn scorcher_above_thirty() {
        let h = historical(30.5, vec![0.0, 0.0, 1.0, 0.0], 5.0);
        let m = SummaryMetrics::compute(&h).unwrap();
        assert_eq!(m.classification(), "Scorcher");
    }

    #[test]
    fn pleasant_needs_dry_and_mild() {
        let h = historical(22.0, vec![0.0; 20], 5.0);
        let m = SummaryMetrics::compute(&h).unwrap();
        assert_eq!(m.classification(), "Pleasant");

        // Same dryness but too cold for pleasant.
        let h = historical(10.0, vec![0.0; 20], 5.0);
        let m = SummaryMetrics::compute(&h).unwrap();
        assert_eq!(m.classification(), "Average");
    }

    #[test]
    fn half_rainy_hot_day_is_a_scorcher() {
        // chance lands exactly on 50, which is not "> 50", so heat wins.
        let h = historical(32.0, vec![0.0, 0.0, 0.5, 0.9], 10.0);
        let m = SummaryMetrics::compute(&h).unwrap();
        assert_eq!(m.avg_temp, 32.0);
        assert_eq!(m.chance_of_rain, 50.0);
        assert_eq!(m.avg_wind, 10.0);
        assert_eq!(m.classification(), "Scorcher");
    }

    #[test]
    fn boundary_values_fall_through_to_average() {
        // chance exactly 50, temp exactly 30: none of the strict
        // comparisons match.
        let h = historical(30.0, vec![1.0, 0.0], 5.0);
        let m = SummaryMetrics::compute(&h).unwrap();
        assert_eq!(m.chance_of_rain, 50.0);
        assert_eq!(m.classification(), "Average");
    }

    #[test]
    fn empty_precipitation_yields_none() {
        let h = HistoricalSeries {
            temperatures: series(vec![], 0.0),
            precipitation: series(vec![], 0.0),
            wind_speeds: series(vec![], 0.0),
        };
        assert!(SummaryMetrics::compute(&h).is_none());
    }
}
