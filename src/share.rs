//! Share links: encode the selected position and date into a URL and decode
//! links pasted back in.

use chrono::NaiveDate;
use thiserror::Error;
use url::Url;

use crate::state::GeoPosition;

/// Origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "https://weatherwise.app";

#[derive(Debug, Error, PartialEq)]
#[error("malformed share link: {0}")]
pub struct MalformedShareLink(String);

impl MalformedShareLink {
    fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Build a share link. Coordinates are rounded to 4 decimal places so two
/// links for the same selection compare equal.
pub fn encode(origin: &str, position: GeoPosition, date: NaiveDate) -> String {
    let p = position.rounded4();
    format!(
        "{origin}?lat={:.4}&lon={:.4}&date={}",
        p.lat,
        p.lng,
        date.format("%Y-%m-%d")
    )
}

/// Parse a share link back into its position and date. The position must be
/// within valid coordinate ranges and the date must exist on the calendar.
pub fn decode(link: &str) -> Result<(GeoPosition, NaiveDate), MalformedShareLink> {
    let url = Url::parse(link).map_err(|e| MalformedShareLink::new(e.to_string()))?;

    let mut lat = None;
    let mut lon = None;
    let mut date = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "lat" => lat = Some(value.into_owned()),
            "lon" => lon = Some(value.into_owned()),
            "date" => date = Some(value.into_owned()),
            _ => {}
        }
    }

    let lat: f64 = lat
        .ok_or_else(|| MalformedShareLink::new("missing lat"))?
        .parse()
        .map_err(|_| MalformedShareLink::new("lat is not a number"))?;
    let lon: f64 = lon
        .ok_or_else(|| MalformedShareLink::new("missing lon"))?
        .parse()
        .map_err(|_| MalformedShareLink::new("lon is not a number"))?;

    let position = GeoPosition::new(lat, lon);
    if !position.is_valid() {
        return Err(MalformedShareLink::new("coordinates out of range"));
    }

    let date = date.ok_or_else(|| MalformedShareLink::new("missing date"))?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| MalformedShareLink::new("date is not YYYY-MM-DD"))?;

    Ok((position, date))
}

/// Put a link on the system clipboard.
pub fn copy_to_clipboard(link: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn encode_rounds_to_four_decimals() {
        let link = encode(
            DEFAULT_ORIGIN,
            GeoPosition::new(28.70414999, 77.10256001),
            date(2025, 6, 15),
        );
        assert_eq!(
            link,
            "https://weatherwise.app?lat=28.7041&lon=77.1026&date=2025-06-15"
        );
    }

    #[test]
    fn decode_round_trips_encode() {
        let original = GeoPosition::new(-33.8688, 151.2093);
        let d = date(2024, 12, 31);
        let (position, decoded_date) = decode(&encode(DEFAULT_ORIGIN, original, d)).unwrap();
        assert_eq!(position, original);
        assert_eq!(decoded_date, d);
    }

    #[test]
    fn decode_rejects_missing_params() {
        assert!(decode("https://weatherwise.app?lat=1.0&date=2025-01-01").is_err());
        assert!(decode("https://weatherwise.app?lon=1.0&date=2025-01-01").is_err());
        assert!(decode("https://weatherwise.app?lat=1.0&lon=1.0").is_err());
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode("not a url").is_err());
        assert!(decode("https://weatherwise.app?lat=abc&lon=1.0&date=2025-01-01").is_err());
        assert!(decode("https://weatherwise.app?lat=1.0&lon=1.0&date=soon").is_err());
    }

    #[test]
    fn decode_rejects_out_of_range_coordinates() {
        assert!(decode("https://weatherwise.app?lat=91.0&lon=0.0&date=2025-01-01").is_err());
        assert!(decode("https://weatherwise.app?lat=0.0&lon=-180.5&date=2025-01-01").is_err());
    }

    #[test]
    fn decode_rejects_impossible_dates() {
        assert!(decode("https://weatherwise.app?lat=0.0&lon=0.0&date=2025-02-30").is_err());
    }
}
