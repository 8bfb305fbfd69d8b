//! Saved location persisted across runs, one small JSON file in the user's
//! config directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::GeoPosition;

const APP_DIR: &str = "weatherwise";
const LOCATION_FILE: &str = "location.json";

#[derive(Debug, Serialize, Deserialize)]
struct SavedLocation {
    lat: f64,
    lng: f64,
}

fn location_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(LOCATION_FILE))
}

/// Load the saved location, if one exists and parses. Invalid coordinates in
/// the file are treated as no saved location.
pub fn load() -> Option<GeoPosition> {
    let path = location_path()?;
    let contents = fs::read_to_string(&path).ok()?;
    let saved: SavedLocation = match serde_json::from_str(&contents) {
        Ok(saved) => saved,
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring unreadable saved location");
            return None;
        }
    };
    let position = GeoPosition::new(saved.lat, saved.lng);
    position.is_valid().then_some(position)
}

/// Persist the location for the next run.
pub fn save(position: GeoPosition) -> io::Result<()> {
    let path = location_path()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no config directory"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let saved = SavedLocation {
        lat: position.lat,
        lng: position.lng,
    };
    let json = serde_json::to_string_pretty(&saved)?;
    fs::write(path, json)
}
