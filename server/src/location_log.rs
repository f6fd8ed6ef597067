// location_log.rs
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::storage::record_file::RecordFile;
use crate::util::format_epoch_millis;
use crate::validation::{ObjectValidator, ValidationErrors};

/// A position fix; `time` is milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub time: f64,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut v = ObjectValidator::new(body);
        let time = v.number("time");
        let lat = v.number("lat");
        let lng = v.number("lng");
        v.finish()?;
        match (time, lat, lng) {
            (Some(time), Some(lat), Some(lng)) => Ok(Location { time, lat, lng }),
            _ => Err(ValidationErrors::default()),
        }
    }
}

/// Read projection of a [`Location`] with a human-readable local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedLocation {
    pub time: String,
    pub lat: f64,
    pub lng: f64,
}

pub struct LocationLog {
    locations: Mutex<Vec<Location>>,
    file: Box<dyn RecordFile<Location>>,
}

impl LocationLog {
    pub async fn open(file: Box<dyn RecordFile<Location>>) -> Result<Self, StoreError> {
        let locations = file.load().await?;
        info!("loaded {} locations", locations.len());
        Ok(Self {
            locations: Mutex::new(locations),
            file,
        })
    }

    pub async fn add(&self, location: Location) -> Result<(), StoreError> {
        let mut locations = self.locations.lock().await;
        locations.push(location);
        self.file.save(&locations).await?;
        info!("recorded location ({} total)", locations.len());
        Ok(())
    }

    /// Newest first. Equal times keep insertion order.
    pub async fn newest_first(&self) -> Result<Vec<TimedLocation>, StoreError> {
        let mut sorted = self.locations.lock().await.clone();
        sorted.sort_by(|a, b| b.time.total_cmp(&a.time));
        sorted
            .into_iter()
            .map(|loc| {
                Ok(TimedLocation {
                    time: format_epoch_millis(loc.time)?,
                    lat: loc.lat,
                    lng: loc.lng,
                })
            })
            .collect()
    }
}
