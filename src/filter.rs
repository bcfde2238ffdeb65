//! Relevance gating: distance and data freshness.

use chrono::{DateTime, Duration, Utc};

use crate::models::VesselSnapshot;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two positions in kilometers
/// (haversine formula, lat/lon in degrees).
pub fn haversine_distance_km(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let dlat_rad = (lat2_deg - lat1_deg).to_radians();
    let dlon_rad = (lon2_deg - lon1_deg).to_radians();

    let a = (dlat_rad / 2.0).sin().powi(2)
        + lat1_deg.to_radians().cos() * lat2_deg.to_radians().cos() * (dlon_rad / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Own-vessel reference position, taken live each cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OwnPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Per-cycle vessel gating.
///
/// A vessel proceeds to message construction only when it is within
/// `max_range_km` of the own position and its last AIS-class report is
/// still fresher than the poll interval.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceFilter {
    max_range_km: f64,
    poll_interval: Duration,
}

impl RelevanceFilter {
    pub fn new(max_range_km: u32, poll_interval: Duration) -> Self {
        Self {
            max_range_km: max_range_km as f64,
            poll_interval,
        }
    }

    /// Distance gate, inclusive at the range boundary. Fails when
    /// either position is unknown: the distance is undefined then,
    /// not zero.
    pub fn within_range(&self, own: Option<OwnPosition>, vessel: &VesselSnapshot) -> bool {
        let (Some(own), Some(lat), Some(lon)) = (own, vessel.latitude, vessel.longitude) else {
            return false;
        };
        let distance_km = haversine_distance_km(own.latitude, own.longitude, lat, lon);
        distance_km <= self.max_range_km
    }

    /// Freshness gate, strict: a report aged exactly one poll interval
    /// is already stale. An absent timestamp never passes.
    pub fn is_fresh(&self, vessel: &VesselSnapshot, now: DateTime<Utc>) -> bool {
        match vessel.last_report {
            Some(last_report) => now - last_report < self.poll_interval,
            None => false,
        }
    }

    /// Both gates combined.
    pub fn is_relevant(
        &self,
        own: Option<OwnPosition>,
        vessel: &VesselSnapshot,
        now: DateTime<Utc>,
    ) -> bool {
        self.within_range(own, vessel) && self.is_fresh(vessel, now)
    }
}
