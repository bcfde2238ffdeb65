//! Data models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AisForwardError;

/// Maritime Mobile Service Identity (MMSI)
///
/// A unique nine-digit number for identifying vessels in AIS messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Mmsi(u32);

impl TryFrom<u32> for Mmsi {
    type Error = AisForwardError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value > 999_999_999 {
            return Err(AisForwardError::InvalidMmsi(value.to_string()));
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Mmsi {
    type Error = AisForwardError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let parsed = value
            .parse::<u32>()
            .map_err(|_| AisForwardError::InvalidMmsi(value.to_string()))?;
        Self::try_from(parsed)
    }
}

impl Mmsi {
    /// Get the raw MMSI value
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// AIS transceiver category reported under `sensors.ais.class`.
///
/// SignalK carries this as a free-form string; anything outside the
/// documented vocabulary maps to [`AisClass::Unknown`], which the
/// message builder treats as "emit nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AisClass {
    A,
    B,
    /// Base station / aid-to-navigation variant; position report only.
    Base,
    #[default]
    Unknown,
}

impl From<&str> for AisClass {
    fn from(value: &str) -> Self {
        match value {
            "A" => AisClass::A,
            "B" => AisClass::B,
            "BASE" => AisClass::Base,
            _ => AisClass::Unknown,
        }
    }
}

/// Normalized view of one vessel in one poll cycle.
///
/// Every field defaults independently: a malformed or missing source
/// path yields `None` (or an empty string for free text) without
/// affecting any sibling field. Angular fields are in degrees and
/// speed in knots, converted at extraction time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VesselSnapshot {
    /// True only for the tree's designated "self" entry.
    pub is_own_vessel: bool,
    pub mmsi: Option<Mmsi>,
    /// Empty string when absent or a numeric placeholder.
    pub ship_name: String,
    pub call_sign: String,
    pub destination: String,
    pub ship_type_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub sog_knots: Option<f64>,
    pub cog_deg: Option<f64>,
    pub rot_deg: Option<f64>,
    pub heading_deg: Option<f64>,
    /// AIS navigational status 0-15; unresolved labels become 15.
    pub nav_status: Option<u8>,
    /// Registration number with the leading "IMO " prefix stripped.
    pub imo: Option<String>,
    pub ship_type_id: Option<u32>,
    pub draft_meters: Option<f64>,
    pub length_meters: Option<f64>,
    /// Half of the source beam, used as port/starboard dimension.
    pub beam_half_meters: Option<f64>,
    pub ais_class: AisClass,
    /// Timestamp of the most recent AIS-class update for this vessel.
    pub last_report: Option<DateTime<Utc>>,
}

/// One AIS message record, ready for NMEA0183 encoding.
///
/// Field semantics follow the AIS standard for the respective message
/// type; `None` means "not resolved from the source tree" and the
/// encoder substitutes the standard not-available sentinel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AisMessage {
    /// Type 3, class A position report.
    PositionReportA {
        is_own_vessel: bool,
        mmsi: Option<Mmsi>,
        nav_status: Option<u8>,
        sog_knots: Option<f64>,
        longitude: Option<f64>,
        latitude: Option<f64>,
        cog_deg: Option<f64>,
        heading_deg: Option<f64>,
        rot_deg: Option<f64>,
    },
    /// Type 5, class A static and voyage related data.
    StaticAndVoyageA {
        is_own_vessel: bool,
        mmsi: Option<Mmsi>,
        imo: Option<String>,
        cargo: Option<u32>,
        call_sign: String,
        ship_name: String,
        draught_meters: Option<f64>,
        destination: String,
        dim_a: f64,
        dim_b: Option<f64>,
        dim_c: Option<f64>,
        dim_d: Option<f64>,
    },
    /// Type 18, class B position report.
    PositionReportB {
        is_own_vessel: bool,
        mmsi: Option<Mmsi>,
        sog_knots: Option<f64>,
        /// Position accuracy flag, fixed low.
        accuracy: u8,
        longitude: Option<f64>,
        latitude: Option<f64>,
        cog_deg: Option<f64>,
        heading_deg: Option<f64>,
    },
    /// Type 24 part 0, class B static data (name).
    StaticPartB0 {
        is_own_vessel: bool,
        mmsi: Option<Mmsi>,
        ship_name: String,
    },
    /// Type 24 part 1, class B static data (type, call sign, dimensions).
    StaticPartB1 {
        is_own_vessel: bool,
        mmsi: Option<Mmsi>,
        cargo: Option<u32>,
        call_sign: String,
        dim_a: f64,
        dim_b: Option<f64>,
        dim_c: Option<f64>,
        dim_d: Option<f64>,
    },
}

impl AisMessage {
    /// AIS message type number on the wire.
    pub fn message_type(&self) -> u8 {
        match self {
            AisMessage::PositionReportA { .. } => 3,
            AisMessage::StaticAndVoyageA { .. } => 5,
            AisMessage::PositionReportB { .. } => 18,
            AisMessage::StaticPartB0 { .. } | AisMessage::StaticPartB1 { .. } => 24,
        }
    }

    pub fn mmsi(&self) -> Option<Mmsi> {
        match self {
            AisMessage::PositionReportA { mmsi, .. }
            | AisMessage::StaticAndVoyageA { mmsi, .. }
            | AisMessage::PositionReportB { mmsi, .. }
            | AisMessage::StaticPartB0 { mmsi, .. }
            | AisMessage::StaticPartB1 { mmsi, .. } => *mmsi,
        }
    }

    pub fn is_own_vessel(&self) -> bool {
        match self {
            AisMessage::PositionReportA { is_own_vessel, .. }
            | AisMessage::StaticAndVoyageA { is_own_vessel, .. }
            | AisMessage::PositionReportB { is_own_vessel, .. }
            | AisMessage::StaticPartB0 { is_own_vessel, .. }
            | AisMessage::StaticPartB1 { is_own_vessel, .. } => *is_own_vessel,
        }
    }
}
