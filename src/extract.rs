//! Field extraction from the raw SignalK vessel tree.
//!
//! Each snapshot field is resolved by its own accessor against a fixed
//! path into the per-vessel subtree. Resolution never fails loudly: a
//! missing key, an unexpected shape or a type mismatch yields the
//! field's default and leaves every other field untouched.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::{AisClass, Mmsi, VesselSnapshot};
use crate::nav_status::nav_status_code;
use crate::units::{mps_to_knots, radians_to_degrees};

/// Number of characters stripped from the front of the registration
/// string ("IMO " prefix) to get the bare IMO number.
const IMO_PREFIX_LEN: usize = 4;

/// Walk a key path into a JSON tree; `None` on the first miss.
fn resolve<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(key))
}

/// Finite float at the given path, otherwise `None`.
///
/// NaN from the converters would otherwise leak into messages as a
/// bogus "present" value.
fn float_at(value: &Value, path: &[&str]) -> Option<f64> {
    resolve(value, path)?.as_f64().filter(|v| v.is_finite())
}

fn u32_at(value: &Value, path: &[&str]) -> Option<u32> {
    resolve(value, path)?.as_u64()?.try_into().ok()
}

fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    resolve(value, path)?.as_str()
}

/// Free-text accessor with the placeholder guard.
///
/// Some upstreams put numeric junk where a name or call sign belongs;
/// that junk is always integer-valued (MMSI-like IDs), so only
/// integer-valued text collapses to the empty string. Fractional
/// values pass through, string or number. A vessel genuinely named
/// "42" is lost to this rule, same as in every SignalK consumer
/// applying the numeric-placeholder check.
fn text_at(value: &Value, path: &[&str]) -> String {
    match resolve(value, path) {
        Some(Value::String(s)) if !s.is_empty() && !is_integer_placeholder(s) => s.clone(),
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v.fract() != 0.0) => n.to_string(),
        _ => String::new(),
    }
}

fn is_integer_placeholder(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(|v| v.fract() == 0.0)
}

fn timestamp_at(value: &Value, path: &[&str]) -> Option<DateTime<Utc>> {
    let raw = str_at(value, path)?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Radian-valued navigation field, converted to degrees.
fn angle_deg_at(value: &Value, path: &[&str]) -> Option<f64> {
    float_at(value, path).map(radians_to_degrees)
}

fn mmsi_of(vessel: &Value) -> Option<Mmsi> {
    match resolve(vessel, &["mmsi"])? {
        Value::Number(n) => {
            let raw = u32::try_from(n.as_u64()?).ok()?;
            Mmsi::try_from(raw).ok()
        }
        Value::String(s) => Mmsi::try_from(s.as_str()).ok(),
        _ => None,
    }
}

/// Call sign lives at different depths for self and for AIS targets:
/// the own vessel exposes it directly, targets wrap it in a
/// `{value, timestamp}` envelope. Try both shapes.
fn call_sign_of(vessel: &Value) -> String {
    let direct = text_at(vessel, &["communication", "callsignVhf"]);
    if !direct.is_empty() {
        return direct;
    }
    text_at(vessel, &["communication", "value", "callsignVhf"])
}

/// Registration string minus the fixed "IMO " prefix.
fn imo_of(vessel: &Value) -> Option<String> {
    let raw = str_at(vessel, &["registrations", "value", "imo"])?;
    raw.get(IMO_PREFIX_LEN..).map(str::to_string)
}

/// AIS-class update time; the own vessel falls back to the position
/// report timestamp, targets without one stay unreported this cycle.
fn last_report_of(vessel: &Value, is_own_vessel: bool) -> Option<DateTime<Utc>> {
    timestamp_at(vessel, &["sensors", "ais", "class", "timestamp"]).or_else(|| {
        if is_own_vessel {
            timestamp_at(vessel, &["navigation", "position", "timestamp"])
        } else {
            None
        }
    })
}

/// Build a [`VesselSnapshot`] from one entry of the vessels tree.
///
/// `ordinal` is the entry's position in the snapshot; position 0 is
/// reserved for the own vessel.
pub fn extract_snapshot(vessel: &Value, ordinal: usize) -> VesselSnapshot {
    let is_own_vessel = ordinal == 0;

    VesselSnapshot {
        is_own_vessel,
        mmsi: mmsi_of(vessel),
        ship_name: text_at(vessel, &["name"]),
        call_sign: call_sign_of(vessel),
        destination: text_at(vessel, &["navigation", "destination", "commonName", "value"]),
        ship_type_name: text_at(vessel, &["design", "aisShipType", "value", "name"]),
        latitude: float_at(vessel, &["navigation", "position", "value", "latitude"]),
        longitude: float_at(vessel, &["navigation", "position", "value", "longitude"]),
        sog_knots: float_at(vessel, &["navigation", "speedOverGround", "value"])
            .map(mps_to_knots),
        cog_deg: angle_deg_at(vessel, &["navigation", "courseOverGroundTrue", "value"]),
        rot_deg: angle_deg_at(vessel, &["navigation", "rateOfTurn", "value"]),
        heading_deg: angle_deg_at(vessel, &["navigation", "headingTrue", "value"]),
        nav_status: str_at(vessel, &["navigation", "state", "value"]).map(nav_status_code),
        imo: imo_of(vessel),
        ship_type_id: u32_at(vessel, &["design", "aisShipType", "value", "id"]),
        // draft arrives in decimeters
        draft_meters: float_at(vessel, &["design", "draft", "value", "current"]).map(|d| d / 10.0),
        length_meters: float_at(vessel, &["design", "length", "value", "overall"]),
        beam_half_meters: float_at(vessel, &["design", "beam", "value"]).map(|b| b / 2.0),
        ais_class: str_at(vessel, &["sensors", "ais", "class", "value"])
            .map(AisClass::from)
            .unwrap_or_default(),
        last_report: last_report_of(vessel, is_own_vessel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    fn target_vessel() -> Value {
        json!({
            "mmsi": 230123456,
            "name": "SUULA",
            "navigation": {
                "position": {
                    "value": { "latitude": 60.192059, "longitude": 24.945831 },
                    "timestamp": "2024-06-01T12:00:00Z"
                },
                "speedOverGround": { "value": 5.144 },
                "courseOverGroundTrue": { "value": 1.5707963267948966 },
                "rateOfTurn": { "value": 0.0174532925 },
                "headingTrue": { "value": 3.141592653589793 },
                "state": { "value": "moored" },
                "destination": { "commonName": { "value": "HELSINKI" } }
            },
            "communication": {
                "value": { "callsignVhf": "OJABC" }
            },
            "registrations": { "value": { "imo": "IMO 9267560" } },
            "design": {
                "aisShipType": { "value": { "id": 80, "name": "Tanker" } },
                "draft": { "value": { "current": 79.0 } },
                "length": { "value": { "overall": 111.0 } },
                "beam": { "value": 18.0 }
            },
            "sensors": {
                "ais": {
                    "class": {
                        "value": "A",
                        "timestamp": "2024-06-01T12:00:30Z"
                    }
                }
            }
        })
    }

    #[test]
    fn extracts_full_target() {
        let snap = extract_snapshot(&target_vessel(), 1);

        assert!(!snap.is_own_vessel);
        assert_eq!(snap.mmsi.unwrap().value(), 230_123_456);
        assert_eq!(snap.ship_name, "SUULA");
        assert_eq!(snap.call_sign, "OJABC");
        assert_eq!(snap.destination, "HELSINKI");
        assert_eq!(snap.ship_type_name, "Tanker");
        assert_abs_diff_eq!(snap.latitude.unwrap(), 60.192059);
        assert_abs_diff_eq!(snap.longitude.unwrap(), 24.945831);
        // 5.144 m/s is very close to 10 knots
        assert_abs_diff_eq!(snap.sog_knots.unwrap(), 10.0, epsilon = 1e-3);
        assert_abs_diff_eq!(snap.cog_deg.unwrap(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(snap.rot_deg.unwrap(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(snap.heading_deg.unwrap(), 180.0, epsilon = 1e-9);
        assert_eq!(snap.nav_status, Some(5));
        assert_eq!(snap.imo.as_deref(), Some("9267560"));
        assert_eq!(snap.ship_type_id, Some(80));
        assert_abs_diff_eq!(snap.draft_meters.unwrap(), 7.9);
        assert_abs_diff_eq!(snap.length_meters.unwrap(), 111.0);
        assert_abs_diff_eq!(snap.beam_half_meters.unwrap(), 9.0);
        assert_eq!(snap.ais_class, AisClass::A);
        assert_eq!(
            snap.last_report.unwrap(),
            DateTime::parse_from_rfc3339("2024-06-01T12:00:30Z").unwrap()
        );
    }

    #[test]
    fn own_vessel_reads_direct_call_sign() {
        let vessel = json!({
            "communication": { "callsignVhf": "OJXYZ" }
        });
        let snap = extract_snapshot(&vessel, 0);
        assert!(snap.is_own_vessel);
        assert_eq!(snap.call_sign, "OJXYZ");
    }

    #[test]
    fn own_vessel_timestamp_falls_back_to_position() {
        let vessel = json!({
            "navigation": {
                "position": { "timestamp": "2024-06-01T12:00:00Z" }
            }
        });
        let own = extract_snapshot(&vessel, 0);
        assert!(own.last_report.is_some());

        // a target with no AIS-class timestamp gets none at all
        let other = extract_snapshot(&vessel, 3);
        assert!(other.last_report.is_none());
    }

    #[test]
    fn malformed_field_does_not_corrupt_siblings() {
        let mut vessel = target_vessel();
        vessel["navigation"]["speedOverGround"] = json!("fast");
        vessel["design"]["beam"] = json!({ "value": "wide" });
        vessel["registrations"] = json!(42);

        let snap = extract_snapshot(&vessel, 1);
        assert!(snap.sog_knots.is_none());
        assert!(snap.beam_half_meters.is_none());
        assert!(snap.imo.is_none());
        // everything else still resolves
        assert_eq!(snap.ship_name, "SUULA");
        assert_abs_diff_eq!(snap.latitude.unwrap(), 60.192059);
        assert_eq!(snap.ais_class, AisClass::A);
    }

    #[test]
    fn empty_tree_yields_all_defaults() {
        let snap = extract_snapshot(&json!({}), 1);
        assert_eq!(
            snap,
            VesselSnapshot {
                is_own_vessel: false,
                ..Default::default()
            }
        );
    }

    #[test]
    fn numeric_placeholder_text_collapses_to_empty() {
        let vessel = json!({
            "name": 123456789,
            "navigation": {
                "destination": { "commonName": { "value": "230123456" } }
            },
            "communication": { "value": { "callsignVhf": 42 } },
            "design": { "aisShipType": { "value": { "name": "80" } } }
        });
        let snap = extract_snapshot(&vessel, 1);
        assert_eq!(snap.ship_name, "");
        assert_eq!(snap.destination, "");
        assert_eq!(snap.call_sign, "");
        assert_eq!(snap.ship_type_name, "");
    }

    #[test]
    fn integer_looking_name_is_dropped_conservatively() {
        // known edge case: a legitimate name with an integer value is
        // still treated as placeholder junk
        let vessel = json!({ "name": "42" });
        assert_eq!(extract_snapshot(&vessel, 1).ship_name, "");

        let vessel = json!({ "name": "4 WINDS" });
        assert_eq!(extract_snapshot(&vessel, 1).ship_name, "4 WINDS");
    }

    #[test]
    fn fractional_values_survive_the_placeholder_guard() {
        // only integer-valued junk is collapsed
        let vessel = json!({ "name": "7.5" });
        assert_eq!(extract_snapshot(&vessel, 1).ship_name, "7.5");

        let vessel = json!({ "name": 7.5 });
        assert_eq!(extract_snapshot(&vessel, 1).ship_name, "7.5");

        let vessel = json!({ "name": "1e3" });
        assert_eq!(extract_snapshot(&vessel, 1).ship_name, "");
    }

    #[test]
    fn mmsi_accepts_string_and_number() {
        let snap = extract_snapshot(&json!({ "mmsi": "265547250" }), 1);
        assert_eq!(snap.mmsi.unwrap().value(), 265_547_250);

        let snap = extract_snapshot(&json!({ "mmsi": 265547250 }), 1);
        assert_eq!(snap.mmsi.unwrap().value(), 265_547_250);

        let snap = extract_snapshot(&json!({ "mmsi": 1000000000u64 }), 1);
        assert!(snap.mmsi.is_none());
    }

    #[test]
    fn short_registration_string_is_absent() {
        let vessel = json!({ "registrations": { "value": { "imo": "IMO" } } });
        assert!(extract_snapshot(&vessel, 1).imo.is_none());
    }

    #[test]
    fn unknown_nav_state_maps_to_default() {
        let vessel = json!({ "navigation": { "state": { "value": "levitating" } } });
        assert_eq!(extract_snapshot(&vessel, 1).nav_status, Some(15));
    }
}
