//! Mapping from SignalK navigation state labels to AIS status codes.

/// AIS navigational status code for an unrecognized or missing label.
pub const NAV_STATUS_DEFAULT: u8 = 15;

/// Resolve a SignalK `navigation.state` label to the AIS navigational
/// status code.
///
/// The SignalK vocabulary is open ended and case varies between
/// sources, so the lookup is case-insensitive. Codes per the AIS
/// status table:
/// - 0 = under way using engine
/// - 1 = at anchor
/// - 2 = not under command
/// - 3 = restricted maneuverability
/// - 4 = constrained by her draught
/// - 5 = moored
/// - 6 = aground
/// - 7 = engaged in fishing
/// - 8 = under way sailing
/// - 9 = high speed craft carrying hazardous material
/// - 10 = wing in ground carrying hazardous material
/// - 14 = AIS-SART (active)
/// - 15 = undefined (default)
pub fn nav_status_code(label: &str) -> u8 {
    match label.trim().to_ascii_lowercase().as_str() {
        "motoring" | "under way using engine" => 0,
        "anchored" | "at anchor" => 1,
        "not under command" => 2,
        // spelling as it appears in the SignalK sources
        "restricted manouverability" | "restricted maneuverability" => 3,
        "constrained by draft" | "constrained by draught" => 4,
        "moored" => 5,
        "aground" => 6,
        "fishing" | "engaged in fishing" => 7,
        "sailing" | "under way sailing" => 8,
        "hazardous material high speed" => 9,
        "hazardous material wing in ground" => 10,
        "ais-sart" => 14,
        _ => NAV_STATUS_DEFAULT,
    }
}
