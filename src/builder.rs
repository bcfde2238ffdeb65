//! AIS message construction from vessel snapshots.

use crate::models::{AisClass, AisMessage, VesselSnapshot};

/// Builds the per-class set of AIS message records.
#[derive(Debug, Clone, Copy)]
pub struct MessageBuilder {
    send_own_vessel: bool,
}

impl MessageBuilder {
    pub fn new(send_own_vessel: bool) -> Self {
        Self { send_own_vessel }
    }

    /// The class used for dispatch. The own vessel is forced to class
    /// A when self-reporting is enabled, so it always appears in the
    /// broadcast stream regardless of what the tree claims; with
    /// self-reporting disabled it is forced out entirely.
    fn effective_class(&self, vessel: &VesselSnapshot) -> AisClass {
        if vessel.is_own_vessel {
            if self.send_own_vessel {
                AisClass::A
            } else {
                AisClass::Unknown
            }
        } else {
            vessel.ais_class
        }
    }

    /// Construct the messages for one vessel, in emission order.
    ///
    /// Class A gets a position report plus static/voyage data, class B
    /// a position report plus both static parts, a base station only
    /// the position report. Unknown classes produce nothing.
    pub fn build(&self, vessel: &VesselSnapshot) -> Vec<AisMessage> {
        match self.effective_class(vessel) {
            AisClass::A => vec![self.position_report_a(vessel), self.static_and_voyage_a(vessel)],
            AisClass::B => vec![
                self.position_report_b(vessel),
                self.static_part_b0(vessel),
                self.static_part_b1(vessel),
            ],
            AisClass::Base => vec![self.position_report_a(vessel)],
            AisClass::Unknown => Vec::new(),
        }
    }

    fn position_report_a(&self, vessel: &VesselSnapshot) -> AisMessage {
        AisMessage::PositionReportA {
            is_own_vessel: vessel.is_own_vessel,
            mmsi: vessel.mmsi,
            nav_status: vessel.nav_status,
            sog_knots: vessel.sog_knots,
            longitude: vessel.longitude,
            latitude: vessel.latitude,
            cog_deg: vessel.cog_deg,
            heading_deg: vessel.heading_deg,
            rot_deg: vessel.rot_deg,
        }
    }

    fn static_and_voyage_a(&self, vessel: &VesselSnapshot) -> AisMessage {
        AisMessage::StaticAndVoyageA {
            is_own_vessel: vessel.is_own_vessel,
            mmsi: vessel.mmsi,
            imo: vessel.imo.clone(),
            cargo: vessel.ship_type_id,
            call_sign: vessel.call_sign.clone(),
            ship_name: vessel.ship_name.clone(),
            draught_meters: vessel.draft_meters,
            destination: vessel.destination.clone(),
            dim_a: 0.0,
            dim_b: vessel.length_meters,
            dim_c: vessel.beam_half_meters,
            dim_d: vessel.beam_half_meters,
        }
    }

    fn position_report_b(&self, vessel: &VesselSnapshot) -> AisMessage {
        AisMessage::PositionReportB {
            is_own_vessel: vessel.is_own_vessel,
            mmsi: vessel.mmsi,
            sog_knots: vessel.sog_knots,
            accuracy: 0,
            longitude: vessel.longitude,
            latitude: vessel.latitude,
            cog_deg: vessel.cog_deg,
            heading_deg: vessel.heading_deg,
        }
    }

    fn static_part_b0(&self, vessel: &VesselSnapshot) -> AisMessage {
        AisMessage::StaticPartB0 {
            is_own_vessel: vessel.is_own_vessel,
            mmsi: vessel.mmsi,
            ship_name: vessel.ship_name.clone(),
        }
    }

    fn static_part_b1(&self, vessel: &VesselSnapshot) -> AisMessage {
        AisMessage::StaticPartB1 {
            is_own_vessel: vessel.is_own_vessel,
            mmsi: vessel.mmsi,
            cargo: vessel.ship_type_id,
            call_sign: vessel.call_sign.clone(),
            dim_a: 0.0,
            dim_b: vessel.length_meters,
            dim_c: vessel.beam_half_meters,
            dim_d: vessel.beam_half_meters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mmsi;

    fn class_vessel(ais_class: AisClass) -> VesselSnapshot {
        VesselSnapshot {
            mmsi: Mmsi::try_from(230_123_456).ok(),
            ais_class,
            ship_name: "SUULA".to_string(),
            length_meters: Some(111.0),
            beam_half_meters: Some(9.0),
            ..Default::default()
        }
    }

    #[test]
    fn class_a_builds_position_and_static_pair() {
        let builder = MessageBuilder::new(true);
        let messages = builder.build(&class_vessel(AisClass::A));

        assert_eq!(messages.len(), 2);
        assert!(matches!(messages[0], AisMessage::PositionReportA { .. }));
        assert!(matches!(messages[1], AisMessage::StaticAndVoyageA { .. }));
    }

    #[test]
    fn class_b_builds_three_messages() {
        let builder = MessageBuilder::new(true);
        let messages = builder.build(&class_vessel(AisClass::B));

        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0], AisMessage::PositionReportB { accuracy: 0, .. }));
        assert!(matches!(messages[1], AisMessage::StaticPartB0 { .. }));
        assert!(matches!(messages[2], AisMessage::StaticPartB1 { .. }));
    }

    #[test]
    fn base_station_builds_position_report_only() {
        let builder = MessageBuilder::new(true);
        let messages = builder.build(&class_vessel(AisClass::Base));

        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], AisMessage::PositionReportA { .. }));
    }

    #[test]
    fn unknown_class_builds_nothing() {
        let builder = MessageBuilder::new(true);
        assert!(builder.build(&class_vessel(AisClass::Unknown)).is_empty());
    }

    #[test]
    fn own_vessel_forced_to_class_a_when_enabled() {
        let builder = MessageBuilder::new(true);
        let mut vessel = class_vessel(AisClass::Unknown);
        vessel.is_own_vessel = true;

        let messages = builder.build(&vessel);
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.is_own_vessel()));
    }

    #[test]
    fn own_vessel_suppressed_when_disabled() {
        let builder = MessageBuilder::new(false);
        let mut vessel = class_vessel(AisClass::A);
        vessel.is_own_vessel = true;

        assert!(builder.build(&vessel).is_empty());
    }

    #[test]
    fn dimensions_follow_length_and_half_beam() {
        let builder = MessageBuilder::new(true);
        let messages = builder.build(&class_vessel(AisClass::A));

        let AisMessage::StaticAndVoyageA {
            dim_a,
            dim_b,
            dim_c,
            dim_d,
            ..
        } = &messages[1]
        else {
            panic!("expected static/voyage record");
        };
        assert_eq!(*dim_a, 0.0);
        assert_eq!(*dim_b, Some(111.0));
        assert_eq!(*dim_c, Some(9.0));
        assert_eq!(*dim_d, Some(9.0));
    }
}
