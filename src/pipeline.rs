//! Per-cycle orchestration: extract, gate, build, encode, emit.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::builder::MessageBuilder;
use crate::config::AppConfig;
use crate::errors::AisForwardError;
use crate::extract::extract_snapshot;
use crate::filter::{OwnPosition, RelevanceFilter};
use crate::models::AisMessage;
use crate::tag_block::TagBlockGenerator;

/// Turns one [`AisMessage`] record into a checksum-terminated NMEA0183
/// sentence. Bit-level AIS payload encoding lives behind this seam;
/// returning `None` drops the message silently (the encoder could not
/// produce a sentence, e.g. for a record without an MMSI).
pub trait SentenceEncoder {
    fn encode(&self, message: &AisMessage) -> Option<String>;
}

/// Downstream consumer of finished sentences, one call per message in
/// construction order.
pub trait EmissionSink {
    fn emit(&mut self, channel: &str, sentence: &str) -> Result<(), AisForwardError>;
}

/// Summary of one poll cycle, for the status log line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub vessels_seen: usize,
    pub vessels_reported: usize,
    pub sentences_emitted: usize,
}

/// The per-cycle pipeline. Owns no cross-cycle state: every value it
/// produces lives and dies within one `run_cycle` call.
pub struct Pipeline<E, S> {
    filter: RelevanceFilter,
    builder: MessageBuilder,
    tag_block: Option<TagBlockGenerator>,
    output_channel: String,
    encoder: E,
    sink: S,
}

impl<E: SentenceEncoder, S: EmissionSink> Pipeline<E, S> {
    pub fn new(config: &AppConfig, encoder: E, sink: S) -> Self {
        let tag_block = config
            .use_tag_block
            .then(|| TagBlockGenerator::new(config.tag_block_source.clone()));

        Self {
            filter: RelevanceFilter::new(config.max_range_km, config.poll_interval()),
            builder: MessageBuilder::new(config.send_own_vessel),
            tag_block,
            output_channel: config.output_channel_name.clone(),
            encoder,
            sink,
        }
    }

    /// Run one poll cycle over a materialized vessels tree.
    ///
    /// Entries are visited in key order; the entry at position 0 is
    /// the own vessel. Gate failures skip a vessel without error; an
    /// emission failure aborts the cycle.
    pub fn run_cycle(
        &mut self,
        vessels: &Value,
        own_position: Option<OwnPosition>,
        now: DateTime<Utc>,
    ) -> Result<CycleReport, AisForwardError> {
        let mut report = CycleReport::default();

        let Some(entries) = vessels.as_object() else {
            return Ok(report);
        };

        for (ordinal, (key, vessel)) in entries.iter().enumerate() {
            report.vessels_seen += 1;

            let snapshot = extract_snapshot(vessel, ordinal);
            if !self.filter.is_relevant(own_position, &snapshot, now) {
                continue;
            }

            let messages = self.builder.build(&snapshot);
            if messages.is_empty() {
                continue;
            }
            debug!(
                vessel = %key,
                mmsi = ?snapshot.mmsi.map(|m| m.value()),
                class = ?snapshot.ais_class,
                own = snapshot.is_own_vessel,
                "reporting vessel"
            );
            report.vessels_reported += 1;

            // tag blocks carry the vessel's report time when known
            let tag_time = snapshot.last_report.unwrap_or(now);
            for message in &messages {
                if let Some(sentence) = self.encoder.encode(message) {
                    let framed = match &self.tag_block {
                        Some(generator) => format!("{}{}", generator.prefix(tag_time), sentence),
                        None => sentence,
                    };
                    self.sink.emit(&self.output_channel, &framed)?;
                    report.sentences_emitted += 1;
                }
            }
        }

        Ok(report)
    }
}
