//! Shipped encoder and sink implementations.
//!
//! The pipeline is generic over [`SentenceEncoder`] and
//! [`EmissionSink`]; these are the implementations the binary wires
//! in. Deployments with a wire-level AIVDM encoder plug it in behind
//! the same traits.

use std::net::UdpSocket;

use tracing::debug;

use crate::errors::AisForwardError;
use crate::models::AisMessage;
use crate::pipeline::{EmissionSink, SentenceEncoder};

/// Forwards each message record as one JSON document.
///
/// Bit-level AIS payload encoding is the downstream consumer's job;
/// this encoder hands over the structured record. Records without an
/// MMSI cannot be addressed on the AIS side and are dropped.
pub struct RecordJsonEncoder;

impl SentenceEncoder for RecordJsonEncoder {
    fn encode(&self, message: &AisMessage) -> Option<String> {
        message.mmsi()?;
        serde_json::to_string(message).ok()
    }
}

/// Sends each sentence as one UDP datagram, the way NMEA consumers
/// such as chart plotters expect them.
pub struct UdpSink {
    socket: UdpSocket,
    destination: String,
}

impl UdpSink {
    pub fn new(destination: impl Into<String>) -> Result<Self, AisForwardError> {
        let destination = destination.into();
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        if destination.contains(".255") {
            socket.set_broadcast(true)?;
        }
        Ok(Self {
            socket,
            destination,
        })
    }
}

impl EmissionSink for UdpSink {
    fn emit(&mut self, channel: &str, sentence: &str) -> Result<(), AisForwardError> {
        debug!(channel, "{sentence}");
        self.socket
            .send_to(sentence.as_bytes(), &self.destination)
            .map_err(|e| AisForwardError::EmissionError(e.to_string()))?;
        Ok(())
    }
}
