//! Forward SignalK vessel data as AIS message records.
//!
//! The crate polls a local SignalK server for its vessels tree, turns
//! every entry into a normalized [`models::VesselSnapshot`], gates
//! targets by range and data freshness, builds the AIS message
//! records (types 3, 5, 18 and 24) and hands them to a sentence
//! encoder and emission sink, optionally framed with an NMEA tag
//! block.

pub mod builder;
pub mod client;
pub mod config;
pub mod emit;
pub mod errors;
pub mod extract;
pub mod filter;
pub mod models;
pub mod nav_status;
pub mod pipeline;
pub mod tag_block;
pub mod units;
