//! Application configuration

use chrono::Duration;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::errors::AisForwardError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// How often AIS data is polled and sent out, in minutes
    /// (0.5 = 30 s).
    #[serde(default = "default_poll_interval_minutes")]
    pub poll_interval_minutes: f64,
    /// Only report AIS targets within this range of the own vessel.
    #[serde(default = "default_max_range_km")]
    pub max_range_km: u32,
    /// Report the own vessel as a class A target (VDO).
    #[serde(default = "default_send_own_vessel")]
    pub send_own_vessel: bool,
    /// Prefix each sentence with an NMEA tag block.
    #[serde(default)]
    pub use_tag_block: bool,
    /// Tag-block source identifier.
    #[serde(default = "default_tag_block_source")]
    pub tag_block_source: String,
    /// Event channel the sentences are emitted on.
    #[serde(default = "default_output_channel_name")]
    pub output_channel_name: String,
    /// Where the UDP sink sends its datagrams.
    #[serde(default = "default_udp_destination")]
    pub udp_destination: String,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Local SignalK server endpoints.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_tls_port")]
    pub tls_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tls_port: default_tls_port(),
        }
    }
}

fn default_poll_interval_minutes() -> f64 {
    1.0
}

fn default_max_range_km() -> u32 {
    100
}

fn default_send_own_vessel() -> bool {
    true
}

fn default_tag_block_source() -> String {
    "SK0001".to_string()
}

fn default_output_channel_name() -> String {
    "nmea0183out".to_string()
}

fn default_udp_destination() -> String {
    "127.0.0.1:10110".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_tls_port() -> u16 {
    3443
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("AISFORWARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), AisForwardError> {
        if !self.poll_interval_minutes.is_finite() || self.poll_interval_minutes <= 0.0 {
            return Err(AisForwardError::ConfigError(ConfigError::Message(
                "poll_interval_minutes must be greater than zero".to_string(),
            )));
        }
        Ok(())
    }

    /// Poll interval as a duration, used both for the cycle timer and
    /// as the freshness window.
    pub fn poll_interval(&self) -> Duration {
        Duration::milliseconds((self.poll_interval_minutes * 60_000.0) as i64)
    }
}
