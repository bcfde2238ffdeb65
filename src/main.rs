//! SignalK vessels to AIS forwarder service

use chrono::Utc;
use tokio::signal;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use ais_forward::client::VesselsClient;
use ais_forward::config::AppConfig;
use ais_forward::emit::{RecordJsonEncoder, UdpSink};
use ais_forward::errors::AisForwardError;
use ais_forward::pipeline::Pipeline;

#[tokio::main]
async fn main() -> Result<(), AisForwardError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    config.validate()?;

    let client = VesselsClient::connect(&config.server).await?;
    let sink = UdpSink::new(config.udp_destination.clone())?;
    let pipeline = Pipeline::new(&config, RecordJsonEncoder, sink);

    let shutdown_signal = signal::ctrl_c();

    tokio::select! {
        result = run_forwarder(config, client, pipeline) => {
            info!("Forwarder completed: {:?}", result);
        }
        _ = shutdown_signal => {
            info!("Received shutdown signal");
        }
    }

    Ok(())
}

/// Timer-driven poll loop. A failed retrieval abandons the cycle with
/// an error log; the next tick retries on its own, with no backoff and
/// no state carried across cycles.
async fn run_forwarder(
    config: AppConfig,
    client: VesselsClient,
    mut pipeline: Pipeline<RecordJsonEncoder, UdpSink>,
) -> Result<(), AisForwardError> {
    let period = config.poll_interval().to_std().map_err(|_| {
        AisForwardError::ConfigError(config::ConfigError::Message(
            "poll interval out of range".to_string(),
        ))
    })?;
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let vessels = match client.fetch_vessels().await {
            Ok(tree) => tree,
            Err(e) => {
                error!("Vessel data retrieval failed: {e}");
                continue;
            }
        };
        let own_position = client.fetch_own_position().await;
        let now = Utc::now();

        match pipeline.run_cycle(&vessels, own_position, now) {
            Ok(report) => {
                info!(
                    vessels = report.vessels_seen,
                    reported = report.vessels_reported,
                    sentences = report.sentences_emitted,
                    "AIS NMEA message send: {}",
                    now.to_rfc3339()
                );
            }
            Err(e) => {
                error!("Cycle failed: {e}");
            }
        }
    }
}
