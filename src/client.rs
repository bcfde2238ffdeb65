//! Retrieval of the vessels tree from a local SignalK server.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::errors::AisForwardError;
use crate::filter::OwnPosition;

/// HTTP client bound to the server's vessels endpoint.
///
/// The endpoint is probed once at startup: HTTPS first (the local
/// server uses a self-signed certificate, so verification is off),
/// falling back to plain HTTP. Subsequent fetches reuse the chosen
/// URL. A failed probe is not fatal: the client binds to the HTTP
/// endpoint anyway and every poll cycle retries on its own, so the
/// service recovers once the server is reachable.
pub struct VesselsClient {
    client: Client,
    url: String,
}

impl VesselsClient {
    /// Probe the server and bind to whichever endpoint answers.
    pub async fn connect(config: &ServerConfig) -> Result<Self, AisForwardError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;

        let tls_url = format!(
            "https://{}:{}/signalk/v1/api/vessels",
            config.host, config.tls_port
        );
        match client.get(&tls_url).send().await {
            Ok(response) => {
                info!("SSL enabled, using https");
                Self::check_access(response.status());
                Ok(Self {
                    client,
                    url: tls_url,
                })
            }
            Err(_) => {
                let url = format!(
                    "http://{}:{}/signalk/v1/api/vessels",
                    config.host, config.port
                );
                info!("SSL disabled, using http");
                match client.get(&url).send().await {
                    Ok(response) => Self::check_access(response.status()),
                    Err(e) => warn!("Server not reachable on probe: {e}"),
                }
                Ok(Self { client, url })
            }
        }
    }

    fn check_access(status: StatusCode) {
        if !status.is_success() {
            warn!(
                "Server answered {status} on probe, check that 'Allow Readonly Access' is enabled"
            );
        }
    }

    /// Live own position from the server's self entry, independent of
    /// the vessels tree. `None` when the position is unavailable; the
    /// distance gate then fails for every target, which is the
    /// documented degraded behavior.
    pub async fn fetch_own_position(&self) -> Option<OwnPosition> {
        let url = format!("{}/self/navigation/position/value", self.url);
        let value = self
            .client
            .get(&url)
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?
            .json::<Value>()
            .await
            .ok()?;

        match (value.get("latitude")?.as_f64(), value.get("longitude")?.as_f64()) {
            (Some(latitude), Some(longitude)) => Some(OwnPosition {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }

    /// Fetch and materialize the current vessels tree.
    pub async fn fetch_vessels(&self) -> Result<Value, AisForwardError> {
        let tree = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;
        Ok(tree)
    }
}
