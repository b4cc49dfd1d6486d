use anyhow::{Context, Result, ensure};
use std::{env, time::Duration};

/// Address of the hydrometer's own access point
pub const DEFAULT_DEVICE_URL: &str = "http://192.168.4.1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where and how to reach the device
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Per-request transport timeout
    pub timeout: Duration,
}

impl DeviceConfig {
    /// Load the configuration from environment variables.
    ///
    /// Command line values take precedence over `HYDROMETER_URL` and
    /// `HYDROMETER_TIMEOUT_SECS`.
    pub fn load(url: Option<String>, timeout_secs: Option<u64>) -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), url, timeout_secs)
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let base_url = url
            .or_else(|| lookup("HYDROMETER_URL"))
            .unwrap_or_else(|| DEFAULT_DEVICE_URL.to_string());

        // the device only serves plain HTTP on its own network
        ensure!(
            base_url.starts_with("http://"),
            "failed to parse device URL {base_url:?}: expected http://"
        );

        let timeout_secs = match timeout_secs {
            Some(secs) => secs,
            None => lookup("HYDROMETER_TIMEOUT_SECS")
                .map(|value| {
                    value
                        .parse::<u64>()
                        .context("failed to parse HYDROMETER_TIMEOUT_SECS: invalid format")
                })
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        ensure!(
            timeout_secs > 0,
            "failed to validate timeout: must be at least one second"
        );

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
