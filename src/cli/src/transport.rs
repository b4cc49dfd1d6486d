use crate::config::DeviceConfig;
use anyhow::{Context, Result};
use crux_http::{
    HttpError,
    protocol::{HttpRequest, HttpResponse, HttpResult},
};
use hydrometer_ui_core::endpoint_of;
use log::{debug, info, warn};
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use reqwest::{Client, Method};
use trait_variant::make;

/// Performs the HTTP effects requested by the core against a device.
#[make(Send)]
#[cfg_attr(any(test, feature = "mock"), automock)]
pub trait DeviceTransport {
    /// Transport failures never surface as `Err` to the caller; they are
    /// reported back to the core as [`HttpError::Io`].
    async fn execute(&self, request: &HttpRequest) -> HttpResult;
}

pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &DeviceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Absolute device URL for a core request URL
    pub fn device_url(&self, core_url: &str) -> String {
        format!("{}{}", self.base_url, endpoint_of(core_url))
    }

    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = self.device_url(&request.url);
        let method = Method::from_bytes(request.method.as_bytes())
            .with_context(|| format!("failed to parse HTTP method {:?}", request.method))?;
        info!("{method} {url}");

        let mut builder = self.client.request(method.clone(), &url);
        for header in &request.headers {
            builder = builder.header(header.name.as_str(), header.value.as_str());
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let res = builder
            .send()
            .await
            .with_context(|| format!("failed to send {method} request to {url}"))?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .with_context(|| format!("failed to read response body of {method} {url}"))?;
        debug!("{method} {url} answered {status} with {} bytes", body.len());

        Ok(HttpResponse::status(status.as_u16())
            .body(body.to_vec())
            .build())
    }
}

impl DeviceTransport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> HttpResult {
        match self.send(request).await {
            Ok(response) => HttpResult::Ok(response),
            Err(e) => {
                warn!("device request failed: {e:#}");
                HttpResult::Err(HttpError::Io(format!("{e:#}")))
            }
        }
    }
}
