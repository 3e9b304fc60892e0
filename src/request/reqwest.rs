use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use std::time::Duration as StdDuration;

use crate::error::{Error, Result, UpstreamError};

use super::{Api, Request, Response};

/// Real api accessing the inter-webs.
#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: Client,
}

impl ReqwestApi {
    /// Create the Api.
    ///
    /// Every request will be aborted after `timeout`.
    pub fn create(timeout: StdDuration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Reqwest)?;
        Ok(ReqwestApi { client })
    }
}

#[async_trait]
impl Api for ReqwestApi {
    async fn send(&self, request: Request) -> std::result::Result<Response, UpstreamError> {
        let url = request.redacted_url();
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let resp = builder
            .send()
            .await
            .map_err(|why| UpstreamError::from_reqwest(&url, why))?;
        let status = resp.status();
        debug!("Request to {:?} returned {}", url, status);
        let body = resp
            .text()
            .await
            .map_err(|why| UpstreamError::from_reqwest(&url, why))?;
        Ok(Response { url, status, body })
    }
}
