use ::reqwest::{Method, StatusCode, Url};
use async_trait::async_trait;

use crate::error::UpstreamError;

mod reqwest;
pub use self::reqwest::ReqwestApi;

#[cfg(test)]
mod dummy;
#[cfg(test)]
pub use self::dummy::{has_detail_level, is_call, is_shopping_call, DummyApi};

/// An outgoing request, independent of the transport.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

/// A subset of a Response, derived from [`reqwest::Response`].
///
/// `url` is the redacted request url, see [`Request::redacted_url`].
#[derive(Debug, Clone)]
pub struct Response {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

/// Generalized API endpoint.
///
/// This abstracts away from the real thing to allow for deterministic local
/// tests with a [`DummyApi`].
#[async_trait]
pub trait Api: Send + Sync {
    /// Send the request and read the whole body.
    ///
    /// Non-success status codes are *not* errors at this level.
    async fn send(&self, request: Request) -> Result<Response, UpstreamError>;
}

impl Request {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: vec![],
            body: None,
        }
    }

    pub fn post(url: Url, body: String) -> Self {
        Self {
            method: Method::POST,
            url,
            headers: vec![],
            body: Some(body),
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// The url without its query, safe to log and to show to clients.
    ///
    /// The query carries the app id and api keys.
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.to_string()
    }
}
