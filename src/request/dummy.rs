//! This contains the [`DummyApi`] used for testing purposes.
use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Semaphore;

use std::sync::{Arc, RwLock};

use crate::error::UpstreamError;

use super::{Api, Request, Response};

type Matcher = Box<dyn Fn(&Request) -> bool + Send + Sync>;

struct Route {
    matcher: Matcher,
    status: StatusCode,
    body: String,
}

/// Holds back every answer of a [`DummyApi`] until released.
#[derive(Clone)]
pub struct Gate(Arc<Semaphore>);

impl Gate {
    pub fn release(&self) {
        self.0.close();
    }

    async fn pass(&self) {
        // Nobody ever adds permits, acquiring only returns once closed
        let _ = self.0.acquire().await;
    }
}

/// A dummy API, serving local, deterministic Responses.
///
/// Routes are matched newest first, so registering a route again replaces
/// the older one. Every request is recorded for later inspection.
#[derive(Default, Clone)]
pub struct DummyApi {
    routes: Arc<RwLock<Vec<Route>>>,
    requests: Arc<RwLock<Vec<Request>>>,
    gate: Arc<RwLock<Option<Gate>>>,
}

impl DummyApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every matching request with status 200 and `body`.
    pub fn register<M>(&self, matcher: M, body: impl Into<String>)
    where
        M: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        self.register_status(matcher, StatusCode::OK, body)
    }

    pub fn register_status<M>(&self, matcher: M, status: StatusCode, body: impl Into<String>)
    where
        M: Fn(&Request) -> bool + Send + Sync + 'static,
    {
        let mut routes = self.routes.write().expect("Writing routes failed");
        routes.push(Route {
            matcher: Box::new(matcher),
            status,
            body: body.into(),
        });
    }

    /// Answer Trading API calls named `call_name`.
    ///
    /// `detailed` selects requests with or without a `DetailLevel`.
    pub fn register_call(&self, call_name: &'static str, detailed: Option<bool>, body: &str) {
        self.register(
            move |req| {
                is_call(req, call_name)
                    && detailed.map_or(true, |detailed| has_detail_level(req) == detailed)
            },
            body,
        )
    }

    /// Hold answers to all following requests until the gate is released.
    ///
    /// Requests are still recorded while held.
    pub fn hold(&self) -> Gate {
        let gate = Gate(Arc::new(Semaphore::new(0)));
        *self.gate.write().expect("Writing gate failed") = Some(gate.clone());
        gate
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.read().expect("Reading requests failed").clone()
    }

    /// Number of recorded requests matching `predicate`.
    pub fn count<P>(&self, predicate: P) -> usize
    where
        P: Fn(&Request) -> bool,
    {
        let requests = self.requests.read().expect("Reading requests failed");
        requests.iter().filter(|req| predicate(req)).count()
    }
}

impl Request {
    /// Look up a header value by (case insensitive) name.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Look up the first query parameter called `name`.
    pub fn query_value(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

#[async_trait]
impl Api for DummyApi {
    async fn send(&self, request: Request) -> Result<Response, UpstreamError> {
        // Give concurrent callers a chance to pile up behind this request
        tokio::task::yield_now().await;
        self.requests
            .write()
            .expect("Writing requests failed")
            .push(request.clone());
        let gate = self.gate.read().expect("Reading gate failed").clone();
        if let Some(gate) = gate {
            gate.pass().await;
        }
        let routes = self.routes.read().expect("Reading routes failed");
        let route = routes.iter().rev().find(|route| (route.matcher)(&request));
        match route {
            Some(route) => Ok(Response {
                url: request.redacted_url(),
                status: route.status,
                body: route.body.clone(),
            }),
            None => Err(UpstreamError::Transport(
                request.redacted_url(),
                "no dummy route registered".into(),
            )),
        }
    }
}

/// Is this a Trading API call named `call_name`?
pub fn is_call(req: &Request, call_name: &str) -> bool {
    req.header_value("X-EBAY-API-CALL-NAME") == Some(call_name)
}

/// Is this a Shopping API call named `call_name`?
pub fn is_shopping_call(req: &Request, call_name: &str) -> bool {
    req.query_value("callname").as_deref() == Some(call_name)
}

pub fn has_detail_level(req: &Request) -> bool {
    req.body
        .as_deref()
        .map_or(false, |body| body.contains("<DetailLevel>"))
}
