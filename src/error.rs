use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[remain::sorted]
pub enum Error {
    #[error("category {_0:?} is part of a parent cycle")]
    CategoryCycle(String),
    #[error("category {_0:?} has an unknown parent {_1:?}")]
    CategoryDanglingParent(String, String),
    #[error("category {_0:?} does not exist")]
    CategoryNotFound(String),
    #[error("could not deserialize configuration file: {_0}")]
    DeserializingConfig(#[source] toml::de::Error),
    #[error("invalid configuration value for `{_0}`: {_1}")]
    InvalidConfig(&'static str, &'static str),
    #[error("invalid value {_1:?} for parameter `{_0}`")]
    InvalidParameter(&'static str, String),
    #[error("io error while {_1}: {_0}")]
    Io(#[source] std::io::Error, &'static str),
    #[error("no {_0} configured, set it on the command line, in the environment or the configuration file")]
    MissingCredential(&'static str),
    #[error("missing required parameter `{_0}`")]
    MissingParameter(&'static str),
    #[error("could not read configuration file: {_0}")]
    ReadingConfig(#[source] std::io::Error),
    #[error("reqwest error: {_0}")]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Failure of a single call against the provider.
///
/// This is [`Clone`], since a category refresh is shared by every request
/// waiting on it and all of them receive the same outcome.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    #[error("request to {_0:?} failed: {_1}")]
    Transport(String, String),
    #[error("request to {_0:?} timed out")]
    Timeout(String),
    #[error("url {_0:?} returned status {_1}")]
    NonSuccessStatusCode(String, StatusCode),
    #[error("failed to parse the response of {_0}: {_1}")]
    Parsing(&'static str, String),
    #[error("{_0} was not acknowledged by the provider: {_1}")]
    NotAcknowledged(&'static str, String),
}

impl UpstreamError {
    /// `url` must already be redacted, the url reqwest attaches is dropped.
    pub fn from_reqwest(url: &str, why: reqwest::Error) -> Self {
        if why.is_timeout() {
            Self::Timeout(url.to_owned())
        } else {
            Self::Transport(url.to_owned(), why.without_url().to_string())
        }
    }

    /// Status to answer our own client with.
    ///
    /// A rejected call is most likely caused by the parameters we forwarded,
    /// everything else is our (or the provider's) fault.
    pub fn status_hint(&self) -> StatusCode {
        match self {
            Self::NotAcknowledged(_, _) => StatusCode::BAD_REQUEST,
            Self::Transport(_, _)
            | Self::Timeout(_)
            | Self::NonSuccessStatusCode(_, _)
            | Self::Parsing(_, _) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidParameter(_, _) | Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::CategoryNotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(why) => why.status_hint(),
            Self::CategoryCycle(_)
            | Self::CategoryDanglingParent(_, _)
            | Self::ReadingConfig(_)
            | Self::DeserializingConfig(_)
            | Self::InvalidConfig(_, _)
            | Self::Io(_, _)
            | Self::MissingCredential(_)
            | Self::Reqwest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub trait ResultExt<T> {
    fn log_err(self) -> Option<T>;
    fn log_warn(self) -> Option<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn log_err(self) -> Option<T> {
        match self {
            Ok(inner) => Some(inner),
            Err(why) => {
                let why = why.into();
                error!("{}", why);
                None
            }
        }
    }

    fn log_warn(self) -> Option<T> {
        match self {
            Ok(inner) => Some(inner),
            Err(why) => {
                let why = why.into();
                warn!("{}", why);
                None
            }
        }
    }
}
