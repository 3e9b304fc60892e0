use directories_next::ProjectDirs;
use serde::Deserialize;

use std::{fs, path::Path, path::PathBuf, time::Duration as StdDuration};

use crate::error::{Error, Result, ResultExt};

use self::args::Args;

pub mod args;

const TRADING_API: &str = "https://api.ebay.com/ws/api.dll";
const SHOPPING_API: &str = "https://open.api.ebay.com/shopping";
const FINDING_API: &str = "https://svcs.ebay.com/services/search/FindingService/v1";
const GEOIP_API: &str = "https://api.ipgeolocation.io";

const DEFAULT_SITE_ID: u32 = 0;
const DEFAULT_COMPATIBILITY_LEVEL: u32 = 967;
const DEFAULT_ENTRIES_PER_PAGE: u32 = 20;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// The optional configuration file.
///
/// Every value in here is overridden by its command line/environment
/// counterpart, if one exists.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all(deserialize = "kebab-case"))]
pub struct ConfigFile {
    #[serde(default)]
    app_id: Option<String>,
    #[serde(default)]
    auth_token: Option<String>,
    #[serde(default)]
    ip_api_key: Option<String>,
    #[serde(default)]
    site_id: Option<u32>,
    #[serde(default)]
    compatibility_level: Option<u32>,
    #[serde(default)]
    entries_per_page: Option<u32>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
    #[serde(default)]
    endpoints: Endpoints,
}

/// Base urls of the upstream services.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all(deserialize = "kebab-case"))]
pub struct Endpoints {
    pub trading: String,
    pub shopping: String,
    pub finding: String,
    pub geoip: String,
}

/// Everything the upstream client needs to talk to the provider.
#[derive(Debug, Clone)]
pub struct Provider {
    pub app_id: String,
    pub auth_token: String,
    pub ip_api_key: Option<String>,
    pub site_id: u32,
    pub compatibility_level: u32,
    pub entries_per_page: u32,
    pub endpoints: Endpoints,
}

/// Fully assembled runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub request_timeout: StdDuration,
    pub provider: Provider,
}

impl ConfigFile {
    pub fn load_or_log<P: AsRef<Path>>(path: P) -> Option<Self> {
        let file = fs::read_to_string(path)
            .map_err(Error::ReadingConfig)
            .log_warn()?;
        toml::from_str(&file)
            .map_err(Error::DeserializingConfig)
            .log_err()
    }
}

impl Config {
    /// Merge arguments and the configuration file.
    ///
    /// Fails if no app id or auth token can be found anywhere.
    pub fn assemble(args: &Args) -> Result<Self> {
        let path = args.config.clone().or_else(default_config_path);
        let file = path
            .and_then(|path| ConfigFile::load_or_log(path))
            .unwrap_or_default();
        Self::from_parts(args, file)
    }

    fn from_parts(args: &Args, file: ConfigFile) -> Result<Self> {
        let app_id = args
            .app_id
            .clone()
            .or(file.app_id)
            .ok_or(Error::MissingCredential("app id"))?;
        let auth_token = args
            .auth_token
            .clone()
            .or(file.auth_token)
            .ok_or(Error::MissingCredential("auth token"))?;
        let timeout = file
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout == 0 {
            return Err(Error::InvalidConfig(
                "request-timeout-secs",
                "must be at least one second",
            ));
        }
        Ok(Self {
            host: args.host.clone(),
            port: args.port,
            request_timeout: StdDuration::from_secs(timeout),
            provider: Provider {
                app_id,
                auth_token,
                ip_api_key: args.ip_api_key.clone().or(file.ip_api_key),
                site_id: file.site_id.unwrap_or(DEFAULT_SITE_ID),
                compatibility_level: file
                    .compatibility_level
                    .unwrap_or(DEFAULT_COMPATIBILITY_LEVEL),
                entries_per_page: file.entries_per_page.unwrap_or(DEFAULT_ENTRIES_PER_PAGE),
                endpoints: file.endpoints,
            },
        })
    }
}

impl Provider {
    /// Provider settings pointing every endpoint at `base`.
    #[cfg(test)]
    pub fn for_tests(base: &str) -> Self {
        Self {
            app_id: "test-app".into(),
            auth_token: "test-token".into(),
            ip_api_key: Some("test-key".into()),
            site_id: DEFAULT_SITE_ID,
            compatibility_level: DEFAULT_COMPATIBILITY_LEVEL,
            entries_per_page: DEFAULT_ENTRIES_PER_PAGE,
            endpoints: Endpoints {
                trading: format!("{}/ws/api.dll", base),
                shopping: format!("{}/shopping", base),
                finding: format!("{}/services/search/FindingService/v1", base),
                geoip: base.to_owned(),
            },
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            trading: TRADING_API.to_owned(),
            shopping: SHOPPING_API.to_owned(),
            finding: FINDING_API.to_owned(),
            geoip: GEOIP_API.to_owned(),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "ebay-proxy", "ebay-proxy")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
