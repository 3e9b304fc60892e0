use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(about = "Normalizing proxy in front of the eBay APIs")]
pub struct Args {
    /// Application id used for the Shopping and Finding APIs.
    #[structopt(long, env = "APP_ID", hide_env_values = true)]
    pub app_id: Option<String>,

    /// Auth'n'Auth token used for the Trading API.
    #[structopt(long, env = "AUTH_N_AUTH", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// API key for the IP geolocation service.
    ///
    /// Without it, every lookup falls back to the default location.
    #[structopt(long, env = "IP_API_KEY", hide_env_values = true)]
    pub ip_api_key: Option<String>,

    /// Address to listen on.
    #[structopt(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[structopt(long, short, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Path to the configuration file.
    #[structopt(long, short, env = "EBAY_PROXY_CONFIG", name = "PATH")]
    pub config: Option<PathBuf>,
}
