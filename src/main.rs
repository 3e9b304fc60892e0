//! # ebay-proxy
//!
//! HTTP proxy in front of the eBay Trading, Shopping and Finding APIs.
//!
//! The provider speaks XML with a different vocabulary per API. This
//! service translates everything into one stable JSON schema and keeps the
//! category tree in memory, refreshing it whenever the provider announces a
//! new category version.
//!
//! ## Features
//!
//! - [X] Search with paging, sorting and filters.
//! - [X] Items with shipping costs to the client's location.
//! - [X] Category tree navigation (children, parents, siblings) and
//!       item conditions per category.
//! - [X] Client location and official provider time.
//!
//!
//! ## Usage
//!
//! See `ebay-proxy --help`. At least an application id (`APP_ID`) and an
//! Auth'n'Auth token (`AUTH_N_AUTH`) are required. Without an
//! ipgeolocation.io key (`IP_API_KEY`) every client is assumed to be in
//! Seattle.
//!
//!
//! ## Configuration
//!
//! Everything but the listening address can also be set in a TOML file,
//! which is read from:
//! - `$XDG_CONFIG_DIR/ebay-proxy/config.toml` on **Linux**,
//! - `$HOME/Library/Application Support/com.ebay-proxy.ebay-proxy/config.toml` on **macOS**,
//! - `{FOLDERID_RoamingAppData}\ebay-proxy\ebay-proxy\config\config.toml` on **Windows**
//!
//! or from the path given with `--config`.
//!
//! ```toml
//! app-id = "MyApp-1234"
//! auth-token = "AgAAAA**..."
//! entries-per-page = 20
//! request-timeout-secs = 10
//!
//! [endpoints]
//! trading = "https://api.sandbox.ebay.com/ws/api.dll"
//! ```
use structopt::StructOpt;
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use std::{net::SocketAddr, sync::Arc};

mod category;
mod coerce;
mod config;
mod error;
#[cfg(test)]
mod fixtures;
mod geoip;
mod item;
mod request;
mod search;
mod server;
mod upstream;

use crate::{
    config::{args::Args, Config},
    error::{Error, Result, ResultExt},
    request::ReqwestApi,
    server::AppState,
    upstream::Upstream,
};

const DEFAULT_LOG_FILTER: &str = "ebay_proxy=info,tower_http=info";

fn main() -> Result<()> {
    let res = real_main();
    match res {
        Ok(_) => {}
        Err(ref why) => error!("{}", why),
    }
    res
}

fn real_main() -> Result<()> {
    // Initialize logger
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::from_args();
    let config = Config::assemble(&args)?;
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|why| Error::Io(why, "starting the runtime"))?
        .block_on(serve(config))
}

async fn serve(config: Config) -> Result<()> {
    let api = ReqwestApi::create(config.request_timeout)?;
    let upstream = Upstream::new(Arc::new(api), config.provider);
    let state = AppState::new(upstream);
    // Warm the category cache, requests will retry if this fails
    if let Some(index) = state.categories.ensure_fresh().await.log_err() {
        info!(
            "Category cache ready with {} categories at version {}",
            index.len(),
            index.version()
        );
    }
    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|why| Error::Io(why, "binding the listener"))?;
    if let Ok(local) = listener.local_addr() {
        info!("Listening on {}", local);
    }
    axum::serve(
        listener,
        server::router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|why| Error::Io(why, "serving requests"))?;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(why) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", why);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(why) => {
                warn!("Failed to install SIGTERM handler: {}", why);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
