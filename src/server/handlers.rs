use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
    category::{Category, Condition},
    coerce,
    error::{Result, UpstreamError},
    geoip,
    item::{Item, ShippingInfo},
    search::{SearchQuery, SearchRequest, SearchResult},
    upstream::ItemSelector,
};

use super::{AppState, ClientIp};

const BANNER: &str = "ebay-proxy is up and running";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescription {
    item_id: String,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpInfo {
    ip: String,
    zip_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficialTime {
    time: DateTime<Utc>,
    time_zone: String,
}

pub async fn banner() -> &'static str {
    BANNER
}

pub async fn search(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResult>> {
    debug!("Search {:?}", query);
    let request = SearchRequest::try_from(query)?;
    let location = geoip::locate(&state.upstream, ip).await;
    let raw = state.upstream.search(&request, &location.zip_code).await?;
    Ok(Json(SearchResult::try_from(raw)?))
}

/// The item with shipping costs to wherever the client is.
pub async fn item(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
    Path(id): Path<String>,
) -> Result<Json<Item>> {
    let (raw, location) = tokio::join!(
        state.upstream.fetch_item(&id, ItemSelector::Details),
        geoip::locate(&state.upstream, ip),
    );
    let item = Item::try_from(raw?)?;
    let shipping = state
        .upstream
        .fetch_item_shipping(&id, &location.zip_code, &location.country_code)
        .await?;
    let item = Item {
        description: None,
        ..item.with_shipping(ShippingInfo::try_from(shipping)?)
    };
    Ok(Json(item))
}

pub async fn item_pictures(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<String>>> {
    let raw = state.upstream.fetch_item(&id, ItemSelector::Basic).await?;
    let pictures = raw
        .picture_urls
        .into_iter()
        .filter(|url| !url.trim().is_empty())
        .collect();
    Ok(Json(pictures))
}

pub async fn item_description(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemDescription>> {
    let raw = state
        .upstream
        .fetch_item(&id, ItemSelector::Description)
        .await?;
    Ok(Json(ItemDescription {
        item_id: raw.item_id,
        description: coerce::non_empty(raw.description),
    }))
}

pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.categories.all().await?))
}

pub async fn category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>> {
    Ok(Json(state.categories.get(&id).await?))
}

pub async fn category_children(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.categories.children(&id).await?))
}

pub async fn category_parents(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.categories.parents(&id).await?))
}

pub async fn category_siblings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.categories.siblings(&id).await?))
}

pub async fn category_conditions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Condition>>> {
    Ok(Json(state.categories.conditions(&id).await?))
}

/// Never fails, unknown locations get the fallback.
pub async fn ip(State(state): State<AppState>, ClientIp(ip): ClientIp) -> Json<IpInfo> {
    let location = geoip::locate(&state.upstream, ip).await;
    Json(IpInfo {
        ip: location.ip,
        zip_code: location.zip_code,
    })
}

pub async fn time(
    State(state): State<AppState>,
    ClientIp(ip): ClientIp,
) -> Result<Json<OfficialTime>> {
    let (official, location) = tokio::join!(
        state.upstream.official_time(),
        geoip::locate(&state.upstream, ip),
    );
    let raw = official?.timestamp.ok_or_else(|| {
        UpstreamError::Parsing("GeteBayOfficialTime", "no Timestamp in response".into())
    })?;
    Ok(Json(OfficialTime {
        time: coerce::timestamp("Timestamp", &raw)?,
        time_zone: location.time_zone,
    }))
}
