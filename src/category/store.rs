use arc_swap::ArcSwap;
use futures::{
    future::{BoxFuture, Shared},
    FutureExt,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use std::{sync::Arc, time::Instant};

use crate::{
    coerce,
    error::{Result, UpstreamError},
    upstream::{DetailLevel, Upstream},
};

use super::{conditions, Category, CategoryIndex, Condition};

type Refresh = Shared<BoxFuture<'static, std::result::Result<Arc<CategoryIndex>, UpstreamError>>>;

/// The category cache.
///
/// Every read first makes sure the snapshot matches the provider's current
/// category version. Concurrent refreshes share one in-flight future, so
/// the provider sees a single version check and at most one full fetch.
#[derive(Clone)]
pub struct Categories {
    upstream: Upstream,
    index: Arc<ArcSwap<CategoryIndex>>,
    in_flight: Arc<Mutex<Option<Refresh>>>,
}

impl Categories {
    pub fn new(upstream: Upstream) -> Self {
        Self {
            upstream,
            index: Arc::new(ArcSwap::from_pointee(CategoryIndex::default())),
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// The current snapshot, without checking for a newer version.
    pub fn snapshot(&self) -> Arc<CategoryIndex> {
        self.index.load_full()
    }

    /// Refresh the snapshot if the provider has a newer category version.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn ensure_fresh(&self) -> Result<Arc<CategoryIndex>> {
        let refresh = {
            let mut slot = self.in_flight.lock().await;
            match &*slot {
                Some(refresh) => {
                    debug!("Joining running category refresh");
                    refresh.clone()
                }
                None => {
                    let refresh = refresh_in_flight(
                        self.upstream.clone(),
                        self.index.clone(),
                        self.in_flight.clone(),
                    )
                    .boxed()
                    .shared();
                    *slot = Some(refresh.clone());
                    refresh
                }
            }
        };
        Ok(refresh.await?)
    }

    pub async fn all(&self) -> Result<Vec<Category>> {
        Ok(self.ensure_fresh().await?.all())
    }

    pub async fn get(&self, id: &str) -> Result<Category> {
        self.ensure_fresh().await?.get(id)
    }

    pub async fn children(&self, id: &str) -> Result<Vec<Category>> {
        self.ensure_fresh().await?.children(id)
    }

    pub async fn parents(&self, id: &str) -> Result<Vec<Category>> {
        self.ensure_fresh().await?.parents(id)
    }

    pub async fn siblings(&self, id: &str) -> Result<Vec<Category>> {
        self.ensure_fresh().await?.siblings(id)
    }

    /// Item conditions allowed in category `id`.
    pub async fn conditions(&self, id: &str) -> Result<Vec<Condition>> {
        let category = self.get(id).await?;
        let raw = self.upstream.fetch_category_features(&category.id).await?;
        Ok(conditions(raw, &category.id))
    }
}

/// Run one refresh and empty the slot it was published in.
///
/// The slot is emptied before any waiter sees the outcome, whether or not
/// the waiter that started it is still around. A new refresh is only ever
/// published into an empty slot, so the slot still holds this one here.
async fn refresh_in_flight(
    upstream: Upstream,
    index: Arc<ArcSwap<CategoryIndex>>,
    in_flight: Arc<Mutex<Option<Refresh>>>,
) -> std::result::Result<Arc<CategoryIndex>, UpstreamError> {
    let outcome = run_refresh(upstream, index).await;
    in_flight.lock().await.take();
    outcome
}

async fn run_refresh(
    upstream: Upstream,
    index: Arc<ArcSwap<CategoryIndex>>,
) -> std::result::Result<Arc<CategoryIndex>, UpstreamError> {
    let current = index.load_full();
    let summary = upstream.fetch_categories(DetailLevel::Summary).await?;
    let version = category_version(summary.version.as_deref())?;
    if version <= current.version() {
        debug!("Categories are up to date at version {}", version);
        return Ok(current);
    }
    info!(
        "Category version changed from {} to {}, refreshing",
        current.version(),
        version
    );
    let start = Instant::now();
    let full = upstream.fetch_categories(DetailLevel::ReturnAll).await?;
    let version = match full.version.as_deref() {
        Some(raw) => coerce::number("CategoryVersion", raw)?,
        None => version,
    };
    let categories = full.array.categories.into_iter().map(Category::from);
    let fresh = Arc::new(CategoryIndex::build(version, categories));
    index.store(fresh.clone());
    info!(
        "Loaded {} categories at version {} in {:?}",
        fresh.len(),
        version,
        start.elapsed()
    );
    Ok(fresh)
}

fn category_version(raw: Option<&str>) -> std::result::Result<i64, UpstreamError> {
    let raw = raw.ok_or_else(|| {
        UpstreamError::Parsing("GetCategories", "no CategoryVersion in response".into())
    })?;
    coerce::number("CategoryVersion", raw)
}
