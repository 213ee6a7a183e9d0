//! Per-year memoization of reference data.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::{sleep, timeout};
use tracing::{error, info, warn};

use crate::calculation::validate_bracket_table;
use crate::error::{EngineError, EngineResult};
use crate::models::{TaxBracket, TaxLevy, TaxOffset};

use super::repository::TaxDataSource;

/// Upper bound on a single collaborator fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Pause before the single retry of a failed fetch.
pub const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Process-lifetime cache of bracket, offset, and levy tables keyed by
/// financial year.
///
/// The cache starts empty and populates lazily, one collaborator round trip
/// per year per table kind. Entries never expire implicitly; they are
/// dropped only by an explicit [`refresh`](TaxDataCache::refresh). Reference
/// data is immutable once loaded, so cached entries are shared as
/// `Arc<Vec<_>>` without further locking on the computation path.
///
/// A populate-on-miss serializes under a per-key guard, so concurrent
/// misses for the same year coalesce into one fetch while already-cached
/// years stay readable: the table-wide locks are held only to consult the
/// map and to insert the finished entry, never across a fetch. Each fetch
/// is bounded by [`FETCH_TIMEOUT`] and retried once after [`RETRY_BACKOFF`]
/// when the collaborator reports itself unavailable.
pub struct TaxDataCache {
    source: Arc<dyn TaxDataSource>,
    brackets: RwLock<HashMap<String, Arc<Vec<TaxBracket>>>>,
    offsets: RwLock<HashMap<String, Arc<Vec<TaxOffset>>>>,
    levies: RwLock<HashMap<String, Arc<Vec<TaxLevy>>>>,
    known_years: RwLock<Option<Arc<Vec<String>>>>,
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

/// Applies the collaborator-boundary timeout to one fetch attempt.
async fn fetch_timed<T>(fut: impl Future<Output = EngineResult<T>>) -> EngineResult<T> {
    match timeout(FETCH_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => Err(EngineError::DataUnavailable {
            message: format!("fetch exceeded {:?}", FETCH_TIMEOUT),
        }),
    }
}

impl TaxDataCache {
    /// Creates an empty cache over the given data source.
    pub fn new(source: Arc<dyn TaxDataSource>) -> Self {
        Self {
            source,
            brackets: RwLock::new(HashMap::new()),
            offsets: RwLock::new(HashMap::new()),
            levies: RwLock::new(HashMap::new()),
            known_years: RwLock::new(None),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the guard that serializes populate-on-miss for one cache key.
    async fn miss_guard(&self, key: String) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;
        Arc::clone(in_flight.entry(key).or_default())
    }

    /// Returns the bracket table for `year`, fetching it on first access.
    ///
    /// A year with no bracket table cannot be computed against, so an empty
    /// fetch result is a `YearNotFound` error. The table is validated for
    /// gaps and overlaps before it is cached; a malformed table is a
    /// data-integrity incident and is logged as such.
    pub async fn brackets_for(&self, year: &str) -> EngineResult<Arc<Vec<TaxBracket>>> {
        if let Some(hit) = self.brackets.read().await.get(year) {
            return Ok(Arc::clone(hit));
        }

        let guard = self.miss_guard(format!("brackets/{year}")).await;
        let _populate = guard.lock().await;
        if let Some(hit) = self.brackets.read().await.get(year) {
            return Ok(Arc::clone(hit));
        }

        let fetched = match fetch_timed(self.source.fetch_brackets(year)).await {
            Err(EngineError::DataUnavailable { message }) => {
                warn!(year, error = %message, "bracket fetch failed, retrying once");
                sleep(RETRY_BACKOFF).await;
                fetch_timed(self.source.fetch_brackets(year)).await?
            }
            other => other?,
        };

        if fetched.is_empty() {
            return Err(EngineError::YearNotFound {
                year: year.to_string(),
            });
        }

        if let Err(err) = validate_bracket_table(year, &fetched) {
            error!(year, error = %err, "bracket table failed integrity validation");
            return Err(err);
        }

        let entry = Arc::new(fetched);
        self.brackets
            .write()
            .await
            .insert(year.to_string(), Arc::clone(&entry));
        Ok(entry)
    }

    /// Returns the offset rules for `year`, fetching them on first access.
    ///
    /// An empty result means no offsets are configured for the year, which
    /// is a valid state and is cached like any other.
    pub async fn offsets_for(&self, year: &str) -> EngineResult<Arc<Vec<TaxOffset>>> {
        if let Some(hit) = self.offsets.read().await.get(year) {
            return Ok(Arc::clone(hit));
        }

        let guard = self.miss_guard(format!("offsets/{year}")).await;
        let _populate = guard.lock().await;
        if let Some(hit) = self.offsets.read().await.get(year) {
            return Ok(Arc::clone(hit));
        }

        let fetched = match fetch_timed(self.source.fetch_offsets(year)).await {
            Err(EngineError::DataUnavailable { message }) => {
                warn!(year, error = %message, "offset fetch failed, retrying once");
                sleep(RETRY_BACKOFF).await;
                fetch_timed(self.source.fetch_offsets(year)).await?
            }
            other => other?,
        };

        let entry = Arc::new(fetched);
        self.offsets
            .write()
            .await
            .insert(year.to_string(), Arc::clone(&entry));
        Ok(entry)
    }

    /// Returns the levy rules for `year`, fetching them on first access.
    ///
    /// An empty result means no levies are configured for the year.
    pub async fn levies_for(&self, year: &str) -> EngineResult<Arc<Vec<TaxLevy>>> {
        if let Some(hit) = self.levies.read().await.get(year) {
            return Ok(Arc::clone(hit));
        }

        let guard = self.miss_guard(format!("levies/{year}")).await;
        let _populate = guard.lock().await;
        if let Some(hit) = self.levies.read().await.get(year) {
            return Ok(Arc::clone(hit));
        }

        let fetched = match fetch_timed(self.source.fetch_levies(year)).await {
            Err(EngineError::DataUnavailable { message }) => {
                warn!(year, error = %message, "levy fetch failed, retrying once");
                sleep(RETRY_BACKOFF).await;
                fetch_timed(self.source.fetch_levies(year)).await?
            }
            other => other?,
        };

        let entry = Arc::new(fetched);
        self.levies
            .write()
            .await
            .insert(year.to_string(), Arc::clone(&entry));
        Ok(entry)
    }

    /// Returns the known financial years in chronological order, fetching
    /// the list on first access.
    pub async fn known_years(&self) -> EngineResult<Arc<Vec<String>>> {
        if let Some(hit) = self.known_years.read().await.as_ref() {
            return Ok(Arc::clone(hit));
        }

        let guard = self.miss_guard("known_years".to_string()).await;
        let _populate = guard.lock().await;
        if let Some(hit) = self.known_years.read().await.as_ref() {
            return Ok(Arc::clone(hit));
        }

        let fetched = match fetch_timed(self.source.fetch_known_years()).await {
            Err(EngineError::DataUnavailable { message }) => {
                warn!(error = %message, "known-year fetch failed, retrying once");
                sleep(RETRY_BACKOFF).await;
                fetch_timed(self.source.fetch_known_years()).await?
            }
            other => other?,
        };

        let entry = Arc::new(fetched);
        *self.known_years.write().await = Some(Arc::clone(&entry));
        Ok(entry)
    }

    /// Drops every cached entry.
    ///
    /// Not exercised by normal request flow; intended for operator-driven
    /// reloads after the backing reference data changes.
    pub async fn refresh(&self) {
        self.brackets.write().await.clear();
        self.offsets.write().await.clear();
        self.levies.write().await.clear();
        *self.known_years.write().await = None;
        // In-progress populations keep their own guard handles; dropping
        // the map entries just stops new misses from piling onto them.
        self.in_flight.lock().await.clear();
        info!("tax data cache cleared");
    }
}
