//! Bounded, time-limited snapshot cache.
//!
//! Entries expire `ttl` after insertion and are dropped lazily when a lookup finds them
//! stale. When the table is full the longest-resident entry is evicted (FIFO by insertion
//! order; reads do not refresh an entry's position).

use crate::error::{ProjectError, Result};
use crate::fetch::SnapshotFetcher;
use crate::model::ProjectSnapshot;
use crate::reference::ProjectId;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_CAPACITY: usize = 50;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Freshness window applied at insertion.
    pub ttl: Duration,
    /// Maximum number of resident entries (at least 1).
    pub capacity: usize,
    /// Upper bound for a single fetch; `None` leaves it to the fetcher.
    pub fetch_timeout: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            capacity: DEFAULT_CAPACITY,
            fetch_timeout: Some(DEFAULT_FETCH_TIMEOUT),
        }
    }
}

struct CacheEntry {
    snapshot: Arc<ProjectSnapshot>,
    expiry: Instant,
}

struct CacheTable {
    capacity: usize,
    entries: HashMap<ProjectId, CacheEntry>,
    order: VecDeque<ProjectId>,
}

impl CacheTable {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get_fresh(&mut self, id: &ProjectId, now: Instant) -> Option<Arc<ProjectSnapshot>> {
        let entry = self.entries.get(id)?;
        if now < entry.expiry {
            return Some(entry.snapshot.clone());
        }
        log::debug!("cache entry for {id} expired");
        self.remove(id);
        None
    }

    fn insert(&mut self, id: ProjectId, snapshot: Arc<ProjectSnapshot>, expiry: Instant) {
        self.remove(&id);

        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            log::debug!("evicting cached project {oldest}");
            self.entries.remove(&oldest);
        }

        self.entries.insert(id.clone(), CacheEntry { snapshot, expiry });
        self.order.push_back(id);
    }

    fn remove(&mut self, id: &ProjectId) -> bool {
        if self.entries.remove(id).is_none() {
            return false;
        }
        if let Some(pos) = self.order.iter().position(|key| key == id) {
            self.order.remove(pos);
        }
        true
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

type FetchSlot = Arc<tokio::sync::Mutex<()>>;

/// Snapshot cache in front of a [`SnapshotFetcher`].
///
/// Lookup, eviction and insertion share one lock. Concurrent misses for the same id wait on a
/// per-id slot so that only one fetch per id is in flight at a time.
pub struct ProjectCache {
    fetcher: Arc<dyn SnapshotFetcher>,
    config: CacheConfig,
    table: Mutex<CacheTable>,
    in_flight: Mutex<HashMap<ProjectId, FetchSlot>>,
}

impl ProjectCache {
    pub fn new(fetcher: Arc<dyn SnapshotFetcher>, config: CacheConfig) -> Self {
        Self {
            fetcher,
            table: Mutex::new(CacheTable::new(config.capacity)),
            in_flight: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Returns the snapshot for `id`, fetching it when absent or stale.
    pub async fn get(&self, id: &ProjectId) -> Result<Arc<ProjectSnapshot>> {
        self.get_with_cancel(id, &CancellationToken::new()).await
    }

    /// Like [`get`](Self::get), aborting a pending fetch once `cancel` fires.
    pub async fn get_with_cancel(
        &self,
        id: &ProjectId,
        cancel: &CancellationToken,
    ) -> Result<Arc<ProjectSnapshot>> {
        if let Some(snapshot) = self.lookup(id) {
            log::debug!("cache hit for {id}");
            return Ok(snapshot);
        }

        let in_flight = self.claim_slot(id);
        let _turn = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ProjectError::Cancelled(id.to_string())),
            guard = in_flight.slot.lock() => guard,
        };

        // The previous slot holder may have filled the entry.
        if let Some(snapshot) = self.lookup(id) {
            log::debug!("cache hit for {id} after waiting on in-flight fetch");
            return Ok(snapshot);
        }

        log::debug!("cache miss for {id}, fetching");
        let snapshot = match self.fetch(id, cancel).await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(err) => {
                log::warn!("fetch of project {id} failed: {err}");
                return Err(err);
            }
        };

        let expiry = Instant::now() + self.config.ttl;
        lock(&self.table).insert(id.clone(), snapshot.clone(), expiry);
        Ok(snapshot)
    }

    pub fn len(&self) -> usize {
        lock(&self.table).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the entry for `id`. Returns whether one was resident.
    pub fn invalidate(&self, id: &ProjectId) -> bool {
        lock(&self.table).remove(id)
    }

    pub fn clear(&self) {
        lock(&self.table).clear();
    }

    fn lookup(&self, id: &ProjectId) -> Option<Arc<ProjectSnapshot>> {
        lock(&self.table).get_fresh(id, Instant::now())
    }

    async fn fetch(&self, id: &ProjectId, cancel: &CancellationToken) -> Result<ProjectSnapshot> {
        let bounded = async {
            let fetch = self.fetcher.fetch_snapshot(id);
            match self.config.fetch_timeout {
                Some(limit) => tokio::time::timeout(limit, fetch).await.map_err(|_| {
                    ProjectError::Timeout {
                        id: id.to_string(),
                        timeout: limit,
                    }
                })?,
                None => fetch.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProjectError::Cancelled(id.to_string())),
            result = bounded => result,
        }
    }

    fn claim_slot(&self, id: &ProjectId) -> InFlight<'_> {
        let slot = lock(&self.in_flight)
            .entry(id.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone();
        InFlight {
            cache: self,
            id: id.clone(),
            slot,
        }
    }
}

/// Claim on an in-flight slot; the last claimant removes the slot from the map.
struct InFlight<'a> {
    cache: &'a ProjectCache,
    id: ProjectId,
    slot: FetchSlot,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut in_flight = lock(&self.cache.in_flight);
        let is_last = in_flight
            .get(&self.id)
            .is_some_and(|slot| Arc::ptr_eq(slot, &self.slot) && Arc::strong_count(slot) <= 2);
        if is_last {
            in_flight.remove(&self.id);
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
