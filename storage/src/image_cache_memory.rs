use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use entities::image::ImageToken;
use interfaces::image_cache::ImageCache;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

struct CacheEntry {
    payload: Vec<u8>,
    expires_at: Instant,
}

/// Image cache kept in process memory.
///
/// Entries live for a fixed time after insertion. There is no size bound,
/// entries leave the map only through expiry.
pub struct InMemoryImageCache {
    ttl: Duration,
    entries: Mutex<HashMap<ImageToken, CacheEntry>>,
}

impl InMemoryImageCache {
    pub fn new(ttl: Duration) -> InMemoryImageCache {
        InMemoryImageCache { ttl, entries: Mutex::new(HashMap::new()) }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts a task that purges expired entries every `interval`.
    /// The task stops once the cache is dropped everywhere else.
    pub fn spawn_sweeper(cache: &Arc<InMemoryImageCache>, interval: Duration) -> JoinHandle<()> {
        let weak_cache = Arc::downgrade(cache);
        tokio::spawn(async move {
            // tokio panics on a zero period
            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = weak_cache.upgrade() else {
                    break;
                };
                let removed = cache.purge_expired();
                if removed > 0 {
                    debug!("Purged {removed} expired image(s), {} left", cache.len());
                }
            }
        })
    }

    // A poisoned lock only means another handler panicked mid-insert,
    // the map itself stays consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<ImageToken, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for InMemoryImageCache {
    fn default() -> Self {
        InMemoryImageCache::new(DEFAULT_TTL)
    }
}

impl ImageCache for InMemoryImageCache {
    fn put(&self, payload: Vec<u8>) -> ImageToken {
        let token = ImageToken::new(Uuid::new_v4().simple().to_string());
        let entry = CacheEntry { payload, expires_at: Instant::now() + self.ttl };

        self.lock().insert(token.clone(), entry);

        token
    }

    fn get(&self, token: &ImageToken) -> Option<Vec<u8>> {
        let now = Instant::now();
        self.lock()
            .get(token)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.payload.clone())
    }

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}
