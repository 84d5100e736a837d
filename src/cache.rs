//! In-process TTL cache for fetched rate sheets.

use crate::rate_provider::RateSheet;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Caches one `RateSheet` per base currency for a fixed time-to-live, so
/// repeated conversions within a process hit the network once.
#[derive(Clone)]
pub struct RateCache {
    ttl: Duration,
    inner: Arc<Mutex<HashMap<String, (Instant, RateSheet)>>>,
}

impl RateCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn get(&self, base: &str) -> Option<RateSheet> {
        let cache = self.inner.lock().await;
        match cache.get(base) {
            Some((fetched_at, sheet)) if fetched_at.elapsed() < self.ttl => {
                debug!(%base, "Rate cache HIT");
                Some(sheet.clone())
            }
            Some(_) => {
                debug!(%base, "Rate cache EXPIRED");
                None
            }
            None => {
                debug!(%base, "Rate cache MISS");
                None
            }
        }
    }

    pub async fn put(&self, sheet: RateSheet) {
        let mut cache = self.inner.lock().await;
        debug!(base = %sheet.base, "Rate cache PUT");
        cache.insert(sheet.base.clone(), (Instant::now(), sheet));
    }
}
