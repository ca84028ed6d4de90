//! Short-lived cache in front of the map quota gatekeeper.
//!
//! Holds the last decision until its lifetime runs out. Concurrent callers
//! that find the entry stale wait on a single refresh instead of each
//! querying the provider.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::info;

use super::map_usage::{MapAvailability, MapQuotaGatekeeper};

/// A decision together with how much longer it stays valid.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedDecision {
    pub availability: MapAvailability,
    pub max_age: Duration,
}

struct Entry {
    availability: MapAvailability,
    expires_at: Instant,
}

pub struct AvailabilityCache {
    gatekeeper: Arc<MapQuotaGatekeeper>,
    entry: RwLock<Option<Entry>>,
    refresh: Mutex<()>,
}

impl AvailabilityCache {
    pub fn new(gatekeeper: Arc<MapQuotaGatekeeper>) -> Self {
        Self {
            gatekeeper,
            entry: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn gatekeeper(&self) -> &MapQuotaGatekeeper {
        &self.gatekeeper
    }

    /// Current decision, refreshing it when stale.
    pub async fn get(&self) -> CachedDecision {
        if let Some(hit) = self.fresh() {
            return hit;
        }

        let _refresh = self.refresh.lock().await;
        // Another caller may have refreshed while we waited.
        if let Some(hit) = self.fresh() {
            return hit;
        }

        let availability = self.gatekeeper.check_availability().await;
        let max_age = availability.cache_ttl();
        info!(
            allowed = availability.allowed,
            reason = ?availability.reason,
            ttl_secs = max_age.as_secs(),
            "Refreshed map availability"
        );

        *self.entry.write() = Some(Entry {
            availability: availability.clone(),
            expires_at: Instant::now() + max_age,
        });

        CachedDecision {
            availability,
            max_age,
        }
    }

    fn fresh(&self) -> Option<CachedDecision> {
        let guard = self.entry.read();
        let entry = guard.as_ref()?;
        let now = Instant::now();
        if now >= entry.expires_at {
            return None;
        }
        Some(CachedDecision {
            availability: entry.availability.clone(),
            max_age: entry.expires_at - now,
        })
    }
}
