use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::intelligence::cache::{AnalysisCache, CacheError, InMemoryAnalysisCache};
use crate::intelligence::types::{PolicySnapshot, TransportMode, TravelRequestSnapshot};
use crate::intelligence::{intelligence_router, IntelligenceService};

/// 2025-06-07 falls on a Saturday.
pub(super) fn saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 7).expect("valid date")
}

pub(super) fn friday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 6).expect("valid date")
}

pub(super) fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 9).expect("valid date")
}

pub(super) fn days_after(date: NaiveDate, days: i64) -> NaiveDate {
    date + chrono::Duration::days(days)
}

pub(super) fn with_destination(destination: &str) -> TravelRequestSnapshot {
    TravelRequestSnapshot {
        destination: Some(destination.to_string()),
        ..TravelRequestSnapshot::default()
    }
}

pub(super) fn with_policy(policy: PolicySnapshot) -> TravelRequestSnapshot {
    TravelRequestSnapshot {
        policy: Some(policy),
        ..TravelRequestSnapshot::default()
    }
}

/// Kenya weekend departure, ten days, two travellers, over a 5000 USD ceiling.
pub(super) fn kenya_weekend_trip() -> TravelRequestSnapshot {
    TravelRequestSnapshot {
        request_id: Some("req-kenya-001".to_string()),
        destination: Some("Kenya".to_string()),
        start_date: Some(saturday()),
        end_date: Some(days_after(saturday(), 10)),
        budget_usd: Some(9000.0),
        travelers_count: Some(2),
        transport_mode: Some(TransportMode::Flight),
        policy: Some(PolicySnapshot {
            max_budget_usd: Some(5000.0),
            ..PolicySnapshot::default()
        }),
        ..TravelRequestSnapshot::default()
    }
}

pub(super) fn memory_service() -> (
    Arc<IntelligenceService<InMemoryAnalysisCache>>,
    InMemoryAnalysisCache,
) {
    let cache = InMemoryAnalysisCache::default();
    let service = IntelligenceService::with_ttl(Arc::new(cache.clone()), Duration::from_secs(300));
    (Arc::new(service), cache)
}

pub(super) fn memory_router() -> (axum::Router, InMemoryAnalysisCache) {
    let (service, cache) = memory_service();
    (intelligence_router(service), cache)
}

/// Cache backend that is always down.
#[derive(Default)]
pub(super) struct UnavailableCache {
    pub(super) calls: AtomicUsize,
}

impl UnavailableCache {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl AnalysisCache for UnavailableCache {
    fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(CacheError::Unavailable("redis offline".to_string()))
    }

    fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(CacheError::Unavailable("redis offline".to_string()))
    }
}

/// Cache backend holding an unreadable payload for every key.
pub(super) struct CorruptCache;

impl AnalysisCache for CorruptCache {
    fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(Some("{\"risk\": \"truncated".to_string()))
    }

    fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
