use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use travel_intel::config::IntelligenceConfig;
use travel_intel::intelligence::{
    AnalysisCache, CacheError, InMemoryAnalysisCache, IntelligenceService, NoopAnalysisCache,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Cache backend selected from configuration.
#[derive(Debug, Clone)]
pub(crate) enum ConfiguredCache {
    Memory(InMemoryAnalysisCache),
    Disabled(NoopAnalysisCache),
}

impl ConfiguredCache {
    pub(crate) fn from_config(config: &IntelligenceConfig) -> Self {
        if config.cache_enabled {
            Self::Memory(InMemoryAnalysisCache::default())
        } else {
            Self::Disabled(NoopAnalysisCache)
        }
    }
}

impl AnalysisCache for ConfiguredCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            Self::Memory(cache) => cache.get(key),
            Self::Disabled(cache) => cache.get(key),
        }
    }

    fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        match self {
            Self::Memory(cache) => cache.set(key, value, ttl),
            Self::Disabled(cache) => cache.set(key, value, ttl),
        }
    }
}

pub(crate) fn build_intelligence_service(
    config: &IntelligenceConfig,
) -> Arc<IntelligenceService<ConfiguredCache>> {
    let cache = Arc::new(ConfiguredCache::from_config(config));
    Arc::new(IntelligenceService::new(cache, config))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
