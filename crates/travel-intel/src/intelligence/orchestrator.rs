use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::cache::{AnalysisCache, CacheError};
use super::cost::run_cost;
use super::esg::run_esg;
use super::narrative::build_narrative;
use super::policy::run_policy;
use super::risk::run_risk;
use super::types::{CombinedAnalysis, TravelRequestSnapshot};
use crate::config::IntelligenceConfig;

const CACHE_KEY_PREFIX: &str = "intelligence:";

/// Run all four engines against one snapshot. Never fails.
pub fn analyze(snapshot: &TravelRequestSnapshot) -> CombinedAnalysis {
    analyze_at(snapshot, Utc::now())
}

/// Same as [`analyze`] with a caller-supplied timestamp.
pub fn analyze_at(snapshot: &TravelRequestSnapshot, generated_at: DateTime<Utc>) -> CombinedAnalysis {
    let risk = run_risk(snapshot);
    let policy = run_policy(snapshot);
    let cost = run_cost(snapshot);
    let esg = run_esg(snapshot);
    let narrative = build_narrative(&risk, &policy, &cost, &esg);

    CombinedAnalysis {
        request_id: request_id(snapshot).map(str::to_string),
        risk,
        policy,
        cost,
        esg,
        narrative,
        generated_at,
    }
}

pub fn cache_key(request_id: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{request_id}")
}

fn request_id(snapshot: &TravelRequestSnapshot) -> Option<&str> {
    snapshot.request_id.as_deref().and_then(normalize_request_id)
}

fn normalize_request_id(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|id| !id.is_empty())
}

/// Orchestrator wrapping [`analyze`] with a short-lived per-request cache.
pub struct IntelligenceService<C> {
    cache: Arc<C>,
    ttl: Duration,
}

impl<C> IntelligenceService<C>
where
    C: AnalysisCache + 'static,
{
    pub fn new(cache: Arc<C>, config: &IntelligenceConfig) -> Self {
        Self::with_ttl(cache, config.cache_ttl())
    }

    pub fn with_ttl(cache: Arc<C>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn analyze(&self, snapshot: &TravelRequestSnapshot) -> CombinedAnalysis {
        analyze(snapshot)
    }

    /// Serve a cached analysis for the request id when one is live, otherwise
    /// compute and store. Requests without an id always recompute.
    pub fn get_or_analyze(&self, snapshot: &TravelRequestSnapshot) -> CombinedAnalysis {
        let Some(request_id) = request_id(snapshot) else {
            return analyze(snapshot);
        };

        if let Some(cached) = self.cached(request_id) {
            return cached;
        }

        let analysis = analyze(snapshot);
        if let Err(err) = self.store(request_id, &analysis) {
            warn!(%request_id, error = %err, "failed to cache intelligence analysis");
        }
        analysis
    }

    /// Live cached analysis for a request id; cache failures read as a miss.
    pub fn cached(&self, request_id: &str) -> Option<CombinedAnalysis> {
        let request_id = normalize_request_id(request_id)?;
        match self.lookup(request_id) {
            Ok(Some(analysis)) => {
                debug!(%request_id, "intelligence cache hit");
                Some(analysis)
            }
            Ok(None) => {
                debug!(%request_id, "intelligence cache miss");
                None
            }
            Err(err) => {
                warn!(%request_id, error = %err, "intelligence cache read failed; recomputing");
                None
            }
        }
    }

    fn lookup(&self, request_id: &str) -> Result<Option<CombinedAnalysis>, CacheError> {
        match self.cache.get(&cache_key(request_id))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn store(&self, request_id: &str, analysis: &CombinedAnalysis) -> Result<(), CacheError> {
        let payload = serde_json::to_string(analysis)?;
        self.cache.set(&cache_key(request_id), payload, self.ttl)
    }
}
