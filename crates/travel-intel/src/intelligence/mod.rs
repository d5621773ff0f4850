//! Rule-based intelligence for travel requests.
//!
//! Four independent engines (risk, policy compliance, cost optimization and
//! carbon estimate) read a [`TravelRequestSnapshot`] and return explainable,
//! deterministic results. The orchestrator combines them into a
//! [`CombinedAnalysis`] with a short advisory narrative and optionally caches
//! the result per request id.

pub mod cache;
pub mod cost;
pub mod esg;
pub mod narrative;
pub mod orchestrator;
pub mod payload;
pub mod policy;
pub mod risk;
pub mod router;
pub mod types;

#[cfg(test)]
mod tests;

pub use cache::{AnalysisCache, CacheError, InMemoryAnalysisCache, NoopAnalysisCache};
pub use cost::run_cost;
pub use esg::run_esg;
pub use narrative::build_narrative;
pub use orchestrator::{analyze, analyze_at, cache_key, IntelligenceService};
pub use payload::{AnalyzeRequest, PolicyPayload};
pub use policy::run_policy;
pub use risk::run_risk;
pub use router::intelligence_router;
pub use types::{
    CombinedAnalysis, CostResult, EsgResult, PolicyResult, PolicySeverity, PolicySnapshot,
    PolicyViolation, PriceComparison, RiskLevel, RiskReason, RiskReasonKind, RiskResult,
    SavingsKind, SavingsOpportunity, TransportMode, TravelRequestSnapshot,
};
