use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Canonical, request-scoped view of a travel request under analysis.
///
/// Every field is optional; engines fall back to neutral defaults when the
/// fields they read are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelRequestSnapshot {
    pub request_id: Option<String>,
    pub user_id: Option<String>,
    pub company_id: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub travel_date: Option<NaiveDate>,
    pub duration_days: Option<u32>,
    pub budget_usd: Option<f64>,
    pub travelers_count: Option<u32>,
    pub travel_class: Option<String>,
    pub transport_mode: Option<TransportMode>,
    pub distance_km: Option<f64>,
    pub policy: Option<PolicySnapshot>,
}

impl TravelRequestSnapshot {
    /// Lowercased destination with internal whitespace collapsed, if any text remains.
    pub fn normalized_destination(&self) -> Option<String> {
        self.destination.as_deref().and_then(normalize_text)
    }

    /// First day of travel: the start date, else the single travel date.
    pub fn departure_date(&self) -> Option<NaiveDate> {
        self.start_date.or(self.travel_date)
    }

    /// Trip length in whole days, preferring the explicit duration.
    pub fn trip_days(&self) -> Option<i64> {
        if let Some(days) = self.duration_days {
            return Some(i64::from(days));
        }

        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }

    /// Span between explicit start and end dates; single-date requests have none.
    pub fn date_span_days(&self) -> Option<i64> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days()),
            _ => None,
        }
    }

    pub fn budget(&self) -> Option<f64> {
        self.budget_usd.filter(|value| value.is_finite())
    }

    pub fn travelers(&self) -> u32 {
        match self.travelers_count {
            Some(count) if count > 0 => count,
            _ => 1,
        }
    }
}

pub(crate) fn normalize_text(raw: &str) -> Option<String> {
    let collapsed = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Company travel policy limits, read-only during analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySnapshot {
    pub max_budget_usd: Option<f64>,
    pub allowed_destinations: Vec<String>,
    pub restricted_destinations: Vec<String>,
    pub travel_class_rules: Option<String>,
    pub require_approval_above_usd: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReasonKind {
    Destination,
    Duration,
}

/// A single risk signal; `requires_review` carries the review decision explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskReason {
    pub kind: RiskReasonKind,
    pub level: RiskLevel,
    pub text: String,
    #[serde(default)]
    pub requires_review: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    pub level: RiskLevel,
    pub reasons: Vec<RiskReason>,
    pub requires_manual_review: bool,
}

impl RiskResult {
    pub fn reason_texts(&self) -> Vec<&str> {
        self.reasons
            .iter()
            .map(|reason| reason.text.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicySeverity {
    Info,
    Warning,
    Critical,
}

impl PolicySeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyViolation {
    pub rule: String,
    pub description: String,
    pub severity: PolicySeverity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyResult {
    pub score: u8,
    pub violations: Vec<PolicyViolation>,
    pub override_required: bool,
}

impl PolicyResult {
    pub fn count(&self, severity: PolicySeverity) -> usize {
        self.violations
            .iter()
            .filter(|violation| violation.severity == severity)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavingsKind {
    DateShift,
    EarlyBooking,
    PackageAlternative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsOpportunity {
    pub kind: SavingsKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_savings_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_savings_usd: Option<f64>,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceComparison {
    Below,
    #[default]
    Average,
    Above,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub savings_opportunities: Vec<SavingsOpportunity>,
    pub price_vs_historical: PriceComparison,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Flight,
    Train,
    Car,
    Other,
}

impl TransportMode {
    /// Lenient parse used at the request boundary; unknown modes become `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "flight" | "air" | "plane" | "fly" => Self::Flight,
            "train" | "rail" => Self::Train,
            "car" | "road" | "drive" | "driving" => Self::Car,
            _ => Self::Other,
        }
    }

    /// Kilograms of CO2 per passenger-kilometre.
    pub const fn emission_factor(self) -> f64 {
        match self {
            Self::Flight => 0.255,
            Self::Train => 0.041,
            Self::Car => 0.171,
            Self::Other => 0.1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Train => "train",
            Self::Car => "car",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgResult {
    pub estimated_kg_co2: u64,
    pub transport_type: TransportMode,
    pub distance_km: f64,
    pub offset_suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Aggregate output of one orchestrator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedAnalysis {
    pub request_id: Option<String>,
    pub risk: RiskResult,
    pub policy: PolicyResult,
    pub cost: CostResult,
    pub esg: EsgResult,
    pub narrative: String,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(RiskLevel::Medium.max(RiskLevel::High), RiskLevel::High);
    }

    #[test]
    fn trip_days_prefers_explicit_duration() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date");
        let snapshot = TravelRequestSnapshot {
            start_date: Some(start),
            end_date: Some(start + chrono::Duration::days(30)),
            duration_days: Some(5),
            ..TravelRequestSnapshot::default()
        };
        assert_eq!(snapshot.trip_days(), Some(5));
        assert_eq!(snapshot.date_span_days(), Some(30));
    }

    #[test]
    fn travelers_default_to_one() {
        let mut snapshot = TravelRequestSnapshot::default();
        assert_eq!(snapshot.travelers(), 1);
        snapshot.travelers_count = Some(0);
        assert_eq!(snapshot.travelers(), 1);
        snapshot.travelers_count = Some(4);
        assert_eq!(snapshot.travelers(), 4);
    }

    #[test]
    fn destination_normalization_collapses_whitespace() {
        let snapshot = TravelRequestSnapshot {
            destination: Some("  Nairobi ,   KENYA ".to_string()),
            ..TravelRequestSnapshot::default()
        };
        assert_eq!(
            snapshot.normalized_destination().as_deref(),
            Some("nairobi , kenya")
        );

        let blank = TravelRequestSnapshot {
            destination: Some("   ".to_string()),
            ..TravelRequestSnapshot::default()
        };
        assert_eq!(blank.normalized_destination(), None);
    }

    #[test]
    fn transport_mode_parse_is_lenient() {
        assert_eq!(TransportMode::parse(" Flight "), TransportMode::Flight);
        assert_eq!(TransportMode::parse("rail"), TransportMode::Train);
        assert_eq!(TransportMode::parse("ferry"), TransportMode::Other);
    }
}
