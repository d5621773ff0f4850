//! Boundary adapter turning loosely-typed request bodies into a
//! [`TravelRequestSnapshot`].
//!
//! Callers send the same field under more than one name (`budget` or
//! `budget_usd`, `travellers_count` or `travelers_count`) and numbers as either
//! JSON numbers or strings. All of that is reconciled here so the engines only
//! ever see the canonical snapshot. Values that cannot be interpreted are
//! treated as not provided.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{PolicySnapshot, TransportMode, TravelRequestSnapshot};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    #[serde(alias = "requestId", deserialize_with = "lenient_id")]
    pub request_id: Option<String>,
    #[serde(alias = "userId", deserialize_with = "lenient_id")]
    pub user_id: Option<String>,
    #[serde(alias = "companyId", deserialize_with = "lenient_id")]
    pub company_id: Option<String>,
    pub destination: Option<String>,
    #[serde(deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub travel_date: Option<NaiveDate>,
    #[serde(alias = "duration", deserialize_with = "lenient_count")]
    pub duration_days: Option<u32>,
    #[serde(deserialize_with = "lenient_number")]
    pub budget_usd: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub budget: Option<f64>,
    #[serde(deserialize_with = "lenient_count")]
    pub travelers_count: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub travellers_count: Option<u32>,
    #[serde(deserialize_with = "lenient_count")]
    pub travelers: Option<u32>,
    pub travel_class: Option<String>,
    pub cabin_class: Option<String>,
    pub transport_type: Option<String>,
    pub transport_mode: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub distance_km: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub distance: Option<f64>,
    pub policy: Option<PolicyPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyPayload {
    #[serde(alias = "max_budget", deserialize_with = "lenient_number")]
    pub max_budget_usd: Option<f64>,
    #[serde(deserialize_with = "lenient_list")]
    pub allowed_destinations: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub restricted_destinations: Vec<String>,
    #[serde(alias = "travel_class_rule")]
    pub travel_class_rules: Option<String>,
    #[serde(
        alias = "approval_threshold_usd",
        alias = "approval_threshold",
        deserialize_with = "lenient_number"
    )]
    pub require_approval_above_usd: Option<f64>,
}

impl AnalyzeRequest {
    pub fn into_snapshot(self) -> TravelRequestSnapshot {
        let transport_mode = self
            .transport_type
            .or(self.transport_mode)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| TransportMode::parse(&raw));

        TravelRequestSnapshot {
            request_id: self.request_id,
            user_id: self.user_id,
            company_id: self.company_id,
            destination: non_blank(self.destination),
            start_date: self.start_date,
            end_date: self.end_date,
            travel_date: self.travel_date,
            duration_days: self.duration_days,
            budget_usd: self.budget_usd.or(self.budget),
            travelers_count: self
                .travelers_count
                .or(self.travellers_count)
                .or(self.travelers),
            travel_class: non_blank(self.travel_class.or(self.cabin_class)),
            transport_mode,
            distance_km: self.distance_km.or(self.distance),
            policy: self.policy.map(PolicyPayload::into_snapshot),
        }
    }
}

impl PolicyPayload {
    pub fn into_snapshot(self) -> PolicySnapshot {
        PolicySnapshot {
            max_budget_usd: self.max_budget_usd,
            allowed_destinations: self.allowed_destinations,
            restricted_destinations: self.restricted_destinations,
            travel_class_rules: non_blank(self.travel_class_rules),
            require_approval_above_usd: self.require_approval_above_usd,
        }
    }
}

impl From<AnalyzeRequest> for TravelRequestSnapshot {
    fn from(value: AnalyzeRequest) -> Self {
        value.into_snapshot()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn number_from_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|number| *number >= 0.0 && *number <= f64::from(u32::MAX))
        .map(|number| number.round() as u32))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => non_blank(Some(text.trim().to_string())),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => parse_date(&text),
        _ => None,
    })
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let entries = match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        Some(Value::String(text)) => text.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    Ok(entries
        .into_iter()
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect())
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp truncated to its date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}
