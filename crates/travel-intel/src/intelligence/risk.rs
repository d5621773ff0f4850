use super::types::{RiskLevel, RiskReason, RiskReasonKind, RiskResult, TravelRequestSnapshot};

/// Advisory risk rating per country (or well-known city), keyed by normalized name.
const DESTINATION_RISK: &[(&str, RiskLevel)] = &[
    ("kenya", RiskLevel::Medium),
    ("uganda", RiskLevel::Medium),
    ("tanzania", RiskLevel::Low),
    ("rwanda", RiskLevel::Low),
    ("burundi", RiskLevel::Medium),
    ("ethiopia", RiskLevel::Medium),
    ("somalia", RiskLevel::High),
    ("south sudan", RiskLevel::High),
    ("sudan", RiskLevel::High),
    ("congo", RiskLevel::High),
    ("drc", RiskLevel::High),
    ("mozambique", RiskLevel::Medium),
    ("south africa", RiskLevel::Medium),
    ("botswana", RiskLevel::Low),
    ("namibia", RiskLevel::Low),
    ("mauritius", RiskLevel::Low),
    ("ghana", RiskLevel::Low),
    ("nigeria", RiskLevel::High),
    ("egypt", RiskLevel::Medium),
    ("libya", RiskLevel::High),
    ("uae", RiskLevel::Low),
    ("dubai", RiskLevel::Low),
    ("qatar", RiskLevel::Low),
    ("india", RiskLevel::Medium),
    ("china", RiskLevel::Low),
    ("japan", RiskLevel::Low),
    ("uk", RiskLevel::Low),
    ("united kingdom", RiskLevel::Low),
    ("germany", RiskLevel::Low),
    ("france", RiskLevel::Low),
    ("usa", RiskLevel::Low),
    ("canada", RiskLevel::Low),
    ("yemen", RiskLevel::High),
    ("syria", RiskLevel::High),
    ("afghanistan", RiskLevel::High),
    ("haiti", RiskLevel::High),
];

const EXTENDED_TRIP_DAYS: i64 = 21;
const LONG_TRIP_DAYS: i64 = 14;

pub fn run_risk(snapshot: &TravelRequestSnapshot) -> RiskResult {
    let mut reasons = vec![destination_reason(snapshot)];

    if let Some(reason) = snapshot.trip_days().and_then(duration_reason) {
        reasons.push(reason);
    }

    let level = reasons
        .iter()
        .map(|reason| reason.level)
        .max()
        .unwrap_or(RiskLevel::Medium);

    let requires_manual_review =
        level == RiskLevel::High || reasons.iter().any(|reason| reason.requires_review);

    RiskResult {
        level,
        reasons,
        requires_manual_review,
    }
}

/// Table lookup on the text before the first comma, then on the last word.
pub fn destination_risk(normalized: &str) -> Option<RiskLevel> {
    let head = normalized.split(',').next().unwrap_or(normalized).trim();
    lookup(head).or_else(|| {
        normalized
            .split_whitespace()
            .last()
            .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
            .and_then(lookup)
    })
}

fn lookup(key: &str) -> Option<RiskLevel> {
    DESTINATION_RISK
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, level)| *level)
}

fn destination_reason(snapshot: &TravelRequestSnapshot) -> RiskReason {
    let Some(normalized) = snapshot.normalized_destination() else {
        return RiskReason {
            kind: RiskReasonKind::Destination,
            level: RiskLevel::Medium,
            text: "Destination not specified".to_string(),
            requires_review: false,
        };
    };

    let display = snapshot
        .destination
        .as_deref()
        .map(str::trim)
        .unwrap_or(normalized.as_str());

    let (level, text) = match destination_risk(&normalized) {
        Some(level) => (level, format!("{display} is rated {} risk", level.label())),
        None => (
            RiskLevel::Medium,
            format!("{display} has no risk rating on file; assessed as medium risk"),
        ),
    };

    RiskReason {
        kind: RiskReasonKind::Destination,
        level,
        text,
        requires_review: false,
    }
}

fn duration_reason(days: i64) -> Option<RiskReason> {
    if days > EXTENDED_TRIP_DAYS {
        Some(RiskReason {
            kind: RiskReasonKind::Duration,
            level: RiskLevel::High,
            text: format!("Trip length of {days} days requires additional review"),
            requires_review: true,
        })
    } else if days > LONG_TRIP_DAYS {
        Some(RiskReason {
            kind: RiskReasonKind::Duration,
            level: RiskLevel::Medium,
            text: format!("Trip length of {days} days increases exposure"),
            requires_review: false,
        })
    } else {
        None
    }
}
