use super::types::{
    normalize_text, PolicyResult, PolicySeverity, PolicySnapshot, PolicyViolation,
    TravelRequestSnapshot,
};

pub const RULE_BUDGET_LIMIT: &str = "budget_limit";
pub const RULE_APPROVAL_THRESHOLD: &str = "approval_threshold";
pub const RULE_RESTRICTED_DESTINATION: &str = "restricted_destination";
pub const RULE_DESTINATION_NOT_ALLOWED: &str = "destination_not_allowed";
pub const RULE_TRAVEL_CLASS: &str = "travel_class";

/// Overspend beyond this multiple of the budget ceiling is critical.
const CRITICAL_OVERSPEND_RATIO: f64 = 1.2;
const CRITICAL_PENALTY: i32 = 30;
const WARNING_PENALTY: i32 = 10;

pub fn run_policy(snapshot: &TravelRequestSnapshot) -> PolicyResult {
    let Some(policy) = snapshot.policy.as_ref() else {
        return PolicyResult {
            score: 100,
            violations: Vec::new(),
            override_required: false,
        };
    };

    let destination = snapshot.normalized_destination();
    let mut violations = Vec::new();

    check_budget_limit(snapshot.budget(), policy, &mut violations);
    check_approval_threshold(snapshot.budget(), policy, &mut violations);
    if let Some(destination) = destination.as_deref() {
        check_restricted(destination, policy, &mut violations);
        check_allowed(destination, policy, &mut violations);
    }
    check_travel_class(snapshot.travel_class.as_deref(), policy, &mut violations);

    score_violations(violations)
}

/// Apply the penalty model to an arbitrary violation set.
pub fn score_violations(violations: Vec<PolicyViolation>) -> PolicyResult {
    let critical = violations
        .iter()
        .filter(|violation| violation.severity == PolicySeverity::Critical)
        .count() as i32;
    let warnings = violations
        .iter()
        .filter(|violation| violation.severity == PolicySeverity::Warning)
        .count() as i32;

    let score = (100 - CRITICAL_PENALTY * critical - WARNING_PENALTY * warnings).clamp(0, 100);

    PolicyResult {
        score: score as u8,
        violations,
        override_required: critical > 0,
    }
}

fn check_budget_limit(
    budget: Option<f64>,
    policy: &PolicySnapshot,
    violations: &mut Vec<PolicyViolation>,
) {
    let (Some(budget), Some(limit)) = (budget, policy.max_budget_usd) else {
        return;
    };
    if budget <= limit {
        return;
    }

    let severity = if budget > limit * CRITICAL_OVERSPEND_RATIO {
        PolicySeverity::Critical
    } else {
        PolicySeverity::Warning
    };

    violations.push(PolicyViolation {
        rule: RULE_BUDGET_LIMIT.to_string(),
        description: format!("Budget ${budget:.0} exceeds the policy limit of ${limit:.0}"),
        severity,
    });
}

fn check_approval_threshold(
    budget: Option<f64>,
    policy: &PolicySnapshot,
    violations: &mut Vec<PolicyViolation>,
) {
    let (Some(budget), Some(threshold)) = (budget, policy.require_approval_above_usd) else {
        return;
    };
    if budget > threshold {
        violations.push(PolicyViolation {
            rule: RULE_APPROVAL_THRESHOLD.to_string(),
            description: format!(
                "Budget ${budget:.0} is above the ${threshold:.0} approval threshold; manager approval needed"
            ),
            severity: PolicySeverity::Info,
        });
    }
}

fn check_restricted(
    destination: &str,
    policy: &PolicySnapshot,
    violations: &mut Vec<PolicyViolation>,
) {
    if let Some(entry) = first_match(destination, &policy.restricted_destinations) {
        violations.push(PolicyViolation {
            rule: RULE_RESTRICTED_DESTINATION.to_string(),
            description: format!("{entry} is on the company's restricted destination list"),
            severity: PolicySeverity::Critical,
        });
    }
}

fn check_allowed(destination: &str, policy: &PolicySnapshot, violations: &mut Vec<PolicyViolation>) {
    let configured = policy
        .allowed_destinations
        .iter()
        .any(|entry| normalize_text(entry).is_some());
    if !configured {
        return;
    }

    if first_match(destination, &policy.allowed_destinations).is_none() {
        violations.push(PolicyViolation {
            rule: RULE_DESTINATION_NOT_ALLOWED.to_string(),
            description: "Destination is not on the company's approved destination list"
                .to_string(),
            severity: PolicySeverity::Warning,
        });
    }
}

fn check_travel_class(
    requested: Option<&str>,
    policy: &PolicySnapshot,
    violations: &mut Vec<PolicyViolation>,
) {
    let economy_only = policy
        .travel_class_rules
        .as_deref()
        .map(|rules| rules.to_lowercase().contains("economy only"))
        .unwrap_or(false);
    if !economy_only {
        return;
    }

    let Some(requested) = requested.and_then(normalize_text) else {
        return;
    };
    if requested != "economy" {
        violations.push(PolicyViolation {
            rule: RULE_TRAVEL_CLASS.to_string(),
            description: format!("Policy allows economy only; {requested} class requested"),
            severity: PolicySeverity::Warning,
        });
    }
}

/// Case-insensitive match of a list entry inside the destination, on word
/// boundaries: "Nairobi, Kenya" matches "Kenya", "UK" does not match "Ukraine".
fn first_match<'a>(destination: &str, entries: &'a [String]) -> Option<&'a str> {
    entries.iter().map(String::as_str).find(|entry| {
        normalize_text(entry)
            .map(|entry| contains_word(destination, &entry))
            .unwrap_or(false)
    })
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
