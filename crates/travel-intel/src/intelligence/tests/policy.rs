use super::common::*;
use crate::intelligence::policy::{
    run_policy, score_violations, RULE_APPROVAL_THRESHOLD, RULE_BUDGET_LIMIT,
    RULE_DESTINATION_NOT_ALLOWED, RULE_RESTRICTED_DESTINATION, RULE_TRAVEL_CLASS,
};
use crate::intelligence::types::{
    PolicySeverity, PolicySnapshot, PolicyViolation, TravelRequestSnapshot,
};

fn violation(severity: PolicySeverity) -> PolicyViolation {
    PolicyViolation {
        rule: "synthetic".to_string(),
        description: "synthetic violation".to_string(),
        severity,
    }
}

#[test]
fn absent_policy_scores_full_marks() {
    let result = run_policy(&TravelRequestSnapshot::default());

    assert_eq!(result.score, 100);
    assert!(result.violations.is_empty());
    assert!(!result.override_required);
}

#[test]
fn modest_overspend_is_a_warning() {
    let mut snapshot = with_policy(PolicySnapshot {
        max_budget_usd: Some(5000.0),
        ..PolicySnapshot::default()
    });
    snapshot.budget_usd = Some(5800.0);

    let result = run_policy(&snapshot);

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule, RULE_BUDGET_LIMIT);
    assert_eq!(result.violations[0].severity, PolicySeverity::Warning);
    assert_eq!(result.score, 90);
    assert!(!result.override_required);
}

#[test]
fn large_overspend_is_critical() {
    let result = run_policy(&kenya_weekend_trip());

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule, RULE_BUDGET_LIMIT);
    assert_eq!(result.violations[0].severity, PolicySeverity::Critical);
    assert_eq!(result.score, 70);
    assert!(result.override_required);
}

#[test]
fn budget_within_limit_passes() {
    let mut snapshot = with_policy(PolicySnapshot {
        max_budget_usd: Some(5000.0),
        ..PolicySnapshot::default()
    });
    snapshot.budget_usd = Some(5000.0);

    assert!(run_policy(&snapshot).violations.is_empty());
}

#[test]
fn approval_threshold_is_informational_only() {
    let mut snapshot = with_policy(PolicySnapshot {
        require_approval_above_usd: Some(2500.0),
        ..PolicySnapshot::default()
    });
    snapshot.budget_usd = Some(3000.0);

    let result = run_policy(&snapshot);

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule, RULE_APPROVAL_THRESHOLD);
    assert_eq!(result.violations[0].severity, PolicySeverity::Info);
    assert_eq!(result.score, 100);
    assert!(!result.override_required);
}

#[test]
fn restricted_destination_matches_by_substring() {
    let mut snapshot = with_policy(PolicySnapshot {
        restricted_destinations: vec!["somalia".to_string()],
        ..PolicySnapshot::default()
    });
    snapshot.destination = Some("Mogadishu,  SOMALIA".to_string());

    let result = run_policy(&snapshot);

    assert_eq!(result.violations[0].rule, RULE_RESTRICTED_DESTINATION);
    assert_eq!(result.violations[0].severity, PolicySeverity::Critical);
    assert!(result.override_required);
    assert_eq!(result.score, 70);
}

#[test]
fn restricted_entries_match_whole_words_only() {
    let mut snapshot = with_policy(PolicySnapshot {
        restricted_destinations: vec![
            "Ukraine".to_string(),
            "Nigeria".to_string(),
            "Papua New Guinea".to_string(),
        ],
        ..PolicySnapshot::default()
    });

    for destination in ["UK", "Niger", "Guinea", "London, UK"] {
        snapshot.destination = Some(destination.to_string());
        let result = run_policy(&snapshot);
        assert!(result.violations.is_empty(), "{destination} flagged");
        assert!(!result.override_required);
        assert_eq!(result.score, 100);
    }

    snapshot.destination = Some("Kyiv, Ukraine".to_string());
    let result = run_policy(&snapshot);
    assert_eq!(result.violations[0].rule, RULE_RESTRICTED_DESTINATION);
    assert!(result.override_required);
}

#[test]
fn allow_list_entry_broader_than_destination_does_not_match() {
    let mut snapshot = with_policy(PolicySnapshot {
        allowed_destinations: vec!["Nairobi, Kenya".to_string()],
        ..PolicySnapshot::default()
    });
    snapshot.destination = Some("Kenya".to_string());

    let result = run_policy(&snapshot);

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule, RULE_DESTINATION_NOT_ALLOWED);
}

#[test]
fn destination_outside_allow_list_is_a_soft_warning() {
    let mut snapshot = with_policy(PolicySnapshot {
        allowed_destinations: vec!["Kenya".to_string(), "Uganda".to_string()],
        ..PolicySnapshot::default()
    });
    snapshot.destination = Some("Egypt".to_string());

    let result = run_policy(&snapshot);

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].rule, RULE_DESTINATION_NOT_ALLOWED);
    assert_eq!(result.violations[0].severity, PolicySeverity::Warning);
    assert!(!result.override_required);

    snapshot.destination = Some("Nairobi, Kenya".to_string());
    assert!(run_policy(&snapshot).violations.is_empty());
}

#[test]
fn destination_checks_skip_when_destination_missing() {
    let snapshot = with_policy(PolicySnapshot {
        allowed_destinations: vec!["Kenya".to_string()],
        restricted_destinations: vec!["Somalia".to_string()],
        ..PolicySnapshot::default()
    });

    assert!(run_policy(&snapshot).violations.is_empty());
}

#[test]
fn economy_only_rule_flags_premium_cabins() {
    let mut snapshot = with_policy(PolicySnapshot {
        travel_class_rules: Some("Economy only for trips under 8 hours".to_string()),
        ..PolicySnapshot::default()
    });
    snapshot.travel_class = Some("Business".to_string());

    let result = run_policy(&snapshot);
    assert_eq!(result.violations[0].rule, RULE_TRAVEL_CLASS);
    assert_eq!(result.violations[0].severity, PolicySeverity::Warning);

    snapshot.travel_class = Some("ECONOMY".to_string());
    assert!(run_policy(&snapshot).violations.is_empty());

    snapshot.travel_class = None;
    assert!(run_policy(&snapshot).violations.is_empty());
}

#[test]
fn other_class_rules_are_not_enforced() {
    let mut snapshot = with_policy(PolicySnapshot {
        travel_class_rules: Some("Business permitted for long haul".to_string()),
        ..PolicySnapshot::default()
    });
    snapshot.travel_class = Some("first".to_string());

    assert!(run_policy(&snapshot).violations.is_empty());
}

#[test]
fn score_clamps_at_zero() {
    let violations = (0..5)
        .map(|_| violation(PolicySeverity::Critical))
        .collect::<Vec<_>>();

    let result = score_violations(violations);

    assert_eq!(result.score, 0);
    assert!(result.override_required);
}

#[test]
fn adding_a_critical_violation_lowers_or_holds_at_zero() {
    let base_sets = vec![
        vec![],
        vec![violation(PolicySeverity::Warning)],
        vec![violation(PolicySeverity::Info), violation(PolicySeverity::Critical)],
        (0..4).map(|_| violation(PolicySeverity::Critical)).collect(),
    ];

    for base in base_sets {
        let before = score_violations(base.clone()).score;
        let mut extended = base;
        extended.push(violation(PolicySeverity::Critical));
        let after = score_violations(extended).score;

        assert!(after < before || after == 0, "before {before}, after {after}");
    }
}

#[test]
fn override_required_iff_any_critical() {
    let severities = [
        PolicySeverity::Info,
        PolicySeverity::Warning,
        PolicySeverity::Critical,
    ];

    for first in severities {
        for second in severities {
            let set = vec![violation(first), violation(second)];
            let has_critical = set
                .iter()
                .any(|violation| violation.severity == PolicySeverity::Critical);
            assert_eq!(score_violations(set).override_required, has_critical);
        }
    }
    assert!(!score_violations(Vec::new()).override_required);
}
