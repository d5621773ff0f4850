use chrono::{Datelike, Local, NaiveDate, Weekday};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use travel_intel::error::AppError;
use travel_intel::intelligence::{
    analyze, AnalyzeRequest, CombinedAnalysis, PolicySnapshot, TransportMode,
    TravelRequestSnapshot,
};

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Path to a JSON travel request (same shape as the HTTP body)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the combined analysis as JSON instead of a readable report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Departure date for the sample trips (YYYY-MM-DD). Defaults to the next Saturday.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) departure: Option<NaiveDate>,
    /// Print each analysis as JSON instead of a readable report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.input)?;
    let request: AnalyzeRequest = serde_json::from_str(&raw)?;
    let analysis = analyze(&request.into_snapshot());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        render_analysis(&analysis);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let departure = args
        .departure
        .unwrap_or_else(|| next_saturday(Local::now().date_naive()));

    println!("Travel intelligence demo (departure {departure})");
    for (title, snapshot) in sample_requests(departure) {
        println!("\n=== {title} ===");
        let analysis = analyze(&snapshot);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        } else {
            render_analysis(&analysis);
        }
    }
    Ok(())
}

fn next_saturday(today: NaiveDate) -> NaiveDate {
    let offset = (Weekday::Sat.num_days_from_monday() + 7
        - today.weekday().num_days_from_monday())
        % 7;
    today + chrono::Duration::days(i64::from(offset))
}

pub(crate) fn sample_requests(departure: NaiveDate) -> Vec<(&'static str, TravelRequestSnapshot)> {
    let family_trip = TravelRequestSnapshot {
        request_id: Some("demo-kenya-family".to_string()),
        destination: Some("Kenya".to_string()),
        start_date: Some(departure),
        end_date: Some(departure + chrono::Duration::days(10)),
        budget_usd: Some(9000.0),
        travelers_count: Some(2),
        transport_mode: Some(TransportMode::Flight),
        policy: Some(PolicySnapshot {
            max_budget_usd: Some(5000.0),
            ..PolicySnapshot::default()
        }),
        ..TravelRequestSnapshot::default()
    };

    let corporate_trip = TravelRequestSnapshot {
        request_id: Some("demo-london-corporate".to_string()),
        company_id: Some("acme-logistics".to_string()),
        destination: Some("London, United Kingdom".to_string()),
        start_date: Some(departure + chrono::Duration::days(2)),
        end_date: Some(departure + chrono::Duration::days(27)),
        budget_usd: Some(7200.0),
        travelers_count: Some(1),
        travel_class: Some("business".to_string()),
        transport_mode: Some(TransportMode::Flight),
        policy: Some(PolicySnapshot {
            max_budget_usd: Some(6500.0),
            allowed_destinations: vec!["Kenya".to_string(), "Uganda".to_string()],
            restricted_destinations: vec!["Somalia".to_string()],
            travel_class_rules: Some("Economy only".to_string()),
            require_approval_above_usd: Some(5000.0),
        }),
        ..TravelRequestSnapshot::default()
    };

    vec![
        ("Family safari, weekend departure", family_trip),
        ("Bare request with no details", TravelRequestSnapshot::default()),
        ("Corporate long-haul assignment", corporate_trip),
    ]
}

fn render_analysis(analysis: &CombinedAnalysis) {
    if let Some(request_id) = &analysis.request_id {
        println!("Request: {request_id}");
    }
    println!("Generated: {}", analysis.generated_at.to_rfc3339());
    println!("\n{}", analysis.narrative);

    println!(
        "\nRisk: {}{}",
        analysis.risk.level.label(),
        if analysis.risk.requires_manual_review {
            " (manual review)"
        } else {
            ""
        }
    );
    for reason in &analysis.risk.reasons {
        println!("- {}", reason.text);
    }

    println!(
        "\nPolicy score: {}/100{}",
        analysis.policy.score,
        if analysis.policy.override_required {
            " (override required)"
        } else {
            ""
        }
    );
    if analysis.policy.violations.is_empty() {
        println!("- no violations");
    }
    for violation in &analysis.policy.violations {
        println!(
            "- [{}] {}: {}",
            violation.severity.label(),
            violation.rule,
            violation.description
        );
    }

    println!(
        "\nCost: price vs historical {:?}",
        analysis.cost.price_vs_historical
    );
    for opportunity in &analysis.cost.savings_opportunities {
        let pct = opportunity
            .estimated_savings_pct
            .map(|pct| format!(" (~{pct:.0}%)"))
            .unwrap_or_default();
        println!("- {}{}", opportunity.recommendation, pct);
    }
    if let Some(note) = &analysis.cost.note {
        println!("  {note}");
    }

    println!(
        "\nCarbon: {} kg CO2 over {:.0} km by {}",
        analysis.esg.estimated_kg_co2,
        analysis.esg.distance_km,
        analysis.esg.transport_type.label()
    );
    for suggestion in &analysis.esg.offset_suggestions {
        println!("- {suggestion}");
    }
    if let Some(note) = &analysis.esg.note {
        println!("  {note}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_intel::intelligence::RiskLevel;

    #[test]
    fn next_saturday_rolls_forward() {
        let wednesday = NaiveDate::from_ymd_opt(2025, 6, 4).expect("valid date");
        assert_eq!(
            next_saturday(wednesday),
            NaiveDate::from_ymd_opt(2025, 6, 7).expect("valid date")
        );
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).expect("valid date");
        assert_eq!(next_saturday(saturday), saturday);
    }

    #[test]
    fn corporate_sample_trips_every_policy_rule() {
        let departure = NaiveDate::from_ymd_opt(2025, 6, 7).expect("valid date");
        let (_, corporate) = sample_requests(departure)
            .into_iter()
            .nth(2)
            .expect("corporate sample present");

        let analysis = analyze(&corporate);

        let rules: Vec<&str> = analysis
            .policy
            .violations
            .iter()
            .map(|violation| violation.rule.as_str())
            .collect();
        assert_eq!(
            rules,
            vec![
                "budget_limit",
                "approval_threshold",
                "destination_not_allowed",
                "travel_class"
            ]
        );
        assert_eq!(analysis.policy.score, 70);
        assert!(!analysis.policy.override_required);
        assert_eq!(analysis.risk.level, RiskLevel::High);
        assert_eq!(analysis.esg.offset_suggestions.len(), 3);
    }
}
