use chrono::{Datelike, Weekday};

use super::types::{
    CostResult, PriceComparison, SavingsKind, SavingsOpportunity, TravelRequestSnapshot,
};

const WEEKEND_SHIFT_PCT: f64 = 15.0;
const EARLY_BOOKING_PCT: f64 = 10.0;
const PACKAGE_PCT: f64 = 5.0;

const EARLY_BOOKING_MIN_SPAN_DAYS: i64 = 7;
const PACKAGE_BUDGET_USD: f64 = 5000.0;
const ABOVE_HISTORICAL_USD: f64 = 8000.0;
const BELOW_HISTORICAL_USD: f64 = 2000.0;

pub const NO_SUGGESTIONS_NOTE: &str =
    "No cost-saving opportunities identified from the provided dates and budget.";
pub const SUGGESTIONS_NOTE: &str =
    "Savings figures are heuristic estimates and depend on availability at booking time.";

pub fn run_cost(snapshot: &TravelRequestSnapshot) -> CostResult {
    let budget = snapshot.budget();
    let mut savings_opportunities = Vec::new();

    if let Some(departure) = snapshot.departure_date() {
        if matches!(departure.weekday(), Weekday::Fri | Weekday::Sat) {
            savings_opportunities.push(opportunity(
                SavingsKind::DateShift,
                WEEKEND_SHIFT_PCT,
                budget,
                format!(
                    "Departure on {} falls on a peak day; shifting by 1-2 days could lower fares",
                    departure.format("%A %Y-%m-%d")
                ),
            ));
        }
    }

    if let Some(span) = snapshot.date_span_days() {
        if span >= EARLY_BOOKING_MIN_SPAN_DAYS {
            savings_opportunities.push(opportunity(
                SavingsKind::EarlyBooking,
                EARLY_BOOKING_PCT,
                budget,
                "Book flights and accommodation 2-4 weeks ahead for this length of stay"
                    .to_string(),
            ));
        }
    }

    if let Some(amount) = budget.filter(|amount| *amount > PACKAGE_BUDGET_USD) {
        savings_opportunities.push(opportunity(
            SavingsKind::PackageAlternative,
            PACKAGE_PCT,
            Some(amount),
            "Compare against a bundled flight and hotel package for this budget".to_string(),
        ));
    }

    let price_vs_historical = match budget {
        Some(amount) if amount > ABOVE_HISTORICAL_USD => PriceComparison::Above,
        Some(amount) if amount < BELOW_HISTORICAL_USD => PriceComparison::Below,
        _ => PriceComparison::Average,
    };

    let note = if savings_opportunities.is_empty() {
        NO_SUGGESTIONS_NOTE
    } else {
        SUGGESTIONS_NOTE
    };

    CostResult {
        savings_opportunities,
        price_vs_historical,
        note: Some(note.to_string()),
    }
}

fn opportunity(
    kind: SavingsKind,
    pct: f64,
    budget: Option<f64>,
    recommendation: String,
) -> SavingsOpportunity {
    SavingsOpportunity {
        kind,
        estimated_savings_pct: Some(pct),
        estimated_savings_usd: budget.map(|amount| (amount * pct / 100.0).round()),
        recommendation,
    }
}
