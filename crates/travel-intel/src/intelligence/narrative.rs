use super::types::{CostResult, EsgResult, PolicyResult, RiskResult};

/// Advisory summary composed from the four engine results, one sentence each.
pub fn build_narrative(
    risk: &RiskResult,
    policy: &PolicyResult,
    cost: &CostResult,
    esg: &EsgResult,
) -> String {
    let mut sentences = Vec::with_capacity(4);

    let reasons = risk.reason_texts().join("; ");
    let review = if risk.requires_manual_review {
        " Manual review is recommended."
    } else {
        ""
    };
    sentences.push(format!(
        "Risk is {} ({reasons}).{review}",
        risk.level.label()
    ));

    let policy_sentence = if policy.violations.is_empty() {
        format!("Policy compliance score is {}/100 with no violations.", policy.score)
    } else if policy.override_required {
        format!(
            "Policy compliance score is {}/100 with {} violation(s); an approver override is required.",
            policy.score,
            policy.violations.len()
        )
    } else {
        format!(
            "Policy compliance score is {}/100 with {} violation(s).",
            policy.score,
            policy.violations.len()
        )
    };
    sentences.push(policy_sentence);

    let suggestions = cost.savings_opportunities.len();
    if suggestions > 0 {
        sentences.push(format!(
            "{suggestions} cost-saving suggestion(s) identified."
        ));
    }

    sentences.push(format!(
        "Estimated footprint is {} kg CO2 by {}.",
        esg.estimated_kg_co2,
        esg.transport_type.label()
    ));

    sentences.join(" ")
}
