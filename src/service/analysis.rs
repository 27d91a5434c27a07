//! Canned report text for the analysis endpoints.

use crate::models::{RiskLevel, SearchHit};

const SUSPICIOUS_TERMS: [&str; 5] = ["unauthorized", "stolen", "fraud", "test", "verify"];

/// Markdown "intelligence report" built from a search result set.
pub fn fraud_report(query: &str, bank_scope: &str, hits: &[SearchHit]) -> String {
    let threat_count = hits
        .iter()
        .filter(|h| h.risk_level == RiskLevel::Blocked)
        .count();
    let subject = if query.is_empty() { "general patterns" } else { query };
    let (activity, detail) = if threat_count > 0 {
        (
            "elevated",
            format!("Detected {} transactions matching known fraud signatures.", threat_count),
        )
    } else {
        (
            "normal",
            "No immediate threats detected in current dataset.".to_string(),
        )
    };

    format!(
        "**Fraud Intelligence Report**\n\
         \n\
         **Query Analysis:** \"{subject}\"\n\
         **Bank Scope:** {bank_scope}\n\
         **Transactions Analyzed:** {analyzed}\n\
         \n\
         **Risk Assessment:**\n\
         - High Risk Transactions: {threat_count}\n\
         - Medium Risk: {other}\n\
         - Primary Threat Vectors: Card testing, unauthorized transfers\n\
         \n\
         **AI Insights:**\n\
         The analyzed pattern shows {activity} threat activity.\n\
         {detail}\n\
         \n\
         **Recommendations:**\n\
         - Continue monitoring for unusual patterns\n\
         - Enable real-time alerts for high-risk transactions\n\
         - Review transactions over $5000 manually\n\
         \n\
         *Note: This is a demo analysis. Production system uses Gemini AI for deeper insights.*\n",
        analyzed = hits.len(),
        other = hits.len() - threat_count,
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThreatAssessment {
    pub risk_score: u32,
    pub factors: Vec<String>,
    pub verdict: &'static str,
    pub report: String,
}

/// Render an amount the way the dashboard shows it: whole numbers keep
/// one decimal place (`1.0`), anything else prints as-is (`4.5`).
pub fn format_amount(amount: f64) -> String {
    if amount.is_finite() && amount.fract() == 0.0 && amount.abs() < 1e16 {
        format!("{:.1}", amount)
    } else {
        format!("{}", amount)
    }
}

/// Rule-based score for a single transaction.
pub fn quick_threat_check(description: &str, amount: f64, bank: &str) -> ThreatAssessment {
    let mut risk_score = 0;
    let mut factors = Vec::new();

    if amount > 5000.0 {
        risk_score += 30;
        factors.push("Large amount ($5000+)".to_string());
    }

    if amount < 5.0 {
        risk_score += 40;
        factors.push("Micro-transaction (potential card testing)".to_string());
    }

    let lowered = description.to_lowercase();
    for term in SUSPICIOUS_TERMS {
        if lowered.contains(term) {
            risk_score += 20;
            factors.push(format!("Suspicious keyword: '{}'", term));
        }
    }

    let (verdict, action) = if risk_score > 50 {
        (
            "🚫 **HIGH RISK - BLOCK RECOMMENDED**",
            "This transaction should be blocked and investigated.",
        )
    } else if risk_score > 25 {
        (
            "⚠️ **MEDIUM RISK - REVIEW REQUIRED**",
            "Flag for manual review before processing.",
        )
    } else {
        (
            "✅ **LOW RISK - APPROVE**",
            "Transaction appears legitimate. Safe to process.",
        )
    };

    let factor_lines = if factors.is_empty() {
        "- No significant risk factors".to_string()
    } else {
        factors
            .iter()
            .map(|f| format!("- {}", f))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let amount = format_amount(amount);
    let report = format!(
        "{verdict}\n\
         \n\
         **Transaction Details:**\n\
         - Description: {description}\n\
         - Amount: ${amount}\n\
         - Bank: {bank}\n\
         \n\
         **Risk Score:** {risk_score}/100\n\
         \n\
         **Risk Factors Detected:**\n\
         {factor_lines}\n\
         \n\
         **Recommendation:**\n\
         {action}\n\
         \n\
         *Note: Demo mode using rule-based detection. Production uses ML models.*\n"
    );

    ThreatAssessment {
        risk_score,
        factors,
        verdict,
        report,
    }
}
