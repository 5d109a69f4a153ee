use serde::{Deserialize, Serialize};

use crate::scoring::RankedSignal;
use crate::Reference;

pub const DURATION_WITHOUT_REFERENCES: &str = "20-35 seconds";

const CREATIVE_DIRECTION_STRONG: &str =
    "Double down on high-retention, pattern-interrupt hooks with clear payoffs in the first 2 seconds.";
const CREATIVE_DIRECTION_WEAK: &str =
    "Increase hook clarity and pacing; tighten edits every 2-3 seconds to improve retention.";
const TREND_RISK_MEDIUM: &str =
    "Medium: trend fit is good, but creative fatigue risk increases after 2 weeks.";
const TREND_RISK_HIGH: &str =
    "High: test multiple hooks and formats rapidly before scaling spend or production time.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyThresholds {
    pub creative_direction: f64,
    pub trend_risk: f64,
}

impl Default for StrategyThresholds {
    fn default() -> Self {
        Self {
            creative_direction: 120.0,
            trend_risk: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub focus: String,
    pub duration_target: String,
    pub posting_cadence: String,
    pub creative_direction: String,
    pub trend_risk: String,
}

/// Recommended clip length from the average watch time and duration of the
/// references as submitted.
pub fn derive_duration_target(references: &[Reference]) -> String {
    if references.is_empty() {
        return DURATION_WITHOUT_REFERENCES.to_string();
    }
    let count = references.len() as f64;
    let avg_watch = references.iter().map(|r| finite_or_zero(r.watch_time_pct)).sum::<f64>() / count;
    let avg_duration = references.iter().map(|r| finite_or_zero(r.duration_sec)).sum::<f64>() / count;

    let target = if avg_watch >= 70.0 && avg_duration <= 35.0 {
        "18-30 seconds"
    } else if avg_watch >= 60.0 {
        "25-45 seconds"
    } else if avg_watch >= 50.0 {
        "35-60 seconds"
    } else {
        "45-75 seconds with stronger pattern interrupts"
    };
    target.to_string()
}

pub fn build_strategy(
    benchmark_score: f64,
    top_topics: &[RankedSignal],
    posting_days_per_week: f64,
    niche: &str,
    duration_target: String,
    thresholds: &StrategyThresholds,
) -> Strategy {
    let focus = top_topics
        .first()
        .map(|topic| topic.label.clone())
        .unwrap_or_else(|| niche_focus(niche));

    let creative_direction = if benchmark_score >= thresholds.creative_direction {
        CREATIVE_DIRECTION_STRONG
    } else {
        CREATIVE_DIRECTION_WEAK
    };
    let trend_risk = if benchmark_score >= thresholds.trend_risk {
        TREND_RISK_MEDIUM
    } else {
        TREND_RISK_HIGH
    };

    Strategy {
        focus,
        duration_target,
        posting_cadence: format!("{} posts/week", posting_days_per_week),
        creative_direction: creative_direction.to_string(),
        trend_risk: trend_risk.to_string(),
    }
}

fn niche_focus(niche: &str) -> String {
    let trimmed = niche.trim();
    if trimmed.is_empty() {
        "general".to_string()
    } else {
        trimmed.to_lowercase()
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
