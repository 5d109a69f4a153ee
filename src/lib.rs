pub mod api;
pub mod config;
pub mod error;
pub mod plan;
pub mod schedule;
pub mod scoring;
pub mod server;
pub mod strategy;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::plan::{build_content_plan, PlanEntry};
use crate::schedule::build_slots;
use crate::scoring::{RankedSignal, ReferenceScorer, SignalAggregator};
use crate::strategy::{build_strategy, derive_duration_target, Strategy};

pub const SERVICE_NAME: &str = "viral-trend-planner";

/// One historical short-form post supplied for benchmarking.
///
/// Numeric fields hold the values as submitted; the scorer applies its own
/// clamping so that the duration heuristic can still see the raw averages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub topic: Option<String>,
    pub hook_type: Option<String>,
    pub format: Option<String>,
    pub duration_sec: f64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub watch_time_pct: f64,
    pub hashtags: Vec<String>,
}

impl Reference {
    pub fn topic_label(&self) -> String {
        normalize_label(self.topic.as_deref(), "general")
    }

    pub fn hook_label(&self) -> String {
        normalize_label(self.hook_type.as_deref(), "unknown")
    }

    pub fn format_label(&self) -> String {
        normalize_label(self.format.as_deref(), "short-form")
    }

    pub fn hashtag_labels(&self) -> Vec<String> {
        self.hashtags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(|tag| tag.to_lowercase())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ScoredReference {
    pub reference: Reference,
    pub score: f64,
}

/// A request that already passed the boundary gate in [`api`].
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub niche: String,
    pub audience: String,
    pub goal: String,
    pub posting_days_per_week: f64,
    pub daily_time_budget_hours: f64,
    pub platforms: Vec<String>,
    pub references: Vec<Reference>,
}

impl Default for AnalysisInput {
    fn default() -> Self {
        Self {
            niche: String::new(),
            audience: String::new(),
            goal: "reach".to_string(),
            posting_days_per_week: 4.0,
            daily_time_budget_hours: 2.0,
            platforms: vec!["tiktok".to_string()],
            references: Vec::new(),
        }
    }
}

impl AnalysisInput {
    /// Number of schedule slots requested; fractional cadences round up.
    pub fn slot_target(&self) -> usize {
        if !self.posting_days_per_week.is_finite() || self.posting_days_per_week <= 0.0 {
            return 0;
        }
        self.posting_days_per_week.ceil() as usize
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub benchmark_score: f64,
    pub references_analyzed: usize,
    pub top_topics: Vec<RankedSignal>,
    pub top_hooks: Vec<RankedSignal>,
    pub top_formats: Vec<RankedSignal>,
    pub top_hashtags: Vec<RankedSignal>,
    pub strategy: Strategy,
    pub weekly_plan: Vec<PlanEntry>,
}

fn load_planner_config() -> PlannerConfig {
    PlannerConfig::load(None)
        .map(|(config, _)| config)
        .unwrap_or_default()
}

pub fn analyze(input: &AnalysisInput) -> AnalysisReport {
    let config = load_planner_config();
    analyze_on(input, Local::now().date_naive(), &config)
}

/// Runs the whole pipeline with the schedule anchored on `today`
/// (the first candidate slot is the day after).
pub fn analyze_on(input: &AnalysisInput, today: NaiveDate, config: &PlannerConfig) -> AnalysisReport {
    let scorer = ReferenceScorer::new(config.scoring.clone());
    let scored = score_references(&scorer, &input.references);

    let mut aggregator = SignalAggregator::new();
    for item in &scored {
        aggregator.record(&item.reference, item.score);
    }
    let signals = aggregator.ranked(&config.ranking);

    let benchmark_score = benchmark_score(&scored);
    tracing::debug!(
        references = scored.len(),
        benchmark_score,
        "scored references"
    );

    let duration_target = derive_duration_target(&input.references);
    let strategy = build_strategy(
        benchmark_score,
        &signals.topics,
        input.posting_days_per_week,
        &input.niche,
        duration_target,
        &config.strategy,
    );

    let slots = build_slots(
        &input.platforms,
        input.slot_target(),
        today,
        config.schedule.window_days,
    );
    let weekly_plan = build_content_plan(
        &slots,
        &signals.topics,
        &signals.hooks,
        &signals.formats,
        &input.niche,
    );

    AnalysisReport {
        benchmark_score,
        references_analyzed: scored.len(),
        top_topics: signals.topics,
        top_hooks: signals.hooks,
        top_formats: signals.formats,
        top_hashtags: signals.hashtags,
        strategy,
        weekly_plan,
    }
}

pub fn score_references(scorer: &ReferenceScorer, references: &[Reference]) -> Vec<ScoredReference> {
    references
        .iter()
        .map(|reference| ScoredReference {
            score: scorer.score(reference),
            reference: reference.clone(),
        })
        .collect()
}

/// Mean reference score, 0 when nothing was analyzed.
pub fn benchmark_score(scored: &[ScoredReference]) -> f64 {
    if scored.is_empty() {
        return 0.0;
    }
    let total: f64 = scored.iter().map(|item| item.score).sum();
    round2(total / scored.len() as f64)
}

fn normalize_label(value: Option<&str>, fallback: &str) -> String {
    let trimmed = value.unwrap_or_default().trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
