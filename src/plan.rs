use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleSlot;
use crate::scoring::RankedSignal;

pub const PILLAR_COUNT: usize = 3;
pub const DEFAULT_NICHE_PILLAR: &str = "Industry insight";
pub const DEFAULT_PILLARS: [&str; 2] = ["Beginner mistakes", "Template breakdown"];
pub const DEFAULT_HOOKS: [&str; 3] = [
    "Contrarian take",
    "3-step blueprint",
    "Before/after transformation",
];
pub const DEFAULT_FORMATS: [&str; 3] = [
    "Talking head with captions",
    "Screen recording + voiceover",
    "Quick montage",
];

/// CTAs alternate by slot position: even slots get the first.
pub const CALLS_TO_ACTION: [&str; 2] = [
    "Comment \"PLAN\" for the checklist",
    "Follow for daily trend breakdowns",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    #[serde(flatten)]
    pub slot: ScheduleSlot,
    pub pillar: String,
    pub concept: String,
    pub hook: String,
    pub format: String,
    pub cta: String,
}

pub fn build_content_plan(
    slots: &[ScheduleSlot],
    top_topics: &[RankedSignal],
    top_hooks: &[RankedSignal],
    top_formats: &[RankedSignal],
    niche: &str,
) -> Vec<PlanEntry> {
    let pillars = if top_topics.is_empty() {
        default_pillars(niche)
    } else {
        labels(&top_topics[..top_topics.len().min(PILLAR_COUNT)])
    };
    let hooks = labels_or(top_hooks, &DEFAULT_HOOKS);
    let formats = labels_or(top_formats, &DEFAULT_FORMATS);

    slots
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let pillar = pillars[idx % pillars.len()].clone();
            PlanEntry {
                slot: slot.clone(),
                concept: format!("{}: actionable angle #{}", pillar, idx + 1),
                pillar,
                hook: hooks[idx % hooks.len()].clone(),
                format: formats[idx % formats.len()].clone(),
                cta: CALLS_TO_ACTION[idx % CALLS_TO_ACTION.len()].to_string(),
            }
        })
        .collect()
}

pub fn default_pillars(niche: &str) -> Vec<String> {
    let niche = niche.trim();
    let first = if niche.is_empty() {
        DEFAULT_NICHE_PILLAR
    } else {
        niche
    };
    let mut pillars = vec![first.to_string()];
    pillars.extend(DEFAULT_PILLARS.iter().map(|pillar| pillar.to_string()));
    pillars
}

fn labels(signals: &[RankedSignal]) -> Vec<String> {
    signals.iter().map(|signal| signal.label.clone()).collect()
}

fn labels_or(signals: &[RankedSignal], defaults: &[&str]) -> Vec<String> {
    if signals.is_empty() {
        defaults.iter().map(|value| value.to_string()).collect()
    } else {
        labels(signals)
    }
}
