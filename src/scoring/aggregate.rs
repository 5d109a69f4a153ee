use serde::{Deserialize, Serialize};

use crate::scoring::{RankedSignal, SignalTally};
use crate::Reference;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingLimits {
    pub topics: usize,
    pub hooks: usize,
    pub formats: usize,
    pub hashtags: usize,
    pub display_hashtags: usize,
}

impl Default for RankingLimits {
    fn default() -> Self {
        Self {
            topics: 5,
            hooks: 4,
            formats: 4,
            hashtags: 8,
            display_hashtags: 5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RankedSignals {
    pub topics: Vec<RankedSignal>,
    pub hooks: Vec<RankedSignal>,
    pub formats: Vec<RankedSignal>,
    pub hashtags: Vec<RankedSignal>,
}

#[derive(Debug, Clone, Default)]
pub struct SignalAggregator {
    pub topics: SignalTally,
    pub hooks: SignalTally,
    pub formats: SignalTally,
    pub hashtags: SignalTally,
}

impl SignalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits a scored reference to its topic, hook and format in full,
    /// and to each of its hashtags at half weight.
    pub fn record(&mut self, reference: &Reference, score: f64) {
        self.topics.add(&reference.topic_label(), score);
        self.hooks.add(&reference.hook_label(), score);
        self.formats.add(&reference.format_label(), score);

        let hashtag_share = score / 2.0;
        for tag in reference.hashtag_labels() {
            self.hashtags.add(&tag, hashtag_share);
        }
    }

    pub fn ranked(&self, limits: &RankingLimits) -> RankedSignals {
        RankedSignals {
            topics: self.topics.top(limits.topics),
            hooks: self.hooks.top(limits.hooks),
            formats: self.formats.top(limits.formats),
            hashtags: self.hashtags.top(limits.hashtags),
        }
    }
}
