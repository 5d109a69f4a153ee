use serde::{Deserialize, Serialize};

use crate::{round2, Reference};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub engagement_weight: f64,
    pub watch_time_weight: f64,
    pub velocity_floor_views: f64,
    pub short_form_max_sec: f64,
    pub short_form_fit: f64,
    pub standard_max_sec: f64,
    pub standard_fit: f64,
    pub long_form_fit: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            engagement_weight: 1.8,
            watch_time_weight: 0.9,
            velocity_floor_views: 10.0,
            short_form_max_sec: 35.0,
            short_form_fit: 1.1,
            standard_max_sec: 60.0,
            standard_fit: 1.0,
            long_form_fit: 0.85,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceScorer {
    weights: ScoringWeights,
}

impl ReferenceScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Performance score of one reference, rounded to cents.
    ///
    /// `(engagement * w_e + watch * w_w) * log10(views) * retention * duration_fit`
    pub fn score(&self, reference: &Reference) -> f64 {
        let views = reference.views as f64;
        let interactions = reference
            .likes
            .saturating_add(reference.comments)
            .saturating_add(reference.shares) as f64;
        let watch_time_pct = clamp_pct(reference.watch_time_pct);
        let duration_sec = floor_duration(reference.duration_sec);

        let engagement_rate = if reference.views > 0 {
            interactions / views * 100.0
        } else {
            0.0
        };
        let velocity_weight = log10_safe(views.max(self.weights.velocity_floor_views));
        let retention_weight = watch_time_pct / 100.0;
        let duration_fit = self.duration_fit(duration_sec);

        let raw = (engagement_rate * self.weights.engagement_weight
            + watch_time_pct * self.weights.watch_time_weight)
            * velocity_weight
            * retention_weight
            * duration_fit;

        round2(raw).max(0.0)
    }

    pub fn duration_fit(&self, duration_sec: f64) -> f64 {
        if duration_sec <= self.weights.short_form_max_sec {
            self.weights.short_form_fit
        } else if duration_sec <= self.weights.standard_max_sec {
            self.weights.standard_fit
        } else {
            self.weights.long_form_fit
        }
    }
}

fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(100.0)
}

fn floor_duration(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    value.max(1.0)
}

fn log10_safe(value: f64) -> f64 {
    if value <= 0.0 {
        0.0
    } else {
        value.log10()
    }
}
