use viral_trend_planner::scoring::{
    RankingLimits, ReferenceScorer, ScoringWeights, SignalAggregator, SignalTally,
};
use viral_trend_planner::{benchmark_score, score_references, Reference};

fn reference(topic: &str, views: u64, watch: f64, duration: f64) -> Reference {
    Reference {
        topic: Some(topic.to_string()),
        hook_type: Some("myth bust".to_string()),
        format: Some("talking head".to_string()),
        duration_sec: duration,
        views,
        likes: views / 10,
        comments: views / 100,
        shares: views / 50,
        watch_time_pct: watch,
        hashtags: Vec::new(),
    }
}

fn sample_references() -> Vec<Reference> {
    vec![
        Reference {
            topic: Some("low-impact cardio".to_string()),
            hook_type: Some("myth bust".to_string()),
            format: Some("talking head".to_string()),
            duration_sec: 28.0,
            views: 182_000,
            likes: 12_300,
            comments: 640,
            shares: 2_400,
            watch_time_pct: 72.0,
            hashtags: vec!["#fitness".into(), "#fatloss".into(), "#dailyhabits".into()],
        },
        Reference {
            topic: Some("meal prep".to_string()),
            hook_type: Some("3-step tutorial".to_string()),
            format: Some("overhead demo".to_string()),
            duration_sec: 36.0,
            views: 141_000,
            likes: 9_600,
            comments: 520,
            shares: 1_800,
            watch_time_pct: 66.0,
            hashtags: vec!["#mealprep".into(), "#highprotein".into(), "#easyrecipes".into()],
        },
        Reference {
            topic: Some("office workouts".to_string()),
            hook_type: Some("before-after".to_string()),
            format: Some("montage".to_string()),
            duration_sec: 24.0,
            views: 225_000,
            likes: 17_400,
            comments: 920,
            shares: 3_500,
            watch_time_pct: 74.0,
            hashtags: vec!["#deskworkout".into(), "#busyfitness".into(), "#fitness".into()],
        },
    ]
}

#[test]
fn scorer_matches_reference_formula() {
    let scorer = ReferenceScorer::default();
    let scores: Vec<f64> = sample_references().iter().map(|r| scorer.score(r)).collect();

    assert!((scores[0] - 333.16).abs() < 0.011);
    assert!((scores[1] - 253.58).abs() < 0.011);
    assert!((scores[2] - 366.2).abs() < 0.011);
}

#[test]
fn scorer_zero_views_and_zero_watch_time_scores_zero() {
    let scorer = ReferenceScorer::default();
    let silent = Reference {
        duration_sec: 30.0,
        ..Reference::default()
    };
    assert_eq!(scorer.score(&silent), 0.0);
}

#[test]
fn scorer_zero_views_uses_velocity_floor() {
    let scorer = ReferenceScorer::default();
    let unseen = Reference {
        duration_sec: 30.0,
        watch_time_pct: 50.0,
        ..Reference::default()
    };
    // No engagement term; log10(10) == 1.
    assert!((scorer.score(&unseen) - 24.75).abs() < 1e-9);
}

#[test]
fn scorer_clamps_watch_time_and_floors_duration() {
    let scorer = ReferenceScorer::default();
    let over = reference("a", 1_000, 140.0, 0.0);
    let capped = reference("a", 1_000, 100.0, 1.0);
    assert_eq!(scorer.score(&over), scorer.score(&capped));

    let negative = reference("a", 1_000, -20.0, 30.0);
    assert_eq!(scorer.score(&negative), 0.0);
}

#[test]
fn scorer_is_monotonic_in_watch_time() {
    let scorer = ReferenceScorer::default();
    let mut previous = 0.0;
    for watch in (0..=100).step_by(5) {
        let score = scorer.score(&reference("a", 50_000, watch as f64, 30.0));
        assert!(score >= previous, "score dropped at watch {}", watch);
        previous = score;
    }
}

#[test]
fn scorer_rewards_short_durations() {
    let scorer = ReferenceScorer::default();
    let short = scorer.score(&reference("a", 1_000, 50.0, 30.0));
    let medium = scorer.score(&reference("a", 1_000, 50.0, 45.0));
    let long = scorer.score(&reference("a", 1_000, 50.0, 90.0));

    assert!(short >= medium);
    assert!(medium >= long);
    assert!((scorer.duration_fit(35.0) - 1.1).abs() < 1e-9);
    assert!((scorer.duration_fit(60.0) - 1.0).abs() < 1e-9);
    assert!((scorer.duration_fit(61.0) - 0.85).abs() < 1e-9);
}

#[test]
fn scorer_respects_configured_weights() {
    let weights = ScoringWeights {
        engagement_weight: 0.0,
        ..ScoringWeights::default()
    };
    let scorer = ReferenceScorer::new(weights);
    let score = scorer.score(&reference("a", 1_000, 50.0, 30.0));
    // 50 * 0.9 * 3 * 0.5 * 1.1
    assert!((score - 74.25).abs() < 1e-9);
}

#[test]
fn tally_keeps_first_seen_order_on_ties() {
    let mut tally = SignalTally::new();
    tally.add("b", 10.0);
    tally.add("a", 10.0);
    tally.add("c", 25.0);
    tally.add("d", 10.0);

    let labels: Vec<String> = tally.top(10).into_iter().map(|s| s.label).collect();
    assert_eq!(labels, vec!["c", "b", "a", "d"]);
}

#[test]
fn tally_rounds_only_on_output() {
    let mut tally = SignalTally::new();
    tally.add("x", 0.004);
    tally.add("x", 0.004);
    tally.add("y", 0.005);

    let ranked = tally.top(2);
    assert_eq!(ranked[0].label, "x");
    assert!((ranked[0].score - 0.01).abs() < 1e-9);
    assert!((tally.get("x").unwrap_or_default() - 0.008).abs() < 1e-12);
}

#[test]
fn aggregator_topic_totals_equal_score_sum() {
    let scorer = ReferenceScorer::default();
    let mut references = sample_references();
    references.push(reference("Meal Prep ", 90_000, 61.0, 42.0));
    let scored = score_references(&scorer, &references);

    let mut aggregator = SignalAggregator::new();
    for item in &scored {
        aggregator.record(&item.reference, item.score);
    }

    let total: f64 = scored.iter().map(|item| item.score).sum();
    assert!((aggregator.topics.total() - total).abs() < 1e-9);
    assert!((aggregator.hooks.total() - total).abs() < 1e-9);
    assert!((aggregator.formats.total() - total).abs() < 1e-9);
    assert_eq!(aggregator.topics.len(), 3, "'Meal Prep ' merges into 'meal prep'");
}

#[test]
fn aggregator_hashtags_receive_half_score_each() {
    let scorer = ReferenceScorer::default();
    let scored = score_references(&scorer, &sample_references());

    let mut aggregator = SignalAggregator::new();
    for item in &scored {
        aggregator.record(&item.reference, item.score);
    }

    let expected: f64 = scored
        .iter()
        .map(|item| item.score * item.reference.hashtag_labels().len() as f64 / 2.0)
        .sum();
    assert!((aggregator.hashtags.total() - expected).abs() < 1e-9);

    let fitness = aggregator.hashtags.get("#fitness").unwrap_or_default();
    assert!((fitness - (scored[0].score + scored[2].score) / 2.0).abs() < 1e-9);

    let ranked = aggregator.ranked(&RankingLimits::default());
    assert_eq!(ranked.hashtags[0].label, "#fitness");
    assert_eq!(ranked.topics[0].label, "office workouts");
    assert!(ranked.hashtags.len() <= 8);
}

#[test]
fn aggregator_defaults_missing_labels() {
    let mut aggregator = SignalAggregator::new();
    aggregator.record(&Reference::default(), 12.0);
    let ranked = aggregator.ranked(&RankingLimits::default());

    assert_eq!(ranked.topics[0].label, "general");
    assert_eq!(ranked.hooks[0].label, "unknown");
    assert_eq!(ranked.formats[0].label, "short-form");
    assert!(ranked.hashtags.is_empty());
}

#[test]
fn aggregator_applies_ranking_limits() {
    let scorer = ReferenceScorer::default();
    let references: Vec<Reference> = (0..7)
        .map(|idx| reference(&format!("topic {}", idx), 10_000 + idx * 1_000, 60.0, 30.0))
        .collect();
    let scored = score_references(&scorer, &references);

    let mut aggregator = SignalAggregator::new();
    for item in &scored {
        aggregator.record(&item.reference, item.score);
    }
    let ranked = aggregator.ranked(&RankingLimits::default());

    assert_eq!(ranked.topics.len(), 5);
    assert_eq!(ranked.topics[0].label, "topic 6");
    assert_eq!(ranked.hooks.len(), 1);
}

#[test]
fn benchmark_is_rounded_mean_and_zero_when_empty() {
    let scorer = ReferenceScorer::default();
    assert_eq!(benchmark_score(&[]), 0.0);

    let scored = score_references(&scorer, &sample_references());
    assert!((benchmark_score(&scored) - 317.65).abs() < 0.011);
}
