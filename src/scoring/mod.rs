pub mod aggregate;
pub mod reference;
pub mod tally;

pub use aggregate::{RankedSignals, RankingLimits, SignalAggregator};
pub use reference::{ReferenceScorer, ScoringWeights};
pub use tally::{RankedSignal, SignalTally};
