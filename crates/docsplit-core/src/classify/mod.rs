//! Page classification and document boundary detection.
//!
//! The stages run in order: header isolation, per-page classification,
//! sequence smoothing, grouping into contiguous runs and output naming.

mod classifier;
mod grouper;
mod header;
mod naming;
pub mod normalize;
mod patterns;
mod smoother;
pub mod strategy;

pub use classifier::{PageClassification, PageClassifier};
pub use grouper::{group, is_partition};
pub use header::HeaderExtractor;
pub use naming::resolve;
pub use normalize::normalize;
pub use smoother::{smooth, smooth_in_place};
pub use strategy::{
    build_strategies, ExactPhrase, FuzzyToken, MatchStrategy, NormalizedPage, PhraseMatch, Region,
    WeightedBlend,
};
