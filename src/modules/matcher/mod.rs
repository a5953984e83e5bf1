pub mod presence;
pub mod scorer;

// Re-exports for convenience
pub use presence::{probe_variants, VariantPresence};
pub use scorer::{best_match, score_candidate, Classification, MatchResult};
