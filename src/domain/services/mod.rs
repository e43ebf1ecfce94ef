//! Domain Services - pure scoring shared by search, pickers and rebinding
//!
//! Nothing here touches the OS; every function is deterministic for
//! identical inputs.

pub mod priority_scorer;
pub mod rebind_scorer;
pub mod search_scorer;
pub mod text_similarity;

pub use priority_scorer::{ActivitySignals, PriorityScorer, WindowPriority};
pub use rebind_scorer::{
    RebindScore, RebindScorer, AUTO_REBIND_THRESHOLD, STRUCTURAL_MATCH_THRESHOLD,
    SUGGEST_THRESHOLD,
};
pub use search_scorer::{highlight, split_query, ScoredWindow, SearchScorer};

/// Minimum match score for a rediscovered window to count as the relaunched one
pub const CONTEXT_MATCH_THRESHOLD: f64 = 0.7;
