//! Centralized default constants for the stratify engine.
//!
//! **This module is the single source of truth** for all shared bounds and
//! default values. The schema registry and the validators reference these
//! constants instead of defining their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// NAMES
// =============================================================================

/// Maximum strategy name length in characters.
pub const NAME_MAX_LEN: usize = 64;

// =============================================================================
// RESULT COUNTS
// =============================================================================

/// Minimum result count for any top-k style field.
pub const TOP_K_MIN: i32 = 1;

/// Maximum result count for any top-k style field.
pub const TOP_K_MAX: i32 = 1000;

/// Default top-k for similarity and filtered retrieval.
pub const TOP_K: i32 = 10;

/// Default candidate pool size for reranked retrieval.
pub const INITIAL_K: i32 = 50;

/// Default post-rerank result count. Must never exceed `INITIAL_K`.
pub const FINAL_K: i32 = 10;

// =============================================================================
// MULTI-QUERY
// =============================================================================

/// Minimum number of query variants.
pub const NUM_QUERIES_MIN: i32 = 2;

/// Maximum number of query variants. Each variant costs one retrieval pass.
pub const NUM_QUERIES_MAX: i32 = 10;

/// Default number of query variants.
pub const NUM_QUERIES: i32 = 3;

// =============================================================================
// METADATA FILTERING
// =============================================================================

/// Maximum number of metadata filter key/value pairs per strategy.
pub const METADATA_FILTERS_MAX: usize = 16;

/// Default candidate-pool multiplier when post-filtering falls short.
pub const FALLBACK_MULTIPLIER: f64 = 3.0;

// =============================================================================
// RERANKING
// =============================================================================

/// Default weight applied to each rerank signal (similarity, recency,
/// length, metadata). Signals are balanced until tuned.
pub const RERANK_WEIGHT: f64 = 0.25;

// =============================================================================
// HYBRID COMPOSITION
// =============================================================================

/// Minimum number of sub-strategies in a hybrid. A hybrid of one member is
/// just that member with extra steps.
pub const HYBRID_MEMBERS_MIN: usize = 2;

/// Default weight for a hybrid member.
pub const HYBRID_MEMBER_WEIGHT: f64 = 1.0;

// =============================================================================
// EMBEDDING
// =============================================================================

/// Minimum embedding vector dimension.
pub const DIMENSION_MIN: i32 = 1;

/// Maximum embedding vector dimension. Covers every model currently served
/// (largest known is 4096; headroom for matryoshka-style wide models).
pub const DIMENSION_MAX: i32 = 8192;

/// Default embedding dimension (nomic-embed-text).
pub const DIMENSION: i32 = 768;

/// Default embedding model name (Ollama).
pub const EMBED_MODEL: &str = "nomic-embed-text";

/// Model selector value that switches to a caller-supplied identifier.
pub const CUSTOM_MODEL: &str = "custom";

/// Spacing between derived embedding priorities. Leaves room to reorder
/// without renumbering existing entries.
pub const PRIORITY_STEP: i32 = 10;
