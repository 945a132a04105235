//! Structured logging field name constants for stratify.
//!
//! Both crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | WARN  | Invariant safety net fired (default pointer force-reassigned) |
//! | INFO  | Committed collection state changes |
//! | DEBUG | Decision points: resolver branches, validation outcomes |
//! | TRACE | Per-member iteration during hybrid validation |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Component within the engine.
/// Values: "registry", "validate", "hybrid", "resolver"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "add_retrieval", "edit_retrieval", "delete_strategy"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Owning database record UUID.
pub const DATABASE_ID: &str = "database_id";

/// Strategy name being operated on. Names are not secret; configs may be,
/// so configs are never logged wholesale.
pub const STRATEGY_NAME: &str = "strategy_name";

/// Strategy kind: "embedding" or "retrieval".
pub const STRATEGY_KIND: &str = "strategy_kind";

/// Strategy type tag, e.g. "basic_similarity".
pub const STRATEGY_TYPE: &str = "strategy_type";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Number of strategies in the collection after the operation.
pub const COLLECTION_SIZE: &str = "collection_size";

/// Number of accumulated validation errors in a rejection.
pub const ERROR_COUNT: &str = "error_count";

/// Name the default pointer resolved to.
pub const DEFAULT_NAME: &str = "default_name";
