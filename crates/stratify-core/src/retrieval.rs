//! Retrieval strategy types and per-type configuration.
//!
//! Every strategy type gets its own strongly typed config struct, and the
//! type tag lives in the tagged unions [`RetrievalConfig`] and
//! [`LeafRetrievalConfig`]. Hybrid members use the leaf union, so a hybrid
//! can never nest another hybrid — the self-reference is unrepresentable
//! rather than merely checked.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::collection::Named;
use crate::defaults;

// =============================================================================
// TYPE TAGS
// =============================================================================

/// Closed set of retrieval strategy types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStrategyType {
    BasicSimilarity,
    MetadataFiltered,
    MultiQuery,
    Reranked,
    HybridUniversal,
}

impl std::fmt::Display for RetrievalStrategyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BasicSimilarity => write!(f, "basic_similarity"),
            Self::MetadataFiltered => write!(f, "metadata_filtered"),
            Self::MultiQuery => write!(f, "multi_query"),
            Self::Reranked => write!(f, "reranked"),
            Self::HybridUniversal => write!(f, "hybrid_universal"),
        }
    }
}

impl std::str::FromStr for RetrievalStrategyType {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic_similarity" => Ok(Self::BasicSimilarity),
            "metadata_filtered" => Ok(Self::MetadataFiltered),
            "multi_query" => Ok(Self::MultiQuery),
            "reranked" => Ok(Self::Reranked),
            "hybrid_universal" => Ok(Self::HybridUniversal),
            _ => Err(format!("Invalid retrieval strategy type: {}", s)),
        }
    }
}

/// Strategy types allowed as hybrid members (everything but hybrid itself).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeafRetrievalType {
    BasicSimilarity,
    MetadataFiltered,
    MultiQuery,
    Reranked,
}

impl From<LeafRetrievalType> for RetrievalStrategyType {
    fn from(t: LeafRetrievalType) -> Self {
        match t {
            LeafRetrievalType::BasicSimilarity => Self::BasicSimilarity,
            LeafRetrievalType::MetadataFiltered => Self::MetadataFiltered,
            LeafRetrievalType::MultiQuery => Self::MultiQuery,
            LeafRetrievalType::Reranked => Self::Reranked,
        }
    }
}

impl TryFrom<RetrievalStrategyType> for LeafRetrievalType {
    type Error = String;
    fn try_from(t: RetrievalStrategyType) -> std::result::Result<Self, Self::Error> {
        match t {
            RetrievalStrategyType::BasicSimilarity => Ok(Self::BasicSimilarity),
            RetrievalStrategyType::MetadataFiltered => Ok(Self::MetadataFiltered),
            RetrievalStrategyType::MultiQuery => Ok(Self::MultiQuery),
            RetrievalStrategyType::Reranked => Ok(Self::Reranked),
            RetrievalStrategyType::HybridUniversal => {
                Err("hybrid strategies cannot nest other hybrids".to_string())
            }
        }
    }
}

// =============================================================================
// CLOSED PARAMETER ENUMS
// =============================================================================

/// Vector distance metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Cosine,
    Euclidean,
    Manhattan,
    Dot,
}

/// Whether metadata filters apply before or after vector search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    Pre,
    Post,
}

/// How multi-query results are merged into one ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMethod {
    Max,
    #[default]
    Mean,
    Weighted,
    ReciprocalRank,
}

/// How hybrid member rankings are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CombinationMethod {
    #[default]
    WeightedAverage,
    RankFusion,
    ScoreFusion,
}

// =============================================================================
// PER-TYPE CONFIGS
// =============================================================================

fn default_top_k() -> i32 {
    defaults::TOP_K
}

fn default_fallback_multiplier() -> f64 {
    defaults::FALLBACK_MULTIPLIER
}

fn default_num_queries() -> i32 {
    defaults::NUM_QUERIES
}

fn default_initial_k() -> i32 {
    defaults::INITIAL_K
}

fn default_final_k() -> i32 {
    defaults::FINAL_K
}

fn default_rerank_weight() -> f64 {
    defaults::RERANK_WEIGHT
}

fn default_true() -> bool {
    true
}

fn default_member_weight() -> f64 {
    defaults::HYBRID_MEMBER_WEIGHT
}

/// Plain top-k vector similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BasicSimilarityConfig {
    #[serde(default = "default_top_k")]
    pub top_k: i32,
    /// Minimum similarity for a hit to be returned. None = no cutoff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f64>,
    #[serde(default)]
    pub distance_metric: DistanceMetric,
}

impl Default for BasicSimilarityConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::TOP_K,
            score_threshold: None,
            distance_metric: DistanceMetric::Cosine,
        }
    }
}

/// One metadata filter predicate (exact key/value match).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FilterEntry {
    pub key: String,
    pub value: String,
}

/// Similarity search constrained by document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetadataFilteredConfig {
    #[serde(default = "default_top_k")]
    pub top_k: i32,
    #[serde(default)]
    pub filter_mode: FilterMode,
    /// Candidate-pool multiplier used when post-filtering thins results.
    #[serde(default = "default_fallback_multiplier")]
    pub fallback_multiplier: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterEntry>,
}

impl Default for MetadataFilteredConfig {
    fn default() -> Self {
        Self {
            top_k: defaults::TOP_K,
            filter_mode: FilterMode::Pre,
            fallback_multiplier: defaults::FALLBACK_MULTIPLIER,
            filters: Vec::new(),
        }
    }
}

/// Query expansion: run several reformulations, aggregate the rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MultiQueryConfig {
    #[serde(default = "default_num_queries")]
    pub num_queries: i32,
    #[serde(default = "default_top_k")]
    pub top_k: i32,
    #[serde(default)]
    pub aggregation_method: AggregationMethod,
    /// Per-query weights. When None, a uniform list of `num_queries`
    /// entries is generated at validation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_weights: Option<Vec<f64>>,
}

impl Default for MultiQueryConfig {
    fn default() -> Self {
        Self {
            num_queries: defaults::NUM_QUERIES,
            top_k: defaults::TOP_K,
            aggregation_method: AggregationMethod::Mean,
            query_weights: None,
        }
    }
}

/// Two-stage retrieval: fetch `initial_k` candidates, rerank, keep `final_k`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RerankedConfig {
    #[serde(default = "default_initial_k")]
    pub initial_k: i32,
    #[serde(default = "default_final_k")]
    pub final_k: i32,
    #[serde(default = "default_rerank_weight")]
    pub similarity_weight: f64,
    #[serde(default = "default_rerank_weight")]
    pub recency_weight: f64,
    #[serde(default = "default_rerank_weight")]
    pub length_weight: f64,
    #[serde(default = "default_rerank_weight")]
    pub metadata_weight: f64,
    #[serde(default = "default_true")]
    pub normalize_scores: bool,
}

impl Default for RerankedConfig {
    fn default() -> Self {
        Self {
            initial_k: defaults::INITIAL_K,
            final_k: defaults::FINAL_K,
            similarity_weight: defaults::RERANK_WEIGHT,
            recency_weight: defaults::RERANK_WEIGHT,
            length_weight: defaults::RERANK_WEIGHT,
            metadata_weight: defaults::RERANK_WEIGHT,
            normalize_scores: true,
        }
    }
}

/// One weighted member of a hybrid strategy. Owned by the parent hybrid;
/// not separately addressable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HybridMember {
    #[serde(default = "default_member_weight")]
    pub weight: f64,
    #[serde(flatten)]
    pub config: LeafRetrievalConfig,
}

/// Weighted combination of non-hybrid strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HybridUniversalConfig {
    #[serde(default)]
    pub combination_method: CombinationMethod,
    #[serde(default = "default_final_k")]
    pub final_k: i32,
    pub members: Vec<HybridMember>,
}

impl Default for HybridUniversalConfig {
    fn default() -> Self {
        Self {
            combination_method: CombinationMethod::WeightedAverage,
            final_k: defaults::FINAL_K,
            members: Vec::new(),
        }
    }
}

// =============================================================================
// TAGGED UNIONS
// =============================================================================

/// A retrieval strategy's typed configuration.
///
/// Wire shape: `{ "type": "basic_similarity", "config": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum RetrievalConfig {
    BasicSimilarity(BasicSimilarityConfig),
    MetadataFiltered(MetadataFilteredConfig),
    MultiQuery(MultiQueryConfig),
    Reranked(RerankedConfig),
    HybridUniversal(HybridUniversalConfig),
}

impl RetrievalConfig {
    /// The type tag. Immutable for the life of a strategy.
    pub fn strategy_type(&self) -> RetrievalStrategyType {
        match self {
            Self::BasicSimilarity(_) => RetrievalStrategyType::BasicSimilarity,
            Self::MetadataFiltered(_) => RetrievalStrategyType::MetadataFiltered,
            Self::MultiQuery(_) => RetrievalStrategyType::MultiQuery,
            Self::Reranked(_) => RetrievalStrategyType::Reranked,
            Self::HybridUniversal(_) => RetrievalStrategyType::HybridUniversal,
        }
    }
}

/// Configuration union for hybrid members: every type except hybrid itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(tag = "type", content = "config", rename_all = "snake_case")]
pub enum LeafRetrievalConfig {
    BasicSimilarity(BasicSimilarityConfig),
    MetadataFiltered(MetadataFilteredConfig),
    MultiQuery(MultiQueryConfig),
    Reranked(RerankedConfig),
}

impl LeafRetrievalConfig {
    pub fn strategy_type(&self) -> LeafRetrievalType {
        match self {
            Self::BasicSimilarity(_) => LeafRetrievalType::BasicSimilarity,
            Self::MetadataFiltered(_) => LeafRetrievalType::MetadataFiltered,
            Self::MultiQuery(_) => LeafRetrievalType::MultiQuery,
            Self::Reranked(_) => LeafRetrievalType::Reranked,
        }
    }
}

// =============================================================================
// STRATEGY AND REQUESTS
// =============================================================================

/// A named retrieval strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RetrievalStrategy {
    pub name: String,
    #[serde(flatten)]
    pub config: RetrievalConfig,
}

impl Named for RetrievalStrategy {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Request to add a retrieval strategy.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddRetrievalRequest {
    pub name: String,
    pub strategy_type: RetrievalStrategyType,
    /// Raw per-type parameters. `null`/missing fields fall back to the
    /// type's canonical defaults.
    #[serde(default)]
    pub config: JsonValue,
    #[serde(default)]
    pub make_default: bool,
    /// Owning database record.
    pub database: Uuid,
}

/// Request to edit a retrieval strategy. `strategy_type` must match the
/// stored strategy; the type tag is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EditRetrievalRequest {
    /// Current name of the strategy being edited.
    pub old_name: String,
    /// New name (may equal `old_name`).
    pub name: String,
    pub strategy_type: RetrievalStrategyType,
    #[serde(default)]
    pub config: JsonValue,
    /// Default checkbox state as submitted. Unchecking the current default
    /// reassigns the default to the first other strategy.
    #[serde(default)]
    pub make_default: bool,
    pub database: Uuid,
}

/// Request to delete a strategy by name.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteStrategyRequest {
    pub name: String,
    pub database: Uuid,
}
