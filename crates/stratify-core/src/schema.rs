//! Static catalog of strategy types.
//!
//! For each type this module provides the canonical default parameters.
//! The numeric bounds that make up each type's validation rule set live in
//! [`crate::defaults`]; the validators in the engine crate consume both.

use crate::embedding::EmbeddingConfig;
use crate::retrieval::{
    BasicSimilarityConfig, HybridUniversalConfig, LeafRetrievalConfig, LeafRetrievalType,
    MetadataFilteredConfig, MultiQueryConfig, RerankedConfig, RetrievalConfig,
    RetrievalStrategyType,
};

/// Every retrieval strategy type, in catalog order.
pub const RETRIEVAL_TYPES: &[RetrievalStrategyType] = &[
    RetrievalStrategyType::BasicSimilarity,
    RetrievalStrategyType::MetadataFiltered,
    RetrievalStrategyType::MultiQuery,
    RetrievalStrategyType::Reranked,
    RetrievalStrategyType::HybridUniversal,
];

/// Every type usable as a hybrid member.
pub const LEAF_TYPES: &[LeafRetrievalType] = &[
    LeafRetrievalType::BasicSimilarity,
    LeafRetrievalType::MetadataFiltered,
    LeafRetrievalType::MultiQuery,
    LeafRetrievalType::Reranked,
];

/// Canonical default config for a retrieval strategy type.
///
/// The hybrid default has an empty member list; a bare default hybrid is
/// intentionally not valid until the caller supplies members.
pub fn default_retrieval_config(strategy_type: RetrievalStrategyType) -> RetrievalConfig {
    match strategy_type {
        RetrievalStrategyType::BasicSimilarity => {
            RetrievalConfig::BasicSimilarity(BasicSimilarityConfig::default())
        }
        RetrievalStrategyType::MetadataFiltered => {
            RetrievalConfig::MetadataFiltered(MetadataFilteredConfig::default())
        }
        RetrievalStrategyType::MultiQuery => {
            RetrievalConfig::MultiQuery(MultiQueryConfig::default())
        }
        RetrievalStrategyType::Reranked => RetrievalConfig::Reranked(RerankedConfig::default()),
        RetrievalStrategyType::HybridUniversal => {
            RetrievalConfig::HybridUniversal(HybridUniversalConfig::default())
        }
    }
}

/// Canonical default config for a hybrid member type.
pub fn default_leaf_config(leaf_type: LeafRetrievalType) -> LeafRetrievalConfig {
    match leaf_type {
        LeafRetrievalType::BasicSimilarity => {
            LeafRetrievalConfig::BasicSimilarity(BasicSimilarityConfig::default())
        }
        LeafRetrievalType::MetadataFiltered => {
            LeafRetrievalConfig::MetadataFiltered(MetadataFilteredConfig::default())
        }
        LeafRetrievalType::MultiQuery => {
            LeafRetrievalConfig::MultiQuery(MultiQueryConfig::default())
        }
        LeafRetrievalType::Reranked => LeafRetrievalConfig::Reranked(RerankedConfig::default()),
    }
}

/// Canonical default embedding config (local Ollama).
pub fn default_embedding_config() -> EmbeddingConfig {
    EmbeddingConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;

    #[test]
    fn test_catalog_covers_all_types() {
        assert_eq!(RETRIEVAL_TYPES.len(), 5);
        assert_eq!(LEAF_TYPES.len(), 4);
    }

    #[test]
    fn test_default_config_tag_matches_requested_type() {
        for &ty in RETRIEVAL_TYPES {
            assert_eq!(default_retrieval_config(ty).strategy_type(), ty);
        }
        for &ty in LEAF_TYPES {
            assert_eq!(default_leaf_config(ty).strategy_type(), ty);
        }
    }

    #[test]
    fn test_default_hybrid_has_no_members() {
        match default_retrieval_config(RetrievalStrategyType::HybridUniversal) {
            RetrievalConfig::HybridUniversal(config) => {
                assert!(config.members.is_empty());
                assert_eq!(config.final_k, defaults::FINAL_K);
            }
            _ => panic!("Expected hybrid config"),
        }
    }

    #[test]
    fn test_default_embedding_is_local() {
        let config = default_embedding_config();
        assert!(config.provider.is_local());
        assert!(config.api_key.is_none());
    }
}
