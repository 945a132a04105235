//! # stratify-core
//!
//! Core types, constants, and collaborator traits for the stratify strategy
//! configuration engine.
//!
//! This crate provides the data model (strategy types, typed configs,
//! collections), the name validator, the schema catalog, and the trait
//! seams the engine crate builds on.

pub mod collection;
pub mod defaults;
pub mod embedding;
pub mod error;
pub mod logging;
pub mod name;
pub mod retrieval;
pub mod schema;
pub mod traits;

// Re-export commonly used types at crate root
pub use collection::{CollectionUpdate, Named, StrategyCollection, StrategyKind};
pub use embedding::{
    is_valid_custom_model_id, AddEmbeddingRequest, EditEmbeddingRequest, EmbeddingConfig,
    EmbeddingConfigRequest, EmbeddingProvider, EmbeddingStrategy, SealedCredential,
};
pub use error::{Error, Result, ValidationError};
pub use name::{check_collision, names_equal, validate_name, NameCharset};
pub use retrieval::{
    AddRetrievalRequest, AggregationMethod, BasicSimilarityConfig, CombinationMethod,
    DeleteStrategyRequest, DistanceMetric, EditRetrievalRequest, FilterEntry, FilterMode,
    HybridMember, HybridUniversalConfig, LeafRetrievalConfig, LeafRetrievalType,
    MetadataFilteredConfig, MultiQueryConfig, RerankedConfig, RetrievalConfig, RetrievalStrategy,
    RetrievalStrategyType,
};
pub use traits::{CredentialSealer, StrategyStore};

/// A database's retrieval strategy collection.
pub type RetrievalCollection = StrategyCollection<RetrievalStrategy>;

/// A database's embedding strategy collection.
pub type EmbeddingCollection = StrategyCollection<EmbeddingStrategy>;
