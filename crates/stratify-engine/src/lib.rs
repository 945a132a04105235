//! # stratify-engine
//!
//! The decision logic of the stratify strategy configuration engine:
//! per-type validation, hybrid composition, default-pointer resolution,
//! and the registry façade that ties them together.
//!
//! The engine is synchronous and pure: every operation reads a collection
//! snapshot, computes a new one, and hands it back for persistence by the
//! external collaborator. Concurrency control lives with the caller.

pub mod hybrid;
pub mod registry;
pub mod resolver;
pub mod validate;

pub use hybrid::{compose, HybridConfigRequest, HybridMemberRequest};
pub use registry::{RegistryUpdate, StrategyRegistry};
pub use resolver::{resolve_default, DefaultOp};
pub use validate::{
    parse_and_validate_retrieval, validate_embedding_config, validate_embedding_request,
    validate_leaf, validate_retrieval,
};
