//! Collaborator traits for stratify abstractions.
//!
//! The engine itself is pure and synchronous; durable storage and secret
//! sealing are external collaborators reached through these seams, enabling
//! pluggable backends and testability.

use async_trait::async_trait;
use uuid::Uuid;

use crate::collection::CollectionUpdate;
use crate::embedding::EmbeddingStrategy;
use crate::error::Result;
use crate::retrieval::RetrievalStrategy;

/// External credential collaborator: seals a plaintext secret into an
/// opaque string before it is ever persisted.
///
/// The engine stores the returned string verbatim in `config.api_key` and
/// never attempts to unseal it. Implementations must not log the plaintext.
pub trait CredentialSealer: Send + Sync {
    fn seal(&self, plaintext: &str) -> Result<String>;
}

/// Persistence collaborator for a database's strategy collections.
///
/// Each persist call is an atomic black box: it receives the complete new
/// collection state (plus the previous name on renames, so downstream
/// references can be rewritten) and either fully applies it or fails.
/// Serializing concurrent writers is this collaborator's concern, not the
/// engine's.
#[async_trait]
pub trait StrategyStore: Send + Sync {
    /// Load the retrieval collection for a database.
    async fn load_retrieval(&self, database: Uuid) -> Result<crate::RetrievalCollection>;

    /// Load the embedding collection for a database.
    async fn load_embedding(&self, database: Uuid) -> Result<crate::EmbeddingCollection>;

    /// Persist a new retrieval collection state.
    async fn persist_retrieval(
        &self,
        database: Uuid,
        update: &CollectionUpdate<RetrievalStrategy>,
    ) -> Result<()>;

    /// Persist a new embedding collection state.
    async fn persist_embedding(
        &self,
        database: Uuid,
        update: &CollectionUpdate<EmbeddingStrategy>,
    ) -> Result<()>;
}
