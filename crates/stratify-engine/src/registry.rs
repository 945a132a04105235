//! Strategy registry façade.
//!
//! Holds the in-memory view of one database's strategy collections and
//! orchestrates name validation, per-type config validation, hybrid
//! composition, and default resolution. Every operation is
//! validate-then-commit: either the entire proposed collection state is
//! valid and replaces the current one, or nothing changes and the full
//! error list is returned.
//!
//! Retrieval strategy names use the identifier charset; embedding strategy
//! names are user-facing profile names and allow spaces.

use tracing::{debug, info, instrument};
use uuid::Uuid;

use stratify_core::defaults::PRIORITY_STEP;
use stratify_core::{
    check_collision, validate_name, AddEmbeddingRequest, AddRetrievalRequest, CollectionUpdate,
    CredentialSealer, DeleteStrategyRequest, EditEmbeddingRequest, EditRetrievalRequest,
    EmbeddingCollection, EmbeddingConfig, EmbeddingStrategy, Error, NameCharset, Named, Result,
    RetrievalCollection, RetrievalStrategy, SealedCredential, StrategyCollection, StrategyKind,
    ValidationError,
};

use crate::resolver::{resolve_default, DefaultOp};
use crate::validate::{parse_and_validate_retrieval, validate_embedding_request};

/// The committed outcome of a registry operation, ready for the
/// persistence collaborator.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "kind", content = "update", rename_all = "lowercase")]
pub enum RegistryUpdate {
    Retrieval(CollectionUpdate<RetrievalStrategy>),
    Embedding(CollectionUpdate<EmbeddingStrategy>),
}

/// In-memory view of one database's strategy collections.
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    database: Uuid,
    retrieval: RetrievalCollection,
    embedding: EmbeddingCollection,
}

impl StrategyRegistry {
    /// Fresh registry with empty collections.
    pub fn new(database: Uuid) -> Self {
        Self {
            database,
            retrieval: StrategyCollection::new(),
            embedding: StrategyCollection::new(),
        }
    }

    /// Registry over collections loaded from the persistence collaborator.
    pub fn from_snapshot(
        database: Uuid,
        retrieval: RetrievalCollection,
        embedding: EmbeddingCollection,
    ) -> Self {
        Self {
            database,
            retrieval,
            embedding,
        }
    }

    pub fn database(&self) -> Uuid {
        self.database
    }

    pub fn retrieval(&self) -> &RetrievalCollection {
        &self.retrieval
    }

    pub fn embedding(&self) -> &EmbeddingCollection {
        &self.embedding
    }

    // =========================================================================
    // RETRIEVAL OPERATIONS
    // =========================================================================

    /// Add a retrieval strategy.
    #[instrument(skip_all, fields(op = "add_retrieval", database_id = %self.database, strategy_name = %req.name))]
    pub fn add_retrieval(
        &mut self,
        req: AddRetrievalRequest,
    ) -> Result<CollectionUpdate<RetrievalStrategy>> {
        let mut errors = validate_name(&req.name, NameCharset::Identifier);
        errors.extend(check_collision(&req.name, self.retrieval.names(), None));

        let config = match parse_and_validate_retrieval(req.strategy_type, &req.config) {
            Ok(config) => Some(config),
            Err(config_errors) => {
                errors.extend(config_errors);
                None
            }
        };

        let config = match (config, errors.is_empty()) {
            (Some(config), true) => config,
            _ => return Err(reject(errors)),
        };

        let mut strategies = self.retrieval.strategies.clone();
        strategies.push(RetrievalStrategy {
            name: req.name.clone(),
            config,
        });
        let default_name = resolve_default(
            &strategies,
            self.retrieval.default_name.as_deref(),
            DefaultOp::Added {
                name: &req.name,
                make_default: req.make_default,
            },
        );

        self.retrieval = StrategyCollection {
            strategies,
            default_name,
        };
        info!(
            collection_size = self.retrieval.len(),
            default_name = self.retrieval.default_name.as_deref().unwrap_or(""),
            "retrieval strategy added"
        );
        Ok(CollectionUpdate::new(&self.retrieval))
    }

    /// Edit a retrieval strategy. The strategy type is immutable.
    #[instrument(skip_all, fields(op = "edit_retrieval", database_id = %self.database, strategy_name = %req.old_name))]
    pub fn edit_retrieval(
        &mut self,
        req: EditRetrievalRequest,
    ) -> Result<CollectionUpdate<RetrievalStrategy>> {
        let position = self
            .retrieval
            .position(&req.old_name)
            .ok_or_else(|| Error::StrategyNotFound(req.old_name.clone()))?;

        let mut errors = validate_name(&req.name, NameCharset::Identifier);
        errors.extend(check_collision(
            &req.name,
            self.retrieval.names(),
            Some(&req.old_name),
        ));

        if self.retrieval.strategies[position].config.strategy_type() != req.strategy_type {
            errors.push(ValidationError::Config(
                "strategy type is immutable after creation".to_string(),
            ));
        }

        let config = match parse_and_validate_retrieval(req.strategy_type, &req.config) {
            Ok(config) => Some(config),
            Err(config_errors) => {
                errors.extend(config_errors);
                None
            }
        };

        let config = match (config, errors.is_empty()) {
            (Some(config), true) => config,
            _ => return Err(reject(errors)),
        };

        let mut strategies = self.retrieval.strategies.clone();
        strategies[position] = RetrievalStrategy {
            name: req.name.clone(),
            config,
        };
        let default_name = resolve_edit_default(
            &strategies,
            self.retrieval.default_name.as_deref(),
            &req.old_name,
            &req.name,
            req.make_default,
        );

        self.retrieval = StrategyCollection {
            strategies,
            default_name,
        };
        info!(
            collection_size = self.retrieval.len(),
            default_name = self.retrieval.default_name.as_deref().unwrap_or(""),
            "retrieval strategy updated"
        );
        Ok(finish_update(&self.retrieval, &req.old_name, &req.name))
    }

    // =========================================================================
    // EMBEDDING OPERATIONS
    // =========================================================================

    /// Add an embedding strategy. A plaintext API key in the request is
    /// sealed through the credential collaborator before anything is
    /// stored; priority is derived from the current collection size.
    #[instrument(skip_all, fields(op = "add_embedding", database_id = %self.database, strategy_name = %req.name))]
    pub fn add_embedding(
        &mut self,
        req: AddEmbeddingRequest,
        sealer: &dyn CredentialSealer,
    ) -> Result<CollectionUpdate<EmbeddingStrategy>> {
        let mut errors = validate_name(&req.name, NameCharset::Display);
        errors.extend(check_collision(&req.name, self.embedding.names(), None));
        errors.extend(validate_embedding_request(&req.config, false));

        if !errors.is_empty() {
            return Err(reject(errors));
        }

        let api_key = seal_key(&req.config, None, sealer)?;
        let config = build_embedding_config(&req.config, api_key);
        let priority = self.embedding.len() as i32 * PRIORITY_STEP;

        let mut strategies = self.embedding.strategies.clone();
        strategies.push(EmbeddingStrategy {
            name: req.name.clone(),
            description: req.description,
            priority,
            config,
        });
        let default_name = resolve_default(
            &strategies,
            self.embedding.default_name.as_deref(),
            DefaultOp::Added {
                name: &req.name,
                make_default: req.make_default,
            },
        );

        self.embedding = StrategyCollection {
            strategies,
            default_name,
        };
        info!(
            collection_size = self.embedding.len(),
            priority,
            default_name = self.embedding.default_name.as_deref().unwrap_or(""),
            "embedding strategy added"
        );
        Ok(CollectionUpdate::new(&self.embedding))
    }

    /// Edit an embedding strategy. The provider is immutable; a missing
    /// plaintext key keeps the stored sealed key; priority is preserved.
    #[instrument(skip_all, fields(op = "edit_embedding", database_id = %self.database, strategy_name = %req.old_name))]
    pub fn edit_embedding(
        &mut self,
        req: EditEmbeddingRequest,
        sealer: &dyn CredentialSealer,
    ) -> Result<CollectionUpdate<EmbeddingStrategy>> {
        let position = self
            .embedding
            .position(&req.old_name)
            .ok_or_else(|| Error::StrategyNotFound(req.old_name.clone()))?;
        let stored = &self.embedding.strategies[position];

        let mut errors = validate_name(&req.name, NameCharset::Display);
        errors.extend(check_collision(
            &req.name,
            self.embedding.names(),
            Some(&req.old_name),
        ));

        if stored.config.provider != req.config.provider {
            errors.push(ValidationError::Config(
                "embedding provider is immutable after creation".to_string(),
            ));
        }

        let has_sealed_key = stored.config.api_key.is_some();
        errors.extend(validate_embedding_request(&req.config, has_sealed_key));

        if !errors.is_empty() {
            return Err(reject(errors));
        }

        let api_key = seal_key(&req.config, stored.config.api_key.clone(), sealer)?;
        let config = build_embedding_config(&req.config, api_key);
        let priority = stored.priority;

        let mut strategies = self.embedding.strategies.clone();
        strategies[position] = EmbeddingStrategy {
            name: req.name.clone(),
            description: req.description,
            priority,
            config,
        };
        let default_name = resolve_edit_default(
            &strategies,
            self.embedding.default_name.as_deref(),
            &req.old_name,
            &req.name,
            req.make_default,
        );

        self.embedding = StrategyCollection {
            strategies,
            default_name,
        };
        info!(
            collection_size = self.embedding.len(),
            default_name = self.embedding.default_name.as_deref().unwrap_or(""),
            "embedding strategy updated"
        );
        Ok(finish_update(&self.embedding, &req.old_name, &req.name))
    }

    // =========================================================================
    // KIND-GENERIC OPERATIONS
    // =========================================================================

    /// Delete a strategy by name. Deleting the current default reassigns
    /// the default to the first remaining strategy.
    #[instrument(skip_all, fields(op = "delete_strategy", database_id = %self.database, strategy_kind = %kind, strategy_name = %req.name))]
    pub fn delete_strategy(
        &mut self,
        kind: StrategyKind,
        req: DeleteStrategyRequest,
    ) -> Result<RegistryUpdate> {
        match kind {
            StrategyKind::Retrieval => {
                self.retrieval = delete_from(&self.retrieval, &req.name)?;
                info!(
                    collection_size = self.retrieval.len(),
                    "retrieval strategy deleted"
                );
                Ok(RegistryUpdate::Retrieval(CollectionUpdate::new(
                    &self.retrieval,
                )))
            }
            StrategyKind::Embedding => {
                self.embedding = delete_from(&self.embedding, &req.name)?;
                info!(
                    collection_size = self.embedding.len(),
                    "embedding strategy deleted"
                );
                Ok(RegistryUpdate::Embedding(CollectionUpdate::new(
                    &self.embedding,
                )))
            }
        }
    }

    /// Mark an existing strategy as the default.
    #[instrument(skip_all, fields(op = "set_default", database_id = %self.database, strategy_kind = %kind, strategy_name = %name))]
    pub fn set_default(&mut self, kind: StrategyKind, name: &str) -> Result<RegistryUpdate> {
        match kind {
            StrategyKind::Retrieval => {
                self.retrieval =
                    retarget_default(&self.retrieval, name, DefaultOp::SetDefault { name })?;
                Ok(RegistryUpdate::Retrieval(CollectionUpdate::new(
                    &self.retrieval,
                )))
            }
            StrategyKind::Embedding => {
                self.embedding =
                    retarget_default(&self.embedding, name, DefaultOp::SetDefault { name })?;
                Ok(RegistryUpdate::Embedding(CollectionUpdate::new(
                    &self.embedding,
                )))
            }
        }
    }

    /// Uncheck default status on a strategy. The default moves to the
    /// first other strategy, or stays when there is no alternative.
    #[instrument(skip_all, fields(op = "clear_default", database_id = %self.database, strategy_kind = %kind, strategy_name = %name))]
    pub fn clear_default(&mut self, kind: StrategyKind, name: &str) -> Result<RegistryUpdate> {
        match kind {
            StrategyKind::Retrieval => {
                self.retrieval =
                    retarget_default(&self.retrieval, name, DefaultOp::ClearDefault { name })?;
                Ok(RegistryUpdate::Retrieval(CollectionUpdate::new(
                    &self.retrieval,
                )))
            }
            StrategyKind::Embedding => {
                self.embedding =
                    retarget_default(&self.embedding, name, DefaultOp::ClearDefault { name })?;
                Ok(RegistryUpdate::Embedding(CollectionUpdate::new(
                    &self.embedding,
                )))
            }
        }
    }
}

fn reject(errors: Vec<ValidationError>) -> Error {
    debug!(error_count = errors.len(), "operation rejected");
    Error::Validation(errors)
}

/// Rename-aware default resolution for edit operations: the pointer first
/// follows the rename, then the submitted checkbox state is applied.
fn resolve_edit_default<S: Named>(
    strategies: &[S],
    current: Option<&str>,
    old_name: &str,
    new_name: &str,
    make_default: bool,
) -> Option<String> {
    let after_rename = resolve_default(
        strategies,
        current,
        DefaultOp::Renamed {
            old_name,
            new_name,
        },
    );
    let is_default = after_rename
        .as_deref()
        .map(|d| stratify_core::names_equal(d, new_name))
        .unwrap_or(false);

    if make_default {
        resolve_default(strategies, after_rename.as_deref(), DefaultOp::SetDefault {
            name: new_name,
        })
    } else if is_default {
        // The user unchecked default on the current default.
        resolve_default(strategies, after_rename.as_deref(), DefaultOp::ClearDefault {
            name: new_name,
        })
    } else {
        after_rename
    }
}

fn finish_update<S: Clone + Named>(
    collection: &StrategyCollection<S>,
    old_name: &str,
    new_name: &str,
) -> CollectionUpdate<S> {
    if old_name == new_name {
        CollectionUpdate::new(collection)
    } else {
        CollectionUpdate::renamed_from(collection, old_name)
    }
}

fn delete_from<S: Clone + Named>(
    collection: &StrategyCollection<S>,
    name: &str,
) -> Result<StrategyCollection<S>> {
    let position = collection
        .position(name)
        .ok_or_else(|| Error::StrategyNotFound(name.to_string()))?;

    let mut strategies = collection.strategies.clone();
    strategies.remove(position);
    let default_name = resolve_default(
        &strategies,
        collection.default_name.as_deref(),
        DefaultOp::Deleted { name },
    );

    Ok(StrategyCollection {
        strategies,
        default_name,
    })
}

fn retarget_default<S: Clone + Named>(
    collection: &StrategyCollection<S>,
    name: &str,
    op: DefaultOp<'_>,
) -> Result<StrategyCollection<S>> {
    if !collection.contains_name(name) {
        return Err(Error::StrategyNotFound(name.to_string()));
    }

    let default_name = resolve_default(
        &collection.strategies,
        collection.default_name.as_deref(),
        op,
    );

    Ok(StrategyCollection {
        strategies: collection.strategies.clone(),
        default_name,
    })
}

/// Seal the request's plaintext key when the provider requires one,
/// falling back to the previously stored sealed key on edits. Plaintext
/// supplied for a local provider is dropped, never stored.
fn seal_key(
    request: &stratify_core::EmbeddingConfigRequest,
    existing: Option<SealedCredential>,
    sealer: &dyn CredentialSealer,
) -> Result<Option<SealedCredential>> {
    if !request.provider.requires_api_key() {
        return Ok(None);
    }
    match request.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        Some(plaintext) => Ok(Some(SealedCredential(sealer.seal(plaintext)?))),
        None => Ok(existing),
    }
}

fn build_embedding_config(
    request: &stratify_core::EmbeddingConfigRequest,
    api_key: Option<SealedCredential>,
) -> EmbeddingConfig {
    EmbeddingConfig {
        provider: request.provider,
        model: request.model.clone(),
        custom_model: request.custom_model.clone(),
        dimension: request.dimension,
        api_key,
        azure_deployment: request.azure_deployment.clone(),
        azure_endpoint: request.azure_endpoint.clone(),
        google_project_id: request.google_project_id.clone(),
        google_region: request.google_region.clone(),
        aws_region: request.aws_region.clone(),
    }
}
