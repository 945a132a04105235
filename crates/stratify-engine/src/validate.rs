//! Per-type strategy validation.
//!
//! Every check appends to an error list instead of returning early, so the
//! caller gets every violated rule in one pass. The only normalization
//! performed here is filling an absent MultiQuery weight list with a
//! uniform one; everything else is validate-only.

use serde_json::Value as JsonValue;
use tracing::trace;

use stratify_core::defaults;
use stratify_core::embedding::is_valid_custom_model_id;
use stratify_core::{
    BasicSimilarityConfig, EmbeddingConfig, EmbeddingConfigRequest, EmbeddingProvider,
    HybridUniversalConfig, LeafRetrievalConfig, MetadataFilteredConfig, MultiQueryConfig,
    RerankedConfig, RetrievalConfig, RetrievalStrategyType, ValidationError,
};

use crate::hybrid;

/// Parse a raw config payload into the typed config for `strategy_type`,
/// then validate it. A `null` payload takes the type's canonical defaults.
///
/// Returns the validated (and normalized) config, or every accumulated
/// violation.
pub fn parse_and_validate_retrieval(
    strategy_type: RetrievalStrategyType,
    raw: &JsonValue,
) -> Result<RetrievalConfig, Vec<ValidationError>> {
    let config = parse_retrieval_config(strategy_type, raw)?;
    validate_retrieval(config)
}

/// Parse without validating. Hybrid payloads go through the composer so
/// member configs may be omitted.
fn parse_retrieval_config(
    strategy_type: RetrievalStrategyType,
    raw: &JsonValue,
) -> Result<RetrievalConfig, Vec<ValidationError>> {
    if raw.is_null() {
        return Ok(stratify_core::schema::default_retrieval_config(
            strategy_type,
        ));
    }

    match strategy_type {
        RetrievalStrategyType::HybridUniversal => {
            hybrid::parse_hybrid_config(raw).map(RetrievalConfig::HybridUniversal)
        }
        RetrievalStrategyType::BasicSimilarity => parse_typed::<BasicSimilarityConfig>(raw)
            .map(RetrievalConfig::BasicSimilarity),
        RetrievalStrategyType::MetadataFiltered => parse_typed::<MetadataFilteredConfig>(raw)
            .map(RetrievalConfig::MetadataFiltered),
        RetrievalStrategyType::MultiQuery => {
            parse_typed::<MultiQueryConfig>(raw).map(RetrievalConfig::MultiQuery)
        }
        RetrievalStrategyType::Reranked => {
            parse_typed::<RerankedConfig>(raw).map(RetrievalConfig::Reranked)
        }
    }
}

fn parse_typed<T: serde::de::DeserializeOwned>(
    raw: &JsonValue,
) -> Result<T, Vec<ValidationError>> {
    serde_json::from_value(raw.clone())
        .map_err(|e| vec![ValidationError::Config(format!("malformed config: {}", e))])
}

/// Validate a typed retrieval config, normalizing where documented.
pub fn validate_retrieval(
    config: RetrievalConfig,
) -> Result<RetrievalConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let config = match config {
        RetrievalConfig::BasicSimilarity(c) => {
            validate_basic_similarity(&c, &mut errors);
            RetrievalConfig::BasicSimilarity(c)
        }
        RetrievalConfig::MetadataFiltered(c) => {
            validate_metadata_filtered(&c, &mut errors);
            RetrievalConfig::MetadataFiltered(c)
        }
        RetrievalConfig::MultiQuery(mut c) => {
            validate_multi_query(&mut c, &mut errors);
            RetrievalConfig::MultiQuery(c)
        }
        RetrievalConfig::Reranked(c) => {
            validate_reranked(&c, &mut errors);
            RetrievalConfig::Reranked(c)
        }
        RetrievalConfig::HybridUniversal(mut c) => {
            validate_hybrid(&mut c, &mut errors);
            RetrievalConfig::HybridUniversal(c)
        }
    };
    if errors.is_empty() {
        Ok(config)
    } else {
        Err(errors)
    }
}

/// Validate a hybrid-member config in place (recursive entry point).
pub fn validate_leaf(config: &mut LeafRetrievalConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    match config {
        LeafRetrievalConfig::BasicSimilarity(c) => validate_basic_similarity(c, &mut errors),
        LeafRetrievalConfig::MetadataFiltered(c) => validate_metadata_filtered(c, &mut errors),
        LeafRetrievalConfig::MultiQuery(c) => validate_multi_query(c, &mut errors),
        LeafRetrievalConfig::Reranked(c) => validate_reranked(c, &mut errors),
    }
    errors
}

fn check_top_k(field: &str, value: i32, errors: &mut Vec<ValidationError>) {
    if !(defaults::TOP_K_MIN..=defaults::TOP_K_MAX).contains(&value) {
        errors.push(ValidationError::Config(format!(
            "{} must be between {} and {}",
            field,
            defaults::TOP_K_MIN,
            defaults::TOP_K_MAX
        )));
    }
}

fn validate_basic_similarity(config: &BasicSimilarityConfig, errors: &mut Vec<ValidationError>) {
    check_top_k("top_k", config.top_k, errors);
    if let Some(threshold) = config.score_threshold {
        if !(0.0..=1.0).contains(&threshold) {
            errors.push(ValidationError::Config(
                "score_threshold must be between 0 and 1".to_string(),
            ));
        }
    }
}

fn validate_metadata_filtered(config: &MetadataFilteredConfig, errors: &mut Vec<ValidationError>) {
    check_top_k("top_k", config.top_k, errors);

    if !config.fallback_multiplier.is_finite() || config.fallback_multiplier <= 0.0 {
        errors.push(ValidationError::Config(
            "fallback_multiplier must be a positive number".to_string(),
        ));
    }

    if config.filters.len() > defaults::METADATA_FILTERS_MAX {
        errors.push(ValidationError::Config(format!(
            "at most {} metadata filters are allowed",
            defaults::METADATA_FILTERS_MAX
        )));
    }

    for (i, entry) in config.filters.iter().enumerate() {
        if entry.key.trim().is_empty() {
            errors.push(ValidationError::Config(format!(
                "filter {}: key must not be empty",
                i + 1
            )));
        }
        if entry.key.chars().any(char::is_control) {
            errors.push(ValidationError::Config(format!(
                "filter {}: key contains control characters",
                i + 1
            )));
        }
        if entry.value.chars().any(char::is_control) {
            errors.push(ValidationError::Config(format!(
                "filter {}: value contains control characters",
                i + 1
            )));
        }
    }
}

fn validate_multi_query(config: &mut MultiQueryConfig, errors: &mut Vec<ValidationError>) {
    let num_queries_valid =
        (defaults::NUM_QUERIES_MIN..=defaults::NUM_QUERIES_MAX).contains(&config.num_queries);
    if !num_queries_valid {
        errors.push(ValidationError::Config(format!(
            "num_queries must be between {} and {}",
            defaults::NUM_QUERIES_MIN,
            defaults::NUM_QUERIES_MAX
        )));
    }

    check_top_k("top_k", config.top_k, errors);

    match &config.query_weights {
        Some(weights) => {
            // Mismatched lengths are rejected, never silently padded.
            if weights.len() != config.num_queries as usize {
                errors.push(ValidationError::Config(format!(
                    "query_weights has {} entries but num_queries is {}",
                    weights.len(),
                    config.num_queries
                )));
            }
            if weights.iter().any(|w| !w.is_finite()) {
                errors.push(ValidationError::Config(
                    "query_weights entries must be finite numbers".to_string(),
                ));
            }
        }
        None if num_queries_valid => {
            config.query_weights = Some(vec![1.0; config.num_queries as usize]);
        }
        None => {}
    }
}

fn validate_reranked(config: &RerankedConfig, errors: &mut Vec<ValidationError>) {
    check_top_k("initial_k", config.initial_k, errors);

    if config.final_k < defaults::TOP_K_MIN || config.final_k > config.initial_k {
        errors.push(ValidationError::Config(
            "Final K must be between 1 and Initial K".to_string(),
        ));
    }

    for (field, weight) in [
        ("similarity_weight", config.similarity_weight),
        ("recency_weight", config.recency_weight),
        ("length_weight", config.length_weight),
        ("metadata_weight", config.metadata_weight),
    ] {
        if !weight.is_finite() {
            errors.push(ValidationError::Config(format!(
                "{} must be a finite number",
                field
            )));
        }
    }
}

fn validate_hybrid(config: &mut HybridUniversalConfig, errors: &mut Vec<ValidationError>) {
    if config.members.len() < defaults::HYBRID_MEMBERS_MIN {
        errors.push(ValidationError::Structural(format!(
            "hybrid strategy requires at least {} sub-strategies",
            defaults::HYBRID_MEMBERS_MIN
        )));
    }

    if config.final_k < 1 {
        errors.push(ValidationError::Config(
            "final_k must be a positive integer".to_string(),
        ));
    }

    for (i, member) in config.members.iter_mut().enumerate() {
        trace!(member = i + 1, "validating hybrid member");
        if !member.weight.is_finite() {
            errors.push(ValidationError::Config(format!(
                "member {}: weight must be a finite number",
                i + 1
            )));
        }
        for err in validate_leaf(&mut member.config) {
            errors.push(prefixed(&format!("member {}", i + 1), err));
        }
    }
}

/// Re-wrap an error with a location prefix, preserving its category.
pub(crate) fn prefixed(prefix: &str, err: ValidationError) -> ValidationError {
    match err {
        ValidationError::Name(m) => ValidationError::Name(format!("{}: {}", prefix, m)),
        ValidationError::Config(m) => ValidationError::Config(format!("{}: {}", prefix, m)),
        ValidationError::Structural(m) => {
            ValidationError::Structural(format!("{}: {}", prefix, m))
        }
    }
}

// =============================================================================
// EMBEDDING VALIDATION
// =============================================================================

struct EmbeddingFields<'a> {
    provider: EmbeddingProvider,
    model: &'a str,
    custom_model: Option<&'a str>,
    dimension: i32,
    has_api_key: bool,
    azure_deployment: Option<&'a str>,
    azure_endpoint: Option<&'a str>,
    google_project_id: Option<&'a str>,
    google_region: Option<&'a str>,
    aws_region: Option<&'a str>,
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

fn check_embedding(fields: &EmbeddingFields<'_>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !(defaults::DIMENSION_MIN..=defaults::DIMENSION_MAX).contains(&fields.dimension) {
        errors.push(ValidationError::Config(format!(
            "dimension must be between {} and {}",
            defaults::DIMENSION_MIN,
            defaults::DIMENSION_MAX
        )));
    }

    if fields.model == defaults::CUSTOM_MODEL {
        match fields.custom_model {
            Some(id) if is_valid_custom_model_id(id) => {}
            Some(_) => errors.push(ValidationError::Config(
                "custom model identifier may only contain letters, digits, '/', '_', '.', '-'"
                    .to_string(),
            )),
            None => errors.push(ValidationError::Config(
                "custom model identifier is required when model is \"custom\"".to_string(),
            )),
        }
    }

    match fields.provider {
        EmbeddingProvider::AzureOpenAI => {
            if is_blank(fields.azure_deployment) {
                errors.push(ValidationError::Config(
                    "azure_deployment is required for the azure_openai provider".to_string(),
                ));
            }
            if is_blank(fields.azure_endpoint) {
                errors.push(ValidationError::Config(
                    "azure_endpoint is required for the azure_openai provider".to_string(),
                ));
            }
        }
        EmbeddingProvider::Google => {
            if is_blank(fields.google_project_id) {
                errors.push(ValidationError::Config(
                    "google_project_id is required for the google provider".to_string(),
                ));
            }
            if is_blank(fields.google_region) {
                errors.push(ValidationError::Config(
                    "google_region is required for the google provider".to_string(),
                ));
            }
        }
        EmbeddingProvider::Bedrock => {
            if is_blank(fields.aws_region) {
                errors.push(ValidationError::Config(
                    "aws_region is required for the bedrock provider".to_string(),
                ));
            }
        }
        EmbeddingProvider::Ollama | EmbeddingProvider::OpenAI | EmbeddingProvider::Cohere => {}
    }

    // Cloud providers authenticate with a key; Ollama must never demand one.
    if fields.provider.requires_api_key() && !fields.has_api_key {
        errors.push(ValidationError::Config(format!(
            "an API key is required for the {} provider",
            fields.provider
        )));
    }

    errors
}

/// Validate an embedding config request as submitted by the caller.
///
/// `has_sealed_key` is true when an edit can fall back to the already
/// stored sealed key, satisfying the key-presence rule without a new
/// plaintext key.
pub fn validate_embedding_request(
    config: &EmbeddingConfigRequest,
    has_sealed_key: bool,
) -> Vec<ValidationError> {
    check_embedding(&EmbeddingFields {
        provider: config.provider,
        model: &config.model,
        custom_model: config.custom_model.as_deref(),
        dimension: config.dimension,
        has_api_key: config.api_key.as_deref().map(|k| !k.trim().is_empty()).unwrap_or(false)
            || has_sealed_key,
        azure_deployment: config.azure_deployment.as_deref(),
        azure_endpoint: config.azure_endpoint.as_deref(),
        google_project_id: config.google_project_id.as_deref(),
        google_region: config.google_region.as_deref(),
        aws_region: config.aws_region.as_deref(),
    })
}

/// Validate a stored embedding config (collection audits).
pub fn validate_embedding_config(config: &EmbeddingConfig) -> Vec<ValidationError> {
    check_embedding(&EmbeddingFields {
        provider: config.provider,
        model: &config.model,
        custom_model: config.custom_model.as_deref(),
        dimension: config.dimension,
        has_api_key: config.api_key.is_some(),
        azure_deployment: config.azure_deployment.as_deref(),
        azure_endpoint: config.azure_endpoint.as_deref(),
        google_project_id: config.google_project_id.as_deref(),
        google_region: config.google_region.as_deref(),
        aws_region: config.aws_region.as_deref(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stratify_core::{DistanceMetric, FilterEntry, FilterMode};

    fn validate_raw(
        ty: RetrievalStrategyType,
        raw: JsonValue,
    ) -> Result<RetrievalConfig, Vec<ValidationError>> {
        parse_and_validate_retrieval(ty, &raw)
    }

    #[test]
    fn test_null_config_takes_defaults() {
        let config =
            validate_raw(RetrievalStrategyType::BasicSimilarity, JsonValue::Null).unwrap();
        match config {
            RetrievalConfig::BasicSimilarity(c) => {
                assert_eq!(c.top_k, defaults::TOP_K);
                assert_eq!(c.distance_metric, DistanceMetric::Cosine);
            }
            _ => panic!("Expected basic similarity"),
        }
    }

    #[test]
    fn test_basic_similarity_top_k_out_of_range() {
        let errors =
            validate_raw(RetrievalStrategyType::BasicSimilarity, json!({ "top_k": 0 }))
                .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Invalid config: top_k must be between 1 and 1000"
        );

        assert!(validate_raw(
            RetrievalStrategyType::BasicSimilarity,
            json!({ "top_k": 1001 })
        )
        .is_err());
    }

    #[test]
    fn test_basic_similarity_score_threshold_range() {
        let errors = validate_raw(
            RetrievalStrategyType::BasicSimilarity,
            json!({ "score_threshold": 1.5 }),
        )
        .unwrap_err();
        assert!(errors[0].to_string().contains("score_threshold"));

        assert!(validate_raw(
            RetrievalStrategyType::BasicSimilarity,
            json!({ "score_threshold": 0.75 })
        )
        .is_ok());
    }

    #[test]
    fn test_basic_similarity_unknown_metric_is_malformed() {
        let errors = validate_raw(
            RetrievalStrategyType::BasicSimilarity,
            json!({ "distance_metric": "chebyshev" }),
        )
        .unwrap_err();
        assert!(errors[0].to_string().contains("malformed config"));
    }

    #[test]
    fn test_errors_accumulate_not_short_circuit() {
        let errors = validate_raw(
            RetrievalStrategyType::BasicSimilarity,
            json!({ "top_k": 0, "score_threshold": 2.0 }),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_metadata_filtered_valid() {
        let config = validate_raw(
            RetrievalStrategyType::MetadataFiltered,
            json!({
                "top_k": 20,
                "filter_mode": "post",
                "filters": [{ "key": "lang", "value": "en" }]
            }),
        )
        .unwrap();
        match config {
            RetrievalConfig::MetadataFiltered(c) => {
                assert_eq!(c.filter_mode, FilterMode::Post);
                assert_eq!(c.filters.len(), 1);
            }
            _ => panic!("Expected metadata filtered"),
        }
    }

    #[test]
    fn test_metadata_filtered_rejects_nonpositive_multiplier() {
        let errors = validate_raw(
            RetrievalStrategyType::MetadataFiltered,
            json!({ "fallback_multiplier": 0.0 }),
        )
        .unwrap_err();
        assert!(errors[0].to_string().contains("fallback_multiplier"));
    }

    #[test]
    fn test_metadata_filtered_rejects_control_chars() {
        let errors = validate_raw(
            RetrievalStrategyType::MetadataFiltered,
            json!({ "filters": [{ "key": "la\u{0007}ng", "value": "e\nn" }] }),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("control characters"));
    }

    #[test]
    fn test_metadata_filtered_rejects_empty_key_and_excess_count() {
        let mut config = MetadataFilteredConfig::default();
        config.filters = vec![
            FilterEntry {
                key: "  ".to_string(),
                value: "x".to_string()
            };
            defaults::METADATA_FILTERS_MAX + 1
        ];
        let errors =
            validate_retrieval(RetrievalConfig::MetadataFiltered(config)).unwrap_err();
        assert!(errors.iter().any(|e| e.to_string().contains("at most")));
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("key must not be empty")));
    }

    #[test]
    fn test_multi_query_num_queries_range() {
        assert!(validate_raw(
            RetrievalStrategyType::MultiQuery,
            json!({ "num_queries": 1 })
        )
        .is_err());
        assert!(validate_raw(
            RetrievalStrategyType::MultiQuery,
            json!({ "num_queries": 11 })
        )
        .is_err());
        assert!(validate_raw(
            RetrievalStrategyType::MultiQuery,
            json!({ "num_queries": 2 })
        )
        .is_ok());
    }

    #[test]
    fn test_multi_query_weight_length_mismatch_rejected() {
        // Explicit policy: mismatched weight lists are rejected, not padded.
        let errors = validate_raw(
            RetrievalStrategyType::MultiQuery,
            json!({ "num_queries": 3, "query_weights": [0.5, 0.3] }),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Invalid config: query_weights has 2 entries but num_queries is 3"
        );
    }

    #[test]
    fn test_multi_query_absent_weights_filled_uniform() {
        let config = validate_raw(
            RetrievalStrategyType::MultiQuery,
            json!({ "num_queries": 4 }),
        )
        .unwrap();
        match config {
            RetrievalConfig::MultiQuery(c) => {
                assert_eq!(c.query_weights, Some(vec![1.0; 4]));
            }
            _ => panic!("Expected multi query"),
        }
    }

    #[test]
    fn test_multi_query_matching_weights_kept_as_supplied() {
        let config = validate_raw(
            RetrievalStrategyType::MultiQuery,
            json!({ "num_queries": 2, "query_weights": [0.8, 0.2] }),
        )
        .unwrap();
        match config {
            RetrievalConfig::MultiQuery(c) => {
                assert_eq!(c.query_weights, Some(vec![0.8, 0.2]));
            }
            _ => panic!("Expected multi query"),
        }
    }

    #[test]
    fn test_reranked_final_k_exceeds_initial_k() {
        let errors = validate_raw(
            RetrievalStrategyType::Reranked,
            json!({ "initial_k": 10, "final_k": 15 }),
        )
        .unwrap_err();
        assert_eq!(
            errors[0].to_string(),
            "Invalid config: Final K must be between 1 and Initial K"
        );
    }

    #[test]
    fn test_reranked_final_k_equal_initial_k_accepted() {
        assert!(validate_raw(
            RetrievalStrategyType::Reranked,
            json!({ "initial_k": 10, "final_k": 10 })
        )
        .is_ok());
    }

    #[test]
    fn test_reranked_weights_not_clamped_to_unit_interval() {
        // Weights outside [0,1] are unusual but allowed.
        assert!(validate_raw(
            RetrievalStrategyType::Reranked,
            json!({ "similarity_weight": 2.5, "recency_weight": -0.5 })
        )
        .is_ok());
    }

    #[test]
    fn test_hybrid_single_member_rejected() {
        let errors = validate_raw(
            RetrievalStrategyType::HybridUniversal,
            json!({ "members": [{ "type": "basic_similarity" }] }),
        )
        .unwrap_err();
        assert!(errors[0]
            .to_string()
            .contains("at least 2 sub-strategies"));
    }

    #[test]
    fn test_hybrid_two_members_accepted_with_defaulted_configs() {
        let config = validate_raw(
            RetrievalStrategyType::HybridUniversal,
            json!({
                "combination_method": "rank_fusion",
                "members": [
                    { "type": "basic_similarity", "weight": 0.6 },
                    { "type": "reranked", "weight": 0.4 }
                ]
            }),
        )
        .unwrap();
        match config {
            RetrievalConfig::HybridUniversal(c) => {
                assert_eq!(c.members.len(), 2);
                assert!((c.members[0].weight - 0.6).abs() < f64::EPSILON);
            }
            _ => panic!("Expected hybrid"),
        }
    }

    #[test]
    fn test_hybrid_member_errors_carry_position() {
        let errors = validate_raw(
            RetrievalStrategyType::HybridUniversal,
            json!({
                "members": [
                    { "type": "basic_similarity" },
                    { "type": "reranked", "config": { "initial_k": 5, "final_k": 9 } }
                ]
            }),
        )
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("member 2"));
    }

    #[test]
    fn test_embedding_dimension_range() {
        let mut config = EmbeddingConfigRequest::default();
        config.dimension = 0;
        assert!(!validate_embedding_request(&config, false).is_empty());
        config.dimension = 8193;
        assert!(!validate_embedding_request(&config, false).is_empty());
        config.dimension = 8192;
        assert!(validate_embedding_request(&config, false).is_empty());
    }

    #[test]
    fn test_embedding_ollama_needs_no_api_key() {
        let config = EmbeddingConfigRequest::default();
        assert!(validate_embedding_request(&config, false).is_empty());
    }

    #[test]
    fn test_embedding_cloud_requires_api_key() {
        let mut config = EmbeddingConfigRequest::default();
        config.provider = EmbeddingProvider::OpenAI;
        let errors = validate_embedding_request(&config, false);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("API key is required"));

        config.api_key = Some("sk-test".to_string());
        assert!(validate_embedding_request(&config, false).is_empty());
    }

    #[test]
    fn test_embedding_blank_api_key_counts_as_missing() {
        let mut config = EmbeddingConfigRequest::default();
        config.provider = EmbeddingProvider::Cohere;
        config.api_key = Some("   ".to_string());
        assert!(!validate_embedding_request(&config, false).is_empty());
    }

    #[test]
    fn test_embedding_existing_sealed_key_satisfies_requirement() {
        let mut config = EmbeddingConfigRequest::default();
        config.provider = EmbeddingProvider::OpenAI;
        assert!(validate_embedding_request(&config, true).is_empty());
    }

    #[test]
    fn test_embedding_azure_requires_deployment_and_endpoint() {
        let mut config = EmbeddingConfigRequest::default();
        config.provider = EmbeddingProvider::AzureOpenAI;
        config.api_key = Some("key".to_string());
        let errors = validate_embedding_request(&config, false);
        assert_eq!(errors.len(), 2);

        config.azure_deployment = Some("embed-prod".to_string());
        config.azure_endpoint = Some("https://example.openai.azure.com".to_string());
        assert!(validate_embedding_request(&config, false).is_empty());
    }

    #[test]
    fn test_embedding_google_requires_project_and_region() {
        let mut config = EmbeddingConfigRequest::default();
        config.provider = EmbeddingProvider::Google;
        config.api_key = Some("key".to_string());
        assert_eq!(validate_embedding_request(&config, false).len(), 2);
    }

    #[test]
    fn test_embedding_bedrock_requires_region() {
        let mut config = EmbeddingConfigRequest::default();
        config.provider = EmbeddingProvider::Bedrock;
        config.api_key = Some("key".to_string());
        let errors = validate_embedding_request(&config, false);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("aws_region"));
    }

    #[test]
    fn test_embedding_custom_model_identifier() {
        let mut config = EmbeddingConfigRequest::default();
        config.model = "custom".to_string();
        let errors = validate_embedding_request(&config, false);
        assert!(errors[0].to_string().contains("required"));

        config.custom_model = Some("bad id!".to_string());
        let errors = validate_embedding_request(&config, false);
        assert!(errors[0].to_string().contains("may only contain"));

        config.custom_model = Some("org/embed-v2.1".to_string());
        assert!(validate_embedding_request(&config, false).is_empty());
    }

    #[test]
    fn test_validate_stored_embedding_config() {
        let config = EmbeddingConfig::default();
        assert!(validate_embedding_config(&config).is_empty());

        let config = EmbeddingConfig {
            provider: EmbeddingProvider::OpenAI,
            ..Default::default()
        };
        assert!(!validate_embedding_config(&config).is_empty());
    }
}
