//! Hybrid strategy composition.
//!
//! A hybrid is assembled from weighted references to non-hybrid strategy
//! types. Members may arrive without a config; the schema catalog supplies
//! the type's canonical defaults before validation. Weights are stored as
//! supplied — the combination method decides how they are consumed at
//! evaluation time, which is outside this engine.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use stratify_core::defaults;
use stratify_core::schema::default_leaf_config;
use stratify_core::{
    BasicSimilarityConfig, CombinationMethod, HybridMember, HybridUniversalConfig,
    LeafRetrievalConfig, LeafRetrievalType, MetadataFilteredConfig, MultiQueryConfig,
    RerankedConfig, ValidationError,
};

use crate::validate::{prefixed, validate_leaf};

fn default_weight() -> f64 {
    defaults::HYBRID_MEMBER_WEIGHT
}

fn default_final_k() -> i32 {
    defaults::FINAL_K
}

/// One proposed hybrid member: a type reference, a weight, and optional
/// explicit parameters.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HybridMemberRequest {
    #[serde(rename = "type")]
    pub strategy_type: LeafRetrievalType,
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Raw per-type parameters; `null` takes the type's defaults.
    #[serde(default)]
    pub config: JsonValue,
}

/// Raw hybrid parameters as submitted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HybridConfigRequest {
    #[serde(default)]
    pub combination_method: CombinationMethod,
    #[serde(default = "default_final_k")]
    pub final_k: i32,
    #[serde(default)]
    pub members: Vec<HybridMemberRequest>,
}

/// Parse a raw hybrid payload into a typed config, filling absent member
/// configs from the schema catalog. Rule checks happen in the validator;
/// this only rejects payloads that cannot be parsed at all.
pub fn parse_hybrid_config(
    raw: &JsonValue,
) -> Result<HybridUniversalConfig, Vec<ValidationError>> {
    let request: HybridConfigRequest = serde_json::from_value(raw.clone())
        .map_err(|e| vec![ValidationError::Config(format!("malformed config: {}", e))])?;

    let mut errors = Vec::new();
    let mut members = Vec::with_capacity(request.members.len());
    for (i, member) in request.members.iter().enumerate() {
        match build_member(member) {
            Ok(m) => members.push(m),
            Err(e) => errors.push(prefixed(&format!("member {}", i + 1), e)),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(HybridUniversalConfig {
        combination_method: request.combination_method,
        final_k: request.final_k,
        members,
    })
}

/// Compose and fully validate a hybrid member list.
///
/// This is the standalone composition entry point: it fills defaulted
/// configs, enforces the minimum member count, and delegates each member
/// to the per-type validator. Nested hybrids are unrepresentable — the
/// member type is [`LeafRetrievalType`].
pub fn compose(
    requests: &[HybridMemberRequest],
) -> Result<Vec<HybridMember>, Vec<ValidationError>> {
    let mut errors = Vec::new();

    if requests.len() < defaults::HYBRID_MEMBERS_MIN {
        errors.push(ValidationError::Structural(format!(
            "hybrid strategy requires at least {} sub-strategies",
            defaults::HYBRID_MEMBERS_MIN
        )));
    }

    let mut members = Vec::with_capacity(requests.len());
    for (i, request) in requests.iter().enumerate() {
        let prefix = format!("member {}", i + 1);
        match build_member(request) {
            Ok(mut member) => {
                if !member.weight.is_finite() {
                    errors.push(ValidationError::Config(format!(
                        "{}: weight must be a finite number",
                        prefix
                    )));
                }
                for err in validate_leaf(&mut member.config) {
                    errors.push(prefixed(&prefix, err));
                }
                members.push(member);
            }
            Err(e) => errors.push(prefixed(&prefix, e)),
        }
    }

    if errors.is_empty() {
        debug!(member_count = members.len(), "composed hybrid members");
        Ok(members)
    } else {
        Err(errors)
    }
}

/// Build one typed member, pulling catalog defaults for an absent config.
fn build_member(request: &HybridMemberRequest) -> Result<HybridMember, ValidationError> {
    let config = parse_leaf(request.strategy_type, &request.config)?;
    Ok(HybridMember {
        weight: request.weight,
        config,
    })
}

fn parse_leaf(
    leaf_type: LeafRetrievalType,
    raw: &JsonValue,
) -> Result<LeafRetrievalConfig, ValidationError> {
    if raw.is_null() {
        return Ok(default_leaf_config(leaf_type));
    }

    let parsed = match leaf_type {
        LeafRetrievalType::BasicSimilarity => serde_json::from_value::<BasicSimilarityConfig>(
            raw.clone(),
        )
        .map(LeafRetrievalConfig::BasicSimilarity),
        LeafRetrievalType::MetadataFiltered => serde_json::from_value::<MetadataFilteredConfig>(
            raw.clone(),
        )
        .map(LeafRetrievalConfig::MetadataFiltered),
        LeafRetrievalType::MultiQuery => {
            serde_json::from_value::<MultiQueryConfig>(raw.clone())
                .map(LeafRetrievalConfig::MultiQuery)
        }
        LeafRetrievalType::Reranked => serde_json::from_value::<RerankedConfig>(raw.clone())
            .map(LeafRetrievalConfig::Reranked),
    };

    parsed.map_err(|e| ValidationError::Config(format!("malformed config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member(ty: LeafRetrievalType) -> HybridMemberRequest {
        HybridMemberRequest {
            strategy_type: ty,
            weight: 1.0,
            config: JsonValue::Null,
        }
    }

    #[test]
    fn test_compose_two_members_with_defaults() {
        let members = compose(&[
            member(LeafRetrievalType::BasicSimilarity),
            member(LeafRetrievalType::Reranked),
        ])
        .unwrap();
        assert_eq!(members.len(), 2);
        match &members[0].config {
            LeafRetrievalConfig::BasicSimilarity(c) => {
                assert_eq!(c.top_k, defaults::TOP_K);
            }
            _ => panic!("Expected basic similarity"),
        }
    }

    #[test]
    fn test_compose_rejects_single_member() {
        let errors = compose(&[member(LeafRetrievalType::BasicSimilarity)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("at least 2 sub-strategies")));
    }

    #[test]
    fn test_compose_rejects_empty_member_list() {
        let errors = compose(&[]).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_compose_weights_stored_as_supplied() {
        // No normalization: 3.0 + 5.0 stays 3.0 + 5.0.
        let mut first = member(LeafRetrievalType::BasicSimilarity);
        first.weight = 3.0;
        let mut second = member(LeafRetrievalType::MultiQuery);
        second.weight = 5.0;

        let members = compose(&[first, second]).unwrap();
        assert!((members[0].weight - 3.0).abs() < f64::EPSILON);
        assert!((members[1].weight - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_compose_rejects_nan_weight() {
        let mut first = member(LeafRetrievalType::BasicSimilarity);
        first.weight = f64::NAN;
        let errors = compose(&[first, member(LeafRetrievalType::Reranked)]).unwrap_err();
        assert!(errors[0].to_string().contains("finite"));
    }

    #[test]
    fn test_compose_validates_explicit_member_config() {
        let mut bad = member(LeafRetrievalType::Reranked);
        bad.config = json!({ "initial_k": 10, "final_k": 15 });
        let errors = compose(&[member(LeafRetrievalType::BasicSimilarity), bad]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("member 2"));
        assert!(errors[0].to_string().contains("Final K"));
    }

    #[test]
    fn test_compose_accumulates_across_members() {
        let mut first = member(LeafRetrievalType::BasicSimilarity);
        first.config = json!({ "top_k": 0 });
        let mut second = member(LeafRetrievalType::MultiQuery);
        second.config = json!({ "num_queries": 1 });
        let errors = compose(&[first, second]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("member 1"));
        assert!(errors[1].to_string().contains("member 2"));
    }

    #[test]
    fn test_member_request_rejects_hybrid_type_tag() {
        let result = serde_json::from_value::<HybridMemberRequest>(json!({
            "type": "hybrid_universal"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_hybrid_config_fills_member_defaults() {
        let config = parse_hybrid_config(&json!({
            "members": [
                { "type": "basic_similarity", "weight": 0.5 },
                { "type": "metadata_filtered" }
            ]
        }))
        .unwrap();
        assert_eq!(config.members.len(), 2);
        assert_eq!(config.final_k, defaults::FINAL_K);
        assert_eq!(config.combination_method, CombinationMethod::WeightedAverage);
    }

    #[test]
    fn test_parse_hybrid_config_malformed_member() {
        let errors = parse_hybrid_config(&json!({
            "members": [
                { "type": "basic_similarity", "config": { "top_k": "ten" } },
                { "type": "reranked" }
            ]
        }))
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("member 1"));
        assert!(errors[0].to_string().contains("malformed config"));
    }
}
