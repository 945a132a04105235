//! Embedding strategy types: provider catalog, model selection, and the
//! sealed-credential carrier.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::collection::Named;
use crate::defaults;

/// Charset for caller-supplied custom model identifiers.
static CUSTOM_MODEL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9/_.\-]+$").expect("static pattern compiles"));

/// Whether a custom model identifier is well-formed
/// (letters, digits, `/`, `_`, `.`, `-`; non-empty).
pub fn is_valid_custom_model_id(id: &str) -> bool {
    CUSTOM_MODEL_PATTERN.is_match(id)
}

/// Embedding provider. Ollama runs locally; everything else is a cloud API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProvider {
    /// Local Ollama instance (default)
    #[default]
    Ollama,
    /// OpenAI API
    #[serde(rename = "openai")]
    OpenAI,
    /// Azure-hosted OpenAI deployment
    #[serde(rename = "azure_openai")]
    AzureOpenAI,
    /// Google Vertex AI
    Google,
    /// AWS Bedrock
    Bedrock,
    /// Cohere API
    Cohere,
}

impl EmbeddingProvider {
    /// Cloud providers authenticate with an API key. Ollama must never
    /// require one.
    pub fn requires_api_key(self) -> bool {
        !matches!(self, Self::Ollama)
    }

    /// True for providers that run on the local machine.
    pub fn is_local(self) -> bool {
        matches!(self, Self::Ollama)
    }
}

impl std::fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ollama => write!(f, "ollama"),
            Self::OpenAI => write!(f, "openai"),
            Self::AzureOpenAI => write!(f, "azure_openai"),
            Self::Google => write!(f, "google"),
            Self::Bedrock => write!(f, "bedrock"),
            Self::Cohere => write!(f, "cohere"),
        }
    }
}

impl std::str::FromStr for EmbeddingProvider {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            "azure_openai" => Ok(Self::AzureOpenAI),
            "google" => Ok(Self::Google),
            "bedrock" => Ok(Self::Bedrock),
            "cohere" => Ok(Self::Cohere),
            _ => Err(format!("Invalid embedding provider: {}", s)),
        }
    }
}

/// An API key already sealed by the external credential collaborator.
///
/// The engine stores and forwards this string verbatim; plaintext never
/// enters the collection model. `Debug` is redacted so sealed material
/// stays out of logs too.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct SealedCredential(pub String);

impl std::fmt::Debug for SealedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SealedCredential(..)")
    }
}

fn default_model() -> String {
    defaults::EMBED_MODEL.to_string()
}

fn default_dimension() -> i32 {
    defaults::DIMENSION
}

/// Stored embedding configuration. Provider-specific fields are optional
/// here; the validator enforces which are required per provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingProvider,
    #[serde(default = "default_model")]
    pub model: String,
    /// Required (and validated) when `model` is `"custom"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_model: Option<String>,
    #[serde(default = "default_dimension")]
    pub dimension: i32,
    /// Sealed API key. Present for cloud providers, absent for Ollama.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<SealedCredential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_deployment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Ollama,
            model: default_model(),
            custom_model: None,
            dimension: defaults::DIMENSION,
            api_key: None,
            azure_deployment: None,
            azure_endpoint: None,
            google_project_id: None,
            google_region: None,
            aws_region: None,
        }
    }
}

impl EmbeddingConfig {
    /// The effective model identifier: the custom identifier when the
    /// selector is `"custom"`, otherwise the selected model.
    pub fn resolved_model(&self) -> &str {
        if self.model == defaults::CUSTOM_MODEL {
            self.custom_model.as_deref().unwrap_or("")
        } else {
            &self.model
        }
    }
}

/// A named embedding strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EmbeddingStrategy {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Derived evaluation-order slot: `count * 10` at creation time.
    pub priority: i32,
    pub config: EmbeddingConfig,
}

impl Named for EmbeddingStrategy {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Embedding parameters as submitted by the caller. Shaped like
/// [`EmbeddingConfig`] except the API key is still plaintext; the registry
/// seals it before anything is stored.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EmbeddingConfigRequest {
    #[serde(default)]
    pub provider: EmbeddingProvider,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub custom_model: Option<String>,
    #[serde(default = "default_dimension")]
    pub dimension: i32,
    /// Plaintext API key. Never stored; sealed via the credential
    /// collaborator when the provider requires one.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub azure_deployment: Option<String>,
    #[serde(default)]
    pub azure_endpoint: Option<String>,
    #[serde(default)]
    pub google_project_id: Option<String>,
    #[serde(default)]
    pub google_region: Option<String>,
    #[serde(default)]
    pub aws_region: Option<String>,
}

impl Default for EmbeddingConfigRequest {
    fn default() -> Self {
        Self {
            provider: EmbeddingProvider::Ollama,
            model: default_model(),
            custom_model: None,
            dimension: defaults::DIMENSION,
            api_key: None,
            azure_deployment: None,
            azure_endpoint: None,
            google_project_id: None,
            google_region: None,
            aws_region: None,
        }
    }
}

/// Request to add an embedding strategy.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddEmbeddingRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub config: EmbeddingConfigRequest,
    #[serde(default)]
    pub make_default: bool,
    pub database: Uuid,
}

/// Request to edit an embedding strategy. The provider is immutable; a
/// request whose provider differs from the stored one is rejected. A
/// missing `api_key` keeps the stored sealed key.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EditEmbeddingRequest {
    pub old_name: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub config: EmbeddingConfigRequest,
    #[serde(default)]
    pub make_default: bool,
    pub database: Uuid,
}
