//! Parser configuration
//!
//! Loaded from YAML or JSON; every field has a default so an empty document
//! is a valid configuration.
//!
//! ```yaml
//! ambiguity: fail_on_ambiguity
//! fallback: materialize_as_annotation
//! base_iri: http://example.org/onto
//! property_kinds:
//!   http://example.org/hasAge: data
//!   http://example.org/knows: object
//! ```

use super::classification::ResourceKind;
use crate::rdf::NamedNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid IRI in configuration: {0}")]
    InvalidIri(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What to do with a property-characteristic triple whose subject kind is
/// still unknown once the deferred pass has converged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Treat the property as an object property; the inference is logged and
    /// reported
    #[default]
    DefaultToObjectProperty,
    /// Report the triple as ambiguous and leave it unparsed
    FailOnAmbiguity,
    /// Report that the kind must be supplied through `property_kinds`
    RequireExplicitConfig,
}

/// What to do with triples no handler could consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Report each one as an unparsed statement
    #[default]
    Warn,
    /// Report, and also keep it as a tagged annotation assertion
    MaterializeAsAnnotation,
}

/// Property kind that can be supplied up front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Object,
    Data,
    Annotation,
}

impl PropertyKind {
    pub fn resource_kind(self) -> ResourceKind {
        match self {
            PropertyKind::Object => ResourceKind::ObjectProperty,
            PropertyKind::Data => ResourceKind::DataProperty,
            PropertyKind::Annotation => ResourceKind::AnnotationProperty,
        }
    }
}

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Policy for characteristic triples on properties of unknown kind
    pub ambiguity: AmbiguityPolicy,

    /// Policy for triples left over after resolution
    pub fallback: FallbackPolicy,

    /// Property kinds seeded into the classification cache before parsing
    pub property_kinds: BTreeMap<String, PropertyKind>,

    /// Base IRI for resolving relative IRIs in text documents
    pub base_iri: Option<String>,
}

impl ParserConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML configuration
    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON configuration
    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file; `.json` files are read as JSON, anything
    /// else as YAML
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let input = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&input),
            _ => Self::from_yaml_str(&input),
        }
    }

    pub fn with_ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }

    pub fn with_fallback(mut self, policy: FallbackPolicy) -> Self {
        self.fallback = policy;
        self
    }

    pub fn with_property_kind(mut self, iri: impl Into<String>, kind: PropertyKind) -> Self {
        self.property_kinds.insert(iri.into(), kind);
        self
    }

    pub fn with_base_iri(mut self, iri: impl Into<String>) -> Self {
        self.base_iri = Some(iri.into());
        self
    }

    fn validate(&self) -> ConfigResult<()> {
        for iri in self.property_kinds.keys() {
            NamedNode::new(iri).map_err(|e| ConfigError::InvalidIri(e.to_string()))?;
        }
        if let Some(base) = &self.base_iri {
            oxiri::Iri::parse(base.as_str())
                .map_err(|e| ConfigError::InvalidIri(format!("{}: {}", base, e)))?;
        }
        Ok(())
    }
}
