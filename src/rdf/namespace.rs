//! Namespace and prefix management
//!
//! Prefixes are kept in insertion order so that rendered `Namespace(...)`
//! lines and compacted IRIs are deterministic.

use super::vocab;
use indexmap::IndexMap;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Not of the form `prefix:local`
    #[error("Invalid compact IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix; empty for the default namespace
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Namespace manager seeded with the OWL vocabulary prefixes
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Create a new namespace manager with the standard prefixes
    pub fn new() -> Self {
        let mut mgr = Self::empty();
        mgr.add_prefix("rdf", vocab::RDF);
        mgr.add_prefix("rdfs", vocab::RDFS);
        mgr.add_prefix("xsd", vocab::XSD);
        mgr.add_prefix("owl", vocab::OWL);
        mgr
    }

    /// Create a manager without any prefixes
    pub fn empty() -> Self {
        Self {
            prefixes: IndexMap::new(),
        }
    }

    /// Add (or replace) a prefix
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    /// Set the default (empty) prefix
    pub fn set_default_namespace(&mut self, iri: impl Into<String>) {
        self.add_prefix("", iri);
    }

    /// The default namespace, if one is set
    pub fn default_namespace(&self) -> Option<&str> {
        self.prefixes.get("").map(|s| s.as_str())
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        if let Some(pos) = compact_iri.find(':') {
            let prefix = &compact_iri[..pos];
            let local = &compact_iri[pos + 1..];
            let iri = self.get_iri(prefix)?;
            Ok(format!("{}{}", iri, local))
        } else {
            Err(PrefixError::InvalidIri(compact_iri.to_string()))
        }
    }

    /// Compact an IRI using the longest matching namespace. Returns `None`
    /// when no namespace matches or the remaining local name would not be a
    /// usable qname.
    pub fn compact(&self, iri: &str) -> Option<String> {
        let (prefix, namespace_iri) = self
            .prefixes
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())?;

        let local = &iri[namespace_iri.len()..];
        if local.is_empty() || !local.chars().all(is_local_name_char) {
            return None;
        }
        Some(format!("{}:{}", prefix, local))
    }

    /// Get all registered prefixes, in insertion order
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}

fn is_local_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefixes() {
        let mgr = NamespaceManager::new();

        assert_eq!(
            mgr.get_iri("rdf").unwrap(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#"
        );
        assert_eq!(mgr.get_iri("owl").unwrap(), "http://www.w3.org/2002/07/owl#");
        assert!(mgr.default_namespace().is_none());
    }

    #[test]
    fn test_expand() {
        let mgr = NamespaceManager::new();

        let expanded = mgr.expand("rdf:type").unwrap();
        assert_eq!(expanded, "http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
        assert!(mgr.expand("nocolon").is_err());
        assert!(mgr.expand("foaf:name").is_err());
    }

    #[test]
    fn test_compact_prefers_longest_namespace() {
        let mut mgr = NamespaceManager::empty();
        mgr.add_prefix("ex", "http://example.org/");
        mgr.add_prefix("exv", "http://example.org/vocab#");

        assert_eq!(
            mgr.compact("http://example.org/vocab#Person"),
            Some("exv:Person".to_string())
        );
        assert_eq!(
            mgr.compact("http://example.org/alice"),
            Some("ex:alice".to_string())
        );
    }

    #[test]
    fn test_compact_rejects_unusable_local_names() {
        let mut mgr = NamespaceManager::new();
        mgr.add_prefix("ex", "http://example.org/");

        assert_eq!(mgr.compact("http://example.org/"), None);
        assert_eq!(mgr.compact("http://example.org/a/b"), None);
        assert_eq!(mgr.compact("http://other.org/x"), None);
    }

    #[test]
    fn test_default_namespace() {
        let mut mgr = NamespaceManager::empty();
        mgr.set_default_namespace("http://example.org/");
        assert_eq!(mgr.compact("http://example.org/A"), Some(":A".to_string()));
    }
}
