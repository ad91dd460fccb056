//! owlrdf
//!
//! Translates RDF graphs into OWL 2 axioms and renders them back out.
//!
//! # Architecture
//!
//! - [`rdf`]: RDF terms, vocabulary, prefixes, and document I/O (Turtle,
//!   N-Triples, RDF/XML)
//! - [`owl`]: the OWL 2 structural model (entities, class expressions,
//!   axioms, the [`Ontology`] container) and the ontology to RDF writer
//! - [`parser`]: the triple handler protocol, classification cache,
//!   consumed ledger, pending annotations, and the fixed-point driver
//! - [`render`]: the functional-syntax renderer
//!
//! Triples are read in document order. Each one is offered to the handler
//! registry; anything that cannot be decided yet waits for a deferred pass,
//! and the deferred passes repeat until nothing more resolves. Statements
//! still left over are reported in the [`ParseReport`] rather than failing
//! the parse.
//!
//! ## Example Usage
//!
//! ```rust
//! use owlrdf::{FunctionalRenderer, OntologyParser, ParserConfig, RdfFormat};
//!
//! let doc = r#"
//!     @prefix : <http://example.org/zoo#> .
//!     @prefix owl: <http://www.w3.org/2002/07/owl#> .
//!     @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//!     <http://example.org/zoo> a owl:Ontology .
//!     :Lion a owl:Class ; rdfs:subClassOf :Cat .
//!     :Cat a owl:Class .
//! "#;
//!
//! let outcome = OntologyParser::new(ParserConfig::default())
//!     .parse_str(doc, RdfFormat::Turtle)
//!     .unwrap();
//! assert_eq!(outcome.ontology.axiom_count(), 3);
//!
//! let text = FunctionalRenderer::default().render(&outcome.ontology).unwrap();
//! assert!(text.contains("SubClassOf(:Lion :Cat)"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod owl;
pub mod parser;
pub mod rdf;
pub mod render;

// Re-export main types for convenience
pub use owl::{
    AnnotatedAxiom, Annotation, Axiom, ClassExpression, DataRange, Entity, Iri,
    ObjectPropertyExpression, Ontology, RdfWriter, WriteError, WriteResult,
};

pub use parser::{
    AmbiguityPolicy, ConfigError, FallbackPolicy, OntologyParser, ParseIssue, ParseOutcome,
    ParseReport, ParserConfig, PropertyKind,
};

pub use rdf::{NamespaceManager, RdfFormat, RdfParser, SourceError, SourceResult, Triple};

pub use render::{FunctionalRenderer, RenderError, RenderResult, RendererConfig};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
