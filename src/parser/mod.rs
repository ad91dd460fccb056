//! RDF to OWL 2 axiom parser
//!
//! Triples are offered in document order to a registry of
//! [`TripleHandler`]s. A handler that cannot decide yet (a property whose
//! kind is unknown, a class expression that refers to a later declaration)
//! leaves the triple for the deferred passes, which repeat until no more
//! progress is made. Whatever is left is reported, and optionally kept as a
//! tagged annotation assertion.
//!
//! # Example
//!
//! ```rust
//! use owlrdf::parser::{OntologyParser, ParserConfig};
//! use owlrdf::rdf::RdfFormat;
//!
//! let doc = r#"
//!     @prefix owl: <http://www.w3.org/2002/07/owl#> .
//!     <http://example.org/p> a owl:FunctionalProperty .
//!     <http://example.org/p> a owl:ObjectProperty .
//! "#;
//! let outcome = OntologyParser::new(ParserConfig::default())
//!     .parse_str(doc, RdfFormat::Turtle)
//!     .unwrap();
//! assert_eq!(outcome.ontology.axiom_count(), 2);
//! assert!(outcome.report.is_clean());
//! ```

mod classification;
mod config;
mod coordinator;
mod driver;
mod handler;
mod index;
mod ledger;
mod pending;
mod report;
mod translate;

pub use classification::{
    Classification, ClassificationCache, DeclareOutcome, Provenance, ResourceKind,
};

pub use config::{
    AmbiguityPolicy, ConfigError, ConfigResult, FallbackPolicy, ParserConfig, PropertyKind,
};

pub use coordinator::Coordinator;

pub use handler::{
    Effect, HandlerBox, HandlerRegistry, HandlerTier, LiteralObjectHandler, Pass, Plan,
    PredicateHandler, PredicateRule, ResourceObjectHandler, TripleHandler, TypeHandler, TypeRule,
};

pub use index::TripleIndex;
pub use ledger::ConsumedLedger;
pub use pending::PendingAnnotations;

pub use report::{
    InferredKind, IssueEntry, ParseIssue, ParseReport, PassKind, PassStats, ReportSummary,
    Severity,
};

pub use translate::{Footprint, StructuralError, TranslateError, TranslateResult, Translator};

use crate::owl::Ontology;
use crate::rdf::{RdfFormat, RdfParser, SourceResult, Triple};
use driver::Driver;
use std::path::Path;
use tracing::info;

/// Result of one parse: the ontology plus everything that went wrong on
/// the way
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub ontology: Ontology,
    pub report: ParseReport,
}

/// Parser entry point
pub struct OntologyParser {
    config: ParserConfig,
    registry: HandlerRegistry,
}

impl OntologyParser {
    /// Create a parser with the standard handler set
    pub fn new(config: ParserConfig) -> Self {
        Self::with_registry(config, HandlerRegistry::standard())
    }

    /// Create a parser with a custom handler registry
    pub fn with_registry(config: ParserConfig, registry: HandlerRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Build an ontology from triples in document order
    pub fn parse_triples(&self, triples: impl IntoIterator<Item = Triple>) -> ParseOutcome {
        let index = TripleIndex::new(triples);
        let (ontology, report) = Driver::new(&self.registry, &self.config).run(&index);
        info!(
            "Parsed {} axioms from {} triples ({} issues)",
            ontology.axiom_count(),
            report.triple_count(),
            report.issues().len()
        );
        ParseOutcome { ontology, report }
    }

    /// Read a document and build its ontology. Only malformed RDF is fatal.
    pub fn parse_str(&self, input: &str, format: RdfFormat) -> SourceResult<ParseOutcome> {
        let triples = RdfParser::parse_with_base(input, format, self.config.base_iri.as_deref())?;
        Ok(self.parse_triples(triples))
    }

    pub fn parse_file(&self, path: &Path, format: RdfFormat) -> SourceResult<ParseOutcome> {
        let triples = RdfParser::parse_file(path, format, self.config.base_iri.as_deref())?;
        Ok(self.parse_triples(triples))
    }
}

impl Default for OntologyParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owl::{Axiom, ClassExpression};

    #[test]
    fn test_parse_subclass() {
        let doc = "<http://example.org/A> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <http://example.org/B> .";
        let outcome = OntologyParser::default()
            .parse_str(doc, RdfFormat::NTriples)
            .unwrap();
        assert!(outcome.ontology.contains_axiom(&Axiom::SubClassOf {
            sub: ClassExpression::class("http://example.org/A"),
            sup: ClassExpression::class("http://example.org/B"),
        }));
        assert_eq!(outcome.report.consumed_count(), 1);
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let result = OntologyParser::default().parse_str("<a> <b", RdfFormat::NTriples);
        assert!(result.is_err());
    }
}
