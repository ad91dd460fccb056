//! RDF layer: terms, vocabulary, prefixes and document I/O
//!
//! Everything the OWL parser reads arrives through this module as owned
//! [`Triple`] values, and everything the RDF writer produces leaves through
//! it again.
//!
//! # Example
//!
//! ```rust
//! use owlrdf::rdf::{RdfFormat, RdfParser};
//!
//! let triples = RdfParser::parse(
//!     "<http://example.org/A> <http://www.w3.org/2000/01/rdf-schema#subClassOf> <http://example.org/B> .",
//!     RdfFormat::NTriples,
//! ).unwrap();
//! assert_eq!(triples.len(), 1);
//! ```

mod namespace;
mod serialization;
mod types;
pub mod vocab;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    Triple,
};

pub use namespace::{Namespace, NamespaceManager, PrefixError, PrefixResult};

pub use serialization::{
    RdfFormat, RdfParser, RdfSerializer, SerializeError, SerializeResult, SourceError,
    SourceResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rdf_module_exports() {
        let _ns_mgr = NamespaceManager::new();
        let _triples: SourceResult<Vec<Triple>> = RdfParser::parse("", RdfFormat::Turtle);
        assert!(vocab::is_reserved(vocab::rdf::TYPE));
    }
}
