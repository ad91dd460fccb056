//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)
//! - RDF/XML
//!
//! The lexers are the rio crates; this module only converts between their
//! borrowed term model and the owned [`Triple`] values used by the parser.

mod rdfxml;
mod turtle;

use crate::rdf::vocab::xsd;
use crate::rdf::{BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfSubject, Triple};
use oxiri::Iri;
use rio_api::formatter::TriplesFormatter;
use rio_api::model as rio;
use rio_turtle::TurtleError;
use rio_xml::RdfXmlError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
    /// RDF/XML format (.rdf, .owl)
    RdfXml,
}

impl RdfFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            "rdf" | "owl" | "xml" => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }
}

impl FromStr for RdfFormat {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(RdfFormat::NTriples),
            "rdfxml" | "rdf/xml" | "xml" | "rdf" => Ok(RdfFormat::RdfXml),
            other => Err(SourceError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfFormat::Turtle => write!(f, "turtle"),
            RdfFormat::NTriples => write!(f, "ntriples"),
            RdfFormat::RdfXml => write!(f, "rdfxml"),
        }
    }
}

/// Errors raised while reading a triple source. These are the only fatal
/// parse errors: nothing is translated from a document that fails here.
#[derive(Error, Debug)]
pub enum SourceError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Lexer or grammar error reported by the underlying parser
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// A term the parser accepted but the term model rejects
    #[error("Invalid term: {0}")]
    InvalidTerm(#[from] RdfError),

    /// Base IRI is not absolute
    #[error("Invalid base IRI {0}")]
    InvalidBaseIri(String),

    /// Unrecognised format name
    #[error("Unknown RDF format: {0}")]
    UnknownFormat(String),
}

impl From<TurtleError> for SourceError {
    fn from(e: TurtleError) -> Self {
        SourceError::Syntax(e.to_string())
    }
}

impl From<RdfXmlError> for SourceError {
    fn from(e: RdfXmlError) -> Self {
        SourceError::Syntax(e.to_string())
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string
    pub fn parse(input: &str, format: RdfFormat) -> SourceResult<Vec<Triple>> {
        Self::parse_with_base(input, format, None)
    }

    /// Parse RDF data from a string, resolving relative IRIs against `base`
    pub fn parse_with_base(
        input: &str,
        format: RdfFormat,
        base: Option<&str>,
    ) -> SourceResult<Vec<Triple>> {
        let base = base.map(parse_base_iri).transpose()?;
        let triples = match format {
            RdfFormat::Turtle => turtle::parse_turtle(input.as_bytes(), base)?,
            RdfFormat::NTriples => turtle::parse_ntriples(input.as_bytes())?,
            RdfFormat::RdfXml => rdfxml::parse(input.as_bytes(), base)?,
        };
        tracing::debug!("Read {} triples as {}", triples.len(), format);
        Ok(triples)
    }

    /// Parse RDF data from a file
    pub fn parse_file(
        path: &Path,
        format: RdfFormat,
        base: Option<&str>,
    ) -> SourceResult<Vec<Triple>> {
        let input = std::fs::read_to_string(path)?;
        Self::parse_with_base(&input, format, base)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize triples to a string
    pub fn serialize(triples: &[Triple], format: RdfFormat) -> SerializeResult<String> {
        let output = match format {
            RdfFormat::Turtle => turtle::format_turtle(triples)?,
            RdfFormat::NTriples => turtle::format_ntriples(triples)?,
            RdfFormat::RdfXml => rdfxml::format(triples)?,
        };
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }

    /// Serialize triples to a file
    pub fn serialize_file(triples: &[Triple], path: &Path, format: RdfFormat) -> SerializeResult<()> {
        let text = Self::serialize(triples, format)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

fn parse_base_iri(base: &str) -> SourceResult<Iri<String>> {
    Iri::parse(base.to_string()).map_err(|e| SourceError::InvalidBaseIri(format!("{}: {}", base, e)))
}

/// Convert a rio triple into an owned [`Triple`]
pub(crate) fn convert_triple(t: rio::Triple<'_>) -> SourceResult<Triple> {
    let subject = match t.subject {
        rio::Subject::NamedNode(n) => RdfSubject::NamedNode(NamedNode::new(n.iri)?),
        rio::Subject::BlankNode(b) => RdfSubject::BlankNode(BlankNode::from_str(b.id)?),
        _ => return Err(SourceError::Syntax("Quoted triples are not supported".to_string())),
    };
    let predicate = RdfPredicate::new(t.predicate.iri)?;
    let object = match t.object {
        rio::Term::NamedNode(n) => RdfObject::NamedNode(NamedNode::new(n.iri)?),
        rio::Term::BlankNode(b) => RdfObject::BlankNode(BlankNode::from_str(b.id)?),
        rio::Term::Literal(rio::Literal::Simple { value }) => {
            RdfObject::Literal(Literal::new_simple_literal(value))
        }
        rio::Term::Literal(rio::Literal::LanguageTaggedString { value, language }) => {
            RdfObject::Literal(Literal::new_language_tagged_literal(value, language)?)
        }
        rio::Term::Literal(rio::Literal::Typed { value, datatype }) => {
            RdfObject::Literal(Literal::new_typed_literal(value, NamedNode::new(datatype.iri)?))
        }
        _ => return Err(SourceError::Syntax("Quoted triples are not supported".to_string())),
    };
    Ok(Triple::new(subject, predicate, object))
}

/// Feed every triple to a rio formatter
pub(crate) fn format_triples<F>(formatter: &mut F, triples: &[Triple]) -> SerializeResult<()>
where
    F: TriplesFormatter,
{
    for triple in triples {
        let datatype = triple.object.as_literal().map(|l| l.datatype());

        let subject = match &triple.subject {
            RdfSubject::NamedNode(n) => rio::Subject::NamedNode(rio::NamedNode { iri: n.as_str() }),
            RdfSubject::BlankNode(b) => rio::Subject::BlankNode(rio::BlankNode { id: b.as_str() }),
        };
        let object = match &triple.object {
            RdfObject::NamedNode(n) => rio::Term::NamedNode(rio::NamedNode { iri: n.as_str() }),
            RdfObject::BlankNode(b) => rio::Term::BlankNode(rio::BlankNode { id: b.as_str() }),
            RdfObject::Literal(l) => rio::Term::Literal(match (l.language(), &datatype) {
                (Some(language), _) => rio::Literal::LanguageTaggedString {
                    value: l.value(),
                    language,
                },
                (None, Some(dt)) if dt.as_str() != xsd::STRING => rio::Literal::Typed {
                    value: l.value(),
                    datatype: rio::NamedNode { iri: dt.as_str() },
                },
                _ => rio::Literal::Simple { value: l.value() },
            }),
        };

        formatter
            .format(&rio::Triple {
                subject,
                predicate: rio::NamedNode {
                    iri: triple.predicate.as_str(),
                },
                object,
            })
            .map_err(|e| SerializeError::Serialize(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TURTLE: &str = r#"
        @prefix ex: <http://example.org/> .
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        ex:a ex:b "c" .
        ex:a rdfs:label "A"@en .
        ex:a ex:count "3"^^<http://www.w3.org/2001/XMLSchema#integer> .
        ex:a ex:link [ ex:p ex:q ] .
    "#;

    #[test]
    fn test_parse_turtle() {
        let triples = RdfParser::parse(TURTLE, RdfFormat::Turtle).unwrap();
        assert_eq!(triples.len(), 5);

        let label = triples
            .iter()
            .find(|t| t.predicate.as_str().ends_with("label"))
            .unwrap();
        assert_eq!(label.object.as_literal().unwrap().language(), Some("en"));
    }

    #[test]
    fn test_parse_with_base() {
        let input = "<a> <b> <c> .";
        let triples =
            RdfParser::parse_with_base(input, RdfFormat::Turtle, Some("http://example.org/")).unwrap();
        assert!(triples[0].subject.is_iri("http://example.org/a"));

        let err = RdfParser::parse_with_base(input, RdfFormat::Turtle, Some("not absolute"));
        assert!(matches!(err, Err(SourceError::InvalidBaseIri(_))));
    }

    #[test]
    fn test_syntax_error() {
        let err = RdfParser::parse("<http://example.org/a> <http://example.org/b> .", RdfFormat::NTriples);
        assert!(matches!(err, Err(SourceError::Syntax(_))));
    }

    #[test]
    fn test_ntriples_roundtrip() {
        let triples = RdfParser::parse(TURTLE, RdfFormat::Turtle).unwrap();
        let text = RdfSerializer::serialize(&triples, RdfFormat::NTriples).unwrap();
        let reparsed = RdfParser::parse(&text, RdfFormat::NTriples).unwrap();
        assert_eq!(reparsed.len(), triples.len());
        assert!(text.contains("\"A\"@en"));
        assert!(text.contains("^^<http://www.w3.org/2001/XMLSchema#integer>"));
    }

    #[test]
    fn test_format_names() {
        assert_eq!("ttl".parse::<RdfFormat>().unwrap(), RdfFormat::Turtle);
        assert_eq!("RDFXML".parse::<RdfFormat>().unwrap(), RdfFormat::RdfXml);
        assert!("jsonld".parse::<RdfFormat>().is_err());
        assert_eq!(
            RdfFormat::from_path(Path::new("pizza.owl")),
            Some(RdfFormat::RdfXml)
        );
        assert_eq!(RdfFormat::from_path(Path::new("noext")), None);
    }
}
