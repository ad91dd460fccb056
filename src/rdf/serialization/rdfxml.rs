//! RDF/XML adapter over rio_xml

use super::{convert_triple, format_triples, SerializeError, SerializeResult, SourceError, SourceResult};
use crate::rdf::Triple;
use oxiri::Iri;
use rio_api::parser::TriplesParser;
use rio_xml::{RdfXmlFormatter, RdfXmlParser};
use std::io::BufRead;

/// Parse an RDF/XML document
pub(super) fn parse<R: BufRead>(reader: R, base: Option<Iri<String>>) -> SourceResult<Vec<Triple>> {
    let mut parser = RdfXmlParser::new(reader, base);
    let mut triples = Vec::new();
    parser.parse_all(&mut |t| -> Result<(), SourceError> {
        triples.push(convert_triple(t)?);
        Ok(())
    })?;
    Ok(triples)
}

/// Write triples as indented RDF/XML
pub(super) fn format(triples: &[Triple]) -> SerializeResult<Vec<u8>> {
    let mut formatter = RdfXmlFormatter::with_indentation(Vec::new(), 2)?;
    format_triples(&mut formatter, triples)?;
    formatter
        .finish()
        .map_err(|e| SerializeError::Serialize(e.to_string()))
}
