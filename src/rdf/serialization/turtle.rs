//! Turtle and N-Triples adapters over rio_turtle

use super::{convert_triple, format_triples, SerializeError, SerializeResult, SourceError, SourceResult};
use crate::rdf::Triple;
use oxiri::Iri;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleFormatter, TurtleParser};
use std::io::BufRead;

/// Parse a Turtle document
pub(super) fn parse_turtle<R: BufRead>(reader: R, base: Option<Iri<String>>) -> SourceResult<Vec<Triple>> {
    let mut parser = TurtleParser::new(reader, base);
    let mut triples = Vec::new();
    parser.parse_all(&mut |t| -> Result<(), SourceError> {
        triples.push(convert_triple(t)?);
        Ok(())
    })?;
    Ok(triples)
}

/// Parse an N-Triples document
pub(super) fn parse_ntriples<R: BufRead>(reader: R) -> SourceResult<Vec<Triple>> {
    let mut parser = NTriplesParser::new(reader);
    let mut triples = Vec::new();
    parser.parse_all(&mut |t| -> Result<(), SourceError> {
        triples.push(convert_triple(t)?);
        Ok(())
    })?;
    Ok(triples)
}

/// Write triples as Turtle
pub(super) fn format_turtle(triples: &[Triple]) -> SerializeResult<Vec<u8>> {
    let mut formatter = TurtleFormatter::new(Vec::new());
    format_triples(&mut formatter, triples)?;
    formatter
        .finish()
        .map_err(|e| SerializeError::Serialize(e.to_string()))
}

/// Write triples as N-Triples, one statement per line
pub(super) fn format_ntriples(triples: &[Triple]) -> SerializeResult<Vec<u8>> {
    let mut output = Vec::new();
    let mut formatter = NTriplesFormatter::new(&mut output);
    format_triples(&mut formatter, triples)?;
    let _ = formatter.finish();
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turtle_roundtrip() {
        let input = r#"<http://example.org/a> <http://example.org/b> "c" ."#;
        let triples = parse_turtle(input.as_bytes(), None).unwrap();
        assert_eq!(triples.len(), 1);

        let output = String::from_utf8(format_turtle(&triples).unwrap()).unwrap();
        assert!(output.contains("http://example.org/a"));
        assert_eq!(parse_turtle(output.as_bytes(), None).unwrap(), triples);
    }

    #[test]
    fn test_blank_node_labels_survive() {
        let input = "_:x <http://example.org/p> _:y .\n";
        let triples = parse_ntriples(input.as_bytes()).unwrap();
        assert!(triples[0].subject.is_blank_node());
        assert!(triples[0].object.is_blank_node());
    }
}
