use owlrdf::owl::{Axiom, ClassExpression, Class, Entity};
use owlrdf::parser::{
    AmbiguityPolicy, ConfigError, FallbackPolicy, OntologyParser, ParserConfig, PropertyKind,
};
use owlrdf::rdf::RdfFormat;
use std::io::Write;
use tempfile::NamedTempFile;

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_yaml_config_file() {
    let file = temp_file(
        ".yaml",
        "ambiguity: fail_on_ambiguity\n\
         fallback: materialize_as_annotation\n\
         property_kinds:\n  http://example.org/age: data\n",
    );
    let config = ParserConfig::from_file(file.path()).unwrap();
    assert_eq!(config.ambiguity, AmbiguityPolicy::FailOnAmbiguity);
    assert_eq!(config.fallback, FallbackPolicy::MaterializeAsAnnotation);
    assert_eq!(
        config.property_kinds.get("http://example.org/age"),
        Some(&PropertyKind::Data)
    );
}

#[test]
fn test_json_config_file() {
    let file = temp_file(".json", r#"{"base_iri": "http://example.org/onto"}"#);
    let config = ParserConfig::from_file(file.path()).unwrap();
    assert_eq!(config.base_iri.as_deref(), Some("http://example.org/onto"));
    assert_eq!(config.ambiguity, AmbiguityPolicy::DefaultToObjectProperty);
}

#[test]
fn test_invalid_iri_in_config() {
    let file = temp_file(".yaml", "property_kinds:\n  'not an iri': object\n");
    let result = ParserConfig::from_file(file.path());
    assert!(matches!(result, Err(ConfigError::InvalidIri(_))));
}

#[test]
fn test_base_iri_resolves_relative_references() {
    let doc = temp_file(
        ".ttl",
        "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n<A> a owl:Class .\n",
    );
    let parser = OntologyParser::new(ParserConfig::new().with_base_iri("http://example.org/"));
    let outcome = parser.parse_file(doc.path(), RdfFormat::Turtle).unwrap();
    assert!(outcome
        .ontology
        .contains_axiom(&Axiom::Declaration(Entity::Class(Class::new(
            "http://example.org/A"
        )))));
}

#[test]
fn test_rdfxml_document_file() {
    let doc = temp_file(
        ".owl",
        r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:rdfs="http://www.w3.org/2000/01/rdf-schema#"
         xmlns:owl="http://www.w3.org/2002/07/owl#"
         xml:base="http://example.org/onto">
  <owl:Ontology rdf:about="http://example.org/onto"/>
  <owl:Class rdf:about="http://example.org/onto#A"/>
  <owl:Class rdf:about="http://example.org/onto#B">
    <rdfs:subClassOf rdf:resource="http://example.org/onto#A"/>
  </owl:Class>
</rdf:RDF>
"#,
    );
    let format = RdfFormat::from_path(doc.path()).unwrap();
    let outcome = OntologyParser::default()
        .parse_file(doc.path(), format)
        .unwrap();

    assert_eq!(
        outcome.ontology.iri().map(|i| i.as_str()),
        Some("http://example.org/onto")
    );
    assert_eq!(outcome.ontology.axiom_count(), 3);
    assert!(outcome.ontology.contains_axiom(&Axiom::SubClassOf {
        sub: ClassExpression::class("http://example.org/onto#B"),
        sup: ClassExpression::class("http://example.org/onto#A"),
    }));
}

#[test]
fn test_missing_file_is_an_error() {
    let result = OntologyParser::default().parse_file(
        std::path::Path::new("/nonexistent/owlrdf/input.ttl"),
        RdfFormat::Turtle,
    );
    assert!(result.is_err());
}
