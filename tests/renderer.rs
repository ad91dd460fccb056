use owlrdf::parser::OntologyParser;
use owlrdf::rdf::{vocab, RdfFormat};
use owlrdf::render::{FunctionalRenderer, RenderError, RendererConfig};
use owlrdf::owl::{Axiom, Ontology};

const ZOO: &str = r#"
@prefix : <http://example.org/zoo#> .
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

<http://example.org/zoo> a owl:Ontology ;
    rdfs:comment "A small zoo" .
:Cat a owl:Class .
:Lion a owl:Class ;
    rdfs:label "Lion"@en ;
    rdfs:subClassOf :Cat .
:eats a owl:ObjectProperty .
:Lion rdfs:subClassOf [
    a owl:Restriction ;
    owl:onProperty :eats ;
    owl:someValuesFrom :Zebra
] .
:Zebra a owl:Class .
"#;

fn zoo() -> Ontology {
    let outcome = OntologyParser::default()
        .parse_str(ZOO, RdfFormat::Turtle)
        .unwrap();
    assert!(outcome.report.is_clean());
    outcome.ontology
}

#[test]
fn test_document_layout() {
    let text = FunctionalRenderer::default().render(&zoo()).unwrap();

    let expected = format!(
        "Namespace(=<http://example.org/zoo#>)\n\
         Namespace(rdf=<{rdf}>)\n\
         Namespace(rdfs=<{rdfs}>)\n\
         Namespace(xsd=<{xsd}>)\n\
         Namespace(owl=<{owl}>)\n\
         \n\
         Ontology(<http://example.org/zoo>\n\
         Annotation(rdfs:comment \"A small zoo\"^^xsd:string)\n\
         \n\
         Declaration(Class(:Cat))\n\
         Declaration(Class(:Lion))\n\
         AnnotationAssertion(rdfs:label :Lion \"Lion\"@en)\n\
         SubClassOf(:Lion :Cat)\n\
         SubClassOf(:Lion ObjectSomeValuesFrom(:eats :Zebra))\n\
         Declaration(Class(:Zebra))\n\
         Declaration(ObjectProperty(:eats))\n\
         )\n\
         // Generated by owlrdf {version}\n",
        rdf = vocab::RDF,
        rdfs = vocab::RDFS,
        xsd = vocab::XSD,
        owl = vocab::OWL,
        version = owlrdf::VERSION,
    );
    assert_eq!(text, expected);
}

#[test]
fn test_every_axiom_written_once() {
    let ontology = zoo();
    let text = FunctionalRenderer::default().render(&ontology).unwrap();
    let axiom_lines = text
        .lines()
        .filter(|l| {
            !l.starts_with("Namespace(")
                && !l.starts_with("Ontology(")
                && !l.starts_with("Annotation(")
                && !l.starts_with("//")
                && *l != ")"
                && !l.is_empty()
        })
        .count();
    assert_eq!(axiom_lines, ontology.axiom_count());
}

#[test]
fn test_configured_prefixes() {
    let config = RendererConfig::default()
        .with_default_namespace("http://example.org/other#")
        .with_prefix("zoo", "http://example.org/zoo#");
    let text = FunctionalRenderer::new(config).render(&zoo()).unwrap();
    assert!(text.starts_with("Namespace(=<http://example.org/other#>)\n"));
    assert!(text.contains("Namespace(zoo=<http://example.org/zoo#>)\n"));
    assert!(text.contains("SubClassOf(zoo:Lion zoo:Cat)"));
}

#[test]
fn test_rule_is_unsupported() {
    let mut ontology = zoo();
    ontology.add_axiom(Axiom::Rule {
        node: "_:rule".to_string(),
    });
    let result = FunctionalRenderer::default().render(&ontology);
    assert!(matches!(result, Err(RenderError::Unsupported(_))));
}
