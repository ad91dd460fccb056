use owlrdf::owl::{
    AnnotationProperty, AnnotationSubject, AnnotationValue, Axiom, ClassExpression, DataProperty,
    Iri, Literal, ObjectPropertyExpression,
};
use owlrdf::parser::{
    AmbiguityPolicy, FallbackPolicy, OntologyParser, ParseIssue, ParseOutcome, ParserConfig,
    PropertyKind, StructuralError,
};
use owlrdf::rdf::{vocab, RdfFormat};

const PREFIXES: &str = "@prefix : <http://example.org/> .\n\
    @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
    @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
    @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\
    @prefix swrl: <http://www.w3.org/2003/11/swrl#> .\n";

fn ex(name: &str) -> String {
    format!("http://example.org/{}", name)
}

fn parse_with(turtle: &str, config: ParserConfig) -> ParseOutcome {
    let doc = format!("{}{}", PREFIXES, turtle);
    OntologyParser::new(config)
        .parse_str(&doc, RdfFormat::Turtle)
        .unwrap()
}

fn parse(turtle: &str) -> ParseOutcome {
    parse_with(turtle, ParserConfig::default())
}

fn count<F: Fn(&Axiom) -> bool>(outcome: &ParseOutcome, pred: F) -> usize {
    outcome
        .ontology
        .axioms()
        .filter(|a| pred(&a.axiom))
        .count()
}

#[test]
fn test_characteristic_converges_in_either_order() {
    let orders = [
        ":p a owl:ObjectProperty .\n:p a owl:FunctionalProperty .",
        ":p a owl:FunctionalProperty .\n:p a owl:ObjectProperty .",
    ];
    for doc in orders {
        let outcome = parse(doc);
        let functional = Axiom::FunctionalObjectProperty(ObjectPropertyExpression::named(ex("p")));
        assert!(outcome.ontology.contains_axiom(&functional));
        assert_eq!(
            count(&outcome, |a| matches!(a, Axiom::FunctionalObjectProperty(_))),
            1
        );
        assert!(outcome.report.inferred().is_empty());
        assert!(outcome.report.is_clean());
    }
}

#[test]
fn test_conflicting_declarations_block_characteristics() {
    let outcome = parse(
        ":p a owl:ObjectProperty .\n\
         :p a owl:DatatypeProperty .\n\
         :p a owl:FunctionalProperty .",
    );
    assert_eq!(outcome.report.conflicts().count(), 1);
    assert_eq!(
        count(&outcome, |a| matches!(
            a,
            Axiom::FunctionalObjectProperty(_) | Axiom::FunctionalDataProperty(_)
        )),
        0
    );
    assert_eq!(outcome.report.unparsed().count(), 1);
}

#[test]
fn test_property_chain_keeps_list_order() {
    let outcome = parse(
        ":p owl:propertyChainAxiom ( :p1 :p2 ) .\n\
         :p a owl:ObjectProperty .\n\
         :p1 a owl:ObjectProperty .\n\
         :p2 a owl:ObjectProperty .",
    );
    let chain = Axiom::SubPropertyChainOf {
        chain: vec![
            ObjectPropertyExpression::named(ex("p1")),
            ObjectPropertyExpression::named(ex("p2")),
        ],
        sup: ObjectPropertyExpression::named(ex("p")),
    };
    assert!(outcome.ontology.contains_axiom(&chain));
    assert!(outcome.report.is_clean());
    assert_eq!(outcome.report.consumed_count(), outcome.report.triple_count());
}

#[test]
fn test_reified_annotation_attaches_to_one_axiom() {
    let outcome = parse(
        ":A a owl:Class . :B a owl:Class . :C a owl:Class .\n\
         :A rdfs:subClassOf :B .\n\
         :A rdfs:subClassOf :C .\n\
         [] a owl:Axiom ;\n\
            owl:annotatedSource :A ;\n\
            owl:annotatedProperty rdfs:subClassOf ;\n\
            owl:annotatedTarget :B ;\n\
            rdfs:comment \"checked\" .",
    );
    assert!(outcome.report.is_clean());

    let sub_b = outcome
        .ontology
        .axioms()
        .find(|a| {
            a.axiom
                == Axiom::SubClassOf {
                    sub: ClassExpression::class(ex("A")),
                    sup: ClassExpression::class(ex("B")),
                }
        })
        .unwrap();
    assert_eq!(sub_b.annotations.len(), 1);
    let annotation = sub_b.annotations.iter().next().unwrap();
    assert_eq!(annotation.property.iri().as_str(), vocab::rdfs::COMMENT);

    let sub_c = outcome
        .ontology
        .axioms()
        .find(|a| {
            a.axiom
                == Axiom::SubClassOf {
                    sub: ClassExpression::class(ex("A")),
                    sup: ClassExpression::class(ex("C")),
                }
        })
        .unwrap();
    assert!(sub_c.annotations.is_empty());
}

#[test]
fn test_annotation_literals_keep_datatype_and_language() {
    let outcome = parse(
        ":note a owl:AnnotationProperty .\n\
         :A a owl:Class ;\n\
            :note \"5\"^^xsd:integer , \"chat\"@fr , \"plain\" .",
    );
    let note = AnnotationProperty::new(ex("note"));
    let subject = AnnotationSubject::Iri(Iri::new(ex("A")));
    for value in [
        Literal::typed("5", vocab::xsd::INTEGER),
        Literal::lang("chat", "fr"),
        Literal::string("plain"),
    ] {
        assert!(outcome.ontology.contains_axiom(&Axiom::AnnotationAssertion {
            property: note.clone(),
            subject: subject.clone(),
            value: AnnotationValue::Literal(value),
        }));
    }
}

#[test]
fn test_unparsed_statement_is_reported() {
    let outcome = parse(":a :mystery :b .");
    assert_eq!(outcome.ontology.axiom_count(), 0);
    assert_eq!(outcome.report.unparsed().count(), 1);
    assert!(matches!(
        outcome.report.issues()[0],
        ParseIssue::UnparsedStatement { .. }
    ));
    assert!(!outcome.report.has_errors());
}

#[test]
fn test_materialized_statement_is_tagged() {
    let config = ParserConfig::new().with_fallback(FallbackPolicy::MaterializeAsAnnotation);
    let outcome = parse_with(":a :mystery \"x\" .", config);
    assert_eq!(outcome.report.unparsed().count(), 1);

    let axiom = outcome.ontology.axioms().next().unwrap();
    assert_eq!(
        axiom.axiom,
        Axiom::AnnotationAssertion {
            property: AnnotationProperty::new(ex("mystery")),
            subject: AnnotationSubject::Iri(Iri::new(ex("a"))),
            value: AnnotationValue::Literal(Literal::string("x")),
        }
    );
    assert_eq!(axiom.annotations.len(), 1);
}

#[test]
fn test_configured_property_kind_resolves_ambiguity() {
    let config = ParserConfig::new()
        .with_ambiguity(AmbiguityPolicy::RequireExplicitConfig)
        .with_property_kind(ex("age"), PropertyKind::Data);
    let outcome = parse_with(":age a owl:FunctionalProperty .", config);
    assert!(outcome
        .ontology
        .contains_axiom(&Axiom::FunctionalDataProperty(DataProperty::new(ex("age")))));
    assert!(outcome.report.is_clean());
}

#[test]
fn test_require_explicit_config_reports_unknown_property() {
    let config = ParserConfig::new().with_ambiguity(AmbiguityPolicy::RequireExplicitConfig);
    let outcome = parse_with(":p a owl:SymmetricProperty .", config);
    assert_eq!(outcome.report.ambiguities().count(), 1);
    assert_eq!(outcome.ontology.axiom_count(), 0);
}

#[test]
fn test_list_cycle_is_a_structural_error() {
    let outcome = parse(
        ":A a owl:Class . :B a owl:Class . :C a owl:Class .\n\
         :C owl:equivalentClass _:u .\n\
         _:u owl:unionOf _:l1 .\n\
         _:l1 rdf:first :A ; rdf:rest _:l2 .\n\
         _:l2 rdf:first :B ; rdf:rest _:l1 .",
    );
    let errors: Vec<&ParseIssue> = outcome.report.structural_errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        ParseIssue::Structural {
            error: StructuralError::Cycle { .. },
            ..
        }
    ));
    assert_eq!(
        count(&outcome, |a| matches!(a, Axiom::EquivalentClasses(_))),
        0
    );
    assert_eq!(count(&outcome, |a| matches!(a, Axiom::Declaration(_))), 3);
}

#[test]
fn test_failed_structure_is_not_reported_again() {
    let config = ParserConfig::new().with_fallback(FallbackPolicy::MaterializeAsAnnotation);
    let outcome = parse_with(
        ":p a owl:ObjectProperty . :q a owl:ObjectProperty . :r a owl:ObjectProperty .\n\
         :r owl:propertyChainAxiom _:l1 .\n\
         _:l1 rdf:first :p ; rdf:rest _:l2 .\n\
         _:l2 rdf:first :q ; rdf:rest _:l1 .",
        config,
    );
    assert_eq!(outcome.report.structural_errors().count(), 1);
    assert_eq!(outcome.report.unparsed().count(), 0);
    assert_eq!(
        count(&outcome, |a| matches!(a, Axiom::AnnotationAssertion { .. })),
        0
    );
    assert_eq!(outcome.ontology.axiom_count(), 3);
}

#[test]
fn test_reserved_leftovers_are_reported_but_not_materialized() {
    let config = ParserConfig::new().with_fallback(FallbackPolicy::MaterializeAsAnnotation);
    let outcome = parse_with(":p rdfs:domain :A .\n:a :mystery :b .", config);
    assert_eq!(outcome.report.unparsed().count(), 2);

    let materialized: Vec<String> = outcome
        .ontology
        .axioms()
        .filter_map(|a| match &a.axiom {
            Axiom::AnnotationAssertion { property, .. } => {
                Some(property.iri().as_str().to_string())
            }
            _ => None,
        })
        .collect();
    assert_eq!(materialized, vec![ex("mystery")]);
}

#[test]
fn test_missing_list_terminator_is_a_structural_error() {
    let outcome = parse(
        ":A a owl:Class . :B a owl:Class . :C a owl:Class .\n\
         :C owl:equivalentClass _:u .\n\
         _:u owl:unionOf _:l1 .\n\
         _:l1 rdf:first :A ; rdf:rest _:l2 .\n\
         _:l2 rdf:first :B .",
    );
    assert!(outcome.report.structural_errors().any(|issue| matches!(
        issue,
        ParseIssue::Structural {
            error: StructuralError::MissingTerminator { .. },
            ..
        }
    )));
    assert!(outcome.report.has_errors());
}

#[test]
fn test_swrl_rule_is_rejected() {
    let outcome = parse(
        "_:r a swrl:Imp .\n\
         :A a owl:Class .",
    );
    assert_eq!(outcome.report.unsupported().count(), 1);
    assert_eq!(outcome.report.unparsed().count(), 0);
    assert_eq!(count(&outcome, |a| matches!(a, Axiom::Rule { .. })), 0);
    assert_eq!(outcome.ontology.axiom_count(), 1);
}

#[test]
fn test_result_is_independent_of_statement_order() {
    let lines = [
        "<http://example.org/A> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Class> .",
        "<http://example.org/B> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Class> .",
        "<http://example.org/p> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#ObjectProperty> .",
        "<http://example.org/p> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#TransitiveProperty> .",
        "<http://example.org/A> <http://www.w3.org/2000/01/rdf-schema#subClassOf> _:r .",
        "_:r <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Restriction> .",
        "_:r <http://www.w3.org/2002/07/owl#onProperty> <http://example.org/p> .",
        "_:r <http://www.w3.org/2002/07/owl#someValuesFrom> <http://example.org/B> .",
        "<http://example.org/i> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#NamedIndividual> .",
        "<http://example.org/i> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/A> .",
        "<http://example.org/i> <http://example.org/p> <http://example.org/i> .",
    ];
    let parser = OntologyParser::default();

    let forward = parser
        .parse_str(&lines.join("\n"), RdfFormat::NTriples)
        .unwrap();
    let mut reversed_lines = lines.to_vec();
    reversed_lines.reverse();
    let reversed = parser
        .parse_str(&reversed_lines.join("\n"), RdfFormat::NTriples)
        .unwrap();

    assert!(forward.report.is_clean());
    assert!(reversed.report.is_clean());
    assert_eq!(forward.ontology.axiom_count(), 8);
    assert_eq!(forward.ontology, reversed.ontology);
}

#[test]
fn test_sub_property_gives_unknown_property_its_kind() {
    let outcome = parse(
        ":q a owl:DatatypeProperty .\n\
         :p rdfs:subPropertyOf :q .\n\
         :p a owl:FunctionalProperty .",
    );
    assert!(outcome.ontology.contains_axiom(&Axiom::SubDataPropertyOf {
        sub: DataProperty::new(ex("p")),
        sup: DataProperty::new(ex("q")),
    }));
    assert!(outcome
        .ontology
        .contains_axiom(&Axiom::FunctionalDataProperty(DataProperty::new(ex("p")))));
    assert_eq!(
        count(&outcome, |a| matches!(a, Axiom::FunctionalObjectProperty(_))),
        0
    );
    assert!(outcome.report.inferred().is_empty());
    assert!(outcome.report.is_clean());
}

#[test]
fn test_implied_data_property_takes_literal_assertions() {
    let config = ParserConfig::new().with_ambiguity(AmbiguityPolicy::FailOnAmbiguity);
    let outcome = parse_with(
        ":q a owl:DatatypeProperty .\n\
         :p rdfs:subPropertyOf :q .\n\
         :p a owl:FunctionalProperty .\n\
         :x :p \"5\"^^xsd:integer .",
        config,
    );
    assert!(outcome.ontology.contains_axiom(&Axiom::DataPropertyAssertion {
        property: DataProperty::new(ex("p")),
        subject: owlrdf::owl::Individual::named(ex("x")),
        value: Literal::typed("5", vocab::xsd::INTEGER),
    }));
    assert_eq!(outcome.report.unparsed().count(), 0);
    assert_eq!(outcome.report.ambiguities().count(), 0);
}

#[test]
fn test_inverse_of_gives_unknown_property_its_kind() {
    let config = ParserConfig::new().with_ambiguity(AmbiguityPolicy::FailOnAmbiguity);
    let outcome = parse_with(
        ":q a owl:ObjectProperty .\n\
         :p owl:inverseOf :q .\n\
         :p a owl:TransitiveProperty .",
        config,
    );
    assert!(outcome
        .ontology
        .contains_axiom(&Axiom::InverseObjectProperties(
            ObjectPropertyExpression::named(ex("p")),
            ObjectPropertyExpression::named(ex("q")),
        )));
    assert!(outcome
        .ontology
        .contains_axiom(&Axiom::TransitiveObjectProperty(
            ObjectPropertyExpression::named(ex("p"))
        )));
    assert!(outcome.report.is_clean());
}
