//! Predicate-keyed handlers

use super::{
    shared_property_kind, subject_term, Effect, HandlerTier, Pass, Plan, TripleHandler,
};
use crate::owl::{Axiom, ClassExpression, Datatype, Iri};
use crate::parser::classification::{Classification, ResourceKind};
use crate::parser::coordinator::Coordinator;
use crate::parser::translate::{StructuralError, TranslateError, TranslateResult};
use crate::rdf::vocab::{owl, rdfs};
use crate::rdf::{RdfObject, RdfSubject, Triple};

/// One fixed predicate and the axiom it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateRule {
    SubClassOf,
    EquivalentClass,
    DisjointWith,
    DisjointUnionOf,
    SubPropertyOf,
    PropertyChainAxiom,
    EquivalentProperty,
    PropertyDisjointWith,
    InverseOf,
    Domain,
    Range,
    SameAs,
    DifferentFrom,
    HasKey,
    Imports,
    VersionIri,
}

impl PredicateRule {
    pub const ALL: [PredicateRule; 16] = [
        PredicateRule::SubClassOf,
        PredicateRule::EquivalentClass,
        PredicateRule::DisjointWith,
        PredicateRule::DisjointUnionOf,
        PredicateRule::SubPropertyOf,
        PredicateRule::PropertyChainAxiom,
        PredicateRule::EquivalentProperty,
        PredicateRule::PropertyDisjointWith,
        PredicateRule::InverseOf,
        PredicateRule::Domain,
        PredicateRule::Range,
        PredicateRule::SameAs,
        PredicateRule::DifferentFrom,
        PredicateRule::HasKey,
        PredicateRule::Imports,
        PredicateRule::VersionIri,
    ];

    pub fn predicate(self) -> &'static str {
        match self {
            PredicateRule::SubClassOf => rdfs::SUB_CLASS_OF,
            PredicateRule::EquivalentClass => owl::EQUIVALENT_CLASS,
            PredicateRule::DisjointWith => owl::DISJOINT_WITH,
            PredicateRule::DisjointUnionOf => owl::DISJOINT_UNION_OF,
            PredicateRule::SubPropertyOf => rdfs::SUB_PROPERTY_OF,
            PredicateRule::PropertyChainAxiom => owl::PROPERTY_CHAIN_AXIOM,
            PredicateRule::EquivalentProperty => owl::EQUIVALENT_PROPERTY,
            PredicateRule::PropertyDisjointWith => owl::PROPERTY_DISJOINT_WITH,
            PredicateRule::InverseOf => owl::INVERSE_OF,
            PredicateRule::Domain => rdfs::DOMAIN,
            PredicateRule::Range => rdfs::RANGE,
            PredicateRule::SameAs => owl::SAME_AS,
            PredicateRule::DifferentFrom => owl::DIFFERENT_FROM,
            PredicateRule::HasKey => owl::HAS_KEY,
            PredicateRule::Imports => owl::IMPORTS,
            PredicateRule::VersionIri => owl::VERSION_IRI,
        }
    }

    fn name(self) -> &'static str {
        match self {
            PredicateRule::SubClassOf => "subClassOf",
            PredicateRule::EquivalentClass => "equivalentClass",
            PredicateRule::DisjointWith => "disjointWith",
            PredicateRule::DisjointUnionOf => "disjointUnionOf",
            PredicateRule::SubPropertyOf => "subPropertyOf",
            PredicateRule::PropertyChainAxiom => "propertyChainAxiom",
            PredicateRule::EquivalentProperty => "equivalentProperty",
            PredicateRule::PropertyDisjointWith => "propertyDisjointWith",
            PredicateRule::InverseOf => "inverseOf",
            PredicateRule::Domain => "domain",
            PredicateRule::Range => "range",
            PredicateRule::SameAs => "sameAs",
            PredicateRule::DifferentFrom => "differentFrom",
            PredicateRule::HasKey => "hasKey",
            PredicateRule::Imports => "imports",
            PredicateRule::VersionIri => "versionIRI",
        }
    }
}

/// Handler for one [`PredicateRule`]
#[derive(Debug, Clone, Copy)]
pub struct PredicateHandler {
    rule: PredicateRule,
}

impl PredicateHandler {
    pub fn new(rule: PredicateRule) -> Self {
        Self { rule }
    }
}

impl TripleHandler for PredicateHandler {
    fn name(&self) -> &'static str {
        self.rule.name()
    }

    fn tier(&self) -> HandlerTier {
        HandlerTier::PredicateKeyed
    }

    fn matches(&self, triple: &Triple) -> bool {
        if triple.predicate.as_str() != self.rule.predicate() {
            return false;
        }
        // A blank subject of owl:inverseOf is an inverse property expression
        !(self.rule == PredicateRule::InverseOf && triple.subject.is_blank_node())
    }

    fn plan(&self, triple: &Triple, cx: &Coordinator<'_>, pass: Pass) -> TranslateResult<Plan> {
        let subject = subject_term(triple);
        let object = &triple.object;
        let mut tr = cx.translator(pass);

        let axiom = match self.rule {
            PredicateRule::SubClassOf => Axiom::SubClassOf {
                sub: tr.class_expression(&subject)?,
                sup: tr.class_expression(object)?,
            },
            PredicateRule::EquivalentClass => {
                let is_datatype = match (&triple.subject, object) {
                    (RdfSubject::NamedNode(_), RdfObject::BlankNode(b)) => {
                        tr.is_data_range_node(&b.clone().into())
                    }
                    (RdfSubject::NamedNode(_), RdfObject::NamedNode(_)) => {
                        cx.is_only(&triple.subject, ResourceKind::Datatype)
                    }
                    _ => false,
                };
                if is_datatype {
                    let datatype = named_iri(&triple.subject)?;
                    tr.require(&triple.subject, ResourceKind::Datatype, true)?;
                    Axiom::DatatypeDefinition {
                        datatype: Datatype::new(datatype),
                        range: tr.data_range(object)?,
                    }
                } else {
                    Axiom::EquivalentClasses(vec![
                        tr.class_expression(&subject)?,
                        tr.class_expression(object)?,
                    ])
                }
            }
            PredicateRule::DisjointWith => Axiom::DisjointClasses(vec![
                tr.class_expression(&subject)?,
                tr.class_expression(object)?,
            ]),
            PredicateRule::DisjointUnionOf => {
                let class = match tr.class_expression(&subject)? {
                    ClassExpression::Class(class) => class,
                    _ => return Err(not_named(&triple.subject, "class")),
                };
                Axiom::DisjointUnion {
                    class,
                    operands: tr.class_expression_list(object)?,
                }
            }
            PredicateRule::SubPropertyOf => {
                match shared_property_kind(cx, [&subject, object])? {
                    ResourceKind::ObjectProperty => Axiom::SubObjectPropertyOf {
                        sub: tr.object_property_expression(&subject, true)?,
                        sup: tr.object_property_expression(object, true)?,
                    },
                    ResourceKind::DataProperty => Axiom::SubDataPropertyOf {
                        sub: tr.data_property(&subject, true)?,
                        sup: tr.data_property(object, true)?,
                    },
                    _ => Axiom::SubAnnotationPropertyOf {
                        sub: tr.annotation_property(&subject, true)?,
                        sup: tr.annotation_property(object, true)?,
                    },
                }
            }
            PredicateRule::PropertyChainAxiom => {
                let (chain, footprint) = cx.translate_property_expression_list(object, pass)?;
                let sup = tr.object_property_expression(&subject, true)?;
                let mut plan = Plan::axiom(tr, triple, Axiom::SubPropertyChainOf { chain, sup })?;
                plan.absorb(footprint);
                return Ok(plan);
            }
            PredicateRule::EquivalentProperty | PredicateRule::PropertyDisjointWith => {
                let equivalent = self.rule == PredicateRule::EquivalentProperty;
                match shared_property_kind(cx, [&subject, object])? {
                    ResourceKind::ObjectProperty => {
                        let operands = vec![
                            tr.object_property_expression(&subject, true)?,
                            tr.object_property_expression(object, true)?,
                        ];
                        if equivalent {
                            Axiom::EquivalentObjectProperties(operands)
                        } else {
                            Axiom::DisjointObjectProperties(operands)
                        }
                    }
                    ResourceKind::DataProperty => {
                        let operands = vec![
                            tr.data_property(&subject, true)?,
                            tr.data_property(object, true)?,
                        ];
                        if equivalent {
                            Axiom::EquivalentDataProperties(operands)
                        } else {
                            Axiom::DisjointDataProperties(operands)
                        }
                    }
                    kind => {
                        return Err(TranslateError::Unresolved(format!(
                            "{} has no OWL 2 form for {}",
                            self.rule.name(),
                            kind
                        )))
                    }
                }
            }
            PredicateRule::InverseOf => Axiom::InverseObjectProperties(
                tr.object_property_expression(&subject, true)?,
                tr.object_property_expression(object, true)?,
            ),
            PredicateRule::Domain => match property_kind(cx, &triple.subject)? {
                ResourceKind::ObjectProperty => Axiom::ObjectPropertyDomain {
                    property: tr.object_property_expression(&subject, false)?,
                    domain: tr.class_expression(object)?,
                },
                ResourceKind::DataProperty => Axiom::DataPropertyDomain {
                    property: tr.data_property(&subject, false)?,
                    domain: tr.class_expression(object)?,
                },
                _ => Axiom::AnnotationPropertyDomain {
                    property: tr.annotation_property(&subject, false)?,
                    domain: object_iri(object)?,
                },
            },
            PredicateRule::Range => match property_kind(cx, &triple.subject)? {
                ResourceKind::ObjectProperty => Axiom::ObjectPropertyRange {
                    property: tr.object_property_expression(&subject, false)?,
                    range: tr.class_expression(object)?,
                },
                ResourceKind::DataProperty => Axiom::DataPropertyRange {
                    property: tr.data_property(&subject, false)?,
                    range: tr.data_range(object)?,
                },
                _ => Axiom::AnnotationPropertyRange {
                    property: tr.annotation_property(&subject, false)?,
                    range: object_iri(object)?,
                },
            },
            PredicateRule::SameAs => Axiom::SameIndividual(vec![
                tr.subject_individual(&triple.subject),
                tr.individual(object)?,
            ]),
            PredicateRule::DifferentFrom => Axiom::DifferentIndividuals(vec![
                tr.subject_individual(&triple.subject),
                tr.individual(object)?,
            ]),
            PredicateRule::HasKey => Axiom::HasKey {
                class: tr.class_expression(&subject)?,
                properties: tr.key_property_list(object)?,
            },
            PredicateRule::Imports | PredicateRule::VersionIri => {
                if !cx.is_ontology(&triple.subject) {
                    return Err(TranslateError::Unresolved(format!(
                        "{} is not an ontology header",
                        triple.subject
                    )));
                }
                let iri = object_iri(object)?;
                return Ok(Plan::new(if self.rule == PredicateRule::Imports {
                    Effect::Import(iri)
                } else {
                    Effect::VersionIri(iri)
                }));
            }
        };

        Plan::axiom(tr, triple, axiom)
    }
}

/// Kind of a property in subject position; blank subjects are inverse
/// object property expressions
fn property_kind(cx: &Coordinator<'_>, subject: &RdfSubject) -> TranslateResult<ResourceKind> {
    if subject.is_blank_node() {
        return Ok(ResourceKind::ObjectProperty);
    }
    match cx.classify(subject) {
        Classification::Exactly(kind) if kind.is_property() => Ok(*kind),
        _ => Err(TranslateError::Unresolved(format!(
            "{} is not classified as a single property kind",
            subject
        ))),
    }
}

fn named_iri(subject: &RdfSubject) -> TranslateResult<Iri> {
    subject
        .as_named_node()
        .map(Iri::from)
        .ok_or_else(|| not_named(subject, "IRI"))
}

fn object_iri(object: &RdfObject) -> TranslateResult<Iri> {
    match object {
        RdfObject::NamedNode(n) => Ok(Iri::from(n)),
        other => Err(not_named(other, "IRI")),
    }
}

fn not_named(node: &impl std::fmt::Display, expected: &str) -> TranslateError {
    StructuralError::Unexpected {
        node: node.to_string(),
        expected: expected.to_string(),
    }
    .into()
}
