//! Type-declaration handlers: `rdf:type` triples keyed on their object

use super::{subject_term, Effect, HandlerTier, Pass, Plan, TripleHandler};
use crate::owl::{
    AnnotationProperty, Axiom, Class, DataProperty, Datatype, Entity, Iri, NamedIndividual,
    ObjectProperty,
};
use crate::parser::classification::{Classification, ResourceKind};
use crate::parser::coordinator::Coordinator;
use crate::parser::translate::{TranslateError, TranslateResult, Translator};
use crate::rdf::vocab::{self, owl, rdf, rdfs, swrl};
use crate::rdf::{RdfObject, RdfSubject, Triple};

/// One `rdf:type` object and what it means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRule {
    DeclareClass,
    DeclareObjectProperty,
    DeclareDataProperty,
    DeclareAnnotationProperty,
    DeclareNamedIndividual,
    DeclareDatatype,
    DeclareOntology,
    Functional,
    InverseFunctional,
    Symmetric,
    Asymmetric,
    Reflexive,
    Irreflexive,
    Transitive,
    AllDisjointClasses,
    AllDisjointProperties,
    AllDifferent,
    NegativePropertyAssertion,
    Rule,
    /// Any other type: a class assertion. Registered last.
    ClassAssertion,
}

impl TypeRule {
    pub const ALL: [TypeRule; 20] = [
        TypeRule::DeclareClass,
        TypeRule::DeclareObjectProperty,
        TypeRule::DeclareDataProperty,
        TypeRule::DeclareAnnotationProperty,
        TypeRule::DeclareNamedIndividual,
        TypeRule::DeclareDatatype,
        TypeRule::DeclareOntology,
        TypeRule::Functional,
        TypeRule::InverseFunctional,
        TypeRule::Symmetric,
        TypeRule::Asymmetric,
        TypeRule::Reflexive,
        TypeRule::Irreflexive,
        TypeRule::Transitive,
        TypeRule::AllDisjointClasses,
        TypeRule::AllDisjointProperties,
        TypeRule::AllDifferent,
        TypeRule::NegativePropertyAssertion,
        TypeRule::Rule,
        TypeRule::ClassAssertion,
    ];

    /// The `rdf:type` object, or `None` for class assertions
    pub fn type_iri(self) -> Option<&'static str> {
        let iri = match self {
            TypeRule::DeclareClass => owl::CLASS,
            TypeRule::DeclareObjectProperty => owl::OBJECT_PROPERTY,
            TypeRule::DeclareDataProperty => owl::DATATYPE_PROPERTY,
            TypeRule::DeclareAnnotationProperty => owl::ANNOTATION_PROPERTY,
            TypeRule::DeclareNamedIndividual => owl::NAMED_INDIVIDUAL,
            TypeRule::DeclareDatatype => rdfs::DATATYPE,
            TypeRule::DeclareOntology => owl::ONTOLOGY,
            TypeRule::Functional => owl::FUNCTIONAL_PROPERTY,
            TypeRule::InverseFunctional => owl::INVERSE_FUNCTIONAL_PROPERTY,
            TypeRule::Symmetric => owl::SYMMETRIC_PROPERTY,
            TypeRule::Asymmetric => owl::ASYMMETRIC_PROPERTY,
            TypeRule::Reflexive => owl::REFLEXIVE_PROPERTY,
            TypeRule::Irreflexive => owl::IRREFLEXIVE_PROPERTY,
            TypeRule::Transitive => owl::TRANSITIVE_PROPERTY,
            TypeRule::AllDisjointClasses => owl::ALL_DISJOINT_CLASSES,
            TypeRule::AllDisjointProperties => owl::ALL_DISJOINT_PROPERTIES,
            TypeRule::AllDifferent => owl::ALL_DIFFERENT,
            TypeRule::NegativePropertyAssertion => owl::NEGATIVE_PROPERTY_ASSERTION,
            TypeRule::Rule => swrl::IMP,
            TypeRule::ClassAssertion => return None,
        };
        Some(iri)
    }

    fn name(self) -> &'static str {
        match self {
            TypeRule::DeclareClass => "declareClass",
            TypeRule::DeclareObjectProperty => "declareObjectProperty",
            TypeRule::DeclareDataProperty => "declareDataProperty",
            TypeRule::DeclareAnnotationProperty => "declareAnnotationProperty",
            TypeRule::DeclareNamedIndividual => "declareNamedIndividual",
            TypeRule::DeclareDatatype => "declareDatatype",
            TypeRule::DeclareOntology => "ontologyHeader",
            TypeRule::Functional => "functionalProperty",
            TypeRule::InverseFunctional => "inverseFunctionalProperty",
            TypeRule::Symmetric => "symmetricProperty",
            TypeRule::Asymmetric => "asymmetricProperty",
            TypeRule::Reflexive => "reflexiveProperty",
            TypeRule::Irreflexive => "irreflexiveProperty",
            TypeRule::Transitive => "transitiveProperty",
            TypeRule::AllDisjointClasses => "allDisjointClasses",
            TypeRule::AllDisjointProperties => "allDisjointProperties",
            TypeRule::AllDifferent => "allDifferent",
            TypeRule::NegativePropertyAssertion => "negativePropertyAssertion",
            TypeRule::Rule => "swrlRule",
            TypeRule::ClassAssertion => "classAssertion",
        }
    }

    fn is_declaration(self) -> bool {
        matches!(
            self,
            TypeRule::DeclareClass
                | TypeRule::DeclareObjectProperty
                | TypeRule::DeclareDataProperty
                | TypeRule::DeclareAnnotationProperty
                | TypeRule::DeclareNamedIndividual
                | TypeRule::DeclareDatatype
        )
    }
}

/// True for `rdf:type` objects that state a property characteristic
pub fn is_characteristic(iri: &str) -> bool {
    [
        owl::FUNCTIONAL_PROPERTY,
        owl::INVERSE_FUNCTIONAL_PROPERTY,
        owl::SYMMETRIC_PROPERTY,
        owl::ASYMMETRIC_PROPERTY,
        owl::REFLEXIVE_PROPERTY,
        owl::IRREFLEXIVE_PROPERTY,
        owl::TRANSITIVE_PROPERTY,
    ]
    .contains(&iri)
}

/// Handler for one [`TypeRule`]
#[derive(Debug, Clone, Copy)]
pub struct TypeHandler {
    rule: TypeRule,
}

impl TypeHandler {
    pub fn new(rule: TypeRule) -> Self {
        Self { rule }
    }
}

impl TripleHandler for TypeHandler {
    fn name(&self) -> &'static str {
        self.rule.name()
    }

    fn tier(&self) -> HandlerTier {
        HandlerTier::TypeDeclaration
    }

    fn matches(&self, triple: &Triple) -> bool {
        if triple.predicate.as_str() != rdf::TYPE {
            return false;
        }
        match self.rule.type_iri() {
            // Blank nodes typed owl:Class or rdfs:Datatype are expressions
            Some(iri) if self.rule.is_declaration() => {
                triple.object.is_iri(iri) && triple.subject.is_named_node()
            }
            Some(iri) => triple.object.is_iri(iri),
            None => match &triple.object {
                RdfObject::NamedNode(n) => {
                    n.as_str() == owl::THING || !vocab::is_reserved(n.as_str())
                }
                RdfObject::BlankNode(_) => true,
                RdfObject::Literal(_) => false,
            },
        }
    }

    fn plan(&self, triple: &Triple, cx: &Coordinator<'_>, pass: Pass) -> TranslateResult<Plan> {
        let subject = &triple.subject;
        let mut tr = cx.translator(pass);

        if self.rule.is_declaration() {
            let Some(node) = subject.as_named_node() else {
                return Err(TranslateError::Unresolved(format!("{} is not named", subject)));
            };
            let iri = Iri::from(node);
            let (kind, entity) = match self.rule {
                TypeRule::DeclareClass => (ResourceKind::Class, Entity::from(Class::new(iri))),
                TypeRule::DeclareObjectProperty => (
                    ResourceKind::ObjectProperty,
                    Entity::from(ObjectProperty::new(iri)),
                ),
                TypeRule::DeclareDataProperty => (
                    ResourceKind::DataProperty,
                    Entity::from(DataProperty::new(iri)),
                ),
                TypeRule::DeclareAnnotationProperty => (
                    ResourceKind::AnnotationProperty,
                    Entity::from(AnnotationProperty::new(iri)),
                ),
                TypeRule::DeclareNamedIndividual => (
                    ResourceKind::Individual,
                    Entity::from(NamedIndividual::new(iri)),
                ),
                _ => (ResourceKind::Datatype, Entity::from(Datatype::new(iri))),
            };
            let annotations = tr.reified_annotations(triple)?;
            let effect = Effect::Declare {
                resource: subject.clone(),
                kind,
                axiom: Some(Axiom::Declaration(entity)),
            };
            return Ok(Plan::with_footprint(effect, tr.finish(), annotations));
        }

        let axiom = match self.rule {
            TypeRule::DeclareOntology => return Ok(Plan::new(Effect::Ontology(subject.clone()))),
            TypeRule::Functional => match characteristic_kind(cx, subject)? {
                ResourceKind::DataProperty => {
                    Axiom::FunctionalDataProperty(tr.data_property(&subject_term(triple), false)?)
                }
                _ => Axiom::FunctionalObjectProperty(
                    tr.object_property_expression(&subject_term(triple), false)?,
                ),
            },
            TypeRule::InverseFunctional
            | TypeRule::Symmetric
            | TypeRule::Asymmetric
            | TypeRule::Reflexive
            | TypeRule::Irreflexive
            | TypeRule::Transitive => {
                let property = tr.object_property_expression(&subject_term(triple), false)?;
                match self.rule {
                    TypeRule::InverseFunctional => Axiom::InverseFunctionalObjectProperty(property),
                    TypeRule::Symmetric => Axiom::SymmetricObjectProperty(property),
                    TypeRule::Asymmetric => Axiom::AsymmetricObjectProperty(property),
                    TypeRule::Reflexive => Axiom::ReflexiveObjectProperty(property),
                    TypeRule::Irreflexive => Axiom::IrreflexiveObjectProperty(property),
                    _ => Axiom::TransitiveObjectProperty(property),
                }
            }
            TypeRule::AllDisjointClasses => {
                let members = tr.required(subject, owl::MEMBERS)?;
                let operands = tr.class_expression_list(&members.object)?;
                return root_plan(tr, subject, Axiom::DisjointClasses(operands));
            }
            TypeRule::AllDisjointProperties => {
                let members = tr.required(subject, owl::MEMBERS)?;
                let items = tr.list(&members.object)?;
                let axiom = match super::shared_property_kind(cx, items.iter().copied())? {
                    ResourceKind::ObjectProperty => Axiom::DisjointObjectProperties(
                        items
                            .into_iter()
                            .map(|p| tr.object_property_expression(p, true))
                            .collect::<TranslateResult<_>>()?,
                    ),
                    ResourceKind::DataProperty => Axiom::DisjointDataProperties(
                        items
                            .into_iter()
                            .map(|p| tr.data_property(p, true))
                            .collect::<TranslateResult<_>>()?,
                    ),
                    kind => {
                        return Err(TranslateError::Unresolved(format!(
                            "disjoint {} members have no OWL 2 form",
                            kind
                        )))
                    }
                };
                return root_plan(tr, subject, axiom);
            }
            TypeRule::AllDifferent => {
                let members = match tr.optional(subject, owl::MEMBERS)? {
                    Some(members) => members,
                    None => tr.required(subject, owl::DISTINCT_MEMBERS)?,
                };
                let individuals = tr.individual_list(&members.object)?;
                return root_plan(tr, subject, Axiom::DifferentIndividuals(individuals));
            }
            TypeRule::NegativePropertyAssertion => {
                let source = tr.required(subject, owl::SOURCE_INDIVIDUAL)?;
                let property = tr.required(subject, owl::ASSERTION_PROPERTY)?;
                let source = tr.individual(&source.object)?;
                let axiom = if let Some(value) = tr.optional(subject, owl::TARGET_VALUE)? {
                    Axiom::NegativeDataPropertyAssertion {
                        property: tr.data_property(&property.object, true)?,
                        subject: source,
                        value: tr.literal(&value.object)?,
                    }
                } else {
                    let target = tr.required(subject, owl::TARGET_INDIVIDUAL)?;
                    Axiom::NegativeObjectPropertyAssertion {
                        property: tr.object_property_expression(&property.object, true)?,
                        subject: source,
                        object: tr.individual(&target.object)?,
                    }
                };
                return root_plan(tr, subject, axiom);
            }
            TypeRule::Rule => {
                return Err(TranslateError::Unsupported {
                    node: subject.to_string(),
                    construct: "swrl:Imp".to_string(),
                })
            }
            _ => {
                if cx.index().is_structural(subject) {
                    return Err(TranslateError::Unresolved(format!(
                        "{} is part of a larger structure",
                        subject
                    )));
                }
                Axiom::ClassAssertion {
                    class: tr.class_expression(&triple.object)?,
                    individual: tr.subject_individual(subject),
                }
            }
        };

        Plan::axiom(tr, triple, axiom)
    }
}

/// Object or data kind of a functional property. Unknown subjects are left
/// to the ambiguity policy.
fn characteristic_kind(cx: &Coordinator<'_>, subject: &RdfSubject) -> TranslateResult<ResourceKind> {
    if subject.is_blank_node() {
        return Ok(ResourceKind::ObjectProperty);
    }
    match cx.classify(subject) {
        Classification::Exactly(kind @ (ResourceKind::ObjectProperty | ResourceKind::DataProperty)) => {
            Ok(*kind)
        }
        _ => Err(TranslateError::Unresolved(format!(
            "{} is not classified as an object or data property",
            subject
        ))),
    }
}

/// Axiom built from a blank root node; annotations sit on the root itself
fn root_plan(mut tr: Translator<'_>, root: &RdfSubject, axiom: Axiom) -> TranslateResult<Plan> {
    let annotations = tr.annotations_on(root)?;
    Ok(Plan::with_footprint(Effect::Axiom(axiom), tr.finish(), annotations))
}
