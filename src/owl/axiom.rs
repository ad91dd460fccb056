//! Axioms and annotations
//!
//! [`Axiom`] is a closed sum over the OWL 2 axiom types. The variant
//! constructors together with [`AnnotatedAxiom::new`] form the axiom factory:
//! building an axiom never fails.

use super::entity::{
    AnnotationProperty, Class, DataProperty, Datatype, Entity, Individual, Iri, Literal,
};
use super::expression::{ClassExpression, DataRange, ObjectPropertyExpression, PropertyExpression};
use std::collections::BTreeSet;

/// Subject of an annotation assertion
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationSubject {
    Iri(Iri),
    Anonymous(String),
}

/// Value of an annotation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationValue {
    Iri(Iri),
    Literal(Literal),
    Anonymous(String),
}

impl From<Literal> for AnnotationValue {
    fn from(lit: Literal) -> Self {
        AnnotationValue::Literal(lit)
    }
}

impl From<Iri> for AnnotationValue {
    fn from(iri: Iri) -> Self {
        AnnotationValue::Iri(iri)
    }
}

/// Annotation on an axiom or on the ontology
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Annotation {
    pub property: AnnotationProperty,
    pub value: AnnotationValue,
}

impl Annotation {
    /// Create a new annotation
    pub fn new(property: AnnotationProperty, value: impl Into<AnnotationValue>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

/// OWL 2 axiom
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axiom {
    Declaration(Entity),

    // Class axioms
    SubClassOf {
        sub: ClassExpression,
        sup: ClassExpression,
    },
    EquivalentClasses(Vec<ClassExpression>),
    DisjointClasses(Vec<ClassExpression>),
    DisjointUnion {
        class: Class,
        operands: Vec<ClassExpression>,
    },

    // Assertions
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },
    ObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        subject: Individual,
        object: Individual,
    },
    DataPropertyAssertion {
        property: DataProperty,
        subject: Individual,
        value: Literal,
    },
    NegativeObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        subject: Individual,
        object: Individual,
    },
    NegativeDataPropertyAssertion {
        property: DataProperty,
        subject: Individual,
        value: Literal,
    },
    SameIndividual(Vec<Individual>),
    DifferentIndividuals(Vec<Individual>),

    // Property characteristics
    FunctionalObjectProperty(ObjectPropertyExpression),
    FunctionalDataProperty(DataProperty),
    InverseFunctionalObjectProperty(ObjectPropertyExpression),
    SymmetricObjectProperty(ObjectPropertyExpression),
    AsymmetricObjectProperty(ObjectPropertyExpression),
    ReflexiveObjectProperty(ObjectPropertyExpression),
    IrreflexiveObjectProperty(ObjectPropertyExpression),
    TransitiveObjectProperty(ObjectPropertyExpression),

    // Property axioms
    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },
    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },
    DataPropertyDomain {
        property: DataProperty,
        domain: ClassExpression,
    },
    DataPropertyRange {
        property: DataProperty,
        range: DataRange,
    },
    SubObjectPropertyOf {
        sub: ObjectPropertyExpression,
        sup: ObjectPropertyExpression,
    },
    SubPropertyChainOf {
        chain: Vec<ObjectPropertyExpression>,
        sup: ObjectPropertyExpression,
    },
    SubDataPropertyOf {
        sub: DataProperty,
        sup: DataProperty,
    },
    EquivalentObjectProperties(Vec<ObjectPropertyExpression>),
    DisjointObjectProperties(Vec<ObjectPropertyExpression>),
    EquivalentDataProperties(Vec<DataProperty>),
    DisjointDataProperties(Vec<DataProperty>),
    InverseObjectProperties(ObjectPropertyExpression, ObjectPropertyExpression),
    HasKey {
        class: ClassExpression,
        properties: Vec<PropertyExpression>,
    },

    // Annotation axioms
    AnnotationAssertion {
        property: AnnotationProperty,
        subject: AnnotationSubject,
        value: AnnotationValue,
    },
    SubAnnotationPropertyOf {
        sub: AnnotationProperty,
        sup: AnnotationProperty,
    },
    AnnotationPropertyDomain {
        property: AnnotationProperty,
        domain: Iri,
    },
    AnnotationPropertyRange {
        property: AnnotationProperty,
        range: Iri,
    },

    DatatypeDefinition {
        datatype: Datatype,
        range: DataRange,
    },

    /// SWRL rule. Atoms are not modelled; the parser never produces this
    /// variant and both serializers reject it.
    Rule { node: String },
}

impl Axiom {
    /// Functional-syntax keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Axiom::Declaration(_) => "Declaration",
            Axiom::SubClassOf { .. } => "SubClassOf",
            Axiom::EquivalentClasses(_) => "EquivalentClasses",
            Axiom::DisjointClasses(_) => "DisjointClasses",
            Axiom::DisjointUnion { .. } => "DisjointUnion",
            Axiom::ClassAssertion { .. } => "ClassAssertion",
            Axiom::ObjectPropertyAssertion { .. } => "ObjectPropertyAssertion",
            Axiom::DataPropertyAssertion { .. } => "DataPropertyAssertion",
            Axiom::NegativeObjectPropertyAssertion { .. } => "NegativeObjectPropertyAssertion",
            Axiom::NegativeDataPropertyAssertion { .. } => "NegativeDataPropertyAssertion",
            Axiom::SameIndividual(_) => "SameIndividual",
            Axiom::DifferentIndividuals(_) => "DifferentIndividuals",
            Axiom::FunctionalObjectProperty(_) => "FunctionalObjectProperty",
            Axiom::FunctionalDataProperty(_) => "FunctionalDataProperty",
            Axiom::InverseFunctionalObjectProperty(_) => "InverseFunctionalObjectProperty",
            Axiom::SymmetricObjectProperty(_) => "SymmetricObjectProperty",
            Axiom::AsymmetricObjectProperty(_) => "AsymmetricObjectProperty",
            Axiom::ReflexiveObjectProperty(_) => "ReflexiveObjectProperty",
            Axiom::IrreflexiveObjectProperty(_) => "IrreflexiveObjectProperty",
            Axiom::TransitiveObjectProperty(_) => "TransitiveObjectProperty",
            Axiom::ObjectPropertyDomain { .. } => "ObjectPropertyDomain",
            Axiom::ObjectPropertyRange { .. } => "ObjectPropertyRange",
            Axiom::DataPropertyDomain { .. } => "DataPropertyDomain",
            Axiom::DataPropertyRange { .. } => "DataPropertyRange",
            Axiom::SubObjectPropertyOf { .. } | Axiom::SubPropertyChainOf { .. } => {
                "SubObjectPropertyOf"
            }
            Axiom::SubDataPropertyOf { .. } => "SubDataPropertyOf",
            Axiom::EquivalentObjectProperties(_) => "EquivalentObjectProperties",
            Axiom::DisjointObjectProperties(_) => "DisjointObjectProperties",
            Axiom::EquivalentDataProperties(_) => "EquivalentDataProperties",
            Axiom::DisjointDataProperties(_) => "DisjointDataProperties",
            Axiom::InverseObjectProperties(_, _) => "InverseObjectProperties",
            Axiom::HasKey { .. } => "HasKey",
            Axiom::AnnotationAssertion { .. } => "AnnotationAssertion",
            Axiom::SubAnnotationPropertyOf { .. } => "SubAnnotationPropertyOf",
            Axiom::AnnotationPropertyDomain { .. } => "AnnotationPropertyDomain",
            Axiom::AnnotationPropertyRange { .. } => "AnnotationPropertyRange",
            Axiom::DatatypeDefinition { .. } => "DatatypeDefinition",
            Axiom::Rule { .. } => "DLSafeRule",
        }
    }

    /// Entities this axiom is primarily about: the subject position of
    /// directed axioms and every named operand of symmetric ones.
    /// Declarations and annotation assertions are excluded; the ontology
    /// indexes those separately.
    pub fn about(&self) -> Vec<Entity> {
        match self {
            Axiom::Declaration(_) | Axiom::AnnotationAssertion { .. } | Axiom::Rule { .. } => {
                Vec::new()
            }
            Axiom::SubClassOf { sub, .. } => sub.as_entity().into_iter().collect(),
            Axiom::EquivalentClasses(ops) | Axiom::DisjointClasses(ops) => {
                ops.iter().filter_map(ClassExpression::as_entity).collect()
            }
            Axiom::DisjointUnion { class, .. } => vec![Entity::Class(class.clone())],
            Axiom::HasKey { class, .. } => class.as_entity().into_iter().collect(),
            Axiom::ClassAssertion { individual, .. } => individual.as_entity().into_iter().collect(),
            Axiom::ObjectPropertyAssertion { subject, .. }
            | Axiom::DataPropertyAssertion { subject, .. }
            | Axiom::NegativeObjectPropertyAssertion { subject, .. }
            | Axiom::NegativeDataPropertyAssertion { subject, .. } => {
                subject.as_entity().into_iter().collect()
            }
            Axiom::SameIndividual(ops) | Axiom::DifferentIndividuals(ops) => {
                ops.iter().filter_map(Individual::as_entity).collect()
            }
            Axiom::FunctionalObjectProperty(p)
            | Axiom::InverseFunctionalObjectProperty(p)
            | Axiom::SymmetricObjectProperty(p)
            | Axiom::AsymmetricObjectProperty(p)
            | Axiom::ReflexiveObjectProperty(p)
            | Axiom::IrreflexiveObjectProperty(p)
            | Axiom::TransitiveObjectProperty(p)
            | Axiom::ObjectPropertyDomain { property: p, .. }
            | Axiom::ObjectPropertyRange { property: p, .. }
            | Axiom::SubObjectPropertyOf { sub: p, .. }
            | Axiom::SubPropertyChainOf { sup: p, .. } => p.as_entity().into_iter().collect(),
            Axiom::FunctionalDataProperty(p)
            | Axiom::DataPropertyDomain { property: p, .. }
            | Axiom::DataPropertyRange { property: p, .. }
            | Axiom::SubDataPropertyOf { sub: p, .. } => vec![Entity::DataProperty(p.clone())],
            Axiom::EquivalentObjectProperties(ops) | Axiom::DisjointObjectProperties(ops) => {
                ops.iter().filter_map(ObjectPropertyExpression::as_entity).collect()
            }
            Axiom::InverseObjectProperties(a, b) => {
                a.as_entity().into_iter().chain(b.as_entity()).collect()
            }
            Axiom::EquivalentDataProperties(ops) | Axiom::DisjointDataProperties(ops) => {
                ops.iter().cloned().map(Entity::DataProperty).collect()
            }
            Axiom::SubAnnotationPropertyOf { sub: p, .. }
            | Axiom::AnnotationPropertyDomain { property: p, .. }
            | Axiom::AnnotationPropertyRange { property: p, .. } => {
                vec![Entity::AnnotationProperty(p.clone())]
            }
            Axiom::DatatypeDefinition { datatype, .. } => vec![Entity::Datatype(datatype.clone())],
        }
    }

    /// Add every entity mentioned by the axiom to `out`
    pub(crate) fn collect_signature(&self, out: &mut BTreeSet<Entity>) {
        match self {
            Axiom::Declaration(e) => {
                out.insert(e.clone());
            }
            Axiom::SubClassOf { sub, sup } => {
                sub.collect_signature(out);
                sup.collect_signature(out);
            }
            Axiom::EquivalentClasses(ops) | Axiom::DisjointClasses(ops) => {
                ops.iter().for_each(|op| op.collect_signature(out));
            }
            Axiom::DisjointUnion { class, operands } => {
                out.insert(Entity::Class(class.clone()));
                operands.iter().for_each(|op| op.collect_signature(out));
            }
            Axiom::ClassAssertion { class, individual } => {
                class.collect_signature(out);
                out.extend(individual.as_entity());
            }
            Axiom::ObjectPropertyAssertion { property, subject, object }
            | Axiom::NegativeObjectPropertyAssertion { property, subject, object } => {
                property.collect_signature(out);
                out.extend(subject.as_entity());
                out.extend(object.as_entity());
            }
            Axiom::DataPropertyAssertion { property, subject, .. }
            | Axiom::NegativeDataPropertyAssertion { property, subject, .. } => {
                out.insert(Entity::DataProperty(property.clone()));
                out.extend(subject.as_entity());
            }
            Axiom::SameIndividual(ops) | Axiom::DifferentIndividuals(ops) => {
                out.extend(ops.iter().filter_map(Individual::as_entity));
            }
            Axiom::FunctionalObjectProperty(p)
            | Axiom::InverseFunctionalObjectProperty(p)
            | Axiom::SymmetricObjectProperty(p)
            | Axiom::AsymmetricObjectProperty(p)
            | Axiom::ReflexiveObjectProperty(p)
            | Axiom::IrreflexiveObjectProperty(p)
            | Axiom::TransitiveObjectProperty(p) => p.collect_signature(out),
            Axiom::FunctionalDataProperty(p) => {
                out.insert(Entity::DataProperty(p.clone()));
            }
            Axiom::ObjectPropertyDomain { property, domain: ce }
            | Axiom::ObjectPropertyRange { property, range: ce } => {
                property.collect_signature(out);
                ce.collect_signature(out);
            }
            Axiom::DataPropertyDomain { property, domain } => {
                out.insert(Entity::DataProperty(property.clone()));
                domain.collect_signature(out);
            }
            Axiom::DataPropertyRange { property, range } => {
                out.insert(Entity::DataProperty(property.clone()));
                range.collect_signature(out);
            }
            Axiom::SubObjectPropertyOf { sub, sup } => {
                sub.collect_signature(out);
                sup.collect_signature(out);
            }
            Axiom::SubPropertyChainOf { chain, sup } => {
                chain.iter().for_each(|p| p.collect_signature(out));
                sup.collect_signature(out);
            }
            Axiom::SubDataPropertyOf { sub, sup } => {
                out.insert(Entity::DataProperty(sub.clone()));
                out.insert(Entity::DataProperty(sup.clone()));
            }
            Axiom::EquivalentObjectProperties(ops) | Axiom::DisjointObjectProperties(ops) => {
                ops.iter().for_each(|p| p.collect_signature(out));
            }
            Axiom::EquivalentDataProperties(ops) | Axiom::DisjointDataProperties(ops) => {
                out.extend(ops.iter().cloned().map(Entity::DataProperty));
            }
            Axiom::InverseObjectProperties(a, b) => {
                a.collect_signature(out);
                b.collect_signature(out);
            }
            Axiom::HasKey { class, properties } => {
                class.collect_signature(out);
                properties.iter().for_each(|p| p.collect_signature(out));
            }
            Axiom::AnnotationAssertion { property, .. }
            | Axiom::AnnotationPropertyDomain { property, .. }
            | Axiom::AnnotationPropertyRange { property, .. } => {
                out.insert(Entity::AnnotationProperty(property.clone()));
            }
            Axiom::SubAnnotationPropertyOf { sub, sup } => {
                out.insert(Entity::AnnotationProperty(sub.clone()));
                out.insert(Entity::AnnotationProperty(sup.clone()));
            }
            Axiom::DatatypeDefinition { datatype, range } => {
                out.insert(Entity::Datatype(datatype.clone()));
                range.collect_signature(out);
            }
            Axiom::Rule { .. } => {}
        }
    }
}

/// An axiom together with its (possibly empty) annotation set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotatedAxiom {
    pub axiom: Axiom,
    pub annotations: BTreeSet<Annotation>,
}

impl AnnotatedAxiom {
    /// Create an annotated axiom
    pub fn new(axiom: Axiom, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        Self {
            axiom,
            annotations: annotations.into_iter().collect(),
        }
    }

    /// Create an axiom without annotations
    pub fn plain(axiom: Axiom) -> Self {
        Self::new(axiom, std::iter::empty())
    }
}

impl From<Axiom> for AnnotatedAxiom {
    fn from(axiom: Axiom) -> Self {
        Self::plain(axiom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owl::entity::ObjectProperty;

    #[test]
    fn test_about_directed_and_symmetric() {
        let sub = Axiom::SubClassOf {
            sub: ClassExpression::class("http://example.org/A"),
            sup: ClassExpression::class("http://example.org/B"),
        };
        assert_eq!(
            sub.about(),
            vec![Entity::Class(Class::new("http://example.org/A"))]
        );

        let eq = Axiom::EquivalentClasses(vec![
            ClassExpression::class("http://example.org/A"),
            ClassExpression::class("http://example.org/B"),
        ]);
        assert_eq!(eq.about().len(), 2);

        let chain = Axiom::SubPropertyChainOf {
            chain: vec![
                ObjectPropertyExpression::named("http://example.org/p1"),
                ObjectPropertyExpression::named("http://example.org/p2"),
            ],
            sup: ObjectPropertyExpression::named("http://example.org/p"),
        };
        assert_eq!(
            chain.about(),
            vec![Entity::ObjectProperty(ObjectProperty::new("http://example.org/p"))]
        );
        assert_eq!(chain.keyword(), "SubObjectPropertyOf");
    }

    #[test]
    fn test_annotations_are_a_set() {
        let label = Annotation::new(
            AnnotationProperty::new(crate::rdf::vocab::rdfs::LABEL),
            Literal::string("x"),
        );
        let ax = AnnotatedAxiom::new(
            Axiom::Declaration(Entity::Class(Class::new("http://example.org/A"))),
            vec![label.clone(), label],
        );
        assert_eq!(ax.annotations.len(), 1);
    }
}
