//! Ontology to RDF mapping
//!
//! Produces the triples of the OWL 2 RDF mapping for an [`Ontology`]:
//! binary axioms become one main triple, n-ary disjointness and negative
//! assertions hang off a typed blank root, and annotated axioms are reified
//! with an `owl:Axiom` node (or annotated directly on their blank root).

use super::axiom::{AnnotatedAxiom, Annotation, AnnotationSubject, AnnotationValue, Axiom};
use super::entity::{Individual, Iri, Literal};
use super::expression::{ClassExpression, DataRange, ObjectPropertyExpression, PropertyExpression};
use super::ontology::Ontology;
use crate::rdf::vocab::{owl, rdf, rdfs, xsd};
use crate::rdf::{
    BlankNode, NamedNode, RdfError, RdfFormat, RdfObject, RdfPredicate, RdfSerializer,
    RdfSubject, SerializeError, Triple,
};
use thiserror::Error;

/// RDF writer errors
#[derive(Error, Debug)]
pub enum WriteError {
    /// Axiom type with no RDF mapping
    #[error("Unsupported construct: {0}")]
    Unsupported(String),

    /// A model IRI the RDF term layer rejects
    #[error("Invalid term: {0}")]
    InvalidTerm(#[from] RdfError),

    /// Formatting the triples failed
    #[error("Serialization failed: {0}")]
    Serialize(#[from] SerializeError),
}

pub type WriteResult<T> = Result<T, WriteError>;

/// Where an axiom's annotations attach
enum Anchor {
    /// Main triples, reified one by one
    Triples(Vec<Triple>),
    /// Blank root node carrying the annotations directly
    Root(RdfSubject),
}

/// Maps an ontology to RDF triples
#[derive(Debug, Default)]
pub struct RdfWriter {
    triples: Vec<Triple>,
}

impl RdfWriter {
    /// Create a new writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an ontology to triples
    pub fn write(ontology: &Ontology) -> WriteResult<Vec<Triple>> {
        let mut writer = Self::new();
        writer.header(ontology)?;
        for annotated in ontology.axioms() {
            writer.annotated_axiom(annotated)?;
        }
        tracing::debug!(
            "Wrote {} axioms as {} triples",
            ontology.axiom_count(),
            writer.triples.len()
        );
        Ok(writer.triples)
    }

    /// Map an ontology to a document in the given format
    pub fn to_document(ontology: &Ontology, format: RdfFormat) -> WriteResult<String> {
        let triples = Self::write(ontology)?;
        Ok(RdfSerializer::serialize(&triples, format)?)
    }

    fn header(&mut self, ontology: &Ontology) -> WriteResult<()> {
        let node = match ontology.iri() {
            Some(iri) => self.iri_subject(iri)?,
            None => self.fresh(),
        };
        self.emit(node.clone(), rdf::TYPE, named(owl::ONTOLOGY)?)?;
        if let Some(version) = ontology.version_iri() {
            self.emit(node.clone(), owl::VERSION_IRI, named(version.as_str())?)?;
        }
        for import in ontology.imports() {
            self.emit(node.clone(), owl::IMPORTS, named(import.as_str())?)?;
        }
        for annotation in ontology.annotations() {
            self.annotation(node.clone(), annotation)?;
        }
        Ok(())
    }

    fn annotated_axiom(&mut self, annotated: &AnnotatedAxiom) -> WriteResult<()> {
        match self.axiom(&annotated.axiom)? {
            Anchor::Root(root) => {
                for annotation in &annotated.annotations {
                    self.annotation(root.clone(), annotation)?;
                }
            }
            Anchor::Triples(main) => {
                if annotated.annotations.is_empty() {
                    return Ok(());
                }
                for triple in main {
                    let node = self.fresh();
                    self.emit(node.clone(), rdf::TYPE, named(owl::AXIOM)?)?;
                    self.emit(node.clone(), owl::ANNOTATED_SOURCE, RdfObject::from(triple.subject))?;
                    self.emit(
                        node.clone(),
                        owl::ANNOTATED_PROPERTY,
                        triple.predicate.as_named_node().clone(),
                    )?;
                    self.emit(node.clone(), owl::ANNOTATED_TARGET, triple.object)?;
                    for annotation in &annotated.annotations {
                        self.annotation(node.clone(), annotation)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn annotation(&mut self, subject: RdfSubject, annotation: &Annotation) -> WriteResult<Triple> {
        let value = self.annotation_value(&annotation.value)?;
        self.emit(subject, annotation.property.iri().as_str(), value)
    }

    fn axiom(&mut self, axiom: &Axiom) -> WriteResult<Anchor> {
        let main = match axiom {
            Axiom::Declaration(entity) => {
                let subject = self.iri_subject(entity.iri())?;
                vec![self.emit(subject, rdf::TYPE, named(entity.declaration_type())?)?]
            }
            Axiom::SubClassOf { sub, sup } => {
                let s = self.class_expression(sub)?;
                let o = self.class_expression(sup)?;
                vec![self.emit_object(s, rdfs::SUB_CLASS_OF, o)?]
            }
            Axiom::EquivalentClasses(ops) => {
                let nodes = ops
                    .iter()
                    .map(|op| self.class_expression(op))
                    .collect::<WriteResult<Vec<_>>>()?;
                self.pairwise(nodes, owl::EQUIVALENT_CLASS)?
            }
            Axiom::DisjointClasses(ops) => {
                let nodes = ops
                    .iter()
                    .map(|op| self.class_expression(op))
                    .collect::<WriteResult<Vec<_>>>()?;
                if nodes.len() == 2 {
                    self.pairwise(nodes, owl::DISJOINT_WITH)?
                } else {
                    return self.members_root(owl::ALL_DISJOINT_CLASSES, owl::MEMBERS, nodes);
                }
            }
            Axiom::DisjointUnion { class, operands } => {
                let subject = self.iri_subject(class.iri())?;
                let nodes = operands
                    .iter()
                    .map(|op| self.class_expression(op))
                    .collect::<WriteResult<Vec<_>>>()?;
                let list = self.list(nodes)?;
                vec![self.emit(subject, owl::DISJOINT_UNION_OF, list)?]
            }
            Axiom::ClassAssertion { class, individual } => {
                let s = self.individual(individual)?;
                let o = self.class_expression(class)?;
                vec![self.emit_object(s, rdf::TYPE, o)?]
            }
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => {
                let s = self.individual(subject)?;
                let o = self.individual(object)?;
                let p = property.named_property().iri().as_str();
                match property {
                    ObjectPropertyExpression::ObjectProperty(_) => vec![self.emit_object(s, p, o)?],
                    ObjectPropertyExpression::InverseObjectProperty(_) => {
                        vec![self.emit_object(o, p, s)?]
                    }
                }
            }
            Axiom::DataPropertyAssertion {
                property,
                subject,
                value,
            } => {
                let s = self.individual(subject)?;
                let o = literal(value)?;
                vec![self.emit_object(s, property.iri().as_str(), o)?]
            }
            Axiom::NegativeObjectPropertyAssertion {
                property,
                subject,
                object,
            } => {
                let p = self.object_property(property)?;
                let s = self.individual(subject)?;
                let o = self.individual(object)?;
                return self.negative_assertion(p, s, owl::TARGET_INDIVIDUAL, o);
            }
            Axiom::NegativeDataPropertyAssertion {
                property,
                subject,
                value,
            } => {
                let p = RdfObject::from(named(property.iri().as_str())?);
                let s = self.individual(subject)?;
                let o = RdfObject::from(literal(value)?);
                return self.negative_assertion(p, s, owl::TARGET_VALUE, o);
            }
            Axiom::SameIndividual(ops) => {
                let nodes = ops
                    .iter()
                    .map(|i| self.individual(i))
                    .collect::<WriteResult<Vec<_>>>()?;
                self.pairwise(nodes, owl::SAME_AS)?
            }
            Axiom::DifferentIndividuals(ops) => {
                let nodes = ops
                    .iter()
                    .map(|i| self.individual(i))
                    .collect::<WriteResult<Vec<_>>>()?;
                if nodes.len() == 2 {
                    self.pairwise(nodes, owl::DIFFERENT_FROM)?
                } else {
                    return self.members_root(owl::ALL_DIFFERENT, owl::MEMBERS, nodes);
                }
            }
            Axiom::FunctionalObjectProperty(p) => self.characteristic(p, owl::FUNCTIONAL_PROPERTY)?,
            Axiom::InverseFunctionalObjectProperty(p) => {
                self.characteristic(p, owl::INVERSE_FUNCTIONAL_PROPERTY)?
            }
            Axiom::SymmetricObjectProperty(p) => self.characteristic(p, owl::SYMMETRIC_PROPERTY)?,
            Axiom::AsymmetricObjectProperty(p) => self.characteristic(p, owl::ASYMMETRIC_PROPERTY)?,
            Axiom::ReflexiveObjectProperty(p) => self.characteristic(p, owl::REFLEXIVE_PROPERTY)?,
            Axiom::IrreflexiveObjectProperty(p) => {
                self.characteristic(p, owl::IRREFLEXIVE_PROPERTY)?
            }
            Axiom::TransitiveObjectProperty(p) => self.characteristic(p, owl::TRANSITIVE_PROPERTY)?,
            Axiom::FunctionalDataProperty(p) => {
                let s = self.iri_subject(p.iri())?;
                vec![self.emit(s, rdf::TYPE, named(owl::FUNCTIONAL_PROPERTY)?)?]
            }
            Axiom::ObjectPropertyDomain { property, domain } => {
                let s = self.object_property(property)?;
                let o = self.class_expression(domain)?;
                vec![self.emit_object(s, rdfs::DOMAIN, o)?]
            }
            Axiom::ObjectPropertyRange { property, range } => {
                let s = self.object_property(property)?;
                let o = self.class_expression(range)?;
                vec![self.emit_object(s, rdfs::RANGE, o)?]
            }
            Axiom::DataPropertyDomain { property, domain } => {
                let s = self.iri_subject(property.iri())?;
                let o = self.class_expression(domain)?;
                vec![self.emit(s, rdfs::DOMAIN, o)?]
            }
            Axiom::DataPropertyRange { property, range } => {
                let s = self.iri_subject(property.iri())?;
                let o = self.data_range(range)?;
                vec![self.emit(s, rdfs::RANGE, o)?]
            }
            Axiom::SubObjectPropertyOf { sub, sup } => {
                let s = self.object_property(sub)?;
                let o = self.object_property(sup)?;
                vec![self.emit_object(s, rdfs::SUB_PROPERTY_OF, o)?]
            }
            Axiom::SubPropertyChainOf { chain, sup } => {
                let s = self.object_property(sup)?;
                let nodes = chain
                    .iter()
                    .map(|p| self.object_property(p))
                    .collect::<WriteResult<Vec<_>>>()?;
                let list = self.list(nodes)?;
                vec![self.emit_object(s, owl::PROPERTY_CHAIN_AXIOM, list)?]
            }
            Axiom::SubDataPropertyOf { sub, sup } => {
                let s = self.iri_subject(sub.iri())?;
                vec![self.emit(s, rdfs::SUB_PROPERTY_OF, named(sup.iri().as_str())?)?]
            }
            Axiom::EquivalentObjectProperties(ops) => {
                let nodes = ops
                    .iter()
                    .map(|p| self.object_property(p))
                    .collect::<WriteResult<Vec<_>>>()?;
                self.pairwise(nodes, owl::EQUIVALENT_PROPERTY)?
            }
            Axiom::DisjointObjectProperties(ops) => {
                let nodes = ops
                    .iter()
                    .map(|p| self.object_property(p))
                    .collect::<WriteResult<Vec<_>>>()?;
                if nodes.len() == 2 {
                    self.pairwise(nodes, owl::PROPERTY_DISJOINT_WITH)?
                } else {
                    return self.members_root(owl::ALL_DISJOINT_PROPERTIES, owl::MEMBERS, nodes);
                }
            }
            Axiom::EquivalentDataProperties(ops) => {
                let nodes = ops
                    .iter()
                    .map(|p| named(p.iri().as_str()).map(RdfObject::from))
                    .collect::<WriteResult<Vec<_>>>()?;
                self.pairwise(nodes, owl::EQUIVALENT_PROPERTY)?
            }
            Axiom::DisjointDataProperties(ops) => {
                let nodes = ops
                    .iter()
                    .map(|p| named(p.iri().as_str()).map(RdfObject::from))
                    .collect::<WriteResult<Vec<_>>>()?;
                if nodes.len() == 2 {
                    self.pairwise(nodes, owl::PROPERTY_DISJOINT_WITH)?
                } else {
                    return self.members_root(owl::ALL_DISJOINT_PROPERTIES, owl::MEMBERS, nodes);
                }
            }
            Axiom::InverseObjectProperties(first, second) => {
                // A named property reads back as the subject of owl:inverseOf
                let (first, second) = match (first, second) {
                    (ObjectPropertyExpression::InverseObjectProperty(_), ObjectPropertyExpression::ObjectProperty(_)) => {
                        (second, first)
                    }
                    _ => (first, second),
                };
                let s = self.object_property(first)?;
                let o = self.object_property(second)?;
                vec![self.emit_object(s, owl::INVERSE_OF, o)?]
            }
            Axiom::HasKey { class, properties } => {
                let s = self.class_expression(class)?;
                let nodes = properties
                    .iter()
                    .map(|p| match p {
                        PropertyExpression::Object(p) => self.object_property(p),
                        PropertyExpression::Data(p) => named(p.iri().as_str()).map(RdfObject::from),
                    })
                    .collect::<WriteResult<Vec<_>>>()?;
                let list = self.list(nodes)?;
                vec![self.emit_object(s, owl::HAS_KEY, list)?]
            }
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                let s = match subject {
                    AnnotationSubject::Iri(iri) => self.iri_subject(iri)?,
                    AnnotationSubject::Anonymous(label) => {
                        RdfSubject::BlankNode(BlankNode::from_str(label)?)
                    }
                };
                let o = self.annotation_value(value)?;
                vec![self.emit(s, property.iri().as_str(), o)?]
            }
            Axiom::SubAnnotationPropertyOf { sub, sup } => {
                let s = self.iri_subject(sub.iri())?;
                vec![self.emit(s, rdfs::SUB_PROPERTY_OF, named(sup.iri().as_str())?)?]
            }
            Axiom::AnnotationPropertyDomain { property, domain } => {
                let s = self.iri_subject(property.iri())?;
                vec![self.emit(s, rdfs::DOMAIN, named(domain.as_str())?)?]
            }
            Axiom::AnnotationPropertyRange { property, range } => {
                let s = self.iri_subject(property.iri())?;
                vec![self.emit(s, rdfs::RANGE, named(range.as_str())?)?]
            }
            Axiom::DatatypeDefinition { datatype, range } => {
                let s = self.iri_subject(datatype.iri())?;
                let o = self.data_range(range)?;
                vec![self.emit(s, owl::EQUIVALENT_CLASS, o)?]
            }
            Axiom::Rule { .. } => {
                return Err(WriteError::Unsupported(
                    "SWRL rules have no RDF mapping in this writer".to_string(),
                ))
            }
        };
        Ok(Anchor::Triples(main))
    }

    fn characteristic(&mut self, property: &ObjectPropertyExpression, kind: &str) -> WriteResult<Vec<Triple>> {
        let s = self.object_property(property)?;
        Ok(vec![self.emit_object(s, rdf::TYPE, named(kind)?)?])
    }

    /// `a p b`, `b p c`, ... for symmetric n-ary axioms
    fn pairwise(&mut self, nodes: Vec<RdfObject>, predicate: &str) -> WriteResult<Vec<Triple>> {
        let mut main = Vec::new();
        for pair in nodes.windows(2) {
            main.push(self.emit_object(pair[0].clone(), predicate, pair[1].clone())?);
        }
        Ok(main)
    }

    fn members_root(&mut self, root_type: &str, members: &str, nodes: Vec<RdfObject>) -> WriteResult<Anchor> {
        let root = self.fresh();
        self.emit(root.clone(), rdf::TYPE, named(root_type)?)?;
        let list = self.list(nodes)?;
        self.emit(root.clone(), members, list)?;
        Ok(Anchor::Root(root))
    }

    fn negative_assertion(
        &mut self,
        property: RdfObject,
        subject: RdfObject,
        target: &str,
        value: RdfObject,
    ) -> WriteResult<Anchor> {
        let root = self.fresh();
        self.emit(root.clone(), rdf::TYPE, named(owl::NEGATIVE_PROPERTY_ASSERTION)?)?;
        self.emit(root.clone(), owl::SOURCE_INDIVIDUAL, subject)?;
        self.emit(root.clone(), owl::ASSERTION_PROPERTY, property)?;
        self.emit(root.clone(), target, value)?;
        Ok(Anchor::Root(root))
    }

    fn class_expression(&mut self, ce: &ClassExpression) -> WriteResult<RdfObject> {
        let node = match ce {
            ClassExpression::Class(c) => return Ok(named(c.iri().as_str())?.into()),
            ClassExpression::ObjectIntersectionOf(ops) => {
                let items = ops
                    .iter()
                    .map(|op| self.class_expression(op))
                    .collect::<WriteResult<Vec<_>>>()?;
                let list = self.list(items)?;
                self.class_node(owl::INTERSECTION_OF, list)?
            }
            ClassExpression::ObjectUnionOf(ops) => {
                let items = ops
                    .iter()
                    .map(|op| self.class_expression(op))
                    .collect::<WriteResult<Vec<_>>>()?;
                let list = self.list(items)?;
                self.class_node(owl::UNION_OF, list)?
            }
            ClassExpression::ObjectComplementOf(op) => {
                let operand = self.class_expression(op)?;
                self.class_node(owl::COMPLEMENT_OF, operand)?
            }
            ClassExpression::ObjectOneOf(individuals) => {
                let items = individuals
                    .iter()
                    .map(|i| self.individual(i))
                    .collect::<WriteResult<Vec<_>>>()?;
                let list = self.list(items)?;
                self.class_node(owl::ONE_OF, list)?
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => {
                let p = self.object_property(property)?;
                let f = self.class_expression(filler)?;
                self.restriction(p, &[(owl::SOME_VALUES_FROM, f)])?
            }
            ClassExpression::ObjectAllValuesFrom { property, filler } => {
                let p = self.object_property(property)?;
                let f = self.class_expression(filler)?;
                self.restriction(p, &[(owl::ALL_VALUES_FROM, f)])?
            }
            ClassExpression::ObjectHasValue { property, value } => {
                let p = self.object_property(property)?;
                let v = self.individual(value)?;
                self.restriction(p, &[(owl::HAS_VALUE, v)])?
            }
            ClassExpression::ObjectHasSelf(property) => {
                let p = self.object_property(property)?;
                let t = RdfObject::from(literal(&Literal::typed("true", xsd::BOOLEAN))?);
                self.restriction(p, &[(owl::HAS_SELF, t)])?
            }
            ClassExpression::ObjectMinCardinality { cardinality, property, filler }
            | ClassExpression::ObjectMaxCardinality { cardinality, property, filler }
            | ClassExpression::ObjectExactCardinality { cardinality, property, filler } => {
                let p = self.object_property(property)?;
                let filler = filler
                    .as_deref()
                    .map(|f| self.class_expression(f))
                    .transpose()?;
                let (plain, qualified) = cardinality_predicates(ce);
                self.cardinality(p, *cardinality, plain, qualified, owl::ON_CLASS, filler)?
            }
            ClassExpression::DataSomeValuesFrom { property, filler } => {
                let p = RdfObject::from(named(property.iri().as_str())?);
                let f = self.data_range(filler)?;
                self.restriction(p, &[(owl::SOME_VALUES_FROM, f)])?
            }
            ClassExpression::DataAllValuesFrom { property, filler } => {
                let p = RdfObject::from(named(property.iri().as_str())?);
                let f = self.data_range(filler)?;
                self.restriction(p, &[(owl::ALL_VALUES_FROM, f)])?
            }
            ClassExpression::DataHasValue { property, value } => {
                let p = RdfObject::from(named(property.iri().as_str())?);
                let v = RdfObject::from(literal(value)?);
                self.restriction(p, &[(owl::HAS_VALUE, v)])?
            }
            ClassExpression::DataMinCardinality { cardinality, property, filler }
            | ClassExpression::DataMaxCardinality { cardinality, property, filler }
            | ClassExpression::DataExactCardinality { cardinality, property, filler } => {
                let p = RdfObject::from(named(property.iri().as_str())?);
                let filler = filler.as_ref().map(|f| self.data_range(f)).transpose()?;
                let (plain, qualified) = cardinality_predicates(ce);
                self.cardinality(p, *cardinality, plain, qualified, owl::ON_DATA_RANGE, filler)?
            }
        };
        Ok(node.into())
    }

    fn class_node(&mut self, predicate: &str, value: RdfObject) -> WriteResult<RdfSubject> {
        let node = self.fresh();
        self.emit(node.clone(), rdf::TYPE, named(owl::CLASS)?)?;
        self.emit(node.clone(), predicate, value)?;
        Ok(node)
    }

    fn restriction(&mut self, property: RdfObject, parts: &[(&str, RdfObject)]) -> WriteResult<RdfSubject> {
        let node = self.fresh();
        self.emit(node.clone(), rdf::TYPE, named(owl::RESTRICTION)?)?;
        self.emit(node.clone(), owl::ON_PROPERTY, property)?;
        for (predicate, value) in parts {
            self.emit(node.clone(), predicate, value.clone())?;
        }
        Ok(node)
    }

    fn cardinality(
        &mut self,
        property: RdfObject,
        n: u32,
        plain: &str,
        qualified: &str,
        on_filler: &str,
        filler: Option<RdfObject>,
    ) -> WriteResult<RdfSubject> {
        let count = RdfObject::from(literal(&Literal::typed(n.to_string(), xsd::NON_NEGATIVE_INTEGER))?);
        match filler {
            None => self.restriction(property, &[(plain, count)]),
            Some(filler) => self.restriction(property, &[(qualified, count), (on_filler, filler)]),
        }
    }

    fn data_range(&mut self, range: &DataRange) -> WriteResult<RdfObject> {
        let (predicate, value) = match range {
            DataRange::Datatype(d) => return Ok(named(d.iri().as_str())?.into()),
            DataRange::DataIntersectionOf(ops) => {
                let items = ops
                    .iter()
                    .map(|op| self.data_range(op))
                    .collect::<WriteResult<Vec<_>>>()?;
                (owl::INTERSECTION_OF, self.list(items)?)
            }
            DataRange::DataUnionOf(ops) => {
                let items = ops
                    .iter()
                    .map(|op| self.data_range(op))
                    .collect::<WriteResult<Vec<_>>>()?;
                (owl::UNION_OF, self.list(items)?)
            }
            DataRange::DataComplementOf(op) => (owl::DATATYPE_COMPLEMENT_OF, self.data_range(op)?),
            DataRange::DataOneOf(values) => {
                let items = values
                    .iter()
                    .map(|v| literal(v).map(RdfObject::from))
                    .collect::<WriteResult<Vec<_>>>()?;
                (owl::ONE_OF, self.list(items)?)
            }
            DataRange::DatatypeRestriction {
                datatype,
                restrictions,
            } => {
                let node = self.fresh();
                self.emit(node.clone(), rdf::TYPE, named(rdfs::DATATYPE)?)?;
                self.emit(node.clone(), owl::ON_DATATYPE, named(datatype.iri().as_str())?)?;
                let mut facets: Vec<RdfObject> = Vec::with_capacity(restrictions.len());
                for restriction in restrictions {
                    let facet = self.fresh();
                    self.emit(facet.clone(), restriction.facet.as_str(), literal(&restriction.value)?)?;
                    facets.push(facet.into());
                }
                let list = self.list(facets)?;
                self.emit(node.clone(), owl::WITH_RESTRICTIONS, list)?;
                return Ok(node.into());
            }
        };
        let node = self.fresh();
        self.emit(node.clone(), rdf::TYPE, named(rdfs::DATATYPE)?)?;
        self.emit(node.clone(), predicate, value)?;
        Ok(node.into())
    }

    fn object_property(&mut self, property: &ObjectPropertyExpression) -> WriteResult<RdfObject> {
        match property {
            ObjectPropertyExpression::ObjectProperty(p) => Ok(named(p.iri().as_str())?.into()),
            ObjectPropertyExpression::InverseObjectProperty(p) => {
                let node = self.fresh();
                self.emit(node.clone(), owl::INVERSE_OF, named(p.iri().as_str())?)?;
                Ok(node.into())
            }
        }
    }

    fn individual(&mut self, individual: &Individual) -> WriteResult<RdfObject> {
        Ok(match individual {
            Individual::Named(i) => named(i.iri().as_str())?.into(),
            Individual::Anonymous(label) => BlankNode::from_str(label)?.into(),
        })
    }

    fn annotation_value(&mut self, value: &AnnotationValue) -> WriteResult<RdfObject> {
        Ok(match value {
            AnnotationValue::Iri(iri) => named(iri.as_str())?.into(),
            AnnotationValue::Literal(lit) => literal(lit)?.into(),
            AnnotationValue::Anonymous(label) => BlankNode::from_str(label)?.into(),
        })
    }

    fn list(&mut self, items: Vec<RdfObject>) -> WriteResult<RdfObject> {
        let nil = RdfObject::from(named(rdf::NIL)?);
        let cells: Vec<RdfSubject> = items.iter().map(|_| self.fresh()).collect();
        for (i, item) in items.into_iter().enumerate() {
            self.emit(cells[i].clone(), rdf::FIRST, item)?;
            let rest = cells
                .get(i + 1)
                .cloned()
                .map(RdfObject::from)
                .unwrap_or_else(|| nil.clone());
            self.emit(cells[i].clone(), rdf::REST, rest)?;
        }
        Ok(cells.first().cloned().map(RdfObject::from).unwrap_or(nil))
    }

    fn fresh(&self) -> RdfSubject {
        RdfSubject::BlankNode(BlankNode::new())
    }

    fn iri_subject(&self, iri: &Iri) -> WriteResult<RdfSubject> {
        Ok(RdfSubject::NamedNode(named(iri.as_str())?))
    }

    fn emit(&mut self, subject: RdfSubject, predicate: &str, object: impl Into<RdfObject>) -> WriteResult<Triple> {
        let triple = Triple::new(subject, RdfPredicate::new(predicate)?, object.into());
        self.triples.push(triple.clone());
        Ok(triple)
    }

    /// Emit with a subject produced as an object term (class expressions,
    /// property expressions, individuals)
    fn emit_object(&mut self, subject: RdfObject, predicate: &str, object: impl Into<RdfObject>) -> WriteResult<Triple> {
        let subject = subject
            .as_subject()
            .ok_or_else(|| WriteError::Unsupported(format!("literal {} in subject position", subject)))?;
        self.emit(subject, predicate, object)
    }
}

fn named(iri: &str) -> WriteResult<NamedNode> {
    Ok(NamedNode::new(iri)?)
}

fn literal(lit: &Literal) -> WriteResult<crate::rdf::Literal> {
    Ok(match lit {
        Literal::Typed { lexical, datatype } => {
            crate::rdf::Literal::new_typed_literal(lexical.as_str(), named(datatype.iri().as_str())?)
        }
        Literal::Lang { lexical, lang } => {
            crate::rdf::Literal::new_language_tagged_literal(lexical.as_str(), lang.as_str())?
        }
    })
}

fn cardinality_predicates(ce: &ClassExpression) -> (&'static str, &'static str) {
    match ce {
        ClassExpression::ObjectMinCardinality { .. } | ClassExpression::DataMinCardinality { .. } => {
            (owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY)
        }
        ClassExpression::ObjectMaxCardinality { .. } | ClassExpression::DataMaxCardinality { .. } => {
            (owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY)
        }
        _ => (owl::CARDINALITY, owl::QUALIFIED_CARDINALITY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owl::{AnnotationProperty, Class, Entity, ObjectProperty};

    fn iri(name: &str) -> String {
        format!("http://example.org/{}", name)
    }

    fn count(triples: &[Triple], predicate: &str) -> usize {
        triples
            .iter()
            .filter(|t| t.predicate.as_str() == predicate)
            .count()
    }

    #[test]
    fn test_header_and_declaration() {
        let mut ont = Ontology::with_iri(iri("onto"));
        ont.add_import(iri("other"));
        ont.add_axiom(Axiom::Declaration(Entity::Class(Class::new(iri("A")))));

        let triples = RdfWriter::write(&ont).unwrap();
        assert_eq!(triples.len(), 3);
        assert!(triples[0].subject.is_iri(&iri("onto")));
        assert!(triples[0].object.is_iri(owl::ONTOLOGY));
        assert!(triples[2].object.is_iri(owl::CLASS));
    }

    #[test]
    fn test_annotated_axiom_is_reified() {
        let mut ont = Ontology::new();
        ont.add_axiom(AnnotatedAxiom::new(
            Axiom::SubClassOf {
                sub: ClassExpression::class(iri("A")),
                sup: ClassExpression::class(iri("B")),
            },
            vec![Annotation::new(
                AnnotationProperty::new(rdfs::COMMENT),
                Literal::string("why"),
            )],
        ));

        let triples = RdfWriter::write(&ont).unwrap();
        assert_eq!(count(&triples, owl::ANNOTATED_SOURCE), 1);
        assert_eq!(count(&triples, owl::ANNOTATED_TARGET), 1);
        assert_eq!(count(&triples, rdfs::COMMENT), 1);
    }

    #[test]
    fn test_nary_disjoint_uses_root_and_list() {
        let mut ont = Ontology::new();
        ont.add_axiom(Axiom::DisjointClasses(vec![
            ClassExpression::class(iri("A")),
            ClassExpression::class(iri("B")),
            ClassExpression::class(iri("C")),
        ]));
        let triples = RdfWriter::write(&ont).unwrap();
        assert_eq!(count(&triples, owl::MEMBERS), 1);
        assert_eq!(count(&triples, rdf::FIRST), 3);
        assert_eq!(count(&triples, rdf::REST), 3);
    }

    #[test]
    fn test_property_chain_list_order() {
        let mut ont = Ontology::new();
        ont.add_axiom(Axiom::SubPropertyChainOf {
            chain: vec![
                ObjectPropertyExpression::named(iri("p1")),
                ObjectPropertyExpression::named(iri("p2")),
            ],
            sup: ObjectPropertyExpression::ObjectProperty(ObjectProperty::new(iri("p"))),
        });
        let triples = RdfWriter::write(&ont).unwrap();
        let firsts: Vec<_> = triples
            .iter()
            .filter(|t| t.predicate.as_str() == rdf::FIRST)
            .map(|t| t.object.to_string())
            .collect();
        assert_eq!(firsts, vec![format!("<{}>", iri("p1")), format!("<{}>", iri("p2"))]);
    }

    #[test]
    fn test_rule_is_rejected() {
        let mut ont = Ontology::new();
        ont.add_axiom(Axiom::Rule {
            node: "r1".to_string(),
        });
        assert!(matches!(
            RdfWriter::write(&ont),
            Err(WriteError::Unsupported(_))
        ));
    }
}
