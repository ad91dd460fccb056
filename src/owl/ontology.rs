//! Ontology container

use super::axiom::{AnnotatedAxiom, Annotation, AnnotationSubject, Axiom};
use super::entity::{Entity, Iri};
use indexmap::IndexSet;
use std::collections::BTreeSet;

/// Ontology: header, imports, ontology annotations and axioms.
///
/// Axioms keep insertion order for iteration but equality between
/// ontologies ignores order.
#[derive(Debug, Clone, Default)]
pub struct Ontology {
    iri: Option<Iri>,
    version_iri: Option<Iri>,
    imports: Vec<Iri>,
    annotations: Vec<Annotation>,
    axioms: IndexSet<AnnotatedAxiom>,
}

impl Ontology {
    /// Create an empty anonymous ontology
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty ontology with an IRI
    pub fn with_iri(iri: impl Into<Iri>) -> Self {
        Self {
            iri: Some(iri.into()),
            ..Self::default()
        }
    }

    pub fn iri(&self) -> Option<&Iri> {
        self.iri.as_ref()
    }

    pub fn set_iri(&mut self, iri: impl Into<Iri>) {
        self.iri = Some(iri.into());
    }

    pub fn version_iri(&self) -> Option<&Iri> {
        self.version_iri.as_ref()
    }

    pub fn set_version_iri(&mut self, iri: impl Into<Iri>) {
        self.version_iri = Some(iri.into());
    }

    pub fn imports(&self) -> &[Iri] {
        &self.imports
    }

    /// Add an import; duplicates are ignored
    pub fn add_import(&mut self, iri: impl Into<Iri>) {
        let iri = iri.into();
        if !self.imports.contains(&iri) {
            self.imports.push(iri);
        }
    }

    /// Ontology annotations
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Attach an ontology-level annotation; duplicates are ignored
    pub fn add_annotation(&mut self, annotation: Annotation) {
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
    }

    /// Add an axiom. Returns false if the same annotated axiom was already
    /// present.
    pub fn add_axiom(&mut self, axiom: impl Into<AnnotatedAxiom>) -> bool {
        self.axioms.insert(axiom.into())
    }

    /// All axioms in insertion order
    pub fn axioms(&self) -> impl Iterator<Item = &AnnotatedAxiom> {
        self.axioms.iter()
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    /// True if the axiom is present with any annotation set
    pub fn contains_axiom(&self, axiom: &Axiom) -> bool {
        self.axioms.iter().any(|a| &a.axiom == axiom)
    }

    /// Axioms about `entity`, excluding its declarations and annotation
    /// assertions
    pub fn axioms_for<'a>(&'a self, entity: &'a Entity) -> impl Iterator<Item = &'a AnnotatedAxiom> {
        self.axioms
            .iter()
            .filter(move |a| a.axiom.about().contains(entity))
    }

    /// Declaration axioms for `entity`
    pub fn declaration_axioms_for<'a>(
        &'a self,
        entity: &'a Entity,
    ) -> impl Iterator<Item = &'a AnnotatedAxiom> {
        self.axioms
            .iter()
            .filter(move |a| matches!(&a.axiom, Axiom::Declaration(e) if e == entity))
    }

    /// Annotation assertions whose subject is `iri`
    pub fn annotation_assertions_for<'a>(
        &'a self,
        iri: &'a Iri,
    ) -> impl Iterator<Item = &'a AnnotatedAxiom> {
        self.axioms.iter().filter(move |a| {
            matches!(
                &a.axiom,
                Axiom::AnnotationAssertion { subject: AnnotationSubject::Iri(s), .. } if s == iri
            )
        })
    }

    /// Every entity mentioned by an axiom or an annotation, sorted
    pub fn referenced_entities(&self) -> BTreeSet<Entity> {
        let mut out = BTreeSet::new();
        for annotated in &self.axioms {
            annotated.axiom.collect_signature(&mut out);
            for annotation in &annotated.annotations {
                out.insert(Entity::AnnotationProperty(annotation.property.clone()));
            }
        }
        for annotation in &self.annotations {
            out.insert(Entity::AnnotationProperty(annotation.property.clone()));
        }
        out
    }

    /// Axioms as an order-independent set
    pub fn axiom_set(&self) -> BTreeSet<&AnnotatedAxiom> {
        self.axioms.iter().collect()
    }
}

impl PartialEq for Ontology {
    fn eq(&self, other: &Self) -> bool {
        self.iri == other.iri
            && self.version_iri == other.version_iri
            && self.imports.iter().collect::<BTreeSet<_>>()
                == other.imports.iter().collect::<BTreeSet<_>>()
            && self.annotations.iter().collect::<BTreeSet<_>>()
                == other.annotations.iter().collect::<BTreeSet<_>>()
            && self.axiom_set() == other.axiom_set()
    }
}

impl Eq for Ontology {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owl::{AnnotationProperty, AnnotationValue, Class, ClassExpression, Literal};
    use crate::rdf::vocab;

    fn class(name: &str) -> ClassExpression {
        ClassExpression::class(format!("http://example.org/{}", name))
    }

    #[test]
    fn test_axioms_for_and_declarations() {
        let mut ont = Ontology::with_iri("http://example.org/onto");
        let a = Entity::Class(Class::new("http://example.org/A"));

        ont.add_axiom(Axiom::Declaration(a.clone()));
        ont.add_axiom(Axiom::SubClassOf {
            sub: class("A"),
            sup: class("B"),
        });
        ont.add_axiom(Axiom::SubClassOf {
            sub: class("B"),
            sup: class("A"),
        });
        ont.add_axiom(Axiom::AnnotationAssertion {
            property: AnnotationProperty::new(vocab::rdfs::LABEL),
            subject: AnnotationSubject::Iri(a.iri().clone()),
            value: AnnotationValue::Literal(Literal::string("A")),
        });

        assert_eq!(ont.declaration_axioms_for(&a).count(), 1);
        assert_eq!(ont.axioms_for(&a).count(), 1);
        assert_eq!(ont.annotation_assertions_for(a.iri()).count(), 1);
        assert!(!ont.add_axiom(Axiom::Declaration(a)));
    }

    #[test]
    fn test_equality_ignores_order() {
        let first = Axiom::SubClassOf {
            sub: class("A"),
            sup: class("B"),
        };
        let second = Axiom::DisjointClasses(vec![class("A"), class("C")]);

        let mut left = Ontology::new();
        left.add_axiom(first.clone());
        left.add_axiom(second.clone());
        let mut right = Ontology::new();
        right.add_axiom(second);
        right.add_axiom(first);

        assert_eq!(left, right);
        right.add_import("http://example.org/other");
        assert_ne!(left, right);
    }

    #[test]
    fn test_referenced_entities_include_annotation_properties() {
        let mut ont = Ontology::new();
        ont.add_annotation(Annotation::new(
            AnnotationProperty::new(vocab::rdfs::COMMENT),
            Literal::string("about"),
        ));
        ont.add_axiom(Axiom::SubClassOf {
            sub: class("A"),
            sup: class("B"),
        });
        let entities = ont.referenced_entities();
        assert_eq!(entities.len(), 3);
    }
}
