//! Triple index built once at intake
//!
//! Holds every source triple in document order, indexed by subject, plus the
//! two derived views the handlers need: which reification nodes annotate a
//! given triple, and which blank nodes are structural (list cells, class
//! expressions, reification nodes, n-ary roots) rather than anonymous
//! individuals.

use crate::rdf::vocab::{self, owl, rdf};
use crate::rdf::{RdfPredicate, RdfSubject, Triple};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Default)]
pub struct TripleIndex {
    triples: Vec<Triple>,
    by_subject: FxHashMap<RdfSubject, Vec<usize>>,
    reifications: FxHashMap<Triple, Vec<RdfSubject>>,
    structural: FxHashSet<RdfSubject>,
    ontology_headers: FxHashSet<RdfSubject>,
}

impl TripleIndex {
    /// Buffer and index the source. Duplicate triples are kept once, at
    /// their first position.
    pub fn new(source: impl IntoIterator<Item = Triple>) -> Self {
        let mut index = Self::default();
        let mut seen = FxHashSet::default();
        for triple in source {
            if seen.insert(triple.clone()) {
                index.push(triple);
            }
        }
        index.index_reifications();
        index
    }

    fn push(&mut self, triple: Triple) {
        let position = self.triples.len();
        let predicate = triple.predicate.as_str();

        if triple.subject.is_blank_node()
            && (vocab::STRUCTURAL_PREDICATES.contains(&predicate)
                || vocab::is_facet(predicate)
                || (predicate == rdf::TYPE
                    && vocab::STRUCTURAL_TYPES
                        .iter()
                        .any(|t| triple.object.is_iri(t))))
        {
            self.structural.insert(triple.subject.clone());
        }
        if predicate == rdf::TYPE && triple.object.is_iri(owl::ONTOLOGY) {
            self.ontology_headers.insert(triple.subject.clone());
        }

        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(position);
        self.triples.push(triple);
    }

    fn index_reifications(&mut self) {
        let mut found = Vec::new();
        for (node, positions) in &self.by_subject {
            if !positions.iter().any(|&i| self.triples[i].predicate.as_str() == owl::ANNOTATED_SOURCE) {
                continue;
            }
            if let Some(target) = self.reified_triple(node) {
                found.push((target, node.clone()));
            }
        }
        // Stable order of reification nodes per triple
        found.sort_by_key(|(_, node)| self.by_subject.get(node).and_then(|p| p.first().copied()));
        for (target, node) in found {
            self.reifications.entry(target).or_default().push(node);
        }
    }

    /// The triple a reification node names, if its source, property and
    /// target are each given exactly once
    fn reified_triple(&self, node: &RdfSubject) -> Option<Triple> {
        let single = |predicate: &'static str| {
            let mut values = self.with_predicate(node, predicate);
            let first = values.next()?;
            values.next().is_none().then_some(&first.object)
        };
        let source = single(owl::ANNOTATED_SOURCE)?.as_subject()?;
        let property = match single(owl::ANNOTATED_PROPERTY)? {
            crate::rdf::RdfObject::NamedNode(n) => RdfPredicate::from(n.clone()),
            _ => return None,
        };
        let target = single(owl::ANNOTATED_TARGET)?.clone();
        Some(Triple::new(source, property, target))
    }

    /// All triples in document order
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Triples with the given subject, in document order
    pub fn with_subject<'a>(&'a self, subject: &RdfSubject) -> impl Iterator<Item = &'a Triple> + 'a {
        self.by_subject
            .get(subject)
            .map(|positions| positions.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&i| &self.triples[i])
    }

    /// Triples with the given subject and predicate
    pub fn with_predicate<'a>(
        &'a self,
        subject: &RdfSubject,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.with_subject(subject)
            .filter(move |t| t.predicate.as_str() == predicate)
    }

    /// True if the subject has an `rdf:type` triple with the given object
    pub fn has_type(&self, subject: &RdfSubject, type_iri: &str) -> bool {
        self.with_predicate(subject, rdf::TYPE)
            .any(|t| t.object.is_iri(type_iri))
    }

    /// Reification nodes that annotate `triple`
    pub fn reifications(&self, triple: &Triple) -> &[RdfSubject] {
        self.reifications
            .get(triple)
            .map(|nodes| nodes.as_slice())
            .unwrap_or(&[])
    }

    /// True for blank nodes that describe part of an axiom
    pub fn is_structural(&self, subject: &RdfSubject) -> bool {
        self.structural.contains(subject)
    }

    /// True if the resource is typed `owl:Ontology` anywhere in the source
    pub fn is_ontology_header(&self, subject: &RdfSubject) -> bool {
        self.ontology_headers.contains(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{RdfFormat, RdfParser};

    fn index(turtle: &str) -> TripleIndex {
        let doc = format!(
            "@prefix : <http://example.org/> .\n\
             @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
             @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
             @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n{}",
            turtle
        );
        TripleIndex::new(RdfParser::parse(&doc, RdfFormat::Turtle).unwrap())
    }

    #[test]
    fn test_dedupes_and_indexes_by_subject() {
        let idx = index(":A rdfs:subClassOf :B . :A rdfs:subClassOf :B . :A rdfs:label \"A\" .");
        assert_eq!(idx.len(), 2);

        let a = idx.triples()[0].subject.clone();
        assert_eq!(idx.with_subject(&a).count(), 2);
        assert_eq!(idx.with_predicate(&a, vocab::rdfs::LABEL).count(), 1);
    }

    #[test]
    fn test_structural_blank_nodes() {
        let idx = index(
            ":A rdfs:subClassOf [ a owl:Restriction ; owl:onProperty :p ; owl:someValuesFrom :B ] .\n\
             _:x a :Person .\n\
             _:f <http://www.w3.org/2001/XMLSchema#minInclusive> 0 .",
        );
        let restriction = idx
            .triples()
            .iter()
            .find(|t| t.predicate.as_str() == owl::ON_PROPERTY)
            .unwrap()
            .subject
            .clone();
        assert!(idx.is_structural(&restriction));

        let individual = idx
            .triples()
            .iter()
            .find(|t| t.object.is_iri("http://example.org/Person"))
            .unwrap()
            .subject
            .clone();
        assert!(!idx.is_structural(&individual));

        let facet = idx
            .triples()
            .iter()
            .find(|t| vocab::is_facet(t.predicate.as_str()))
            .unwrap()
            .subject
            .clone();
        assert!(idx.is_structural(&facet));
    }

    #[test]
    fn test_reification_index() {
        let idx = index(
            ":A rdfs:subClassOf :B .\n\
             [ a owl:Axiom ; owl:annotatedSource :A ; owl:annotatedProperty rdfs:subClassOf ;\n\
               owl:annotatedTarget :B ; rdfs:comment \"why\" ] .\n\
             <http://example.org/onto> a owl:Ontology .",
        );
        let main = idx.triples()[0].clone();
        assert_eq!(idx.reifications(&main).len(), 1);
        assert!(idx.is_structural(&idx.reifications(&main)[0]));

        let header = RdfSubject::NamedNode(crate::rdf::NamedNode::new("http://example.org/onto").unwrap());
        assert!(idx.is_ontology_header(&header));
    }
}
