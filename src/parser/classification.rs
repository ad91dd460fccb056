//! Classification cache
//!
//! Memoizes what kind of entity each resource has been declared as. A
//! resource moves from `Unknown` to `Exactly(K)` on its first declaration and
//! to `Conflicting` the first time a different kind is claimed. `Conflicting`
//! is terminal: it keeps every claimed kind and never narrows again.

use crate::rdf::vocab::{self, owl};
use crate::rdf::{NamedNode, RdfSubject};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::BTreeSet;
use std::fmt;

/// Kinds a resource can be classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    Class,
    Individual,
    Datatype,
    Ontology,
}

impl ResourceKind {
    pub fn is_property(self) -> bool {
        matches!(
            self,
            ResourceKind::ObjectProperty | ResourceKind::DataProperty | ResourceKind::AnnotationProperty
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::ObjectProperty => "ObjectProperty",
            ResourceKind::DataProperty => "DataProperty",
            ResourceKind::AnnotationProperty => "AnnotationProperty",
            ResourceKind::Class => "Class",
            ResourceKind::Individual => "Individual",
            ResourceKind::Datatype => "Datatype",
            ResourceKind::Ontology => "Ontology",
        };
        f.write_str(name)
    }
}

/// Classification state of one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Unknown,
    Exactly(ResourceKind),
    Conflicting(BTreeSet<ResourceKind>),
}

impl Classification {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Classification::Unknown)
    }

    /// True if `kind` is the only kind claimed
    pub fn is_only(&self, kind: ResourceKind) -> bool {
        matches!(self, Classification::Exactly(k) if *k == kind)
    }

    /// True if `kind` is among the claimed kinds
    pub fn includes(&self, kind: ResourceKind) -> bool {
        match self {
            Classification::Unknown => false,
            Classification::Exactly(k) => *k == kind,
            Classification::Conflicting(kinds) => kinds.contains(&kind),
        }
    }
}

/// Where a classification came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// OWL, RDFS or XSD vocabulary seeded at start
    BuiltIn,
    /// Seeded from the parser configuration
    Configured,
    /// Declaration triple in the document
    Declared,
    /// Taken from the position an axiom used the resource in
    Implied,
    /// Applied by the ambiguity policy
    Inferred,
}

/// Result of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclareOutcome {
    /// First kind recorded for the resource
    Novel,
    /// Same kind as before, or resource already conflicting
    Redundant,
    /// The resource just became conflicting
    Conflicting,
}

#[derive(Debug, Clone)]
struct Record {
    classification: Classification,
    provenance: Provenance,
}

static UNKNOWN: Classification = Classification::Unknown;

/// Per-resource classification cache
#[derive(Debug, Clone, Default)]
pub struct ClassificationCache {
    entries: FxHashMap<RdfSubject, Record>,
}

impl ClassificationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache seeded with the built-in vocabulary
    pub fn with_builtins() -> Self {
        let mut cache = Self::new();
        let builtins = [
            (owl::THING, ResourceKind::Class),
            (owl::NOTHING, ResourceKind::Class),
            (owl::TOP_OBJECT_PROPERTY, ResourceKind::ObjectProperty),
            (owl::BOTTOM_OBJECT_PROPERTY, ResourceKind::ObjectProperty),
            (owl::TOP_DATA_PROPERTY, ResourceKind::DataProperty),
            (owl::BOTTOM_DATA_PROPERTY, ResourceKind::DataProperty),
        ];
        let annotation_properties = vocab::BUILT_IN_ANNOTATION_PROPERTIES
            .iter()
            .map(|iri| (*iri, ResourceKind::AnnotationProperty));
        let datatypes = vocab::BUILT_IN_DATATYPES
            .iter()
            .map(|iri| (*iri, ResourceKind::Datatype));

        for (iri, kind) in builtins.into_iter().chain(annotation_properties).chain(datatypes) {
            if let Ok(node) = NamedNode::new(iri) {
                cache.declare(&RdfSubject::NamedNode(node), kind, Provenance::BuiltIn);
            }
        }
        cache
    }

    /// Current classification (read-only)
    pub fn classify(&self, resource: &RdfSubject) -> &Classification {
        self.entries
            .get(resource)
            .map(|e| &e.classification)
            .unwrap_or(&UNKNOWN)
    }

    /// True if the resource is classified as exactly `kind`
    pub fn is_only(&self, resource: &RdfSubject, kind: ResourceKind) -> bool {
        self.classify(resource).is_only(kind)
    }

    pub fn provenance(&self, resource: &RdfSubject) -> Option<Provenance> {
        self.entries.get(resource).map(|e| e.provenance)
    }

    /// Record that `resource` was claimed to be of `kind`
    pub fn declare(
        &mut self,
        resource: &RdfSubject,
        kind: ResourceKind,
        provenance: Provenance,
    ) -> DeclareOutcome {
        let record = match self.entries.entry(resource.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Record {
                    classification: Classification::Exactly(kind),
                    provenance,
                });
                return DeclareOutcome::Novel;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        match &mut record.classification {
            Classification::Exactly(existing) if *existing == kind => DeclareOutcome::Redundant,
            Classification::Exactly(existing) => {
                let kinds = BTreeSet::from([*existing, kind]);
                record.classification = Classification::Conflicting(kinds);
                DeclareOutcome::Conflicting
            }
            Classification::Conflicting(kinds) => {
                kinds.insert(kind);
                DeclareOutcome::Redundant
            }
            Classification::Unknown => {
                record.classification = Classification::Exactly(kind);
                record.provenance = provenance;
                DeclareOutcome::Novel
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
