//! OWL 2 structural model
//!
//! Entities, class expressions, data ranges, the [`Axiom`] sum type and the
//! [`Ontology`] container that the parser fills and the renderer and RDF
//! writer read.

mod axiom;
mod entity;
mod expression;
mod ontology;
mod writer;

pub use axiom::{AnnotatedAxiom, Annotation, AnnotationSubject, AnnotationValue, Axiom};

pub use entity::{
    AnnotationProperty, Class, DataProperty, Datatype, Entity, Individual, Iri, Literal,
    NamedIndividual, ObjectProperty,
};

pub use expression::{
    ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression, PropertyExpression,
};

pub use ontology::Ontology;

pub use writer::{RdfWriter, WriteError, WriteResult};
