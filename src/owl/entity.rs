//! IRIs, entities, individuals and literals
//!
//! All model values are immutable once built and totally ordered, so the
//! renderer can sort them and the ontology can compare axiom sets.

use crate::rdf::{self, vocab};
use std::fmt;

/// Absolute IRI as it appeared in the source document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(String);

impl Iri {
    /// Create a new IRI
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&rdf::NamedNode> for Iri {
    fn from(node: &rdf::NamedNode) -> Self {
        Self(node.as_str().to_string())
    }
}

macro_rules! entity_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Iri);

        impl $name {
            /// Create the entity for an IRI
            pub fn new(iri: impl Into<Iri>) -> Self {
                Self(iri.into())
            }

            /// The entity IRI
            pub fn iri(&self) -> &Iri {
                &self.0
            }
        }
    };
}

entity_type!(
    /// Named class
    Class
);
entity_type!(
    /// Named object property
    ObjectProperty
);
entity_type!(
    /// Named data property
    DataProperty
);
entity_type!(
    /// Named annotation property
    AnnotationProperty
);
entity_type!(
    /// Named individual
    NamedIndividual
);
entity_type!(
    /// Named datatype
    Datatype
);

/// Any named entity. Variant order is the grouping order used by the
/// renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Class(Class),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    AnnotationProperty(AnnotationProperty),
    NamedIndividual(NamedIndividual),
    Datatype(Datatype),
}

impl Entity {
    /// The entity IRI
    pub fn iri(&self) -> &Iri {
        match self {
            Entity::Class(e) => e.iri(),
            Entity::ObjectProperty(e) => e.iri(),
            Entity::DataProperty(e) => e.iri(),
            Entity::AnnotationProperty(e) => e.iri(),
            Entity::NamedIndividual(e) => e.iri(),
            Entity::Datatype(e) => e.iri(),
        }
    }

    /// Functional-syntax keyword of the entity type
    pub fn type_keyword(&self) -> &'static str {
        match self {
            Entity::Class(_) => "Class",
            Entity::ObjectProperty(_) => "ObjectProperty",
            Entity::DataProperty(_) => "DataProperty",
            Entity::AnnotationProperty(_) => "AnnotationProperty",
            Entity::NamedIndividual(_) => "NamedIndividual",
            Entity::Datatype(_) => "Datatype",
        }
    }

    /// The `rdf:type` object that declares this kind of entity
    pub fn declaration_type(&self) -> &'static str {
        match self {
            Entity::Class(_) => vocab::owl::CLASS,
            Entity::ObjectProperty(_) => vocab::owl::OBJECT_PROPERTY,
            Entity::DataProperty(_) => vocab::owl::DATATYPE_PROPERTY,
            Entity::AnnotationProperty(_) => vocab::owl::ANNOTATION_PROPERTY,
            Entity::NamedIndividual(_) => vocab::owl::NAMED_INDIVIDUAL,
            Entity::Datatype(_) => vocab::rdfs::DATATYPE,
        }
    }
}

impl From<Class> for Entity {
    fn from(e: Class) -> Self {
        Entity::Class(e)
    }
}

impl From<ObjectProperty> for Entity {
    fn from(e: ObjectProperty) -> Self {
        Entity::ObjectProperty(e)
    }
}

impl From<DataProperty> for Entity {
    fn from(e: DataProperty) -> Self {
        Entity::DataProperty(e)
    }
}

impl From<AnnotationProperty> for Entity {
    fn from(e: AnnotationProperty) -> Self {
        Entity::AnnotationProperty(e)
    }
}

impl From<NamedIndividual> for Entity {
    fn from(e: NamedIndividual) -> Self {
        Entity::NamedIndividual(e)
    }
}

impl From<Datatype> for Entity {
    fn from(e: Datatype) -> Self {
        Entity::Datatype(e)
    }
}

/// Individual: named, or anonymous with a document-local label
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Individual {
    Named(NamedIndividual),
    Anonymous(String),
}

impl Individual {
    /// Named individual for an IRI
    pub fn named(iri: impl Into<Iri>) -> Self {
        Individual::Named(NamedIndividual::new(iri))
    }

    /// Anonymous individual for a blank node label
    pub fn anonymous(label: impl Into<String>) -> Self {
        Individual::Anonymous(label.into())
    }

    pub fn as_entity(&self) -> Option<Entity> {
        match self {
            Individual::Named(i) => Some(Entity::NamedIndividual(i.clone())),
            Individual::Anonymous(_) => None,
        }
    }
}

/// Literal value: typed, or a language-tagged string
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Literal {
    Typed { lexical: String, datatype: Datatype },
    Lang { lexical: String, lang: String },
}

impl Literal {
    /// `xsd:string` literal
    pub fn string(lexical: impl Into<String>) -> Self {
        Self::typed(lexical, vocab::xsd::STRING)
    }

    /// Typed literal
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<Iri>) -> Self {
        Literal::Typed {
            lexical: lexical.into(),
            datatype: Datatype::new(datatype),
        }
    }

    /// Language-tagged literal
    pub fn lang(lexical: impl Into<String>, lang: impl Into<String>) -> Self {
        Literal::Lang {
            lexical: lexical.into(),
            lang: lang.into(),
        }
    }

    /// Lexical form
    pub fn lexical(&self) -> &str {
        match self {
            Literal::Typed { lexical, .. } | Literal::Lang { lexical, .. } => lexical,
        }
    }
}

impl From<&rdf::Literal> for Literal {
    fn from(lit: &rdf::Literal) -> Self {
        match lit.language() {
            Some(lang) => Literal::lang(lit.value(), lang),
            None => Literal::typed(lit.value(), lit.datatype().as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_order_groups_by_kind() {
        let mut entities = vec![
            Entity::from(NamedIndividual::new("http://example.org/a")),
            Entity::from(ObjectProperty::new("http://example.org/p")),
            Entity::from(Class::new("http://example.org/Z")),
            Entity::from(Class::new("http://example.org/A")),
        ];
        entities.sort();
        assert_eq!(entities[0].iri().as_str(), "http://example.org/A");
        assert_eq!(entities[1].iri().as_str(), "http://example.org/Z");
        assert_eq!(entities[2].type_keyword(), "ObjectProperty");
        assert_eq!(entities[3].type_keyword(), "NamedIndividual");
    }

    #[test]
    fn test_literal_from_rdf() {
        let plain = rdf::Literal::new_simple_literal("x");
        assert_eq!(Literal::from(&plain), Literal::string("x"));

        let tagged = rdf::Literal::new_language_tagged_literal("chat", "fr").unwrap();
        assert_eq!(Literal::from(&tagged), Literal::lang("chat", "fr"));
        assert_eq!(Literal::from(&tagged).lexical(), "chat");
    }
}
