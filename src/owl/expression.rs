//! Class expressions, data ranges and property expressions

use super::entity::{
    Class, DataProperty, Datatype, Entity, Individual, Iri, Literal, ObjectProperty,
};
use std::collections::BTreeSet;

/// Object property expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectPropertyExpression {
    ObjectProperty(ObjectProperty),
    /// `ObjectInverseOf(P)`
    InverseObjectProperty(ObjectProperty),
}

impl ObjectPropertyExpression {
    /// Named property for an IRI
    pub fn named(iri: impl Into<Iri>) -> Self {
        ObjectPropertyExpression::ObjectProperty(ObjectProperty::new(iri))
    }

    /// Inverse of the named property
    pub fn inverse(iri: impl Into<Iri>) -> Self {
        ObjectPropertyExpression::InverseObjectProperty(ObjectProperty::new(iri))
    }

    /// The underlying named property
    pub fn named_property(&self) -> &ObjectProperty {
        match self {
            ObjectPropertyExpression::ObjectProperty(p)
            | ObjectPropertyExpression::InverseObjectProperty(p) => p,
        }
    }

    /// The entity, if this is a plain named property
    pub fn as_entity(&self) -> Option<Entity> {
        match self {
            ObjectPropertyExpression::ObjectProperty(p) => Some(Entity::ObjectProperty(p.clone())),
            ObjectPropertyExpression::InverseObjectProperty(_) => None,
        }
    }

    pub(crate) fn collect_signature(&self, out: &mut BTreeSet<Entity>) {
        out.insert(Entity::ObjectProperty(self.named_property().clone()));
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    fn from(p: ObjectProperty) -> Self {
        ObjectPropertyExpression::ObjectProperty(p)
    }
}

/// Object or data property expression, as used by `HasKey`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyExpression {
    Object(ObjectPropertyExpression),
    Data(DataProperty),
}

impl PropertyExpression {
    pub(crate) fn collect_signature(&self, out: &mut BTreeSet<Entity>) {
        match self {
            PropertyExpression::Object(p) => p.collect_signature(out),
            PropertyExpression::Data(p) => {
                out.insert(Entity::DataProperty(p.clone()));
            }
        }
    }
}

/// Class expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassExpression {
    Class(Class),
    ObjectIntersectionOf(Vec<ClassExpression>),
    ObjectUnionOf(Vec<ClassExpression>),
    ObjectComplementOf(Box<ClassExpression>),
    ObjectOneOf(Vec<Individual>),
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    ObjectHasValue {
        property: ObjectPropertyExpression,
        value: Individual,
    },
    ObjectHasSelf(ObjectPropertyExpression),
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    DataSomeValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },
    DataAllValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },
    DataHasValue {
        property: DataProperty,
        value: Literal,
    },
    DataMinCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
    DataMaxCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
    DataExactCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
}

impl ClassExpression {
    /// Named class for an IRI
    pub fn class(iri: impl Into<Iri>) -> Self {
        ClassExpression::Class(Class::new(iri))
    }

    /// The named class, if this is not an anonymous expression
    pub fn as_class(&self) -> Option<&Class> {
        match self {
            ClassExpression::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<Entity> {
        self.as_class().cloned().map(Entity::Class)
    }

    pub(crate) fn collect_signature(&self, out: &mut BTreeSet<Entity>) {
        match self {
            ClassExpression::Class(c) => {
                out.insert(Entity::Class(c.clone()));
            }
            ClassExpression::ObjectIntersectionOf(ops) | ClassExpression::ObjectUnionOf(ops) => {
                ops.iter().for_each(|op| op.collect_signature(out));
            }
            ClassExpression::ObjectComplementOf(op) => op.collect_signature(out),
            ClassExpression::ObjectOneOf(individuals) => {
                out.extend(individuals.iter().filter_map(Individual::as_entity));
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler }
            | ClassExpression::ObjectAllValuesFrom { property, filler } => {
                property.collect_signature(out);
                filler.collect_signature(out);
            }
            ClassExpression::ObjectHasValue { property, value } => {
                property.collect_signature(out);
                out.extend(value.as_entity());
            }
            ClassExpression::ObjectHasSelf(property) => property.collect_signature(out),
            ClassExpression::ObjectMinCardinality { property, filler, .. }
            | ClassExpression::ObjectMaxCardinality { property, filler, .. }
            | ClassExpression::ObjectExactCardinality { property, filler, .. } => {
                property.collect_signature(out);
                if let Some(filler) = filler {
                    filler.collect_signature(out);
                }
            }
            ClassExpression::DataSomeValuesFrom { property, filler }
            | ClassExpression::DataAllValuesFrom { property, filler } => {
                out.insert(Entity::DataProperty(property.clone()));
                filler.collect_signature(out);
            }
            ClassExpression::DataHasValue { property, .. } => {
                out.insert(Entity::DataProperty(property.clone()));
            }
            ClassExpression::DataMinCardinality { property, filler, .. }
            | ClassExpression::DataMaxCardinality { property, filler, .. }
            | ClassExpression::DataExactCardinality { property, filler, .. } => {
                out.insert(Entity::DataProperty(property.clone()));
                if let Some(filler) = filler {
                    filler.collect_signature(out);
                }
            }
        }
    }
}

impl From<Class> for ClassExpression {
    fn from(c: Class) -> Self {
        ClassExpression::Class(c)
    }
}

/// One `facet value` pair of a datatype restriction
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacetRestriction {
    pub facet: Iri,
    pub value: Literal,
}

/// Data range
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataRange {
    Datatype(Datatype),
    DataIntersectionOf(Vec<DataRange>),
    DataUnionOf(Vec<DataRange>),
    DataComplementOf(Box<DataRange>),
    DataOneOf(Vec<Literal>),
    DatatypeRestriction {
        datatype: Datatype,
        restrictions: Vec<FacetRestriction>,
    },
}

impl DataRange {
    /// Named datatype for an IRI
    pub fn datatype(iri: impl Into<Iri>) -> Self {
        DataRange::Datatype(Datatype::new(iri))
    }

    pub(crate) fn collect_signature(&self, out: &mut BTreeSet<Entity>) {
        match self {
            DataRange::Datatype(d) | DataRange::DatatypeRestriction { datatype: d, .. } => {
                out.insert(Entity::Datatype(d.clone()));
            }
            DataRange::DataIntersectionOf(ops) | DataRange::DataUnionOf(ops) => {
                ops.iter().for_each(|op| op.collect_signature(out));
            }
            DataRange::DataComplementOf(op) => op.collect_signature(out),
            DataRange::DataOneOf(_) => {}
        }
    }
}
