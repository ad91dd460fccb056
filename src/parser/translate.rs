//! Translation of blank-node structures into model values
//!
//! A [`Translator`] walks RDF lists, class-expression and data-range nodes,
//! inverse property expressions and reification nodes. It only reads the
//! index and the classification cache; every triple it relies on is recorded
//! so the coordinator can consume the whole structure together with the
//! triple that referenced it.

use super::classification::{Classification, ClassificationCache, ResourceKind};
use super::handler::Pass;
use super::index::TripleIndex;
use super::ledger::ConsumedLedger;
use crate::owl::{
    Annotation, AnnotationProperty, AnnotationValue, Class, ClassExpression, DataProperty,
    DataRange, Datatype, FacetRestriction, Individual, Iri, Literal, ObjectProperty,
    ObjectPropertyExpression, PropertyExpression,
};
use crate::rdf::vocab::{self, owl, rdf, rdfs};
use crate::rdf::{NamedNode, RdfObject, RdfSubject, Triple};
use rustc_hash::FxHashSet;
use std::fmt::Display;
use thiserror::Error;

/// Malformed structure behind a triple
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("cycle through {node}")]
    Cycle { node: String },

    #[error("RDF list cell {node} has no rdf:rest")]
    MissingTerminator { node: String },

    #[error("RDF list cell {node} has no rdf:first")]
    MissingFirst { node: String },

    #[error("{node} is not an RDF list")]
    NotAList { node: String },

    #[error("{node} has more than one {predicate}")]
    MultipleValues { node: String, predicate: String },

    #[error("invalid cardinality {value:?} on {node}")]
    InvalidCardinality { node: String, value: String },

    #[error("{node} is missing {component}")]
    MissingComponent { node: String, component: String },

    #[error("{node} is not a valid {expected}")]
    Unexpected { node: String, expected: String },

    #[error("{triple} already belongs to another axiom")]
    AlreadyConsumed { triple: String },
}

/// Why a structure could not be translated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// Not enough classification information yet; the triple is retried
    #[error("unresolved: {0}")]
    Unresolved(String),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("unsupported construct {construct} at {node}")]
    Unsupported { node: String, construct: String },
}

pub type TranslateResult<T> = Result<T, TranslateError>;

/// What a finished translation relied on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footprint {
    /// Structural triples, in the order they were read
    pub used: Vec<Triple>,
    /// Unknown resources accepted in implied positions, with the kind the
    /// position gives them
    pub implied: Vec<(RdfSubject, ResourceKind)>,
}

fn unexpected(node: &impl Display, expected: &str) -> TranslateError {
    StructuralError::Unexpected {
        node: node.to_string(),
        expected: expected.to_string(),
    }
    .into()
}

fn missing(node: &RdfSubject, component: &str) -> TranslateError {
    StructuralError::MissingComponent {
        node: node.to_string(),
        component: component.to_string(),
    }
    .into()
}

#[derive(Clone, Copy)]
enum Bound {
    Min,
    Max,
    Exact,
}

const CARDINALITIES: [(&str, Bound, bool); 6] = [
    (owl::MIN_CARDINALITY, Bound::Min, false),
    (owl::MAX_CARDINALITY, Bound::Max, false),
    (owl::CARDINALITY, Bound::Exact, false),
    (owl::MIN_QUALIFIED_CARDINALITY, Bound::Min, true),
    (owl::MAX_QUALIFIED_CARDINALITY, Bound::Max, true),
    (owl::QUALIFIED_CARDINALITY, Bound::Exact, true),
];

/// Read-only structure walker for one handler invocation
pub struct Translator<'a> {
    index: &'a TripleIndex,
    cache: &'a ClassificationCache,
    ledger: &'a ConsumedLedger,
    pass: Pass,
    used: Vec<Triple>,
    implied: Vec<(RdfSubject, ResourceKind)>,
    taken: FxHashSet<&'a Triple>,
    visiting: FxHashSet<RdfSubject>,
}

impl<'a> Translator<'a> {
    pub fn new(
        index: &'a TripleIndex,
        cache: &'a ClassificationCache,
        ledger: &'a ConsumedLedger,
        pass: Pass,
    ) -> Self {
        Self {
            index,
            cache,
            ledger,
            pass,
            used: Vec::new(),
            implied: Vec::new(),
            taken: FxHashSet::default(),
            visiting: FxHashSet::default(),
        }
    }

    pub fn pass(&self) -> Pass {
        self.pass
    }

    pub fn finish(self) -> Footprint {
        Footprint {
            used: self.used,
            implied: self.implied,
        }
    }

    /// Check that `resource` may be used where `kind` is expected.
    ///
    /// Exclusive positions need `Exactly(kind)`. Implied positions also
    /// accept a conflicting resource that includes `kind`, and an unknown
    /// resource once the streaming pass is over; that resource takes the
    /// kind of the position when the plan is committed.
    pub fn require(
        &mut self,
        resource: &RdfSubject,
        kind: ResourceKind,
        implied: bool,
    ) -> TranslateResult<()> {
        let accepted = match self.cache.classify(resource) {
            Classification::Exactly(k) => *k == kind,
            Classification::Conflicting(kinds) => implied && kinds.contains(&kind),
            Classification::Unknown => {
                let accepted = implied && self.pass == Pass::Deferred;
                if accepted && !self.implied.iter().any(|(r, k)| r == resource && *k == kind) {
                    self.implied.push((resource.clone(), kind));
                }
                accepted
            }
        };
        if accepted {
            Ok(())
        } else {
            Err(TranslateError::Unresolved(format!(
                "{} is not classified as {}",
                resource, kind
            )))
        }
    }

    fn take(&mut self, triple: &'a Triple) -> TranslateResult<()> {
        if self.ledger.is_consumed(triple) {
            return Err(StructuralError::AlreadyConsumed {
                triple: triple.to_string(),
            }
            .into());
        }
        if self.taken.insert(triple) {
            self.used.push(triple.clone());
        }
        Ok(())
    }

    /// The single value of `predicate` on `node`, taken if present
    pub fn optional(
        &mut self,
        node: &RdfSubject,
        predicate: &'static str,
    ) -> TranslateResult<Option<&'a Triple>> {
        let index = self.index;
        let mut values = index.with_predicate(node, predicate);
        let Some(first) = values.next() else {
            return Ok(None);
        };
        if values.next().is_some() {
            return Err(StructuralError::MultipleValues {
                node: node.to_string(),
                predicate: predicate.to_string(),
            }
            .into());
        }
        self.take(first)?;
        Ok(Some(first))
    }

    pub fn required(
        &mut self,
        node: &RdfSubject,
        predicate: &'static str,
    ) -> TranslateResult<&'a Triple> {
        self.optional(node, predicate)?
            .ok_or_else(|| missing(node, predicate))
    }

    /// Take the `rdf:type` triples of `node` whose object is one of `types`
    fn take_types(&mut self, node: &RdfSubject, types: &[&str]) -> TranslateResult<()> {
        let index = self.index;
        for triple in index.with_predicate(node, rdf::TYPE) {
            if types.iter().any(|t| triple.object.is_iri(t)) {
                self.take(triple)?;
            }
        }
        Ok(())
    }

    fn enter(&mut self, node: &RdfSubject) -> TranslateResult<()> {
        if self.visiting.insert(node.clone()) {
            Ok(())
        } else {
            Err(StructuralError::Cycle {
                node: node.to_string(),
            }
            .into())
        }
    }

    fn leave(&mut self, node: &RdfSubject) {
        self.visiting.remove(node);
    }

    /// Walk an RDF list from `head` to `rdf:nil`, returning the items in
    /// list order
    pub fn list(&mut self, head: &RdfObject) -> TranslateResult<Vec<&'a RdfObject>> {
        let index = self.index;
        let mut items = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = head.clone();

        loop {
            if current.is_iri(rdf::NIL) {
                return Ok(items);
            }
            let cell = current.as_subject().ok_or_else(|| StructuralError::NotAList {
                node: current.to_string(),
            })?;
            if !seen.insert(cell.clone()) {
                return Err(StructuralError::Cycle {
                    node: cell.to_string(),
                }
                .into());
            }
            if index.with_subject(&cell).next().is_none() {
                return Err(StructuralError::NotAList {
                    node: cell.to_string(),
                }
                .into());
            }

            let first = self
                .optional(&cell, rdf::FIRST)?
                .ok_or_else(|| StructuralError::MissingFirst {
                    node: cell.to_string(),
                })?;
            let rest = self
                .optional(&cell, rdf::REST)?
                .ok_or_else(|| StructuralError::MissingTerminator {
                    node: cell.to_string(),
                })?;
            self.take_types(&cell, &[rdf::LIST])?;

            items.push(&first.object);
            current = rest.object.clone();
        }
    }

    /// Object property expression list, e.g. a property chain
    pub fn property_expression_list(
        &mut self,
        head: &RdfObject,
    ) -> TranslateResult<Vec<ObjectPropertyExpression>> {
        self.list(head)?
            .into_iter()
            .map(|item| self.object_property_expression(item, true))
            .collect()
    }

    /// Mixed object/data property list, as used by `owl:hasKey`
    pub fn key_property_list(&mut self, head: &RdfObject) -> TranslateResult<Vec<PropertyExpression>> {
        self.list(head)?
            .into_iter()
            .map(|item| self.property_expression(item))
            .collect()
    }

    pub fn class_expression_list(&mut self, head: &RdfObject) -> TranslateResult<Vec<ClassExpression>> {
        self.list(head)?
            .into_iter()
            .map(|item| self.class_expression(item))
            .collect()
    }

    pub fn data_range_list(&mut self, head: &RdfObject) -> TranslateResult<Vec<DataRange>> {
        self.list(head)?
            .into_iter()
            .map(|item| self.data_range(item))
            .collect()
    }

    pub fn individual_list(&mut self, head: &RdfObject) -> TranslateResult<Vec<Individual>> {
        self.list(head)?
            .into_iter()
            .map(|item| self.individual(item))
            .collect()
    }

    pub fn data_property_list(&mut self, head: &RdfObject) -> TranslateResult<Vec<DataProperty>> {
        self.list(head)?
            .into_iter()
            .map(|item| self.data_property(item, false))
            .collect()
    }

    /// Named property, or `owl:inverseOf` node
    pub fn object_property_expression(
        &mut self,
        object: &RdfObject,
        implied: bool,
    ) -> TranslateResult<ObjectPropertyExpression> {
        match object {
            RdfObject::NamedNode(n) => {
                self.require(&n.clone().into(), ResourceKind::ObjectProperty, implied)?;
                Ok(ObjectPropertyExpression::ObjectProperty(ObjectProperty::new(
                    Iri::from(n),
                )))
            }
            RdfObject::BlankNode(b) => {
                let node = RdfSubject::BlankNode(b.clone());
                let inverse = self.required(&node, owl::INVERSE_OF)?;
                match &inverse.object {
                    RdfObject::NamedNode(n) => {
                        self.require(&n.clone().into(), ResourceKind::ObjectProperty, true)?;
                        Ok(ObjectPropertyExpression::InverseObjectProperty(
                            ObjectProperty::new(Iri::from(n)),
                        ))
                    }
                    other => Err(unexpected(other, "named object property")),
                }
            }
            RdfObject::Literal(_) => Err(unexpected(object, "object property expression")),
        }
    }

    pub fn data_property(&mut self, object: &RdfObject, implied: bool) -> TranslateResult<DataProperty> {
        let node = named(object).ok_or_else(|| unexpected(object, "data property"))?;
        self.require(&node.clone().into(), ResourceKind::DataProperty, implied)?;
        Ok(DataProperty::new(Iri::from(node)))
    }

    pub fn annotation_property(
        &mut self,
        object: &RdfObject,
        implied: bool,
    ) -> TranslateResult<AnnotationProperty> {
        let node = named(object).ok_or_else(|| unexpected(object, "annotation property"))?;
        self.require(&node.clone().into(), ResourceKind::AnnotationProperty, implied)?;
        Ok(AnnotationProperty::new(Iri::from(node)))
    }

    /// Key element: its kind comes from the classification of the property
    pub fn property_expression(&mut self, object: &RdfObject) -> TranslateResult<PropertyExpression> {
        if let Some(node) = named(object) {
            let resource = RdfSubject::NamedNode(node.clone());
            if self.cache.is_only(&resource, ResourceKind::DataProperty) {
                return Ok(PropertyExpression::Data(DataProperty::new(Iri::from(node))));
            }
        }
        self.object_property_expression(object, false)
            .map(PropertyExpression::Object)
    }

    pub fn class_expression(&mut self, object: &RdfObject) -> TranslateResult<ClassExpression> {
        match object {
            RdfObject::NamedNode(n) => {
                self.require(&n.clone().into(), ResourceKind::Class, true)?;
                Ok(ClassExpression::Class(Class::new(Iri::from(n))))
            }
            RdfObject::BlankNode(b) => {
                let node = RdfSubject::BlankNode(b.clone());
                self.enter(&node)?;
                let result = self.anonymous_class_expression(&node);
                self.leave(&node);
                result
            }
            RdfObject::Literal(_) => Err(unexpected(object, "class expression")),
        }
    }

    fn anonymous_class_expression(&mut self, node: &RdfSubject) -> TranslateResult<ClassExpression> {
        if self.is_data_range_node(node) {
            return Err(unexpected(node, "class expression"));
        }
        if let Some(t) = self.optional(node, owl::INTERSECTION_OF)? {
            self.take_types(node, &[owl::CLASS])?;
            return Ok(ClassExpression::ObjectIntersectionOf(
                self.class_expression_list(&t.object)?,
            ));
        }
        if let Some(t) = self.optional(node, owl::UNION_OF)? {
            self.take_types(node, &[owl::CLASS])?;
            return Ok(ClassExpression::ObjectUnionOf(
                self.class_expression_list(&t.object)?,
            ));
        }
        if let Some(t) = self.optional(node, owl::COMPLEMENT_OF)? {
            self.take_types(node, &[owl::CLASS])?;
            return Ok(ClassExpression::ObjectComplementOf(Box::new(
                self.class_expression(&t.object)?,
            )));
        }
        if let Some(t) = self.optional(node, owl::ONE_OF)? {
            self.take_types(node, &[owl::CLASS])?;
            return Ok(ClassExpression::ObjectOneOf(self.individual_list(&t.object)?));
        }
        if self.index.with_predicate(node, owl::ON_PROPERTY).next().is_some() {
            self.take_types(node, &[owl::RESTRICTION])?;
            return self.restriction(node);
        }
        Err(unexpected(node, "class expression"))
    }

    pub fn is_data_range_node(&self, node: &RdfSubject) -> bool {
        self.index.has_type(node, rdfs::DATATYPE)
            || [owl::DATATYPE_COMPLEMENT_OF, owl::ON_DATATYPE, owl::WITH_RESTRICTIONS]
                .iter()
                .any(|p| self.index.with_predicate(node, p).next().is_some())
    }

    fn restriction(&mut self, node: &RdfSubject) -> TranslateResult<ClassExpression> {
        let on_property = self.required(node, owl::ON_PROPERTY)?;
        let property = &on_property.object;
        if self.is_data_restriction(node, property)? {
            self.data_restriction(node, property)
        } else {
            self.object_restriction(node, property)
        }
    }

    fn is_data_restriction(&self, node: &RdfSubject, property: &RdfObject) -> TranslateResult<bool> {
        let resource = match property {
            RdfObject::NamedNode(n) => RdfSubject::NamedNode(n.clone()),
            RdfObject::BlankNode(_) => return Ok(false),
            RdfObject::Literal(_) => return Err(unexpected(property, "restricted property")),
        };
        match self.cache.classify(&resource) {
            Classification::Exactly(ResourceKind::ObjectProperty) => Ok(false),
            Classification::Exactly(ResourceKind::DataProperty) => Ok(true),
            Classification::Unknown if self.pass == Pass::Deferred => {
                self.filler_hint(node).ok_or_else(|| {
                    TranslateError::Unresolved(format!(
                        "kind of restricted property {} is unknown",
                        resource
                    ))
                })
            }
            _ => Err(TranslateError::Unresolved(format!(
                "{} is not classified as a single property kind",
                resource
            ))),
        }
    }

    /// Whether the restriction's filler marks it as a data restriction
    fn filler_hint(&self, node: &RdfSubject) -> Option<bool> {
        let has = |p: &'static str| self.index.with_predicate(node, p).next();
        if has(owl::ON_DATA_RANGE).is_some() {
            return Some(true);
        }
        if has(owl::ON_CLASS).is_some() || has(owl::HAS_SELF).is_some() {
            return Some(false);
        }
        if let Some(t) = has(owl::HAS_VALUE) {
            return Some(t.object.is_literal());
        }
        let filler = has(owl::SOME_VALUES_FROM).or_else(|| has(owl::ALL_VALUES_FROM))?;
        match &filler.object {
            RdfObject::NamedNode(n) => match self.cache.classify(&n.clone().into()) {
                Classification::Exactly(ResourceKind::Datatype) => Some(true),
                Classification::Exactly(ResourceKind::Class) => Some(false),
                _ => None,
            },
            RdfObject::BlankNode(b) => Some(self.is_data_range_node(&b.clone().into())),
            RdfObject::Literal(_) => None,
        }
    }

    fn cardinality(&mut self, node: &RdfSubject) -> TranslateResult<Option<(Bound, u32, bool)>> {
        for (predicate, bound, qualified) in CARDINALITIES {
            if let Some(t) = self.optional(node, predicate)? {
                let value = self.literal(&t.object)?;
                let n = value.lexical().trim().parse::<u32>().map_err(|_| {
                    StructuralError::InvalidCardinality {
                        node: node.to_string(),
                        value: value.lexical().to_string(),
                    }
                })?;
                return Ok(Some((bound, n, qualified)));
            }
        }
        Ok(None)
    }

    fn object_restriction(
        &mut self,
        node: &RdfSubject,
        property: &RdfObject,
    ) -> TranslateResult<ClassExpression> {
        let property = self.object_property_expression(property, true)?;

        if let Some(t) = self.optional(node, owl::SOME_VALUES_FROM)? {
            let filler = Box::new(self.class_expression(&t.object)?);
            return Ok(ClassExpression::ObjectSomeValuesFrom { property, filler });
        }
        if let Some(t) = self.optional(node, owl::ALL_VALUES_FROM)? {
            let filler = Box::new(self.class_expression(&t.object)?);
            return Ok(ClassExpression::ObjectAllValuesFrom { property, filler });
        }
        if let Some(t) = self.optional(node, owl::HAS_VALUE)? {
            let value = self.individual(&t.object)?;
            return Ok(ClassExpression::ObjectHasValue { property, value });
        }
        if self.optional(node, owl::HAS_SELF)?.is_some() {
            return Ok(ClassExpression::ObjectHasSelf(property));
        }
        if let Some((bound, cardinality, qualified)) = self.cardinality(node)? {
            let filler = if qualified {
                let on_class = self.required(node, owl::ON_CLASS)?;
                Some(Box::new(self.class_expression(&on_class.object)?))
            } else {
                None
            };
            return Ok(match bound {
                Bound::Min => ClassExpression::ObjectMinCardinality {
                    cardinality,
                    property,
                    filler,
                },
                Bound::Max => ClassExpression::ObjectMaxCardinality {
                    cardinality,
                    property,
                    filler,
                },
                Bound::Exact => ClassExpression::ObjectExactCardinality {
                    cardinality,
                    property,
                    filler,
                },
            });
        }
        Err(missing(node, "restriction filler"))
    }

    fn data_restriction(
        &mut self,
        node: &RdfSubject,
        property: &RdfObject,
    ) -> TranslateResult<ClassExpression> {
        let property = self.data_property(property, true)?;

        if let Some(t) = self.optional(node, owl::SOME_VALUES_FROM)? {
            let filler = self.data_range(&t.object)?;
            return Ok(ClassExpression::DataSomeValuesFrom { property, filler });
        }
        if let Some(t) = self.optional(node, owl::ALL_VALUES_FROM)? {
            let filler = self.data_range(&t.object)?;
            return Ok(ClassExpression::DataAllValuesFrom { property, filler });
        }
        if let Some(t) = self.optional(node, owl::HAS_VALUE)? {
            let value = self.literal(&t.object)?;
            return Ok(ClassExpression::DataHasValue { property, value });
        }
        if let Some((bound, cardinality, qualified)) = self.cardinality(node)? {
            let filler = if qualified {
                let on_range = self.required(node, owl::ON_DATA_RANGE)?;
                Some(self.data_range(&on_range.object)?)
            } else {
                None
            };
            return Ok(match bound {
                Bound::Min => ClassExpression::DataMinCardinality {
                    cardinality,
                    property,
                    filler,
                },
                Bound::Max => ClassExpression::DataMaxCardinality {
                    cardinality,
                    property,
                    filler,
                },
                Bound::Exact => ClassExpression::DataExactCardinality {
                    cardinality,
                    property,
                    filler,
                },
            });
        }
        Err(missing(node, "restriction filler"))
    }

    pub fn data_range(&mut self, object: &RdfObject) -> TranslateResult<DataRange> {
        match object {
            RdfObject::NamedNode(n) => {
                self.require(&n.clone().into(), ResourceKind::Datatype, true)?;
                Ok(DataRange::Datatype(Datatype::new(Iri::from(n))))
            }
            RdfObject::BlankNode(b) => {
                let node = RdfSubject::BlankNode(b.clone());
                self.enter(&node)?;
                let result = self.anonymous_data_range(&node);
                self.leave(&node);
                result
            }
            RdfObject::Literal(_) => Err(unexpected(object, "data range")),
        }
    }

    fn anonymous_data_range(&mut self, node: &RdfSubject) -> TranslateResult<DataRange> {
        self.take_types(node, &[rdfs::DATATYPE])?;

        if let Some(t) = self.optional(node, owl::INTERSECTION_OF)? {
            return Ok(DataRange::DataIntersectionOf(self.data_range_list(&t.object)?));
        }
        if let Some(t) = self.optional(node, owl::UNION_OF)? {
            return Ok(DataRange::DataUnionOf(self.data_range_list(&t.object)?));
        }
        if let Some(t) = self.optional(node, owl::DATATYPE_COMPLEMENT_OF)? {
            return Ok(DataRange::DataComplementOf(Box::new(
                self.data_range(&t.object)?,
            )));
        }
        if let Some(t) = self.optional(node, owl::ONE_OF)? {
            let literals = self
                .list(&t.object)?
                .into_iter()
                .map(|item| self.literal(item))
                .collect::<TranslateResult<Vec<_>>>()?;
            return Ok(DataRange::DataOneOf(literals));
        }
        if let Some(t) = self.optional(node, owl::ON_DATATYPE)? {
            let datatype = named(&t.object).ok_or_else(|| unexpected(&t.object, "datatype"))?;
            self.require(&datatype.clone().into(), ResourceKind::Datatype, true)?;
            let restrictions = self.required(node, owl::WITH_RESTRICTIONS)?;
            let restrictions = self
                .list(&restrictions.object)?
                .into_iter()
                .map(|item| self.facet_restriction(item))
                .collect::<TranslateResult<Vec<_>>>()?;
            return Ok(DataRange::DatatypeRestriction {
                datatype: Datatype::new(Iri::from(datatype)),
                restrictions,
            });
        }
        Err(unexpected(node, "data range"))
    }

    fn facet_restriction(&mut self, item: &RdfObject) -> TranslateResult<FacetRestriction> {
        let index = self.index;
        let node = item
            .as_subject()
            .filter(RdfSubject::is_blank_node)
            .ok_or_else(|| unexpected(item, "facet restriction"))?;
        let mut facets = index
            .with_subject(&node)
            .filter(|t| vocab::is_facet(t.predicate.as_str()));
        let facet = facets
            .next()
            .ok_or_else(|| missing(&node, "constraining facet"))?;
        if facets.next().is_some() {
            return Err(StructuralError::MultipleValues {
                node: node.to_string(),
                predicate: "constraining facet".to_string(),
            }
            .into());
        }
        self.take(facet)?;
        Ok(FacetRestriction {
            facet: Iri::from(facet.predicate.as_named_node()),
            value: self.literal(&facet.object)?,
        })
    }

    pub fn individual(&self, object: &RdfObject) -> TranslateResult<Individual> {
        match object {
            RdfObject::NamedNode(n) => Ok(Individual::named(Iri::from(n))),
            RdfObject::BlankNode(b) => Ok(Individual::anonymous(b.as_str())),
            RdfObject::Literal(_) => Err(unexpected(object, "individual")),
        }
    }

    pub fn subject_individual(&self, subject: &RdfSubject) -> Individual {
        match subject {
            RdfSubject::NamedNode(n) => Individual::named(Iri::from(n)),
            RdfSubject::BlankNode(b) => Individual::anonymous(b.as_str()),
        }
    }

    pub fn literal(&self, object: &RdfObject) -> TranslateResult<Literal> {
        object
            .as_literal()
            .map(Literal::from)
            .ok_or_else(|| unexpected(object, "literal"))
    }

    pub fn annotation_value(&self, object: &RdfObject) -> AnnotationValue {
        match object {
            RdfObject::NamedNode(n) => AnnotationValue::Iri(Iri::from(n)),
            RdfObject::BlankNode(b) => AnnotationValue::Anonymous(b.as_str().to_string()),
            RdfObject::Literal(l) => AnnotationValue::Literal(Literal::from(l)),
        }
    }

    /// Annotations carried directly by `node`. Reserved predicates are left
    /// for the structure the node belongs to.
    pub fn annotations_on(&mut self, node: &RdfSubject) -> TranslateResult<Vec<Annotation>> {
        let index = self.index;
        let mut annotations = Vec::new();
        for triple in index.with_subject(node) {
            if vocab::is_reserved(triple.predicate.as_str()) {
                continue;
            }
            self.require(
                &triple.predicate.as_subject(),
                ResourceKind::AnnotationProperty,
                true,
            )?;
            self.take(triple)?;
            annotations.push(Annotation::new(
                AnnotationProperty::new(Iri::from(triple.predicate.as_named_node())),
                self.annotation_value(&triple.object),
            ));
        }
        Ok(annotations)
    }

    /// Annotations from every reification node that names `triple`
    pub fn reified_annotations(&mut self, triple: &Triple) -> TranslateResult<Vec<Annotation>> {
        let index = self.index;
        let mut annotations = Vec::new();
        for node in index.reifications(triple) {
            self.take_types(node, &[owl::AXIOM, owl::ANNOTATION])?;
            self.required(node, owl::ANNOTATED_SOURCE)?;
            self.required(node, owl::ANNOTATED_PROPERTY)?;
            self.required(node, owl::ANNOTATED_TARGET)?;
            annotations.extend(self.annotations_on(node)?);
        }
        Ok(annotations)
    }
}

fn named(object: &RdfObject) -> Option<&NamedNode> {
    match object {
        RdfObject::NamedNode(n) => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classification::Provenance;
    use crate::rdf::{RdfFormat, RdfParser};

    const PREFIXES: &str = "@prefix : <http://example.org/> .\n\
        @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
        @prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n";

    fn index(turtle: &str) -> TripleIndex {
        let doc = format!("{}{}", PREFIXES, turtle);
        TripleIndex::new(RdfParser::parse(&doc, RdfFormat::Turtle).unwrap())
    }

    fn object_of(index: &TripleIndex, predicate: &str) -> RdfObject {
        index
            .triples()
            .iter()
            .find(|t| t.predicate.as_str() == predicate)
            .unwrap()
            .object
            .clone()
    }

    fn declare(cache: &mut ClassificationCache, iri: &str, kind: ResourceKind) {
        let node = NamedNode::new(iri).unwrap();
        cache.declare(&node.into(), kind, Provenance::Declared);
    }

    #[test]
    fn test_property_chain_keeps_order() {
        let idx = index(":r owl:propertyChainAxiom ( :p [ owl:inverseOf :q ] ) .");
        let mut cache = ClassificationCache::new();
        declare(&mut cache, "http://example.org/p", ResourceKind::ObjectProperty);
        declare(&mut cache, "http://example.org/q", ResourceKind::ObjectProperty);
        let ledger = ConsumedLedger::new();

        let head = object_of(&idx, owl::PROPERTY_CHAIN_AXIOM);
        let mut tr = Translator::new(&idx, &cache, &ledger, Pass::Streaming);
        let chain = tr.property_expression_list(&head).unwrap();
        assert_eq!(
            chain,
            vec![
                ObjectPropertyExpression::named("http://example.org/p"),
                ObjectPropertyExpression::inverse("http://example.org/q"),
            ]
        );
        // two list cells plus the inverseOf triple
        assert_eq!(tr.finish().used.len(), 5);
    }

    #[test]
    fn test_unknown_chain_member_waits_for_deferred_pass() {
        let idx = index(":r owl:propertyChainAxiom ( :p :q ) .");
        let cache = ClassificationCache::new();
        let ledger = ConsumedLedger::new();
        let head = object_of(&idx, owl::PROPERTY_CHAIN_AXIOM);

        let mut streaming = Translator::new(&idx, &cache, &ledger, Pass::Streaming);
        assert!(matches!(
            streaming.property_expression_list(&head),
            Err(TranslateError::Unresolved(_))
        ));

        let mut deferred = Translator::new(&idx, &cache, &ledger, Pass::Deferred);
        assert_eq!(deferred.property_expression_list(&head).unwrap().len(), 2);
    }

    #[test]
    fn test_list_cycle_and_missing_terminator() {
        let idx = index(
            ":r owl:propertyChainAxiom _:a .\n\
             _:a rdf:first :p ; rdf:rest _:b .\n\
             _:b rdf:first :q ; rdf:rest _:a .\n\
             :s owl:members _:c .\n\
             _:c rdf:first :p .",
        );
        let cache = ClassificationCache::new();
        let ledger = ConsumedLedger::new();

        let mut tr = Translator::new(&idx, &cache, &ledger, Pass::Deferred);
        let cyclic = object_of(&idx, owl::PROPERTY_CHAIN_AXIOM);
        assert!(matches!(
            tr.list(&cyclic),
            Err(TranslateError::Structural(StructuralError::Cycle { .. }))
        ));

        let open = object_of(&idx, owl::MEMBERS);
        assert!(matches!(
            tr.list(&open),
            Err(TranslateError::Structural(StructuralError::MissingTerminator { .. }))
        ));
    }

    #[test]
    fn test_restriction_kind_from_classification_and_filler() {
        let idx = index(
            ":A rdfs:subClassOf [ a owl:Restriction ; owl:onProperty :age ; owl:someValuesFrom xsd:integer ] .\n\
             :B rdfs:subClassOf [ a owl:Restriction ; owl:onProperty :knows ; owl:minQualifiedCardinality \"2\"^^xsd:nonNegativeInteger ; owl:onClass :A ] .",
        );
        let cache = ClassificationCache::with_builtins();
        let ledger = ConsumedLedger::new();
        let fillers: Vec<RdfObject> = idx
            .triples()
            .iter()
            .filter(|t| t.predicate.as_str() == rdfs::SUB_CLASS_OF)
            .map(|t| t.object.clone())
            .collect();

        let mut streaming = Translator::new(&idx, &cache, &ledger, Pass::Streaming);
        assert!(matches!(
            streaming.class_expression(&fillers[0]),
            Err(TranslateError::Unresolved(_))
        ));

        let mut tr = Translator::new(&idx, &cache, &ledger, Pass::Deferred);
        assert_eq!(
            tr.class_expression(&fillers[0]).unwrap(),
            ClassExpression::DataSomeValuesFrom {
                property: DataProperty::new("http://example.org/age"),
                filler: DataRange::datatype(vocab::xsd::INTEGER),
            }
        );
        assert_eq!(
            tr.class_expression(&fillers[1]).unwrap(),
            ClassExpression::ObjectMinCardinality {
                cardinality: 2,
                property: ObjectPropertyExpression::named("http://example.org/knows"),
                filler: Some(Box::new(ClassExpression::class("http://example.org/A"))),
            }
        );
    }

    #[test]
    fn test_invalid_cardinality() {
        let idx = index(":A rdfs:subClassOf [ a owl:Restriction ; owl:onProperty :p ; owl:maxCardinality \"many\" ] .");
        let mut cache = ClassificationCache::new();
        declare(&mut cache, "http://example.org/p", ResourceKind::ObjectProperty);
        let ledger = ConsumedLedger::new();
        let filler = object_of(&idx, rdfs::SUB_CLASS_OF);

        let mut tr = Translator::new(&idx, &cache, &ledger, Pass::Deferred);
        assert!(matches!(
            tr.class_expression(&filler),
            Err(TranslateError::Structural(StructuralError::InvalidCardinality { .. }))
        ));
    }

    #[test]
    fn test_consumed_structure_is_refused() {
        let idx = index(":A rdfs:subClassOf [ owl:complementOf :B ] .");
        let cache = ClassificationCache::new();
        let mut ledger = ConsumedLedger::new();
        let complement = idx
            .triples()
            .iter()
            .find(|t| t.predicate.as_str() == owl::COMPLEMENT_OF)
            .unwrap()
            .clone();
        ledger.consume(complement);
        let filler = object_of(&idx, rdfs::SUB_CLASS_OF);

        let mut tr = Translator::new(&idx, &cache, &ledger, Pass::Deferred);
        assert!(matches!(
            tr.class_expression(&filler),
            Err(TranslateError::Structural(StructuralError::AlreadyConsumed { .. }))
        ));
    }

    #[test]
    fn test_datatype_restriction() {
        let idx = index(
            ":Adult owl:equivalentClass [ a rdfs:Datatype ; owl:onDatatype xsd:integer ;\n\
               owl:withRestrictions ( [ xsd:minInclusive 18 ] ) ] .",
        );
        let cache = ClassificationCache::with_builtins();
        let ledger = ConsumedLedger::new();
        let range = object_of(&idx, owl::EQUIVALENT_CLASS);

        let mut tr = Translator::new(&idx, &cache, &ledger, Pass::Streaming);
        let DataRange::DatatypeRestriction { datatype, restrictions } = tr.data_range(&range).unwrap()
        else {
            panic!("expected a datatype restriction");
        };
        assert_eq!(datatype.iri().as_str(), vocab::xsd::INTEGER);
        assert_eq!(restrictions[0].facet.as_str(), vocab::xsd::MIN_INCLUSIVE);
        assert_eq!(restrictions[0].value, Literal::typed("18", vocab::xsd::INTEGER));
    }
}
