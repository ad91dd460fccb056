//! Triple handlers
//!
//! Each handler recognises one class of triples and turns a recognised
//! triple into a [`Plan`]: the axiom or header change it stands for, the
//! structural triples it used and the annotations that go with it. Planning
//! never mutates anything; the [`Coordinator`] applies the plan.

mod assertion;
mod predicate;
mod types;

pub use assertion::{LiteralObjectHandler, ResourceObjectHandler};
pub use predicate::{PredicateHandler, PredicateRule};
pub use types::{is_characteristic, TypeHandler, TypeRule};

use super::classification::{Classification, ResourceKind};
use super::coordinator::Coordinator;
use super::translate::{Footprint, TranslateError, TranslateResult, Translator};
use crate::owl::{Annotation, Axiom, Iri};
use crate::rdf::{RdfObject, RdfSubject, Triple};

/// Resolution phase a handler is invoked in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// First pass, in source order
    Streaming,
    /// Retries over the deferred queue
    Deferred,
}

/// Dispatch priority. Lower tiers are tried first; within a tier handlers
/// keep their registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandlerTier {
    PredicateKeyed,
    TypeDeclaration,
    LiteralObject,
    ResourceObject,
}

/// What committing a plan does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Axiom(Axiom),
    /// Classify the resource, optionally adding a declaration axiom
    Declare {
        resource: RdfSubject,
        kind: ResourceKind,
        axiom: Option<Axiom>,
    },
    /// Ontology header
    Ontology(RdfSubject),
    VersionIri(Iri),
    Import(Iri),
    OntologyAnnotation(Annotation),
}

/// A handler's resolution of one triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub effect: Effect,
    /// Structural triples consumed together with the handled triple
    pub used: Vec<Triple>,
    /// Kinds taken on by unknown resources in implied positions
    pub implied: Vec<(RdfSubject, ResourceKind)>,
    /// Annotations for the axiom, pushed to the pending buffer on commit
    pub annotations: Vec<Annotation>,
}

impl Plan {
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            used: Vec::new(),
            implied: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Plan whose structure and implied kinds come from `footprint`
    pub(crate) fn with_footprint(
        effect: Effect,
        footprint: Footprint,
        annotations: Vec<Annotation>,
    ) -> Self {
        Self {
            effect,
            used: footprint.used,
            implied: footprint.implied,
            annotations,
        }
    }

    /// Fold in what a second translation relied on
    pub(crate) fn absorb(&mut self, footprint: Footprint) {
        self.used.extend(footprint.used);
        for implied in footprint.implied {
            if !self.implied.contains(&implied) {
                self.implied.push(implied);
            }
        }
    }

    /// Axiom plan carrying the annotations of every reification of
    /// `triple`, and everything the translator used
    pub(crate) fn axiom(
        mut tr: Translator<'_>,
        triple: &Triple,
        axiom: Axiom,
    ) -> TranslateResult<Self> {
        let annotations = tr.reified_annotations(triple)?;
        Ok(Self::with_footprint(Effect::Axiom(axiom), tr.finish(), annotations))
    }
}

/// Handler capability
pub trait TripleHandler {
    fn name(&self) -> &'static str;

    fn tier(&self) -> HandlerTier;

    /// Shape test on the triple alone
    fn matches(&self, triple: &Triple) -> bool;

    /// Resolve the triple against the current state. `Unresolved` means
    /// "not yet"; any other error means the handler owns the triple but
    /// cannot build an axiom from it.
    fn plan(&self, triple: &Triple, cx: &Coordinator<'_>, pass: Pass) -> TranslateResult<Plan>;

    /// Whether the handler would take the triple in the streaming pass
    fn can_handle_streaming(&self, triple: &Triple, cx: &Coordinator<'_>) -> bool {
        self.eligible(triple, cx, Pass::Streaming)
    }

    /// Whether the handler would take the triple in the deferred pass
    fn can_handle(&self, triple: &Triple, cx: &Coordinator<'_>) -> bool {
        self.eligible(triple, cx, Pass::Deferred)
    }

    fn eligible(&self, triple: &Triple, cx: &Coordinator<'_>, pass: Pass) -> bool {
        self.matches(triple)
            && !matches!(
                self.plan(triple, cx, pass),
                Err(TranslateError::Unresolved(_))
            )
    }

    /// Plan and commit. Returns `Ok(false)` for a triple that is already
    /// consumed.
    fn handle_triple(
        &self,
        triple: &Triple,
        cx: &mut Coordinator<'_>,
        pass: Pass,
    ) -> TranslateResult<bool> {
        if cx.is_consumed(triple) {
            return Ok(false);
        }
        let plan = self.plan(triple, cx, pass)?;
        cx.commit(triple, plan);
        Ok(true)
    }
}

/// Type alias for boxed handlers
pub type HandlerBox = Box<dyn TripleHandler>;

/// Ordered handler set
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<HandlerBox>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in handler
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for rule in PredicateRule::ALL {
            registry.register(Box::new(PredicateHandler::new(rule)));
        }
        for rule in TypeRule::ALL {
            registry.register(Box::new(TypeHandler::new(rule)));
        }
        registry.register(Box::new(LiteralObjectHandler));
        registry.register(Box::new(ResourceObjectHandler));
        registry
    }

    /// Add a handler, keeping the registry ordered by tier
    pub fn register(&mut self, handler: HandlerBox) {
        self.handlers.push(handler);
        self.handlers.sort_by_key(|h| h.tier());
    }

    /// Handlers in dispatch order
    pub fn handlers(&self) -> impl Iterator<Item = &dyn TripleHandler> {
        self.handlers.iter().map(|h| h.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// The subject of a triple in object position, for the translator
pub(crate) fn subject_term(triple: &Triple) -> RdfObject {
    RdfObject::from(triple.subject.clone())
}

/// Property kind shared by the named operands of a property axiom.
/// Blank operands are inverse object property expressions.
pub(crate) fn shared_property_kind<'o>(
    cx: &Coordinator<'_>,
    operands: impl IntoIterator<Item = &'o RdfObject>,
) -> TranslateResult<ResourceKind> {
    let mut kind = None;
    for operand in operands {
        let claimed = match operand {
            RdfObject::BlankNode(_) => Some(ResourceKind::ObjectProperty),
            RdfObject::NamedNode(n) => match cx.classify(&n.clone().into()) {
                Classification::Exactly(k) if k.is_property() => Some(*k),
                _ => None,
            },
            RdfObject::Literal(_) => None,
        };
        match (kind, claimed) {
            (_, None) => {}
            (None, Some(k)) => kind = Some(k),
            (Some(existing), Some(k)) if existing == k => {}
            (Some(existing), Some(k)) => {
                return Err(TranslateError::Unresolved(format!(
                    "operands are both {} and {}",
                    existing, k
                )))
            }
        }
    }
    kind.ok_or_else(|| TranslateError::Unresolved("no operand has a known property kind".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_is_ordered_by_tier() {
        let registry = HandlerRegistry::standard();
        let tiers: Vec<HandlerTier> = registry.handlers().map(|h| h.tier()).collect();
        let mut sorted = tiers.clone();
        sorted.sort();
        assert_eq!(tiers, sorted);
        assert_eq!(registry.handlers().next().unwrap().name(), "subClassOf");
        assert_eq!(registry.handlers().last().unwrap().name(), "resourceObject");
    }

    #[test]
    fn test_class_assertion_is_last_type_handler() {
        let registry = HandlerRegistry::standard();
        let last_type = registry
            .handlers()
            .filter(|h| h.tier() == HandlerTier::TypeDeclaration)
            .last()
            .unwrap();
        assert_eq!(last_type.name(), "classAssertion");
    }
}
