//! Coordinator
//!
//! The single mutable context of one ontology build. Handlers receive it
//! read-only to plan, and the coordinator applies their plan in one step:
//! ledger first, then pending annotations, then the axiom or header change.

use super::classification::{
    Classification, ClassificationCache, DeclareOutcome, Provenance, ResourceKind,
};
use super::config::ParserConfig;
use super::handler::{Effect, Pass, Plan};
use super::index::TripleIndex;
use super::ledger::ConsumedLedger;
use super::pending::PendingAnnotations;
use super::report::{ParseIssue, ParseReport, PassStats};
use super::translate::{Footprint, TranslateResult, Translator};
use crate::owl::{AnnotatedAxiom, Annotation, Axiom, Iri, ObjectPropertyExpression, Ontology};
use crate::rdf::{NamedNode, RdfObject, RdfSubject, Triple};
use tracing::{debug, error, warn};

pub struct Coordinator<'a> {
    index: &'a TripleIndex,
    cache: ClassificationCache,
    ledger: ConsumedLedger,
    pending: PendingAnnotations,
    ontology: Ontology,
    report: ParseReport,
}

impl<'a> Coordinator<'a> {
    /// Create a coordinator over an indexed source. The cache starts with
    /// the built-in vocabulary and the configured property kinds.
    pub fn new(index: &'a TripleIndex, config: &ParserConfig) -> Self {
        let mut cx = Self {
            index,
            cache: ClassificationCache::with_builtins(),
            ledger: ConsumedLedger::new(),
            pending: PendingAnnotations::new(),
            ontology: Ontology::new(),
            report: ParseReport::new(),
        };
        for (iri, kind) in &config.property_kinds {
            match NamedNode::new(iri) {
                Ok(node) => {
                    cx.declare_with(&node.into(), kind.resource_kind(), Provenance::Configured);
                }
                Err(e) => warn!("Ignoring configured property kind: {}", e),
            }
        }
        cx
    }

    pub fn index(&self) -> &'a TripleIndex {
        self.index
    }

    pub fn cache(&self) -> &ClassificationCache {
        &self.cache
    }

    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    pub fn classify(&self, resource: &RdfSubject) -> &Classification {
        self.cache.classify(resource)
    }

    pub fn is_only(&self, resource: &RdfSubject, kind: ResourceKind) -> bool {
        self.cache.is_only(resource, kind)
    }

    /// Record a declaration. A resource that becomes conflicting is
    /// reported once; the declaration itself is never rejected.
    pub fn declare(&mut self, resource: &RdfSubject, kind: ResourceKind) -> DeclareOutcome {
        self.declare_with(resource, kind, Provenance::Declared)
    }

    /// Give an unknown resource the kind of the position an axiom used it in
    pub fn imply(&mut self, resource: &RdfSubject, kind: ResourceKind) -> DeclareOutcome {
        let outcome = self.declare_with(resource, kind, Provenance::Implied);
        if outcome == DeclareOutcome::Novel {
            debug!("{} used as {}", resource, kind);
        }
        outcome
    }

    /// Apply a classification chosen by the ambiguity policy
    pub fn infer(&mut self, resource: &RdfSubject, kind: ResourceKind) -> DeclareOutcome {
        let outcome = self.declare_with(resource, kind, Provenance::Inferred);
        if outcome == DeclareOutcome::Novel {
            warn!("Inferred {} as {}", resource, kind);
            self.report.record_inference(resource, kind);
        }
        outcome
    }

    fn declare_with(
        &mut self,
        resource: &RdfSubject,
        kind: ResourceKind,
        provenance: Provenance,
    ) -> DeclareOutcome {
        let outcome = self.cache.declare(resource, kind, provenance);
        if outcome == DeclareOutcome::Conflicting {
            let kinds = match self.cache.classify(resource) {
                Classification::Conflicting(kinds) => kinds.iter().copied().collect(),
                _ => vec![kind],
            };
            warn!("Conflicting classification for {}: {:?}", resource, kinds);
            self.report.push(ParseIssue::ClassificationConflict {
                resource: resource.clone(),
                kinds,
            });
        }
        outcome
    }

    pub fn is_consumed(&self, triple: &Triple) -> bool {
        self.ledger.is_consumed(triple)
    }

    /// Mark a triple as consumed; consuming it again is a no-op
    pub fn consume(&mut self, triple: &Triple) -> bool {
        self.ledger.consume(triple.clone())
    }

    pub fn push_pending_annotation(&mut self, annotation: Annotation) {
        self.pending.push(annotation);
    }

    /// Take every pending annotation, leaving the buffer empty
    pub fn drain_pending_annotations(&mut self) -> Vec<Annotation> {
        self.pending.drain()
    }

    pub fn has_pending_annotations(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Structure walker over the current state
    pub fn translator(&self, pass: Pass) -> Translator<'_> {
        Translator::new(self.index, &self.cache, &self.ledger, pass)
    }

    /// Walk a property list, returning the expressions in list order and
    /// the list triples to consume with them
    pub fn translate_property_expression_list(
        &self,
        head: &RdfObject,
        pass: Pass,
    ) -> TranslateResult<(Vec<ObjectPropertyExpression>, Footprint)> {
        let mut tr = self.translator(pass);
        let chain = tr.property_expression_list(head)?;
        Ok((chain, tr.finish()))
    }

    /// Annotations from the reification nodes of `triple`, with the
    /// triples that carry them
    pub fn reified_annotations(
        &self,
        triple: &Triple,
        pass: Pass,
    ) -> TranslateResult<(Vec<Annotation>, Footprint)> {
        let mut tr = self.translator(pass);
        let annotations = tr.reified_annotations(triple)?;
        Ok((annotations, tr.finish()))
    }

    /// Add an axiom, moving the pending annotations onto it
    pub fn add_axiom(&mut self, axiom: Axiom) -> bool {
        let annotations = self.pending.drain();
        self.ontology.add_axiom(AnnotatedAxiom::new(axiom, annotations))
    }

    pub fn add_ontology_annotation(&mut self, annotation: Annotation) {
        self.ontology.add_annotation(annotation);
    }

    /// True if the resource is an ontology header
    pub fn is_ontology(&self, resource: &RdfSubject) -> bool {
        self.index.is_ontology_header(resource) || self.cache.is_only(resource, ResourceKind::Ontology)
    }

    pub fn set_ontology_iri(&mut self, iri: Iri) {
        if let Some(existing) = self.ontology.iri() {
            if existing != &iri {
                warn!("Ignoring second ontology header {}; keeping {}", iri, existing);
            }
            return;
        }
        self.ontology.set_iri(iri);
    }

    pub fn set_version_iri(&mut self, iri: Iri) {
        self.ontology.set_version_iri(iri);
    }

    pub fn add_import(&mut self, iri: Iri) {
        self.ontology.add_import(iri);
    }

    pub(crate) fn report_issue(&mut self, issue: ParseIssue) {
        self.report.push(issue);
    }

    pub(crate) fn record_pass(&mut self, stats: PassStats) {
        self.report.record_pass(stats);
    }

    /// Apply a handler's plan for `triple`
    pub fn commit(&mut self, triple: &Triple, plan: Plan) {
        debug!("Committing {}", triple);
        self.consume(triple);
        for used in plan.used {
            self.ledger.consume(used);
        }
        for (resource, kind) in &plan.implied {
            self.imply(resource, *kind);
        }
        for annotation in plan.annotations {
            self.push_pending_annotation(annotation);
        }

        match plan.effect {
            Effect::Axiom(axiom) => {
                self.add_axiom(axiom);
            }
            Effect::Declare {
                resource,
                kind,
                axiom,
            } => {
                self.declare(&resource, kind);
                if let Some(axiom) = axiom {
                    self.add_axiom(axiom);
                }
            }
            Effect::Ontology(resource) => {
                self.declare(&resource, ResourceKind::Ontology);
                if let Some(node) = resource.as_named_node() {
                    self.set_ontology_iri(Iri::from(node));
                }
            }
            Effect::VersionIri(iri) => self.set_version_iri(iri),
            Effect::Import(iri) => self.add_import(iri),
            Effect::OntologyAnnotation(annotation) => self.add_ontology_annotation(annotation),
        }

        let leftover = self.drain_pending_annotations();
        debug_assert!(leftover.is_empty(), "pending annotations outlived their axiom");
        if !leftover.is_empty() {
            error!("{} annotations left pending after {}", leftover.len(), triple);
        }
    }

    /// Finish the build
    pub fn finish(mut self) -> (Ontology, ParseReport) {
        self.report.set_counts(self.index.len(), self.ledger.len());
        (self.ontology, self.report)
    }
}
