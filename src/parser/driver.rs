//! Resolution driver
//!
//! 1. Streaming pass over the source in document order.
//! 2. Deferred fixed point: rescan the queue until a scan removes nothing.
//! 3. Ambiguity policy for characteristics on properties of unknown kind;
//!    an inference reruns step 2.
//! 4. Fallback for whatever is still unconsumed.

use super::classification::ResourceKind;
use super::config::{AmbiguityPolicy, FallbackPolicy, ParserConfig};
use super::coordinator::Coordinator;
use super::handler::{is_characteristic, HandlerRegistry, Pass};
use super::index::TripleIndex;
use super::report::{ParseIssue, ParseReport, PassKind, PassStats};
use super::translate::TranslateError;
use crate::owl::{Annotation, AnnotationProperty, AnnotationSubject, Axiom, Iri, Literal, Ontology};
use crate::rdf::vocab::{self, rdf};
use crate::rdf::{RdfObject, RdfSubject, Triple};
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

/// Outcome of offering one triple to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    Resolved,
    Deferred,
    Failed,
}

pub(crate) struct Driver<'r> {
    registry: &'r HandlerRegistry,
    config: &'r ParserConfig,
}

impl<'r> Driver<'r> {
    pub fn new(registry: &'r HandlerRegistry, config: &'r ParserConfig) -> Self {
        Self { registry, config }
    }

    pub fn run(&self, index: &TripleIndex) -> (Ontology, ParseReport) {
        let mut cx = Coordinator::new(index, self.config);

        let mut deferred = Vec::new();
        let mut failed = FxHashSet::default();
        let mut resolved = 0;
        for triple in index.triples() {
            if cx.is_consumed(triple) {
                resolved += 1;
                continue;
            }
            match self.dispatch(&mut cx, triple, Pass::Streaming) {
                Dispatch::Resolved => resolved += 1,
                Dispatch::Failed => {
                    resolved += 1;
                    failed.insert(triple);
                }
                Dispatch::Deferred => deferred.push(triple),
            }
        }
        info!(
            "Streaming pass: {} of {} triples resolved, {} deferred",
            resolved,
            index.len(),
            deferred.len()
        );
        cx.record_pass(PassStats {
            kind: PassKind::Streaming,
            examined: index.len(),
            resolved,
            remaining: deferred.len(),
        });

        loop {
            self.fixed_point(&mut cx, &mut deferred, &mut failed);
            if !self.apply_ambiguity_policy(&mut cx, &deferred) {
                break;
            }
        }

        self.fallback(&mut cx, index, &failed);
        cx.finish()
    }

    /// Offer the triple to each matching handler in priority order. The
    /// first one that does not ask to wait owns it.
    fn dispatch(&self, cx: &mut Coordinator<'_>, triple: &Triple, pass: Pass) -> Dispatch {
        for handler in self.registry.handlers() {
            if !handler.matches(triple) {
                continue;
            }
            match handler.handle_triple(triple, cx, pass) {
                Ok(_) => {
                    debug!("{} handled {}", handler.name(), triple);
                    return Dispatch::Resolved;
                }
                Err(TranslateError::Unresolved(reason)) => {
                    debug!("{} deferred {}: {}", handler.name(), triple, reason);
                }
                Err(TranslateError::Structural(error)) => {
                    warn!("Malformed structure for {}: {}", triple, error);
                    cx.report_issue(ParseIssue::Structural {
                        triple: triple.clone(),
                        error,
                    });
                    return Dispatch::Failed;
                }
                Err(TranslateError::Unsupported { node, construct }) => {
                    warn!("Unsupported construct {} at {}", construct, node);
                    cx.report_issue(ParseIssue::Unsupported { construct, node });
                    return Dispatch::Failed;
                }
            }
        }
        Dispatch::Deferred
    }

    /// Rescan the deferred queue until a full scan removes nothing
    fn fixed_point<'t>(
        &self,
        cx: &mut Coordinator<'_>,
        deferred: &mut Vec<&'t Triple>,
        failed: &mut FxHashSet<&'t Triple>,
    ) {
        while !deferred.is_empty() {
            let examined = deferred.len();
            let mut resolved = 0;
            let mut remaining = Vec::with_capacity(examined);

            for triple in deferred.drain(..) {
                if cx.is_consumed(triple) {
                    resolved += 1;
                    continue;
                }
                match self.dispatch(cx, triple, Pass::Deferred) {
                    Dispatch::Resolved => resolved += 1,
                    Dispatch::Failed => {
                        resolved += 1;
                        failed.insert(triple);
                    }
                    Dispatch::Deferred => remaining.push(triple),
                }
            }

            *deferred = remaining;
            debug!(
                "Deferred scan: {} of {} resolved, {} remaining",
                resolved,
                examined,
                deferred.len()
            );
            cx.record_pass(PassStats {
                kind: PassKind::Deferred,
                examined,
                resolved,
                remaining: deferred.len(),
            });
            if resolved == 0 {
                break;
            }
        }
    }

    /// Apply the ambiguity policy to characteristic triples whose subject is
    /// still unknown. Returns true if new classifications were inferred.
    fn apply_ambiguity_policy(&self, cx: &mut Coordinator<'_>, deferred: &[&Triple]) -> bool {
        let mut ambiguous: Vec<&RdfSubject> = Vec::new();
        for triple in deferred {
            let characteristic = triple.predicate.as_str() == rdf::TYPE
                && matches!(&triple.object, RdfObject::NamedNode(n) if is_characteristic(n.as_str()));
            if characteristic
                && cx.classify(&triple.subject).is_unknown()
                && !ambiguous.contains(&&triple.subject)
            {
                ambiguous.push(&triple.subject);
            }
        }
        if ambiguous.is_empty() {
            return false;
        }

        match self.config.ambiguity {
            AmbiguityPolicy::DefaultToObjectProperty => {
                for property in ambiguous {
                    cx.infer(property, ResourceKind::ObjectProperty);
                }
                true
            }
            AmbiguityPolicy::FailOnAmbiguity => {
                for property in ambiguous {
                    warn!("Ambiguous property kind for {}", property);
                    cx.report_issue(ParseIssue::AmbiguousPropertyKind {
                        property: property.clone(),
                        hint: "not declared as an object or data property".to_string(),
                    });
                }
                false
            }
            AmbiguityPolicy::RequireExplicitConfig => {
                for property in ambiguous {
                    warn!("Property kind required for {}", property);
                    cx.report_issue(ParseIssue::AmbiguousPropertyKind {
                        property: property.clone(),
                        hint: "supply its kind through property_kinds".to_string(),
                    });
                }
                false
            }
        }
    }

    /// Report every unconsumed triple, and keep it as a tagged annotation
    /// assertion if configured to. Failed triples and the structures under
    /// them were already reported with the failure. Reserved vocabulary is
    /// never materialized.
    fn fallback(
        &self,
        cx: &mut Coordinator<'_>,
        index: &TripleIndex,
        failed: &FxHashSet<&Triple>,
    ) {
        let structures = failed_structures(index, failed);
        let leftovers: Vec<&Triple> = index
            .triples()
            .iter()
            .filter(|t| !cx.is_consumed(t))
            .filter(|t| !failed.contains(t) && !structures.contains(&t.subject))
            .collect();
        if !leftovers.is_empty() {
            info!("{} statements left unparsed", leftovers.len());
        }

        for triple in leftovers {
            warn!("Unparsed statement: {}", triple);
            cx.report_issue(ParseIssue::UnparsedStatement {
                triple: triple.clone(),
            });
            if self.config.fallback != FallbackPolicy::MaterializeAsAnnotation {
                continue;
            }
            if vocab::is_reserved(triple.predicate.as_str()) {
                debug!("Not materializing reserved predicate in {}", triple);
            } else {
                materialize(cx, triple);
            }
        }
    }
}

/// Blank nodes reachable from the subject or object of a failed triple
fn failed_structures(
    index: &TripleIndex,
    failed: &FxHashSet<&Triple>,
) -> FxHashSet<RdfSubject> {
    let mut stack: Vec<RdfSubject> = failed
        .iter()
        .flat_map(|t| [Some(t.subject.clone()), t.object.as_subject()])
        .flatten()
        .filter(RdfSubject::is_blank_node)
        .collect();
    let mut seen = FxHashSet::default();
    while let Some(node) = stack.pop() {
        if !seen.insert(node.clone()) {
            continue;
        }
        for triple in index.with_subject(&node) {
            if let Some(next) = triple.object.as_subject().filter(RdfSubject::is_blank_node) {
                stack.push(next);
            }
        }
    }
    seen
}

fn materialize(cx: &mut Coordinator<'_>, triple: &Triple) {
    let value = cx.translator(Pass::Deferred).annotation_value(&triple.object);
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => AnnotationSubject::Iri(Iri::from(n)),
        RdfSubject::BlankNode(b) => AnnotationSubject::Anonymous(b.as_str().to_string()),
    };
    cx.consume(triple);
    cx.push_pending_annotation(Annotation::new(
        AnnotationProperty::new(vocab::owlrdf::UNPARSED_STATEMENT),
        Literal::typed("true", vocab::xsd::BOOLEAN),
    ));
    cx.add_axiom(Axiom::AnnotationAssertion {
        property: AnnotationProperty::new(Iri::from(triple.predicate.as_named_node())),
        subject,
        value,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{RdfFormat, RdfParser};

    fn run(turtle: &str, config: &ParserConfig) -> (Ontology, ParseReport) {
        let doc = format!(
            "@prefix : <http://example.org/> .\n\
             @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
             @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n{}",
            turtle
        );
        let index = TripleIndex::new(RdfParser::parse(&doc, RdfFormat::Turtle).unwrap());
        let registry = HandlerRegistry::standard();
        Driver::new(&registry, config).run(&index)
    }

    #[test]
    fn test_pass_statistics() {
        let (ontology, report) = run(
            ":p a owl:FunctionalProperty .\n\
             :p a owl:ObjectProperty .",
            &ParserConfig::default(),
        );
        assert_eq!(ontology.axiom_count(), 2);

        let passes = report.passes();
        assert_eq!(passes[0].kind, PassKind::Streaming);
        assert_eq!(passes[0].remaining, 1);
        assert_eq!(passes[1].kind, PassKind::Deferred);
        assert_eq!(passes[1].resolved, 1);
        assert_eq!(passes.last().unwrap().remaining, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_default_policy_infers_object_property() {
        let (ontology, report) = run(":p a owl:TransitiveProperty .", &ParserConfig::default());
        assert_eq!(ontology.axiom_count(), 1);
        assert_eq!(report.inferred().len(), 1);
        assert_eq!(report.inferred()[0].kind, ResourceKind::ObjectProperty);
    }

    #[test]
    fn test_fail_policy_reports_and_leaves_unparsed() {
        let config = ParserConfig::new().with_ambiguity(AmbiguityPolicy::FailOnAmbiguity);
        let (ontology, report) = run(":p a owl:TransitiveProperty .", &config);
        assert_eq!(ontology.axiom_count(), 0);
        assert_eq!(report.ambiguities().count(), 1);
        assert_eq!(report.unparsed().count(), 1);
    }

    #[test]
    fn test_materialized_fallback() {
        let config = ParserConfig::new().with_fallback(FallbackPolicy::MaterializeAsAnnotation);
        let (ontology, report) = run(":a :mystery :b .", &config);
        assert_eq!(report.unparsed().count(), 1);

        let axiom = ontology.axioms().next().unwrap();
        assert!(matches!(axiom.axiom, Axiom::AnnotationAssertion { .. }));
        assert_eq!(
            axiom.annotations.iter().next().unwrap().property.iri().as_str(),
            vocab::owlrdf::UNPARSED_STATEMENT
        );
    }
}
