//! Assertion handlers for triples with a user-defined predicate

use super::{Effect, HandlerTier, Pass, Plan, TripleHandler};
use crate::owl::{
    Annotation, AnnotationProperty, AnnotationSubject, Axiom, DataProperty, Iri,
    ObjectPropertyExpression,
};
use crate::parser::classification::{Classification, ResourceKind};
use crate::parser::coordinator::Coordinator;
use crate::parser::translate::{TranslateError, TranslateResult, Translator};
use crate::rdf::vocab;
use crate::rdf::{RdfSubject, Triple};

fn user_predicate(triple: &Triple) -> bool {
    !vocab::is_reserved(triple.predicate.as_str())
}

fn predicate_kind(cx: &Coordinator<'_>, triple: &Triple) -> TranslateResult<ResourceKind> {
    let predicate = triple.predicate.as_subject();
    match cx.classify(&predicate) {
        Classification::Exactly(kind) => Ok(*kind),
        _ => Err(TranslateError::Unresolved(format!(
            "{} is not classified as a single property kind",
            predicate
        ))),
    }
}

fn check_subject(cx: &Coordinator<'_>, subject: &RdfSubject) -> TranslateResult<()> {
    if cx.index().is_structural(subject) {
        Err(TranslateError::Unresolved(format!(
            "{} is part of a larger structure",
            subject
        )))
    } else {
        Ok(())
    }
}

/// Annotation on the ontology header, or an annotation assertion
fn annotation_plan(
    tr: Translator<'_>,
    cx: &Coordinator<'_>,
    triple: &Triple,
) -> TranslateResult<Plan> {
    let property = AnnotationProperty::new(Iri::from(triple.predicate.as_named_node()));
    let value = tr.annotation_value(&triple.object);

    if cx.is_ontology(&triple.subject) {
        return Ok(Plan::new(Effect::OntologyAnnotation(Annotation::new(
            property, value,
        ))));
    }
    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => AnnotationSubject::Iri(Iri::from(n)),
        RdfSubject::BlankNode(b) => AnnotationSubject::Anonymous(b.as_str().to_string()),
    };
    let axiom = Axiom::AnnotationAssertion {
        property,
        subject,
        value,
    };
    Plan::axiom(tr, triple, axiom)
}

/// Literal-valued triples: data property assertions and annotations
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralObjectHandler;

impl TripleHandler for LiteralObjectHandler {
    fn name(&self) -> &'static str {
        "literalObject"
    }

    fn tier(&self) -> HandlerTier {
        HandlerTier::LiteralObject
    }

    fn matches(&self, triple: &Triple) -> bool {
        triple.object.is_literal() && user_predicate(triple)
    }

    fn plan(&self, triple: &Triple, cx: &Coordinator<'_>, pass: Pass) -> TranslateResult<Plan> {
        check_subject(cx, &triple.subject)?;
        let tr = cx.translator(pass);

        match predicate_kind(cx, triple)? {
            ResourceKind::AnnotationProperty => annotation_plan(tr, cx, triple),
            ResourceKind::DataProperty => {
                let axiom = Axiom::DataPropertyAssertion {
                    property: DataProperty::new(Iri::from(triple.predicate.as_named_node())),
                    subject: tr.subject_individual(&triple.subject),
                    value: tr.literal(&triple.object)?,
                };
                Plan::axiom(tr, triple, axiom)
            }
            kind => Err(TranslateError::Unresolved(format!(
                "{} cannot take a literal value",
                kind
            ))),
        }
    }
}

/// IRI- or blank-valued triples: object property assertions and
/// annotations
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceObjectHandler;

impl TripleHandler for ResourceObjectHandler {
    fn name(&self) -> &'static str {
        "resourceObject"
    }

    fn tier(&self) -> HandlerTier {
        HandlerTier::ResourceObject
    }

    fn matches(&self, triple: &Triple) -> bool {
        !triple.object.is_literal() && user_predicate(triple)
    }

    fn plan(&self, triple: &Triple, cx: &Coordinator<'_>, pass: Pass) -> TranslateResult<Plan> {
        check_subject(cx, &triple.subject)?;
        let tr = cx.translator(pass);

        match predicate_kind(cx, triple)? {
            ResourceKind::AnnotationProperty => annotation_plan(tr, cx, triple),
            ResourceKind::ObjectProperty => {
                let axiom = Axiom::ObjectPropertyAssertion {
                    property: ObjectPropertyExpression::named(Iri::from(
                        triple.predicate.as_named_node(),
                    )),
                    subject: tr.subject_individual(&triple.subject),
                    object: tr.individual(&triple.object)?,
                };
                Plan::axiom(tr, triple, axiom)
            }
            kind => Err(TranslateError::Unresolved(format!(
                "{} cannot relate two resources",
                kind
            ))),
        }
    }
}
