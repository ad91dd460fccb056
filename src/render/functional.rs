//! OWL 2 functional-syntax renderer
//!
//! Layout: `Namespace(...)` lines, the `Ontology(` header with imports and
//! ontology annotations, then one group per referenced entity in sorted
//! order (its declarations, its annotation assertions, the other axioms
//! about it), then every axiom not written yet, the closing bracket and a
//! generator comment. Each axiom is written exactly once.

use super::{RenderError, RenderResult};
use crate::owl::{
    AnnotatedAxiom, Annotation, AnnotationSubject, AnnotationValue, Axiom, ClassExpression,
    DataProperty, DataRange, Entity, Individual, Iri, Literal, ObjectPropertyExpression, Ontology,
    PropertyExpression,
};
use crate::rdf::NamespaceManager;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::io;

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Prefixes emitted after the standard `rdf`, `rdfs`, `xsd` and `owl`
    pub prefixes: BTreeMap<String, String>,
    /// Write IRIs as qnames where a prefix matches
    pub abbreviate: bool,
    /// Default namespace; derived from the ontology IRI when unset
    pub default_namespace: Option<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            prefixes: BTreeMap::new(),
            abbreviate: true,
            default_namespace: None,
        }
    }
}

impl RendererConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        self.prefixes.insert(prefix.into(), iri.into());
        self
    }

    pub fn with_abbreviation(mut self, abbreviate: bool) -> Self {
        self.abbreviate = abbreviate;
        self
    }

    pub fn with_default_namespace(mut self, iri: impl Into<String>) -> Self {
        self.default_namespace = Some(iri.into());
        self
    }
}

/// Functional-syntax renderer
#[derive(Debug, Clone, Default)]
pub struct FunctionalRenderer {
    config: RendererConfig,
}

impl FunctionalRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render the whole document. Fails without output if any axiom has no
    /// functional-syntax form.
    pub fn render(&self, ontology: &Ontology) -> RenderResult<String> {
        let names = self.namespaces(ontology);
        let doc = Document {
            names: &names,
            abbreviate: self.config.abbreviate,
        };
        let mut out = String::new();
        doc.ontology(&mut out, ontology)?;
        tracing::debug!(
            "Rendered {} axioms as {} bytes of functional syntax",
            ontology.axiom_count(),
            out.len()
        );
        Ok(out)
    }

    /// Render into a writer. Nothing is written if rendering fails.
    pub fn render_to(&self, ontology: &Ontology, mut writer: impl io::Write) -> RenderResult<()> {
        let text = self.render(ontology)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn namespaces(&self, ontology: &Ontology) -> NamespaceManager {
        let mut names = NamespaceManager::empty();
        let default = self
            .config
            .default_namespace
            .clone()
            .or_else(|| ontology.iri().map(|iri| namespace_of(iri.as_str())));
        if let Some(default) = default {
            names.set_default_namespace(default);
        }
        for ns in NamespaceManager::new().prefixes() {
            names.add_prefix(ns.prefix, ns.iri);
        }
        for (prefix, iri) in &self.config.prefixes {
            names.add_prefix(prefix.clone(), iri.clone());
        }
        names
    }
}

/// `http://x/onto` becomes `http://x/onto#`; IRIs already ending in a
/// separator are kept
fn namespace_of(iri: &str) -> String {
    if iri.ends_with('/') || iri.ends_with('#') {
        iri.to_string()
    } else {
        format!("{}#", iri)
    }
}

struct Document<'n> {
    names: &'n NamespaceManager,
    abbreviate: bool,
}

impl Document<'_> {
    fn ontology(&self, out: &mut String, ontology: &Ontology) -> RenderResult<()> {
        for ns in self.names.prefixes() {
            writeln!(out, "Namespace({}=<{}>)", ns.prefix, ns.iri)?;
        }
        out.push('\n');

        out.push_str("Ontology(");
        if let Some(iri) = ontology.iri() {
            write!(out, "<{}>", iri.as_str())?;
            if let Some(version) = ontology.version_iri() {
                write!(out, "\n<{}>", version.as_str())?;
            }
        }
        out.push('\n');
        for import in ontology.imports() {
            writeln!(out, "Import(<{}>)", import.as_str())?;
        }
        for annotation in ontology.annotations() {
            writeln!(out, "{}", self.annotation(annotation))?;
        }
        out.push('\n');

        let entities = ontology.referenced_entities();
        let mut written: FxHashSet<&AnnotatedAxiom> = FxHashSet::default();
        for entity in &entities {
            let mut group: Vec<&AnnotatedAxiom> = ontology.declaration_axioms_for(entity).collect();
            group.extend(ontology.annotation_assertions_for(entity.iri()));
            group.extend(ontology.axioms_for(entity).collect::<BTreeSet<_>>());
            for annotated in group {
                if written.insert(annotated) {
                    self.axiom(out, annotated, Some(entity))?;
                }
            }
        }

        let remaining: BTreeSet<&AnnotatedAxiom> = ontology
            .axioms()
            .filter(|a| !written.contains(a))
            .collect();
        for annotated in remaining {
            self.axiom(out, annotated, None)?;
        }

        writeln!(out, ")")?;
        writeln!(out, "// Generated by owlrdf {}", crate::VERSION)?;
        Ok(())
    }

    fn axiom(
        &self,
        out: &mut String,
        annotated: &AnnotatedAxiom,
        focus: Option<&Entity>,
    ) -> RenderResult<()> {
        let mut args: Vec<String> = annotated
            .annotations
            .iter()
            .map(|a| self.annotation(a))
            .collect();

        match &annotated.axiom {
            Axiom::Declaration(entity) => {
                args.push(call(entity.type_keyword(), [self.iri(entity.iri())]));
            }
            Axiom::SubClassOf { sub, sup } => {
                args.push(self.class_expression(sub));
                args.push(self.class_expression(sup));
            }
            Axiom::EquivalentClasses(ops) | Axiom::DisjointClasses(ops) => {
                let ordered = focused(ops, focus, ClassExpression::as_entity);
                args.extend(ordered.into_iter().map(|ce| self.class_expression(ce)));
            }
            Axiom::DisjointUnion { class, operands } => {
                args.push(self.iri(class.iri()));
                args.extend(operands.iter().map(|ce| self.class_expression(ce)));
            }
            Axiom::ClassAssertion { class, individual } => {
                args.push(self.class_expression(class));
                args.push(self.individual(individual));
            }
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            }
            | Axiom::NegativeObjectPropertyAssertion {
                property,
                subject,
                object,
            } => {
                args.push(self.object_property(property));
                args.push(self.individual(subject));
                args.push(self.individual(object));
            }
            Axiom::DataPropertyAssertion {
                property,
                subject,
                value,
            }
            | Axiom::NegativeDataPropertyAssertion {
                property,
                subject,
                value,
            } => {
                args.push(self.iri(property.iri()));
                args.push(self.individual(subject));
                args.push(self.literal(value));
            }
            Axiom::SameIndividual(ops) | Axiom::DifferentIndividuals(ops) => {
                let ordered = focused(ops, focus, Individual::as_entity);
                args.extend(ordered.into_iter().map(|i| self.individual(i)));
            }
            Axiom::FunctionalObjectProperty(p)
            | Axiom::InverseFunctionalObjectProperty(p)
            | Axiom::SymmetricObjectProperty(p)
            | Axiom::AsymmetricObjectProperty(p)
            | Axiom::ReflexiveObjectProperty(p)
            | Axiom::IrreflexiveObjectProperty(p)
            | Axiom::TransitiveObjectProperty(p) => args.push(self.object_property(p)),
            Axiom::FunctionalDataProperty(p) => args.push(self.iri(p.iri())),
            Axiom::ObjectPropertyDomain {
                property,
                domain: ce,
            }
            | Axiom::ObjectPropertyRange {
                property,
                range: ce,
            } => {
                args.push(self.object_property(property));
                args.push(self.class_expression(ce));
            }
            Axiom::DataPropertyDomain { property, domain } => {
                args.push(self.iri(property.iri()));
                args.push(self.class_expression(domain));
            }
            Axiom::DataPropertyRange { property, range } => {
                args.push(self.iri(property.iri()));
                args.push(self.data_range(range));
            }
            Axiom::SubObjectPropertyOf { sub, sup } => {
                args.push(self.object_property(sub));
                args.push(self.object_property(sup));
            }
            Axiom::SubPropertyChainOf { chain, sup } => {
                let links = chain.iter().map(|p| self.object_property(p));
                args.push(call("ObjectPropertyChain", links));
                args.push(self.object_property(sup));
            }
            Axiom::SubDataPropertyOf { sub, sup } => {
                args.push(self.iri(sub.iri()));
                args.push(self.iri(sup.iri()));
            }
            Axiom::EquivalentObjectProperties(ops) | Axiom::DisjointObjectProperties(ops) => {
                let ordered = focused(ops, focus, ObjectPropertyExpression::as_entity);
                args.extend(ordered.into_iter().map(|p| self.object_property(p)));
            }
            Axiom::EquivalentDataProperties(ops) | Axiom::DisjointDataProperties(ops) => {
                let ordered = focused(ops, focus, |p: &DataProperty| {
                    Some(Entity::DataProperty(p.clone()))
                });
                args.extend(ordered.into_iter().map(|p| self.iri(p.iri())));
            }
            Axiom::InverseObjectProperties(a, b) => {
                let pair = [a.clone(), b.clone()];
                let ordered = focused(&pair, focus, ObjectPropertyExpression::as_entity);
                args.extend(ordered.into_iter().map(|p| self.object_property(p)));
            }
            Axiom::HasKey { class, properties } => {
                args.push(self.class_expression(class));
                args.extend(properties.iter().map(|p| match p {
                    PropertyExpression::Object(p) => self.object_property(p),
                    PropertyExpression::Data(p) => self.iri(p.iri()),
                }));
            }
            Axiom::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                args.push(self.iri(property.iri()));
                args.push(match subject {
                    AnnotationSubject::Iri(iri) => self.iri(iri),
                    AnnotationSubject::Anonymous(id) => format!("_:{}", id),
                });
                args.push(self.annotation_value(value));
            }
            Axiom::SubAnnotationPropertyOf { sub, sup } => {
                args.push(self.iri(sub.iri()));
                args.push(self.iri(sup.iri()));
            }
            Axiom::AnnotationPropertyDomain { property, domain: iri }
            | Axiom::AnnotationPropertyRange { property, range: iri } => {
                args.push(self.iri(property.iri()));
                args.push(self.iri(iri));
            }
            Axiom::DatatypeDefinition { datatype, range } => {
                args.push(self.iri(datatype.iri()));
                args.push(self.data_range(range));
            }
            Axiom::Rule { node } => {
                return Err(RenderError::Unsupported(format!("SWRL rule {}", node)));
            }
        }

        writeln!(out, "{}", call(annotated.axiom.keyword(), args))?;
        Ok(())
    }

    fn class_expression(&self, ce: &ClassExpression) -> String {
        match ce {
            ClassExpression::Class(c) => self.iri(c.iri()),
            ClassExpression::ObjectIntersectionOf(ops) => call(
                "ObjectIntersectionOf",
                ops.iter().map(|op| self.class_expression(op)),
            ),
            ClassExpression::ObjectUnionOf(ops) => {
                call("ObjectUnionOf", ops.iter().map(|op| self.class_expression(op)))
            }
            ClassExpression::ObjectComplementOf(op) => {
                call("ObjectComplementOf", [self.class_expression(op)])
            }
            ClassExpression::ObjectOneOf(individuals) => {
                call("ObjectOneOf", individuals.iter().map(|i| self.individual(i)))
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler } => call(
                "ObjectSomeValuesFrom",
                [self.object_property(property), self.class_expression(filler)],
            ),
            ClassExpression::ObjectAllValuesFrom { property, filler } => call(
                "ObjectAllValuesFrom",
                [self.object_property(property), self.class_expression(filler)],
            ),
            ClassExpression::ObjectHasValue { property, value } => call(
                "ObjectHasValue",
                [self.object_property(property), self.individual(value)],
            ),
            ClassExpression::ObjectHasSelf(property) => {
                call("ObjectHasSelf", [self.object_property(property)])
            }
            ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            } => self.cardinality(
                "ObjectMinCardinality",
                *cardinality,
                self.object_property(property),
                filler.as_deref().map(|f| self.class_expression(f)),
            ),
            ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            } => self.cardinality(
                "ObjectMaxCardinality",
                *cardinality,
                self.object_property(property),
                filler.as_deref().map(|f| self.class_expression(f)),
            ),
            ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => self.cardinality(
                "ObjectExactCardinality",
                *cardinality,
                self.object_property(property),
                filler.as_deref().map(|f| self.class_expression(f)),
            ),
            ClassExpression::DataSomeValuesFrom { property, filler } => call(
                "DataSomeValuesFrom",
                [self.iri(property.iri()), self.data_range(filler)],
            ),
            ClassExpression::DataAllValuesFrom { property, filler } => call(
                "DataAllValuesFrom",
                [self.iri(property.iri()), self.data_range(filler)],
            ),
            ClassExpression::DataHasValue { property, value } => call(
                "DataHasValue",
                [self.iri(property.iri()), self.literal(value)],
            ),
            ClassExpression::DataMinCardinality {
                cardinality,
                property,
                filler,
            } => self.cardinality(
                "DataMinCardinality",
                *cardinality,
                self.iri(property.iri()),
                filler.as_ref().map(|f| self.data_range(f)),
            ),
            ClassExpression::DataMaxCardinality {
                cardinality,
                property,
                filler,
            } => self.cardinality(
                "DataMaxCardinality",
                *cardinality,
                self.iri(property.iri()),
                filler.as_ref().map(|f| self.data_range(f)),
            ),
            ClassExpression::DataExactCardinality {
                cardinality,
                property,
                filler,
            } => self.cardinality(
                "DataExactCardinality",
                *cardinality,
                self.iri(property.iri()),
                filler.as_ref().map(|f| self.data_range(f)),
            ),
        }
    }

    fn cardinality(
        &self,
        keyword: &str,
        cardinality: u32,
        property: String,
        filler: Option<String>,
    ) -> String {
        call(
            keyword,
            [cardinality.to_string(), property].into_iter().chain(filler),
        )
    }

    fn data_range(&self, range: &DataRange) -> String {
        match range {
            DataRange::Datatype(d) => self.iri(d.iri()),
            DataRange::DataIntersectionOf(ops) => {
                call("DataIntersectionOf", ops.iter().map(|op| self.data_range(op)))
            }
            DataRange::DataUnionOf(ops) => {
                call("DataUnionOf", ops.iter().map(|op| self.data_range(op)))
            }
            DataRange::DataComplementOf(op) => call("DataComplementOf", [self.data_range(op)]),
            DataRange::DataOneOf(literals) => {
                call("DataOneOf", literals.iter().map(|l| self.literal(l)))
            }
            DataRange::DatatypeRestriction {
                datatype,
                restrictions,
            } => {
                let facets = restrictions
                    .iter()
                    .map(|r| format!("{} {}", self.iri(&r.facet), self.literal(&r.value)));
                call(
                    "DatatypeRestriction",
                    std::iter::once(self.iri(datatype.iri())).chain(facets),
                )
            }
        }
    }

    fn object_property(&self, property: &ObjectPropertyExpression) -> String {
        match property {
            ObjectPropertyExpression::ObjectProperty(p) => self.iri(p.iri()),
            ObjectPropertyExpression::InverseObjectProperty(p) => {
                call("ObjectInverseOf", [self.iri(p.iri())])
            }
        }
    }

    fn individual(&self, individual: &Individual) -> String {
        match individual {
            Individual::Named(i) => self.iri(i.iri()),
            Individual::Anonymous(id) => format!("_:{}", id),
        }
    }

    fn annotation(&self, annotation: &Annotation) -> String {
        call(
            "Annotation",
            [
                self.iri(annotation.property.iri()),
                self.annotation_value(&annotation.value),
            ],
        )
    }

    fn annotation_value(&self, value: &AnnotationValue) -> String {
        match value {
            AnnotationValue::Iri(iri) => self.iri(iri),
            AnnotationValue::Literal(lit) => self.literal(lit),
            AnnotationValue::Anonymous(id) => format!("_:{}", id),
        }
    }

    fn literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::Typed { lexical, datatype } => {
                format!("\"{}\"^^{}", escape(lexical), self.iri(datatype.iri()))
            }
            Literal::Lang { lexical, lang } => format!("\"{}\"@{}", escape(lexical), lang),
        }
    }

    fn iri(&self, iri: &Iri) -> String {
        if self.abbreviate {
            if let Some(qname) = self.names.compact(iri.as_str()) {
                return qname;
            }
        }
        format!("<{}>", iri.as_str())
    }
}

fn call(keyword: &str, args: impl IntoIterator<Item = String>) -> String {
    let args: Vec<String> = args.into_iter().collect();
    format!("{}({})", keyword, args.join(" "))
}

/// Two-operand collections put the focused entity first. Longer
/// collections keep their order.
fn focused<'o, T>(
    operands: &'o [T],
    focus: Option<&Entity>,
    entity: impl Fn(&T) -> Option<Entity>,
) -> Vec<&'o T> {
    let mut ordered: Vec<&T> = operands.iter().collect();
    if let (2, Some(focus)) = (ordered.len(), focus) {
        if entity(ordered[1]).as_ref() == Some(focus) {
            ordered.swap(0, 1);
        }
    }
    ordered
}

fn escape(lexical: &str) -> String {
    let mut out = String::with_capacity(lexical.len());
    for c in lexical.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owl::{AnnotationProperty, Class};
    use crate::rdf::vocab;

    const NS: &str = "http://example.org/onto#";

    fn class(name: &str) -> ClassExpression {
        ClassExpression::class(format!("{}{}", NS, name))
    }

    fn declared(name: &str) -> Axiom {
        Axiom::Declaration(Entity::Class(Class::new(format!("{}{}", NS, name))))
    }

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_header_and_generator_comment() {
        let mut ont = Ontology::with_iri("http://example.org/onto");
        ont.set_version_iri("http://example.org/onto/1.0");
        ont.add_import("http://example.org/base");
        ont.add_axiom(declared("A"));

        let text = FunctionalRenderer::default().render(&ont).unwrap();
        let lines = lines(&text);
        assert_eq!(lines[0], "Namespace(=<http://example.org/onto#>)");
        assert_eq!(lines[1], "Namespace(rdf=<http://www.w3.org/1999/02/22-rdf-syntax-ns#>)");
        assert!(text.contains("Ontology(<http://example.org/onto>\n<http://example.org/onto/1.0>\n"));
        assert!(text.contains("Import(<http://example.org/base>)\n"));
        assert!(text.contains("Declaration(Class(:A))\n"));
        assert_eq!(
            *lines.last().unwrap(),
            format!("// Generated by owlrdf {}", crate::VERSION)
        );
        assert_eq!(lines[lines.len() - 2], ")");
    }

    #[test]
    fn test_entity_grouping() {
        let mut ont = Ontology::with_iri("http://example.org/onto");
        ont.add_axiom(Axiom::SubClassOf {
            sub: class("B"),
            sup: class("A"),
        });
        ont.add_axiom(declared("B"));
        ont.add_axiom(Axiom::AnnotationAssertion {
            property: AnnotationProperty::new(vocab::rdfs::LABEL),
            subject: AnnotationSubject::Iri(Iri::new(format!("{}B", NS))),
            value: AnnotationValue::Literal(Literal::string("Bee")),
        });
        ont.add_axiom(declared("A"));

        let text = FunctionalRenderer::default().render(&ont).unwrap();
        let body: Vec<&str> = text
            .lines()
            .filter(|l| !l.starts_with("Namespace") && !l.is_empty())
            .collect();
        assert_eq!(
            body[1..5],
            [
                "Declaration(Class(:A))",
                "Declaration(Class(:B))",
                "AnnotationAssertion(rdfs:label :B \"Bee\"^^xsd:string)",
                "SubClassOf(:B :A)",
            ]
        );
    }

    #[test]
    fn test_focused_entity_first() {
        let mut ont = Ontology::with_iri("http://example.org/onto");
        ont.add_axiom(Axiom::EquivalentClasses(vec![class("B"), class("A")]));
        ont.add_axiom(Axiom::DisjointClasses(vec![class("C"), class("B"), class("A")]));

        let text = FunctionalRenderer::default().render(&ont).unwrap();
        assert!(text.contains("EquivalentClasses(:A :B)\n"));
        assert!(text.contains("DisjointClasses(:C :B :A)\n"));
        assert_eq!(text.matches("EquivalentClasses").count(), 1);
    }

    #[test]
    fn test_annotations_literals_and_expressions() {
        let mut ont = Ontology::with_iri("http://example.org/onto");
        let comment = Annotation::new(
            AnnotationProperty::new(vocab::rdfs::COMMENT),
            Literal::lang("say \"hi\"", "en"),
        );
        ont.add_axiom(AnnotatedAxiom::new(
            Axiom::SubClassOf {
                sub: class("A"),
                sup: ClassExpression::ObjectMinCardinality {
                    cardinality: 2,
                    property: ObjectPropertyExpression::inverse(format!("{}p", NS)),
                    filler: Some(Box::new(class("B"))),
                },
            },
            vec![comment],
        ));
        ont.add_axiom(Axiom::SubPropertyChainOf {
            chain: vec![
                ObjectPropertyExpression::named(format!("{}p1", NS)),
                ObjectPropertyExpression::named(format!("{}p2", NS)),
            ],
            sup: ObjectPropertyExpression::named(format!("{}p", NS)),
        });

        let text = FunctionalRenderer::default().render(&ont).unwrap();
        assert!(text.contains(
            "SubClassOf(Annotation(rdfs:comment \"say \\\"hi\\\"\"@en) :A ObjectMinCardinality(2 ObjectInverseOf(:p) :B))"
        ));
        assert!(text.contains("SubObjectPropertyOf(ObjectPropertyChain(:p1 :p2) :p)"));
    }

    #[test]
    fn test_full_iris_without_abbreviation() {
        let mut ont = Ontology::with_iri("http://example.org/onto");
        ont.add_axiom(declared("A"));
        let renderer = FunctionalRenderer::new(RendererConfig::default().with_abbreviation(false));
        let text = renderer.render(&ont).unwrap();
        assert!(text.contains("Declaration(Class(<http://example.org/onto#A>))"));
    }

    #[test]
    fn test_rule_fails_without_output() {
        let mut ont = Ontology::new();
        ont.add_axiom(declared("A"));
        ont.add_axiom(Axiom::Rule {
            node: "_:r1".to_string(),
        });

        let mut sink = Vec::new();
        let result = FunctionalRenderer::default().render_to(&ont, &mut sink);
        assert!(matches!(result, Err(RenderError::Unsupported(_))));
        assert!(sink.is_empty());
    }
}
