//! Parse report
//!
//! Every issue found while building an ontology is collected here instead of
//! aborting the parse. The report travels back to the caller next to the
//! ontology in [`ParseOutcome`](super::ParseOutcome).

use super::classification::ResourceKind;
use super::translate::StructuralError;
use crate::rdf::{RdfSubject, Triple};
use serde::Serialize;
use thiserror::Error;

/// How serious an issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// One problem found while parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIssue {
    /// A resource was declared as more than one kind
    #[error("Conflicting classification for {resource}: {}", join_kinds(.kinds))]
    ClassificationConflict {
        resource: RdfSubject,
        kinds: Vec<ResourceKind>,
    },

    /// The structure behind a triple is malformed
    #[error("Malformed structure for {triple}: {error}")]
    Structural { triple: Triple, error: StructuralError },

    /// No handler consumed the triple
    #[error("Unparsed statement: {triple}")]
    UnparsedStatement { triple: Triple },

    /// The input uses vocabulary this parser does not translate
    #[error("Unsupported construct {construct} at {node}")]
    Unsupported { construct: String, node: String },

    /// A property's kind could not be determined
    #[error("Ambiguous property kind for {property}: {hint}")]
    AmbiguousPropertyKind { property: RdfSubject, hint: String },
}

fn join_kinds(kinds: &[ResourceKind]) -> String {
    kinds
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ParseIssue {
    pub fn severity(&self) -> Severity {
        match self {
            ParseIssue::Structural { .. } | ParseIssue::Unsupported { .. } => Severity::Error,
            ParseIssue::ClassificationConflict { .. }
            | ParseIssue::UnparsedStatement { .. }
            | ParseIssue::AmbiguousPropertyKind { .. } => Severity::Warning,
        }
    }

    /// Short machine-readable name of the issue type
    pub fn kind(&self) -> &'static str {
        match self {
            ParseIssue::ClassificationConflict { .. } => "classification_conflict",
            ParseIssue::Structural { .. } => "structural",
            ParseIssue::UnparsedStatement { .. } => "unparsed_statement",
            ParseIssue::Unsupported { .. } => "unsupported",
            ParseIssue::AmbiguousPropertyKind { .. } => "ambiguous_property_kind",
        }
    }
}

/// A classification applied by the ambiguity policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferredKind {
    pub resource: String,
    pub kind: ResourceKind,
}

/// Which resolution phase a pass belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    Streaming,
    Deferred,
}

/// Progress made by one scan over the input or the deferred queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassStats {
    pub kind: PassKind,
    /// Triples examined
    pub examined: usize,
    /// Triples handled, or found already consumed by another axiom
    pub resolved: usize,
    /// Triples still waiting after the scan
    pub remaining: usize,
}

/// Everything the parser has to say about one parse
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    issues: Vec<ParseIssue>,
    inferred: Vec<InferredKind>,
    passes: Vec<PassStats>,
    triples: usize,
    consumed: usize,
}

impl ParseReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, issue: ParseIssue) {
        self.issues.push(issue);
    }

    pub(crate) fn record_inference(&mut self, resource: &RdfSubject, kind: ResourceKind) {
        self.inferred.push(InferredKind {
            resource: resource.to_string(),
            kind,
        });
    }

    pub(crate) fn record_pass(&mut self, stats: PassStats) {
        self.passes.push(stats);
    }

    pub(crate) fn set_counts(&mut self, triples: usize, consumed: usize) {
        self.triples = triples;
        self.consumed = consumed;
    }

    /// All issues, in the order they were found
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &ParseIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i, ParseIssue::ClassificationConflict { .. }))
    }

    pub fn structural_errors(&self) -> impl Iterator<Item = &ParseIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i, ParseIssue::Structural { .. }))
    }

    /// Triples that survived resolution
    pub fn unparsed(&self) -> impl Iterator<Item = &Triple> {
        self.issues.iter().filter_map(|i| match i {
            ParseIssue::UnparsedStatement { triple } => Some(triple),
            _ => None,
        })
    }

    pub fn unsupported(&self) -> impl Iterator<Item = &ParseIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i, ParseIssue::Unsupported { .. }))
    }

    pub fn ambiguities(&self) -> impl Iterator<Item = &ParseIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i, ParseIssue::AmbiguousPropertyKind { .. }))
    }

    /// Classifications applied by the ambiguity policy
    pub fn inferred(&self) -> &[InferredKind] {
        &self.inferred
    }

    /// Per-scan statistics: the streaming pass first, then each deferred scan
    pub fn passes(&self) -> &[PassStats] {
        &self.passes
    }

    /// Distinct triples read from the source
    pub fn triple_count(&self) -> usize {
        self.triples
    }

    /// Triples folded into axioms
    pub fn consumed_count(&self) -> usize {
        self.consumed
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity() == Severity::Error)
    }

    /// True if nothing was reported
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Serializable view of the report
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            triples: self.triples,
            consumed: self.consumed,
            conflicts: self.conflicts().count(),
            structural_errors: self.structural_errors().count(),
            unparsed: self.unparsed().count(),
            unsupported: self.unsupported().count(),
            ambiguous: self.ambiguities().count(),
            inferred: self.inferred.clone(),
            passes: self.passes.clone(),
            issues: self
                .issues
                .iter()
                .map(|issue| IssueEntry {
                    severity: issue.severity(),
                    kind: issue.kind(),
                    message: issue.to_string(),
                })
                .collect(),
        }
    }
}

/// One issue in a [`ReportSummary`]
#[derive(Debug, Clone, Serialize)]
pub struct IssueEntry {
    pub severity: Severity,
    pub kind: &'static str,
    pub message: String,
}

/// Report counts and messages, ready for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub triples: usize,
    pub consumed: usize,
    pub conflicts: usize,
    pub structural_errors: usize,
    pub unparsed: usize,
    pub unsupported: usize,
    pub ambiguous: usize,
    pub inferred: Vec<InferredKind>,
    pub passes: Vec<PassStats>,
    pub issues: Vec<IssueEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{NamedNode, RdfPredicate};

    fn subject(iri: &str) -> RdfSubject {
        RdfSubject::NamedNode(NamedNode::new(iri).unwrap())
    }

    #[test]
    fn test_filters_and_summary() {
        let p = subject("http://example.org/p");
        let triple = Triple::new(
            p.clone(),
            RdfPredicate::new("http://example.org/q").unwrap(),
            p.clone().into(),
        );

        let mut report = ParseReport::new();
        report.push(ParseIssue::ClassificationConflict {
            resource: p.clone(),
            kinds: vec![ResourceKind::ObjectProperty, ResourceKind::DataProperty],
        });
        report.push(ParseIssue::UnparsedStatement { triple });
        report.record_inference(&p, ResourceKind::ObjectProperty);
        report.set_counts(3, 1);

        assert_eq!(report.conflicts().count(), 1);
        assert_eq!(report.unparsed().count(), 1);
        assert!(!report.has_errors());
        assert!(!report.is_clean());

        let summary = report.summary();
        assert_eq!(summary.triples, 3);
        assert_eq!(summary.issues.len(), 2);
        assert_eq!(summary.issues[0].kind, "classification_conflict");
        assert!(summary.issues[0].message.contains("ObjectProperty, DataProperty"));

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"inferred\":[{\"resource\":\"<http://example.org/p>\""));
    }
}
