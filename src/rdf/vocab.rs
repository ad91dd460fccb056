//! Vocabulary IRIs used by the OWL 2 RDF mapping

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const SWRL: &str = "http://www.w3.org/2003/11/swrl#";
pub const OWLRDF: &str = "urn:owlrdf:vocab#";

pub mod rdf {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
    pub const LIST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#List";
    pub const PLAIN_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#PlainLiteral";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
    pub const XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";
}

pub mod rdfs {
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    pub const SUB_PROPERTY_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subPropertyOf";
    pub const DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
    pub const RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
    pub const DATATYPE: &str = "http://www.w3.org/2000/01/rdf-schema#Datatype";
    pub const LITERAL: &str = "http://www.w3.org/2000/01/rdf-schema#Literal";
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
    pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
    pub const IS_DEFINED_BY: &str = "http://www.w3.org/2000/01/rdf-schema#isDefinedBy";
}

pub mod owl {
    // Declarations
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";
    pub const DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
    pub const ANNOTATION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AnnotationProperty";
    pub const NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
    pub const ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";

    // Ontology header
    pub const IMPORTS: &str = "http://www.w3.org/2002/07/owl#imports";
    pub const VERSION_IRI: &str = "http://www.w3.org/2002/07/owl#versionIRI";

    // Property characteristics
    pub const FUNCTIONAL_PROPERTY: &str = "http://www.w3.org/2002/07/owl#FunctionalProperty";
    pub const INVERSE_FUNCTIONAL_PROPERTY: &str =
        "http://www.w3.org/2002/07/owl#InverseFunctionalProperty";
    pub const SYMMETRIC_PROPERTY: &str = "http://www.w3.org/2002/07/owl#SymmetricProperty";
    pub const ASYMMETRIC_PROPERTY: &str = "http://www.w3.org/2002/07/owl#AsymmetricProperty";
    pub const REFLEXIVE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ReflexiveProperty";
    pub const IRREFLEXIVE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#IrreflexiveProperty";
    pub const TRANSITIVE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#TransitiveProperty";

    // Class axioms
    pub const EQUIVALENT_CLASS: &str = "http://www.w3.org/2002/07/owl#equivalentClass";
    pub const DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#disjointWith";
    pub const DISJOINT_UNION_OF: &str = "http://www.w3.org/2002/07/owl#disjointUnionOf";
    pub const ALL_DISJOINT_CLASSES: &str = "http://www.w3.org/2002/07/owl#AllDisjointClasses";
    pub const MEMBERS: &str = "http://www.w3.org/2002/07/owl#members";
    pub const HAS_KEY: &str = "http://www.w3.org/2002/07/owl#hasKey";

    // Property axioms
    pub const EQUIVALENT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#equivalentProperty";
    pub const PROPERTY_DISJOINT_WITH: &str = "http://www.w3.org/2002/07/owl#propertyDisjointWith";
    pub const ALL_DISJOINT_PROPERTIES: &str =
        "http://www.w3.org/2002/07/owl#AllDisjointProperties";
    pub const INVERSE_OF: &str = "http://www.w3.org/2002/07/owl#inverseOf";
    pub const PROPERTY_CHAIN_AXIOM: &str = "http://www.w3.org/2002/07/owl#propertyChainAxiom";

    // Individuals
    pub const SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";
    pub const DIFFERENT_FROM: &str = "http://www.w3.org/2002/07/owl#differentFrom";
    pub const ALL_DIFFERENT: &str = "http://www.w3.org/2002/07/owl#AllDifferent";
    pub const DISTINCT_MEMBERS: &str = "http://www.w3.org/2002/07/owl#distinctMembers";
    pub const NEGATIVE_PROPERTY_ASSERTION: &str =
        "http://www.w3.org/2002/07/owl#NegativePropertyAssertion";
    pub const SOURCE_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#sourceIndividual";
    pub const ASSERTION_PROPERTY: &str = "http://www.w3.org/2002/07/owl#assertionProperty";
    pub const TARGET_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#targetIndividual";
    pub const TARGET_VALUE: &str = "http://www.w3.org/2002/07/owl#targetValue";

    // Class expressions
    pub const INTERSECTION_OF: &str = "http://www.w3.org/2002/07/owl#intersectionOf";
    pub const UNION_OF: &str = "http://www.w3.org/2002/07/owl#unionOf";
    pub const COMPLEMENT_OF: &str = "http://www.w3.org/2002/07/owl#complementOf";
    pub const ONE_OF: &str = "http://www.w3.org/2002/07/owl#oneOf";
    pub const RESTRICTION: &str = "http://www.w3.org/2002/07/owl#Restriction";
    pub const ON_PROPERTY: &str = "http://www.w3.org/2002/07/owl#onProperty";
    pub const SOME_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#someValuesFrom";
    pub const ALL_VALUES_FROM: &str = "http://www.w3.org/2002/07/owl#allValuesFrom";
    pub const HAS_VALUE: &str = "http://www.w3.org/2002/07/owl#hasValue";
    pub const HAS_SELF: &str = "http://www.w3.org/2002/07/owl#hasSelf";
    pub const MIN_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#minCardinality";
    pub const MAX_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#maxCardinality";
    pub const CARDINALITY: &str = "http://www.w3.org/2002/07/owl#cardinality";
    pub const MIN_QUALIFIED_CARDINALITY: &str =
        "http://www.w3.org/2002/07/owl#minQualifiedCardinality";
    pub const MAX_QUALIFIED_CARDINALITY: &str =
        "http://www.w3.org/2002/07/owl#maxQualifiedCardinality";
    pub const QUALIFIED_CARDINALITY: &str = "http://www.w3.org/2002/07/owl#qualifiedCardinality";
    pub const ON_CLASS: &str = "http://www.w3.org/2002/07/owl#onClass";
    pub const ON_DATA_RANGE: &str = "http://www.w3.org/2002/07/owl#onDataRange";

    // Data ranges
    pub const DATATYPE_COMPLEMENT_OF: &str = "http://www.w3.org/2002/07/owl#datatypeComplementOf";
    pub const ON_DATATYPE: &str = "http://www.w3.org/2002/07/owl#onDatatype";
    pub const WITH_RESTRICTIONS: &str = "http://www.w3.org/2002/07/owl#withRestrictions";

    // Axiom annotations
    pub const AXIOM: &str = "http://www.w3.org/2002/07/owl#Axiom";
    pub const ANNOTATION: &str = "http://www.w3.org/2002/07/owl#Annotation";
    pub const ANNOTATED_SOURCE: &str = "http://www.w3.org/2002/07/owl#annotatedSource";
    pub const ANNOTATED_PROPERTY: &str = "http://www.w3.org/2002/07/owl#annotatedProperty";
    pub const ANNOTATED_TARGET: &str = "http://www.w3.org/2002/07/owl#annotatedTarget";

    // Built-in entities
    pub const THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    pub const NOTHING: &str = "http://www.w3.org/2002/07/owl#Nothing";
    pub const TOP_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#topObjectProperty";
    pub const BOTTOM_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#bottomObjectProperty";
    pub const TOP_DATA_PROPERTY: &str = "http://www.w3.org/2002/07/owl#topDataProperty";
    pub const BOTTOM_DATA_PROPERTY: &str = "http://www.w3.org/2002/07/owl#bottomDataProperty";
    pub const VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";
    pub const DEPRECATED: &str = "http://www.w3.org/2002/07/owl#deprecated";
    pub const PRIOR_VERSION: &str = "http://www.w3.org/2002/07/owl#priorVersion";
    pub const BACKWARD_COMPATIBLE_WITH: &str =
        "http://www.w3.org/2002/07/owl#backwardCompatibleWith";
    pub const INCOMPATIBLE_WITH: &str = "http://www.w3.org/2002/07/owl#incompatibleWith";
    pub const REAL: &str = "http://www.w3.org/2002/07/owl#real";
    pub const RATIONAL: &str = "http://www.w3.org/2002/07/owl#rational";
}

pub mod xsd {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

    pub const MIN_INCLUSIVE: &str = "http://www.w3.org/2001/XMLSchema#minInclusive";
    pub const MAX_INCLUSIVE: &str = "http://www.w3.org/2001/XMLSchema#maxInclusive";
    pub const MIN_EXCLUSIVE: &str = "http://www.w3.org/2001/XMLSchema#minExclusive";
    pub const MAX_EXCLUSIVE: &str = "http://www.w3.org/2001/XMLSchema#maxExclusive";
    pub const LENGTH: &str = "http://www.w3.org/2001/XMLSchema#length";
    pub const MIN_LENGTH: &str = "http://www.w3.org/2001/XMLSchema#minLength";
    pub const MAX_LENGTH: &str = "http://www.w3.org/2001/XMLSchema#maxLength";
    pub const PATTERN: &str = "http://www.w3.org/2001/XMLSchema#pattern";
}

pub mod swrl {
    pub const IMP: &str = "http://www.w3.org/2003/11/swrl#Imp";
}

pub mod owlrdf {
    /// Tags annotation assertions kept for statements no handler consumed
    pub const UNPARSED_STATEMENT: &str = "urn:owlrdf:vocab#unparsedStatement";
}

/// Annotation properties every ontology may use without declaring them.
pub const BUILT_IN_ANNOTATION_PROPERTIES: &[&str] = &[
    rdfs::LABEL,
    rdfs::COMMENT,
    rdfs::SEE_ALSO,
    rdfs::IS_DEFINED_BY,
    owl::VERSION_INFO,
    owl::DEPRECATED,
    owl::PRIOR_VERSION,
    owl::BACKWARD_COMPATIBLE_WITH,
    owl::INCOMPATIBLE_WITH,
];

/// Datatypes of the OWL 2 datatype map that are pre-classified.
pub const BUILT_IN_DATATYPES: &[&str] = &[
    rdfs::LITERAL,
    rdf::PLAIN_LITERAL,
    rdf::LANG_STRING,
    rdf::XML_LITERAL,
    owl::REAL,
    owl::RATIONAL,
    xsd::STRING,
    xsd::BOOLEAN,
    xsd::INTEGER,
    xsd::INT,
    xsd::NON_NEGATIVE_INTEGER,
    xsd::DECIMAL,
    xsd::DOUBLE,
    xsd::FLOAT,
    xsd::DATE_TIME,
    xsd::ANY_URI,
];

/// Constraining facets allowed in datatype restrictions.
pub const FACETS: &[&str] = &[
    xsd::MIN_INCLUSIVE,
    xsd::MAX_INCLUSIVE,
    xsd::MIN_EXCLUSIVE,
    xsd::MAX_EXCLUSIVE,
    xsd::LENGTH,
    xsd::MIN_LENGTH,
    xsd::MAX_LENGTH,
    xsd::PATTERN,
];

/// Predicates that only ever describe a blank-node structure.
pub const STRUCTURAL_PREDICATES: &[&str] = &[
    rdf::FIRST,
    rdf::REST,
    owl::INTERSECTION_OF,
    owl::UNION_OF,
    owl::COMPLEMENT_OF,
    owl::ONE_OF,
    owl::ON_PROPERTY,
    owl::SOME_VALUES_FROM,
    owl::ALL_VALUES_FROM,
    owl::HAS_VALUE,
    owl::HAS_SELF,
    owl::MIN_CARDINALITY,
    owl::MAX_CARDINALITY,
    owl::CARDINALITY,
    owl::MIN_QUALIFIED_CARDINALITY,
    owl::MAX_QUALIFIED_CARDINALITY,
    owl::QUALIFIED_CARDINALITY,
    owl::ON_CLASS,
    owl::ON_DATA_RANGE,
    owl::DATATYPE_COMPLEMENT_OF,
    owl::ON_DATATYPE,
    owl::WITH_RESTRICTIONS,
    owl::ANNOTATED_SOURCE,
    owl::ANNOTATED_PROPERTY,
    owl::ANNOTATED_TARGET,
    owl::MEMBERS,
    owl::DISTINCT_MEMBERS,
    owl::SOURCE_INDIVIDUAL,
    owl::ASSERTION_PROPERTY,
    owl::TARGET_INDIVIDUAL,
    owl::TARGET_VALUE,
    owl::INVERSE_OF,
];

/// `rdf:type` objects that mark a blank node as structural.
pub const STRUCTURAL_TYPES: &[&str] = &[
    owl::RESTRICTION,
    owl::CLASS,
    rdfs::DATATYPE,
    owl::AXIOM,
    owl::ANNOTATION,
    owl::ALL_DISJOINT_CLASSES,
    owl::ALL_DISJOINT_PROPERTIES,
    owl::ALL_DIFFERENT,
    owl::NEGATIVE_PROPERTY_ASSERTION,
    rdf::LIST,
    swrl::IMP,
];

/// True for IRIs in the RDF, RDFS, OWL or SWRL namespaces that are not
/// ordinary annotation properties. Reserved predicates are never treated as
/// user properties by the assertion handlers.
pub fn is_reserved(iri: &str) -> bool {
    if BUILT_IN_ANNOTATION_PROPERTIES.contains(&iri) {
        return false;
    }
    iri.starts_with(RDF) || iri.starts_with(RDFS) || iri.starts_with(OWL) || iri.starts_with(SWRL)
}

/// True for constraining facet IRIs.
pub fn is_facet(iri: &str) -> bool {
    FACETS.contains(&iri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_vocabulary() {
        assert!(is_reserved(rdfs::SUB_CLASS_OF));
        assert!(is_reserved(owl::FUNCTIONAL_PROPERTY));
        assert!(is_reserved(rdf::TYPE));
        assert!(!is_reserved(rdfs::LABEL));
        assert!(!is_reserved(owl::VERSION_INFO));
        assert!(!is_reserved("http://example.org/p"));
        // The XSD namespace holds datatypes and facets, not reserved predicates.
        assert!(!is_reserved(xsd::STRING));
    }

    #[test]
    fn test_facets() {
        assert!(is_facet(xsd::MIN_INCLUSIVE));
        assert!(!is_facet(xsd::INTEGER));
    }
}
