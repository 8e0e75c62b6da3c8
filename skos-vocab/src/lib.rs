//! RDF Vocabulary Constants for the SKOS mapping engine
//!
//! This crate provides a centralized location for the RDF vocabulary IRIs
//! used throughout the workspace. All IRIs are stored fully expanded.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `skos` - SKOS core vocabulary (http://www.w3.org/2004/02/skos/core#)
//! - `iso_thes` - ISO 25964 SKOS extension (http://purl.org/iso25964/skos-thes#)
//! - `dc` - Dublin Core elements 1.1 (http://purl.org/dc/elements/1.1/)
//! - `dcterms` - DCMI metadata terms (http://purl.org/dc/terms/)
//! - `void` - Vocabulary of Interlinked Datasets (http://rdfs.org/ns/void#)

/// RDF vocabulary constants
pub mod rdf {
    /// The RDF namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// rdf:HTML IRI (datatype of HTML-marked-up literals)
    pub const HTML: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#HTML";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// The RDFS namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
}

/// XSD vocabulary constants
pub mod xsd {
    /// The XSD namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:anyURI IRI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
}

/// SKOS core vocabulary constants
pub mod skos {
    /// The SKOS namespace IRI
    pub const NAMESPACE: &str = "http://www.w3.org/2004/02/skos/core#";

    // Classes

    /// skos:Concept class IRI
    pub const CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";

    /// skos:Collection class IRI
    pub const COLLECTION: &str = "http://www.w3.org/2004/02/skos/core#Collection";

    /// skos:ConceptScheme class IRI
    pub const CONCEPT_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#ConceptScheme";

    // Semantic relations

    /// skos:broader IRI
    pub const BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";

    /// skos:narrower IRI
    pub const NARROWER: &str = "http://www.w3.org/2004/02/skos/core#narrower";

    /// skos:related IRI
    pub const RELATED: &str = "http://www.w3.org/2004/02/skos/core#related";

    /// skos:member IRI
    pub const MEMBER: &str = "http://www.w3.org/2004/02/skos/core#member";

    // Mapping relations

    /// skos:exactMatch IRI
    pub const EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";

    /// skos:closeMatch IRI
    pub const CLOSE_MATCH: &str = "http://www.w3.org/2004/02/skos/core#closeMatch";

    /// skos:broadMatch IRI
    pub const BROAD_MATCH: &str = "http://www.w3.org/2004/02/skos/core#broadMatch";

    /// skos:narrowMatch IRI
    pub const NARROW_MATCH: &str = "http://www.w3.org/2004/02/skos/core#narrowMatch";

    /// skos:relatedMatch IRI
    pub const RELATED_MATCH: &str = "http://www.w3.org/2004/02/skos/core#relatedMatch";

    // Labels

    /// skos:prefLabel IRI
    pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

    /// skos:altLabel IRI
    pub const ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";

    /// skos:hiddenLabel IRI
    pub const HIDDEN_LABEL: &str = "http://www.w3.org/2004/02/skos/core#hiddenLabel";

    /// skos:sortLabel IRI (non-standard, read-side only)
    pub const SORT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#sortLabel";

    // Documentation notes

    /// skos:definition IRI
    pub const DEFINITION: &str = "http://www.w3.org/2004/02/skos/core#definition";

    /// skos:scopeNote IRI
    pub const SCOPE_NOTE: &str = "http://www.w3.org/2004/02/skos/core#scopeNote";

    /// skos:example IRI
    pub const EXAMPLE: &str = "http://www.w3.org/2004/02/skos/core#example";

    /// skos:historyNote IRI
    pub const HISTORY_NOTE: &str = "http://www.w3.org/2004/02/skos/core#historyNote";

    /// skos:editorialNote IRI
    pub const EDITORIAL_NOTE: &str = "http://www.w3.org/2004/02/skos/core#editorialNote";

    /// skos:changeNote IRI
    pub const CHANGE_NOTE: &str = "http://www.w3.org/2004/02/skos/core#changeNote";

    // Scheme membership

    /// skos:inScheme IRI
    pub const IN_SCHEME: &str = "http://www.w3.org/2004/02/skos/core#inScheme";

    /// skos:topConceptOf IRI
    pub const TOP_CONCEPT_OF: &str = "http://www.w3.org/2004/02/skos/core#topConceptOf";

    /// skos:hasTopConcept IRI
    pub const HAS_TOP_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#hasTopConcept";
}

/// ISO 25964 SKOS extension (skos-thes) constants
pub mod iso_thes {
    /// The iso-thes namespace IRI
    pub const NAMESPACE: &str = "http://purl.org/iso25964/skos-thes#";

    /// iso-thes:subordinateArray IRI
    pub const SUBORDINATE_ARRAY: &str = "http://purl.org/iso25964/skos-thes#subordinateArray";

    /// iso-thes:superOrdinate IRI
    pub const SUPER_ORDINATE: &str = "http://purl.org/iso25964/skos-thes#superOrdinate";
}

/// Dublin Core elements 1.1 constants
pub mod dc {
    /// The DC elements namespace IRI
    pub const NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

    /// dc:identifier IRI (legacy identifier predicate)
    pub const IDENTIFIER: &str = "http://purl.org/dc/elements/1.1/identifier";
}

/// DCMI metadata terms constants
pub mod dcterms {
    /// The DCMI terms namespace IRI
    pub const NAMESPACE: &str = "http://purl.org/dc/terms/";

    /// dcterms:identifier IRI (primary identifier predicate)
    pub const IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";

    /// dcterms:source IRI
    pub const SOURCE: &str = "http://purl.org/dc/terms/source";

    /// dcterms:bibliographicCitation IRI
    pub const BIBLIOGRAPHIC_CITATION: &str = "http://purl.org/dc/terms/bibliographicCitation";

    /// dcterms:language IRI
    pub const LANGUAGE: &str = "http://purl.org/dc/terms/language";
}

/// VoID (Vocabulary of Interlinked Datasets) constants
pub mod void {
    /// The VoID namespace IRI
    pub const NAMESPACE: &str = "http://rdfs.org/ns/void#";

    /// void:inDataset IRI
    pub const IN_DATASET: &str = "http://rdfs.org/ns/void#inDataset";

    /// void:Dataset class IRI
    pub const DATASET: &str = "http://rdfs.org/ns/void#Dataset";
}

/// Well-known prefix mappings for serializers that want compact output
pub fn common_prefixes() -> Vec<(&'static str, &'static str)> {
    vec![
        ("rdf", rdf::NAMESPACE),
        ("skos", skos::NAMESPACE),
        ("iso-thes", iso_thes::NAMESPACE),
        ("dc", dc::NAMESPACE),
        ("dct", dcterms::NAMESPACE),
        ("void", void::NAMESPACE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skos_iris_expand_from_namespace() {
        assert_eq!(skos::CONCEPT, format!("{}Concept", skos::NAMESPACE));
        assert_eq!(skos::PREF_LABEL, format!("{}prefLabel", skos::NAMESPACE));
        assert_eq!(skos::IN_SCHEME, format!("{}inScheme", skos::NAMESPACE));
    }

    #[test]
    fn identifier_predicates_are_distinct() {
        assert_ne!(dc::IDENTIFIER, dcterms::IDENTIFIER);
        assert!(dc::IDENTIFIER.contains("elements/1.1"));
        assert!(dcterms::IDENTIFIER.contains("dc/terms"));
    }

    #[test]
    fn common_prefixes_cover_skos() {
        let prefixes = common_prefixes();
        assert!(prefixes.iter().any(|(p, ns)| *p == "skos" && *ns == skos::NAMESPACE));
    }
}
