//! RDF literal datatypes
//!
//! Datatypes are always explicit in this IR - there is no "untyped" literal.
//! Plain strings default to `xsd:string`, language-tagged strings use
//! `rdf:langString`, and HTML-marked-up fragments use `rdf:HTML`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// RDF literal datatype, stored as an expanded IRI
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Self::from_iri(skos_vocab::xsd::STRING)
    }

    /// rdf:langString - for language-tagged literals
    pub fn rdf_lang_string() -> Self {
        Self::from_iri(skos_vocab::rdf::LANG_STRING)
    }

    /// rdf:HTML - for HTML-marked-up literal fragments
    pub fn rdf_html() -> Self {
        Self::from_iri(skos_vocab::rdf::HTML)
    }

    /// Get the datatype IRI
    pub fn as_iri(&self) -> &str {
        &self.0
    }

    /// Check whether this is rdf:HTML
    pub fn is_html(&self) -> bool {
        self.as_iri() == skos_vocab::rdf::HTML
    }

    /// Check whether this is xsd:string
    pub fn is_string(&self) -> bool {
        self.as_iri() == skos_vocab::xsd::STRING
    }
}

impl Default for Datatype {
    fn default() -> Self {
        Self::xsd_string()
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_detection() {
        assert!(Datatype::rdf_html().is_html());
        assert!(!Datatype::xsd_string().is_html());
    }

    #[test]
    fn default_is_xsd_string() {
        assert_eq!(Datatype::default(), Datatype::xsd_string());
    }
}
