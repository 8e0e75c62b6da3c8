//! RDF term types: IRI, blank node, and literal
//!
//! Terms are the building blocks of triples. A term can be:
//! - An IRI (always expanded, never prefixed)
//! - A blank node (with stable identifier)
//! - A literal (lexical form + explicit datatype + optional language tag)

use crate::Datatype;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// Blank node identifier
///
/// Blank node IDs are stable within a graph but have no global meaning.
/// The label is stored without the `_:` prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// Create a blank node ID from a label
    ///
    /// The label should NOT include the `_:` prefix.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Get the label (without `_:` prefix)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// An RDF term (subject, predicate, or object position)
///
/// # Invariants
///
/// - `Term::Iri` always contains an **expanded** IRI, never a prefixed form.
/// - For `Term::Literal` with a language tag, the datatype must be
///   `rdf:langString`.
/// - The predicate position of a triple can only be `Term::Iri`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Term {
    /// Full expanded IRI (e.g., "http://www.w3.org/2004/02/skos/core#Concept")
    Iri(Arc<str>),

    /// Blank node with stable identifier
    BlankNode(BlankId),

    /// Literal with lexical form and explicit datatype
    Literal {
        /// The lexical form (always valid UTF-8 by construction)
        lexical: Arc<str>,
        /// Datatype (always present)
        datatype: Datatype,
        /// Language tag (only valid when datatype is rdf:langString)
        language: Option<Arc<str>>,
    },
}

impl Term {
    /// Create an IRI term from an expanded IRI string
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a blank node term
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::BlankNode(BlankId::new(label))
    }

    /// Create a plain string literal (xsd:string)
    pub fn string(value: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype: Datatype::xsd_string(),
            language: None,
        }
    }

    /// Create a language-tagged string literal (rdf:langString)
    pub fn lang_string(value: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype: Datatype::rdf_lang_string(),
            language: Some(Arc::from(lang.as_ref())),
        }
    }

    /// Create a typed literal with a custom datatype
    pub fn typed(value: impl AsRef<str>, datatype: Datatype) -> Self {
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype,
            language: None,
        }
    }

    /// Create an rdf:HTML literal from a serialized fragment
    pub fn html(fragment: impl AsRef<str>) -> Self {
        Self::typed(fragment, Datatype::rdf_html())
    }

    /// Check if this is an IRI term
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this is a blank node
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    /// Check if this term can occupy a subject position (IRI or blank node)
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    /// Try to get as IRI string
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Try to get as blank node ID
    pub fn as_blank(&self) -> Option<&BlankId> {
        match self {
            Term::BlankNode(id) => Some(id),
            _ => None,
        }
    }

    /// Try to get literal components: (lexical, datatype, language)
    pub fn as_literal(&self) -> Option<(&str, &Datatype, Option<&str>)> {
        match self {
            Term::Literal {
                lexical,
                datatype,
                language,
            } => Some((lexical, datatype, language.as_deref())),
            _ => None,
        }
    }

    /// N-Triples-style rendering, used for deterministic graph comparison
    pub fn to_ntriples(&self) -> String {
        match self {
            Term::Iri(iri) => format!("<{iri}>"),
            Term::BlankNode(id) => id.to_string(),
            Term::Literal {
                lexical,
                datatype,
                language,
            } => {
                let escaped = lexical
                    .replace('\\', "\\\\")
                    .replace('"', "\\\"")
                    .replace('\n', "\\n");
                if let Some(lang) = language {
                    format!("\"{escaped}\"@{lang}")
                } else if datatype.is_string() {
                    format!("\"{escaped}\"")
                } else {
                    format!("\"{escaped}\"^^<{datatype}>")
                }
            }
        }
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        // Term kind ordering: Iri < BlankNode < Literal
        let kind = |t: &Term| -> u8 {
            match t {
                Term::Iri(_) => 0,
                Term::BlankNode(_) => 1,
                Term::Literal { .. } => 2,
            }
        };

        match kind(self).cmp(&kind(other)) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match (self, other) {
            (Term::Iri(a), Term::Iri(b)) => a.cmp(b),
            (Term::BlankNode(a), Term::BlankNode(b)) => a.cmp(b),
            (
                Term::Literal {
                    lexical: v1,
                    datatype: d1,
                    language: l1,
                },
                Term::Literal {
                    lexical: v2,
                    datatype: d2,
                    language: l2,
                },
            ) => v1.cmp(v2).then_with(|| d1.cmp(d2)).then_with(|| l1.cmp(l2)),
            _ => Ordering::Equal,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "{iri}"),
            Term::BlankNode(id) => write!(f, "{id}"),
            Term::Literal { lexical, .. } => write!(f, "{lexical}"),
        }
    }
}
