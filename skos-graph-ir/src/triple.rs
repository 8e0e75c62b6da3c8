//! RDF triple: subject, predicate, object

use crate::Term;
use serde::{Deserialize, Serialize};

/// A single RDF triple
///
/// Fields are public for ergonomic pattern matching. The predicate is
/// expected to be a `Term::Iri`; this is not enforced by construction but
/// the mapping engine never produces anything else.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    /// Subject term (IRI or blank node)
    pub s: Term,
    /// Predicate term (always an IRI)
    pub p: Term,
    /// Object term (IRI, blank node, or literal)
    pub o: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Triple { s, p, o }
    }

    /// Check whether this triple matches a wildcard pattern
    ///
    /// `None` components match any term.
    pub fn matches(&self, s: Option<&Term>, p: Option<&Term>, o: Option<&Term>) -> bool {
        s.map_or(true, |s| &self.s == s)
            && p.map_or(true, |p| &self.p == p)
            && o.map_or(true, |o| &self.o == o)
    }

    /// N-Triples-style rendering, used for deterministic graph comparison
    pub fn to_ntriples(&self) -> String {
        format!(
            "{} {} {} .",
            self.s.to_ntriples(),
            self.p.to_ntriples(),
            self.o.to_ntriples()
        )
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_ntriples())
    }
}
