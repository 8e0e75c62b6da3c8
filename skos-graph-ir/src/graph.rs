//! RDF graph - a collection of triples
//!
//! The `Graph` type uses `Vec<Triple>` to preserve duplicates (bag semantics).
//! Call `dedupe()` explicitly if you want set semantics, and `sort()` (or
//! `canonicalize()`) before formatting for deterministic output.

use crate::{Term, Triple};
use std::collections::BTreeMap;

/// A collection of RDF triples
///
/// # Design Decisions
///
/// - **Vec storage**: Uses `Vec<Triple>` instead of a set type so insertion
///   order is observable and duplicates are preserved until `dedupe()`.
/// - **Deterministic output**: Call `sort()` before formatting for stable
///   SPO-lexicographic ordering.
/// - **Wildcard queries**: `matching()` takes optional subject/predicate/
///   object components; `None` matches any term.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    /// The triples in this graph
    triples: Vec<Triple>,
    /// Prefix mappings for serializers (deterministic order via BTreeMap)
    pub prefixes: BTreeMap<String, String>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph carrying the well-known SKOS prefix set
    pub fn with_common_prefixes() -> Self {
        let mut graph = Self::new();
        for (prefix, namespace) in skos_vocab::common_prefixes() {
            graph.add_prefix(prefix, namespace);
        }
        graph
    }

    /// Add a prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Add a triple to the graph
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Add a triple by components
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Triple::new(s, p, o));
    }

    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Iterate over triples matching a wildcard pattern
    ///
    /// `None` components match any term. The pattern terms are cloned into
    /// the iterator (cheap, they are `Arc`-backed), so the iterator borrows
    /// only the graph and may outlive the pattern bindings.
    pub fn matching<'a>(
        &'a self,
        s: Option<&Term>,
        p: Option<&Term>,
        o: Option<&Term>,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        let (s, p, o) = (s.cloned(), p.cloned(), o.cloned());
        self.triples
            .iter()
            .filter(move |t| t.matches(s.as_ref(), p.as_ref(), o.as_ref()))
    }

    /// Check whether any triple matches a wildcard pattern
    pub fn contains(&self, s: Option<&Term>, p: Option<&Term>, o: Option<&Term>) -> bool {
        self.matching(s, p, o).next().is_some()
    }

    /// Objects of all triples with the given subject and predicate
    pub fn objects<'a>(&'a self, s: &Term, p: &Term) -> impl Iterator<Item = &'a Term> + 'a {
        self.matching(Some(s), Some(p), None).map(|t| &t.o)
    }

    /// First object of a (subject, predicate) pair, if any
    pub fn value(&self, s: &Term, p: &Term) -> Option<&Term> {
        self.objects(s, p).next()
    }

    /// Distinct subjects of all triples with the given predicate and object
    pub fn subjects_with(&self, p: &Term, o: &Term) -> Vec<&Term> {
        let mut subjects: Vec<&Term> = self
            .matching(None, Some(p), Some(o))
            .map(|t| &t.s)
            .collect();
        subjects.sort();
        subjects.dedup();
        subjects
    }

    /// Sort triples by SPO for deterministic output
    pub fn sort(&mut self) {
        self.triples.sort();
    }

    /// Remove duplicate triples (apply set semantics)
    ///
    /// Sorts first so every duplicate group is adjacent.
    pub fn dedupe(&mut self) {
        self.triples.sort();
        self.triples.dedup();
    }

    /// Sort and dedupe in one pass (canonicalize)
    ///
    /// This is the standard way to prepare a graph for comparison or output.
    pub fn canonicalize(&mut self) {
        self.dedupe();
    }

    /// Get a reference to the triples
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Get all triples (consuming the graph)
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }

    /// Render the whole graph as N-Triples-style lines
    ///
    /// Canonicalize first for a stable, comparable rendering.
    pub fn to_ntriples(&self) -> String {
        let mut out = String::new();
        for triple in &self.triples {
            out.push_str(&triple.to_ntriples());
            out.push('\n');
        }
        out
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        Graph {
            triples: iter.into_iter().collect(),
            prefixes: BTreeMap::new(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}
