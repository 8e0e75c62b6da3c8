//! Logical id resolution for graph nodes
//!
//! The logical id of a node is its explicit identifier property when one is
//! asserted (`dcterms:identifier` first, the legacy `dc:identifier` as
//! fallback), else the node's own IRI or blank node rendering. Resolution
//! is a pure function of the node and the graph; the [`IdResolver`] memoizes
//! results for the duration of one load so repeated resolution is idempotent
//! and cheap.

use crate::literal::to_text;
use rustc_hash::FxHashMap;
use skos_graph_ir::{Graph, Term};

/// Resolve the logical id of a node, without memoization
pub fn resolve_id(graph: &Graph, node: &Term) -> String {
    for predicate in [
        Term::iri(skos_vocab::dcterms::IDENTIFIER),
        Term::iri(skos_vocab::dc::IDENTIFIER),
    ] {
        if let Some(object) = graph.value(node, &predicate) {
            return to_text(object);
        }
    }
    node.to_string()
}

/// Memoizing id resolver, scoped to a single load pass
#[derive(Debug, Default)]
pub struct IdResolver {
    cache: FxHashMap<Term, String>,
}

impl IdResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a node's id, consulting the memo first
    pub fn resolve(&mut self, graph: &Graph, node: &Term) -> String {
        if let Some(id) = self.cache.get(node) {
            return id.clone();
        }
        let id = resolve_id(graph, node);
        self.cache.insert(node.clone(), id.clone());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Term {
        Term::iri("http://example.org/trees/larch")
    }

    #[test]
    fn falls_back_to_node_iri() {
        let graph = Graph::new();
        assert_eq!(resolve_id(&graph, &node()), "http://example.org/trees/larch");
    }

    #[test]
    fn prefers_primary_identifier_predicate() {
        let mut graph = Graph::new();
        graph.add_triple(
            node(),
            Term::iri(skos_vocab::dc::IDENTIFIER),
            Term::string("legacy"),
        );
        graph.add_triple(
            node(),
            Term::iri(skos_vocab::dcterms::IDENTIFIER),
            Term::string("1"),
        );
        assert_eq!(resolve_id(&graph, &node()), "1");
    }

    #[test]
    fn legacy_identifier_predicate_is_a_fallback() {
        let mut graph = Graph::new();
        graph.add_triple(
            node(),
            Term::iri(skos_vocab::dc::IDENTIFIER),
            Term::string("legacy"),
        );
        assert_eq!(resolve_id(&graph, &node()), "legacy");
    }

    #[test]
    fn blank_nodes_use_their_label_rendering() {
        let graph = Graph::new();
        assert_eq!(resolve_id(&graph, &Term::blank("b7")), "_:b7");
    }

    #[test]
    fn resolver_memoizes_across_graph_mutation() {
        let mut graph = Graph::new();
        let mut ids = IdResolver::new();
        assert_eq!(ids.resolve(&graph, &node()), "http://example.org/trees/larch");

        // the memo, not the new triple, answers the second call
        graph.add_triple(
            node(),
            Term::iri(skos_vocab::dcterms::IDENTIFIER),
            Term::string("1"),
        );
        assert_eq!(ids.resolve(&graph, &node()), "http://example.org/trees/larch");
    }
}
