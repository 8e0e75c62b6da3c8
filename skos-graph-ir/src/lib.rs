//! In-memory RDF triple graph for the SKOS mapping engine
//!
//! This crate provides the canonical triple representation consumed and
//! produced by the mapping engine: terms, triples, and a whole-graph
//! container with wildcard pattern matching. The entire graph is held in
//! memory for the duration of a load or dump — there is no paging.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form.
//!    Compaction is a concern of serializers, not of this IR.
//!
//! 2. **Explicit datatypes** - Literals always carry an explicit datatype.
//!    Plain strings use `xsd:string`, language-tagged strings use
//!    `rdf:langString`, HTML fragments use `rdf:HTML`.
//!
//! 3. **Bag semantics by default** - `Graph` stores a `Vec<Triple>` and
//!    preserves duplicates. Call `dedupe()` explicitly for set semantics.
//!
//! 4. **Deterministic output** - Call `sort()` (or `canonicalize()`) before
//!    comparing or formatting for stable SPO-lexicographic ordering.
//!
//! # Example
//!
//! ```
//! use skos_graph_ir::{Graph, Term};
//!
//! let mut graph = Graph::new();
//! graph.add_triple(
//!     Term::iri("http://example.org/trees/larch"),
//!     Term::iri(skos_vocab::skos::PREF_LABEL),
//!     Term::lang_string("The Larch", "en"),
//! );
//!
//! let labels: Vec<_> = graph
//!     .matching(
//!         Some(&Term::iri("http://example.org/trees/larch")),
//!         Some(&Term::iri(skos_vocab::skos::PREF_LABEL)),
//!         None,
//!     )
//!     .collect();
//! assert_eq!(labels.len(), 1);
//! ```

mod datatype;
mod graph;
mod term;
mod triple;

pub use datatype::Datatype;
pub use graph::Graph;
pub use term::{BlankId, Term};
pub use triple::Triple;
