//! SKOS vocabulary provider over RDF triples
//!
//! Bidirectional mapping between triple graphs and a typed SKOS model:
//! [`RdfProvider::from_graph`] loads concepts, collections, and their
//! scheme out of a [`skos_graph_ir::Graph`]; [`dump`](dump::dump) turns
//! a loaded provider back into canonicalized triples.
//!
//! The load pipeline resolves logical identifiers (`dcterms:identifier`
//! with a `dc:identifier` fallback), back-fills collection membership,
//! infers broader/narrower relations through subordinate arrays, and
//! normalizes language tags and HTML note fragments. Malformed data
//! degrades with [`Diagnostics`] warnings; only an ambiguous concept
//! scheme or an unparseable HTML fragment is fatal.

pub mod builder;
pub mod diagnostics;
pub mod dump;
pub mod error;
pub mod identity;
pub mod literal;
pub mod model;
pub mod provider;
pub mod scheme;

pub(crate) mod extract;

pub use diagnostics::{Diagnostics, Warning};
pub use dump::{dump, dump_subset};
pub use error::{Result, SkosError};
pub use model::{
    Collection, Concept, ConceptScheme, Entity, Label, LabelType, Markup, MatchType, Note,
    NoteType, Source,
};
pub use provider::{Dataset, EntitySummary, Metadata, RdfProvider};
