//! The in-memory vocabulary provider produced by a load
//!
//! A [`RdfProvider`] is an immutable snapshot: one scheme plus the entities
//! built under it, with id and uri lookup tables. A failed load returns an
//! error and no provider, so a half-built model is never reachable.

use crate::builder::build;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::identity::IdResolver;
use crate::model::{Concept, ConceptScheme, Entity};
use crate::scheme::resolve_scheme;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use skos_graph_ir::Graph;

/// A dataset this vocabulary belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset URI, emitted as `void:inDataset`
    pub uri: String,
}

/// Caller-supplied provider metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Provider id, also the scheme identifier on dump
    pub id: String,
    /// Overrides `id` for synthesized scheme URI generation
    pub conceptscheme_id: Option<String>,
    /// Optional owning dataset
    pub dataset: Option<Dataset>,
}

impl Metadata {
    /// Metadata with just an id
    pub fn with_id(id: impl Into<String>) -> Self {
        Metadata {
            id: id.into(),
            ..Default::default()
        }
    }

    /// The id used for scheme resolution
    pub fn scheme_id(&self) -> &str {
        self.conceptscheme_id.as_deref().unwrap_or(&self.id)
    }
}

/// A (id, display label) pair returned by [`RdfProvider::get_all`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    /// Logical id
    pub id: String,
    /// Best display label text, if the entity has any label
    pub label: Option<String>,
}

/// A vocabulary provider backed by a loaded RDF graph
#[derive(Debug, Clone)]
pub struct RdfProvider {
    metadata: Metadata,
    scheme: ConceptScheme,
    entities: Vec<Entity>,
    by_id: FxHashMap<String, usize>,
    by_uri: FxHashMap<String, usize>,
    diagnostics: Diagnostics,
}

impl RdfProvider {
    /// Load a provider from a graph, discovering the concept scheme
    pub fn from_graph(metadata: Metadata, graph: &Graph) -> Result<Self> {
        Self::load(metadata, graph, None)
    }

    /// Load a provider from a graph restricted to an explicitly chosen
    /// scheme
    ///
    /// Besides disambiguating between multiple scheme nodes, this activates
    /// in-scheme filtering: only nodes whose `skos:inScheme` or
    /// `skos:topConceptOf` points at the chosen scheme are loaded.
    pub fn from_graph_in_scheme(
        metadata: Metadata,
        graph: &Graph,
        scheme_uri: &str,
    ) -> Result<Self> {
        Self::load(metadata, graph, Some(scheme_uri))
    }

    fn load(metadata: Metadata, graph: &Graph, scheme_uri: Option<&str>) -> Result<Self> {
        let mut diag = Diagnostics::new();
        let resolution = resolve_scheme(graph, metadata.scheme_id(), scheme_uri, &mut diag)?;

        let mut scheme = resolution.scheme;
        let mut ids = IdResolver::new();
        let entities = build(
            graph,
            &mut scheme,
            resolution.filter_by_scheme,
            &mut ids,
            &mut diag,
        )?;

        let mut by_id = FxHashMap::default();
        let mut by_uri = FxHashMap::default();
        for (i, entity) in entities.iter().enumerate() {
            by_id.entry(entity.id().to_string()).or_insert(i);
            by_uri.entry(entity.uri().to_string()).or_insert(i);
        }

        Ok(RdfProvider {
            metadata,
            scheme,
            entities,
            by_id,
            by_uri,
            diagnostics: diag,
        })
    }

    /// Provider metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The scheme owning the loaded entities
    pub fn concept_scheme(&self) -> &ConceptScheme {
        &self.scheme
    }

    /// All loaded entities, in load order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Warnings accumulated during the load
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Look an entity up by logical id
    pub fn get_by_id(&self, id: &str) -> Option<&Entity> {
        self.by_id.get(id).map(|&i| &self.entities[i])
    }

    /// Look an entity up by URI
    pub fn get_by_uri(&self, uri: &str) -> Option<&Entity> {
        self.by_uri.get(uri).map(|&i| &self.entities[i])
    }

    /// Every entity as a (id, best label) summary, sorted by id
    pub fn get_all(&self) -> Vec<EntitySummary> {
        let mut all: Vec<EntitySummary> = self
            .entities
            .iter()
            .map(|entity| EntitySummary {
                id: entity.id().to_string(),
                label: entity.label().map(|l| l.text.clone()),
            })
            .collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Concepts with no broader relation
    pub fn get_top_concepts(&self) -> Vec<&Concept> {
        self.entities
            .iter()
            .filter_map(Entity::as_concept)
            .filter(|concept| concept.broader.is_empty())
            .collect()
    }

    /// An id plus every id transitively below it
    ///
    /// A concept expands to itself and its narrower expansion; a collection
    /// expands to the union of its members' expansions. Returns `None` for
    /// an unknown id. Bounded by a visited set, so relation cycles in
    /// adversarial input terminate.
    pub fn expand(&self, id: &str) -> Option<Vec<String>> {
        self.get_by_id(id)?;
        let mut visited = FxHashSet::default();
        let mut result = Vec::new();
        self.expand_into(id, &mut visited, &mut result);
        Some(result)
    }

    fn expand_into(&self, id: &str, visited: &mut FxHashSet<String>, result: &mut Vec<String>) {
        if !visited.insert(id.to_string()) {
            return;
        }
        match self.get_by_id(id) {
            Some(Entity::Concept(concept)) => {
                result.push(concept.id.clone());
                for narrower in &concept.narrower {
                    self.expand_into(narrower, visited, result);
                }
            }
            Some(Entity::Collection(collection)) => {
                for member in &collection.members {
                    self.expand_into(member, visited, result);
                }
            }
            None => {}
        }
    }
}
