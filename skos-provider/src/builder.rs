//! Graph-to-model builder
//!
//! Walks the triple graph and materializes [`Concept`] and [`Collection`]
//! records with all their typed relations, then runs the two derivation
//! passes: membership back-fill and per-collection relation inference.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::extract::{read_labels, read_notes, read_sources};
use crate::identity::IdResolver;
use crate::model::{Collection, Concept, ConceptScheme, Entity, MatchType};
use rustc_hash::{FxHashMap, FxHashSet};
use skos_graph_ir::{Graph, Term};
use std::collections::BTreeMap;

/// Materialize every typed concept and collection node in the graph
///
/// When `filter_by_scheme` is set (the caller supplied an explicit scheme),
/// nodes are skipped unless their `skos:inScheme` or `skos:topConceptOf`
/// points at `scheme.uri`. Label languages encountered along the way are
/// recorded on the scheme.
pub fn build(
    graph: &Graph,
    scheme: &mut ConceptScheme,
    filter_by_scheme: bool,
    ids: &mut IdResolver,
    diag: &mut Diagnostics,
) -> Result<Vec<Entity>> {
    let rdf_type = Term::iri(skos_vocab::rdf::TYPE);
    let mut entities = Vec::new();

    for subject in graph.subjects_with(&rdf_type, &Term::iri(skos_vocab::skos::CONCEPT)) {
        if filter_by_scheme && !in_scheme(graph, subject, &scheme.uri) {
            continue;
        }
        entities.push(Entity::Concept(read_concept(graph, subject, ids, diag)?));
    }

    for subject in graph.subjects_with(&rdf_type, &Term::iri(skos_vocab::skos::COLLECTION)) {
        if filter_by_scheme && !in_scheme(graph, subject, &scheme.uri) {
            continue;
        }
        entities.push(Entity::Collection(read_collection(
            graph, subject, ids, diag,
        )?));
    }

    for entity in &entities {
        for label in entity.labels() {
            if let Some(lang) = &label.language {
                scheme.add_language(lang.clone());
            }
        }
    }

    fill_member_of(&mut entities);
    infer_concept_relations(&mut entities);

    Ok(entities)
}

/// Whether a node's in-scheme or top-concept-of property points at the
/// given scheme URI
fn in_scheme(graph: &Graph, subject: &Term, scheme_uri: &str) -> bool {
    let scheme = Term::iri(scheme_uri);
    graph.contains(
        Some(subject),
        Some(&Term::iri(skos_vocab::skos::IN_SCHEME)),
        Some(&scheme),
    ) || graph.contains(
        Some(subject),
        Some(&Term::iri(skos_vocab::skos::TOP_CONCEPT_OF)),
        Some(&scheme),
    )
}

fn read_concept(
    graph: &Graph,
    subject: &Term,
    ids: &mut IdResolver,
    diag: &mut Diagnostics,
) -> Result<Concept> {
    let mut matches = BTreeMap::new();
    for kind in MatchType::ALL {
        let predicate = Term::iri(format!(
            "{}{}",
            skos_vocab::skos::NAMESPACE,
            kind.predicate_local()
        ));
        let uris: Vec<String> = graph
            .objects(subject, &predicate)
            .filter(|o| o.is_resource())
            .map(|o| o.to_string())
            .collect();
        if !uris.is_empty() {
            matches.insert(kind, uris);
        }
    }

    Ok(Concept {
        id: ids.resolve(graph, subject),
        uri: subject.to_string(),
        labels: read_labels(graph, subject, diag),
        notes: read_notes(graph, subject, diag)?,
        sources: read_sources(graph, subject),
        broader: related_ids(graph, subject, skos_vocab::skos::BROADER, ids),
        narrower: related_ids(graph, subject, skos_vocab::skos::NARROWER, ids),
        related: related_ids(graph, subject, skos_vocab::skos::RELATED, ids),
        member_of: Vec::new(),
        subordinate_arrays: related_ids(graph, subject, skos_vocab::iso_thes::SUBORDINATE_ARRAY, ids),
        matches,
    })
}

fn read_collection(
    graph: &Graph,
    subject: &Term,
    ids: &mut IdResolver,
    diag: &mut Diagnostics,
) -> Result<Collection> {
    Ok(Collection {
        id: ids.resolve(graph, subject),
        uri: subject.to_string(),
        labels: read_labels(graph, subject, diag),
        notes: read_notes(graph, subject, diag)?,
        sources: read_sources(graph, subject),
        members: related_ids(graph, subject, skos_vocab::skos::MEMBER, ids),
        member_of: Vec::new(),
        superordinates: related_ids(graph, subject, skos_vocab::iso_thes::SUPER_ORDINATE, ids),
        infer_concept_relations: false,
    })
}

/// Ids of all resource objects of (subject, predicate), resolved through
/// the identity resolver
///
/// The graph is a bag, so a repeated triple yields its id only once.
fn related_ids(graph: &Graph, subject: &Term, predicate: &str, ids: &mut IdResolver) -> Vec<String> {
    let predicate = Term::iri(predicate);
    let objects: Vec<Term> = graph
        .objects(subject, &predicate)
        .filter(|o| o.is_resource())
        .cloned()
        .collect();
    let mut seen = FxHashSet::default();
    objects
        .iter()
        .map(|object| ids.resolve(graph, object))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Membership back-fill: for every collection C and every entity E with
/// `E.id` in `C.members`, record `C.id` in `E.member_of`
///
/// Collections are deduplicated by id first so an aliased collection is
/// not double-counted; `member_of` itself also stays duplicate-free.
fn fill_member_of(entities: &mut [Entity]) {
    let mut seen = FxHashSet::default();
    let mut memberships: Vec<(String, Vec<String>)> = Vec::new();
    for entity in entities.iter() {
        if let Entity::Collection(collection) = entity {
            if seen.insert(collection.id.clone()) {
                memberships.push((collection.id.clone(), collection.members.clone()));
            }
        }
    }

    for entity in entities.iter_mut() {
        let (id, member_of) = match entity {
            Entity::Concept(c) => (c.id.clone(), &mut c.member_of),
            Entity::Collection(c) => (c.id.clone(), &mut c.member_of),
        };
        for (collection_id, members) in &memberships {
            if members.contains(&id) && !member_of.contains(collection_id) {
                member_of.push(collection_id.clone());
            }
        }
    }
}

/// Per-collection relation inference
///
/// A collection with superordinates gets `infer_concept_relations = true`
/// iff some broader id reachable from its member concepts (recursing into
/// nested collections) is one of its superordinates. This detects whether
/// the source graph already materializes the broader/narrower edges implied
/// by the subordinate-array structure, so the dumper knows whether to
/// re-synthesize them.
fn infer_concept_relations(entities: &mut Vec<Entity>) {
    let index: FxHashMap<String, usize> = entities
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id().to_string(), i))
        .collect();

    let mut flags: Vec<(usize, bool)> = Vec::new();
    for (i, entity) in entities.iter().enumerate() {
        let Entity::Collection(collection) = entity else {
            continue;
        };
        if collection.superordinates.is_empty() {
            flags.push((i, false));
            continue;
        }

        let mut broaders = FxHashSet::default();
        let mut visited = FxHashSet::default();
        collect_member_broaders(collection, entities, &index, &mut visited, &mut broaders);

        let infer = collection
            .superordinates
            .iter()
            .any(|superordinate| broaders.contains(superordinate.as_str()));
        flags.push((i, infer));
    }

    for (i, infer) in flags {
        if let Entity::Collection(collection) = &mut entities[i] {
            collection.infer_concept_relations = infer;
        }
    }
}

/// Collect the broader ids of every concept transitively contained in a
/// collection, recursing through nested collections
///
/// Cycles between collections are possible in adversarial input, so
/// traversal is bounded by a visited set of collection ids.
fn collect_member_broaders<'a>(
    collection: &'a Collection,
    entities: &'a [Entity],
    index: &FxHashMap<String, usize>,
    visited: &mut FxHashSet<&'a str>,
    broaders: &mut FxHashSet<&'a str>,
) {
    if !visited.insert(collection.id.as_str()) {
        return;
    }
    for member in &collection.members {
        let Some(&i) = index.get(member) else {
            continue;
        };
        match &entities[i] {
            Entity::Concept(concept) => {
                broaders.extend(concept.broader.iter().map(String::as_str));
            }
            Entity::Collection(nested) => {
                collect_member_broaders(nested, entities, index, visited, broaders);
            }
        }
    }
}
