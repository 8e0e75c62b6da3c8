//! Model-to-graph dumper
//!
//! Serializes a loaded provider (optionally a subset of its ids) back into
//! triples. The per-entity logic is identical for full and partial dumps:
//! a partial dump over every id produces exactly the triples of a full
//! dump. Nothing here is fatal; references that fail to resolve are
//! skipped and recorded as warnings.

use crate::diagnostics::{Diagnostics, Warning};
use crate::literal::{add_lang_to_html, UNDETERMINED};
use crate::model::{Collection, Concept, Entity, Label, LabelType, Markup, Note, Source};
use crate::provider::RdfProvider;
use rustc_hash::FxHashSet;
use skos_graph_ir::{Graph, Term};

/// Dump a whole provider to a canonicalized triple graph
pub fn dump(provider: &RdfProvider, diag: &mut Diagnostics) -> Graph {
    dump_subset(provider, None, diag)
}

/// Dump a provider, restricted to the given ids when a subset is supplied
///
/// Scheme-level triples are always emitted. Each dumped entity carries its
/// own `member_of` closure, so a partial dump is self-consistent.
pub fn dump_subset(
    provider: &RdfProvider,
    subset: Option<&[&str]>,
    diag: &mut Diagnostics,
) -> Graph {
    let mut dumper = Dumper {
        provider,
        graph: Graph::with_common_prefixes(),
        next_blank: 0,
    };

    dumper.emit_scheme();

    match subset {
        Some(ids) => {
            for id in ids {
                match provider.get_by_id(id) {
                    Some(entity) => dumper.emit_entity(entity, diag),
                    None => diag.warn(Warning::UnresolvedReference {
                        id: id.to_string(),
                        relation: "dump".to_string(),
                    }),
                }
            }
        }
        None => {
            for entity in provider.entities() {
                dumper.emit_entity(entity, diag);
            }
        }
    }

    let mut graph = dumper.graph;
    graph.canonicalize();
    graph
}

struct Dumper<'a> {
    provider: &'a RdfProvider,
    graph: Graph,
    next_blank: usize,
}

impl<'a> Dumper<'a> {
    fn scheme_subject(&self) -> Term {
        Term::iri(&self.provider.concept_scheme().uri)
    }

    fn fresh_blank(&mut self) -> Term {
        let term = Term::blank(format!("genid{}", self.next_blank));
        self.next_blank += 1;
        term
    }

    /// Resolve an id through the provider, warning and returning `None`
    /// when it dangles
    fn resolve(&self, id: &str, relation: &str, diag: &mut Diagnostics) -> Option<Term> {
        match self.provider.get_by_id(id) {
            Some(entity) => Some(Term::iri(entity.uri())),
            None => {
                diag.warn(Warning::UnresolvedReference {
                    id: id.to_string(),
                    relation: relation.to_string(),
                });
                None
            }
        }
    }

    fn emit_scheme(&mut self) {
        let subject = self.scheme_subject();
        self.graph.add_triple(
            subject.clone(),
            Term::iri(skos_vocab::rdf::TYPE),
            Term::iri(skos_vocab::skos::CONCEPT_SCHEME),
        );
        self.graph.add_triple(
            subject.clone(),
            Term::iri(skos_vocab::dcterms::IDENTIFIER),
            Term::string(&self.provider.metadata().id),
        );
        if let Some(dataset) = &self.provider.metadata().dataset {
            self.graph.add_triple(
                subject.clone(),
                Term::iri(skos_vocab::void::IN_DATASET),
                Term::iri(&dataset.uri),
            );
        }

        let scheme = self.provider.concept_scheme().clone();
        self.emit_labels(&subject, &scheme.labels);
        self.emit_notes(&subject, &scheme.notes);
        self.emit_sources(&subject, &scheme.sources);
        for language in &scheme.languages {
            self.graph.add_triple(
                subject.clone(),
                Term::iri(skos_vocab::dcterms::LANGUAGE),
                Term::string(language),
            );
        }
    }

    /// Core triples shared by full entity emission and the member_of
    /// closure: type, identifier, in-scheme
    fn emit_entity_core(&mut self, subject: &Term, entity: &Entity) {
        let class = match entity {
            Entity::Concept(_) => skos_vocab::skos::CONCEPT,
            Entity::Collection(_) => skos_vocab::skos::COLLECTION,
        };
        self.graph.add_triple(
            subject.clone(),
            Term::iri(skos_vocab::rdf::TYPE),
            Term::iri(class),
        );
        // a self-referential identifier triple carries no information
        if entity.id() != entity.uri() {
            self.graph.add_triple(
                subject.clone(),
                Term::iri(skos_vocab::dcterms::IDENTIFIER),
                Term::string(entity.id()),
            );
        }
        self.graph.add_triple(
            subject.clone(),
            Term::iri(skos_vocab::skos::IN_SCHEME),
            self.scheme_subject(),
        );
    }

    fn emit_entity(&mut self, entity: &Entity, diag: &mut Diagnostics) {
        let subject = Term::iri(entity.uri());
        self.emit_entity_core(&subject, entity);
        self.emit_labels(&subject, entity.labels());
        self.emit_notes(&subject, entity.notes());
        self.emit_sources(&subject, entity.sources());

        match entity {
            Entity::Concept(concept) => self.emit_concept(&subject, concept, diag),
            Entity::Collection(collection) => self.emit_collection(&subject, collection, diag),
        }
    }

    fn emit_labels(&mut self, subject: &Term, labels: &[Label]) {
        for label in labels {
            // sortLabel has no dump-side predicate and degrades to
            // hiddenLabel instead of being dropped
            let predicate = match label.kind {
                LabelType::PrefLabel => skos_vocab::skos::PREF_LABEL,
                LabelType::AltLabel => skos_vocab::skos::ALT_LABEL,
                LabelType::HiddenLabel | LabelType::SortLabel => skos_vocab::skos::HIDDEN_LABEL,
            };
            let object = match &label.language {
                Some(language) => Term::lang_string(&label.text, language),
                None => Term::string(&label.text),
            };
            self.graph
                .add_triple(subject.clone(), Term::iri(predicate), object);
        }
    }

    fn emit_notes(&mut self, subject: &Term, notes: &[Note]) {
        for note in notes {
            let predicate = Term::iri(format!(
                "{}{}",
                skos_vocab::skos::NAMESPACE,
                note.kind.as_str()
            ));
            let language = note.language.as_deref().unwrap_or(UNDETERMINED);
            let object = match note.markup {
                Markup::None => Term::lang_string(&note.text, language),
                Markup::Html => {
                    let fragment = match add_lang_to_html(&note.text, language) {
                        Ok(wrapped) => wrapped,
                        Err(e) => {
                            tracing::warn!(error = %e, "note fragment not re-wrappable, emitted verbatim");
                            note.text.clone()
                        }
                    };
                    Term::html(fragment)
                }
            };
            self.graph.add_triple(subject.clone(), predicate, object);
        }
    }

    fn emit_sources(&mut self, subject: &Term, sources: &[Source]) {
        for source in sources {
            let node = self.fresh_blank();
            self.graph.add_triple(
                subject.clone(),
                Term::iri(skos_vocab::dcterms::SOURCE),
                node.clone(),
            );
            let citation = match source.markup {
                Markup::None => Term::string(&source.citation),
                Markup::Html => Term::html(&source.citation),
            };
            self.graph.add_triple(
                node,
                Term::iri(skos_vocab::dcterms::BIBLIOGRAPHIC_CITATION),
                citation,
            );
        }
    }

    fn emit_concept(&mut self, subject: &Term, concept: &Concept, diag: &mut Diagnostics) {
        for (ids, predicate) in [
            (&concept.broader, skos_vocab::skos::BROADER),
            (&concept.narrower, skos_vocab::skos::NARROWER),
            (&concept.related, skos_vocab::skos::RELATED),
            (&concept.subordinate_arrays, skos_vocab::iso_thes::SUBORDINATE_ARRAY),
        ] {
            for id in ids {
                if let Some(object) = self.resolve(id, local_name(predicate), diag) {
                    self.graph
                        .add_triple(subject.clone(), Term::iri(predicate), object);
                }
            }
        }

        for (kind, uris) in &concept.matches {
            let predicate = Term::iri(format!(
                "{}{}",
                skos_vocab::skos::NAMESPACE,
                kind.predicate_local()
            ));
            for uri in uris {
                self.graph
                    .add_triple(subject.clone(), predicate.clone(), Term::iri(uri));
            }
        }

        let synthesized_broader = self.emit_concept_memberships(subject, concept, diag);

        // top concepts are linked from the scheme; emitting this from the
        // entity side keeps partial dumps equal to full ones. A broader
        // edge synthesized through collection inference disqualifies the
        // concept just like a declared one, so a re-dump of dumped output
        // is stable.
        if concept.broader.is_empty() && !synthesized_broader {
            self.graph.add_triple(
                self.scheme_subject(),
                Term::iri(skos_vocab::skos::HAS_TOP_CONCEPT),
                subject.clone(),
            );
        }
    }

    /// Walk the member_of chain: reverse member triples and core triples
    /// for directly containing collections, plus synthesized broader edges
    /// for every (transitive) containing collection that infers relations.
    /// Returns whether any broader edge was synthesized.
    fn emit_concept_memberships(
        &mut self,
        subject: &Term,
        concept: &Concept,
        diag: &mut Diagnostics,
    ) -> bool {
        let mut synthesized_broader = false;
        let mut visited: FxHashSet<String> = FxHashSet::default();
        let mut queue: Vec<(String, bool)> = concept
            .member_of
            .iter()
            .map(|id| (id.clone(), true))
            .collect();

        while let Some((collection_id, direct)) = queue.pop() {
            if !visited.insert(collection_id.clone()) {
                continue;
            }
            let Some(entity) = self.provider.get_by_id(&collection_id) else {
                diag.warn(Warning::UnresolvedReference {
                    id: collection_id,
                    relation: "member_of".to_string(),
                });
                continue;
            };
            let Some(collection) = entity.as_collection() else {
                continue;
            };

            let collection_subject = Term::iri(&collection.uri);
            if direct {
                self.graph.add_triple(
                    collection_subject.clone(),
                    Term::iri(skos_vocab::skos::MEMBER),
                    subject.clone(),
                );
                self.emit_entity_core(&collection_subject, entity);
            }
            if collection.infer_concept_relations {
                for superordinate in &collection.superordinates {
                    if let Some(object) = self.resolve(superordinate, "superOrdinate", diag) {
                        self.graph.add_triple(
                            subject.clone(),
                            Term::iri(skos_vocab::skos::BROADER),
                            object,
                        );
                        synthesized_broader = true;
                    }
                }
            }
            for ancestor in &collection.member_of {
                queue.push((ancestor.clone(), false));
            }
        }
        synthesized_broader
    }

    fn emit_collection(&mut self, subject: &Term, collection: &Collection, diag: &mut Diagnostics) {
        for member in &collection.members {
            if let Some(object) = self.resolve(member, "member", diag) {
                self.graph.add_triple(
                    subject.clone(),
                    Term::iri(skos_vocab::skos::MEMBER),
                    object,
                );
            }
        }
        for superordinate in &collection.superordinates {
            if let Some(object) = self.resolve(superordinate, "superOrdinate", diag) {
                self.graph.add_triple(
                    subject.clone(),
                    Term::iri(skos_vocab::iso_thes::SUPER_ORDINATE),
                    object,
                );
            }
        }

        if collection.infer_concept_relations {
            let mut members = Vec::new();
            let mut visited = FxHashSet::default();
            self.transitive_concept_members(collection, &mut visited, &mut members);
            for superordinate in &collection.superordinates {
                let Some(super_term) = self.resolve(superordinate, "superOrdinate", diag) else {
                    continue;
                };
                for member_uri in &members {
                    let member_term = Term::iri(member_uri);
                    self.graph.add_triple(
                        super_term.clone(),
                        Term::iri(skos_vocab::skos::NARROWER),
                        member_term.clone(),
                    );
                    self.graph.add_triple(
                        member_term,
                        Term::iri(skos_vocab::skos::BROADER),
                        super_term.clone(),
                    );
                }
            }
        }
    }

    /// URIs of every concept transitively contained in a collection,
    /// recursing through nested collections with a cycle guard
    fn transitive_concept_members(
        &self,
        collection: &Collection,
        visited: &mut FxHashSet<String>,
        out: &mut Vec<String>,
    ) {
        if !visited.insert(collection.id.clone()) {
            return;
        }
        for member in &collection.members {
            match self.provider.get_by_id(member) {
                Some(Entity::Concept(concept)) => out.push(concept.uri.clone()),
                Some(Entity::Collection(nested)) => {
                    self.transitive_concept_members(nested, visited, out);
                }
                None => {}
            }
        }
    }
}

fn local_name(predicate: &str) -> &str {
    predicate
        .rsplit(['#', '/'])
        .next()
        .unwrap_or(predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Metadata;

    fn concept(graph: &mut Graph, uri: &str) -> Term {
        let subject = Term::iri(uri);
        graph.add_triple(
            subject.clone(),
            Term::iri(skos_vocab::rdf::TYPE),
            Term::iri(skos_vocab::skos::CONCEPT),
        );
        subject
    }

    #[test]
    fn identifier_emitted_only_when_distinct_from_uri() {
        let mut graph = Graph::new();
        let with_id = concept(&mut graph, "http://example.org/1");
        graph.add_triple(
            with_id,
            Term::iri(skos_vocab::dcterms::IDENTIFIER),
            Term::string("1"),
        );
        concept(&mut graph, "http://example.org/2");

        let provider = RdfProvider::from_graph(Metadata::with_id("T"), &graph).unwrap();
        let mut diag = Diagnostics::new();
        let dumped = dump(&provider, &mut diag);

        let identifier = Term::iri(skos_vocab::dcterms::IDENTIFIER);
        assert!(dumped.contains(
            Some(&Term::iri("http://example.org/1")),
            Some(&identifier),
            Some(&Term::string("1")),
        ));
        assert!(!dumped.contains(
            Some(&Term::iri("http://example.org/2")),
            Some(&identifier),
            None,
        ));
    }

    #[test]
    fn dangling_reference_is_skipped_with_warning() {
        let mut graph = Graph::new();
        let subject = concept(&mut graph, "http://example.org/1");
        graph.add_triple(
            subject,
            Term::iri(skos_vocab::skos::BROADER),
            Term::iri("http://example.org/absent"),
        );

        let provider = RdfProvider::from_graph(Metadata::with_id("T"), &graph).unwrap();
        let mut diag = Diagnostics::new();
        let dumped = dump(&provider, &mut diag);

        assert!(!dumped.contains(None, Some(&Term::iri(skos_vocab::skos::BROADER)), None));
        assert!(diag.warnings().iter().any(|w| matches!(
            w,
            Warning::UnresolvedReference { id, .. } if id == "http://example.org/absent"
        )));
    }

    #[test]
    fn sort_label_degrades_to_hidden_label() {
        let mut graph = Graph::new();
        let subject = concept(&mut graph, "http://example.org/1");
        graph.add_triple(
            subject,
            Term::iri(skos_vocab::skos::SORT_LABEL),
            Term::lang_string("larch", "en"),
        );

        let provider = RdfProvider::from_graph(Metadata::with_id("T"), &graph).unwrap();
        let mut diag = Diagnostics::new();
        let dumped = dump(&provider, &mut diag);

        assert!(dumped.contains(
            Some(&Term::iri("http://example.org/1")),
            Some(&Term::iri(skos_vocab::skos::HIDDEN_LABEL)),
            Some(&Term::lang_string("larch", "en")),
        ));
        assert!(!dumped.contains(None, Some(&Term::iri(skos_vocab::skos::SORT_LABEL)), None));
    }

    #[test]
    fn scheme_triples_always_present() {
        let metadata = Metadata {
            id: "T".into(),
            conceptscheme_id: None,
            dataset: Some(crate::provider::Dataset {
                uri: "http://example.org/dataset".into(),
            }),
        };
        let provider = RdfProvider::from_graph(metadata, &Graph::new()).unwrap();
        let mut diag = Diagnostics::new();
        let dumped = dump(&provider, &mut diag);

        let scheme = Term::iri("urn:x-skosprovider:T");
        assert!(dumped.contains(
            Some(&scheme),
            Some(&Term::iri(skos_vocab::rdf::TYPE)),
            Some(&Term::iri(skos_vocab::skos::CONCEPT_SCHEME)),
        ));
        assert!(dumped.contains(
            Some(&scheme),
            Some(&Term::iri(skos_vocab::dcterms::IDENTIFIER)),
            Some(&Term::string("T")),
        ));
        assert!(dumped.contains(
            Some(&scheme),
            Some(&Term::iri(skos_vocab::void::IN_DATASET)),
            Some(&Term::iri("http://example.org/dataset")),
        ));
    }

    #[test]
    fn top_concepts_are_linked_from_the_scheme() {
        let mut graph = Graph::new();
        let top = concept(&mut graph, "http://example.org/top");
        let child = concept(&mut graph, "http://example.org/child");
        graph.add_triple(child, Term::iri(skos_vocab::skos::BROADER), top);

        let provider = RdfProvider::from_graph(Metadata::with_id("T"), &graph).unwrap();
        let mut diag = Diagnostics::new();
        let dumped = dump(&provider, &mut diag);

        let has_top = Term::iri(skos_vocab::skos::HAS_TOP_CONCEPT);
        assert!(dumped.contains(None, Some(&has_top), Some(&Term::iri("http://example.org/top"))));
        assert!(!dumped.contains(None, Some(&has_top), Some(&Term::iri("http://example.org/child"))));
    }
}
