//! Shared label/note/source extraction from graph subjects
//!
//! Used both for scheme nodes and for concept/collection nodes. All literal
//! handling goes through the literal module so language scrubbing and
//! markup stripping behave identically everywhere.

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::literal::{read_markup, scrub_language, to_text};
use crate::model::{Label, LabelType, Markup, Note, NoteType, Source};
use skos_graph_ir::{Graph, Term};

pub(crate) fn label_predicate(kind: LabelType) -> Term {
    Term::iri(format!("{}{}", skos_vocab::skos::NAMESPACE, kind.as_str()))
}

pub(crate) fn note_predicate(kind: NoteType) -> Term {
    Term::iri(format!("{}{}", skos_vocab::skos::NAMESPACE, kind.as_str()))
}

/// Read all labels of a subject, every label type included
pub(crate) fn read_labels(graph: &Graph, subject: &Term, diag: &mut Diagnostics) -> Vec<Label> {
    let mut labels = Vec::new();
    for kind in LabelType::ALL {
        let predicate = label_predicate(kind);
        for object in graph.objects(subject, &predicate) {
            let language = object
                .as_literal()
                .and_then(|(_, _, lang)| lang)
                .map(|lang| scrub_language(lang, diag));
            labels.push(Label::new(to_text(object), kind, language));
        }
    }
    labels
}

/// Read all notes of a subject, passing each literal through markup reading
pub(crate) fn read_notes(
    graph: &Graph,
    subject: &Term,
    diag: &mut Diagnostics,
) -> Result<Vec<Note>> {
    let mut notes = Vec::new();
    for kind in NoteType::ALL {
        let predicate = note_predicate(kind);
        for object in graph.objects(subject, &predicate) {
            let (text, language, markup) = read_markup(object, diag)?;
            notes.push(Note::new(text, kind, Some(language), markup));
        }
    }
    Ok(notes)
}

/// Read all sources of a subject via the two-hop source -> citation pattern
pub(crate) fn read_sources(graph: &Graph, subject: &Term) -> Vec<Source> {
    let source = Term::iri(skos_vocab::dcterms::SOURCE);
    let citation = Term::iri(skos_vocab::dcterms::BIBLIOGRAPHIC_CITATION);

    let mut sources = Vec::new();
    for node in graph.objects(subject, &source) {
        for object in graph.objects(node, &citation) {
            let markup = match object.as_literal() {
                Some((_, datatype, _)) if datatype.is_html() => Markup::Html,
                _ => Markup::None,
            };
            sources.push(Source::new(to_text(object), markup));
        }
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use skos_graph_ir::Datatype;

    fn subject() -> Term {
        Term::iri("http://example.org/trees/larch")
    }

    #[test]
    fn labels_of_every_type_are_read() {
        let mut graph = Graph::new();
        graph.add_triple(
            subject(),
            Term::iri(skos_vocab::skos::PREF_LABEL),
            Term::lang_string("The Larch", "en"),
        );
        graph.add_triple(
            subject(),
            Term::iri(skos_vocab::skos::SORT_LABEL),
            Term::lang_string("larch", "en"),
        );

        let mut diag = Diagnostics::new();
        let labels = read_labels(&graph, &subject(), &mut diag);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].kind, LabelType::PrefLabel);
        assert_eq!(labels[1].kind, LabelType::SortLabel);
        assert_eq!(labels[0].language.as_deref(), Some("en"));
    }

    #[test]
    fn untagged_label_keeps_no_language() {
        let mut graph = Graph::new();
        graph.add_triple(
            subject(),
            Term::iri(skos_vocab::skos::ALT_LABEL),
            Term::string("Larix"),
        );
        let mut diag = Diagnostics::new();
        let labels = read_labels(&graph, &subject(), &mut diag);
        assert_eq!(labels[0].language, None);
    }

    #[test]
    fn html_note_is_stripped_and_typed() {
        let mut graph = Graph::new();
        graph.add_triple(
            subject(),
            Term::iri(skos_vocab::skos::DEFINITION),
            Term::typed("<p xml:lang=\"en\">A tree.</p>", Datatype::rdf_html()),
        );
        let mut diag = Diagnostics::new();
        let notes = read_notes(&graph, &subject(), &mut diag).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "<p>A tree.</p>");
        assert_eq!(notes[0].language.as_deref(), Some("en"));
        assert_eq!(notes[0].markup, Markup::Html);
        assert_eq!(notes[0].kind, NoteType::Definition);
    }

    #[test]
    fn sources_follow_the_two_hop_pattern() {
        let mut graph = Graph::new();
        let bnode = Term::blank("src0");
        graph.add_triple(subject(), Term::iri(skos_vocab::dcterms::SOURCE), bnode.clone());
        graph.add_triple(
            bnode,
            Term::iri(skos_vocab::dcterms::BIBLIOGRAPHIC_CITATION),
            Term::string("Flora of Trees, 1962."),
        );

        let sources = read_sources(&graph, &subject());
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].citation, "Flora of Trees, 1962.");
        assert_eq!(sources[0].markup, Markup::None);
    }
}
