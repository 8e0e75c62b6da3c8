//! Dumping a provider back to triples

use skos_graph_ir::{Datatype, Graph, Term};
use skos_provider::dump::{dump, dump_subset};
use skos_provider::{Diagnostics, Metadata, RdfProvider, Warning};

fn typed(graph: &mut Graph, uri: &str, class: &str) -> Term {
    let subject = Term::iri(uri);
    graph.add_triple(
        subject.clone(),
        Term::iri(skos_vocab::rdf::TYPE),
        Term::iri(class),
    );
    subject
}

fn identified(graph: &mut Graph, uri: &str, class: &str, id: &str) -> Term {
    let subject = typed(graph, uri, class);
    graph.add_triple(
        subject.clone(),
        Term::iri(skos_vocab::dcterms::IDENTIFIER),
        Term::string(id),
    );
    subject
}

fn trees_fixture() -> Graph {
    let mut graph = Graph::new();
    let larch = identified(&mut graph, "http://example.org/larch", skos_vocab::skos::CONCEPT, "1");
    let species = identified(&mut graph, "http://example.org/species", skos_vocab::skos::CONCEPT, "3");
    graph.add_triple(larch.clone(), Term::iri(skos_vocab::skos::BROADER), species.clone());
    graph.add_triple(species, Term::iri(skos_vocab::skos::NARROWER), larch);
    let collection = identified(
        &mut graph,
        "http://example.org/deciduous",
        skos_vocab::skos::COLLECTION,
        "deciduous",
    );
    graph.add_triple(
        collection,
        Term::iri(skos_vocab::skos::MEMBER),
        Term::iri("http://example.org/larch"),
    );
    graph
}

#[test]
fn partial_dump_over_every_id_equals_full_dump() {
    let provider = RdfProvider::from_graph(Metadata::with_id("TREES"), &trees_fixture()).unwrap();

    let mut diag = Diagnostics::new();
    let full = dump(&provider, &mut diag);

    let ids: Vec<&str> = provider.entities().iter().map(|e| e.id()).collect();
    let mut diag = Diagnostics::new();
    let partial = dump_subset(&provider, Some(&ids), &mut diag);

    assert_eq!(full.to_ntriples(), partial.to_ntriples());
}

#[test]
fn subset_dump_carries_the_membership_closure() {
    let provider = RdfProvider::from_graph(Metadata::with_id("TREES"), &trees_fixture()).unwrap();
    let mut diag = Diagnostics::new();
    let dumped = dump_subset(&provider, Some(&["1"]), &mut diag);

    let collection = Term::iri("http://example.org/deciduous");
    // the containing collection is represented even though it was not asked for
    assert!(dumped.contains(
        Some(&collection),
        Some(&Term::iri(skos_vocab::rdf::TYPE)),
        Some(&Term::iri(skos_vocab::skos::COLLECTION)),
    ));
    assert!(dumped.contains(
        Some(&collection),
        Some(&Term::iri(skos_vocab::skos::MEMBER)),
        Some(&Term::iri("http://example.org/larch")),
    ));
    // but entities outside the subset are not pulled in wholesale
    assert!(!dumped.contains(
        Some(&Term::iri("http://example.org/species")),
        Some(&Term::iri(skos_vocab::rdf::TYPE)),
        None,
    ));
}

#[test]
fn unknown_subset_id_warns_and_is_skipped() {
    let provider = RdfProvider::from_graph(Metadata::with_id("TREES"), &trees_fixture()).unwrap();
    let mut diag = Diagnostics::new();
    let dumped = dump_subset(&provider, Some(&["nosuchthing"]), &mut diag);

    assert!(diag.warnings().iter().any(|w| matches!(
        w,
        Warning::UnresolvedReference { id, .. } if id == "nosuchthing"
    )));
    // scheme triples are still present
    assert!(dumped.contains(
        None,
        Some(&Term::iri(skos_vocab::rdf::TYPE)),
        Some(&Term::iri(skos_vocab::skos::CONCEPT_SCHEME)),
    ));
}

#[test]
fn plain_note_without_language_dumps_as_undetermined() {
    let mut graph = Graph::new();
    let subject = identified(&mut graph, "http://example.org/1", skos_vocab::skos::CONCEPT, "1");
    graph.add_triple(
        subject,
        Term::iri(skos_vocab::skos::SCOPE_NOTE),
        Term::string("A plain note."),
    );

    let provider = RdfProvider::from_graph(Metadata::with_id("X"), &graph).unwrap();
    let mut diag = Diagnostics::new();
    let dumped = dump(&provider, &mut diag);

    assert!(dumped.contains(
        Some(&Term::iri("http://example.org/1")),
        Some(&Term::iri(skos_vocab::skos::SCOPE_NOTE)),
        Some(&Term::lang_string("A plain note.", "und")),
    ));
}

#[test]
fn html_note_dumps_with_language_wrapped_into_the_fragment() {
    let mut graph = Graph::new();
    let subject = identified(&mut graph, "http://example.org/1", skos_vocab::skos::CONCEPT, "1");
    graph.add_triple(
        subject,
        Term::iri(skos_vocab::skos::DEFINITION),
        Term::typed("<p xml:lang=\"en\">A tree.</p>", Datatype::rdf_html()),
    );

    let provider = RdfProvider::from_graph(Metadata::with_id("X"), &graph).unwrap();
    let mut diag = Diagnostics::new();
    let dumped = dump(&provider, &mut diag);

    assert!(dumped.contains(
        Some(&Term::iri("http://example.org/1")),
        Some(&Term::iri(skos_vocab::skos::DEFINITION)),
        Some(&Term::typed("<p xml:lang=\"en\">A tree.</p>", Datatype::rdf_html())),
    ));
}

#[test]
fn sources_dump_through_fresh_blank_nodes() {
    let mut graph = Graph::new();
    let subject = identified(&mut graph, "http://example.org/1", skos_vocab::skos::CONCEPT, "1");
    let node = Term::blank("orig");
    graph.add_triple(subject, Term::iri(skos_vocab::dcterms::SOURCE), node.clone());
    graph.add_triple(
        node,
        Term::iri(skos_vocab::dcterms::BIBLIOGRAPHIC_CITATION),
        Term::string("My sources, 1973."),
    );

    let provider = RdfProvider::from_graph(Metadata::with_id("X"), &graph).unwrap();
    let mut diag = Diagnostics::new();
    let dumped = dump(&provider, &mut diag);

    let source = Term::iri(skos_vocab::dcterms::SOURCE);
    let citation = Term::iri(skos_vocab::dcterms::BIBLIOGRAPHIC_CITATION);
    let node = dumped
        .matching(Some(&Term::iri("http://example.org/1")), Some(&source), None)
        .map(|t| t.o.clone())
        .next()
        .expect("source link dumped");
    assert!(node.as_blank().is_some());
    assert!(dumped.contains(
        Some(&node),
        Some(&citation),
        Some(&Term::string("My sources, 1973.")),
    ));
}

#[test]
fn inferring_collection_synthesizes_hierarchy_edges() {
    let mut graph = Graph::new();
    let parent = identified(&mut graph, "http://example.org/parent", skos_vocab::skos::CONCEPT, "p");
    let collection = identified(
        &mut graph,
        "http://example.org/col",
        skos_vocab::skos::COLLECTION,
        "col",
    );
    graph.add_triple(
        collection.clone(),
        Term::iri(skos_vocab::iso_thes::SUPER_ORDINATE),
        parent.clone(),
    );
    let linked = identified(&mut graph, "http://example.org/linked", skos_vocab::skos::CONCEPT, "a");
    graph.add_triple(linked.clone(), Term::iri(skos_vocab::skos::BROADER), parent);
    graph.add_triple(collection.clone(), Term::iri(skos_vocab::skos::MEMBER), linked);
    // second member without a declared broader edge
    let loose = identified(&mut graph, "http://example.org/loose", skos_vocab::skos::CONCEPT, "b");
    graph.add_triple(collection, Term::iri(skos_vocab::skos::MEMBER), loose);

    let provider = RdfProvider::from_graph(Metadata::with_id("X"), &graph).unwrap();
    let mut diag = Diagnostics::new();
    let dumped = dump(&provider, &mut diag);

    let broader = Term::iri(skos_vocab::skos::BROADER);
    let narrower = Term::iri(skos_vocab::skos::NARROWER);
    let parent = Term::iri("http://example.org/parent");
    for member in ["http://example.org/linked", "http://example.org/loose"] {
        let member = Term::iri(member);
        assert!(dumped.contains(Some(&member), Some(&broader), Some(&parent)));
        assert!(dumped.contains(Some(&parent), Some(&narrower), Some(&member)));
    }
    // a member with only an inferred broader edge is not a top concept
    assert!(!dumped.contains(
        None,
        Some(&Term::iri(skos_vocab::skos::HAS_TOP_CONCEPT)),
        Some(&Term::iri("http://example.org/loose")),
    ));
}
