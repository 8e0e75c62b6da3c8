//! Concept scheme discovery and disambiguation
//!
//! A load belongs to exactly one concept scheme. The graph may declare
//! zero, one, or many scheme nodes; this module turns that into a single
//! [`ConceptScheme`] or a fatal [`SkosError::AmbiguousScheme`].

use crate::diagnostics::Diagnostics;
use crate::error::{Result, SkosError};
use crate::extract::{read_labels, read_notes, read_sources};
use crate::literal::{scrub_language, to_text};
use crate::model::ConceptScheme;
use skos_graph_ir::{Graph, Term};

/// URN namespace for schemes synthesized when the graph declares none
///
/// The generated URI is a pure function of the requested id, so repeated
/// loads of the same vocabulary produce the same scheme URI.
pub const SYNTHESIZED_URN_NAMESPACE: &str = "urn:x-skosprovider:";

/// Outcome of scheme resolution
#[derive(Debug, Clone)]
pub struct SchemeResolution {
    /// The resolved (or synthesized) scheme
    pub scheme: ConceptScheme,
    /// The graph node the scheme was read from, if it was discovered
    pub subject: Option<Term>,
    /// Whether the builder must filter members by in-scheme membership
    ///
    /// Active when the caller supplied an explicit scheme URI; discovery
    /// of a single scheme accepts every typed node.
    pub filter_by_scheme: bool,
}

/// Determine the concept scheme a load belongs to
///
/// An explicitly supplied scheme URI bypasses discovery entirely: it is
/// used verbatim (with the discovered node's metadata when one matches)
/// and activates in-scheme filtering. Without one:
/// - zero scheme nodes: synthesize `urn:x-skosprovider:{requested_id}`
/// - exactly one: use it, with labels/notes/sources/languages populated
/// - more than one: fail listing every candidate URI
pub fn resolve_scheme(
    graph: &Graph,
    requested_id: &str,
    explicit_scheme_uri: Option<&str>,
    diag: &mut Diagnostics,
) -> Result<SchemeResolution> {
    let rdf_type = Term::iri(skos_vocab::rdf::TYPE);
    let scheme_class = Term::iri(skos_vocab::skos::CONCEPT_SCHEME);
    let candidates = graph.subjects_with(&rdf_type, &scheme_class);

    if let Some(uri) = explicit_scheme_uri {
        let chosen = candidates
            .iter()
            .find(|term| term.as_iri() == Some(uri))
            .copied();
        let scheme = match chosen {
            Some(node) => read_scheme(graph, node, diag)?,
            None => ConceptScheme::new(uri),
        };
        return Ok(SchemeResolution {
            scheme,
            subject: chosen.cloned(),
            filter_by_scheme: true,
        });
    }

    let chosen = match candidates.len() {
        0 => {
            let uri = format!("{SYNTHESIZED_URN_NAMESPACE}{requested_id}");
            return Ok(SchemeResolution {
                scheme: ConceptScheme::new(uri),
                subject: None,
                filter_by_scheme: false,
            });
        }
        1 => candidates[0],
        _ => return Err(ambiguous(&candidates)),
    };

    let scheme = read_scheme(graph, chosen, diag)?;
    Ok(SchemeResolution {
        scheme,
        subject: Some(chosen.clone()),
        filter_by_scheme: false,
    })
}

fn ambiguous(candidates: &[&Term]) -> SkosError {
    let mut uris: Vec<String> = candidates.iter().map(|t| t.to_string()).collect();
    uris.sort();
    SkosError::AmbiguousScheme { candidates: uris }
}

/// Read a discovered scheme node's own metadata
fn read_scheme(graph: &Graph, subject: &Term, diag: &mut Diagnostics) -> Result<ConceptScheme> {
    let mut scheme = ConceptScheme::new(subject.to_string());
    scheme.labels = read_labels(graph, subject, diag);
    scheme.notes = read_notes(graph, subject, diag)?;
    scheme.sources = read_sources(graph, subject);

    let language = Term::iri(skos_vocab::dcterms::LANGUAGE);
    for object in graph.objects(subject, &language) {
        let tag = scrub_language(&to_text(object), diag);
        scheme.add_language(tag);
    }
    Ok(scheme)
}
