//! The typed SKOS vocabulary model
//!
//! Entities are constructed once during a load pass and treated as an
//! immutable snapshot afterwards. Relations between entities are stored as
//! plain identifier strings, never as pointers: a stored id may dangle, and
//! resolving it to a live entity is always an explicit
//! [`crate::RdfProvider::get_by_id`] lookup by whichever component needs it.

use crate::error::{Result, SkosError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The fixed set of label types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LabelType {
    /// skos:prefLabel - at most one per language per entity (caller-enforced)
    PrefLabel,
    /// skos:altLabel
    AltLabel,
    /// skos:hiddenLabel
    HiddenLabel,
    /// Sorting hint, read from the graph but never written back as-is
    SortLabel,
}

impl LabelType {
    /// All label types, in read order
    pub const ALL: [LabelType; 4] = [
        LabelType::PrefLabel,
        LabelType::AltLabel,
        LabelType::HiddenLabel,
        LabelType::SortLabel,
    ];

    /// The camelCase name used in SKOS predicate local names
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelType::PrefLabel => "prefLabel",
            LabelType::AltLabel => "altLabel",
            LabelType::HiddenLabel => "hiddenLabel",
            LabelType::SortLabel => "sortLabel",
        }
    }
}

impl FromStr for LabelType {
    type Err = SkosError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "prefLabel" => Ok(LabelType::PrefLabel),
            "altLabel" => Ok(LabelType::AltLabel),
            "hiddenLabel" => Ok(LabelType::HiddenLabel),
            "sortLabel" => Ok(LabelType::SortLabel),
            other => Err(SkosError::InvalidEnumValue {
                kind: "label",
                value: other.to_string(),
            }),
        }
    }
}

/// The fixed set of documentation note types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NoteType {
    /// skos:definition
    Definition,
    /// skos:scopeNote
    ScopeNote,
    /// skos:example
    Example,
    /// skos:historyNote
    HistoryNote,
    /// skos:editorialNote
    EditorialNote,
    /// skos:changeNote
    ChangeNote,
}

impl NoteType {
    /// All note types, in read order
    pub const ALL: [NoteType; 6] = [
        NoteType::Definition,
        NoteType::ScopeNote,
        NoteType::Example,
        NoteType::HistoryNote,
        NoteType::EditorialNote,
        NoteType::ChangeNote,
    ];

    /// The camelCase name used in SKOS predicate local names
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Definition => "definition",
            NoteType::ScopeNote => "scopeNote",
            NoteType::Example => "example",
            NoteType::HistoryNote => "historyNote",
            NoteType::EditorialNote => "editorialNote",
            NoteType::ChangeNote => "changeNote",
        }
    }
}

impl FromStr for NoteType {
    type Err = SkosError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "definition" => Ok(NoteType::Definition),
            "scopeNote" => Ok(NoteType::ScopeNote),
            "example" => Ok(NoteType::Example),
            "historyNote" => Ok(NoteType::HistoryNote),
            "editorialNote" => Ok(NoteType::EditorialNote),
            "changeNote" => Ok(NoteType::ChangeNote),
            other => Err(SkosError::InvalidEnumValue {
                kind: "note",
                value: other.to_string(),
            }),
        }
    }
}

/// Cross-vocabulary mapping relation types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchType {
    /// skos:exactMatch
    Exact,
    /// skos:closeMatch
    Close,
    /// skos:broadMatch
    Broad,
    /// skos:narrowMatch
    Narrow,
    /// skos:relatedMatch
    Related,
}

impl MatchType {
    /// All match types, in read order
    pub const ALL: [MatchType; 5] = [
        MatchType::Exact,
        MatchType::Close,
        MatchType::Broad,
        MatchType::Narrow,
        MatchType::Related,
    ];

    /// The local name of the SKOS mapping predicate (`{type}Match`)
    pub fn predicate_local(&self) -> &'static str {
        match self {
            MatchType::Exact => "exactMatch",
            MatchType::Close => "closeMatch",
            MatchType::Broad => "broadMatch",
            MatchType::Narrow => "narrowMatch",
            MatchType::Related => "relatedMatch",
        }
    }
}

/// Whether a text carries structure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Markup {
    /// Plain text
    #[default]
    None,
    /// An HTML fragment (serialized XML, see the literal module)
    Html,
}

/// A human-readable label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The label text
    pub text: String,
    /// Label type
    pub kind: LabelType,
    /// IANA language tag, `None` for untagged literals
    pub language: Option<String>,
}

impl Label {
    /// Create a label with an already-typed kind
    pub fn new(text: impl Into<String>, kind: LabelType, language: Option<String>) -> Self {
        Label {
            text: text.into(),
            kind,
            language,
        }
    }

    /// Create a label from a type name, failing fast on anything outside
    /// the fixed enumeration
    pub fn with_type(
        text: impl Into<String>,
        kind: &str,
        language: Option<String>,
    ) -> Result<Self> {
        Ok(Self::new(text, kind.parse()?, language))
    }
}

/// A documentation note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// The note text; a serialized fragment when `markup` is HTML
    pub text: String,
    /// Note type
    pub kind: NoteType,
    /// IANA language tag (`"und"` when the source carried none)
    pub language: Option<String>,
    /// Whether `text` is an HTML fragment
    pub markup: Markup,
}

impl Note {
    /// Create a note with an already-typed kind
    pub fn new(
        text: impl Into<String>,
        kind: NoteType,
        language: Option<String>,
        markup: Markup,
    ) -> Self {
        Note {
            text: text.into(),
            kind,
            language,
            markup,
        }
    }

    /// Create a note from a type name, failing fast on anything outside
    /// the fixed enumeration
    pub fn with_type(
        text: impl Into<String>,
        kind: &str,
        language: Option<String>,
        markup: Markup,
    ) -> Result<Self> {
        Ok(Self::new(text, kind.parse()?, language, markup))
    }
}

/// A bibliographic source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// The citation text
    pub citation: String,
    /// Whether `citation` is an HTML fragment
    pub markup: Markup,
}

impl Source {
    /// Create a source
    pub fn new(citation: impl Into<String>, markup: Markup) -> Self {
        Source {
            citation: citation.into(),
            markup,
        }
    }
}

/// The top-level vocabulary owning concepts and collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptScheme {
    /// Scheme IRI, primary key
    pub uri: String,
    /// Labels of the scheme itself
    pub labels: Vec<Label>,
    /// Notes of the scheme itself
    pub notes: Vec<Note>,
    /// Sources of the scheme itself
    pub sources: Vec<Source>,
    /// Language tags present in the vocabulary, deduplicated, in first-seen
    /// order
    pub languages: Vec<String>,
}

impl ConceptScheme {
    /// Create a bare scheme for a URI
    pub fn new(uri: impl Into<String>) -> Self {
        ConceptScheme {
            uri: uri.into(),
            ..Default::default()
        }
    }

    /// Record a language tag, keeping the list deduplicated
    pub fn add_language(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.languages.contains(&tag) {
            self.languages.push(tag);
        }
    }
}

/// A single vocabulary term
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// Logical id, unique within the owning scheme
    pub id: String,
    /// Node IRI (or blank node rendering)
    pub uri: String,
    /// Labels
    pub labels: Vec<Label>,
    /// Notes
    pub notes: Vec<Note>,
    /// Sources
    pub sources: Vec<Source>,
    /// Ids of broader concepts (may dangle)
    pub broader: Vec<String>,
    /// Ids of narrower concepts (may dangle)
    pub narrower: Vec<String>,
    /// Ids of related concepts (may dangle)
    pub related: Vec<String>,
    /// Ids of collections this concept is a member of (derived, back-filled)
    pub member_of: Vec<String>,
    /// Ids of subordinate array collections
    pub subordinate_arrays: Vec<String>,
    /// Cross-vocabulary matches, external IRIs per match type
    pub matches: BTreeMap<MatchType, Vec<String>>,
}

/// A grouping of concepts and/or other collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Logical id, unique within the owning scheme
    pub id: String,
    /// Node IRI (or blank node rendering)
    pub uri: String,
    /// Labels
    pub labels: Vec<Label>,
    /// Notes
    pub notes: Vec<Note>,
    /// Sources
    pub sources: Vec<Source>,
    /// Ids of member concepts or collections (may dangle)
    pub members: Vec<String>,
    /// Ids of collections this collection is a member of (derived)
    pub member_of: Vec<String>,
    /// Ids of superordinate concepts
    pub superordinates: Vec<String>,
    /// Whether the superordinate/member structure implies direct
    /// broader/narrower relations (derived, see the builder)
    pub infer_concept_relations: bool,
}

/// A loaded vocabulary entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    /// A concept
    Concept(Concept),
    /// A collection
    Collection(Collection),
}

impl Entity {
    /// Logical id
    pub fn id(&self) -> &str {
        match self {
            Entity::Concept(c) => &c.id,
            Entity::Collection(c) => &c.id,
        }
    }

    /// Node IRI
    pub fn uri(&self) -> &str {
        match self {
            Entity::Concept(c) => &c.uri,
            Entity::Collection(c) => &c.uri,
        }
    }

    /// All labels
    pub fn labels(&self) -> &[Label] {
        match self {
            Entity::Concept(c) => &c.labels,
            Entity::Collection(c) => &c.labels,
        }
    }

    /// All notes
    pub fn notes(&self) -> &[Note] {
        match self {
            Entity::Concept(c) => &c.notes,
            Entity::Collection(c) => &c.notes,
        }
    }

    /// All sources
    pub fn sources(&self) -> &[Source] {
        match self {
            Entity::Concept(c) => &c.sources,
            Entity::Collection(c) => &c.sources,
        }
    }

    /// Collections this entity is a member of
    pub fn member_of(&self) -> &[String] {
        match self {
            Entity::Concept(c) => &c.member_of,
            Entity::Collection(c) => &c.member_of,
        }
    }

    /// Best display label: first prefLabel, else first altLabel, else any
    pub fn label(&self) -> Option<&Label> {
        let labels = self.labels();
        labels
            .iter()
            .find(|l| l.kind == LabelType::PrefLabel)
            .or_else(|| labels.iter().find(|l| l.kind == LabelType::AltLabel))
            .or_else(|| labels.first())
    }

    /// Borrow as concept, if one
    pub fn as_concept(&self) -> Option<&Concept> {
        match self {
            Entity::Concept(c) => Some(c),
            Entity::Collection(_) => None,
        }
    }

    /// Borrow as collection, if one
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Entity::Concept(_) => None,
            Entity::Collection(c) => Some(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_type_parses_valid_names() {
        assert_eq!("prefLabel".parse::<LabelType>().unwrap(), LabelType::PrefLabel);
        assert_eq!("sortLabel".parse::<LabelType>().unwrap(), LabelType::SortLabel);
    }

    #[test]
    fn invalid_label_type_is_rejected_at_construction() {
        let err = Label::with_type("Larch", "notalabel", None).unwrap_err();
        assert_eq!(
            err,
            SkosError::InvalidEnumValue {
                kind: "label",
                value: "notalabel".to_string()
            }
        );
    }

    #[test]
    fn invalid_note_type_is_rejected_at_construction() {
        let err = Note::with_type("...", "remark", None, Markup::None).unwrap_err();
        assert!(matches!(err, SkosError::InvalidEnumValue { kind: "note", .. }));
    }

    #[test]
    fn scheme_languages_deduplicate() {
        let mut scheme = ConceptScheme::new("urn:x-skosprovider:TREES");
        scheme.add_language("en");
        scheme.add_language("nl");
        scheme.add_language("en");
        assert_eq!(scheme.languages, vec!["en", "nl"]);
    }

    #[test]
    fn best_label_prefers_pref_label() {
        let entity = Entity::Concept(Concept {
            id: "1".into(),
            uri: "http://example.org/1".into(),
            labels: vec![
                Label::new("hidden", LabelType::HiddenLabel, None),
                Label::new("alt", LabelType::AltLabel, None),
                Label::new("pref", LabelType::PrefLabel, None),
            ],
            ..Default::default()
        });
        assert_eq!(entity.label().unwrap().text, "pref");
    }
}
