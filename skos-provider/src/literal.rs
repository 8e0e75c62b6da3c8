//! Literal and markup normalization
//!
//! Converts raw literal terms to text, validates language tags, and wraps or
//! unwraps HTML-marked-up fragments. Fragments are handled as well-formed
//! XML: they are parsed and re-serialized through `quick-xml` events, and a
//! fragment that does not parse is a [`SkosError::Decode`] — never silent
//! mojibake.
//!
//! The language attribute of an HTML note travels *outside* the fragment in
//! the model (on the [`crate::Note`]) and *inside* it on the wire (as an
//! `xml:lang` attribute). [`read_markup`] strips it on the way in,
//! [`add_lang_to_html`] re-applies it on the way out.

use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Result, SkosError};
use crate::model::Markup;
use language_tags::LanguageTag;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use skos_graph_ir::Term;

/// Sentinel tag for undetermined language
pub const UNDETERMINED: &str = "und";

/// Decode a term to text
///
/// Literals yield their lexical form, IRIs the IRI string, blank nodes the
/// `_:label` rendering. Encoding validity is guaranteed by the IR (terms
/// hold UTF-8 by construction), so this cannot fail; decode errors surface
/// from fragment parsing instead.
pub fn to_text(term: &Term) -> String {
    match term {
        Term::Literal { lexical, .. } => lexical.to_string(),
        other => other.to_string(),
    }
}

/// Validate a language tag against the IANA registry
///
/// Returns the tag unchanged when it is valid; otherwise records a warning
/// and returns `"und"`. Never fails.
pub fn scrub_language(tag: &str, diag: &mut Diagnostics) -> String {
    match LanguageTag::parse(tag) {
        Ok(parsed) if parsed.is_valid() && extensions_registered(&parsed) => tag.to_string(),
        _ => {
            diag.warn(Warning::InvalidLanguageTag {
                tag: tag.to_string(),
            });
            UNDETERMINED.to_string()
        }
    }
}

/// Whether every extension singleton in the tag has a registered extension
///
/// `is_valid` checks language/script/region/variant subtags against the
/// registry but accepts any well-formed singleton, so `not-a-tag` would
/// pass (`not` is a real ISO 639-3 code, `a-tag` a phantom extension).
/// Only `u` (RFC 6067) and `t` (RFC 6497) are registered.
fn extensions_registered(tag: &LanguageTag) -> bool {
    tag.extension_subtags()
        .all(|(singleton, _)| matches!(singleton.to_ascii_lowercase(), 't' | 'u'))
}

/// Language of an optionally-tagged literal: `None` maps to `"und"`,
/// anything else is scrubbed
pub fn extract_language(tag: Option<&str>, diag: &mut Diagnostics) -> String {
    match tag {
        Some(tag) => scrub_language(tag, diag),
        None => UNDETERMINED.to_string(),
    }
}

/// Read a literal as (text, language, markup)
///
/// Plain literals pass through with their tag scrubbed. For `rdf:HTML`
/// literals the fragment is parsed, the outer element's language attribute
/// (if any) is extracted and stripped from the tree so the caller does not
/// duplicate it, and the remaining fragment is returned serialized.
pub fn read_markup(term: &Term, diag: &mut Diagnostics) -> Result<(String, String, Markup)> {
    match term.as_literal() {
        Some((lexical, datatype, _)) if datatype.is_html() => {
            let (fragment, lang) = strip_lang_from_html(lexical)?;
            let lang = match lang {
                Some(tag) => scrub_language(&tag, diag),
                None => UNDETERMINED.to_string(),
            };
            Ok((fragment, lang, Markup::Html))
        }
        Some((lexical, _, language)) => Ok((
            lexical.to_string(),
            extract_language(language, diag),
            Markup::None,
        )),
        None => Ok((
            to_text(term),
            UNDETERMINED.to_string(),
            Markup::None,
        )),
    }
}

/// Wrap a fragment with a language attribute, the exact inverse of
/// [`read_markup`]'s stripping
///
/// Policy, in order:
/// - `"und"` returns the input unchanged
/// - an empty fragment becomes `<div xml:lang="...">` with no content
/// - a lone text node is wrapped in a new `<div xml:lang="...">`
/// - a lone element gets `xml:lang` set in place, other attributes kept in
///   their original order
/// - multiple children are wrapped together in one enclosing `<div>`
///
/// The result is a serialized fragment with no XML declaration.
pub fn add_lang_to_html(html: &str, lang: &str) -> Result<String> {
    if lang == UNDETERMINED {
        return Ok(html.to_string());
    }

    let events = parse_fragment(html)?;
    let shape = fragment_shape(&events);

    let mut writer = Writer::new(Vec::new());
    match shape {
        FragmentShape::Empty => {
            let mut div = BytesStart::new("div");
            div.push_attribute(("xml:lang", lang));
            write_event(&mut writer, Event::Start(div))?;
            write_event(&mut writer, Event::End(BytesEnd::new("div")))?;
        }
        FragmentShape::SingleElement => {
            let rewritten = set_lang_on_start(&events[0], lang);
            write_event(&mut writer, rewritten)?;
            for event in &events[1..] {
                write_event(&mut writer, event.clone())?;
            }
        }
        FragmentShape::SingleText | FragmentShape::Multiple => {
            let mut div = BytesStart::new("div");
            div.push_attribute(("xml:lang", lang));
            write_event(&mut writer, Event::Start(div))?;
            for event in &events {
                write_event(&mut writer, event.clone())?;
            }
            write_event(&mut writer, Event::End(BytesEnd::new("div")))?;
        }
    }

    serialized(writer)
}

/// Top-level structure of a parsed fragment
#[derive(Debug, PartialEq, Eq)]
enum FragmentShape {
    Empty,
    SingleText,
    SingleElement,
    Multiple,
}

fn parse_fragment(html: &str) -> Result<Vec<Event<'static>>> {
    let mut reader = Reader::from_str(html);
    let mut events = Vec::new();
    // quick-xml reports mismatched end tags but reaches Eof without
    // complaint inside an unclosed element, so balance is tracked here
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            // Fragments carry no prologue; drop one if present
            Ok(Event::Decl(_)) | Ok(Event::DocType(_)) => continue,
            Ok(event) => {
                match &event {
                    Event::Start(_) => depth += 1,
                    Event::End(_) => {
                        depth = depth.checked_sub(1).ok_or_else(|| SkosError::Decode {
                            message: "closing tag without a matching opening tag".to_string(),
                        })?;
                    }
                    _ => {}
                }
                events.push(event.into_owned());
            }
            Err(e) => {
                return Err(SkosError::Decode {
                    message: e.to_string(),
                })
            }
        }
    }
    if depth != 0 {
        return Err(SkosError::Decode {
            message: "fragment truncated inside an open element".to_string(),
        });
    }
    Ok(events)
}

fn fragment_shape(events: &[Event<'static>]) -> FragmentShape {
    let mut depth = 0usize;
    let mut top_level_nodes = 0usize;
    let mut first_is_element = false;
    let mut first_is_text = false;

    for event in events {
        match event {
            Event::Start(_) => {
                if depth == 0 {
                    if top_level_nodes == 0 {
                        first_is_element = true;
                    }
                    top_level_nodes += 1;
                }
                depth += 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Empty(_) => {
                if depth == 0 {
                    if top_level_nodes == 0 {
                        first_is_element = true;
                    }
                    top_level_nodes += 1;
                }
            }
            Event::Text(_) | Event::CData(_) | Event::Comment(_) | Event::PI(_) => {
                if depth == 0 {
                    if top_level_nodes == 0 {
                        first_is_text = matches!(event, Event::Text(_));
                    }
                    top_level_nodes += 1;
                }
            }
            Event::Decl(_) | Event::DocType(_) | Event::Eof => {}
        }
    }

    match top_level_nodes {
        0 => FragmentShape::Empty,
        1 if first_is_element => FragmentShape::SingleElement,
        1 if first_is_text => FragmentShape::SingleText,
        1 => FragmentShape::Multiple, // lone comment/CData: treat as wrappable content
        _ => FragmentShape::Multiple,
    }
}

/// Rebuild a start (or empty) tag with `xml:lang` set, replacing any
/// existing language attribute and keeping the rest in original order
fn set_lang_on_start(event: &Event<'static>, lang: &str) -> Event<'static> {
    let rebuild = |start: &BytesStart<'static>| -> BytesStart<'static> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut rebuilt = BytesStart::new(name);
        for attr in start.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            if key == "xml:lang" || key == "lang" {
                continue;
            }
            let value = attr
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            rebuilt.push_attribute((key.as_str(), value.as_str()));
        }
        rebuilt.push_attribute(("xml:lang", lang));
        rebuilt
    };

    match event {
        Event::Start(start) => Event::Start(rebuild(start)),
        Event::Empty(start) => Event::Empty(rebuild(start)),
        other => other.clone(),
    }
}

/// Parse an `rdf:HTML` fragment, extracting and stripping the outer
/// language attribute when the fragment is a single element carrying one
///
/// Returns the (possibly rewritten) fragment and the raw attribute value.
/// A fragment with no outer language attribute is returned unchanged.
fn strip_lang_from_html(html: &str) -> Result<(String, Option<String>)> {
    let events = parse_fragment(html)?;
    if fragment_shape(&events) != FragmentShape::SingleElement {
        return Ok((html.to_string(), None));
    }

    let outer = match &events[0] {
        Event::Start(start) | Event::Empty(start) => start,
        _ => return Ok((html.to_string(), None)),
    };

    // xml:lang wins over a bare lang attribute
    let mut lang = None;
    for key in ["xml:lang", "lang"] {
        if let Some(attr) = outer
            .attributes()
            .flatten()
            .find(|a| a.key.as_ref() == key.as_bytes())
        {
            lang = attr.unescape_value().ok().map(|v| v.into_owned());
            if lang.is_some() {
                break;
            }
        }
    }
    let Some(lang) = lang else {
        return Ok((html.to_string(), None));
    };

    let mut writer = Writer::new(Vec::new());
    write_event(&mut writer, strip_lang_attrs(&events[0]))?;
    for event in &events[1..] {
        write_event(&mut writer, event.clone())?;
    }
    Ok((serialized(writer)?, Some(lang)))
}

/// Rebuild a start (or empty) tag without its language attributes
fn strip_lang_attrs(event: &Event<'static>) -> Event<'static> {
    let rebuild = |start: &BytesStart<'static>| -> BytesStart<'static> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut rebuilt = BytesStart::new(name);
        for attr in start.attributes().flatten() {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            if key == "xml:lang" || key == "lang" {
                continue;
            }
            let value = attr
                .unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).into_owned());
            rebuilt.push_attribute((key.as_str(), value.as_str()));
        }
        rebuilt
    };

    match event {
        Event::Start(start) => Event::Start(rebuild(start)),
        Event::Empty(start) => Event::Empty(rebuild(start)),
        other => other.clone(),
    }
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'static>) -> Result<()> {
    writer.write_event(event).map_err(|e| SkosError::Decode {
        message: e.to_string(),
    })
}

fn serialized(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner()).map_err(|e| SkosError::Decode {
        message: e.to_string(),
    })
}
