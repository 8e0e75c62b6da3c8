//! Per-operation diagnostics sink
//!
//! Non-fatal conditions are accumulated into an explicit [`Diagnostics`]
//! value owned by the running operation, not just emitted to ambient
//! logging, so callers and tests can assert on them deterministically.
//! Every recorded warning is mirrored to `tracing::warn!`.

use serde::{Deserialize, Serialize};

/// A non-fatal condition observed during a load or dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Warning {
    /// A language tag failed IANA validation and was replaced by `"und"`
    InvalidLanguageTag {
        /// The tag as found in the source
        tag: String,
    },
    /// A reference failed to resolve through `get_by_id` at dump time
    /// and the triple was skipped
    UnresolvedReference {
        /// The id that did not resolve
        id: String,
        /// The relation being emitted when resolution failed
        relation: String,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::InvalidLanguageTag { tag } => {
                write!(f, "invalid language tag {tag:?}, substituted \"und\"")
            }
            Warning::UnresolvedReference { id, relation } => {
                write!(f, "unresolvable {relation} reference {id:?}, triple skipped")
            }
        }
    }
}

/// Accumulator for warnings raised by one load or dump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning, mirroring it to the `tracing` subscriber
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(warning = %warning, "skos mapping warning");
        self.warnings.push(warning);
    }

    /// All warnings recorded so far, in order
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Merge another sink's warnings into this one
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Shared in-memory log sink for asserting on emitted lines
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn warnings_are_mirrored_to_tracing() {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut diag = Diagnostics::new();
            diag.warn(Warning::InvalidLanguageTag {
                tag: "not-a-tag".into(),
            });
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("invalid language tag"), "got: {output}");
        assert!(output.contains("not-a-tag"));
    }

    #[test]
    fn warnings_serialize_for_reporting() {
        let warning = Warning::UnresolvedReference {
            id: "7".into(),
            relation: "broader".into(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        let back: Warning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, warning);
    }

    #[test]
    fn warnings_accumulate_in_order() {
        let mut diag = Diagnostics::new();
        assert!(diag.is_empty());
        diag.warn(Warning::InvalidLanguageTag {
            tag: "xx-!!".into(),
        });
        diag.warn(Warning::UnresolvedReference {
            id: "7".into(),
            relation: "broader".into(),
        });
        assert_eq!(diag.warnings().len(), 2);
        assert!(matches!(
            diag.warnings()[0],
            Warning::InvalidLanguageTag { .. }
        ));
    }
}
