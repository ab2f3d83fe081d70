//! JSON rendering for extracted help documents.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Indentation used by [`JsonFormat::Pretty`].
const PRETTY_INDENT: &[u8] = b"    ";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with four-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a document (or a report) to JSON.
///
/// Maps are ordered, so the same input always renders to the same bytes.
pub fn to_json<T>(value: &T, format: JsonFormat) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let bytes = match format {
        JsonFormat::Pretty => {
            let mut out = Vec::new();
            let mut serializer =
                Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(PRETTY_INDENT));
            value.serialize(&mut serializer).map(|_| out)
        }
        JsonFormat::Compact => serde_json::to_vec(value),
    }
    .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| Error::Render(format!("JSON is not UTF-8: {}", e)))
}
