use camino::Utf8Path;
use serde_json::Value;

/// Decoder selected from a file's extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.yaml`, `.yml`, and `.json`. JSON is decoded as YAML, which accepts it.
    Yaml,
}

impl DocumentFormat {
    /// Pick a decoder by extension (case-insensitive). `None` when unsupported.
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let ext = path.extension()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" | "json" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

/// Decode one segment into a generic value.
///
/// A blank segment, such as the one after a trailing separator, decodes to `null` so it is
/// still evaluated as its own part.
pub fn decode_part(format: DocumentFormat, segment: &[u8]) -> Result<Value, String> {
    let text = std::str::from_utf8(segment).map_err(|e| format!("invalid UTF-8: {e}"))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match format {
        DocumentFormat::Yaml => {
            serde_yml::from_str::<Value>(text).map_err(|e| format!("unable to parse yaml: {e}"))
        }
    }
}
