//! Stable identifiers for file-scoped error kinds.
//!
//! These appear in the `kind` field of report error entries and are safe to match on in CI.

/// The input file could not be opened or read.
pub const ERROR_FILE_ACCESS: &str = "file_access";

/// No decoder is registered for the input file's extension.
pub const ERROR_UNSUPPORTED_FORMAT: &str = "unsupported_format";

/// A document part could not be decoded.
pub const ERROR_DECODE: &str = "decode";

/// A query could not be built for a rule (bad namespace or rule reference).
pub const ERROR_INVALID_QUERY: &str = "invalid_query";

/// The policy engine failed while evaluating a rule.
pub const ERROR_ENGINE: &str = "engine";

/// A rule produced a message list containing a non-string element.
pub const ERROR_NON_STRING_MESSAGE: &str = "non_string_message";

/// Every error kind, for conformance tests and docs.
pub fn all_error_kinds() -> &'static [&'static str] {
    &[
        ERROR_FILE_ACCESS,
        ERROR_UNSUPPORTED_FORMAT,
        ERROR_DECODE,
        ERROR_INVALID_QUERY,
        ERROR_ENGINE,
        ERROR_NON_STRING_MESSAGE,
    ]
}
