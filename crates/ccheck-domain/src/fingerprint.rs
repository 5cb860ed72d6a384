use ccheck_types::MessageClass;
use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a policy message.
///
/// Identity fields:
/// - file path
/// - message class
/// - message text
/// - occurrence: how many identical messages of the same class precede this one in the
///   file. The first occurrence hashes without it.
pub fn fingerprint_for_message(
    path: &str,
    class: MessageClass,
    message: &str,
    occurrence: usize,
) -> String {
    let mut canonical = [path, class.as_str(), message].join("|");
    if occurrence > 0 {
        canonical.push('|');
        canonical.push_str(&occurrence.to_string());
    }

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
