use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::catalog::CatalogError;

/// Suffix of policy-definition files inside a policy directory.
pub const POLICY_SUFFIX: &str = ".rego";

/// Enumerate candidate policy files.
///
/// Behavior:
/// - a directory yields every direct entry whose name ends in [`POLICY_SUFFIX`],
///   sorted by file name (subdirectories are not searched);
/// - a file yields itself, whatever its suffix.
pub fn discover_policy_files(path: &Utf8Path) -> Result<Vec<Utf8PathBuf>, CatalogError> {
    let meta = std::fs::metadata(path).map_err(|source| CatalogError::Access {
        path: path.to_path_buf(),
        source,
    })?;

    if !meta.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| CatalogError::Walk {
            path: path.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if !name.ends_with(POLICY_SUFFIX) {
            continue;
        }
        out.push(path.join(name));
    }

    debug!(dir = %path, files = out.len(), "discovered policy files");
    Ok(out)
}
