//! File discovery: expands the user-supplied root files into the full set of
//! files the run must parse.
//!
//! A single shallow pass per root file: top-level properties plus the
//! properties of each top-level definition are scanned for external
//! references. Newly found dependency files are *not* re-scanned, so a
//! reference chain spanning more than one hop is not discovered.

use std::fs;

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::model::raw::RawSchema;
use crate::paths::resolve_ref_path;

/// One file to parse, tagged by how it entered the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: String,
    /// True when the file was supplied directly as an input, false when it
    /// was reached through a reference.
    pub root: bool,
}

/// Collect the set of files to parse: every input file plus every file its
/// top-level external references point at, deduplicated by resolved path.
pub fn discover_files(
    root_path: &str,
    input_files: &[String],
) -> Result<Vec<DiscoveredFile>, ParseError> {
    let mut found: IndexMap<String, bool> = IndexMap::new();

    for file in input_files {
        found.insert(file.clone(), true);

        let content = fs::read_to_string(file).map_err(|source| ParseError::Io {
            path: file.clone(),
            source,
        })?;
        let raw: RawSchema =
            serde_json::from_str(&content).map_err(|source| ParseError::Json {
                path: file.clone(),
                source,
            })?;

        for prop in raw.properties.values() {
            collect_external_ref(root_path, file, prop, &mut found);
        }
        for definition in raw.definitions.values() {
            for prop in definition.properties.values() {
                collect_external_ref(root_path, file, prop, &mut found);
            }
        }
    }

    log::debug!("discovered {} input file(s)", found.len());
    Ok(found
        .into_iter()
        .map(|(path, root)| DiscoveredFile { path, root })
        .collect())
}

fn collect_external_ref(
    root_path: &str,
    file: &str,
    schema: &RawSchema,
    found: &mut IndexMap<String, bool>,
) {
    if let Some(reference) = &schema.reference {
        if !reference.is_empty() && !reference.starts_with('#') {
            let path = resolve_ref_path(root_path, file, reference);
            found.insert(path, false);
        }
    }
}
