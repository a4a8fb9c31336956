//! Reading and decoding schema documents into the arena.

use std::fs;

use crate::discover::DiscoveredFile;
use crate::error::ParseError;
use crate::model::raw::RawSchema;
use crate::model::{SchemaArena, SchemaId};
use crate::paths::absolutize;

/// Decode one schema document and lower it into the arena. The document must
/// declare a `$schema` dialect unless `schema_key_optional` is set.
pub fn parse_document(
    arena: &mut SchemaArena,
    content: &str,
    source_path: &str,
    root: bool,
    schema_key_optional: bool,
) -> Result<SchemaId, ParseError> {
    let raw: RawSchema = serde_json::from_str(content).map_err(|source| ParseError::Json {
        path: source_path.to_string(),
        source,
    })?;
    if raw.schema_dialect.is_none() && !schema_key_optional {
        return Err(ParseError::MissingSchemaKey(source_path.to_string()));
    }
    Ok(arena.add_document(raw, source_path, root))
}

/// Read and parse every discovered file, returning the document root ids in
/// input order. Any unreadable or malformed file aborts the whole run.
pub fn read_input_files(
    arena: &mut SchemaArena,
    files: &[DiscoveredFile],
    schema_key_optional: bool,
) -> Result<Vec<SchemaId>, ParseError> {
    let mut documents = Vec::with_capacity(files.len());
    for file in files {
        let content = fs::read_to_string(&file.path).map_err(|source| ParseError::Io {
            path: file.path.clone(),
            source,
        })?;
        let source_path = absolutize(&file.path);
        let id = parse_document(arena, &content, &source_path, file.root, schema_key_optional)?;
        log::debug!("parsed {} (root: {})", source_path, file.root);
        documents.push(id);
    }
    Ok(documents)
}
