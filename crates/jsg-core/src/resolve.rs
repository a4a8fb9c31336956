//! Reference resolution.
//!
//! `init` builds an index over every node of every parsed document, keyed by
//! the node's addressable path (document identity + JSON pointer). After
//! that, resolving a `$ref` is a pure lookup: the same reference from the
//! same context always lands on the same [`SchemaId`], which is what lets
//! the synthesizer's memo cache short-circuit repeated visits.

use std::collections::HashMap;

use crate::error::ResolveError;
use crate::model::{SchemaArena, SchemaId};
use crate::paths::resolve_ref_path;

/// Index from `document#pointer` keys to arena nodes.
#[derive(Debug, Default)]
pub struct RefResolver {
    index: HashMap<String, SchemaId>,
}

impl RefResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every reachable node of every document. Must run to completion
    /// before the first `resolve` call.
    pub fn init(
        &mut self,
        arena: &SchemaArena,
        documents: &[SchemaId],
    ) -> Result<(), ResolveError> {
        for &doc in documents {
            let source_path = arena.node(doc).source_path.clone();
            let identity = arena.node(doc).id().to_string();
            let mut stack = vec![doc];
            while let Some(id) = stack.pop() {
                let pointer = &arena.node(id).pointer;
                self.insert(format!("{source_path}#{pointer}"), id)?;
                // Index definitions under both draft spellings so either
                // `#/definitions/x` or `#/$defs/x` resolves.
                if pointer.contains("/definitions/") {
                    let alt = pointer.replace("/definitions/", "/$defs/");
                    self.insert(format!("{source_path}#{alt}"), id)?;
                }
                if !identity.is_empty() {
                    self.insert(format!("{identity}#{pointer}"), id)?;
                }
                stack.extend(arena.children(id));
            }
        }
        log::debug!("indexed {} schema path(s)", self.index.len());
        Ok(())
    }

    /// Resolve the `$ref` carried by `source` to the concrete target node.
    pub fn resolve(
        &self,
        arena: &SchemaArena,
        root_path: &str,
        source: SchemaId,
    ) -> Result<SchemaId, ResolveError> {
        let node = arena.node(source);
        let reference = match node.reference.as_deref() {
            Some(r) if !r.is_empty() => r,
            _ => return Err(ResolveError::EmptyReference(arena.address_of(source))),
        };

        let found = if let Some(fragment) = reference.strip_prefix('#') {
            // Local fragment: a JSON pointer within the containing document.
            self.index.get(&format!("{}#{}", node.source_path, fragment))
        } else {
            let (file_part, fragment) = match reference.split_once('#') {
                Some((file, frag)) => (file, frag),
                None => (reference, ""),
            };
            let resolved = resolve_ref_path(root_path, &node.source_path, file_part);
            self.index
                .get(&format!("{resolved}#{fragment}"))
                // Fall back to the raw file part, which covers references
                // addressed by a document's declared `$id`.
                .or_else(|| self.index.get(&format!("{file_part}#{fragment}")))
        };

        found.copied().ok_or_else(|| ResolveError::RefNotFound {
            reference: reference.to_string(),
            at: arena.address_of(source),
        })
    }

    fn insert(&mut self, key: String, id: SchemaId) -> Result<(), ResolveError> {
        if let Some(prev) = self.index.insert(key.clone(), id) {
            if prev != id {
                return Err(ResolveError::DuplicateIdentity(key));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::raw::RawSchema;

    fn arena_with(json: &str, path: &str) -> (SchemaArena, SchemaId) {
        let raw: RawSchema = serde_json::from_str(json).unwrap();
        let mut arena = SchemaArena::new();
        let root = arena.add_document(raw, path, true);
        (arena, root)
    }

    #[test]
    fn local_fragment_resolves_within_the_document() {
        let (arena, root) = arena_with(
            r##"{
                "definitions": {"address": {"type": "object", "properties": {"street": {"type": "string"}}}},
                "properties": {"home": {"$ref": "#/definitions/address"}}
            }"##,
            "/a/schema.json",
        );
        let mut resolver = RefResolver::new();
        resolver.init(&arena, &[root]).unwrap();

        let home = arena.node(root).properties["home"];
        let target = resolver.resolve(&arena, "", home).unwrap();
        assert_eq!(target, arena.node(root).definitions["address"]);

        // Same context, same identity, every time.
        assert_eq!(resolver.resolve(&arena, "", home).unwrap(), target);
    }

    #[test]
    fn defs_spelling_resolves_too() {
        let (arena, root) = arena_with(
            r##"{
                "definitions": {"money": {"type": "integer"}},
                "properties": {"price": {"$ref": "#/$defs/money"}}
            }"##,
            "/a/schema.json",
        );
        let mut resolver = RefResolver::new();
        resolver.init(&arena, &[root]).unwrap();

        let price = arena.node(root).properties["price"];
        let target = resolver.resolve(&arena, "", price).unwrap();
        assert_eq!(target, arena.node(root).definitions["money"]);
    }

    #[test]
    fn unresolvable_reference_names_the_culprit() {
        let (arena, root) = arena_with(
            r##"{"properties": {"x": {"$ref": "#/definitions/missing"}}}"##,
            "/a/schema.json",
        );
        let mut resolver = RefResolver::new();
        resolver.init(&arena, &[root]).unwrap();

        let x = arena.node(root).properties["x"];
        match resolver.resolve(&arena, "", x).unwrap_err() {
            ResolveError::RefNotFound { reference, at } => {
                assert_eq!(reference, "#/definitions/missing");
                assert_eq!(at, "/a/schema.json#/properties/x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn reference_by_declared_identity() {
        let raw_a: RawSchema = serde_json::from_str(
            r#"{"$id": "http://example.com/common.json", "definitions": {"unit": {"type": "string"}}}"#,
        )
        .unwrap();
        let raw_b: RawSchema = serde_json::from_str(
            r#"{"properties": {"u": {"$ref": "http://example.com/common.json#/definitions/unit"}}}"#,
        )
        .unwrap();
        let mut arena = SchemaArena::new();
        let a = arena.add_document(raw_a, "/x/common.json", false);
        let b = arena.add_document(raw_b, "/x/main.json", true);
        let mut resolver = RefResolver::new();
        resolver.init(&arena, &[a, b]).unwrap();

        let u = arena.node(b).properties["u"];
        let target = resolver.resolve(&arena, "", u).unwrap();
        assert_eq!(target, arena.node(a).definitions["unit"]);
    }
}
