//! In-memory schema forest.
//!
//! Parsed documents are lowered into a [`SchemaArena`]: every schema object,
//! however deeply nested, becomes one [`SchemaNode`] addressed by a
//! [`SchemaId`]. Parent links and `$ref` strings are plain ids/strings, so
//! the forest has single ownership even when schemas reference each other in
//! cycles.

pub mod raw;

use indexmap::IndexMap;

use crate::ir::TypeRef;
use raw::{RawAdditionalProperties, RawSchema, SchemaType, TypeSet};

/// Handle into a [`SchemaArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaId(usize);

/// `additionalProperties` after lowering: a boolean or a child node.
#[derive(Debug, Clone, Copy)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(SchemaId),
}

/// One JSON Schema object (or sub-object) in the arena.
#[derive(Debug)]
pub struct SchemaNode {
    pub id_draft04: Option<String>,
    pub id_draft06: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub default_value: Option<serde_json::Value>,
    pub types: Option<TypeSet>,
    pub properties: IndexMap<String, SchemaId>,
    pub required: Vec<String>,
    pub definitions: IndexMap<String, SchemaId>,
    pub items: Option<SchemaId>,
    pub additional_properties: Option<AdditionalProperties>,
    pub one_of: Vec<SchemaId>,
    pub enum_values: Vec<serde_json::Value>,

    /// `$ref` string when this node is a reference placeholder. Rewritten by
    /// the synthesizer when a `oneOf` degenerates to a single alternative.
    pub reference: Option<String>,

    /// Non-owning back-reference to the enclosing node. `None` for document
    /// roots.
    pub parent: Option<SchemaId>,
    /// The property or definition key this node was reached through.
    pub json_key: Option<String>,
    /// JSON-pointer path from the document root (empty for the root itself).
    pub pointer: String,
    /// Absolute path of the document this node was parsed from.
    pub source_path: String,
    /// True only for the root node of a user-supplied input file.
    pub root: bool,

    /// Memoized synthesis result, written at most once per run. This is what
    /// keeps cyclic and diamond references terminating.
    pub generated: Option<TypeRef>,
}

impl SchemaNode {
    /// Effective schema identity: the draft-06+ `$id` wins over draft-04
    /// `id`; empty when neither is set.
    pub fn id(&self) -> &str {
        self.id_draft06
            .as_deref()
            .or(self.id_draft04.as_deref())
            .unwrap_or("")
    }

    /// The declared `type` values, with the implicit cases filled in: a node
    /// without `type` but with properties is an object, one with `items` is
    /// an array.
    pub fn effective_types(&self) -> Vec<SchemaType> {
        match &self.types {
            Some(TypeSet::Single(t)) => vec![*t],
            Some(TypeSet::Multiple(ts)) => ts.clone(),
            None => {
                if self.reference.is_none() && !self.properties.is_empty() {
                    vec![SchemaType::Object]
                } else if self.items.is_some() {
                    vec![SchemaType::Array]
                } else {
                    vec![]
                }
            }
        }
    }

    /// True when this node is itself an entry of a `definitions` / `$defs`
    /// block, and therefore a reusable named schema that must not be
    /// collapsed into a bare map.
    pub fn is_definition(&self) -> bool {
        match self.pointer.strip_prefix("/definitions/") {
            Some(rest) => !rest.contains('/'),
            None => false,
        }
    }
}

/// Arena owning every schema node of every parsed document.
#[derive(Debug, Default)]
pub struct SchemaArena {
    nodes: Vec<SchemaNode>,
}

impl SchemaArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: SchemaId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: SchemaId) -> &mut SchemaNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The addressable path of a node: document path plus JSON pointer.
    /// Used for index keys and error messages.
    pub fn address_of(&self, id: SchemaId) -> String {
        let node = self.node(id);
        format!("{}#{}", node.source_path, node.pointer)
    }

    /// Lower a parsed document into the arena, returning the root node id.
    pub fn add_document(&mut self, raw: RawSchema, source_path: &str, root: bool) -> SchemaId {
        let id = self.lower(raw, None, None, String::new(), source_path);
        self.node_mut(id).root = root;
        id
    }

    fn lower(
        &mut self,
        raw: RawSchema,
        parent: Option<SchemaId>,
        json_key: Option<String>,
        pointer: String,
        source_path: &str,
    ) -> SchemaId {
        let id = SchemaId(self.nodes.len());
        self.nodes.push(SchemaNode {
            id_draft04: raw.id_draft04,
            id_draft06: raw.id_draft06,
            title: raw.title,
            description: raw.description,
            deprecated: raw.deprecated,
            default_value: raw.default_value,
            types: raw.types,
            properties: IndexMap::new(),
            required: raw.required,
            definitions: IndexMap::new(),
            items: None,
            additional_properties: None,
            one_of: Vec::new(),
            enum_values: raw.enum_values,
            reference: raw.reference,
            parent,
            json_key,
            pointer: pointer.clone(),
            source_path: source_path.to_string(),
            root: false,
            generated: None,
        });

        let mut properties = IndexMap::with_capacity(raw.properties.len());
        for (key, sub) in raw.properties {
            let child_pointer = format!("{pointer}/properties/{key}");
            let child = self.lower(sub, Some(id), Some(key.clone()), child_pointer, source_path);
            properties.insert(key, child);
        }

        let mut definitions = IndexMap::with_capacity(raw.definitions.len());
        for (key, sub) in raw.definitions {
            let child_pointer = format!("{pointer}/definitions/{key}");
            let child = self.lower(sub, Some(id), Some(key.clone()), child_pointer, source_path);
            definitions.insert(key, child);
        }

        let items = raw
            .items
            .map(|sub| self.lower(*sub, Some(id), None, format!("{pointer}/items"), source_path));

        let additional_properties = raw.additional_properties.map(|ap| match ap {
            RawAdditionalProperties::Bool(b) => AdditionalProperties::Bool(b),
            RawAdditionalProperties::Schema(sub) => AdditionalProperties::Schema(self.lower(
                *sub,
                Some(id),
                None,
                format!("{pointer}/additionalProperties"),
                source_path,
            )),
        });

        let one_of = raw
            .one_of
            .into_iter()
            .enumerate()
            .map(|(i, sub)| {
                self.lower(sub, Some(id), None, format!("{pointer}/oneOf/{i}"), source_path)
            })
            .collect();

        let node = self.node_mut(id);
        node.properties = properties;
        node.definitions = definitions;
        node.items = items;
        node.additional_properties = additional_properties;
        node.one_of = one_of;
        id
    }

    /// Direct children of a node, in lowering order.
    pub fn children(&self, id: SchemaId) -> Vec<SchemaId> {
        let node = self.node(id);
        let mut out: Vec<SchemaId> = Vec::new();
        out.extend(node.properties.values().copied());
        out.extend(node.definitions.values().copied());
        out.extend(node.items);
        if let Some(AdditionalProperties::Schema(sub)) = node.additional_properties {
            out.push(sub);
        }
        out.extend(node.one_of.iter().copied());
        out
    }
}
