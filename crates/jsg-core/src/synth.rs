//! Type synthesis: walks resolved schema trees and accumulates the output
//! type model.
//!
//! Every node is synthesized at most once. An object writes its own name
//! into the node's memo slot *before* recursing into its properties, so a
//! property whose reference leads back to the enclosing object (directly or
//! through other documents) reads the cached name instead of recursing
//! forever.

use crate::error::SynthesisError;
use crate::ir::{
    Alias, EnumKind, EnumLiteral, EnumMember, Enumeration, Field, Marker, Record, TypeDecl,
    TypeModel, TypeRef,
};
use crate::model::raw::SchemaType;
use crate::model::{AdditionalProperties, SchemaArena, SchemaId};
use crate::naming::{sanitize_identifier, title_case};
use crate::resolve::RefResolver;

/// Produces the output type model from parsed schema documents.
pub struct Generator {
    arena: SchemaArena,
    documents: Vec<SchemaId>,
    resolver: RefResolver,
    model: TypeModel,
    root_path: String,
    /// Inject the reserved identity field into root records.
    object_id: bool,
    anon_count: usize,
}

impl Generator {
    pub fn new(
        arena: SchemaArena,
        documents: Vec<SchemaId>,
        root_path: String,
        object_id: bool,
    ) -> Self {
        Self {
            arena,
            documents,
            resolver: RefResolver::new(),
            model: TypeModel::default(),
            root_path,
            object_id,
            anon_count: 0,
        }
    }

    /// Index all documents, then synthesize a type for each document root.
    pub fn create_types(&mut self) -> Result<(), SynthesisError> {
        self.resolver.init(&self.arena, &self.documents)?;
        for i in 0..self.documents.len() {
            let doc = self.documents[i];
            let name = self.schema_name("", doc);
            self.synthesize(doc, &name, false)?;
        }
        log::debug!(
            "synthesized {} declaration(s), {} alias(es)",
            self.model.decls.len(),
            self.model.aliases.len()
        );
        Ok(())
    }

    pub fn model(&self) -> &TypeModel {
        &self.model
    }

    pub fn into_model(self) -> TypeModel {
        self.model
    }

    pub fn documents(&self) -> &[SchemaId] {
        &self.documents
    }

    pub fn arena(&self) -> &SchemaArena {
        &self.arena
    }

    /// Convert one schema node into the type reference its caller should
    /// use, registering named types in the model as a side effect.
    pub fn synthesize(
        &mut self,
        id: SchemaId,
        name: &str,
        required: bool,
    ) -> Result<TypeRef, SynthesisError> {
        if !self.arena.node(id).definitions.is_empty() {
            self.process_definitions(id)?;
        }

        let types = self.arena.node(id).effective_types();
        let multi = types.len() > 1;
        if !types.is_empty() {
            for schema_type in &types {
                // Under multiple declared types each shape still gets its
                // own named type, but the caller receives a dynamic slot.
                let type_name = if multi {
                    format!("{name}_{}", schema_type.as_str())
                } else {
                    name.to_string()
                };
                let type_ref = match schema_type {
                    SchemaType::Object => self.process_object(id, &type_name)?,
                    SchemaType::Array => self.process_array(id, &type_name)?,
                    SchemaType::String => TypeRef::String,
                    SchemaType::Integer => TypeRef::Integer,
                    SchemaType::Number => TypeRef::Number,
                    SchemaType::Boolean => TypeRef::Boolean,
                    SchemaType::Null => TypeRef::Null,
                };
                if !multi {
                    return Ok(type_ref);
                }
            }
            return Ok(TypeRef::Any);
        }

        if self.arena.node(id).reference.is_some() {
            return self.process_reference(id, required);
        }
        if !self.arena.node(id).one_of.is_empty() {
            return self.process_one_of(id, name, required);
        }
        if !self.arena.node(id).enum_values.is_empty() {
            return self.process_enum(id, name);
        }
        Ok(TypeRef::Any)
    }

    fn process_definitions(&mut self, id: SchemaId) -> Result<(), SynthesisError> {
        let definitions: Vec<(String, SchemaId)> = self
            .arena
            .node(id)
            .definitions
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        for (key, sub) in definitions {
            self.synthesize(sub, &sanitize_identifier(&key), false)?;
        }
        Ok(())
    }

    fn process_reference(
        &mut self,
        id: SchemaId,
        required: bool,
    ) -> Result<TypeRef, SynthesisError> {
        let target = self.resolver.resolve(&self.arena, &self.root_path, id)?;
        if let Some(cached) = self.arena.node(target).generated.clone() {
            return Ok(cached);
        }
        let target_name = self.schema_name("", target);
        let type_ref = self.synthesize(target, &target_name, required)?;
        let target_node = self.arena.node_mut(target);
        if target_node.generated.is_none() {
            target_node.generated = Some(type_ref.clone());
        }
        Ok(type_ref)
    }

    fn process_object(&mut self, id: SchemaId, name: &str) -> Result<TypeRef, SynthesisError> {
        let mut record = Record {
            name: name.to_string(),
            description: self.arena.node(id).description.clone(),
            fields: indexmap::IndexMap::new(),
            additional: None,
            deny_additional: false,
        };
        // Cache the name first: sub-schemas may reference this object.
        self.arena.node_mut(id).generated = Some(TypeRef::Ref(name.to_string()));

        if self.object_id && self.arena.node(id).root {
            record.fields.insert(
                "ObjectId".to_string(),
                Field {
                    name: "ObjectId".to_string(),
                    json_name: "_id".to_string(),
                    field_type: TypeRef::ObjectId,
                    required: false,
                    description: None,
                },
            );
        }

        let properties: Vec<(String, SchemaId)> = self
            .arena
            .node(id)
            .properties
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        let required_keys = self.arena.node(id).required.clone();

        for (key, prop) in &properties {
            let field_name = sanitize_identifier(key);
            // The sub-schema may not use this name at all, depending on its
            // shape.
            let sub_name = self.schema_name(&field_name, *prop);
            let required = required_keys.contains(key);
            let field_type = self.synthesize(*prop, &sub_name, required)?;

            let prop_node = self.arena.node(*prop);
            let mut description = prop_node.description.clone();
            if prop_node.deprecated {
                description = Some(format!(
                    "@deprecated: {}",
                    description.unwrap_or_default()
                ));
            }
            record.fields.insert(
                field_name.clone(),
                Field {
                    name: field_name,
                    json_name: key.clone(),
                    field_type,
                    required,
                    description,
                },
            );
        }

        let additional = self.arena.node(id).additional_properties;
        match additional {
            Some(AdditionalProperties::Schema(sub)) => {
                let sub_name = self.schema_name("", sub);
                let sub_type = self.synthesize(sub, &sub_name, true)?;
                let map_type = TypeRef::Map(Box::new(sub_type.clone()));
                // An inline object holding nothing but typed additional
                // properties collapses to a bare map. A definition cannot:
                // it has a name other schemas may reference.
                if properties.is_empty() && !self.arena.node(id).is_definition() {
                    return Ok(map_type);
                }
                record.fields.insert(
                    "AdditionalProperties".to_string(),
                    Field {
                        name: "AdditionalProperties".to_string(),
                        json_name: "-".to_string(),
                        field_type: map_type,
                        required: false,
                        description: None,
                    },
                );
                record.additional = Some(sub_type);
            }
            Some(AdditionalProperties::Bool(true)) => {
                record.fields.insert(
                    "AdditionalProperties".to_string(),
                    Field {
                        name: "AdditionalProperties".to_string(),
                        json_name: "-".to_string(),
                        field_type: TypeRef::Map(Box::new(TypeRef::Any)),
                        required: false,
                        description: None,
                    },
                );
                record.additional = Some(TypeRef::Any);
            }
            Some(AdditionalProperties::Bool(false)) => {
                record.deny_additional = true;
            }
            None => {}
        }

        if record.fields.is_empty() {
            return Ok(TypeRef::Map(Box::new(TypeRef::Any)));
        }

        self.model.insert(TypeDecl::Record(record));
        Ok(TypeRef::Ref(name.to_string()))
    }

    fn process_array(&mut self, id: SchemaId, name: &str) -> Result<TypeRef, SynthesisError> {
        let Some(items) = self.arena.node(id).items else {
            return Ok(TypeRef::Array(Box::new(TypeRef::Any)));
        };
        // Fallback name in case the element is an inline object without a
        // title.
        let sub_name = self.schema_name(&format!("{name}Items"), items);
        let element = self.synthesize(items, &sub_name, true)?;
        let type_ref = TypeRef::Array(Box::new(element));
        // Only root arrays get an alias; a nested array is used in place.
        if self.arena.node(id).parent.is_none() {
            self.model.aliases.insert(
                name.to_string(),
                Alias {
                    name: name.to_string(),
                    description: self.arena.node(id).description.clone(),
                    target: type_ref.clone(),
                },
            );
        }
        Ok(type_ref)
    }

    fn process_one_of(
        &mut self,
        id: SchemaId,
        name: &str,
        required: bool,
    ) -> Result<TypeRef, SynthesisError> {
        let marker_name = format!("{name}Interface");
        let alternatives = self.arena.node(id).one_of.clone();
        let mut members = Vec::new();
        let mut last_reference = None;
        for alt in alternatives {
            if let Some(reference) = self.arena.node(alt).reference.clone() {
                let segment = reference.rsplit('/').next().unwrap_or(&reference);
                members.push(sanitize_identifier(segment));
                last_reference = Some(reference);
            }
        }

        // A single referenced alternative is a structural alias, not a real
        // choice: forward to the referenced type directly.
        if members.len() == 1 {
            self.arena.node_mut(id).reference = last_reference;
            return self.process_reference(id, required);
        }

        self.model.insert(TypeDecl::Marker(Marker {
            name: marker_name.clone(),
            description: self.arena.node(id).description.clone(),
            members,
        }));
        Ok(TypeRef::Ref(marker_name))
    }

    fn process_enum(&mut self, id: SchemaId, name: &str) -> Result<TypeRef, SynthesisError> {
        let literals = self.arena.node(id).enum_values.clone();
        let mut kind = None;
        let mut members = Vec::new();
        for literal in literals {
            match literal {
                serde_json::Value::String(s) => {
                    let mut member_name = name.to_string();
                    for segment in s.split(|c: char| !c.is_alphanumeric()) {
                        if !segment.is_empty() {
                            member_name.push_str(&title_case(segment));
                        }
                    }
                    kind.get_or_insert(EnumKind::String);
                    members.push(EnumMember {
                        name: member_name,
                        literal: EnumLiteral::String(s),
                    });
                }
                serde_json::Value::Number(n) => {
                    // Fractional literals are truncated; known fidelity loss.
                    let value = n
                        .as_i64()
                        .or_else(|| n.as_f64().map(|f| f as i64))
                        .unwrap_or(0);
                    kind.get_or_insert(EnumKind::Integer);
                    members.push(EnumMember {
                        name: format!("{name}{value}"),
                        literal: EnumLiteral::Integer(value),
                    });
                }
                _ => {}
            }
        }

        let Some(kind) = kind else {
            return Err(SynthesisError::Inconsistent {
                at: self.arena.address_of(id),
                detail: "enum has no string or numeric literals".to_string(),
            });
        };

        self.model.insert(TypeDecl::Enum(Enumeration {
            name: name.to_string(),
            description: self.arena.node(id).description.clone(),
            kind,
            members,
        }));
        Ok(TypeRef::Ref(name.to_string()))
    }

    /// Pick a name for a (sub-)schema: its own title, then the caller's
    /// proposal, then positional fallbacks, then a fresh synthetic name.
    fn schema_name(&mut self, proposed: &str, id: SchemaId) -> String {
        let node = self.arena.node(id);
        if let Some(title) = node.title.as_deref() {
            if !title.is_empty() {
                return sanitize_identifier(title);
            }
        }
        if !proposed.is_empty() {
            return sanitize_identifier(proposed);
        }
        let Some(parent) = node.parent else {
            return "Root".to_string();
        };
        if let Some(key) = node.json_key.as_deref() {
            if !key.is_empty() {
                return sanitize_identifier(key);
            }
        }
        if let Some(parent_key) = self.arena.node(parent).json_key.as_deref() {
            if !parent_key.is_empty() {
                return sanitize_identifier(&format!("{parent_key}Item"));
            }
        }
        self.anon_count += 1;
        format!("Anonymous{}", self.anon_count)
    }
}
