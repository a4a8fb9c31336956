use indexmap::IndexMap;
use serde::Deserialize;

/// A JSON Schema `type` keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
            SchemaType::Null => "null",
        }
    }
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAdditionalProperties {
    Bool(bool),
    Schema(Box<RawSchema>),
}

/// One JSON Schema object as it appears on disk, before it is lowered into
/// the arena. Unknown keywords are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSchema {
    /// Dialect declaration (`$schema`). Only its presence matters.
    #[serde(rename = "$schema")]
    pub schema_dialect: Option<String>,

    /// Draft-04 identity keyword.
    #[serde(rename = "id")]
    pub id_draft04: Option<String>,

    /// Draft-06+ identity keyword. Preferred over `id` when both are set.
    #[serde(rename = "$id")]
    pub id_draft06: Option<String>,

    #[serde(rename = "$ref")]
    pub reference: Option<String>,

    pub title: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(rename = "default")]
    pub default_value: Option<serde_json::Value>,

    #[serde(rename = "type")]
    pub types: Option<TypeSet>,

    #[serde(default)]
    pub properties: IndexMap<String, RawSchema>,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default, alias = "$defs")]
    pub definitions: IndexMap<String, RawSchema>,

    pub items: Option<Box<RawSchema>>,

    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<RawAdditionalProperties>,

    #[serde(rename = "oneOf", default)]
    pub one_of: Vec<RawSchema>,

    #[serde(rename = "enum", default)]
    pub enum_values: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_and_multi_type() {
        let raw: RawSchema = serde_json::from_str(r#"{"type": "string"}"#).unwrap();
        assert_eq!(raw.types, Some(TypeSet::Single(SchemaType::String)));

        let raw: RawSchema = serde_json::from_str(r#"{"type": ["integer", "null"]}"#).unwrap();
        assert_eq!(
            raw.types,
            Some(TypeSet::Multiple(vec![
                SchemaType::Integer,
                SchemaType::Null
            ]))
        );
    }

    #[test]
    fn parse_additional_properties_forms() {
        let raw: RawSchema =
            serde_json::from_str(r#"{"additionalProperties": false}"#).unwrap();
        assert!(matches!(
            raw.additional_properties,
            Some(RawAdditionalProperties::Bool(false))
        ));

        let raw: RawSchema =
            serde_json::from_str(r#"{"additionalProperties": {"type": "string"}}"#).unwrap();
        assert!(matches!(
            raw.additional_properties,
            Some(RawAdditionalProperties::Schema(_))
        ));
    }

    #[test]
    fn nonstandard_type_names_are_rejected() {
        // Only the seven standard type names deserialize; the legacy
        // "time" spelling is not among them.
        assert!(serde_json::from_str::<RawSchema>(r#"{"type": "time"}"#).is_err());
        assert!(serde_json::from_str::<RawSchema>(r#"{"type": ["string", "time"]}"#).is_err());
    }

    #[test]
    fn defs_keyword_lands_in_definitions() {
        let raw: RawSchema =
            serde_json::from_str(r#"{"$defs": {"address": {"type": "object"}}}"#).unwrap();
        assert!(raw.definitions.contains_key("address"));
    }
}
