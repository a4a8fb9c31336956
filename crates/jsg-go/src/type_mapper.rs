use jsg_core::ir::TypeRef;

/// Map a [`TypeRef`] to its Go type string representation.
pub fn type_to_go(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::String => "string".to_string(),
        TypeRef::Integer => "int".to_string(),
        TypeRef::Number => "float64".to_string(),
        TypeRef::Boolean => "bool".to_string(),
        TypeRef::Null => "nil".to_string(),
        TypeRef::Any => "interface{}".to_string(),
        TypeRef::ObjectId => "primitive.ObjectID".to_string(),
        TypeRef::Ref(name) => name.clone(),
        TypeRef::Array(inner) => format!("[]{}", type_to_go(inner)),
        TypeRef::Map(value) => format!("map[string]{}", type_to_go(value)),
    }
}
