//! The output type model: the language-neutral set of named types produced
//! by synthesis, consumed by renderers. Entries are only ever added during a
//! run, never removed or mutated.

use indexmap::IndexMap;

/// A resolved type reference.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    String,
    Integer,
    Number,
    Boolean,
    Null,
    /// Dynamic value placeholder: multi-typed properties and schema-less
    /// nodes land here.
    Any,
    /// Reserved identity slot injected into root records when the object-id
    /// output mode is enabled.
    ObjectId,
    Array(Box<TypeRef>),
    Map(Box<TypeRef>),
    /// Reference to a named declaration in the model.
    Ref(String),
}

/// A named declaration in the output model.
#[derive(Debug, Clone)]
pub enum TypeDecl {
    Record(Record),
    Enum(Enumeration),
    Marker(Marker),
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Record(r) => &r.name,
            TypeDecl::Enum(e) => &e.name,
            TypeDecl::Marker(m) => &m.name,
        }
    }
}

/// A record (struct) with named fields.
#[derive(Debug, Clone)]
pub struct Record {
    pub name: String,
    pub description: Option<String>,
    /// Keyed by output field name. Insertion order is irrelevant; renderers
    /// sort lexicographically for determinism.
    pub fields: IndexMap<String, Field>,
    /// Set when the record carries an open extra-properties slot of the
    /// given type (`TypeRef::Any` for `additionalProperties: true`).
    pub additional: Option<TypeRef>,
    /// Set when the schema declared `additionalProperties: false`. Metadata
    /// for renderers/validators; nothing is enforced here.
    pub deny_additional: bool,
}

/// One record field.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    /// The original JSON property key (`-` for synthetic fields).
    pub json_name: String,
    pub field_type: TypeRef,
    pub required: bool,
    pub description: Option<String>,
}

/// Backing primitive of an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind {
    String,
    Integer,
}

/// One enumeration member: identifier plus source literal.
#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: String,
    pub literal: EnumLiteral,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnumLiteral {
    String(String),
    /// Numeric literals are truncated to integers, fractional part and all.
    Integer(i64),
}

/// A named scalar enumeration.
#[derive(Debug, Clone)]
pub struct Enumeration {
    pub name: String,
    pub description: Option<String>,
    pub kind: EnumKind,
    pub members: Vec<EnumMember>,
}

/// A nominal sum-type marker produced from `oneOf`: the named types in
/// `members` satisfy it. No discriminant is carried.
#[derive(Debug, Clone)]
pub struct Marker {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<String>,
}

/// A name bound directly to a non-record type. Only registered for
/// root-level array schemas.
#[derive(Debug, Clone)]
pub struct Alias {
    pub name: String,
    pub description: Option<String>,
    pub target: TypeRef,
}

/// The accumulated output of one synthesis run.
#[derive(Debug, Clone, Default)]
pub struct TypeModel {
    pub decls: IndexMap<String, TypeDecl>,
    pub aliases: IndexMap<String, Alias>,
}

impl TypeModel {
    pub fn insert(&mut self, decl: TypeDecl) {
        self.decls.insert(decl.name().to_string(), decl);
    }

    /// Declaration names in lexicographic order.
    pub fn sorted_decl_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.decls.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Alias names in lexicographic order.
    pub fn sorted_alias_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.aliases.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
