use jsg_core::config::GenerateConfig;
use jsg_core::ir::{
    EnumKind, EnumLiteral, Enumeration, Marker, Record, TypeDecl, TypeModel,
};
use jsg_core::naming::title_case;
use minijinja::{Environment, context};

use crate::type_mapper::type_to_go;
use crate::GoError;

/// Emit the generated Go source for a complete type model.
pub fn emit_types(model: &TypeModel, config: &GenerateConfig) -> Result<String, GoError> {
    let mut env = Environment::new();
    env.add_template("types.go.j2", include_str!("../templates/types.go.j2"))?;
    let tmpl = env.get_template("types.go.j2")?;

    let mut imports = Vec::new();
    if config.object_id {
        imports.push("go.mongodb.org/mongo-driver/bson/primitive".to_string());
    }

    let aliases: Vec<minijinja::Value> = model
        .sorted_alias_names()
        .into_iter()
        .map(|name| {
            let alias = &model.aliases[name];
            context! {
                comment => decl_comment(&alias.name, alias.description.as_deref()),
                name => alias.name.clone(),
                target => type_to_go(&alias.target),
            }
        })
        .collect();

    let decls: Vec<minijinja::Value> = model
        .sorted_decl_names()
        .into_iter()
        .map(|name| match &model.decls[name] {
            TypeDecl::Record(record) => record_to_ctx(record, config),
            TypeDecl::Enum(enumeration) => enum_to_ctx(enumeration),
            TypeDecl::Marker(marker) => marker_to_ctx(marker, &config.package),
        })
        .collect();

    Ok(tmpl.render(context! {
        package => clean_package_name(&config.package),
        imports => imports,
        aliases => aliases,
        decls => decls,
    })?)
}

fn record_to_ctx(record: &Record, config: &GenerateConfig) -> minijinja::Value {
    let mut field_names: Vec<&String> = record.fields.keys().collect();
    field_names.sort();

    let fields: Vec<minijinja::Value> = field_names
        .into_iter()
        .map(|key| {
            let field = &record.fields[key];
            // omitempty for optional fields, unless suppressed globally.
            let omitempty = if config.omitempty || field.required {
                ""
            } else {
                ",omitempty"
            };
            let bson_tag = if config.object_id {
                format!(" bson:\"{}{}\"", field.json_name, omitempty)
            } else {
                String::new()
            };
            let line = format!(
                "{} {} `json:\"{}{}\"{}`",
                field.name,
                type_to_go(&field.field_type),
                field.json_name,
                omitempty,
                bson_tag,
            );
            context! {
                comment => field.description.as_deref().map(field_comment),
                line => line,
            }
        })
        .collect();

    context! {
        kind => "record",
        name => record.name.clone(),
        comment => decl_comment(&record.name, record.description.as_deref()),
        fields => fields,
    }
}

fn enum_to_ctx(enumeration: &Enumeration) -> minijinja::Value {
    let base = match enumeration.kind {
        EnumKind::String => "string",
        EnumKind::Integer => "int",
    };
    let members: Vec<String> = enumeration
        .members
        .iter()
        .map(|member| match &member.literal {
            EnumLiteral::String(s) => {
                format!("{} {} = \"{}\"", member.name, enumeration.name, s)
            }
            EnumLiteral::Integer(i) => {
                format!("{} {} = {}", member.name, enumeration.name, i)
            }
        })
        .collect();

    context! {
        kind => "enum",
        name => enumeration.name.clone(),
        comment => decl_comment(&enumeration.name, enumeration.description.as_deref()),
        base => base,
        members => members,
    }
}

fn marker_to_ctx(marker: &Marker, package: &str) -> minijinja::Value {
    context! {
        kind => "marker",
        name => marker.name.clone(),
        comment => decl_comment(&marker.name, marker.description.as_deref()),
        method => format!("Is{}{}", title_case(package), marker.name),
        members => marker.members.clone(),
    }
}

fn decl_comment(name: &str, description: Option<&str>) -> String {
    match description {
        Some(description) => format!("// {} {}", name, description.replace('\n', "\n// ")),
        None => format!("// {name}"),
    }
}

fn field_comment(description: &str) -> String {
    format!("  // {}", description.replace('\n', "\n  // "))
}

/// Go package names may not contain dots or dashes.
fn clean_package_name(package: &str) -> String {
    package.replace(['.', '-'], "")
}
