use indexmap::IndexMap;
use jsg_core::config::GenerateConfig;
use jsg_core::ir::{
    Alias, EnumKind, EnumLiteral, EnumMember, Enumeration, Field, Marker, Record, TypeDecl,
    TypeModel, TypeRef,
};
use jsg_core::Renderer;
use jsg_go::GoRenderer;

fn field(name: &str, json_name: &str, field_type: TypeRef, required: bool) -> Field {
    Field {
        name: name.to_string(),
        json_name: json_name.to_string(),
        field_type,
        required,
        description: None,
    }
}

fn render(model: &TypeModel, config: &GenerateConfig) -> String {
    let files = GoRenderer.render(model, config).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].path, "types.go");
    files[0].content.clone()
}

fn order_model() -> TypeModel {
    let mut fields = IndexMap::new();
    fields.insert(
        "Id".to_string(),
        field("Id", "id", TypeRef::String, true),
    );
    let mut price = field("Price", "price", TypeRef::Ref("Money".to_string()), false);
    price.description = Some("unit price".to_string());
    fields.insert("Price".to_string(), price);

    let mut model = TypeModel::default();
    model.insert(TypeDecl::Record(Record {
        name: "Order".to_string(),
        description: Some("a sales order".to_string()),
        fields,
        additional: None,
        deny_additional: false,
    }));
    model
}

#[test]
fn renders_a_struct_with_tags_and_comments() {
    let output = render(&order_model(), &GenerateConfig::default());
    insta::assert_snapshot!(output, @r#"
// Code generated by jsg. DO NOT EDIT.

package main

// Order a sales order
type Order struct {
  Id string `json:"id"`

  // unit price
  Price Money `json:"price,omitempty"`
}
"#);
}

#[test]
fn omitempty_flag_suppresses_the_tag_suffix() {
    let config = GenerateConfig {
        omitempty: true,
        ..GenerateConfig::default()
    };
    let output = render(&order_model(), &config);
    assert!(output.contains("Price Money `json:\"price\"`"));
    assert!(!output.contains("omitempty"));
}

#[test]
fn object_id_mode_imports_the_bson_primitive_package() {
    let mut model = order_model();
    if let Some(TypeDecl::Record(order)) = model.decls.get_mut("Order") {
        order.fields.insert(
            "ObjectId".to_string(),
            field("ObjectId", "_id", TypeRef::ObjectId, false),
        );
    }
    let config = GenerateConfig {
        object_id: true,
        ..GenerateConfig::default()
    };
    let output = render(&model, &config);
    assert!(output.contains(
        "import (\n    \"go.mongodb.org/mongo-driver/bson/primitive\"\n)"
    ));
    assert!(output.contains(
        "ObjectId primitive.ObjectID `json:\"_id,omitempty\" bson:\"_id,omitempty\"`"
    ));
    assert!(output.contains("Id string `json:\"id\" bson:\"id\"`"));
}

#[test]
fn fields_are_emitted_in_sorted_order() {
    let mut fields = IndexMap::new();
    fields.insert(
        "Zebra".to_string(),
        field("Zebra", "zebra", TypeRef::String, false),
    );
    fields.insert(
        "Apple".to_string(),
        field("Apple", "apple", TypeRef::String, false),
    );
    let mut model = TypeModel::default();
    model.insert(TypeDecl::Record(Record {
        name: "Root".to_string(),
        description: None,
        fields,
        additional: None,
        deny_additional: false,
    }));

    let output = render(&model, &GenerateConfig::default());
    let apple = output.find("Apple").unwrap();
    let zebra = output.find("Zebra").unwrap();
    assert!(apple < zebra);
}

#[test]
fn renders_a_string_enum_as_typed_constants() {
    let mut model = TypeModel::default();
    model.insert(TypeDecl::Enum(Enumeration {
        name: "Color".to_string(),
        description: None,
        kind: EnumKind::String,
        members: vec![
            EnumMember {
                name: "ColorRed".to_string(),
                literal: EnumLiteral::String("red".to_string()),
            },
            EnumMember {
                name: "ColorBlue".to_string(),
                literal: EnumLiteral::String("blue".to_string()),
            },
        ],
    }));

    let output = render(&model, &GenerateConfig::default());
    assert!(output.contains("// Color\ntype Color string\n\nconst (\n"));
    assert!(output.contains("\tColorRed Color = \"red\"\n"));
    assert!(output.contains("\tColorBlue Color = \"blue\"\n)"));
}

#[test]
fn renders_an_integer_enum() {
    let mut model = TypeModel::default();
    model.insert(TypeDecl::Enum(Enumeration {
        name: "Level".to_string(),
        description: None,
        kind: EnumKind::Integer,
        members: vec![EnumMember {
            name: "Level1".to_string(),
            literal: EnumLiteral::Integer(1),
        }],
    }));

    let output = render(&model, &GenerateConfig::default());
    assert!(output.contains("type Level int"));
    assert!(output.contains("\tLevel1 Level = 1\n"));
}

#[test]
fn renders_a_marker_interface_with_member_impls() {
    let mut model = TypeModel::default();
    model.insert(TypeDecl::Marker(Marker {
        name: "ChoiceInterface".to_string(),
        description: None,
        members: vec!["Cat".to_string(), "Dog".to_string()],
    }));

    let config = GenerateConfig {
        package: "models".to_string(),
        ..GenerateConfig::default()
    };
    let output = render(&model, &config);
    assert!(output.contains(
        "type ChoiceInterface interface {\n  IsModelsChoiceInterface() bool\n}"
    ));
    assert!(output.contains(
        "func (d *Cat) IsModelsChoiceInterface() bool {\n  return true\n}"
    ));
    assert!(output.contains(
        "func (d *Dog) IsModelsChoiceInterface() bool {\n  return true\n}"
    ));
}

#[test]
fn renders_root_array_aliases() {
    let mut model = TypeModel::default();
    model.aliases.insert(
        "Root".to_string(),
        Alias {
            name: "Root".to_string(),
            description: None,
            target: TypeRef::Array(Box::new(TypeRef::Ref("Entry".to_string()))),
        },
    );

    let output = render(&model, &GenerateConfig::default());
    assert!(output.contains("// Root\ntype Root []Entry"));
}

#[test]
fn declarations_come_out_in_name_order() {
    let mut model = TypeModel::default();
    for name in ["Zoo", "Bar", "Middle"] {
        model.insert(TypeDecl::Record(Record {
            name: name.to_string(),
            description: None,
            fields: {
                let mut fields = IndexMap::new();
                fields.insert(
                    "X".to_string(),
                    field("X", "x", TypeRef::String, false),
                );
                fields
            },
            additional: None,
            deny_additional: false,
        }));
    }

    let output = render(&model, &GenerateConfig::default());
    let bar = output.find("type Bar").unwrap();
    let middle = output.find("type Middle").unwrap();
    let zoo = output.find("type Zoo").unwrap();
    assert!(bar < middle && middle < zoo);
}

#[test]
fn dotted_package_names_are_cleaned() {
    let config = GenerateConfig {
        package: "my-models.v2".to_string(),
        ..GenerateConfig::default()
    };
    let output = render(&order_model(), &config);
    assert!(output.contains("package mymodelsv2\n"));
}
