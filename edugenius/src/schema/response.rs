//! Render a schema as the structure description attached to a model request.
//!
//! The shape is the OpenAPI subset the Generative Language API accepts as
//! `responseSchema`: type/properties/required/enum/items/minimum/maximum plus
//! per-field descriptions.

use serde_json::{json, Map, Value};

use super::{Field, FieldKind, Schema};

impl Schema {
    /// JSON structure description for the model's constrained output mode.
    pub fn response_schema(&self) -> Value {
        object_schema(self.fields())
    }
}

fn object_schema(fields: &[Field]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in fields {
        properties.insert(field.name.to_string(), field_schema(field));
        if field.required && field.default.is_none() {
            required.push(Value::String(field.name.to_string()));
        }
    }
    json!({
        "type": "object",
        "properties": Value::Object(properties),
        "required": Value::Array(required),
    })
}

fn field_schema(field: &Field) -> Value {
    let mut schema = kind_schema(&field.kind);
    if let (Some(obj), Some(description)) = (schema.as_object_mut(), field.description) {
        obj.insert("description".to_string(), json!(description));
    }
    schema
}

fn kind_schema(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::String => json!({"type": "string"}),
        FieldKind::Number { integer, min, max } => {
            let mut schema = Map::new();
            schema.insert(
                "type".to_string(),
                json!(if *integer { "integer" } else { "number" }),
            );
            if let Some(lo) = min {
                schema.insert("minimum".to_string(), json!(lo));
            }
            if let Some(hi) = max {
                schema.insert("maximum".to_string(), json!(hi));
            }
            Value::Object(schema)
        }
        FieldKind::Boolean => json!({"type": "boolean"}),
        FieldKind::Enumeration(variants) => json!({"type": "string", "enum": variants}),
        FieldKind::Object(fields) => object_schema(fields),
        FieldKind::Array(items) => json!({"type": "array", "items": kind_schema(items)}),
    }
}
