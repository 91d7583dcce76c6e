//! Schema validation: accept or reject an arbitrary JSON value.
//!
//! One pass over the declared fields collects every violation and builds the
//! sanitized result (declared fields only, defaults applied). Re-running on
//! the same input yields the same result.

use serde_json::{Map, Value};

use super::{Field, FieldKind, Schema, SchemaViolation, Violation};

impl Schema {
    /// Checks `value` against the declared shape.
    ///
    /// Returns the sanitized value on success, or a [`SchemaViolation`] naming
    /// every invalid field. Unknown keys are dropped, declared defaults are
    /// inserted for absent fields; there is no other coercion.
    pub fn validate(&self, value: &Value) -> Result<Value, SchemaViolation> {
        let mut violations = Vec::new();
        let sanitized = validate_object(&self.fields, value, "", &mut violations);
        if violations.is_empty() {
            Ok(sanitized)
        } else {
            Err(SchemaViolation::new(self.name, violations))
        }
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn validate_object(
    fields: &[Field],
    value: &Value,
    path: &str,
    out: &mut Vec<Violation>,
) -> Value {
    let Some(map) = value.as_object() else {
        out.push(Violation {
            path: if path.is_empty() {
                "$".to_string()
            } else {
                path.to_string()
            },
            constraint: "expected an object".to_string(),
        });
        return Value::Object(Map::new());
    };

    let mut sanitized = Map::new();
    for field in fields {
        let field_path = join_path(path, field.name);
        match map.get(field.name) {
            None | Some(Value::Null) => {
                if let Some(default) = &field.default {
                    sanitized.insert(field.name.to_string(), default.clone());
                } else if field.required {
                    out.push(Violation {
                        path: field_path,
                        constraint: "missing required field".to_string(),
                    });
                }
            }
            Some(present) => {
                let checked = validate_kind(&field.kind, present, &field_path, out);
                sanitized.insert(field.name.to_string(), checked);
            }
        }
    }
    Value::Object(sanitized)
}

fn validate_kind(kind: &FieldKind, value: &Value, path: &str, out: &mut Vec<Violation>) -> Value {
    match kind {
        FieldKind::String => {
            if value.is_string() {
                value.clone()
            } else {
                out.push(Violation {
                    path: path.to_string(),
                    constraint: "expected a string".to_string(),
                });
                Value::Null
            }
        }
        FieldKind::Number { integer, min, max } => {
            let Some(n) = value.as_f64() else {
                out.push(Violation {
                    path: path.to_string(),
                    constraint: "expected a number".to_string(),
                });
                return Value::Null;
            };
            if *integer && n.fract() != 0.0 {
                out.push(Violation {
                    path: path.to_string(),
                    constraint: "expected an integer".to_string(),
                });
            }
            if let Some(lo) = min {
                if n < *lo {
                    out.push(Violation {
                        path: path.to_string(),
                        constraint: format!("must be at least {lo}"),
                    });
                }
            }
            if let Some(hi) = max {
                if n > *hi {
                    out.push(Violation {
                        path: path.to_string(),
                        constraint: format!("must be at most {hi}"),
                    });
                }
            }
            value.clone()
        }
        FieldKind::Boolean => {
            if value.is_boolean() {
                value.clone()
            } else {
                out.push(Violation {
                    path: path.to_string(),
                    constraint: "expected a boolean".to_string(),
                });
                Value::Null
            }
        }
        FieldKind::Enumeration(variants) => match value.as_str() {
            Some(s) if variants.contains(&s) => value.clone(),
            _ => {
                out.push(Violation {
                    path: path.to_string(),
                    constraint: format!("expected one of: {}", variants.join(", ")),
                });
                Value::Null
            }
        },
        FieldKind::Object(fields) => validate_object(fields, value, path, out),
        FieldKind::Array(items) => {
            let Some(elements) = value.as_array() else {
                out.push(Violation {
                    path: path.to_string(),
                    constraint: "expected an array".to_string(),
                });
                return Value::Null;
            };
            let checked = elements
                .iter()
                .enumerate()
                .map(|(i, element)| {
                    validate_kind(items, element, &format!("{path}[{i}]"), out)
                })
                .collect();
            Value::Array(checked)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::schema::{Field, Schema};

    fn score_schema() -> Schema {
        Schema::object(
            "score_input",
            vec![
                Field::string("topic"),
                Field::number("score").min(0.0).max(100.0),
            ],
        )
    }

    #[test]
    fn valid_input_is_sanitized_and_unknown_keys_dropped() {
        let schema = score_schema();
        let value = json!({"topic": "Algebra", "score": 88, "extra": true});
        let sanitized = schema.validate(&value).unwrap();
        assert_eq!(sanitized, json!({"topic": "Algebra", "score": 88}));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let schema = score_schema();
        assert!(schema.validate(&json!({"topic": "t", "score": 0})).is_ok());
        assert!(schema.validate(&json!({"topic": "t", "score": 100})).is_ok());

        let low = schema.validate(&json!({"topic": "t", "score": -1})).unwrap_err();
        assert_eq!(low.violations()[0].path, "score");
        assert_eq!(low.violations()[0].constraint, "must be at least 0");

        let high = schema.validate(&json!({"topic": "t", "score": 101})).unwrap_err();
        assert_eq!(high.violations()[0].constraint, "must be at most 100");
    }

    #[test]
    fn all_violations_are_reported_not_just_the_first() {
        let schema = score_schema();
        let err = schema.validate(&json!({"score": 130})).unwrap_err();
        let paths: Vec<&str> = err.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["topic", "score"]);
    }

    #[test]
    fn validation_is_deterministic() {
        let schema = score_schema();
        let value = json!({"score": "not a number"});
        let first = schema.validate(&value).unwrap_err();
        let second = schema.validate(&value).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn defaults_fill_absent_fields() {
        let schema = Schema::object(
            "with_default",
            vec![Field::integer("count").min(1.0).default_value(json!(10))],
        );
        let sanitized = schema.validate(&json!({})).unwrap();
        assert_eq!(sanitized, json!({"count": 10}));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let schema = Schema::object(
            "with_optional",
            vec![Field::string("topic"), Field::string("hint").optional()],
        );
        let sanitized = schema.validate(&json!({"topic": "x"})).unwrap();
        assert_eq!(sanitized, json!({"topic": "x"}));
    }

    #[test]
    fn null_counts_as_absent() {
        let schema = Schema::object("nullable", vec![Field::string("topic")]);
        let err = schema.validate(&json!({"topic": null})).unwrap_err();
        assert_eq!(err.violations()[0].constraint, "missing required field");
    }

    #[test]
    fn enumeration_rejects_unknown_literal() {
        let schema = Schema::object(
            "enum_input",
            vec![Field::enumeration("level", &["easy", "medium", "hard"])],
        );
        let err = schema.validate(&json!({"level": "extreme"})).unwrap_err();
        assert_eq!(
            err.violations()[0].constraint,
            "expected one of: easy, medium, hard"
        );
    }

    #[test]
    fn nested_object_and_array_paths() {
        let schema = Schema::object(
            "nested",
            vec![
                Field::object("metrics", vec![Field::number("speedIndex")]),
                Field::object_array("items", vec![Field::string("title")]),
            ],
        );
        let err = schema
            .validate(&json!({
                "metrics": {"speedIndex": "fast"},
                "items": [{"title": "ok"}, {"title": 7}],
            }))
            .unwrap_err();
        let paths: Vec<&str> = err.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["metrics.speedIndex", "items[1].title"]);
    }

    #[test]
    fn integer_field_rejects_fractional() {
        let schema = Schema::object("int", vec![Field::integer("n")]);
        let err = schema.validate(&json!({"n": 2.5})).unwrap_err();
        assert_eq!(err.violations()[0].constraint, "expected an integer");
        assert!(schema.validate(&json!({"n": 2})).is_ok());
    }

    #[test]
    fn non_object_root_is_a_single_violation() {
        let schema = score_schema();
        let err = schema.validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.violations()[0].path, "$");
        assert_eq!(err.violations()[0].constraint, "expected an object");
    }
}
