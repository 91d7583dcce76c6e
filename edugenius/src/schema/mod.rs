//! Declarative schemas for flow inputs and outputs.
//!
//! Each flow owns a statically-typed input/output struct pair plus a [`Schema`]
//! describing the same shape. The schema is the runtime boundary validator: it
//! checks the caller's value before any outbound call, checks the model payload
//! before it reaches the caller, and renders the structure description sent to
//! the model ([`Schema::response_schema`]).
//!
//! # Main types
//!
//! - [`Schema`]: a named object shape, the root of every flow contract.
//! - [`Field`]: one named field with kind, optionality, default, description.
//! - [`FieldKind`]: string / bounded number / boolean / enum / object / array.
//! - [`SchemaViolation`]: validation failure listing **every** offending field
//!   path, not just the first.
//!
//! Range constraints are inclusive: a score bounded to `[0, 100]` rejects -1
//! and 101 and accepts 0 and 100. Validation is deterministic and total; the
//! sanitized value it returns contains only declared fields, with defaults
//! applied for absent ones.

mod response;
mod validate;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Named object shape governing one side of a flow contract.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: Vec<Field>,
}

impl Schema {
    /// A schema whose root is an object with the given fields.
    pub fn object(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// One declared field of an object shape.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    default: Option<Value>,
    description: Option<&'static str>,
}

/// The semantic type of a [`Field`].
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    /// `integer` rejects fractional values; bounds are inclusive.
    Number {
        integer: bool,
        min: Option<f64>,
        max: Option<f64>,
    },
    Boolean,
    /// Closed set of string literals.
    Enumeration(&'static [&'static str]),
    /// Nested object with its own declared fields.
    Object(Vec<Field>),
    /// Homogeneous array of the element kind.
    Array(Box<FieldKind>),
}

impl Field {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            description: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(
            name,
            FieldKind::Number {
                integer: false,
                min: None,
                max: None,
            },
        )
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(
            name,
            FieldKind::Number {
                integer: true,
                min: None,
                max: None,
            },
        )
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn enumeration(name: &'static str, variants: &'static [&'static str]) -> Self {
        Self::new(name, FieldKind::Enumeration(variants))
    }

    pub fn object(name: &'static str, fields: Vec<Field>) -> Self {
        Self::new(name, FieldKind::Object(fields))
    }

    pub fn array(name: &'static str, items: FieldKind) -> Self {
        Self::new(name, FieldKind::Array(Box::new(items)))
    }

    pub fn string_array(name: &'static str) -> Self {
        Self::array(name, FieldKind::String)
    }

    pub fn object_array(name: &'static str, fields: Vec<Field>) -> Self {
        Self::array(name, FieldKind::Object(fields))
    }

    /// Inclusive lower bound; applies to number and integer fields.
    pub fn min(mut self, bound: f64) -> Self {
        if let FieldKind::Number { ref mut min, .. } = self.kind {
            *min = Some(bound);
        }
        self
    }

    /// Inclusive upper bound; applies to number and integer fields.
    pub fn max(mut self, bound: f64) -> Self {
        if let FieldKind::Number { ref mut max, .. } = self.kind {
            *max = Some(bound);
        }
        self
    }

    /// Marks the field as not required; absent values are simply omitted.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Value inserted when the field is absent. A defaulted field never
    /// produces a missing-field violation.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Human-readable description, surfaced in the response schema sent to the
    /// model.
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// One offending field: where and which constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Dotted path with array indices, e.g. `metrics.speedIndex` or
    /// `opportunities[2].title`; `$` for the root value itself.
    pub path: String,
    /// The violated constraint, e.g. `must be at most 100`.
    pub constraint: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field `{}`: {}", self.path, self.constraint)
    }
}

/// Validation failure for a whole value: the schema name plus every violation
/// found in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    schema: &'static str,
    violations: Vec<Violation>,
}

impl SchemaViolation {
    pub(crate) fn new(schema: &'static str, violations: Vec<Violation>) -> Self {
        Self { schema, violations }
    }

    pub fn schema(&self) -> &'static str {
        self.schema
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema `{}`: ", self.schema)?;
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", v)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaViolation {}
