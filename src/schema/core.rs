use crate::coerce::{coerce_value, PrimitiveType};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Message for a required field absent from the payload. Wire contract text.
pub const MISSING_FIELD_MSG: &str = "Missing data for required field.";

/// Message for a payload (or nested payload) that is not a JSON object.
/// Wire contract text.
pub const INVALID_INPUT_MSG: &str = "Invalid input type.";

/// A single field-scoped validation failure.
///
/// `field_path` addresses the failing field from the payload root; nested
/// schemas prepend their enclosing field name during recursive descent.
/// An empty path means the payload itself was unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field_path: Vec<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(field_path: Vec<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field_path,
            message: message.into(),
        }
    }

    /// Wire key for the 409 report: path segments joined with `.`.
    #[must_use]
    pub fn wire_key(&self) -> String {
        self.field_path.join(".")
    }
}

/// The declared type of one schema field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Primitive(PrimitiveType),
    Nested(Arc<Schema>),
}

/// Static description of one schema field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
}

/// A named, ordered set of typed fields used to validate a structured
/// payload. Built once via [`Schema::builder`], never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Schema {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Validate and coerce a payload against this schema.
    ///
    /// Iterates every declared field, not only the keys present:
    ///
    /// - missing required field with no default → `"Missing data for required field."`
    /// - missing optional field → its default (or omitted when none is declared)
    /// - present primitive field → coerced via [`coerce_value`]
    /// - present nested field → recursive descent; child error paths are
    ///   prefixed with the enclosing field name
    /// - payload that is not a JSON object → a single root error
    ///
    /// All field errors across the whole schema, including nested schemas,
    /// are collected and returned together.
    pub fn validate(&self, payload: &Value) -> Result<Value, Vec<ValidationError>> {
        let obj = match payload.as_object() {
            Some(obj) => obj,
            None => {
                return Err(vec![ValidationError::new(Vec::new(), INVALID_INPUT_MSG)]);
            }
        };

        let mut out = Map::new();
        let mut errors = Vec::new();

        for field in &self.fields {
            match obj.get(&field.name) {
                None => {
                    if let Some(default) = &field.default {
                        out.insert(field.name.clone(), default.clone());
                    } else if field.required {
                        errors.push(ValidationError::new(
                            vec![field.name.clone()],
                            MISSING_FIELD_MSG,
                        ));
                    }
                }
                Some(raw) => match &field.kind {
                    FieldKind::Primitive(ty) => match coerce_value(raw, *ty) {
                        Ok(value) => {
                            out.insert(field.name.clone(), value);
                        }
                        Err(err) => {
                            errors.push(ValidationError::new(
                                vec![field.name.clone()],
                                err.message,
                            ));
                        }
                    },
                    FieldKind::Nested(schema) => match schema.validate(raw) {
                        Ok(value) => {
                            out.insert(field.name.clone(), value);
                        }
                        Err(children) => {
                            errors.extend(children.into_iter().map(|mut e| {
                                e.field_path.insert(0, field.name.clone());
                                e
                            }));
                        }
                    },
                },
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(out))
        } else {
            Err(errors)
        }
    }
}

/// Builder for [`Schema`]. Produces an `Arc<Schema>` so the finished schema
/// can be shared between signatures and nested schemas without copies.
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    /// Add a required primitive field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: PrimitiveType) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind: FieldKind::Primitive(ty),
            required: true,
            default: None,
        });
        self
    }

    /// Add an optional primitive field with a default applied when absent.
    #[must_use]
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        ty: PrimitiveType,
        default: Value,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind: FieldKind::Primitive(ty),
            required: false,
            default: Some(default),
        });
        self
    }

    /// Add an optional primitive field with no default. Absence is not an
    /// error; the field is simply omitted from the validated value.
    #[must_use]
    pub fn optional_field(mut self, name: impl Into<String>, ty: PrimitiveType) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind: FieldKind::Primitive(ty),
            required: false,
            default: None,
        });
        self
    }

    /// Add a required nested schema field.
    #[must_use]
    pub fn nested(mut self, name: impl Into<String>, schema: Arc<Schema>) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            kind: FieldKind::Nested(schema),
            required: true,
            default: None,
        });
        self
    }

    /// Add a fully specified field.
    #[must_use]
    pub fn field_spec(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    #[must_use]
    pub fn build(self) -> Arc<Schema> {
        Arc::new(Schema {
            name: self.name,
            fields: self.fields,
        })
    }
}
