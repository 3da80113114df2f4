//! Core types for schema translation.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::rule::Rule;

/// Built-in schema type names, in the order they dispatch.
pub const BUILT_IN_TYPES: &[&str] = &[
    "array", "boolean", "integer", "null", "number", "object", "string",
];

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A declared `type` value, normalized for dispatch.
///
/// Custom names carry through so they can be looked up in the
/// caller-supplied type table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
    Custom(String),
}

impl SchemaType {
    /// Parse a `type` keyword value.
    ///
    /// Unknown names become `Custom`; whether they resolve is decided
    /// later against the configured type table.
    pub fn parse(name: &str) -> Self {
        match name {
            "array" => SchemaType::Array,
            "boolean" => SchemaType::Boolean,
            "integer" => SchemaType::Integer,
            "null" => SchemaType::Null,
            "number" => SchemaType::Number,
            "object" => SchemaType::Object,
            "string" => SchemaType::String,
            other => SchemaType::Custom(other.to_string()),
        }
    }
}

/// Pure pre-dispatch remap of a declared type/format pair.
///
/// Receives the declared `type` and the node's `format` (if any) and
/// returns the type name to dispatch on. Returning the input unchanged
/// leaves dispatch untouched.
pub type RefineTypeFn = fn(&str, Option<&str>) -> String;

/// Options for schema translation.
///
/// Validated once at entry and read-only for the duration of one
/// translation call.
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Named sub-schemas for resolving `$ref` URIs that point outside
    /// the root document. Keys are URI prefixes ending in `#`; lookups
    /// also try the key with its trailing `#` stripped.
    pub sub_schemas: Option<BTreeMap<String, Value>>,
    /// Pre-built rules for `type` values outside the built-in set.
    pub types: Option<BTreeMap<String, Rule>>,
    /// Optional remap of a declared type/format pair before dispatch.
    pub refine_type: Option<RefineTypeFn>,
    /// When true, every built rule rejects coerced values (a string
    /// `"5"` no longer satisfies a number rule). Defaults to false.
    pub strict: bool,
}

impl TranslateOptions {
    /// Create options with all defaults (no registry, no custom types,
    /// strict mode off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named sub-schema for `$ref` resolution.
    pub fn sub_schema(mut self, id: impl Into<String>, schema: Value) -> Self {
        self.sub_schemas
            .get_or_insert_with(BTreeMap::new)
            .insert(id.into(), schema);
        self
    }

    /// Register a pre-built rule for a custom `type` name.
    pub fn custom_type(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.types
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), rule);
        self
    }

    /// Set the type-refinement hook.
    pub fn refine_type(mut self, refine: RefineTypeFn) -> Self {
        self.refine_type = Some(refine);
        self
    }

    /// Set strict mode (disable coercion on every built rule).
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
