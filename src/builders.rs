//! Per-type constraint application.
//!
//! The dispatcher hands nodes with a `type` keyword to these builders.
//! Each builder reads the node's constraint keywords and layers them
//! onto the matching rule; strict mode is applied uniformly before the
//! `description`/`title`/`default` decorations.

use serde_json::{Map, Value};

use crate::error::TranslateError;
use crate::resolver::Resolver;
use crate::rule::{Format, Rule};
use crate::types::SchemaType;

/// JavaScript-style truthiness, used where the constraint table keeps
/// the quirk: falsy date/binary bounds (zero, empty string) are
/// silently skipped.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl<'a> Resolver<'a> {
    /// Resolve a node whose `type` keyword is present.
    ///
    /// A sequence of type names resolves each independently (sharing
    /// the node's `format`) and combines the results into an
    /// alternation.
    pub(crate) fn resolve_type(
        &mut self,
        declared: &Value,
        map: &Map<String, Value>,
        path: &str,
    ) -> Result<Rule, TranslateError> {
        let format = map.get("format").and_then(Value::as_str);

        let rule = match declared {
            Value::String(name) => self.type_rule(name, format, map, path)?,
            Value::Array(names) => {
                let mut options = Vec::with_capacity(names.len());
                for name in names {
                    let name = name.as_str().ok_or_else(|| TranslateError::UnresolvedType {
                        name: name.to_string(),
                    })?;
                    options.push(self.type_rule(name, format, map, path)?);
                }
                Rule::alternatives(options).strict(self.options.strict)
            }
            other => {
                return Err(TranslateError::UnresolvedType {
                    name: other.to_string(),
                })
            }
        };

        Ok(decorate(rule, map))
    }

    /// Build the rule for one type name.
    pub(crate) fn type_rule(
        &mut self,
        name: &str,
        format: Option<&str>,
        map: &Map<String, Value>,
        path: &str,
    ) -> Result<Rule, TranslateError> {
        let declared = match self.options.refine_type {
            Some(refine) => refine(name, format),
            None => name.to_string(),
        };

        let rule = match SchemaType::parse(&declared) {
            SchemaType::Boolean => Rule::boolean(),
            SchemaType::Null => Rule::null(),
            SchemaType::Integer => number_rule(map, true),
            SchemaType::Number => number_rule(map, false),
            SchemaType::String => string_rule(map, format),
            SchemaType::Array => self.array_rule(map, path)?,
            SchemaType::Object => self.object_rule(map, path)?,
            SchemaType::Custom(custom) => self
                .options
                .types
                .as_ref()
                .and_then(|types| types.get(&custom))
                .cloned()
                .ok_or(TranslateError::UnresolvedType { name: custom })?,
        };

        Ok(rule.strict(self.options.strict))
    }

    fn array_rule(
        &mut self,
        map: &Map<String, Value>,
        path: &str,
    ) -> Result<Rule, TranslateError> {
        let mut rule = Rule::array();
        let mut positional_count = None;

        if let Some(items) = map.get("items") {
            match items {
                // A sequence is positional; a single schema broadcasts
                // over every element.
                Value::Array(_) => {
                    let rules = self.resolve_as_array(items, &format!("{}/items", path))?;
                    positional_count = Some(rules.len());
                    rule = rule.ordered(rules);
                }
                single => {
                    rule = rule.items(self.resolve(single, &format!("{}/items", path))?);
                }
            }
        } else if let Some(ordered) = map.get("ordered") {
            let rules = self.resolve_as_array(ordered, &format!("{}/ordered", path))?;
            positional_count = Some(rules.len());
            rule = rule.ordered(rules);
        }

        if map.get("additionalItems") == Some(&Value::Bool(false)) {
            if let Some(count) = positional_count {
                rule = rule.max_items(count as u64);
            }
        }
        if let Some(bound) = map.get("minItems").and_then(Value::as_u64) {
            rule = rule.min_items(bound);
        }
        if let Some(bound) = map.get("maxItems").and_then(Value::as_u64) {
            rule = rule.max_items(bound);
        }
        if map.get("uniqueItems").and_then(Value::as_bool) == Some(true) {
            rule = rule.unique();
        }

        Ok(rule)
    }

    fn object_rule(
        &mut self,
        map: &Map<String, Value>,
        path: &str,
    ) -> Result<Rule, TranslateError> {
        let mut rule = Rule::object();

        let required: Vec<&str> = map
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        if let Some(properties) = map.get("properties").and_then(Value::as_object) {
            for (name, child) in properties {
                let mut child_rule =
                    self.resolve(child, &format!("{}/properties/{}", path, name))?;
                if required.contains(&name.as_str()) {
                    child_rule = child_rule.required();
                }
                rule = rule.key(name, child_rule);
            }
        }

        match map.get("additionalProperties") {
            Some(Value::Bool(true)) => rule = rule.unknown(true),
            Some(schema @ Value::Object(_)) => {
                let unknown_rule =
                    self.resolve(schema, &format!("{}/additionalProperties", path))?;
                rule = rule.unknown_schema(unknown_rule);
            }
            _ => {}
        }

        if let Some(bound) = map.get("minProperties").and_then(Value::as_u64) {
            rule = rule.min_keys(bound);
        }
        if let Some(bound) = map.get("maxProperties").and_then(Value::as_u64) {
            rule = rule.max_keys(bound);
        }

        Ok(rule)
    }
}

/// Numeric bounds test presence with "is this a number", so a bound of
/// `0` still applies.
fn number_rule(map: &Map<String, Value>, integer: bool) -> Rule {
    let mut rule = Rule::number();
    if integer {
        rule = rule.integer();
    }
    if let Some(bound) = map.get("minimum").and_then(Value::as_f64) {
        rule = rule.min(bound);
    }
    if let Some(bound) = map.get("maximum").and_then(Value::as_f64) {
        rule = rule.max(bound);
    }
    if let Some(bound) = map.get("exclusiveMinimum").and_then(Value::as_f64) {
        rule = rule.greater(bound);
    }
    if let Some(bound) = map.get("exclusiveMaximum").and_then(Value::as_f64) {
        rule = rule.less(bound);
    }
    if let Some(base) = map.get("multipleOf").and_then(Value::as_f64) {
        if base != 0.0 {
            rule = rule.multiple_of(base);
        }
    }
    rule
}

fn string_rule(map: &Map<String, Value>, format: Option<&str>) -> Rule {
    // An enum short-circuits every other string keyword.
    if let Some(Value::Array(values)) = map.get("enum") {
        return Rule::string().valid(values.clone());
    }

    match format {
        Some("date") | Some("date-time") => return date_rule(map),
        Some("binary") => return binary_rule(map),
        _ => {}
    }

    let mut rule = Rule::string();
    match format {
        Some("email") => rule = rule.format(Format::Email),
        Some("hostname") => rule = rule.format(Format::Hostname),
        Some("ipv4") => rule = rule.format(Format::Ipv4),
        Some("ipv6") => rule = rule.format(Format::Ipv6),
        Some("uri") => rule = rule.format(Format::Uri),
        Some("byte") => rule = rule.format(Format::Base64),
        // Unrecognized formats fall through to a plain string.
        _ => {}
    }

    if let Some(pattern) = map.get("pattern").and_then(Value::as_str) {
        rule = rule.pattern(pattern);
    }
    if let Some(bound) = map.get("minLength").and_then(Value::as_u64) {
        rule = rule.min_length(bound);
    }
    if let Some(bound) = map.get("maxLength").and_then(Value::as_u64) {
        rule = rule.max_length(bound);
    }

    rule
}

/// Date bounds apply only when truthy; a zero or empty bound is
/// skipped.
fn date_rule(map: &Map<String, Value>) -> Rule {
    let mut rule = Rule::date();
    if let Some(bound) = map.get("minimum") {
        if is_truthy(bound) {
            rule = rule.after(bound.clone());
        }
    }
    if let Some(bound) = map.get("maximum") {
        if is_truthy(bound) {
            rule = rule.before(bound.clone());
        }
    }
    rule
}

/// Binary length bounds keep the same truthiness quirk as dates.
fn binary_rule(map: &Map<String, Value>) -> Rule {
    let mut rule = Rule::binary();
    if let Some(bound) = map.get("minLength") {
        if is_truthy(bound) {
            if let Some(length) = bound.as_u64() {
                rule = rule.min_length(length);
            }
        }
    }
    if let Some(bound) = map.get("maxLength") {
        if is_truthy(bound) {
            if let Some(length) = bound.as_u64() {
                rule = rule.max_length(length);
            }
        }
    }
    rule
}

fn decorate(mut rule: Rule, map: &Map<String, Value>) -> Rule {
    if let Some(description) = map.get("description").and_then(Value::as_str) {
        rule = rule.description(description);
    }
    if let Some(title) = map.get("title").and_then(Value::as_str) {
        rule = rule.label(title);
    }
    if let Some(default) = map.get("default") {
        rule = rule.default_value(default.clone());
    }
    rule
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::translate;
    use crate::types::TranslateOptions;
    use serde_json::json;

    fn resolve_ok(schema: Value) -> Rule {
        translate(&schema, &TranslateOptions::new()).unwrap()
    }

    // === Numbers ===

    #[test]
    fn integer_bounds() {
        let rule = resolve_ok(json!({ "type": "integer", "minimum": 0, "maximum": 10 }));
        assert!(rule.is_valid(&json!(5)));
        assert!(!rule.is_valid(&json!(-1)));
        assert!(!rule.is_valid(&json!(10.5)));
    }

    #[test]
    fn zero_minimum_still_applies() {
        let rule = resolve_ok(json!({ "type": "number", "minimum": 0 }));
        assert!(!rule.is_valid(&json!(-0.5)));
        assert!(rule.is_valid(&json!(0)));
    }

    #[test]
    fn exclusive_bounds() {
        let rule = resolve_ok(json!({
            "type": "number",
            "exclusiveMinimum": 0,
            "exclusiveMaximum": 1
        }));
        assert!(rule.is_valid(&json!(0.5)));
        assert!(!rule.is_valid(&json!(0)));
        assert!(!rule.is_valid(&json!(1)));
    }

    #[test]
    fn zero_multiple_of_is_ignored() {
        let rule = resolve_ok(json!({ "type": "number", "multipleOf": 0 }));
        assert!(rule.is_valid(&json!(7.3)));
    }

    // === Strings ===

    #[test]
    fn string_enum_short_circuits_other_keywords() {
        let rule = resolve_ok(json!({
            "type": "string",
            "enum": ["a", "bb"],
            "minLength": 2
        }));
        // "a" violates minLength but the enum wins.
        assert!(rule.is_valid(&json!("a")));
        assert!(!rule.is_valid(&json!("c")));
    }

    #[test]
    fn email_format_scenario() {
        let rule = resolve_ok(json!({ "type": "string", "format": "email" }));
        assert!(rule.is_valid(&json!("a@b.com")));
        assert!(!rule.is_valid(&json!("not-an-email")));
    }

    #[test]
    fn unknown_format_is_a_plain_string() {
        let rule = resolve_ok(json!({ "type": "string", "format": "uuid" }));
        assert!(rule.is_valid(&json!("anything")));
    }

    #[test]
    fn min_length_zero_allows_empty() {
        let explicit = resolve_ok(json!({ "type": "string", "minLength": 0 }));
        let unspecified = resolve_ok(json!({ "type": "string" }));
        assert!(explicit.is_valid(&json!("")));
        assert!(unspecified.is_valid(&json!("")));
    }

    #[test]
    fn pattern_constraint() {
        let rule = resolve_ok(json!({ "type": "string", "pattern": "^[a-z]+$" }));
        assert!(rule.is_valid(&json!("abc")));
        assert!(!rule.is_valid(&json!("ABC")));
    }

    // === Dates and binary ===

    #[test]
    fn date_format_with_bounds() {
        let rule = resolve_ok(json!({
            "type": "string",
            "format": "date-time",
            "minimum": "2020-01-01",
            "maximum": "2021-01-01"
        }));
        assert!(rule.is_valid(&json!("2020-06-15T00:00:00Z")));
        assert!(!rule.is_valid(&json!("2019-06-15T00:00:00Z")));
    }

    #[test]
    fn falsy_date_bound_is_skipped() {
        let rule = resolve_ok(json!({
            "type": "string",
            "format": "date",
            "minimum": 0
        }));
        // The zero bound never applies.
        assert!(rule.is_valid(&json!("1960-01-01")));
    }

    #[test]
    fn binary_format_with_lengths() {
        let rule = resolve_ok(json!({
            "type": "string",
            "format": "binary",
            "minLength": 2,
            "maxLength": 4
        }));
        assert!(rule.is_valid(&json!("abc")));
        assert!(!rule.is_valid(&json!("a")));
    }

    #[test]
    fn zero_binary_min_length_is_skipped() {
        let rule = resolve_ok(json!({
            "type": "string",
            "format": "binary",
            "minLength": 0
        }));
        assert!(rule.is_valid(&json!("")));
    }

    // === Arrays ===

    #[test]
    fn homogeneous_items() {
        let rule = resolve_ok(json!({
            "type": "array",
            "items": { "type": "number" }
        }));
        assert!(rule.is_valid(&json!([1, 2])));
        assert!(!rule.is_valid(&json!([1, []])));
    }

    #[test]
    fn positional_items_with_additional_cap() {
        let rule = resolve_ok(json!({
            "type": "array",
            "items": [{ "type": "string" }, { "type": "number" }],
            "additionalItems": false
        }));
        assert!(rule.is_valid(&json!(["a", 1])));
        assert!(!rule.is_valid(&json!(["a", 1, "extra"])));
    }

    #[test]
    fn unique_items() {
        let rule = resolve_ok(json!({ "type": "array", "uniqueItems": true }));
        assert!(rule.is_valid(&json!([1, 2])));
        assert!(!rule.is_valid(&json!([1, 1])));
    }

    #[test]
    fn item_count_bounds() {
        let rule = resolve_ok(json!({ "type": "array", "minItems": 1, "maxItems": 2 }));
        assert!(rule.is_valid(&json!([1])));
        assert!(!rule.is_valid(&json!([])));
        assert!(!rule.is_valid(&json!([1, 2, 3])));
    }

    // === Objects ===

    #[test]
    fn required_and_optional_keys() {
        let rule = resolve_ok(json!({
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "name": { "type": "string" }
            },
            "required": ["id"]
        }));
        assert!(rule.is_valid(&json!({ "id": "1" })));
        assert!(rule.is_valid(&json!({ "id": "1", "name": "n" })));
        assert!(!rule.is_valid(&json!({ "name": "n" })));
    }

    #[test]
    fn additional_properties_true_allows_unknown_keys() {
        let rule = resolve_ok(json!({
            "type": "object",
            "properties": { "id": { "type": "string" } },
            "additionalProperties": true
        }));
        assert!(rule.is_valid(&json!({ "id": "1", "extra": [1] })));
    }

    #[test]
    fn additional_properties_schema_constrains_unknown_keys() {
        let rule = resolve_ok(json!({
            "type": "object",
            "properties": { "id": { "type": "string" } },
            "additionalProperties": { "type": "number" }
        }));
        assert!(rule.is_valid(&json!({ "id": "1", "count": 2 })));
        assert!(!rule.is_valid(&json!({ "id": "1", "count": [] })));
    }

    #[test]
    fn property_count_bounds() {
        let rule = resolve_ok(json!({
            "type": "object",
            "additionalProperties": true,
            "minProperties": 1,
            "maxProperties": 2
        }));
        assert!(rule.is_valid(&json!({ "a": 1 })));
        assert!(!rule.is_valid(&json!({})));
        assert!(!rule.is_valid(&json!({ "a": 1, "b": 2, "c": 3 })));
    }

    // === Multi-type and custom types ===

    #[test]
    fn type_sequence_builds_alternation() {
        let rule = resolve_ok(json!({ "type": ["string", "number"] }));
        assert!(rule.is_valid(&json!("x")));
        assert!(rule.is_valid(&json!(1)));
        assert!(!rule.is_valid(&json!([])));
    }

    #[test]
    fn custom_type_lookup() {
        let options = TranslateOptions::new()
            .custom_type("money", Rule::string().pattern(r"^\d+\.\d{2}$"));
        let rule = translate(&json!({ "type": "money" }), &options).unwrap();
        assert!(rule.is_valid(&json!("10.50")));
        assert!(!rule.is_valid(&json!("ten")));
    }

    #[test]
    fn unknown_type_fails() {
        let result = translate(&json!({ "type": "money" }), &TranslateOptions::new());
        assert!(matches!(result, Err(TranslateError::UnresolvedType { .. })));
    }

    #[test]
    fn refine_type_remaps_before_dispatch() {
        fn refine(declared: &str, format: Option<&str>) -> String {
            if declared == "string" && format == Some("identifier") {
                "identifier".to_string()
            } else {
                declared.to_string()
            }
        }
        let options = TranslateOptions::new()
            .refine_type(refine)
            .custom_type("identifier", Rule::string().pattern("^[a-z_]+$"));
        let rule = translate(
            &json!({ "type": "string", "format": "identifier" }),
            &options,
        )
        .unwrap();
        assert!(rule.is_valid(&json!("snake_case")));
        assert!(!rule.is_valid(&json!("Not Snake")));
    }

    // === Strict mode and decorations ===

    #[test]
    fn strict_mode_reaches_every_rule() {
        let schema = json!({
            "type": "object",
            "properties": { "flag": { "type": "boolean" } }
        });
        let loose = translate(&schema, &TranslateOptions::new()).unwrap();
        assert!(loose.is_valid(&json!({ "flag": "true" })));

        let strict = translate(&schema, &TranslateOptions::new().strict(true)).unwrap();
        assert!(!strict.is_valid(&json!({ "flag": "true" })));
        assert!(strict.is_valid(&json!({ "flag": true })));
    }

    #[test]
    fn default_satisfies_required_key() {
        let rule = resolve_ok(json!({
            "type": "object",
            "properties": {
                "count": { "type": "integer", "default": 0 }
            },
            "required": ["count"]
        }));
        assert!(rule.is_valid(&json!({})));
        assert!(!rule.is_valid(&json!({ "count": "zero" })));
    }
}
