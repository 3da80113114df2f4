//! Validation rule values.
//!
//! A [`Rule`] is the output of translation: an immutable value built by
//! chainable constraint application. Every constraint method consumes
//! the rule and returns the updated value, so rules are never shared
//! mutable state across recursive resolution calls.
//!
//! Rules also carry their own runtime entry point: [`Rule::check`]
//! walks a JSON value and collects [`Violation`]s with JSON Pointer
//! paths.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::Violation;
use crate::types::json_type_name;

/// Built-in string format constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Email,
    Hostname,
    Ipv4,
    Ipv6,
    Uri,
    Base64,
}

/// Item constraints for array rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Items {
    /// Every element must match one rule.
    Single(Box<Rule>),
    /// Element at position `i` must match rule `i`.
    Positional(Vec<Rule>),
}

/// How an object rule treats keys it does not declare.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unknown {
    /// Unknown keys are rejected.
    Deny,
    /// Unknown keys are accepted without constraint.
    Allow,
    /// Unknown keys must match this rule.
    Schema(Box<Rule>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum RuleKind {
    /// No constraint; accepts any value.
    Any,
    Boolean,
    Null,
    Number {
        #[serde(skip_serializing_if = "is_false")]
        integer: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        greater: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        less: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        multiple_of: Option<f64>,
    },
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<Format>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_length: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<u64>,
    },
    Date {
        #[serde(skip_serializing_if = "Option::is_none")]
        after: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        before: Option<Value>,
    },
    Binary {
        #[serde(skip_serializing_if = "Option::is_none")]
        min_length: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_length: Option<u64>,
    },
    Array {
        #[serde(skip_serializing_if = "Option::is_none")]
        items: Option<Items>,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_items: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_items: Option<u64>,
        #[serde(skip_serializing_if = "is_false")]
        unique: bool,
    },
    Object {
        keys: Vec<(String, Rule)>,
        unknown: Unknown,
        #[serde(skip_serializing_if = "Option::is_none")]
        min_keys: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max_keys: Option<u64>,
    },
    /// Valid when at least one option matches.
    Alternatives { options: Vec<Rule> },
    /// Forbidden exactly when at least one option matches; otherwise
    /// unconstrained.
    Negation { options: Vec<Rule> },
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// One validation rule.
///
/// Constructed by the per-kind constructors and refined by chainable
/// constraint application. Each application returns a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    #[serde(flatten)]
    kind: RuleKind,
    #[serde(skip_serializing_if = "is_false")]
    required: bool,
    #[serde(skip_serializing_if = "is_false")]
    strict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    /// Literal whitelist; when present, membership replaces all kind
    /// constraints.
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<Vec<Value>>,
}

impl Rule {
    fn with_kind(kind: RuleKind) -> Self {
        Rule {
            kind,
            required: false,
            strict: false,
            label: None,
            description: None,
            default: None,
            valid: None,
        }
    }

    /// Accept-anything rule.
    pub fn any() -> Self {
        Rule::with_kind(RuleKind::Any)
    }

    pub fn boolean() -> Self {
        Rule::with_kind(RuleKind::Boolean)
    }

    /// Literal-null-only rule.
    pub fn null() -> Self {
        Rule::with_kind(RuleKind::Null)
    }

    pub fn number() -> Self {
        Rule::with_kind(RuleKind::Number {
            integer: false,
            min: None,
            max: None,
            greater: None,
            less: None,
            multiple_of: None,
        })
    }

    pub fn string() -> Self {
        Rule::with_kind(RuleKind::String {
            pattern: None,
            format: None,
            min_length: None,
            max_length: None,
        })
    }

    pub fn date() -> Self {
        Rule::with_kind(RuleKind::Date {
            after: None,
            before: None,
        })
    }

    pub fn binary() -> Self {
        Rule::with_kind(RuleKind::Binary {
            min_length: None,
            max_length: None,
        })
    }

    pub fn array() -> Self {
        Rule::with_kind(RuleKind::Array {
            items: None,
            min_items: None,
            max_items: None,
            unique: false,
        })
    }

    pub fn object() -> Self {
        Rule::with_kind(RuleKind::Object {
            keys: Vec::new(),
            unknown: Unknown::Deny,
            min_keys: None,
            max_keys: None,
        })
    }

    /// Alternation: valid when at least one option matches.
    pub fn alternatives(options: Vec<Rule>) -> Self {
        Rule::with_kind(RuleKind::Alternatives { options })
    }

    /// Negation: forbidden when any option matches, otherwise
    /// unconstrained.
    pub fn negation(options: Vec<Rule>) -> Self {
        Rule::with_kind(RuleKind::Negation { options })
    }

    // --- Shared decorations ---

    /// Mark the rule required (enforced where the rule sits under an
    /// object key or positional array slot).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set strict mode: the value must already have the native JSON
    /// type; no coercion from strings is accepted.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Default value substituted for an absent object key; an absent
    /// key with a default satisfies `required`.
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Restrict the rule to a literal whitelist. Membership replaces
    /// all other kind constraints.
    pub fn valid(mut self, values: Vec<Value>) -> Self {
        self.valid = Some(values);
        self
    }

    // --- Number constraints ---

    pub fn integer(mut self) -> Self {
        if let RuleKind::Number { integer, .. } = &mut self.kind {
            *integer = true;
        }
        self
    }

    /// Inclusive lower bound.
    pub fn min(mut self, bound: f64) -> Self {
        if let RuleKind::Number { min, .. } = &mut self.kind {
            *min = Some(bound);
        }
        self
    }

    /// Inclusive upper bound.
    pub fn max(mut self, bound: f64) -> Self {
        if let RuleKind::Number { max, .. } = &mut self.kind {
            *max = Some(bound);
        }
        self
    }

    /// Strict lower bound.
    pub fn greater(mut self, bound: f64) -> Self {
        if let RuleKind::Number { greater, .. } = &mut self.kind {
            *greater = Some(bound);
        }
        self
    }

    /// Strict upper bound.
    pub fn less(mut self, bound: f64) -> Self {
        if let RuleKind::Number { less, .. } = &mut self.kind {
            *less = Some(bound);
        }
        self
    }

    pub fn multiple_of(mut self, base: f64) -> Self {
        if let RuleKind::Number { multiple_of, .. } = &mut self.kind {
            *multiple_of = Some(base);
        }
        self
    }

    // --- String / binary constraints ---

    /// Unanchored regular-expression constraint.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        if let RuleKind::String { pattern: p, .. } = &mut self.kind {
            *p = Some(pattern.into());
        }
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        if let RuleKind::String { format: f, .. } = &mut self.kind {
            *f = Some(format);
        }
        self
    }

    /// Minimum length: characters for strings, bytes for binary.
    pub fn min_length(mut self, bound: u64) -> Self {
        match &mut self.kind {
            RuleKind::String { min_length, .. } | RuleKind::Binary { min_length, .. } => {
                *min_length = Some(bound);
            }
            _ => {}
        }
        self
    }

    /// Maximum length: characters for strings, bytes for binary.
    pub fn max_length(mut self, bound: u64) -> Self {
        match &mut self.kind {
            RuleKind::String { max_length, .. } | RuleKind::Binary { max_length, .. } => {
                *max_length = Some(bound);
            }
            _ => {}
        }
        self
    }

    // --- Date constraints ---

    /// Inclusive lower date bound (a date string or epoch number).
    pub fn after(mut self, bound: Value) -> Self {
        if let RuleKind::Date { after, .. } = &mut self.kind {
            *after = Some(bound);
        }
        self
    }

    /// Inclusive upper date bound.
    pub fn before(mut self, bound: Value) -> Self {
        if let RuleKind::Date { before, .. } = &mut self.kind {
            *before = Some(bound);
        }
        self
    }

    // --- Array constraints ---

    /// Homogeneous item rule: every element must match.
    pub fn items(mut self, rule: Rule) -> Self {
        if let RuleKind::Array { items, .. } = &mut self.kind {
            *items = Some(Items::Single(Box::new(rule)));
        }
        self
    }

    /// Positional item rules: element `i` must match rule `i`.
    pub fn ordered(mut self, rules: Vec<Rule>) -> Self {
        if let RuleKind::Array { items, .. } = &mut self.kind {
            *items = Some(Items::Positional(rules));
        }
        self
    }

    pub fn min_items(mut self, bound: u64) -> Self {
        if let RuleKind::Array { min_items, .. } = &mut self.kind {
            *min_items = Some(bound);
        }
        self
    }

    pub fn max_items(mut self, bound: u64) -> Self {
        if let RuleKind::Array { max_items, .. } = &mut self.kind {
            *max_items = Some(bound);
        }
        self
    }

    /// Require element distinctness.
    pub fn unique(mut self) -> Self {
        if let RuleKind::Array { unique, .. } = &mut self.kind {
            *unique = true;
        }
        self
    }

    // --- Object constraints ---

    /// Declare a key with its child rule. Declaring the same key again
    /// replaces the earlier rule.
    pub fn key(mut self, name: impl Into<String>, rule: Rule) -> Self {
        if let RuleKind::Object { keys, .. } = &mut self.kind {
            let name = name.into();
            if let Some(entry) = keys.iter_mut().find(|(k, _)| *k == name) {
                entry.1 = rule;
            } else {
                keys.push((name, rule));
            }
        }
        self
    }

    /// Allow or deny undeclared keys.
    pub fn unknown(mut self, allow: bool) -> Self {
        if let RuleKind::Object { unknown, .. } = &mut self.kind {
            *unknown = if allow { Unknown::Allow } else { Unknown::Deny };
        }
        self
    }

    /// Undeclared keys must match the given rule.
    pub fn unknown_schema(mut self, rule: Rule) -> Self {
        if let RuleKind::Object { unknown, .. } = &mut self.kind {
            *unknown = Unknown::Schema(Box::new(rule));
        }
        self
    }

    pub fn min_keys(mut self, bound: u64) -> Self {
        if let RuleKind::Object { min_keys, .. } = &mut self.kind {
            *min_keys = Some(bound);
        }
        self
    }

    pub fn max_keys(mut self, bound: u64) -> Self {
        if let RuleKind::Object { max_keys, .. } = &mut self.kind {
            *max_keys = Some(bound);
        }
        self
    }

    // --- Introspection ---

    /// Whether the rule is marked required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the rule carries any constraint at all.
    pub fn is_any(&self) -> bool {
        matches!(self.kind, RuleKind::Any) && self.valid.is_none()
    }

    // --- Checking ---

    /// Check a value against the rule.
    ///
    /// Collects every violation rather than stopping at the first, with
    /// JSON Pointer paths into the checked value.
    ///
    /// # Errors
    ///
    /// Returns the collected violations when the value does not
    /// conform.
    pub fn check(&self, value: &Value) -> Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        self.check_at("", value, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Check a value, discarding violation detail.
    pub fn is_valid(&self, value: &Value) -> bool {
        let mut violations = Vec::new();
        self.check_at("", value, &mut violations);
        violations.is_empty()
    }

    fn violation(&self, path: &str, message: String, out: &mut Vec<Violation>) {
        out.push(Violation {
            path: path.to_string(),
            message,
        });
    }

    fn check_at(&self, path: &str, value: &Value, out: &mut Vec<Violation>) {
        // A literal whitelist replaces all kind constraints.
        if let Some(values) = &self.valid {
            if !values.contains(value) {
                self.violation(path, "is not one of the allowed values".to_string(), out);
            }
            return;
        }

        match &self.kind {
            RuleKind::Any => {}
            RuleKind::Boolean => self.check_boolean(path, value, out),
            RuleKind::Null => {
                if !value.is_null() {
                    self.violation(
                        path,
                        format!("expected null, got {}", json_type_name(value)),
                        out,
                    );
                }
            }
            RuleKind::Number { .. } => self.check_number(path, value, out),
            RuleKind::String { .. } => self.check_string(path, value, out),
            RuleKind::Date { after, before } => check_date(self, path, value, after, before, out),
            RuleKind::Binary {
                min_length,
                max_length,
            } => check_binary(self, path, value, *min_length, *max_length, out),
            RuleKind::Array { .. } => self.check_array(path, value, out),
            RuleKind::Object { .. } => self.check_object(path, value, out),
            RuleKind::Alternatives { options } => {
                if !options.iter().any(|option| option.is_valid(value)) {
                    self.violation(
                        path,
                        "does not match any of the allowed alternatives".to_string(),
                        out,
                    );
                }
            }
            RuleKind::Negation { options } => {
                if options.iter().any(|option| option.is_valid(value)) {
                    self.violation(path, "matches a forbidden schema".to_string(), out);
                }
            }
        }
    }

    fn check_boolean(&self, path: &str, value: &Value, out: &mut Vec<Violation>) {
        match value {
            Value::Bool(_) => {}
            Value::String(s) if !self.strict && (s == "true" || s == "false") => {}
            other => self.violation(
                path,
                format!("expected boolean, got {}", json_type_name(other)),
                out,
            ),
        }
    }

    fn check_number(&self, path: &str, value: &Value, out: &mut Vec<Violation>) {
        let RuleKind::Number {
            integer,
            min,
            max,
            greater,
            less,
            multiple_of,
        } = &self.kind
        else {
            return;
        };

        let numeric = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if !self.strict => s.parse::<f64>().ok(),
            _ => None,
        };
        let Some(v) = numeric else {
            self.violation(
                path,
                format!("expected number, got {}", json_type_name(value)),
                out,
            );
            return;
        };

        if *integer && v.fract() != 0.0 {
            self.violation(path, format!("{} is not an integer", v), out);
        }
        if let Some(bound) = min {
            if v < *bound {
                self.violation(path, format!("{} is less than minimum {}", v, bound), out);
            }
        }
        if let Some(bound) = max {
            if v > *bound {
                self.violation(path, format!("{} exceeds maximum {}", v, bound), out);
            }
        }
        if let Some(bound) = greater {
            if v <= *bound {
                self.violation(path, format!("{} must be greater than {}", v, bound), out);
            }
        }
        if let Some(bound) = less {
            if v >= *bound {
                self.violation(path, format!("{} must be less than {}", v, bound), out);
            }
        }
        if let Some(base) = multiple_of {
            let remainder = (v % base).abs();
            if remainder > 1e-9 && (base.abs() - remainder) > 1e-9 {
                self.violation(path, format!("{} is not a multiple of {}", v, base), out);
            }
        }
    }

    fn check_string(&self, path: &str, value: &Value, out: &mut Vec<Violation>) {
        let RuleKind::String {
            pattern,
            format,
            min_length,
            max_length,
        } = &self.kind
        else {
            return;
        };

        // Strings never coerce: a number stays a number even in the
        // default mode.
        let Some(text) = value.as_str() else {
            self.violation(
                path,
                format!("expected string, got {}", json_type_name(value)),
                out,
            );
            return;
        };

        let length = text.chars().count() as u64;
        if let Some(bound) = min_length {
            if length < *bound {
                self.violation(
                    path,
                    format!("length {} is less than minimum {}", length, bound),
                    out,
                );
            }
        }
        if let Some(bound) = max_length {
            if length > *bound {
                self.violation(
                    path,
                    format!("length {} exceeds maximum {}", length, bound),
                    out,
                );
            }
        }
        if let Some(pattern) = pattern {
            match Regex::new(pattern) {
                Ok(re) => {
                    if !re.is_match(text) {
                        self.violation(
                            path,
                            format!("does not match pattern \"{}\"", pattern),
                            out,
                        );
                    }
                }
                Err(_) => {
                    self.violation(path, format!("invalid pattern \"{}\"", pattern), out);
                }
            }
        }
        if let Some(format) = format {
            if !format_matches(*format, text) {
                self.violation(path, format!("is not a valid {}", format_name(*format)), out);
            }
        }
    }

    fn check_array(&self, path: &str, value: &Value, out: &mut Vec<Violation>) {
        let RuleKind::Array {
            items,
            min_items,
            max_items,
            unique,
        } = &self.kind
        else {
            return;
        };

        let Some(elements) = value.as_array() else {
            self.violation(
                path,
                format!("expected array, got {}", json_type_name(value)),
                out,
            );
            return;
        };

        let count = elements.len() as u64;
        if let Some(bound) = min_items {
            if count < *bound {
                self.violation(
                    path,
                    format!("{} item(s) is fewer than minimum {}", count, bound),
                    out,
                );
            }
        }
        if let Some(bound) = max_items {
            if count > *bound {
                self.violation(
                    path,
                    format!("{} item(s) exceeds maximum {}", count, bound),
                    out,
                );
            }
        }

        match items {
            Some(Items::Single(rule)) => {
                for (i, element) in elements.iter().enumerate() {
                    rule.check_at(&format!("{}/{}", path, i), element, out);
                }
            }
            Some(Items::Positional(rules)) => {
                for (i, rule) in rules.iter().enumerate() {
                    match elements.get(i) {
                        Some(element) => rule.check_at(&format!("{}/{}", path, i), element, out),
                        None if rule.required => self.violation(
                            &format!("{}/{}", path, i),
                            "required item is missing".to_string(),
                            out,
                        ),
                        None => {}
                    }
                }
            }
            None => {}
        }

        if *unique {
            for (i, element) in elements.iter().enumerate() {
                if elements[..i].contains(element) {
                    self.violation(
                        &format!("{}/{}", path, i),
                        "duplicate item in unique array".to_string(),
                        out,
                    );
                }
            }
        }
    }

    fn check_object(&self, path: &str, value: &Value, out: &mut Vec<Violation>) {
        let RuleKind::Object {
            keys,
            unknown,
            min_keys,
            max_keys,
        } = &self.kind
        else {
            return;
        };

        let Some(map) = value.as_object() else {
            self.violation(
                path,
                format!("expected object, got {}", json_type_name(value)),
                out,
            );
            return;
        };

        let count = map.len() as u64;
        if let Some(bound) = min_keys {
            if count < *bound {
                self.violation(
                    path,
                    format!("{} key(s) is fewer than minimum {}", count, bound),
                    out,
                );
            }
        }
        if let Some(bound) = max_keys {
            if count > *bound {
                self.violation(
                    path,
                    format!("{} key(s) exceeds maximum {}", count, bound),
                    out,
                );
            }
        }

        for (name, rule) in keys {
            match map.get(name) {
                Some(child) => rule.check_at(&format!("{}/{}", path, name), child, out),
                // An absent key with a default takes the default.
                None if rule.required && rule.default.is_none() => self.violation(
                    &format!("{}/{}", path, name),
                    "is required".to_string(),
                    out,
                ),
                None => {}
            }
        }

        for name in map.keys() {
            if keys.iter().any(|(k, _)| k == name) {
                continue;
            }
            match unknown {
                Unknown::Allow => {}
                Unknown::Deny => self.violation(
                    &format!("{}/{}", path, name),
                    "is not allowed".to_string(),
                    out,
                ),
                Unknown::Schema(rule) => {
                    rule.check_at(&format!("{}/{}", path, name), &map[name], out)
                }
            }
        }
    }
}

// --- Date handling ---

/// Parse a date value: RFC 3339, `YYYY-MM-DD`, or an epoch-millisecond
/// number.
pub(crate) fn parse_date(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|d| d.naive_utc())
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            }),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|d| d.naive_utc()),
        _ => None,
    }
}

fn check_date(
    rule: &Rule,
    path: &str,
    value: &Value,
    after: &Option<Value>,
    before: &Option<Value>,
    out: &mut Vec<Violation>,
) {
    let parsed = match value {
        Value::String(_) => parse_date(value),
        Value::Number(_) if !rule.strict => parse_date(value),
        _ => None,
    };
    let Some(date) = parsed else {
        rule.violation(path, "is not a valid date".to_string(), out);
        return;
    };

    if let Some(bound) = after {
        if let Some(limit) = parse_date(bound) {
            if date < limit {
                rule.violation(path, format!("date is earlier than {}", bound), out);
            }
        }
    }
    if let Some(bound) = before {
        if let Some(limit) = parse_date(bound) {
            if date > limit {
                rule.violation(path, format!("date is later than {}", bound), out);
            }
        }
    }
}

fn check_binary(
    rule: &Rule,
    path: &str,
    value: &Value,
    min_length: Option<u64>,
    max_length: Option<u64>,
    out: &mut Vec<Violation>,
) {
    let Some(text) = value.as_str() else {
        rule.violation(
            path,
            format!("expected binary string, got {}", json_type_name(value)),
            out,
        );
        return;
    };

    let length = text.len() as u64;
    if let Some(bound) = min_length {
        if length < bound {
            rule.violation(
                path,
                format!("length {} is less than minimum {}", length, bound),
                out,
            );
        }
    }
    if let Some(bound) = max_length {
        if length > bound {
            rule.violation(
                path,
                format!("length {} exceeds maximum {}", length, bound),
                out,
            );
        }
    }
}

// --- Format constraints ---

fn format_name(format: Format) -> &'static str {
    match format {
        Format::Email => "email address",
        Format::Hostname => "hostname",
        Format::Ipv4 => "IPv4 address",
        Format::Ipv6 => "IPv6 address",
        Format::Uri => "URI",
        Format::Base64 => "base64 string",
    }
}

fn format_matches(format: Format, text: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    static HOSTNAME: OnceLock<Regex> = OnceLock::new();
    static URI: OnceLock<Regex> = OnceLock::new();
    static BASE64: OnceLock<Regex> = OnceLock::new();

    match format {
        Format::Email => EMAIL
            .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
            .is_match(text),
        Format::Hostname => HOSTNAME
            .get_or_init(|| {
                Regex::new(
                    r"^(?i)[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*$",
                )
                .expect("static regex")
            })
            .is_match(text),
        Format::Ipv4 => text.parse::<Ipv4Addr>().is_ok(),
        Format::Ipv6 => text.parse::<Ipv6Addr>().is_ok(),
        Format::Uri => URI
            .get_or_init(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:\S*$").expect("static regex"))
            .is_match(text),
        Format::Base64 => BASE64
            .get_or_init(|| {
                Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
                    .expect("static regex")
            })
            .is_match(text),
    }
}
