//! Schema resolution - transforms JSON Schema nodes into validation rules.
//!
//! Resolution is a single depth-first pass: the dispatcher classifies a
//! node, the per-keyword resolvers recurse back into the dispatcher for
//! child nodes, and leaf rules bubble up into composites. No
//! intermediate representation is kept.

use serde_json::{Map, Value};

use crate::diagnostics::Diagnostic;
use crate::error::TranslateError;
use crate::rule::Rule;
use crate::types::{json_type_name, TranslateOptions};

/// Result of a translation: the rule tree plus any diagnostics emitted
/// along the way.
#[derive(Debug, Clone)]
pub struct Translation {
    pub rule: Rule,
    pub diagnostics: Vec<Diagnostic>,
}

/// Translate a schema into a validation rule.
///
/// Diagnostics from the fallback path are discarded; use
/// [`translate_with_diagnostics`] to capture them.
///
/// Resolution recurses as deep as the schema nests, `$ref` chains
/// included. A schema whose `$ref`s form a cycle exhausts the call
/// stack; translation does not guard against it.
///
/// # Errors
///
/// Returns `TranslateError` if the schema is not an object or string,
/// or if any node fails to resolve (see the error variants).
pub fn translate(schema: &Value, options: &TranslateOptions) -> Result<Rule, TranslateError> {
    translate_with_diagnostics(schema, options).map(|translation| translation.rule)
}

/// Translate a schema, returning the rule together with collected
/// diagnostics.
///
/// # Errors
///
/// Same failure surface as [`translate`].
pub fn translate_with_diagnostics(
    schema: &Value,
    options: &TranslateOptions,
) -> Result<Translation, TranslateError> {
    match schema {
        Value::Object(_) | Value::String(_) => {}
        other => {
            return Err(TranslateError::Configuration {
                message: format!(
                    "schema must be an object or string, got {}",
                    json_type_name(other)
                ),
            });
        }
    }

    let mut resolver = Resolver::new(schema, options);
    let rule = resolver.resolve(schema, "")?;
    Ok(Translation {
        rule,
        diagnostics: resolver.diagnostics,
    })
}

/// One resolution pass over a root schema.
///
/// Holds the root (the `$ref` fallback target), the read-only options,
/// and the diagnostics collected so far.
pub(crate) struct Resolver<'a> {
    pub(crate) root: &'a Value,
    pub(crate) options: &'a TranslateOptions,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(root: &'a Value, options: &'a TranslateOptions) -> Self {
        Resolver {
            root,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Classify a node and build its rule. First match wins, in this
    /// exact order: `type`, `anyOf`, `allOf`, `oneOf`, `not`, `$ref`,
    /// `enum`, string shorthand, fallback.
    pub(crate) fn resolve(&mut self, node: &Value, path: &str) -> Result<Rule, TranslateError> {
        if let Value::Object(map) = node {
            if let Some(declared) = map.get("type") {
                return self.resolve_type(declared, map, path);
            }
            if let Some(members) = map.get("anyOf") {
                return self.resolve_any_of(members, path);
            }
            if let Some(members) = map.get("allOf") {
                return self.resolve_all_of(members, path);
            }
            if let Some(members) = map.get("oneOf") {
                return self.resolve_one_of(members, path);
            }
            if let Some(members) = map.get("not") {
                return self.resolve_not(members, path);
            }
            if let Some(reference) = map.get("$ref") {
                let uri = reference
                    .as_str()
                    .ok_or_else(|| TranslateError::Reference {
                        uri: reference.to_string(),
                    })?;
                let target = self.resolve_ref(uri)?;
                return self.resolve(target, path);
            }
            if let Some(values) = map.get("enum") {
                // A bare enum accepts exactly the listed literals,
                // whatever their types.
                let values = values.as_array().ok_or_else(|| TranslateError::Shape {
                    keyword: "enum",
                    path: path.to_string(),
                })?;
                return Ok(Rule::any()
                    .valid(values.clone())
                    .strict(self.options.strict));
            }
        }

        if let Value::String(name) = node {
            // Shorthand: "string" is {"type": "string"}.
            let rule = self.type_rule(name, None, &Map::new(), path)?;
            return Ok(rule);
        }

        self.diagnostics.push(Diagnostic::warning(
            path,
            "unable to classify schema node, accepting any value",
        ));
        Ok(Rule::any().strict(self.options.strict))
    }

    /// Normalize a single node or a sequence of nodes into resolved
    /// rules.
    pub(crate) fn resolve_as_array(
        &mut self,
        value: &Value,
        path: &str,
    ) -> Result<Vec<Rule>, TranslateError> {
        match value {
            Value::Array(nodes) => nodes
                .iter()
                .enumerate()
                .map(|(i, node)| self.resolve(node, &format!("{}/{}", path, i)))
                .collect(),
            single => Ok(vec![self.resolve(single, path)?]),
        }
    }

    // --- Reference resolution ---

    /// Resolve a `$ref` URI to a schema fragment.
    ///
    /// The URI splits at the first `#` into an id prefix (kept with its
    /// `#`) and a slash-delimited fragment path. The id is looked up in
    /// the sub-schema registry as-is, then with the trailing `#`
    /// stripped; the root schema is the fallback candidate. The
    /// fragment is walked segment by segment, skipping the empty
    /// leading segment. Fragments are not cached; every occurrence
    /// re-walks.
    pub(crate) fn resolve_ref(&self, uri: &str) -> Result<&'a Value, TranslateError> {
        let split = uri.find('#').map(|i| i + 1).unwrap_or(0);
        let (id, fragment) = uri.split_at(split);

        let mut candidate = None;
        if !id.is_empty() {
            if let Some(registry) = &self.options.sub_schemas {
                candidate = registry
                    .get(id)
                    .or_else(|| registry.get(id.trim_end_matches('#')));
            }
        }
        let candidate = candidate.unwrap_or(self.root);

        let mut current = candidate;
        for segment in fragment.split('/').skip(1) {
            current = current.get(segment).ok_or_else(|| TranslateError::Reference {
                uri: uri.to_string(),
            })?;
        }
        Ok(current)
    }

    // --- Combinators ---

    fn combinator_members<'v>(
        &self,
        keyword: &'static str,
        value: &'v Value,
        path: &str,
    ) -> Result<&'v Vec<Value>, TranslateError> {
        value.as_array().ok_or_else(|| TranslateError::Shape {
            keyword,
            path: path.to_string(),
        })
    }

    /// `anyOf`: valid when at least one member matches. Never required.
    fn resolve_any_of(&mut self, value: &Value, path: &str) -> Result<Rule, TranslateError> {
        let members = self.combinator_members("anyOf", value, path)?;
        let mut options = Vec::with_capacity(members.len());
        for (i, member) in members.iter().enumerate() {
            options.push(self.resolve(member, &format!("{}/anyOf/{}", path, i))?);
        }
        Ok(Rule::alternatives(options).strict(self.options.strict))
    }

    /// `oneOf`: alternation like `anyOf`, but the result is required.
    /// Exclusivity is not enforced; only "matches at least one" is
    /// encoded.
    fn resolve_one_of(&mut self, value: &Value, path: &str) -> Result<Rule, TranslateError> {
        let members = self.combinator_members("oneOf", value, path)?;
        let mut options = Vec::with_capacity(members.len());
        for (i, member) in members.iter().enumerate() {
            options.push(self.resolve(member, &format!("{}/oneOf/{}", path, i))?);
        }
        Ok(Rule::alternatives(options)
            .required()
            .strict(self.options.strict))
    }

    /// `not`: forbidden exactly when the value matches any member,
    /// otherwise unconstrained.
    fn resolve_not(&mut self, value: &Value, path: &str) -> Result<Rule, TranslateError> {
        let members = self.combinator_members("not", value, path)?;
        let mut options = Vec::with_capacity(members.len());
        for (i, member) in members.iter().enumerate() {
            options.push(self.resolve(member, &format!("{}/not/{}", path, i))?);
        }
        Ok(Rule::negation(options).strict(self.options.strict))
    }

    // --- allOf merging ---

    /// `allOf`: flatten the members into one composite schema, then
    /// feed it back through the dispatcher.
    fn resolve_all_of(&mut self, value: &Value, path: &str) -> Result<Rule, TranslateError> {
        let members = self.combinator_members("allOf", value, path)?;
        let merged = self.merge_all_of(members, path)?;
        self.resolve(&merged, path)
    }

    /// Flatten an `allOf` list of object- or array-shaped schemas into
    /// one synthetic node. Every member must share the first member's
    /// type; `$ref` members are dereferenced before inspection.
    fn merge_all_of(&self, members: &[Value], path: &str) -> Result<Value, TranslateError> {
        if members.is_empty() {
            return Err(TranslateError::MergeType {
                path: path.to_string(),
                message: "allOf has no members".to_string(),
            });
        }

        let mut derefed: Vec<&Value> = Vec::with_capacity(members.len());
        for member in members {
            let node = match member.get("$ref").and_then(Value::as_str) {
                Some(uri) => self.resolve_ref(uri)?,
                None => member,
            };
            derefed.push(node);
        }

        let target = derefed[0]
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| TranslateError::MergeType {
                path: path.to_string(),
                message: "first member declares no type".to_string(),
            })?;
        if target != "object" && target != "array" {
            return Err(TranslateError::MergeType {
                path: path.to_string(),
                message: format!("members must be objects or arrays, got \"{}\"", target),
            });
        }
        for node in &derefed {
            let member_type = node.get("type").and_then(Value::as_str);
            if member_type != Some(target) {
                return Err(TranslateError::MergeType {
                    path: path.to_string(),
                    message: format!(
                        "members disagree on type: expected \"{}\", got \"{}\"",
                        target,
                        member_type.unwrap_or("none")
                    ),
                });
            }
        }

        let merged = if target == "object" {
            // Later members overwrite earlier properties; required
            // lists concatenate without dedup.
            let mut properties = Map::new();
            let mut required = Vec::new();
            for node in &derefed {
                if let Some(props) = node.get("properties").and_then(Value::as_object) {
                    for (name, child) in props {
                        properties.insert(name.clone(), child.clone());
                    }
                }
                if let Some(names) = node.get("required").and_then(Value::as_array) {
                    required.extend(names.iter().cloned());
                }
            }
            let mut node = Map::new();
            node.insert("type".to_string(), Value::String("object".to_string()));
            node.insert("properties".to_string(), Value::Object(properties));
            if !required.is_empty() {
                node.insert("required".to_string(), Value::Array(required));
            }
            Value::Object(node)
        } else {
            // Sequences flatten in (with their parallel `ordered`
            // lists); a single item schema joins as one entry.
            let mut items = Vec::new();
            for node in &derefed {
                match node.get("items") {
                    Some(Value::Array(list)) => {
                        items.extend(list.iter().cloned());
                        if let Some(ordered) = node.get("ordered").and_then(Value::as_array) {
                            items.extend(ordered.iter().cloned());
                        }
                    }
                    Some(single) => items.push(single.clone()),
                    None => {}
                }
            }
            let mut node = Map::new();
            node.insert("type".to_string(), Value::String("array".to_string()));
            node.insert("items".to_string(), Value::Array(items));
            Value::Object(node)
        };

        Ok(merged)
    }
}
