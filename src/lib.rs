//! Schema Rules
//!
//! Translation of JSON-Schema-style documents into validation rule
//! trees.
//!
//! The translator walks a schema depth-first and builds a parallel
//! [`Rule`] for every node it can classify: type keywords become typed
//! rules with their constraints applied, `anyOf`/`oneOf` become
//! alternations, `not` becomes a negation, `allOf` is flattened into a
//! single composite schema before resolution, and `$ref` pointers are
//! followed against the root document or a registry of named
//! sub-schemas.
//!
//! # Example
//!
//! ```
//! use schema_rules::{translate, TranslateOptions};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "name": { "type": "string", "minLength": 1 },
//!         "age": { "type": "integer", "minimum": 0 }
//!     },
//!     "required": ["name"]
//! });
//!
//! let rule = translate(&schema, &TranslateOptions::new()).unwrap();
//!
//! assert!(rule.is_valid(&json!({ "name": "ada", "age": 36 })));
//! assert!(!rule.is_valid(&json!({ "age": 36 })));
//! ```
//!
//! # Unclassifiable nodes
//!
//! A node matching no known shape is the one non-fatal condition:
//! translation substitutes an accept-anything rule and records a
//! [`Diagnostic`]. Use [`translate_with_diagnostics`] to capture them.
//!
//! # Limits
//!
//! Resolution recurses as deep as the schema nests; circular `$ref`
//! chains are not guarded against and will exhaust the call stack.

mod builders;
mod checker;
mod diagnostics;
mod error;
mod loader;
mod resolver;
mod rule;
mod types;

pub use checker::{check, check_against_rule};
pub use diagnostics::{Diagnostic, Severity};
pub use error::{CheckError, TranslateError, Violation};
pub use loader::{is_url, load_schema, load_schema_auto, load_schema_str};
pub use resolver::{translate, translate_with_diagnostics, Translation};
pub use rule::{Format, Items, Rule, Unknown};
pub use types::{json_type_name, RefineTypeFn, SchemaType, TranslateOptions, BUILT_IN_TYPES};

#[cfg(feature = "remote")]
pub use loader::load_schema_url;
