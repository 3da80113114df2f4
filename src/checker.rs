//! Instance checking against translated schemas.

use serde_json::Value;

use crate::error::CheckError;
use crate::resolver::translate;
use crate::rule::Rule;
use crate::types::TranslateOptions;

/// Check a value against a JSON Schema.
///
/// Translates the schema into a rule tree, then checks the value
/// against it.
///
/// # Errors
///
/// Returns `CheckError::Translate` if translation fails, or
/// `CheckError::Invalid` if the value doesn't conform.
pub fn check(
    schema: &Value,
    value: &Value,
    options: &TranslateOptions,
) -> Result<(), CheckError> {
    let rule = translate(schema, options)?;
    check_against_rule(&rule, value)
}

/// Check a value against an already-translated rule.
///
/// Use this when you've already translated the schema and want to
/// check multiple values against it.
///
/// # Errors
///
/// Returns `CheckError::Invalid` if the value doesn't conform.
pub fn check_against_rule(rule: &Rule, value: &Value) -> Result<(), CheckError> {
    rule.check(value)
        .map_err(|violations| CheckError::Invalid { violations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn check_valid_value() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" }
            },
            "required": ["name"]
        });
        let value = json!({ "name": "test" });

        let result = check(&schema, &value, &TranslateOptions::new());
        assert!(result.is_ok());
    }

    #[test]
    fn check_missing_required_field() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" }
            },
            "required": ["name"]
        });
        let value = json!({});

        let result = check(&schema, &value, &TranslateOptions::new());
        assert!(matches!(result, Err(CheckError::Invalid { .. })));
    }

    #[test]
    fn check_wrong_type_under_strict_mode() {
        let schema = json!({
            "type": "object",
            "properties": {
                "count": { "type": "number" }
            }
        });
        let value = json!({ "count": "5" });

        // Coerced in the default mode, rejected under strict.
        assert!(check(&schema, &value, &TranslateOptions::new()).is_ok());
        let result = check(&schema, &value, &TranslateOptions::new().strict(true));
        assert!(matches!(result, Err(CheckError::Invalid { .. })));
    }

    #[test]
    fn check_collects_multiple_violations() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "number" }
            },
            "required": ["name", "age"]
        });
        let value = json!({});

        let result = check(&schema, &value, &TranslateOptions::new());
        match result {
            Err(CheckError::Invalid { violations }) => {
                assert_eq!(violations.len(), 2);
            }
            _ => panic!("expected check error with 2 violations"),
        }
    }

    #[test]
    fn check_against_rule_reuses_translation() {
        let rule = translate(
            &json!({ "type": "integer", "minimum": 0 }),
            &TranslateOptions::new(),
        )
        .unwrap();

        assert!(check_against_rule(&rule, &json!(5)).is_ok());
        assert!(check_against_rule(&rule, &json!(-1)).is_err());
    }

    #[test]
    fn check_translation_errors_propagate() {
        let schema = json!({ "type": "money" });
        let result = check(&schema, &json!("1.00"), &TranslateOptions::new());
        assert!(matches!(result, Err(CheckError::Translate(_))));
    }
}
