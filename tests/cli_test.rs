//! CLI integration tests for the schema-rules binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("schema-rules"))
}

// Helper to create a temp file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

mod translate_command {
    use super::*;

    #[test]
    fn basic_translate() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{
                "type": "object",
                "properties": {
                    "id": { "type": "string" }
                },
                "required": ["id"]
            }"#,
        );

        cmd()
            .args(["translate", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""kind":"object""#))
            .stdout(predicate::str::contains(r#""required":true"#));
    }

    #[test]
    fn translate_with_pretty() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"type":"object","properties":{"id":{"type":"string"}}}"#,
        );

        cmd()
            .args(["translate", schema.to_str().unwrap(), "--pretty"])
            .assert()
            .success()
            // Pretty output has newlines and indentation
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn translate_with_output_file() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"type":"string","minLength":1}"#,
        );
        let output = dir.path().join("rule.json");

        cmd()
            .args([
                "translate",
                schema.to_str().unwrap(),
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains(r#""kind":"string""#));
    }

    #[test]
    fn translate_unclassifiable_node_warns_on_stderr() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", r#"{"foo":"bar"}"#);

        cmd()
            .args(["translate", schema.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""kind":"any""#))
            .stderr(predicate::str::contains("unable to classify"));
    }

    #[test]
    fn translate_missing_file_exits_3() {
        cmd()
            .args(["translate", "/nonexistent/schema.json"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn translate_merge_error_exits_2() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"allOf":[{"type":"object","properties":{}},{"type":"array"}]}"#,
        );

        cmd()
            .args(["translate", schema.to_str().unwrap()])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("cannot merge allOf"));
    }

    #[test]
    fn translate_with_sub_schema() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"$ref":"defs#/name"}"#,
        );
        let defs = write_temp_file(&dir, "defs.json", r#"{"name":{"type":"string"}}"#);

        cmd()
            .args([
                "translate",
                schema.to_str().unwrap(),
                "--sub-schema",
                &format!("defs#={}", defs.to_str().unwrap()),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""kind":"string""#));
    }

    #[test]
    fn translate_bad_sub_schema_flag_exits_2() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", r#"{"type":"string"}"#);

        cmd()
            .args([
                "translate",
                schema.to_str().unwrap(),
                "--sub-schema",
                "missing-equals-sign",
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("expects id=path"));
    }
}

mod check_command {
    use super::*;

    fn person_schema(dir: &TempDir) -> std::path::PathBuf {
        write_temp_file(
            dir,
            "schema.json",
            r#"{
                "type": "object",
                "properties": {
                    "name": { "type": "string", "minLength": 1 },
                    "age": { "type": "integer", "minimum": 0 }
                },
                "required": ["name"]
            }"#,
        )
    }

    #[test]
    fn check_valid_value() {
        let dir = TempDir::new().unwrap();
        let schema = person_schema(&dir);
        let value = write_temp_file(&dir, "value.json", r#"{"name":"ada","age":36}"#);

        cmd()
            .args([
                "check",
                value.to_str().unwrap(),
                "--schema",
                schema.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Valid"));
    }

    #[test]
    fn check_invalid_value_exits_1() {
        let dir = TempDir::new().unwrap();
        let schema = person_schema(&dir);
        let value = write_temp_file(&dir, "value.json", r#"{"age":-1}"#);

        cmd()
            .args([
                "check",
                value.to_str().unwrap(),
                "--schema",
                schema.to_str().unwrap(),
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("/name"))
            .stderr(predicate::str::contains("/age"));
    }

    #[test]
    fn check_json_output_valid() {
        let dir = TempDir::new().unwrap();
        let schema = person_schema(&dir);
        let value = write_temp_file(&dir, "value.json", r#"{"name":"ada"}"#);

        cmd()
            .args([
                "check",
                value.to_str().unwrap(),
                "--schema",
                schema.to_str().unwrap(),
                "--json",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""valid":true"#));
    }

    #[test]
    fn check_json_output_invalid() {
        let dir = TempDir::new().unwrap();
        let schema = person_schema(&dir);
        let value = write_temp_file(&dir, "value.json", r#"{}"#);

        cmd()
            .args([
                "check",
                value.to_str().unwrap(),
                "--schema",
                schema.to_str().unwrap(),
                "--json",
            ])
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""valid":false"#))
            .stdout(predicate::str::contains(r#""violations""#));
    }

    #[test]
    fn check_strict_mode_rejects_coerced_values() {
        let dir = TempDir::new().unwrap();
        let schema = person_schema(&dir);
        let value = write_temp_file(&dir, "value.json", r#"{"name":"ada","age":"36"}"#);

        // Default mode coerces the numeric string.
        cmd()
            .args([
                "check",
                value.to_str().unwrap(),
                "--schema",
                schema.to_str().unwrap(),
            ])
            .assert()
            .success();

        cmd()
            .args([
                "check",
                value.to_str().unwrap(),
                "--schema",
                schema.to_str().unwrap(),
                "--strict",
                "true",
            ])
            .assert()
            .code(1);
    }

    #[test]
    fn check_missing_value_file_exits_3() {
        let dir = TempDir::new().unwrap();
        let schema = person_schema(&dir);

        cmd()
            .args([
                "check",
                "/nonexistent/value.json",
                "--schema",
                schema.to_str().unwrap(),
            ])
            .assert()
            .code(3);
    }
}
