//! CLI integration tests for openapi-filter binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("openapi-filter"))
}

// Helper to create a temp file
fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const PETSTORE: &str = r##"{
    "openapi": "3.0.0",
    "info": { "title": "Petstore", "version": "1.0.0" },
    "paths": {
        "/pets": {
            "get": {
                "responses": {
                    "200": {
                        "description": "ok",
                        "content": {
                            "application/json": {
                                "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }
                            }
                        }
                    }
                }
            }
        },
        "/pets/{id}": {
            "get": {
                "responses": {
                    "200": {
                        "description": "ok",
                        "content": {
                            "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } }
                        }
                    }
                }
            }
        },
        "/owners": {
            "get": {
                "responses": {
                    "200": {
                        "description": "ok",
                        "content": {
                            "application/json": { "schema": { "$ref": "#/components/schemas/Owner" } }
                        }
                    }
                }
            }
        }
    },
    "components": {
        "schemas": {
            "Pet": {
                "type": "object",
                "properties": { "category": { "$ref": "#/components/schemas/Category" } }
            },
            "Category": { "type": "string" },
            "Owner": { "type": "object" }
        }
    }
}"##;

const SWAGGER_YAML: &str = r##"swagger: "2.0"
info:
  title: Legacy
  version: "1"
paths:
  /orders:
    get:
      responses:
        "200":
          description: ok
          schema:
            $ref: "#/definitions/Order"
  /users:
    get:
      responses:
        "200":
          description: ok
          schema:
            $ref: "#/definitions/User"
definitions:
  Order:
    type: object
    properties:
      lines:
        type: array
        items:
          $ref: "#/definitions/Line"
  Line:
    type: object
  User:
    type: object
"##;

fn parse_stdout(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

mod filter_command {
    use super::*;

    #[test]
    fn exact_path() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        let output = cmd()
            .args(["filter", spec.to_str().unwrap(), "--path", "/pets"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let doc = parse_stdout(&output);
        let paths = doc["paths"].as_object().unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths.contains_key("/pets"));

        let schemas = doc["components"]["schemas"].as_object().unwrap();
        assert!(schemas.contains_key("Pet"));
        assert!(schemas.contains_key("Category"));
        assert!(!schemas.contains_key("Owner"));
    }

    #[test]
    fn regex_paths() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        let output = cmd()
            .args(["filter", spec.to_str().unwrap(), "--regex", "-p", "^/pets"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let doc = parse_stdout(&output);
        assert_eq!(doc["paths"].as_object().unwrap().len(), 2);
        assert!(doc["components"]["schemas"].get("Owner").is_none());
    }

    #[test]
    fn summary_on_stderr() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        cmd()
            .args(["filter", spec.to_str().unwrap(), "--path", "/owners"])
            .assert()
            .success()
            .stderr(predicate::str::contains("paths: 1 of 3 retained"))
            .stderr(predicate::str::contains("schemas: 1 of 3 retained"));
    }

    #[test]
    fn json_report() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        cmd()
            .args([
                "filter",
                spec.to_str().unwrap(),
                "--path",
                "/pets",
                "--report",
                "json",
            ])
            .assert()
            .success()
            .stderr(predicate::str::contains(
                r#""schemas":{"total":3,"retained":2}"#,
            ));
    }

    #[test]
    fn quiet_suppresses_summary() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        cmd()
            .args(["filter", spec.to_str().unwrap(), "--path", "/pets", "--quiet"])
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn pretty_output() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        cmd()
            .args([
                "filter",
                spec.to_str().unwrap(),
                "--path",
                "/pets",
                "--pretty",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn output_file() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);
        let output = dir.path().join("subset.json");

        cmd()
            .args([
                "filter",
                spec.to_str().unwrap(),
                "--path",
                "/owners",
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let doc: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let schemas = doc["components"]["schemas"].as_object().unwrap();
        assert_eq!(schemas.keys().collect::<Vec<_>>(), ["Owner"]);
    }

    #[test]
    fn paths_file() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);
        let selectors = write_temp_file(&dir, "keep.txt", "# pets only\n/pets/{id}\n\n");

        let output = cmd()
            .args([
                "filter",
                spec.to_str().unwrap(),
                "--paths-file",
                selectors.to_str().unwrap(),
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let doc = parse_stdout(&output);
        assert!(doc["paths"].get("/pets/{id}").is_some());
        assert!(doc["paths"].get("/pets").is_none());
    }

    #[test]
    fn yaml_in_yaml_out() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "swagger.yaml", SWAGGER_YAML);

        cmd()
            .args(["filter", spec.to_str().unwrap(), "--path", "/orders"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Order:"))
            .stdout(predicate::str::contains("Line:"))
            .stdout(predicate::str::contains("User:").not())
            .stdout(predicate::str::contains("/users").not());
    }

    #[test]
    fn yaml_in_json_out() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "swagger.yml", SWAGGER_YAML);

        let output = cmd()
            .args([
                "filter",
                spec.to_str().unwrap(),
                "--path",
                "/users",
                "--format",
                "json",
            ])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let doc = parse_stdout(&output);
        assert_eq!(doc["swagger"], "2.0");
        let definitions = doc["definitions"].as_object().unwrap();
        assert_eq!(definitions.keys().collect::<Vec<_>>(), ["User"]);
    }

    #[test]
    fn unmatched_selector_warns() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        cmd()
            .args(["filter", spec.to_str().unwrap(), "-p", "/pets", "-p", "/nope"])
            .assert()
            .success()
            .stderr(predicate::str::contains("unmatched selector: /nope"));
    }

    #[test]
    fn strict_fails_on_unmatched_selector() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        cmd()
            .args(["filter", spec.to_str().unwrap(), "-p", "/nope", "--strict"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("1 selector(s) matched no path"));
    }
}

mod errors {
    use super::*;

    #[test]
    fn file_not_found() {
        cmd()
            .args(["filter", "/nonexistent/openapi.json", "--path", "/pets"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn invalid_json() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", "{ not json");

        cmd()
            .args(["filter", spec.to_str().unwrap(), "--path", "/pets"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid JSON"));
    }

    #[test]
    fn invalid_regex() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        cmd()
            .args(["filter", spec.to_str().unwrap(), "--regex", "-p", "/pets/("])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("invalid path pattern"));
    }

    #[test]
    fn unknown_format() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        cmd()
            .args([
                "filter",
                spec.to_str().unwrap(),
                "--path",
                "/pets",
                "--format",
                "xml",
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown format"));
    }

    #[test]
    fn selector_required() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        cmd()
            .args(["filter", spec.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--path"));
    }
}

mod paths_command {
    use super::*;

    #[test]
    fn lists_all_paths() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "openapi.json", PETSTORE);

        cmd()
            .args(["paths", spec.to_str().unwrap()])
            .assert()
            .success()
            .stdout("/pets\n/pets/{id}\n/owners\n");
    }

    #[test]
    fn lists_matching_paths() {
        let dir = TempDir::new().unwrap();
        let spec = write_temp_file(&dir, "swagger.yaml", SWAGGER_YAML);

        cmd()
            .args(["paths", spec.to_str().unwrap(), "--regex", "ord"])
            .assert()
            .success()
            .stdout("/orders\n");
    }
}
