//! Integration tests for the `shelf` CLI binary.
//!
//! Argument parsing, help output, and completions run offline; catalog
//! commands run against a wiremock server passed via `--base-url`.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `shelf` binary with env isolation.
///
/// Clears all `SHELF_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn shelf_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("shelf");
    cmd.env("HOME", "/tmp/shelf-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/shelf-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("SHELF_PROFILE")
        .env_remove("SHELF_BASE_URL")
        .env_remove("SHELF_OUTPUT")
        .env_remove("SHELF_COLOR")
        .env_remove("SHELF_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn catalog_page() -> serde_json::Value {
    json!([
        { "id": 1, "title": "Fjallraven Backpack", "price": 109.95, "category": "men's clothing",
          "description": "", "image": "", "rating": { "rate": 3.9, "count": 120 } },
        { "id": 2, "title": "Mens Casual T-Shirt", "price": 22.3, "category": "men's clothing",
          "description": "", "image": "" },
        { "id": 3, "title": "Gold Chain Bracelet", "price": 695.0, "category": "jewelery",
          "description": "Solid gold links", "image": "https://img.test/bracelet.png" },
    ])
}

async fn catalog_server(limit: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .and(query_param("limit", limit))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_page()))
        .mount(&server)
        .await;
    server
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = shelf_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    shelf_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("product catalogs")
            .and(predicate::str::contains("products"))
            .and(predicate::str::contains("categories")),
    );
}

#[test]
fn test_version_flag() {
    shelf_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shelf"));
}

#[test]
fn test_completions_bash() {
    shelf_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_zero_limit_is_usage_error() {
    shelf_cmd()
        .args(["products", "list", "--limit", "0"])
        .assert()
        .code(2);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_prints_toml_path() {
    shelf_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_defaults_as_json() {
    let output = shelf_cmd()
        .args(["config", "show", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["defaults"]["timeout"], 30);
    assert_eq!(value["default_profile"], "default");
}

#[test]
fn test_config_init_writes_profile() {
    let dir = tempfile::tempdir().unwrap();
    let run = || {
        let mut cmd = shelf_cmd();
        cmd.env("HOME", dir.path()).env("XDG_CONFIG_HOME", dir.path());
        cmd
    };

    run()
        .args(["config", "init", "--name", "local", "--base-url", "http://127.0.0.1:8080"])
        .assert()
        .success();

    run()
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local *"));

    // A second init without --force refuses to clobber.
    run().args(["config", "init"]).assert().code(2);
}

#[test]
fn test_unknown_profile_is_not_found() {
    let output = shelf_cmd()
        .args(["--profile", "staging", "products", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("staging"));
}

// ── Products ────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_json() {
    let server = catalog_server("10").await;

    let output = shelf_cmd()
        .args(["--base-url", &server.uri(), "-o", "json", "products", "list"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);
    assert_eq!(value[0]["title"], "Fjallraven Backpack");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_filters_by_category_and_search() {
    let server = catalog_server("10").await;

    shelf_cmd()
        .args([
            "--base-url",
            &server.uri(),
            "-o",
            "plain",
            "products",
            "list",
            "--category",
            "men's clothing",
            "--search",
            "SHIRT",
        ])
        .assert()
        .success()
        .stdout("2\tMens Casual T-Shirt\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_wide_shows_description_and_image() {
    let server = catalog_server("10").await;

    shelf_cmd()
        .args(["--base-url", &server.uri(), "products", "list", "--wide"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Description"))
        .stdout(predicate::str::contains("Solid gold links"))
        .stdout(predicate::str::contains("https://img.test/bracelet.png"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_default_table_omits_description() {
    let server = catalog_server("10").await;

    shelf_cmd()
        .args(["--base-url", &server.uri(), "products", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Solid gold links").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_hints_load_more_when_page_is_full() {
    let server = catalog_server("3").await;

    shelf_cmd()
        .args(["--base-url", &server.uri(), "products", "list", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gold Chain Bracelet"))
        .stderr(predicate::str::contains("--limit 8"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_list_short_page_has_no_hint() {
    let server = catalog_server("10").await;

    shelf_cmd()
        .args(["--base-url", &server.uri(), "products", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--limit").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_exits_with_connection_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let output = shelf_cmd()
        .args(["--base-url", &server.uri(), "products", "list"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("Network response was not ok"));
}

// ── Categories ──────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_categories_include_all_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["electronics", "jewelery"])))
        .mount(&server)
        .await;

    shelf_cmd()
        .args(["--base-url", &server.uri(), "-o", "plain", "categories"])
        .assert()
        .success()
        .stdout("All\nelectronics\njewelery\n");
}
