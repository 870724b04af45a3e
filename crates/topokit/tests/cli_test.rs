//! Integration tests for the `topokit` CLI binary.
//!
//! Every test works in its own temp directory and is isolated from the
//! user's configuration.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `topokit` binary with env isolation.
fn topokit_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("topokit");
    cmd.env("HOME", "/tmp/topokit-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/topokit-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("TOPOKIT_CONFIG")
        .env_remove("TOPOKIT_BUILD__SCHEMA")
        .env_remove("TOPOKIT_BUILD__OUT")
        .env_remove("TOPOKIT_EXPORT__STYLE")
        .env_remove("TOPOKIT_EXPORT__INCLUDE_NODE_NAME")
        .env_remove("TOPOKIT_COMPARE__IGNORE_ORDER")
        .env_remove("TOPOKIT_COMPARE__SHOW_DIFF")
        .env_remove("TOPOKIT_OUTPUT__FORMAT")
        .env_remove("TOPOKIT_OUTPUT__COLOR")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// A temp directory holding `nodes.csv`, `interfaces.csv` and `networks.csv`.
struct Tables {
    dir: TempDir,
}

impl Tables {
    fn new(nodes: &str, interfaces: &str, networks: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nodes.csv"), nodes).unwrap();
        std::fs::write(dir.path().join("interfaces.csv"), interfaces).unwrap();
        std::fs::write(dir.path().join("networks.csv"), networks).unwrap();
        Self { dir }
    }

    /// One router, one interface `eth0` on network 10, one network `lan`.
    fn router_on_lan() -> Self {
        Self::new(
            "id,name,type,templateName,osType,tags,description\n1,r1,router,,,core;edge,\n",
            "node_id,node_name,name,networkId,ipv4Addr,macAddr\n1,r1,eth0,10,10.0.0.1/24,AA:BB:CC:DD:EE:FF\n",
            "id,name,type,maximumBandwidth,defaults.bandwidth,defaults.latency,defaults.jitter,defaults.loss,defaults.corruption,defaults.mtu\n10,lan,,,,,,,,\n",
        )
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn table_args(&self) -> Vec<String> {
        ["nodes", "interfaces", "networks"]
            .iter()
            .flat_map(|t| {
                [
                    format!("--{t}"),
                    self.path(&format!("{t}.csv")).display().to_string(),
                ]
            })
            .collect()
    }
}

fn build_into(tables: &Tables, out: &Path) -> std::process::Output {
    topokit_cmd()
        .arg("build")
        .args(tables.table_args())
        .arg("--out")
        .arg(out)
        .output()
        .unwrap()
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = topokit_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    topokit_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("build")
            .and(predicate::str::contains("validate"))
            .and(predicate::str::contains("export"))
            .and(predicate::str::contains("compare")),
    );
}

#[test]
fn test_completions_zsh() {
    topokit_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_man_prints_and_installs_pages() {
    topokit_cmd()
        .arg("man")
        .assert()
        .success()
        .stdout(predicate::str::contains(".TH").and(predicate::str::contains("topokit")));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("man1");
    topokit_cmd()
        .args(["man", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("topokit-compare.1"));
    assert!(out.join("topokit.1").is_file());
    assert!(out.join("topokit-export.1").is_file());
}

// ── Validate ────────────────────────────────────────────────────────

#[test]
fn test_validate_well_formed_tables() {
    let tables = Tables::router_on_lan();
    topokit_cmd()
        .arg("validate")
        .args(tables.table_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 errors, 0 warnings"));
}

#[test]
fn test_validate_duplicate_node_id() {
    let tables = Tables::new(
        "id,name,type\n5,a,host\n5,b,host\n",
        "node_id,node_name,name\n",
        "id,name\n",
    );
    let output = topokit_cmd()
        .arg("validate")
        .args(tables.table_args())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("error: ").count(), 1, "{stdout}");
    assert!(stdout.contains("nodes line 3: duplicate node id 5"), "{stdout}");
}

#[test]
fn test_validate_json_report() {
    let tables = Tables::new(
        "id,name,type\n1,r1,router\n",
        "node_id,name,macAddr\n1,eth0,AA:BB:CC:DD:EE:FG\n",
        "id,name\n",
    );
    let output = topokit_cmd()
        .args(["validate", "--output", "json"])
        .args(tables.table_args())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["errors"][0]["kind"], "FormatError");
    assert_eq!(report["errors"][0]["location"]["line"], 2);
}

#[test]
fn test_validate_needs_tables_or_topology() {
    let output = topokit_cmd().args(["validate", "--nodes", "n.csv"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_validate_missing_file_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.csv");
    let output = topokit_cmd()
        .arg("validate")
        .arg("--nodes")
        .arg(&missing)
        .arg("--interfaces")
        .arg(&missing)
        .arg("--networks")
        .arg(&missing)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("absent.csv"));
}

// ── Build ───────────────────────────────────────────────────────────

#[test]
fn test_build_end_to_end() {
    let tables = Tables::router_on_lan();
    let out = tables.path("topology.json");
    let output = build_into(&tables, &out);
    assert!(output.status.success(), "{}", combined_output(&output));

    let doc = read_json(&out);
    assert_eq!(
        doc["$schema"],
        "https://portal.mipn.co.uk/topologyschema-01/schema#"
    );
    assert_eq!(doc["nodes"][0]["id"], 1);
    assert_eq!(doc["nodes"][0]["type"], "router");
    assert_eq!(doc["nodes"][0]["config"]["tags"], serde_json::json!(["core", "edge"]));
    assert_eq!(doc["nodes"][0]["interfaces"][0]["name"], "eth0");
    assert_eq!(doc["nodes"][0]["interfaces"][0]["networkId"], 10);
    assert_eq!(doc["networks"][0]["name"], "lan");
    assert_eq!(doc["networks"][0]["type"], "unmanaged");
    assert!(doc["networks"][0].get("defaults").is_none());

    topokit_cmd()
        .arg("validate")
        .arg("--topology")
        .arg(&out)
        .assert()
        .success();
}

#[test]
fn test_build_refuses_dangling_network() {
    let tables = Tables::new(
        "id,name,type\n1,r1,router\n",
        "node_id,name,networkId\n1,eth0,99\n",
        "id,name\n10,lan\n",
    );
    let out = tables.path("topology.json");
    let output = build_into(&tables, &out);
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists(), "build must not write on failure");
    let text = combined_output(&output);
    assert!(text.contains("networkId 99 does not match any network"), "{text}");
}

#[test]
fn test_build_custom_schema() {
    let tables = Tables::router_on_lan();
    let out = tables.path("custom.json");
    topokit_cmd()
        .arg("build")
        .args(tables.table_args())
        .args(["--schema", "urn:example"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    assert_eq!(read_json(&out)["$schema"], "urn:example");
}

// ── Export ──────────────────────────────────────────────────────────

#[test]
fn test_export_fixed_and_compact() {
    let tables = Tables::router_on_lan();
    let doc = tables.path("topology.json");
    assert!(build_into(&tables, &doc).status.success());

    let fixed = tables.path("fixed");
    topokit_cmd()
        .arg("export")
        .arg("--topology")
        .arg(&doc)
        .arg("--outdir")
        .arg(&fixed)
        .assert()
        .success();
    let nodes = std::fs::read_to_string(fixed.join("nodes.csv")).unwrap();
    assert_eq!(
        nodes,
        "id,name,type,templateName,osType,tags,description\n1,r1,router,,,core;edge,\n"
    );

    let compact = tables.path("compact");
    topokit_cmd()
        .arg("export")
        .arg("--topology")
        .arg(&doc)
        .arg("--outdir")
        .arg(&compact)
        .args(["--style", "compact", "--no-node-name"])
        .assert()
        .success();
    let interfaces = std::fs::read_to_string(compact.join("interfaces.csv")).unwrap();
    assert_eq!(
        interfaces,
        "node_id,name,networkId,ipv4Addr,macAddr\n1,eth0,10,10.0.0.1/24,AA:BB:CC:DD:EE:FF\n"
    );
    let networks = std::fs::read_to_string(compact.join("networks.csv")).unwrap();
    assert_eq!(networks, "id,name,type\n10,lan,unmanaged\n");
}

#[test]
fn test_export_style_from_environment() {
    let tables = Tables::router_on_lan();
    let doc = tables.path("topology.json");
    assert!(build_into(&tables, &doc).status.success());

    let outdir = tables.path("env");
    topokit_cmd()
        .env("TOPOKIT_EXPORT__STYLE", "compact")
        .arg("export")
        .arg("--topology")
        .arg(&doc)
        .arg("--outdir")
        .arg(&outdir)
        .assert()
        .success();
    let networks = std::fs::read_to_string(outdir.join("networks.csv")).unwrap();
    assert!(networks.starts_with("id,name,type\n"), "{networks}");
}

#[test]
fn test_export_then_rebuild_is_equivalent() {
    let tables = Tables::router_on_lan();
    let doc = tables.path("topology.json");
    assert!(build_into(&tables, &doc).status.success());

    let outdir = tables.path("roundtrip");
    topokit_cmd()
        .arg("export")
        .arg("--topology")
        .arg(&doc)
        .arg("--outdir")
        .arg(&outdir)
        .assert()
        .success();

    let rebuilt = tables.path("rebuilt.json");
    topokit_cmd()
        .arg("build")
        .arg("--nodes")
        .arg(outdir.join("nodes.csv"))
        .arg("--interfaces")
        .arg(outdir.join("interfaces.csv"))
        .arg("--networks")
        .arg(outdir.join("networks.csv"))
        .arg("--out")
        .arg(&rebuilt)
        .assert()
        .success();

    topokit_cmd()
        .arg("compare")
        .arg(&doc)
        .arg(&rebuilt)
        .assert()
        .success()
        .stdout(predicate::str::contains("equivalent"));
}

// ── Compare ─────────────────────────────────────────────────────────

fn write_doc(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_compare_tags_representations() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_doc(
        dir.path(),
        "a.json",
        r#"{"nodes": [{"id": 1, "name": "r1", "type": "router", "config": {"tags": "a;b"}}], "networks": []}"#,
    );
    let b = write_doc(
        dir.path(),
        "b.json",
        r#"{"networks": [], "nodes": [{"type": "router", "name": "r1", "id": 1, "description": "", "config": {"tags": ["a", "b"]}}]}"#,
    );
    topokit_cmd().arg("compare").arg(&a).arg(&b).assert().success();
}

#[test]
fn test_compare_different_documents() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_doc(dir.path(), "a.json", r#"{"networks": [{"id": 10, "name": "lan"}]}"#);
    let b = write_doc(dir.path(), "b.json", r#"{"networks": [{"id": 10, "name": "wan"}]}"#);

    let output = topokit_cmd().arg("compare").arg(&a).arg(&b).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("-      \"name\": \"lan\""), "{stdout}");
    assert!(stdout.contains("+      \"name\": \"wan\""), "{stdout}");

    let output = topokit_cmd()
        .arg("compare")
        .arg("--no-diff")
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_compare_order_policy() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_doc(dir.path(), "a.json", r#"{"networks": [{"id": 1}, {"id": 2}]}"#);
    let b = write_doc(dir.path(), "b.json", r#"{"networks": [{"id": 2}, {"id": 1}]}"#);

    let output = topokit_cmd().arg("compare").arg(&a).arg(&b).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    topokit_cmd()
        .args(["compare", "--ignore-order"])
        .arg(&a)
        .arg(&b)
        .assert()
        .success();
}

#[test]
fn test_compare_usage_errors() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_doc(dir.path(), "a.json", "{}");

    let output = topokit_cmd().arg("compare").arg(&a).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "missing second path");

    let output = topokit_cmd()
        .arg("compare")
        .arg(&a)
        .arg(dir.path().join("absent.json"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "unreadable document");

    let bad = write_doc(dir.path(), "bad.json", "{ not json");
    let output = topokit_cmd().arg("compare").arg(&a).arg(&bad).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "undecodable document");
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_doc(dir.path(), "topokit.toml", "[compare]\nignore_order = true\n");

    topokit_cmd()
        .args(["config", "path", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("topokit.toml"));

    topokit_cmd()
        .args(["config", "show", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ignore_order = true")
                .and(predicate::str::contains("style = \"fixed\"")),
        );
}

#[test]
fn test_config_file_sets_order_policy() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_doc(dir.path(), "topokit.toml", "[compare]\nignore_order = true\n");
    let a = write_doc(dir.path(), "a.json", r#"{"nodes": [{"id": 1}, {"id": 2}]}"#);
    let b = write_doc(dir.path(), "b.json", r#"{"nodes": [{"id": 2}, {"id": 1}]}"#);

    topokit_cmd()
        .arg("compare")
        .arg(&a)
        .arg(&b)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
}

#[test]
fn test_invalid_configured_format() {
    let tables = Tables::router_on_lan();
    let output = topokit_cmd()
        .env("TOPOKIT_OUTPUT__FORMAT", "xml")
        .arg("validate")
        .args(tables.table_args())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("output.format"));
}
