// HyPy - Hydra Chain RPC Toolkit
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Command line tests for the `hy` binary

use assert_cmd::{assert::OutputAssertExt, Command};
use predicates::prelude::*;
use serde_json::json;
use std::process::Output;
use tempfile::TempDir;
use tracing::info;
use wiremock::{
    matchers::{body_partial_json, method},
    Mock, MockServer, ResponseTemplate,
};

/// `hy` with a clean environment and no cookie file
fn hy(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hy").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("HY_RPC")
        .env_remove("HY_RPC_WALLET")
        .env_remove("HY_RPC_TESTNET")
        .env_remove("HYPY_V")
        .env_remove("HYPY_LOG")
        .env_remove("HYPY_LOG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

/// Run `hy` against a stub node; the binary blocks, so it runs off the runtime
async fn run_against(server: &MockServer, args: &[&str]) -> Output {
    let uri = server.uri().replacen("http://", "main://", 1);
    let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();

    tokio::task::spawn_blocking(move || {
        let home = TempDir::new().unwrap();
        hy(&home).env("HY_RPC", uri).args(args).output().unwrap()
    })
    .await
    .unwrap()
}

async fn stub_result(server: &MockServer, rpc_method: &str, result: serde_json::Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": rpc_method})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": result, "error": null, "id": 1})),
        )
        .mount(server)
        .await;
}

#[test]
fn test_help_command() {
    hypy_utils::logging::ensure_test_logging(None);
    info!("Testing CLI help command");

    let home = TempDir::new().unwrap();
    hy(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hydra chain RPC toolkit"))
        .stdout(predicate::str::contains("methods"));
}

#[test]
fn test_version_command() {
    hypy_utils::logging::ensure_test_logging(None);
    let home = TempDir::new().unwrap();
    hy(&home).arg("--version").assert().success().stdout(predicate::str::contains("hy"));
}

#[test]
fn test_app_version_comes_from_registry() {
    hypy_utils::logging::ensure_test_logging(None);
    let home = TempDir::new().unwrap();
    hy(&home).args(["cli", "--version"]).assert().success().stdout(predicate::str::contains("1.01"));
}

#[test]
fn test_missing_subcommand() {
    hypy_utils::logging::ensure_test_logging(None);
    let home = TempDir::new().unwrap();
    hy(&home).assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_subcommand_help() {
    hypy_utils::logging::ensure_test_logging(None);
    let home = TempDir::new().unwrap();
    hy(&home)
        .args(["cli", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--rpc-wallet"))
        .stdout(predicate::str::contains("--json-pretty"));
}

#[test]
fn test_call_app() {
    hypy_utils::logging::ensure_test_logging(None);
    let home = TempDir::new().unwrap();
    hy(&home).args(["call", "transfer(address,uint256)"]).assert().success().stdout("a9059cbb\n");
}

#[test]
fn test_multi_call_binary() {
    hypy_utils::logging::ensure_test_logging(None);
    let home = TempDir::new().unwrap();

    let linked = home.path().join("hy-call");
    std::fs::copy(assert_cmd::cargo::cargo_bin("hy"), &linked).unwrap();

    std::process::Command::new(&linked)
        .env("HOME", home.path())
        .arg("name()")
        .assert()
        .success()
        .stdout("06fdde03\n");
}

#[test]
fn test_methods_app() {
    hypy_utils::logging::ensure_test_logging(None);
    let home = TempDir::new().unwrap();

    hy(&home)
        .args(["methods", "network"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== network =="))
        .stdout(predicate::str::contains("setban <subnet> <command> [bantime] [absolute]"))
        .stdout(predicate::str::contains("getblock").not());

    hy(&home).args(["methods", "nonsense"]).assert().failure();
}

#[test]
fn test_invalid_param() {
    hypy_utils::logging::ensure_test_logging(None);
    let home = TempDir::new().unwrap();
    hy(&home)
        .args(["cli", "getblock", "{broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid parameter"));
}

#[test]
fn test_invalid_rpc_url() {
    hypy_utils::logging::ensure_test_logging(None);
    let home = TempDir::new().unwrap();
    hy(&home)
        .args(["cli", "--rpc", "ftp://node", "getinfo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hy: invalid scheme"));

    hy(&home)
        .args(["cli", "--rpc", "http://127.0.0.1:3389", "getinfo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hydra scheme required when specifying port number"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_renders_table() {
    hypy_utils::logging::ensure_test_logging(None);
    let server = MockServer::start().await;
    stub_result(&server, "getx", json!({"a": 1, "b": [2, 3]})).await;

    let output = run_against(&server, &["cli", "getx"]).await;
    output.assert().success().stdout("getx\n  .a       1\n  .b\n    [0]    2\n    [1]    3\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_json_output() {
    hypy_utils::logging::ensure_test_logging(None);
    let server = MockServer::start().await;
    stub_result(&server, "getblockcount", json!(1337)).await;

    let output = run_against(&server, &["cli", "-j", "getblockcount"]).await;
    output.assert().success().stdout("{\"getblockcount\":1337}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rpc_app_prints_value() {
    hypy_utils::logging::ensure_test_logging(None);
    let server = MockServer::start().await;
    stub_result(&server, "getbestblockhash", json!("00ff")).await;

    let output = run_against(&server, &["rpc", "getbestblockhash"]).await;
    output.assert().success().stdout("00ff\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rpc_app_rejects_unknown_method() {
    hypy_utils::logging::ensure_test_logging(None);
    let server = MockServer::start().await;

    let output = run_against(&server, &["rpc", "getblocks"]).await;
    output.assert().failure().stderr(predicate::str::contains("hy: unknown method `getblocks`"));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_error_is_printed_as_json() {
    hypy_utils::logging::ensure_test_logging(None);
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "result": null,
            "error": {"code": -32601, "message": "Method not found"},
            "id": 1
        })))
        .mount(&server)
        .await;

    let output = run_against(&server, &["cli", "nosuchmethod"]).await;
    output
        .assert()
        .failure()
        .stdout("{\"status\":500,\"error\":{\"code\":-32601,\"message\":\"Method not found\"}}\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verbose_failure_returns_error_chain() {
    hypy_utils::logging::ensure_test_logging(None);
    let server = MockServer::start().await;

    let output = run_against(&server, &["rpc", "-vv", "getblocks"]).await;
    output.assert().failure().stderr(predicate::str::contains("Error:"));
}
