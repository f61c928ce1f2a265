use std::process::Command;

use serde_json::Value;

fn run(args: &[&str], envs: &[(&str, &str)]) -> std::process::Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_openapi"));
    cmd.args(args).env("RUST_LOG", "warn");
    for var in ["APP_NAME", "WEB_PORT", "APP_ENV", "LOG_FORMAT", "DISABLED_RESOURCES", "PRODUCER_ENABLED"] {
        cmd.env_remove(var);
    }
    for (k, v) in envs {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run openapi binary")
}

#[test]
fn writes_the_document_into_a_fresh_tree() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/deeper/openapi.json");

    let output = run(&[out.to_str().unwrap()], &[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total operations: 15"), "stdout: {stdout}");
    assert!(stdout.contains("Tags: Addresses, Contacts, Users"), "stdout: {stdout}");

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/users",
        "/api/users/_login",
        "/api/contacts",
        "/api/contacts/{contactId}/addresses/{addressId}",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert_eq!(doc["components"]["securitySchemes"]["bearer"]["scheme"], "bearer");
}

#[test]
fn config_flows_into_info_and_servers() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("openapi.json");

    let output = run(&[out.to_str().unwrap()], &[("APP_NAME", "Address Book"), ("WEB_PORT", "9000")]);
    assert!(output.status.success());

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["info"]["title"], "Address Book");
    assert_eq!(doc["servers"][0]["url"], "http://localhost:9000");
    assert_eq!(doc["servers"][0]["description"], "Development server");
}

#[test]
fn output_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");

    assert!(run(&[a.to_str().unwrap()], &[]).status.success());
    assert!(run(&[b.to_str().unwrap()], &[]).status.success());
    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

#[test]
fn invalid_config_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("openapi.json");

    let output = run(&[out.to_str().unwrap()], &[("WEB_PORT", "not-a-port")]);
    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn unwritable_target_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();

    let output = run(&[blocker.join("openapi.json").to_str().unwrap()], &[]);
    assert!(!output.status.success());
}
