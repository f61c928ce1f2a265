use std::process::Command;

#[test]
fn invalid_config_fails_before_listening() {
    let output = Command::new(env!("CARGO_BIN_EXE_contactbook-api"))
        .env("WEB_PORT", "not-a-port")
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run server binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "stderr: {stderr}");
}
