//! Smoke tests for the `ramadan-card` binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ramadan-card"))
        .arg("--config")
        .arg(config_dir)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run ramadan-card")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn generate_writes_page_and_png() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let output = run(
        &[
            "generate",
            "--name",
            "Amina Noor",
            "--template",
            "emerald",
            "--seed",
            "7",
            "--output",
            out.to_str().unwrap(),
        ],
        tmp.path(),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    assert!(out.join("index.html").exists());
    assert!(out.join("Skaka-Ramadan-Card-Amina Noor.png").exists());

    let state: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("card.json")).unwrap()).unwrap();
    assert_eq!(state["step"], "result");
    assert_eq!(state["card"]["template"]["id"], "emerald");

    let text = stdout(&output);
    assert!(text.contains("Name: Amina Noor"));
    assert!(text.contains("Share: https://cards.example.com/?name=Amina%2520Noor&template=emerald"));
    assert!(text.contains("[success] Card downloaded successfully!"));
}

#[test]
fn generate_rejects_short_name() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let output = run(
        &["generate", "--name", " A ", "--output", out.to_str().unwrap()],
        tmp.path(),
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Name is too short"));
    assert!(!out.exists());
}

#[test]
fn open_renders_shared_link_without_download() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let output = run(
        &[
            "open",
            "https://cards.example.com/?template=not-a-real-id&name=Omar",
            "--no-download",
            "--output",
            out.to_str().unwrap(),
        ],
        tmp.path(),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let html = std::fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains("Omar"));
    assert!(stdout(&output).contains("Template: Elegant Blue (elegant)"));
    assert!(!out.join("Skaka-Ramadan-Card-Omar.png").exists());
}

#[test]
fn config_overrides_branding() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("config.toml"),
        "[branding]\nfile_prefix = \"Class-4B\"\n\n[site]\nbase_url = \"https://school.example.org/eid/\"\n",
    )
    .unwrap();
    let out = tmp.path().join("out");
    let output = run(
        &["generate", "--name", "Hana", "--output", out.to_str().unwrap()],
        tmp.path(),
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(out.join("Class-4B-Hana.png").exists());
    assert!(stdout(&output).contains("Share: https://school.example.org/eid/?name=Hana&template=elegant"));
}

#[test]
fn unknown_config_key_is_an_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.toml"), "[branding]\nlogo = \"x.png\"\n").unwrap();
    let out = tmp.path().join("out");
    let output = run(
        &["generate", "--name", "Hana", "--output", out.to_str().unwrap()],
        tmp.path(),
    );
    assert!(!output.status.success());
}

#[test]
fn listings() {
    let tmp = TempDir::new().unwrap();

    let templates = stdout(&run(&["templates"], tmp.path()));
    assert!(templates.starts_with("001 elegant  Elegant Blue"));
    assert!(templates.contains("004 warm  Warm Gold"));

    let messages = stdout(&run(&["messages"], tmp.path()));
    assert_eq!(messages.lines().count(), 10);
}

#[test]
fn gen_config_round_trips() {
    let tmp = TempDir::new().unwrap();
    let output = run(&["gen-config"], tmp.path());
    assert!(output.status.success());
    std::fs::write(tmp.path().join("config.toml"), &output.stdout).unwrap();

    let out = tmp.path().join("out");
    let check = run(
        &[
            "open",
            "https://cards.example.com/?name=Omar",
            "--no-download",
            "--output",
            out.to_str().unwrap(),
        ],
        tmp.path(),
    );
    assert!(check.status.success(), "{}", String::from_utf8_lossy(&check.stderr));
}
