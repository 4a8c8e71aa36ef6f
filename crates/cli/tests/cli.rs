use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORM_PAGE: &str = r#"
    <form method="POST">
        <input type="hidden" name="_token" value="tok1">
        <input type="text" name="name">
        <input type="hidden" name="hiddenName" value="hid1">
    </form>
"#;

async fn mount_generator(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FORM_PAGE))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/123"))
        .and(body_string("_token=tok1&name=Alice&hiddenName=hid1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<textarea id="copy-textarea">Alice is a wizard</textarea>"#),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Run the binary in a clean environment with the given variables
async fn run_bin(cwd: &Path, vars: Vec<(&'static str, String)>, args: &[&str]) -> Output {
    let cwd = cwd.to_path_buf();
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();

    tokio::task::spawn_blocking(move || {
        let mut cmd = cargo_bin_cmd!("shindan-toot");
        cmd.env_clear().current_dir(cwd).args(args);
        for (key, value) in vars {
            cmd.env(key, value);
        }
        cmd.output().expect("run shindan-toot")
    })
    .await
    .expect("join")
}

fn run_vars(server: &MockServer) -> Vec<(&'static str, String)> {
    vec![
        ("MASTODON_SERVER", server.uri()),
        ("MASTODON_ACCESSTOKEN", "T".to_string()),
        ("WAIT_SEC", "5".to_string()),
        ("SHINDAN_IDS", "123".to_string()),
        ("SHINDAN_NAME", "Alice".to_string()),
        ("SHINDAN_HOST", server.uri()),
    ]
}

#[test]
fn config_init_writes_example_file() {
    let dir = TempDir::new().expect("temp dir");
    let env_path = dir.path().join(".env.example");

    let mut cmd = cargo_bin_cmd!("shindan-toot");
    cmd.args(["config", "init", "--path"])
        .arg(&env_path)
        .assert()
        .success();

    let content = fs::read_to_string(&env_path).expect("read env file");
    assert!(content.contains("MASTODON_SERVER="));
    assert!(content.contains("SHINDAN_IDS="));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = TempDir::new().expect("temp dir");
    let env_path = dir.path().join(".env.example");
    fs::write(&env_path, "KEEP=1\n").expect("write env file");

    let mut cmd = cargo_bin_cmd!("shindan-toot");
    cmd.args(["config", "init", "--path"])
        .arg(&env_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&env_path).unwrap(), "KEEP=1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn run_posts_fetched_result() {
    let mock_server = MockServer::start().await;
    mount_generator(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/statuses"))
        .and(header("Authorization", "Bearer T"))
        .and(body_string("status=Alice+is+a+wizard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json_value()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let output = run_bin(dir.path(), run_vars(&mock_server), &[]).await;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn run_dry_run_does_not_post() {
    let mock_server = MockServer::start().await;
    mount_generator(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/statuses"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let output = run_bin(dir.path(), run_vars(&mock_server), &["run", "--dry-run"]).await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Alice is a wizard"));
}

#[tokio::test(flavor = "multi_thread")]
async fn run_reads_env_file() {
    let mock_server = MockServer::start().await;
    mount_generator(&mock_server).await;

    let dir = TempDir::new().expect("temp dir");
    let env_path = dir.path().join("bot.env");
    let content: String = run_vars(&mock_server)
        .into_iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect();
    fs::write(&env_path, content).expect("write env file");

    let output = run_bin(
        dir.path(),
        vec![],
        &["--env-file", env_path.to_str().unwrap(), "run", "--dry-run"],
    )
    .await;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_setting_fails_without_network() {
    let mock_server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let vars = run_vars(&mock_server)
        .into_iter()
        .filter(|(key, _)| *key != "MASTODON_ACCESSTOKEN")
        .collect();

    let dir = TempDir::new().expect("temp dir");
    let output = run_bin(dir.path(), vars, &[]).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("MASTODON_ACCESSTOKEN"));
}

#[test]
fn invalid_wait_sec_fails() {
    let dir = TempDir::new().expect("temp dir");

    let mut cmd = cargo_bin_cmd!("shindan-toot");
    cmd.env_clear()
        .current_dir(dir.path())
        .env("MASTODON_SERVER", "example.test")
        .env("MASTODON_ACCESSTOKEN", "T")
        .env("WAIT_SEC", "-5")
        .env("SHINDAN_IDS", "123")
        .env("SHINDAN_NAME", "Alice")
        .assert()
        .failure()
        .stderr(predicate::str::contains("WAIT_SEC"));
}

#[test]
fn malformed_env_file_fails() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join(".env"), "this is not valid\n").expect("write env file");

    let mut cmd = cargo_bin_cmd!("shindan-toot");
    cmd.env_clear()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse .env file"));
}

#[tokio::test(flavor = "multi_thread")]
async fn env_file_in_parent_directory_is_ignored() {
    let mock_server = MockServer::start().await;
    mount_generator(&mock_server).await;

    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join(".env"), "this is not valid\n").expect("write env file");
    let child = dir.path().join("child");
    fs::create_dir(&child).expect("create child dir");

    let output = run_bin(&child, run_vars(&mock_server), &["run", "--dry-run"]).await;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn rust_log_from_env_file_sets_log_level() {
    let mock_server = MockServer::start().await;
    mount_generator(&mock_server).await;

    let dir = TempDir::new().expect("temp dir");
    let mut content: String = run_vars(&mock_server)
        .into_iter()
        .map(|(key, value)| format!("{}={}\n", key, value))
        .collect();
    content.push_str("RUST_LOG=debug\n");
    fs::write(dir.path().join(".env"), content).expect("write env file");

    let output = run_bin(dir.path(), vec![], &["run", "--dry-run"]).await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Loaded env file"));
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_prints_result() {
    let mock_server = MockServer::start().await;
    mount_generator(&mock_server).await;

    let dir = TempDir::new().expect("temp dir");
    let output = run_bin(
        dir.path(),
        vec![("SHINDAN_HOST", mock_server.uri())],
        &["fetch", "123", "--name", "Alice"],
    )
    .await;

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Alice is a wizard");
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_with_empty_result_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FORM_PAGE))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>no result here</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().expect("temp dir");
    let output = run_bin(
        dir.path(),
        vec![("SHINDAN_HOST", mock_server.uri())],
        &["fetch", "123", "--name", "Alice"],
    )
    .await;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "");
    assert!(String::from_utf8_lossy(&output.stderr).contains("empty result"));
}

fn serde_json_value() -> serde_json::Value {
    serde_json::json!({
        "id": "1",
        "url": "https://example.test/@bot/1"
    })
}
