use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Location of the session file for an isolated HOME.
pub fn session_file(home: &Path) -> PathBuf {
    home.join("data").join("vibes").join("session.json")
}

/// Run the CLI with an isolated HOME against `api_url`.
///
/// The child blocks, so it runs off the runtime that serves the mock API.
pub async fn run_cli(args: &[&str], home: &Path, api_url: &str) -> Output {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let home = home.to_path_buf();
    let api_url = api_url.to_string();

    tokio::task::spawn_blocking(move || {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vibes"));
        cmd.args(&args);
        cmd.env("HOME", &home);
        cmd.env("XDG_DATA_HOME", home.join("data"));
        cmd.env("VIBES_API_URL", &api_url);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RUST_LOG");
        cmd.output().expect("Failed to execute CLI")
    })
    .await
    .expect("CLI task panicked")
}

/// Run the CLI and expect success.
pub async fn run_cli_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli(args, home, api_url).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Read the stored session as JSON.
pub fn read_session(home: &Path) -> serde_json::Value {
    let json = std::fs::read_to_string(session_file(home)).expect("session file missing");
    serde_json::from_str(&json).expect("session file is not JSON")
}
