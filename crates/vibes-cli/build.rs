//! Embeds the release version reported by `vibes --version`.
//!
//! Tagged builds report the tag (`v0.3.1` becomes `0.3.1`); anything else
//! reports the crate version plus the short commit, e.g. `0.1.0+ab12cd3`.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let crate_version = env!("CARGO_PKG_VERSION");
    let version = match (exact_tag(), short_commit()) {
        (Some(tag), _) => tag.trim_start_matches('v').to_string(),
        (None, Some(sha)) => format!("{}+{}", crate_version, sha),
        (None, None) => crate_version.to_string(),
    };

    println!("cargo:rustc-env=VIBES_VERSION={}", version);
}

fn exact_tag() -> Option<String> {
    git(&["describe", "--tags", "--exact-match"])
}

fn short_commit() -> Option<String> {
    git(&["rev-parse", "--short", "HEAD"])
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
