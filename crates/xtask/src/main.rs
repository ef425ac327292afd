//! Workspace maintenance tasks, run as `cargo run -p xtask -- <command>`.

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

/// Crates that must stay free of runtime and IO dependencies, paired with
/// the dependency names they must not pick up. The game rules live in
/// `driftline-domain` as pure functions (the loot draw takes its roll as
/// an argument), and `driftline-shared` is wire types only; a runtime
/// crate sneaking into either is an architecture regression.
const PURE_CRATES: &[&str] = &["driftline-domain", "driftline-shared"];
const FORBIDDEN_DEPS: &[&str] = &["tokio", "rand", "sqlx", "axum", "reqwest", "dashmap"];

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!(
            "cargo metadata failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let metadata: serde_json::Value =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let packages = metadata["packages"]
        .as_array()
        .context("metadata has no packages array")?;

    let mut violations = Vec::new();
    for package in packages {
        let Some(name) = package["name"].as_str() else {
            continue;
        };
        if !PURE_CRATES.contains(&name) {
            continue;
        }
        let Some(deps) = package["dependencies"].as_array() else {
            continue;
        };
        for dep in deps {
            // Dev-dependencies are fine; tests may use whatever they like.
            if !dep["kind"].is_null() {
                continue;
            }
            let Some(dep_name) = dep["name"].as_str() else {
                continue;
            };
            if FORBIDDEN_DEPS.contains(&dep_name) {
                violations.push(format!("{name} depends on {dep_name}"));
            }
        }
    }

    if !violations.is_empty() {
        anyhow::bail!("architecture check failed:\n  {}", violations.join("\n  "));
    }

    println!(
        "arch-check passed: {} stay free of {:?}",
        PURE_CRATES.join(", "),
        FORBIDDEN_DEPS
    );
    Ok(())
}
