//! Gated suite with its own runner, so `--app` / `--api` reach the binary
//!
//! Besides the gated tests themselves, this binary re-runs itself with
//! category flags and checks what the runner reported.

use sakusou::harness::{Category, Failed, HarnessOptions, Suite};
use std::process::{Command, Output};

const FLAGS_GATE_TESTS: &str = "command_line_flags_gate_tests";

fn main() {
    Suite::parse()
        .gated(Category::Api, "api_runs_when_enabled", || {
            enabled(Category::Api)
        })
        .gated(Category::App, "app_runs_when_enabled", || {
            enabled(Category::App)
        })
        .test("ungated_test_always_runs", || Ok(()))
        .test(FLAGS_GATE_TESTS, command_line_flags_gate_tests)
        .run()
        .exit();
}

fn enabled(category: Category) -> Result<(), Failed> {
    if HarnessOptions::current().is_enabled(category) {
        Ok(())
    } else {
        Err(format!("{} ran while disabled", category).into())
    }
}

fn run_self(flags: &[&str]) -> Result<Output, Failed> {
    let output = Command::new(std::env::current_exe()?)
        .args(flags)
        .args(["--skip", FLAGS_GATE_TESTS, "--color", "never", "--test-threads", "1"])
        .env_remove("SAKUSOU_APP")
        .env_remove("SAKUSOU_API")
        .output()?;

    if !output.status.success() {
        return Err(format!(
            "{:?} exited with {}: {}",
            flags,
            output.status,
            String::from_utf8_lossy(&output.stderr)
        )
        .into());
    }
    Ok(output)
}

/// Outcome the runner printed for `name`, e.g. `ok` or `ignored`.
fn outcome(stdout: &str, name: &str) -> Option<String> {
    stdout
        .lines()
        .find(|line| line.starts_with("test ") && line.contains(name))
        .and_then(|line| line.rsplit_once(" ... "))
        .map(|(_, outcome)| outcome.trim().to_string())
}

fn expect(condition: bool, message: String) -> Result<(), Failed> {
    if condition { Ok(()) } else { Err(message.into()) }
}

fn command_line_flags_gate_tests() -> Result<(), Failed> {
    let output = run_self(&["--api"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    expect(
        outcome(&stdout, "api_runs_when_enabled").as_deref() == Some("ok"),
        format!("--api test did not run:\n{}", stdout),
    )?;
    expect(
        outcome(&stdout, "app_runs_when_enabled").as_deref() == Some("ignored"),
        format!("--app test was not skipped:\n{}", stdout),
    )?;
    expect(
        outcome(&stdout, "ungated_test_always_runs").as_deref() == Some("ok"),
        format!("ungated test did not run:\n{}", stdout),
    )?;
    expect(
        stderr.contains("The option of --app is required to run."),
        format!("missing skip reason:\n{}", stderr),
    )?;
    expect(
        !stderr.contains("The option of --api is required to run."),
        format!("--api test reported as skipped:\n{}", stderr),
    )?;

    let output = run_self(&["--nocapture", "--app"])?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    expect(
        outcome(&stdout, "app_runs_when_enabled").as_deref() == Some("ok"),
        format!("--app test did not run:\n{}", stdout),
    )?;
    expect(
        outcome(&stdout, "api_runs_when_enabled").as_deref() == Some("ignored"),
        format!("--api test was not skipped:\n{}", stdout),
    )?;

    let output = run_self(&[])?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    for category in Category::ALL {
        expect(
            stderr.contains(&format!("The option of {} is required to run.", category)),
            format!("missing skip reason for {}:\n{}", category, stderr),
        )?;
    }

    Ok(())
}
