use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "pcg-towers"])
        .status()
        .expect("failed to invoke cargo check for pcg-towers CLI binary");

    assert!(status.success(), "cargo check --bin pcg-towers should succeed");
}

#[test]
fn cli_prints_a_round_for_the_default_seed() {
    let output = Command::new(env!("CARGO_BIN_EXE_pcg-towers"))
        .args(["--seed", "42", "--difficulty", "easy", "--waves", "2"])
        .output()
        .expect("failed to run pcg-towers");

    assert!(output.status.success(), "pcg-towers should exit cleanly");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("world 42 (easy)"));
    assert!(stdout.contains("round "));
}

#[test]
fn cli_reports_missing_config_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_pcg-towers"))
        .args(["--config", "does-not-exist.toml"])
        .output()
        .expect("failed to run pcg-towers");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read config"));
}
