//! End-to-end tests for the themer CLI.
//!
//! Only offline subcommands run here; generation against a live service is
//! covered by the client crate's tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use themer::{Theme, create_default_theme};

/// Get a Command for the themer binary with a clean environment.
#[allow(deprecated)]
fn themer_cmd() -> Command {
    let mut cmd = Command::cargo_bin("themer").unwrap();
    for var in [
        "THEMER_CONFIG",
        "THEMER_ENDPOINT",
        "THEMER_TIMEOUT_SECS",
        "THEMER_HISTORY",
        "THEMER_LOG",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

// =============================================================================
// Default theme
// =============================================================================

mod default_theme {
    use super::*;

    #[test]
    fn test_default_prints_stylesheet() {
        themer_cmd()
            .arg("default")
            .assert()
            .success()
            .stdout(predicate::str::starts_with(":root {"))
            .stdout(predicate::str::contains(".dark {"))
            .stdout(predicate::str::contains("--background: oklch(0.98 0 0);"))
            .stdout(predicate::str::contains("--radius: 0.625rem;"));
    }

    #[test]
    fn test_default_json_is_a_theme() {
        let output = themer_cmd()
            .args(["default", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let theme = Theme::from_json(std::str::from_utf8(&output.stdout).unwrap()).unwrap();
        assert_eq!(theme.name, "Default Theme");
        assert_eq!(theme.dark.get("border"), Some("oklch(1 0 0 / 0.1)"));
    }

    #[test]
    fn test_default_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme.css");

        themer_cmd()
            .args(["default", "--out"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("--primary: oklch(0.205 0 0);"));
    }
}

// =============================================================================
// Color conversion
// =============================================================================

mod convert {
    use super::*;

    #[test]
    fn test_convert_hex() {
        themer_cmd()
            .args(["convert", "#3b82f6"])
            .assert()
            .success()
            .stdout(predicate::str::contains("oklch(0.6231 0.188 259.8145)"))
            .stdout(predicate::str::contains("217deg 91% 60%"));
    }

    #[test]
    fn test_convert_short_hex() {
        themer_cmd()
            .args(["convert", "#fff"])
            .assert()
            .success()
            .stdout(predicate::str::contains("hex:   #ffffff"))
            .stdout(predicate::str::contains("oklch(1 0 0)"));
    }

    #[test]
    fn test_convert_triple() {
        themer_cmd()
            .args(["convert", "oklch(0.6231 0.188 259.8145)"])
            .assert()
            .success()
            .stdout(predicate::str::contains("hex:   #3b82f6"));
    }

    #[test]
    fn test_convert_rejects_names() {
        themer_cmd()
            .args(["convert", "rebeccapurple"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not a HEX color or OKLCH triple"));
    }
}

// =============================================================================
// Contrast audit
// =============================================================================

mod contrast {
    use super::*;

    #[test]
    fn test_default_theme_report() {
        themer_cmd()
            .arg("contrast")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Light mode"))
            .stdout(predicate::str::is_match(r"primary/primary-foreground\s+\d+\.\d+:1  PASS").unwrap())
            .stdout(predicate::str::is_match(r"muted/muted-foreground\s+4\.\d+:1  FAIL").unwrap())
            .stdout(predicate::str::contains("1 of 11 pairs below AA"));
    }

    #[test]
    fn test_dark_report() {
        themer_cmd()
            .args(["contrast", "--dark"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Dark mode"))
            .stdout(predicate::str::contains("0 of 11 pairs below AA"));
    }

    #[test]
    fn test_fix_writes_repaired_theme() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.json");
        let fixed = dir.path().join("fixed.json");

        let mut theme = create_default_theme();
        theme.light.set("card-foreground", "#eeeeee");
        theme.to_file(&base).unwrap();

        themer_cmd()
            .args(["contrast", "--fix", "--base"])
            .arg(&base)
            .arg("--out")
            .arg(&fixed)
            .assert()
            .success()
            .stdout(predicate::str::contains("fixed card-foreground: #"))
            .stdout(predicate::str::contains("fixed muted-foreground: #"))
            .stdout(predicate::str::contains("0 of 11 pairs below AA"));

        let repaired = Theme::from_file(&fixed).unwrap();
        assert_eq!(repaired.id, theme.id);
        assert!(repaired.light.get("card-foreground").unwrap().starts_with("oklch("));
    }

    #[test]
    fn test_fix_dark_keeps_dark_pairs_passing() {
        themer_cmd()
            .args(["contrast", "--fix", "--dark"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Dark mode"))
            .stdout(predicate::str::contains("fixed muted-foreground").not())
            .stdout(predicate::str::is_match(r"muted/muted-foreground\s+5\.\d+:1  PASS").unwrap())
            .stdout(predicate::str::contains("0 of 11 pairs below AA"));
    }

    #[test]
    fn test_fix_writes_toml_by_extension() {
        let dir = TempDir::new().unwrap();
        let fixed = dir.path().join("fixed.toml");

        themer_cmd()
            .args(["contrast", "--fix", "--out"])
            .arg(&fixed)
            .assert()
            .success()
            .stdout(predicate::str::contains("0 of 11 pairs below AA"));

        let written = std::fs::read_to_string(&fixed).unwrap();
        assert!(!written.trim_start().starts_with('{'));
        let repaired = Theme::from_file(&fixed).unwrap();
        assert_ne!(
            repaired.light.get("muted-foreground"),
            create_default_theme().light.get("muted-foreground")
        );
    }

    #[test]
    fn test_missing_base_fails() {
        themer_cmd()
            .args(["contrast", "--base", "/nonexistent/theme.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load theme"));
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_diagnostics_defaults() {
        themer_cmd()
            .arg("diagnostics")
            .assert()
            .success()
            .stdout(predicate::str::contains("Endpoint: http://localhost:3000"))
            .stdout(predicate::str::contains("Timeout: 60s"));
    }

    #[test]
    fn test_layering_file_env_flag() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = \"http://file.local\"\ntimeout_secs = 5\nhistory_limit = 7").unwrap();

        themer_cmd()
            .arg("diagnostics")
            .arg("--config")
            .arg(file.path())
            .env("THEMER_TIMEOUT_SECS", "9")
            .args(["--history-limit", "3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Endpoint: http://file.local"))
            .stdout(predicate::str::contains("Timeout: 9s"))
            .stdout(predicate::str::contains("History limit: 3"));
    }

    #[test]
    fn test_flag_beats_env() {
        themer_cmd()
            .args(["diagnostics", "--endpoint", "http://flag.local"])
            .env("THEMER_ENDPOINT", "http://env.local")
            .assert()
            .success()
            .stdout(predicate::str::contains("Endpoint: http://flag.local"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        themer_cmd()
            .args(["diagnostics", "--timeout-secs", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("timeout"));
    }
}

// =============================================================================
// Generation failures
// =============================================================================

mod generation {
    use super::*;

    #[test]
    fn test_unreachable_endpoint_fails_cleanly() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        themer_cmd()
            .args(["generate", "ocean", "--timeout-secs", "5", "--endpoint"])
            .arg(&endpoint)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Network error"));
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        themer_cmd()
            .args(["generate", "ocean", "--endpoint", "ftp://nope"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to set up the generation client"));
    }
}
