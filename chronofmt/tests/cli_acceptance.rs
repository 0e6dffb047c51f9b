use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Wednesday 2025-03-12 16:20 UTC.
const NOW: &str = "2025-03-12T16:20:00Z";

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
        }
    }

    fn write_config(&self, contents: &str) {
        let dir = self.xdg_config.join("chronofmt");
        fs::create_dir_all(&dir).expect("failed to create config dir");
        fs::write(dir.join("config.toml"), contents).expect("failed to write config");
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(assert_cmd::cargo::cargo_bin!("chronofmt"));
        command
            .args(args)
            .env("HOME", &self.home)
            .env("XDG_CONFIG_HOME", &self.xdg_config)
            .env("XDG_STATE_HOME", &self.xdg_state)
            .env_remove("RUST_LOG");
        command
    }
}

fn run_bin(env: &CliTestEnv, args: &[&str]) -> Output {
    env.command(args)
        .stdin(Stdio::null())
        .output()
        .unwrap_or_else(|e| panic!("failed to execute chronofmt: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "chronofmt {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn formats_arguments_with_pinned_clock() {
    let env = CliTestEnv::new();
    let args = [
        "--now",
        NOW,
        "--tz",
        "utc",
        "2025-03-12T16:15:00Z",
        "2025-03-10T09:00:00Z",
        "not-a-date",
    ];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);
    assert_eq!(
        stdout_lines(&output),
        vec!["5 minutes ago", "2 days ago", "Invalid date"]
    );
}

#[test]
fn long_date_and_time_only() {
    let env = CliTestEnv::new();

    let args = ["--now", NOW, "--tz", "utc", "-f", "long-date", "2025-01-13", "2024-02-22"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);
    assert_eq!(stdout_lines(&output), vec!["January 13th", "February 22nd, 2024"]);

    let args = ["--now", NOW, "--tz", "utc", "-f", "time-only", "2025-03-12T15:45:00Z"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);
    assert_eq!(stdout_lines(&output), vec!["3:45pm"]);
}

#[test]
fn unknown_format_fails_loudly() {
    let env = CliTestEnv::new();
    let output = run_bin(&env, &["-f", "fortnightly", "2025-03-12"]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("fortnightly"),
        "expected the bad format name in stderr, got:\n{stderr}"
    );
}

#[test]
fn invalid_now_is_an_error() {
    let env = CliTestEnv::new();
    let output = run_bin(&env, &["--now", "whenever", "2025-03-12"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--now"), "stderr was:\n{stderr}");
}

#[test]
fn config_timezone_is_used_and_flag_overrides_it() {
    let env = CliTestEnv::new();
    env.write_config("[display]\ntimezone = \"+09:00\"\n");

    // 16:20 UTC is already the 13th in Tokyo.
    let args = ["--now", NOW, "-f", "relative-day", "2025-03-12T12:00:00Z"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);
    assert_eq!(stdout_lines(&output), vec!["Yesterday"]);

    let args = ["--now", NOW, "--tz", "utc", "-f", "relative-day", "2025-03-12T12:00:00Z"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);
    assert_eq!(stdout_lines(&output), vec!["Today"]);
}

#[test]
fn invalid_config_is_rejected() {
    let env = CliTestEnv::new();
    env.write_config("[relative]\njust_now_secs = 0\n");

    let output = run_bin(&env, &["2025-03-12"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("configuration"), "stderr was:\n{stderr}");
}

#[test]
fn json_output_for_all_formats() {
    let env = CliTestEnv::new();
    let args = ["--now", NOW, "--tz", "utc", "--all", "-o", "json", "2025-03-11T08:05:00Z"];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&lines[0]).expect("valid json");
    assert_eq!(value["input"], "2025-03-11T08:05:00Z");
    let formats = &value["formats"];
    assert_eq!(formats["relative-day"], "Yesterday");
    assert_eq!(formats["relative"], "1 day ago");
    assert_eq!(formats["short-date"], "Mar 11");
    assert_eq!(formats["short-date-with-time"], "Mar 11, 8:05am");
    assert_eq!(formats["time-only"], "8:05am");
    assert_eq!(formats["short-date-with-weekday-relative"], "Yesterday");
    assert_eq!(formats["long-date"], "March 11th");
}

#[test]
fn json_output_single_format() {
    let env = CliTestEnv::new();
    let args = ["--now", NOW, "--tz", "utc", "-o", "json", "-f", "short-date", "2023-07-04"];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let value: serde_json::Value =
        serde_json::from_str(&stdout_lines(&output)[0]).expect("valid json");
    assert_eq!(value["format"], "short-date");
    assert_eq!(value["display"], "Jul 4, 2023");
}

#[test]
fn reads_timestamps_from_stdin() {
    let env = CliTestEnv::new();
    let mut child = env
        .command(&["--now", NOW, "--tz", "utc", "-f", "short-date-with-weekday-relative"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn chronofmt");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"2025-03-13T10:00:00Z\n\n2025-03-07\n")
        .expect("failed to write stdin");

    let output = child.wait_with_output().expect("failed to wait on chronofmt");
    assert_success(&["<stdin>"], &output);
    assert_eq!(stdout_lines(&output), vec!["Tomorrow", "Fri, Mar 7"]);
}

#[test]
fn watch_mode_stops_after_ticks() {
    let env = CliTestEnv::new();
    let args = ["--now", NOW, "--tz", "utc", "--watch", "1", "--ticks", "2", "2025-03-12T16:19:00Z"];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);
    assert_eq!(stdout_lines(&output), vec!["1 minute ago", "1 minute ago"]);
}

#[test]
fn writes_log_file_to_state_dir() {
    let env = CliTestEnv::new();
    let args = ["--now", NOW, "2025-03-12"];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let log_dir = env.xdg_state.join("chronofmt");
    let has_log = fs::read_dir(&log_dir)
        .expect("log dir should exist")
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name().to_string_lossy().starts_with("chronofmt.log"));
    assert!(has_log, "expected a chronofmt.log* file in {}", log_dir.display());
}
