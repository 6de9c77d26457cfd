//! End-to-end tests: the `fetchbench` binary against a local HTTP server.

#[path = "../../fetchbench-core/tests/common/static_server.rs"]
#[allow(dead_code)]
mod static_server;

use static_server::Route;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

/// Runs the binary with config, logs and output isolated under `home`.
fn fetchbench(home: &TempDir, args: &[&str]) -> Output {
    let out_dir = home.path().join("out");
    std::fs::create_dir_all(&out_dir).unwrap();
    Command::new(env!("CARGO_BIN_EXE_fetchbench"))
        .args(args)
        .arg("--config")
        .arg(home.path().join("config.toml"))
        .arg("--output-dir")
        .arg(&out_dir)
        .env("XDG_STATE_HOME", home.path().join("state"))
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn out(home: &TempDir, name: &str) -> PathBuf {
    home.path().join("out").join(name)
}

fn count_lines(text: &str, prefix: &str) -> usize {
    text.lines().filter(|l| l.starts_with(prefix)).count()
}

/// Seconds printed after `prefix` on every line that starts with it.
fn seconds_after(text: &str, prefix: &str) -> Vec<f64> {
    text.lines()
        .filter_map(|l| l.strip_prefix(prefix))
        .map(|rest| rest.split_whitespace().next().unwrap().parse().unwrap())
        .collect()
}

#[test]
fn compare_runs_all_four_strategies() {
    let a = vec![0xAB; 20_000];
    let b = b"second image".to_vec();
    let base = static_server::start(vec![
        ("/a.png", Route::ok(a.clone())),
        ("/b.png", Route::ok(b.clone())),
    ]);
    let home = tempdir().unwrap();
    let url_a = format!("{base}/a.png");
    let url_b = format!("{base}/b.png");

    let output = fetchbench(&home, &[&url_a, &url_b]);
    let text = stdout(&output);
    assert!(output.status.success(), "{text}");

    assert_eq!(std::fs::read(out(&home, "a.png")).unwrap(), a);
    assert_eq!(std::fs::read(out(&home, "b.png")).unwrap(), b);
    assert!(!out(&home, "a.png.part").exists());

    // Two fetch lines per strategy, one header per strategy, one
    // aggregate line per strategy during the run plus the final block.
    assert_eq!(count_lines(&text, "elapsed time: "), 8, "{text}");
    for label in ["Sequential", "Multithreaded", "Multiprocess", "Asynchronous"] {
        assert_eq!(count_lines(&text, &format!("{label} approach: ")), 2, "{text}");
    }
    let starts: Vec<&str> = text.lines().filter(|l| l.starts_with("Starting ")).collect();
    assert_eq!(starts.len(), 4, "{text}");
    assert!(starts[0].starts_with("Starting sequential approach"));
    assert!(starts[3].starts_with("Starting asynchronous approach"));
    assert_eq!(count_lines(&text, "Fastest: "), 1, "{text}");
    assert!(!text.contains("warning:"), "{text}");
}

#[test]
fn missing_image_is_reported_and_siblings_succeed() {
    let base = static_server::start(vec![("/ok.png", Route::ok(b"fine".to_vec()))]);
    let home = tempdir().unwrap();
    let ok = format!("{base}/ok.png");
    let missing = format!("{base}/missing.png");

    let output = fetchbench(&home, &[&missing, &ok]);
    let text = stdout(&output);
    assert!(output.status.success(), "{text}");

    assert_eq!(std::fs::read(out(&home, "ok.png")).unwrap(), b"fine");
    assert!(!out(&home, "missing.png").exists());
    assert_eq!(count_lines(&text, "elapsed time: "), 4, "{text}");
    assert_eq!(count_lines(&text, &format!("failed: {missing}")), 4, "{text}");
    assert!(text.contains("(1 of 2 failed)"), "{text}");
}

#[test]
fn run_single_multi_process_strategy() {
    let base = static_server::start(vec![
        ("/one.jpg", Route::ok(b"one".to_vec())),
        ("/two.jpg", Route::ok(b"two".to_vec())),
        ("/three.jpg", Route::ok(b"three".to_vec())),
    ]);
    let home = tempdir().unwrap();
    let urls: Vec<String> = ["one", "two", "three"]
        .iter()
        .map(|n| format!("{base}/{n}.jpg"))
        .collect();
    let mut args = vec!["run", "--strategy", "multi-process", "--processes", "2"];
    args.extend(urls.iter().map(String::as_str));

    let output = fetchbench(&home, &args);
    let text = stdout(&output);
    assert!(output.status.success(), "{text}");
    assert_eq!(count_lines(&text, "elapsed time: "), 3, "{text}");
    assert_eq!(count_lines(&text, "Multiprocess approach: "), 1, "{text}");
    assert!(text.contains("3 of 3 fetched"), "{text}");

    let tasks = seconds_after(&text, "elapsed time: ");
    let aggregate = seconds_after(&text, "Multiprocess approach: ");
    let slowest = tasks.iter().copied().fold(0.0, f64::max);
    assert!(aggregate[0] >= slowest, "{aggregate:?} < {slowest}: {text}");
    for name in ["one", "two", "three"] {
        let path = out(&home, &format!("{name}.jpg"));
        assert_eq!(std::fs::read(path).unwrap(), name.as_bytes());
    }
}

#[test]
fn run_single_async_strategy_in_place() {
    let base = static_server::start(vec![("/x.gif", Route::ok(b"gif".to_vec()))]);
    let home = tempdir().unwrap();
    let url = format!("{base}/x.gif");

    let output = fetchbench(&home, &["run", "-s", "async", "--write-mode", "in-place", &url]);
    let text = stdout(&output);
    assert!(output.status.success(), "{text}");
    assert_eq!(count_lines(&text, "Asynchronous approach: "), 1, "{text}");
    assert_eq!(std::fs::read(out(&home, "x.gif")).unwrap(), b"gif");
}

#[test]
fn malformed_inputs_are_skipped() {
    let base = static_server::start(vec![("/a.png", Route::ok(b"a".to_vec()))]);
    let home = tempdir().unwrap();
    let url = format!("{base}/a.png");

    let output = fetchbench(&home, &["run", "-s", "sequential", "not a url", &url]);
    let text = stdout(&output);
    assert!(output.status.success(), "{text}");
    assert!(text.contains("skipping not a url"), "{text}");
    assert!(text.contains("1 of 1 fetched"), "{text}");
}

#[test]
fn no_usable_locators_exits_nonzero() {
    let home = tempdir().unwrap();
    let output = fetchbench(&home, &["not a url", "ftp://x/y.png"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no usable locators"), "{stderr}");
    assert_eq!(std::fs::read_dir(home.path().join("out")).unwrap().count(), 0);
}

#[test]
fn url_file_is_read() {
    let base = static_server::start(vec![("/f.png", Route::ok(b"from file".to_vec()))]);
    let home = tempdir().unwrap();
    let list = home.path().join("urls.txt");
    std::fs::write(&list, format!("# list\n{base}/f.png\n")).unwrap();

    let output = fetchbench(
        &home,
        &["run", "-s", "threaded", "--url-file", list.to_str().unwrap()],
    );
    assert!(output.status.success(), "{}", stdout(&output));
    assert_eq!(std::fs::read(out(&home, "f.png")).unwrap(), b"from file");
}

#[test]
fn worker_prints_one_json_result() {
    let base = static_server::start(vec![("/w.png", Route::ok(b"worker".to_vec()))]);
    let dir = tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_fetchbench"))
        .args(["fetch-one", &format!("{base}/w.png"), "--output-dir"])
        .arg(dir.path())
        .env("XDG_STATE_HOME", dir.path().join("state"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let result = fetchbench_core::strategy::parse_worker_output(&output.stdout).unwrap();
    assert!(result.is_success());
    assert_eq!(result.filename.as_deref(), Some("w.png"));
    assert_eq!(std::fs::read(dir.path().join("w.png")).unwrap(), b"worker");
}

#[test]
fn worker_failure_exits_nonzero_with_result() {
    let base = static_server::start(vec![]);
    let dir = tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_fetchbench"))
        .args(["fetch-one", &format!("{base}/gone.png"), "--output-dir"])
        .arg(dir.path())
        .env("XDG_STATE_HOME", dir.path().join("state"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let result = fetchbench_core::strategy::parse_worker_output(&output.stdout).unwrap();
    assert_eq!(
        result.error_kind(),
        Some(fetchbench_core::error::ErrorKind::Network)
    );
    assert!(!dir.path().join("gone.png").exists());
}
