use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

fn run_shell(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_shale"))
        .args(args)
        .env_remove("SHALE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_echo_runs_in_child() {
    let output = run_shell(&["--plain"], "echo hi\nexit\n");

    assert!(output.status.success());
    assert!(stdout_lines(&output).iter().any(|l| l == "hi"));
}

#[test]
fn test_end_of_input_exits_zero() {
    let output = run_shell(&["--plain"], "");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_exit_with_arguments_exits_zero() {
    let output = run_shell(&["--plain"], "exit 5\necho unreachable\n");

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout_lines(&output).iter().any(|l| l == "unreachable"));
}

#[test]
fn test_cd_changes_directory_for_children() {
    let output = run_shell(&["--plain"], "cd /\npwd\nexit\n");
    assert!(stdout_lines(&output).iter().any(|l| l == "/"));
}

#[test]
fn test_background_job_does_not_block() {
    let started = Instant::now();
    let mut child = Command::new(env!("CARGO_BIN_EXE_shale"))
        .arg("--plain")
        .env_remove("SHALE_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"sleep 5 &\nexit\n")
        .unwrap();

    // The sleeper keeps stdout open, so only the shell's own exit is timed.
    let status = child.wait().unwrap();
    assert!(status.success());
    assert!(started.elapsed() < Duration::from_secs(3));

    let stdout = BufReader::new(child.stdout.take().unwrap());
    let notice = stdout
        .lines()
        .map(Result::unwrap)
        .find(|l| l.starts_with("Job "))
        .expect("no job notice");
    assert!(notice["Job ".len()..].parse::<u32>().is_ok());
}

#[test]
fn test_unknown_program_reports_and_continues() {
    let output = run_shell(&["--plain"], "shale-no-such-program\necho after\nexit\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success());
    assert!(stderr.contains("shale: shale-no-such-program: No such file or directory"));
    assert!(stdout_lines(&output).iter().any(|l| l == "after"));
}

#[test]
fn test_help_flag() {
    let output = run_shell(&["--help"], "");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Usage: shale"));
}

#[test]
fn test_unknown_flag_fails() {
    let output = run_shell(&["--bogus"], "");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("unknown flag: --bogus"));
}
