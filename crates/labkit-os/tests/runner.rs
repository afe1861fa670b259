//! Integration tests running real programs.

#![cfg(unix)]

use labkit_common::Error;
use labkit_os::{run, CommandOutput};

#[test]
fn captures_first_line_and_zero_status() {
    let output = run(["echo", "hello world"]).expect("echo runs");
    assert_eq!(output.status(), 0);
    assert!(output.success());
    assert_eq!(output.response(), Some("hello world"));
}

#[test]
fn only_the_first_line_is_kept() {
    let output = run(["printf", "first\\nsecond\\n"]).expect("printf runs");
    assert_eq!(output.response(), Some("first"));
}

#[test]
fn non_zero_exit_is_reported_not_raised() {
    let output = run(["sh", "-c", "exit 3"]).expect("sh runs");
    assert_eq!(output.status(), 3);
    assert!(!output.success());
    assert_eq!(output.response(), None);
}

#[test]
fn stderr_is_used_when_stdout_is_empty() {
    let output = run(["sh", "-c", "echo oops >&2; exit 1"]).expect("sh runs");
    assert_eq!(output.status(), 1);
    assert_eq!(output.response(), Some("oops"));
}

#[test]
fn stdout_wins_over_stderr() {
    let output = run(["sh", "-c", "echo err >&2; echo out"]).expect("sh runs");
    assert_eq!(output.response(), Some("out"));
}

#[test]
fn signal_termination_maps_to_shell_convention() {
    let output = run(["sh", "-c", "kill -9 $$"]).expect("sh runs");
    assert_eq!(output.status(), 128 + 9);
}

#[test]
fn arguments_are_passed_verbatim() {
    let args = vec![
        "sh".to_string(),
        "-c".to_string(),
        "echo \"$1\"".to_string(),
        "sh".to_string(),
        "a b  c".to_string(),
    ];
    let output = run(&args).expect("sh runs");
    assert_eq!(output.response(), Some("a b  c"));
}

#[test]
fn unknown_program_is_a_spawn_error() {
    let err = run(["definitely-not-a-real-program-labkit"]).unwrap_err();
    match err {
        Error::CommandSpawn { command, .. } => {
            assert_eq!(command, "definitely-not-a-real-program-labkit")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn output_serializes_to_json() {
    let output: CommandOutput = run(["echo", "hi"]).expect("echo runs");
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json, serde_json::json!({ "status": 0, "response": "hi" }));
}
