use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_r7cal"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute r7cal")
}

#[test]
fn test_search_small_domain() {
    let output = run(&[
        "search",
        "--modulus",
        "10",
        "--r0",
        "1",
        "--r1",
        "2",
        "--target",
        "1",
        "-j",
        "3",
        "--progress-interval",
        "0",
    ]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("r7 = 8"), "Should print the solution");
    assert!(
        stdout.contains("Search Statistics:"),
        "Should print statistics"
    );
}

#[test]
fn test_search_not_found_exit_code() {
    let output = run(&[
        "search",
        "--modulus",
        "10",
        "--r0",
        "0",
        "--r1",
        "1",
        "--target",
        "5",
        "-j",
        "2",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No solution found in [0, 10)."));
}

#[test]
fn test_search_rejects_zero_workers() {
    let output = run(&["search", "--modulus", "10", "--r0", "1", "-j", "0"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("worker count must be at least 1"),
        "Should report the invalid worker count"
    );
}

#[test]
fn test_eval_reference_value() {
    let output = run(&["eval", "--r7", "25734"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("f(4, 1) with r7 = 25734 -> 6"));
    assert!(stdout.contains("Target 6: match"));
    assert!(stdout.contains("Calls:"));
    assert!(stdout.contains("Pairs computed:"));
}

#[test]
fn test_eval_rejects_out_of_domain_r7() {
    let output = run(&["eval", "--r7", "32768"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("r7 = 32768 is outside the domain [0, 32768)"));
}

#[test]
fn test_verify_tail_of_reference_prefix() {
    let output = run(&["verify", "--r7", "25734", "--from", "25700"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("r7 = 25734 produces the target 6"));
    assert!(stdout.contains("No earlier solution in [25700, 25734)."));
}

#[test]
fn test_verify_reports_earlier_solution() {
    // f(0, 4) = 5 for every r7, so 0 already solves it
    let output = run(&[
        "verify", "--modulus", "10", "--r0", "0", "--r1", "4", "--target", "5", "--r7", "3",
    ]);

    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Earlier solutions in [0, 3): [0, 1, 2]"));
}

#[test]
fn test_requires_subcommand() {
    let output = run(&[]);
    assert!(!output.status.success());
}
