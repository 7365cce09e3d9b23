use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_matrix-power"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch matrix-power")
}

#[test]
fn zeroth_power_prints_one() {
    for mode in ["naive", "smart", "ndarray"] {
        let output = run(&["--size", "4", "--power", "0", "--mode", mode]);
        assert!(output.status.success(), "{mode}");
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");
    }
}

#[test]
fn modes_print_the_same_summary() {
    let summaries: Vec<f64> = ["naive", "smart", "ndarray"]
        .iter()
        .map(|mode| {
            let output = run(&["--size", "6", "--power", "5", "--mode", mode, "--seed", "42"]);
            assert!(output.status.success(), "{mode}");
            String::from_utf8_lossy(&output.stdout).trim().parse().unwrap()
        })
        .collect();
    for value in &summaries[1..] {
        assert!((value - summaries[0]).abs() <= 1e-9 * summaries[0].abs().max(1.0));
    }
}

#[test]
fn negative_power_fails_with_diagnostic() {
    let output = run(&["--size", "3", "--power", "-1", "--mode", "smart"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("negative powers"));
}

#[test]
fn zero_size_fails() {
    let output = run(&["--size", "0", "--power", "2"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid matrix"));
}

#[test]
fn compare_mode_prints_every_strategy() {
    let output = run(&["--size", "5", "--power", "4", "--mode", "compare"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<_> = stdout
        .lines()
        .map(|line| line.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(names, vec!["naive", "smart", "ndarray"]);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn unaddressable_size_fails_with_diagnostic() {
    let output = run(&["--size", "4294967296", "--power", "0"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("too many elements"), "{stderr}");
    assert!(!stderr.contains("panicked"), "{stderr}");
}
