//! Cross-process determinism of search reports.
//!
//! Spawns the `report_fixture` binary under several environment variants
//! and asserts identical output. Hash-map iteration order differs between
//! processes, so this catches any report that depends on it.

use std::path::Path;
use std::process::Command;

use lock_tests::fixtures::blocks_three;
use wayfinder_harness::runner::{solve_problem, Strategy};
use wayfinder_search::SearchPolicy;

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

/// Run the fixture binary with the given cwd and environment overrides.
fn run_variant(work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let bin = env!("CARGO_BIN_EXE_report_fixture");
    let mut command = Command::new(bin);
    command
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LANG")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "report_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn report_output_is_identical_across_processes() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[]);
    assert_eq!(baseline.lines().count(), 4 * Strategy::ALL.len());
    assert!(baseline.contains("bfs.digest=sha256:"));

    let alt_cwd = std::env::temp_dir().to_string_lossy().to_string();
    assert_eq!(baseline, run_variant(&alt_cwd, &[]), "cwd changed output");
    assert_eq!(
        baseline,
        run_variant(&root, &[("LC_ALL", "C"), ("LANG", "C")]),
        "locale changed output"
    );
    assert_eq!(
        baseline,
        run_variant(
            &root,
            &[
                ("WAYFINDER_NOISE", "should_not_matter"),
                ("TZ", "America/New_York"),
                ("RUST_LOG", "trace"),
            ]
        ),
        "spurious env vars changed output"
    );
}

#[test]
fn report_output_matches_in_process_digests() {
    let output = run_variant(&workspace_root(), &[]);
    for strategy in Strategy::ALL {
        let summary = solve_problem(&blocks_three(), strategy, &SearchPolicy::default()).unwrap();
        let line = format!("{strategy}.digest={}", summary.report.digest());
        assert!(output.lines().any(|l| l == line), "missing {line}");
    }
}
