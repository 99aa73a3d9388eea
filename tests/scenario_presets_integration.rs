use std::process::Command;

#[derive(Debug)]
struct Summary {
    steps: f64,
    sold_mwh: f64,
    excess_mwh: f64,
    hoarded_mwh: f64,
    final_storage_mwh: f64,
    production_mwh: f64,
    sell_excess_count: usize,
}

#[test]
fn scenario_files_run_via_cli_and_produce_distinct_dynamics() {
    let baseline = run_and_parse(&["--scenario", "scenarios/baseline.toml"]);
    let small = run_and_parse(&["--scenario", "scenarios/small_storage.toml"]);
    let volatile = run_and_parse(&["--scenario", "scenarios/volatile_prices.toml"]);

    assert_eq!(baseline.steps, 168.0);
    assert_eq!(small.steps, 168.0);

    assert!(
        small.excess_mwh > baseline.excess_mwh,
        "expected small_storage to spill more than baseline: small={:.3}, baseline={:.3}",
        small.excess_mwh,
        baseline.excess_mwh
    );
    assert!(small.sell_excess_count > baseline.sell_excess_count);
    assert!(small.final_storage_mwh <= 40.0 + 1e-3);

    assert!(
        (baseline.sold_mwh - volatile.sold_mwh).abs() > 1.0,
        "expected baseline and volatile_prices sales to differ: baseline={:.3}, volatile={:.3}",
        baseline.sold_mwh,
        volatile.sold_mwh
    );
}

#[test]
fn presets_match_their_scenario_files() {
    let from_file = run_and_parse(&["--scenario", "scenarios/small_storage.toml"]);
    let from_preset = run_and_parse(&["--preset", "small_storage"]);

    assert_eq!(from_file.sold_mwh, from_preset.sold_mwh);
    assert_eq!(from_file.hoarded_mwh, from_preset.hoarded_mwh);
    assert_eq!(from_file.final_storage_mwh, from_preset.final_storage_mwh);
}

#[test]
fn energy_balances_over_the_whole_run() {
    let s = run_and_parse(&["--preset", "baseline"]);
    // Everything produced was either sold or is still stored.
    let balance = s.production_mwh - s.sold_mwh - s.final_storage_mwh;
    assert!(balance.abs() < 0.01, "unbalanced run: {s:?}");
}

#[test]
fn seed_override_changes_the_run() {
    let a = run_and_parse(&["--preset", "baseline"]);
    let b = run_and_parse(&["--preset", "baseline", "--seed", "2024"]);
    assert_ne!(a.production_mwh, b.production_mwh);
}

#[test]
fn decisions_csv_is_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("decisions.csv");
    let path_str = path.to_str().expect("utf-8 path");

    run_and_parse(&["--preset", "baseline", "--decisions-out", path_str]);

    let content = std::fs::read_to_string(&path).expect("csv written");
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("index,price,demand,production,decision,sold,hoarded,excess,stored_energy")
    );
    assert_eq!(lines.count(), 168);
}

#[test]
fn rust_log_debug_enables_per_step_events() {
    let output = Command::new(env!("CARGO_BIN_EXE_dispatch-sim"))
        .args(["--preset", "baseline", "--quiet"])
        .env("RUST_LOG", "debug")
        .output()
        .expect("dispatch-sim process should run");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dispatch step"), "stderr: {stderr}");
}

#[test]
fn default_log_level_hides_per_step_events() {
    let output = Command::new(env!("CARGO_BIN_EXE_dispatch-sim"))
        .args(["--preset", "baseline", "--quiet"])
        .env_remove("RUST_LOG")
        .output()
        .expect("dispatch-sim process should run");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dispatch run finished"), "stderr: {stderr}");
    assert!(!stderr.contains("dispatch step"), "stderr: {stderr}");
}

#[test]
fn unknown_preset_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_dispatch-sim"))
        .args(["--preset", "no_such_preset", "--quiet"])
        .output()
        .expect("dispatch-sim process should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr: {stderr}");
}

fn run_and_parse(args: &[&str]) -> Summary {
    let output = Command::new(env!("CARGO_BIN_EXE_dispatch-sim"))
        .args(args)
        .arg("--quiet")
        .output()
        .expect("dispatch-sim process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    parse_summary(&stdout)
}

fn parse_summary(stdout: &str) -> Summary {
    Summary {
        steps: parse_metric(stdout, "Steps:", ""),
        sold_mwh: parse_metric(stdout, "Total sold energy:", "MWh"),
        excess_mwh: parse_metric(stdout, "Excess sold energy:", "MWh"),
        hoarded_mwh: parse_metric(stdout, "Total hoarded energy:", "MWh"),
        final_storage_mwh: parse_metric(stdout, "Final storage:", "MWh"),
        production_mwh: parse_metric(stdout, "Total production:", "MWh"),
        sell_excess_count: parse_sell_excess_count(stdout),
    }
}

fn parse_sell_excess_count(stdout: &str) -> usize {
    let line = find_line(stdout, "Decisions:");
    line.split_whitespace()
        .find_map(|tok| tok.strip_prefix("sell_excess="))
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| panic!("invalid decisions line `{line}`"))
}

fn find_line<'a>(stdout: &'a str, label: &str) -> &'a str {
    stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing summary line `{label}` in output: {stdout}"))
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = find_line(stdout, label);

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid summary format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from summary line `{line}`"))
}
