// tests/cli_exit.rs - Exit codes of the stimtrace binary
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const REPORT: &str = "<html><body>\n\
<div class=\"content active\"><table><tr><td>Campaign date</td><td>2024-05-01 07:00</td></tr></table></div>\n\
<div class=\"title\"><span class=\"highlight\">Start</span></div>\n\
<div class=\"title test\">20_Lamp</div>\n\
<div class=\"content\">Valuation: PASS</div>\n\
<div name=\"test\"><b>Name</b>: 20_Lamp <b>Valuation</b>: PASS</div>\n\
<p><span class=\"text-error\">07:01|x|y|20_Lamp: flicker</span></p>\n\
</body></html>\n";

fn stimtrace(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stimtrace"))
        .current_dir(cwd)
        .env_remove("STIMTRACE_LOG")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_exit_0_single_with_json() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("RIG09.html"), REPORT).unwrap();

    let out = stimtrace(d.path(), &["single", "RIG09.html", "--out", "reports", "--quiet"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(d.path().join("reports/RIG09.html_summary.json").exists());

    let out = stimtrace(d.path(), &["single", "RIG09.html", "--cyclic", "--out", "reports", "-q"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(d.path().join("reports/RIG09.html_cyclic_summary.json").exists());
}

#[test]
fn test_exit_0_stats_prints_tables() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("RIG09.html"), REPORT).unwrap();

    let out = stimtrace(d.path(), &["stats", "."]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Details"));
    assert!(stdout.contains("20_Lamp"));
    assert!(stdout.contains("100.00%"));
}

#[test]
fn test_exit_0_errors_writes_json() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("RIG09.html"), REPORT).unwrap();

    let out = stimtrace(d.path(), &["errors", ".", "--out", "o", "--quiet"]);
    assert_eq!(out.status.code(), Some(0));
    let json = fs::read_to_string(d.path().join("o/ErrorStatistics_Summary.json")).unwrap();
    assert!(json.contains("flicker"));
}

#[test]
fn test_exit_2_no_documents() {
    let d = tempfile::tempdir().unwrap();
    let out = stimtrace(d.path(), &["stats", "."]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_exit_3_partial_batch() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("RIG09.html"), REPORT).unwrap();
    fs::write(d.path().join("broken.html"), [0xff, 0xfe, 0xfd]).unwrap();

    let out = stimtrace(d.path(), &["stats", ".", "--quiet"]);
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn test_exit_1_bad_config() {
    let d = tempfile::tempdir().unwrap();
    fs::write(d.path().join("RIG09.html"), REPORT).unwrap();
    fs::write(d.path().join("stimtrace.toml"), "[rollup]\nexcluded_test_case_pattern = \"(\"\n").unwrap();

    let out = stimtrace(d.path(), &["single", "RIG09.html", "-q"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error:"));
}
