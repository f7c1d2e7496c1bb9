#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::io::Write;

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

fn fixture() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(
        file,
        "id,employee_id,employee_name,project_name,start_date,end_date,allocation_percentage\n\
         a1,E,Eve,Apollo,2024-03-01,2024-03-10,50\n\
         a2,E,Eve,Gemini,2024-03-05,2024-03-15,60\n"
    )
    .unwrap();
    file
}

#[test]
fn cli_shows_month_with_states() {
    let file = fixture();
    let script = format!(
        "load csv {}\ngoto 2024-03-20\nquit\n",
        file.path().display()
    );
    run_cli(&script)
        .success()
        .stdout(str_contains("Loaded 2 allocations"))
        .stdout(str_contains("March 2024 (31 days)"))
        .stdout(str_contains("Summary: under=9, exact=0, over=6"));
}

#[test]
fn cli_navigates_months() {
    run_cli("goto 2024-01-31\nnext\nprev\nquit\n")
        .success()
        .stdout(str_contains("February 2024 (29 days)"))
        .stdout(str_contains("January 2024 (31 days)"));
}

#[test]
fn cli_lists_trailing_weeks() {
    let file = fixture();
    let script = format!(
        "load csv {}\nweeks 2 2024-03-15\nquit\n",
        file.path().display()
    );
    run_cli(&script)
        .success()
        .stdout(str_contains("Mar 3 - Mar 9, 2024"))
        .stdout(str_contains("Mar 10 - Mar 16, 2024"))
        .stdout(str_contains("Eve - Gemini 60%"));
}

#[test]
fn cli_reports_bad_dates() {
    run_cli("day 2024-13-01\nquit\n")
        .success()
        .stdout(str_contains("invalid calendar date"));
}

#[test]
fn cli_rejects_oversized_week_counts() {
    run_cli("weeks 100000 2024-03-15\nweeks many\nquit\n")
        .success()
        .stdout(str_contains("week count 100000 exceeds the maximum of 520"))
        .stdout(str_contains("Invalid count"))
        .stdout(str_contains("Usage: weeks [count] [YYYY-MM-DD]"));
}
