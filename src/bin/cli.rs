use allocation_view::allocation::parse_calendar_date;
use allocation_view::calendar::{CalendarDay, build_month, next_month, prev_month};
use allocation_view::{
    Allocation, SourceFormat, ViewConfig, WeekWindowBuilder, load_allocations,
    validate_allocations,
};
use chrono::NaiveDate;
use std::io::{self, Write};

fn render_row<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    for (ci, cell) in cells.enumerate() {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(widths[ci].saturating_sub(cell.len())));
        line.push_str(" |");
    }
    line
}

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&widths, headers.iter().copied()));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(&widths, row.iter().map(String::as_str)));
        out.push('\n');
    }
    out.push_str(&sep);
    out
}

fn day_rows(day: &CalendarDay<'_>, rows: &mut Vec<Vec<String>>) {
    for cell in &day.aggregates {
        let projects = cell
            .aggregate
            .allocations
            .iter()
            .map(|a| format!("{} ({})", a.project_name, a.allocation_percentage))
            .collect::<Vec<_>>()
            .join(", ");
        rows.push(vec![
            day.date.to_string(),
            cell.aggregate.employee_name.to_string(),
            cell.aggregate.total_percentage.to_string(),
            cell.state.to_string(),
            projects,
        ]);
    }
}

const DAY_HEADERS: [&str; 5] = ["date", "employee", "total", "state", "projects"];
const WEEKS_USAGE: &str = "weeks [count] [YYYY-MM-DD]";

fn print_month(allocations: &[Allocation], reference: NaiveDate) {
    let view = build_month(allocations, reference);
    let mut rows = Vec::new();
    for day in &view.days {
        day_rows(day, &mut rows);
    }
    println!("{} ({} days)", view.month_label, view.days.len());
    if rows.is_empty() {
        println!("No allocations this month.");
    } else {
        println!("{}", render_text_table(&DAY_HEADERS, &rows));
    }
    let summary = view.summary();
    println!(
        "Summary: under={}, exact={}, over={}",
        summary.under, summary.exact, summary.over
    );
}

fn print_day(allocations: &[Allocation], date: NaiveDate) {
    let day = CalendarDay::build(allocations, date);
    if day.aggregates.is_empty() {
        println!("No allocations on {date}.");
        return;
    }
    let mut rows = Vec::new();
    day_rows(&day, &mut rows);
    println!("{}", render_text_table(&DAY_HEADERS, &rows));
}

fn print_weeks(allocations: &[Allocation], builder: WeekWindowBuilder, now: NaiveDate) {
    for window in builder.build(allocations, now) {
        println!("{}", window.label());
        if window.is_empty() {
            println!("  No allocations this week");
            continue;
        }
        for allocation in &window.allocations {
            println!(
                "  {} - {} {} ({} - {})",
                allocation.employee_name,
                allocation.project_name,
                allocation.allocation_percentage,
                allocation.start_date.format("%b %-d"),
                allocation.end_date.format("%b %-d"),
            );
        }
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  load <json|csv> <path>             Load allocations from disk\n  month                              Show the current month\n  next                               Move to the next month and show it\n  prev                               Move to the previous month and show it\n  goto <YYYY-MM-DD>                  Set the reference date and show its month\n  day <YYYY-MM-DD>                   Show per-employee totals for one day\n  weeks [count] [YYYY-MM-DD]         Show trailing week windows ending at the date\n  check                              Report data-quality issues\n  config <json_path>                 Load view configuration from JSON\n  quit|exit                          Exit"
    );
}

fn parse_date_arg(raw: Option<&str>, usage: &str) -> Option<NaiveDate> {
    match raw {
        Some(raw) => match parse_calendar_date(raw) {
            Ok(date) => Some(date),
            Err(e) => {
                println!("{e}");
                None
            }
        },
        None => {
            println!("Usage: {usage}");
            None
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut config = match ViewConfig::default().with_env_overrides() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ignoring environment overrides: {e}");
            ViewConfig::default()
        }
    };
    let mut allocations: Vec<Allocation> = Vec::new();
    let mut reference = chrono::Local::now().date_naive();

    println!("Allocation View (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "load" => match (parts.next(), parts.next()) {
                (Some(kind), Some(path)) => {
                    let loaded = SourceFormat::from_name(kind)
                        .and_then(|format| load_allocations(path, format));
                    match loaded {
                        Ok(loaded) => {
                            allocations = loaded;
                            println!("Loaded {} allocations from {}.", allocations.len(), path);
                        }
                        Err(e) => println!("Load error: {e}"),
                    }
                }
                _ => println!("Usage: load <json|csv> <path>"),
            },
            "month" => print_month(&allocations, reference),
            "next" | "prev" => {
                let shifted = if cmd == "next" {
                    next_month(reference)
                } else {
                    prev_month(reference)
                };
                match shifted {
                    Some(date) => {
                        reference = date;
                        print_month(&allocations, reference);
                    }
                    None => println!("Cannot move past {reference}."),
                }
            }
            "goto" => {
                if let Some(date) = parse_date_arg(parts.next(), "goto <YYYY-MM-DD>") {
                    reference = date;
                    print_month(&allocations, reference);
                }
            }
            "day" => {
                if let Some(date) = parse_date_arg(parts.next(), "day <YYYY-MM-DD>") {
                    print_day(&allocations, date);
                }
            }
            "weeks" => {
                let requested = match parts.next().map(str::parse::<i32>) {
                    Some(Ok(count)) => Some(count),
                    Some(Err(_)) => {
                        println!("Invalid count");
                        println!("Usage: {WEEKS_USAGE}");
                        continue;
                    }
                    None => None,
                };
                let builder = match config.week_builder(requested) {
                    Ok(builder) => builder,
                    Err(e) => {
                        println!("{e}");
                        println!("Usage: {WEEKS_USAGE}");
                        continue;
                    }
                };
                let now = match parts.next() {
                    Some(raw) => match parse_calendar_date(raw) {
                        Ok(date) => date,
                        Err(e) => {
                            println!("{e}");
                            continue;
                        }
                    },
                    None => chrono::Local::now().date_naive(),
                };
                print_weeks(&allocations, builder, now);
            }
            "check" => {
                let issues = validate_allocations(&allocations);
                if issues.is_empty() {
                    println!("No data-quality issues.");
                }
                for issue in issues {
                    println!("- {issue}");
                }
            }
            "config" => match parts.next() {
                Some(path) => match ViewConfig::from_json_file(path) {
                    Ok(loaded) => {
                        config = loaded;
                        println!(
                            "Config loaded: week_start={}, week_count={}",
                            config.week_start, config.week_count
                        );
                    }
                    Err(e) => println!("Config error: {e}"),
                },
                None => println!("Usage: config <json_path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
