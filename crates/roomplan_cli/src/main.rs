//! CLI entry point.
//!
//! # Responsibility
//! - Verify `roomplan_core` linkage with a deterministic probe.
//! - Load a roster (and optional floor plan) and print the planning view.
//!
//! Usage: `roomplan_cli [--log-dir <abs dir>] [roster.json [floorplan.json]]`

use roomplan_core::{
    default_log_level, init_logging, JsonFloorPlanSource, JsonRosterSource, PlannerSession,
};
use std::process::ExitCode;

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    log_dir: Option<String>,
    roster_path: Option<String>,
    plan_path: Option<String>,
}

fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--log-dir" {
            let dir = args
                .next()
                .ok_or_else(|| "--log-dir requires a directory".to_string())?;
            parsed.log_dir = Some(dir);
        } else if parsed.roster_path.is_none() {
            parsed.roster_path = Some(arg);
        } else if parsed.plan_path.is_none() {
            parsed.plan_path = Some(arg);
        } else {
            return Err(format!("unexpected argument `{arg}`"));
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    println!("roomplan_core ping={}", roomplan_core::ping());
    println!("roomplan_core version={}", roomplan_core::core_version());

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(dir) = &args.log_dir {
        if let Err(err) = init_logging(default_log_level(), dir) {
            eprintln!("logging init failed: {err}");
            return ExitCode::FAILURE;
        }
        println!("logging dir={dir}");
    }

    let Some(roster_path) = args.roster_path else {
        return ExitCode::SUCCESS;
    };

    let mut session = PlannerSession::new();
    match session.load_roster(&JsonRosterSource::from_path(&roster_path)) {
        Ok(report) => {
            println!(
                "roster rows={} accepted={} excluded={} rejected={}",
                report.total_rows,
                report.accepted,
                report.excluded_clinical_visit + report.excluded_title,
                report.issues.len()
            );
            for issue in &report.issues {
                println!("  {issue}");
            }
        }
        Err(err) => {
            eprintln!("roster load failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(plan_path) = args.plan_path {
        match session.load_floor_plan(&JsonFloorPlanSource::from_path(&plan_path)) {
            Ok(count) => {
                println!("rooms={count}");
                for region in session.floor_plan() {
                    println!("  {}", region.room_id);
                }
            }
            Err(err) => {
                eprintln!("floor plan load failed: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    println!("unassigned:");
    for person in session.list_unassigned("") {
        println!(
            "  {} {} {} {}",
            person.id, person.title, person.department, person.name
        );
    }
    ExitCode::SUCCESS
}
