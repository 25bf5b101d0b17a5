//! Roster ingestion boundary.
//!
//! # Responsibility
//! - Decode spreadsheet-shaped rows into strict `Person` records.
//! - Apply roster exclusion rules and report rejected rows.
//!
//! # Invariants
//! - Output order equals accepted input row order.
//! - Person ids are unique in the output; later duplicates are rejected.
//! - Leniency (numeric cells, decorated seniority) stops at this boundary.

use crate::config::PlannerPolicy;
use crate::model::person::{Gender, Person, PersonId, Seniority, Title};
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One roster row, keyed by the spreadsheet's column headers.
///
/// Missing columns decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterRow {
    #[serde(rename = "사번", deserialize_with = "lenient_cell")]
    pub id: String,
    #[serde(rename = "성명", deserialize_with = "lenient_cell")]
    pub name: String,
    #[serde(rename = "부서", deserialize_with = "lenient_cell")]
    pub department: String,
    #[serde(rename = "직계", deserialize_with = "lenient_cell")]
    pub track: String,
    #[serde(rename = "직위", deserialize_with = "lenient_cell")]
    pub title: String,
    #[serde(rename = "성별", deserialize_with = "lenient_cell")]
    pub gender: String,
    #[serde(rename = "호봉", deserialize_with = "lenient_cell")]
    pub seniority: String,
    #[serde(rename = "승급일", deserialize_with = "lenient_cell")]
    pub promotion_date: String,
    #[serde(rename = "생년월일", deserialize_with = "lenient_cell")]
    pub birth_date: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Empty(()),
}

fn lenient_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Cell::deserialize(deserializer)? {
        Cell::Text(value) => value,
        Cell::Int(value) => value.to_string(),
        Cell::UInt(value) => value.to_string(),
        Cell::Float(value) => value.to_string(),
        Cell::Bool(value) => value.to_string(),
        Cell::Empty(()) => String::new(),
    })
}

/// Reason a row was rejected (as opposed to filtered by policy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    MissingId { row: usize },
    MissingName { row: usize },
    UnknownGender { row: usize, value: String },
    DuplicateId { row: usize, id: PersonId },
}

impl Display for RowIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId { row } => write!(f, "row {row}: employee id is blank"),
            Self::MissingName { row } => write!(f, "row {row}: name is blank"),
            Self::UnknownGender { row, value } => {
                write!(f, "row {row}: unrecognized gender `{value}`")
            }
            Self::DuplicateId { row, id } => write!(f, "row {row}: duplicate employee id {id}"),
        }
    }
}

impl Error for RowIssue {}

/// Counts describing one roster build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterLoadReport {
    pub total_rows: usize,
    pub accepted: usize,
    pub excluded_clinical_visit: usize,
    pub excluded_title: usize,
    pub issues: Vec<RowIssue>,
}

/// Accepted people plus the build report.
#[derive(Debug, Clone, Default)]
pub struct RosterBuild {
    pub people: Vec<Person>,
    pub report: RosterLoadReport,
}

/// Converts raw rows into people, applying exclusion rules.
///
/// Row numbers in issues are 1-based.
pub fn build_roster(rows: &[RosterRow], policy: &PlannerPolicy) -> RosterBuild {
    let mut build = RosterBuild::default();
    build.report.total_rows = rows.len();
    let mut seen = HashSet::new();

    for (offset, row) in rows.iter().enumerate() {
        let row_number = offset + 1;
        if row
            .track
            .trim()
            .starts_with(policy.clinical_visit_track_prefix.as_str())
        {
            build.report.excluded_clinical_visit += 1;
            continue;
        }
        let title = Title::parse(&row.title);
        if !title.is_known() {
            build.report.excluded_title += 1;
            continue;
        }
        match person_from_row(row, row_number, title) {
            Ok(person) => {
                if !seen.insert(person.id.clone()) {
                    build.report.issues.push(RowIssue::DuplicateId {
                        row: row_number,
                        id: person.id,
                    });
                    continue;
                }
                build.people.push(person);
            }
            Err(issue) => build.report.issues.push(issue),
        }
    }

    build.report.accepted = build.people.len();
    for issue in &build.report.issues {
        debug!("event=roster_row module=ingest status=rejected detail={issue}");
    }
    info!(
        "event=roster_build module=ingest status=ok rows={} accepted={} clinical_visit={} title={} rejected={}",
        build.report.total_rows,
        build.report.accepted,
        build.report.excluded_clinical_visit,
        build.report.excluded_title,
        build.report.issues.len()
    );
    build
}

fn person_from_row(row: &RosterRow, row_number: usize, title: Title) -> Result<Person, RowIssue> {
    let id = row.id.trim();
    if id.is_empty() {
        return Err(RowIssue::MissingId { row: row_number });
    }
    let name = row.name.trim();
    if name.is_empty() {
        return Err(RowIssue::MissingName { row: row_number });
    }
    let gender = Gender::parse(&row.gender).ok_or_else(|| RowIssue::UnknownGender {
        row: row_number,
        value: row.gender.trim().to_string(),
    })?;

    Ok(Person {
        id: PersonId::new(id),
        name: name.to_string(),
        department: row.department.trim().to_string(),
        track: row.track.trim().to_string(),
        title,
        gender,
        seniority: Seniority::parse_lenient(&row.seniority),
        promotion_date: row.promotion_date.trim().to_string(),
        birth_date: row.birth_date.trim().to_string(),
    })
}
