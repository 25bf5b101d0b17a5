//! Roster ordering for the unassigned list.
//!
//! # Responsibility
//! - Define the display-priority comparator over people.
//! - Filter the unassigned pool by a name search term.
//!
//! # Invariants
//! - Tie-break chain: title rank asc, seniority desc, promotion date asc,
//!   birth date asc. Dates compare as plain strings.
//! - Sorting is stable; fully tied people keep their input order.
//! - Search is a case-sensitive literal substring match on the name.

use crate::engine::AssignmentIndex;
use crate::model::person::Person;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static MATCH_ALL_RE: Lazy<Regex> = Lazy::new(|| Regex::new("").expect("valid empty regex"));

/// Total preorder used for unassigned-list priority.
pub fn compare_people(a: &Person, b: &Person) -> Ordering {
    a.title
        .rank()
        .cmp(&b.title.rank())
        .then_with(|| b.seniority.cmp(&a.seniority))
        .then_with(|| a.promotion_date.cmp(&b.promotion_date))
        .then_with(|| a.birth_date.cmp(&b.birth_date))
}

/// Stable in-place sort by `compare_people`.
pub fn sort_people(people: &mut [&Person]) {
    people.sort_by(|a, b| compare_people(a, b));
}

/// Name filter built from a user search term.
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: Regex,
}

impl NameFilter {
    /// Builds a filter; a blank term matches every name.
    ///
    /// The trimmed term is escaped, so regex metacharacters match literally.
    pub fn new(term: &str) -> Self {
        let keyword = term.trim();
        if keyword.is_empty() {
            return Self::match_all();
        }
        match Regex::new(&regex::escape(keyword)) {
            Ok(pattern) => Self { pattern },
            Err(_) => Self::match_all(),
        }
    }

    pub fn match_all() -> Self {
        Self {
            pattern: MATCH_ALL_RE.clone(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::match_all()
    }
}

/// Unassigned people matching `filter`, in display order.
pub fn unassigned<'a>(
    people: &'a [Person],
    index: &AssignmentIndex,
    filter: &NameFilter,
) -> Vec<&'a Person> {
    let mut pool: Vec<&Person> = people
        .iter()
        .filter(|person| !index.contains(&person.id))
        .filter(|person| filter.matches(&person.name))
        .collect();
    sort_people(&mut pool);
    pool
}
