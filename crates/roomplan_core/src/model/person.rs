//! Person domain model.
//!
//! # Responsibility
//! - Define the strict staff record consumed by the assignment engine.
//! - Isolate lenient string parsing (title, gender, seniority) behind
//!   explicit constructors used by roster ingestion.
//!
//! # Invariants
//! - `Person` is immutable after construction; rosters are replaced wholesale.
//! - `Seniority` without a parsed value orders below every parsed value.
//! - `Title::Other` ranks below every known title.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Rank assigned to titles outside the known rank table.
pub const UNKNOWN_TITLE_RANK: u8 = 99;

/// Stable staff identifier (employee number).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Academic title, ordered by the fixed rank table.
///
/// Serialized as the Korean display string used by roster spreadsheets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Title {
    /// 교수
    Professor,
    /// 부교수
    AssociateProfessor,
    /// 조교수
    AssistantProfessor,
    /// 임상교수
    ClinicalProfessor,
    /// 임상부교수
    ClinicalAssociateProfessor,
    /// 임상조교수
    ClinicalAssistantProfessor,
    /// 임상진료조교수
    ClinicalCareAssistantProfessor,
    /// 임상강사
    ClinicalInstructor,
    /// Any title outside the rank table.
    Other(String),
}

const KNOWN_TITLES: &[Title] = &[
    Title::Professor,
    Title::AssociateProfessor,
    Title::AssistantProfessor,
    Title::ClinicalProfessor,
    Title::ClinicalAssociateProfessor,
    Title::ClinicalAssistantProfessor,
    Title::ClinicalCareAssistantProfessor,
    Title::ClinicalInstructor,
];

impl Title {
    /// Parses a roster cell. Unknown text becomes `Title::Other`.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        KNOWN_TITLES
            .iter()
            .find(|title| title.as_str() == trimmed)
            .cloned()
            .unwrap_or_else(|| Self::Other(trimmed.to_string()))
    }

    /// Display string as it appears in roster data.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Professor => "교수",
            Self::AssociateProfessor => "부교수",
            Self::AssistantProfessor => "조교수",
            Self::ClinicalProfessor => "임상교수",
            Self::ClinicalAssociateProfessor => "임상부교수",
            Self::ClinicalAssistantProfessor => "임상조교수",
            Self::ClinicalCareAssistantProfessor => "임상진료조교수",
            Self::ClinicalInstructor => "임상강사",
            Self::Other(value) => value,
        }
    }

    /// Priority rank; lower is higher priority.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Professor => 1,
            Self::AssociateProfessor => 2,
            Self::AssistantProfessor => 3,
            Self::ClinicalProfessor => 4,
            Self::ClinicalAssociateProfessor => 5,
            Self::ClinicalAssistantProfessor => 6,
            Self::ClinicalCareAssistantProfessor => 7,
            Self::ClinicalInstructor => 8,
            Self::Other(_) => UNKNOWN_TITLE_RANK,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Whether this is the top-ranked title.
    pub fn is_top_rank(&self) -> bool {
        matches!(self, Self::Professor)
    }
}

impl From<String> for Title {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Title> for String {
    fn from(value: Title) -> Self {
        value.as_str().to_string()
    }
}

impl Display for Title {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary gender used for room restrictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "남자")]
    Male,
    #[serde(rename = "여자")]
    Female,
}

impl Gender {
    /// Parses common roster spellings. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        match trimmed {
            "남자" | "남" => return Some(Self::Male),
            "여자" | "여" => return Some(Self::Female),
            _ => {}
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "남자",
            Self::Female => "여자",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pay-step seniority, parsed leniently from decorated strings.
///
/// `Seniority::UNPARSED` is the sentinel minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seniority(Option<i64>);

impl Seniority {
    pub const UNPARSED: Self = Self(None);

    pub fn new(level: i64) -> Self {
        Self(Some(level))
    }

    /// Parses values such as `"12"`, `"12.5"`, `" 7호봉"`.
    ///
    /// Only the part before the first `.` is considered; within it the
    /// leading integer wins and trailing text is ignored.
    pub fn parse_lenient(value: &str) -> Self {
        let head = value.split('.').next().unwrap_or_default();
        Self(parse_leading_int(head))
    }

    pub fn value(self) -> Option<i64> {
        self.0
    }

    pub fn is_parsed(self) -> bool {
        self.0.is_some()
    }
}

impl Ord for Seniority {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None < Some(_)` keeps the sentinel below every parsed level.
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Seniority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Leading-integer parse: optional whitespace, optional sign, digits.
///
/// Returns `None` when no digit follows the optional sign.
pub(crate) fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Staff record as seen by the assignment core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub department: String,
    /// Employment track; prefix-matched (e.g. tenured vs clinical).
    pub track: String,
    pub title: Title,
    pub gender: Gender,
    pub seniority: Seniority,
    /// Opaque, lexicographically compared (ISO 8601 expected).
    pub promotion_date: String,
    /// Opaque, lexicographically compared (ISO 8601 expected).
    pub birth_date: String,
}

impl Person {
    /// Creates a person with empty optional fields and unparsed seniority.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        title: Title,
        gender: Gender,
    ) -> Self {
        Self {
            id: PersonId::new(id),
            name: name.into(),
            department: String::new(),
            track: String::new(),
            title,
            gender,
            seniority: Seniority::UNPARSED,
            promotion_date: String::new(),
            birth_date: String::new(),
        }
    }

    pub fn is_tenured(&self, tenured_prefix: &str) -> bool {
        self.track.starts_with(tenured_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_leading_int, Gender, Seniority, Title, UNKNOWN_TITLE_RANK};

    #[test]
    fn parse_leading_int_matches_lenient_semantics() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  7호봉"), Some(7));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+4x"), Some(4));
        assert_eq!(parse_leading_int("호봉7"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
    }

    #[test]
    fn seniority_takes_integer_part_before_dot() {
        assert_eq!(Seniority::parse_lenient("12.9").value(), Some(12));
        assert_eq!(Seniority::parse_lenient(".5"), Seniority::UNPARSED);
        assert!(!Seniority::parse_lenient("n/a").is_parsed());
    }

    #[test]
    fn unparsed_seniority_orders_below_everything() {
        assert!(Seniority::UNPARSED < Seniority::new(i64::MIN));
        assert!(Seniority::new(1) < Seniority::new(2));
    }

    #[test]
    fn title_rank_table_and_unknown_titles() {
        assert_eq!(Title::parse("교수").rank(), 1);
        assert_eq!(Title::parse(" 임상강사 ").rank(), 8);
        let other = Title::parse("명예교수");
        assert_eq!(other, Title::Other("명예교수".to_string()));
        assert_eq!(other.rank(), UNKNOWN_TITLE_RANK);
        assert!(!other.is_known());
        assert!(Title::Professor.is_top_rank());
        assert!(!Title::AssociateProfessor.is_top_rank());
    }

    #[test]
    fn gender_accepts_common_spellings() {
        assert_eq!(Gender::parse("남자"), Some(Gender::Male));
        assert_eq!(Gender::parse("여"), Some(Gender::Female));
        assert_eq!(Gender::parse("F"), Some(Gender::Female));
        assert_eq!(Gender::parse("unknown"), None);
    }
}
