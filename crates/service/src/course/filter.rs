//! Optional course predicates assembled into an explicit conjunction.
//!
//! `name`, `instructor` and `category` each add one case-insensitive
//! substring predicate; `search` adds a single OR group over all three
//! columns. Blank values are ignored.

use models::course;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::Condition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFilter {
    pub name: Option<String>,
    pub instructor: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl CourseFilter {
    pub fn new() -> Self { Self::default() }

    pub fn name(mut self, v: impl Into<String>) -> Self { self.name = Some(v.into()); self }
    pub fn instructor(mut self, v: impl Into<String>) -> Self { self.instructor = Some(v.into()); self }
    pub fn category(mut self, v: impl Into<String>) -> Self { self.category = Some(v.into()); self }
    pub fn search(mut self, v: impl Into<String>) -> Self { self.search = Some(v.into()); self }

    pub fn is_empty(&self) -> bool { self.predicates().is_empty() }

    pub fn predicates(&self) -> Vec<Predicate> {
        let mut out = Vec::new();
        let fields = [
            (CourseField::Name, &self.name),
            (CourseField::Instructor, &self.instructor),
            (CourseField::Category, &self.category),
        ];
        for (field, value) in fields {
            if let Some(needle) = needle(value) {
                out.push(Predicate::Contains(field, needle));
            }
        }
        if let Some(needle) = needle(&self.search) {
            out.push(Predicate::AnyContains(needle));
        }
        out
    }

    /// SQL form of `predicates()`; an empty filter yields an empty (always true) condition.
    pub fn condition(&self) -> Condition {
        self.predicates()
            .iter()
            .fold(Condition::all(), |acc, p| acc.add(p.condition()))
    }

    pub fn matches(&self, c: &course::Model) -> bool {
        self.predicates().iter().all(|p| p.matches(c))
    }

    /// True when every needle is ASCII, so SQL `LOWER` folds it the same on every backend.
    pub fn is_ascii(&self) -> bool {
        self.predicates().iter().all(|p| p.needle().is_ascii())
    }
}

fn needle(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_lowercase)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField { Name, Instructor, Category }

impl CourseField {
    pub const ALL: [CourseField; 3] = [CourseField::Name, CourseField::Instructor, CourseField::Category];

    pub fn column(self) -> course::Column {
        match self {
            CourseField::Name => course::Column::Name,
            CourseField::Instructor => course::Column::Instructor,
            CourseField::Category => course::Column::Category,
        }
    }

    pub fn value(self, c: &course::Model) -> &str {
        match self {
            CourseField::Name => &c.name,
            CourseField::Instructor => &c.instructor,
            CourseField::Category => &c.category,
        }
    }
}

/// One conjunct of a course query. Needles are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Contains(CourseField, String),
    AnyContains(String),
}

impl Predicate {
    pub fn needle(&self) -> &str {
        match self {
            Predicate::Contains(_, needle) | Predicate::AnyContains(needle) => needle,
        }
    }

    pub fn matches(&self, c: &course::Model) -> bool {
        match self {
            Predicate::Contains(field, needle) => field.value(c).to_lowercase().contains(needle.as_str()),
            Predicate::AnyContains(needle) => CourseField::ALL
                .iter()
                .any(|f| f.value(c).to_lowercase().contains(needle.as_str())),
        }
    }

    pub fn condition(&self) -> Condition {
        match self {
            Predicate::Contains(field, needle) => Condition::all().add(icontains(field.column(), needle)),
            Predicate::AnyContains(needle) => CourseField::ALL
                .iter()
                .fold(Condition::any(), |acc, f| acc.add(icontains(f.column(), needle))),
        }
    }
}

/// `LOWER(course.<col>) LIKE '%needle%' ESCAPE '\'`. SQLite's `LOWER` folds ASCII only.
fn icontains(column: course::Column, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(needle));
    Expr::expr(Func::lower(Expr::col((course::Entity, column))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn course(name: &str, instructor: &str, category: &str) -> course::Model {
        let now = Utc::now().into();
        course::Model {
            id: Uuid::new_v4(),
            name: name.into(),
            instructor: instructor.into(),
            category: category.into(),
            schedule: "TBA".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_and_blank_filters_have_no_predicates() {
        assert!(CourseFilter::new().is_empty());
        assert!(CourseFilter::new().name("   ").search("").is_empty());
    }

    #[test]
    fn predicates_follow_field_order_with_search_last() {
        let f = CourseFilter::new().search("Bio").category("Sci").name("Intro");
        assert_eq!(
            f.predicates(),
            vec![
                Predicate::Contains(CourseField::Name, "intro".into()),
                Predicate::Contains(CourseField::Category, "sci".into()),
                Predicate::AnyContains("bio".into()),
            ]
        );
    }

    #[test]
    fn search_matches_any_column_case_insensitively() {
        let f = CourseFilter::new().search("bio");
        assert!(f.matches(&course("Biology 101", "Dr. Lee", "Science")));
        assert!(f.matches(&course("Genetics", "Dr. BIOwski", "Science")));
        assert!(f.matches(&course("Lab", "Dr. Lee", "Microbiology")));
        assert!(!f.matches(&course("Algorithms", "Dr. Lee", "CS")));
    }

    #[test]
    fn field_filters_and_search_are_conjunctive() {
        let f = CourseFilter::new().instructor("lee").search("bio");
        assert!(f.matches(&course("Biology 101", "Dr. Lee", "Science")));
        assert!(!f.matches(&course("Biology 102", "Dr. Park", "Science")));
        assert!(!f.matches(&course("Algorithms", "Dr. Lee", "CS")));
    }

    #[test]
    fn non_ascii_needles_fold_case() {
        let f = CourseFilter::new().search("ÉCOLE");
        assert!(!f.is_ascii());
        assert!(f.matches(&course("École Française", "Dr. Ñúñez", "Languages")));
        assert!(CourseFilter::new().instructor("ñúñez").matches(&course("X", "Dr. ÑÚÑEZ", "Y")));
        assert!(CourseFilter::new().name("bio").is_ascii());
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("100%_a\\b"), "100\\%\\_a\\\\b");
    }
}
