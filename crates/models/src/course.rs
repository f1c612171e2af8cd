use sea_orm::{entity::prelude::*, ActiveModelTrait, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::enrollment;
use crate::errors::{FieldErrors, ModelError};

pub const NAME_MAX_LEN: usize = 200;
pub const INSTRUCTOR_MAX_LEN: usize = 200;
pub const CATEGORY_MAX_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub instructor: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub schedule: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Enrollment }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Enrollment => Entity::has_many(enrollment::Entity).into(),
        }
    }
}

impl Related<enrollment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Enrollment.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// The four mutable columns of a course, already trimmed and validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseFields {
    pub name: String,
    pub instructor: String,
    pub category: String,
    pub schedule: String,
}

impl CourseFields {
    /// Validate raw input; every missing, blank or oversized field is reported together.
    pub fn parse(
        name: Option<&str>,
        instructor: Option<&str>,
        category: Option<&str>,
        schedule: Option<&str>,
    ) -> Result<Self, ModelError> {
        let mut errs = FieldErrors::new();
        let name = required_text(&mut errs, "name", name, Some(NAME_MAX_LEN));
        let instructor = required_text(&mut errs, "instructor", instructor, Some(INSTRUCTOR_MAX_LEN));
        let category = required_text(&mut errs, "category", category, Some(CATEGORY_MAX_LEN));
        let schedule = required_text(&mut errs, "schedule", schedule, None);
        errs.into_result()?;
        Ok(Self { name, instructor, category, schedule })
    }
}

fn required_text(errs: &mut FieldErrors, field: &str, value: Option<&str>, max_len: Option<usize>) -> String {
    let Some(raw) = value else {
        errs.add(field, "This field is required.");
        return String::new();
    };
    let v = raw.trim();
    if v.is_empty() {
        errs.add(field, "This field may not be blank.");
    } else if let Some(max) = max_len {
        if v.chars().count() > max {
            errs.add(field, format!("Ensure this field has no more than {} characters.", max));
        }
    }
    v.to_string()
}

pub async fn create<C: ConnectionTrait>(db: &C, fields: &CourseFields) -> Result<Model, ModelError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(fields.name.clone()),
        instructor: Set(fields.instructor.clone()),
        category: Set(fields.category.clone()),
        schedule: Set(fields.schedule.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Overwrite every mutable column; `created_at` is kept.
pub async fn replace<C: ConnectionTrait>(db: &C, existing: Model, fields: &CourseFields) -> Result<Model, ModelError> {
    let mut am: ActiveModel = existing.into();
    am.name = Set(fields.name.clone());
    am.instructor = Set(fields.instructor.clone());
    am.category = Set(fields.category.clone());
    am.schedule = Set(fields.schedule.clone());
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_values() {
        let f = CourseFields::parse(Some("  Algorithms "), Some("Dr. Lee"), Some("CS"), Some("MWF 10am")).unwrap();
        assert_eq!(f.name, "Algorithms");
        assert_eq!(f.schedule, "MWF 10am");
    }

    #[test]
    fn parse_reports_every_bad_field() {
        let err = CourseFields::parse(None, Some("   "), Some("CS"), None).unwrap_err();
        let ModelError::Validation(errs) = err else { panic!("expected validation error") };
        let fields: Vec<&str> = errs.fields().collect();
        assert_eq!(fields, vec!["instructor", "name", "schedule"]);
        assert_eq!(errs.get("name").unwrap()[0], "This field is required.");
        assert_eq!(errs.get("instructor").unwrap()[0], "This field may not be blank.");
    }

    #[test]
    fn parse_enforces_length_limits() {
        let long_category = "c".repeat(CATEGORY_MAX_LEN + 1);
        let err = CourseFields::parse(Some("n"), Some("i"), Some(&long_category), Some("s")).unwrap_err();
        let ModelError::Validation(errs) = err else { panic!("expected validation error") };
        assert!(errs.get("category").is_some());

        // schedule is free text without an upper bound
        let long_schedule = "x".repeat(5_000);
        assert!(CourseFields::parse(Some("n"), Some("i"), Some("c"), Some(&long_schedule)).is_ok());
    }
}
