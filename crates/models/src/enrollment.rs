use sea_orm::{entity::prelude::*, sea_query::ForeignKeyAction, ActiveModelTrait, ConnectionTrait, Set, SqlErr};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::course;
use crate::errors::{FieldErrors, ModelError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Identifier owned by the external student registry.
    pub student_id: i64,
    pub course_id: Uuid,
    pub enrolled_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Course }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Course => Entity::belongs_to(course::Entity)
                .from(Column::CourseId)
                .to(course::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<course::Entity> for Entity {
    fn to() -> RelationDef { Relation::Course.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_student_id(student_id: Option<i64>) -> Result<i64, ModelError> {
    match student_id {
        None => Err(ModelError::Validation(FieldErrors::single("student_id", "student_id is required"))),
        Some(id) if id <= 0 => Err(ModelError::Validation(FieldErrors::single(
            "student_id",
            "student_id must be a positive integer",
        ))),
        Some(id) => Ok(id),
    }
}

/// Insert an enrollment. A unique-index violation on (student_id, course_id)
/// surfaces as `ModelError::Conflict`.
pub async fn create<C: ConnectionTrait>(db: &C, course_id: Uuid, student_id: i64) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        student_id: Set(student_id),
        course_id: Set(course_id),
        enrolled_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ModelError::Conflict("Student is already enrolled in this course".into())
        }
        _ => ModelError::Db(e.to_string()),
    })
}
