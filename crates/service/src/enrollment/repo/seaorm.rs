use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use uuid::Uuid;

use models::{course, enrollment};

use crate::enrollment::domain::{EnrollmentReportRow, EnrollmentWithCourse};
use crate::enrollment::repository::EnrollmentRepository;
use crate::errors::ServiceError;

pub struct SeaOrmEnrollmentRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl EnrollmentRepository for SeaOrmEnrollmentRepository {
    async fn get(&self, id: Uuid) -> Result<Option<enrollment::Model>, ServiceError> {
        Ok(enrollment::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_pair(&self, course_id: Uuid, student_id: i64) -> Result<Option<enrollment::Model>, ServiceError> {
        let found = enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .filter(enrollment::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn create(&self, course_id: Uuid, student_id: i64) -> Result<enrollment::Model, ServiceError> {
        Ok(enrollment::create(&self.db, course_id, student_id).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = enrollment::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list(&self, student_id: Option<i64>) -> Result<Vec<enrollment::Model>, ServiceError> {
        let mut finder = enrollment::Entity::find();
        if let Some(sid) = student_id { finder = finder.filter(enrollment::Column::StudentId.eq(sid)); }
        let rows = finder
            .order_by_desc(enrollment::Column::EnrolledAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn list_for_course(&self, course_id: Uuid) -> Result<Vec<enrollment::Model>, ServiceError> {
        let rows = enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .order_by_desc(enrollment::Column::EnrolledAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn list_with_course(&self, student_id: i64) -> Result<Vec<EnrollmentWithCourse>, ServiceError> {
        let rows = enrollment::Entity::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .order_by_desc(enrollment::Column::EnrolledAt)
            .find_also_related(course::Entity)
            .all(&self.db)
            .await?;
        // the FK guarantees a course for every enrollment
        Ok(rows
            .into_iter()
            .filter_map(|(e, c)| c.map(|c| EnrollmentWithCourse::new(e, c)))
            .collect())
    }

    async fn report(&self, course_name: Option<&str>) -> Result<Vec<EnrollmentReportRow>, ServiceError> {
        let mut query = enrollment::Entity::find()
            .select_only()
            .column_as(enrollment::Column::Id, "enrollment_id")
            .column_as(enrollment::Column::StudentId, "student_id")
            .column_as(enrollment::Column::CourseId, "course_id")
            .column_as(course::Column::Name, "course_name")
            .column_as(course::Column::Instructor, "instructor")
            .column_as(enrollment::Column::EnrolledAt, "enrolled_at")
            .join(JoinType::InnerJoin, enrollment::Relation::Course.def());
        if let Some(name) = course_name {
            query = query.filter(course::Column::Name.eq(name));
        }
        let rows = query
            .order_by_asc(course::Column::Name)
            .order_by_desc(enrollment::Column::EnrolledAt)
            .into_model::<EnrollmentReportRow>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, sample_fields};

    #[tokio::test]
    async fn duplicate_pair_maps_to_conflict() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = course::create(&db, &sample_fields("Algorithms", "Dr. Lee", "CS")).await?;
        let repo = SeaOrmEnrollmentRepository { db };

        let e = repo.create(c.id, 42).await?;
        assert_eq!(repo.find_pair(c.id, 42).await?.map(|x| x.id), Some(e.id));
        assert!(matches!(repo.create(c.id, 42).await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn list_with_course_embeds_course_rows() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = course::create(&db, &sample_fields("Algorithms", "Dr. Lee", "CS")).await?;
        let b = course::create(&db, &sample_fields("Databases", "Dr. Park", "CS")).await?;
        let repo = SeaOrmEnrollmentRepository { db };
        repo.create(a.id, 5).await?;
        repo.create(b.id, 5).await?;
        repo.create(b.id, 6).await?;

        let rows = repo.list_with_course(5).await?;
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.student_id == 5));
        let mut names: Vec<_> = rows.iter().map(|r| r.course.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["Algorithms", "Databases"]);

        assert_eq!(repo.list(Some(6)).await?.len(), 1);
        assert_eq!(repo.list(None).await?.len(), 3);
        assert_eq!(repo.list_for_course(b.id).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn report_projects_join_columns() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = course::create(&db, &sample_fields("Algorithms", "Dr. Lee", "CS")).await?;
        let b = course::create(&db, &sample_fields("Databases", "Dr. Park", "CS")).await?;
        let repo = SeaOrmEnrollmentRepository { db };
        let ea = repo.create(a.id, 1).await?;
        repo.create(b.id, 2).await?;

        let all = repo.report(None).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].course_name, "Algorithms");
        assert_eq!(all[1].course_name, "Databases");

        let only = repo.report(Some("Algorithms")).await?;
        assert_eq!(only, vec![EnrollmentReportRow::new(&ea, &a)]);
        assert!(repo.report(Some("algorithms")).await?.is_empty());
        Ok(())
    }
}
