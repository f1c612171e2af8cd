use std::sync::Arc;

use models::course;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{CourseInput, CourseSearchResult};
use super::filter::CourseFilter;
use super::repository::CourseRepository;
use crate::errors::ServiceError;

/// Course catalog business service, independent of the web framework.
pub struct CourseService<R: CourseRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CourseRepository + ?Sized> CourseService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// List courses matching `filter`, most recently created first.
    pub async fn list(&self, filter: &CourseFilter) -> Result<Vec<course::Model>, ServiceError> {
        self.repo.list(filter).await
    }

    /// Same result set as [`list`](Self::list), wrapped with its count.
    pub async fn search(&self, filter: &CourseFilter) -> Result<CourseSearchResult, ServiceError> {
        let rows = self.repo.list(filter).await?;
        Ok(CourseSearchResult::new(rows))
    }

    /// Validate and store a new course.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::course::{CourseService, domain::CourseInput};
    /// use service::mock::InMemoryRepository;
    /// let svc = CourseService::new(Arc::new(InMemoryRepository::default()));
    /// let c = tokio_test::block_on(svc.create(CourseInput::new("Algorithms", "Dr. Lee", "CS", "MWF 10am"))).unwrap();
    /// assert_eq!(c.name, "Algorithms");
    /// assert!(tokio_test::block_on(svc.create(CourseInput::default())).is_err());
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CourseInput) -> Result<course::Model, ServiceError> {
        let fields = input.validate()?;
        let created = self.repo.create(&fields).await?;
        info!(course_id = %created.id, name = %created.name, "course_created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> Result<course::Model, ServiceError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course"))
    }

    /// Full replace of the mutable fields. Existence is checked before validation.
    #[instrument(skip(self, input), fields(course_id = %id))]
    pub async fn update(&self, id: Uuid, input: CourseInput) -> Result<course::Model, ServiceError> {
        let existing = self.get(id).await?;
        let fields = input.validate()?;
        let updated = self.repo.replace(existing, &fields).await?;
        info!(course_id = %updated.id, "course_updated");
        Ok(updated)
    }

    /// Delete a course; its enrollments go with it.
    #[instrument(skip(self), fields(course_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("Course"));
        }
        info!(course_id = %id, "course_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::InMemoryRepository;
    use std::collections::HashSet;

    fn svc() -> CourseService<InMemoryRepository> {
        CourseService::new(Arc::new(InMemoryRepository::default()))
    }

    #[tokio::test]
    async fn created_ids_are_unique() -> Result<(), ServiceError> {
        let svc = svc();
        let mut seen = HashSet::new();
        for i in 0..25 {
            let c = svc.create(CourseInput::new(&format!("Course {i}"), "Dr. Lee", "CS", "TBA")).await?;
            assert!(seen.insert(c.id), "id {} handed out twice", c.id);
        }
        Ok(())
    }

    #[tokio::test]
    async fn create_reports_missing_fields() {
        let svc = svc();
        let input = CourseInput { name: Some("Algorithms".into()), ..Default::default() };
        match svc.create(input).await {
            Err(ServiceError::Validation(errs)) => {
                let fields: Vec<&str> = errs.fields().collect();
                assert_eq!(fields, vec!["category", "instructor", "schedule"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let err = svc().get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_replaces_every_field() -> Result<(), ServiceError> {
        let svc = svc();
        let c = svc.create(CourseInput::new("Algorithms", "Dr. Lee", "CS", "MWF 10am")).await?;
        let u = svc.update(c.id, CourseInput::new("Graph Theory", "Dr. Kim", "Math", "TTh 2pm")).await?;
        assert_eq!(u.id, c.id);
        assert_eq!((u.name.as_str(), u.instructor.as_str()), ("Graph Theory", "Dr. Kim"));
        assert_eq!((u.category.as_str(), u.schedule.as_str()), ("Math", "TTh 2pm"));
        assert_eq!(u.created_at, c.created_at);
        assert_eq!(svc.get(c.id).await?.name, "Graph Theory");
        Ok(())
    }

    #[tokio::test]
    async fn update_checks_existence_before_validation() -> Result<(), ServiceError> {
        let svc = svc();
        let missing = svc.update(Uuid::new_v4(), CourseInput::default()).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))));

        let c = svc.create(CourseInput::new("Algorithms", "Dr. Lee", "CS", "MWF 10am")).await?;
        let invalid = svc.update(c.id, CourseInput { schedule: None, ..CourseInput::new("A", "B", "C", "D") }).await;
        assert!(matches!(invalid, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get(c.id).await?.schedule, "MWF 10am");
        Ok(())
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() -> Result<(), ServiceError> {
        let svc = svc();
        let c = svc.create(CourseInput::new("Algorithms", "Dr. Lee", "CS", "MWF 10am")).await?;
        svc.delete(c.id).await?;
        assert!(matches!(svc.delete(c.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn search_bio_returns_exact_matches() -> Result<(), ServiceError> {
        let svc = svc();
        let bio = svc.create(CourseInput::new("Biology 101", "Dr. Lee", "Science", "MWF")).await?;
        let micro = svc.create(CourseInput::new("Lab Work", "Dr. Park", "Microbiology", "TTh")).await?;
        let prof = svc.create(CourseInput::new("Ethics", "Dr. Biondi", "Philosophy", "F")).await?;
        svc.create(CourseInput::new("Algorithms", "Dr. Lee", "CS", "MWF")).await?;

        let found = svc.search(&CourseFilter::new().search("Bio")).await?;
        assert_eq!(found.count, 3);
        let ids: HashSet<Uuid> = found.results.iter().map(|c| c.id).collect();
        assert_eq!(ids, HashSet::from([bio.id, micro.id, prof.id]));
        Ok(())
    }
}
