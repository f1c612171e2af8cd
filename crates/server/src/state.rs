use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::course::repo::seaorm::SeaOrmCourseRepository;
use service::course::repository::CourseRepository;
use service::course::CourseService;
use service::enrollment::repo::seaorm::SeaOrmEnrollmentRepository;
use service::enrollment::repository::EnrollmentRepository;
use service::enrollment::EnrollmentService;
use service::mock::InMemoryRepository;

pub type DynCourseService = CourseService<dyn CourseRepository>;
pub type DynEnrollmentService = EnrollmentService<dyn CourseRepository, dyn EnrollmentRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub courses: Arc<DynCourseService>,
    pub enrollments: Arc<DynEnrollmentService>,
}

impl ServerState {
    pub fn new(courses: Arc<dyn CourseRepository>, enrollments: Arc<dyn EnrollmentRepository>) -> Self {
        Self {
            courses: Arc::new(CourseService::new(Arc::clone(&courses))),
            enrollments: Arc::new(EnrollmentService::new(courses, enrollments)),
        }
    }

    /// SeaORM-backed services sharing one connection pool.
    pub fn from_db(db: DatabaseConnection) -> Self {
        let courses: Arc<dyn CourseRepository> = Arc::new(SeaOrmCourseRepository { db: db.clone() });
        let enrollments: Arc<dyn EnrollmentRepository> = Arc::new(SeaOrmEnrollmentRepository { db });
        Self::new(courses, enrollments)
    }

    /// Services over a process-local store; nothing is persisted.
    pub fn in_memory() -> Self {
        let repo = Arc::new(InMemoryRepository::default());
        let courses: Arc<dyn CourseRepository> = repo.clone();
        let enrollments: Arc<dyn EnrollmentRepository> = repo;
        Self::new(courses, enrollments)
    }
}
