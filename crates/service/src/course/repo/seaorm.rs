use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use models::{course::{self, CourseFields}, enrollment};

use crate::course::filter::CourseFilter;
use crate::course::repository::CourseRepository;
use crate::errors::ServiceError;

pub struct SeaOrmCourseRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn list(&self, filter: &CourseFilter) -> Result<Vec<course::Model>, ServiceError> {
        let query = course::Entity::find().order_by_desc(course::Column::CreatedAt);
        // SQLite LOWER/LIKE fold ASCII only; non-ASCII needles are matched after the fetch.
        if self.db.get_database_backend() == DbBackend::Sqlite && !filter.is_ascii() {
            let rows = query.all(&self.db).await?;
            return Ok(rows.into_iter().filter(|c| filter.matches(c)).collect());
        }
        Ok(query.filter(filter.condition()).all(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<course::Model>, ServiceError> {
        Ok(course::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(&self, fields: &CourseFields) -> Result<course::Model, ServiceError> {
        Ok(course::create(&self.db, fields).await?)
    }

    async fn replace(&self, existing: course::Model, fields: &CourseFields) -> Result<course::Model, ServiceError> {
        Ok(course::replace(&self.db, existing, fields).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        // Children first in the same transaction, so stores without FK cascade behave the same.
        let txn = self.db.begin().await?;
        enrollment::Entity::delete_many()
            .filter(enrollment::Column::CourseId.eq(id))
            .exec(&txn)
            .await?;
        let res = course::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(res.rows_affected > 0)
    }
}
