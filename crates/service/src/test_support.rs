#![cfg(test)]
use models::course::CourseFields;
use sea_orm::DatabaseConnection;

/// Fresh, migrated in-memory database per test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub fn sample_fields(name: &str, instructor: &str, category: &str) -> CourseFields {
    CourseFields::parse(Some(name), Some(instructor), Some(category), Some("MWF 10am"))
        .expect("valid sample course")
}
