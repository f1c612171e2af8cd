use models::course::CourseFields;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Create/replace payload. Every field is optional here so that missing
/// fields are reported through validation rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseInput {
    pub name: Option<String>,
    pub instructor: Option<String>,
    pub category: Option<String>,
    pub schedule: Option<String>,
}

impl CourseInput {
    pub fn new(name: &str, instructor: &str, category: &str, schedule: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            instructor: Some(instructor.to_string()),
            category: Some(category.to_string()),
            schedule: Some(schedule.to_string()),
        }
    }

    pub fn validate(&self) -> Result<CourseFields, ServiceError> {
        let fields = CourseFields::parse(
            self.name.as_deref(),
            self.instructor.as_deref(),
            self.category.as_deref(),
            self.schedule.as_deref(),
        )?;
        Ok(fields)
    }
}

/// `{count, results}` view returned by the search operation.
pub type CourseSearchResult = common::types::Counted<models::course::Model>;
