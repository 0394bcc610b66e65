use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Token subject of the staff member who created the course; drives the
    /// creator-ownership rule on updates and deletes.
    pub created_by: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourse {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
}
