//! Authenticated lookups against the student and course services.

use serde::Deserialize;
use uuid::Uuid;

use service_clients::{ServiceCallError, ServiceClient};

/// The only field peer validation needs; everything else in the peer's
/// response is ignored.
#[derive(Debug, Deserialize)]
struct PeerRecord {
    id: Uuid,
}

pub struct PeerDirectory {
    client: ServiceClient,
    student_list_url: String,
    course_list_url: String,
}

impl PeerDirectory {
    pub fn new(
        client: ServiceClient,
        student_list_url: impl Into<String>,
        course_list_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            student_list_url: student_list_url.into(),
            course_list_url: course_list_url.into(),
        }
    }

    pub async fn student_exists(&self, id: Uuid) -> Result<bool, ServiceCallError> {
        let records: Vec<PeerRecord> = self.client.get_json(&self.student_list_url).await?;
        Ok(records.iter().any(|r| r.id == id))
    }

    pub async fn course_exists(&self, id: Uuid) -> Result<bool, ServiceCallError> {
        let records: Vec<PeerRecord> = self.client.get_json(&self.course_list_url).await?;
        Ok(records.iter().any(|r| r.id == id))
    }
}
