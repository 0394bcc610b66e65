//! Authenticated record lookups against the student and professor services.

use service_clients::{ServiceCallError, ServiceClient};

use crate::models::PrincipalRecord;

pub struct PeerDirectory {
    client: ServiceClient,
    student_list_url: String,
    professor_list_url: String,
}

impl PeerDirectory {
    pub fn new(
        client: ServiceClient,
        student_list_url: impl Into<String>,
        professor_list_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            student_list_url: student_list_url.into(),
            professor_list_url: professor_list_url.into(),
        }
    }

    pub async fn find_student_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PrincipalRecord>, ServiceCallError> {
        let records: Vec<PrincipalRecord> = self.client.get_json(&self.student_list_url).await?;
        Ok(records.into_iter().find(|r| r.email == email))
    }

    pub async fn find_professor_by_email(
        &self,
        email: &str,
    ) -> Result<Option<PrincipalRecord>, ServiceCallError> {
        let records: Vec<PrincipalRecord> = self.client.get_json(&self.professor_list_url).await?;
        Ok(records.into_iter().find(|r| r.email == email))
    }
}
