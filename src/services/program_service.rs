use crate::error::ApiError;
use crate::models::{Application, ApplicationRequest, Program, ProgramType};
use crate::services::api_client::ApiClient;

/// Programs (training, certification, funding) and the user's applications
#[derive(Clone)]
pub struct ProgramService {
    client: ApiClient,
}

impl ProgramService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn list_path(program_type: Option<ProgramType>) -> String {
        match program_type {
            Some(kind) => format!("/programs?type={}", kind.as_query()),
            None => "/programs".to_string(),
        }
    }

    pub fn applications_path(program_id: &str) -> String {
        format!("/programs/{}/applications", program_id)
    }

    pub async fn list_programs(
        &self,
        program_type: Option<ProgramType>,
    ) -> Result<Vec<Program>, ApiError> {
        self.client.get(&Self::list_path(program_type)).await
    }

    pub async fn get_program(&self, id: &str) -> Result<Program, ApiError> {
        self.client.get(&format!("/programs/{}", id)).await
    }

    pub async fn list_applications(&self) -> Result<Vec<Application>, ApiError> {
        self.client.get("/applications").await
    }

    pub async fn get_application(&self, id: &str) -> Result<Application, ApiError> {
        self.client.get(&format!("/applications/{}", id)).await
    }

    /// Every document `program` requires has an attachment in `request`
    pub fn check_documents(program: &Program, request: &ApplicationRequest) -> Result<(), ApiError> {
        let missing = request.missing_documents(&program.required_documents);
        if missing.is_empty() {
            return Ok(());
        }
        Err(ApiError::Application {
            status_code: 422,
            message: format!("Dokumen belum lengkap: {}", missing.join(", ")),
        })
    }

    /// Refuses locally when a required document is missing
    pub async fn submit_application(
        &self,
        program: &Program,
        request: &ApplicationRequest,
    ) -> Result<Application, ApiError> {
        Self::check_documents(program, request)?;

        log::info!(
            "📤 [PROGRAM] Submitting application for {} ({} documents)",
            program.id,
            request.documents.len()
        );
        self.client
            .post(&Self::applications_path(&program.id), request)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentAttachment;

    #[test]
    fn list_path_filters_by_type() {
        assert_eq!(ProgramService::list_path(None), "/programs");
        assert_eq!(
            ProgramService::list_path(Some(ProgramType::Funding)),
            "/programs?type=funding"
        );
    }

    fn halal_program() -> Program {
        Program {
            id: "p1".into(),
            title: "Sertifikasi Halal".into(),
            program_type: ProgramType::Certification,
            organizer: None,
            description: None,
            deadline: None,
            quota: None,
            required_documents: vec!["NIB".into(), "KTP".into()],
        }
    }

    #[test]
    fn complete_documents_pass_the_local_check() {
        let request = ApplicationRequest {
            motivation: None,
            documents: ["KTP", "NIB"]
                .into_iter()
                .map(|name| DocumentAttachment {
                    name: name.into(),
                    mime_type: "application/pdf".into(),
                    content: "JVBERi0=".into(),
                })
                .collect(),
        };
        assert_eq!(ProgramService::check_documents(&halal_program(), &request), Ok(()));
    }

    #[test]
    fn submit_refuses_incomplete_documents_without_network() {
        let service = ProgramService::new(ApiClient::new("http://unused"));
        let program = halal_program();
        let result = futures::executor::block_on(
            service.submit_application(&program, &ApplicationRequest::default()),
        );
        assert_eq!(
            result,
            Err(ApiError::Application {
                status_code: 422,
                message: "Dokumen belum lengkap: NIB, KTP".into()
            })
        );
    }
}
