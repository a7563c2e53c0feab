// ============================================================================
// CONTENT VIEWMODEL - Data behind the signed-in screens
// ============================================================================
// Loads what a route needs and flattens it into rows for the generic screen
// frame. A 401 ends the session so the guard sends the user back to login.
// ============================================================================

use crate::error::ApiError;
use crate::models::notification::unread_count;
use crate::models::{
    Application, ApplicationRequest, DocumentAttachment, NewsItem, Notification, Program,
    ProfileUpdate, UserProfile,
};
use crate::router::Route;
use crate::services::{
    ApiClient, NewsService, NotificationService, ProfileService, ProgramService,
};
use crate::state::SessionContext;

/// Documents are sent as links to files the user already hosts
pub const DOCUMENT_LINK_MIME: &str = "text/uri-list";

#[derive(Clone, Debug, PartialEq)]
pub enum ScreenContent {
    Dashboard {
        name: String,
        unread: usize,
        programs: Vec<Program>,
    },
    Programs(Vec<Program>),
    Program(Program),
    Applications(Vec<Application>),
    Application(Application),
    Notifications(Vec<Notification>),
    News(Vec<NewsItem>),
    NewsItem(NewsItem),
    Profile(UserProfile),
}

/// One line in a list screen
#[derive(Clone, Debug, PartialEq)]
pub struct ContentRow {
    pub title: String,
    pub subtitle: Option<String>,
    pub link: Option<Route>,
}

impl ScreenContent {
    pub fn rows(&self) -> Vec<ContentRow> {
        match self {
            ScreenContent::Dashboard {
                name,
                unread,
                programs,
            } => {
                let mut rows = vec![
                    ContentRow {
                        title: format!("Halo, {}", name),
                        subtitle: None,
                        link: Some(Route::Profile),
                    },
                    ContentRow {
                        title: format!("{} notifikasi belum dibaca", unread),
                        subtitle: None,
                        link: Some(Route::Notifications),
                    },
                ];
                rows.extend(programs.iter().take(3).map(program_row));
                rows
            }
            ScreenContent::Programs(programs) => programs.iter().map(program_row).collect(),
            ScreenContent::Program(program) => {
                let mut rows = vec![ContentRow {
                    title: program.title.clone(),
                    subtitle: program.description.clone(),
                    link: Some(Route::ProgramApply(program.id.clone())),
                }];
                rows.extend(program.required_documents.iter().map(|doc| ContentRow {
                    title: format!("Dokumen: {}", doc),
                    subtitle: None,
                    link: None,
                }));
                rows
            }
            ScreenContent::Applications(applications) => {
                applications.iter().map(application_row).collect()
            }
            ScreenContent::Application(application) => {
                let mut row = application_row(application);
                row.link = Some(Route::ProgramDetail(application.program_id.clone()));
                vec![row]
            }
            ScreenContent::Notifications(notifications) => notifications
                .iter()
                .map(|n| ContentRow {
                    title: if n.read {
                        n.title.clone()
                    } else {
                        format!("● {}", n.title)
                    },
                    subtitle: Some(n.body.clone()).filter(|b| !b.is_empty()),
                    link: n.link.as_deref().map(Route::from_path),
                })
                .collect(),
            ScreenContent::News(items) => items
                .iter()
                .map(|item| ContentRow {
                    title: item.title.clone(),
                    subtitle: item.excerpt.clone(),
                    link: Some(Route::NewsDetail(item.id.clone())),
                })
                .collect(),
            ScreenContent::NewsItem(item) => vec![ContentRow {
                title: item.title.clone(),
                subtitle: item.content.clone().or_else(|| item.excerpt.clone()),
                link: None,
            }],
            ScreenContent::Profile(profile) => {
                let fields = [
                    ("Nama", Some(profile.display_name())),
                    ("Email", profile.email.clone()),
                    ("No. HP", profile.phone.clone()),
                    ("Usaha", profile.business_name.clone()),
                ];
                fields
                    .into_iter()
                    .filter_map(|(label, value)| {
                        value.map(|v| ContentRow {
                            title: label.to_string(),
                            subtitle: Some(v),
                            link: None,
                        })
                    })
                    .collect()
            }
        }
    }
}

impl ScreenContent {
    /// Per row of [`ScreenContent::rows`]: the notification id to mark read
    /// when that row is opened
    pub fn unread_ids(&self) -> Vec<Option<String>> {
        match self {
            ScreenContent::Notifications(notifications) => notifications
                .iter()
                .map(|n| (!n.read).then(|| n.id.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn program_row(program: &Program) -> ContentRow {
    let subtitle = match &program.organizer {
        Some(organizer) => format!("{} · {}", program.program_type.label(), organizer),
        None => program.program_type.label().to_string(),
    };
    ContentRow {
        title: program.title.clone(),
        subtitle: Some(subtitle),
        link: Some(Route::ProgramDetail(program.id.clone())),
    }
}

fn application_row(application: &Application) -> ContentRow {
    ContentRow {
        title: application
            .program_title
            .clone()
            .unwrap_or_else(|| format!("Pengajuan {}", application.id)),
        subtitle: Some(application.status.label().to_string()),
        link: Some(Route::ApplicationDetail(application.id.clone())),
    }
}

pub struct ContentViewModel {
    session: SessionContext,
    programs: ProgramService,
    notifications: NotificationService,
    news: NewsService,
    profile: ProfileService,
}

impl ContentViewModel {
    pub fn new(client: ApiClient, session: SessionContext) -> Self {
        Self {
            programs: ProgramService::new(client.clone()),
            notifications: NotificationService::new(client.clone()),
            news: NewsService::new(client.clone()),
            profile: ProfileService::new(client, session.clone()),
            session,
        }
    }

    /// Routes whose screen is backed by a backend call
    pub fn has_content(route: &Route) -> bool {
        matches!(
            route,
            Route::Dashboard
                | Route::Programs
                | Route::ProgramDetail(_)
                | Route::ProgramApply(_)
                | Route::Applications
                | Route::ApplicationDetail(_)
                | Route::Notifications
                | Route::News
                | Route::NewsDetail(_)
                | Route::Profile
        )
    }

    /// Where to go once the backend rejected the token while loading
    /// `route`. Public screens stay put: re-navigating would only repeat
    /// the same request.
    pub fn after_unauthorized(route: &Route) -> Option<Route> {
        route.is_guarded().then_some(Route::Login)
    }

    /// `Ok(None)` for routes without remote data
    pub async fn load(&self, route: &Route) -> Result<Option<ScreenContent>, ApiError> {
        let result = self.fetch(route).await;
        if let Err(e) = &result {
            if e.is_unauthorized() {
                log::warn!("🔒 [CONTENT] Token rejected, ending session");
                self.session.end()?;
            }
        }
        result
    }

    async fn fetch(&self, route: &Route) -> Result<Option<ScreenContent>, ApiError> {
        let content = match route {
            Route::Dashboard => {
                let notifications = self.notifications.list().await?;
                let programs = self.programs.list_programs(None).await?;
                ScreenContent::Dashboard {
                    name: self
                        .session
                        .display_name()
                        .unwrap_or_else(|| UserProfile::default().display_name()),
                    unread: unread_count(&notifications),
                    programs,
                }
            }
            Route::Programs => ScreenContent::Programs(self.programs.list_programs(None).await?),
            Route::ProgramDetail(id) | Route::ProgramApply(id) => {
                ScreenContent::Program(self.programs.get_program(id).await?)
            }
            Route::Applications => {
                ScreenContent::Applications(self.programs.list_applications().await?)
            }
            Route::ApplicationDetail(id) => {
                ScreenContent::Application(self.programs.get_application(id).await?)
            }
            Route::Notifications => ScreenContent::Notifications(self.notifications.list().await?),
            Route::News => ScreenContent::News(self.news.list().await?),
            Route::NewsDetail(id) => ScreenContent::NewsItem(self.news.get(id).await?),
            Route::Profile => ScreenContent::Profile(self.profile.fetch_profile().await?),
            _ => return Ok(None),
        };
        Ok(Some(content))
    }

    /// One attachment per required document whose link field was filled.
    /// `links` lines up with `required`.
    pub fn document_links(required: &[String], links: &[String]) -> Vec<DocumentAttachment> {
        required
            .iter()
            .zip(links)
            .filter(|(_, link)| !link.trim().is_empty())
            .map(|(name, link)| DocumentAttachment {
                name: name.clone(),
                mime_type: DOCUMENT_LINK_MIME.to_string(),
                content: link.trim().to_string(),
            })
            .collect()
    }

    /// Request body from the apply form; a blank motivation is omitted
    pub fn application_request(
        motivation: &str,
        documents: Vec<DocumentAttachment>,
    ) -> ApplicationRequest {
        ApplicationRequest {
            motivation: Some(motivation.trim().to_string()).filter(|m| !m.is_empty()),
            documents,
        }
    }

    pub async fn submit_application(
        &self,
        program: &Program,
        motivation: &str,
        documents: Vec<DocumentAttachment>,
    ) -> Result<Application, ApiError> {
        let request = Self::application_request(motivation, documents);
        self.programs.submit_application(program, &request).await
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.notifications.mark_all_read().await
    }

    pub async fn mark_read(&self, notification_id: &str) -> Result<(), ApiError> {
        self.notifications.mark_read(notification_id).await
    }

    /// Save the edited profile; the result replaces the profile screen
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ScreenContent, ApiError> {
        self.profile
            .update_profile(update)
            .await
            .map(ScreenContent::Profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplicationStatus, ProgramType};
    use crate::services::SessionStore;
    use crate::utils::MemoryStorage;
    use std::rc::Rc;

    fn program(id: &str) -> Program {
        Program {
            id: id.into(),
            title: format!("Program {}", id),
            program_type: ProgramType::Funding,
            organizer: Some("Kemenkop".into()),
            description: None,
            deadline: None,
            quota: None,
            required_documents: vec!["NIB".into()],
        }
    }

    #[test]
    fn auth_screens_have_no_remote_content() {
        assert!(!ContentViewModel::has_content(&Route::Login));
        assert!(!ContentViewModel::has_content(&Route::Home));
        assert!(ContentViewModel::has_content(&Route::News));
    }

    #[test]
    fn blank_document_links_are_left_out() {
        let required = vec!["KTP".to_string(), "NIB".to_string()];
        let documents = ContentViewModel::document_links(
            &required,
            &["  ".to_string(), " https://drive.example/nib.pdf ".to_string()],
        );
        assert_eq!(
            documents,
            vec![DocumentAttachment {
                name: "NIB".into(),
                mime_type: DOCUMENT_LINK_MIME.into(),
                content: "https://drive.example/nib.pdf".into(),
            }]
        );
    }

    #[test]
    fn apply_form_with_every_document_builds_a_complete_request() {
        let program = program("p3");
        let documents = ContentViewModel::document_links(
            &program.required_documents,
            &["https://drive.example/nib.pdf".to_string()],
        );
        let request = ContentViewModel::application_request("  usaha saya ", documents);
        assert_eq!(request.motivation.as_deref(), Some("usaha saya"));
        assert!(request.missing_documents(&program.required_documents).is_empty());
        assert_eq!(ProgramService::check_documents(&program, &request), Ok(()));

        let blank = ContentViewModel::application_request("   ", Vec::new());
        assert_eq!(blank.motivation, None);
        assert!(ProgramService::check_documents(&program, &blank).is_err());
    }

    #[test]
    fn rejected_token_redirects_guarded_screens_only() {
        assert_eq!(
            ContentViewModel::after_unauthorized(&Route::Dashboard),
            Some(Route::Login)
        );
        assert_eq!(
            ContentViewModel::after_unauthorized(&Route::ProgramDetail("p1".into())),
            Some(Route::Login)
        );
        assert_eq!(ContentViewModel::after_unauthorized(&Route::News), None);
        assert_eq!(
            ContentViewModel::after_unauthorized(&Route::NewsDetail("n1".into())),
            None
        );
    }

    #[test]
    fn dashboard_rows_show_greeting_unread_and_three_programs() {
        let content = ScreenContent::Dashboard {
            name: "Sari".into(),
            unread: 2,
            programs: (1..=5).map(|i| program(&i.to_string())).collect(),
        };
        let rows = content.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].title, "Halo, Sari");
        assert_eq!(rows[1].link, Some(Route::Notifications));
        assert_eq!(rows[2].subtitle.as_deref(), Some("Pendanaan · Kemenkop"));
    }

    #[test]
    fn program_detail_links_to_apply_and_lists_documents() {
        let rows = ScreenContent::Program(program("p9")).rows();
        assert_eq!(rows[0].link, Some(Route::ProgramApply("p9".into())));
        assert_eq!(rows[1].title, "Dokumen: NIB");
    }

    #[test]
    fn notification_rows_mark_unread_and_follow_links() {
        let rows = ScreenContent::Notifications(vec![Notification {
            id: "n1".into(),
            title: "Pengajuan disetujui".into(),
            body: String::new(),
            read: false,
            created_at: None,
            link: Some("/applications/a1".into()),
        }])
        .rows();
        assert_eq!(rows[0].title, "● Pengajuan disetujui");
        assert_eq!(rows[0].subtitle, None);
        assert_eq!(rows[0].link, Some(Route::ApplicationDetail("a1".into())));
    }

    #[test]
    fn only_unread_notifications_carry_an_id_to_mark() {
        let notification = |id: &str, read: bool| Notification {
            id: id.into(),
            title: "Info".into(),
            body: String::new(),
            read,
            created_at: None,
            link: None,
        };
        let content = ScreenContent::Notifications(vec![
            notification("n1", true),
            notification("n2", false),
        ]);
        assert_eq!(content.unread_ids(), vec![None, Some("n2".to_string())]);
        assert_eq!(content.rows().len(), content.unread_ids().len());
        assert!(ScreenContent::News(Vec::new()).unread_ids().is_empty());
    }

    #[test]
    fn invalid_profile_edit_is_refused_before_any_request() {
        let session = SessionContext::with_clock(
            SessionStore::new(Rc::new(MemoryStorage::new())),
            Rc::new(|| 0),
        );
        let vm = ContentViewModel::new(ApiClient::new("http://unused"), session);
        let update = ProfileUpdate {
            full_name: "Siti".into(),
            nik: "123".into(),
            business_name: "Keripik Siti".into(),
            ..Default::default()
        };
        let result = futures::executor::block_on(vm.update_profile(&update));
        assert_eq!(
            result,
            Err(ApiError::Application {
                status_code: 422,
                message: "NIK harus 16 digit angka".into()
            })
        );
    }

    #[test]
    fn application_row_falls_back_to_id() {
        let rows = ScreenContent::Applications(vec![Application {
            id: "a7".into(),
            program_id: "p1".into(),
            program_title: None,
            status: ApplicationStatus::InReview,
            submitted_at: None,
            updated_at: None,
            note: None,
        }])
        .rows();
        assert_eq!(rows[0].title, "Pengajuan a7");
        assert_eq!(rows[0].subtitle.as_deref(), Some("Dalam Review"));
    }
}
