// ============================================================================
// SERVICES - Browser and backend I/O
// ============================================================================

pub mod api_client;
pub mod auth_service;
pub mod network_monitor;
pub mod notification_service;
pub mod profile_service;
pub mod program_service;
pub mod service_worker;
pub mod session_store;

pub use api_client::ApiClient;
pub use auth_service::AuthService;
pub use network_monitor::NetworkMonitor;
pub use notification_service::{NewsService, NotificationService};
pub use profile_service::ProfileService;
pub use program_service::ProgramService;
pub use service_worker::{
    ServiceWorkerRuntime, UpdateCheckOutcome, UpdateChecker, UpdateProbe, WorkerRuntime,
};
pub use session_store::SessionStore;
