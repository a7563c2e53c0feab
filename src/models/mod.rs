pub mod api;
pub mod application;
pub mod auth;
pub mod news;
pub mod notification;
pub mod program;
pub mod user;

pub use api::{parse_envelope, parse_required, ApiEnvelope};
pub use application::{Application, ApplicationRequest, ApplicationStatus, DocumentAttachment};
pub use auth::{
    AuthPayload, Identifier, LoginRequest, PendingVerification, RegisterPayload, RegisterRequest,
    ResendOtpRequest, VerifyOtpRequest,
};
pub use news::NewsItem;
pub use notification::Notification;
pub use program::{Program, ProgramType};
pub use user::{ProfileUpdate, UserProfile};
