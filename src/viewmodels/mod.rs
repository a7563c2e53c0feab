pub mod content_viewmodel;
pub mod network_viewmodel;
pub mod session_viewmodel;
pub mod update_viewmodel;

pub use content_viewmodel::{ContentRow, ContentViewModel, ScreenContent};
pub use network_viewmodel::{BannerModel, NetworkViewModel};
pub use session_viewmodel::{LoginOutcome, SessionViewModel};
pub use update_viewmodel::{ToastModel, UpdateViewModel};
