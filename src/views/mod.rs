// ============================================================================
// VIEWS - DOM rendering functions
// ============================================================================

pub mod app;
pub mod auth;
pub mod network_banner;
pub mod screen;
pub mod update_toast;

pub use app::render_app;
