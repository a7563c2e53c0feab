// ============================================================================
// DOM MODULE - web-sys helpers
// ============================================================================

pub mod builder;
pub mod element;
pub mod events;
pub mod history;

pub use builder::*;
pub use element::*;
pub use events::*;
pub use history::*;
