// ============================================================================
// STATE MODULE - Rc<RefCell> state + explicit state machines
// ============================================================================

pub mod app_state;
pub mod reachability_state;
pub mod session_state;
pub mod update_state;

pub use app_state::*;
pub use reachability_state::*;
pub use session_state::*;
pub use update_state::*;
