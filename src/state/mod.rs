// ============================================================================
// STATE MODULE - Stores con Rc<RefCell> y setters controlados
// ============================================================================

pub mod session_state;
pub mod workspace_state;
pub mod notification_state;
pub mod collection_state;
pub mod app_state;

pub use session_state::*;
pub use workspace_state::*;
pub use notification_state::*;
pub use collection_state::*;
pub use app_state::*;
