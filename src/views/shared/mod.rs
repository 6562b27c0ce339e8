pub mod header;
pub mod sidebar;
pub mod notifications_panel;

pub use header::render_header;
pub use sidebar::render_sidebar;
pub use notifications_panel::render_notifications_panel;
