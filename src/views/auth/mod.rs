pub mod login_view;
pub mod register_view;

pub use login_view::render_login;
pub use register_view::render_register;
