pub mod dialogs;
pub mod presentation;
pub mod views;

mod session;
pub use session::run_tui;
