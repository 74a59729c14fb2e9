//! Widget components for the dashboard

mod config_editor;
mod confirm_dialog;
mod error_banner;
mod header;
mod message_log;
pub mod modal_overlay;
mod status_panel;
mod toasts;

pub use config_editor::ConfigEditor;
pub use confirm_dialog::ConfirmDialog;
pub use error_banner::ErrorBanner;
pub use header::MainHeader;
pub use message_log::MessageLogView;
pub use status_panel::StatusPanel;
pub use toasts::Toasts;
