//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod confirm_dialog;
pub mod data_grid;
pub mod help_dialog;
pub mod layout;
pub mod notification_tray;
pub mod portal;
pub mod record_detail;

pub use confirm_dialog::ConfirmDialog;
pub use data_grid::DataGrid;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use notification_tray::draw_notifications;
pub use portal::{draw_portal_screen, PortalComponent, PortalRenderContext};
pub use record_detail::RecordDetail;
