//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state. Grid row handlers also answer with Actions, which
//! is how an edit/duplicate/delete intent travels back to the page that
//! owns the records.

use crate::model::RecordRef;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for notification expiry
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next row
    NextItem,
    /// Move to previous row
    PrevItem,
    /// Jump to first row
    FirstItem,
    /// Jump to last row
    LastItem,
    /// Move to next page tab
    NextTab,
    /// Move to previous page tab
    PrevTab,
    /// Focus the next column header
    NextColumn,
    /// Focus the previous column header
    PrevColumn,

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting
    // ─────────────────────────────────────────────────────────────────────────
    /// Click the focused column header
    SortFocusedColumn,
    /// Click the header of the column at this position
    SortColumn(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Row Actions (selected row)
    // ─────────────────────────────────────────────────────────────────────────
    OpenSelected,
    EditSelected,
    DuplicateSelected,
    DeleteSelected,

    // ─────────────────────────────────────────────────────────────────────────
    // Record Intents (emitted by grid handlers)
    // ─────────────────────────────────────────────────────────────────────────
    /// Show the detail view of a record
    OpenRecord(RecordRef),
    /// Edit a record in the external editor
    EditRecord(RecordRef),
    /// Duplicate a record with an incremented copy name
    DuplicateRecord(RecordRef),
    /// Ask for confirmation before deleting a record
    RequestDelete(RecordRef),

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling (detail overlay)
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle the campaigns page between active and archived
    ToggleArchived,
    /// Reload the dataset from disk
    ReloadData,
    /// Create an empty dataset at the configured path
    CreateDataset,
    /// Export the visible grid, in display order, as CSV
    ExportView,
    /// Dismiss the newest notification
    DismissNotification,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::NextColumn => write!(f, "NextColumn"),
            Action::PrevColumn => write!(f, "PrevColumn"),
            Action::SortFocusedColumn => write!(f, "SortFocusedColumn"),
            Action::SortColumn(i) => write!(f, "SortColumn({})", i),
            Action::OpenSelected => write!(f, "OpenSelected"),
            Action::EditSelected => write!(f, "EditSelected"),
            Action::DuplicateSelected => write!(f, "DuplicateSelected"),
            Action::DeleteSelected => write!(f, "DeleteSelected"),
            Action::OpenRecord(r) => write!(f, "OpenRecord({})", r),
            Action::EditRecord(r) => write!(f, "EditRecord({})", r),
            Action::DuplicateRecord(r) => write!(f, "DuplicateRecord({})", r),
            Action::RequestDelete(r) => write!(f, "RequestDelete({})", r),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ToggleArchived => write!(f, "ToggleArchived"),
            Action::ReloadData => write!(f, "ReloadData"),
            Action::CreateDataset => write!(f, "CreateDataset"),
            Action::ExportView => write!(f, "ExportView"),
            Action::DismissNotification => write!(f, "DismissNotification"),
        }
    }
}
