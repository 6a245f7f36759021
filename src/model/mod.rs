//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `PortalData` - The dataset (campaigns, contacts, templates, ...)
//! - `records` - Row types and the `PortalRecord` trait
//! - `ModalStack` - Modal overlay management
//! - `NotificationCenter` - Transient success/error messages
//! - `Page` / `RecordRef` - Page tabs and record references

pub mod domain;
pub mod modal;
pub mod notification;
pub mod records;
pub mod ui;

// Re-export commonly used types
pub use domain::PortalData;
pub use notification::{NotificationCenter, NotificationKind};
pub use records::{Campaign, Contact, ContactList, EmailTemplate, PdfTemplate, PortalRecord};
pub use ui::{CampaignFilter, Page, RecordRef};
