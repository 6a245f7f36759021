//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components. Grid row
//! handlers answer with intent Actions; the App carries them out against the
//! dataset, saves it, and reports every outcome as a notification.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_notifications, draw_portal_screen, ConfirmDialog, HelpDialog, PortalComponent,
    PortalRenderContext, RecordDetail,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{
    Campaign, Contact, ContactList, EmailTemplate, NotificationCenter, Page, PdfTemplate,
    PortalData, RecordRef,
};
use crate::services::{
    create_dataset, delete_record, duplicate_record, export_file_name, find, load_dataset,
    read_edit_buffer, replace_record, save_dataset, write_edit_buffer,
};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Generate user-friendly error message for a missing dataset
fn dataset_not_found_error(path: &Path) -> String {
    format!(
        "Dataset not found at:\n  {}\n\n\
         Press 'n' to create an empty dataset there,\n\
         'R' to retry or 'q' to quit.",
        path.display()
    )
}

/// A record handed to the external editor, waiting for the main loop
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    pub record: RecordRef,
    /// JSON file the editor works on
    pub path: PathBuf,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,

    /// The portal dataset (all tables)
    pub data: PortalData,

    /// Dataset file the data is loaded from and saved to
    pub data_path: PathBuf,

    /// Modal overlay stack
    pub modals: ModalStack,

    pub notifications: NotificationCenter,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Load error; replaces the grid until resolved
    pub error: Option<String>,

    /// Set by an edit intent, handled by the main loop
    pub pending_edit: Option<PendingEdit>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub portal: PortalComponent,
    pub quit_dialog: ConfirmDialog,
    /// Built when a delete is requested
    pub delete_dialog: Option<ConfirmDialog>,
    pub record_detail: RecordDetail,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create the app and load the dataset at `data_path`
    pub fn new(config: Config, data_path: PathBuf) -> App {
        let (sort_key, direction) = config.default_sort();

        let mut app = App {
            notifications: NotificationCenter::new(config.notification_duration()),
            portal: PortalComponent::new(&sort_key, direction),
            config,
            data: PortalData::default(),
            data_path,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            pending_edit: None,
            quit_dialog: ConfirmDialog::quit(),
            delete_dialog: None,
            record_detail: RecordDetail::default(),
            help_dialog: HelpDialog::default(),
        };
        app.load_data();
        app
    }

    /// (Re)load the dataset from disk
    ///
    /// Returns whether the dataset is usable afterwards.
    fn load_data(&mut self) -> bool {
        if !self.data_path.exists() {
            log::warn!("Dataset {} does not exist", self.data_path.display());
            self.error = Some(dataset_not_found_error(&self.data_path));
            return false;
        }

        match load_dataset(&self.data_path) {
            Ok(data) => {
                self.data = data;
                self.error = None;
                self.portal.refresh(&self.data);
                true
            }
            Err(e) => {
                log::error!("{:#}", e);
                self.error = Some(format!("{:#}", e));
                false
            }
        }
    }

    /// Recompute derived fields, refresh the pages and save the dataset
    fn persist(&mut self) -> Result<()> {
        self.data.refresh_derived();
        self.portal.refresh(&self.data);
        save_dataset(&self.data_path, &self.data)
    }

    fn report<T>(&mut self, result: Result<T>, success: impl FnOnce(T) -> String, failure: &str) {
        match result {
            Ok(value) => {
                let message = success(value);
                log::info!("{}", message);
                self.notifications.success(message);
            }
            Err(e) => self.report_error(failure, e),
        }
    }

    fn report_error(&mut self, failure: &str, error: anyhow::Error) {
        log::warn!("{}: {:#}", failure, error);
        self.notifications.error(format!("{}: {:#}", failure, error));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record Intents
    // ─────────────────────────────────────────────────────────────────────────

    fn open_record(&mut self, record: RecordRef) -> Result<()> {
        let title = format!("{}: {}", record.page.record_label(), record.name);
        let data = &self.data;
        let detail = &mut self.record_detail;

        let shown = match record.page {
            Page::Campaigns => find(&data.campaigns, &record.key).map(|r| detail.set_record(&title, r)),
            Page::Contacts => find(&data.contacts, &record.key).map(|r| detail.set_record(&title, r)),
            Page::ContactLists => {
                find(&data.contact_lists, &record.key).map(|r| detail.set_record(&title, r))
            }
            Page::Templates => find(&data.templates, &record.key).map(|r| detail.set_record(&title, r)),
            Page::PdfTemplates => {
                find(&data.pdf_templates, &record.key).map(|r| detail.set_record(&title, r))
            }
        };

        shown.ok_or_else(|| anyhow!("{} no longer exists", record.name))??;
        self.modals.push(Modal::RecordDetail(record));
        Ok(())
    }

    /// Write the record to a scratch file and queue it for the editor
    fn begin_edit(&mut self, record: RecordRef) -> Result<()> {
        let dir = Config::edit_dir();
        let prefix = record.page.slug();
        let data = &self.data;
        let missing = || anyhow!("{} no longer exists", record.name);

        let path = match record.page {
            Page::Campaigns => {
                write_edit_buffer(&dir, prefix, find(&data.campaigns, &record.key).ok_or_else(missing)?)?
            }
            Page::Contacts => {
                write_edit_buffer(&dir, prefix, find(&data.contacts, &record.key).ok_or_else(missing)?)?
            }
            Page::ContactLists => write_edit_buffer(
                &dir,
                prefix,
                find(&data.contact_lists, &record.key).ok_or_else(missing)?,
            )?,
            Page::Templates => {
                write_edit_buffer(&dir, prefix, find(&data.templates, &record.key).ok_or_else(missing)?)?
            }
            Page::PdfTemplates => write_edit_buffer(
                &dir,
                prefix,
                find(&data.pdf_templates, &record.key).ok_or_else(missing)?,
            )?,
        };

        log::debug!("Editing {} in {}", record, path.display());
        self.pending_edit = Some(PendingEdit { record, path });
        Ok(())
    }

    fn apply_edit(&mut self, edit: &PendingEdit) -> Result<()> {
        let now = Utc::now();
        let key = edit.record.key.as_str();

        match edit.record.page {
            Page::Campaigns => {
                let edited: Campaign = read_edit_buffer(&edit.path)?;
                replace_record(&mut self.data.campaigns, key, edited, now)?;
            }
            Page::Contacts => {
                let edited: Contact = read_edit_buffer(&edit.path)?;
                replace_record(&mut self.data.contacts, key, edited, now)?;
            }
            Page::ContactLists => {
                let edited: ContactList = read_edit_buffer(&edit.path)?;
                replace_record(&mut self.data.contact_lists, key, edited, now)?;
            }
            Page::Templates => {
                let edited: EmailTemplate = read_edit_buffer(&edit.path)?;
                replace_record(&mut self.data.templates, key, edited, now)?;
            }
            Page::PdfTemplates => {
                let edited: PdfTemplate = read_edit_buffer(&edit.path)?;
                replace_record(&mut self.data.pdf_templates, key, edited, now)?;
            }
        }

        self.persist()
    }

    /// Take the edited record back once the editor has exited
    pub fn finish_edit(&mut self, edit: PendingEdit, editor: Result<()>) {
        let label = edit.record.page.record_label().to_string();
        let result = editor.and_then(|_| self.apply_edit(&edit));
        self.report(
            result,
            |_| format!("{} \"{}\" updated", label, edit.record.name),
            &format!("Failed to update {}", label.to_lowercase()),
        );

        let _ = fs::remove_file(&edit.path);
    }

    fn duplicate(&mut self, record: &RecordRef) -> Result<String> {
        let now = Utc::now();
        let key = record.key.as_str();

        let name = match record.page {
            Page::Campaigns => duplicate_record(&mut self.data.campaigns, key, now)?.name,
            Page::Contacts => duplicate_record(&mut self.data.contacts, key, now)?.full_name,
            Page::ContactLists => duplicate_record(&mut self.data.contact_lists, key, now)?.name,
            Page::Templates => duplicate_record(&mut self.data.templates, key, now)?.name,
            Page::PdfTemplates => duplicate_record(&mut self.data.pdf_templates, key, now)?.name,
        };

        self.persist()?;
        Ok(name)
    }

    /// Remove the record and every join row pointing at it
    fn delete(&mut self, record: &RecordRef) -> Result<()> {
        let key = record.key.as_str();

        match record.page {
            Page::Campaigns => {
                let campaign = delete_record(&mut self.data.campaigns, key)?;
                self.data.unlink_campaign(campaign.id);
            }
            Page::Contacts => {
                let contact = delete_record(&mut self.data.contacts, key)?;
                self.data.unlink_contact(contact.id);
            }
            Page::ContactLists => {
                let list = delete_record(&mut self.data.contact_lists, key)?;
                self.data.unlink_contact_list(list.id);
            }
            Page::Templates => {
                let template = delete_record(&mut self.data.templates, key)?;
                self.data.unlink_template(&template.id);
            }
            Page::PdfTemplates => {
                let pdf = delete_record(&mut self.data.pdf_templates, key)?;
                self.data.unlink_pdf_template(pdf.id);
            }
        }

        self.modals.forget(record);
        self.persist()
    }

    fn export_view(&mut self) -> Result<(usize, PathBuf)> {
        let dir = self.data_path.parent().unwrap_or_else(|| Path::new(""));
        let path = dir.join(export_file_name(self.portal.active_page.slug(), Utc::now()));

        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let count = self.portal.export_csv(&self.data, file)?;
        Ok((count, path))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        log::info!("Starting with dataset {}", self.data_path.display());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Missing or broken dataset: only the recovery keys work
        if self.error.is_some() && self.modals.is_empty() {
            return self.handle_error_key_event(key);
        }

        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else {
            self.portal.handle_key_event(key)
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.error.is_some() || !self.modals.is_empty() {
            return Ok(None);
        }
        Ok(self.portal.handle_mouse(mouse, &self.data))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.notifications.expire(Instant::now()),
            Action::Resize(_, _) => {}
            Action::ForceQuit => self.should_quit = true,

            // ─────────────────────────────────────────────────────────────────
            // Pages & Grid
            // ─────────────────────────────────────────────────────────────────
            Action::NextTab => self.portal.next_page(),
            Action::PrevTab => self.portal.previous_page(),
            Action::NextItem
            | Action::PrevItem
            | Action::FirstItem
            | Action::LastItem
            | Action::NextColumn
            | Action::PrevColumn
            | Action::SortFocusedColumn
            | Action::SortColumn(_)
            | Action::OpenSelected
            | Action::EditSelected
            | Action::DuplicateSelected
            | Action::DeleteSelected => return Ok(self.portal.apply(&action, &self.data)),

            // ─────────────────────────────────────────────────────────────────
            // Record Intents
            // ─────────────────────────────────────────────────────────────────
            Action::OpenRecord(record) => {
                if let Err(e) = self.open_record(record) {
                    self.report_error("Failed to open record", e);
                }
            }
            Action::EditRecord(record) => {
                let label = record.page.record_label().to_lowercase();
                if let Err(e) = self.begin_edit(record) {
                    self.report_error(&format!("Failed to edit {}", label), e);
                }
            }
            Action::DuplicateRecord(record) => {
                let label = record.page.record_label().to_string();
                let result = self.duplicate(&record);
                self.report(
                    result,
                    |name| format!("{} duplicated as \"{}\"", label, name),
                    &format!("Failed to duplicate {}", label.to_lowercase()),
                );
            }
            Action::RequestDelete(record) => {
                self.delete_dialog = Some(ConfirmDialog::delete(
                    record.page.record_label(),
                    &record.name,
                ));
                self.modals.push(Modal::ConfirmDelete(record));
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown => match self.modals.top() {
                Some(Modal::Help) => return self.help_dialog.update(action),
                Some(Modal::RecordDetail(_)) => return self.record_detail.update(action),
                _ => {}
            },
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => self.modals.push(Modal::Help),
            Action::CloseModal => {
                if let Some(Modal::ConfirmDelete(_)) = self.modals.pop() {
                    self.delete_dialog = None;
                }
            }
            Action::ConfirmModal => {
                if let Some(Modal::ConfirmDelete(record)) = self.modals.top().cloned() {
                    self.modals.pop();
                    self.delete_dialog = None;

                    let label = record.page.record_label().to_string();
                    let result = self.delete(&record);
                    self.report(
                        result,
                        |_| format!("{} \"{}\" deleted", label, record.name),
                        &format!("Failed to delete {}", label.to_lowercase()),
                    );
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Data
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleArchived => self.portal.toggle_archived(&self.data),
            Action::ReloadData => {
                if self.load_data() {
                    self.notifications.success("Dataset reloaded");
                }
            }
            Action::CreateDataset => {
                let result = create_dataset(&self.data_path);
                if let Ok(data) = &result {
                    self.data = data.clone();
                    self.error = None;
                    self.portal.refresh(&self.data);
                }
                let path = self.data_path.display().to_string();
                self.report(
                    result,
                    |_| format!("Created empty dataset {}", path),
                    "Failed to create dataset",
                );
            }
            Action::ExportView => {
                let result = self.export_view();
                self.report(
                    result,
                    |(count, path)| format!("Exported {} records to {}", count, path.display()),
                    "Failed to export",
                );
            }
            Action::DismissNotification => {
                self.notifications.dismiss_latest();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let data_path = self.data_path.display().to_string();
        let ctx = PortalRenderContext {
            data: &self.data,
            data_path: &data_path,
            error: self.error.as_deref(),
        };
        draw_portal_screen(frame, area, &mut self.portal, &ctx);

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }

        draw_notifications(frame, area, &self.notifications);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::ConfirmDelete(_) => match self.delete_dialog.as_mut() {
                Some(dialog) => dialog.handle_key_event(key),
                None => Ok(Some(Action::CloseModal)),
            },
            Modal::RecordDetail(_) => self.record_detail.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::ConfirmDelete(_) => {
                if let Some(dialog) = self.delete_dialog.as_mut() {
                    dialog.draw(frame, area)?;
                }
            }
            Modal::RecordDetail(_) => self.record_detail.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }

    /// Handle key events when the dataset could not be loaded
    fn handle_error_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('n') if !self.data_path.exists() => Ok(Some(Action::CreateDataset)),
            KeyCode::Char('R') => Ok(Some(Action::ReloadData)),
            KeyCode::Char('q') | KeyCode::Esc => Ok(Some(Action::ForceQuit)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationKind;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("portal-tui-app-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn app_with_dataset(name: &str) -> (App, PathBuf) {
        let dir = temp_dir(name);
        let path = dir.join("portal.json");
        let dataset = json!({
            "clients": [{"id": 1, "name": "Acme"}],
            "campaigns": [
                {"id": 1, "name": "Spring", "status": "active", "updated_at": "2024-01-01T00:00:00Z"},
                {"id": 2, "name": "Summer", "status": "active", "updated_at": "2024-02-01T00:00:00Z"}
            ],
            "contacts": [
                {"id": 10, "client_id": 1, "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"}
            ],
            "campaign_contacts": [
                {"campaign_id": 1, "contact_id": 10},
                {"campaign_id": 2, "contact_id": 10}
            ],
            "campaign_contact_lists": [{"campaign_id": 1, "contact_list_id": 5}]
        });
        fs::write(&path, serde_json::to_string(&dataset).unwrap()).unwrap();

        (App::new(Config::default(), path.clone()), dir)
    }

    fn campaign_ref(id: &str, name: &str) -> RecordRef {
        RecordRef::new(Page::Campaigns, id, name)
    }

    fn last_notification(app: &App) -> (NotificationKind, String) {
        let n = app.notifications.visible().last().unwrap();
        (n.kind, n.message.clone())
    }

    #[test]
    fn test_loads_dataset() {
        let (app, dir) = app_with_dataset("load");
        assert!(app.error.is_none());
        assert_eq!(app.portal.visible_campaigns().len(), 2);
        assert_eq!(app.data.contacts[0].client_name.as_deref(), Some("Acme"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_duplicate_saves_and_notifies() {
        let (mut app, dir) = app_with_dataset("duplicate");

        app.update(Action::DuplicateRecord(campaign_ref("1", "Spring"))).unwrap();

        assert_eq!(app.data.campaigns.len(), 3);
        assert_eq!(app.data.campaigns[0].name, "Spring (Copy)");
        assert_eq!(app.data.campaigns[0].status.as_deref(), Some("draft"));
        assert_eq!(
            last_notification(&app),
            (NotificationKind::Success, "Campaign duplicated as \"Spring (Copy)\"".to_string())
        );

        let saved = load_dataset(&app.data_path).unwrap();
        assert_eq!(saved.campaigns.len(), 3);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_delete_asks_then_cascades() {
        let (mut app, dir) = app_with_dataset("delete");

        app.update(Action::RequestDelete(campaign_ref("1", "Spring"))).unwrap();
        assert!(matches!(app.modals.top(), Some(Modal::ConfirmDelete(_))));
        assert_eq!(app.data.campaigns.len(), 2);

        let key = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
        let confirm = app.handle_key_event(key).unwrap();
        assert_eq!(confirm, Some(Action::ConfirmModal));
        app.update(Action::ConfirmModal).unwrap();

        assert!(app.modals.is_empty());
        assert_eq!(app.data.campaigns.len(), 1);
        assert!(app.data.campaign_contacts.iter().all(|cc| cc.campaign_id != 1));
        assert!(app.data.campaign_contact_lists.is_empty());
        assert_eq!(last_notification(&app).0, NotificationKind::Success);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_cancelled_delete_keeps_record() {
        let (mut app, dir) = app_with_dataset("cancel");

        app.update(Action::RequestDelete(campaign_ref("1", "Spring"))).unwrap();
        app.update(Action::CloseModal).unwrap();

        assert!(app.delete_dialog.is_none());
        assert_eq!(app.data.campaigns.len(), 2);
        assert!(app.notifications.is_empty());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_stale_record_reports_error() {
        let (mut app, dir) = app_with_dataset("stale");

        app.update(Action::DuplicateRecord(campaign_ref("42", "Gone"))).unwrap();

        let (kind, message) = last_notification(&app);
        assert_eq!(kind, NotificationKind::Error);
        assert!(message.starts_with("Failed to duplicate campaign"));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_edit_round_trip() {
        let (mut app, dir) = app_with_dataset("edit");

        app.update(Action::EditRecord(campaign_ref("2", "Summer"))).unwrap();
        let edit = app.pending_edit.take().unwrap();

        let mut edited: Campaign = read_edit_buffer(&edit.path).unwrap();
        edited.name = "Summer Sale".to_string();
        edited.id = 999;
        fs::write(&edit.path, serde_json::to_string(&edited).unwrap()).unwrap();

        app.finish_edit(edit.clone(), Ok(()));

        let summer = app.data.campaigns.iter().find(|c| c.id == 2).unwrap();
        assert_eq!(summer.name, "Summer Sale");
        assert_ne!(summer.updated_at.as_deref(), Some("2024-02-01T00:00:00Z"));
        assert!(!edit.path.exists());
        assert_eq!(last_notification(&app).0, NotificationKind::Success);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_failed_editor_leaves_record() {
        let (mut app, dir) = app_with_dataset("editor-fail");

        app.update(Action::EditRecord(campaign_ref("2", "Summer"))).unwrap();
        let edit = app.pending_edit.take().unwrap();
        app.finish_edit(edit, Err(anyhow!("Editor exited with status 1")));

        assert_eq!(app.data.campaigns[1].name, "Summer");
        assert_eq!(last_notification(&app).0, NotificationKind::Error);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_open_record_shows_detail() {
        let (mut app, dir) = app_with_dataset("open");

        app.update(Action::OpenRecord(campaign_ref("1", "Spring"))).unwrap();
        assert!(matches!(app.modals.top(), Some(Modal::RecordDetail(_))));

        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_dataset_can_be_created() {
        let dir = temp_dir("missing");
        let path = dir.join("portal.json");
        let mut app = App::new(Config::default(), path.clone());

        assert!(app.error.as_deref().unwrap().starts_with("Dataset not found"));

        let key = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        let action = app.handle_key_event(key).unwrap();
        assert_eq!(action, Some(Action::CreateDataset));
        app.update(Action::CreateDataset).unwrap();

        assert!(app.error.is_none());
        assert!(path.exists());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_export_writes_csv_next_to_dataset() {
        let (mut app, dir) = app_with_dataset("export");

        app.update(Action::ExportView).unwrap();

        let (kind, message) = last_notification(&app);
        assert_eq!(kind, NotificationKind::Success);
        assert!(message.starts_with("Exported 2 records"));

        let exported: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".csv"))
            .collect();
        assert_eq!(exported.len(), 1);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_grid_delete_key_reaches_confirmation() {
        let (mut app, dir) = app_with_dataset("keys");

        // The first draw selects the top row
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area).unwrap();
            })
            .unwrap();

        let key = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        let mut action = app.handle_key_event(key).unwrap();
        while let Some(a) = action {
            action = app.update(a).unwrap();
        }

        // Default sort is newest first, so Summer is selected
        match app.modals.top() {
            Some(Modal::ConfirmDelete(record)) => assert_eq!(record.name, "Summer"),
            other => panic!("unexpected modal {:?}", other),
        }
        let _ = fs::remove_dir_all(dir);
    }
}
