//! Grid definitions of the portal pages
//!
//! Each page builds a `DataGrid` over its record type. Row handlers do not
//! touch the dataset; they answer with an intent Action naming the record,
//! and the app carries the intent out.

use crate::action::Action;
use crate::components::DataGrid;
use crate::format::{format_date, format_day};
use crate::grid::{parse_date, CellValue, Column, SortDirection, SortKind};
use crate::model::{
    Campaign, Contact, ContactList, EmailTemplate, Page, PdfTemplate, PortalRecord, RecordRef,
};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn record_ref<R: PortalRecord>(page: Page, record: &R) -> RecordRef {
    RecordRef::new(page, record.key(), record.name())
}

/// Wire every row intent of `grid` to an Action carrying the record's ref
fn with_intents<R: PortalRecord + 'static>(grid: DataGrid<R>, page: Page) -> DataGrid<R> {
    grid.on_edit(move |r| Some(Action::EditRecord(record_ref(page, r))))
        .on_duplicate(move |r| Some(Action::DuplicateRecord(record_ref(page, r))))
        .on_delete(move |r| Some(Action::RequestDelete(record_ref(page, r))))
        .on_open(move |r| Some(Action::OpenRecord(record_ref(page, r))))
}

fn link_style() -> Style {
    Style::default()
        .fg(Color::LightBlue)
        .add_modifier(Modifier::BOLD)
}

/// Record name rendered as a link to its details
fn name_cell(name: &str) -> Line<'static> {
    Line::from(Span::styled(name.to_string(), link_style()))
}

fn optional_text(value: &Option<String>) -> CellValue {
    value.as_deref().into()
}

/// "Last Updated" column shared by every page
fn updated_column<R: 'static>(updated_at: fn(&R) -> Option<&str>) -> Column<R> {
    Column::new("updated_at", "Last Updated", move |r: &R| updated_at(r).into())
        .render(move |r: &R| Line::from(format_date(updated_at(r).unwrap_or_default())))
}

// ─────────────────────────────────────────────────────────────────────────────
// Campaigns
// ─────────────────────────────────────────────────────────────────────────────

fn status_style(status: &str) -> Style {
    match status {
        "active" => Style::default().fg(Color::Green),
        "pending" | "in-progress" => Style::default().fg(Color::Yellow),
        "completed" => Style::default().fg(Color::Magenta),
        _ => Style::default().fg(Color::Gray),
    }
}

pub fn progress_text(campaign: &Campaign) -> String {
    let progress = campaign.progress;
    let status = campaign.status.as_deref();

    if status == Some("completed") {
        return format!("Complete  {}/{}", progress.sent_emails, progress.total_contacts);
    }
    if status == Some("in-progress") && progress.sent_emails == 0 {
        return "0% complete".to_string();
    }
    if progress.total_contacts == 0 {
        return "Not started".to_string();
    }
    format!(
        "{}% complete  {}/{}",
        progress.percent(),
        progress.sent_emails,
        progress.total_contacts
    )
}

pub fn sent_today_text(campaign: &Campaign) -> String {
    let sent = campaign.sent_today_count.unwrap_or(0);
    match campaign.max_emails_per_day {
        Some(max) if max > 0 => format!("{}/{}", sent, max),
        _ => format!("{}/∞", sent),
    }
}

pub fn campaign_columns() -> Vec<Column<Campaign>> {
    vec![
        Column::new("name", "Campaign Name", |c: &Campaign| c.name.as_str().into())
            .render(|c: &Campaign| name_cell(&c.name))
            .with_actions(),
        Column::new("start_date", "Start Date", |c: &Campaign| {
            c.start_date.as_deref().and_then(parse_date).into()
        })
        .render(|c: &Campaign| Line::from(format_day(c.start_date.as_deref()))),
        Column::new("status", "Status", |c: &Campaign| optional_text(&c.status)).render(
            |c: &Campaign| {
                let status = c.status.clone().unwrap_or_default();
                let style = status_style(&status);
                Line::from(Span::styled(status, style))
            },
        ),
        Column::new("progress", "Progress", |c: &Campaign| {
            CellValue::from(c.progress.percent())
        })
        .render(|c: &Campaign| Line::from(progress_text(c))),
        Column::new("sent_today", "Sent Today", |c: &Campaign| {
            c.sent_today_count.into()
        })
        .render(|c: &Campaign| Line::from(sent_today_text(c))),
        updated_column(|c: &Campaign| c.updated_at.as_deref()),
    ]
}

pub fn campaign_grid(sort_key: &str, direction: SortDirection) -> DataGrid<Campaign> {
    let grid = DataGrid::new(Page::Campaigns.name(), campaign_columns()).with_sort(sort_key, direction);
    with_intents(grid, Page::Campaigns)
}

// ─────────────────────────────────────────────────────────────────────────────
// Contacts
// ─────────────────────────────────────────────────────────────────────────────

pub fn contact_columns() -> Vec<Column<Contact>> {
    vec![
        Column::new("name", "Name", |c: &Contact| c.full_name.as_str().into())
            .render(|c: &Contact| name_cell(&c.full_name))
            .with_actions(),
        Column::new("email", "Email", |c: &Contact| c.email.as_str().into())
            .sort_as(SortKind::Identifier),
        Column::new("client", "Client", |c: &Contact| optional_text(&c.client_name)),
        Column::new("title", "Title", |c: &Contact| optional_text(&c.title)),
        Column::new("job_title", "Job Title", |c: &Contact| optional_text(&c.job_title)),
        Column::new("company", "Company", |c: &Contact| optional_text(&c.company)),
        Column::new("contact_lists", "Contact Lists", |c: &Contact| {
            c.contact_lists.join(", ").into()
        })
        .unsortable(),
        updated_column(|c: &Contact| c.updated_at.as_deref()),
    ]
}

pub fn contact_grid(sort_key: &str, direction: SortDirection) -> DataGrid<Contact> {
    let grid = DataGrid::new(Page::Contacts.name(), contact_columns()).with_sort(sort_key, direction);
    with_intents(grid, Page::Contacts)
}

// ─────────────────────────────────────────────────────────────────────────────
// Contact lists
// ─────────────────────────────────────────────────────────────────────────────

pub fn contact_list_columns() -> Vec<Column<ContactList>> {
    vec![
        Column::new("name", "List Name", |l: &ContactList| l.name.as_str().into())
            .render(|l: &ContactList| name_cell(&l.name))
            .with_actions(),
        Column::new("description", "Description", |l: &ContactList| {
            optional_text(&l.description)
        }),
        Column::new("contact_count", "# Contacts", |l: &ContactList| {
            l.contact_count.into()
        }),
        updated_column(|l: &ContactList| l.updated_at.as_deref()),
    ]
}

pub fn contact_list_grid(sort_key: &str, direction: SortDirection) -> DataGrid<ContactList> {
    let grid = DataGrid::new(Page::ContactLists.name(), contact_list_columns())
        .with_sort(sort_key, direction);
    with_intents(grid, Page::ContactLists)
}

// ─────────────────────────────────────────────────────────────────────────────
// Email templates
// ─────────────────────────────────────────────────────────────────────────────

pub fn template_columns() -> Vec<Column<EmailTemplate>> {
    vec![
        Column::new("name", "Template Name", |t: &EmailTemplate| t.name.as_str().into())
            .render(|t: &EmailTemplate| name_cell(&t.name))
            .with_actions(),
        Column::new("subject", "Subject", |t: &EmailTemplate| t.subject.as_str().into()),
        Column::new("attachments", "Attachments", |t: &EmailTemplate| {
            t.attachments.len().into()
        })
        .unsortable(),
        updated_column(|t: &EmailTemplate| t.updated_at.as_deref()),
        Column::new("campaigns", "Used In Campaigns", |t: &EmailTemplate| {
            t.campaigns.join(", ").into()
        }),
    ]
}

pub fn template_grid(sort_key: &str, direction: SortDirection) -> DataGrid<EmailTemplate> {
    let grid = DataGrid::new(Page::Templates.name(), template_columns()).with_sort(sort_key, direction);
    with_intents(grid, Page::Templates)
}

// ─────────────────────────────────────────────────────────────────────────────
// PDF templates
// ─────────────────────────────────────────────────────────────────────────────

pub fn pdf_template_columns() -> Vec<Column<PdfTemplate>> {
    vec![
        Column::new("name", "Name", |t: &PdfTemplate| t.name.as_str().into())
            .render(|t: &PdfTemplate| name_cell(&t.name))
            .with_actions(),
        Column::new("description", "Description", |t: &PdfTemplate| {
            optional_text(&t.description)
        }),
        Column::new("client", "Client", |t: &PdfTemplate| optional_text(&t.client_name)),
        updated_column(|t: &PdfTemplate| t.updated_at.as_deref()),
    ]
}

pub fn pdf_template_grid(sort_key: &str, direction: SortDirection) -> DataGrid<PdfTemplate> {
    let grid = DataGrid::new(Page::PdfTemplates.name(), pdf_template_columns())
        .with_sort(sort_key, direction);
    with_intents(grid, Page::PdfTemplates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::records::CampaignProgress;
    use serde_json::json;

    fn campaign(value: serde_json::Value) -> Campaign {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_progress_text() {
        let mut c = campaign(json!({"id": 1, "name": "A", "status": "active"}));
        assert_eq!(progress_text(&c), "Not started");

        c.progress = CampaignProgress {
            total_contacts: 3,
            sent_emails: 2,
        };
        assert_eq!(progress_text(&c), "67% complete  2/3");

        c.status = Some("completed".to_string());
        assert_eq!(progress_text(&c), "Complete  2/3");

        c.status = Some("in-progress".to_string());
        c.progress.sent_emails = 0;
        assert_eq!(progress_text(&c), "0% complete");
    }

    #[test]
    fn test_sent_today_text() {
        let c = campaign(json!({"id": 1, "name": "A", "sent_today_count": 4, "max_emails_per_day": 50}));
        assert_eq!(sent_today_text(&c), "4/50");

        let unlimited = campaign(json!({"id": 2, "name": "B"}));
        assert_eq!(sent_today_text(&unlimited), "0/∞");
    }

    #[test]
    fn test_every_page_has_updated_column_and_unique_keys() {
        fn keys<T>(columns: &[Column<T>]) -> Vec<String> {
            columns.iter().map(|c| c.key.clone()).collect()
        }
        for keys in [
            keys(&campaign_columns()),
            keys(&contact_columns()),
            keys(&contact_list_columns()),
            keys(&template_columns()),
            keys(&pdf_template_columns()),
        ] {
            assert!(keys.contains(&"updated_at".to_string()));
            let mut unique = keys.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), keys.len());
        }
    }

    #[test]
    fn test_start_date_sorts_chronologically() {
        let data = vec![
            campaign(json!({"id": 1, "name": "A", "start_date": "2024-10-01"})),
            campaign(json!({"id": 2, "name": "B", "start_date": "2024-09-15"})),
            campaign(json!({"id": 3, "name": "C"})),
        ];
        let grid = campaign_grid("start_date", SortDirection::Ascending);
        let ids: Vec<i64> = grid.sorted(&data).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_handlers_answer_with_record_intents() {
        let data = vec![campaign(json!({"id": 7, "name": "Spring"}))];
        let mut grid = campaign_grid("updated_at", SortDirection::Descending);
        grid.first_row(data.len());

        let expected = RecordRef::new(Page::Campaigns, "7", "Spring");
        assert_eq!(
            grid.apply(&Action::DeleteSelected, &data),
            Some(Action::RequestDelete(expected.clone()))
        );
        assert_eq!(
            grid.apply(&Action::OpenSelected, &data),
            Some(Action::OpenRecord(expected))
        );
    }

    #[test]
    fn test_contact_lists_column_is_unsortable() {
        let columns = contact_columns();
        let lists = columns.iter().find(|c| c.key == "contact_lists").unwrap();
        assert!(!lists.sortable);
    }
}
