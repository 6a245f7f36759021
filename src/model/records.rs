//! Portal records
//!
//! Row types for every table of the portal dataset. Fields marked
//! `#[serde(skip)]` are derived from the other tables after loading (see
//! `PortalData::refresh_derived`) and never written back.

use crate::services::naming::next_copy_email;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Common behaviour of records shown on a page
pub trait PortalRecord: Clone + Serialize + DeserializeOwned {
    /// Stable key of the record, as text
    fn key(&self) -> String;

    fn name(&self) -> &str;

    /// Stamp `updated_at`
    fn touch(&mut self, now: DateTime<Utc>);

    /// Take over the identity (key and creation time) of `original`
    fn keep_identity(&mut self, original: &Self);

    /// Copy of this record named `name`, keyed after every record in `existing`
    fn duplicate_as(&self, name: String, existing: &[Self], now: DateTime<Utc>) -> Self;
}

/// Timestamp in the dataset's text form
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

// ═══════════════════════════════════════════════════════════════════════════════
// Clients & join tables
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactListMember {
    pub contact_list_id: i64,
    pub contact_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignContact {
    pub campaign_id: i64,
    pub contact_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignContactList {
    pub campaign_id: i64,
    pub contact_list_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentEmail {
    pub id: i64,
    pub campaign_id: i64,
    pub contact_id: i64,
    pub sent_at: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Campaign
// ═══════════════════════════════════════════════════════════════════════════════

/// Delivery progress of a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CampaignProgress {
    pub total_contacts: usize,
    pub sent_emails: usize,
}

impl CampaignProgress {
    /// Rounded percentage of contacts already emailed
    pub fn percent(&self) -> u32 {
        if self.total_contacts == 0 {
            return 0;
        }
        ((self.sent_emails as f64 / self.total_contacts as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub client_id: Option<i64>,
    pub template_id: Option<String>,
    pub sent_today_count: Option<u32>,
    pub max_emails_per_day: Option<u32>,
    #[serde(default)]
    pub days_of_week: Vec<String>,
    pub completed_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(skip)]
    pub progress: CampaignProgress,
}

impl PortalRecord for Campaign {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(timestamp(now));
    }

    fn keep_identity(&mut self, original: &Self) {
        self.id = original.id;
        self.created_at = original.created_at.clone();
    }

    /// Duplicates start over as drafts with no delivery history
    fn duplicate_as(&self, name: String, existing: &[Self], now: DateTime<Utc>) -> Self {
        Campaign {
            id: next_id(existing.iter().map(|c| c.id)),
            name,
            status: Some("draft".to_string()),
            sent_today_count: None,
            completed_at: None,
            created_at: Some(timestamp(now)),
            updated_at: Some(timestamp(now)),
            progress: CampaignProgress::default(),
            ..self.clone()
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Contact
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub client_id: Option<i64>,
    pub title: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub instagram_handle: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub company_address: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(skip)]
    pub full_name: String,
    #[serde(skip)]
    pub client_name: Option<String>,
    #[serde(skip)]
    pub contact_lists: Vec<String>,
}

impl Contact {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl PortalRecord for Contact {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.full_name
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(timestamp(now));
    }

    fn keep_identity(&mut self, original: &Self) {
        self.id = original.id;
        self.created_at = original.created_at.clone();
    }

    /// The copy name lands in `last_name` so the full name reads "<name> (Copy)";
    /// the email gets a `.copyN` marker so no two contacts share an address
    fn duplicate_as(&self, name: String, existing: &[Self], now: DateTime<Utc>) -> Self {
        let first = format!("{} ", self.first_name);
        let last_name = name
            .strip_prefix(first.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());

        Contact {
            id: next_id(existing.iter().map(|c| c.id)),
            last_name,
            full_name: name,
            email: next_copy_email(&self.email, existing.iter().map(|c| c.email.as_str())),
            created_at: Some(timestamp(now)),
            updated_at: Some(timestamp(now)),
            contact_lists: Vec::new(),
            ..self.clone()
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Contact list
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactList {
    pub id: i64,
    pub client_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(skip)]
    pub contact_count: usize,
}

impl PortalRecord for ContactList {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(timestamp(now));
    }

    fn keep_identity(&mut self, original: &Self) {
        self.id = original.id;
        self.created_at = original.created_at.clone();
    }

    /// Memberships are not copied, so the duplicate starts empty
    fn duplicate_as(&self, name: String, existing: &[Self], now: DateTime<Utc>) -> Self {
        ContactList {
            id: next_id(existing.iter().map(|l| l.id)),
            name,
            created_at: Some(timestamp(now)),
            updated_at: Some(timestamp(now)),
            contact_count: 0,
            ..self.clone()
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Email template
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    pub text_content: String,
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
    #[serde(default)]
    pub pdf_template_ids: Vec<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(skip)]
    pub campaigns: Vec<String>,
}

impl PortalRecord for EmailTemplate {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(timestamp(now));
    }

    fn keep_identity(&mut self, original: &Self) {
        self.id = original.id.clone();
        self.created_at = original.created_at.clone();
    }

    fn duplicate_as(&self, name: String, _existing: &[Self], now: DateTime<Utc>) -> Self {
        EmailTemplate {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            created_at: Some(timestamp(now)),
            updated_at: Some(timestamp(now)),
            campaigns: Vec::new(),
            ..self.clone()
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PDF template
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfTemplate {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub client_id: Option<i64>,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    pub css_content: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(skip)]
    pub client_name: Option<String>,
}

impl PortalRecord for PdfTemplate {
    fn key(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(timestamp(now));
    }

    fn keep_identity(&mut self, original: &Self) {
        self.id = original.id;
        self.created_at = original.created_at.clone();
    }

    fn duplicate_as(&self, name: String, existing: &[Self], now: DateTime<Utc>) -> Self {
        PdfTemplate {
            id: next_id(existing.iter().map(|t| t.id)),
            name,
            created_at: Some(timestamp(now)),
            updated_at: Some(timestamp(now)),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn campaign(id: i64, name: &str) -> Campaign {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "status": "active",
            "sent_today_count": 12,
            "max_emails_per_day": 50,
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let c = campaign(1, "Spring");
        assert_eq!(c.start_date, None);
        assert!(c.days_of_week.is_empty());
        assert_eq!(c.progress, CampaignProgress::default());
    }

    #[test]
    fn test_progress_percent_rounds() {
        let progress = CampaignProgress {
            total_contacts: 3,
            sent_emails: 2,
        };
        assert_eq!(progress.percent(), 67);
        assert_eq!(CampaignProgress::default().percent(), 0);
    }

    #[test]
    fn test_campaign_duplicate_is_fresh_draft() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let existing = vec![campaign(3, "Spring"), campaign(9, "Summer")];

        let copy = existing[0].duplicate_as("Spring (Copy)".to_string(), &existing, now);

        assert_eq!(copy.id, 10);
        assert_eq!(copy.name, "Spring (Copy)");
        assert_eq!(copy.status.as_deref(), Some("draft"));
        assert_eq!(copy.sent_today_count, None);
        assert_eq!(copy.max_emails_per_day, Some(50));
        assert_eq!(copy.updated_at.as_deref(), Some("2024-05-01T12:00:00Z"));
    }

    #[test]
    fn test_template_duplicate_gets_new_uuid() {
        let template: EmailTemplate = serde_json::from_value(serde_json::json!({
            "id": "0b4e7a1c-8d2f-4c1e-9a3b-5f6d7e8c9a0b",
            "name": "Welcome",
        }))
        .unwrap();

        let copy = template.duplicate_as("Welcome (Copy)".to_string(), &[], Utc::now());
        assert_ne!(copy.id, template.id);
        assert!(uuid::Uuid::parse_str(&copy.id).is_ok());
    }

    #[test]
    fn test_keep_identity_restores_key() {
        let original = campaign(4, "Spring");
        let mut edited = campaign(99, "Spring 2");

        edited.keep_identity(&original);
        assert_eq!(edited.id, 4);
        assert_eq!(edited.name, "Spring 2");
    }
}
