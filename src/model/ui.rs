//! UI state - page tabs and record references

use std::fmt;

/// Page (tab) selection in the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Campaigns,
    Contacts,
    ContactLists,
    Templates,
    PdfTemplates,
}

impl Page {
    pub fn all() -> Vec<Page> {
        vec![
            Page::Campaigns,
            Page::Contacts,
            Page::ContactLists,
            Page::Templates,
            Page::PdfTemplates,
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            Page::Campaigns => "Campaigns",
            Page::Contacts => "Contacts",
            Page::ContactLists => "Contact Lists",
            Page::Templates => "Templates",
            Page::PdfTemplates => "PDF Templates",
        }
    }

    /// Singular label used in notifications and dialogs
    pub fn record_label(&self) -> &str {
        match self {
            Page::Campaigns => "Campaign",
            Page::Contacts => "Contact",
            Page::ContactLists => "Contact list",
            Page::Templates => "Template",
            Page::PdfTemplates => "PDF template",
        }
    }

    /// Short name used for export file names
    pub fn slug(&self) -> &str {
        match self {
            Page::Campaigns => "campaigns",
            Page::Contacts => "contacts",
            Page::ContactLists => "contact-lists",
            Page::Templates => "templates",
            Page::PdfTemplates => "pdf-templates",
        }
    }

    pub fn next(self) -> Page {
        let pages = Page::all();
        let index = pages.iter().position(|p| *p == self).unwrap_or(0);
        pages[(index + 1) % pages.len()]
    }

    pub fn previous(self) -> Page {
        let pages = Page::all();
        let index = pages.iter().position(|p| *p == self).unwrap_or(0);
        pages[(index + pages.len() - 1) % pages.len()]
    }
}

/// Which campaigns the campaigns page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampaignFilter {
    #[default]
    Active,
    Archived,
}

impl CampaignFilter {
    pub fn toggled(self) -> Self {
        match self {
            CampaignFilter::Active => CampaignFilter::Archived,
            CampaignFilter::Archived => CampaignFilter::Active,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CampaignFilter::Active => "Active",
            CampaignFilter::Archived => "Archived",
        }
    }

    /// Whether a campaign with this status belongs on the filtered page
    pub fn matches(&self, status: Option<&str>) -> bool {
        let archived = status == Some("archived");
        match self {
            CampaignFilter::Active => !archived,
            CampaignFilter::Archived => archived,
        }
    }
}

/// Identifies one record on one page
///
/// Grid handlers answer with a `RecordRef` rather than the record itself so
/// the intent can travel through the action queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    pub page: Page,
    pub key: String,
    pub name: String,
}

impl RecordRef {
    pub fn new(page: Page, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            page,
            key: key.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.page.slug(), self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_cycle_wraps() {
        assert_eq!(Page::Campaigns.next(), Page::Contacts);
        assert_eq!(Page::PdfTemplates.next(), Page::Campaigns);
        assert_eq!(Page::Campaigns.previous(), Page::PdfTemplates);
    }

    #[test]
    fn test_campaign_filter_matches_status() {
        assert!(CampaignFilter::Active.matches(Some("draft")));
        assert!(CampaignFilter::Active.matches(None));
        assert!(!CampaignFilter::Active.matches(Some("archived")));
        assert!(CampaignFilter::Archived.matches(Some("archived")));
        assert!(!CampaignFilter::Archived.matches(Some("active")));
    }
}
