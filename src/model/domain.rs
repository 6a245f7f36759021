//! Domain state - the portal dataset
//!
//! Mirrors the tables of the hosted portal backend. Derived fields on the
//! records (client names, list memberships, campaign progress) are
//! recomputed by `refresh_derived` after every load or mutation.

use super::records::{
    Campaign, CampaignContact, CampaignContactList, Client, Contact, ContactList,
    ContactListMember, EmailTemplate, PdfTemplate, SentEmail,
};
use super::ui::CampaignFilter;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Every table of the portal, as stored in the dataset file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalData {
    pub clients: Vec<Client>,
    pub campaigns: Vec<Campaign>,
    pub contacts: Vec<Contact>,
    pub contact_lists: Vec<ContactList>,
    pub contact_list_members: Vec<ContactListMember>,
    pub campaign_contacts: Vec<CampaignContact>,
    pub campaign_contact_lists: Vec<CampaignContactList>,
    pub sent_emails: Vec<SentEmail>,
    pub templates: Vec<EmailTemplate>,
    pub pdf_templates: Vec<PdfTemplate>,
}

impl PortalData {
    /// Recompute the derived, non-persisted fields of every record
    pub fn refresh_derived(&mut self) {
        let client_names: HashMap<i64, String> = self
            .clients
            .iter()
            .map(|c| (c.id, c.name.clone()))
            .collect();
        let client_name = |id: Option<i64>| id.and_then(|id| client_names.get(&id).cloned());

        let list_names: HashMap<i64, String> = self
            .contact_lists
            .iter()
            .map(|l| (l.id, l.name.clone()))
            .collect();

        for contact in &mut self.contacts {
            contact.full_name = contact.display_name();
            contact.client_name = client_name(contact.client_id);
            contact.contact_lists = self
                .contact_list_members
                .iter()
                .filter(|m| m.contact_id == contact.id)
                .filter_map(|m| list_names.get(&m.contact_list_id).cloned())
                .collect();
        }

        for list in &mut self.contact_lists {
            list.contact_count = self
                .contact_list_members
                .iter()
                .filter(|m| m.contact_list_id == list.id)
                .map(|m| m.contact_id)
                .collect::<HashSet<_>>()
                .len();
        }

        for campaign in &mut self.campaigns {
            campaign.progress.total_contacts = self
                .campaign_contacts
                .iter()
                .filter(|cc| cc.campaign_id == campaign.id)
                .count();
            campaign.progress.sent_emails = self
                .sent_emails
                .iter()
                .filter(|e| e.campaign_id == campaign.id)
                .count();
        }

        for template in &mut self.templates {
            template.campaigns = self
                .campaigns
                .iter()
                .filter(|c| c.template_id.as_deref() == Some(template.id.as_str()))
                .map(|c| c.name.clone())
                .collect();
        }

        for pdf in &mut self.pdf_templates {
            pdf.client_name = client_name(pdf.client_id);
        }
    }

    /// Campaigns shown under `filter`, in dataset order
    pub fn filtered_campaigns(&self, filter: CampaignFilter) -> Vec<Campaign> {
        self.campaigns
            .iter()
            .filter(|c| filter.matches(c.status.as_deref()))
            .cloned()
            .collect()
    }

    /// Remove a campaign's contact and contact-list links
    pub fn unlink_campaign(&mut self, campaign_id: i64) {
        self.campaign_contacts.retain(|cc| cc.campaign_id != campaign_id);
        self.campaign_contact_lists
            .retain(|cl| cl.campaign_id != campaign_id);
    }

    /// Remove a contact from every list and campaign
    pub fn unlink_contact(&mut self, contact_id: i64) {
        self.contact_list_members.retain(|m| m.contact_id != contact_id);
        self.campaign_contacts.retain(|cc| cc.contact_id != contact_id);
    }

    /// Remove a contact list's memberships and campaign links
    pub fn unlink_contact_list(&mut self, list_id: i64) {
        self.contact_list_members
            .retain(|m| m.contact_list_id != list_id);
        self.campaign_contact_lists
            .retain(|cl| cl.contact_list_id != list_id);
    }

    /// Clear template references held by campaigns
    pub fn unlink_template(&mut self, template_id: &str) {
        for campaign in &mut self.campaigns {
            if campaign.template_id.as_deref() == Some(template_id) {
                campaign.template_id = None;
            }
        }
    }

    /// Remove a PDF template from the templates that attach it
    pub fn unlink_pdf_template(&mut self, pdf_id: i64) {
        for template in &mut self.templates {
            template.pdf_template_ids.retain(|id| *id != pdf_id);
        }
    }
}
