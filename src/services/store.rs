//! Dataset persistence and record mutations
//!
//! The dataset file stands in for the hosted portal backend: it is read
//! whole, mutated in memory and written back after every change.

use crate::model::records::timestamp;
use crate::model::{PortalData, PortalRecord};
use crate::services::naming::next_copy_name;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Load and parse a dataset file, computing derived fields
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<PortalData> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;

    let mut data: PortalData = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
    data.refresh_derived();

    log::info!(
        "Loaded dataset {} ({} campaigns, {} contacts, {} lists, {} templates, {} pdf templates)",
        path.display(),
        data.campaigns.len(),
        data.contacts.len(),
        data.contact_lists.len(),
        data.templates.len(),
        data.pdf_templates.len()
    );
    Ok(data)
}

/// Write the dataset back to disk
pub fn save_dataset<P: AsRef<Path>>(path: P, data: &PortalData) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    let json = serde_json::to_string_pretty(data).context("Failed to serialize dataset")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    log::debug!("Saved dataset {}", path.display());
    Ok(())
}

/// Create an empty dataset file
pub fn create_dataset<P: AsRef<Path>>(path: P) -> Result<PortalData> {
    let data = PortalData::default();
    save_dataset(path, &data)?;
    Ok(data)
}

pub fn find<'a, R: PortalRecord>(records: &'a [R], key: &str) -> Option<&'a R> {
    records.iter().find(|r| r.key() == key)
}

fn position<R: PortalRecord>(records: &[R], key: &str) -> Result<usize> {
    records
        .iter()
        .position(|r| r.key() == key)
        .ok_or_else(|| anyhow!("Record {} no longer exists", key))
}

/// Insert a copy of the record at the front, named after the highest copy
pub fn duplicate_record<R: PortalRecord>(
    records: &mut Vec<R>,
    key: &str,
    now: DateTime<Utc>,
) -> Result<R> {
    let source = &records[position(records, key)?];
    let name = next_copy_name(source.name(), records.iter().map(|r| r.name()));
    let copy = source.duplicate_as(name, records.as_slice(), now);

    records.insert(0, copy.clone());
    Ok(copy)
}

/// Remove a record, returning it
pub fn delete_record<R: PortalRecord>(records: &mut Vec<R>, key: &str) -> Result<R> {
    let index = position(records, key)?;
    Ok(records.remove(index))
}

/// Replace a record with an edited version, keeping its identity
pub fn replace_record<R: PortalRecord>(
    records: &mut [R],
    key: &str,
    mut edited: R,
    now: DateTime<Utc>,
) -> Result<()> {
    let index = position(records, key)?;
    edited.keep_identity(&records[index]);
    edited.touch(now);
    records[index] = edited;
    Ok(())
}

/// Write a record to a JSON file for the external editor
pub fn write_edit_buffer<R: PortalRecord>(dir: &Path, prefix: &str, record: &R) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let path = dir.join(format!("{}-{}.json", prefix, record.key()));
    let json = serde_json::to_string_pretty(record).context("Failed to serialize record")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Read an edited record back from the editor's file
pub fn read_edit_buffer<R: PortalRecord>(path: &Path) -> Result<R> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).context("Edited record is not valid JSON for this page")
}

/// File name for a CSV export of one page
pub fn export_file_name(slug: &str, now: DateTime<Utc>) -> String {
    let stamp = timestamp(now).replace([':', '-'], "");
    format!("{}-{}.csv", slug, stamp)
}
