/// Import/export of the reading list as a JSON file
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::link::Link;

/// One entry of an imported file. Older exports were plain URL strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ArchiveEntry {
    Url(String),
    Link(Link),
}

impl From<ArchiveEntry> for Link {
    fn from(entry: ArchiveEntry) -> Link {
        match entry {
            ArchiveEntry::Url(url) => Link::new(url),
            ArchiveEntry::Link(link) => link,
        }
    }
}

/// Parse an exported file. Entries with an empty URL are dropped.
pub fn parse_archive(json: &str) -> Result<Vec<Link>> {
    let entries: Vec<ArchiveEntry> = serde_json::from_str(json)?;

    Ok(entries
        .into_iter()
        .map(Link::from)
        .filter(|link| {
            let keep = !link.url.trim().is_empty();
            if !keep {
                log::warn!("Skipping imported entry without a URL");
            }
            keep
        })
        .collect())
}

pub fn export_archive(links: &[Link]) -> Result<String> {
    Ok(serde_json::to_string_pretty(links)?)
}

/// `reading-list_<ISO 8601 timestamp>.json`
pub fn export_filename(iso_timestamp: &str) -> String {
    format!("reading-list_{}.json", iso_timestamp)
}
