use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::normalize::NormalizedUrl;

/// Raw HTML retrieved for a normalized URL
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// URL after redirects
    pub final_url: NormalizedUrl,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}

/// A hyperlink found on a page; `href` is absolute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub text: String,
    pub href: String,
}

/// An image found on a page; `src` is absolute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub alt: String,
    pub src: String,
}

/// Heading text grouped by level, each in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    pub const LEVELS: [&'static str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

    pub fn level_mut(&mut self, level: &str) -> Option<&mut Vec<String>> {
        match level {
            "h1" => Some(&mut self.h1),
            "h2" => Some(&mut self.h2),
            "h3" => Some(&mut self.h3),
            "h4" => Some(&mut self.h4),
            "h5" => Some(&mut self.h5),
            "h6" => Some(&mut self.h6),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.h1.is_empty()
            && self.h2.is_empty()
            && self.h3.is_empty()
            && self.h4.is_empty()
            && self.h5.is_empty()
            && self.h6.is_empty()
    }
}

/// Full-fidelity summary of a scraped page.
///
/// Every field is always present; missing data is represented by empty values.
/// Deserialization fills absent fields with their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionResult {
    pub url: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub headings: Headings,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub text: String,
    /// Open Graph, Twitter Card and `author` values keyed by their raw name
    pub metadata: BTreeMap<String, String>,
    /// Parsed JSON-LD blocks in document order
    pub structured_data: Vec<serde_json::Value>,
    pub scraped_at: DateTime<Utc>,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self {
            url: String::new(),
            title: String::new(),
            description: String::new(),
            keywords: Vec::new(),
            headings: Headings::default(),
            links: Vec::new(),
            images: Vec::new(),
            text: String::new(),
            metadata: BTreeMap::new(),
            structured_data: Vec::new(),
            scraped_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// The `h1`/`h2` headings kept in a refined record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainHeadings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
}

/// The four metadata values kept in a refined record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedMetadata {
    pub author: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
}

/// Bounded, storage-safe projection of an [`ExtractionResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub main_headings: MainHeadings,
    pub important_links: Vec<Link>,
    /// Number of images on the page, not just the ones kept
    pub image_count: usize,
    pub main_images: Vec<Image>,
    pub text_preview: String,
    pub metadata: RefinedMetadata,
    pub structured_data_count: usize,
    pub scraped_at: DateTime<Utc>,
}
