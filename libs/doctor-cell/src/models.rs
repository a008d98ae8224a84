use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use shared_config::AppConfig;

use crate::services::matching::normalize_text;

// One row of the roster, as loaded from the CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub full_name: String,
    pub specialty: String,
    pub practice_mode: String,
    pub professional_address: String,
    pub phone: String,
    pub governorate: String,
}

// ==============================================================================
// REQUEST DTOs
// ==============================================================================

/// Body of both search endpoints.
///
/// Field types are coerced rather than enforced: a non-string `name` is
/// ignored, a `page` of `-3` or `"abc"` falls back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorQuery {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub specialty: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub governorate: Option<String>,
    #[serde(default, deserialize_with = "lenient_positive")]
    pub page: Option<usize>,
    #[serde(default, deserialize_with = "lenient_positive")]
    pub size: Option<usize>,
}

/// `?page=&size=` on the list endpoint. Body values win over these.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    pub size: Option<String>,
}

impl PaginationParams {
    pub fn page(&self) -> Option<usize> {
        self.page.as_deref().and_then(parse_positive)
    }

    pub fn size(&self) -> Option<usize> {
        self.size.as_deref().and_then(parse_positive)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Null => None,
        other => {
            tracing::debug!("Ignoring non-string query field: {}", other);
            None
        }
    })
}

fn lenient_positive<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0),
        Value::String(text) => parse_positive(&text),
        _ => None,
    })
}

fn parse_positive(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

// ==============================================================================
// NORMALIZED CRITERIA AND PAGINATION
// ==============================================================================

/// Query text fields folded to the same form as the roster keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub governorate: Option<String>,
}

impl From<&DoctorQuery> for SearchCriteria {
    fn from(query: &DoctorQuery) -> Self {
        let fold = |field: &Option<String>| {
            field
                .as_deref()
                .map(normalize_text)
                .filter(|normalized| !normalized.is_empty())
        };

        Self {
            name: fold(&query.name),
            specialty: fold(&query.specialty),
            governorate: fold(&query.governorate),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub size: usize,
}

impl Pagination {
    /// Missing or non-positive values take the defaults; sizes above the
    /// configured maximum are clamped.
    pub fn resolve(page: Option<usize>, size: Option<usize>, config: &AppConfig) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let mut size = size.filter(|s| *s > 0).unwrap_or(config.default_page_size);

        if size > config.max_page_size {
            tracing::warn!(
                "Requested page size {} exceeds maximum {}, clamping",
                size,
                config.max_page_size
            );
            size = config.max_page_size;
        }

        Self { page, size }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.size)
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.size)
    }
}

// ==============================================================================
// RESPONSE DTOs
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    pub doctors: Vec<DoctorRecord>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSearchResponse {
    pub doctors: Vec<DoctorRecord>,
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub result: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
    pub status: String,
    pub data_loaded: bool,
    pub record_count: usize,
}

// Error types specific to roster loading
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Roster file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to open roster file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed roster CSV: {0}")]
    Csv(#[from] csv::Error),
}
