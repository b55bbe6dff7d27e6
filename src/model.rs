// Core structs: JobRecord, JobIdentifier and the error enums
use std::fmt;
use thiserror::Error;

pub const TITLE_NOT_FOUND: &str = "Job Listing (Title not found)";
pub const COMPANY_NOT_FOUND: &str = "Company not found";
pub const UNKNOWN: &str = "Unknown";

/// One listing as extracted from the results page.
///
/// `link` is the only field that is always meaningful; every other field
/// may hold one of the placeholder constants above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    pub time_posted: String,
}

impl JobRecord {
    pub fn has_location(&self) -> bool {
        !is_placeholder(&self.location)
    }

    pub fn has_time_posted(&self) -> bool {
        !is_placeholder(&self.time_posted)
    }
}

pub fn is_placeholder(value: &str) -> bool {
    value.is_empty() || value == UNKNOWN || value == TITLE_NOT_FOUND || value == COMPANY_NOT_FOUND
}

/// Dedup key derived from a `JobRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobIdentifier(pub String);

impl fmt::Display for JobIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("failed to start page session: {0}")]
    Launch(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("script execution failed: {0}")]
    Script(String),
    #[error("harvest task aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    Address(String),
    #[error("failed to build message: {0}")]
    Message(String),
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required settings: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
