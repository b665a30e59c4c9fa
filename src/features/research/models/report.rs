use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata for one file in an intake batch; no bytes are kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub media_type: String,
}

/// Database model for a research report intake record
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct ResearchReport {
    pub id: Uuid,
    pub files: Json<Vec<FileDescriptor>>,
    pub uploader_name: Option<String>,
    pub uploader_email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a research report
#[derive(Debug, Clone)]
pub struct NewResearchReport {
    pub files: Vec<FileDescriptor>,
    pub uploader_name: Option<String>,
    pub uploader_email: Option<String>,
}
