use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lossy description of an attached file. The bytes themselves are
/// never persisted, only this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    /// MIME type, serialized as `type` in the stored payload.
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
    /// Displayable handle for image attachments, derived at attach
    /// time. Valid only while the backing file exists; a restored
    /// entry keeps whatever handle was stored without revalidating it.
    pub preview: Option<String>,
}

impl FileMetadata {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// One recorded study session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub topic: String,
    pub notes: String,
    pub files: Vec<FileMetadata>,
    // Set once at creation; edits never touch it
    pub date: DateTime<Utc>,
}

impl Entry {
    pub fn new(topic: String, notes: String, files: Vec<FileMetadata>) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic,
            notes,
            files,
            date: Utc::now(),
        }
    }
}
