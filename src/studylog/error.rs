use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StudylogError {
    #[error("Topic name is required")]
    TopicRequired,

    #[error("Entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, StudylogError>;
