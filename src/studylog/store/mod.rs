//! # Storage Layer
//!
//! The entry sequence lives in memory and is mirrored to a durable
//! slot after every mutation. Storage is abstracted behind the
//! [`StorageSlot`] trait:
//!
//! - [`fs::FileSlot`]: production storage, one JSON file in the user's
//!   data directory
//! - [`memory::MemorySlot`]: in-memory storage for tests and
//!   memory-only sessions
//!
//! Persistence is deliberately fail-soft. A slot that cannot be read
//! yields an empty store; a write that fails leaves the in-memory
//! sequence intact and records a [`PersistenceFault`] for the
//! presentation layer to surface. The store never loses an operation
//! over a storage failure, it only loses durability.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::error::{Result, StudylogError};
use crate::model::{Entry, FileMetadata};

pub mod fs;
pub mod memory;

/// Abstract interface to the durable slot holding the serialized
/// entry sequence. `read` returns `Ok(None)` when the slot has never
/// been written.
pub trait StorageSlot {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, payload: &str) -> Result<()>;
}

/// Recorded persistence failure. The store keeps running in memory;
/// this is the signal a presentation layer shows so degraded
/// durability is never silent.
#[derive(Debug, Clone)]
pub struct PersistenceFault {
    pub detail: String,
    pub at: DateTime<Utc>,
}

impl PersistenceFault {
    fn new(detail: String) -> Self {
        Self {
            detail,
            at: Utc::now(),
        }
    }
}

/// The authoritative, ordered collection of entries. Newest first:
/// the most recently created entry is at position 0, and editing an
/// entry never moves it.
pub struct EntryStore<S: StorageSlot> {
    slot: S,
    entries: Vec<Entry>,
    fault: Option<PersistenceFault>,
}

impl<S: StorageSlot> EntryStore<S> {
    /// Open the store, loading whatever the slot holds. An absent slot
    /// yields an empty sequence; an unreadable or malformed payload
    /// also yields an empty sequence and records a fault instead of
    /// failing.
    pub fn open(slot: S) -> Self {
        let mut fault = None;
        let entries = match slot.read() {
            Ok(None) => Vec::new(),
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(error = %e, "stored entries are unreadable, starting empty");
                    fault = Some(PersistenceFault::new(format!(
                        "stored entries are unreadable: {}",
                        e
                    )));
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(error = %e, "entry storage could not be read, starting empty");
                fault = Some(PersistenceFault::new(format!(
                    "entry storage could not be read: {}",
                    e
                )));
                Vec::new()
            }
        };
        Self {
            slot,
            entries,
            fault,
        }
    }

    /// Current sequence, newest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Active persistence fault, if the session is running memory-only.
    pub fn persistence_fault(&self) -> Option<&PersistenceFault> {
        self.fault.as_ref()
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Create a new entry at the front of the sequence.
    pub fn create(
        &mut self,
        topic: String,
        notes: String,
        files: Vec<FileMetadata>,
    ) -> Result<&Entry> {
        if topic.trim().is_empty() {
            return Err(StudylogError::TopicRequired);
        }
        let entry = Entry::new(topic, notes, files);
        self.entries.insert(0, entry);
        self.persist();
        Ok(&self.entries[0])
    }

    /// Replace an entry's mutable fields in place. Its id, creation
    /// date, and position are preserved.
    pub fn update(
        &mut self,
        id: Uuid,
        topic: String,
        notes: String,
        files: Vec<FileMetadata>,
    ) -> Result<&Entry> {
        if topic.trim().is_empty() {
            return Err(StudylogError::TopicRequired);
        }
        let pos = match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => pos,
            None => {
                warn!(%id, "update on unknown entry");
                return Err(StudylogError::EntryNotFound(id));
            }
        };
        let entry = &mut self.entries[pos];
        entry.topic = topic;
        entry.notes = notes;
        entry.files = files;
        self.persist();
        Ok(&self.entries[pos])
    }

    /// Remove an entry. The relative order of the others is unchanged.
    pub fn delete(&mut self, id: Uuid) -> Result<Entry> {
        let pos = self.entries.iter().position(|e| e.id == id).ok_or_else(|| {
            warn!(%id, "delete on unknown entry");
            StudylogError::EntryNotFound(id)
        })?;
        let removed = self.entries.remove(pos);
        self.persist();
        Ok(removed)
    }

    // Full-snapshot overwrite after every mutation, last writer wins.
    // Failure degrades to memory-only; the fault stays set until a
    // write succeeds.
    fn persist(&mut self) {
        let payload = match serde_json::to_string_pretty(&self.entries) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "entries could not be serialized");
                self.fault = Some(PersistenceFault::new(format!(
                    "entries could not be serialized: {}",
                    e
                )));
                return;
            }
        };
        match self.slot.write(&payload) {
            Ok(()) => self.fault = None,
            Err(e) => {
                warn!(error = %e, "entries could not be saved, continuing in memory");
                self.fault = Some(PersistenceFault::new(format!(
                    "entries could not be saved: {}",
                    e
                )));
            }
        }
    }
}
