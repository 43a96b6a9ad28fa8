use std::cell::RefCell;

use super::StorageSlot;
use crate::error::{Result, StudylogError};

/// In-memory slot for tests and memory-only sessions.
#[derive(Debug, Default)]
pub struct MemorySlot {
    payload: RefCell<Option<String>>,
    fail_writes: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds a payload, as if written by a
    /// previous session.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RefCell::new(Some(payload.into())),
            ..Self::default()
        }
    }

    /// Current payload, if any.
    pub fn payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }

    /// A slot whose writes always fail, for exercising degraded
    /// persistence.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }
}

impl StorageSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.payload.borrow().clone())
    }

    fn write(&self, payload: &str) -> Result<()> {
        if self.fail_writes {
            return Err(StudylogError::Persistence(
                "memory slot is write-disabled".to_string(),
            ));
        }
        *self.payload.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}
