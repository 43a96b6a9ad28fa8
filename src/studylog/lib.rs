//! # Studylog Architecture
//!
//! Studylog is a **UI-agnostic study tracking library** with a CLI
//! client. The core never assumes a terminal: it takes plain Rust
//! arguments, returns `Result` types, and leaves all presentation to
//! whoever drives it.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                              │
//! │  - Parses arguments, formats output, handles exit codes    │
//! │  - The ONLY place that knows about stdout/stderr           │
//! └────────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Draft Session (draft.rs)                                  │
//! │  - Transient form state: topic, notes, staged files        │
//! │  - Validates and reconciles into the store on submit       │
//! └────────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │  Entry Store (store/)                                      │
//! │  - Ordered, persisted entry sequence; create/update/delete │
//! │  - Abstract StorageSlot: FileSlot (prod), MemorySlot (test)│
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principles
//!
//! - **One mutation per submit.** A draft folds into the store as a
//!   single create or update; the presentation layer never touches the
//!   entry sequence directly.
//! - **Fail-soft persistence.** Storage failures degrade the session
//!   to memory-only and are surfaced as a [`store::PersistenceFault`],
//!   never as a crash. See [`store`] for the details.
//! - **Metadata, not bytes.** Attached files are persisted as a lossy
//!   name/type/size/preview projection ([`files`]); the bytes stay on
//!   disk where they were.
//!
//! ## Module Overview
//!
//! - [`model`]: Core data types (`Entry`, `FileMetadata`)
//! - [`store`]: Storage abstraction and the entry store
//! - [`draft`]: Draft session and submit reconciliation
//! - [`files`]: Staged file handles and metadata projection
//! - [`error`]: Error types

pub mod draft;
pub mod error;
pub mod files;
pub mod model;
pub mod store;
