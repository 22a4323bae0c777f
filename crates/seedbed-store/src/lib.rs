//! Store contracts and the generation session for Seedbed.
//!
//! The document store and notification surface are collaborators, not part
//! of this workspace: this crate defines the traits they implement, an
//! in-memory store for tests and demos, and [`GenerationSession`], which
//! carries one editor session from manifest events through commit.

pub mod client;
pub mod memory;
pub mod notify;
pub mod session;

pub use client::{BatchReceipt, StoreClient, StoreError};
pub use memory::InMemoryStore;
pub use notify::{Notification, NotificationSink, NotificationStatus, NullSink, RecordingSink};
pub use session::{CommitReceipt, GenerationSession, SessionError};
