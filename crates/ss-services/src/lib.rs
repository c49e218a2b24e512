//! # ss-services
//!
//! The domain logic of SoulSync, written against the `ss-core` ports.
//! Every service takes an `Arc<dyn RecordStore>` so callers can wire in
//! the in-memory adapter, the SQLite adapter, or anything else that
//! honors the whole-partition-per-key contract.

pub mod forum;
pub mod habits;
pub mod identity;
pub mod journal;
pub mod moderation;
pub mod notifications;
mod records;
pub mod verification;
pub mod visibility;

pub use forum::{ForumService, NewPost};
pub use habits::HabitTracker;
pub use identity::{IdentityService, NewRegistration};
pub use journal::MoodJournal;
pub use moderation::ModerationQueue;
pub use notifications::NotificationLedger;
pub use verification::VerificationQueue;
pub use visibility::{Authorship, ContentCapabilities, Viewer};
