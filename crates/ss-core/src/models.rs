//! # Domain Models
//!
//! These structs represent the core entities of SoulSync.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role. `Admin` accounts are seeded, never registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Professional,
    Admin,
}

/// A registered account. The `users` partition is the single source of
/// truth for "who is asking"; everything else is keyed off `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, produced by the `CredentialHasher` plugin.
    pub password_hash: String,
    pub role: Role,
    /// Professionals start unverified and go through the pending queue.
    pub is_verified: bool,
    pub occupation: Option<String>,
    /// Reference to the uploaded credential document (opaque to the core).
    pub identity_document: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Post,
    Reply,
    Like,
    Verification,
    Report,
    System,
    User,
    Admin,
}

/// One entry in an owner's notification partition.
///
/// `message` and `created_at` are immutable after creation; `read` starts
/// false and only ever flips to true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    /// Owner. The ledger never returns or mutates records whose owner
    /// does not match the caller.
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    /// Referenced entity (post, reply, account), when there is one.
    pub target_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// A forum category. `posts` is a denormalized counter maintained by
/// increment on post creation, never recomputed from a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumCategory {
    /// URL slug (e.g., "general", "anxiety-support").
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub posts: u32,
}

/// A top-level forum post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: Uuid,
    pub author_id: Uuid,
    /// Real author name, denormalized at creation. The Visibility Policy
    /// decides whether a viewer sees this or "Anonymous".
    pub author_name: String,
    pub author_role: Role,
    /// Whether the author was a verified professional at posting time.
    pub author_verified: bool,
    pub is_anonymous: bool,
    pub title: String,
    pub content: String,
    pub category_id: String,
    pub category_name: String,
    /// Increment-only counters; the stored value is authoritative.
    pub likes: u32,
    pub replies: u32,
    pub is_reported: bool,
    pub created_at: DateTime<Utc>,
}

/// A reply to a forum post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForumReply {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_role: Role,
    pub author_verified: bool,
    pub is_anonymous: bool,
    pub content: String,
    pub likes: u32,
    pub is_reported: bool,
    pub created_at: DateTime<Utc>,
}

/// Which kind of content a report points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Reply,
}

/// Report lifecycle: `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    /// Dismissed by a moderator; content kept.
    Reviewed,
    /// Acted on by a moderator; content removed.
    Resolved,
}

/// A user-filed report against a post or reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub content_id: Uuid,
    pub content_kind: ContentKind,
    pub reported_by: Uuid,
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// Queue entry for a professional awaiting credential review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingProfessional {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub occupation: String,
    pub identity_document: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// One mood journal entry. Owner-partitioned like notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    /// 1 (lowest) through 5 (highest); validated at the service edge.
    pub mood: u8,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A tracked habit with a consecutive-day streak.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Length of the current run of consecutive completed days.
    pub streak: u32,
    /// Every day this habit was completed, in completion order.
    pub completed_on: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// The most recent day this habit was completed, if any.
    pub fn last_completed(&self) -> Option<NaiveDate> {
        self.completed_on.iter().max().copied()
    }
}
