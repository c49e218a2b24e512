//! # Partition Keys
//!
//! Every partition in the record store has exactly one key; these builders
//! are the only place key strings are assembled. Per-owner partitions embed
//! the owner id, which is what makes cross-owner access impossible by
//! construction.

use uuid::Uuid;

pub const FORUM_POSTS: &str = "forum_posts";
pub const FORUM_REPLIES: &str = "forum_replies";
pub const FORUM_CATEGORIES: &str = "forum_categories";
pub const REPORTED_CONTENT: &str = "reported_content";
pub const PENDING_PROFESSIONALS: &str = "pending_professionals";
pub const USERS: &str = "users";
pub const CURRENT_USER: &str = "current_user";

/// Key of one owner's notification partition.
pub fn notifications(owner: Uuid) -> String {
    format!("notifications:{owner}")
}

/// Key of one owner's mood journal partition.
pub fn mood_entries(owner: Uuid) -> String {
    format!("mood_entries:{owner}")
}

/// Key of one owner's habit partition.
pub fn habits(owner: Uuid) -> String {
    format!("habits:{owner}")
}
