//! # Visibility Policy
//!
//! Pure capability computation for community content. Every view asks this
//! module what to display and what actions to offer; no permission logic
//! lives anywhere else. Denial happens here, before any mutation is
//! attempted.

use ss_core::models::{Role, UserAccount};
use uuid::Uuid;

/// The actor looking at a piece of content. `None` means unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub id: Uuid,
    pub role: Role,
}

impl From<&UserAccount> for Viewer {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id,
            role: account.role,
        }
    }
}

/// Authorship attributes of the content being rendered.
#[derive(Debug, Clone, Copy)]
pub struct Authorship<'a> {
    pub author_id: Uuid,
    pub author_name: &'a str,
    pub is_anonymous: bool,
}

/// What one viewer may see and do with one piece of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentCapabilities {
    pub display_name: String,
    pub can_report: bool,
    pub can_moderate: bool,
    pub can_delete: bool,
}

/// Computes the full capability set for a viewer/content pair.
pub fn evaluate(viewer: Option<Viewer>, content: &Authorship<'_>) -> ContentCapabilities {
    ContentCapabilities {
        display_name: display_name(viewer, content),
        can_report: can_report(viewer, content.author_id),
        can_moderate: can_moderate(viewer),
        can_delete: can_delete(viewer, content.author_id),
    }
}

/// The name shown for the content's author.
///
/// Anonymous content hides the author from everyone except the author
/// themselves and admins. Admins always see true authorship, so abuse
/// posted behind the anonymous flag stays attributable.
pub fn display_name(viewer: Option<Viewer>, content: &Authorship<'_>) -> String {
    let is_author = viewer.is_some_and(|v| v.id == content.author_id);
    let is_admin = viewer.is_some_and(|v| v.role == Role::Admin);

    if content.is_anonymous && !is_author && !is_admin {
        return "Anonymous".to_string();
    }
    if is_author {
        return format!("{} (you)", content.author_name);
    }
    content.author_name.to_string()
}

/// Reporting requires authentication, excludes the content's own author,
/// and excludes admins (an admin acts through the moderation queue).
pub fn can_report(viewer: Option<Viewer>, author_id: Uuid) -> bool {
    match viewer {
        Some(v) => v.id != author_id && v.role != Role::Admin,
        None => false,
    }
}

/// Role gate only: admins and professionals moderate. Verification status
/// is deliberately not consulted.
pub fn can_moderate(viewer: Option<Viewer>) -> bool {
    matches!(
        viewer,
        Some(Viewer {
            role: Role::Admin | Role::Professional,
            ..
        })
    )
}

/// Authors may delete their own content; moderators may delete anything.
pub fn can_delete(viewer: Option<Viewer>, author_id: Uuid) -> bool {
    viewer.is_some_and(|v| v.id == author_id) || can_moderate(viewer)
}
