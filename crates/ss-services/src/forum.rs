//! # Community Forum
//!
//! Categories, posts, replies, likes, and reporting over the global
//! forum partitions. Counters (`category.posts`, `post.replies`, `likes`)
//! are denormalized: incremented at write time and trusted at read time,
//! never recomputed from a scan.

use std::sync::Arc;

use chrono::Utc;
use ss_core::error::{AppError, Result};
use ss_core::keys;
use ss_core::models::{
    ContentKind, ForumCategory, ForumPost, ForumReply, NotificationKind, Report, ReportStatus,
    Role, UserAccount,
};
use ss_core::traits::RecordStore;
use uuid::Uuid;

use crate::notifications::NotificationLedger;
use crate::records;
use crate::visibility::{self, Viewer};

/// Post creation form input.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category_id: String,
    pub is_anonymous: bool,
}

#[derive(Clone)]
pub struct ForumService {
    store: Arc<dyn RecordStore>,
    ledger: NotificationLedger,
}

impl ForumService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            ledger: NotificationLedger::new(store.clone()),
            store,
        }
    }

    pub async fn categories(&self) -> Result<Vec<ForumCategory>> {
        records::load(&*self.store, keys::FORUM_CATEGORIES).await
    }

    /// Adds a category. Admin only; the slug is derived from the name.
    pub async fn create_category(
        &self,
        actor: &UserAccount,
        name: &str,
        description: Option<&str>,
    ) -> Result<ForumCategory> {
        if actor.role != Role::Admin {
            return Err(AppError::Unauthorized(
                "only admins manage categories".into(),
            ));
        }
        if name.trim().is_empty() {
            return Err(AppError::Validation("category name is required".into()));
        }

        let slug = slugify(name);
        let mut categories: Vec<ForumCategory> =
            records::load(&*self.store, keys::FORUM_CATEGORIES).await?;
        if categories.iter().any(|c| c.id == slug) {
            return Err(AppError::Conflict(format!(
                "category \"{slug}\" already exists"
            )));
        }

        let category = ForumCategory {
            id: slug,
            name: name.trim().to_string(),
            description: description.map(str::to_string),
            posts: 0,
        };
        categories.push(category.clone());
        records::save(&*self.store, keys::FORUM_CATEGORIES, &categories).await?;
        Ok(category)
    }

    /// Creates a post and bumps the category's denormalized post count.
    pub async fn create_post(&self, author: &UserAccount, new_post: NewPost) -> Result<ForumPost> {
        if new_post.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".into()));
        }
        if new_post.content.trim().is_empty() {
            return Err(AppError::Validation("content is required".into()));
        }

        let mut categories: Vec<ForumCategory> =
            records::load(&*self.store, keys::FORUM_CATEGORIES).await?;
        let category = categories
            .iter_mut()
            .find(|c| c.id == new_post.category_id)
            .ok_or_else(|| {
                AppError::NotFound("Category".into(), new_post.category_id.clone())
            })?;

        let post = ForumPost {
            id: Uuid::now_v7(),
            author_id: author.id,
            author_name: author.username.clone(),
            author_role: author.role,
            author_verified: author.is_verified,
            is_anonymous: new_post.is_anonymous,
            title: new_post.title.trim().to_string(),
            content: new_post.content,
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            likes: 0,
            replies: 0,
            is_reported: false,
            created_at: Utc::now(),
        };

        let mut posts: Vec<ForumPost> = records::load(&*self.store, keys::FORUM_POSTS).await?;
        posts.push(post.clone());
        records::save(&*self.store, keys::FORUM_POSTS, &posts).await?;

        category.posts += 1;
        records::save(&*self.store, keys::FORUM_CATEGORIES, &categories).await?;

        Ok(post)
    }

    /// Posts in one category, newest-first.
    pub async fn posts_in_category(&self, category_id: &str) -> Result<Vec<ForumPost>> {
        let mut posts: Vec<ForumPost> = records::load(&*self.store, keys::FORUM_POSTS).await?;
        posts.retain(|p| p.category_id == category_id);
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    /// Lookup for primary navigation: absence is a surfaced error.
    pub async fn get_post(&self, id: Uuid) -> Result<ForumPost> {
        let posts: Vec<ForumPost> = records::load(&*self.store, keys::FORUM_POSTS).await?;
        posts
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Post".into(), id.to_string()))
    }

    /// Replies to one post, in conversation (oldest-first) order.
    pub async fn replies_for(&self, post_id: Uuid) -> Result<Vec<ForumReply>> {
        let mut replies: Vec<ForumReply> =
            records::load(&*self.store, keys::FORUM_REPLIES).await?;
        replies.retain(|r| r.post_id == post_id);
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(replies)
    }

    /// Creates a reply, bumps the post's reply counter, and notifies the
    /// post author (unless they replied to themselves).
    pub async fn create_reply(
        &self,
        author: &UserAccount,
        post_id: Uuid,
        content: &str,
        is_anonymous: bool,
    ) -> Result<ForumReply> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("content is required".into()));
        }

        let mut posts: Vec<ForumPost> = records::load(&*self.store, keys::FORUM_POSTS).await?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| AppError::NotFound("Post".into(), post_id.to_string()))?;

        let reply = ForumReply {
            id: Uuid::now_v7(),
            post_id,
            author_id: author.id,
            author_name: author.username.clone(),
            author_role: author.role,
            author_verified: author.is_verified,
            is_anonymous,
            content: content.to_string(),
            likes: 0,
            is_reported: false,
            created_at: Utc::now(),
        };

        let mut replies: Vec<ForumReply> =
            records::load(&*self.store, keys::FORUM_REPLIES).await?;
        replies.push(reply.clone());
        records::save(&*self.store, keys::FORUM_REPLIES, &replies).await?;

        post.replies += 1;
        let post_author = post.author_id;
        let message = format!("New reply on your post \"{}\"", post.title);
        records::save(&*self.store, keys::FORUM_POSTS, &posts).await?;

        if post_author != author.id {
            self.ledger
                .append(post_author, NotificationKind::Reply, &message, Some(post_id))
                .await?;
        }
        Ok(reply)
    }

    /// Increments a post's like counter and notifies its author.
    pub async fn like_post(&self, actor: &UserAccount, post_id: Uuid) -> Result<()> {
        let mut posts: Vec<ForumPost> = records::load(&*self.store, keys::FORUM_POSTS).await?;
        let post = posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| AppError::NotFound("Post".into(), post_id.to_string()))?;

        post.likes += 1;
        let post_author = post.author_id;
        let message = format!("Someone liked your post \"{}\"", post.title);
        records::save(&*self.store, keys::FORUM_POSTS, &posts).await?;

        if post_author != actor.id {
            self.ledger
                .append(post_author, NotificationKind::Like, &message, Some(post_id))
                .await?;
        }
        Ok(())
    }

    pub async fn like_reply(&self, actor: &UserAccount, reply_id: Uuid) -> Result<()> {
        let mut replies: Vec<ForumReply> =
            records::load(&*self.store, keys::FORUM_REPLIES).await?;
        let reply = replies
            .iter_mut()
            .find(|r| r.id == reply_id)
            .ok_or_else(|| AppError::NotFound("Reply".into(), reply_id.to_string()))?;

        reply.likes += 1;
        let reply_author = reply.author_id;
        records::save(&*self.store, keys::FORUM_REPLIES, &replies).await?;

        if reply_author != actor.id {
            self.ledger
                .append(
                    reply_author,
                    NotificationKind::Like,
                    "Someone liked your reply",
                    Some(reply_id),
                )
                .await?;
        }
        Ok(())
    }

    /// Files a report against a post or reply and flags the content.
    /// The reporter's capability is checked here, before any write.
    pub async fn report_content(
        &self,
        reporter: &UserAccount,
        content_id: Uuid,
        kind: ContentKind,
        reason: &str,
    ) -> Result<Report> {
        if reason.trim().is_empty() {
            return Err(AppError::Validation("a reason is required".into()));
        }

        match kind {
            ContentKind::Post => {
                let mut posts: Vec<ForumPost> =
                    records::load(&*self.store, keys::FORUM_POSTS).await?;
                let post = posts
                    .iter_mut()
                    .find(|p| p.id == content_id)
                    .ok_or_else(|| AppError::NotFound("Post".into(), content_id.to_string()))?;
                let author_id = post.author_id;
                if !visibility::can_report(Some(Viewer::from(reporter)), author_id) {
                    return Err(AppError::Unauthorized("reporting not permitted".into()));
                }
                post.is_reported = true;
                records::save(&*self.store, keys::FORUM_POSTS, &posts).await?;
            }
            ContentKind::Reply => {
                let mut replies: Vec<ForumReply> =
                    records::load(&*self.store, keys::FORUM_REPLIES).await?;
                let reply = replies
                    .iter_mut()
                    .find(|r| r.id == content_id)
                    .ok_or_else(|| AppError::NotFound("Reply".into(), content_id.to_string()))?;
                let author_id = reply.author_id;
                if !visibility::can_report(Some(Viewer::from(reporter)), author_id) {
                    return Err(AppError::Unauthorized("reporting not permitted".into()));
                }
                reply.is_reported = true;
                records::save(&*self.store, keys::FORUM_REPLIES, &replies).await?;
            }
        }

        let report = Report {
            id: Uuid::now_v7(),
            content_id,
            content_kind: kind,
            reported_by: reporter.id,
            reason: reason.trim().to_string(),
            status: ReportStatus::Pending,
            created_at: Utc::now(),
        };
        let mut reports: Vec<Report> =
            records::load(&*self.store, keys::REPORTED_CONTENT).await?;
        reports.push(report.clone());
        records::save(&*self.store, keys::REPORTED_CONTENT, &reports).await?;
        Ok(report)
    }

    /// Deletion primitive used by moderation and by author self-deletes
    /// (callers gate through the visibility policy). Removing a post
    /// cascades to its replies; removing nothing is a no-op.
    pub async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let mut posts: Vec<ForumPost> = records::load(&*self.store, keys::FORUM_POSTS).await?;
        let before = posts.len();
        posts.retain(|p| p.id != post_id);
        let existed = posts.len() != before;
        if existed {
            records::save(&*self.store, keys::FORUM_POSTS, &posts).await?;
        }

        let mut replies: Vec<ForumReply> =
            records::load(&*self.store, keys::FORUM_REPLIES).await?;
        let before = replies.len();
        replies.retain(|r| r.post_id != post_id);
        if replies.len() != before {
            records::save(&*self.store, keys::FORUM_REPLIES, &replies).await?;
        }
        Ok(existed)
    }

    pub async fn delete_reply(&self, reply_id: Uuid) -> Result<bool> {
        let mut replies: Vec<ForumReply> =
            records::load(&*self.store, keys::FORUM_REPLIES).await?;
        let before = replies.len();
        replies.retain(|r| r.id != reply_id);
        let existed = replies.len() != before;
        if existed {
            records::save(&*self.store, keys::FORUM_REPLIES, &replies).await?;
        }
        Ok(existed)
    }
}

fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ss_core::models::Role;
    use ss_store_memory::MemoryRecordStore;

    fn account(role: Role) -> UserAccount {
        UserAccount {
            id: Uuid::now_v7(),
            username: "casey".into(),
            email: "casey@example.com".into(),
            password_hash: String::new(),
            role,
            is_verified: role == Role::Admin,
            occupation: None,
            identity_document: None,
            created_at: Utc::now(),
        }
    }

    async fn forum_with_general() -> (ForumService, UserAccount) {
        let store = Arc::new(MemoryRecordStore::new());
        let forum = ForumService::new(store);
        let admin = account(Role::Admin);
        forum
            .create_category(&admin, "General", Some("Open discussion"))
            .await
            .unwrap();
        (forum, admin)
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("General"), "general");
        assert_eq!(slugify("Anxiety  Support!"), "anxiety-support");
    }

    #[tokio::test]
    async fn test_new_post_round_trip_bumps_category_counter() {
        let (forum, _) = forum_with_general().await;
        let author = account(Role::User);

        forum
            .create_post(
                &author,
                NewPost {
                    title: "T".into(),
                    content: "C".into(),
                    category_id: "general".into(),
                    is_anonymous: false,
                },
            )
            .await
            .unwrap();

        let listed = forum.posts_in_category("general").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "T");
        assert_eq!(listed[0].replies, 0);

        let categories = forum.categories().await.unwrap();
        assert_eq!(categories[0].posts, 1);
    }

    #[tokio::test]
    async fn test_post_into_missing_category_is_not_found() {
        let (forum, _) = forum_with_general().await;
        let err = forum
            .create_post(
                &account(Role::User),
                NewPost {
                    title: "T".into(),
                    content: "C".into(),
                    category_id: "nope".into(),
                    is_anonymous: false,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)));
    }

    #[tokio::test]
    async fn test_reply_bumps_counter_and_notifies_author() {
        let (forum, _) = forum_with_general().await;
        let author = account(Role::User);
        let replier = account(Role::User);

        let post = forum
            .create_post(
                &author,
                NewPost {
                    title: "Rough week".into(),
                    content: "...".into(),
                    category_id: "general".into(),
                    is_anonymous: false,
                },
            )
            .await
            .unwrap();

        forum
            .create_reply(&replier, post.id, "Hang in there", false)
            .await
            .unwrap();

        assert_eq!(forum.get_post(post.id).await.unwrap().replies, 1);
        assert_eq!(forum.replies_for(post.id).await.unwrap().len(), 1);

        let ledger = NotificationLedger::new(Arc::clone(&forum.store));
        assert_eq!(ledger.unread_count(author.id).await.unwrap(), 1);
        // The replier got nothing.
        assert_eq!(ledger.unread_count(replier.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_self_reply_does_not_notify() {
        let (forum, _) = forum_with_general().await;
        let author = account(Role::User);
        let post = forum
            .create_post(
                &author,
                NewPost {
                    title: "Note to self".into(),
                    content: "...".into(),
                    category_id: "general".into(),
                    is_anonymous: false,
                },
            )
            .await
            .unwrap();

        forum
            .create_reply(&author, post.id, "Following up", false)
            .await
            .unwrap();

        let ledger = NotificationLedger::new(Arc::clone(&forum.store));
        assert_eq!(ledger.unread_count(author.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_likes_accumulate_and_notify_once_each() {
        let (forum, _) = forum_with_general().await;
        let author = account(Role::User);
        let fan = account(Role::User);
        let post = forum
            .create_post(
                &author,
                NewPost {
                    title: "Small win today".into(),
                    content: "...".into(),
                    category_id: "general".into(),
                    is_anonymous: false,
                },
            )
            .await
            .unwrap();

        forum.like_post(&fan, post.id).await.unwrap();
        forum.like_post(&fan, post.id).await.unwrap();
        assert_eq!(forum.get_post(post.id).await.unwrap().likes, 2);

        let ledger = NotificationLedger::new(Arc::clone(&forum.store));
        assert_eq!(ledger.unread_count(author.id).await.unwrap(), 2);

        // Liking your own post bumps the counter but stays silent.
        forum.like_post(&author, post.id).await.unwrap();
        assert_eq!(forum.get_post(post.id).await.unwrap().likes, 3);
        assert_eq!(ledger.unread_count(author.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_reply_likes_notify_the_reply_author() {
        let (forum, _) = forum_with_general().await;
        let author = account(Role::User);
        let replier = account(Role::User);
        let post = forum
            .create_post(
                &author,
                NewPost {
                    title: "Check-in".into(),
                    content: "...".into(),
                    category_id: "general".into(),
                    is_anonymous: false,
                },
            )
            .await
            .unwrap();
        let reply = forum
            .create_reply(&replier, post.id, "Proud of you", false)
            .await
            .unwrap();

        forum.like_reply(&author, reply.id).await.unwrap();
        let replies = forum.replies_for(post.id).await.unwrap();
        assert_eq!(replies[0].likes, 1);

        let ledger = NotificationLedger::new(Arc::clone(&forum.store));
        let inbox = ledger.list(replier.id).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].kind, NotificationKind::Like);
    }

    #[tokio::test]
    async fn test_report_flags_content_and_queues_pending_report() {
        let (forum, _) = forum_with_general().await;
        let author = account(Role::User);
        let reporter = account(Role::User);
        let post = forum
            .create_post(
                &author,
                NewPost {
                    title: "Spam".into(),
                    content: "buy now".into(),
                    category_id: "general".into(),
                    is_anonymous: false,
                },
            )
            .await
            .unwrap();

        let report = forum
            .report_content(&reporter, post.id, ContentKind::Post, "spam")
            .await
            .unwrap();
        assert_eq!(report.status, ReportStatus::Pending);
        assert!(forum.get_post(post.id).await.unwrap().is_reported);
    }

    #[tokio::test]
    async fn test_author_cannot_report_own_content() {
        let (forum, _) = forum_with_general().await;
        let author = account(Role::User);
        let post = forum
            .create_post(
                &author,
                NewPost {
                    title: "Mine".into(),
                    content: "...".into(),
                    category_id: "general".into(),
                    is_anonymous: false,
                },
            )
            .await
            .unwrap();

        let err = forum
            .report_content(&author, post.id, ContentKind::Post, "oops")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(!forum.get_post(post.id).await.unwrap().is_reported);
    }

    #[tokio::test]
    async fn test_delete_post_cascades_to_replies() {
        let (forum, _) = forum_with_general().await;
        let author = account(Role::User);
        let post = forum
            .create_post(
                &author,
                NewPost {
                    title: "Going away".into(),
                    content: "...".into(),
                    category_id: "general".into(),
                    is_anonymous: false,
                },
            )
            .await
            .unwrap();
        forum
            .create_reply(&account(Role::User), post.id, "bye", false)
            .await
            .unwrap();

        assert!(forum.delete_post(post.id).await.unwrap());
        assert!(forum.get_post(post.id).await.is_err());
        assert!(forum.replies_for(post.id).await.unwrap().is_empty());

        // Deleting again is a no-op.
        assert!(!forum.delete_post(post.id).await.unwrap());
    }
}
