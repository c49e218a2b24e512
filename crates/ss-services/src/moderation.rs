//! # Moderation Queue
//!
//! A filtered view over the report partition plus the two transitions out
//! of `Pending`: dismiss (content kept) and remove (content deleted).
//! `Reviewed` and `Resolved` are terminal; acting on a terminal report is
//! a no-op, so a double-click in a moderation view is harmless.

use std::sync::Arc;

use ss_core::error::{AppError, Result};
use ss_core::keys;
use ss_core::models::{ContentKind, Report, ReportStatus, UserAccount};
use ss_core::traits::RecordStore;
use uuid::Uuid;

use crate::forum::ForumService;
use crate::records;
use crate::visibility::{self, Viewer};

pub struct ModerationQueue {
    store: Arc<dyn RecordStore>,
    forum: ForumService,
}

impl ModerationQueue {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            forum: ForumService::new(store.clone()),
            store,
        }
    }

    fn require_moderator(actor: &UserAccount) -> Result<()> {
        if visibility::can_moderate(Some(Viewer::from(actor))) {
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "moderation requires an admin or professional account".into(),
            ))
        }
    }

    /// Open reports in store (insertion) order.
    pub async fn pending_reports(&self, actor: &UserAccount) -> Result<Vec<Report>> {
        Self::require_moderator(actor)?;
        let mut reports: Vec<Report> =
            records::load(&*self.store, keys::REPORTED_CONTENT).await?;
        reports.retain(|r| r.status == ReportStatus::Pending);
        Ok(reports)
    }

    /// Pending → Reviewed. The reported content is kept. Absent or
    /// already-terminal reports are left untouched.
    pub async fn dismiss(&self, actor: &UserAccount, report_id: Uuid) -> Result<()> {
        Self::require_moderator(actor)?;
        let mut reports: Vec<Report> =
            records::load(&*self.store, keys::REPORTED_CONTENT).await?;
        let Some(report) = reports
            .iter_mut()
            .find(|r| r.id == report_id && r.status == ReportStatus::Pending)
        else {
            return Ok(());
        };
        report.status = ReportStatus::Reviewed;
        records::save(&*self.store, keys::REPORTED_CONTENT, &reports).await?;
        Ok(())
    }

    /// Pending → Resolved, deleting the reported content. Content that
    /// was already deleted still resolves the report.
    pub async fn remove(&self, actor: &UserAccount, report_id: Uuid) -> Result<()> {
        Self::require_moderator(actor)?;
        let mut reports: Vec<Report> =
            records::load(&*self.store, keys::REPORTED_CONTENT).await?;
        let Some(report) = reports
            .iter_mut()
            .find(|r| r.id == report_id && r.status == ReportStatus::Pending)
        else {
            return Ok(());
        };

        let (content_id, content_kind) = (report.content_id, report.content_kind);
        report.status = ReportStatus::Resolved;
        records::save(&*self.store, keys::REPORTED_CONTENT, &reports).await?;

        match content_kind {
            ContentKind::Post => self.forum.delete_post(content_id).await?,
            ContentKind::Reply => self.forum.delete_reply(content_id).await?,
        };
        Ok(())
    }
}
