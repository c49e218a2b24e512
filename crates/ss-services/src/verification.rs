//! # Professional Verification Queue
//!
//! Professionals register unverified and wait here for an admin to review
//! their credentials. Verification flips the account flag and notifies
//! the user; rejection deletes the account outright, with no soft-delete
//! and no appeal path. That severity is a product decision.

use std::sync::Arc;

use chrono::Utc;
use ss_core::error::{AppError, Result};
use ss_core::keys;
use ss_core::models::{NotificationKind, PendingProfessional, Role, UserAccount};
use ss_core::traits::RecordStore;
use uuid::Uuid;

use crate::notifications::NotificationLedger;
use crate::records;

pub struct VerificationQueue {
    store: Arc<dyn RecordStore>,
    ledger: NotificationLedger,
}

impl VerificationQueue {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            ledger: NotificationLedger::new(store.clone()),
            store,
        }
    }

    fn require_admin(actor: &UserAccount) -> Result<()> {
        if actor.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "verification decisions require an admin account".into(),
            ))
        }
    }

    /// Enqueues a freshly registered professional. Submitting an account
    /// that is already queued changes nothing.
    pub async fn submit(&self, account: &UserAccount) -> Result<PendingProfessional> {
        let mut queue: Vec<PendingProfessional> =
            records::load(&*self.store, keys::PENDING_PROFESSIONALS).await?;
        if let Some(existing) = queue.iter().find(|p| p.user_id == account.id) {
            return Ok(existing.clone());
        }

        let entry = PendingProfessional {
            user_id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            occupation: account.occupation.clone().unwrap_or_default(),
            identity_document: account.identity_document.clone(),
            submitted_at: Utc::now(),
        };
        queue.push(entry.clone());
        records::save(&*self.store, keys::PENDING_PROFESSIONALS, &queue).await?;
        Ok(entry)
    }

    pub async fn pending(&self, actor: &UserAccount) -> Result<Vec<PendingProfessional>> {
        Self::require_admin(actor)?;
        records::load(&*self.store, keys::PENDING_PROFESSIONALS).await
    }

    /// Dequeues the entry, marks the account verified, and notifies the
    /// user. A user id that is not queued is a no-op.
    pub async fn verify(&self, actor: &UserAccount, user_id: Uuid) -> Result<()> {
        Self::require_admin(actor)?;
        if !self.dequeue(user_id).await? {
            return Ok(());
        }

        let mut users: Vec<UserAccount> = records::load(&*self.store, keys::USERS).await?;
        if let Some(account) = users.iter_mut().find(|u| u.id == user_id) {
            account.is_verified = true;
            records::save(&*self.store, keys::USERS, &users).await?;
        }

        self.ledger
            .append(
                user_id,
                NotificationKind::Verification,
                "Your professional account has been verified",
                None,
            )
            .await?;
        Ok(())
    }

    /// Dequeues the entry AND deletes the account record entirely, along
    /// with the account's notification partition and any live session.
    /// Only acts when the user was actually queued.
    pub async fn reject(&self, actor: &UserAccount, user_id: Uuid) -> Result<()> {
        Self::require_admin(actor)?;
        if !self.dequeue(user_id).await? {
            return Ok(());
        }

        let mut users: Vec<UserAccount> = records::load(&*self.store, keys::USERS).await?;
        let before = users.len();
        users.retain(|u| u.id != user_id);
        if users.len() != before {
            records::save(&*self.store, keys::USERS, &users).await?;
        }

        self.ledger.clear(user_id).await?;

        let session: Option<UserAccount> =
            records::load_one(&*self.store, keys::CURRENT_USER).await?;
        if session.is_some_and(|s| s.id == user_id) {
            self.store.delete(keys::CURRENT_USER).await?;
        }
        Ok(())
    }

    /// Removes the queue entry; returns whether one was present.
    async fn dequeue(&self, user_id: Uuid) -> Result<bool> {
        let mut queue: Vec<PendingProfessional> =
            records::load(&*self.store, keys::PENDING_PROFESSIONALS).await?;
        let before = queue.len();
        queue.retain(|p| p.user_id != user_id);
        let removed = queue.len() != before;
        if removed {
            records::save(&*self.store, keys::PENDING_PROFESSIONALS, &queue).await?;
        }
        Ok(removed)
    }
}
