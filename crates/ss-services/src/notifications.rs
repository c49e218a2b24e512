//! # Notification Ledger
//!
//! Appends, reads, and mutates one owner's notification partition.
//! Every operation resolves its key from the owner id, so owner A's
//! calls can never observe or touch owner B's records.

use std::sync::Arc;

use chrono::Utc;
use ss_core::error::Result;
use ss_core::keys;
use ss_core::models::{Notification, NotificationKind};
use ss_core::traits::RecordStore;
use uuid::Uuid;

use crate::records;

#[derive(Clone)]
pub struct NotificationLedger {
    store: Arc<dyn RecordStore>,
}

impl NotificationLedger {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Creates an unread notification and appends it to the owner's
    /// partition in one write.
    pub async fn append(
        &self,
        owner: Uuid,
        kind: NotificationKind,
        message: &str,
        target_id: Option<Uuid>,
    ) -> Result<Notification> {
        let key = keys::notifications(owner);
        let mut partition: Vec<Notification> = records::load(&*self.store, &key).await?;

        let notification = Notification {
            id: Uuid::now_v7(),
            user_id: owner,
            kind,
            message: message.to_string(),
            target_id,
            read: false,
            created_at: Utc::now(),
        };
        partition.push(notification.clone());
        records::save(&*self.store, &key, &partition).await?;
        Ok(notification)
    }

    /// Returns the owner's notifications newest-first; records with equal
    /// timestamps keep their insertion order.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Notification>> {
        let key = keys::notifications(owner);
        let mut partition: Vec<Notification> = records::load(&*self.store, &key).await?;
        partition.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(partition)
    }

    /// Recomputed on every call; never cached across mutations.
    pub async fn unread_count(&self, owner: Uuid) -> Result<usize> {
        let key = keys::notifications(owner);
        let partition: Vec<Notification> = records::load(&*self.store, &key).await?;
        Ok(partition.iter().filter(|n| !n.read).count())
    }

    /// Flips `read` on exactly the matching record. An absent id is a
    /// no-op, which also makes the call idempotent.
    pub async fn mark_read(&self, owner: Uuid, notification_id: Uuid) -> Result<()> {
        let key = keys::notifications(owner);
        let mut partition: Vec<Notification> = records::load(&*self.store, &key).await?;
        let mut changed = false;
        for n in partition.iter_mut() {
            if n.id == notification_id && !n.read {
                n.read = true;
                changed = true;
            }
        }
        if changed {
            records::save(&*self.store, &key, &partition).await?;
        }
        Ok(())
    }

    pub async fn mark_all_read(&self, owner: Uuid) -> Result<()> {
        let key = keys::notifications(owner);
        let mut partition: Vec<Notification> = records::load(&*self.store, &key).await?;
        if partition.iter().any(|n| !n.read) {
            for n in partition.iter_mut() {
                n.read = true;
            }
            records::save(&*self.store, &key, &partition).await?;
        }
        Ok(())
    }

    /// Deletes the owner's entire partition.
    pub async fn clear(&self, owner: Uuid) -> Result<()> {
        self.store.delete(&keys::notifications(owner)).await?;
        Ok(())
    }
}
