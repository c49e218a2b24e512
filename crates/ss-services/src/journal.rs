//! # Mood Journal
//!
//! Owner-partitioned mood entries, same partition machinery as the
//! notification ledger.

use std::sync::Arc;

use chrono::Utc;
use ss_core::error::{AppError, Result};
use ss_core::keys;
use ss_core::models::MoodEntry;
use ss_core::traits::RecordStore;
use uuid::Uuid;

use crate::records;

pub struct MoodJournal {
    store: Arc<dyn RecordStore>,
}

impl MoodJournal {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Records a mood on the 1 (lowest) to 5 (highest) scale.
    pub async fn add_entry(
        &self,
        owner: Uuid,
        mood: u8,
        note: Option<&str>,
    ) -> Result<MoodEntry> {
        if !(1..=5).contains(&mood) {
            return Err(AppError::Validation(
                "mood must be between 1 and 5".into(),
            ));
        }

        let key = keys::mood_entries(owner);
        let mut entries: Vec<MoodEntry> = records::load(&*self.store, &key).await?;
        let entry = MoodEntry {
            id: Uuid::now_v7(),
            user_id: owner,
            mood,
            note: note.map(str::to_string),
            created_at: Utc::now(),
        };
        entries.push(entry.clone());
        records::save(&*self.store, &key, &entries).await?;
        Ok(entry)
    }

    /// The owner's entries, newest-first.
    pub async fn entries(&self, owner: Uuid) -> Result<Vec<MoodEntry>> {
        let mut entries: Vec<MoodEntry> =
            records::load(&*self.store, &keys::mood_entries(owner)).await?;
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    /// Mean mood across all entries, recomputed per read.
    pub async fn average_mood(&self, owner: Uuid) -> Result<Option<f32>> {
        let entries: Vec<MoodEntry> =
            records::load(&*self.store, &keys::mood_entries(owner)).await?;
        if entries.is_empty() {
            return Ok(None);
        }
        let sum: u32 = entries.iter().map(|e| u32::from(e.mood)).sum();
        Ok(Some(sum as f32 / entries.len() as f32))
    }

    /// Absent ids are a no-op.
    pub async fn delete_entry(&self, owner: Uuid, entry_id: Uuid) -> Result<()> {
        let key = keys::mood_entries(owner);
        let mut entries: Vec<MoodEntry> = records::load(&*self.store, &key).await?;
        let before = entries.len();
        entries.retain(|e| e.id != entry_id);
        if entries.len() != before {
            records::save(&*self.store, &key, &entries).await?;
        }
        Ok(())
    }
}
