//! # Habit Tracker
//!
//! Owner-partitioned habits with a consecutive-day streak. Completing a
//! habit is idempotent per calendar day.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use ss_core::error::{AppError, Result};
use ss_core::keys;
use ss_core::models::Habit;
use ss_core::traits::RecordStore;
use uuid::Uuid;

use crate::records;

pub struct HabitTracker {
    store: Arc<dyn RecordStore>,
}

impl HabitTracker {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn add_habit(&self, owner: Uuid, name: &str) -> Result<Habit> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("habit name is required".into()));
        }

        let key = keys::habits(owner);
        let mut habits: Vec<Habit> = records::load(&*self.store, &key).await?;
        let habit = Habit {
            id: Uuid::now_v7(),
            user_id: owner,
            name: name.trim().to_string(),
            streak: 0,
            completed_on: Vec::new(),
            created_at: Utc::now(),
        };
        habits.push(habit.clone());
        records::save(&*self.store, &key, &habits).await?;
        Ok(habit)
    }

    pub async fn list(&self, owner: Uuid) -> Result<Vec<Habit>> {
        records::load(&*self.store, &keys::habits(owner)).await
    }

    /// Marks the habit done for `day` and returns the updated record.
    ///
    /// Completing a day that is already recorded changes nothing. A day
    /// directly after the latest completion extends the streak; a later
    /// day with a gap restarts it at 1; backfilling an earlier day is
    /// recorded without touching the streak.
    pub async fn complete(&self, owner: Uuid, habit_id: Uuid, day: NaiveDate) -> Result<Habit> {
        let key = keys::habits(owner);
        let mut habits: Vec<Habit> = records::load(&*self.store, &key).await?;
        let habit = habits
            .iter_mut()
            .find(|h| h.id == habit_id)
            .ok_or_else(|| AppError::NotFound("Habit".into(), habit_id.to_string()))?;

        if habit.completed_on.contains(&day) {
            return Ok(habit.clone());
        }

        match habit.last_completed() {
            Some(last) if day < last => {} // backfill
            Some(last) if last.succ_opt() == Some(day) => habit.streak += 1,
            _ => habit.streak = 1,
        }
        habit.completed_on.push(day);

        let updated = habit.clone();
        records::save(&*self.store, &key, &habits).await?;
        Ok(updated)
    }

    /// Absent ids are a no-op.
    pub async fn delete_habit(&self, owner: Uuid, habit_id: Uuid) -> Result<()> {
        let key = keys::habits(owner);
        let mut habits: Vec<Habit> = records::load(&*self.store, &key).await?;
        let before = habits.len();
        habits.retain(|h| h.id != habit_id);
        if habits.len() != before {
            records::save(&*self.store, &key, &habits).await?;
        }
        Ok(())
    }
}
