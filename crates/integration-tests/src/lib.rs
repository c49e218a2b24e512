//! Shared fixtures for the scenario tests. Each test wires the full
//! service stack to a fresh store; the helpers here keep that wiring in
//! one place so the tests read as scenarios.

use std::sync::Arc;

use ss_auth_simple::SimpleCredentialHasher;
use ss_core::models::{Role, UserAccount};
use ss_core::traits::RecordStore;
use ss_services::{
    ForumService, HabitTracker, IdentityService, ModerationQueue, MoodJournal,
    NotificationLedger, VerificationQueue,
};
use ss_store_memory::MemoryRecordStore;
use ss_store_sqlite::SqliteRecordStore;

pub struct App {
    pub store: Arc<dyn RecordStore>,
    pub identity: IdentityService,
    pub forum: ForumService,
    pub moderation: ModerationQueue,
    pub verification: VerificationQueue,
    pub ledger: NotificationLedger,
    pub journal: MoodJournal,
    pub habits: HabitTracker,
}

impl App {
    pub fn over(store: Arc<dyn RecordStore>) -> Self {
        Self {
            identity: IdentityService::new(store.clone(), Arc::new(SimpleCredentialHasher::new())),
            forum: ForumService::new(store.clone()),
            moderation: ModerationQueue::new(store.clone()),
            verification: VerificationQueue::new(store.clone()),
            ledger: NotificationLedger::new(store.clone()),
            journal: MoodJournal::new(store.clone()),
            habits: HabitTracker::new(store.clone()),
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::over(Arc::new(MemoryRecordStore::new()))
    }

    pub async fn on_sqlite() -> Self {
        let store = SqliteRecordStore::new("sqlite::memory:")
            .await
            .expect("in-memory sqlite should open");
        Self::over(Arc::new(store))
    }

    /// Seeds the admin plus the category every scenario posts into.
    pub async fn with_general_category(self) -> (Self, UserAccount) {
        let admin = self
            .identity
            .seed_admin("admin", "admin@soulsync.local", "seeded-admin-pw")
            .await
            .expect("seeding the admin should work");
        self.forum
            .create_category(&admin, "General", Some("Open discussion"))
            .await
            .expect("creating the category should work");
        (self, admin)
    }

    /// Registers a plain user with a derived email.
    pub async fn register_user(&self, name: &str) -> UserAccount {
        self.identity
            .register(ss_services::NewRegistration {
                username: name.to_string(),
                email: format!("{name}@example.com"),
                password: "a long enough password".to_string(),
                role: Role::User,
                occupation: None,
                identity_document: None,
            })
            .await
            .expect("registration should succeed")
    }
}
