//! # SoulSync Seeder
//!
//! Provisions a record store with the records that never come from the
//! application itself: the admin account and the default forum
//! categories. Safe to run repeatedly.

use std::sync::Arc;

use anyhow::Context;
use ss_auth_simple::SimpleCredentialHasher;
use ss_core::error::AppError;
use ss_services::{ForumService, IdentityService};
use ss_store_sqlite::SqliteRecordStore;

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("General", "Open discussion for the community"),
    ("Anxiety Support", "Share coping strategies and support each other"),
    ("Depression Support", "A space to talk and be heard"),
    ("Mindfulness", "Meditation, breathing, and grounding practices"),
    ("Sleep", "Rest, routines, and insomnia"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:soulsync.db".to_string());
    let admin_email = std::env::var("SOULSYNC_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@soulsync.local".to_string());
    let admin_password =
        std::env::var("SOULSYNC_ADMIN_PASSWORD").context("SOULSYNC_ADMIN_PASSWORD must be set")?;

    let store = Arc::new(
        SqliteRecordStore::new(&database_url)
            .await
            .context("failed to open the record store")?,
    );
    let identity = IdentityService::new(store.clone(), Arc::new(SimpleCredentialHasher::new()));
    let forum = ForumService::new(store);

    let admin = identity
        .seed_admin("admin", &admin_email, &admin_password)
        .await?;
    log::info!("admin account ready: {}", admin.email);

    for (name, description) in DEFAULT_CATEGORIES {
        match forum.create_category(&admin, name, Some(description)).await {
            Ok(category) => log::info!("created category \"{}\"", category.id),
            Err(AppError::Conflict(_)) => log::debug!("category \"{name}\" already present"),
            Err(err) => return Err(err.into()),
        }
    }

    log::info!("seed complete");
    Ok(())
}
