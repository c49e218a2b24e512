//! # Identity
//!
//! Registration, login, and the session record. The `users` partition is
//! the single source of truth for accounts; `current_user` holds the
//! session. Professionals register unverified and enter the pending
//! queue for credential review.

use std::sync::Arc;

use chrono::Utc;
use ss_core::error::{AppError, Result};
use ss_core::keys;
use ss_core::models::{Role, UserAccount};
use ss_core::traits::{CredentialHasher, RecordStore};
use uuid::Uuid;

use crate::records;
use crate::verification::VerificationQueue;

const MIN_PASSWORD_LEN: usize = 8;

/// Registration form input.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub occupation: Option<String>,
    pub identity_document: Option<String>,
}

pub struct IdentityService {
    store: Arc<dyn RecordStore>,
    hasher: Arc<dyn CredentialHasher>,
    verification: VerificationQueue,
}

impl IdentityService {
    pub fn new(store: Arc<dyn RecordStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self {
            verification: VerificationQueue::new(store.clone()),
            store,
            hasher,
        }
    }

    /// Creates an account. Validation failures abort before any write.
    ///
    /// Admin accounts are seeded by the operator and can never be
    /// registered. A professional registration also enqueues the account
    /// for credential review, unverified until an admin resolves it.
    pub async fn register(&self, reg: NewRegistration) -> Result<UserAccount> {
        if reg.username.trim().is_empty() {
            return Err(AppError::Validation("username is required".into()));
        }
        if !email_is_plausible(&reg.email) {
            return Err(AppError::Validation("email address is malformed".into()));
        }
        if reg.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if reg.role == Role::Admin {
            return Err(AppError::Unauthorized(
                "admin accounts are provisioned by the operator".into(),
            ));
        }
        if reg.role == Role::Professional && reg.occupation.as_deref().unwrap_or("").trim().is_empty()
        {
            return Err(AppError::Validation(
                "occupation is required for professional accounts".into(),
            ));
        }

        let mut users: Vec<UserAccount> = records::load(&*self.store, keys::USERS).await?;
        if users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&reg.email))
        {
            return Err(AppError::Conflict(
                "an account with this email already exists".into(),
            ));
        }

        let account = UserAccount {
            id: Uuid::now_v7(),
            username: reg.username.trim().to_string(),
            email: reg.email.trim().to_string(),
            password_hash: self.hasher.hash_password(&reg.password).await?,
            role: reg.role,
            is_verified: false,
            occupation: reg.occupation,
            identity_document: reg.identity_document,
            created_at: Utc::now(),
        };
        users.push(account.clone());
        records::save(&*self.store, keys::USERS, &users).await?;

        if account.role == Role::Professional {
            self.verification.submit(&account).await?;
        }
        Ok(account)
    }

    /// Seed path for operator-provisioned admin accounts (`register`
    /// refuses the admin role). Idempotent on email: an existing account
    /// is returned untouched.
    pub async fn seed_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserAccount> {
        let mut users: Vec<UserAccount> = records::load(&*self.store, keys::USERS).await?;
        if let Some(existing) = users.iter().find(|u| u.email.eq_ignore_ascii_case(email)) {
            return Ok(existing.clone());
        }

        let account = UserAccount {
            id: Uuid::now_v7(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: self.hasher.hash_password(password).await?,
            role: Role::Admin,
            is_verified: true,
            occupation: None,
            identity_document: None,
            created_at: Utc::now(),
        };
        users.push(account.clone());
        records::save(&*self.store, keys::USERS, &users).await?;
        Ok(account)
    }

    /// Verifies credentials and installs the session record. Unknown
    /// email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserAccount> {
        let users: Vec<UserAccount> = records::load(&*self.store, keys::USERS).await?;
        let account = users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .ok_or_else(|| AppError::Unauthorized("invalid credentials".into()))?;

        if !self
            .hasher
            .verify_password(password, &account.password_hash)
            .await
        {
            return Err(AppError::Unauthorized("invalid credentials".into()));
        }

        records::save_one(&*self.store, keys::CURRENT_USER, account).await?;
        Ok(account.clone())
    }

    pub async fn logout(&self) -> Result<()> {
        self.store.delete(keys::CURRENT_USER).await?;
        Ok(())
    }

    /// The session account, if any. A corrupt session record reads as
    /// logged out.
    pub async fn current_user(&self) -> Result<Option<UserAccount>> {
        records::load_one(&*self.store, keys::CURRENT_USER).await
    }

    pub async fn account(&self, id: Uuid) -> Result<Option<UserAccount>> {
        let users: Vec<UserAccount> = records::load(&*self.store, keys::USERS).await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }
}

/// Just enough shape-checking to catch typos: `local@domain.tld`.
fn email_is_plausible(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ss_auth_simple::SimpleCredentialHasher;
    use ss_store_memory::MemoryRecordStore;

    fn service() -> IdentityService {
        IdentityService::new(
            Arc::new(MemoryRecordStore::new()),
            Arc::new(SimpleCredentialHasher::new()),
        )
    }

    fn registration(email: &str) -> NewRegistration {
        NewRegistration {
            username: "casey".into(),
            email: email.into(),
            password: "correct horse".into(),
            role: Role::User,
            occupation: None,
            identity_document: None,
        }
    }

    #[tokio::test]
    async fn test_register_then_login_round_trip() {
        let svc = service();
        let account = svc.register(registration("casey@example.com")).await.unwrap();
        assert_eq!(account.role, Role::User);
        assert!(!account.is_verified);

        let logged_in = svc.login("casey@example.com", "correct horse").await.unwrap();
        assert_eq!(logged_in.id, account.id);
        assert_eq!(svc.current_user().await.unwrap().unwrap().id, account.id);

        svc.logout().await.unwrap();
        assert!(svc.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validation_rejects_bad_input_without_writing() {
        let svc = service();

        let mut reg = registration("not-an-email");
        assert!(matches!(
            svc.register(reg).await,
            Err(AppError::Validation(_))
        ));

        reg = registration("short@example.com");
        reg.password = "2short".into();
        assert!(matches!(
            svc.register(reg).await,
            Err(AppError::Validation(_))
        ));

        // Nothing was persisted, so the email is still free.
        let account = svc.register(registration("short@example.com")).await;
        assert!(account.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let svc = service();
        svc.register(registration("dup@example.com")).await.unwrap();
        assert!(matches!(
            svc.register(registration("DUP@example.com")).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_admin_registration_is_refused() {
        let svc = service();
        let mut reg = registration("admin@example.com");
        reg.role = Role::Admin;
        assert!(matches!(
            svc.register(reg).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_identical() {
        let svc = service();
        svc.register(registration("casey@example.com")).await.unwrap();

        let wrong = svc.login("casey@example.com", "wrong password").await;
        let unknown = svc.login("nobody@example.com", "correct horse").await;
        assert!(matches!(wrong, Err(AppError::Unauthorized(_))));
        assert!(matches!(unknown, Err(AppError::Unauthorized(_))));
    }
}
