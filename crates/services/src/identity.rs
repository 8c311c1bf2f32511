//! Account registration and credential checks.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use domains::models::{Account, NewAccount};
use domains::ports::{AccountRepo, PasswordHasher};
use domains::validate::{normalize_email, validate_registration};

use crate::error::ServiceError;

/// A syntactically valid argon2 hash of nothing in particular, verified
/// against when the looked-up account does not exist so that the miss path
/// does roughly the same work as the hit path.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

pub struct IdentityService {
    accounts: Arc<dyn AccountRepo>,
    hasher: Arc<dyn PasswordHasher>,
}

impl IdentityService {
    pub fn new(accounts: Arc<dyn AccountRepo>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { accounts, hasher }
    }

    /// Creates an account. The email is normalized before validation and
    /// persistence; a duplicate (however cased) fails as a field error, even
    /// when the duplicate only shows up at the storage constraint.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn register(&self, email: &str, password: &str) -> Result<Account, ServiceError> {
        let email = normalize_email(email);

        let mut errors = validate_registration(&email, password);
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }
        if self.accounts.find_by_email(&email).await?.is_some() {
            errors.add("email", "has already been taken");
            return Err(ServiceError::Validation(errors));
        }

        let password_hash = self.hasher.hash(password)?;
        let account = self
            .accounts
            .insert(NewAccount {
                id: Uuid::new_v4(),
                email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        tracing::info!(account_id = %account.id, "account registered");
        Ok(account)
    }

    /// Looks up by normalized email and checks the password against the
    /// stored hash. Returns `None` on any mismatch — never an error, and
    /// never a hint about whether the email existed.
    #[tracing::instrument(skip_all)]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Account>, ServiceError> {
        let email = normalize_email(email);
        match self.accounts.find_by_email(&email).await? {
            Some(account) if self.hasher.verify(password, &account.password_hash) => {
                Ok(Some(account))
            }
            Some(_) => Ok(None),
            None => {
                // Burn comparable time on the unknown-email path.
                let _ = self.hasher.verify(password, DUMMY_HASH);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::ports::{MockAccountRepo, MockPasswordHasher};
    use mockall::predicate::eq;

    fn account(email: &str, hash: &str) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: hash.into(),
            created_at: Utc::now(),
        }
    }

    fn service(accounts: MockAccountRepo, hasher: MockPasswordHasher) -> IdentityService {
        IdentityService::new(Arc::new(accounts), Arc::new(hasher))
    }

    #[tokio::test]
    async fn register_normalizes_email_before_persisting() {
        let mut accounts = MockAccountRepo::new();
        accounts
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .returning(|_| Ok(None));
        accounts.expect_insert().returning(|new| {
            assert_eq!(new.email, "a@x.com");
            Ok(account(&new.email, &new.password_hash))
        });
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|_| Ok("hashed".into()));

        let created = service(accounts, hasher)
            .register("  A@X.Com ", "secret1")
            .await
            .unwrap();
        assert_eq!(created.email, "a@x.com");
    }

    #[tokio::test]
    async fn register_rejects_short_password_without_hashing() {
        let mut accounts = MockAccountRepo::new();
        accounts.expect_find_by_email().never();
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let err = service(accounts, hasher)
            .register("a@x.com", "12345")
            .await
            .unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert!(errors.has("password")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_reports_duplicate_email_case_insensitively() {
        let mut accounts = MockAccountRepo::new();
        accounts
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .returning(|_| Ok(Some(account("a@x.com", "h"))));
        let hasher = MockPasswordHasher::new();

        // Registered as A@x.com originally; retry as a@X.com must fail.
        let err = service(accounts, hasher)
            .register("a@X.com", "secret1")
            .await
            .unwrap_err();
        match err {
            ServiceError::Validation(errors) => assert!(errors.has("email")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn authenticate_returns_account_on_matching_password() {
        let mut accounts = MockAccountRepo::new();
        accounts
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .returning(|_| Ok(Some(account("a@x.com", "stored-hash"))));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .with(eq("secret1"), eq("stored-hash"))
            .returning(|_, _| true);

        let found = service(accounts, hasher)
            .authenticate("A@x.com", "secret1")
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn authenticate_is_silent_on_wrong_password_and_unknown_email() {
        let mut accounts = MockAccountRepo::new();
        accounts
            .expect_find_by_email()
            .returning(|email| match email {
                "known@x.com" => Ok(Some(account("known@x.com", "stored-hash"))),
                _ => Ok(None),
            });
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| false);

        let svc = service(accounts, hasher);
        assert!(svc.authenticate("known@x.com", "wrong").await.unwrap().is_none());
        assert!(svc.authenticate("ghost@x.com", "wrong").await.unwrap().is_none());
    }
}
