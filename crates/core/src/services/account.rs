//! Dashboard account service: sign-in, sessions and profile.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use parish_common::{AppError, AppResult, IdGenerator, config::AuthConfig};
use parish_db::entities::admin_user::{self, Role};
use parish_db::repositories::AdminUserRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::listing::non_blank;

/// Display name given to the bootstrap administrator when none is configured.
const BOOTSTRAP_NAME: &str = "Administrator";

/// Account service for sign-in and account management.
#[derive(Clone)]
pub struct AccountService {
    account_repo: AdminUserRepository,
    id_gen: IdGenerator,
}

/// Sign-in credentials.
#[derive(Debug, Deserialize, Validate)]
pub struct SignInInput {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct SignInResult {
    pub token: String,
    pub account: admin_user::Model,
}

/// Session token issued after a password change.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChanged {
    pub token: String,
}

/// Profile fields an account may change on itself.
///
/// An empty phone or department clears it.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    #[validate(custom(function = "non_blank"), length(max = 128))]
    pub display_name: Option<String>,

    #[validate(length(max = 64))]
    pub phone: Option<String>,

    #[validate(length(max = 128))]
    pub department: Option<String>,
}

/// Password change form.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordInput {
    pub current_password: String,

    #[validate(length(min = 8, max = 128))]
    pub new_password: String,

    pub confirm_password: String,
}

/// New account created by an administrator.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(custom(function = "non_blank"), length(max = 128))]
    pub display_name: String,

    pub role: Option<Role>,

    pub phone: Option<String>,

    pub department: Option<String>,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(account_repo: AdminUserRepository) -> Self {
        Self {
            account_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Authenticate by e-mail and password and return the session token.
    ///
    /// Unknown e-mail and wrong password are indistinguishable to the caller.
    pub async fn sign_in(&self, input: SignInInput) -> AppResult<SignInResult> {
        input.validate()?;

        let account = self
            .account_repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(&input.password, &account.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        if let Some(token) = account.token.clone() {
            return Ok(SignInResult { token, account });
        }

        let token = self.id_gen.generate_token();
        let mut active: admin_user::ActiveModel = account.into();
        active.token = Set(Some(token.clone()));
        let account = self.account_repo.update(active).await?;

        Ok(SignInResult { token, account })
    }

    /// Resolve a session token to its account.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<admin_user::Model> {
        self.account_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// End the session by rotating the token.
    pub async fn sign_out(&self, account: admin_user::Model) -> AppResult<()> {
        let mut active: admin_user::ActiveModel = account.into();
        active.token = Set(Some(self.id_gen.generate_token()));
        active.updated_at = Set(Some(Utc::now()));

        self.account_repo.update(active).await?;
        Ok(())
    }

    /// Get an account by ID.
    pub async fn get(&self, id: &str) -> AppResult<admin_user::Model> {
        self.account_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Account", id))
    }

    /// Update the caller's own profile.
    pub async fn update_profile(
        &self,
        account: admin_user::Model,
        input: UpdateProfileInput,
    ) -> AppResult<admin_user::Model> {
        input.validate()?;

        let mut active: admin_user::ActiveModel = account.into();

        if let Some(display_name) = input.display_name {
            active.display_name = Set(display_name.trim().to_string());
        }
        if let Some(phone) = input.phone {
            active.phone = Set(non_empty(phone));
        }
        if let Some(department) = input.department {
            active.department = Set(non_empty(department));
        }

        active.updated_at = Set(Some(Utc::now()));

        self.account_repo.update(active).await
    }

    /// Change the caller's password after re-checking the current one.
    ///
    /// The session token is rotated, so other holders of the old token are
    /// signed out. The new token is returned to the caller.
    pub async fn change_password(
        &self,
        account: admin_user::Model,
        input: ChangePasswordInput,
    ) -> AppResult<PasswordChanged> {
        if input.new_password != input.confirm_password {
            return Err(AppError::BadRequest("New passwords do not match".to_string()));
        }
        input.validate()?;

        if !verify_password(&input.current_password, &account.password_hash)? {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        let account_id = account.id.clone();
        let mut active: admin_user::ActiveModel = account.into();
        let token = self.id_gen.generate_token();
        active.password_hash = Set(hash_password(&input.new_password)?);
        active.token = Set(Some(token.clone()));
        active.updated_at = Set(Some(Utc::now()));
        self.account_repo.update(active).await?;

        info!(account_id = %account_id, "Password changed, session rotated");
        Ok(PasswordChanged { token })
    }

    /// All accounts.
    pub async fn list(&self) -> AppResult<Vec<admin_user::Model>> {
        self.account_repo.find_all().await
    }

    /// Create an account. E-mails are unique regardless of case.
    pub async fn create_account(
        &self,
        mut input: CreateAccountInput,
    ) -> AppResult<admin_user::Model> {
        input.email = input.email.trim().to_string();
        input.validate()?;

        if self.account_repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("E-mail already registered".to_string()));
        }

        let email = input.email;
        let account = admin_user::ActiveModel {
            id: Set(self.id_gen.generate()),
            email_lower: Set(email.to_lowercase()),
            email: Set(email),
            display_name: Set(input.display_name.trim().to_string()),
            role: Set(input.role.unwrap_or(Role::Staff)),
            phone: Set(input.phone.and_then(non_empty)),
            department: Set(input.department.and_then(non_empty)),
            password_hash: Set(hash_password(&input.password)?),
            token: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };

        self.account_repo.create(account).await
    }

    /// Create the first administrator when no account exists yet.
    ///
    /// Returns the created account, or `None` when accounts already exist or
    /// no bootstrap credentials are configured.
    pub async fn bootstrap(&self, config: &AuthConfig) -> AppResult<Option<admin_user::Model>> {
        let Some((email, password)) = config.bootstrap_credentials() else {
            return Ok(None);
        };

        if self.account_repo.any_exists().await? {
            return Ok(None);
        }

        let account = self
            .create_account(CreateAccountInput {
                email: email.to_string(),
                password: password.to_string(),
                display_name: config
                    .bootstrap_name
                    .clone()
                    .unwrap_or_else(|| BOOTSTRAP_NAME.to_string()),
                role: Some(Role::Admin),
                phone: None,
                department: None,
            })
            .await?;

        info!(account_id = %account.id, email = %account.email, "Bootstrap administrator created");
        Ok(Some(account))
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_account(password: &str, token: Option<&str>) -> admin_user::Model {
        admin_user::Model {
            id: "acc1".to_string(),
            email: "office@parish.org".to_string(),
            email_lower: "office@parish.org".to_string(),
            display_name: "Parish Office".to_string(),
            role: Role::Staff,
            phone: None,
            department: None,
            password_hash: hash_password(password).unwrap(),
            token: token.map(str::to_string),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn service_with(db: MockDatabase) -> AccountService {
        AccountService::new(AdminUserRepository::new(Arc::new(db.into_connection())))
    }

    fn sign_in(password: &str) -> SignInInput {
        SignInInput {
            email: "Office@Parish.org".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("kidase-2025").unwrap();
        assert!(verify_password("kidase-2025", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_sign_in_returns_existing_token() {
        let account = create_test_account("kidase-2025", Some("tok"));
        let service =
            service_with(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[account]]));

        let result = service.sign_in(sign_in("kidase-2025")).await.unwrap();

        assert_eq!(result.token, "tok");
        assert_eq!(result.account.id, "acc1");
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password_is_unauthorized() {
        let account = create_test_account("kidase-2025", Some("tok"));
        let service =
            service_with(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[account]]));

        let result = service.sign_in(sign_in("guess")).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_email_is_unauthorized() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<admin_user::Model>::new()]),
        );

        let result = service.sign_in(sign_in("kidase-2025")).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_change_password_mismatch() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));
        let account = create_test_account("kidase-2025", None);

        let err = service
            .change_password(
                account,
                ChangePasswordInput {
                    current_password: "kidase-2025".to_string(),
                    new_password: "new-password-1".to_string(),
                    confirm_password: "new-password-2".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Bad request: New passwords do not match");
    }

    #[tokio::test]
    async fn test_change_password_too_short() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));
        let account = create_test_account("kidase-2025", None);

        let result = service
            .change_password(
                account,
                ChangePasswordInput {
                    current_password: "kidase-2025".to_string(),
                    new_password: "short".to_string(),
                    confirm_password: "short".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_change_password_wrong_current() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));
        let account = create_test_account("kidase-2025", None);

        let result = service
            .change_password(
                account,
                ChangePasswordInput {
                    current_password: "not-it".to_string(),
                    new_password: "new-password-1".to_string(),
                    confirm_password: "new-password-1".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_change_password_rotates_token() {
        let account = create_test_account("kidase-2025", Some("old-token"));
        let mut updated = account.clone();
        updated.token = Some("rotated".to_string());
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[updated]])
            .into_connection();
        let db = Arc::new(db);
        let service = AccountService::new(AdminUserRepository::new(Arc::clone(&db)));

        let changed = service
            .change_password(
                account,
                ChangePasswordInput {
                    current_password: "kidase-2025".to_string(),
                    new_password: "new-password-1".to_string(),
                    confirm_password: "new-password-1".to_string(),
                },
            )
            .await
            .unwrap();

        assert_ne!(changed.token, "old-token");
        assert_eq!(changed.token.len(), 32);
        drop(service);
        let db = Arc::try_unwrap(db).unwrap();
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains(&changed.token));
    }

    #[tokio::test]
    async fn test_create_account_trims_email_before_validating() {
        let created = create_test_account("kidase-2025", None);
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<admin_user::Model>::new()])
                .append_query_results([[created]]),
        );

        let account = service
            .create_account(CreateAccountInput {
                email: "  office@parish.org ".to_string(),
                password: "kidase-2025".to_string(),
                display_name: "Parish Office".to_string(),
                role: None,
                phone: None,
                department: None,
            })
            .await
            .unwrap();

        assert_eq!(account.email, "office@parish.org");
    }

    #[tokio::test]
    async fn test_bootstrap_skipped_without_credentials() {
        let service = service_with(MockDatabase::new(DatabaseBackend::Postgres));

        let created = service.bootstrap(&AuthConfig::default()).await.unwrap();

        assert!(created.is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_skipped_when_accounts_exist() {
        let existing = create_test_account("kidase-2025", None);
        let service =
            service_with(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[existing]]));
        let config = AuthConfig {
            bootstrap_email: Some("admin@parish.org".to_string()),
            bootstrap_password: Some("changeme123".to_string()),
            bootstrap_name: None,
        };

        let created = service.bootstrap(&config).await.unwrap();

        assert!(created.is_none());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty(" IT ".to_string()), Some("IT".to_string()));
    }
}
