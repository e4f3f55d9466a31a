use tracing::instrument;

use jobboard_auth::{AuthError, Subject, issue_token};
use jobboard_config::AuthConfig;
use jobboard_core::{AppError, hash_password, verify_password};

use crate::metrics::{track_token_issued, track_user_login, track_user_registered};
use crate::modules::auth::identity::Identity;
use crate::storage::CredentialStore;

use super::model::{
    AuthResponse, LoginRequest, NewCredential, RegisterRequest, UserListing, UserSummary,
};

pub struct AuthService;

impl AuthService {
    /// Creates a credential record and signs the new user in.
    ///
    /// The email is stored and looked up exactly as given.
    #[instrument(skip_all, fields(email = %dto.email))]
    pub async fn register(
        store: &dyn CredentialStore,
        config: &AuthConfig,
        dto: RegisterRequest,
    ) -> Result<AuthResponse, AppError> {
        if store.find_by_email(&dto.email).await?.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "User already exists with this email"
            )));
        }

        let password_hash = hash_password(&dto.password, config.password_cost)?;

        // A concurrent registration can still lose the race on the unique
        // index; the store reports that as DuplicateEmail.
        let record = store
            .create(NewCredential {
                name: dto.name.trim().to_string(),
                email: dto.email,
                password_hash,
            })
            .await?;

        let token = issue_token(&Subject::User(record.id), &config.jwt)?;
        track_user_registered();
        track_token_issued("user");

        tracing::info!(user_id = %record.id, "user registered");

        Ok(AuthResponse {
            user: UserSummary::from(&record),
            token,
        })
    }

    /// Signs in either the configured superadmin or a stored user.
    ///
    /// The superadmin check normalizes the email and never touches the
    /// store. Every other attempt looks the email up as given.
    #[instrument(skip_all)]
    pub async fn login(
        store: &dyn CredentialStore,
        config: &AuthConfig,
        dto: LoginRequest,
    ) -> Result<AuthResponse, AppError> {
        if let Some(superadmin) = &config.superadmin
            && superadmin.matches(&dto.email, &dto.password)
        {
            let token = issue_token(&Subject::Superadmin, &config.jwt)?;
            track_user_login("superadmin");
            track_token_issued("superadmin");

            tracing::info!("superadmin logged in");

            return Ok(AuthResponse {
                user: Identity::superadmin(superadmin).summary(),
                token,
            });
        }

        let Some(record) = store.find_by_email(&dto.email).await? else {
            track_user_login("failure");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(&dto.password, &record.password_hash)? {
            track_user_login("failure");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = issue_token(&Subject::User(record.id), &config.jwt)?;
        track_user_login("success");
        track_token_issued("user");

        tracing::info!(user_id = %record.id, "user logged in");

        Ok(AuthResponse {
            user: UserSummary::from(&record),
            token,
        })
    }

    /// Profile of the caller. A user deleted since the token was resolved
    /// yields 404.
    #[instrument(skip_all, fields(identity = %identity.id()))]
    pub async fn current_identity(
        store: &dyn CredentialStore,
        identity: &Identity,
    ) -> Result<UserSummary, AppError> {
        let Some(user_id) = identity.user_id() else {
            return Ok(identity.summary());
        };

        store
            .find_by_id(user_id)
            .await?
            .map(|record| UserSummary::from(&record))
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    #[instrument(skip_all)]
    pub async fn list_users(store: &dyn CredentialStore) -> Result<Vec<UserListing>, AppError> {
        let records = store.find_all().await?;
        Ok(records.into_iter().map(UserListing::from).collect())
    }
}
