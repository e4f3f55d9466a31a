//! Administrative commands shared by the `jobboard-cli` binary.
//!
//! These run against any [`CredentialStore`], so they enforce the same
//! validation and uniqueness rules as `POST /api/auth/register`.

use anyhow::{Context, anyhow};
use validator::Validate;

use jobboard_core::hash_password;

use crate::modules::auth::model::{CredentialRecord, NewCredential, RegisterRequest, UserListing};
use crate::storage::{CredentialStore, StoreError};

pub async fn create_user(
    store: &dyn CredentialStore,
    name: &str,
    email: &str,
    password: &str,
    password_cost: u32,
) -> anyhow::Result<CredentialRecord> {
    let request = RegisterRequest {
        name: name.trim().to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    request
        .validate()
        .map_err(|e| anyhow!("Invalid user details: {}", e))?;

    let password_hash = hash_password(&request.password, password_cost)
        .map_err(|e| anyhow!("Failed to hash password: {}", e.error))?;

    match store
        .create(NewCredential {
            name: request.name,
            email: request.email,
            password_hash,
        })
        .await
    {
        Ok(record) => Ok(record),
        Err(StoreError::DuplicateEmail) => Err(anyhow!("User with this email already exists")),
        Err(e) => Err(e).context("Failed to create user"),
    }
}

pub async fn list_users(store: &dyn CredentialStore) -> anyhow::Result<Vec<UserListing>> {
    let records = store.find_all().await.context("Failed to list users")?;
    Ok(records.into_iter().map(UserListing::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryCredentialStore;
    use jobboard_core::MIN_PASSWORD_COST;

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let store = InMemoryCredentialStore::new();
        let record = create_user(&store, " Ada ", "ada@example.com", "secret1", MIN_PASSWORD_COST)
            .await
            .unwrap();

        assert_eq!(record.name, "Ada");
        assert!(jobboard_core::verify_password("secret1", &record.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicates_and_bad_input() {
        let store = InMemoryCredentialStore::new();
        create_user(&store, "Ada", "ada@example.com", "secret1", MIN_PASSWORD_COST)
            .await
            .unwrap();

        let duplicate =
            create_user(&store, "Ada", "ada@example.com", "secret1", MIN_PASSWORD_COST).await;
        assert!(duplicate.unwrap_err().to_string().contains("already exists"));

        assert!(
            create_user(&store, "Bob", "not-an-email", "secret1", MIN_PASSWORD_COST)
                .await
                .is_err()
        );
        assert!(
            create_user(&store, "Bob", "bob@example.com", "123", MIN_PASSWORD_COST)
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_list_users() {
        let store = InMemoryCredentialStore::new();
        create_user(&store, "Ada", "ada@example.com", "secret1", MIN_PASSWORD_COST)
            .await
            .unwrap();

        let users = list_users(&store).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "ada@example.com");
    }
}
