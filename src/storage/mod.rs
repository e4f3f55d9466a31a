//! Persistence ports and their adapters.
//!
//! Services depend on the [`CredentialStore`] and [`JobPostStore`] traits only.
//! Two adapter families implement them:
//!
//! - [`postgres`]: sqlx-backed stores used in production
//! - [`memory`]: `RwLock`-guarded maps, selected with `STORE_BACKEND=memory`
//!   and used by the test suite

use async_trait::async_trait;
use uuid::Uuid;

use jobboard_core::AppError;

use crate::modules::auth::model::{CredentialRecord, NewCredential};
use crate::modules::job_posts::model::{JobPost, JobPostFilter, JobPostQuery, NewJobPost};

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryCredentialStore, InMemoryJobPostStore};
pub use postgres::{PgCredentialStore, PgJobPostStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("User already exists with this email")]
    DuplicateEmail,
    #[error("Referenced record does not exist")]
    MissingReference,
    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::bad_request(err),
            _ => AppError::internal(err),
        }
    }
}

/// Registered users, keyed by id and by email.
///
/// Emails are compared exactly as stored; callers normalize if they need to.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts a record. Fails with [`StoreError::DuplicateEmail`] if the
    /// email is already taken.
    async fn create(&self, new: NewCredential) -> Result<CredentialRecord, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CredentialRecord>, StoreError>;

    /// Records for the given ids. Unknown ids are skipped; order is unspecified.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CredentialRecord>, StoreError>;

    /// Every record, oldest first.
    async fn find_all(&self) -> Result<Vec<CredentialRecord>, StoreError>;
}

#[async_trait]
pub trait JobPostStore: Send + Sync {
    async fn create(&self, new: NewJobPost) -> Result<JobPost, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobPost>, StoreError>;

    /// A filtered, sorted page of posts.
    async fn find(&self, query: &JobPostQuery) -> Result<Vec<JobPost>, StoreError>;

    async fn count(&self, filter: &JobPostFilter) -> Result<i64, StoreError>;

    /// Overwrites the mutable fields of an existing post. Returns the stored
    /// version, or `None` if the post no longer exists.
    async fn save(&self, post: &JobPost) -> Result<Option<JobPost>, StoreError>;

    /// Returns whether a post was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
