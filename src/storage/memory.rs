//! In-process stores backed by `RwLock`-guarded vectors.
//!
//! Records are kept in insertion order, which doubles as `created_at` order.
//! Data does not survive a restart.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::auth::model::{CredentialRecord, NewCredential};
use crate::modules::job_posts::model::{
    JobPost, JobPostFilter, JobPostQuery, JobPostSort, NewJobPost, SortField,
};

use super::{CredentialStore, JobPostStore, StoreError};

#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<Vec<CredentialRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops a record, as an operator deleting a user would.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        records.len() != before
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, new: NewCredential) -> Result<CredentialRecord, StoreError> {
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.email == new.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let record = CredentialRecord {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };
        records.push(record.clone());

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CredentialRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CredentialRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }
}

#[derive(Default)]
pub struct InMemoryJobPostStore {
    posts: RwLock<Vec<JobPost>>,
}

impl InMemoryJobPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn compare(a: &JobPost, b: &JobPost, sort: JobPostSort) -> Ordering {
    let ordering = match sort.field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Department => a.department.cmp(&b.department),
        SortField::Location => a.location.cmp(&b.location),
        SortField::Type => a.job_type.as_str().cmp(b.job_type.as_str()),
    };

    if sort.descending {
        ordering.reverse()
    } else {
        ordering
    }
}

#[async_trait]
impl JobPostStore for InMemoryJobPostStore {
    async fn create(&self, new: NewJobPost) -> Result<JobPost, StoreError> {
        let now = Utc::now();
        let post = JobPost {
            id: Uuid::new_v4(),
            title: new.title,
            department: new.department,
            location: new.location,
            job_type: new.job_type,
            description: new.description,
            requirements: new.requirements,
            created_by: new.created_by,
            created_at: now,
            updated_at: now,
        };

        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobPost>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find(&self, query: &JobPostQuery) -> Result<Vec<JobPost>, StoreError> {
        let posts = self.posts.read().await;

        // Ties fall back to insertion order, in the sort's direction.
        let mut matched: Vec<(usize, &JobPost)> = posts
            .iter()
            .enumerate()
            .filter(|(_, p)| query.filter.matches(p))
            .collect();
        matched.sort_by(|(ia, a), (ib, b)| {
            let tiebreak = if query.sort.descending {
                ib.cmp(ia)
            } else {
                ia.cmp(ib)
            };
            compare(a, b, query.sort).then(tiebreak)
        });

        let offset = usize::try_from(query.offset).unwrap_or(0);
        let limit = usize::try_from(query.limit).unwrap_or(0);

        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn count(&self, filter: &JobPostFilter) -> Result<i64, StoreError> {
        let posts = self.posts.read().await;
        let total = posts.iter().filter(|p| filter.matches(p)).count();
        Ok(total as i64)
    }

    async fn save(&self, post: &JobPost) -> Result<Option<JobPost>, StoreError> {
        let mut posts = self.posts.write().await;

        let Some(stored) = posts.iter_mut().find(|p| p.id == post.id) else {
            return Ok(None);
        };

        stored.title = post.title.clone();
        stored.department = post.department.clone();
        stored.location = post.location.clone();
        stored.job_type = post.job_type;
        stored.description = post.description.clone();
        stored.requirements = post.requirements.clone();
        stored.updated_at = Utc::now();

        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != before)
    }
}
