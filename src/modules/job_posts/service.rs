use std::collections::HashMap;

use tracing::instrument;
use uuid::Uuid;

use jobboard_auth::AuthError;
use jobboard_core::{AppError, PaginationMeta};

use crate::metrics::track_job_post;
use crate::modules::auth::identity::Identity;
use crate::storage::{CredentialStore, JobPostStore, StoreError};

use super::model::{
    CreateJobPostDto, CreatorSummary, JobPost, JobPostListResponse, JobPostQuery, JobPostView,
    NewJobPost, UpdateJobPostDto, trim_all,
};

fn not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Job post not found"))
}

/// Parses a path id. Anything that is not a UUID cannot name a post.
pub fn parse_post_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

pub struct JobPostService;

impl JobPostService {
    /// Attaches `{ id, name, email }` of each post's creator. Posts whose
    /// creator no longer exists get `None`.
    async fn populate(
        users: &dyn CredentialStore,
        posts: Vec<JobPost>,
    ) -> Result<Vec<JobPostView>, AppError> {
        let mut ids: Vec<Uuid> = posts.iter().map(|p| p.created_by).collect();
        ids.sort_unstable();
        ids.dedup();

        let creators: HashMap<Uuid, CreatorSummary> = users
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|record| {
                (
                    record.id,
                    CreatorSummary {
                        id: record.id,
                        name: record.name,
                        email: record.email,
                    },
                )
            })
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let creator = creators.get(&post.created_by).cloned();
                JobPostView::new(post, creator)
            })
            .collect())
    }

    async fn populate_one(
        users: &dyn CredentialStore,
        post: JobPost,
    ) -> Result<JobPostView, AppError> {
        Self::populate(users, vec![post])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("populated post went missing")))
    }

    /// Creates a post owned by the caller. The superadmin has no credential
    /// record and cannot own posts. A caller whose record disappears before
    /// the insert gets the same 401 as an unresolvable token.
    #[instrument(skip_all, fields(identity = %identity.id()))]
    pub async fn create(
        posts: &dyn JobPostStore,
        users: &dyn CredentialStore,
        identity: &Identity,
        dto: CreateJobPostDto,
    ) -> Result<JobPostView, AppError> {
        let Some(owner) = identity.user_id() else {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Superadmin cannot create job posts"
            )));
        };

        let post = posts
            .create(NewJobPost {
                title: dto.title.trim().to_string(),
                department: dto.department.trim().to_string(),
                location: dto.location.trim().to_string(),
                job_type: dto.job_type,
                description: dto.description.trim().to_string(),
                requirements: trim_all(dto.requirements),
                created_by: owner,
            })
            .await
            .map_err(|err| match err {
                // The caller's record was deleted after the token was resolved.
                StoreError::MissingReference => AppError::from(AuthError::UnknownSubject),
                other => AppError::from(other),
            })?;

        track_job_post("created");
        tracing::info!(job_post_id = %post.id, "job post created");

        Self::populate_one(users, post).await
    }

    #[instrument(skip_all, fields(query = ?query))]
    pub async fn list(
        posts: &dyn JobPostStore,
        users: &dyn CredentialStore,
        query: JobPostQuery,
    ) -> Result<JobPostListResponse, AppError> {
        let page_posts = posts.find(&query).await?;
        let total = posts.count(&query.filter).await?;

        let page = query.offset / query.limit + 1;

        Ok(JobPostListResponse {
            job_posts: Self::populate(users, page_posts).await?,
            pagination: PaginationMeta::new(page, query.limit, total),
        })
    }

    #[instrument(skip(posts, users))]
    pub async fn get(
        posts: &dyn JobPostStore,
        users: &dyn CredentialStore,
        id: Uuid,
    ) -> Result<JobPostView, AppError> {
        let post = posts.find_by_id(id).await?.ok_or_else(not_found)?;
        Self::populate_one(users, post).await
    }

    /// Applies a partial update. Only the creator may update; the existence
    /// check comes first, so a missing post is 404 for everyone. An update
    /// with no fields leaves the post, `updated_at` included, untouched.
    #[instrument(skip(posts, users, identity, dto), fields(identity = %identity.id()))]
    pub async fn update(
        posts: &dyn JobPostStore,
        users: &dyn CredentialStore,
        identity: &Identity,
        id: Uuid,
        dto: UpdateJobPostDto,
    ) -> Result<JobPostView, AppError> {
        let mut post = posts.find_by_id(id).await?.ok_or_else(not_found)?;

        if !post.is_owned_by(&identity.id()) {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Not authorized to update this job post"
            )));
        }

        if !dto.apply(&mut post) {
            tracing::debug!(job_post_id = %post.id, "empty update, nothing saved");
            return Self::populate_one(users, post).await;
        }

        let saved = posts.save(&post).await?.ok_or_else(not_found)?;

        track_job_post("updated");
        tracing::info!(job_post_id = %saved.id, "job post updated");

        Self::populate_one(users, saved).await
    }

    #[instrument(skip(posts, identity), fields(identity = %identity.id()))]
    pub async fn delete(
        posts: &dyn JobPostStore,
        identity: &Identity,
        id: Uuid,
    ) -> Result<(), AppError> {
        let post = posts.find_by_id(id).await?.ok_or_else(not_found)?;

        if !post.is_owned_by(&identity.id()) {
            return Err(AppError::forbidden(anyhow::anyhow!(
                "Not authorized to delete this job post"
            )));
        }

        if !posts.delete(id).await? {
            return Err(not_found());
        }

        track_job_post("deleted");
        tracing::info!(job_post_id = %id, "job post deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::model::NewCredential;
    use crate::modules::job_posts::model::{JobPostFilterParams, JobType};
    use crate::storage::{InMemoryCredentialStore, InMemoryJobPostStore};
    use axum::http::StatusCode;
    use jobboard_config::SuperadminConfig;

    async fn user(store: &InMemoryCredentialStore, email: &str) -> Identity {
        let record = store
            .create(NewCredential {
                name: email.split('@').next().unwrap_or_default().to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        Identity::from_record(&record)
    }

    fn create_dto(title: &str) -> CreateJobPostDto {
        CreateJobPostDto {
            title: format!("  {} ", title),
            department: "Engineering".to_string(),
            location: "Berlin".to_string(),
            job_type: JobType::FullTime,
            description: "Build things".to_string(),
            requirements: vec![" Rust ".to_string(), "SQL".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_populates_creator() {
        let users = InMemoryCredentialStore::new();
        let posts = InMemoryJobPostStore::new();
        let alice = user(&users, "alice@example.com").await;

        let view = JobPostService::create(&posts, &users, &alice, create_dto("Engineer"))
            .await
            .unwrap();

        assert_eq!(view.title, "Engineer");
        assert_eq!(view.requirements, vec!["Rust", "SQL"]);
        let creator = view.created_by.unwrap();
        assert_eq!(creator.id.to_string(), alice.id());
        assert_eq!(creator.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_superadmin_cannot_create() {
        let users = InMemoryCredentialStore::new();
        let posts = InMemoryJobPostStore::new();
        let root = Identity::superadmin(&SuperadminConfig::new("root@example.com", "pw"));

        let err = JobPostService::create(&posts, &users, &root, create_dto("Engineer"))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_only_creator_may_update_or_delete() {
        let users = InMemoryCredentialStore::new();
        let posts = InMemoryJobPostStore::new();
        let alice = user(&users, "alice@example.com").await;
        let bob = user(&users, "bob@example.com").await;
        let root = Identity::superadmin(&SuperadminConfig::new("root@example.com", "pw"));

        let view = JobPostService::create(&posts, &users, &alice, create_dto("Engineer"))
            .await
            .unwrap();

        for intruder in [&bob, &root] {
            let dto = UpdateJobPostDto {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            };
            let err = JobPostService::update(&posts, &users, intruder, view.id, dto)
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::FORBIDDEN);

            let err = JobPostService::delete(&posts, intruder, view.id)
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::FORBIDDEN);
        }

        let updated = JobPostService::update(
            &posts,
            &users,
            &alice,
            view.id,
            UpdateJobPostDto {
                job_type: Some(JobType::Contract),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.job_type, JobType::Contract);
        assert_eq!(updated.title, "Engineer");

        JobPostService::delete(&posts, &alice, view.id).await.unwrap();
        let err = JobPostService::get(&posts, &users, view.id)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    /// Rejects every insert as if the creator's row were gone.
    struct OrphanedJobPostStore;

    #[async_trait::async_trait]
    impl JobPostStore for OrphanedJobPostStore {
        async fn create(&self, _new: NewJobPost) -> Result<JobPost, StoreError> {
            Err(StoreError::MissingReference)
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<JobPost>, StoreError> {
            Ok(None)
        }

        async fn find(&self, _query: &JobPostQuery) -> Result<Vec<JobPost>, StoreError> {
            Ok(Vec::new())
        }

        async fn count(
            &self,
            _filter: &crate::modules::job_posts::model::JobPostFilter,
        ) -> Result<i64, StoreError> {
            Ok(0)
        }

        async fn save(&self, _post: &JobPost) -> Result<Option<JobPost>, StoreError> {
            Ok(None)
        }

        async fn delete(&self, _id: Uuid) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn test_create_for_vanished_creator_is_unauthorized() {
        let users = InMemoryCredentialStore::new();
        let alice = user(&users, "alice@example.com").await;

        let err = JobPostService::create(&OrphanedJobPostStore, &users, &alice, create_dto("Engineer"))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.public_message(), "User not found. Please log in again.");
    }

    #[tokio::test]
    async fn test_empty_update_keeps_updated_at() {
        let users = InMemoryCredentialStore::new();
        let posts = InMemoryJobPostStore::new();
        let alice = user(&users, "alice@example.com").await;

        let view = JobPostService::create(&posts, &users, &alice, create_dto("Engineer"))
            .await
            .unwrap();

        let unchanged =
            JobPostService::update(&posts, &users, &alice, view.id, UpdateJobPostDto::default())
                .await
                .unwrap();
        assert_eq!(unchanged.updated_at, view.updated_at);
        assert_eq!(unchanged.title, "Engineer");

        let stored = posts.find_by_id(view.id).await.unwrap().unwrap();
        assert_eq!(stored.updated_at, view.updated_at);

        let err = JobPostService::update(
            &posts,
            &users,
            &user(&users, "bob@example.com").await,
            view.id,
            UpdateJobPostDto::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found_before_ownership() {
        let users = InMemoryCredentialStore::new();
        let posts = InMemoryJobPostStore::new();
        let bob = user(&users, "bob@example.com").await;

        let err = JobPostService::update(
            &posts,
            &users,
            &bob,
            Uuid::new_v4(),
            UpdateJobPostDto::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = JobPostService::delete(&posts, &bob, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let users = InMemoryCredentialStore::new();
        let posts = InMemoryJobPostStore::new();
        let alice = user(&users, "alice@example.com").await;

        for i in 0..12 {
            JobPostService::create(&posts, &users, &alice, create_dto(&format!("Job {}", i)))
                .await
                .unwrap();
        }

        let query = JobPostFilterParams {
            page: Some(2),
            limit: Some(5),
            ..Default::default()
        }
        .into_query()
        .unwrap();

        let listing = JobPostService::list(&posts, &users, query).await.unwrap();
        assert_eq!(listing.job_posts.len(), 5);
        assert_eq!(listing.pagination.page, 2);
        assert_eq!(listing.pagination.total, 12);
        assert_eq!(listing.pagination.pages, 3);
        assert!(listing.pagination.has_more);
    }

    #[tokio::test]
    async fn test_deleted_creator_populates_as_none() {
        let users = InMemoryCredentialStore::new();
        let posts = InMemoryJobPostStore::new();
        let alice = user(&users, "alice@example.com").await;

        let view = JobPostService::create(&posts, &users, &alice, create_dto("Engineer"))
            .await
            .unwrap();
        users.remove(view.created_by.unwrap().id).await;

        let view = JobPostService::get(&posts, &users, view.id).await.unwrap();
        assert!(view.created_by.is_none());
    }

    #[test]
    fn test_parse_post_id() {
        assert!(parse_post_id(&Uuid::new_v4().to_string()).is_ok());
        let err = parse_post_id("not-an-id").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
