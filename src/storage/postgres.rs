use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::model::{CredentialRecord, NewCredential};
use crate::modules::job_posts::model::{JobPost, JobPostFilter, JobPostQuery, NewJobPost};

use super::{CredentialStore, JobPostStore, StoreError};

const USER_COLUMNS: &str = "id, name, email, password, created_at";
const JOB_POST_COLUMNS: &str = "id, title, department, location, job_type, description, \
     requirements, created_by, created_at, updated_at";

fn map_write_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateEmail;
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::MissingReference;
        }
    }
    StoreError::Database(err)
}

/// Escapes `LIKE` wildcards so filter input is matched literally.
fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &JobPostFilter) {
    builder.push(" WHERE TRUE");

    if let Some(department) = &filter.department {
        builder
            .push(" AND department ILIKE ")
            .push_bind(like_pattern(department));
    }
    if let Some(location) = &filter.location {
        builder
            .push(" AND location ILIKE ")
            .push_bind(like_pattern(location));
    }
    if let Some(job_type) = filter.job_type {
        builder.push(" AND job_type = ").push_bind(job_type.as_str());
    }
}

#[derive(Clone)]
pub struct PgCredentialStore {
    db: PgPool,
}

impl PgCredentialStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip_all, fields(email = %new.email))]
    async fn create(&self, new: NewCredential) -> Result<CredentialRecord, StoreError> {
        sqlx::query_as::<_, CredentialRecord>(&format!(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let record = sqlx::query_as::<_, CredentialRecord>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CredentialRecord>, StoreError> {
        let record = sqlx::query_as::<_, CredentialRecord>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CredentialRecord>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, CredentialRecord>(&format!(
            "SELECT {} FROM users WHERE id = ANY($1)",
            USER_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        let records = sqlx::query_as::<_, CredentialRecord>(&format!(
            "SELECT {} FROM users ORDER BY created_at ASC, id ASC",
            USER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }
}

/// Row shape of `job_posts`; `job_type` is stored as text.
#[derive(FromRow)]
struct JobPostRow {
    id: Uuid,
    title: String,
    department: String,
    location: String,
    job_type: String,
    description: String,
    requirements: Vec<String>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<JobPostRow> for JobPost {
    type Error = StoreError;

    fn try_from(row: JobPostRow) -> Result<Self, Self::Error> {
        let job_type = row
            .job_type
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("job post {} has type {:?}", row.id, row.job_type)))?;

        Ok(JobPost {
            id: row.id,
            title: row.title,
            department: row.department,
            location: row.location,
            job_type,
            description: row.description,
            requirements: row.requirements,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgJobPostStore {
    db: PgPool,
}

impl PgJobPostStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl JobPostStore for PgJobPostStore {
    #[instrument(skip_all, fields(created_by = %new.created_by))]
    async fn create(&self, new: NewJobPost) -> Result<JobPost, StoreError> {
        let row = sqlx::query_as::<_, JobPostRow>(&format!(
            r#"INSERT INTO job_posts (title, department, location, job_type, description, requirements, created_by)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {}"#,
            JOB_POST_COLUMNS
        ))
        .bind(&new.title)
        .bind(&new.department)
        .bind(&new.location)
        .bind(new.job_type.as_str())
        .bind(&new.description)
        .bind(&new.requirements)
        .bind(new.created_by)
        .fetch_one(&self.db)
        .await
        .map_err(map_write_error)?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<JobPost>, StoreError> {
        sqlx::query_as::<_, JobPostRow>(&format!(
            "SELECT {} FROM job_posts WHERE id = $1",
            JOB_POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .map(JobPost::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn find(&self, query: &JobPostQuery) -> Result<Vec<JobPost>, StoreError> {
        let mut builder =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM job_posts", JOB_POST_COLUMNS));
        push_filter(&mut builder, &query.filter);

        // The column comes from a closed enum, never from user input.
        let direction = if query.sort.descending { "DESC" } else { "ASC" };
        builder.push(format!(
            " ORDER BY {} {}, id {}",
            query.sort.field.column(),
            direction,
            direction
        ));
        builder
            .push(" LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let rows = builder
            .build_query_as::<JobPostRow>()
            .fetch_all(&self.db)
            .await?;

        rows.into_iter().map(JobPost::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &JobPostFilter) -> Result<i64, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM job_posts");
        push_filter(&mut builder, filter);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.db)
            .await?;

        Ok(total)
    }

    #[instrument(skip_all, fields(id = %post.id))]
    async fn save(&self, post: &JobPost) -> Result<Option<JobPost>, StoreError> {
        sqlx::query_as::<_, JobPostRow>(&format!(
            r#"UPDATE job_posts
               SET title = $2, department = $3, location = $4, job_type = $5,
                   description = $6, requirements = $7, updated_at = NOW()
               WHERE id = $1
               RETURNING {}"#,
            JOB_POST_COLUMNS
        ))
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.department)
        .bind(&post.location)
        .bind(post.job_type.as_str())
        .bind(&post.description)
        .bind(&post.requirements)
        .fetch_optional(&self.db)
        .await
        .map_err(map_write_error)?
        .map(JobPost::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM job_posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
