use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use jobboard_core::pagination::deserialize_optional_i64;
use jobboard_core::{PaginationMeta, PaginationParams};

use crate::validator::{not_blank, requirements_not_blank, trimmed, trimmed_option};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl JobType {
    pub const ALL: [JobType; 5] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
        JobType::Remote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
            JobType::Remote => "Remote",
        }
    }
}

static JOB_TYPE_NAMES: [&str; 5] = ["Full-time", "Part-time", "Contract", "Internship", "Remote"];

/// Accepts the wire spelling with surrounding whitespace.
impl<'de> Deserialize<'de> for JobType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let name = raw.trim();
        name.parse()
            .map_err(|_| de::Error::unknown_variant(name, &JOB_TYPE_NAMES))
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    /// Exact match on the wire spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid job type. Expected one of: {}",
                    JobType::ALL.map(|t| t.as_str()).join(", ")
                )
            })
    }
}

/// A persisted job post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPost {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    pub job_type: JobType,
    pub description: String,
    pub requirements: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPost {
    /// Ownership compares the stored creator id with the caller's identity id
    /// as strings, so the `"superadmin"` sentinel never owns a post.
    pub fn is_owned_by(&self, identity_id: &str) -> bool {
        self.created_by.to_string() == identity_id
    }
}

#[derive(Debug, Clone)]
pub struct NewJobPost {
    pub title: String,
    pub department: String,
    pub location: String,
    pub job_type: JobType,
    pub description: String,
    pub requirements: Vec<String>,
    pub created_by: Uuid,
}

/// Listing filters. `department` and `location` are case-insensitive
/// substring matches; `job_type` is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPostFilter {
    pub department: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
}

impl JobPostFilter {
    pub fn matches(&self, post: &JobPost) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        self.department
            .as_deref()
            .is_none_or(|d| contains_ci(&post.department, d))
            && self
                .location
                .as_deref()
                .is_none_or(|l| contains_ci(&post.location, l))
            && self.job_type.is_none_or(|t| post.job_type == t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Title,
    Department,
    Location,
    Type,
}

impl SortField {
    /// Column name in the `job_posts` table.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Title => "title",
            SortField::Department => "department",
            SortField::Location => "location",
            SortField::Type => "job_type",
        }
    }
}

/// Sort order for listings, parsed from `sort=field` or `sort=-field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobPostSort {
    pub field: SortField,
    pub descending: bool,
}

impl Default for JobPostSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            descending: true,
        }
    }
}

impl FromStr for JobPostSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let field = match name {
            "createdAt" => SortField::CreatedAt,
            "updatedAt" => SortField::UpdatedAt,
            "title" => SortField::Title,
            "department" => SortField::Department,
            "location" => SortField::Location,
            "type" => SortField::Type,
            _ => {
                return Err(format!(
                    "Invalid sort field '{}'. Allowed: createdAt, updatedAt, title, department, location, type",
                    name
                ));
            }
        };

        Ok(Self { field, descending })
    }
}

/// A fully parsed listing request handed to [`crate::storage::JobPostStore::find`].
#[derive(Debug, Clone, Default)]
pub struct JobPostQuery {
    pub filter: JobPostFilter,
    pub sort: JobPostSort,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateJobPostDto {
    #[validate(
        custom(function = "not_blank", message = "Please provide title, department, location, type, and description"),
        length(max = 200, message = "Title cannot exceed 200 characters")
    )]
    #[serde(deserialize_with = "trimmed")]
    pub title: String,
    #[validate(
        custom(function = "not_blank", message = "Please provide title, department, location, type, and description"),
        length(max = 100, message = "Department cannot exceed 100 characters")
    )]
    #[serde(deserialize_with = "trimmed")]
    pub department: String,
    #[validate(
        custom(function = "not_blank", message = "Please provide title, department, location, type, and description"),
        length(max = 100, message = "Location cannot exceed 100 characters")
    )]
    #[serde(deserialize_with = "trimmed")]
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[validate(custom(
        function = "not_blank",
        message = "Please provide title, department, location, type, and description"
    ))]
    #[serde(deserialize_with = "trimmed")]
    pub description: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Please provide at least one requirement"),
        custom(function = "requirements_not_blank", message = "Requirements cannot be blank")
    )]
    pub requirements: Vec<String>,
}

/// Partial update. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateJobPostDto {
    #[validate(
        custom(function = "not_blank", message = "Title cannot be blank"),
        length(max = 200, message = "Title cannot exceed 200 characters")
    )]
    #[serde(default, deserialize_with = "trimmed_option")]
    pub title: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Department cannot be blank"),
        length(max = 100, message = "Department cannot exceed 100 characters")
    )]
    #[serde(default, deserialize_with = "trimmed_option")]
    pub department: Option<String>,
    #[validate(
        custom(function = "not_blank", message = "Location cannot be blank"),
        length(max = 100, message = "Location cannot exceed 100 characters")
    )]
    #[serde(default, deserialize_with = "trimmed_option")]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    #[validate(custom(function = "not_blank", message = "Description cannot be blank"))]
    #[serde(default, deserialize_with = "trimmed_option")]
    pub description: Option<String>,
    #[validate(
        length(min = 1, message = "Requirements must be a non-empty array"),
        custom(function = "requirements_not_blank", message = "Requirements cannot be blank")
    )]
    pub requirements: Option<Vec<String>>,
}

impl UpdateJobPostDto {
    /// Applies the supplied fields to `post`, trimming strings. Returns
    /// whether anything was supplied.
    pub fn apply(self, post: &mut JobPost) -> bool {
        let mut changed = false;

        if let Some(title) = self.title {
            post.title = title.trim().to_string();
            changed = true;
        }
        if let Some(department) = self.department {
            post.department = department.trim().to_string();
            changed = true;
        }
        if let Some(location) = self.location {
            post.location = location.trim().to_string();
            changed = true;
        }
        if let Some(job_type) = self.job_type {
            post.job_type = job_type;
            changed = true;
        }
        if let Some(description) = self.description {
            post.description = description.trim().to_string();
            changed = true;
        }
        if let Some(requirements) = self.requirements {
            post.requirements = trim_all(requirements);
            changed = true;
        }

        changed
    }
}

pub(crate) fn trim_all(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.trim().to_string()).collect()
}

/// Query string of `GET /api/job-posts`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JobPostFilterParams {
    /// Case-insensitive substring match
    pub department: Option<String>,
    /// Case-insensitive substring match
    pub location: Option<String>,
    /// Exact job type, e.g. `Full-time`
    #[serde(rename = "type")]
    #[param(rename = "type")]
    pub job_type: Option<String>,
    /// `field` or `-field`; defaults to `-createdAt`
    pub sort: Option<String>,
    /// Page number, starting at 1
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[param(value_type = Option<i64>)]
    pub page: Option<i64>,
    /// Items per page, 1-100 (default 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[param(value_type = Option<i64>)]
    pub limit: Option<i64>,
}

impl JobPostFilterParams {
    /// Parses the raw query into a store query. Empty values are treated as
    /// absent.
    pub fn into_query(self) -> Result<JobPostQuery, String> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        let job_type = present(self.job_type)
            .map(|t| t.trim().parse::<JobType>())
            .transpose()?;

        let sort = present(self.sort)
            .map(|s| s.parse::<JobPostSort>())
            .transpose()?
            .unwrap_or_default();

        let pagination = PaginationParams {
            page: self.page,
            limit: self.limit,
        };

        Ok(JobPostQuery {
            filter: JobPostFilter {
                department: present(self.department),
                location: present(self.location),
                job_type,
            },
            sort,
            offset: pagination.offset(),
            limit: pagination.limit(),
        })
    }
}

/// Populated creator of a job post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreatorSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPostView {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub description: String,
    pub requirements: Vec<String>,
    /// `null` if the creator's record no longer exists
    pub created_by: Option<CreatorSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPostView {
    pub fn new(post: JobPost, creator: Option<CreatorSummary>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            department: post.department,
            location: post.location,
            job_type: post.job_type,
            description: post.description,
            requirements: post.requirements,
            created_by: creator,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPostResponse {
    pub job_post: JobPostView,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPostListResponse {
    pub job_posts: Vec<JobPostView>,
    pub pagination: PaginationMeta,
}
