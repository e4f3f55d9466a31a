//! Resolution of a verified token subject into the caller's [`Identity`].

use tracing::instrument;
use uuid::Uuid;

use jobboard_auth::{AuthError, Subject};
use jobboard_config::{AuthConfig, SuperadminConfig};
use jobboard_core::AppError;

use crate::modules::auth::model::{CredentialRecord, UserSummary};
use crate::storage::CredentialStore;

pub const SUPERADMIN_NAME: &str = "Super Admin";

/// The authenticated caller of a request. Built per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: Subject,
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn superadmin(config: &SuperadminConfig) -> Self {
        Self {
            subject: Subject::Superadmin,
            name: SUPERADMIN_NAME.to_string(),
            email: config.email.clone(),
        }
    }

    pub fn from_record(record: &CredentialRecord) -> Self {
        Self {
            subject: Subject::User(record.id),
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }

    /// `"superadmin"` or the record id.
    pub fn id(&self) -> String {
        self.subject.to_string()
    }

    pub fn is_superadmin(&self) -> bool {
        self.subject.is_superadmin()
    }

    /// The backing record id; `None` for the superadmin.
    pub fn user_id(&self) -> Option<Uuid> {
        match self.subject {
            Subject::User(id) => Some(id),
            Subject::Superadmin => None,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Maps a token subject to an [`Identity`].
///
/// The superadmin never touches the store. A user subject costs exactly one
/// `find_by_id`; a missing record is [`AuthError::UnknownSubject`].
#[instrument(skip_all, fields(subject = %subject))]
pub async fn resolve_identity(
    subject: Subject,
    store: &dyn CredentialStore,
    config: &AuthConfig,
) -> Result<Identity, AppError> {
    match subject {
        Subject::Superadmin => config
            .superadmin
            .as_ref()
            .map(Identity::superadmin)
            .ok_or_else(|| AuthError::UnknownSubject.into()),
        Subject::User(id) => store
            .find_by_id(id)
            .await?
            .map(|record| Identity::from_record(&record))
            .ok_or_else(|| AuthError::UnknownSubject.into()),
    }
}
