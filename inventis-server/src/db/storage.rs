//! Storage interface shared by every backend

use async_trait::async_trait;

use crate::models::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewRegion, NewUser,
    NewsletterSubscription, Region, User,
};

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("unsupported database url scheme '{scheme}' (expected file:, sqlite:, postgres:// or postgresql://)")]
    UnsupportedUrl { scheme: String },
}

/// Which concrete store is behind a [`Storage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

/// Sole authority for reading and writing the site's tables.
///
/// Lookups return `Ok(None)` when nothing matches; only real faults are errors.
/// Creates return the persisted row with its server-assigned id and timestamp.
#[async_trait]
pub trait Storage: Send + Sync {
    fn backend(&self) -> Backend;

    /// Create missing tables. Safe to call on every start.
    async fn migrate(&self) -> Result<(), StorageError>;

    /// Round-trip a trivial query.
    async fn ping(&self) -> Result<(), StorageError>;

    // Users
    async fn get_user(&self, id: i64) -> Result<Option<User>, StorageError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    // Contact submissions
    async fn list_contact_submissions(&self) -> Result<Vec<ContactSubmission>, StorageError>;
    async fn get_contact_submission(&self, id: i64)
        -> Result<Option<ContactSubmission>, StorageError>;
    async fn create_contact_submission(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission, StorageError>;

    // Newsletter
    /// Active subscriptions only; the filter is part of the query.
    async fn list_active_newsletter_subscriptions(
        &self,
    ) -> Result<Vec<NewsletterSubscription>, StorageError>;
    async fn get_newsletter_subscription(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, StorageError>;
    /// Subscribe `email`, idempotently.
    ///
    /// - no row: insert one with `active = true`
    /// - inactive row: flip it to active and return it
    /// - active row: return it unchanged
    ///
    /// Runs as one upsert statement, so the unique email constraint is never
    /// tripped by concurrent subscribes.
    async fn create_newsletter_subscription(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> Result<NewsletterSubscription, StorageError>;
    /// Mark the subscription for `email` inactive. `None` if there is none.
    async fn deactivate_newsletter_subscription(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, StorageError>;

    // Regions
    async fn list_regions(&self) -> Result<Vec<Region>, StorageError>;
    async fn get_region(&self, id: i64) -> Result<Option<Region>, StorageError>;
    async fn create_region(&self, region: NewRegion) -> Result<Region, StorageError>;
    /// Insert every region or none of them, in one transaction.
    async fn create_regions(&self, regions: Vec<NewRegion>) -> Result<Vec<Region>, StorageError>;
}
