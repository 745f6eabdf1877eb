//! SQLite storage backend for local development
//!
//! Selected by `file:` connection strings. `created_at` is stored as
//! ISO-8601 text and booleans as integers; sqlx decodes both into the
//! same row types the PostgreSQL backend uses.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::migrations;
use super::{Backend, Storage, StorageError};
use crate::models::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewRegion, NewUser,
    NewsletterSubscription, Region, User,
};

/// Storage over a SQLite pool
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    async fn migrate(&self) -> Result<(), StorageError> {
        migrations::run_sqlite(&self.pool).await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    #[tracing::instrument(name = "sqlite.create_user", skip_all, fields(username = %user.username))]
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, created_at)
            VALUES (?, ?, ?)
            RETURNING id, username, password, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn list_contact_submissions(&self) -> Result<Vec<ContactSubmission>, StorageError> {
        let rows = sqlx::query_as::<_, ContactSubmission>(
            r#"
            SELECT id, name, email, subject, message, consent, user_id, created_at
            FROM contact_submissions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_contact_submission(
        &self,
        id: i64,
    ) -> Result<Option<ContactSubmission>, StorageError> {
        let row = sqlx::query_as::<_, ContactSubmission>(
            r#"
            SELECT id, name, email, subject, message, consent, user_id, created_at
            FROM contact_submissions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    #[tracing::instrument(name = "sqlite.create_contact_submission", skip_all)]
    async fn create_contact_submission(
        &self,
        submission: NewContactSubmission,
    ) -> Result<ContactSubmission, StorageError> {
        let row = sqlx::query_as::<_, ContactSubmission>(
            r#"
            INSERT INTO contact_submissions
                (name, email, subject, message, consent, user_id, created_at)
            VALUES (?, ?, ?, ?, 1, ?, ?)
            RETURNING id, name, email, subject, message, consent, user_id, created_at
            "#,
        )
        .bind(&submission.name)
        .bind(submission.email.as_str())
        .bind(&submission.subject)
        .bind(&submission.message)
        .bind(submission.user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_active_newsletter_subscriptions(
        &self,
    ) -> Result<Vec<NewsletterSubscription>, StorageError> {
        let rows = sqlx::query_as::<_, NewsletterSubscription>(
            r#"
            SELECT id, email, active, created_at
            FROM newsletter_subscriptions
            WHERE active = 1
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_newsletter_subscription(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, StorageError> {
        let row = sqlx::query_as::<_, NewsletterSubscription>(
            "SELECT id, email, active, created_at FROM newsletter_subscriptions WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    #[tracing::instrument(name = "sqlite.subscribe", skip_all)]
    async fn create_newsletter_subscription(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> Result<NewsletterSubscription, StorageError> {
        let row = sqlx::query_as::<_, NewsletterSubscription>(
            r#"
            INSERT INTO newsletter_subscriptions (email, active, created_at)
            VALUES (?, 1, ?)
            ON CONFLICT (email) DO UPDATE SET active = 1
            RETURNING id, email, active, created_at
            "#,
        )
        .bind(subscription.email.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    #[tracing::instrument(name = "sqlite.unsubscribe", skip_all)]
    async fn deactivate_newsletter_subscription(
        &self,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, StorageError> {
        let row = sqlx::query_as::<_, NewsletterSubscription>(
            r#"
            UPDATE newsletter_subscriptions
            SET active = 0
            WHERE email = ?
            RETURNING id, email, active, created_at
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_regions(&self) -> Result<Vec<Region>, StorageError> {
        let rows = sqlx::query_as::<_, Region>(
            "SELECT id, title, description, sensors, created_at FROM regions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_region(&self, id: i64) -> Result<Option<Region>, StorageError> {
        let row = sqlx::query_as::<_, Region>(
            "SELECT id, title, description, sensors, created_at FROM regions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    #[tracing::instrument(name = "sqlite.create_region", skip_all, fields(title = %region.title))]
    async fn create_region(&self, region: NewRegion) -> Result<Region, StorageError> {
        let row = sqlx::query_as::<_, Region>(
            r#"
            INSERT INTO regions (title, description, sensors, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, description, sensors, created_at
            "#,
        )
        .bind(&region.title)
        .bind(&region.description)
        .bind(region.sensors)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    #[tracing::instrument(name = "sqlite.create_regions", skip_all, fields(count = regions.len()))]
    async fn create_regions(&self, regions: Vec<NewRegion>) -> Result<Vec<Region>, StorageError> {
        let created_at = Utc::now();
        // dropping the transaction on error rolls back the earlier rows
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(regions.len());
        for region in regions {
            let row = sqlx::query_as::<_, Region>(
                r#"
                INSERT INTO regions (title, description, sensors, created_at)
                VALUES (?, ?, ?, ?)
                RETURNING id, title, description, sensors, created_at
                "#,
            )
            .bind(&region.title)
            .bind(&region.description)
            .bind(region.sensors)
            .bind(created_at)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row);
        }
        tx.commit().await?;
        Ok(created)
    }
}
