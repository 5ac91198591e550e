//! MySQL implementation of the RevocationRepository trait.
//!
//! One row per user in `invalidated_tokens`, keyed by email. The primary key
//! makes `INSERT IGNORE` an atomic insert-if-absent.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use cadence_core::domain::entities::revocation::RevocationRecord;
use cadence_core::errors::DomainError;
use cadence_core::repositories::RevocationRepository;

use crate::InfrastructureError;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS invalidated_tokens (
        email VARCHAR(255) NOT NULL PRIMARY KEY,
        invalidated_before BIGINT NOT NULL
    )
"#;

/// MySQL implementation of RevocationRepository
pub struct MySqlRevocationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevocationRepository {
    /// Create a new MySQL revocation repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create the `invalidated_tokens` table if it does not exist
    pub async fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        tracing::debug!("invalidated_tokens table ready");
        Ok(())
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RevocationRecord, DomainError> {
        let email: String = row
            .try_get("email")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get email: {}", e) })?;
        let invalidated_before: i64 = row
            .try_get("invalidated_before")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get invalidated_before: {}", e),
            })?;

        Ok(RevocationRecord::new(email, invalidated_before))
    }
}

#[async_trait]
impl RevocationRepository for MySqlRevocationRepository {
    async fn get(&self, email: &str) -> Result<Option<RevocationRecord>, DomainError> {
        let query = r#"
            SELECT email, invalidated_before
            FROM invalidated_tokens
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find revocation record: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists(&self, email: &str) -> Result<bool, DomainError> {
        let query = "SELECT COUNT(*) AS count FROM invalidated_tokens WHERE email = ?";

        let row = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check revocation record: {}", e),
            })?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get count: {}", e) })?;

        Ok(count > 0)
    }

    async fn put(&self, record: RevocationRecord) -> Result<RevocationRecord, DomainError> {
        let query = r#"
            INSERT INTO invalidated_tokens (email, invalidated_before)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE invalidated_before = VALUES(invalidated_before)
        "#;

        sqlx::query(query)
            .bind(&record.email)
            .bind(record.invalidated_before)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to save revocation record: {}", e),
            })?;

        Ok(record)
    }

    async fn put_if_absent(&self, record: RevocationRecord) -> Result<bool, DomainError> {
        let query = r#"
            INSERT IGNORE INTO invalidated_tokens (email, invalidated_before)
            VALUES (?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&record.email)
            .bind(record.invalidated_before)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to insert revocation record: {}", e),
            })?;

        Ok(result.rows_affected() == 1)
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database health check failed: {}", e),
            })?;
        Ok(())
    }
}
