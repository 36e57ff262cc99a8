//! Repository for the `myeongsik` table.
//!
//! All reads exclude soft-deleted rows unless stated otherwise, and every
//! owner-facing query includes `owner_id` in its WHERE clause so one user
//! can never touch another's records.

use sqlx::PgPool;

use manse_core::types::{DbId, OwnerId};

use crate::models::myeongsik::{CreateMyeongSik, MyeongSik, UpdateMyeongSik};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, birth_day, birth_time, calendar, gender, \
                        folder, memo, raw, created_at, updated_at, deleted_at";

/// Provides CRUD operations for myeongsik records.
pub struct MyeongSikRepo;

impl MyeongSikRepo {
    /// Insert a new record for `owner`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner: OwnerId,
        input: &CreateMyeongSik,
    ) -> Result<MyeongSik, sqlx::Error> {
        let query = format!(
            "INSERT INTO myeongsik
                (owner_id, name, birth_day, birth_time, calendar, gender, folder, memo, raw)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MyeongSik>(&query)
            .bind(owner)
            .bind(&input.name)
            .bind(input.birth_day)
            .bind(input.birth_time)
            .bind(&input.calendar)
            .bind(&input.gender)
            .bind(&input.folder)
            .bind(&input.memo)
            .bind(&input.raw)
            .fetch_one(pool)
            .await
    }

    /// Find a live record by id, scoped to `owner`.
    pub async fn find_by_id(
        pool: &PgPool,
        owner: OwnerId,
        id: DbId,
    ) -> Result<Option<MyeongSik>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM myeongsik
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, MyeongSik>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// List all live records for `owner`, newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner: OwnerId,
    ) -> Result<Vec<MyeongSik>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM myeongsik
             WHERE owner_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, MyeongSik>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }

    /// Count live records for `owner`.
    pub async fn count_for_owner(pool: &PgPool, owner: OwnerId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM myeongsik WHERE owner_id = $1 AND deleted_at IS NULL",
        )
        .bind(owner)
        .fetch_one(pool)
        .await
    }

    /// Update a live record's mutable fields. Only non-`None` fields are
    /// applied. Returns `None` if no live row matches `(id, owner)`.
    pub async fn update(
        pool: &PgPool,
        owner: OwnerId,
        id: DbId,
        input: &UpdateMyeongSik,
    ) -> Result<Option<MyeongSik>, sqlx::Error> {
        let query = format!(
            "UPDATE myeongsik SET
                name = COALESCE($3, name),
                folder = COALESCE($4, folder),
                memo = COALESCE($5, memo),
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MyeongSik>(&query)
            .bind(id)
            .bind(owner)
            .bind(&input.name)
            .bind(&input.folder)
            .bind(&input.memo)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a live record. Returns `true` if a row was marked.
    ///
    /// Idempotent: a second call on the same id returns `false`.
    pub async fn soft_delete(pool: &PgPool, owner: OwnerId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE myeongsik SET deleted_at = NOW()
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted record. Returns `true` if a row was
    /// restored.
    pub async fn restore(pool: &PgPool, owner: OwnerId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE myeongsik SET deleted_at = NULL, updated_at = NOW()
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently remove a record, soft-deleted or not. Returns `true`
    /// if a row was removed.
    pub async fn hard_delete(pool: &PgPool, owner: OwnerId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM myeongsik WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
