//! Books repository for database operations.
//!
//! Every public method runs inside its own transaction: it is committed on the
//! success path and rolled back when the `Transaction` is dropped on any early
//! return.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPatch, SortKey, DEFAULT_BOOKS},
};

/// Message for a single id without a matching row
pub const BOOK_NOT_FOUND: &str = "Book not found";

/// Message for a batch where no id matched
pub const NO_MATCHING_BOOKS: &str = "No matching books found";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // STARTUP
    // =========================================================================

    /// Insert the default books if the table is empty.
    ///
    /// Count-then-insert is not atomic across processes: two instances starting
    /// against the same empty database may both seed.
    pub async fn seed_if_empty(&self) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&mut *tx)
            .await?;
        tracing::info!("Seeding books, current count: {}", count);

        if count > 0 {
            tx.commit().await?;
            return Ok(0);
        }

        for (title, author) in DEFAULT_BOOKS {
            sqlx::query("INSERT INTO books (title, author) VALUES ($1, $2)")
                .bind(title)
                .bind(author)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(DEFAULT_BOOKS.len() as u64)
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List books ordered by `sort` (ties broken by id), truncated to `count`
    pub async fn list(&self, count: i64, sort: SortKey) -> AppResult<Vec<Book>> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            "SELECT id, title, author FROM books ORDER BY {}, id LIMIT $1",
            sort.column()
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(count)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>("SELECT id, title, author FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

        tx.commit().await?;
        Ok(book)
    }

    /// Liveness probe for the readiness endpoint
    pub async fn ping(&self) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT 1").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    // WRITE
    // =========================================================================

    /// Insert a new book; the id is assigned by the database
    pub async fn create(&self, title: &str, author: &str) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author)
            VALUES ($1, $2)
            RETURNING id, title, author
            "#,
        )
        .bind(title)
        .bind(author)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Apply a partial update to an existing book
    pub async fn update(&self, id: i64, patch: &BookPatch) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Book>(
            "SELECT id, title, author FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(BOOK_NOT_FOUND.to_string()))?;

        let patched = patch.apply(current);

        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $2, author = $3
            WHERE id = $1
            RETURNING id, title, author
            "#,
        )
        .bind(id)
        .bind(&patched.title)
        .bind(&patched.author)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Delete a single book
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(BOOK_NOT_FOUND.to_string()));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete every book whose id is in `ids`.
    ///
    /// Unknown ids are ignored; returns the ids actually deleted. Fails with
    /// NotFound when nothing matched.
    pub async fn delete_many(&self, ids: &[i64]) -> AppResult<Vec<i64>> {
        let mut tx = self.pool.begin().await?;

        let deleted: Vec<i64> = sqlx::query_scalar("DELETE FROM books WHERE id = ANY($1) RETURNING id")
            .bind(ids)
            .fetch_all(&mut *tx)
            .await?;

        if deleted.is_empty() {
            return Err(AppError::NotFound(NO_MATCHING_BOOKS.to_string()));
        }

        tx.commit().await?;
        Ok(deleted)
    }
}
