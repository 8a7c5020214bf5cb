//! Book catalog service

use crate::{
    error::AppResult,
    models::book::{BookPatch, BookView, SortKey},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Books ordered by `sort`, at most `count` of them
    pub async fn list(&self, count: i64, sort: SortKey) -> AppResult<Vec<BookView>> {
        let books = self.repository.books.list(count, sort).await?;
        Ok(books.into_iter().map(BookView::from).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<BookView> {
        Ok(self.repository.books.get_by_id(id).await?.into())
    }

    /// Create a book. Any `id` carried by the request is ignored.
    pub async fn create(&self, book: &BookView) -> AppResult<BookView> {
        let created = self.repository.books.create(&book.title, &book.author).await?;
        tracing::info!("Book created: id={} title={:?}", created.id, created.title);
        Ok(created.into())
    }

    pub async fn update(&self, id: i64, patch: &BookPatch) -> AppResult<BookView> {
        let updated = self.repository.books.update(id, patch).await?;
        tracing::info!("Book updated: id={}", updated.id);
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repository.books.delete(id).await?;
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// Delete all matching books and return how many were removed
    pub async fn delete_many(&self, ids: &[i64]) -> AppResult<usize> {
        let deleted = self.repository.books.delete_many(ids).await?;
        if deleted.len() < ids.len() {
            tracing::debug!(
                "Batch delete: {} of {} requested ids matched",
                deleted.len(),
                ids.len()
            );
        }
        tracing::info!("Books deleted: {:?}", deleted);
        Ok(deleted.len())
    }

    /// Seed the catalog with the default books when it is empty
    pub async fn seed_if_empty(&self) -> AppResult<u64> {
        let inserted = self.repository.books.seed_if_empty().await?;
        if inserted > 0 {
            tracing::info!("Seeded {} default books", inserted);
        }
        Ok(inserted)
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.books.ping().await
    }
}
