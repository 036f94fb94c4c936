use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use models::book::{Book, BookPatch, NewBook, Shelf};

use crate::errors::ServiceError;
use crate::storage::JsonDocStore;

/// Repository for the book collection, persisted through [`JsonDocStore`].
///
/// Handlers never touch the file directly; every mutation goes through the
/// store's read-modify-write helper, which rewrites the whole file. Two
/// overlapping writers can still lose an update at the file level; that is an
/// accepted limitation of the single-file design.
#[derive(Clone)]
pub struct BookService {
    store: Arc<JsonDocStore<Shelf>>,
}

impl BookService {
    /// Open (or seed) the backing file at `path`.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonDocStore::new(path, Shelf::seed()).await?;
        Ok(Arc::new(Self { store }))
    }

    /// All books, in insertion order.
    pub async fn list(&self) -> Vec<Book> {
        self.store.read(|shelf| shelf.books.clone()).await
    }

    /// Linear scan by id.
    pub async fn get(&self, id: &str) -> Result<Book, ServiceError> {
        self.store
            .read(|shelf| shelf.books.iter().find(|b| b.id == id).cloned())
            .await
            .ok_or_else(|| ServiceError::not_found("book"))
    }

    /// Validate, assign a fresh id, stamp `created_at`, append, persist.
    pub async fn create(&self, input: NewBook) -> Result<Book, ServiceError> {
        let (title, author) = input.validate()?;
        let book = Book {
            id: Uuid::new_v4().to_string(),
            title,
            author,
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        let created = self
            .store
            .update(|shelf| {
                shelf.books.push(book.clone());
                Ok(book.clone())
            })
            .await?;
        info!(id = %created.id, title = %created.title, "created book");
        Ok(created)
    }

    /// Merge the provided fields onto an existing record and stamp
    /// `updated_at`. Validation runs before the id lookup, so a bad payload
    /// for an unknown id is still a validation error.
    pub async fn update(&self, id: &str, patch: BookPatch) -> Result<Book, ServiceError> {
        let (title, author) = patch.validate()?;
        let updated = self
            .store
            .update(|shelf| {
                let book = shelf
                    .books
                    .iter_mut()
                    .find(|b| b.id == id)
                    .ok_or_else(|| ServiceError::not_found("book"))?;
                if let Some(title) = title {
                    book.title = title;
                }
                if let Some(author) = author {
                    book.author = author;
                }
                book.updated_at = Some(Utc::now());
                Ok(book.clone())
            })
            .await?;
        info!(id = %updated.id, "updated book");
        Ok(updated)
    }

    /// Remove the record at the matched position and return it.
    pub async fn delete(&self, id: &str) -> Result<Book, ServiceError> {
        let removed = self
            .store
            .update(|shelf| {
                let index = shelf
                    .books
                    .iter()
                    .position(|b| b.id == id)
                    .ok_or_else(|| ServiceError::not_found("book"))?;
                Ok(shelf.books.remove(index))
            })
            .await?;
        info!(id = %removed.id, "deleted book");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("books_{}_{}.json", tag, Uuid::new_v4()))
    }

    #[tokio::test]
    async fn fresh_store_is_seeded() -> Result<(), anyhow::Error> {
        let tmp = temp_db("seed");
        let books = BookService::new(&tmp).await?;
        let all = books.list().await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].title, "The Hobbit");
        assert!(all.iter().all(|b| b.created_at.is_none()));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn create_get_delete_round_trip() -> Result<(), anyhow::Error> {
        let tmp = temp_db("crud");
        let books = BookService::new(&tmp).await?;

        let input = NewBook { title: Some("Dune".into()), author: Some("Frank Herbert".into()) };
        let created = books.create(input).await?;
        assert_eq!(created.title, "Dune");
        assert!(created.created_at.is_some());
        assert!(created.updated_at.is_none());

        // id is unique among existing ids and immediately retrievable
        let all = books.list().await;
        assert_eq!(all.iter().filter(|b| b.id == created.id).count(), 1);
        let fetched = books.get(&created.id).await?;
        assert_eq!(fetched, created);

        let removed = books.delete(&created.id).await?;
        assert_eq!(removed.id, created.id);
        assert!(matches!(books.get(&created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(books.delete(&created.id).await, Err(ServiceError::NotFound(_))));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_merges_and_preserves_other_fields() -> Result<(), anyhow::Error> {
        let tmp = temp_db("update");
        let books = BookService::new(&tmp).await?;

        let patch = BookPatch { title: None, author: Some("  Eric Arthur Blair ".into()) };
        let updated = books.update("3", patch).await?;
        assert_eq!(updated.title, "1984");
        assert_eq!(updated.author, "Eric Arthur Blair");
        assert!(updated.updated_at.is_some());

        // persisted: a second instance sees the merge
        let reopened = BookService::new(&tmp).await?;
        let again = reopened.get("3").await?;
        assert_eq!(again.author, "Eric Arthur Blair");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_input_does_not_persist() -> Result<(), anyhow::Error> {
        let tmp = temp_db("invalid");
        let books = BookService::new(&tmp).await?;

        let blank = NewBook { title: Some("   ".into()), author: Some("A".into()) };
        assert!(matches!(books.create(blank).await, Err(ServiceError::Model(_))));

        let empty_patch = BookPatch::default();
        assert!(matches!(books.update("1", empty_patch).await, Err(ServiceError::Model(_))));

        let unchanged = books.get("1").await?;
        assert_eq!(unchanged.title, "The Hobbit");
        assert!(unchanged.updated_at.is_none());
        assert_eq!(books.list().await.len(), 3);

        // bad payload for an unknown id is still a validation error
        let blank_patch = BookPatch { title: Some("".into()), author: None };
        assert!(matches!(books.update("no-such-id", blank_patch).await, Err(ServiceError::Model(_))));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let tmp = temp_db("missing");
        let books = BookService::new(&tmp).await?;

        let patch = BookPatch { title: Some("X".into()), author: None };
        assert!(matches!(books.update("no-such-id", patch).await, Err(ServiceError::NotFound(_))));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
