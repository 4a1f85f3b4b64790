//! Bookshelf service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, BookPayload, BookShort},
    repository::Repository,
};

use super::validation::{check_book_payload, BookAction};

pub const MSG_ADDED: &str = "Buku berhasil ditambahkan";
pub const MSG_ADD_FAILED: &str = "Buku gagal ditambahkan";
pub const MSG_NOT_FOUND: &str = "Buku tidak ditemukan";
pub const MSG_UPDATED: &str = "Buku berhasil diperbarui";
pub const MSG_UPDATE_NOT_FOUND: &str = "Gagal memperbarui buku. Id tidak ditemukan";
pub const MSG_DELETED: &str = "Buku berhasil dihapus";
pub const MSG_DELETE_NOT_FOUND: &str = "Buku gagal dihapus. Id tidak ditemukan";

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a new book, returning its id
    pub async fn create(&self, payload: BookPayload) -> AppResult<String> {
        if let Err(e) = check_book_payload(&payload, BookAction::Add) {
            tracing::debug!("Book create rejected: {}", e);
            return Err(e);
        }

        let book = self
            .repository
            .books_create(payload)
            .await
            .ok_or_else(|| AppError::Internal(MSG_ADD_FAILED.to_string()))?;

        tracing::info!(book_id = %book.id, name = %book.name, "Book added");
        Ok(book.id)
    }

    pub async fn list(&self, filter: &BookFilter) -> Vec<BookShort> {
        self.repository.books_list(filter).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books_get_by_id(id)
            .await
            .ok_or_else(|| AppError::NotFound(MSG_NOT_FOUND.to_string()))
    }

    /// Validation runs before the id lookup
    pub async fn update(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        if let Err(e) = check_book_payload(&payload, BookAction::Update) {
            tracing::debug!(book_id = %id, "Book update rejected: {}", e);
            return Err(e);
        }

        self.repository
            .books_update(id, payload)
            .await
            .ok_or_else(|| AppError::NotFound(MSG_UPDATE_NOT_FOUND.to_string()))?;

        tracing::info!(book_id = %id, "Book updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository
            .books_delete(id)
            .await
            .ok_or_else(|| AppError::NotFound(MSG_DELETE_NOT_FOUND.to_string()))?;

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }

    /// Number of stored books (readiness reporting)
    pub async fn count(&self) -> usize {
        self.repository.books_count().await
    }
}
