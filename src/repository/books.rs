//! Book domain methods on Repository

use super::Repository;
use crate::models::book::{
    generate_book_id, timestamp_now, Book, BookFilter, BookPayload, BookShort,
};

impl Repository {
    /// Append a new book built from a validated payload.
    ///
    /// Returns `None` when the record is not observable exactly once after
    /// the append.
    pub async fn books_create(&self, payload: BookPayload) -> Option<Book> {
        let mut store = self.books.write().await;

        let mut id = generate_book_id();
        while store.contains(&id) {
            id = generate_book_id();
        }

        let book = Book::new(id, payload, timestamp_now());
        store.append(book.clone());

        (store.count(&book.id) == 1).then_some(book)
    }

    /// List books matching the filter, in insertion order
    pub async fn books_list(&self, filter: &BookFilter) -> Vec<BookShort> {
        let store = self.books.read().await;
        store
            .iter()
            .filter(|book| filter.matches_name(book))
            .filter(|book| filter.matches_reading(book))
            .filter(|book| filter.matches_finished(book))
            .map(Book::short)
            .collect()
    }

    /// Get a book by id, with `finished` recomputed
    pub async fn books_get_by_id(&self, id: &str) -> Option<Book> {
        let store = self.books.read().await;
        store.find(id).map(Book::detail)
    }

    /// Replace the mutable fields of a book in place
    pub async fn books_update(&self, id: &str, payload: BookPayload) -> Option<Book> {
        let mut store = self.books.write().await;
        let index = store.position(id)?;

        let mut book = store.find(id)?.clone();
        book.apply(payload, timestamp_now());
        store.replace_at(index, book.clone())?;
        Some(book)
    }

    /// Remove a book, returning the removed record
    pub async fn books_delete(&self, id: &str) -> Option<Book> {
        let mut store = self.books.write().await;
        let index = store.position(id)?;
        store.remove_at(index)
    }

    /// Number of books on the shelf
    pub async fn books_count(&self) -> usize {
        self.books.read().await.len()
    }
}
