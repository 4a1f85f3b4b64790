//! Ordered in-memory book store

use crate::models::book::Book;

/// Ordered collection of book records.
///
/// Insertion order is preserved; nothing here reorders records.
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, book: Book) {
        self.books.push(book);
    }

    /// First record with the given id
    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Index of the first record with the given id
    pub fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Returns the previous record, or `None` if the index is out of range
    pub fn replace_at(&mut self, index: usize, book: Book) -> Option<Book> {
        let slot = self.books.get_mut(index)?;
        Some(std::mem::replace(slot, book))
    }

    /// Later records shift down by one
    pub fn remove_at(&mut self, index: usize) -> Option<Book> {
        if index < self.books.len() {
            Some(self.books.remove(index))
        } else {
            None
        }
    }

    /// Number of records carrying the given id
    pub fn count(&self, id: &str) -> usize {
        self.books.iter().filter(|book| book.id == id).count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
