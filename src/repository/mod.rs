//! Repository layer over the in-memory book store

pub mod books;
pub mod store;

use std::sync::Arc;

use tokio::sync::RwLock;

pub use store::BookStore;

/// Main repository struct holding the shared book store.
///
/// Cloning is cheap; clones share the same store. Every repository method
/// takes the lock exactly once.
#[derive(Clone, Default)]
pub struct Repository {
    books: Arc<RwLock<BookStore>>,
}

impl Repository {
    /// Create a repository over an empty store
    pub fn new() -> Self {
        Self::default()
    }
}
