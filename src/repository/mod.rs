mod embedded;
mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::Repository;

use async_trait::async_trait;

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No note with id {0} to update")]
    NoSuchRecord(i64),

    #[error("Store backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(e: tokio_postgres::Error) -> Self {
        Self::Backend(Box::new(e))
    }
}

/// Persistence capabilities the service needs over notes.
///
/// Implementations only guarantee single-record atomicity. Loading a note and
/// saving it back are two independent calls.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Returns every stored note. Order is implementation defined.
    async fn find_all(&self) -> Result<Vec<Note>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError>;

    /// Inserts the note when it has no id yet, otherwise updates the record
    /// with the same id. Returns the note as persisted.
    async fn save(&self, note: Note) -> Result<Note, StoreError>;

    /// Removes the note if present. Absent ids are not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}
