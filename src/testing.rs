use std::{
    io,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use crate::{
    dto::NoteTransfer,
    models::Note,
    repository::{MemoryStore, NoteStore, StoreError},
};

pub fn payload(title: &str, body: &str) -> NoteTransfer {
    NoteTransfer {
        title: title.into(),
        body: body.into(),
        ..NoteTransfer::default()
    }
}

/// Memory store that counts `save` calls.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    saves: AtomicUsize,
}

impl CountingStore {
    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NoteStore for CountingStore {
    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, note: Note) -> Result<Note, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(note).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.inner.delete_by_id(id).await
    }
}

/// Store whose backend is always down.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Backend(Box::new(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        "store unavailable",
    )))
}

#[async_trait]
impl NoteStore for FailingStore {
    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Note>, StoreError> {
        Err(unavailable())
    }

    async fn save(&self, _note: Note) -> Result<Note, StoreError> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), StoreError> {
        Err(unavailable())
    }
}
