use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{NoteStore, StoreError};
use crate::models::Note;

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Note>,
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn save(&self, mut note: Note) -> Result<Note, StoreError> {
        let mut table = self.table.write().await;

        match note.id {
            Some(id) => {
                let row = table.rows.get_mut(&id).ok_or(StoreError::NoSuchRecord(id))?;
                *row = note.clone();
            }
            None => {
                table.last_id += 1;
                let id = table.last_id;
                note.id = Some(id);
                table.rows.insert(id, note.clone());
            }
        }

        Ok(note)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}
