use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use super::{NoteStore, StoreError, embedded::migrations};
use crate::models::Note;

pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_dsn: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: Some(row.get("id")),
        title: row.get("title"),
        body: row.get("body"),
        last_modified: row.get("last_modified"),
    }
}

#[async_trait]
impl NoteStore for Repository {
    async fn find_all(&self) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, title, body, last_modified FROM notes ORDER BY id",
                &[],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT id, title, body, last_modified FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    async fn save(&self, note: Note) -> Result<Note, StoreError> {
        let Some(id) = note.id else {
            let row = self.client.query_one(
                "INSERT INTO notes (title, body, last_modified) VALUES ($1, $2, $3) RETURNING id, title, body, last_modified",
                &[&note.title, &note.body, &note.last_modified],
            ).await?;

            let saved = note_from_row(&row);
            tracing::debug!("Inserted note {:?}", saved.id);
            return Ok(saved);
        };

        let row = self.client.query_opt(
            "UPDATE notes SET title = $1, body = $2, last_modified = $3 WHERE id = $4 RETURNING id, title, body, last_modified",
            &[&note.title, &note.body, &note.last_modified, &id],
        ).await?;

        tracing::debug!("Updated note {}", id);
        row.as_ref()
            .map(note_from_row)
            .ok_or(StoreError::NoSuchRecord(id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let rows = self
            .client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        tracing::debug!("Deleted {} row(s) for note {}", rows, id);

        Ok(())
    }
}
