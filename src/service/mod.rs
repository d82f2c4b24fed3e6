use std::sync::Arc;

use crate::{
    dto::NoteTransfer,
    models::{self, Note},
    repository::{NoteStore, StoreError},
    validation::{ValidationErrors, validate},
};

#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error("Note not found")]
    NotFound,

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn invalid(e: ValidationErrors) -> NoteServiceError {
    let fields: Vec<&str> = e.0.iter().map(|f| f.field).collect();
    tracing::debug!("Note payload has invalid fields: {:?}", fields);
    NoteServiceError::Invalid(e.to_string())
}

/// Note lifecycle on top of a [`NoteStore`].
///
/// No lock is held between loading and saving a note in [`update_note`],
/// so two concurrent updates of the same note can overwrite each other.
///
/// [`update_note`]: NoteService::update_note
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteStore>,
}

impl NoteService {
    pub const fn new(repo: Arc<dyn NoteStore>) -> Self {
        Self { repo }
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteTransfer>, NoteServiceError> {
        let notes = self.repo.find_all().await?;
        Ok(notes.into_iter().map(NoteTransfer::from).collect())
    }

    pub async fn get_one_note(&self, id: i64) -> Result<NoteTransfer, NoteServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(NoteTransfer::from)
            .ok_or(NoteServiceError::NotFound)
    }

    /// Creates a note from the payload's title and body. Client supplied
    /// `id` and `lastModified` are ignored.
    pub async fn create_note(
        &self,
        request: NoteTransfer,
    ) -> Result<NoteTransfer, NoteServiceError> {
        validate(&request).map_err(invalid)?;

        let note = Note::new(request.title, request.body, models::now());
        let saved = self.repo.save(note).await?;

        tracing::info!("Created note {:?}", saved.id);

        Ok(saved.into())
    }

    /// Replaces title and body of an existing note.
    ///
    /// A missing note is reported before an invalid payload.
    pub async fn update_note(
        &self,
        id: i64,
        request: NoteTransfer,
    ) -> Result<NoteTransfer, NoteServiceError> {
        let mut note = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(NoteServiceError::NotFound)?;

        validate(&request).map_err(invalid)?;

        note.merge(request.title, request.body, models::now());

        let saved = match self.repo.save(note).await {
            Ok(saved) => saved,
            Err(StoreError::NoSuchRecord(_)) => return Err(NoteServiceError::NotFound),
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Updated note {}", id);

        Ok(saved.into())
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), NoteServiceError> {
        self.repo.delete_by_id(id).await?;

        tracing::info!("Deleted note {}", id);

        Ok(())
    }
}
