use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Note;

/// Absent and `null` text fields both read as empty, so validation reports them.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteTransfer {
    /// Note ID, ignored on input
    #[serde(default)]
    pub id: Option<i64>,
    /// Note title, 1 to 255 characters
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        length(min = 1, message = "Note title cannot be empty."),
        custom(function = "crate::validation::check_title")
    )]
    pub title: String,
    /// Note body
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        length(min = 1, message = "Note body cannot be empty."),
        custom(function = "crate::validation::check_body")
    )]
    pub body: String,
    /// Time of the last modification, ignored on input
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl From<Note> for NoteTransfer {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            body: note.body,
            last_modified: Some(note.last_modified),
        }
    }
}
