use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the microsecond precision `TIMESTAMPTZ` keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Persisted note record. `id` stays `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: Option<i64>,
    pub title: String,
    pub body: String,
    pub last_modified: DateTime<Utc>,
}

impl Note {
    pub const fn new(title: String, body: String, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title,
            body,
            last_modified: now,
        }
    }

    /// Copies the incoming fields onto this note and re-stamps it with `now`.
    pub fn merge(&mut self, title: String, body: String, now: DateTime<Utc>) {
        self.title = title;
        self.body = body;
        self.last_modified = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;

    #[test]
    fn now_drops_sub_microsecond_digits() {
        assert_eq!(now().timestamp_subsec_nanos() % 1_000, 0);
    }

    #[test]
    fn new_note_has_no_id() {
        let now = Utc::now();
        let note = Note::new("title".into(), "body".into(), now);

        assert_eq!(note.id, None);
        assert_eq!(note.last_modified, now);
    }

    #[test]
    fn merge_keeps_id_and_restamps() {
        let created = Utc::now() - Duration::minutes(5);
        let mut note = Note {
            id: Some(7),
            title: "old".into(),
            body: "old body".into(),
            last_modified: created,
        };

        let now = Utc::now();
        note.merge("new".into(), "new body".into(), now);

        assert_eq!(note.id, Some(7));
        assert_eq!(note.title, "new");
        assert_eq!(note.body, "new body");
        assert_eq!(note.last_modified, now);
    }
}
