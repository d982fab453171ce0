use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

/// One persisted record: a question id with its subject and related topics.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    pub question: String,
    pub subject: String,
    pub related_topics: String,
    /// Local wall-clock time of the write, no offset.
    #[serde(with = "saved_at_format")]
    pub saved_at: NaiveDateTime,
}

/// Body of a save request. `savedAt` is always assigned by the store.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    pub id: i64,
    pub question: String,
    pub subject: String,
    pub related_topics: String,
}

impl SubmissionInput {
    pub fn into_submission(self, saved_at: NaiveDateTime) -> Submission {
        Submission {
            id: self.id,
            question: self.question,
            subject: self.subject,
            related_topics: self.related_topics,
            saved_at,
        }
    }
}

/// Result of an upsert: the record as written, and whether it replaced one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upserted {
    pub submission: Submission,
    pub replaced: bool,
}

impl Upserted {
    pub fn message(&self) -> String {
        let verb = if self.replaced { "Updated" } else { "Saved" };
        format!("{verb} related topics for question ID {}", self.submission.id)
    }
}

/// `YYYY-MM-DDTHH:MM:SS.ffffff`, fraction omitted when zero.
/// Reading also accepts RFC 3339 timestamps with an offset, keeping their local wall time.
mod saved_at_format {
    use chrono::{DateTime, NaiveDateTime, Timelike};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let format = if value.nanosecond() == 0 { "%Y-%m-%dT%H:%M:%S" } else { "%Y-%m-%dT%H:%M:%S%.6f" };
        serializer.collect_str(&value.format(format))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.naive_local()))
            .map_err(|e| D::Error::custom(format!("invalid savedAt {raw:?}: {e}")))
    }
}

/// Current local time at microsecond precision.
pub fn local_timestamp() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}
