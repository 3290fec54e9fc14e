use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::normalize::clean_text;

/// Ledger column order; the header row is written on first use.
pub const LEDGER_HEADER: [&str; 3] = ["resume_text", "jd_text", "human_score"];

/// One human-labeled training row. Texts are stored in normalized form and
/// the score stays on the same 0-100 scale the scorer emits; rows are never
/// rescaled, mutated, or deleted once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub resume_text: String,
    pub jd_text: String,
    pub human_score: f64,
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("{0} text is empty after normalization")]
    EmptyInput(&'static str),
    #[error("human score {0} is outside the 0-100 scale")]
    ScoreOutOfRange(f64),
    #[error("feedback ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("feedback ledger row handling failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Append-only CSV ledger of human-reviewed match scores, the raw material
/// for embedder fine-tuning. Appends are serialized through a mutex and each
/// row is written with a single syscall, so concurrent submissions never
/// interleave and a failed append leaves nothing behind.
pub struct FeedbackStore {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Normalize both texts and append one ScoreRecord row, creating the
    /// ledger with its header first if absent.
    pub fn append(
        &self,
        resume_raw: &str,
        jd_raw: &str,
        human_score: f64,
    ) -> Result<(), FeedbackError> {
        if !(0.0..=100.0).contains(&human_score) {
            return Err(FeedbackError::ScoreOutOfRange(human_score));
        }

        let resume_text = clean_text(resume_raw);
        if resume_text.is_empty() {
            return Err(FeedbackError::EmptyInput("resume"));
        }
        let jd_text = clean_text(jd_raw);
        if jd_text.is_empty() {
            return Err(FeedbackError::EmptyInput("job description"));
        }

        // Serialize the full row up front; only a complete row ever reaches
        // the file descriptor.
        let row = encode_row(&ScoreRecord {
            resume_text,
            jd_text,
            human_score,
        })?;

        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        self.ensure_ledger()?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(&row)?;
        file.flush()?;

        debug!(path = %self.path.display(), human_score, "feedback row appended");
        Ok(())
    }

    /// Read every ledger row back for the fine-tuning pipeline. Rows that no
    /// longer parse are skipped with a warning rather than failing the whole
    /// read; submission order is preserved.
    pub fn read_records(&self) -> Result<Vec<ScoreRecord>, FeedbackError> {
        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for row in reader.deserialize::<ScoreRecord>() {
            match row {
                Ok(record) => records.push(record),
                Err(err) => warn!(error = %err, "skipping unreadable feedback row"),
            }
        }
        Ok(records)
    }

    fn ensure_ledger(&self) -> Result<(), FeedbackError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(LEDGER_HEADER)?;
        writer.flush()?;
        Ok(())
    }
}

fn encode_row(record: &ScoreRecord) -> Result<Vec<u8>, FeedbackError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.serialize(record)?;
    writer.flush()?;
    writer.into_inner().map_err(|err| {
        FeedbackError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            err.to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FeedbackStore {
        FeedbackStore::new(dir.path().join("training_data.csv"))
    }

    #[test]
    fn creates_ledger_with_header_on_first_append() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .append("Python developer.", "Looking for Python!", 85.0)
            .unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let mut lines = raw.lines();
        assert_eq!(lines.next(), Some("resume_text,jd_text,human_score"));
        assert_eq!(
            lines.next(),
            Some("python developer,looking for python,85.0")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn appended_rows_round_trip_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append("First resume", "First JD", 10.0).unwrap();
        store.append("Second resume", "Second JD", 92.5).unwrap();

        let records = store.read_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].resume_text, "first resume");
        assert_eq!(records[0].human_score, 10.0);
        assert_eq!(records[1].jd_text, "second jd");
        assert_eq!(records[1].human_score, 92.5);
    }

    #[test]
    fn rejects_scores_outside_the_scale() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        for bad in [-0.1, 100.1, f64::NAN] {
            let err = store.append("resume", "jd", bad).unwrap_err();
            assert!(matches!(err, FeedbackError::ScoreOutOfRange(_)));
        }
        assert!(!store.path().exists(), "no row may be written on failure");
    }

    #[test]
    fn rejects_blank_inputs_without_touching_the_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let err = store.append(" !!! ", "jd text", 50.0).unwrap_err();
        assert!(matches!(err, FeedbackError::EmptyInput("resume")));

        let err = store.append("resume text", "  ", 50.0).unwrap_err();
        assert!(matches!(err, FeedbackError::EmptyInput("job description")));

        assert!(!store.path().exists());
    }

    #[test]
    fn read_records_on_missing_ledger_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).read_records().unwrap().is_empty());
    }

    #[test]
    fn unparsable_rows_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append("good resume", "good jd", 70.0).unwrap();

        let mut file = OpenOptions::new().append(true).open(store.path()).unwrap();
        file.write_all(b"broken resume,broken jd,not-a-number\n")
            .unwrap();
        store.append("another resume", "another jd", 30.0).unwrap();

        let records = store.read_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].human_score, 70.0);
        assert_eq!(records[1].human_score, 30.0);
    }

    #[test]
    fn commas_in_text_are_quoted_not_split() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        // clean_text strips commas, so normalized text never carries them;
        // this guards the encoder anyway.
        store.append("rust, tokio, and axum", "backend, senior", 88.0).unwrap();
        let records = store.read_records().unwrap();
        assert_eq!(records[0].resume_text, "rust tokio and axum");
    }
}
