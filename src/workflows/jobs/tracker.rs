use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

pub const LOG_HEADER: [&str; 7] = [
    "timestamp",
    "company",
    "title",
    "url",
    "candidate_name",
    "candidate_email",
    "resume_path",
];

/// One submitted application as stored in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub company: String,
    pub title: String,
    pub url: String,
    pub candidate_name: String,
    pub candidate_email: String,
    pub resume_path: String,
}

/// Fields supplied when recording an application; the tracker adds the timestamp.
#[derive(Debug, Clone, Copy)]
pub struct ApplicationSubmission<'a> {
    pub company: &'a str,
    pub title: &'a str,
    pub url: &'a str,
    pub candidate_name: &'a str,
    pub candidate_email: &'a str,
    pub resume_path: &'a str,
}

impl ApplicationSubmission<'_> {
    fn into_record(self, timestamp: NaiveDateTime) -> ApplicationRecord {
        ApplicationRecord {
            timestamp,
            company: self.company.to_string(),
            title: self.title.to_string(),
            url: self.url.to_string(),
            candidate_name: self.candidate_name.to_string(),
            candidate_email: self.candidate_email.to_string(),
            resume_path: self.resume_path.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("application log {} is not accessible: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid application log data: {0}")]
    Csv(#[from] csv::Error),
}

/// Append-only CSV log of submitted applications.
///
/// The file is opened and closed on every call; nothing is held between calls.
#[derive(Debug, Clone)]
pub struct ApplicationTracker {
    path: PathBuf,
}

impl ApplicationTracker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row stamped with the current UTC time (whole seconds).
    pub fn record_application(
        &self,
        submission: ApplicationSubmission<'_>,
    ) -> Result<ApplicationRecord, TrackerError> {
        let timestamp = Utc::now().naive_utc().trunc_subsecs(0);
        let record = submission.into_record(timestamp);
        self.append(&record)?;
        Ok(record)
    }

    /// Reads every record back in the order it was written. A log that does
    /// not exist yet holds no applications.
    pub fn list_applications(&self) -> Result<Vec<ApplicationRecord>, TrackerError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        let mut reader = csv::ReaderBuilder::new().from_reader(file);
        let mut records = Vec::new();
        for row in reader.deserialize::<ApplicationRecord>() {
            records.push(row?);
        }
        Ok(records)
    }

    fn append(&self, record: &ApplicationRecord) -> Result<(), TrackerError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        let needs_header = file
            .metadata()
            .map_err(|source| self.io_error(source))?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(LOG_HEADER)?;
        }
        writer.serialize(record)?;
        writer.flush().map_err(|source| self.io_error(source))?;

        tracing::debug!(path = %self.path.display(), company = %record.company, "appended application");
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> TrackerError {
        TrackerError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub(super) fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn submission<'a>(company: &'a str, title: &'a str) -> ApplicationSubmission<'a> {
        ApplicationSubmission {
            company,
            title,
            url: "https://jobs.example/1",
            candidate_name: "Ada Lovelace",
            candidate_email: "ada@example.com",
            resume_path: "resumes/ada.pdf",
        }
    }

    #[test]
    fn first_record_writes_header() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tracker = ApplicationTracker::new(dir.path().join("applications.csv"));

        let record = tracker
            .record_application(submission("Acme", "Rust Engineer"))
            .expect("record written");

        let contents = std::fs::read_to_string(tracker.path()).expect("log readable");
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("timestamp,company,title,url,candidate_name,candidate_email,resume_path")
        );
        let row = lines.next().expect("data row present");
        assert!(row.starts_with(&record.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()));
        assert!(row.ends_with(",Acme,Rust Engineer,https://jobs.example/1,Ada Lovelace,ada@example.com,resumes/ada.pdf"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn timestamps_have_second_precision() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tracker = ApplicationTracker::new(dir.path().join("log.csv"));
        let record = tracker
            .record_application(submission("Acme", "Rust Engineer"))
            .expect("record written");
        assert_eq!(record.timestamp.nanosecond(), 0);
    }

    #[test]
    fn header_written_once_across_appends() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tracker = ApplicationTracker::new(dir.path().join("log.csv"));

        for title in ["One", "Two", "Three"] {
            tracker
                .record_application(submission("Acme", title))
                .expect("record written");
        }

        let contents = std::fs::read_to_string(tracker.path()).expect("log readable");
        assert_eq!(contents.matches("timestamp,company").count(), 1);
        assert_eq!(contents.lines().count(), 4);
    }

    #[test]
    fn list_returns_records_in_insertion_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tracker = ApplicationTracker::new(dir.path().join("log.csv"));

        let written: Vec<ApplicationRecord> = ["Initech", "Globex", "Acme"]
            .iter()
            .map(|company| {
                tracker
                    .record_application(submission(company, "Engineer"))
                    .expect("record written")
            })
            .collect();

        let listed = tracker.list_applications().expect("log lists");
        assert_eq!(listed, written);
    }

    #[test]
    fn fields_with_commas_and_quotes_survive_replay() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tracker = ApplicationTracker::new(dir.path().join("log.csv"));

        let record = tracker
            .record_application(submission("Acme, Inc.", "Engineer \"II\""))
            .expect("record written");

        let listed = tracker.list_applications().expect("log lists");
        assert_eq!(listed, vec![record]);
    }

    #[test]
    fn missing_log_lists_nothing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tracker = ApplicationTracker::new(dir.path().join("never-written.csv"));
        assert!(tracker.list_applications().expect("empty list").is_empty());
    }

    #[test]
    fn reads_log_with_header_only() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("log.csv");
        std::fs::write(&path, format!("{}\n", LOG_HEADER.join(","))).expect("seed header");

        let tracker = ApplicationTracker::new(&path);
        assert!(tracker.list_applications().expect("empty list").is_empty());

        tracker
            .record_application(submission("Acme", "Engineer"))
            .expect("record written");
        let contents = std::fs::read_to_string(&path).expect("log readable");
        assert_eq!(contents.matches("timestamp,company").count(), 1);
    }

    #[test]
    fn unwritable_path_reports_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let tracker = ApplicationTracker::new(dir.path().join("missing-dir").join("log.csv"));

        let err = tracker
            .record_application(submission("Acme", "Engineer"))
            .expect_err("parent directory does not exist");
        assert!(matches!(err, TrackerError::Io { .. }));
    }

    #[test]
    fn malformed_timestamp_is_rejected_on_replay() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("log.csv");
        std::fs::write(
            &path,
            "timestamp,company,title,url,candidate_name,candidate_email,resume_path\n\
yesterday,Acme,Engineer,u,Ada,ada@example.com,r.pdf\n",
        )
        .expect("seed log");

        let err = ApplicationTracker::new(&path)
            .list_applications()
            .expect_err("bad timestamp rejected");
        assert!(matches!(err, TrackerError::Csv(_)));
    }
}
