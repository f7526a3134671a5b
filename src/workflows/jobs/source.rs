use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::listing::JobListing;

/// Read-only supplier of job listings.
pub trait JobSource {
    fn job_listings(&self) -> Result<Vec<JobListing>, SourceError>;
}

/// Failure to read or decode a listing store.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read job listings from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid job listing data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Listings stored as a JSON array of `{company, title, description, url}` objects.
#[derive(Debug, Clone)]
pub struct LocalJobSource {
    path: PathBuf,
}

impl LocalJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<JobListing>, SourceError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl JobSource for LocalJobSource {
    fn job_listings(&self) -> Result<Vec<JobListing>, SourceError> {
        let file = File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let listings = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %self.path.display(), count = listings.len(), "loaded job listings");
        Ok(listings)
    }
}

/// Fixed set of listings held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobSource {
    listings: Vec<JobListing>,
}

impl InMemoryJobSource {
    pub fn new(listings: Vec<JobListing>) -> Self {
        Self { listings }
    }
}

impl FromIterator<JobListing> for InMemoryJobSource {
    fn from_iter<T: IntoIterator<Item = JobListing>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl JobSource for InMemoryJobSource {
    fn job_listings(&self) -> Result<Vec<JobListing>, SourceError> {
        Ok(self.listings.clone())
    }
}
