use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::matcher::{KeywordMatcher, KeywordQuery, MatchResult};
use super::source::{JobSource, SourceError};
use super::tracker::{ApplicationSubmission, ApplicationTracker, TrackerError};

/// Candidate details attached to every submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateProfile {
    name: String,
    email: String,
    resume_path: PathBuf,
    cover_letter_template: Option<String>,
}

impl CandidateProfile {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        resume_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            resume_path: resume_path.into(),
            cover_letter_template: None,
        }
    }

    pub fn with_cover_letter_template(mut self, template: impl Into<String>) -> Self {
        self.cover_letter_template = Some(template.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn resume_path(&self) -> &Path {
        &self.resume_path
    }

    pub fn cover_letter_template(&self) -> Option<&str> {
        self.cover_letter_template.as_deref()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Ties a listing source, keyword matcher, candidate and tracker together.
pub struct JobApplicationAgent<S> {
    source: S,
    tracker: ApplicationTracker,
    candidate: CandidateProfile,
    matcher: KeywordMatcher,
}

impl<S> JobApplicationAgent<S>
where
    S: JobSource,
{
    pub fn new(
        source: S,
        tracker: ApplicationTracker,
        candidate: CandidateProfile,
        matcher: KeywordMatcher,
    ) -> Self {
        Self {
            source,
            tracker,
            candidate,
            matcher,
        }
    }

    pub fn candidate(&self) -> &CandidateProfile {
        &self.candidate
    }

    pub fn tracker(&self) -> &ApplicationTracker {
        &self.tracker
    }

    /// Ranks listings from the source against the desired keywords.
    pub fn find_matches<I, K>(&self, desired_keywords: I) -> Result<Vec<MatchResult>, AgentError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let query = KeywordQuery::new(desired_keywords);
        let listings = self.source.job_listings()?;
        let total = listings.len();
        let matches = self.matcher.rank(listings, &query);

        info!(
            keywords = query.len(),
            listings = total,
            matches = matches.len(),
            threshold = self.matcher.threshold(),
            "scored job listings"
        );
        Ok(matches)
    }

    /// Records an application for every match and returns the ranked matches.
    pub fn apply_to_matches<I, K>(
        &self,
        desired_keywords: I,
    ) -> Result<Vec<MatchResult>, AgentError>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let matches = self.find_matches(desired_keywords)?;
        for found in &matches {
            self.submit_application(found)?;
        }
        Ok(matches)
    }

    // Only the local log is written; there is no outbound delivery channel.
    fn submit_application(&self, found: &MatchResult) -> Result<(), TrackerError> {
        let listing = &found.listing;
        let resume_path = self.candidate.resume_path.to_string_lossy();
        let record = self.tracker.record_application(ApplicationSubmission {
            company: listing.company(),
            title: listing.title(),
            url: listing.url(),
            candidate_name: &self.candidate.name,
            candidate_email: &self.candidate.email,
            resume_path: &resume_path,
        })?;

        info!(
            company = %record.company,
            title = %record.title,
            score = found.score,
            cover_letter = self.candidate.cover_letter_template().is_some(),
            "submitted application"
        );
        Ok(())
    }
}
