//! Keyword matching of job listings and the append-only application log.

pub mod agent;
pub mod listing;
pub mod matcher;
mod normalizer;
pub mod source;
pub mod tracker;

pub use agent::{AgentError, CandidateProfile, JobApplicationAgent};
pub use listing::JobListing;
pub use matcher::{KeywordMatcher, KeywordQuery, MatchError, MatchResult};
pub use source::{InMemoryJobSource, JobSource, LocalJobSource, SourceError};
pub use tracker::{
    ApplicationRecord, ApplicationSubmission, ApplicationTracker, TrackerError, LOG_HEADER,
};
