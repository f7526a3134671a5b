use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::normalizer::keyword_set;

/// A job posting together with the keyword set derived from its title and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "JobPosting", into = "JobPosting")]
pub struct JobListing {
    company: String,
    title: String,
    description: String,
    url: String,
    keywords: BTreeSet<String>,
}

impl JobListing {
    pub fn new(
        company: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let description = description.into();
        let keywords = keyword_set(&format!("{title} {description}"));

        Self {
            company: company.into(),
            title,
            description,
            url: url.into(),
            keywords,
        }
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sorted, deduplicated keywords.
    pub fn keywords(&self) -> &BTreeSet<String> {
        &self.keywords
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }
}

/// Wire shape of a posting in the JSON listing file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JobPosting {
    company: String,
    title: String,
    description: String,
    url: String,
}

impl From<JobPosting> for JobListing {
    fn from(posting: JobPosting) -> Self {
        JobListing::new(posting.company, posting.title, posting.description, posting.url)
    }
}

impl From<JobListing> for JobPosting {
    fn from(listing: JobListing) -> Self {
        JobPosting {
            company: listing.company,
            title: listing.title,
            description: listing.description,
            url: listing.url,
        }
    }
}
