use std::path::PathBuf;

use thiserror::Error;

use crate::model::{query::SearchQuery, results::SearchResultSet};

pub mod fixture;
pub mod options;
pub mod query;
pub mod response;
pub mod solr;

use self::{fixture::FixtureDirectory, options::SearchOptions, solr::SolrDirectory};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Unable to reach the search service: {0}")]
    UnableToReachService(String),
    #[error("Search service responded with status {0}")]
    UnsuccessfulStatus(u16),
    #[error("Unable to decode the search response: {0}")]
    UnableToDecodeResponse(String),
    #[error("Unable to load fixture directory [path: {0}]: {1}")]
    UnableToLoadFixture(PathBuf, String),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Result of a search that reached the service. A service failure is a `SearchError` instead
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    Found(SearchResultSet),
    /// The search ran but matched nothing
    Empty,
}

impl SearchOutcome {
    pub fn from_records(records: Vec<crate::model::person::PersonRecord>) -> Self {
        match SearchResultSet::new(records) {
            Some(results) => SearchOutcome::Found(results),
            None => SearchOutcome::Empty,
        }
    }
}

/// A read-only directory that can be searched by person name or title
pub trait DirectorySearch {
    fn search(&self, query: &SearchQuery) -> SearchResult<SearchOutcome>;
}

/// Selects which directory backend is used to answer searches
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEngine {
    /// Solr search service at the given base url, e.g. `https://asudir-solr.asu.edu/asudir/`
    Solr(String),
    /// JSON file in the search service's response shape, used for offline runs and tests
    Fixture(PathBuf),
}

impl SearchEngine {
    pub fn get_engine(options: SearchOptions) -> SearchResult<Box<dyn DirectorySearch + Send + Sync>> {
        match options.engine.clone() {
            SearchEngine::Solr(url) => {
                log::info!("Using Solr directory [url: {}]", url);
                Ok(Box::new(SolrDirectory::new(url, options)?))
            }
            SearchEngine::Fixture(path) => {
                log::info!("Using fixture directory [path: {}]", path.display());
                Ok(Box::new(FixtureDirectory::from_file(path, options)?))
            }
        }
    }
}
