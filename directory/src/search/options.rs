use crate::consts::consts::{DEFAULT_COLLECTION, DEFAULT_SEARCH_URL, RESPONSE_SIZE};

use super::SearchEngine;

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub engine: SearchEngine,
    pub collection: String,
    pub response_size: usize,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl SearchOptions {
    pub fn set_engine(mut self, engine: SearchEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Solr collection (core) holding the people directory, queried at `<url>/<collection>/select`
    pub fn set_collection(mut self, collection: String) -> Self {
        self.collection = collection;
        self
    }

    /// Maximum number of records kept from a single search
    pub fn set_response_size(mut self, response_size: usize) -> Self {
        self.response_size = response_size;
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            engine: SearchEngine::Solr(DEFAULT_SEARCH_URL.to_string()),
            collection: DEFAULT_COLLECTION.to_string(),
            response_size: RESPONSE_SIZE,
        }
    }
}
