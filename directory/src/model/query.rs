use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SearchKind {
    People,
    Title,
}

#[derive(Error, Debug, PartialEq)]
pub enum QueryError {
    #[error("No search terms were provided for a {0} search")]
    EmptyTerms(SearchKind),
}

/// A validated search, also echoed back in "more results" responses without re-querying
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SearchQuery {
    #[serde(rename_all = "camelCase")]
    People {
        first_name: String,
        last_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Title { title_search_phrase: String },
}

impl SearchQuery {
    /// At least one of the names must contain something other than whitespace
    pub fn people(first_name: Option<&str>, last_name: Option<&str>) -> Result<Self, QueryError> {
        let first_name = first_name.unwrap_or_default().trim().to_string();
        let last_name = last_name.unwrap_or_default().trim().to_string();

        if first_name.is_empty() && last_name.is_empty() {
            return Err(QueryError::EmptyTerms(SearchKind::People));
        }

        Ok(SearchQuery::People {
            first_name,
            last_name,
        })
    }

    pub fn title(phrase: Option<&str>) -> Result<Self, QueryError> {
        let title_search_phrase = phrase.unwrap_or_default().trim().to_string();

        if title_search_phrase.is_empty() {
            return Err(QueryError::EmptyTerms(SearchKind::Title));
        }

        Ok(SearchQuery::Title {
            title_search_phrase,
        })
    }

    pub fn kind(&self) -> SearchKind {
        match self {
            SearchQuery::People { .. } => SearchKind::People,
            SearchQuery::Title { .. } => SearchKind::Title,
        }
    }

    /// The terms as the user said them, e.g. `Michael Crow` or `dean of students`
    pub fn terms(&self) -> String {
        match self {
            SearchQuery::People {
                first_name,
                last_name,
            } => format!("{} {}", first_name, last_name).trim().to_string(),
            SearchQuery::Title {
                title_search_phrase,
            } => title_search_phrase.clone(),
        }
    }

    /// Human readable form used in speech and card titles, e.g. `Michael Crow in people`
    pub fn describe(&self) -> String {
        match self {
            SearchQuery::People { .. } => format!("{} in people", self.terms()),
            SearchQuery::Title { .. } => format!("{} in titles", self.terms()),
        }
    }
}
