use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::model::{
    query::{SearchKind, SearchQuery},
    results::SearchResultSet,
};

use super::StateError;

/// Which search produced the current result set
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Display)]
pub enum SearchContext {
    #[default]
    None,
    PersonSearch,
    TitleSearch,
}

impl From<SearchKind> for SearchContext {
    fn from(kind: SearchKind) -> Self {
        match kind {
            SearchKind::People => SearchContext::PersonSearch,
            SearchKind::Title => SearchContext::TitleSearch,
        }
    }
}

/// Position of the conversation in the pagination state machine, derived from the state
#[derive(Clone, Copy, Debug, PartialEq, Display)]
pub enum PagingStatus {
    /// No search has run
    Idle,
    /// Results remain unread
    Paging,
    /// Every result has been read
    Exhausted,
}

/// Per-conversation state, persisted by the voice platform between turns as session attributes
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationState {
    pub search_context: SearchContext,
    /// The search that produced `results`, echoed in "more results" responses
    pub query: Option<SearchQuery>,
    pub results: Option<SearchResultSet>,
    /// Index of the next unread record, `0 <= cursor <= results.len()`
    pub cursor: usize,
}

/// Borrowed view of a conversation with an active search
pub struct ActiveSearch<'a> {
    pub context: SearchContext,
    pub query: &'a SearchQuery,
    pub results: &'a SearchResultSet,
    pub cursor: usize,
}

impl ConversationState {
    pub fn new_search(query: SearchQuery, results: SearchResultSet, cursor: usize) -> Self {
        ConversationState {
            search_context: SearchContext::from(query.kind()),
            cursor: cursor.min(results.len()),
            query: Some(query),
            results: Some(results),
        }
    }

    pub fn status(&self) -> PagingStatus {
        match &self.results {
            None => PagingStatus::Idle,
            Some(results) if self.cursor < results.len() => PagingStatus::Paging,
            Some(_) => PagingStatus::Exhausted,
        }
    }

    /// Fails with `StateError::NoActiveSearch` rather than exposing a missing result set
    pub fn active(&self) -> Result<ActiveSearch<'_>, StateError> {
        match (&self.query, &self.results) {
            (Some(query), Some(results)) => Ok(ActiveSearch {
                context: self.search_context,
                query,
                results,
                cursor: self.cursor.min(results.len()),
            }),
            _ => Err(StateError::NoActiveSearch),
        }
    }

    /// Session attributes as stored by the voice platform
    pub fn to_attributes(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            log::error!("Unable to encode conversation state: {}", e);
            serde_json::Value::Null
        })
    }

    /// Restores the state from session attributes, anything missing or unreadable starts idle
    pub fn from_attributes(attributes: Option<&serde_json::Value>) -> Self {
        let value = match attributes {
            Some(value) if value.as_object().is_some_and(|map| !map.is_empty()) => value,
            _ => return ConversationState::default(),
        };

        match serde_json::from_value::<ConversationState>(value.clone()) {
            Ok(state) => state.clamped(),
            Err(e) => {
                log::warn!("Discarding unreadable session attributes: {}", e);
                ConversationState::default()
            }
        }
    }

    /// Session attributes come back from the client. The cursor is kept inside the result set
    /// and the context always follows the stored query
    fn clamped(mut self) -> Self {
        let (kind, len) = match (&self.query, &self.results) {
            (Some(query), Some(results)) => (query.kind(), results.len()),
            _ => return ConversationState::default(),
        };

        let context = SearchContext::from(kind);

        if context != self.search_context {
            log::warn!(
                "Session attributes disagree with their query [Context: {}, Query: {}]",
                self.search_context,
                kind
            );
        }

        self.cursor = self.cursor.min(len);
        self.search_context = context;

        self
    }
}
