use crate::{
    consts::consts::ItemNumber,
    model::{
        event::{PaginationEvent, Render},
        query::SearchQuery,
    },
    search::{DirectorySearch, SearchOutcome},
};

use super::{
    options::PaginationOptions,
    state::{ConversationState, SearchContext},
    ControllerError, StateError,
};

/// Outcome of one turn: what to show, and the state to persist for the next turn
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub render: Render,
    pub state: ConversationState,
}

impl Turn {
    fn new(render: Render, state: ConversationState) -> Self {
        Self { render, state }
    }
}

/// Drives the pagination state machine of a conversation.
///
/// The controller holds no conversation state of its own, every call receives the state loaded
/// for the turn and returns the state to persist. Only `NewSearch` reaches the directory.
pub struct PaginationController {
    directory: Box<dyn DirectorySearch + Send + Sync>,
    options: PaginationOptions,
}

impl PaginationController {
    pub fn new(
        directory: Box<dyn DirectorySearch + Send + Sync>,
        options: PaginationOptions,
    ) -> Self {
        Self { directory, options }
    }

    /// Applies a single event. On error the caller keeps the state it passed in
    pub fn process(
        &self,
        state: &ConversationState,
        event: PaginationEvent,
    ) -> Result<Turn, ControllerError> {
        log::info!(
            "Processing event [Event: {:?}, Status: {}, Cursor: {}]",
            event,
            state.status(),
            state.cursor
        );

        match event {
            PaginationEvent::NewSearch(query) => self.new_search(query),
            PaginationEvent::Next => Ok(self.next(state)?),
            PaginationEvent::Repeat => Ok(self.repeat(state)?),
            PaginationEvent::SelectItem(number) => Ok(self.select_item(state, number)?),
            PaginationEvent::BackToResults => Ok(self.back_to_results(state)),
        }
    }

    fn new_search(&self, query: SearchQuery) -> Result<Turn, ControllerError> {
        let results = match self.directory.search(&query)? {
            SearchOutcome::Found(results) => results,
            // Nothing to page through, the conversation returns to idle
            SearchOutcome::Empty => {
                return Ok(Turn::new(
                    Render::NoResults { query },
                    ConversationState::default(),
                ))
            }
        };

        let end = self.options.page_size.min(results.len());

        let render = Render::Page {
            query: query.clone(),
            records: results.slice(0, end),
            start: 0,
            total: results.len(),
            remaining: results.len() - end,
        };

        Ok(Turn::new(
            render,
            ConversationState::new_search(query, results, end),
        ))
    }

    fn next(&self, state: &ConversationState) -> Result<Turn, StateError> {
        let active = state.active()?;
        let total = active.results.len();

        if active.cursor >= total {
            return Ok(Turn::new(
                Render::EndOfResults {
                    query: active.query.clone(),
                },
                state.clone(),
            ));
        }

        // Only advance by the records that actually exist
        let end = (active.cursor + self.options.page_size).min(total);

        let render = Render::Page {
            query: active.query.clone(),
            records: active.results.slice(active.cursor, end),
            start: active.cursor,
            total,
            remaining: total - end,
        };

        let mut next_state = state.clone();
        next_state.cursor = end;

        Ok(Turn::new(render, next_state))
    }

    /// Rewinds one page for this turn only, the persisted cursor does not move
    fn repeat(&self, state: &ConversationState) -> Result<Turn, StateError> {
        let active = state.active()?;
        let total = active.results.len();
        let start = active.cursor.saturating_sub(self.options.page_size);

        let render = Render::Page {
            query: active.query.clone(),
            records: active.results.slice(start, active.cursor),
            start,
            total,
            remaining: total - active.cursor,
        };

        Ok(Turn::new(render, state.clone()))
    }

    fn select_item(
        &self,
        state: &ConversationState,
        number: ItemNumber,
    ) -> Result<Turn, StateError> {
        let active = state.active()?;

        match active.context {
            SearchContext::TitleSearch => {
                let record = active.results.item(number).ok_or(StateError::ItemOutOfRange {
                    number: number.to_number(),
                    len: active.results.len(),
                })?;

                let render = Render::Detail {
                    query: active.query.clone(),
                    number,
                    record: record.clone(),
                };

                Ok(Turn::new(render, state.clone()))
            }
            // Person search never shows an on-screen list to pick from
            SearchContext::PersonSearch => Ok(Turn::new(
                Render::SelectionUnavailable {
                    query: active.query.clone(),
                },
                state.clone(),
            )),
            SearchContext::None => Err(StateError::NoActiveSearch),
        }
    }

    fn back_to_results(&self, state: &ConversationState) -> Turn {
        match state.active() {
            Ok(active) if active.context == SearchContext::TitleSearch => {
                let render = Render::Listing {
                    query: active.query.clone(),
                    records: active.results.records().to_vec(),
                };

                Turn::new(render, state.clone())
            }
            _ => Turn::new(Render::Welcome, ConversationState::default()),
        }
    }
}
