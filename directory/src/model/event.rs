use serde::{Deserialize, Serialize};

use crate::consts::consts::ItemNumber;

use super::{person::PersonRecord, query::SearchQuery};

/// Events that drive the pagination state machine, one per turn
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum PaginationEvent {
    /// Runs a fresh search, replacing any previous result set
    NewSearch(SearchQuery),
    Next,
    /// Re-renders the last page without moving the cursor
    Repeat,
    SelectItem(ItemNumber),
    BackToResults,
}

/// What the controller decided to show this turn, rendered into speech and cards afterwards
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Render {
    /// A slice of the result set
    Page {
        query: SearchQuery,
        records: Vec<PersonRecord>,
        /// Index of the first record of `records` within the result set
        start: usize,
        total: usize,
        /// Records left after this page
        remaining: usize,
    },
    /// The search ran and matched nothing
    NoResults { query: SearchQuery },
    /// `Next` was asked for once every record had been read
    EndOfResults { query: SearchQuery },
    /// Full detail of a single selected record
    Detail {
        query: SearchQuery,
        number: ItemNumber,
        record: PersonRecord,
    },
    /// The whole title search listing, re-rendered from the stored result set
    Listing {
        query: SearchQuery,
        records: Vec<PersonRecord>,
    },
    /// Item selection is only offered for title searches
    SelectionUnavailable { query: SearchQuery },
    /// Launch greeting
    Welcome,
}

impl Render {
    pub fn page_records(&self) -> &[PersonRecord] {
        match self {
            Render::Page { records, .. } | Render::Listing { records, .. } => records,
            Render::Detail { record, .. } => std::slice::from_ref(record),
            Render::NoResults { .. }
            | Render::EndOfResults { .. }
            | Render::SelectionUnavailable { .. }
            | Render::Welcome => &[],
        }
    }
}
