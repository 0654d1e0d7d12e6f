use thiserror::Error;

use crate::search::SearchError;

pub mod controller;
pub mod options;
pub mod state;

#[derive(Error, Debug, PartialEq)]
pub enum StateError {
    #[error("No active search")]
    NoActiveSearch,
    #[error("Item {number} is out of range, the current results have {len} items")]
    ItemOutOfRange { number: usize, len: usize },
}

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("Invalid conversation state: {0}")]
    State(#[from] StateError),
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),
}
