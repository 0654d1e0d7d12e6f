use serde::{Deserialize, Serialize};
use thiserror::Error;

// Search service
pub const DEFAULT_SEARCH_URL: &str = "https://asudir-solr.asu.edu/asudir/";
// Example people query:
// https://asudir-solr.asu.edu/asudir/directory/select?q=displayName:michael+crow&rows=3&wt=json
pub const DEFAULT_COLLECTION: &str = "directory";

/// Number of records requested from the search service per search
pub const RESPONSE_SIZE: usize = 15;

/// Number of records spoken per turn, one keeps every "more?" prompt to a single record
pub const PAGINATION_SIZE: usize = 1;

/// Prefix of the selection token attached to each display list entry, e.g. `item_3`
pub const ITEM_TOKEN_PREFIX: &str = "item_";

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
/// 1-based position of a record inside the current result set, as spoken by the user or
/// carried by a display list token
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ItemNumber(pub usize);

impl ItemNumber {
    pub fn to_number(self) -> usize {
        self.0
    }

    /// Index into the result set, `None` for item zero which has no record
    pub fn to_index(self) -> Option<usize> {
        self.0.checked_sub(1)
    }

    pub fn from_index(index: usize) -> ItemNumber {
        ItemNumber(index + 1)
    }

    pub fn to_token(self) -> String {
        format!("{}{}", ITEM_TOKEN_PREFIX, self.0)
    }

    /// Parses a display list selection token (`item_<n>`)
    pub fn from_token(token: &str) -> Result<ItemNumber, ItemNumberError> {
        match token.strip_prefix(ITEM_TOKEN_PREFIX) {
            Some(number) => ItemNumber::try_from(number),
            None => Err(ItemNumberError::NotANumber(token.to_string())),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ItemNumberError {
    #[error("Item number is not a number: {0}")]
    NotANumber(String),
    #[error("Item number must not be negative, got {0}")]
    Negative(i64),
}

impl TryFrom<i64> for ItemNumber {
    type Error = ItemNumberError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 0 {
            return Err(ItemNumberError::Negative(value));
        }

        // Zero is representable here, the controller rejects it against the result set
        Ok(ItemNumber(value as usize))
    }
}

impl TryFrom<&str> for ItemNumber {
    type Error = ItemNumberError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let number = value
            .trim()
            .parse::<i64>()
            .map_err(|_| ItemNumberError::NotANumber(value.to_string()))?;

        ItemNumber::try_from(number)
    }
}
