use serde::{Deserialize, Serialize};

use crate::consts::consts::ItemNumber;

use super::person::PersonRecord;

/// Ordered records returned by a single search. Never empty, an empty search is reported as
/// `SearchOutcome::Empty` instead
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "Vec<PersonRecord>", into = "Vec<PersonRecord>")]
pub struct SearchResultSet(Vec<PersonRecord>);

impl SearchResultSet {
    pub fn new(records: Vec<PersonRecord>) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        Some(SearchResultSet(records))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[PersonRecord] {
        &self.0
    }

    /// Records in `[start, end)`, clamped to the set
    pub fn slice(&self, start: usize, end: usize) -> Vec<PersonRecord> {
        let end = end.min(self.0.len());
        let start = start.min(end);

        self.0[start..end].to_vec()
    }

    pub fn item(&self, number: ItemNumber) -> Option<&PersonRecord> {
        number.to_index().and_then(|index| self.0.get(index))
    }
}

impl TryFrom<Vec<PersonRecord>> for SearchResultSet {
    type Error = String;

    fn try_from(records: Vec<PersonRecord>) -> Result<Self, Self::Error> {
        SearchResultSet::new(records).ok_or_else(|| "result set cannot be empty".to_string())
    }
}

impl From<SearchResultSet> for Vec<PersonRecord> {
    fn from(value: SearchResultSet) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_people() -> SearchResultSet {
        SearchResultSet::new(vec![
            PersonRecord::new("Michael", "Crow"),
            PersonRecord::new("Michael", "Crowley"),
            PersonRecord::new("Michelle", "Crow"),
        ])
        .unwrap()
    }

    #[test]
    fn empty_set_cannot_be_built() {
        assert_eq!(SearchResultSet::new(vec![]), None);
    }

    #[test]
    fn slice_is_clamped_to_the_set() {
        let results = three_people();

        assert_eq!(results.slice(2, 10).len(), 1);
        assert_eq!(results.slice(5, 10).len(), 0);
    }

    #[test]
    fn item_lookup_is_one_based() {
        let results = three_people();

        assert_eq!(results.item(ItemNumber(1)).unwrap().last_name, "Crow");
        assert_eq!(results.item(ItemNumber(3)).unwrap().first_name, "Michelle");
        assert!(results.item(ItemNumber(0)).is_none());
        assert!(results.item(ItemNumber(4)).is_none());
    }

    #[test]
    fn empty_set_is_rejected_when_decoding_session() {
        let decoded = serde_json::from_str::<SearchResultSet>("[]");

        assert!(decoded.is_err());
    }
}
