use std::{fs, path::PathBuf};

use crate::model::{person::PersonRecord, query::SearchQuery};

use super::{
    options::SearchOptions, response::decode_people, DirectorySearch, SearchError, SearchOutcome,
    SearchResult,
};

/// In-memory people directory, loaded from a file in the search service's response shape.
///
/// Matching is a case-insensitive substring match of every search word:
/// - people: against the display, first and last name
/// - titles: against the title and department
pub struct FixtureDirectory {
    people: Vec<PersonRecord>,
    response_size: usize,
}

impl FixtureDirectory {
    pub fn new(people: Vec<PersonRecord>, options: SearchOptions) -> Self {
        Self {
            people,
            response_size: options.response_size,
        }
    }

    pub fn from_file(path: PathBuf, options: SearchOptions) -> SearchResult<Self> {
        let body = fs::read(&path)
            .map_err(|e| SearchError::UnableToLoadFixture(path.clone(), format!("{}", e)))?;

        let people = decode_people(&body, usize::MAX)
            .map_err(|e| SearchError::UnableToLoadFixture(path.clone(), format!("{}", e)))?;

        log::info!(
            "Loaded fixture directory [Path: {}, People: {}]",
            path.display(),
            people.len()
        );

        Ok(Self::new(people, options))
    }

    fn matches(person: &PersonRecord, query: &SearchQuery) -> bool {
        let haystack = match query {
            SearchQuery::People { .. } => format!(
                "{} {} {}",
                person.display_name, person.first_name, person.last_name
            ),
            SearchQuery::Title { .. } => {
                format!("{} {}", person.title, person.department_affiliation)
            }
        }
        .to_lowercase();

        query
            .terms()
            .to_lowercase()
            .split_whitespace()
            .all(|word| haystack.contains(word))
    }
}

impl DirectorySearch for FixtureDirectory {
    #[tracing::instrument(skip(self))]
    fn search(&self, query: &SearchQuery) -> SearchResult<SearchOutcome> {
        let people: Vec<PersonRecord> = self
            .people
            .iter()
            .filter(|person| FixtureDirectory::matches(person, query))
            .take(self.response_size)
            .cloned()
            .collect();

        log::info!(
            "Fixture search [Kind: {}, Terms: {}, Matches: {}]",
            query.kind(),
            query.terms(),
            people.len()
        );

        Ok(SearchOutcome::from_records(people))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> FixtureDirectory {
        FixtureDirectory::new(
            vec![
                PersonRecord::new("Michael", "Crow").with_title("President", "Office of the President"),
                PersonRecord::new("Michael", "Crowley").with_title("Dean", "College of Law"),
                PersonRecord::new("Ann", "Smith").with_title("Associate Dean", "College of Law"),
            ],
            SearchOptions::default().set_response_size(2),
        )
    }

    #[test_log::test]
    fn people_search_matches_every_word() {
        let query = SearchQuery::people(Some("michael"), Some("crow")).unwrap();

        let outcome = directory().search(&query).unwrap();

        match outcome {
            SearchOutcome::Found(results) => {
                assert_eq!(results.len(), 2, "Crow is a substring of Crowley");
            }
            SearchOutcome::Empty => panic!("should match"),
        }
    }

    #[test_log::test]
    fn title_search_matches_title_and_department() {
        let query = SearchQuery::title(Some("dean law")).unwrap();

        let outcome = directory().search(&query).unwrap();

        assert!(matches!(outcome, SearchOutcome::Found(results) if results.len() == 2));
    }

    #[test_log::test]
    fn response_size_caps_matches() {
        let query = SearchQuery::title(Some("o")).unwrap();

        let outcome = directory().search(&query).unwrap();

        assert!(matches!(outcome, SearchOutcome::Found(results) if results.len() == 2));
    }

    #[test_log::test]
    fn no_match_is_empty() {
        let query = SearchQuery::people(Some("Nobody"), None).unwrap();

        assert_eq!(directory().search(&query).unwrap(), SearchOutcome::Empty);
    }

    #[test_log::test]
    fn missing_file_is_an_error() {
        let result = FixtureDirectory::from_file(
            PathBuf::from("/tmp/isearch/does-not-exist.json"),
            SearchOptions::default(),
        );

        assert!(matches!(result, Err(SearchError::UnableToLoadFixture(_, _))));
    }
}
