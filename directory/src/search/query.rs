use crate::model::query::SearchQuery;

// Solr field names in the people directory
pub const FIELD_DISPLAY_NAME: &str = "displayName";
pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_TITLE: &str = "primaryTitle";
pub const FIELD_DEPARTMENT: &str = "primaryiSearchDepartmentAffiliation";

/// Titles pushed up a title search so that heads of units are read out first
const TOP_LEVEL_TITLES: [&str; 6] = [
    "president",
    "provost",
    "\"vice president\"",
    "dean",
    "director",
    "chair",
];

const RESERVED_CHARACTERS: &str = "+-&|!(){}[]^\"~*?:\\/";

/// Query parameters for `<collection>/select`
pub type QueryParams = Vec<(&'static str, String)>;

/// Escapes the Solr query syntax characters in user supplied text
pub fn escape_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for character in term.chars() {
        if RESERVED_CHARACTERS.contains(character) {
            escaped.push('\\');
        }
        escaped.push(character);
    }

    escaped
}

fn phrase(field: &str, text: &str, boost: u32) -> String {
    format!("{}:\"{}\"^{}", field, escape_term(text), boost)
}

fn terms(field: &str, text: &str) -> String {
    let words: Vec<String> = text.split_whitespace().map(escape_term).collect();

    format!("{}:({})", field, words.join(" "))
}

fn boosted_terms(field: &str, text: &str, boost: u32) -> String {
    format!("{}^{}", terms(field, text), boost)
}

/// Builds the search service query for a person or title search. Exact phrase matches on
/// the display name (people) or title and department (titles) rank highest
#[tracing::instrument]
pub fn build_query(query: &SearchQuery, rows: usize) -> QueryParams {
    let mut params: QueryParams = vec![];

    match query {
        SearchQuery::People {
            first_name,
            last_name,
        } => {
            let full_name = query.terms();
            let mut clauses = vec![phrase(FIELD_DISPLAY_NAME, &full_name, 10)];

            if !last_name.is_empty() {
                clauses.push(boosted_terms(FIELD_LAST_NAME, last_name, 5));
            }

            if !first_name.is_empty() {
                clauses.push(boosted_terms(FIELD_FIRST_NAME, first_name, 2));
            }

            clauses.push(terms(FIELD_DISPLAY_NAME, &full_name));

            params.push(("q", clauses.join(" OR ")));
        }
        SearchQuery::Title {
            title_search_phrase,
        } => {
            let clauses = [
                phrase(FIELD_TITLE, title_search_phrase, 10),
                phrase(FIELD_DEPARTMENT, title_search_phrase, 5),
                boosted_terms(FIELD_TITLE, title_search_phrase, 2),
                terms(FIELD_DEPARTMENT, title_search_phrase),
            ];

            params.push(("q", clauses.join(" OR ")));
            // Boost queries are only honoured by the extended dismax parser
            params.push(("defType", "edismax".to_string()));
            params.push((
                "bq",
                format!("{}:({})^3", FIELD_TITLE, TOP_LEVEL_TITLES.join(" OR ")),
            ));
        }
    }

    params.push(("rows", rows.to_string()));
    params.push(("wt", "json".to_string()));

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a QueryParams, name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    mod people {
        use super::*;

        #[test]
        fn favours_exact_display_name_then_last_name() {
            let query = SearchQuery::people(Some("Michael"), Some("Crow")).unwrap();

            let params = build_query(&query, 15);

            assert_eq!(
                param(&params, "q"),
                Some(
                    "displayName:\"Michael Crow\"^10 OR lastName:(Crow)^5 OR firstName:(Michael)^2 OR displayName:(Michael Crow)"
                )
            );
            assert_eq!(param(&params, "rows"), Some("15"));
            assert_eq!(param(&params, "wt"), Some("json"));
            assert_eq!(param(&params, "bq"), None);
        }

        #[test]
        fn last_name_only_skips_first_name_clause() {
            let query = SearchQuery::people(None, Some("Crow")).unwrap();

            let params = build_query(&query, 3);

            assert_eq!(
                param(&params, "q"),
                Some("displayName:\"Crow\"^10 OR lastName:(Crow)^5 OR displayName:(Crow)")
            );
        }

        #[test]
        fn reserved_characters_are_escaped() {
            let query = SearchQuery::people(Some("Mary-Kate"), Some("O'Neil:")).unwrap();

            let params = build_query(&query, 3);
            let q = param(&params, "q").unwrap();

            assert!(q.contains("firstName:(Mary\\-Kate)^2"));
            assert!(q.contains("lastName:(O'Neil\\:)^5"));
        }
    }

    mod title {
        use super::*;

        #[test]
        fn searches_title_and_department_with_top_level_boost() {
            let query = SearchQuery::title(Some("dean of students")).unwrap();

            let params = build_query(&query, 15);

            let q = param(&params, "q").unwrap();
            assert!(q.starts_with("primaryTitle:\"dean of students\"^10"));
            assert!(q.contains("primaryiSearchDepartmentAffiliation:\"dean of students\"^5"));
            assert_eq!(param(&params, "defType"), Some("edismax"));
            assert!(param(&params, "bq").unwrap().contains("president OR provost"));
        }
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_term("Crow"), "Crow");
        assert_eq!(escape_term("a+b"), "a\\+b");
        assert_eq!(escape_term("\"quoted\""), "\\\"quoted\\\"");
    }
}
