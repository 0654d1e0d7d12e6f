use reqwest::blocking::Client;

use crate::model::query::SearchQuery;

use super::{
    options::SearchOptions, query::build_query, response::decode_people, DirectorySearch,
    SearchError, SearchOutcome, SearchResult,
};

/// People directory served by a Solr search service
pub struct SolrDirectory {
    client: Client,
    select_url: String,
    response_size: usize,
}

impl SolrDirectory {
    pub fn new(base_url: String, options: SearchOptions) -> SearchResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| SearchError::UnableToReachService(format!("{}", e)))?;

        Ok(Self {
            client,
            select_url: select_url(&base_url, &options.collection),
            response_size: options.response_size,
        })
    }
}

fn select_url(base_url: &str, collection: &str) -> String {
    format!(
        "{}/{}/select",
        base_url.trim_end_matches('/'),
        collection.trim_matches('/')
    )
}

impl DirectorySearch for SolrDirectory {
    #[tracing::instrument(skip(self))]
    fn search(&self, query: &SearchQuery) -> SearchResult<SearchOutcome> {
        let params = build_query(query, self.response_size);

        log::info!(
            "Searching directory [Kind: {}, Terms: {}]",
            query.kind(),
            query.terms()
        );

        let response = self
            .client
            .get(&self.select_url)
            .query(&params)
            .send()
            .map_err(|e| SearchError::UnableToReachService(format!("{}", e)))?;

        let status = response.status();

        if !status.is_success() {
            return Err(SearchError::UnsuccessfulStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| SearchError::UnableToReachService(format!("{}", e)))?;

        let people = decode_people(&body, self.response_size)?;

        log::info!("Search returned {} records", people.len());

        Ok(SearchOutcome::from_records(people))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::TcpListener,
        thread::{self, JoinHandle},
    };

    use super::*;

    /// Answers a single request with a canned response, returns the base url and the
    /// request line that was received
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();

            let mut request = Vec::new();
            let mut buffer = [0; 1024];

            while !String::from_utf8_lossy(&request).contains("\r\n\r\n") {
                let read = stream.read(&mut buffer).unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (format!("http://{}/solr", address), handle)
    }

    fn crow_query() -> SearchQuery {
        SearchQuery::people(Some("Michael"), Some("Crow")).unwrap()
    }

    mod status {
        use super::*;

        #[test_log::test]
        fn unsuccessful_status_is_an_error() {
            let (url, server) = serve_once("503 Service Unavailable", "");
            let directory = SolrDirectory::new(url, SearchOptions::default()).unwrap();

            let result = directory.search(&crow_query());

            assert!(matches!(result, Err(SearchError::UnsuccessfulStatus(503))));
            server.join().unwrap();
        }

        #[test_log::test]
        fn no_documents_is_an_empty_outcome() {
            let (url, server) =
                serve_once("200 OK", r#"{"response":{"numFound":0,"docs":[]}}"#);
            let directory = SolrDirectory::new(url, SearchOptions::default()).unwrap();

            let result = directory.search(&crow_query()).unwrap();

            assert_eq!(result, SearchOutcome::Empty);
            server.join().unwrap();
        }

        #[test_log::test]
        fn documents_are_found_through_the_select_url() {
            // Given a service holding one matching person
            let (url, server) = serve_once(
                "200 OK",
                r#"{"response":{"numFound":1,"docs":[{"displayName":"Michael Crow","primaryTitle":["President"]}]}}"#,
            );
            let directory =
                SolrDirectory::new(url, SearchOptions::default().set_response_size(7)).unwrap();

            // When the directory is searched
            let result = directory.search(&crow_query()).unwrap();

            // Then the record is decoded and the query went to the collection's select handler
            match result {
                SearchOutcome::Found(results) => {
                    assert_eq!(results.len(), 1);
                    assert_eq!(results.records()[0].title, "President");
                }
                other => panic!("Expected results, got {:?}", other),
            }

            let request_line = server.join().unwrap();

            assert!(request_line.starts_with("GET /solr/directory/select?q="));
            assert!(request_line.contains("&rows=7"));
            assert!(request_line.contains("&wt=json"));
        }
    }

    #[test_log::test]
    fn select_url_joins_base_and_collection() {
        assert_eq!(
            select_url("https://asudir-solr.asu.edu/asudir/", "directory"),
            "https://asudir-solr.asu.edu/asudir/directory/select"
        );

        assert_eq!(
            select_url("http://localhost:8983/solr", "/people/"),
            "http://localhost:8983/solr/people/select"
        );
    }

    #[test_log::test]
    fn unreachable_service_is_an_error() {
        // Nothing listens on port 9 (discard) on a test machine
        let directory = SolrDirectory::new(
            "http://127.0.0.1:9/solr".to_string(),
            SearchOptions::default(),
        )
        .unwrap();

        let query = SearchQuery::people(Some("Michael"), Some("Crow")).unwrap();

        assert!(matches!(
            directory.search(&query),
            Err(SearchError::UnableToReachService(_))
        ));
    }
}
