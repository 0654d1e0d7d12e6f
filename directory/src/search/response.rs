use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::model::person::PersonRecord;

use super::{SearchError, SearchResult};

/// `{"response": {"numFound": .., "docs": [..]}}`
#[derive(Deserialize, Debug)]
pub struct SolrResponse {
    pub response: SolrResponseBody,
}

#[derive(Deserialize, Debug)]
pub struct SolrResponseBody {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<SolrDocument>,
}

/// A people directory document. Unknown fields are ignored and missing ones are left empty
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct SolrDocument {
    #[serde(rename = "firstName", deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(rename = "lastName", deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(rename = "displayName", deserialize_with = "lenient_string")]
    pub display_name: String,
    #[serde(rename = "primaryTitle", deserialize_with = "lenient_string")]
    pub primary_title: String,
    #[serde(
        rename = "primaryiSearchDepartmentAffiliation",
        deserialize_with = "lenient_string"
    )]
    pub primary_department_affiliation: String,
    #[serde(rename = "emailAddress", deserialize_with = "lenient_string")]
    pub email_address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(rename = "primaryMailcode", deserialize_with = "lenient_string")]
    pub primary_mailcode: String,
    #[serde(rename = "photoUrl", deserialize_with = "lenient_string")]
    pub photo_url: String,
}

impl From<SolrDocument> for PersonRecord {
    fn from(document: SolrDocument) -> Self {
        PersonRecord {
            first_name: document.first_name,
            last_name: document.last_name,
            display_name: document.display_name,
            title: document.primary_title,
            department_affiliation: document.primary_department_affiliation,
            email: document.email_address,
            phone: document.phone,
            mail_code: document.primary_mailcode,
            photo_url: document.photo_url,
        }
    }
}

/// Multi-valued Solr fields arrive as arrays and numeric ones as numbers, both are read as text
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(value_to_string(&value))
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(values) => values.first().map(value_to_string).unwrap_or_default(),
        Value::Null | Value::Object(_) => String::new(),
    }
}

/// Decodes a search response body, keeping at most `limit` records in the order returned
#[tracing::instrument(skip(body))]
pub fn decode_people(body: &[u8], limit: usize) -> SearchResult<Vec<PersonRecord>> {
    let response: SolrResponse = serde_json::from_slice(body)
        .map_err(|e| SearchError::UnableToDecodeResponse(format!("{}", e)))?;

    log::debug!(
        "Decoded search response [NumFound: {}, Docs: {}]",
        response.response.num_found,
        response.response.docs.len()
    );

    Ok(response
        .response
        .docs
        .into_iter()
        .take(limit)
        .map(PersonRecord::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CROW_RESPONSE: &str = r#"{
        "responseHeader": { "status": 0, "QTime": 1 },
        "response": {
            "numFound": 2,
            "start": 0,
            "docs": [
                {
                    "firstName": "Michael",
                    "lastName": "Crow",
                    "displayName": "Michael Crow",
                    "primaryTitle": ["President", "Professor"],
                    "primaryiSearchDepartmentAffiliation": "Office of the President",
                    "emailAddress": "michael.crow@asu.edu",
                    "phone": "480/965-8972",
                    "primaryMailcode": 7705,
                    "photoUrl": "https://webapp4.asu.edu/photo-ws/directory_photo/mcrow",
                    "eid": 12345
                },
                {
                    "displayName": "Michelle Crow"
                }
            ]
        }
    }"#;

    #[test]
    fn decodes_documents_in_order() {
        let people = decode_people(CROW_RESPONSE.as_bytes(), 15).unwrap();

        assert_eq!(people.len(), 2);
        assert_eq!(people[0].display_name, "Michael Crow");
        assert_eq!(people[1].display_name, "Michelle Crow");
    }

    #[test]
    fn arrays_and_numbers_are_read_as_text() {
        let people = decode_people(CROW_RESPONSE.as_bytes(), 15).unwrap();

        assert_eq!(people[0].title, "President", "First title of a multi-valued field");
        assert_eq!(people[0].mail_code, "7705");
    }

    #[test]
    fn missing_fields_never_fail() {
        let people = decode_people(CROW_RESPONSE.as_bytes(), 15).unwrap();

        assert_eq!(
            people[1],
            PersonRecord {
                display_name: "Michelle Crow".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn limit_caps_the_result_set() {
        let people = decode_people(CROW_RESPONSE.as_bytes(), 1).unwrap();

        assert_eq!(people.len(), 1);
    }

    #[test]
    fn empty_docs_decode_to_no_records() {
        let body = r#"{ "response": { "numFound": 0, "docs": [] } }"#;

        assert!(decode_people(body.as_bytes(), 15).unwrap().is_empty());
    }

    #[test]
    fn unexpected_shape_is_a_decode_error() {
        let result = decode_people(b"<html>Service Unavailable</html>", 15);

        assert!(matches!(
            result,
            Err(SearchError::UnableToDecodeResponse(_))
        ));
    }
}
