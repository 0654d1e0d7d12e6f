use crate::model::person::PersonRecord;

/// Pause between spoken fields
const PAUSE: &str = ",, ";

pub const WELCOME: &str = "Welcome to the <say-as interpret-as=\"spell-out\">ASU</say-as> iSearch Directory. Search people by saying something like \"find Michael Crow\", or search titles by saying something like \"find title dean\".";
pub const PEOPLE_PROMPT: &str = "To search the <say-as interpret-as=\"spell-out\">ASU</say-as> iSearch Directory for a person, try asking something like \"find Michael Crow\".";
pub const TITLE_PROMPT: &str = "To search the <say-as interpret-as=\"spell-out\">ASU</say-as> iSearch Directory by title, try asking something like \"find title dean\".";
pub const MORE_PROMPT: &str = "Do you want to hear more results?";
pub const NEW_SEARCH_PROMPT: &str = "You can start a new search, or say stop.";
pub const GOODBYE: &str = "Goodbye";
pub const SERVICE_ERROR: &str = "Sorry, there was a problem searching the directory. Please try again later.";
pub const NO_ACTIVE_SEARCH: &str = "There is no search in progress. Try asking something like \"find Michael Crow\".";
pub const UNKNOWN_REQUEST: &str = "Sorry, I didn't get that. Try asking something like \"find Michael Crow\".";

/// Wraps SSML fragments in the `<speak>` root element
pub fn speak(ssml: &str) -> String {
    format!("<speak>{}</speak>", ssml)
}

/// Escapes text so it can be placed inside SSML
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(character),
        }
    }

    escaped
}

/// Spoken form of a person: name then title, department, email, phone and mail code. Empty
/// fields are skipped
pub fn person(record: &PersonRecord) -> String {
    let mut parts = vec![escape(&record.name())];

    if !record.title.is_empty() {
        parts.push(format!("Title: {}", escape(&record.title)));
    }

    if !record.department_affiliation.is_empty() {
        parts.push(format!(
            "Department: {}",
            escape(&record.department_affiliation)
        ));
    }

    if !record.email.is_empty() {
        parts.push(format!("Email address: {}", escape(&record.email)));
    }

    if !record.phone.is_empty() {
        parts.push(format!(
            "Phone: <say-as interpret-as=\"telephone\">{}</say-as>",
            escape(&record.phone)
        ));
    }

    if !record.mail_code.is_empty() {
        parts.push(format!(
            "Mail code: <say-as interpret-as=\"digits\">{}</say-as>",
            escape(&record.mail_code)
        ));
    }

    parts.join(PAUSE)
}

/// Short spoken form used in listings: name and title
pub fn person_summary(record: &PersonRecord) -> String {
    if record.title.is_empty() {
        return escape(&record.name());
    }

    format!("{}, {}", escape(&record.name()), escape(&record.title))
}

/// Plain text card body, one non-empty field per line
pub fn person_card(record: &PersonRecord) -> String {
    [
        record.name(),
        record.title.clone(),
        record.department_affiliation.clone(),
        record.email.clone(),
        record.phone.clone(),
        record.mail_code.clone(),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect::<Vec<String>>()
    .join("\n")
}
