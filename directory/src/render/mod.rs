use crate::{
    consts::consts::ItemNumber,
    model::{
        event::Render,
        person::PersonRecord,
        query::{QueryError, SearchKind, SearchQuery},
    },
    session::{
        state::{ConversationState, PagingStatus},
        ControllerError, StateError,
    },
};

pub mod reply;
pub mod speech;

use self::{
    reply::{Card, DisplayTemplate, ListItem, Reply},
    speech::{escape, speak},
};

/// Turns the controller's decision into speech, card and display payloads.
///
/// `state` is the state after the turn, title searches list every stored record on screen.
pub fn render_turn(render: &Render, state: &ConversationState, display_supported: bool) -> Reply {
    match render {
        Render::Page {
            query,
            records,
            start,
            total,
            remaining,
        } => page(query, records, *start, *total, *remaining, state, display_supported),
        Render::NoResults { query } => Reply::question(
            speak(&format!(
                "Sorry, I could not find any results for {}. {}",
                escape(&query.describe()),
                search_prompt(query.kind())
            )),
            speak(search_prompt(query.kind())),
        )
        .with_card(Card::Simple {
            title: format!("No results for {}", query.describe()),
            content: String::new(),
        }),
        Render::EndOfResults { query } => Reply::question(
            speak(&format!(
                "There are no more results for {}. {}",
                escape(&query.describe()),
                speech::NEW_SEARCH_PROMPT
            )),
            speak(speech::NEW_SEARCH_PROMPT),
        ),
        Render::Detail {
            query,
            number,
            record,
        } => detail(query, *number, record, display_supported),
        Render::Listing { query, records } => listing(query, records, display_supported),
        Render::SelectionUnavailable { query } => selection_unavailable(query, state),
        Render::Welcome => welcome(),
    }
}

pub fn welcome() -> Reply {
    Reply::question(speak(speech::WELCOME), speak(speech::PEOPLE_PROMPT))
}

pub fn goodbye() -> Reply {
    Reply::statement(speak(speech::GOODBYE))
}

pub fn unknown_request() -> Reply {
    Reply::question(speak(speech::UNKNOWN_REQUEST), speak(speech::PEOPLE_PROMPT))
}

/// Reprompt for a search that arrived without usable terms
pub fn render_query_error(error: &QueryError) -> Reply {
    match error {
        QueryError::EmptyTerms(kind) => {
            Reply::question(speak(search_prompt(*kind)), speak(search_prompt(*kind)))
        }
    }
}

/// Reprompt for a selection that could not be read as an item number
pub fn unreadable_item() -> Reply {
    let prompt = "Please say the number of the item you would like to hear about.";

    Reply::question(speak(prompt), speak(prompt))
}

pub fn render_error(error: &ControllerError) -> Reply {
    match error {
        ControllerError::Search(_) => {
            Reply::question(speak(speech::SERVICE_ERROR), speak(speech::PEOPLE_PROMPT))
        }
        ControllerError::State(StateError::NoActiveSearch) => {
            Reply::question(speak(speech::NO_ACTIVE_SEARCH), speak(speech::PEOPLE_PROMPT))
        }
        ControllerError::State(StateError::ItemOutOfRange { number, len }) => {
            let prompt = format!("Please choose a number between 1 and {}.", len);

            Reply::question(
                speak(&format!("There is no item {}. {}", number, prompt)),
                speak(&prompt),
            )
        }
    }
}

/// Points to whatever the person search still offers: more results or a new search
fn selection_unavailable(query: &SearchQuery, state: &ConversationState) -> Reply {
    let unavailable = "Choosing an item by number is only available for title searches.";

    match state.status() {
        PagingStatus::Paging => Reply::question(
            speak(&format!(
                "{} Say next to hear more results for {}.",
                unavailable,
                escape(&query.describe())
            )),
            speak(speech::MORE_PROMPT),
        ),
        PagingStatus::Exhausted | PagingStatus::Idle => Reply::question(
            speak(&format!(
                "{} There are no more results for {}. {}",
                unavailable,
                escape(&query.describe()),
                speech::NEW_SEARCH_PROMPT
            )),
            speak(speech::NEW_SEARCH_PROMPT),
        ),
    }
}

fn search_prompt(kind: SearchKind) -> &'static str {
    match kind {
        SearchKind::People => speech::PEOPLE_PROMPT,
        SearchKind::Title => speech::TITLE_PROMPT,
    }
}

fn page(
    query: &SearchQuery,
    records: &[PersonRecord],
    start: usize,
    total: usize,
    remaining: usize,
    state: &ConversationState,
    display_supported: bool,
) -> Reply {
    let mut ssml = String::new();

    if start == 0 {
        ssml.push_str(&format!(
            "For {}, I found {} {}. ",
            escape(&query.describe()),
            total,
            if total == 1 { "result" } else { "results" }
        ));
    }

    for (offset, record) in records.iter().enumerate() {
        ssml.push_str(&format!(
            "Result {} of {}: {}. ",
            start + offset + 1,
            total,
            speech::person(record)
        ));
    }

    let reprompt = if remaining > 0 {
        speech::MORE_PROMPT.to_string()
    } else {
        ssml.push_str("That was the last result. ");
        speech::NEW_SEARCH_PROMPT.to_string()
    };

    if query.kind() == SearchKind::Title && display_supported {
        ssml.push_str("You can also choose an item on the screen by saying its number. ");
    }

    if remaining > 0 {
        ssml.push_str(speech::MORE_PROMPT);
    }

    let card_title = if start == 0 {
        format!("Results for {}", query.describe())
    } else {
        format!("More results for {}", query.describe())
    };

    let display = match (display_supported, query.kind()) {
        (false, _) => None,
        (true, SearchKind::Title) => state
            .results
            .as_ref()
            .map(|results| list_template(&card_title, results.records())),
        (true, SearchKind::People) => records
            .first()
            .map(|record| body_template(&card_title, record)),
    };

    Reply::question(speak(ssml.trim_end()), speak(&reprompt))
        .with_card(card(card_title, records))
        .with_display(display)
}

fn detail(
    query: &SearchQuery,
    number: ItemNumber,
    record: &PersonRecord,
    display_supported: bool,
) -> Reply {
    let prompt = "Say back to results to hear the list again, or start a new search.";

    let ssml = format!(
        "Item {}: {}. {}",
        number.to_number(),
        speech::person(record),
        prompt
    );

    let title = format!("Item {} for {}", number.to_number(), query.describe());

    let display = display_supported.then(|| body_template(&title, record));

    Reply::question(speak(&ssml), speak(prompt))
        .with_card(card(title, std::slice::from_ref(record)))
        .with_display(display)
}

fn listing(query: &SearchQuery, records: &[PersonRecord], display_supported: bool) -> Reply {
    let mut ssml = format!("Results for {}. ", escape(&query.describe()));

    for (index, record) in records.iter().enumerate() {
        ssml.push_str(&format!(
            "{}: {}. ",
            ItemNumber::from_index(index).to_number(),
            speech::person_summary(record)
        ));
    }

    let prompt = "Choose an item by saying its number.";
    ssml.push_str(prompt);

    let title = format!("Results for {}", query.describe());

    let content = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            format!(
                "{}. {}",
                ItemNumber::from_index(index).to_number(),
                summary_line(record)
            )
        })
        .collect::<Vec<String>>()
        .join("\n");

    let display = display_supported.then(|| list_template(&title, records));

    Reply::question(speak(&ssml), speak(prompt))
        .with_card(Card::Simple {
            title,
            content,
        })
        .with_display(display)
}

fn summary_line(record: &PersonRecord) -> String {
    if record.title.is_empty() {
        return record.name();
    }

    format!("{}, {}", record.name(), record.title)
}

/// A single record with a photo gets the photo card, anything else a text card
fn card(title: String, records: &[PersonRecord]) -> Card {
    let text = records
        .iter()
        .map(speech::person_card)
        .collect::<Vec<String>>()
        .join("\n\n");

    match records {
        [record] if !record.photo_url.is_empty() => Card::Standard {
            title,
            text,
            small_image_url: format!("{}?size=small", record.photo_url),
            large_image_url: format!("{}?size=large", record.photo_url),
        },
        _ => Card::Simple {
            title,
            content: text,
        },
    }
}

fn photo(record: &PersonRecord) -> Option<String> {
    (!record.photo_url.is_empty()).then(|| record.photo_url.clone())
}

fn body_template(title: &str, record: &PersonRecord) -> DisplayTemplate {
    let secondary = [
        record.title.as_str(),
        record.department_affiliation.as_str(),
        record.email.as_str(),
        record.phone.as_str(),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect::<Vec<&str>>()
    .join("\n");

    DisplayTemplate::Body {
        title: title.to_string(),
        primary_text: record.name(),
        secondary_text: secondary,
        image_url: photo(record),
    }
}

fn list_template(title: &str, records: &[PersonRecord]) -> DisplayTemplate {
    let items = records
        .iter()
        .enumerate()
        .map(|(index, record)| ListItem {
            token: ItemNumber::from_index(index).to_token(),
            primary_text: format!("{}. {}", index + 1, record.name()),
            secondary_text: record.title.clone(),
            image_url: photo(record),
        })
        .collect();

    DisplayTemplate::List {
        title: title.to_string(),
        items,
    }
}
