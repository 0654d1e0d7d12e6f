use directory::{
    consts::consts::ItemNumber,
    model::{event::PaginationEvent, query::SearchQuery},
    render::{self, reply::Reply},
    session::{controller::PaginationController, state::ConversationState, ControllerError},
};

use crate::envelope::{SkillRequest, SkillResponse};

/// What a handler decided for the turn. `reply: None` sends the empty response
pub struct Outcome {
    pub reply: Option<Reply>,
    pub state: ConversationState,
}

impl Outcome {
    fn reply(reply: Reply, state: ConversationState) -> Self {
        Outcome {
            reply: Some(reply),
            state,
        }
    }
}

/// Everything a handler sees about the turn
pub struct TurnRequest<'a> {
    pub request: &'a SkillRequest,
    pub state: ConversationState,
    pub display_supported: bool,
}

type Handler = fn(&PaginationController, TurnRequest) -> Outcome;

/// Request types and intent names, mapped to the handler that answers them
const HANDLERS: &[(&str, Handler)] = &[
    ("LaunchRequest", launch),
    ("SessionEndedRequest", session_ended),
    ("Display.ElementSelected", element_selected),
    ("iSearchIntentPeopleFirst", people_search),
    ("iSearchIntentTitleFirst", title_search),
    ("iSearchIntentPeopleNext", next),
    ("AMAZON.NextIntent", next),
    ("AMAZON.YesIntent", next),
    ("AMAZON.RepeatIntent", repeat),
    ("iSearchIntentSelectItem", select_item),
    ("iSearchIntentBackToResults", back_to_results),
    ("AMAZON.PreviousIntent", back_to_results),
    ("AMAZON.HelpIntent", help),
    ("AMAZON.StopIntent", stop),
    ("AMAZON.CancelIntent", stop),
    ("AMAZON.NoIntent", stop),
];

pub const FIRST_NAME_SLOT: &str = "firstName";
pub const LAST_NAME_SLOT: &str = "lastName";
pub const TITLE_SLOT: &str = "titleSearchPhrase";
pub const ITEM_NUMBER_SLOT: &str = "itemNumber";

fn find_handler(route: &str) -> Option<Handler> {
    HANDLERS
        .iter()
        .find(|(name, _)| *name == route)
        .map(|(_, handler)| *handler)
}

/// Answers one webhook call: restores the conversation state, runs the handler registered for
/// the request and packs the reply with the state to persist
#[tracing::instrument(skip_all, fields(route = request.route()))]
pub fn dispatch(controller: &PaginationController, request: &SkillRequest) -> SkillResponse {
    let route = request.route();

    log::info!(
        "Handling request [Route: {}, Request: {}]",
        route,
        request.request.request_id
    );

    let turn = TurnRequest {
        request,
        state: ConversationState::from_attributes(request.attributes()),
        display_supported: request.display_supported(),
    };

    let outcome = match find_handler(route) {
        Some(handler) => handler(controller, turn),
        None => {
            log::warn!("No handler for request [Route: {}]", route);
            unknown(controller, turn)
        }
    };

    match outcome.reply {
        Some(reply) => SkillResponse::from_reply(reply, outcome.state.to_attributes()),
        None => SkillResponse::empty(),
    }
}

/// Feeds an event to the controller and renders the turn. Failures keep the incoming state
fn run_event(
    controller: &PaginationController,
    turn: TurnRequest,
    event: PaginationEvent,
) -> Outcome {
    match controller.process(&turn.state, event) {
        Ok(result) => Outcome::reply(
            render::render_turn(&result.render, &result.state, turn.display_supported),
            result.state,
        ),
        Err(error) => {
            match &error {
                ControllerError::Search(search_error) => {
                    log::error!("Directory search failed: {}", search_error)
                }
                ControllerError::State(state_error) => {
                    log::warn!("Event rejected: {}", state_error)
                }
            }

            Outcome::reply(render::render_error(&error), turn.state)
        }
    }
}

fn launch(_: &PaginationController, turn: TurnRequest) -> Outcome {
    Outcome::reply(render::welcome(), turn.state)
}

fn help(_: &PaginationController, turn: TurnRequest) -> Outcome {
    Outcome::reply(render::welcome(), turn.state)
}

fn stop(_: &PaginationController, turn: TurnRequest) -> Outcome {
    Outcome::reply(render::goodbye(), turn.state)
}

fn unknown(_: &PaginationController, turn: TurnRequest) -> Outcome {
    Outcome::reply(render::unknown_request(), turn.state)
}

fn session_ended(_: &PaginationController, turn: TurnRequest) -> Outcome {
    log::info!(
        "Session ended [Reason: {}]",
        turn.request.request.reason.as_deref().unwrap_or("unknown")
    );

    Outcome {
        reply: None,
        state: turn.state,
    }
}

fn search(controller: &PaginationController, turn: TurnRequest, query: SearchQuery) -> Outcome {
    run_event(controller, turn, PaginationEvent::NewSearch(query))
}

fn people_search(controller: &PaginationController, turn: TurnRequest) -> Outcome {
    let query = SearchQuery::people(
        turn.request.slot(FIRST_NAME_SLOT),
        turn.request.slot(LAST_NAME_SLOT),
    );

    match query {
        Ok(query) => search(controller, turn, query),
        Err(error) => Outcome::reply(render::render_query_error(&error), turn.state),
    }
}

fn title_search(controller: &PaginationController, turn: TurnRequest) -> Outcome {
    match SearchQuery::title(turn.request.slot(TITLE_SLOT)) {
        Ok(query) => search(controller, turn, query),
        Err(error) => Outcome::reply(render::render_query_error(&error), turn.state),
    }
}

fn next(controller: &PaginationController, turn: TurnRequest) -> Outcome {
    run_event(controller, turn, PaginationEvent::Next)
}

fn repeat(controller: &PaginationController, turn: TurnRequest) -> Outcome {
    run_event(controller, turn, PaginationEvent::Repeat)
}

fn back_to_results(controller: &PaginationController, turn: TurnRequest) -> Outcome {
    run_event(controller, turn, PaginationEvent::BackToResults)
}

fn select(
    controller: &PaginationController,
    turn: TurnRequest,
    number: Option<ItemNumber>,
) -> Outcome {
    match number {
        Some(number) => run_event(controller, turn, PaginationEvent::SelectItem(number)),
        None => Outcome::reply(render::unreadable_item(), turn.state),
    }
}

fn select_item(controller: &PaginationController, turn: TurnRequest) -> Outcome {
    let number = turn
        .request
        .slot(ITEM_NUMBER_SLOT)
        .and_then(|value| ItemNumber::try_from(value).ok());

    select(controller, turn, number)
}

fn element_selected(controller: &PaginationController, turn: TurnRequest) -> Outcome {
    let number = turn
        .request
        .request
        .token
        .as_deref()
        .and_then(|token| ItemNumber::from_token(token).ok());

    select(controller, turn, number)
}
