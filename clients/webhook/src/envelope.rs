//! Voice platform request / response envelope (Alexa skill JSON interface)

use std::collections::HashMap;

use directory::render::reply::{Card, DisplayTemplate, ListItem, Reply};
use serde::{Deserialize, Serialize};

pub const ENVELOPE_VERSION: &str = "1.0";

#[derive(Deserialize, Debug, Clone)]
pub struct SkillRequest {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: RequestBody,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(rename = "sessionId", default)]
    pub session_id: String,
    #[serde(default)]
    pub attributes: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: Option<System>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct System {
    #[serde(default)]
    pub device: Option<Device>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Device {
    #[serde(rename = "supportedInterfaces", default)]
    pub supported_interfaces: HashMap<String, serde_json::Value>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(rename = "requestId", default)]
    pub request_id: String,
    #[serde(default)]
    pub intent: Option<Intent>,
    /// Set on `Display.ElementSelected`, the token of the chosen list entry
    #[serde(default)]
    pub token: Option<String>,
    /// Set on `SessionEndedRequest`
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl SkillRequest {
    /// Dispatch key: the intent name for intent requests, the request type otherwise
    pub fn route(&self) -> &str {
        match (&self.request.request_type[..], &self.request.intent) {
            ("IntentRequest", Some(intent)) => intent.name.as_str(),
            (request_type, _) => request_type,
        }
    }

    /// Value of a slot, `None` when the slot is missing or the user left it empty
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()
            .and_then(|intent| intent.slots.get(name))
            .and_then(|slot| slot.value.as_deref())
    }

    pub fn attributes(&self) -> Option<&serde_json::Value> {
        self.session
            .as_ref()
            .and_then(|session| session.attributes.as_ref())
    }

    pub fn display_supported(&self) -> bool {
        self.context
            .as_ref()
            .and_then(|context| context.system.as_ref())
            .and_then(|system| system.device.as_ref())
            .is_some_and(|device| device.supported_interfaces.contains_key("Display"))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SkillResponse {
    pub version: String,
    #[serde(rename = "sessionAttributes", skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<serde_json::Value>,
    pub response: ResponseBody,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct ResponseBody {
    #[serde(rename = "outputSpeech", skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    #[serde(rename = "shouldEndSession", skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Reprompt {
    #[serde(rename = "outputSpeech")]
    pub output_speech: OutputSpeech,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum CardBody {
    Simple {
        title: String,
        content: String,
    },
    Standard {
        title: String,
        text: String,
        image: CardImage,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CardImage {
    #[serde(rename = "smallImageUrl")]
    pub small_image_url: String,
    #[serde(rename = "largeImageUrl")]
    pub large_image_url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "Display.RenderTemplate")]
    RenderTemplate { template: Template },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Template {
    BodyTemplate2 {
        token: String,
        #[serde(rename = "backButton")]
        back_button: String,
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<Image>,
        #[serde(rename = "textContent")]
        text_content: TextContent,
    },
    ListTemplate1 {
        token: String,
        #[serde(rename = "backButton")]
        back_button: String,
        title: String,
        #[serde(rename = "listItems")]
        list_items: Vec<TemplateListItem>,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Image {
    pub sources: Vec<ImageSource>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TextContent {
    #[serde(rename = "primaryText")]
    pub primary_text: PlainText,
    #[serde(rename = "secondaryText", skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<PlainText>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlainText {
    #[serde(rename = "type")]
    pub text_type: String,
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TemplateListItem {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(rename = "textContent")]
    pub text_content: TextContent,
}

fn plain_text(text: String) -> PlainText {
    PlainText {
        text_type: "PlainText".to_string(),
        text,
    }
}

fn text_content(primary: String, secondary: String) -> TextContent {
    TextContent {
        primary_text: plain_text(primary),
        secondary_text: (!secondary.is_empty()).then(|| plain_text(secondary)),
    }
}

fn image(url: Option<String>) -> Option<Image> {
    url.map(|url| Image {
        sources: vec![ImageSource { url }],
    })
}

impl From<Card> for CardBody {
    fn from(card: Card) -> Self {
        match card {
            Card::Simple { title, content } => CardBody::Simple { title, content },
            Card::Standard {
                title,
                text,
                small_image_url,
                large_image_url,
            } => CardBody::Standard {
                title,
                text,
                image: CardImage {
                    small_image_url,
                    large_image_url,
                },
            },
        }
    }
}

impl From<ListItem> for TemplateListItem {
    fn from(item: ListItem) -> Self {
        TemplateListItem {
            token: item.token,
            image: image(item.image_url),
            text_content: text_content(item.primary_text, item.secondary_text),
        }
    }
}

impl From<DisplayTemplate> for Template {
    fn from(display: DisplayTemplate) -> Self {
        match display {
            DisplayTemplate::Body {
                title,
                primary_text,
                secondary_text,
                image_url,
            } => Template::BodyTemplate2 {
                token: "person".to_string(),
                back_button: "VISIBLE".to_string(),
                title,
                image: image(image_url),
                text_content: text_content(primary_text, secondary_text),
            },
            DisplayTemplate::List { title, items } => Template::ListTemplate1 {
                token: "results".to_string(),
                back_button: "VISIBLE".to_string(),
                title,
                list_items: items.into_iter().map(TemplateListItem::from).collect(),
            },
        }
    }
}

impl SkillResponse {
    pub fn from_reply(reply: Reply, session_attributes: serde_json::Value) -> Self {
        let reprompt = match reply.end_session {
            true => None,
            false => reply.reprompt.map(|ssml| Reprompt {
                output_speech: OutputSpeech::Ssml { ssml },
            }),
        };

        let directives = reply
            .display
            .map(|display| Directive::RenderTemplate {
                template: Template::from(display),
            })
            .into_iter()
            .collect();

        SkillResponse {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: Some(session_attributes),
            response: ResponseBody {
                output_speech: Some(OutputSpeech::Ssml { ssml: reply.speech }),
                reprompt,
                card: reply.card.map(CardBody::from),
                directives,
                should_end_session: Some(reply.end_session),
            },
        }
    }

    /// The platform ignores the body of a reply to a session ending
    pub fn empty() -> Self {
        SkillResponse {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: None,
            response: ResponseBody::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn people_request() -> SkillRequest {
        serde_json::from_value(json!({
            "version": "1.0",
            "session": {
                "new": true,
                "sessionId": "amzn1.echo-api.session.1",
                "application": { "applicationId": "amzn1.ask.skill.1" },
                "attributes": {}
            },
            "context": {
                "System": {
                    "device": { "supportedInterfaces": { "Display": {} } }
                }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.1",
                "locale": "en-US",
                "intent": {
                    "name": "iSearchIntentPeopleFirst",
                    "confirmationStatus": "NONE",
                    "slots": {
                        "firstName": { "name": "firstName", "value": "Michael" },
                        "lastName": { "name": "lastName" }
                    }
                }
            }
        }))
        .unwrap()
    }

    mod request {
        use super::*;

        #[test]
        fn intent_requests_route_by_intent_name() {
            assert_eq!(people_request().route(), "iSearchIntentPeopleFirst");
        }

        #[test]
        fn other_requests_route_by_type() {
            let request: SkillRequest = serde_json::from_value(json!({
                "request": { "type": "Display.ElementSelected", "token": "item_2" }
            }))
            .unwrap();

            assert_eq!(request.route(), "Display.ElementSelected");
            assert_eq!(request.request.token.as_deref(), Some("item_2"));
            assert!(!request.display_supported());
        }

        #[test]
        fn slots_without_value_are_missing() {
            let request = people_request();

            assert_eq!(request.slot("firstName"), Some("Michael"));
            assert_eq!(request.slot("lastName"), None);
            assert_eq!(request.slot("titleSearchPhrase"), None);
        }

        #[test]
        fn display_interface_is_detected() {
            assert!(people_request().display_supported());
        }
    }

    mod response {
        use super::*;

        #[test]
        fn question_keeps_session_open_with_reprompt() {
            let reply = Reply::question("<speak>Hi</speak>".to_string(), "<speak>Again</speak>".to_string())
                .with_card(Card::Simple {
                    title: "Title".to_string(),
                    content: "Content".to_string(),
                });

            let response = SkillResponse::from_reply(reply, json!({ "cursor": 1 }));

            assert_eq!(
                serde_json::to_value(&response).unwrap(),
                json!({
                    "version": "1.0",
                    "sessionAttributes": { "cursor": 1 },
                    "response": {
                        "outputSpeech": { "type": "SSML", "ssml": "<speak>Hi</speak>" },
                        "reprompt": {
                            "outputSpeech": { "type": "SSML", "ssml": "<speak>Again</speak>" }
                        },
                        "card": { "type": "Simple", "title": "Title", "content": "Content" },
                        "shouldEndSession": false
                    }
                })
            );
        }

        #[test]
        fn statement_ends_session_without_reprompt() {
            let reply = Reply::statement("<speak>Goodbye</speak>".to_string());

            let value = serde_json::to_value(SkillResponse::from_reply(reply, json!({}))).unwrap();

            assert_eq!(value["response"]["shouldEndSession"], json!(true));
            assert!(value["response"].get("reprompt").is_none());
        }

        #[test]
        fn list_display_becomes_render_template_directive() {
            let reply = Reply::question(String::new(), String::new()).with_display(Some(
                DisplayTemplate::List {
                    title: "Results".to_string(),
                    items: vec![ListItem {
                        token: "item_1".to_string(),
                        primary_text: "1. Ann Smith".to_string(),
                        secondary_text: "Dean".to_string(),
                        image_url: None,
                    }],
                },
            ));

            let value = serde_json::to_value(SkillResponse::from_reply(reply, json!({}))).unwrap();
            let directive = &value["response"]["directives"][0];

            assert_eq!(directive["type"], json!("Display.RenderTemplate"));
            assert_eq!(directive["template"]["type"], json!("ListTemplate1"));
            assert_eq!(directive["template"]["listItems"][0]["token"], json!("item_1"));
            assert_eq!(
                directive["template"]["listItems"][0]["textContent"]["secondaryText"]["text"],
                json!("Dean")
            );
        }

        #[test]
        fn standard_card_carries_image_urls() {
            let card = CardBody::from(Card::Standard {
                title: "Michael Crow".to_string(),
                text: "President".to_string(),
                small_image_url: "https://photos/mcrow?size=small".to_string(),
                large_image_url: "https://photos/mcrow?size=large".to_string(),
            });

            let value = serde_json::to_value(card).unwrap();

            assert_eq!(value["type"], json!("Standard"));
            assert_eq!(
                value["image"]["smallImageUrl"],
                json!("https://photos/mcrow?size=small")
            );
        }

        #[test]
        fn empty_response_has_no_speech() {
            let value = serde_json::to_value(SkillResponse::empty()).unwrap();

            assert_eq!(value, json!({ "version": "1.0", "response": {} }));
        }
    }
}
