use serde::{Deserialize, Serialize};

/// Platform neutral response for one turn
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Reply {
    /// SSML, wrapped in `<speak>`
    pub speech: String,
    /// SSML spoken when the user stays silent, only used while the session is open
    pub reprompt: Option<String>,
    pub card: Option<Card>,
    /// Only attached for devices with a screen
    pub display: Option<DisplayTemplate>,
    pub end_session: bool,
}

impl Reply {
    /// Speaks and ends the conversation
    pub fn statement(speech: String) -> Self {
        Reply {
            speech,
            reprompt: None,
            card: None,
            display: None,
            end_session: true,
        }
    }

    /// Speaks and waits for the user to answer
    pub fn question(speech: String, reprompt: String) -> Self {
        Reply {
            speech,
            reprompt: Some(reprompt),
            card: None,
            display: None,
            end_session: false,
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    pub fn with_display(mut self, display: Option<DisplayTemplate>) -> Self {
        self.display = display;
        self
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Card {
    Simple {
        title: String,
        content: String,
    },
    /// Card with a photo
    Standard {
        title: String,
        text: String,
        small_image_url: String,
        large_image_url: String,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DisplayTemplate {
    /// Single item with an optional image
    Body {
        title: String,
        primary_text: String,
        secondary_text: String,
        image_url: Option<String>,
    },
    /// Scrollable list, each entry selectable by its token
    List { title: String, items: Vec<ListItem> },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ListItem {
    pub token: String,
    pub primary_text: String,
    pub secondary_text: String,
    pub image_url: Option<String>,
}
