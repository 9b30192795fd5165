//! Interview records and the state responses they carry.
//!
//! An `InterviewRecord` is a named snapshot of one interview step: the field
//! values entered so far, the last state response received from the server,
//! and opaque metadata. Records are replaced wholesale on every step
//! transition; there is no partial update.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::Schema;

/// Title shown for a question whose schema has none.
pub const DEFAULT_QUESTION_TITLE: &str = "Question";

/// The content of an incomplete state response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepContent {
    /// Ask the user a question described by `schema`.
    Question { schema: Schema },

    /// End the interview early with an explanation.
    Exit {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl StepContent {
    pub fn title(&self) -> &str {
        match self {
            StepContent::Question { schema } => schema.title_or(DEFAULT_QUESTION_TITLE),
            StepContent::Exit { title, .. } => title.as_str(),
        }
    }
}

/// The server's answer to an update request.
///
/// On the wire the two variants are distinguished by the boolean `complete`
/// key rather than a string tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawStateResponse", into = "RawStateResponse")]
pub enum StateResponse {
    Incomplete {
        /// Opaque state token to send back with the next update.
        state: String,
        content: Option<StepContent>,
        update_url: String,
    },
    Complete {
        state: String,
        target_url: Option<String>,
    },
}

impl StateResponse {
    pub fn state(&self) -> &str {
        match self {
            StateResponse::Incomplete { state, .. } | StateResponse::Complete { state, .. } => {
                state.as_str()
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, StateResponse::Complete { .. })
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawStateResponse {
    state: String,
    complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<StepContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    update_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_url: Option<String>,
}

impl TryFrom<RawStateResponse> for StateResponse {
    type Error = String;

    fn try_from(raw: RawStateResponse) -> Result<Self, Self::Error> {
        if raw.complete {
            return Ok(StateResponse::Complete {
                state: raw.state,
                target_url: raw.target_url,
            });
        }
        let update_url = raw
            .update_url
            .ok_or_else(|| "incomplete state response is missing 'update_url'".to_string())?;
        Ok(StateResponse::Incomplete {
            state: raw.state,
            content: raw.content,
            update_url,
        })
    }
}

impl From<StateResponse> for RawStateResponse {
    fn from(response: StateResponse) -> Self {
        match response {
            StateResponse::Incomplete {
                state,
                content,
                update_url,
            } => RawStateResponse {
                state,
                complete: false,
                content,
                update_url: Some(update_url),
                target_url: None,
            },
            StateResponse::Complete { state, target_url } => RawStateResponse {
                state,
                complete: true,
                content: None,
                update_url: None,
                target_url,
            },
        }
    }
}

/// A named snapshot of one interview step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRecord {
    /// Key the record is stored under.
    pub id: String,
    /// The field values entered for this step.
    #[serde(default)]
    pub field_values: Map<String, Value>,
    /// The last state response, persisted verbatim.
    pub state_response: StateResponse,
    /// Opaque shell-defined metadata.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl InterviewRecord {
    pub fn new(id: impl Into<String>, state_response: StateResponse) -> Self {
        Self {
            id: id.into(),
            field_values: Map::new(),
            state_response,
            metadata: Map::new(),
        }
    }

    /// The content to display for this record, if any.
    ///
    /// Complete responses and incomplete responses without content have
    /// nothing to show.
    pub fn content(&self) -> Option<&StepContent> {
        match &self.state_response {
            StateResponse::Incomplete { content, .. } => content.as_ref(),
            StateResponse::Complete { .. } => None,
        }
    }
}
