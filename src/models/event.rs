use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::lenient;
use crate::constants::{EVENT_COMMENTED, EVENT_REOPENED};

/// One timeline event on an issue.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "lenient::string")]
    pub event_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub comment: Option<String>,
}

impl Event {
    /// Build an event from a raw record. Anything that is not an object
    /// (including null) gives an event with every field absent.
    pub fn from_value(value: &Value) -> Self {
        Event::deserialize(value).unwrap_or_default()
    }

    pub fn is_type(&self, kind: &str) -> bool {
        self.event_type.as_deref() == Some(kind)
    }

    pub fn is_comment(&self) -> bool {
        self.is_type(EVENT_COMMENTED)
    }

    pub fn is_reopen(&self) -> bool {
        self.is_type(EVENT_REOPENED)
    }
}
