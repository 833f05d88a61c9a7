use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::{lenient, Event, State};

/// Sentinel for "no valid issue number was supplied".
pub const NO_NUMBER: i64 = -1;

fn no_number() -> i64 {
    NO_NUMBER
}

/// One tracked issue. `state` is the only field that must be present and
/// valid; everything else degrades to absent or empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub creator: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub labels: Vec<String>,
    pub state: State,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub assignees: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: Option<String>,
    #[serde(default = "no_number", deserialize_with = "lenient::number")]
    pub number: i64,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub timeline_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::events")]
    pub events: Vec<Event>,
}

impl Issue {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Issue::deserialize(value)
    }

    pub fn has_number(&self) -> bool {
        self.number != NO_NUMBER
    }

    pub fn count_events(&self, kind: &str) -> usize {
        self.events.iter().filter(|event| event.is_type(kind)).count()
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn label_count(&self, label: &str) -> usize {
        self.labels.iter().filter(|l| *l == label).count()
    }

    /// Creator plus every event author, each once, in order of first appearance.
    pub fn participants(&self) -> Vec<&str> {
        let mut participants: Vec<&str> = Vec::new();
        let people = self
            .creator
            .as_deref()
            .into_iter()
            .chain(self.events.iter().filter_map(|event| event.author.as_deref()));
        for person in people {
            if !participants.contains(&person) {
                participants.push(person);
            }
        }
        participants
    }
}
