use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use crate::{default_timestamp, repository::Entity};

/// A publishing container (volume/number) that submissions are attached to.
/// `is_open` and `edited_by` are the two attributes this service owns; the
/// rest mirrors the journal's own issue record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: i64,
    pub context_id: i64,
    pub volume: Option<i32>,
    pub number: Option<String>,
    pub year: Option<i32>,
    pub title: Option<String>,
    pub published: bool,
    pub is_open: Option<bool>,
    pub edited_by: Option<Vec<i64>>,
    #[serde(default = "default_timestamp")]
    pub last_modified: i64,
}

impl Issue {
    /// Strict check: only an explicit `true` counts as open. A missing or
    /// false flag, or anything a form once left behind, means closed.
    pub fn is_open_for_submission(&self) -> bool {
        self.is_open == Some(true)
    }

    /// Display identification, e.g. "Vol. 1 No. 2 (2024): Special Issue".
    pub fn identification(&self) -> String {
        let mut parts = Vec::new();
        if let Some(volume) = self.volume {
            parts.push(format!("Vol. {}", volume));
        }
        if let Some(number) = &self.number {
            parts.push(format!("No. {}", number));
        }
        if let Some(year) = self.year {
            parts.push(format!("({})", year));
        }
        let identification = parts.join(" ");

        match &self.title {
            Some(title) if !title.is_empty() => {
                if identification.is_empty() {
                    title.clone()
                } else {
                    format!("{}: {}", identification, title)
                }
            }
            _ => identification,
        }
    }
}

impl Entity for Issue {
    fn id(&self) -> Bson {
        Bson::Int64(self.id)
    }

    fn last_modified(&self) -> i64 {
        self.last_modified
    }
}
