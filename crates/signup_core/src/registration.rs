//! Registration records and the identifiers they hang off.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Opaque identity of one conversation on the messaging transport.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(value: i64) -> Self {
        ChatId(value)
    }
}

/// The two majors a graduate can register under.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Major {
    #[serde(rename = "کامپیوتر")]
    Computer,
    #[serde(rename = "برق")]
    Electrical,
}

impl Major {
    pub const ALL: [Major; 2] = [Major::Computer, Major::Electrical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Major::Computer => "کامپیوتر",
            Major::Electrical => "برق",
        }
    }

    /// Label shown on the selection button.
    pub fn label(&self) -> &'static str {
        match self {
            Major::Computer => "💻 کامپیوتر",
            Major::Electrical => "⚡ برق",
        }
    }
}

impl fmt::Display for Major {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Major {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::validation::validate_major(s)
    }
}

/// A fully collected registration, ready to be persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NewRegistration {
    pub chat_id: ChatId,
    pub submitter_handle: Option<String>,
    pub full_name: String,
    pub phone: String,
    pub companion_count: u8,
    pub major: Major,
    pub student_id: String,
    pub transaction_ref: String,
}

/// A registration as stored, with its storage id and server-assigned timestamp.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub id: i64,
    pub chat_id: ChatId,
    pub submitter_handle: Option<String>,
    pub full_name: String,
    pub phone: String,
    pub companion_count: u8,
    pub major: Major,
    pub student_id: String,
    pub transaction_ref: String,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn from_new(id: i64, new: NewRegistration, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            chat_id: new.chat_id,
            submitter_handle: new.submitter_handle,
            full_name: new.full_name,
            phone: new.phone,
            companion_count: new.companion_count,
            major: new.major,
            student_id: new.student_id,
            transaction_ref: new.transaction_ref,
            created_at,
        }
    }
}
