use serde::Deserialize;

/// Today's outbound message count, as reported by `/api/crm/stats/daily`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyStats {
    pub sent: u64,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactsResponse {
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// The chats endpoint returns the same contact rows, ordered by activity.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatsResponse {
    #[serde(default)]
    pub chats: Vec<Contact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub jid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub custom_name: Option<String>,
    #[serde(default)]
    pub last_message_time: Option<String>,
}

impl Contact {
    /// Resolved display name: `custom_name`, then `name`, then the JID.
    /// Empty strings count as absent.
    pub fn display_name(&self) -> &str {
        non_empty(&self.custom_name)
            .or_else(|| non_empty(&self.name))
            .unwrap_or(&self.jid)
    }

    pub fn last_message_time(&self) -> &str {
        self.last_message_time.as_deref().unwrap_or("N/A")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default)]
    pub from_me: bool,
    #[serde(default)]
    pub message_timestamp: Option<String>,
}

/// Maximum number of characters shown for a message body.
pub const PREVIEW_LEN: usize = 50;

impl Message {
    pub fn kind(&self) -> &str {
        self.message_type.as_deref().unwrap_or("unknown")
    }

    /// Message body truncated for display; media messages have no text.
    pub fn preview(&self) -> &str {
        truncate_chars(
            self.text_content.as_deref().unwrap_or("[media message]"),
            PREVIEW_LEN,
        )
    }

    pub fn direction(&self) -> &'static str {
        if self.from_me {
            "me"
        } else {
            "them"
        }
    }

    pub fn timestamp(&self) -> &str {
        self.message_timestamp.as_deref().unwrap_or("N/A")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Truncates on character boundaries, not bytes.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Outcome of a single check. A remote rejection is data, not an error:
/// the run keeps going and the rejection is rendered like any other result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Rejected { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct CheckReport {
    pub name: &'static str,
    pub status: CheckStatus,
    pub lines: Vec<String>,
}

impl CheckReport {
    pub fn passed(name: &'static str, lines: Vec<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Passed,
            lines,
        }
    }

    pub fn rejected(name: &'static str, status: u16, body: String) -> Self {
        Self {
            name,
            status: CheckStatus::Rejected { status, body },
            lines: Vec::new(),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }
}
