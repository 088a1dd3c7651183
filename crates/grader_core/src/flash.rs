use std::time::Duration;

use chrono::{DateTime, Utc};

pub type FlashId = u64;

/// How long an info message stays before its timer removes it.
pub const INFO_FLASH_LIFETIME: Duration = Duration::from_millis(8000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    /// Auto-dismiss delay. Errors stay until the user closes them.
    pub fn lifetime(self) -> Option<Duration> {
        match self {
            Severity::Info => Some(INFO_FLASH_LIFETIME),
            Severity::Error => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub id: FlashId,
    pub text: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// Ordered queue of dismissible notices, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlashMessenger {
    messages: Vec<FlashMessage>,
    next_id: FlashId,
}

impl FlashMessenger {
    /// Appends a message and returns its id together with the expiry delay, if any.
    pub(crate) fn show(
        &mut self,
        text: impl Into<String>,
        severity: Severity,
        created_at: DateTime<Utc>,
    ) -> (FlashId, Option<Duration>) {
        self.next_id += 1;
        let id = self.next_id;
        self.messages.push(FlashMessage {
            id,
            text: text.into(),
            severity,
            created_at,
        });
        (id, severity.lifetime())
    }

    /// Removes the message if it is still present. Returns whether anything was removed.
    pub(crate) fn remove(&mut self, id: FlashId) -> bool {
        match self.messages.iter().position(|message| message.id == id) {
            Some(index) => {
                self.messages.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) -> bool {
        let had_any = !self.messages.is_empty();
        self.messages.clear();
        had_any
    }

    pub fn messages(&self) -> &[FlashMessage] {
        &self.messages
    }

    pub fn contains(&self, id: FlashId) -> bool {
        self.messages.iter().any(|message| message.id == id)
    }
}
