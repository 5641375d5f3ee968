//! # Commands
//!
//! One function per user-facing operation. A command resolves whatever names
//! it was given, performs the API calls, and returns a [`CmdResult`]:
//!
//! - `messages`: human feedback ("Server started", per-item failures of a
//!   bulk loop) printed by the CLI with a color per [`MessageLevel`].
//! - `payload`: the API response to render, already converted to JSON so the
//!   CLI can hand it to the renderer without knowing its type.
//!
//! Commands never print and never read configuration; everything they need
//! arrives as arguments or through the [`ApiClient`](crate::api::ApiClient)
//! context. That keeps them testable against
//! [`MemoryTransport`](crate::transport::memory::MemoryTransport).
//!
//! Only bulk loops (`file delete`, adding project members) swallow errors,
//! and only per item: the failure becomes a message and a `warn!` log line,
//! and the loop moves on. [`CmdResult::failures`] counts those items so the
//! CLI can exit non-zero after printing everything that did succeed.

use crate::error::Result;
use serde::Serialize;

pub mod accounts;
pub mod auth;
pub mod billing;
pub mod files;
pub mod hosts;
pub mod projects;
pub mod servers;
pub mod triggers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    pub payload: Option<serde_json::Value>,
}

impl CmdResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_payload<S: Serialize + ?Sized>(mut self, payload: &S) -> Result<Self> {
        self.payload = Some(serde_json::to_value(payload)?);
        Ok(self)
    }

    /// A result that only renders `payload`.
    pub fn payload<S: Serialize + ?Sized>(payload: &S) -> Result<Self> {
        Self::new().with_payload(payload)
    }

    /// Number of items a best-effort loop reported as failed.
    pub fn failures(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.level == MessageLevel::Error)
            .count()
    }
}

/// Treats empty strings from optional flags as "not given".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_count_error_messages_only() {
        let result = CmdResult::new()
            .with_message(CmdMessage::success("File a deleted"))
            .with_message(CmdMessage::error("Could not delete b: gone"))
            .with_message(CmdMessage::error("Could not delete c: gone"));
        assert_eq!(result.failures(), 2);
    }

    #[test]
    fn test_no_failures_when_all_succeed() {
        let result = CmdResult::new().with_message(CmdMessage::success("Server started"));
        assert_eq!(result.failures(), 0);
    }
}
