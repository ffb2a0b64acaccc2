//! # Commands
//!
//! One module per user action. Each `run` function mutates or reads the
//! store, writes the matching audit entry, and returns a [`CmdResult`]
//! describing what happened. Nothing here prints.
//!
//! Audit entries are written for rejected actions too: a validation or
//! duplicate-id failure logs `<ACTION>_FAILED`, a failed save logs
//! `<ACTION>_ERROR`. The error itself is still returned to the caller.

use crate::index::DisplayRecord;
use crate::model::{AuditEntry, InventoryRecord};

pub mod add;
pub mod audit_log;
pub mod delete;
pub mod helpers;
pub mod init;
pub mod load;
pub mod search;
pub mod session;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
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
    pub affected_records: Vec<InventoryRecord>,
    pub listed_records: Vec<DisplayRecord>,
    pub audit_entries: Vec<AuditEntry>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<InventoryRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<DisplayRecord>) -> Self {
        self.listed_records = records;
        self
    }

    pub fn with_audit_entries(mut self, entries: Vec<AuditEntry>) -> Self {
        self.audit_entries = entries;
        self
    }
}
