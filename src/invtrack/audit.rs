//! # Audit Trail
//!
//! An append-only CSV log of user actions, kept apart from the inventory
//! file. Each action adds exactly one line; nothing here ever rewrites or
//! truncates the file.
//!
//! Writing is best effort. An audit failure is reported through `tracing`
//! and swallowed, so it can never block or fail the action it describes.
//! [`AppendOutcome`] tells the caller whether the line actually landed, which
//! is what a view should wait on before re-reading the file.

use crate::codec::{self, AUDIT_HEADER};
use crate::error::{InvError, Result};
use crate::model::{AuditAction, AuditEntry, AuditStatus, InventoryRecord};
use chrono::Local;
use once_cell::unsync::OnceCell;
use std::fs::{self, OpenOptions};
use std::io::{self, BufReader, Write};
use std::net::UdpSocket;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const FALLBACK_ADDRESS: &str = "127.0.0.1";
const UNKNOWN_USER: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Written,
    Dropped,
}

impl AppendOutcome {
    pub fn is_written(self) -> bool {
        self == AppendOutcome::Written
    }
}

/// Best-effort address of this machine on its default route.
///
/// Connecting a UDP socket only selects a route; no datagram is sent.
pub fn local_address() -> String {
    UdpSocket::bind(("0.0.0.0", 0))
        .and_then(|socket| {
            socket.connect(("192.0.2.1", 9))?;
            socket.local_addr()
        })
        .map(|addr| addr.ip())
        .ok()
        .filter(|ip| !ip.is_unspecified())
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| FALLBACK_ADDRESS.to_string())
}

pub struct AuditTrail {
    path: PathBuf,
    ip_address: OnceCell<String>,
}

impl AuditTrail {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ip_address: OnceCell::new(),
        }
    }

    /// Pins the address stamped on entries instead of resolving it.
    pub fn with_ip_address(self, ip: impl Into<String>) -> Self {
        let ip_address = OnceCell::new();
        let _ = ip_address.set(ip.into());
        Self { ip_address, ..self }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ip_address(&self) -> &str {
        self.ip_address.get_or_init(local_address)
    }

    /// Creates the file with its header if it is absent, and gives an empty
    /// existing file its header.
    ///
    /// Returns `true` when this call wrote the header.
    pub fn ensure_initialized(&self) -> io::Result<bool> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", AUDIT_HEADER) {
                    drop(file);
                    let _ = fs::remove_file(&self.path);
                    return Err(e);
                }
                info!(path = %self.path.display(), "audit log file created");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if fs::metadata(&self.path)?.len() > 0 {
                    return Ok(false);
                }
                let mut file = OpenOptions::new().append(true).open(&self.path)?;
                writeln!(file, "{}", AUDIT_HEADER)?;
                info!(path = %self.path.display(), "wrote header to empty audit log file");
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }

    /// Builds an entry stamped with the current local time and this
    /// machine's address.
    pub fn entry(
        &self,
        username: &str,
        action: AuditAction,
        status: AuditStatus,
        details: impl Into<String>,
    ) -> AuditEntry {
        let username = if username.trim().is_empty() {
            UNKNOWN_USER
        } else {
            username
        };
        AuditEntry {
            timestamp: Some(Local::now().naive_local()),
            raw_timestamp: String::new(),
            username: username.to_string(),
            action,
            ip_address: self.ip_address().to_string(),
            status,
            details: details.into(),
        }
    }

    fn try_append(&self, entry: &AuditEntry) -> io::Result<()> {
        self.ensure_initialized()?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        let line = format!("{}\n", codec::encode_audit(entry));
        file.write_all(line.as_bytes())
    }

    /// Appends one line. Never fails; see [`AppendOutcome`].
    pub fn append(&self, entry: &AuditEntry) -> AppendOutcome {
        match self.try_append(entry) {
            Ok(()) => {
                debug!(action = %entry.action, status = %entry.status, "audit entry written");
                AppendOutcome::Written
            }
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    action = %entry.action,
                    error = %e,
                    "failed to write audit entry"
                );
                AppendOutcome::Dropped
            }
        }
    }

    pub fn record(
        &self,
        username: &str,
        action: AuditAction,
        status: AuditStatus,
        details: impl Into<String>,
    ) -> AppendOutcome {
        let entry = self.entry(username, action, status, details);
        self.append(&entry)
    }

    /// Every entry after the header, in file order.
    ///
    /// Short lines are kept with their missing fields empty. A missing file
    /// reads as no entries.
    pub fn read_all(&self) -> Result<Vec<AuditEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&self.path).map_err(InvError::Io)?;
        let mut entries = Vec::new();
        for line in codec::lossy_lines(BufReader::new(file)).skip(1) {
            let line = line.map_err(InvError::Io)?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(codec::decode_audit(&line));
        }
        Ok(entries)
    }

    // --- Authentication ---

    pub fn login_attempt(&self, username: &str) -> AppendOutcome {
        self.record(
            username,
            AuditAction::LoginAttempt,
            AuditStatus::Info,
            "Login attempt initiated",
        )
    }

    pub fn login_success(&self, username: &str) -> AppendOutcome {
        self.record(
            username,
            AuditAction::LoginSuccess,
            AuditStatus::Success,
            "User successfully logged in",
        )
    }

    pub fn login_failed(&self, username: &str, reason: &str) -> AppendOutcome {
        self.record(
            username,
            AuditAction::LoginFailed,
            AuditStatus::Failed,
            format!("Login failed: {}", reason),
        )
    }

    pub fn logout(&self, username: &str) -> AppendOutcome {
        self.record(
            username,
            AuditAction::Logout,
            AuditStatus::Success,
            "User logged out",
        )
    }

    pub fn password_change(&self, username: &str) -> AppendOutcome {
        self.record(
            username,
            AuditAction::PasswordChange,
            AuditStatus::Success,
            "Password changed successfully",
        )
    }

    pub fn account_locked(&self, username: &str, reason: &str) -> AppendOutcome {
        self.record(
            username,
            AuditAction::AccountLocked,
            AuditStatus::Warning,
            format!("Account locked: {}", reason),
        )
    }

    // --- Inventory ---

    pub fn add_item(&self, username: &str, record: &InventoryRecord) -> AppendOutcome {
        self.record(
            username,
            AuditAction::AddItem,
            AuditStatus::Success,
            format!(
                "Added new item: ID={}, Name={}, Category={}, Quantity={}",
                record.id, record.name, record.category, record.quantity
            ),
        )
    }

    pub fn update_item(
        &self,
        username: &str,
        old: &InventoryRecord,
        new: &InventoryRecord,
    ) -> AppendOutcome {
        self.record(
            username,
            AuditAction::UpdateItem,
            AuditStatus::Success,
            format!(
                "Updated item: Original[ID={}, Name={}] -> New[ID={}, Name={}, Category={}, Quantity={}]",
                old.id, old.name, new.id, new.name, new.category, new.quantity
            ),
        )
    }

    pub fn delete_item(&self, username: &str, record: &InventoryRecord) -> AppendOutcome {
        self.record(
            username,
            AuditAction::DeleteItem,
            AuditStatus::Success,
            format!(
                "Deleted item: ID={}, Name={}, Category={}, Quantity={}",
                record.id, record.name, record.category, record.quantity
            ),
        )
    }

    pub fn load_inventory(&self, username: &str, count: usize) -> AppendOutcome {
        self.record(
            username,
            AuditAction::LoadInventory,
            AuditStatus::Success,
            format!("Loaded inventory data: {} items loaded from file", count),
        )
    }

    pub fn search_inventory(
        &self,
        username: &str,
        keyword: &str,
        found: usize,
        total: usize,
    ) -> AppendOutcome {
        self.record(
            username,
            AuditAction::SearchInventory,
            AuditStatus::Success,
            format!(
                "Searched for keyword: '{}' - Found {} items out of {} total",
                keyword, found, total
            ),
        )
    }

    pub fn view_audit_log(&self, username: &str) -> AppendOutcome {
        self.record(
            username,
            AuditAction::ViewAuditLog,
            AuditStatus::Success,
            "Accessed audit log viewer",
        )
    }

    pub fn refresh_audit_log(&self, username: &str) -> AppendOutcome {
        self.record(
            username,
            AuditAction::RefreshAuditLog,
            AuditStatus::Success,
            "Refreshed audit log data manually",
        )
    }
}
